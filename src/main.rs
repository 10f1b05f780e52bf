// src/main.rs
mod parser;
mod storage;
mod utils;
mod w3c;

use clap::Parser;
use storage::StorageManager;
use utils::AppError;
use w3c::client;

/// Command Line Interface for the WCAG-to-JSON extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Language variant of the standard to process
    #[arg(short, long, default_value = "en")]
    lang: String,

    /// Standard version to process (only "21" is supported)
    #[arg(long, default_value = "21")]
    standard: String,

    /// Base directory for cached HTML and extracted JSON
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Re-download the source document even if a cached copy exists
    #[arg(short, long)]
    refresh: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting extraction for args: {:?}", args);

    // WCAG 2.0 uses a different markup convention this parser does not speak.
    if args.standard != "21" {
        return Err(AppError::Config(format!(
            "Unsupported standard version '{}': only 21 is supported",
            args.standard
        )));
    }

    // 3. Initialize storage
    let storage = StorageManager::new(&args.output_dir)?;

    // 4. Get the source HTML, from cache or from w3.org
    let cached = if args.refresh {
        None
    } else {
        storage.load_cached_html(&args.standard, &args.lang)?
    };

    let html = match cached {
        Some(html) => {
            tracing::info!("Using cached HTML ({} bytes)", html.len());
            html
        }
        None => {
            let url = client::translation_url(&args.standard, &args.lang)?;
            let html = client::download_standard(url).await?;
            storage.save_html(&args.standard, &args.lang, &html)?;
            html
        }
    };

    // 5. Parse the document into the typed tree
    let document = parser::parse_document(&html)?;

    let guideline_count: usize = document.principles.iter().map(|p| p.guidelines.len()).sum();
    let criterion_count: usize = document
        .principles
        .iter()
        .flat_map(|p| &p.guidelines)
        .map(|g| g.success_criteria.len())
        .sum();
    tracing::info!(
        "Extracted {} principles, {} guidelines, {} success criteria",
        document.principles.len(),
        guideline_count,
        criterion_count
    );

    if document.principles.is_empty() {
        tracing::warn!("No principle sections found; writing an empty tree");
    }

    // 6. Save the extracted JSON
    let path = storage.save_document(&args.standard, &args.lang, &document)?;
    tracing::info!("Extraction finished: {}", path.display());

    Ok(())
}
