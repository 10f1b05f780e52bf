// src/w3c/client.rs
use crate::utils::error::FetchError;
use once_cell::sync::Lazy;
use reqwest::header;
use std::collections::HashMap;
use std::time::Duration;

const W3C_USER_AGENT: &str = concat!("wcag_extractor/", env!("CARGO_PKG_VERSION"));
// w3.org is not rate-limited like an API, but stay polite anyway.
const W3C_REQUEST_DELAY_MS: u64 = 150;

// Published locations of the standard, per version and language.
static TRANSLATION_URLS: Lazy<HashMap<String, HashMap<String, String>>> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../resources/translations.json"))
        .expect("Failed to parse embedded translations.json")
});

/// Resolves the source URL for a version/language pair from the embedded
/// translation table.
pub fn translation_url(version: &str, lang: &str) -> Result<&'static str, FetchError> {
    TRANSLATION_URLS
        .get(version)
        .and_then(|langs| langs.get(lang))
        .map(String::as_str)
        .ok_or_else(|| FetchError::UnknownTranslation {
            version: version.to_string(),
            lang: lang.to_string(),
        })
}

/// Creates a reqwest client configured for fetching from w3.org.
fn build_w3c_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(W3C_USER_AGENT)
        .build()
}

/// Downloads the published standard document from its URL.
pub async fn download_standard(url: &str) -> Result<String, FetchError> {
    let client = build_w3c_client()?;

    tracing::info!("Downloading standard from: {}", url);
    tokio::time::sleep(Duration::from_millis(W3C_REQUEST_DELAY_MS)).await;

    let response = client
        .get(url)
        .header(header::ACCEPT, "text/html,application/xhtml+xml,*/*")
        .send()
        .await?; // Propagates reqwest::Error as FetchError::Network

    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::DocumentNotFound(url.to_string()));
        }
        return Err(FetchError::Http(status));
    }

    let body = response.text().await?;
    tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);

    Ok(body)
}
