// src/storage/mod.rs
use crate::parser::models::WcagDocument;
use crate::utils::error::StorageError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Owns the on-disk layout: fetched HTML is cached under
/// `wcag{version}-html/`, extracted JSON lands under `wcag{version}-json/`.
pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    fn html_path(&self, version: &str, lang: &str) -> PathBuf {
        self.base_dir
            .join(format!("wcag{}-html", version))
            .join(format!("wcag{}-{}.html", version, lang))
    }

    fn json_path(&self, version: &str, lang: &str) -> PathBuf {
        self.base_dir
            .join(format!("wcag{}-json", version))
            .join(format!("wcag{}-{}.json", version, lang))
    }

    /// Returns the cached HTML for a version/language pair, or `None` when
    /// nothing has been fetched yet.
    pub fn load_cached_html(&self, version: &str, lang: &str) -> Result<Option<String>, StorageError> {
        let path = self.html_path(version, lang);
        if !path.exists() {
            return Ok(None);
        }

        tracing::info!("Reading cached HTML from {}", path.display());
        Ok(Some(fs::read_to_string(&path)?))
    }

    /// Caches freshly fetched HTML so later runs can skip the network.
    pub fn save_html(&self, version: &str, lang: &str, html: &str) -> Result<PathBuf, StorageError> {
        let path = self.html_path(version, lang);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(StorageError::IoError)?;
        }

        fs::write(&path, html)?;
        tracing::info!("Cached HTML at {}", path.display());

        Ok(path)
    }

    /// Writes the extracted tree as indented JSON, the file-level artifact
    /// downstream tooling consumes.
    pub fn save_document(
        &self,
        version: &str,
        lang: &str,
        document: &WcagDocument,
    ) -> Result<PathBuf, StorageError> {
        let path = self.json_path(version, lang);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(StorageError::IoError)?;
        }

        // 4-space indent keeps the output diffable against earlier releases
        // of the dataset.
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut buf = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        document
            .serialize(&mut serializer)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        buf.push(b'\n');

        fs::write(&path, buf)?;
        tracing::info!("Saved extracted JSON to {}", path.display());

        Ok(path)
    }
}
