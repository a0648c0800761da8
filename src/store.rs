//! Document persistence.
//!
//! The editing core never touches storage. A [`DocumentStore`] is called
//! around it: load before a session starts, save after edits.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

use crate::model::PageDocument;

/// Loads and saves page documents by logical path.
pub trait DocumentStore {
    fn load(&mut self, path: &Utf8Path) -> Result<PageDocument>;
    fn save(&mut self, path: &Utf8Path, doc: &PageDocument) -> Result<()>;
}

/// Stores documents as pretty-printed JSON arrays on the local filesystem,
/// relative to `root`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: Utf8PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn resolve(&self, path: &Utf8Path) -> Utf8PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&mut self, path: &Utf8Path) -> Result<PageDocument> {
        let full = self.resolve(path);
        let text = std::fs::read_to_string(full.as_std_path())
            .with_context(|| format!("Failed to read {}", full))?;
        let doc = PageDocument::from_json(&text)
            .with_context(|| format!("Failed to parse page document {}", full))?;
        debug!(path = %full, blocks = doc.len(), "store: loaded");
        Ok(doc)
    }

    fn save(&mut self, path: &Utf8Path, doc: &PageDocument) -> Result<()> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            if !parent.as_str().is_empty() {
                std::fs::create_dir_all(parent.as_std_path())
                    .with_context(|| format!("Create dir {}", parent))?;
            }
        }
        let json = doc.to_json_pretty()?;
        std::fs::write(full.as_std_path(), json)
            .with_context(|| format!("Failed to write {}", full))?;
        info!(path = %full, blocks = doc.len(), "store: saved");
        Ok(())
    }
}
