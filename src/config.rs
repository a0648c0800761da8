//! Builder configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config file.

use anyhow::{Context, Result};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::editor::handles::HandleKind;
use crate::editor::history::DEFAULT_HISTORY_LIMIT;
use crate::editor::value_drag::DragRange;

/// Default number of code versions kept per block.
pub const DEFAULT_CODE_VERSION_LIMIT: usize = 20;

/// Drag ranges for each handle family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HandleRanges {
    pub padding: DragRange,
    pub gap: DragRange,
    pub span: DragRange,
}

impl Default for HandleRanges {
    fn default() -> Self {
        Self {
            padding: DragRange::new(0.0, 200.0, 4.0),
            gap: DragRange::new(0.0, 60.0, 2.0),
            span: DragRange::new(1.0, 12.0, 1.0),
        }
    }
}

impl HandleRanges {
    pub fn for_kind(&self, kind: HandleKind) -> DragRange {
        match kind {
            HandleKind::Padding => self.padding,
            HandleKind::Gap => self.gap,
            HandleKind::Span => self.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuilderConfig {
    /// Maximum undo depth.
    pub history_limit: usize,
    /// Maximum code versions kept per block.
    pub code_version_limit: usize,
    pub handles: HandleRanges,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            code_version_limit: DEFAULT_CODE_VERSION_LIMIT,
            handles: HandleRanges::default(),
        }
    }
}

impl BuilderConfig {
    /// Parse a config object. Anything other than a JSON object is rejected.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let object: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(json).context("Builder configuration must be a JSON object")?;
        serde_json::from_value(serde_json::Value::Object(object))
            .context("Invalid builder configuration")
    }

    pub fn from_json_file(path: &Utf8Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path))?;
        Self::from_json_str(&text).with_context(|| format!("Failed to parse config {}", path))
    }
}
