//! Page document model: blocks, their ids and modes, and the persisted
//! JSON shape.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::content::{BlockContent, ResolvedContent};
use crate::error::ModelError;

// ────────────────────────────────────────────────────────────────────────────
// BlockKind
// ────────────────────────────────────────────────────────────────────────────

/// The closed set of widget kinds a page can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    Hero,
    Heading,
    Text,
    Image,
    Button,
    Features,
    Testimonial,
    Divider,
    Spacer,
    Form,
    Container,
    Grid,
    FlexContainer,
    SmartGrid,
}

impl BlockKind {
    pub const ALL: [BlockKind; 14] = [
        BlockKind::Hero,
        BlockKind::Heading,
        BlockKind::Text,
        BlockKind::Image,
        BlockKind::Button,
        BlockKind::Features,
        BlockKind::Testimonial,
        BlockKind::Divider,
        BlockKind::Spacer,
        BlockKind::Form,
        BlockKind::Container,
        BlockKind::Grid,
        BlockKind::FlexContainer,
        BlockKind::SmartGrid,
    ];

    /// Wire name, also the key of the content sub-object.
    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Hero => "hero",
            BlockKind::Heading => "heading",
            BlockKind::Text => "text",
            BlockKind::Image => "image",
            BlockKind::Button => "button",
            BlockKind::Features => "features",
            BlockKind::Testimonial => "testimonial",
            BlockKind::Divider => "divider",
            BlockKind::Spacer => "spacer",
            BlockKind::Form => "form",
            BlockKind::Container => "container",
            BlockKind::Grid => "grid",
            BlockKind::FlexContainer => "flexContainer",
            BlockKind::SmartGrid => "smartGrid",
        }
    }

    /// True for kinds carrying a style configuration.
    pub fn has_style_config(self) -> bool {
        matches!(self, BlockKind::FlexContainer | BlockKind::SmartGrid)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ModelError::UnknownBlockType(s.to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Block
// ────────────────────────────────────────────────────────────────────────────

/// Opaque block identifier, unique within a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// A fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which representation of a block is the editable source of truth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockMode {
    #[default]
    Visual,
    Code,
}

/// One saved revision of a block's markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeVersion {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub html_content: String,
}

/// One visual unit on a page.
///
/// The block's kind is the variant of `content`, so a block can never carry
/// content for a different kind. When `mode` is [`BlockMode::Code`],
/// `html_content` holds the editable markup and `last_visual_snapshot` the
/// content that was active when code mode was entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BlockRecord", into = "BlockRecord")]
pub struct Block {
    pub id: BlockId,
    pub content: BlockContent,
    pub mode: BlockMode,
    pub html_content: Option<String>,
    pub last_visual_snapshot: Option<BlockContent>,
    pub code_version_history: Vec<CodeVersion>,
}

impl Block {
    /// A new block of `kind` with a fresh id and the kind's default content.
    pub fn new(kind: BlockKind) -> Self {
        Self::with_content(BlockContent::defaults_for(kind))
    }

    /// A new visual block with a fresh id and the given content.
    pub fn with_content(content: BlockContent) -> Self {
        Self {
            id: BlockId::generate(),
            content,
            mode: BlockMode::Visual,
            html_content: None,
            last_visual_snapshot: None,
            code_version_history: Vec::new(),
        }
    }

    pub fn kind(&self) -> BlockKind {
        self.content.kind()
    }

    pub fn resolved(&self) -> ResolvedContent {
        self.content.resolve()
    }

    /// A deep copy with a fresh id.
    pub fn duplicate(&self) -> Self {
        Self {
            id: BlockId::generate(),
            ..self.clone()
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wire shape
// ────────────────────────────────────────────────────────────────────────────

/// Persisted block shape: `content` is an object keyed by the type name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlockRecord {
    id: String,
    #[serde(rename = "type")]
    kind: BlockKind,
    #[serde(default)]
    content: Map<String, Value>,
    #[serde(default)]
    mode: BlockMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    html_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_visual_snapshot: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    code_version_history: Vec<CodeVersion>,
}

/// Pick the sub-object for `kind` out of a keyed content map. A missing
/// sub-object means "all defaults".
fn content_from_map(
    id: &str,
    kind: BlockKind,
    map: &Map<String, Value>,
) -> Result<BlockContent, ModelError> {
    let Some(inner) = map.get(kind.as_str()) else {
        return Ok(BlockContent::empty(kind));
    };
    if inner.is_null() {
        return Ok(BlockContent::empty(kind));
    }
    let mut keyed = Map::new();
    keyed.insert(kind.as_str().to_string(), inner.clone());
    serde_json::from_value(Value::Object(keyed)).map_err(|source| ModelError::InvalidContent {
        id: id.to_string(),
        source,
    })
}

fn content_to_map(content: &BlockContent) -> Map<String, Value> {
    match serde_json::to_value(content) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

impl TryFrom<BlockRecord> for Block {
    type Error = ModelError;

    fn try_from(record: BlockRecord) -> Result<Self, Self::Error> {
        let content = content_from_map(&record.id, record.kind, &record.content)?;
        let last_visual_snapshot = record
            .last_visual_snapshot
            .as_ref()
            .map(|map| content_from_map(&record.id, record.kind, map))
            .transpose()?;
        Ok(Block {
            id: BlockId(record.id),
            content,
            mode: record.mode,
            html_content: record.html_content,
            last_visual_snapshot,
            code_version_history: record.code_version_history,
        })
    }
}

impl From<Block> for BlockRecord {
    fn from(block: Block) -> Self {
        BlockRecord {
            kind: block.kind(),
            content: content_to_map(&block.content),
            id: block.id.0,
            mode: block.mode,
            html_content: block.html_content,
            last_visual_snapshot: block.last_visual_snapshot.as_ref().map(content_to_map),
            code_version_history: block.code_version_history,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// PageDocument
// ────────────────────────────────────────────────────────────────────────────

/// An ordered list of blocks. Order is render order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageDocument {
    blocks: Vec<Block>,
}

impl PageDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document, rejecting duplicate ids.
    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self, ModelError> {
        let doc = Self { blocks };
        doc.validate()?;
        Ok(doc)
    }

    /// Parse the persisted JSON array form and validate it.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let doc: PageDocument = serde_json::from_str(json)?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn to_json_pretty(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every block id is unique and that every code-mode block
    /// carries both its markup and the snapshot it reverts to.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut seen = HashSet::new();
        for block in &self.blocks {
            if !seen.insert(&block.id) {
                return Err(ModelError::DuplicateBlockId(block.id.to_string()));
            }
            if block.mode == BlockMode::Code
                && (block.html_content.is_none() || block.last_visual_snapshot.is_none())
            {
                return Err(ModelError::IncompleteCodeBlock(block.id.to_string()));
            }
        }
        Ok(())
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn ids(&self) -> Vec<BlockId> {
        self.blocks.iter().map(|b| b.id.clone()).collect()
    }

    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    pub fn get_mut(&mut self, id: &BlockId) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| &b.id == id)
    }

    pub fn index_of(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == id)
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Insert at `index`, clamped to the end of the document.
    pub fn insert(&mut self, index: usize, block: Block) {
        let index = index.min(self.blocks.len());
        self.blocks.insert(index, block);
    }

    /// Splice `blocks` in at `index` (clamped), keeping their relative order.
    pub fn insert_many(&mut self, index: usize, blocks: Vec<Block>) {
        let index = index.min(self.blocks.len());
        self.blocks.splice(index..index, blocks);
    }

    pub fn remove(&mut self, id: &BlockId) -> Option<Block> {
        let index = self.index_of(id)?;
        Some(self.blocks.remove(index))
    }

    /// Stable array move: take the block at `from` out and reinsert it at
    /// `to`. All other blocks keep their relative order. Returns false when
    /// either index is out of range or `from == to`.
    pub fn move_block(&mut self, from: usize, to: usize) -> bool {
        if from == to || from >= self.blocks.len() || to >= self.blocks.len() {
            return false;
        }
        let block = self.blocks.remove(from);
        self.blocks.insert(to, block);
        true
    }
}

impl<'a> IntoIterator for &'a PageDocument {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
