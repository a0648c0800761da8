//! Palette catalog: the block kinds and multi-block templates a user can drag
//! onto the canvas.
//!
//! # Usage
//!
//! ```rust
//! use pagecraft::editor::palette::palette_catalog;
//!
//! let hits: Vec<_> = palette_catalog()
//!     .iter()
//!     .filter(|e| e.matches_query("grid"))
//!     .collect();
//! assert!(!hits.is_empty());
//! ```

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::content::{
    BlockContent, ButtonContent, FeaturesContent, FormContent, HeadingContent, HeroContent,
    SpacerContent, TestimonialContent, TextContent,
};
use crate::model::{Block, BlockKind};

use super::canvas::PaletteItem;

/// One draggable palette entry.
#[derive(Debug, Clone, Serialize)]
pub struct PaletteEntry {
    pub kind: BlockKind,
    pub label: String,
    pub description: String,
    /// Icon name understood by the host UI.
    pub icon: String,
    pub category: String,
}

impl PaletteEntry {
    /// Case-insensitive substring match on type, label, category or
    /// description. An empty query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let q = query.to_lowercase();
        self.kind.as_str().to_lowercase().contains(&q)
            || self.label.to_lowercase().contains(&q)
            || self.category.to_lowercase().contains(&q)
            || self.description.to_lowercase().contains(&q)
    }

    pub fn to_item(&self) -> PaletteItem {
        PaletteItem::Block(self.kind)
    }
}

/// Palette entries sharing a category, in catalog order.
#[derive(Debug, Clone, Serialize)]
pub struct PaletteCategory {
    pub name: String,
    pub entries: Vec<PaletteEntry>,
}

fn entry(kind: BlockKind, label: &str, icon: &str, category: &str, description: &str) -> PaletteEntry {
    PaletteEntry {
        kind,
        label: label.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        category: category.to_string(),
    }
}

fn build_catalog() -> Vec<PaletteEntry> {
    vec![
        entry(BlockKind::Hero, "Hero", "sparkles", "Sections", "Large headline with call to action"),
        entry(BlockKind::Features, "Features", "grid-3x3", "Sections", "Feature cards in columns"),
        entry(BlockKind::Testimonial, "Testimonial", "quote", "Sections", "Customer quote with author"),
        entry(BlockKind::Form, "Form", "clipboard", "Sections", "Contact form with fields"),
        entry(BlockKind::Heading, "Heading", "heading", "Basic", "Section title"),
        entry(BlockKind::Text, "Text", "type", "Basic", "Paragraph of body text"),
        entry(BlockKind::Image, "Image", "image", "Basic", "Picture with optional caption"),
        entry(BlockKind::Button, "Button", "mouse-pointer", "Basic", "Link styled as a button"),
        entry(BlockKind::Divider, "Divider", "minus", "Basic", "Horizontal rule"),
        entry(BlockKind::Spacer, "Spacer", "move-vertical", "Basic", "Vertical whitespace"),
        entry(BlockKind::Container, "Container", "square", "Layout", "Padded box with max width"),
        entry(BlockKind::Grid, "Grid", "layout-grid", "Layout", "Fixed grid of cells"),
        entry(
            BlockKind::FlexContainer,
            "Flex container",
            "columns",
            "Layout",
            "Responsive row or column with styling",
        ),
        entry(
            BlockKind::SmartGrid,
            "Smart grid",
            "layout-dashboard",
            "Layout",
            "Responsive grid with per-item column spans",
        ),
    ]
}

/// The full palette catalog, one entry per block kind.
pub fn palette_catalog() -> &'static [PaletteEntry] {
    static CATALOG: Lazy<Vec<PaletteEntry>> = Lazy::new(build_catalog);
    &CATALOG
}

/// The catalog grouped by category, categories in first-seen order.
pub fn palette_by_category() -> &'static [PaletteCategory] {
    static CATEGORIES: Lazy<Vec<PaletteCategory>> = Lazy::new(|| {
        let mut map: IndexMap<String, Vec<PaletteEntry>> = IndexMap::new();
        for e in palette_catalog() {
            map.entry(e.category.clone()).or_default().push(e.clone());
        }
        map.into_iter()
            .map(|(name, entries)| PaletteCategory { name, entries })
            .collect()
    });
    &CATEGORIES
}

/// Look up the entry for `kind`.
pub fn palette_entry(kind: BlockKind) -> Option<&'static PaletteEntry> {
    palette_catalog().iter().find(|e| e.kind == kind)
}

// ────────────────────────────────────────────────────────────────────────────
// Templates
// ────────────────────────────────────────────────────────────────────────────

/// A named list of blocks dropped as one unit.
#[derive(Debug, Clone)]
pub struct PageTemplate {
    pub name: String,
    pub description: String,
    pub contents: Vec<BlockContent>,
}

impl PageTemplate {
    /// Fresh blocks for this template.
    pub fn blocks(&self) -> Vec<Block> {
        self.contents.iter().cloned().map(Block::with_content).collect()
    }

    pub fn to_item(&self) -> PaletteItem {
        PaletteItem::Blocks(self.blocks())
    }
}

fn text(s: &str) -> Option<String> {
    Some(s.to_string())
}

fn build_templates() -> Vec<PageTemplate> {
    vec![
        PageTemplate {
            name: "Landing starter".to_string(),
            description: "Hero, features, testimonial and a contact form".to_string(),
            contents: vec![
                BlockContent::Hero(HeroContent {
                    headline: text("Launch faster"),
                    subtext: text("Everything you need to ship your next page."),
                    ..Default::default()
                }),
                BlockContent::Features(FeaturesContent::default()),
                BlockContent::Testimonial(TestimonialContent::default()),
                BlockContent::Form(FormContent::default()),
            ],
        },
        PageTemplate {
            name: "Article".to_string(),
            description: "Heading, body text and a divider".to_string(),
            contents: vec![
                BlockContent::Heading(HeadingContent {
                    level: Some(1),
                    ..Default::default()
                }),
                BlockContent::Text(TextContent::default()),
                BlockContent::Divider(Default::default()),
            ],
        },
        PageTemplate {
            name: "Call to action".to_string(),
            description: "Heading and a button with breathing room".to_string(),
            contents: vec![
                BlockContent::Spacer(SpacerContent { height: Some(48) }),
                BlockContent::Heading(HeadingContent {
                    text: text("Ready to start?"),
                    level: Some(2),
                    ..Default::default()
                }),
                BlockContent::Button(ButtonContent {
                    label: text("Get started"),
                    ..Default::default()
                }),
                BlockContent::Spacer(SpacerContent { height: Some(48) }),
            ],
        },
    ]
}

pub fn page_templates() -> &'static [PageTemplate] {
    static TEMPLATES: Lazy<Vec<PageTemplate>> = Lazy::new(build_templates);
    &TEMPLATES
}

pub fn page_template(name: &str) -> Option<&'static PageTemplate> {
    page_templates().iter().find(|t| t.name.eq_ignore_ascii_case(name))
}
