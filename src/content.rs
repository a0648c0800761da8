//! Per-kind block content and its resolution against canonical defaults.
//!
//! Every block kind has two shapes:
//!
//! - a *content* struct (`HeroContent`, `SmartGridContent`, …) where each field
//!   is optional. This is what the persistence layer stores and what edits
//!   write to.
//! - a *props* struct (`HeroProps`, `SmartGridProps`, …) with every field
//!   populated. This is what rendering consumes.
//!
//! [`BlockContent::resolve`] maps the first onto the second. Flat widgets use
//! the literal value or the named default; layout widgets resolve their
//! [`StylePatch`] facet by facet. Resolution is idempotent: resolving the
//! content rebuilt from a props value yields that same props value.

use serde::{Deserialize, Serialize};

use crate::model::BlockKind;
use crate::style::{BorderStyle, MaxWidth, StyleConfig, StylePatch};

fn pick<T: Clone>(value: &Option<T>, default: T) -> T {
    value.clone().unwrap_or(default)
}

// ────────────────────────────────────────────────────────────────────────────
// Shared enums
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn css(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ButtonVariant {
    Primary,
    Secondary,
    Outline,
    Link,
}

impl ButtonVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            ButtonVariant::Primary => "primary",
            ButtonVariant::Secondary => "secondary",
            ButtonVariant::Outline => "outline",
            ButtonVariant::Link => "link",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldInput {
    Text,
    Email,
    Tel,
    Number,
    Textarea,
}

impl FieldInput {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldInput::Text => "text",
            FieldInput::Email => "email",
            FieldInput::Tel => "tel",
            FieldInput::Number => "number",
            FieldInput::Textarea => "textarea",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Hero
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtext: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroProps {
    pub headline: String,
    pub subtext: String,
    /// Empty means no image.
    pub image_url: String,
    pub cta_text: String,
    pub cta_url: String,
    pub align: TextAlign,
}

impl Default for HeroProps {
    fn default() -> Self {
        Self {
            headline: "Build something people love".to_string(),
            subtext: "Launch your next idea with a page that converts.".to_string(),
            image_url: String::new(),
            cta_text: "Get started".to_string(),
            cta_url: "#".to_string(),
            align: TextAlign::Center,
        }
    }
}

impl HeroContent {
    pub fn resolve(&self) -> HeroProps {
        let d = HeroProps::default();
        HeroProps {
            headline: pick(&self.headline, d.headline),
            subtext: pick(&self.subtext, d.subtext),
            image_url: pick(&self.image_url, d.image_url),
            cta_text: pick(&self.cta_text, d.cta_text),
            cta_url: pick(&self.cta_url, d.cta_url),
            align: pick(&self.align, d.align),
        }
    }
}

impl From<&HeroProps> for HeroContent {
    fn from(p: &HeroProps) -> Self {
        Self {
            headline: Some(p.headline.clone()),
            subtext: Some(p.subtext.clone()),
            image_url: Some(p.image_url.clone()),
            cta_text: Some(p.cta_text.clone()),
            cta_url: Some(p.cta_url.clone()),
            align: Some(p.align),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Heading / Text
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingProps {
    pub text: String,
    /// 1..=6
    pub level: u8,
    pub align: TextAlign,
}

impl Default for HeadingProps {
    fn default() -> Self {
        Self {
            text: "Section heading".to_string(),
            level: 2,
            align: TextAlign::Left,
        }
    }
}

impl HeadingContent {
    pub fn resolve(&self) -> HeadingProps {
        let d = HeadingProps::default();
        HeadingProps {
            text: pick(&self.text, d.text),
            level: pick(&self.level, d.level).clamp(1, 6),
            align: pick(&self.align, d.align),
        }
    }
}

impl From<&HeadingProps> for HeadingContent {
    fn from(p: &HeadingProps) -> Self {
        Self {
            text: Some(p.text.clone()),
            level: Some(p.level),
            align: Some(p.align),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    /// Paragraphs are separated by blank lines.
    pub body: String,
    pub align: TextAlign,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            body: "Tell your visitors what makes you different.".to_string(),
            align: TextAlign::Left,
        }
    }
}

impl TextContent {
    pub fn resolve(&self) -> TextProps {
        let d = TextProps::default();
        TextProps {
            body: pick(&self.body, d.body),
            align: pick(&self.align, d.align),
        }
    }
}

impl From<&TextProps> for TextContent {
    fn from(p: &TextProps) -> Self {
        Self {
            body: Some(p.body.clone()),
            align: Some(p.align),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Image / Button
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_percent: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProps {
    pub src: String,
    pub alt: String,
    pub caption: String,
    /// 10..=100
    pub width_percent: u32,
}

impl Default for ImageProps {
    fn default() -> Self {
        Self {
            src: String::new(),
            alt: "Image".to_string(),
            caption: String::new(),
            width_percent: 100,
        }
    }
}

impl ImageContent {
    pub fn resolve(&self) -> ImageProps {
        let d = ImageProps::default();
        ImageProps {
            src: pick(&self.src, d.src),
            alt: pick(&self.alt, d.alt),
            caption: pick(&self.caption, d.caption),
            width_percent: pick(&self.width_percent, d.width_percent).clamp(10, 100),
        }
    }
}

impl From<&ImageProps> for ImageContent {
    fn from(p: &ImageProps) -> Self {
        Self {
            src: Some(p.src.clone()),
            alt: Some(p.alt.clone()),
            caption: Some(p.caption.clone()),
            width_percent: Some(p.width_percent),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<ButtonVariant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_in_new_tab: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonProps {
    pub label: String,
    pub url: String,
    pub variant: ButtonVariant,
    pub open_in_new_tab: bool,
}

impl Default for ButtonProps {
    fn default() -> Self {
        Self {
            label: "Learn more".to_string(),
            url: "#".to_string(),
            variant: ButtonVariant::Primary,
            open_in_new_tab: false,
        }
    }
}

impl ButtonContent {
    pub fn resolve(&self) -> ButtonProps {
        let d = ButtonProps::default();
        ButtonProps {
            label: pick(&self.label, d.label),
            url: pick(&self.url, d.url),
            variant: pick(&self.variant, d.variant),
            open_in_new_tab: pick(&self.open_in_new_tab, d.open_in_new_tab),
        }
    }
}

impl From<&ButtonProps> for ButtonContent {
    fn from(p: &ButtonProps) -> Self {
        Self {
            label: Some(p.label.clone()),
            url: Some(p.url.clone()),
            variant: Some(p.variant),
            open_in_new_tab: Some(p.open_in_new_tab),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Features / Testimonial
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureItem {
    #[serde(default)]
    pub icon: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl FeatureItem {
    fn new(icon: &str, title: &str, description: &str) -> Self {
        Self {
            icon: icon.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturesContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<FeatureItem>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturesProps {
    pub title: String,
    /// 1..=4
    pub columns: u32,
    pub items: Vec<FeatureItem>,
}

impl Default for FeaturesProps {
    fn default() -> Self {
        Self {
            title: "Why choose us".to_string(),
            columns: 3,
            items: vec![
                FeatureItem::new("zap", "Fast", "Pages load in the blink of an eye."),
                FeatureItem::new("shield", "Secure", "Hosted on hardened infrastructure."),
                FeatureItem::new("smile", "Simple", "Edit everything visually."),
            ],
        }
    }
}

impl FeaturesContent {
    pub fn resolve(&self) -> FeaturesProps {
        let d = FeaturesProps::default();
        FeaturesProps {
            title: pick(&self.title, d.title),
            columns: pick(&self.columns, d.columns).clamp(1, 4),
            items: pick(&self.items, d.items),
        }
    }
}

impl From<&FeaturesProps> for FeaturesContent {
    fn from(p: &FeaturesProps) -> Self {
        Self {
            title: Some(p.title.clone()),
            columns: Some(p.columns),
            items: Some(p.items.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialProps {
    pub quote: String,
    pub author: String,
    pub role: String,
    pub avatar_url: String,
}

impl Default for TestimonialProps {
    fn default() -> Self {
        Self {
            quote: "This product changed how our team ships.".to_string(),
            author: "Alex Morgan".to_string(),
            role: "Head of Growth".to_string(),
            avatar_url: String::new(),
        }
    }
}

impl TestimonialContent {
    pub fn resolve(&self) -> TestimonialProps {
        let d = TestimonialProps::default();
        TestimonialProps {
            quote: pick(&self.quote, d.quote),
            author: pick(&self.author, d.author),
            role: pick(&self.role, d.role),
            avatar_url: pick(&self.avatar_url, d.avatar_url),
        }
    }
}

impl From<&TestimonialProps> for TestimonialContent {
    fn from(p: &TestimonialProps) -> Self {
        Self {
            quote: Some(p.quote.clone()),
            author: Some(p.author.clone()),
            role: Some(p.role.clone()),
            avatar_url: Some(p.avatar_url.clone()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Divider / Spacer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividerContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<BorderStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DividerProps {
    pub style: BorderStyle,
    /// 1..=16
    pub thickness: u32,
    pub color: String,
}

impl Default for DividerProps {
    fn default() -> Self {
        Self {
            style: BorderStyle::Solid,
            thickness: 1,
            color: "#e5e7eb".to_string(),
        }
    }
}

impl DividerContent {
    pub fn resolve(&self) -> DividerProps {
        let d = DividerProps::default();
        DividerProps {
            style: pick(&self.style, d.style),
            thickness: pick(&self.thickness, d.thickness).clamp(1, 16),
            color: pick(&self.color, d.color),
        }
    }
}

impl From<&DividerProps> for DividerContent {
    fn from(p: &DividerProps) -> Self {
        Self {
            style: Some(p.style),
            thickness: Some(p.thickness),
            color: Some(p.color.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacerContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacerProps {
    /// 0..=400 pixels
    pub height: u32,
}

impl Default for SpacerProps {
    fn default() -> Self {
        Self { height: 48 }
    }
}

impl SpacerContent {
    pub fn resolve(&self) -> SpacerProps {
        SpacerProps {
            height: pick(&self.height, SpacerProps::default().height).min(400),
        }
    }
}

impl From<&SpacerProps> for SpacerContent {
    fn from(p: &SpacerProps) -> Self {
        Self {
            height: Some(p.height),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Form
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub input: FieldInput,
    #[serde(default)]
    pub required: bool,
}

impl FormField {
    fn new(name: &str, label: &str, input: FieldInput, required: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            input,
            required,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FormField>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormProps {
    pub title: String,
    pub fields: Vec<FormField>,
    pub submit_label: String,
}

impl Default for FormProps {
    fn default() -> Self {
        Self {
            title: "Stay in the loop".to_string(),
            fields: vec![
                FormField::new("name", "Name", FieldInput::Text, false),
                FormField::new("email", "Email", FieldInput::Email, true),
            ],
            submit_label: "Subscribe".to_string(),
        }
    }
}

impl FormContent {
    pub fn resolve(&self) -> FormProps {
        let d = FormProps::default();
        FormProps {
            title: pick(&self.title, d.title),
            fields: pick(&self.fields, d.fields),
            submit_label: pick(&self.submit_label, d.submit_label),
        }
    }
}

impl From<&FormProps> for FormContent {
    fn from(p: &FormProps) -> Self {
        Self {
            title: Some(p.title.clone()),
            fields: Some(p.fields.clone()),
            submit_label: Some(p.submit_label.clone()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Container / Grid (fixed placeholder cells, no nested blocks)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<MaxWidth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerProps {
    pub padding: u32,
    pub max_width: MaxWidth,
    pub background_color: String,
}

impl Default for ContainerProps {
    fn default() -> Self {
        Self {
            padding: 24,
            max_width: MaxWidth::Lg,
            background_color: crate::style::TRANSPARENT.to_string(),
        }
    }
}

impl ContainerContent {
    pub fn resolve(&self) -> ContainerProps {
        let d = ContainerProps::default();
        ContainerProps {
            padding: pick(&self.padding, d.padding),
            max_width: pick(&self.max_width, d.max_width),
            background_color: pick(&self.background_color, d.background_color),
        }
    }
}

impl From<&ContainerProps> for ContainerContent {
    fn from(p: &ContainerProps) -> Self {
        Self {
            padding: Some(p.padding),
            max_width: Some(p.max_width),
            background_color: Some(p.background_color.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridProps {
    /// 1..=12
    pub columns: u32,
    /// 1..=12
    pub rows: u32,
    pub gap: u32,
}

impl Default for GridProps {
    fn default() -> Self {
        Self {
            columns: 3,
            rows: 2,
            gap: 16,
        }
    }
}

impl GridContent {
    pub fn resolve(&self) -> GridProps {
        let d = GridProps::default();
        GridProps {
            columns: pick(&self.columns, d.columns).clamp(1, 12),
            rows: pick(&self.rows, d.rows).clamp(1, 12),
            gap: pick(&self.gap, d.gap),
        }
    }
}

impl From<&GridProps> for GridContent {
    fn from(p: &GridProps) -> Self {
        Self {
            columns: Some(p.columns),
            rows: Some(p.rows),
            gap: Some(p.gap),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Flex container / Smart grid (style-configuration bearing)
// ────────────────────────────────────────────────────────────────────────────

/// Upper bound on placeholder items in a layout block.
pub const MAX_LAYOUT_ITEMS: u32 = 12;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlexContainerContent {
    #[serde(default, skip_serializing_if = "StylePatch::is_empty")]
    pub style: StylePatch,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlexContainerProps {
    pub style: StyleConfig,
    pub item_count: u32,
}

impl Default for FlexContainerProps {
    fn default() -> Self {
        Self {
            style: StyleConfig::flex_defaults(),
            item_count: 3,
        }
    }
}

impl FlexContainerContent {
    pub fn resolve(&self) -> FlexContainerProps {
        let d = FlexContainerProps::default();
        FlexContainerProps {
            style: self.style.resolve(&d.style),
            item_count: pick(&self.item_count, d.item_count).clamp(1, MAX_LAYOUT_ITEMS),
        }
    }
}

impl From<&FlexContainerProps> for FlexContainerContent {
    fn from(p: &FlexContainerProps) -> Self {
        Self {
            style: StylePatch::from_resolved(&p.style),
            item_count: Some(p.item_count),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartGridContent {
    #[serde(default, skip_serializing_if = "StylePatch::is_empty")]
    pub style: StylePatch,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<u32>,
    /// Column span per item on desktop.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spans: Option<Vec<u32>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartGridProps {
    pub style: StyleConfig,
    pub item_count: u32,
    /// Exactly `item_count` entries, each within `1..=columns.desktop`.
    pub spans: Vec<u32>,
}

impl Default for SmartGridProps {
    fn default() -> Self {
        let item_count = 4;
        Self {
            style: StyleConfig::grid_defaults(),
            item_count,
            spans: vec![1; item_count as usize],
        }
    }
}

impl SmartGridContent {
    pub fn resolve(&self) -> SmartGridProps {
        let d = SmartGridProps::default();
        let style = self.style.resolve(&d.style);
        let item_count = pick(&self.item_count, d.item_count).clamp(1, MAX_LAYOUT_ITEMS);
        let max_span = style.layout.columns.desktop;
        let mut spans: Vec<u32> = self
            .spans
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .take(item_count as usize)
            .map(|s| (*s).clamp(1, max_span))
            .collect();
        spans.resize(item_count as usize, 1);
        SmartGridProps {
            style,
            item_count,
            spans,
        }
    }
}

impl From<&SmartGridProps> for SmartGridContent {
    fn from(p: &SmartGridProps) -> Self {
        Self {
            style: StylePatch::from_resolved(&p.style),
            item_count: Some(p.item_count),
            spans: Some(p.spans.clone()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tagged unions
// ────────────────────────────────────────────────────────────────────────────

/// Block content tagged by kind. The variant always agrees with the block's
/// kind; see [`crate::model::Block`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockContent {
    Hero(HeroContent),
    Heading(HeadingContent),
    Text(TextContent),
    Image(ImageContent),
    Button(ButtonContent),
    Features(FeaturesContent),
    Testimonial(TestimonialContent),
    Divider(DividerContent),
    Spacer(SpacerContent),
    Form(FormContent),
    Container(ContainerContent),
    Grid(GridContent),
    FlexContainer(FlexContainerContent),
    SmartGrid(SmartGridContent),
}

/// Fully populated content, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolvedContent {
    Hero(HeroProps),
    Heading(HeadingProps),
    Text(TextProps),
    Image(ImageProps),
    Button(ButtonProps),
    Features(FeaturesProps),
    Testimonial(TestimonialProps),
    Divider(DividerProps),
    Spacer(SpacerProps),
    Form(FormProps),
    Container(ContainerProps),
    Grid(GridProps),
    FlexContainer(FlexContainerProps),
    SmartGrid(SmartGridProps),
}

impl BlockContent {
    /// Empty content for `kind`: every field falls back to its default.
    pub fn empty(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Hero => BlockContent::Hero(HeroContent::default()),
            BlockKind::Heading => BlockContent::Heading(HeadingContent::default()),
            BlockKind::Text => BlockContent::Text(TextContent::default()),
            BlockKind::Image => BlockContent::Image(ImageContent::default()),
            BlockKind::Button => BlockContent::Button(ButtonContent::default()),
            BlockKind::Features => BlockContent::Features(FeaturesContent::default()),
            BlockKind::Testimonial => BlockContent::Testimonial(TestimonialContent::default()),
            BlockKind::Divider => BlockContent::Divider(DividerContent::default()),
            BlockKind::Spacer => BlockContent::Spacer(SpacerContent::default()),
            BlockKind::Form => BlockContent::Form(FormContent::default()),
            BlockKind::Container => BlockContent::Container(ContainerContent::default()),
            BlockKind::Grid => BlockContent::Grid(GridContent::default()),
            BlockKind::FlexContainer => {
                BlockContent::FlexContainer(FlexContainerContent::default())
            }
            BlockKind::SmartGrid => BlockContent::SmartGrid(SmartGridContent::default()),
        }
    }

    /// Canonical default content for a freshly created block of `kind`.
    pub fn defaults_for(kind: BlockKind) -> Self {
        Self::from(&ResolvedContent::defaults_for(kind))
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            BlockContent::Hero(_) => BlockKind::Hero,
            BlockContent::Heading(_) => BlockKind::Heading,
            BlockContent::Text(_) => BlockKind::Text,
            BlockContent::Image(_) => BlockKind::Image,
            BlockContent::Button(_) => BlockKind::Button,
            BlockContent::Features(_) => BlockKind::Features,
            BlockContent::Testimonial(_) => BlockKind::Testimonial,
            BlockContent::Divider(_) => BlockKind::Divider,
            BlockContent::Spacer(_) => BlockKind::Spacer,
            BlockContent::Form(_) => BlockKind::Form,
            BlockContent::Container(_) => BlockKind::Container,
            BlockContent::Grid(_) => BlockKind::Grid,
            BlockContent::FlexContainer(_) => BlockKind::FlexContainer,
            BlockContent::SmartGrid(_) => BlockKind::SmartGrid,
        }
    }

    pub fn resolve(&self) -> ResolvedContent {
        match self {
            BlockContent::Hero(c) => ResolvedContent::Hero(c.resolve()),
            BlockContent::Heading(c) => ResolvedContent::Heading(c.resolve()),
            BlockContent::Text(c) => ResolvedContent::Text(c.resolve()),
            BlockContent::Image(c) => ResolvedContent::Image(c.resolve()),
            BlockContent::Button(c) => ResolvedContent::Button(c.resolve()),
            BlockContent::Features(c) => ResolvedContent::Features(c.resolve()),
            BlockContent::Testimonial(c) => ResolvedContent::Testimonial(c.resolve()),
            BlockContent::Divider(c) => ResolvedContent::Divider(c.resolve()),
            BlockContent::Spacer(c) => ResolvedContent::Spacer(c.resolve()),
            BlockContent::Form(c) => ResolvedContent::Form(c.resolve()),
            BlockContent::Container(c) => ResolvedContent::Container(c.resolve()),
            BlockContent::Grid(c) => ResolvedContent::Grid(c.resolve()),
            BlockContent::FlexContainer(c) => ResolvedContent::FlexContainer(c.resolve()),
            BlockContent::SmartGrid(c) => ResolvedContent::SmartGrid(c.resolve()),
        }
    }

    /// The style patch of a layout block, if it has one.
    pub fn style_patch(&self) -> Option<&StylePatch> {
        match self {
            BlockContent::FlexContainer(c) => Some(&c.style),
            BlockContent::SmartGrid(c) => Some(&c.style),
            _ => None,
        }
    }

    pub fn style_patch_mut(&mut self) -> Option<&mut StylePatch> {
        match self {
            BlockContent::FlexContainer(c) => Some(&mut c.style),
            BlockContent::SmartGrid(c) => Some(&mut c.style),
            _ => None,
        }
    }
}

impl ResolvedContent {
    pub fn defaults_for(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Hero => ResolvedContent::Hero(HeroProps::default()),
            BlockKind::Heading => ResolvedContent::Heading(HeadingProps::default()),
            BlockKind::Text => ResolvedContent::Text(TextProps::default()),
            BlockKind::Image => ResolvedContent::Image(ImageProps::default()),
            BlockKind::Button => ResolvedContent::Button(ButtonProps::default()),
            BlockKind::Features => ResolvedContent::Features(FeaturesProps::default()),
            BlockKind::Testimonial => ResolvedContent::Testimonial(TestimonialProps::default()),
            BlockKind::Divider => ResolvedContent::Divider(DividerProps::default()),
            BlockKind::Spacer => ResolvedContent::Spacer(SpacerProps::default()),
            BlockKind::Form => ResolvedContent::Form(FormProps::default()),
            BlockKind::Container => ResolvedContent::Container(ContainerProps::default()),
            BlockKind::Grid => ResolvedContent::Grid(GridProps::default()),
            BlockKind::FlexContainer => {
                ResolvedContent::FlexContainer(FlexContainerProps::default())
            }
            BlockKind::SmartGrid => ResolvedContent::SmartGrid(SmartGridProps::default()),
        }
    }

    /// The resolved style configuration of a layout block, if it has one.
    pub fn style(&self) -> Option<&StyleConfig> {
        match self {
            ResolvedContent::FlexContainer(p) => Some(&p.style),
            ResolvedContent::SmartGrid(p) => Some(&p.style),
            _ => None,
        }
    }
}

impl From<&ResolvedContent> for BlockContent {
    fn from(resolved: &ResolvedContent) -> Self {
        match resolved {
            ResolvedContent::Hero(p) => BlockContent::Hero(p.into()),
            ResolvedContent::Heading(p) => BlockContent::Heading(p.into()),
            ResolvedContent::Text(p) => BlockContent::Text(p.into()),
            ResolvedContent::Image(p) => BlockContent::Image(p.into()),
            ResolvedContent::Button(p) => BlockContent::Button(p.into()),
            ResolvedContent::Features(p) => BlockContent::Features(p.into()),
            ResolvedContent::Testimonial(p) => BlockContent::Testimonial(p.into()),
            ResolvedContent::Divider(p) => BlockContent::Divider(p.into()),
            ResolvedContent::Spacer(p) => BlockContent::Spacer(p.into()),
            ResolvedContent::Form(p) => BlockContent::Form(p.into()),
            ResolvedContent::Container(p) => BlockContent::Container(p.into()),
            ResolvedContent::Grid(p) => BlockContent::Grid(p.into()),
            ResolvedContent::FlexContainer(p) => BlockContent::FlexContainer(p.into()),
            ResolvedContent::SmartGrid(p) => BlockContent::SmartGrid(p.into()),
        }
    }
}

/// Resolve `content` for a block of `kind`.
///
/// Content whose variant does not match `kind` is treated as absent and the
/// kind's defaults are used.
pub fn resolve_content(kind: BlockKind, content: &BlockContent) -> ResolvedContent {
    if content.kind() == kind {
        content.resolve()
    } else {
        ResolvedContent::defaults_for(kind)
    }
}
