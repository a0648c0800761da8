//! Style configuration for layout-capable blocks.
//!
//! A [`StyleConfig`] is made of independently defaulted facets: layout,
//! background, border, shadow, advanced (box spacing, max width, visibility)
//! and canvas interaction. What gets persisted is a [`StylePatch`], where every
//! leaf is optional. [`StylePatch::resolve`] merges a patch against a facet
//! specific default one facet at a time, so a partial `layout.gap` override
//! never erases the rest of `layout`.
//!
//! [`resolve_style`] turns a resolved configuration into [`RenderInstructions`],
//! which the markup generator turns into inline CSS.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Sentinel background color meaning "paint nothing".
pub const TRANSPARENT: &str = "transparent";

// ────────────────────────────────────────────────────────────────────────────
// Breakpoints, edges, corners
// ────────────────────────────────────────────────────────────────────────────

/// Responsive breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Breakpoint {
    Desktop,
    Tablet,
    Mobile,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 3] = [Breakpoint::Desktop, Breakpoint::Tablet, Breakpoint::Mobile];

    pub fn as_str(self) -> &'static str {
        match self {
            Breakpoint::Desktop => "desktop",
            Breakpoint::Tablet => "tablet",
            Breakpoint::Mobile => "mobile",
        }
    }
}

/// One side of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

/// One corner of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];
}

/// A value per breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Responsive<T> {
    pub desktop: T,
    pub tablet: T,
    pub mobile: T,
}

impl<T: Clone> Responsive<T> {
    pub fn new(desktop: T, tablet: T, mobile: T) -> Self {
        Self { desktop, tablet, mobile }
    }

    pub fn uniform(value: T) -> Self {
        Self {
            desktop: value.clone(),
            tablet: value.clone(),
            mobile: value,
        }
    }

    pub fn get(&self, bp: Breakpoint) -> &T {
        match bp {
            Breakpoint::Desktop => &self.desktop,
            Breakpoint::Tablet => &self.tablet,
            Breakpoint::Mobile => &self.mobile,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Responsive<U> {
        Responsive {
            desktop: f(&self.desktop),
            tablet: f(&self.tablet),
            mobile: f(&self.mobile),
        }
    }
}

/// Partial [`Responsive`]: unset breakpoints fall back to the default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsivePatch<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desktop: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tablet: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<T>,
}

impl<T> Default for ResponsivePatch<T> {
    fn default() -> Self {
        Self {
            desktop: None,
            tablet: None,
            mobile: None,
        }
    }
}

impl<T: Clone> ResponsivePatch<T> {
    pub fn is_empty(&self) -> bool {
        self.desktop.is_none() && self.tablet.is_none() && self.mobile.is_none()
    }

    pub fn set(&mut self, bp: Breakpoint, value: T) {
        match bp {
            Breakpoint::Desktop => self.desktop = Some(value),
            Breakpoint::Tablet => self.tablet = Some(value),
            Breakpoint::Mobile => self.mobile = Some(value),
        }
    }

    pub fn resolve(&self, defaults: &Responsive<T>) -> Responsive<T> {
        Responsive {
            desktop: self.desktop.clone().unwrap_or_else(|| defaults.desktop.clone()),
            tablet: self.tablet.clone().unwrap_or_else(|| defaults.tablet.clone()),
            mobile: self.mobile.clone().unwrap_or_else(|| defaults.mobile.clone()),
        }
    }

    pub fn from_resolved(full: &Responsive<T>) -> Self {
        Self {
            desktop: Some(full.desktop.clone()),
            tablet: Some(full.tablet.clone()),
            mobile: Some(full.mobile.clone()),
        }
    }
}

/// A value per box edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edges<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

impl<T: Copy> Edges<T> {
    pub fn uniform(value: T) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn get(&self, edge: Edge) -> T {
        match edge {
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
        }
    }
}

/// Partial [`Edges`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgesPatch<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<T>,
}

impl<T> Default for EdgesPatch<T> {
    fn default() -> Self {
        Self {
            top: None,
            right: None,
            bottom: None,
            left: None,
        }
    }
}

impl<T: Copy> EdgesPatch<T> {
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.right.is_none() && self.bottom.is_none() && self.left.is_none()
    }

    pub fn set(&mut self, edge: Edge, value: T) {
        match edge {
            Edge::Top => self.top = Some(value),
            Edge::Right => self.right = Some(value),
            Edge::Bottom => self.bottom = Some(value),
            Edge::Left => self.left = Some(value),
        }
    }

    pub fn set_all(&mut self, value: T) {
        for edge in Edge::ALL {
            self.set(edge, value);
        }
    }

    pub fn resolve(&self, defaults: &Edges<T>) -> Edges<T> {
        Edges {
            top: self.top.unwrap_or(defaults.top),
            right: self.right.unwrap_or(defaults.right),
            bottom: self.bottom.unwrap_or(defaults.bottom),
            left: self.left.unwrap_or(defaults.left),
        }
    }

    pub fn from_resolved(full: &Edges<T>) -> Self {
        Self {
            top: Some(full.top),
            right: Some(full.right),
            bottom: Some(full.bottom),
            left: Some(full.left),
        }
    }
}

/// A value per box corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Corners<T> {
    pub top_left: T,
    pub top_right: T,
    pub bottom_right: T,
    pub bottom_left: T,
}

impl<T: Copy> Corners<T> {
    pub fn uniform(value: T) -> Self {
        Self {
            top_left: value,
            top_right: value,
            bottom_right: value,
            bottom_left: value,
        }
    }

    pub fn get(&self, corner: Corner) -> T {
        match corner {
            Corner::TopLeft => self.top_left,
            Corner::TopRight => self.top_right,
            Corner::BottomRight => self.bottom_right,
            Corner::BottomLeft => self.bottom_left,
        }
    }
}

/// Partial [`Corners`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CornersPatch<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_left: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_right: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_right: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_left: Option<T>,
}

impl<T> Default for CornersPatch<T> {
    fn default() -> Self {
        Self {
            top_left: None,
            top_right: None,
            bottom_right: None,
            bottom_left: None,
        }
    }
}

impl<T: Copy> CornersPatch<T> {
    pub fn is_empty(&self) -> bool {
        self.top_left.is_none()
            && self.top_right.is_none()
            && self.bottom_right.is_none()
            && self.bottom_left.is_none()
    }

    pub fn set(&mut self, corner: Corner, value: T) {
        match corner {
            Corner::TopLeft => self.top_left = Some(value),
            Corner::TopRight => self.top_right = Some(value),
            Corner::BottomRight => self.bottom_right = Some(value),
            Corner::BottomLeft => self.bottom_left = Some(value),
        }
    }

    pub fn set_all(&mut self, value: T) {
        for corner in Corner::ALL {
            self.set(corner, value);
        }
    }

    pub fn resolve(&self, defaults: &Corners<T>) -> Corners<T> {
        Corners {
            top_left: self.top_left.unwrap_or(defaults.top_left),
            top_right: self.top_right.unwrap_or(defaults.top_right),
            bottom_right: self.bottom_right.unwrap_or(defaults.bottom_right),
            bottom_left: self.bottom_left.unwrap_or(defaults.bottom_left),
        }
    }

    pub fn from_resolved(full: &Corners<T>) -> Self {
        Self {
            top_left: Some(full.top_left),
            top_right: Some(full.top_right),
            bottom_right: Some(full.bottom_right),
            bottom_left: Some(full.bottom_left),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout facet
// ────────────────────────────────────────────────────────────────────────────

/// Whether a layout block flows its items as a flexbox or a CSS grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisplayMode {
    Flex,
    Grid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlexDirection {
    Row,
    Column,
    RowReverse,
    ColumnReverse,
}

impl FlexDirection {
    pub fn css(self) -> &'static str {
        match self {
            FlexDirection::Row => "row",
            FlexDirection::Column => "column",
            FlexDirection::RowReverse => "row-reverse",
            FlexDirection::ColumnReverse => "column-reverse",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlignItems {
    Start,
    Center,
    End,
    Stretch,
}

impl AlignItems {
    pub fn css(self) -> &'static str {
        match self {
            AlignItems::Start => "flex-start",
            AlignItems::Center => "center",
            AlignItems::End => "flex-end",
            AlignItems::Stretch => "stretch",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JustifyContent {
    Start,
    Center,
    End,
    SpaceBetween,
    SpaceAround,
}

impl JustifyContent {
    pub fn css(self) -> &'static str {
        match self {
            JustifyContent::Start => "flex-start",
            JustifyContent::Center => "center",
            JustifyContent::End => "flex-end",
            JustifyContent::SpaceBetween => "space-between",
            JustifyContent::SpaceAround => "space-around",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutFacet {
    pub display: DisplayMode,
    pub direction: Responsive<FlexDirection>,
    pub columns: Responsive<u32>,
    pub gap: Responsive<u32>,
    pub align_items: AlignItems,
    pub justify_content: JustifyContent,
    pub wrap: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPatch {
    #[serde(default, skip_serializing_if = "ResponsivePatch::is_empty")]
    pub direction: ResponsivePatch<FlexDirection>,
    #[serde(default, skip_serializing_if = "ResponsivePatch::is_empty")]
    pub columns: ResponsivePatch<u32>,
    #[serde(default, skip_serializing_if = "ResponsivePatch::is_empty")]
    pub gap: ResponsivePatch<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_items: Option<AlignItems>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justify_content: Option<JustifyContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,
}

impl LayoutPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge against `defaults`. The display mode is fixed by the block kind
    /// and always comes from the defaults. Column counts are kept at least 1.
    pub fn resolve(&self, defaults: &LayoutFacet) -> LayoutFacet {
        LayoutFacet {
            display: defaults.display,
            direction: self.direction.resolve(&defaults.direction),
            columns: self.columns.resolve(&defaults.columns).map(|c| (*c).max(1)),
            gap: self.gap.resolve(&defaults.gap),
            align_items: self.align_items.unwrap_or(defaults.align_items),
            justify_content: self.justify_content.unwrap_or(defaults.justify_content),
            wrap: self.wrap.unwrap_or(defaults.wrap),
        }
    }

    pub fn from_resolved(full: &LayoutFacet) -> Self {
        Self {
            direction: ResponsivePatch::from_resolved(&full.direction),
            columns: ResponsivePatch::from_resolved(&full.columns),
            gap: ResponsivePatch::from_resolved(&full.gap),
            align_items: Some(full.align_items),
            justify_content: Some(full.justify_content),
            wrap: Some(full.wrap),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Background facet
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub color: String,
    /// Position along the gradient line, in percent.
    pub position: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BackgroundSize {
    Cover,
    Contain,
    Auto,
    /// Natural size, tiled.
    Repeat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Background {
    Solid {
        color: String,
    },
    Gradient {
        angle: f32,
        stops: Vec<GradientStop>,
    },
    Image {
        url: String,
        size: BackgroundSize,
        position: String,
    },
}

impl Default for Background {
    fn default() -> Self {
        Background::Solid {
            color: TRANSPARENT.to_string(),
        }
    }
}

fn default_gradient_stops() -> Vec<GradientStop> {
    vec![
        GradientStop {
            color: "#6366f1".to_string(),
            position: 0.0,
        },
        GradientStop {
            color: "#ec4899".to_string(),
            position: 100.0,
        },
    ]
}

/// Partial [`Background`]. The variant is always explicit; missing fields
/// fall back to that variant's defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BackgroundPatch {
    Solid {
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
    Gradient {
        #[serde(skip_serializing_if = "Option::is_none")]
        angle: Option<f32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        stops: Option<Vec<GradientStop>>,
    },
    Image {
        #[serde(skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        size: Option<BackgroundSize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        position: Option<String>,
    },
}

impl BackgroundPatch {
    pub fn resolve(&self) -> Background {
        match self {
            BackgroundPatch::Solid { color } => Background::Solid {
                color: color.clone().unwrap_or_else(|| TRANSPARENT.to_string()),
            },
            BackgroundPatch::Gradient { angle, stops } => Background::Gradient {
                angle: angle.unwrap_or(135.0),
                stops: stops.clone().unwrap_or_else(default_gradient_stops),
            },
            BackgroundPatch::Image {
                url,
                size,
                position,
            } => Background::Image {
                url: url.clone().unwrap_or_default(),
                size: size.unwrap_or(BackgroundSize::Cover),
                position: position.clone().unwrap_or_else(|| "center".to_string()),
            },
        }
    }

    pub fn from_resolved(full: &Background) -> Self {
        match full {
            Background::Solid { color } => BackgroundPatch::Solid {
                color: Some(color.clone()),
            },
            Background::Gradient { angle, stops } => BackgroundPatch::Gradient {
                angle: Some(*angle),
                stops: Some(stops.clone()),
            },
            Background::Image {
                url,
                size,
                position,
            } => BackgroundPatch::Image {
                url: Some(url.clone()),
                size: Some(*size),
                position: Some(position.clone()),
            },
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Border facet
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BorderStyle {
    None,
    Solid,
    Dashed,
    Dotted,
    Double,
}

impl BorderStyle {
    pub fn css(self) -> &'static str {
        match self {
            BorderStyle::None => "none",
            BorderStyle::Solid => "solid",
            BorderStyle::Dashed => "dashed",
            BorderStyle::Dotted => "dotted",
            BorderStyle::Double => "double",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderFacet {
    pub style: BorderStyle,
    pub color: String,
    pub width: Edges<u32>,
    pub radius: Corners<u32>,
    /// Editing hint: a single new width/radius is applied to all four
    /// edges/corners. Has no effect on rendering.
    pub linked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<BorderStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "EdgesPatch::is_empty")]
    pub width: EdgesPatch<u32>,
    #[serde(default, skip_serializing_if = "CornersPatch::is_empty")]
    pub radius: CornersPatch<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked: Option<bool>,
}

impl BorderPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn resolve(&self, defaults: &BorderFacet) -> BorderFacet {
        BorderFacet {
            style: self.style.unwrap_or(defaults.style),
            color: self.color.clone().unwrap_or_else(|| defaults.color.clone()),
            width: self.width.resolve(&defaults.width),
            radius: self.radius.resolve(&defaults.radius),
            linked: self.linked.unwrap_or(defaults.linked),
        }
    }

    pub fn from_resolved(full: &BorderFacet) -> Self {
        Self {
            style: Some(full.style),
            color: Some(full.color.clone()),
            width: EdgesPatch::from_resolved(&full.width),
            radius: CornersPatch::from_resolved(&full.radius),
            linked: Some(full.linked),
        }
    }

    /// Set an edge width. When the border is linked, every edge gets `value`.
    pub fn set_width(&mut self, edge: Edge, value: u32, defaults: &BorderFacet) {
        if self.linked.unwrap_or(defaults.linked) {
            self.width.set_all(value);
        } else {
            self.width.set(edge, value);
        }
    }

    /// Set a corner radius. When the border is linked, every corner gets `value`.
    pub fn set_radius(&mut self, corner: Corner, value: u32, defaults: &BorderFacet) {
        if self.linked.unwrap_or(defaults.linked) {
            self.radius.set_all(value);
        } else {
            self.radius.set(corner, value);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shadow facet
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowFacet {
    pub enabled: bool,
    pub offset_x: i32,
    pub offset_y: i32,
    pub blur: u32,
    pub spread: i32,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spread: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ShadowPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn resolve(&self, defaults: &ShadowFacet) -> ShadowFacet {
        ShadowFacet {
            enabled: self.enabled.unwrap_or(defaults.enabled),
            offset_x: self.offset_x.unwrap_or(defaults.offset_x),
            offset_y: self.offset_y.unwrap_or(defaults.offset_y),
            blur: self.blur.unwrap_or(defaults.blur),
            spread: self.spread.unwrap_or(defaults.spread),
            color: self.color.clone().unwrap_or_else(|| defaults.color.clone()),
        }
    }

    pub fn from_resolved(full: &ShadowFacet) -> Self {
        Self {
            enabled: Some(full.enabled),
            offset_x: Some(full.offset_x),
            offset_y: Some(full.offset_y),
            blur: Some(full.blur),
            spread: Some(full.spread),
            color: Some(full.color.clone()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Advanced facet
// ────────────────────────────────────────────────────────────────────────────

/// Maximum content width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MaxWidth {
    Full,
    Sm,
    Md,
    Lg,
    Xl,
    Xxl,
}

impl MaxWidth {
    /// Width in pixels, `None` for unconstrained.
    pub fn pixels(self) -> Option<u32> {
        match self {
            MaxWidth::Full => None,
            MaxWidth::Sm => Some(640),
            MaxWidth::Md => Some(768),
            MaxWidth::Lg => Some(1024),
            MaxWidth::Xl => Some(1280),
            MaxWidth::Xxl => Some(1536),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedFacet {
    pub margin: Edges<i32>,
    pub padding: Edges<u32>,
    pub max_width: MaxWidth,
    /// Per-breakpoint hide flags. Independent of each other.
    pub hide_on: Responsive<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedPatch {
    #[serde(default, skip_serializing_if = "EdgesPatch::is_empty")]
    pub margin: EdgesPatch<i32>,
    #[serde(default, skip_serializing_if = "EdgesPatch::is_empty")]
    pub padding: EdgesPatch<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<MaxWidth>,
    #[serde(default, skip_serializing_if = "ResponsivePatch::is_empty")]
    pub hide_on: ResponsivePatch<bool>,
}

impl AdvancedPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn resolve(&self, defaults: &AdvancedFacet) -> AdvancedFacet {
        AdvancedFacet {
            margin: self.margin.resolve(&defaults.margin),
            padding: self.padding.resolve(&defaults.padding),
            max_width: self.max_width.unwrap_or(defaults.max_width),
            hide_on: self.hide_on.resolve(&defaults.hide_on),
        }
    }

    pub fn from_resolved(full: &AdvancedFacet) -> Self {
        Self {
            margin: EdgesPatch::from_resolved(&full.margin),
            padding: EdgesPatch::from_resolved(&full.padding),
            max_width: Some(full.max_width),
            hide_on: ResponsivePatch::from_resolved(&full.hide_on),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Canvas interaction facet (builder only, never persisted)
// ────────────────────────────────────────────────────────────────────────────

/// Which direct-manipulation handles the canvas shows for a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasInteraction {
    pub padding_handles: bool,
    pub gap_handles: bool,
    pub span_handles: bool,
}

impl Default for CanvasInteraction {
    fn default() -> Self {
        Self {
            padding_handles: true,
            gap_handles: true,
            span_handles: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CanvasInteractionPatch {
    pub padding_handles: Option<bool>,
    pub gap_handles: Option<bool>,
    pub span_handles: Option<bool>,
}

impl CanvasInteractionPatch {
    pub fn resolve(&self, defaults: &CanvasInteraction) -> CanvasInteraction {
        CanvasInteraction {
            padding_handles: self.padding_handles.unwrap_or(defaults.padding_handles),
            gap_handles: self.gap_handles.unwrap_or(defaults.gap_handles),
            span_handles: self.span_handles.unwrap_or(defaults.span_handles),
        }
    }

    /// Only disabled handles are recorded, so a round trip through storage
    /// (which drops this facet) compares equal for the common case.
    pub fn from_resolved(full: &CanvasInteraction) -> Self {
        Self {
            padding_handles: (!full.padding_handles).then_some(false),
            gap_handles: (!full.gap_handles).then_some(false),
            span_handles: (!full.span_handles).then_some(false),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// StyleConfig / StylePatch
// ────────────────────────────────────────────────────────────────────────────

/// Fully resolved style configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleConfig {
    pub layout: LayoutFacet,
    pub background: Background,
    pub border: BorderFacet,
    pub shadow: ShadowFacet,
    pub advanced: AdvancedFacet,
    pub canvas_interaction: CanvasInteraction,
}

impl StyleConfig {
    fn base(layout: LayoutFacet) -> Self {
        Self {
            layout,
            background: Background::default(),
            border: BorderFacet {
                style: BorderStyle::None,
                color: "#e5e7eb".to_string(),
                width: Edges::uniform(1),
                radius: Corners::uniform(0),
                linked: true,
            },
            shadow: ShadowFacet {
                enabled: false,
                offset_x: 0,
                offset_y: 4,
                blur: 12,
                spread: 0,
                color: "rgba(0, 0, 0, 0.15)".to_string(),
            },
            advanced: AdvancedFacet {
                margin: Edges::uniform(0),
                padding: Edges::uniform(16),
                max_width: MaxWidth::Full,
                hide_on: Responsive::uniform(false),
            },
            canvas_interaction: CanvasInteraction::default(),
        }
    }

    /// Defaults for a flex container.
    pub fn flex_defaults() -> Self {
        Self::base(LayoutFacet {
            display: DisplayMode::Flex,
            direction: Responsive::new(FlexDirection::Row, FlexDirection::Row, FlexDirection::Column),
            columns: Responsive::new(3, 2, 1),
            gap: Responsive::new(16, 12, 8),
            align_items: AlignItems::Stretch,
            justify_content: JustifyContent::Start,
            wrap: true,
        })
    }

    /// Defaults for a smart grid.
    pub fn grid_defaults() -> Self {
        Self::base(LayoutFacet {
            display: DisplayMode::Grid,
            direction: Responsive::uniform(FlexDirection::Row),
            columns: Responsive::new(4, 2, 1),
            gap: Responsive::new(16, 12, 8),
            align_items: AlignItems::Stretch,
            justify_content: JustifyContent::Start,
            wrap: false,
        })
    }
}

/// Persisted, partial style configuration. Each facet resolves on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylePatch {
    #[serde(default, skip_serializing_if = "LayoutPatch::is_empty")]
    pub layout: LayoutPatch,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<BackgroundPatch>,
    #[serde(default, skip_serializing_if = "BorderPatch::is_empty")]
    pub border: BorderPatch,
    #[serde(default, skip_serializing_if = "ShadowPatch::is_empty")]
    pub shadow: ShadowPatch,
    #[serde(default, skip_serializing_if = "AdvancedPatch::is_empty")]
    pub advanced: AdvancedPatch,
    #[serde(skip)]
    pub canvas_interaction: CanvasInteractionPatch,
}

impl StylePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn resolve(&self, defaults: &StyleConfig) -> StyleConfig {
        StyleConfig {
            layout: self.layout.resolve(&defaults.layout),
            background: self
                .background
                .as_ref()
                .map(BackgroundPatch::resolve)
                .unwrap_or_else(|| defaults.background.clone()),
            border: self.border.resolve(&defaults.border),
            shadow: self.shadow.resolve(&defaults.shadow),
            advanced: self.advanced.resolve(&defaults.advanced),
            canvas_interaction: self.canvas_interaction.resolve(&defaults.canvas_interaction),
        }
    }

    pub fn from_resolved(full: &StyleConfig) -> Self {
        Self {
            layout: LayoutPatch::from_resolved(&full.layout),
            background: Some(BackgroundPatch::from_resolved(&full.background)),
            border: BorderPatch::from_resolved(&full.border),
            shadow: ShadowPatch::from_resolved(&full.shadow),
            advanced: AdvancedPatch::from_resolved(&full.advanced),
            canvas_interaction: CanvasInteractionPatch::from_resolved(&full.canvas_interaction),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Render instructions
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BackgroundPaint {
    Color {
        color: String,
    },
    LinearGradient {
        angle: f32,
        /// Sorted by position.
        stops: Vec<GradientStop>,
    },
    Image {
        url: String,
        size: &'static str,
        position: String,
        repeat: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderPaint {
    pub style: BorderStyle,
    pub color: String,
    pub width: Edges<u32>,
    pub radius: Corners<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowPaint {
    pub offset_x: i32,
    pub offset_y: i32,
    pub blur: u32,
    pub spread: i32,
    pub color: String,
}

/// Breakpoint hide flags. A block hidden everywhere simply never renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Visibility {
    pub hidden: Responsive<bool>,
}

impl Visibility {
    pub fn is_visible(&self, bp: Breakpoint) -> bool {
        !*self.hidden.get(bp)
    }

    pub fn never_renders(&self) -> bool {
        Breakpoint::ALL.iter().all(|bp| !self.is_visible(*bp))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutInstructions {
    pub display: DisplayMode,
    pub direction: Responsive<FlexDirection>,
    pub columns: Responsive<u32>,
    pub gap: Responsive<u32>,
    pub align_items: AlignItems,
    pub justify_content: JustifyContent,
    pub wrap: bool,
}

/// Concrete rendering instructions derived from a [`StyleConfig`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderInstructions {
    pub layout: LayoutInstructions,
    pub padding: Edges<u32>,
    pub margin: Edges<i32>,
    pub max_width: Option<u32>,
    pub background: Option<BackgroundPaint>,
    pub border: Option<BorderPaint>,
    pub shadow: Option<ShadowPaint>,
    pub visibility: Visibility,
}

/// Derive rendering instructions from a resolved style configuration.
///
/// Pure: the output depends only on `config`.
pub fn resolve_style(config: &StyleConfig) -> RenderInstructions {
    let layout = &config.layout;
    RenderInstructions {
        layout: LayoutInstructions {
            display: layout.display,
            direction: layout.direction,
            columns: layout.columns,
            gap: layout.gap,
            align_items: layout.align_items,
            justify_content: layout.justify_content,
            wrap: layout.wrap,
        },
        padding: config.advanced.padding,
        margin: config.advanced.margin,
        max_width: config.advanced.max_width.pixels(),
        background: background_paint(&config.background),
        border: border_paint(&config.border),
        shadow: shadow_paint(&config.shadow),
        visibility: Visibility {
            hidden: config.advanced.hide_on,
        },
    }
}

fn background_paint(background: &Background) -> Option<BackgroundPaint> {
    match background {
        Background::Solid { color } => {
            if color.eq_ignore_ascii_case(TRANSPARENT) {
                None
            } else {
                Some(BackgroundPaint::Color {
                    color: color.clone(),
                })
            }
        }
        Background::Gradient { angle, stops } => {
            let mut stops = stops.clone();
            stops.sort_by(|a, b| a.position.total_cmp(&b.position));
            Some(BackgroundPaint::LinearGradient {
                angle: *angle,
                stops,
            })
        }
        Background::Image {
            url,
            size,
            position,
        } => {
            let (size, repeat) = match size {
                BackgroundSize::Cover => ("cover", false),
                BackgroundSize::Contain => ("contain", false),
                BackgroundSize::Auto => ("auto", false),
                BackgroundSize::Repeat => ("auto", true),
            };
            Some(BackgroundPaint::Image {
                url: url.clone(),
                size,
                position: position.clone(),
                repeat,
            })
        }
    }
}

fn border_paint(border: &BorderFacet) -> Option<BorderPaint> {
    if border.style == BorderStyle::None {
        return None;
    }
    Some(BorderPaint {
        style: border.style,
        color: border.color.clone(),
        width: border.width,
        radius: border.radius,
    })
}

fn shadow_paint(shadow: &ShadowFacet) -> Option<ShadowPaint> {
    if !shadow.enabled {
        return None;
    }
    Some(ShadowPaint {
        offset_x: shadow.offset_x,
        offset_y: shadow.offset_y,
        blur: shadow.blur,
        spread: shadow.spread,
        color: shadow.color.clone(),
    })
}

fn px_edges<T: std::fmt::Display + Copy>(edges: &Edges<T>) -> String {
    format!(
        "{}px {}px {}px {}px",
        edges.top, edges.right, edges.bottom, edges.left
    )
}

fn grid_columns(columns: u32) -> String {
    format!("repeat({}, minmax(0, 1fr))", columns)
}

impl RenderInstructions {
    /// Ordered CSS declarations for the inline style attribute.
    ///
    /// Desktop values are emitted as plain properties; tablet and mobile
    /// layout values are exposed as `--pc-*` custom properties consumed by
    /// the page stylesheet's media queries.
    pub fn css_declarations(&self) -> IndexMap<String, String> {
        let mut css = IndexMap::new();
        let layout = &self.layout;
        match layout.display {
            DisplayMode::Flex => {
                css.insert("display".to_string(), "flex".to_string());
                css.insert(
                    "flex-direction".to_string(),
                    layout.direction.desktop.css().to_string(),
                );
                css.insert(
                    "flex-wrap".to_string(),
                    if layout.wrap { "wrap" } else { "nowrap" }.to_string(),
                );
            }
            DisplayMode::Grid => {
                css.insert("display".to_string(), "grid".to_string());
                css.insert(
                    "grid-template-columns".to_string(),
                    grid_columns(layout.columns.desktop),
                );
            }
        }
        css.insert("gap".to_string(), format!("{}px", layout.gap.desktop));
        css.insert("align-items".to_string(), layout.align_items.css().to_string());
        css.insert(
            "justify-content".to_string(),
            layout.justify_content.css().to_string(),
        );

        css.insert("padding".to_string(), px_edges(&self.padding));
        css.insert("margin".to_string(), px_edges(&self.margin));
        if let Some(max) = self.max_width {
            css.insert("max-width".to_string(), format!("{}px", max));
        }

        match &self.background {
            Some(BackgroundPaint::Color { color }) => {
                css.insert("background-color".to_string(), color.clone());
            }
            Some(BackgroundPaint::LinearGradient { angle, stops }) => {
                let stops = stops
                    .iter()
                    .map(|s| format!("{} {}%", s.color, s.position))
                    .collect::<Vec<_>>()
                    .join(", ");
                css.insert(
                    "background-image".to_string(),
                    format!("linear-gradient({}deg, {})", angle, stops),
                );
            }
            Some(BackgroundPaint::Image {
                url,
                size,
                position,
                repeat,
            }) => {
                css.insert("background-image".to_string(), format!("url('{}')", url));
                css.insert("background-size".to_string(), size.to_string());
                css.insert("background-position".to_string(), position.clone());
                css.insert(
                    "background-repeat".to_string(),
                    if *repeat { "repeat" } else { "no-repeat" }.to_string(),
                );
            }
            None => {}
        }

        if let Some(border) = &self.border {
            css.insert("border-style".to_string(), border.style.css().to_string());
            css.insert("border-color".to_string(), border.color.clone());
            css.insert("border-width".to_string(), px_edges(&border.width));
            let r = &border.radius;
            css.insert(
                "border-radius".to_string(),
                format!(
                    "{}px {}px {}px {}px",
                    r.top_left, r.top_right, r.bottom_right, r.bottom_left
                ),
            );
        }

        if let Some(shadow) = &self.shadow {
            css.insert(
                "box-shadow".to_string(),
                format!(
                    "{}px {}px {}px {}px {}",
                    shadow.offset_x, shadow.offset_y, shadow.blur, shadow.spread, shadow.color
                ),
            );
        }

        for bp in [Breakpoint::Tablet, Breakpoint::Mobile] {
            let name = bp.as_str();
            match layout.display {
                DisplayMode::Flex => {
                    css.insert(
                        format!("--pc-direction-{}", name),
                        layout.direction.get(bp).css().to_string(),
                    );
                }
                DisplayMode::Grid => {
                    css.insert(
                        format!("--pc-columns-{}", name),
                        grid_columns(*layout.columns.get(bp)),
                    );
                }
            }
            css.insert(format!("--pc-gap-{}", name), format!("{}px", layout.gap.get(bp)));
        }
        css
    }

    /// The declarations joined as an inline style string.
    pub fn css_text(&self) -> String {
        self.css_declarations()
            .iter()
            .map(|(k, v)| format!("{}: {};", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Class names for breakpoints where the block is hidden.
    pub fn visibility_classes(&self) -> Vec<String> {
        Breakpoint::ALL
            .iter()
            .filter(|bp| !self.visibility.is_visible(**bp))
            .map(|bp| format!("pc-hide-{}", bp.as_str()))
            .collect()
    }
}
