//! Direct-manipulation handles on layout blocks.
//!
//! A handle reads the block's current *resolved* value and, on change, writes
//! back exactly one field of the persisted content. Sibling facets and sibling
//! fields stay as they were, including unset ones.

use crate::content::{BlockContent, ResolvedContent};
use crate::style::{Breakpoint, Edge, StyleConfig};

use super::value_drag::DragDirection;

/// Handle family, used to look up drag ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    Padding,
    Gap,
    Span,
}

/// A single draggable handle on a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    /// Padding on one edge (from the advanced facet).
    Padding(Edge),
    /// Gap between items at one breakpoint (from the layout facet).
    Gap(Breakpoint),
    /// Column span of one smart-grid item.
    Span(usize),
}

impl Handle {
    pub fn kind(self) -> HandleKind {
        match self {
            Handle::Padding(_) => HandleKind::Padding,
            Handle::Gap(_) => HandleKind::Gap,
            Handle::Span(_) => HandleKind::Span,
        }
    }

    /// Top and bottom padding handles are pulled vertically; everything else
    /// horizontally.
    pub fn direction(self) -> DragDirection {
        match self {
            Handle::Padding(Edge::Top) | Handle::Padding(Edge::Bottom) => DragDirection::Vertical,
            _ => DragDirection::Horizontal,
        }
    }
}

fn enabled(style: &StyleConfig, handle: Handle) -> bool {
    let interaction = &style.canvas_interaction;
    match handle.kind() {
        HandleKind::Padding => interaction.padding_handles,
        HandleKind::Gap => interaction.gap_handles,
        HandleKind::Span => interaction.span_handles,
    }
}

/// Every handle the canvas should show for `content`.
pub fn available_handles(content: &BlockContent) -> Vec<Handle> {
    let resolved = content.resolve();
    let Some(style) = resolved.style() else {
        return Vec::new();
    };
    let mut handles: Vec<Handle> = Edge::ALL.into_iter().map(Handle::Padding).collect();
    handles.extend(Breakpoint::ALL.into_iter().map(Handle::Gap));
    if let ResolvedContent::SmartGrid(props) = &resolved {
        handles.extend((0..props.spans.len()).map(Handle::Span));
    }
    handles.retain(|h| enabled(style, *h));
    handles
}

/// Current resolved value behind `handle`, or `None` when the block has no
/// such handle or it is disabled.
pub fn read_handle(content: &BlockContent, handle: Handle) -> Option<f64> {
    let resolved = content.resolve();
    let style = resolved.style()?;
    if !enabled(style, handle) {
        return None;
    }
    match handle {
        Handle::Padding(edge) => Some(style.advanced.padding.get(edge) as f64),
        Handle::Gap(bp) => Some(*style.layout.gap.get(bp) as f64),
        Handle::Span(index) => match &resolved {
            ResolvedContent::SmartGrid(props) => props.spans.get(index).map(|s| *s as f64),
            _ => None,
        },
    }
}

/// Upper bound for a span handle: the desktop column count.
pub fn max_span(content: &BlockContent) -> Option<u32> {
    match content.resolve() {
        ResolvedContent::SmartGrid(props) => Some(props.style.layout.columns.desktop),
        _ => None,
    }
}

fn to_u32(value: f64) -> u32 {
    if value.is_nan() {
        return 0;
    }
    value.round().max(0.0).min(u32::MAX as f64) as u32
}

/// New content with the field behind `handle` set to `value`. Returns `None`
/// when the block has no such handle.
pub fn write_handle(content: &BlockContent, handle: Handle, value: f64) -> Option<BlockContent> {
    read_handle(content, handle)?;
    let value = to_u32(value);
    let mut next = content.clone();
    match handle {
        Handle::Padding(edge) => {
            next.style_patch_mut()?.advanced.padding.set(edge, value);
        }
        Handle::Gap(bp) => {
            next.style_patch_mut()?.layout.gap.set(bp, value);
        }
        Handle::Span(index) => {
            let ResolvedContent::SmartGrid(props) = content.resolve() else {
                return None;
            };
            let BlockContent::SmartGrid(grid) = &mut next else {
                return None;
            };
            let max = props.style.layout.columns.desktop.max(1);
            let mut spans = props.spans;
            let slot = spans.get_mut(index)?;
            *slot = value.clamp(1, max);
            grid.spans = Some(spans);
        }
    }
    Some(next)
}
