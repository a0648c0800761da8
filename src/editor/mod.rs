//! Interactive page-builder core.
//!
//! Everything a host UI needs to drive the builder, without any rendering of
//! its own:
//!
//! - **History**: snapshot undo/redo over the page document
//! - **Value drags**: pointer and touch drags turned into clamped, stepped values
//! - **Handles**: padding, gap and span handles on layout blocks
//! - **Canvas**: palette drops, reordering and nearest-center targeting
//! - **Palette**: block catalog and multi-block templates
//! - **Shortcuts**: undo/redo key chords with scoped listener registration
//! - **Session**: [`BuilderSession`] tying the above to one document

pub mod canvas;
pub mod handles;
pub mod history;
pub mod palette;
pub mod shortcuts;
pub mod state;
pub mod value_drag;

pub use canvas::{CanvasDnd, DragState, DropOutcome, DropTarget, PaletteItem, Rect, nearest_center};
pub use handles::{Handle, HandleKind, available_handles, read_handle, write_handle};
pub use history::History;
pub use palette::{PaletteCategory, PaletteEntry, PageTemplate, palette_by_category, palette_catalog, page_templates};
pub use shortcuts::{InputSurface, KeyChord, KeyOutcome, ListenerId, Shortcut, ShortcutScope};
pub use state::{BuilderSession, HandleDrag};
pub use value_drag::{DragDirection, DragRange, TouchPoint, ValueDrag};
