//! Builder session state.
//!
//! [`BuilderSession`] owns the document history and routes every user
//! gesture (palette drops, reorders, handle drags, keyboard shortcuts, code
//! mode switches) into exactly one history entry per successful edit. Reads
//! for rendering always go through the current snapshot.

use std::rc::Rc;

use chrono::Utc;
use tracing::{debug, trace};

use crate::config::BuilderConfig;
use crate::content::{BlockContent, ResolvedContent};
use crate::error::ModelError;
use crate::generator::{block_markup, generate_page_markup};
use crate::model::{Block, BlockId, BlockKind, BlockMode, PageDocument};
use crate::style::{Corner, Edge, RenderInstructions, resolve_style};

use super::canvas::{CanvasDnd, DropOutcome, DropTarget, PaletteItem};
use super::handles::{Handle, HandleKind, available_handles, max_span, read_handle, write_handle};
use super::history::History;
use super::shortcuts::{InputSurface, KeyChord, KeyOutcome, Shortcut, ShortcutScope};
use super::value_drag::{DragRange, TouchPoint, ValueDrag};

// ────────────────────────────────────────────────────────────────────────────
// Handle drag
// ────────────────────────────────────────────────────────────────────────────

/// An in-progress drag on one block handle.
#[derive(Debug, Clone)]
pub struct HandleDrag {
    pub block: BlockId,
    pub handle: Handle,
    binder: ValueDrag,
}

impl HandleDrag {
    pub fn binder(&self) -> &ValueDrag {
        &self.binder
    }
}

// ────────────────────────────────────────────────────────────────────────────
// BuilderSession
// ────────────────────────────────────────────────────────────────────────────

/// The complete state of one page-builder session.
///
/// # Example
///
/// ```rust
/// use pagecraft::config::BuilderConfig;
/// use pagecraft::editor::BuilderSession;
/// use pagecraft::model::BlockKind;
///
/// let mut session = BuilderSession::new(BuilderConfig::default());
/// let id = session.add_block(BlockKind::Hero);
/// assert_eq!(session.selected(), Some(&id));
/// session.undo();
/// assert!(session.document().is_empty());
/// ```
#[derive(Debug)]
pub struct BuilderSession {
    config: BuilderConfig,
    history: History<PageDocument>,
    canvas: CanvasDnd,
    selected: Option<BlockId>,
    handle_drag: Option<HandleDrag>,
    shortcuts: Option<ShortcutScope>,
    /// Whether the document changed since the last save.
    dirty: bool,
}

impl BuilderSession {
    pub fn new(config: BuilderConfig) -> Self {
        Self::with_document(PageDocument::new(), config)
    }

    pub fn with_document(doc: PageDocument, config: BuilderConfig) -> Self {
        Self {
            history: History::with_limit(doc, config.history_limit),
            config,
            canvas: CanvasDnd::new(),
            selected: None,
            handle_drag: None,
            shortcuts: None,
            dirty: false,
        }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// The current document snapshot.
    pub fn document(&self) -> &PageDocument {
        self.history.present()
    }

    pub fn history(&self) -> &History<PageDocument> {
        &self.history
    }

    pub fn canvas(&self) -> &CanvasDnd {
        &self.canvas
    }

    pub fn selected(&self) -> Option<&BlockId> {
        self.selected.as_ref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag (e.g. after saving).
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Replace the document without recording history.
    pub fn load(&mut self, doc: PageDocument) {
        debug!(blocks = doc.len(), "session: load");
        self.history.reset(doc);
        self.canvas.cancel();
        self.handle_drag = None;
        self.selected = None;
        self.dirty = false;
    }

    /// Select a block. Unknown ids clear the selection.
    pub fn select(&mut self, id: Option<BlockId>) {
        self.selected = id.filter(|id| self.document().get(id).is_some());
    }

    fn commit(&mut self, next: PageDocument) -> bool {
        let changed = self.history.set(next);
        if changed {
            self.dirty = true;
        }
        changed
    }

    /// Apply `f` to a copy of block `id` and commit the result if `f`
    /// reports a change.
    fn edit_block(&mut self, id: &BlockId, f: impl FnOnce(&mut Block) -> bool) -> bool {
        let mut next = self.document().clone();
        let Some(block) = next.get_mut(id) else {
            return false;
        };
        if !f(block) {
            return false;
        }
        self.commit(next)
    }

    fn retain_valid_selection(&mut self) {
        if let Some(id) = &self.selected {
            if self.history.present().get(id).is_none() {
                self.selected = None;
            }
        }
    }

    // ── Undo / redo ─────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo();
        if undone {
            self.dirty = true;
            self.retain_valid_selection();
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo();
        if redone {
            self.dirty = true;
            self.retain_valid_selection();
        }
        redone
    }

    // ── Keyboard ────────────────────────────────────────────────────────

    /// Register the session's shortcut listener on `surface`. Any previous
    /// registration is released first.
    pub fn mount(&mut self, surface: Rc<dyn InputSurface>) {
        self.shortcuts = None;
        self.shortcuts = Some(ShortcutScope::acquire(surface));
    }

    /// Release the shortcut listener.
    pub fn unmount(&mut self) {
        self.shortcuts = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.shortcuts.is_some()
    }

    /// Handle a key event. Ignored while the session is not mounted.
    pub fn handle_key(&mut self, chord: &KeyChord) -> KeyOutcome {
        let Some(scope) = &self.shortcuts else {
            return KeyOutcome::ignored();
        };
        let outcome = scope.dispatch(chord);
        match outcome.shortcut {
            Some(Shortcut::Undo) => {
                self.undo();
            }
            Some(Shortcut::Redo) => {
                self.redo();
            }
            None => {}
        }
        outcome
    }

    // ── Document operations ─────────────────────────────────────────────

    /// Append a new block of `kind` and select it.
    pub fn add_block(&mut self, kind: BlockKind) -> BlockId {
        let len = self.document().len();
        self.insert_block(len, kind)
    }

    /// Insert a new block of `kind` at `index` (clamped) and select it.
    pub fn insert_block(&mut self, index: usize, kind: BlockKind) -> BlockId {
        let block = Block::new(kind);
        let id = block.id.clone();
        let mut next = self.document().clone();
        next.insert(index, block);
        self.commit(next);
        self.selected = Some(id.clone());
        id
    }

    pub fn delete_block(&mut self, id: &BlockId) -> bool {
        let mut next = self.document().clone();
        if next.remove(id).is_none() {
            return false;
        }
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        if self.handle_drag.as_ref().is_some_and(|d| &d.block == id) {
            self.handle_drag = None;
        }
        self.commit(next)
    }

    /// Insert a copy of block `id` right after it and select the copy.
    pub fn duplicate_block(&mut self, id: &BlockId) -> Option<BlockId> {
        let index = self.document().index_of(id)?;
        let copy = self.document().blocks()[index].duplicate();
        let copy_id = copy.id.clone();
        let mut next = self.document().clone();
        next.insert(index + 1, copy);
        self.commit(next);
        self.selected = Some(copy_id.clone());
        Some(copy_id)
    }

    pub fn move_block_up(&mut self, id: &BlockId) -> bool {
        match self.document().index_of(id) {
            Some(index) if index > 0 => self.move_block(index, index - 1),
            _ => false,
        }
    }

    pub fn move_block_down(&mut self, id: &BlockId) -> bool {
        match self.document().index_of(id) {
            Some(index) => self.move_block(index, index + 1),
            None => false,
        }
    }

    fn move_block(&mut self, from: usize, to: usize) -> bool {
        let mut next = self.document().clone();
        if !next.move_block(from, to) {
            return false;
        }
        self.commit(next)
    }

    /// Edit the content of a visual-mode block in place. Edits that change
    /// the block's kind are rejected.
    pub fn update_content(&mut self, id: &BlockId, f: impl FnOnce(&mut BlockContent)) -> bool {
        self.edit_block(id, |block| {
            if block.mode != BlockMode::Visual {
                return false;
            }
            let kind = block.kind();
            let mut content = block.content.clone();
            f(&mut content);
            if content.kind() != kind {
                trace!(block = %block.id, "session: content edit changed kind, rejected");
                return false;
            }
            block.content = content;
            true
        })
    }

    /// Set a border edge width. Linked borders update every edge.
    pub fn set_border_width(&mut self, id: &BlockId, edge: Edge, value: u32) -> bool {
        self.edit_block(id, |block| {
            let Some(defaults) = ResolvedContent::defaults_for(block.kind())
                .style()
                .map(|s| s.border.clone())
            else {
                return false;
            };
            let Some(patch) = block.content.style_patch_mut() else {
                return false;
            };
            patch.border.set_width(edge, value, &defaults);
            true
        })
    }

    /// Set a border corner radius. Linked borders update every corner.
    pub fn set_border_radius(&mut self, id: &BlockId, corner: Corner, value: u32) -> bool {
        self.edit_block(id, |block| {
            let Some(defaults) = ResolvedContent::defaults_for(block.kind())
                .style()
                .map(|s| s.border.clone())
            else {
                return false;
            };
            let Some(patch) = block.content.style_patch_mut() else {
                return false;
            };
            patch.border.set_radius(corner, value, &defaults);
            true
        })
    }

    // ── Code mode ───────────────────────────────────────────────────────

    pub fn switch_to_code(&mut self, id: &BlockId) -> bool {
        let now = Utc::now();
        self.edit_block(id, |block| block.switch_to_code(now))
    }

    pub fn revert_to_visual(&mut self, id: &BlockId) -> bool {
        self.edit_block(id, |block| block.revert_to_visual())
    }

    pub fn edit_code(&mut self, id: &BlockId, html: &str) -> bool {
        let now = Utc::now();
        let limit = self.config.code_version_limit;
        self.edit_block(id, |block| block.edit_code(html, now, limit))
    }

    pub fn restore_code_version(&mut self, id: &BlockId, index: usize) -> bool {
        self.edit_block(id, |block| block.restore_code_version(index))
    }

    // ── Canvas drag and drop ────────────────────────────────────────────

    /// Start dragging a palette item. Rejected while a handle drag is active.
    pub fn begin_palette_drag(&mut self, item: PaletteItem) -> bool {
        if self.handle_drag.is_some() {
            return false;
        }
        self.canvas.begin_palette_drag(item)
    }

    /// Start reordering block `id`. Rejected while a handle drag is active.
    pub fn begin_block_drag(&mut self, id: &BlockId) -> bool {
        if self.handle_drag.is_some() || self.document().get(id).is_none() {
            return false;
        }
        self.canvas.begin_block_drag(id.clone())
    }

    pub fn cancel_drag(&mut self) {
        self.canvas.cancel();
    }

    /// Finish the current canvas drag over `target`. Inserted blocks are
    /// selected (the first one for multi-block drops).
    pub fn drop_on(&mut self, target: Option<&DropTarget>) -> DropOutcome {
        let outcome = self.canvas.drop_on(target, &mut self.history);
        match &outcome {
            DropOutcome::Inserted { ids, .. } => {
                self.dirty = true;
                self.selected = ids.first().cloned();
            }
            DropOutcome::Moved { .. } => self.dirty = true,
            DropOutcome::Cancelled => {}
        }
        outcome
    }

    /// Parse a JSON array of blocks and drop it onto `target` as one edit.
    ///
    /// Every block type is validated before anything is inserted. Imported
    /// blocks receive fresh ids.
    pub fn import_blocks(
        &mut self,
        json: &str,
        target: &DropTarget,
    ) -> Result<DropOutcome, ModelError> {
        let imported = PageDocument::from_json(json)?;
        let blocks: Vec<Block> = imported.iter().cloned().collect();
        if blocks.is_empty() || !self.canvas.is_idle() {
            return Ok(DropOutcome::Cancelled);
        }
        self.canvas.begin_palette_drag(PaletteItem::Blocks(blocks));
        Ok(self.drop_on(Some(target)))
    }

    // ── Handle drags ────────────────────────────────────────────────────

    pub fn handle_drag(&self) -> Option<&HandleDrag> {
        self.handle_drag.as_ref()
    }

    /// Handles to show on block `id`.
    pub fn handles_for(&self, id: &BlockId) -> Vec<Handle> {
        match self.document().get(id) {
            Some(block) if block.mode == BlockMode::Visual => available_handles(&block.content),
            _ => Vec::new(),
        }
    }

    fn handle_range(&self, content: &BlockContent, handle: Handle) -> DragRange {
        let mut range = self.config.handles.for_kind(handle.kind());
        if handle.kind() == HandleKind::Span {
            if let Some(max) = max_span(content) {
                range.max = range.max.min(max as f64);
            }
        }
        range
    }

    fn prepare_handle_drag(&self, id: &BlockId, handle: Handle) -> Option<(HandleDrag, f64)> {
        if self.handle_drag.is_some() || !self.canvas.is_idle() {
            return None;
        }
        let block = self.document().get(id)?;
        if block.mode != BlockMode::Visual {
            return None;
        }
        let value = read_handle(&block.content, handle)?;
        let binder = ValueDrag::new(self.handle_range(&block.content, handle), handle.direction());
        let drag = HandleDrag {
            block: id.clone(),
            handle,
            binder,
        };
        Some((drag, value))
    }

    /// Start a pointer drag on `handle` of block `id`.
    pub fn begin_handle_drag(&mut self, id: &BlockId, handle: Handle, x: f64, y: f64) -> bool {
        let Some((mut drag, value)) = self.prepare_handle_drag(id, handle) else {
            return false;
        };
        if !drag.binder.pointer_down(x, y, value) {
            return false;
        }
        self.handle_drag = Some(drag);
        true
    }

    /// Start a touch drag on `handle` of block `id`.
    pub fn begin_handle_touch(&mut self, id: &BlockId, handle: Handle, touches: &[TouchPoint]) -> bool {
        let Some((mut drag, value)) = self.prepare_handle_drag(id, handle) else {
            return false;
        };
        if !drag.binder.touch_start(touches, value) {
            return false;
        }
        self.handle_drag = Some(drag);
        true
    }

    fn apply_handle_value(&mut self, value: Option<f64>) -> bool {
        let (Some(value), Some(drag)) = (value, &self.handle_drag) else {
            return false;
        };
        let id = drag.block.clone();
        let handle = drag.handle;
        self.edit_block(&id, |block| match write_handle(&block.content, handle, value) {
            Some(next) => {
                block.content = next;
                true
            }
            None => false,
        })
    }

    /// Pointer moved during a handle drag. Returns true when the document
    /// changed.
    pub fn handle_pointer_move(&mut self, x: f64, y: f64) -> bool {
        let value = self.handle_drag.as_mut().and_then(|d| d.binder.pointer_move(x, y));
        self.apply_handle_value(value)
    }

    /// Touches moved during a handle drag. Returns true when the document
    /// changed.
    pub fn handle_touch_move(&mut self, touches: &[TouchPoint]) -> bool {
        let value = self.handle_drag.as_mut().and_then(|d| d.binder.touch_move(touches));
        self.apply_handle_value(value)
    }

    /// Pointer released: ends a pointer handle drag.
    pub fn handle_pointer_up(&mut self) -> bool {
        let ended = self.handle_drag.as_mut().is_some_and(|d| d.binder.pointer_up());
        if ended {
            self.handle_drag = None;
        }
        ended
    }

    /// A touch lifted: ends a touch handle drag once its finger is gone.
    pub fn handle_touch_end(&mut self, remaining: &[TouchPoint]) -> bool {
        let ended = self.handle_drag.as_mut().is_some_and(|d| d.binder.touch_end(remaining));
        if ended {
            self.handle_drag = None;
        }
        ended
    }

    // ── Rendering ───────────────────────────────────────────────────────

    /// Markup for the whole page.
    pub fn export_markup(&self) -> String {
        generate_page_markup(self.document())
    }

    pub fn block_markup(&self, id: &BlockId) -> Option<String> {
        self.document().get(id).map(block_markup)
    }

    /// Render instructions for a style-bearing block.
    pub fn resolved_style(&self, id: &BlockId) -> Option<RenderInstructions> {
        let resolved = self.document().get(id)?.resolved();
        resolved.style().map(resolve_style)
    }
}

impl Default for BuilderSession {
    fn default() -> Self {
        Self::new(BuilderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::shortcuts::ListenerId;
    use crate::style::{Breakpoint, Edges};
    use std::cell::Cell;

    struct CountingSurface {
        attached: Cell<i32>,
    }

    impl InputSurface for CountingSurface {
        fn add_key_listener(&self) -> ListenerId {
            self.attached.set(self.attached.get() + 1);
            ListenerId(1)
        }

        fn remove_key_listener(&self, _id: ListenerId) {
            self.attached.set(self.attached.get() - 1);
        }
    }

    fn session_with(kinds: &[BlockKind]) -> (BuilderSession, Vec<BlockId>) {
        let blocks: Vec<Block> = kinds.iter().map(|k| Block::new(*k)).collect();
        let ids = blocks.iter().map(|b| b.id.clone()).collect();
        let doc = PageDocument::from_blocks(blocks).unwrap();
        (BuilderSession::with_document(doc, BuilderConfig::default()), ids)
    }

    #[test]
    fn test_load_is_not_undoable() {
        let mut session = BuilderSession::default();
        session.add_block(BlockKind::Text);
        session.load(PageDocument::new());
        assert!(!session.undo());
        assert!(!session.is_dirty());
        assert!(session.selected().is_none());
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let mut session = BuilderSession::default();
        let id = session.add_block(BlockKind::Text);
        assert!(session.delete_block(&id));
        assert!(session.selected().is_none());
        assert!(!session.delete_block(&id));
        assert_eq!(session.history().past_len(), 2);
    }

    #[test]
    fn test_undo_drops_stale_selection() {
        let mut session = BuilderSession::default();
        session.add_block(BlockKind::Text);
        assert!(session.selected().is_some());
        session.undo();
        assert!(session.selected().is_none());
    }

    #[test]
    fn test_duplicate_inserted_after_original() {
        let (mut session, ids) = session_with(&[BlockKind::Hero, BlockKind::Text]);
        let copy = session.duplicate_block(&ids[0]).unwrap();
        let doc_ids = session.document().ids();
        assert_eq!(doc_ids, vec![ids[0].clone(), copy.clone(), ids[1].clone()]);
        assert_eq!(
            session.document().get(&copy).unwrap().content,
            session.document().get(&ids[0]).unwrap().content
        );
    }

    #[test]
    fn test_move_up_down_bounds() {
        let (mut session, ids) = session_with(&[BlockKind::Hero, BlockKind::Text]);
        assert!(!session.move_block_up(&ids[0]));
        assert!(!session.move_block_down(&ids[1]));
        assert!(session.move_block_down(&ids[0]));
        assert_eq!(session.document().ids(), vec![ids[1].clone(), ids[0].clone()]);
    }

    #[test]
    fn test_update_content_rejects_kind_change() {
        let (mut session, ids) = session_with(&[BlockKind::Hero]);
        assert!(session.update_content(&ids[0], |c| {
            if let BlockContent::Hero(hero) = c {
                hero.headline = Some("New".to_string());
            }
        }));
        assert!(!session.update_content(&ids[0], |c| {
            *c = BlockContent::empty(BlockKind::Text);
        }));
        assert_eq!(session.history().past_len(), 1);
    }

    #[test]
    fn test_linked_border_width() {
        let (mut session, ids) = session_with(&[BlockKind::FlexContainer]);
        assert!(session.set_border_width(&ids[0], Edge::Top, 3));
        let block = session.document().get(&ids[0]).unwrap();
        let width = block.content.style_patch().unwrap().border.width;
        assert_eq!(width.resolve(&Edges::uniform(1)), Edges::uniform(3));
        assert!(!session.set_border_width(&ids[0], Edge::Top, 3));
    }

    #[test]
    fn test_code_mode_via_session() {
        let (mut session, ids) = session_with(&[BlockKind::Heading]);
        assert!(session.switch_to_code(&ids[0]));
        assert!(!session.switch_to_code(&ids[0]));
        assert!(session.edit_code(&ids[0], "<h2>Mine</h2>"));
        assert_eq!(session.block_markup(&ids[0]).as_deref(), Some("<h2>Mine</h2>\n"));
        assert!(session.restore_code_version(&ids[0], 0));
        assert!(session.revert_to_visual(&ids[0]));
        assert_eq!(session.history().past_len(), 4);
    }

    #[test]
    fn test_handle_drag_writes_gap() {
        let (mut session, ids) = session_with(&[BlockKind::FlexContainer]);
        let handle = Handle::Gap(Breakpoint::Desktop);
        assert!(session.begin_handle_drag(&ids[0], handle, 0.0, 0.0));
        assert!(session.handle_pointer_move(10.0, 0.0));
        assert!(!session.handle_pointer_move(10.4, 0.0));
        assert!(session.handle_pointer_up());
        let block = session.document().get(&ids[0]).unwrap();
        assert_eq!(read_handle(&block.content, handle), Some(26.0));
        assert_eq!(session.history().past_len(), 1);
        assert!(session.handle_drag().is_none());
    }

    #[test]
    fn test_one_gesture_at_a_time() {
        let (mut session, ids) = session_with(&[BlockKind::Text, BlockKind::FlexContainer]);
        let handle = Handle::Gap(Breakpoint::Desktop);

        assert!(session.begin_block_drag(&ids[1]));
        assert!(!session.begin_handle_drag(&ids[1], handle, 0.0, 0.0));
        assert!(!session.handle_pointer_move(10.0, 0.0));
        assert_eq!(
            session.drop_on(Some(&DropTarget::Block(ids[0].clone()))),
            DropOutcome::Moved { from: 1, to: 0 }
        );
        assert_eq!(session.history().past_len(), 1);

        assert!(session.begin_handle_drag(&ids[1], handle, 0.0, 0.0));
        assert!(!session.begin_palette_drag(PaletteItem::Block(BlockKind::Image)));
        assert!(!session.begin_block_drag(&ids[0]));
        assert!(session.canvas().is_idle());
        assert!(session.handle_pointer_up());
        assert!(session.begin_palette_drag(PaletteItem::Block(BlockKind::Image)));
    }

    #[test]
    fn test_handle_drag_rejected_on_code_block() {
        let (mut session, ids) = session_with(&[BlockKind::FlexContainer]);
        session.switch_to_code(&ids[0]);
        assert!(session.handles_for(&ids[0]).is_empty());
        assert!(!session.begin_handle_drag(&ids[0], Handle::Gap(Breakpoint::Desktop), 0.0, 0.0));
    }

    #[test]
    fn test_shortcuts_need_mount() {
        let mut session = BuilderSession::default();
        session.add_block(BlockKind::Text);
        let undo = KeyChord::new("z").ctrl();
        assert!(!session.handle_key(&undo).prevent_default);
        assert_eq!(session.document().len(), 1);

        let surface = Rc::new(CountingSurface {
            attached: Cell::new(0),
        });
        session.mount(surface.clone());
        assert_eq!(surface.attached.get(), 1);
        assert!(session.handle_key(&undo).prevent_default);
        assert!(session.document().is_empty());
        assert!(session.handle_key(&KeyChord::new("y").ctrl()).prevent_default);
        assert_eq!(session.document().len(), 1);
        session.unmount();
        assert_eq!(surface.attached.get(), 0);
    }

    #[test]
    fn test_import_validates_before_insert() {
        let (mut session, _ids) = session_with(&[BlockKind::Text]);
        let bad = r#"[{"id": "x", "type": "hero", "content": {}},
                      {"id": "y", "type": "marquee", "content": {}}]"#;
        assert!(session.import_blocks(bad, &DropTarget::CanvasEnd).is_err());
        assert_eq!(session.document().len(), 1);
        assert!(session.canvas().is_idle());
    }
}
