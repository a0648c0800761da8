//! Canvas drag-and-drop controller.
//!
//! One gesture at a time: a drag starts from the palette or from an existing
//! block and ends with [`CanvasDnd::drop_on`]. A successful drop is applied to
//! the document as a single history entry; a drop without a usable target
//! leaves the document and history untouched.

use tracing::{debug, trace};

use crate::model::{Block, BlockId, BlockKind, PageDocument};

use super::history::History;

// ────────────────────────────────────────────────────────────────────────────
// Drag payloads and targets
// ────────────────────────────────────────────────────────────────────────────

/// What is being dragged out of the palette.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteItem {
    /// A single new block of this kind with default content.
    Block(BlockKind),
    /// A ready-made list of blocks (a template or an import). Each block gets
    /// a fresh id when dropped; relative order is kept.
    Blocks(Vec<Block>),
}

impl PaletteItem {
    fn instantiate(&self) -> Vec<Block> {
        match self {
            PaletteItem::Block(kind) => vec![Block::new(*kind)],
            PaletteItem::Blocks(blocks) => blocks.iter().map(Block::duplicate).collect(),
        }
    }
}

/// Where a drag was released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// The empty region after the last block.
    CanvasEnd,
    /// An existing block.
    Block(BlockId),
}

/// Current gesture.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    DraggingFromPalette(PaletteItem),
    DraggingExistingBlock(BlockId),
}

/// Result of a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// New blocks were inserted starting at `index`.
    Inserted { ids: Vec<BlockId>, index: usize },
    /// An existing block moved.
    Moved { from: usize, to: usize },
    /// Nothing changed.
    Cancelled,
}

impl DropOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DropOutcome::Cancelled)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Controller
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct CanvasDnd {
    state: DragState,
}

impl CanvasDnd {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == DragState::Idle
    }

    /// Start dragging a palette item. Rejected while another drag is active.
    pub fn begin_palette_drag(&mut self, item: PaletteItem) -> bool {
        if !self.is_idle() {
            trace!("canvas: drag already active, ignoring palette drag");
            return false;
        }
        self.state = DragState::DraggingFromPalette(item);
        true
    }

    /// Start dragging an existing block. Rejected while another drag is active.
    pub fn begin_block_drag(&mut self, id: BlockId) -> bool {
        if !self.is_idle() {
            trace!("canvas: drag already active, ignoring block drag");
            return false;
        }
        self.state = DragState::DraggingExistingBlock(id);
        true
    }

    /// Abandon the current drag without touching the document.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// End the current drag over `target` and apply it to `history`.
    ///
    /// The controller is idle afterwards whatever the outcome.
    pub fn drop_on(
        &mut self,
        target: Option<&DropTarget>,
        history: &mut History<PageDocument>,
    ) -> DropOutcome {
        let state = std::mem::take(&mut self.state);
        let Some(target) = target else {
            debug!("canvas: drop outside any target");
            return DropOutcome::Cancelled;
        };
        let outcome = match state {
            DragState::Idle => DropOutcome::Cancelled,
            DragState::DraggingFromPalette(item) => drop_palette_item(&item, target, history),
            DragState::DraggingExistingBlock(id) => drop_existing_block(&id, target, history),
        };
        debug!(?outcome, "canvas: drop");
        outcome
    }
}

fn drop_palette_item(
    item: &PaletteItem,
    target: &DropTarget,
    history: &mut History<PageDocument>,
) -> DropOutcome {
    let doc = history.present();
    let index = match target {
        DropTarget::CanvasEnd => doc.len(),
        DropTarget::Block(id) => match doc.index_of(id) {
            Some(index) => index,
            None => return DropOutcome::Cancelled,
        },
    };
    let blocks = item.instantiate();
    if blocks.is_empty() {
        return DropOutcome::Cancelled;
    }
    let ids: Vec<BlockId> = blocks.iter().map(|b| b.id.clone()).collect();
    let mut next = doc.clone();
    next.insert_many(index, blocks);
    history.set(next);
    DropOutcome::Inserted { ids, index }
}

fn drop_existing_block(
    id: &BlockId,
    target: &DropTarget,
    history: &mut History<PageDocument>,
) -> DropOutcome {
    let doc = history.present();
    let Some(from) = doc.index_of(id) else {
        return DropOutcome::Cancelled;
    };
    let to = match target {
        DropTarget::CanvasEnd => doc.len().saturating_sub(1),
        DropTarget::Block(target_id) => match doc.index_of(target_id) {
            Some(index) => index,
            None => return DropOutcome::Cancelled,
        },
    };
    let mut next = doc.clone();
    if !next.move_block(from, to) {
        return DropOutcome::Cancelled;
    }
    history.set(next);
    DropOutcome::Moved { from, to }
}

// ────────────────────────────────────────────────────────────────────────────
// Targeting
// ────────────────────────────────────────────────────────────────────────────

/// Axis-aligned block bounds on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// The block whose center is closest to `point`. On ties the first listed
/// block wins.
pub fn nearest_center<'a>(point: (f64, f64), blocks: &'a [(BlockId, Rect)]) -> Option<&'a BlockId> {
    let mut best: Option<(&BlockId, f64)> = None;
    for (id, rect) in blocks {
        let (cx, cy) = rect.center();
        let dist = (cx - point.0).powi(2) + (cy - point.1).powi(2);
        match best {
            Some((_, d)) if dist >= d => {}
            _ => best = Some((id, dist)),
        }
    }
    best.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_of(n: usize) -> (History<PageDocument>, Vec<BlockId>) {
        let blocks: Vec<Block> = (0..n).map(|_| Block::new(BlockKind::Text)).collect();
        let ids = blocks.iter().map(|b| b.id.clone()).collect();
        (History::new(PageDocument::from_blocks(blocks).unwrap()), ids)
    }

    #[test]
    fn test_palette_drop_on_canvas_end_appends() {
        let (mut history, ids) = doc_of(2);
        let mut dnd = CanvasDnd::new();
        assert!(dnd.begin_palette_drag(PaletteItem::Block(BlockKind::Hero)));
        let outcome = dnd.drop_on(Some(&DropTarget::CanvasEnd), &mut history);
        let DropOutcome::Inserted { ids: new_ids, index } = outcome else {
            panic!("expected insert");
        };
        assert_eq!(index, 2);
        let doc = history.present();
        assert_eq!(doc.ids(), vec![ids[0].clone(), ids[1].clone(), new_ids[0].clone()]);
        assert_eq!(doc.blocks()[2].kind(), BlockKind::Hero);
        assert_eq!(history.past_len(), 1);
        assert!(dnd.is_idle());
    }

    #[test]
    fn test_palette_drop_on_block_inserts_before() {
        let (mut history, ids) = doc_of(3);
        let mut dnd = CanvasDnd::new();
        dnd.begin_palette_drag(PaletteItem::Block(BlockKind::Button));
        let outcome = dnd.drop_on(Some(&DropTarget::Block(ids[2].clone())), &mut history);
        let DropOutcome::Inserted { ids: new_ids, index } = outcome else {
            panic!("expected insert");
        };
        assert_eq!(index, 2);
        assert_eq!(
            history.present().ids(),
            vec![ids[0].clone(), ids[1].clone(), new_ids[0].clone(), ids[2].clone()]
        );
    }

    #[test]
    fn test_multi_block_drop_keeps_order_and_fresh_ids() {
        let (mut history, ids) = doc_of(2);
        let template = vec![Block::new(BlockKind::Hero), Block::new(BlockKind::Form)];
        let template_ids: Vec<BlockId> = template.iter().map(|b| b.id.clone()).collect();
        let mut dnd = CanvasDnd::new();
        dnd.begin_palette_drag(PaletteItem::Blocks(template));
        let outcome = dnd.drop_on(Some(&DropTarget::Block(ids[1].clone())), &mut history);
        let DropOutcome::Inserted { ids: new_ids, index } = outcome else {
            panic!("expected insert");
        };
        assert_eq!(index, 1);
        assert_eq!(new_ids.len(), 2);
        assert!(new_ids.iter().all(|id| !template_ids.contains(id)));
        let kinds: Vec<BlockKind> = history.present().iter().map(|b| b.kind()).collect();
        assert_eq!(
            kinds,
            vec![BlockKind::Text, BlockKind::Hero, BlockKind::Form, BlockKind::Text]
        );
        assert_eq!(history.past_len(), 1);
    }

    #[test]
    fn test_reorder_is_stable_move() {
        let (mut history, ids) = doc_of(5);
        let mut dnd = CanvasDnd::new();
        dnd.begin_block_drag(ids[0].clone());
        let outcome = dnd.drop_on(Some(&DropTarget::Block(ids[3].clone())), &mut history);
        assert_eq!(outcome, DropOutcome::Moved { from: 0, to: 3 });
        assert_eq!(
            history.present().ids(),
            vec![
                ids[1].clone(),
                ids[2].clone(),
                ids[3].clone(),
                ids[0].clone(),
                ids[4].clone()
            ]
        );
        assert_eq!(history.past_len(), 1);
    }

    #[test]
    fn test_reorder_to_canvas_end_moves_last() {
        let (mut history, ids) = doc_of(3);
        let mut dnd = CanvasDnd::new();
        dnd.begin_block_drag(ids[0].clone());
        let outcome = dnd.drop_on(Some(&DropTarget::CanvasEnd), &mut history);
        assert_eq!(outcome, DropOutcome::Moved { from: 0, to: 2 });
    }

    #[test]
    fn test_drop_on_self_or_nowhere_is_cancelled() {
        let (mut history, ids) = doc_of(3);
        let mut dnd = CanvasDnd::new();
        dnd.begin_block_drag(ids[1].clone());
        let outcome = dnd.drop_on(Some(&DropTarget::Block(ids[1].clone())), &mut history);
        assert!(outcome.is_cancelled());

        dnd.begin_palette_drag(PaletteItem::Block(BlockKind::Hero));
        assert!(dnd.drop_on(None, &mut history).is_cancelled());

        dnd.begin_block_drag(ids[0].clone());
        let unknown = DropTarget::Block(BlockId::from("missing"));
        assert!(dnd.drop_on(Some(&unknown), &mut history).is_cancelled());

        assert_eq!(history.past_len(), 0);
        assert!(dnd.is_idle());
    }

    #[test]
    fn test_one_gesture_at_a_time() {
        let mut dnd = CanvasDnd::new();
        assert!(dnd.begin_block_drag(BlockId::from("a")));
        assert!(!dnd.begin_palette_drag(PaletteItem::Block(BlockKind::Hero)));
        assert_eq!(dnd.state(), &DragState::DraggingExistingBlock(BlockId::from("a")));
        dnd.cancel();
        assert!(dnd.begin_palette_drag(PaletteItem::Block(BlockKind::Hero)));
    }

    #[test]
    fn test_nearest_center_first_wins() {
        let blocks = vec![
            (BlockId::from("a"), Rect::new(0.0, 0.0, 100.0, 40.0)),
            (BlockId::from("b"), Rect::new(0.0, 40.0, 100.0, 40.0)),
            (BlockId::from("c"), Rect::new(0.0, 80.0, 100.0, 40.0)),
        ];
        assert_eq!(nearest_center((50.0, 95.0), &blocks), Some(&BlockId::from("c")));
        // Equidistant from a and b.
        assert_eq!(nearest_center((50.0, 40.0), &blocks), Some(&BlockId::from("a")));
        assert_eq!(nearest_center((0.0, 0.0), &[]), None);
    }
}
