//! Behavior-lock tests for document undo/redo.

use proptest::prelude::*;

use pagecraft::editor::History;
use pagecraft::model::{Block, BlockKind, PageDocument};

fn kind_strategy() -> impl Strategy<Value = BlockKind> {
    prop::sample::select(BlockKind::ALL.to_vec())
}

proptest! {
    #[test]
    fn undo_n_restores_original(values in prop::collection::vec(any::<i64>(), 1..40)) {
        let mut history = History::new(i64::MIN);
        let mut applied = 0;
        for v in &values {
            if history.set(*v) {
                applied += 1;
            }
        }
        let last = *history.present();
        for _ in 0..applied {
            prop_assert!(history.undo());
        }
        prop_assert_eq!(*history.present(), i64::MIN);
        prop_assert!(!history.can_undo());
        for _ in 0..applied {
            prop_assert!(history.redo());
        }
        prop_assert_eq!(*history.present(), last);
        prop_assert!(!history.can_redo());
    }

    #[test]
    fn equal_set_never_changes_stacks(values in prop::collection::vec(0u8..4, 1..30), undos in 0usize..5) {
        let mut history = History::new(0u8);
        for v in values {
            history.set(v);
        }
        for _ in 0..undos {
            history.undo();
        }
        let past = history.past_len();
        let future = history.future_len();
        let present = *history.present();
        prop_assert!(!history.set(present));
        prop_assert_eq!(history.past_len(), past);
        prop_assert_eq!(history.future_len(), future);
    }

    #[test]
    fn document_edits_round_trip(kinds in prop::collection::vec(kind_strategy(), 1..12)) {
        let original = PageDocument::new();
        let mut history = History::new(original.clone());
        for kind in &kinds {
            history.update(|doc| {
                let mut next = doc.clone();
                next.push(Block::new(*kind));
                next
            });
        }
        let edited = history.present().clone();
        prop_assert_eq!(edited.len(), kinds.len());
        for _ in 0..kinds.len() {
            history.undo();
        }
        prop_assert_eq!(history.present(), &original);
        for _ in 0..kinds.len() {
            history.redo();
        }
        prop_assert_eq!(history.present(), &edited);
    }
}

#[test]
fn new_edit_after_undo_discards_redo() {
    let mut history = History::new(PageDocument::new());
    history.update(|doc| {
        let mut next = doc.clone();
        next.push(Block::new(BlockKind::Hero));
        next
    });
    history.undo();
    assert!(history.can_redo());
    history.update(|doc| {
        let mut next = doc.clone();
        next.push(Block::new(BlockKind::Text));
        next
    });
    assert!(!history.can_redo());
    assert_eq!(history.present().blocks()[0].kind(), BlockKind::Text);
}

#[test]
fn limit_bounds_past() {
    let mut history = History::with_limit(0, 3);
    for i in 1..=10 {
        history.set(i);
    }
    assert_eq!(history.past(), &[7, 8, 9]);
    while history.undo() {}
    assert_eq!(*history.present(), 7);
}
