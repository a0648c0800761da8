use pagecraft::config::BuilderConfig;
use pagecraft::editor::palette::page_template;
use pagecraft::editor::{BuilderSession, DropOutcome, DropTarget, PaletteItem, Rect, nearest_center};
use pagecraft::model::{Block, BlockId, BlockKind, PageDocument};

fn session_of(n: usize) -> (BuilderSession, Vec<BlockId>) {
    let blocks: Vec<Block> = (0..n).map(|_| Block::new(BlockKind::Text)).collect();
    let ids: Vec<BlockId> = blocks.iter().map(|b| b.id.clone()).collect();
    let doc = PageDocument::from_blocks(blocks).unwrap();
    (BuilderSession::with_document(doc, BuilderConfig::default()), ids)
}

#[test]
fn reorder_first_onto_fourth() {
    let (mut session, ids) = session_of(5);
    assert!(session.begin_block_drag(&ids[0]));
    let outcome = session.drop_on(Some(&DropTarget::Block(ids[3].clone())));
    assert_eq!(outcome, DropOutcome::Moved { from: 0, to: 3 });
    let expected = vec![
        ids[1].clone(),
        ids[2].clone(),
        ids[3].clone(),
        ids[0].clone(),
        ids[4].clone(),
    ];
    assert_eq!(session.document().ids(), expected);
    assert_eq!(session.history().past_len(), 1);

    session.undo();
    assert_eq!(session.document().ids(), ids);
}

#[test]
fn palette_drop_onto_third_block() {
    let (mut session, ids) = session_of(3);
    assert!(session.begin_palette_drag(PaletteItem::Block(BlockKind::Image)));
    let outcome = session.drop_on(Some(&DropTarget::Block(ids[2].clone())));
    let DropOutcome::Inserted { ids: new_ids, index } = outcome else {
        panic!("expected insert, got {:?}", outcome);
    };
    assert_eq!(index, 2);
    assert_eq!(
        session.document().ids(),
        vec![ids[0].clone(), ids[1].clone(), new_ids[0].clone(), ids[2].clone()]
    );
    assert_eq!(session.selected(), Some(&new_ids[0]));
    assert_eq!(session.history().past_len(), 1);
}

#[test]
fn template_drop_selects_first_block() {
    let (mut session, ids) = session_of(1);
    let template = page_template("Landing starter").unwrap();
    session.begin_palette_drag(template.to_item());
    let outcome = session.drop_on(Some(&DropTarget::Block(ids[0].clone())));
    let DropOutcome::Inserted { ids: new_ids, index } = outcome else {
        panic!("expected insert");
    };
    assert_eq!(index, 0);
    assert_eq!(new_ids.len(), 4);
    assert_eq!(session.selected(), Some(&new_ids[0]));
    assert_eq!(session.document().len(), 5);
    assert_eq!(session.document().blocks()[4].id, ids[0]);
    assert_eq!(session.history().past_len(), 1);
}

#[test]
fn import_splices_with_fresh_ids() {
    let (mut session, ids) = session_of(2);
    let json = r#"[
        {"id": "imp-1", "type": "heading", "content": {"heading": {"text": "Imported"}}},
        {"id": "imp-2", "type": "spacer", "content": {"spacer": {"height": 24}}}
    ]"#;
    let outcome = session
        .import_blocks(json, &DropTarget::Block(ids[1].clone()))
        .unwrap();
    let DropOutcome::Inserted { ids: new_ids, index } = outcome else {
        panic!("expected insert");
    };
    assert_eq!(index, 1);
    assert!(new_ids.iter().all(|id| !id.as_str().starts_with("imp-")));
    let kinds: Vec<BlockKind> = session.document().iter().map(|b| b.kind()).collect();
    assert_eq!(
        kinds,
        vec![BlockKind::Text, BlockKind::Heading, BlockKind::Spacer, BlockKind::Text]
    );
    assert_eq!(session.selected(), Some(&new_ids[0]));
}

#[test]
fn cancelled_drops_leave_history_alone() {
    let (mut session, ids) = session_of(3);
    session.begin_block_drag(&ids[2]);
    assert_eq!(session.drop_on(None), DropOutcome::Cancelled);
    session.begin_block_drag(&ids[2]);
    assert_eq!(
        session.drop_on(Some(&DropTarget::Block(ids[2].clone()))),
        DropOutcome::Cancelled
    );
    assert!(!session.begin_block_drag(&BlockId::from("ghost")));
    assert_eq!(session.history().past_len(), 0);
    assert!(!session.is_dirty());
}

#[test]
fn pointer_targets_nearest_block() {
    let (session, ids) = session_of(3);
    let layout: Vec<(BlockId, Rect)> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| (id.clone(), Rect::new(0.0, i as f64 * 100.0, 800.0, 100.0)))
        .collect();
    let target = nearest_center((400.0, 180.0), &layout).cloned();
    assert_eq!(target.as_ref(), Some(&ids[1]));
    assert!(session.document().get(&ids[1]).is_some());
}
