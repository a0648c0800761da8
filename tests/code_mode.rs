use chrono::{TimeZone, Utc};

use pagecraft::content::BlockContent;
use pagecraft::generator::{block_markup, generate_block_markup};
use pagecraft::model::{Block, BlockKind, BlockMode};

#[test]
fn code_round_trip_restores_content_for_every_kind() {
    let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
    for kind in BlockKind::ALL {
        for content in [BlockContent::empty(kind), BlockContent::defaults_for(kind)] {
            let mut block = Block::with_content(content.clone());
            assert!(block.switch_to_code(now), "{kind}");
            assert_eq!(block.mode, BlockMode::Code);
            assert!(block.revert_to_visual(), "{kind}");
            assert_eq!(block.content, content, "{kind}");
            assert_eq!(block.mode, BlockMode::Visual);
        }
    }
}

#[test]
fn generated_markup_matches_visual_rendering() {
    let now = Utc::now();
    for kind in BlockKind::ALL {
        let mut block = Block::new(kind);
        let visual = block_markup(&block);
        block.switch_to_code(now);
        assert_eq!(block.html_content.as_deref(), Some(visual.as_str()));
        assert_eq!(block_markup(&block), visual);
        assert_eq!(
            block.code_version_history[0].html_content,
            generate_block_markup(&block.resolved())
        );
    }
}

#[test]
fn edits_survive_only_while_in_code_mode() {
    let now = Utc::now();
    let mut block = Block::new(BlockKind::Button);
    block.switch_to_code(now);
    assert!(block.edit_code("<a href=\"/x\">X</a>\n", now, 20));
    assert_eq!(block_markup(&block), "<a href=\"/x\">X</a>\n");
    block.revert_to_visual();
    assert!(block.html_content.is_none());
    assert_eq!(block.code_version_history.len(), 2);
    assert!(!block.edit_code("<a>Y</a>", now, 20));
    assert!(!block.restore_code_version(0));
}

#[test]
fn code_mode_persists_through_json() {
    let now = Utc.timestamp_millis_opt(1_650_000_000_123).unwrap();
    let mut block = Block::new(BlockKind::Testimonial);
    block.switch_to_code(now);
    let json = serde_json::to_value(&block).unwrap();
    assert_eq!(json["mode"], "code");
    assert_eq!(json["codeVersionHistory"][0]["timestamp"], 1_650_000_000_123_i64);
    assert!(json["lastVisualSnapshot"].get("testimonial").is_some());
    let back: Block = serde_json::from_value(json).unwrap();
    assert_eq!(back, block);
}
