//! Visual ⇄ code mode transitions for a single block.
//!
//! Entering code mode generates markup from the block's resolved content and
//! snapshots the content so reverting restores it exactly. Every transition
//! that is not legal from the current state is a no-op and returns `false`.

use chrono::{DateTime, SubsecRound, Utc};
use tracing::debug;

use crate::generator::generate_block_markup;
use crate::model::{Block, BlockMode, CodeVersion};

/// Version timestamps are persisted in milliseconds; keep only that much
/// precision in memory too.
fn version_timestamp(now: DateTime<Utc>) -> DateTime<Utc> {
    now.trunc_subsecs(3)
}

impl Block {
    /// Switch to code mode. No-op when already in code mode.
    pub fn switch_to_code(&mut self, now: DateTime<Utc>) -> bool {
        if self.mode == BlockMode::Code {
            return false;
        }
        let markup = generate_block_markup(&self.resolved());
        self.last_visual_snapshot = Some(self.content.clone());
        self.code_version_history = vec![CodeVersion {
            timestamp: version_timestamp(now),
            html_content: markup.clone(),
        }];
        self.html_content = Some(markup);
        self.mode = BlockMode::Code;
        debug!(block = %self.id, kind = %self.kind(), "entered code mode");
        true
    }

    /// Restore the visual content captured when code mode was entered.
    ///
    /// Only legal in code mode with a snapshot present. The code version
    /// history is kept.
    pub fn revert_to_visual(&mut self) -> bool {
        if self.mode != BlockMode::Code {
            return false;
        }
        let Some(snapshot) = self.last_visual_snapshot.take() else {
            return false;
        };
        self.content = snapshot;
        self.html_content = None;
        self.mode = BlockMode::Visual;
        debug!(block = %self.id, "reverted to visual mode");
        true
    }

    /// Replace the markup of a code-mode block and record a version.
    ///
    /// `limit` bounds the retained versions; the oldest are dropped first.
    /// Identical markup is a no-op.
    pub fn edit_code(&mut self, html: &str, now: DateTime<Utc>, limit: usize) -> bool {
        if self.mode != BlockMode::Code || self.html_content.as_deref() == Some(html) {
            return false;
        }
        self.html_content = Some(html.to_string());
        self.code_version_history.push(CodeVersion {
            timestamp: version_timestamp(now),
            html_content: html.to_string(),
        });
        let limit = limit.max(1);
        if self.code_version_history.len() > limit {
            let excess = self.code_version_history.len() - limit;
            self.code_version_history.drain(..excess);
        }
        true
    }

    /// Make a recorded version the current markup.
    pub fn restore_code_version(&mut self, index: usize) -> bool {
        if self.mode != BlockMode::Code {
            return false;
        }
        let Some(version) = self.code_version_history.get(index) else {
            return false;
        };
        if self.html_content.as_deref() == Some(version.html_content.as_str()) {
            return false;
        }
        self.html_content = Some(version.html_content.clone());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{BlockContent, HeroContent};
    use crate::model::BlockKind;
    use chrono::TimeZone;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn test_enter_code_mode() {
        let mut block = Block::new(BlockKind::Heading);
        let before = block.content.clone();
        assert!(block.switch_to_code(at(1_000)));
        assert_eq!(block.mode, BlockMode::Code);
        assert_eq!(block.last_visual_snapshot.as_ref(), Some(&before));
        let html = block.html_content.clone().unwrap();
        assert!(html.contains("Section heading"));
        assert_eq!(block.code_version_history.len(), 1);
        assert_eq!(block.code_version_history[0].html_content, html);
        assert_eq!(block.code_version_history[0].timestamp, at(1_000));
    }

    #[test]
    fn test_version_timestamps_survive_json() {
        let now = at(1_650_000_000_123) + chrono::Duration::nanoseconds(456_789);
        let mut block = Block::new(BlockKind::Text);
        block.switch_to_code(now);
        block.edit_code("<p>x</p>", now, 20);
        assert!(block.code_version_history.iter().all(|v| v.timestamp == at(1_650_000_000_123)));
        let json = serde_json::to_string(&block).unwrap();
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn test_reenter_code_mode_is_noop() {
        let mut block = Block::new(BlockKind::Text);
        block.switch_to_code(at(1));
        block.edit_code("<p>custom</p>", at(2), 20);
        let snapshot = block.clone();
        assert!(!block.switch_to_code(at(3)));
        assert_eq!(block, snapshot);
    }

    #[test]
    fn test_revert_restores_partial_content() {
        let mut block = Block::with_content(BlockContent::Hero(HeroContent {
            headline: Some("Only this".to_string()),
            ..Default::default()
        }));
        let before = block.content.clone();
        block.switch_to_code(at(1));
        assert!(block.revert_to_visual());
        assert_eq!(block.content, before);
        assert_eq!(block.mode, BlockMode::Visual);
        assert!(block.html_content.is_none());
        assert_eq!(block.code_version_history.len(), 1);
    }

    #[test]
    fn test_revert_without_snapshot_is_noop() {
        let mut block = Block::new(BlockKind::Text);
        assert!(!block.revert_to_visual());
        block.mode = BlockMode::Code;
        block.html_content = Some("<p/>".to_string());
        assert!(!block.revert_to_visual());
        assert_eq!(block.mode, BlockMode::Code);
    }

    #[test]
    fn test_edit_code_versions_bounded() {
        let mut block = Block::new(BlockKind::Spacer);
        assert!(!block.edit_code("<div></div>", at(0), 3));
        block.switch_to_code(at(0));
        for i in 1..=5 {
            assert!(block.edit_code(&format!("<div>{}</div>", i), at(i), 3));
        }
        assert!(!block.edit_code("<div>5</div>", at(9), 3));
        let versions: Vec<&str> = block
            .code_version_history
            .iter()
            .map(|v| v.html_content.as_str())
            .collect();
        assert_eq!(versions, vec!["<div>3</div>", "<div>4</div>", "<div>5</div>"]);
    }

    #[test]
    fn test_restore_code_version() {
        let mut block = Block::new(BlockKind::Spacer);
        block.switch_to_code(at(0));
        let generated = block.html_content.clone().unwrap();
        block.edit_code("<div>edited</div>", at(1), 20);
        assert!(block.restore_code_version(0));
        assert_eq!(block.html_content.as_deref(), Some(generated.as_str()));
        assert!(!block.restore_code_version(0));
        assert!(!block.restore_code_version(7));
    }
}
