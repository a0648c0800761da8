//! Undo/redo keyboard shortcuts and their scoped registration.
//!
//! The host owns the real key listener. A [`ShortcutScope`] registers one
//! listener on an [`InputSurface`] when a builder session mounts and removes it
//! again when the scope is dropped.

use std::fmt;
use std::rc::Rc;

use tracing::debug;

/// A key press with its modifier state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyChord {
    /// Key value as reported by the host, e.g. `"z"` or `"Z"`.
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyChord {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    /// Ctrl on most platforms, Cmd on macOS. Either counts.
    pub fn has_primary(&self) -> bool {
        self.ctrl || self.meta
    }

    /// The builder shortcut this chord triggers, if any.
    pub fn shortcut(&self) -> Option<Shortcut> {
        if !self.has_primary() || self.alt {
            return None;
        }
        match self.key.to_ascii_lowercase().as_str() {
            "z" if self.shift => Some(Shortcut::Redo),
            "z" => Some(Shortcut::Undo),
            "y" => Some(Shortcut::Redo),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Undo,
    Redo,
}

/// What the host should do with a key event after the builder saw it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// The shortcut the chord mapped to, if any.
    pub shortcut: Option<Shortcut>,
    /// Suppress the platform's default action for this event.
    pub prevent_default: bool,
}

impl KeyOutcome {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled(shortcut: Shortcut) -> Self {
        Self {
            shortcut: Some(shortcut),
            prevent_default: true,
        }
    }
}

/// Handle for a registered key listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Host-side input surface that key listeners attach to.
pub trait InputSurface {
    fn add_key_listener(&self) -> ListenerId;
    fn remove_key_listener(&self, id: ListenerId);
}

/// A live shortcut registration. Dropping it detaches the listener.
pub struct ShortcutScope {
    surface: Rc<dyn InputSurface>,
    listener: ListenerId,
}

impl ShortcutScope {
    pub fn acquire(surface: Rc<dyn InputSurface>) -> Self {
        let listener = surface.add_key_listener();
        debug!(listener = listener.0, "shortcuts: listener attached");
        Self { surface, listener }
    }

    pub fn listener(&self) -> ListenerId {
        self.listener
    }

    /// Map a chord to its outcome.
    pub fn dispatch(&self, chord: &KeyChord) -> KeyOutcome {
        match chord.shortcut() {
            Some(shortcut) => KeyOutcome::handled(shortcut),
            None => KeyOutcome::ignored(),
        }
    }
}

impl Drop for ShortcutScope {
    fn drop(&mut self) {
        self.surface.remove_key_listener(self.listener);
        debug!(listener = self.listener.0, "shortcuts: listener released");
    }
}

impl fmt::Debug for ShortcutScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutScope")
            .field("listener", &self.listener)
            .finish_non_exhaustive()
    }
}
