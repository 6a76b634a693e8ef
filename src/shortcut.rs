//! Keyboard shortcut matching (Ctrl/Cmd + Shift + D by default).

#[cfg(test)]
#[path = "shortcut_test.rs"]
mod shortcut_test;

use crate::config::ShortcutConfig;

/// A key-down event reduced to what the matcher needs.
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyChord {
    /// Key name as reported by the browser (`KeyboardEvent.key`).
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyChord {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), ..Self::default() }
    }

    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    #[must_use]
    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    #[must_use]
    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }
}

/// Compiled shortcut from [`ShortcutConfig`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shortcut {
    enabled: bool,
    key: String,
    require_shift: bool,
}

impl Shortcut {
    #[must_use]
    pub fn from_config(config: &ShortcutConfig) -> Self {
        Self { enabled: config.enabled, key: config.key.clone(), require_shift: config.require_shift }
    }

    /// Either Ctrl or Meta must be held, so the chord works on every platform.
    #[must_use]
    pub fn matches(&self, chord: &KeyChord) -> bool {
        self.enabled
            && (chord.ctrl || chord.meta)
            && (!self.require_shift || chord.shift)
            && chord.key == self.key
    }
}

impl Default for Shortcut {
    fn default() -> Self {
        Self::from_config(&ShortcutConfig::default())
    }
}
