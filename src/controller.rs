//! Theme controller: startup resolution, toggling, and system-driven updates.
//!
//! DESIGN
//! ======
//! The controller owns a [`ThemeContext`] and holds no theme state of its
//! own. The document marker is the single source of truth for the active
//! theme and the store for the explicit preference; both are re-read on
//! every event, so a toggle made between startup and a later system change
//! is always seen.
//!
//! State machine (per document): Light <-> Dark.
//! - explicit toggle / `set`: always applies, always persists
//! - system change: applies only while nothing is stored, never persists

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use crate::applier::apply_theme;
use crate::context::ThemeContext;
use crate::error::ThemeError;
use crate::resolver::{read_persisted, resolve_initial_theme, system_prefers_dark, system_theme};
use crate::shortcut::{KeyChord, Shortcut};
use crate::theme::Theme;

pub struct ThemeController {
    ctx: ThemeContext,
    shortcut: Shortcut,
}

impl ThemeController {
    #[must_use]
    pub fn new(ctx: ThemeContext) -> Self {
        let shortcut = Shortcut::from_config(&ctx.config.shortcut);
        Self { ctx, shortcut }
    }

    #[must_use]
    pub fn context(&self) -> &ThemeContext {
        &self.ctx
    }

    /// Resolve and apply the startup theme without persisting it.
    #[must_use]
    pub fn init(&self) -> Theme {
        let persisted = read_persisted(&self.ctx);
        let theme = resolve_initial_theme(persisted, system_prefers_dark(&self.ctx));
        self.apply(theme, false);
        log::info!(
            "theme: initialized to {theme} ({})",
            if persisted.is_some() { "stored preference" } else { "system preference" }
        );
        theme
    }

    /// Active theme as shown by the document marker.
    #[must_use]
    pub fn get(&self) -> Theme {
        let marker = self.ctx.document.marker(&self.ctx.config.marker_attribute);
        Theme::from_marker(marker.as_deref())
    }

    /// Flip the active theme and store it as the explicit preference.
    #[must_use]
    pub fn toggle(&self) -> Theme {
        let next = self.get().inverse();
        self.apply(next, true);
        next
    }

    /// Make `theme` the explicit preference.
    pub fn set(&self, theme: Theme) {
        self.apply(theme, true);
    }

    /// [`ThemeController::set`] for string callers.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::InvalidTheme`] when `raw` names no theme; the
    /// document is left untouched.
    pub fn set_str(&self, raw: &str) -> Result<Theme, ThemeError> {
        let theme = raw.parse::<Theme>()?;
        self.set(theme);
        Ok(theme)
    }

    /// Theme the system signal currently selects.
    #[must_use]
    pub fn system_preference(&self) -> Theme {
        system_theme(&self.ctx)
    }

    /// Whether an explicit preference is stored right now.
    #[must_use]
    pub fn has_stored_preference(&self) -> bool {
        read_persisted(&self.ctx).is_some()
    }

    /// React to a system color-scheme change.
    ///
    /// Returns `false` (and changes nothing) when an explicit preference is
    /// stored at the time of the event.
    #[must_use]
    pub fn handle_system_change(&self, prefers_dark: bool) -> bool {
        if self.has_stored_preference() {
            log::debug!("theme: system change ignored, explicit preference stored");
            return false;
        }
        self.apply(Theme::from_prefers_dark(prefers_dark), false);
        true
    }

    /// Toggle on the configured shortcut. Returns whether the chord matched.
    #[must_use]
    pub fn handle_key(&self, chord: &KeyChord) -> bool {
        if !self.shortcut.matches(chord) {
            return false;
        }
        let theme = self.toggle();
        log::debug!("theme: shortcut toggled to {theme}");
        true
    }

    fn apply(&self, theme: Theme, persist: bool) {
        let control = self.ctx.document.toggle_control();
        apply_theme(&self.ctx, theme, control.as_deref(), persist);
    }
}
