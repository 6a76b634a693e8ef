//! Controller configuration: element names, storage key, labels, shortcut.
//!
//! DESIGN
//! ======
//! Every field has a default matching the stock page markup, so hosts only
//! override what differs. Overrides arrive as a partial JSON object (for
//! example from a `data-` attribute on the script tag) and are validated
//! before any controller is built from them.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;
use crate::theme::Theme;

const DEFAULT_STORAGE_KEY: &str = "theme";
const DEFAULT_MARKER_ATTRIBUTE: &str = "data-theme";
const DEFAULT_CONTROL_ID: &str = "theme-toggle";
const DEFAULT_TOGGLE_ATTRIBUTE: &str = "data-theme-toggle";
const DEFAULT_ICON_SELECTOR: &str = ".theme-icon";
const DEFAULT_EVENT_NAME: &str = "themechange";

const SUN: &str = "\u{2600}\u{fe0f}";
const MOON: &str = "\u{1f319}";

/// Full controller configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Key of the persisted preference in the storage medium.
    pub storage_key: String,
    /// Attribute on the root element that carries the theme marker.
    pub marker_attribute: String,
    /// Id of the primary toggle control.
    pub control_id: String,
    /// Attribute marking additional toggle elements.
    pub toggle_attribute: String,
    /// Selector of the icon element inside the primary control.
    pub icon_selector: String,
    /// Name of the event dispatched after each apply.
    pub event_name: String,
    pub labels: ControlLabels,
    pub icons: ControlIcons,
    pub shortcut: ShortcutConfig,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            marker_attribute: DEFAULT_MARKER_ATTRIBUTE.to_owned(),
            control_id: DEFAULT_CONTROL_ID.to_owned(),
            toggle_attribute: DEFAULT_TOGGLE_ATTRIBUTE.to_owned(),
            icon_selector: DEFAULT_ICON_SELECTOR.to_owned(),
            event_name: DEFAULT_EVENT_NAME.to_owned(),
            labels: ControlLabels::default(),
            icons: ControlIcons::default(),
            shortcut: ShortcutConfig::default(),
        }
    }
}

/// Accessible labels; each describes the action the control performs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlLabels {
    /// Shown while dark is active.
    pub to_light: String,
    /// Shown while light is active.
    pub to_dark: String,
}

impl Default for ControlLabels {
    fn default() -> Self {
        Self { to_light: "switch to light mode".to_owned(), to_dark: "switch to dark mode".to_owned() }
    }
}

/// Icon glyphs keyed by the active theme.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlIcons {
    /// Shown while dark is active (sun).
    pub dark: String,
    /// Shown while light is active (moon).
    pub light: String,
}

impl Default for ControlIcons {
    fn default() -> Self {
        Self { dark: SUN.to_owned(), light: MOON.to_owned() }
    }
}

/// Keyboard chord: Ctrl/Cmd + (Shift) + `key`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutConfig {
    pub enabled: bool,
    /// Key as reported by the browser, e.g. `"D"` when Shift is held.
    pub key: String,
    pub require_shift: bool,
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self { enabled: true, key: "D".to_owned(), require_shift: true }
    }
}

impl ThemeConfig {
    /// Parse a (possibly partial) JSON object over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::ConfigParse`] for malformed JSON and
    /// [`ThemeError::Config`] when a value fails [`ThemeConfig::validate`].
    pub fn from_json(raw: &str) -> Result<Self, ThemeError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the controller cannot operate with.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ThemeError> {
        if self.storage_key.trim().is_empty() {
            return Err(ThemeError::Config("storage_key must not be empty".into()));
        }
        if self.marker_attribute.trim().is_empty() {
            return Err(ThemeError::Config("marker_attribute must not be empty".into()));
        }
        if self.event_name.trim().is_empty() {
            return Err(ThemeError::Config("event_name must not be empty".into()));
        }
        if self.shortcut.enabled && self.shortcut.key.chars().count() != 1 {
            return Err(ThemeError::Config(format!(
                "shortcut.key must be a single character, got {:?}",
                self.shortcut.key
            )));
        }
        Ok(())
    }

    /// Accessible label for the control while `theme` is active.
    #[must_use]
    pub fn label_for(&self, theme: Theme) -> &str {
        match theme {
            Theme::Dark => &self.labels.to_light,
            Theme::Light => &self.labels.to_dark,
        }
    }

    /// Icon glyph for the control while `theme` is active.
    #[must_use]
    pub fn icon_for(&self, theme: Theme) -> &str {
        match theme {
            Theme::Dark => &self.icons.dark,
            Theme::Light => &self.icons.light,
        }
    }
}
