//! Capabilities the controller consumes from its host environment.
//!
//! SYSTEM CONTEXT
//! ==============
//! The controller never touches browser globals directly. Storage, the
//! system color-scheme signal, the document root, the toggle control, and
//! the event surfaces are all reached through these traits, so the same
//! logic runs against web-sys in the browser and against the in-memory
//! adapters in tests.
//!
//! Everything runs on the single UI thread, so ports take `&self` and
//! implementations use interior mutability where they need it.

#[cfg(test)]
#[path = "ports_test.rs"]
mod ports_test;

use std::fmt;
use std::rc::Rc;

use crate::error::ThemeError;
use crate::shortcut::KeyChord;
use crate::theme::Theme;

/// Durable key-value medium for the explicit preference.
pub trait PreferenceStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the medium cannot be accessed.
    fn get(&self, key: &str) -> Result<Option<String>, ThemeError>;

    /// Store `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the medium rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), ThemeError>;
}

/// Live "system prefers dark" signal owned by the environment.
pub trait SystemPreference {
    fn prefers_dark(&self) -> bool;

    /// Register `handler` for changes; `None` when live updates are unsupported.
    fn subscribe(&self, handler: Rc<dyn Fn(bool)>) -> Option<Subscription>;
}

/// The document root carrying the theme marker.
pub trait ThemeDocument {
    /// Current value of the marker attribute, if present.
    fn marker(&self, attribute: &str) -> Option<String>;

    /// Set the marker attribute, or remove it when `value` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Dom`] when the document rejects the mutation.
    fn set_marker(&self, attribute: &str, value: Option<&str>) -> Result<(), ThemeError>;

    /// The primary toggle control, looked up fresh on every call.
    fn toggle_control(&self) -> Option<Rc<dyn ToggleControl>>;
}

/// The visible toggle control.
pub trait ToggleControl {
    /// Replace the accessible label.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Dom`] when the attribute cannot be written.
    fn set_label(&self, label: &str) -> Result<(), ThemeError>;

    /// Replace the icon glyph. Returns `false` when the control has no icon.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Dom`] when the icon lookup fails.
    fn set_icon(&self, glyph: &str) -> Result<bool, ThemeError>;
}

/// Receiver of "theme changed" notifications.
pub trait ThemeNotifier {
    fn notify(&self, theme: Theme);
}

/// Anything that can be clicked to toggle the theme.
pub trait ClickSource {
    fn on_click(&self, handler: Rc<dyn Fn()>) -> Subscription;
}

/// Global key-down surface.
///
/// The handler returns `true` when it consumed the chord and the default
/// action must be suppressed.
pub trait KeySource {
    fn on_key_down(&self, handler: Rc<dyn Fn(&KeyChord) -> bool>) -> Subscription;
}

/// Handle for a registered listener. Teardown runs once, on [`Subscription::cancel`] or drop.
#[must_use = "dropping a Subscription unregisters the listener"]
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self { teardown: Some(Box::new(teardown)) }
    }

    /// A handle with nothing to tear down.
    pub fn detached() -> Self {
        Self { teardown: None }
    }

    /// Unregister now.
    pub fn cancel(mut self) {
        self.run_teardown();
    }

    fn run_teardown(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_teardown();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.teardown.is_some())
            .finish()
    }
}
