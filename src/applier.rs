//! Applying a theme to the document, the toggle control, and storage.
//!
//! DESIGN
//! ======
//! Each side effect is attempted independently. A failed storage write does
//! not stop the marker update, and a missing control or icon is skipped
//! without noise; only genuine access failures are logged.

#[cfg(test)]
#[path = "applier_test.rs"]
mod applier_test;

use crate::context::ThemeContext;
use crate::ports::ToggleControl;
use crate::theme::Theme;

/// Make `theme` the active theme.
///
/// Writes the marker (removing it for light), persists when `persist` is
/// set, projects the theme onto `control`, and notifies listeners.
pub fn apply_theme(ctx: &ThemeContext, theme: Theme, control: Option<&dyn ToggleControl>, persist: bool) {
    let attribute = &ctx.config.marker_attribute;
    if let Err(err) = ctx.document.set_marker(attribute, theme.marker_value()) {
        log::warn!("theme: updating {attribute} failed: {err}");
    }

    if persist {
        write_persisted(ctx, theme);
    }

    if let Some(control) = control {
        sync_control(ctx, theme, control);
    }

    if let Some(notifier) = &ctx.notifier {
        notifier.notify(theme);
    }
    log::debug!("theme: applied {theme} (persist={persist})");
}

/// Store `theme` as the explicit preference; failures degrade to "not remembered".
pub fn write_persisted(ctx: &ThemeContext, theme: Theme) {
    let key = &ctx.config.storage_key;
    if let Err(err) = ctx.store.set(key, theme.as_str()) {
        log::warn!("theme: saving preference {key:?} failed: {err}");
    }
}

fn sync_control(ctx: &ThemeContext, theme: Theme, control: &dyn ToggleControl) {
    if let Err(err) = control.set_label(ctx.config.label_for(theme)) {
        log::warn!("theme: updating toggle label failed: {err}");
    }
    // Ok(false) means the control has no icon element.
    if let Err(err) = control.set_icon(ctx.config.icon_for(theme)) {
        log::warn!("theme: updating toggle icon failed: {err}");
    }
}
