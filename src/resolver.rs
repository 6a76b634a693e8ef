//! Initial theme resolution: stored preference, then system signal, then light.

#[cfg(test)]
#[path = "resolver_test.rs"]
mod resolver_test;

use crate::context::ThemeContext;
use crate::theme::Theme;

/// Pick the theme to show at load.
///
/// A stored preference wins unconditionally; otherwise the system signal
/// decides.
#[must_use]
pub fn resolve_initial_theme(persisted: Option<Theme>, system_prefers_dark: bool) -> Theme {
    persisted.unwrap_or_else(|| Theme::from_prefers_dark(system_prefers_dark))
}

/// Read the explicit preference. Failures and unknown values count as absent.
#[must_use]
pub fn read_persisted(ctx: &ThemeContext) -> Option<Theme> {
    let key = &ctx.config.storage_key;
    let raw = match ctx.store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            log::warn!("theme: reading stored preference {key:?} failed: {err}");
            return None;
        }
    };
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<Theme>() {
        Ok(theme) => Some(theme),
        Err(err) => {
            log::warn!("theme: ignoring stored preference {key:?}: {err}");
            None
        }
    }
}

/// Whether the environment currently prefers dark; `false` without the capability.
#[must_use]
pub fn system_prefers_dark(ctx: &ThemeContext) -> bool {
    ctx.system.as_ref().is_some_and(|system| system.prefers_dark())
}

/// Theme the system signal alone would select.
#[must_use]
pub fn system_theme(ctx: &ThemeContext) -> Theme {
    Theme::from_prefers_dark(system_prefers_dark(ctx))
}
