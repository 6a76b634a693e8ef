//! Browser bindings: web-sys implementations of every port, installation,
//! and the JavaScript-facing API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only compiled with the `browser` feature. Everything here is glue; the
//! decisions live in the platform-independent core.

mod adapters;
mod api;
mod install;

pub use adapters::{
    CustomEventNotifier, DocumentKeySource, DocumentRoot, ElementClickSource, ElementControl, LocalStorageStore,
    MediaQueryPreference,
};
pub use api::{get_system_preference, get_theme, install_with_config, set_theme, start, toggle_theme};
pub use install::{Installation, install};
