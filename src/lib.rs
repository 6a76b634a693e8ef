//! # theme-controller
//!
//! Light/dark theme controller for web pages, compiled to WebAssembly.
//!
//! The active theme is resolved from three sources in fixed precedence:
//! the user's stored explicit choice, then the live system color-scheme
//! preference, then light. The document marker attribute, the toggle
//! control's label and icon, and the stored choice are kept consistent on
//! load and on every click, shortcut, and system change.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`theme`] | The `Theme` value and marker conventions |
//! | [`config`] | Element names, storage key, labels, icons, shortcut |
//! | [`ports`] | Capabilities consumed from the host (storage, DOM, events) |
//! | [`context`] | Injectable bundle of ports plus configuration |
//! | [`resolver`] | Startup precedence: stored, system, light |
//! | [`applier`] | Marker, control, storage, and notification updates |
//! | [`controller`] | Toggle / set / get and system-change handling |
//! | [`shortcut`] | Ctrl/Cmd + Shift + D matching |
//! | [`binder`] | Wiring event surfaces to the controller |
//! | [`memory`] | In-memory ports for headless hosts and tests |
//! | `browser` | web-sys ports and the JS API (feature `browser`) |

pub mod applier;
pub mod binder;
pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod memory;
pub mod ports;
pub mod resolver;
pub mod shortcut;
pub mod theme;

#[cfg(feature = "browser")]
pub mod browser;

pub use config::ThemeConfig;
pub use context::ThemeContext;
pub use controller::ThemeController;
pub use error::ThemeError;
pub use theme::Theme;
