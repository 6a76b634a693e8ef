//! JavaScript-facing surface: the wasm start hook, exported functions, and
//! the `window.ThemeController` object for unrelated page scripts.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use super::adapters::js_error;
use super::install::{Installation, install};
use crate::config::ThemeConfig;
use crate::error::ThemeError;

/// Root-element attribute holding JSON overrides for [`ThemeConfig`].
const CONFIG_ATTRIBUTE: &str = "data-theme-config";
const GLOBAL_NAME: &str = "ThemeController";
/// Properties of the global object bound to the system-preference reader.
/// `getSystemTheme` keeps pages written against the older script working.
const SYSTEM_PREFERENCE_NAMES: [&str; 2] = ["getSystemPreference", "getSystemTheme"];

thread_local! {
    static INSTALLED: RefCell<Option<Rc<Installation>>> = const { RefCell::new(None) };
}

fn current() -> Result<Rc<Installation>, JsValue> {
    INSTALLED
        .with(|cell| cell.borrow().clone())
        .ok_or_else(|| JsValue::from_str("theme controller not installed"))
}

fn to_js(err: ThemeError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn page_config() -> Result<ThemeConfig, ThemeError> {
    let raw = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .and_then(|root| root.get_attribute(CONFIG_ATTRIBUTE));
    match raw {
        Some(raw) => ThemeConfig::from_json(&raw),
        None => Ok(ThemeConfig::default()),
    }
}

fn replace_installation(config: ThemeConfig) -> Result<(), ThemeError> {
    let installation = install(config)?;
    // Previous installation is dropped outside the borrow.
    let previous = INSTALLED.with(|cell| cell.borrow_mut().replace(installation));
    drop(previous);
    Ok(())
}

fn expose_global() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let api = js_sys::Object::new();

    let toggle = Closure::<dyn Fn() -> Result<String, JsValue>>::new(toggle_theme).into_js_value();
    let set = Closure::<dyn Fn(String) -> Result<(), JsValue>>::new(|theme: String| set_theme(&theme)).into_js_value();
    let get = Closure::<dyn Fn() -> Result<String, JsValue>>::new(get_theme).into_js_value();
    let system = Closure::<dyn Fn() -> Result<String, JsValue>>::new(get_system_preference).into_js_value();

    js_sys::Reflect::set(&api, &JsValue::from_str("toggle"), &toggle)?;
    js_sys::Reflect::set(&api, &JsValue::from_str("set"), &set)?;
    js_sys::Reflect::set(&api, &JsValue::from_str("get"), &get)?;
    for name in SYSTEM_PREFERENCE_NAMES {
        js_sys::Reflect::set(&api, &JsValue::from_str(name), &system)?;
    }
    js_sys::Reflect::set(&window, &JsValue::from_str(GLOBAL_NAME), &api)?;
    Ok(())
}

/// Module start: console logging, install with the page configuration, and
/// publish `window.ThemeController`.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("theme: logger already installed by host");
    }

    let config = match page_config() {
        Ok(config) => config,
        Err(err) => {
            log::warn!("theme: ignoring {CONFIG_ATTRIBUTE}: {err}");
            ThemeConfig::default()
        }
    };
    if let Err(err) = replace_installation(config) {
        log::warn!("theme: install failed: {err}");
    }
    if let Err(err) = expose_global() {
        log::warn!("theme: publishing window.{GLOBAL_NAME} failed: {}", js_error(&err));
    }
}

/// Reinstall with JSON configuration overrides, replacing the current installation.
///
/// # Errors
///
/// Throws when the JSON is invalid or the page has no document.
#[wasm_bindgen(js_name = installWithConfig)]
pub fn install_with_config(json: &str) -> Result<(), JsValue> {
    let config = ThemeConfig::from_json(json).map_err(to_js)?;
    replace_installation(config).map_err(to_js)
}

/// Flip the theme and remember the choice. Returns the new theme.
///
/// # Errors
///
/// Throws when no controller is installed.
#[wasm_bindgen(js_name = toggleTheme)]
pub fn toggle_theme() -> Result<String, JsValue> {
    Ok(current()?.controller().toggle().as_str().to_owned())
}

/// Apply and remember `"light"` or `"dark"`.
///
/// # Errors
///
/// Throws for an unknown theme name or when no controller is installed.
#[wasm_bindgen(js_name = setTheme)]
pub fn set_theme(theme: &str) -> Result<(), JsValue> {
    current()?.controller().set_str(theme).map_err(to_js)?;
    Ok(())
}

/// Active theme name.
///
/// # Errors
///
/// Throws when no controller is installed.
#[wasm_bindgen(js_name = getTheme)]
pub fn get_theme() -> Result<String, JsValue> {
    Ok(current()?.controller().get().as_str().to_owned())
}

/// Theme the system color-scheme signal selects.
///
/// # Errors
///
/// Throws when no controller is installed.
#[wasm_bindgen(js_name = getSystemPreference)]
pub fn get_system_preference() -> Result<String, JsValue> {
    Ok(current()?.controller().system_preference().as_str().to_owned())
}
