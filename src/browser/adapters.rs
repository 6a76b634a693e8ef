//! web-sys adapters for storage, the color-scheme query, and the DOM.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{
    CustomEvent, CustomEventInit, Document, Element, Event, EventTarget, KeyboardEvent, MediaQueryList,
    MediaQueryListEvent, Storage, Window,
};

use crate::config::ThemeConfig;
use crate::error::ThemeError;
use crate::ports::{
    ClickSource, KeySource, PreferenceStore, Subscription, SystemPreference, ThemeDocument, ThemeNotifier,
    ToggleControl,
};
use crate::shortcut::KeyChord;
use crate::theme::Theme;

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";
const ARIA_LABEL: &str = "aria-label";

pub(super) fn js_error(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// Register `handler` for `event` on `target`; the listener is removed when
/// the returned subscription is dropped.
pub(super) fn listen(
    target: &EventTarget,
    event: &'static str,
    mut handler: impl FnMut(&Event) + 'static,
) -> Result<Subscription, ThemeError> {
    let closure = Closure::<dyn FnMut(Event)>::new(move |ev: Event| handler(&ev));
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|err| ThemeError::Dom(js_error(&err)))?;

    let target = target.clone();
    Ok(Subscription::new(move || {
        if let Err(err) = target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
            log::warn!("theme: removing {event} listener failed: {}", js_error(&err));
        }
    }))
}

// =============================================================================
// STORAGE
// =============================================================================

/// `window.localStorage`, looked up on every access.
///
/// Sandboxed frames and privacy modes throw on access; that surfaces as
/// [`ThemeError::StorageUnavailable`].
#[derive(Clone)]
pub struct LocalStorageStore {
    window: Window,
}

impl LocalStorageStore {
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn storage(&self) -> Result<Storage, ThemeError> {
        match self.window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err(ThemeError::StorageUnavailable),
            Err(err) => {
                log::debug!("theme: localStorage access denied: {}", js_error(&err));
                Err(ThemeError::StorageUnavailable)
            }
        }
    }
}

impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, ThemeError> {
        self.storage()?
            .get_item(key)
            .map_err(|err| ThemeError::StorageRead(js_error(&err)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ThemeError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| ThemeError::StorageWrite(js_error(&err)))
    }
}

// =============================================================================
// SYSTEM PREFERENCE
// =============================================================================

/// `matchMedia("(prefers-color-scheme: dark)")`.
pub struct MediaQueryPreference {
    query: MediaQueryList,
}

impl MediaQueryPreference {
    /// `None` when the environment has no `matchMedia`.
    #[must_use]
    pub fn detect(window: &Window) -> Option<Self> {
        match window.match_media(DARK_QUERY) {
            Ok(Some(query)) => Some(Self { query }),
            Ok(None) => None,
            Err(err) => {
                log::debug!("theme: matchMedia unavailable: {}", js_error(&err));
                None
            }
        }
    }
}

impl SystemPreference for MediaQueryPreference {
    fn prefers_dark(&self) -> bool {
        self.query.matches()
    }

    fn subscribe(&self, handler: Rc<dyn Fn(bool)>) -> Option<Subscription> {
        let closure = Closure::<dyn FnMut(MediaQueryListEvent)>::new(move |ev: MediaQueryListEvent| {
            handler(ev.matches());
        });
        let query = self.query.clone();

        if query
            .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
            .is_ok()
        {
            return Some(Subscription::new(move || {
                if let Err(err) = query.remove_event_listener_with_callback("change", closure.as_ref().unchecked_ref()) {
                    log::warn!("theme: removing change listener failed: {}", js_error(&err));
                }
            }));
        }

        // Older engines only implement the deprecated addListener API.
        match query.add_listener_with_opt_callback(Some(closure.as_ref().unchecked_ref())) {
            Ok(()) => Some(Subscription::new(move || {
                if let Err(err) = query.remove_listener_with_opt_callback(Some(closure.as_ref().unchecked_ref())) {
                    log::warn!("theme: removing legacy listener failed: {}", js_error(&err));
                }
            })),
            Err(err) => {
                log::warn!("theme: system preference updates unavailable: {}", js_error(&err));
                None
            }
        }
    }
}

// =============================================================================
// DOCUMENT AND CONTROL
// =============================================================================

/// The `<html>` element plus lookup of the primary toggle control.
pub struct DocumentRoot {
    document: Document,
    control_id: String,
    icon_selector: String,
}

impl DocumentRoot {
    #[must_use]
    pub fn new(document: Document, config: &ThemeConfig) -> Self {
        Self { document, control_id: config.control_id.clone(), icon_selector: config.icon_selector.clone() }
    }

    fn root(&self) -> Result<Element, ThemeError> {
        self.document
            .document_element()
            .ok_or_else(|| ThemeError::Dom("document has no root element".into()))
    }
}

impl ThemeDocument for DocumentRoot {
    fn marker(&self, attribute: &str) -> Option<String> {
        self.document.document_element()?.get_attribute(attribute)
    }

    fn set_marker(&self, attribute: &str, value: Option<&str>) -> Result<(), ThemeError> {
        let root = self.root()?;
        let result = match value {
            Some(value) => root.set_attribute(attribute, value),
            None => root.remove_attribute(attribute),
        };
        result.map_err(|err| ThemeError::Dom(js_error(&err)))
    }

    fn toggle_control(&self) -> Option<Rc<dyn ToggleControl>> {
        let element = self.document.get_element_by_id(&self.control_id)?;
        Some(Rc::new(ElementControl::new(element, self.icon_selector.clone())))
    }
}

/// A toggle button: `aria-label` on the element, glyph in its icon child.
pub struct ElementControl {
    element: Element,
    icon_selector: String,
}

impl ElementControl {
    #[must_use]
    pub fn new(element: Element, icon_selector: String) -> Self {
        Self { element, icon_selector }
    }
}

impl ToggleControl for ElementControl {
    fn set_label(&self, label: &str) -> Result<(), ThemeError> {
        self.element
            .set_attribute(ARIA_LABEL, label)
            .map_err(|err| ThemeError::Dom(js_error(&err)))
    }

    fn set_icon(&self, glyph: &str) -> Result<bool, ThemeError> {
        if self.icon_selector.is_empty() {
            return Ok(false);
        }
        let icon = self
            .element
            .query_selector(&self.icon_selector)
            .map_err(|err| ThemeError::Dom(js_error(&err)))?;
        let Some(icon) = icon else {
            return Ok(false);
        };
        icon.set_text_content(Some(glyph));
        Ok(true)
    }
}

// =============================================================================
// NOTIFICATIONS AND EVENT SURFACES
// =============================================================================

/// Dispatches `CustomEvent(event_name, { detail: { theme } })` on the document.
pub struct CustomEventNotifier {
    document: Document,
    event_name: String,
}

impl CustomEventNotifier {
    #[must_use]
    pub fn new(document: Document, event_name: String) -> Self {
        Self { document, event_name }
    }

    fn dispatch(&self, theme: Theme) -> Result<(), JsValue> {
        let detail = js_sys::Object::new();
        js_sys::Reflect::set(&detail, &JsValue::from_str("theme"), &JsValue::from_str(theme.as_str()))?;
        let init = CustomEventInit::new();
        init.set_detail(&detail);
        let event = CustomEvent::new_with_event_init_dict(&self.event_name, &init)?;
        self.document.dispatch_event(&event)?;
        Ok(())
    }
}

impl ThemeNotifier for CustomEventNotifier {
    fn notify(&self, theme: Theme) {
        if let Err(err) = self.dispatch(theme) {
            log::warn!("theme: dispatching {} failed: {}", self.event_name, js_error(&err));
        }
    }
}

/// Click listener on one element.
pub struct ElementClickSource {
    element: Element,
}

impl ElementClickSource {
    #[must_use]
    pub fn new(element: Element) -> Self {
        Self { element }
    }
}

impl ClickSource for ElementClickSource {
    fn on_click(&self, handler: Rc<dyn Fn()>) -> Subscription {
        match listen(&self.element, "click", move |_ev| handler()) {
            Ok(subscription) => subscription,
            Err(err) => {
                log::warn!("theme: binding toggle click failed: {err}");
                Subscription::detached()
            }
        }
    }
}

/// Document-wide `keydown` listener.
pub struct DocumentKeySource {
    document: Document,
}

impl DocumentKeySource {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

fn key_chord(ev: &KeyboardEvent) -> KeyChord {
    KeyChord {
        key: ev.key(),
        ctrl: ev.ctrl_key(),
        meta: ev.meta_key(),
        shift: ev.shift_key(),
        alt: ev.alt_key(),
    }
}

impl KeySource for DocumentKeySource {
    fn on_key_down(&self, handler: Rc<dyn Fn(&KeyChord) -> bool>) -> Subscription {
        let listener = move |ev: &Event| {
            let Some(key_event) = ev.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if handler(&key_chord(key_event)) {
                ev.prevent_default();
            }
        };
        match listen(&self.document, "keydown", listener) {
            Ok(subscription) => subscription,
            Err(err) => {
                log::warn!("theme: binding keyboard shortcut failed: {err}");
                Subscription::detached()
            }
        }
    }
}
