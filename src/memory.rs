//! In-memory implementations of every port.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by headless hosts (no DOM, no storage) and by the test suites. Each
//! adapter exposes the extra knobs a test needs: failure switches, event
//! triggers, and read-back accessors for what the controller wrote.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::ThemeError;
use crate::ports::{
    ClickSource, KeySource, PreferenceStore, Subscription, SystemPreference, ThemeDocument, ThemeNotifier,
    ToggleControl,
};
use crate::shortcut::KeyChord;
use crate::theme::Theme;

// =============================================================================
// LISTENER REGISTRY
// =============================================================================

/// Shared `(id, handler)` list; subscriptions hold it weakly.
type Entries<H> = Rc<RefCell<Vec<(u64, Rc<H>)>>>;

/// Ordered handler list whose entries remove themselves when their
/// [`Subscription`] is dropped.
struct Listeners<H: ?Sized> {
    entries: Entries<H>,
    next_id: Cell<u64>,
}

impl<H: ?Sized + 'static> Listeners<H> {
    fn new() -> Self {
        Self { entries: Rc::new(RefCell::new(Vec::new())), next_id: Cell::new(0) }
    }

    fn add(&self, handler: Rc<H>) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push((id, handler));

        let entries = Rc::downgrade(&self.entries);
        Subscription::new(move || {
            if let Some(entries) = entries.upgrade() {
                entries.borrow_mut().retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    /// Handlers cloned out so callbacks may (un)subscribe while running.
    fn snapshot(&self) -> Vec<Rc<H>> {
        self.entries.borrow().iter().map(|(_, h)| Rc::clone(h)).collect()
    }

    fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}

// =============================================================================
// STORAGE
// =============================================================================

/// Map-backed preference store with a failure switch.
#[derive(Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    failing: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one value.
    #[must_use]
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.values.borrow_mut().insert(key.to_owned(), value.to_owned());
        store
    }

    /// Make every access fail, as with disabled storage.
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    #[must_use]
    pub fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    /// Number of successful writes.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    pub fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ThemeError> {
        if self.failing.get() {
            return Err(ThemeError::StorageUnavailable);
        }
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ThemeError> {
        if self.failing.get() {
            return Err(ThemeError::StorageWrite("storage disabled".into()));
        }
        self.values.borrow_mut().insert(key.to_owned(), value.to_owned());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

// =============================================================================
// DOCUMENT AND CONTROL
// =============================================================================

/// Root element attributes plus an optional primary control.
#[derive(Default)]
pub struct MemoryDocument {
    attributes: RefCell<HashMap<String, String>>,
    control: RefCell<Option<Rc<MemoryControl>>>,
}

impl MemoryDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_control(control: Rc<MemoryControl>) -> Self {
        let document = Self::new();
        document.set_control(Some(control));
        document
    }

    /// Insert or remove the primary control.
    pub fn set_control(&self, control: Option<Rc<MemoryControl>>) {
        *self.control.borrow_mut() = control;
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }
}

impl ThemeDocument for MemoryDocument {
    fn marker(&self, attribute: &str) -> Option<String> {
        self.attribute(attribute)
    }

    fn set_marker(&self, attribute: &str, value: Option<&str>) -> Result<(), ThemeError> {
        let mut attributes = self.attributes.borrow_mut();
        match value {
            Some(value) => {
                attributes.insert(attribute.to_owned(), value.to_owned());
            }
            None => {
                attributes.remove(attribute);
            }
        }
        Ok(())
    }

    fn toggle_control(&self) -> Option<Rc<dyn ToggleControl>> {
        self.control
            .borrow()
            .as_ref()
            .map(|control| Rc::clone(control) as Rc<dyn ToggleControl>)
    }
}

/// Toggle control recording its label and icon.
pub struct MemoryControl {
    label: RefCell<Option<String>>,
    icon: Option<RefCell<String>>,
}

impl MemoryControl {
    /// Control with an icon sub-element showing `initial_icon`.
    #[must_use]
    pub fn new(initial_icon: &str) -> Self {
        Self { label: RefCell::new(None), icon: Some(RefCell::new(initial_icon.to_owned())) }
    }

    /// Control without an icon sub-element.
    #[must_use]
    pub fn without_icon() -> Self {
        Self { label: RefCell::new(None), icon: None }
    }

    #[must_use]
    pub fn label(&self) -> Option<String> {
        self.label.borrow().clone()
    }

    #[must_use]
    pub fn icon(&self) -> Option<String> {
        self.icon.as_ref().map(|icon| icon.borrow().clone())
    }
}

impl ToggleControl for MemoryControl {
    fn set_label(&self, label: &str) -> Result<(), ThemeError> {
        *self.label.borrow_mut() = Some(label.to_owned());
        Ok(())
    }

    fn set_icon(&self, glyph: &str) -> Result<bool, ThemeError> {
        let Some(icon) = &self.icon else {
            return Ok(false);
        };
        glyph.clone_into(&mut icon.borrow_mut());
        Ok(true)
    }
}

// =============================================================================
// SYSTEM PREFERENCE
// =============================================================================

/// Settable system signal. Static variants refuse subscriptions.
pub struct MemorySystemPreference {
    prefers_dark: Cell<bool>,
    live: bool,
    listeners: Listeners<dyn Fn(bool)>,
}

impl MemorySystemPreference {
    /// Signal supporting live change notifications.
    #[must_use]
    pub fn new(prefers_dark: bool) -> Self {
        Self { prefers_dark: Cell::new(prefers_dark), live: true, listeners: Listeners::new() }
    }

    /// Signal readable once but without change notifications.
    #[must_use]
    pub fn static_only(prefers_dark: bool) -> Self {
        Self { live: false, ..Self::new(prefers_dark) }
    }

    /// Change the signal and notify every subscriber.
    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        self.prefers_dark.set(prefers_dark);
        for handler in self.listeners.snapshot() {
            handler(prefers_dark);
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl SystemPreference for MemorySystemPreference {
    fn prefers_dark(&self) -> bool {
        self.prefers_dark.get()
    }

    fn subscribe(&self, handler: Rc<dyn Fn(bool)>) -> Option<Subscription> {
        if !self.live {
            return None;
        }
        Some(self.listeners.add(handler))
    }
}

// =============================================================================
// NOTIFICATIONS AND EVENT SURFACES
// =============================================================================

/// Notifier that keeps every announced theme.
#[derive(Default)]
pub struct RecordingNotifier {
    events: RefCell<Vec<Theme>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> Vec<Theme> {
        self.events.borrow().clone()
    }
}

impl ThemeNotifier for RecordingNotifier {
    fn notify(&self, theme: Theme) {
        self.events.borrow_mut().push(theme);
    }
}

/// Clickable element stand-in.
pub struct MemoryClickSource {
    listeners: Listeners<dyn Fn()>,
}

impl MemoryClickSource {
    #[must_use]
    pub fn new() -> Self {
        Self { listeners: Listeners::new() }
    }

    pub fn click(&self) {
        for handler in self.listeners.snapshot() {
            handler();
        }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for MemoryClickSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ClickSource for MemoryClickSource {
    fn on_click(&self, handler: Rc<dyn Fn()>) -> Subscription {
        self.listeners.add(handler)
    }
}

/// Key-down surface stand-in.
pub struct MemoryKeySource {
    listeners: Listeners<dyn Fn(&KeyChord) -> bool>,
}

impl MemoryKeySource {
    #[must_use]
    pub fn new() -> Self {
        Self { listeners: Listeners::new() }
    }

    /// Dispatch a key-down; returns whether the default action was suppressed.
    #[must_use]
    pub fn press(&self, chord: &KeyChord) -> bool {
        let mut prevented = false;
        for handler in self.listeners.snapshot() {
            prevented |= handler(chord);
        }
        prevented
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for MemoryKeySource {
    fn default() -> Self {
        Self::new()
    }
}

impl KeySource for MemoryKeySource {
    fn on_key_down(&self, handler: Rc<dyn Fn(&KeyChord) -> bool>) -> Subscription {
        self.listeners.add(handler)
    }
}
