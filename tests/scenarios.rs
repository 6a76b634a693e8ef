//! End-to-end page scenarios against the in-memory ports.

use std::rc::Rc;

use theme_controller::binder::{BindTargets, Bindings};
use theme_controller::memory::{
    MemoryClickSource, MemoryControl, MemoryDocument, MemoryKeySource, MemoryStore, MemorySystemPreference,
    RecordingNotifier,
};
use theme_controller::ports::ClickSource;
use theme_controller::shortcut::KeyChord;
use theme_controller::{Theme, ThemeConfig, ThemeContext, ThemeController};

const SUN: &str = "\u{2600}\u{fe0f}";
const MOON: &str = "\u{1f319}";

struct Page {
    controller: Rc<ThemeController>,
    store: Rc<MemoryStore>,
    document: Rc<MemoryDocument>,
    control: Rc<MemoryControl>,
    system: Rc<MemorySystemPreference>,
    notifier: Rc<RecordingNotifier>,
    button: Rc<MemoryClickSource>,
    keys: Rc<MemoryKeySource>,
    bindings: Bindings,
}

/// Load a page: resolve + apply the startup theme, then bind listeners.
fn load(stored: Option<&str>, prefers_dark: bool) -> Page {
    let store = Rc::new(match stored {
        Some(value) => MemoryStore::with_value("theme", value),
        None => MemoryStore::new(),
    });
    let control = Rc::new(MemoryControl::new(MOON));
    let document = Rc::new(MemoryDocument::with_control(control.clone()));
    let system = Rc::new(MemorySystemPreference::new(prefers_dark));
    let notifier = Rc::new(RecordingNotifier::new());
    let ctx = ThemeContext::new(ThemeConfig::default(), store.clone(), document.clone())
        .with_system(system.clone())
        .with_notifier(notifier.clone());

    let controller = Rc::new(ThemeController::new(ctx));
    let _ = controller.init();

    let button = Rc::new(MemoryClickSource::new());
    let keys = Rc::new(MemoryKeySource::new());
    let targets = BindTargets {
        clicks: vec![button.clone() as Rc<dyn ClickSource>],
        keys: Some(keys.clone()),
        watch_system: true,
    };
    let bindings = Bindings::attach(&controller, targets);

    Page { controller, store, document, control, system, notifier, button, keys, bindings }
}

fn marker(page: &Page) -> Option<String> {
    page.document.attribute("data-theme")
}

#[test]
fn system_dark_without_stored_value() {
    let page = load(None, true);
    assert_eq!(marker(&page).as_deref(), Some("dark"));
    assert_eq!(page.store.value("theme"), None);
}

#[test]
fn stored_light_overrides_system_dark() {
    let page = load(Some("light"), true);
    assert_eq!(marker(&page), None);
    assert_eq!(page.store.value("theme").as_deref(), Some("light"));
}

#[test]
fn clicking_toggle_goes_dark_and_remembers() {
    let page = load(None, false);
    assert_eq!(marker(&page), None);

    page.button.click();
    assert_eq!(marker(&page).as_deref(), Some("dark"));
    assert_eq!(page.store.value("theme").as_deref(), Some("dark"));
    assert_eq!(page.control.label().as_deref(), Some("switch to light mode"));
    assert_eq!(page.control.icon().as_deref(), Some(SUN));
}

#[test]
fn stored_dark_shields_against_system_light() {
    let page = load(Some("dark"), true);
    page.system.set_prefers_dark(false);
    assert_eq!(marker(&page).as_deref(), Some("dark"));
}

#[test]
fn system_changes_follow_until_first_toggle() {
    let page = load(None, false);
    page.system.set_prefers_dark(true);
    assert_eq!(page.controller.get(), Theme::Dark);
    page.system.set_prefers_dark(false);
    assert_eq!(page.controller.get(), Theme::Light);

    page.button.click();
    page.system.set_prefers_dark(false);
    assert_eq!(page.controller.get(), Theme::Dark);
    assert_eq!(page.store.value("theme").as_deref(), Some("dark"));
}

#[test]
fn keyboard_shortcut_round_trip() {
    let page = load(None, false);
    let chord = KeyChord::new("D").with_ctrl().with_shift();

    assert!(page.keys.press(&chord));
    assert_eq!(page.controller.get(), Theme::Dark);
    assert!(page.keys.press(&chord));
    assert_eq!(page.controller.get(), Theme::Light);
    assert_eq!(page.store.write_count(), 2);
    assert_eq!(page.control.icon().as_deref(), Some(MOON));
}

#[test]
fn disabled_storage_degrades_to_session_only() {
    let page = load(None, false);
    page.store.set_failing(true);
    page.button.click();
    assert_eq!(page.controller.get(), Theme::Dark);

    // Nothing stored, so the system signal still governs.
    page.system.set_prefers_dark(false);
    assert_eq!(page.controller.get(), Theme::Light);
}

#[test]
fn every_state_change_is_announced() {
    let page = load(None, true);
    page.button.click();
    page.controller.set(Theme::Dark);
    assert_eq!(page.notifier.events(), vec![Theme::Dark, Theme::Light, Theme::Dark]);
}

#[test]
fn unbinding_stops_all_reactions() {
    let Page { document, system, button, keys, bindings, .. } = load(None, false);
    bindings.detach();
    button.click();
    system.set_prefers_dark(true);
    assert!(!keys.press(&KeyChord::new("D").with_ctrl().with_shift()));
    assert_eq!(document.attribute("data-theme"), None);
    assert_eq!(system.subscriber_count(), 0);
    assert_eq!(button.listener_count(), 0);
}
