use super::*;
use crate::config::ThemeConfig;
use crate::context::ThemeContext;
use crate::memory::{MemoryClickSource, MemoryDocument, MemoryKeySource, MemoryStore, MemorySystemPreference};
use crate::theme::Theme;

struct Fixture {
    controller: Rc<ThemeController>,
    store: Rc<MemoryStore>,
    system: Rc<MemorySystemPreference>,
}

fn fixture(system: MemorySystemPreference) -> Fixture {
    let store = Rc::new(MemoryStore::new());
    let system = Rc::new(system);
    let ctx = ThemeContext::new(ThemeConfig::default(), store.clone(), Rc::new(MemoryDocument::new()))
        .with_system(system.clone());
    let controller = Rc::new(ThemeController::new(ctx));
    let _ = controller.init();
    Fixture { controller, store, system }
}

fn ctrl_shift_d() -> KeyChord {
    KeyChord::new("D").with_ctrl().with_shift()
}

#[test]
fn every_click_source_toggles() {
    let f = fixture(MemorySystemPreference::new(false));
    let primary = Rc::new(MemoryClickSource::new());
    let extra = Rc::new(MemoryClickSource::new());
    let targets = BindTargets {
        clicks: vec![primary.clone() as Rc<dyn ClickSource>, extra.clone()],
        ..BindTargets::default()
    };
    let bindings = Bindings::attach(&f.controller, targets);
    assert_eq!(bindings.len(), 3);

    primary.click();
    assert_eq!(f.controller.get(), Theme::Dark);
    extra.click();
    assert_eq!(f.controller.get(), Theme::Light);
    assert_eq!(f.store.value("theme").as_deref(), Some("light"));
}

#[test]
fn system_change_is_followed_until_explicit_choice() {
    let f = fixture(MemorySystemPreference::new(false));
    let _bindings = Bindings::attach(&f.controller, BindTargets::default());

    f.system.set_prefers_dark(true);
    assert_eq!(f.controller.get(), Theme::Dark);
    assert_eq!(f.store.value("theme"), None);

    assert_eq!(f.controller.toggle(), Theme::Light);
    f.system.set_prefers_dark(true);
    assert_eq!(f.controller.get(), Theme::Light);
}

#[test]
fn static_system_signal_binds_nothing() {
    let f = fixture(MemorySystemPreference::static_only(true));
    let bindings = Bindings::attach(&f.controller, BindTargets::default());
    assert!(bindings.is_empty());
}

#[test]
fn watch_system_can_be_disabled() {
    let f = fixture(MemorySystemPreference::new(false));
    let targets = BindTargets { watch_system: false, ..BindTargets::default() };
    let _bindings = Bindings::attach(&f.controller, targets);
    assert_eq!(f.system.subscriber_count(), 0);
    f.system.set_prefers_dark(true);
    assert_eq!(f.controller.get(), Theme::Light);
}

#[test]
fn shortcut_toggles_and_suppresses_default() {
    let f = fixture(MemorySystemPreference::new(false));
    let keys = Rc::new(MemoryKeySource::new());
    let targets = BindTargets { keys: Some(keys.clone()), ..BindTargets::default() };
    let _bindings = Bindings::attach(&f.controller, targets);

    assert!(keys.press(&ctrl_shift_d()));
    assert_eq!(f.controller.get(), Theme::Dark);
    assert!(keys.press(&ctrl_shift_d()));
    assert_eq!(f.controller.get(), Theme::Light);

    assert!(!keys.press(&KeyChord::new("D")));
    assert_eq!(f.controller.get(), Theme::Light);
}

#[test]
fn detach_unregisters_everything() {
    let f = fixture(MemorySystemPreference::new(false));
    let click = Rc::new(MemoryClickSource::new());
    let keys = Rc::new(MemoryKeySource::new());
    let targets = BindTargets {
        clicks: vec![click.clone() as Rc<dyn ClickSource>],
        keys: Some(keys.clone()),
        watch_system: true,
    };
    let bindings = Bindings::attach(&f.controller, targets);

    bindings.detach();
    assert_eq!(click.listener_count(), 0);
    assert_eq!(keys.listener_count(), 0);
    assert_eq!(f.system.subscriber_count(), 0);

    click.click();
    assert_eq!(f.controller.get(), Theme::Light);
}

#[test]
fn handlers_go_quiet_after_controller_drop() {
    let f = fixture(MemorySystemPreference::new(false));
    let keys = Rc::new(MemoryKeySource::new());
    let targets = BindTargets { keys: Some(keys.clone()), ..BindTargets::default() };
    let _bindings = Bindings::attach(&f.controller, targets);

    drop(f.controller);
    assert!(!keys.press(&ctrl_shift_d()));
    f.system.set_prefers_dark(true);
    assert_eq!(f.store.write_count(), 0);
}
