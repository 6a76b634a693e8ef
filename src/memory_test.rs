use std::cell::Cell;

use super::*;

#[test]
fn store_round_trips_and_counts_writes() {
    let store = MemoryStore::new();
    assert_eq!(store.get("theme").unwrap(), None);
    store.set("theme", "dark").unwrap();
    assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    assert_eq!(store.write_count(), 1);
    store.remove("theme");
    assert_eq!(store.get("theme").unwrap(), None);
}

#[test]
fn failing_store_rejects_reads_and_writes() {
    let store = MemoryStore::with_value("theme", "dark");
    store.set_failing(true);
    assert!(matches!(store.get("theme"), Err(ThemeError::StorageUnavailable)));
    assert!(matches!(store.set("theme", "light"), Err(ThemeError::StorageWrite(_))));
    assert_eq!(store.value("theme").as_deref(), Some("dark"));
    assert_eq!(store.write_count(), 0);
}

#[test]
fn document_sets_and_removes_marker() {
    let document = MemoryDocument::new();
    document.set_marker("data-theme", Some("dark")).unwrap();
    assert_eq!(document.marker("data-theme").as_deref(), Some("dark"));
    document.set_marker("data-theme", None).unwrap();
    assert_eq!(document.marker("data-theme"), None);
}

#[test]
fn document_control_is_optional() {
    let document = MemoryDocument::new();
    assert!(document.toggle_control().is_none());
    document.set_control(Some(Rc::new(MemoryControl::without_icon())));
    assert!(document.toggle_control().is_some());
}

#[test]
fn control_icon_is_replaced_on_each_update() {
    let control = MemoryControl::new("\u{1f319}");
    assert!(control.set_icon("\u{2600}\u{fe0f}").unwrap());
    assert!(control.set_icon("x").unwrap());
    assert_eq!(control.icon().as_deref(), Some("x"));
    assert_eq!(control.label(), None);
}

#[test]
fn control_without_icon_reports_missing_icon() {
    let control = MemoryControl::without_icon();
    assert!(!control.set_icon("x").unwrap());
    assert_eq!(control.icon(), None);
}

#[test]
fn system_preference_notifies_until_unsubscribed() {
    let system = MemorySystemPreference::new(false);
    let seen = Rc::new(Cell::new(0));
    let counter = Rc::clone(&seen);
    let sub = system
        .subscribe(Rc::new(move |_: bool| counter.set(counter.get() + 1)))
        .unwrap();
    system.set_prefers_dark(true);
    assert_eq!(seen.get(), 1);
    assert!(system.prefers_dark());

    drop(sub);
    assert_eq!(system.subscriber_count(), 0);
    system.set_prefers_dark(false);
    assert_eq!(seen.get(), 1);
}

#[test]
fn static_system_preference_refuses_subscriptions() {
    let system = MemorySystemPreference::static_only(true);
    assert!(system.subscribe(Rc::new(|_: bool| {})).is_none());
    assert!(system.prefers_dark());
}

#[test]
fn key_source_reports_prevent_default() {
    let keys = MemoryKeySource::new();
    let _sub = keys.on_key_down(Rc::new(|chord: &KeyChord| chord.key == "D"));
    assert!(keys.press(&KeyChord::new("D")));
    assert!(!keys.press(&KeyChord::new("E")));
}

#[test]
fn click_source_fires_every_listener() {
    let clicks = MemoryClickSource::new();
    let count = Rc::new(Cell::new(0));
    let a = Rc::clone(&count);
    let b = Rc::clone(&count);
    let _first = clicks.on_click(Rc::new(move || a.set(a.get() + 1)));
    let _second = clicks.on_click(Rc::new(move || b.set(b.get() + 1)));
    clicks.click();
    assert_eq!(count.get(), 2);
    assert_eq!(clicks.listener_count(), 2);
}

#[test]
fn recording_notifier_keeps_order() {
    let notifier = RecordingNotifier::new();
    notifier.notify(Theme::Dark);
    notifier.notify(Theme::Light);
    assert_eq!(notifier.events(), vec![Theme::Dark, Theme::Light]);
}
