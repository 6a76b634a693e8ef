use super::*;

#[test]
fn ctrl_shift_d_matches() {
    let shortcut = Shortcut::default();
    assert!(shortcut.matches(&KeyChord::new("D").with_ctrl().with_shift()));
}

#[test]
fn meta_shift_d_matches() {
    let shortcut = Shortcut::default();
    assert!(shortcut.matches(&KeyChord::new("D").with_meta().with_shift()));
}

#[test]
fn missing_modifier_does_not_match() {
    let shortcut = Shortcut::default();
    assert!(!shortcut.matches(&KeyChord::new("D").with_shift()));
    assert!(!shortcut.matches(&KeyChord::new("D").with_ctrl()));
    assert!(!shortcut.matches(&KeyChord::new("D")));
}

#[test]
fn other_keys_do_not_match() {
    let shortcut = Shortcut::default();
    assert!(!shortcut.matches(&KeyChord::new("d").with_ctrl().with_shift()));
    assert!(!shortcut.matches(&KeyChord::new("E").with_ctrl().with_shift()));
}

#[test]
fn extra_alt_is_tolerated() {
    let shortcut = Shortcut::default();
    assert!(shortcut.matches(&KeyChord::new("D").with_ctrl().with_shift().with_alt()));
}

#[test]
fn disabled_shortcut_never_matches() {
    let config = ShortcutConfig { enabled: false, ..ShortcutConfig::default() };
    let shortcut = Shortcut::from_config(&config);
    assert!(!shortcut.matches(&KeyChord::new("D").with_ctrl().with_shift()));
}

#[test]
fn shift_can_be_made_optional() {
    let config = ShortcutConfig { key: "t".into(), require_shift: false, ..ShortcutConfig::default() };
    let shortcut = Shortcut::from_config(&config);
    assert!(shortcut.matches(&KeyChord::new("t").with_ctrl()));
}
