//! Wiring event surfaces to the controller.
//!
//! Every registration yields a [`Subscription`]; [`Bindings`] owns them all
//! so teardown is explicit (`detach`) or happens on drop. Handlers hold weak
//! controller references and go quiet once the controller is gone.

#[cfg(test)]
#[path = "binder_test.rs"]
mod binder_test;

use std::rc::Rc;

use crate::controller::ThemeController;
use crate::ports::{ClickSource, KeySource, Subscription};
use crate::shortcut::KeyChord;

/// What to bind.
pub struct BindTargets {
    /// The primary control plus every toggle-marked element.
    pub clicks: Vec<Rc<dyn ClickSource>>,
    /// Global key-down surface for the shortcut.
    pub keys: Option<Rc<dyn KeySource>>,
    /// Follow the live system signal while nothing is stored.
    pub watch_system: bool,
}

impl Default for BindTargets {
    fn default() -> Self {
        Self { clicks: Vec::new(), keys: None, watch_system: true }
    }
}

/// Live listener registrations for one controller.
#[must_use = "dropping Bindings unregisters every listener"]
#[derive(Debug)]
pub struct Bindings {
    subscriptions: Vec<Subscription>,
}

impl Bindings {
    /// Register click, system-change, and shortcut handlers.
    pub fn attach(controller: &Rc<ThemeController>, targets: BindTargets) -> Self {
        let mut subscriptions = Vec::with_capacity(targets.clicks.len() + 2);

        for source in &targets.clicks {
            let weak = Rc::downgrade(controller);
            subscriptions.push(source.on_click(Rc::new(move || {
                if let Some(controller) = weak.upgrade() {
                    let theme = controller.toggle();
                    log::debug!("theme: click toggled to {theme}");
                }
            })));
        }

        if targets.watch_system {
            if let Some(system) = &controller.context().system {
                let weak = Rc::downgrade(controller);
                let handler = Rc::new(move |prefers_dark: bool| {
                    if let Some(controller) = weak.upgrade() {
                        if controller.handle_system_change(prefers_dark) {
                            log::debug!("theme: followed system change (prefers dark: {prefers_dark})");
                        }
                    }
                });
                match system.subscribe(handler) {
                    Some(subscription) => subscriptions.push(subscription),
                    None => log::debug!("theme: system preference has no live updates"),
                }
            }
        }

        if let Some(keys) = &targets.keys {
            let weak = Rc::downgrade(controller);
            subscriptions.push(keys.on_key_down(Rc::new(move |chord: &KeyChord| {
                weak.upgrade().is_some_and(|controller| controller.handle_key(chord))
            })));
        }

        log::debug!("theme: {} listener(s) bound", subscriptions.len());
        Self { subscriptions }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Unregister every listener now.
    pub fn detach(self) {
        for subscription in self.subscriptions {
            subscription.cancel();
        }
    }
}
