//! Injectable bundle of ports plus configuration.

use std::rc::Rc;

use crate::config::ThemeConfig;
use crate::ports::{PreferenceStore, SystemPreference, ThemeDocument, ThemeNotifier};

/// Everything the resolver and applier read or write.
///
/// The system signal and the notifier are optional capabilities: without a
/// system signal the default is light and no live updates arrive; without a
/// notifier applies are simply not announced.
pub struct ThemeContext {
    pub config: ThemeConfig,
    pub store: Rc<dyn PreferenceStore>,
    pub document: Rc<dyn ThemeDocument>,
    pub system: Option<Rc<dyn SystemPreference>>,
    pub notifier: Option<Rc<dyn ThemeNotifier>>,
}

impl ThemeContext {
    #[must_use]
    pub fn new(config: ThemeConfig, store: Rc<dyn PreferenceStore>, document: Rc<dyn ThemeDocument>) -> Self {
        Self { config, store, document, system: None, notifier: None }
    }

    #[must_use]
    pub fn with_system(mut self, system: Rc<dyn SystemPreference>) -> Self {
        self.system = Some(system);
        self
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: Rc<dyn ThemeNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }
}
