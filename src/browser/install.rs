//! Page installation: build the context, apply the startup theme, bind.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use super::adapters::{
    CustomEventNotifier, DocumentKeySource, DocumentRoot, ElementClickSource, LocalStorageStore, MediaQueryPreference,
    js_error, listen,
};
use crate::binder::{BindTargets, Bindings};
use crate::config::ThemeConfig;
use crate::context::ThemeContext;
use crate::controller::ThemeController;
use crate::error::ThemeError;
use crate::ports::{ClickSource, KeySource, Subscription};

const LOADING: &str = "loading";

/// A controller installed on the current page. Dropping it unbinds everything.
pub struct Installation {
    controller: Rc<ThemeController>,
    document: Document,
    bindings: RefCell<Option<Bindings>>,
    /// Held until the page unloads; its closure may still be running.
    _dom_ready: RefCell<Option<Subscription>>,
}

impl Installation {
    #[must_use]
    pub fn controller(&self) -> &Rc<ThemeController> {
        &self.controller
    }

    /// Whether listeners have been attached yet.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.bindings.borrow().is_some()
    }

    fn bind(&self) {
        if self.is_bound() {
            return;
        }
        let config = &self.controller.context().config;
        let mut clicks: Vec<Rc<dyn ClickSource>> = Vec::new();

        let primary = self.document.get_element_by_id(&config.control_id);
        if let Some(element) = &primary {
            clicks.push(Rc::new(ElementClickSource::new(element.clone())));
        }
        for element in self.toggle_elements(&config.toggle_attribute) {
            if primary.as_ref() != Some(&element) {
                clicks.push(Rc::new(ElementClickSource::new(element)));
            }
        }

        let keys = config
            .shortcut
            .enabled
            .then(|| Rc::new(DocumentKeySource::new(self.document.clone())) as Rc<dyn KeySource>);

        let targets = BindTargets { clicks, keys, watch_system: true };
        *self.bindings.borrow_mut() = Some(Bindings::attach(&self.controller, targets));
    }

    fn toggle_elements(&self, attribute: &str) -> Vec<Element> {
        if attribute.is_empty() {
            return Vec::new();
        }
        let nodes = match self.document.query_selector_all(&format!("[{attribute}]")) {
            Ok(nodes) => nodes,
            Err(err) => {
                log::warn!("theme: querying [{attribute}] failed: {}", js_error(&err));
                return Vec::new();
            }
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_ref::<Element>().cloned())
            .collect()
    }
}

/// Install a controller on the current page.
///
/// The startup theme is applied immediately so the page never flashes the
/// wrong theme; listeners are attached now, or on `DOMContentLoaded` while
/// the document is still loading.
///
/// # Errors
///
/// Returns [`ThemeError::Config`] for an invalid configuration and
/// [`ThemeError::Dom`] when there is no window or document.
pub fn install(config: ThemeConfig) -> Result<Rc<Installation>, ThemeError> {
    config.validate()?;
    let window = web_sys::window().ok_or_else(|| ThemeError::Dom("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| ThemeError::Dom("window has no document".into()))?;

    let store = Rc::new(LocalStorageStore::new(window.clone()));
    let root = Rc::new(DocumentRoot::new(document.clone(), &config));
    let notifier = Rc::new(CustomEventNotifier::new(document.clone(), config.event_name.clone()));
    let mut ctx = ThemeContext::new(config, store, root).with_notifier(notifier);
    if let Some(system) = MediaQueryPreference::detect(&window) {
        ctx = ctx.with_system(Rc::new(system));
    }

    let controller = Rc::new(ThemeController::new(ctx));
    let initial = controller.init();
    log::debug!("theme: installing with {initial} applied");

    let installation = Rc::new(Installation {
        controller,
        document: document.clone(),
        bindings: RefCell::new(None),
        _dom_ready: RefCell::new(None),
    });

    if document.ready_state() == LOADING {
        let weak = Rc::downgrade(&installation);
        let subscription = listen(&document, "DOMContentLoaded", move |_ev| {
            if let Some(installation) = weak.upgrade() {
                installation.bind();
            }
        })?;
        *installation._dom_ready.borrow_mut() = Some(subscription);
    } else {
        installation.bind();
    }
    Ok(installation)
}
