//! Binds the theme hub to `<html data-theme>`, local storage, the toggle
//! buttons and the favicon.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlLinkElement, MutationObserver, MutationObserverInit, Storage};

use super::dom;
use crate::theme::{PreferenceStore, SubscriptionId, Theme, ThemeHub, ThemeToggle, THEME_ATTRIBUTE};

/// Clicking any element with this attribute flips the theme.
const TOGGLE_SELECTOR: &str = "[data-theme-toggle]";
const FAVICON_SELECTOR: &str = "link[rel~='icon']";

/// `window.localStorage`, or nothing when the browser refuses access.
struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    fn open() -> Self {
        let storage = dom::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            debug!("local storage unavailable, theme choice will not persist");
        }
        Self { storage }
    }
}

impl PreferenceStore for LocalStore {
    fn load(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn save(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            let _ = storage.set_item(key, value);
        }
    }
}

fn apply(root: &Element, theme: Theme) {
    let _ = root.set_attribute(THEME_ATTRIBUTE, theme.as_str());
}

fn set_favicon(document: &Document, theme: Theme) {
    let href = theme.favicon_href();
    let existing = document
        .query_selector(FAVICON_SELECTOR)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlLinkElement>().ok());
    if let Some(link) = existing {
        link.set_href(href);
        return;
    }
    let Some(head) = document.head() else {
        return;
    };
    if let Some(link) = document
        .create_element("link")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlLinkElement>().ok())
    {
        link.set_rel("icon");
        link.set_href(href);
        let _ = head.append_child(&link);
    }
}

/// Forwards `<html data-theme>` changes, whoever makes them, to the hub.
/// Dropping it disconnects the observer.
pub struct ThemeObserver {
    observer: MutationObserver,
    _on_mutation: Closure<dyn FnMut(js_sys::Array, MutationObserver)>,
}

impl ThemeObserver {
    /// Syncs the hub with the attribute as it is now, then follows it.
    pub fn attach(root: &Element, hub: &Rc<RefCell<ThemeHub>>) -> Option<Self> {
        let read = {
            let root = root.clone();
            move || Theme::from_attr(root.get_attribute(THEME_ATTRIBUTE).as_deref())
        };
        if let Ok(mut hub) = hub.try_borrow_mut() {
            hub.set(read());
        }

        let on_mutation = {
            let hub = hub.clone();
            Closure::wrap(Box::new(move |_records: js_sys::Array, _obs: MutationObserver| {
                if let Ok(mut hub) = hub.try_borrow_mut() {
                    hub.set(read());
                }
            }) as Box<dyn FnMut(js_sys::Array, MutationObserver)>)
        };
        let observer = MutationObserver::new(on_mutation.as_ref().unchecked_ref()).ok()?;
        let init = MutationObserverInit::new();
        init.set_attributes(true);
        init.set_attribute_filter(&js_sys::Array::of1(&JsValue::from_str(THEME_ATTRIBUTE)));
        observer.observe_with_options(root, &init).ok()?;

        Some(Self {
            observer,
            _on_mutation: on_mutation,
        })
    }
}

impl Drop for ThemeObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Live theme wiring. Dropping it disconnects the observer and listeners.
pub struct ThemeBinding {
    hub: Rc<RefCell<ThemeHub>>,
    _observer: ThemeObserver,
    _toggles: Vec<EventListener>,
    chrome: SubscriptionId,
}

impl ThemeBinding {
    pub fn attach(document: &Document, hub: &Rc<RefCell<ThemeHub>>) -> Option<Self> {
        let root = document.document_element()?;
        let toggle = Rc::new(RefCell::new(ThemeToggle::new(LocalStore::open())));

        let initial = toggle.borrow().theme();
        apply(&root, initial);
        let observer = ThemeObserver::attach(&root, hub)?;

        let buttons = dom::query_all(document, TOGGLE_SELECTOR);
        let toggles = buttons
            .iter()
            .map(|button| {
                let hub = hub.clone();
                let toggle = toggle.clone();
                let root = root.clone();
                EventListener::new(button, "click", move |_| {
                    let next = hub.borrow().current().toggled();
                    toggle.borrow_mut().set(next);
                    apply(&root, next);
                    hub.borrow_mut().set(next);
                })
            })
            .collect::<Vec<_>>();

        // Favicon and toggle state follow every change, whoever made it.
        let chrome = {
            let document = document.clone();
            hub.borrow_mut().subscribe(move |theme| {
                set_favicon(&document, theme);
                for button in &buttons {
                    let _ = button.set_attribute("aria-pressed", &theme.is_dark().to_string());
                }
            })
        };

        debug!(theme = %initial, toggles = toggles.len(), "theme attached");
        Some(Self {
            hub: hub.clone(),
            _observer: observer,
            _toggles: toggles,
            chrome,
        })
    }
}

impl Drop for ThemeBinding {
    fn drop(&mut self) {
        if let Ok(mut hub) = self.hub.try_borrow_mut() {
            hub.unsubscribe(self.chrome);
        }
    }
}
