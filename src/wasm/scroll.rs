use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use web_sys::{Document, HtmlElement, ScrollBehavior, ScrollToOptions};

use super::dom::{self, random_seed};
use crate::rng::XorShift32;
use crate::scroll::ScrollWatch;

const HEADER_SELECTOR: &str = "[data-header]";
const STATUS_SELECTOR: &str = "[data-header-status]";
const SCROLL_TOP_SELECTOR: &str = "[data-scroll-top]";

fn set_visible(el: Option<&HtmlElement>, visible: bool) {
    if let Some(el) = el {
        let _ = el.set_attribute("data-visible", if visible { "true" } else { "false" });
    }
}

/// Header and scroll-to-top behaviour. `None` when the page has neither.
pub struct ScrollEffect {
    _listeners: Vec<EventListener>,
}

impl ScrollEffect {
    pub fn attach(document: &Document) -> Option<Self> {
        let window = dom::window()?;
        let header = dom::query_one(document, HEADER_SELECTOR);
        let status = dom::query_one(document, STATUS_SELECTOR);
        let scroll_top = dom::query_one(document, SCROLL_TOP_SELECTOR);
        if header.is_none() && scroll_top.is_none() {
            return None;
        }

        let watch = ScrollWatch::new(XorShift32::new(random_seed()));
        if let Some(status) = &status {
            status.set_text_content(Some(watch.message()));
        }
        set_visible(header.as_ref(), true);
        set_visible(scroll_top.as_ref(), false);

        let watch = Rc::new(RefCell::new(watch));
        let mut listeners = Vec::new();
        {
            let window_for_offset = window.clone();
            let scroll_top = scroll_top.clone();
            listeners.push(EventListener::new(&window, "scroll", move |_| {
                let y = window_for_offset.scroll_y().unwrap_or(0.0);
                let update = watch.borrow_mut().on_scroll(y);
                set_visible(header.as_ref(), update.header_visible);
                set_visible(scroll_top.as_ref(), update.scroll_top_visible);
                if let (Some(status), Some(message)) = (&status, update.message) {
                    status.set_text_content(Some(message));
                }
            }));
        }
        if let Some(button) = &scroll_top {
            let window = window.clone();
            listeners.push(EventListener::new(button, "click", move |_| {
                let options = ScrollToOptions::new();
                options.set_top(0.0);
                options.set_behavior(ScrollBehavior::Smooth);
                window.scroll_to_with_scroll_to_options(&options);
            }));
        }

        Some(Self {
            _listeners: listeners,
        })
    }
}
