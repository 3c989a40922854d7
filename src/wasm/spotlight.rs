use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, MouseEvent};

use super::dom;
use crate::spotlight::{Spotlight, SPOTLIGHT_CLASS};

fn publish(card: &HtmlElement, spot: &Spotlight) {
    for (name, value) in spot.css_vars() {
        dom::set_style(card, name, &value);
    }
}

/// Card listeners; dropping them removes them.
pub struct SpotlightEffect {
    _listeners: Vec<EventListener>,
}

impl SpotlightEffect {
    pub fn attach(document: &Document) -> Self {
        let mut listeners = Vec::new();
        for card in dom::query_all(document, &format!(".{SPOTLIGHT_CLASS}")) {
            let spot = Rc::new(RefCell::new(Spotlight::new()));
            publish(&card, &spot.borrow());

            let on = |kind: &'static str, apply: fn(&mut Spotlight, &web_sys::Event, &HtmlElement)| {
                let spot = spot.clone();
                let target = card.clone();
                EventListener::new(&card, kind, move |event| {
                    let mut s = spot.borrow_mut();
                    apply(&mut s, event, &target);
                    publish(&target, &s);
                })
            };

            listeners.push(on("mousemove", |s, event, card| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    let rect = card.get_bounding_client_rect();
                    s.pointer_moved(
                        event.client_x() as f64,
                        event.client_y() as f64,
                        rect.left(),
                        rect.top(),
                    );
                }
            }));
            listeners.push(on("mouseenter", |s, _, _| s.pointer_entered()));
            listeners.push(on("mouseleave", |s, _, _| s.pointer_left()));
            // focusin/focusout bubble, so focus on any child lights the card.
            listeners.push(on("focusin", |s, _, _| s.focused()));
            listeners.push(on("focusout", |s, _, _| s.blurred()));
        }
        Self {
            _listeners: listeners,
        }
    }
}
