use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use tracing::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, MouseEvent};

use super::dom;
use super::frame::RafLoop;
use crate::config::CursorConfig;
use crate::cursor::{SmartCursor, SpringParams, INTERACTIVE_SELECTOR};

const RING_ID: &str = "cursor-ring";
const DOT_ID: &str = "cursor-dot";

/// Pointer replacement drawn with two page elements.
pub struct CursorEffect {
    _listeners: Vec<EventListener>,
    _frames: RafLoop,
}

fn element(document: &Document, id: &str) -> Option<HtmlElement> {
    document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
}

fn is_interactive(target: Option<web_sys::EventTarget>) -> bool {
    target
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.closest(INTERACTIVE_SELECTOR).ok().flatten())
        .is_some()
}

impl CursorEffect {
    /// `None` when the page lacks the ring or dot element.
    pub fn attach(document: &Document, config: &CursorConfig) -> Option<Self> {
        let window = dom::window()?;
        let (Some(ring), Some(dot)) = (element(document, RING_ID), element(document, DOT_ID)) else {
            debug!("cursor elements missing, custom cursor disabled");
            return None;
        };
        dom::set_style(
            &ring,
            "transition",
            "scale 0.1s, opacity 0.2s, background-color 0.2s",
        );

        let cursor = Rc::new(RefCell::new(SmartCursor::new(SpringParams::from(config))));

        let mut listeners = Vec::with_capacity(4);
        {
            let cursor = cursor.clone();
            listeners.push(EventListener::new(&window, "mousemove", move |event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    cursor
                        .borrow_mut()
                        .pointer_moved(event.client_x() as f64, event.client_y() as f64);
                }
            }));
        }
        {
            let cursor = cursor.clone();
            listeners.push(EventListener::new(&window, "mousedown", move |_| {
                cursor.borrow_mut().set_pressed(true);
            }));
        }
        {
            let cursor = cursor.clone();
            listeners.push(EventListener::new(&window, "mouseup", move |_| {
                cursor.borrow_mut().set_pressed(false);
            }));
        }
        {
            let cursor = cursor.clone();
            listeners.push(EventListener::new(&window, "mouseover", move |event| {
                cursor.borrow_mut().set_hovering(is_interactive(event.target()));
            }));
        }

        let mut last_ts: Option<f64> = None;
        let frames = RafLoop::start(&window, move |ts| {
            let dt = last_ts.map_or(0.0, |prev| (ts - prev) / 1000.0);
            last_ts = Some(ts);

            let mut cursor = cursor.borrow_mut();
            cursor.tick(dt);

            let (rx, ry) = cursor.ring_position();
            let (dx, dy) = cursor.dot_position();
            let look = cursor.appearance();
            dom::set_style(&ring, "transform", &format!("translate({rx}px, {ry}px)"));
            dom::set_style(&ring, "scale", &look.scale.to_string());
            dom::set_style(&ring, "opacity", &look.opacity.to_string());
            dom::set_style(
                &ring,
                "background-color",
                if look.filled { "white" } else { "transparent" },
            );
            dom::set_style(&dot, "transform", &format!("translate({dx}px, {dy}px)"));
        });

        debug!("custom cursor attached");
        Some(Self {
            _listeners: listeners,
            _frames: frames,
        })
    }
}
