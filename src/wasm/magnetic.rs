use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use tracing::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, MouseEvent};

use super::dom;
use super::frame::RafLoop;
use crate::config::MagneticConfig;
use crate::magnetic::{Bounds, Magnetic, MAGNETIC_CLASS};

struct Item {
    el: HtmlElement,
    state: Rc<RefCell<Magnetic>>,
}

/// Every `.magnetic` element, moved by one shared frame loop.
pub struct MagneticEffect {
    _listeners: Vec<EventListener>,
    _frames: RafLoop,
}

impl MagneticEffect {
    /// `None` when the page has no magnetic elements.
    pub fn attach(document: &Document, config: &MagneticConfig) -> Option<Self> {
        let window = dom::window()?;
        let elements = dom::query_all(document, &format!(".{MAGNETIC_CLASS}"));
        if elements.is_empty() {
            return None;
        }

        let mut listeners = Vec::with_capacity(elements.len() * 2);
        let items: Vec<Item> = elements
            .into_iter()
            .map(|el| {
                let state = Rc::new(RefCell::new(Magnetic::from(config)));
                {
                    let state = state.clone();
                    let target = el.clone();
                    listeners.push(EventListener::new(&el, "mousemove", move |event| {
                        let Some(event) = event.dyn_ref::<MouseEvent>() else {
                            return;
                        };
                        let rect = target.get_bounding_client_rect();
                        state.borrow_mut().pointer_moved(
                            event.client_x() as f64,
                            event.client_y() as f64,
                            Bounds {
                                left: rect.left(),
                                top: rect.top(),
                                width: rect.width(),
                                height: rect.height(),
                            },
                        );
                    }));
                }
                {
                    let state = state.clone();
                    listeners.push(EventListener::new(&el, "mouseleave", move |_| {
                        state.borrow_mut().pointer_left();
                    }));
                }
                Item { el, state }
            })
            .collect();

        let mut last_ts: Option<f64> = None;
        let frames = RafLoop::start(&window, move |ts| {
            let dt = last_ts.map_or(0.0, |prev| (ts - prev) / 1000.0);
            last_ts = Some(ts);
            for item in &items {
                let mut state = item.state.borrow_mut();
                if state.is_settled() {
                    continue;
                }
                state.tick(dt);
                let (x, y) = state.offset();
                dom::set_style(&item.el, "transform", &format!("translate({x}px, {y}px)"));
            }
        });

        debug!(count = listeners.len() / 2, "magnetic hover attached");
        Some(Self {
            _listeners: listeners,
            _frames: frames,
        })
    }
}
