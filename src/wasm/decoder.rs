use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_timers::callback::Interval;
use web_sys::{Document, HtmlElement};

use super::dom::{self, random_seed};
use crate::config::DecoderConfig;
use crate::decoder::{Scramble, DECODER_CLASS};
use crate::rng::XorShift32;

/// Scramble-on-hover for one element. At most one animation runs per
/// element; hovering again restarts it.
struct DecoderText {
    _on_enter: EventListener,
    active: Rc<RefCell<Option<Interval>>>,
}

impl DecoderText {
    fn attach(el: HtmlElement, tick_ms: u32, rng: Rc<RefCell<XorShift32>>) -> Self {
        let text = el.text_content().unwrap_or_default();
        let active: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));

        let on_enter = {
            let active = active.clone();
            let target = el.clone();
            EventListener::new(&el, "mouseenter", move |_| {
                // Cancel the running animation before starting a new one.
                active.borrow_mut().take();

                let mut scramble = Scramble::new(&text);
                let el = target.clone();
                let rng = rng.clone();
                let slot = active.clone();
                let interval = Interval::new(tick_ms, move || {
                    match scramble.next_frame(&mut rng.borrow_mut()) {
                        Some(frame) => el.set_text_content(Some(&frame)),
                        None => {
                            slot.borrow_mut().take();
                        }
                    }
                });
                *active.borrow_mut() = Some(interval);
            })
        };

        Self {
            _on_enter: on_enter,
            active,
        }
    }
}

impl Drop for DecoderText {
    fn drop(&mut self) {
        self.active.borrow_mut().take();
    }
}

pub struct DecoderEffect {
    _texts: Vec<DecoderText>,
}

impl DecoderEffect {
    pub fn attach(document: &Document, config: &DecoderConfig) -> Self {
        let rng = Rc::new(RefCell::new(XorShift32::new(random_seed())));
        let texts = dom::query_all(document, &format!(".{DECODER_CLASS}"))
            .into_iter()
            .map(|el| DecoderText::attach(el, config.tick_ms, rng.clone()))
            .collect();
        Self { _texts: texts }
    }
}
