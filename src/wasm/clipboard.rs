use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use js_sys::{Function, Reflect};
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, Window};

use super::dom;
use crate::clipboard::{CopyFeedback, COPIED_ATTRIBUTE, COPIED_MS, COPY_ATTRIBUTE};

/// `navigator.clipboard.writeText(text)`. The returned promise is left to
/// settle on its own.
fn write_text(window: &Window, text: &str) -> Result<(), JsValue> {
    let clipboard = Reflect::get(&window.navigator(), &JsValue::from_str("clipboard"))?;
    if clipboard.is_undefined() {
        return Err(JsValue::from_str("clipboard unavailable"));
    }
    let write = Reflect::get(&clipboard, &JsValue::from_str("writeText"))?
        .dyn_into::<Function>()?;
    write.call1(&clipboard, &JsValue::from_str(text))?;
    Ok(())
}

fn show(el: &HtmlElement, copied: bool) {
    let _ = el.set_attribute(COPIED_ATTRIBUTE, if copied { "true" } else { "false" });
}

struct CopyButton {
    _on_click: EventListener,
    // Dropping the pending timeout cancels it.
    _timer: Rc<RefCell<Option<Timeout>>>,
}

impl CopyButton {
    fn attach(window: &Window, el: HtmlElement) -> Self {
        let feedback = Rc::new(RefCell::new(CopyFeedback::new()));
        let timer: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
        show(&el, false);

        let on_click = {
            let window = window.clone();
            let target = el.clone();
            let timer = timer.clone();
            EventListener::new(&el, "click", move |_| {
                let text = target.get_attribute(COPY_ATTRIBUTE).unwrap_or_default();
                if let Err(err) = write_text(&window, &text) {
                    debug!(?err, "copy failed");
                    return;
                }
                let token = feedback.borrow_mut().copied();
                show(&target, true);

                let feedback = feedback.clone();
                let target = target.clone();
                let pending = Timeout::new(COPIED_MS, move || {
                    if feedback.borrow_mut().expire(token) {
                        show(&target, false);
                    }
                });
                *timer.borrow_mut() = Some(pending);
            })
        };

        Self {
            _on_click: on_click,
            _timer: timer,
        }
    }
}

/// Click-to-copy on every `[data-copy]` element.
pub struct ClipboardEffect {
    _buttons: Vec<CopyButton>,
}

impl ClipboardEffect {
    pub fn attach(document: &Document) -> Option<Self> {
        let window = dom::window()?;
        let buttons = dom::query_all(document, &format!("[{COPY_ATTRIBUTE}]"))
            .into_iter()
            .map(|el| CopyButton::attach(&window, el))
            .collect();
        Some(Self { _buttons: buttons })
    }
}
