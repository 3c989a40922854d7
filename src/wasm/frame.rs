//! `requestAnimationFrame` behind the [`FrameScheduler`] seam.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::Window;

use crate::schedule::{FrameId, FrameLoop, FrameScheduler};
use crate::Error;

/// Every request re-arms the same JS callback.
pub struct RafScheduler {
    window: Window,
    callback: Function,
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> crate::Result<FrameId> {
        self.window
            .request_animation_frame(&self.callback)
            .map_err(|e| Error::Schedule(format!("{e:?}")))
    }

    fn cancel_frame(&mut self, id: FrameId) {
        let _ = self.window.cancel_animation_frame(id);
    }
}

/// A running per-frame task. Dropping it cancels the pending frame.
pub struct RafLoop {
    frames: Rc<RefCell<Option<FrameLoop<RafScheduler>>>>,
    // Owns the JS function the scheduler keeps re-requesting.
    _callback: Closure<dyn FnMut(f64)>,
}

impl RafLoop {
    /// Run `body` once per display refresh with the frame timestamp in ms.
    pub fn start<F>(window: &Window, mut body: F) -> Self
    where
        F: FnMut(f64) + 'static,
    {
        // `frames` holds the loop so the callback can reach it while the
        // loop in turn holds the callback's JS function.
        let frames: Rc<RefCell<Option<FrameLoop<RafScheduler>>>> = Rc::new(RefCell::new(None));
        let callback = {
            let frames = frames.clone();
            Closure::wrap(Box::new(move |timestamp: f64| {
                let Ok(mut slot) = frames.try_borrow_mut() else {
                    return;
                };
                if let Some(frames) = slot.as_mut() {
                    frames.on_frame(|| body(timestamp));
                }
            }) as Box<dyn FnMut(f64)>)
        };

        let scheduler = RafScheduler {
            window: window.clone(),
            callback: callback.as_ref().unchecked_ref::<Function>().clone(),
        };
        let mut frame_loop = FrameLoop::new(scheduler);
        frame_loop.start();
        *frames.borrow_mut() = Some(frame_loop);

        Self {
            frames,
            _callback: callback,
        }
    }

    pub fn is_running(&self) -> bool {
        self.frames
            .borrow()
            .as_ref()
            .is_some_and(FrameLoop::is_running)
    }

    /// Cancel the pending frame. Idempotent.
    pub fn stop(&self) {
        if let Some(frames) = self.frames.borrow_mut().as_mut() {
            frames.detach();
        }
    }
}

impl Drop for RafLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
