use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_events::EventListener;
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::dom;
use super::frame::RafLoop;
use super::site;
use super::theme::ThemeObserver;
use crate::config::AuroraConfig;
use crate::palette::{LinearGradient, Stroke};
use crate::scene::AuroraScene;
use crate::surface::Surface;
use crate::theme::{SubscriptionId, Theme, ThemeHub};

/// 2-D canvas context as a scene surface.
struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    fn set_size(&self, width: f64, height: f64) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_gradient(&mut self, gradient: &LinearGradient, width: f64, height: f64) {
        let (x0, y0) = gradient.from;
        let (x1, y1) = gradient.to;
        let fill = self.ctx.create_linear_gradient(x0, y0, x1, y1);
        for stop in &gradient.stops {
            let _ = fill.add_color_stop(stop.offset as f32, &stop.color.to_string());
        }
        self.ctx.set_fill_style_canvas_gradient(&fill);
        self.ctx.fill_rect(0.0, 0.0, width, height);
    }

    fn stroke_path(&mut self, points: &[(f64, f64)], stroke: &Stroke) {
        let Some((&(x0, y0), rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.set_line_width(stroke.width);
        self.ctx.set_stroke_style_str(&stroke.color.to_string());
        self.ctx.move_to(x0, y0);
        for &(x, y) in rest {
            self.ctx.line_to(x, y);
        }
        self.ctx.stroke();
    }
}

struct Painter {
    scene: AuroraScene,
    surface: CanvasSurface,
}

/// Animated gradient and wave background on a full-viewport canvas.
///
/// Dropping it (or calling `destroy`) cancels the pending frame, removes the
/// resize listener and leaves the theme hub.
#[wasm_bindgen]
pub struct AuroraBackground {
    painter: Rc<RefCell<Painter>>,
    frames: Option<RafLoop>,
    resize_listener: Option<EventListener>,
    subscription: Option<(Rc<RefCell<ThemeHub>>, SubscriptionId)>,
    // Written by the hub, read at the top of every frame.
    theme: Rc<Cell<Theme>>,
    // Only when attached from JS; the page wiring has its own.
    observer: Option<ThemeObserver>,
}

impl AuroraBackground {
    /// Start painting into `canvas`. `None` when the page has no 2-D canvas
    /// support; the background then simply does not exist.
    pub(crate) fn start(
        canvas: HtmlCanvasElement,
        config: &AuroraConfig,
        hub: &Rc<RefCell<ThemeHub>>,
    ) -> Option<Self> {
        let window = dom::window()?;
        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            debug!("no 2d context, background disabled");
            return None;
        };

        // Resize canvas to fit window
        let (width, height) = dom::viewport_size(&window)?;
        let surface = CanvasSurface { canvas, ctx };
        surface.set_size(width, height);

        let painter = Rc::new(RefCell::new(Painter {
            scene: AuroraScene::new(width, height, config),
            surface,
        }));

        let theme = Rc::new(Cell::new(Theme::default()));
        let id = {
            let theme = theme.clone();
            hub.borrow_mut().subscribe(move |t| theme.set(t))
        };

        let resize_listener = {
            let painter = painter.clone();
            let window_for_size = window.clone();
            EventListener::new(&window, "resize", move |_| {
                let Some((w, h)) = dom::viewport_size(&window_for_size) else {
                    return;
                };
                if let Ok(mut p) = painter.try_borrow_mut() {
                    p.surface.set_size(w, h);
                    p.scene.resize(w, h);
                }
            })
        };

        // Animation loop
        let frames = {
            let painter = painter.clone();
            let theme = theme.clone();
            RafLoop::start(&window, move |_| {
                if let Ok(mut p) = painter.try_borrow_mut() {
                    let Painter { scene, surface } = &mut *p;
                    scene.set_theme(theme.get());
                    scene.render(surface);
                }
            })
        };
        debug!(width, height, "aurora background attached");

        Some(Self {
            painter,
            frames: Some(frames),
            resize_listener: Some(resize_listener),
            subscription: Some((hub.clone(), id)),
            theme,
            observer: None,
        })
    }
}

#[wasm_bindgen]
impl AuroraBackground {
    /// Attach to `canvas`, optionally with an `aurora` config section as
    /// JSON. Resolves to `undefined` when the canvas has no 2-D context.
    /// The background follows `<html data-theme>` on its own.
    pub fn attach(
        canvas: HtmlCanvasElement,
        config_json: Option<String>,
    ) -> Result<Option<AuroraBackground>, JsValue> {
        let config = AuroraConfig::from_json(config_json.as_deref().unwrap_or(""))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let hub = site::theme_hub();
        let observer = dom::document()
            .and_then(|d| d.document_element())
            .and_then(|root| ThemeObserver::attach(&root, &hub));
        Ok(Self::start(canvas, &config, &hub).map(|mut background| {
            background.observer = observer;
            background
        }))
    }

    /// Stop the loop and release listeners. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.frames.take().is_some() {
            debug!("aurora background detached");
        }
        self.resize_listener = None;
        self.observer = None;
        if let Some((hub, id)) = self.subscription.take() {
            if let Ok(mut hub) = hub.try_borrow_mut() {
                hub.unsubscribe(id);
            }
        }
    }

    /// Apply a size by hand, same as a window resize.
    pub fn resize(&mut self, width: f64, height: f64) {
        let mut p = self.painter.borrow_mut();
        p.surface.set_size(width, height);
        p.scene.resize(width, height);
    }

    /// Frames rendered so far; stays put once destroyed.
    pub fn frames(&self) -> f64 {
        self.painter.borrow().scene.frames() as f64
    }

    /// Current animation clock.
    pub fn t(&self) -> f64 {
        self.painter.borrow().scene.t()
    }

    /// Theme the next frame paints with, `"light"` or `"dark"`.
    pub fn theme(&self) -> String {
        self.theme.get().as_str().to_owned()
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.frames.as_ref().is_some_and(RafLoop::is_running)
    }
}

impl Drop for AuroraBackground {
    fn drop(&mut self) {
        self.destroy();
    }
}
