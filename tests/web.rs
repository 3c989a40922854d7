#![cfg(target_arch = "wasm32")]

use aurora_wasm::AuroraBackground;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

wasm_bindgen_test_configure!(run_in_browser);

fn canvas() -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

#[wasm_bindgen_test(async)]
async fn canvas_is_sized_to_viewport() {
    let canvas = canvas();
    let _background = AuroraBackground::attach(canvas.clone(), None)
        .unwrap()
        .expect("2d context");

    assert!(canvas.width() > 0 && canvas.height() > 0);
}

#[wasm_bindgen_test(async)]
async fn frames_advance_until_destroyed() {
    let mut background = AuroraBackground::attach(canvas(), None)
        .unwrap()
        .expect("2d context");
    assert!(background.is_running());

    TimeoutFuture::new(200).await;
    let seen = background.frames();
    assert!(seen > 0.0);
    assert_eq!(background.t(), seen * 0.5);

    background.destroy();
    assert!(!background.is_running());
    let stopped_at = background.frames();

    TimeoutFuture::new(200).await;
    assert_eq!(background.frames(), stopped_at);

    // Second destroy is a no-op.
    background.destroy();
}

#[wasm_bindgen_test(async)]
async fn manual_resize_updates_canvas() {
    let canvas = canvas();
    let mut background = AuroraBackground::attach(canvas.clone(), None)
        .unwrap()
        .expect("2d context");

    background.resize(320.0, 200.0);
    assert_eq!((canvas.width(), canvas.height()), (320, 200));
}

#[wasm_bindgen_test(async)]
async fn theme_follows_root_attribute() {
    let root = web_sys::window()
        .unwrap()
        .document()
        .unwrap()
        .document_element()
        .unwrap();
    root.set_attribute("data-theme", "light").unwrap();
    let background = AuroraBackground::attach(canvas(), None)
        .unwrap()
        .expect("2d context");
    assert_eq!(background.theme(), "light");

    // Observer callbacks run as microtasks, before the timer fires.
    root.set_attribute("data-theme", "dark").unwrap();
    TimeoutFuture::new(50).await;
    assert_eq!(background.theme(), "dark");

    root.set_attribute("data-theme", "light").unwrap();
    TimeoutFuture::new(50).await;
    assert_eq!(background.theme(), "light");
}

#[wasm_bindgen_test(async)]
async fn window_resize_event_resizes_canvas() {
    let window = web_sys::window().unwrap();
    let canvas = canvas();
    let mut background = AuroraBackground::attach(canvas.clone(), None)
        .unwrap()
        .expect("2d context");
    background.resize(10.0, 10.0);
    assert_eq!(canvas.width(), 10);

    let resize = web_sys::Event::new("resize").unwrap();
    window.dispatch_event(&resize).unwrap();

    let inner_width = window.inner_width().unwrap().as_f64().unwrap();
    let inner_height = window.inner_height().unwrap().as_f64().unwrap();
    assert_eq!(canvas.width(), inner_width as u32);
    assert_eq!(canvas.height(), inner_height as u32);
}

#[wasm_bindgen_test]
fn bad_config_is_rejected() {
    let result = AuroraBackground::attach(canvas(), Some(r#"{"step": -1}"#.into()));
    assert!(result.is_err());
    let result = AuroraBackground::attach(canvas(), Some(r#"{"sample_step": 1e-300}"#.into()));
    assert!(result.is_err());
}

#[wasm_bindgen_test]
fn ribbon_preset_attaches() {
    let background =
        AuroraBackground::attach(canvas(), Some(r#"{"preset": "ribbon"}"#.into())).unwrap();
    assert!(background.is_some());
}
