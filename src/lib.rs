#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Decorative layer of the portfolio page: animated background, theme
//! switch, custom cursor, decoder text, spotlight cards, magnetic hover,
//! click-to-copy and scroll chrome.
//!
//! Everything outside `wasm` is plain Rust and runs in host tests. The
//! `wasm` module binds it to the DOM.

pub mod clipboard;
pub mod clock;
pub mod config;
pub mod cursor;
pub mod decoder;
mod error;
pub mod magnetic;
pub mod palette;
pub mod rng;
pub mod scene;
pub mod schedule;
pub mod scroll;
pub mod spotlight;
pub mod surface;
pub mod theme;
pub mod wave;

pub use error::{Error, Result};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    mod clipboard;
    mod console;
    mod cursor;
    mod decoder;
    mod dom;
    mod frame;
    mod magnetic;
    mod render;
    mod scroll;
    mod site;
    mod spotlight;
    mod theme;

    pub use render::AuroraBackground;

    /// Runs on module load: wires every effect the page has markup for.
    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console::install_panic_hook();
        site::start()
    }

    /// Detach every effect started by `main`.
    #[wasm_bindgen]
    pub fn teardown() {
        site::teardown();
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::AuroraBackground;
