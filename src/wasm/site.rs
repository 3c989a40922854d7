//! Page-wide wiring: reads the config, starts every effect the markup asks
//! for and keeps them alive until teardown.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{info, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlCanvasElement};

use super::clipboard::ClipboardEffect;
use super::console;
use super::cursor::CursorEffect;
use super::decoder::DecoderEffect;
use super::dom;
use super::magnetic::MagneticEffect;
use super::render::AuroraBackground;
use super::scroll::ScrollEffect;
use super::spotlight::SpotlightEffect;
use super::theme::ThemeBinding;
use crate::config::{Config, CONFIG_ELEMENT_ID};
use crate::theme::ThemeHub;

/// Canvas the background paints into.
const CANVAS_ID: &str = "aurora";

thread_local! {
    static HUB: Rc<RefCell<ThemeHub>> = Rc::new(RefCell::new(ThemeHub::default()));
    static SITE: RefCell<Option<Site>> = const { RefCell::new(None) };
}

/// Shared theme hub for this page.
pub fn theme_hub() -> Rc<RefCell<ThemeHub>> {
    HUB.with(Rc::clone)
}

// Field order is drop order: the effects go before the theme binding.
struct Site {
    background: Option<AuroraBackground>,
    cursor: Option<CursorEffect>,
    decoder: Option<DecoderEffect>,
    magnetic: Option<MagneticEffect>,
    clipboard: Option<ClipboardEffect>,
    spotlight: SpotlightEffect,
    scroll: Option<ScrollEffect>,
    theme: Option<ThemeBinding>,
}

fn load_config(document: &Document) -> Config {
    let Some(raw) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return Config::default();
    };
    match Config::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            // Logging is not up yet; go straight to the console.
            web_sys::console::warn_1(&JsValue::from_str(&format!("{err}, using defaults")));
            Config::default()
        }
    }
}

fn canvas(document: &Document) -> Option<HtmlCanvasElement> {
    document
        .get_element_by_id(CANVAS_ID)?
        .dyn_into::<HtmlCanvasElement>()
        .ok()
}

pub fn start() -> Result<(), JsValue> {
    let document = dom::document().ok_or("no document")?;
    let config = load_config(&document);
    console::init_logging(config.max_level());

    // Restarting replaces whatever ran before.
    teardown();

    let hub = theme_hub();
    let theme = ThemeBinding::attach(&document, &hub);
    if theme.is_none() {
        warn!("theme binding unavailable");
    }
    let background =
        canvas(&document).and_then(|c| AuroraBackground::start(c, &config.aurora, &hub));
    let cursor = config
        .cursor
        .enabled
        .then(|| CursorEffect::attach(&document, &config.cursor))
        .flatten();
    let decoder = config
        .decoder
        .enabled
        .then(|| DecoderEffect::attach(&document, &config.decoder));
    let magnetic = config
        .magnetic
        .enabled
        .then(|| MagneticEffect::attach(&document, &config.magnetic))
        .flatten();
    let clipboard = ClipboardEffect::attach(&document);
    let spotlight = SpotlightEffect::attach(&document);
    let scroll = ScrollEffect::attach(&document);

    info!(
        background = background.is_some(),
        cursor = cursor.is_some(),
        magnetic = magnetic.is_some(),
        preset = ?config.aurora.preset,
        "site effects started"
    );

    SITE.with(|site| {
        *site.borrow_mut() = Some(Site {
            background,
            cursor,
            decoder,
            magnetic,
            clipboard,
            spotlight,
            scroll,
            theme,
        });
    });
    Ok(())
}

pub fn teardown() {
    // Take first so the drops run without the slot borrowed.
    let site = SITE.with(|site| site.borrow_mut().take());
    if site.is_some() {
        drop(site);
        info!("site effects stopped");
    }
}
