//! Third-party Libraries
//!
//! AOS and GLightbox are loaded by the page from a CDN. They are initialised
//! only when present on `window`.

use js_sys::{Function, Reflect};
use landing_core::config::{AosOptions, LightboxOptions};
use landing_core::LandingConfig;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Window;

/// `AOS.init(options)`; `Ok(false)` when AOS is not on the page
pub fn init_animate_on_scroll(window: &Window, options: &AosOptions) -> Result<bool, JsValue> {
    let aos = Reflect::get(window, &JsValue::from_str("AOS"))?;
    if aos.is_undefined() || aos.is_null() {
        return Ok(false);
    }
    let init: Function = Reflect::get(&aos, &JsValue::from_str("init"))?.dyn_into()?;
    let options = serde_wasm_bindgen::to_value(options)?;
    init.call1(&aos, &options)?;
    Ok(true)
}

/// `GLightbox(options)`; `Ok(false)` when GLightbox is not on the page
pub fn init_lightbox(window: &Window, options: &LightboxOptions) -> Result<bool, JsValue> {
    let Ok(glightbox) = Reflect::get(window, &JsValue::from_str("GLightbox"))?.dyn_into::<Function>() else {
        return Ok(false);
    };
    let options = serde_wasm_bindgen::to_value(options)?;
    glightbox.call1(&JsValue::UNDEFINED, &options)?;
    Ok(true)
}

pub fn init_all(window: &Window, config: &LandingConfig) {
    report("AOS", init_animate_on_scroll(window, &config.aos));
    report("GLightbox", init_lightbox(window, &config.lightbox));
}

fn report(library: &str, outcome: Result<bool, JsValue>) {
    match outcome {
        Ok(true) => tracing::debug!("{} initialised", library),
        Ok(false) => tracing::debug!("{} not loaded", library),
        Err(err) => tracing::warn!("{} init failed: {:?}", library, err),
    }
}
