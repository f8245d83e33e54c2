//! iTrade Landing Entry Point
//!
//! Wires the landing controllers to the live page.

mod banner;
mod page_config;
mod vendor;
mod web_dom;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use console_logger::LogBuffer;
use landing_core::LandingConfig;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use web_dom::WebDom;

thread_local! {
    static LOGS: RefCell<Option<Arc<LogBuffer>>> = RefCell::new(None);
}

/// Recent log lines, newest last; callable from devtools
#[wasm_bindgen]
pub fn landing_logs() -> String {
    LOGS.with(|logs| logs.borrow().as_ref().map(|b| b.snapshot().join("\n")).unwrap_or_default())
}

fn main() {
    console_error_panic_hook::set_once();
    let Some(dom) = WebDom::new().map(Rc::new) else { return };

    let loaded = page_config::read(&dom);
    let level = loaded.as_ref().map_or("info", |c| c.log_level.as_str());
    let buffer = console_logger::init(level);
    LOGS.with(|logs| *logs.borrow_mut() = Some(buffer));

    let config = loaded.unwrap_or_else(|err| {
        tracing::warn!("using default config: {}", err);
        LandingConfig::default()
    });

    banner::print();
    landing_core::attach_lazy_images(&dom);

    on_ready(&dom, move |dom| {
        vendor::init_all(dom.window(), &config);
        landing_core::boot(dom, &config);
    });
}

/// Run `f` on DOMContentLoaded, or now if that already fired
fn on_ready(dom: &Rc<WebDom>, f: impl FnOnce(&Rc<WebDom>) + 'static) {
    if dom.document().ready_state() != "loading" {
        f(dom);
        return;
    }
    let page = dom.clone();
    let callback = Closure::once_into_js(move || f(&page));
    if let Err(err) = dom
        .document()
        .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
    {
        tracing::warn!("DOMContentLoaded listener: {:?}", err);
    }
}
