//! Page Configuration
//!
//! Reads `<script type="application/json" id="landingConfig">` when the page
//! provides one.

use landing_core::dom::{ids, Dom};
use landing_core::{LandingConfig, LandingResult};

use crate::web_dom::WebDom;

pub fn read(dom: &WebDom) -> LandingResult<LandingConfig> {
    let text = dom.element_by_id(ids::LANDING_CONFIG).map(|el| dom.text(&el));
    parse(text.as_deref())
}

/// Missing or blank config means defaults
pub fn parse(text: Option<&str>) -> LandingResult<LandingConfig> {
    match text.map(str::trim) {
        None | Some("") => Ok(LandingConfig::default()),
        Some(json) => LandingConfig::from_json(json),
    }
}
