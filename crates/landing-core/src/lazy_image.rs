//! Lazy Images
//!
//! `img[data-src]` elements get their real `src` the first time they reach
//! the viewport, then stop being watched.

use std::rc::Rc;

use crate::dom::{attrs, Dom, Query, Watch};
use crate::error::LandingResult;

const DEFERRED_IMAGES: Query = Query::TagAttr { tag: "img", attr: attrs::DEFERRED_SRC };

/// Start watching every deferred image; returns how many are watched.
///
/// Fails with `Unsupported` when the host cannot observe intersections, in
/// which case images keep their placeholder.
pub fn attach<D: Dom>(dom: &Rc<D>) -> LandingResult<usize> {
    let images = dom.query_all(DEFERRED_IMAGES);
    let host = dom.clone();
    dom.observe_intersection(
        &images,
        None,
        Box::new(move |image: &D::Node| {
            load(&*host, image);
            Watch::Stop
        }),
    )?;
    tracing::debug!("lazy images: {}", images.len());
    Ok(images.len())
}

/// Swap `data-src` into `src`
pub fn load<D: Dom>(dom: &D, image: &D::Node) {
    if let Some(src) = dom.attribute(image, attrs::DEFERRED_SRC).filter(|s| !s.is_empty()) {
        dom.set_attribute(image, "src", &src);
        dom.remove_attribute(image, attrs::DEFERRED_SRC);
    }
}
