//! Smooth Scroll
//!
//! Same-page anchors scroll smoothly, leaving room for the fixed navbar.

use std::rc::Rc;

use crate::config::SmoothScrollConfig;
use crate::dom::{ids, Dom, DomEvent, EventFlow, EventKind, ListenTarget, Query};

const IN_PAGE_LINKS: Query = Query::AttrPrefix { tag: "a", attr: "href", prefix: "#" };

/// What a click on an in-page link should do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollPlan {
    /// Let the browser handle it
    Native,
    /// Prevent the jump and glide to `top`
    Glide { top: f64 },
}

pub struct SmoothScrollController<D: Dom> {
    dom: Rc<D>,
    fallback_navbar_height: f64,
}

impl<D: Dom> SmoothScrollController<D> {
    pub fn attach(dom: &Rc<D>, config: &SmoothScrollConfig) -> Rc<Self> {
        let controller =
            Rc::new(Self { dom: dom.clone(), fallback_navbar_height: config.fallback_navbar_height });

        let links = dom.query_all(IN_PAGE_LINKS);
        tracing::debug!("in-page links: {}", links.len());
        for link in links {
            let this = controller.clone();
            let source = link.clone();
            dom.listen(
                ListenTarget::Node(&link),
                EventKind::Click,
                Box::new(move |_: &DomEvent<D::Node>| {
                    let href = this.dom.attribute(&source, "href");
                    match this.plan(href.as_deref()) {
                        ScrollPlan::Native => EventFlow::Proceed,
                        ScrollPlan::Glide { top } => {
                            this.dom.smooth_scroll_to(top);
                            EventFlow::PreventDefault
                        }
                    }
                }),
            );
        }
        controller
    }

    /// Resolve an `href` against the current layout
    pub fn plan(&self, href: Option<&str>) -> ScrollPlan {
        match href {
            None | Some("") | Some("#") => ScrollPlan::Native,
            Some("#top") => ScrollPlan::Glide { top: 0.0 },
            Some(href) => {
                let Some(id) = href.strip_prefix('#') else { return ScrollPlan::Native };
                match self.dom.element_by_id(id) {
                    Some(target) => ScrollPlan::Glide { top: self.dom.offset_top(&target) - self.navbar_height() },
                    None => ScrollPlan::Native,
                }
            }
        }
    }

    fn navbar_height(&self) -> f64 {
        let height = self
            .dom
            .element_by_id(ids::MAIN_NAV)
            .map_or(0.0, |nav| self.dom.offset_height(&nav));
        if height > 0.0 {
            height
        } else {
            self.fallback_navbar_height
        }
    }
}
