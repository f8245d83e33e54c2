//! Reveal on Scroll
//!
//! Elements tagged `data-animate` gain the `animated` class once they sit
//! fully inside the viewport. Checked on attach and after scrolling settles.

use std::rc::Rc;

use crate::config::RevealConfig;
use crate::debounce::Debouncer;
use crate::dom::{attrs, classes, Dom, DomEvent, EventFlow, EventKind, ListenTarget, Query};

pub struct RevealController<D: Dom> {
    dom: Rc<D>,
    elements: Vec<D::Node>,
}

impl<D: Dom> RevealController<D> {
    /// Returns `None` when nothing on the page is tagged
    pub fn attach(dom: &Rc<D>, config: &RevealConfig) -> Option<Rc<Self>> {
        let elements = dom.query_all(Query::Attr(attrs::ANIMATE));
        if elements.is_empty() {
            return None;
        }
        let controller = Rc::new(Self { dom: dom.clone(), elements });
        controller.reveal_visible();

        let this = controller.clone();
        let debounced = Debouncer::new(dom.clone(), config.debounce_ms, move || this.reveal_visible());
        dom.listen(
            ListenTarget::Window,
            EventKind::Scroll,
            Box::new(move |_: &DomEvent<D::Node>| {
                debounced.call();
                EventFlow::Proceed
            }),
        );
        Some(controller)
    }

    pub fn reveal_visible(&self) {
        for element in &self.elements {
            if self.dom.in_viewport(element) {
                self.dom.add_class(element, classes::ANIMATED);
            }
        }
    }
}
