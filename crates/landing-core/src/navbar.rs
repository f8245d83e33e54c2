//! Navbar Scroll Effect
//!
//! Marks `#mainNav` as `scrolled` once the page is scrolled past a threshold.

use std::rc::Rc;

use crate::config::NavbarConfig;
use crate::dom::{classes, ids, Dom, DomEvent, EventFlow, EventKind, ListenTarget};

pub struct NavbarController<D: Dom> {
    dom: Rc<D>,
    navbar: D::Node,
    threshold: f64,
}

impl<D: Dom> NavbarController<D> {
    /// Returns `None` when the page has no navbar
    pub fn attach(dom: &Rc<D>, config: &NavbarConfig) -> Option<Rc<Self>> {
        let navbar = dom.element_by_id(ids::MAIN_NAV)?;
        let controller = Rc::new(Self { dom: dom.clone(), navbar, threshold: config.scroll_threshold });

        let this = controller.clone();
        dom.listen(
            ListenTarget::Window,
            EventKind::Scroll,
            Box::new(move |_: &DomEvent<D::Node>| {
                this.sync();
                EventFlow::Proceed
            }),
        );
        Some(controller)
    }

    /// Bring the marker class in line with the current scroll offset
    pub fn sync(&self) {
        if self.dom.scroll_y() > self.threshold {
            self.dom.add_class(&self.navbar, classes::SCROLLED);
        } else {
            self.dom.remove_class(&self.navbar, classes::SCROLLED);
        }
    }
}
