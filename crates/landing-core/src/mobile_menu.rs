//! Mobile Menu
//!
//! Hamburger button that slides `#navbarMenu` in and out and morphs its three
//! lines into an X. Closes on outside clicks, and on link clicks when the
//! viewport is narrow.

use std::rc::Rc;

use crate::config::MenuConfig;
use crate::dom::{classes, ids, Dom, DomEvent, EventFlow, EventKind, ListenTarget, Query};
use crate::error::{LandingError, LandingResult};

/// The three bars of the hamburger icon
#[derive(Debug, Clone, PartialEq)]
pub struct TogglerLines<N> {
    pub top: N,
    pub middle: N,
    pub bottom: N,
}

impl<N> TogglerLines<N> {
    pub fn from_nodes(nodes: Vec<N>) -> LandingResult<Self> {
        let found = nodes.len();
        match <[N; 3]>::try_from(nodes) {
            Ok([top, middle, bottom]) => Ok(Self { top, middle, bottom }),
            Err(_) => Err(LandingError::TogglerLines { found }),
        }
    }
}

impl<N: Clone + PartialEq + std::fmt::Debug + 'static> TogglerLines<N> {
    fn show_open<D: Dom<Node = N>>(&self, dom: &D) {
        dom.set_style(&self.top, "transform", "rotate(45deg) translateY(8px)");
        dom.set_style(&self.middle, "opacity", "0");
        dom.set_style(&self.bottom, "transform", "rotate(-45deg) translateY(-8px)");
    }

    fn show_closed<D: Dom<Node = N>>(&self, dom: &D) {
        dom.set_style(&self.top, "transform", "none");
        dom.set_style(&self.middle, "opacity", "1");
        dom.set_style(&self.bottom, "transform", "none");
    }
}

pub struct MobileMenuController<D: Dom> {
    dom: Rc<D>,
    toggler: D::Node,
    menu: D::Node,
    lines: TogglerLines<D::Node>,
    breakpoint: f64,
}

impl<D: Dom> MobileMenuController<D> {
    /// `Ok(None)` when the toggler or menu is absent; an error when the
    /// hamburger icon is malformed
    pub fn attach(dom: &Rc<D>, config: &MenuConfig) -> LandingResult<Option<Rc<Self>>> {
        let (Some(toggler), Some(menu)) = (dom.element_by_id(ids::NAV_TOGGLER), dom.element_by_id(ids::NAVBAR_MENU))
        else {
            return Ok(None);
        };
        let lines = TogglerLines::from_nodes(dom.query_all_within(&toggler, Query::Class(classes::TOGGLER_LINE)))?;

        let controller = Rc::new(Self { dom: dom.clone(), toggler, menu, lines, breakpoint: config.breakpoint });

        let this = controller.clone();
        dom.listen(
            ListenTarget::Node(&controller.toggler),
            EventKind::Click,
            Box::new(move |_: &DomEvent<D::Node>| {
                this.toggle();
                EventFlow::Proceed
            }),
        );

        for link in dom.query_all(Query::Class(classes::NAV_LINK)) {
            let this = controller.clone();
            dom.listen(
                ListenTarget::Node(&link),
                EventKind::Click,
                Box::new(move |_: &DomEvent<D::Node>| {
                    if this.dom.inner_width() <= this.breakpoint {
                        this.close();
                    }
                    EventFlow::Proceed
                }),
            );
        }

        let this = controller.clone();
        dom.listen(
            ListenTarget::Document,
            EventKind::Click,
            Box::new(move |event: &DomEvent<D::Node>| {
                let inside = event
                    .target
                    .as_ref()
                    .map_or(false, |t| this.dom.contains(&this.toggler, t) || this.dom.contains(&this.menu, t));
                if !inside {
                    this.close();
                }
                EventFlow::Proceed
            }),
        );

        Ok(Some(controller))
    }

    pub fn toggle(&self) {
        if self.dom.toggle_class(&self.menu, classes::ACTIVE) {
            self.lines.show_open(&*self.dom);
        } else {
            self.lines.show_closed(&*self.dom);
        }
    }

    pub fn close(&self) {
        self.dom.remove_class(&self.menu, classes::ACTIVE);
        self.lines.show_closed(&*self.dom);
    }

    pub fn is_open(&self) -> bool {
        self.dom.has_class(&self.menu, classes::ACTIVE)
    }
}
