//! Info Offcanvas
//!
//! Side panel `#infoOffcanvas` opened by `[data-info-toggle]`. While open, a
//! blurred full-screen backdrop is appended to the body; it is detached again
//! on close. The backdrop node and its listener are created once and reused.

use std::cell::RefCell;
use std::rc::Rc;

use crate::dom::{attrs, classes, ids, Dom, DomEvent, EventFlow, EventKind, ListenTarget, Query};
use crate::error::LandingResult;
use crate::scroll_lock::{LockHolder, ScrollLock};

const OVERLAY_CSS: &str = "position: fixed; inset: 0; background: rgba(10, 14, 20, 0.8); z-index: 1999; \
backdrop-filter: blur(5px); -webkit-backdrop-filter: blur(5px);";

pub struct OffcanvasController<D: Dom> {
    dom: Rc<D>,
    lock: Rc<ScrollLock<D>>,
    panel: D::Node,
    overlay: RefCell<Option<D::Node>>,
}

impl<D: Dom> OffcanvasController<D> {
    /// Returns `None` when the page has no offcanvas panel
    pub fn attach(dom: &Rc<D>, lock: &Rc<ScrollLock<D>>) -> Option<Rc<Self>> {
        let panel = dom.element_by_id(ids::INFO_OFFCANVAS)?;
        let controller = Rc::new(Self { dom: dom.clone(), lock: lock.clone(), panel, overlay: RefCell::new(None) });

        for trigger in dom.query_all(Query::Attr(attrs::INFO_TOGGLE)) {
            let this = controller.clone();
            dom.listen(
                ListenTarget::Node(&trigger),
                EventKind::Click,
                Box::new(move |_: &DomEvent<D::Node>| {
                    if let Err(err) = this.open() {
                        tracing::warn!("offcanvas overlay: {}", err);
                    }
                    EventFlow::PreventDefault
                }),
            );
        }

        for button in dom.query_all(Query::Attr(attrs::OFFCANVAS_CLOSE)) {
            let this = controller.clone();
            dom.listen(
                ListenTarget::Node(&button),
                EventKind::Click,
                Box::new(move |_: &DomEvent<D::Node>| {
                    this.close();
                    EventFlow::Proceed
                }),
            );
        }

        let this = controller.clone();
        dom.listen(
            ListenTarget::Document,
            EventKind::Click,
            Box::new(move |event: &DomEvent<D::Node>| {
                if this.is_open() && !this.is_inside_or_trigger(event.target.as_ref()) {
                    this.close();
                }
                EventFlow::Proceed
            }),
        );

        let this = controller.clone();
        dom.listen(
            ListenTarget::Document,
            EventKind::KeyDown,
            Box::new(move |event: &DomEvent<D::Node>| {
                if event.key.as_deref() == Some("Escape") && this.is_open() {
                    this.close();
                }
                EventFlow::Proceed
            }),
        );

        Some(controller)
    }

    /// Show the panel; at most one backdrop exists however often this runs
    pub fn open(self: &Rc<Self>) -> LandingResult<()> {
        self.dom.add_class(&self.panel, classes::ACTIVE);
        self.lock.acquire(LockHolder::Offcanvas);

        if self.dom.element_by_id(ids::OFFCANVAS_OVERLAY).is_some() {
            return Ok(());
        }
        let overlay = self.overlay()?;
        self.dom.append_to_body(&overlay);
        Ok(())
    }

    /// The backdrop node, built with its click listener on first use
    fn overlay(self: &Rc<Self>) -> LandingResult<D::Node> {
        if let Some(overlay) = self.overlay.borrow().as_ref() {
            return Ok(overlay.clone());
        }
        let overlay = self.dom.create_element("div")?;
        self.dom.set_attribute(&overlay, "id", ids::OFFCANVAS_OVERLAY);
        self.dom.set_attribute(&overlay, "style", OVERLAY_CSS);

        let this = self.clone();
        self.dom.listen(
            ListenTarget::Node(&overlay),
            EventKind::Click,
            Box::new(move |_: &DomEvent<D::Node>| {
                this.close();
                EventFlow::Proceed
            }),
        );
        *self.overlay.borrow_mut() = Some(overlay.clone());
        Ok(overlay)
    }

    pub fn close(&self) {
        self.dom.remove_class(&self.panel, classes::ACTIVE);
        if let Some(overlay) = self.dom.element_by_id(ids::OFFCANVAS_OVERLAY) {
            self.dom.remove(&overlay);
        }
        self.lock.release(&LockHolder::Offcanvas);
    }

    pub fn is_open(&self) -> bool {
        self.dom.has_class(&self.panel, classes::ACTIVE)
    }

    fn is_inside_or_trigger(&self, target: Option<&D::Node>) -> bool {
        let Some(target) = target else { return false };
        self.dom.contains(&self.panel, target) || self.dom.closest(target, Query::Attr(attrs::INFO_TOGGLE)).is_some()
    }
}
