//! Modal Dialogs
//!
//! `[data-modal="x"]` opens `#xModal`. A dialog closes from its
//! `[data-modal-close]` buttons, a click on its own backdrop, or Escape.

use std::rc::Rc;

use crate::dom::{attrs, classes, ids, Dom, DomEvent, EventFlow, EventKind, ListenTarget, Query};
use crate::scroll_lock::{LockHolder, ScrollLock};

pub struct ModalController<D: Dom> {
    dom: Rc<D>,
    lock: Rc<ScrollLock<D>>,
    modals: Vec<D::Node>,
}

impl<D: Dom> ModalController<D> {
    pub fn attach(dom: &Rc<D>, lock: &Rc<ScrollLock<D>>) -> Rc<Self> {
        let modals = dom.query_all(Query::Class(classes::MODAL));
        let controller = Rc::new(Self { dom: dom.clone(), lock: lock.clone(), modals });

        for trigger in dom.query_all(Query::Attr(attrs::MODAL)) {
            let this = controller.clone();
            let source = trigger.clone();
            dom.listen(
                ListenTarget::Node(&trigger),
                EventKind::Click,
                Box::new(move |_: &DomEvent<D::Node>| {
                    let name = this.dom.attribute(&source, attrs::MODAL).unwrap_or_default();
                    if let Some(modal) = this.dom.element_by_id(&format!("{}{}", name, ids::MODAL_SUFFIX)) {
                        this.open(&modal);
                    }
                    EventFlow::PreventDefault
                }),
            );
        }

        for button in dom.query_all(Query::Attr(attrs::MODAL_CLOSE)) {
            let this = controller.clone();
            let source = button.clone();
            dom.listen(
                ListenTarget::Node(&button),
                EventKind::Click,
                Box::new(move |_: &DomEvent<D::Node>| {
                    if let Some(modal) = this.dom.closest(&source, Query::Class(classes::MODAL)) {
                        this.close(&modal);
                    }
                    EventFlow::Proceed
                }),
            );
        }

        for modal in &controller.modals {
            let this = controller.clone();
            let backdrop = modal.clone();
            dom.listen(
                ListenTarget::Node(modal),
                EventKind::Click,
                Box::new(move |event: &DomEvent<D::Node>| {
                    // only the backdrop itself, not clicks bubbling up from the content
                    if event.target.as_ref() == Some(&backdrop) {
                        this.close(&backdrop);
                    }
                    EventFlow::Proceed
                }),
            );
        }

        let this = controller.clone();
        dom.listen(
            ListenTarget::Document,
            EventKind::KeyDown,
            Box::new(move |event: &DomEvent<D::Node>| {
                if event.key.as_deref() == Some("Escape") {
                    this.close_all();
                }
                EventFlow::Proceed
            }),
        );

        tracing::debug!("modals attached: {}", controller.modals.len());
        controller
    }

    pub fn open(&self, modal: &D::Node) {
        self.dom.add_class(modal, classes::ACTIVE);
        self.lock.acquire(self.holder(modal));
    }

    pub fn close(&self, modal: &D::Node) {
        self.dom.remove_class(modal, classes::ACTIVE);
        self.lock.release(&self.holder(modal));
    }

    pub fn close_all(&self) {
        for modal in &self.modals {
            if self.is_open(modal) {
                self.close(modal);
            }
        }
    }

    pub fn is_open(&self, modal: &D::Node) -> bool {
        self.dom.has_class(modal, classes::ACTIVE)
    }

    fn holder(&self, modal: &D::Node) -> LockHolder {
        let key = self.dom.attribute(modal, "id").unwrap_or_else(|| {
            let index = self.modals.iter().position(|m| m == modal).unwrap_or(usize::MAX);
            format!("#{}", index)
        });
        LockHolder::Modal(key)
    }
}
