//! Body Scroll Lock
//!
//! Modals and the offcanvas both freeze page scrolling while open. The lock
//! tracks who holds it so closing one overlay does not unfreeze the page
//! while another is still open.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::dom::Dom;

/// Who is holding the page still
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LockHolder {
    /// Keyed by the dialog's element id
    Modal(String),
    Offcanvas,
}

pub struct ScrollLock<D: Dom> {
    dom: Rc<D>,
    holders: RefCell<BTreeSet<LockHolder>>,
}

impl<D: Dom> ScrollLock<D> {
    pub fn new(dom: Rc<D>) -> Self {
        Self { dom, holders: RefCell::new(BTreeSet::new()) }
    }

    pub fn acquire(&self, holder: LockHolder) {
        self.holders.borrow_mut().insert(holder);
        self.apply();
    }

    pub fn release(&self, holder: &LockHolder) {
        self.holders.borrow_mut().remove(holder);
        self.apply();
    }

    pub fn is_locked(&self) -> bool {
        !self.holders.borrow().is_empty()
    }

    pub fn holders(&self) -> Vec<LockHolder> {
        self.holders.borrow().iter().cloned().collect()
    }

    fn apply(&self) {
        let Some(body) = self.dom.body() else { return };
        let overflow = if self.is_locked() { "hidden" } else { "" };
        self.dom.set_style(&body, "overflow", overflow);
    }
}
