//! Trailing-edge debounce over the host's timers
//!
//! Every call re-arms the timer; the action runs once the calls stop for
//! `delay_ms`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::dom::Dom;

pub struct Debouncer<D: Dom> {
    dom: Rc<D>,
    delay_ms: u32,
    action: Rc<dyn Fn()>,
    pending: RefCell<Option<D::Timer>>,
}

impl<D: Dom> Debouncer<D> {
    pub fn new(dom: Rc<D>, delay_ms: u32, action: impl Fn() + 'static) -> Self {
        Self { dom, delay_ms, action: Rc::new(action), pending: RefCell::new(None) }
    }

    pub fn call(&self) {
        let action = self.action.clone();
        let timer = self.dom.set_timeout(self.delay_ms, Box::new(move || action()));
        // replacing the old timer cancels it
        self.pending.replace(Some(timer));
    }
}
