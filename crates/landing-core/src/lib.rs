//! Landing Page Controllers
//!
//! Interactivity for the iTrade landing page, written against the [`Dom`]
//! capability so the same code drives the browser and the test fake.
//!
//! - navbar: scroll marker on `#mainNav`
//! - mobile_menu: hamburger menu
//! - counter: count-up stats
//! - modal / offcanvas: dialogs and the info side panel
//! - smooth_scroll: in-page anchors
//! - lazy_image: deferred `img[data-src]`
//! - reveal: `data-animate` elements

pub mod config;
pub mod counter;
pub mod debounce;
pub mod dom;
pub mod error;
pub mod lazy_image;
pub mod mobile_menu;
pub mod modal;
pub mod navbar;
pub mod offcanvas;
pub mod reveal;
pub mod scroll_lock;
pub mod smooth_scroll;

#[cfg(test)]
pub(crate) mod fake;

use std::rc::Rc;

pub use config::LandingConfig;
pub use dom::Dom;
pub use error::{LandingError, LandingResult};

use counter::CounterAnimator;
use mobile_menu::MobileMenuController;
use modal::ModalController;
use navbar::NavbarController;
use offcanvas::OffcanvasController;
use reveal::RevealController;
use scroll_lock::ScrollLock;
use smooth_scroll::SmoothScrollController;

/// Every controller attached to the page; `None` where the markup is absent
pub struct Landing<D: Dom> {
    pub scroll_lock: Rc<ScrollLock<D>>,
    pub navbar: Option<Rc<NavbarController<D>>>,
    pub mobile_menu: Option<Rc<MobileMenuController<D>>>,
    pub counters: Option<Rc<CounterAnimator<D>>>,
    pub modals: Rc<ModalController<D>>,
    pub offcanvas: Option<Rc<OffcanvasController<D>>>,
    pub smooth_scroll: Rc<SmoothScrollController<D>>,
    pub reveal: Option<Rc<RevealController<D>>>,
}

/// Attach the page-ready controllers in page order
pub fn boot<D: Dom>(dom: &Rc<D>, config: &LandingConfig) -> Landing<D> {
    let scroll_lock = Rc::new(ScrollLock::new(dom.clone()));

    let navbar = NavbarController::attach(dom, &config.navbar);
    let mobile_menu = match MobileMenuController::attach(dom, &config.menu) {
        Ok(menu) => menu,
        Err(err) => {
            tracing::warn!("mobile menu disabled: {}", err);
            None
        }
    };
    let counters = CounterAnimator::attach(dom, &config.counter);
    let modals = ModalController::attach(dom, &scroll_lock);
    let offcanvas = OffcanvasController::attach(dom, &scroll_lock);
    let smooth_scroll = SmoothScrollController::attach(dom, &config.smooth_scroll);
    let reveal = RevealController::attach(dom, &config.reveal);

    tracing::info!(
        navbar = navbar.is_some(),
        mobile_menu = mobile_menu.is_some(),
        counters = counters.is_some(),
        offcanvas = offcanvas.is_some(),
        reveal = reveal.is_some(),
        "landing controllers attached"
    );

    Landing { scroll_lock, navbar, mobile_menu, counters, modals, offcanvas, smooth_scroll, reveal }
}

/// Start lazy image loading; independent of page-ready
pub fn attach_lazy_images<D: Dom>(dom: &Rc<D>) {
    match lazy_image::attach(dom) {
        Ok(count) => tracing::debug!("watching {} deferred images", count),
        Err(err) => tracing::debug!("lazy images skipped: {}", err),
    }
}
