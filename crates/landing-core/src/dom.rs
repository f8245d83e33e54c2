//! DOM Capability
//!
//! Everything the controllers need from the host page. The browser build
//! implements [`Dom`] over `web-sys`; tests implement it over an in-memory tree.

use std::fmt::Debug;

use crate::error::LandingResult;

/// Element ids the page markup provides
pub mod ids {
    pub const MAIN_NAV: &str = "mainNav";
    pub const NAV_TOGGLER: &str = "navToggler";
    pub const NAVBAR_MENU: &str = "navbarMenu";
    pub const INFO_OFFCANVAS: &str = "infoOffcanvas";
    /// Created on demand while the offcanvas is open
    pub const OFFCANVAS_OVERLAY: &str = "offcanvasOverlay";
    /// Optional `<script type="application/json">` holding page config
    pub const LANDING_CONFIG: &str = "landingConfig";
    /// Suffix appended to a `data-modal` value to get the dialog id
    pub const MODAL_SUFFIX: &str = "Modal";
}

/// Attribute names the page markup provides
pub mod attrs {
    pub const COUNT: &str = "data-count";
    pub const PREFIX: &str = "data-prefix";
    pub const MODAL: &str = "data-modal";
    pub const MODAL_CLOSE: &str = "data-modal-close";
    pub const INFO_TOGGLE: &str = "data-info-toggle";
    pub const OFFCANVAS_CLOSE: &str = "data-offcanvas-close";
    pub const DEFERRED_SRC: &str = "data-src";
    pub const ANIMATE: &str = "data-animate";
}

/// Class names toggled or queried by the controllers
pub mod classes {
    pub const SCROLLED: &str = "scrolled";
    pub const ACTIVE: &str = "active";
    pub const ANIMATED: &str = "animated";
    pub const NAV_LINK: &str = "nav-link";
    pub const TOGGLER_LINE: &str = "toggler-line";
    pub const MODAL: &str = "modal";
}

/// A typed element query
///
/// Only the selector shapes the page actually needs, so a fake DOM can match
/// them without a CSS engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    /// `.name`
    Class(&'static str),
    /// `[attr]`
    Attr(&'static str),
    /// `tag[attr]`
    TagAttr { tag: &'static str, attr: &'static str },
    /// `tag[attr^="prefix"]`
    AttrPrefix {
        tag: &'static str,
        attr: &'static str,
        prefix: &'static str,
    },
}

impl Query {
    pub fn to_css(&self) -> String {
        match self {
            Query::Class(name) => format!(".{}", name),
            Query::Attr(attr) => format!("[{}]", attr),
            Query::TagAttr { tag, attr } => format!("{}[{}]", tag, attr),
            Query::AttrPrefix { tag, attr, prefix } => format!("{}[{}^=\"{}\"]", tag, attr, prefix),
        }
    }

    /// Structural match used by non-browser hosts
    pub fn matches<C, A>(&self, tag: &str, has_class: C, attr: A) -> bool
    where
        C: Fn(&str) -> bool,
        A: Fn(&str) -> Option<String>,
    {
        match self {
            Query::Class(name) => has_class(name),
            Query::Attr(name) => attr(name).is_some(),
            Query::TagAttr { tag: t, attr: a } => tag.eq_ignore_ascii_case(t) && attr(a).is_some(),
            Query::AttrPrefix { tag: t, attr: a, prefix } => {
                tag.eq_ignore_ascii_case(t) && attr(a).map_or(false, |v| v.starts_with(prefix))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    KeyDown,
    Scroll,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::KeyDown => "keydown",
            EventKind::Scroll => "scroll",
        }
    }
}

/// Where a listener is attached
#[derive(Debug, Clone, Copy)]
pub enum ListenTarget<'a, N> {
    Window,
    Document,
    Node(&'a N),
}

/// The parts of a dispatched event the controllers read
#[derive(Debug, Clone, PartialEq)]
pub struct DomEvent<N> {
    /// Element the event originated on
    pub target: Option<N>,
    /// `KeyboardEvent.key`, keyboard events only
    pub key: Option<String>,
}

/// What a handler wants done with the default action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventFlow {
    #[default]
    Proceed,
    PreventDefault,
}

/// Returned by intersection callbacks; `Stop` unobserves the element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Watch {
    Keep,
    Stop,
}

pub type Handler<N> = Box<dyn FnMut(&DomEvent<N>) -> EventFlow>;
pub type ObserverCallback<N> = Box<dyn FnMut(&N) -> Watch>;
pub type FrameCallback = Box<dyn FnOnce()>;
pub type TimerCallback = Box<dyn FnOnce()>;

/// Host page capability injected into every controller
pub trait Dom: 'static {
    /// Element handle; equality is node identity
    type Node: Clone + PartialEq + Debug + 'static;
    /// Pending timeout; dropping it cancels the timeout
    type Timer: 'static;

    // ========================
    // Queries
    // ========================

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
    fn query_all(&self, query: Query) -> Vec<Self::Node>;
    fn query_all_within(&self, root: &Self::Node, query: Query) -> Vec<Self::Node>;
    /// Nearest inclusive ancestor matching `query`
    fn closest(&self, node: &Self::Node, query: Query) -> Option<Self::Node>;
    /// Inclusive containment, like `Node.contains`
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;
    fn body(&self) -> Option<Self::Node>;

    // ========================
    // Element state
    // ========================

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    fn remove_attribute(&self, node: &Self::Node, name: &str);
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);
    fn text(&self, node: &Self::Node) -> String;
    fn set_text(&self, node: &Self::Node, text: &str);
    /// Set one inline style property; an empty value clears it
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);

    // ========================
    // Tree mutation
    // ========================

    fn create_element(&self, tag: &str) -> LandingResult<Self::Node>;
    fn append_to_body(&self, node: &Self::Node);
    fn remove(&self, node: &Self::Node);

    // ========================
    // Layout and viewport
    // ========================

    fn scroll_y(&self) -> f64;
    fn inner_width(&self) -> f64;
    fn offset_top(&self, node: &Self::Node) -> f64;
    fn offset_height(&self, node: &Self::Node) -> f64;
    /// Whole bounding box inside the viewport
    fn in_viewport(&self, node: &Self::Node) -> bool;
    /// Animated window scroll to `top`
    fn smooth_scroll_to(&self, top: f64);

    // ========================
    // Scheduling
    // ========================

    /// Listeners stay attached for the lifetime of the page
    fn listen(&self, target: ListenTarget<'_, Self::Node>, kind: EventKind, handler: Handler<Self::Node>);
    /// Report each element of `nodes` as it intersects the viewport
    fn observe_intersection(
        &self,
        nodes: &[Self::Node],
        threshold: Option<f64>,
        callback: ObserverCallback<Self::Node>,
    ) -> LandingResult<()>;
    fn request_frame(&self, callback: FrameCallback);
    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) -> Self::Timer;

    // ========================
    // Helpers
    // ========================

    /// Flip `class`, returning whether it is now present
    fn toggle_class(&self, node: &Self::Node, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }
}
