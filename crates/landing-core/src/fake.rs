//! In-memory DOM for controller tests
//!
//! A flat arena of nodes rooted at `<body>`. Clicks bubble from the target
//! through its ancestors to the document; animation frames and timers only
//! run when a test asks for them.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::{Rc, Weak};

use crate::dom::{
    Dom, DomEvent, EventFlow, EventKind, FrameCallback, Handler, ListenTarget, ObserverCallback,
    Query, TimerCallback, Watch,
};
use crate::error::{LandingError, LandingResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct FakeNode {
    tag: String,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    text: String,
    style: BTreeMap<String, String>,
    parent: Option<NodeId>,
    offset_top: f64,
    offset_height: f64,
    in_viewport: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListenKey {
    Window,
    Document,
    Node(NodeId),
}

struct Listener {
    key: ListenKey,
    kind: EventKind,
    handler: Rc<RefCell<Handler<NodeId>>>,
}

struct Observer {
    nodes: Vec<NodeId>,
    threshold: Option<f64>,
    callback: Rc<RefCell<ObserverCallback<NodeId>>>,
}

#[derive(Default)]
struct Clock {
    now: u64,
    next_id: u64,
    pending: Vec<(u64, u64, TimerCallback)>,
}

/// Dropping a timer cancels it, like `gloo_timers::callback::Timeout`
pub struct FakeTimer {
    id: u64,
    clock: Weak<RefCell<Clock>>,
}

impl Drop for FakeTimer {
    fn drop(&mut self) {
        if let Some(clock) = self.clock.upgrade() {
            if let Ok(mut clock) = clock.try_borrow_mut() {
                clock.pending.retain(|(id, _, _)| *id != self.id);
            }
        }
    }
}

struct Page {
    nodes: Vec<FakeNode>,
    scroll_y: f64,
    inner_width: f64,
    scrolls: Vec<f64>,
    observers_supported: bool,
}

pub struct FakeDom {
    page: RefCell<Page>,
    listeners: RefCell<Vec<Listener>>,
    observers: RefCell<Vec<Observer>>,
    frames: RefCell<VecDeque<FrameCallback>>,
    clock: Rc<RefCell<Clock>>,
}

const BODY: NodeId = NodeId(0);

impl FakeDom {
    pub fn new() -> Self {
        let body = FakeNode { tag: "body".to_string(), ..Default::default() };
        Self {
            page: RefCell::new(Page {
                nodes: vec![body],
                scroll_y: 0.0,
                inner_width: 1280.0,
                scrolls: Vec::new(),
                observers_supported: true,
            }),
            listeners: RefCell::new(Vec::new()),
            observers: RefCell::new(Vec::new()),
            frames: RefCell::new(VecDeque::new()),
            clock: Rc::new(RefCell::new(Clock::default())),
        }
    }

    pub fn without_observers() -> Self {
        let dom = Self::new();
        dom.page.borrow_mut().observers_supported = false;
        dom
    }

    pub fn body_id(&self) -> NodeId {
        BODY
    }

    // ========================
    // Building
    // ========================

    /// Append an element; a `class` attribute is split into classes
    pub fn add(&self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let mut node = FakeNode { tag: tag.to_string(), parent: Some(parent), ..Default::default() };
        for (name, value) in attrs {
            if *name == "class" {
                node.classes = value.split_whitespace().map(str::to_string).collect();
            } else {
                node.attrs.insert(name.to_string(), value.to_string());
            }
        }
        let mut page = self.page.borrow_mut();
        page.nodes.push(node);
        NodeId(page.nodes.len() - 1)
    }

    pub fn set_layout(&self, node: NodeId, offset_top: f64, offset_height: f64) {
        let mut page = self.page.borrow_mut();
        page.nodes[node.0].offset_top = offset_top;
        page.nodes[node.0].offset_height = offset_height;
    }

    pub fn set_in_viewport(&self, node: NodeId, visible: bool) {
        self.page.borrow_mut().nodes[node.0].in_viewport = visible;
    }

    pub fn set_inner_width(&self, width: f64) {
        self.page.borrow_mut().inner_width = width;
    }

    // ========================
    // Inspection
    // ========================

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.page.borrow().nodes[node.0].style.get(property).cloned()
    }

    pub fn body_overflow(&self) -> Option<String> {
        self.style(BODY, "overflow")
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        let page = self.page.borrow();
        Self::attached(&page, node)
    }

    pub fn scrolls(&self) -> Vec<f64> {
        self.page.borrow().scrolls.clone()
    }

    pub fn count_by_id(&self, id: &str) -> usize {
        let page = self.page.borrow();
        (0..page.nodes.len())
            .filter(|i| Self::attached(&page, NodeId(*i)))
            .filter(|i| page.nodes[*i].attrs.get("id").map(String::as_str) == Some(id))
            .count()
    }

    pub fn is_observed(&self, node: NodeId) -> bool {
        self.observers.borrow().iter().any(|o| o.nodes.contains(&node))
    }

    pub fn observer_thresholds(&self) -> Vec<Option<f64>> {
        self.observers.borrow().iter().map(|o| o.threshold).collect()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    // ========================
    // Driving
    // ========================

    /// Click `node`; returns whether any handler prevented the default
    pub fn click(&self, node: NodeId) -> EventFlow {
        let mut path = Vec::new();
        {
            let page = self.page.borrow();
            let mut current = Some(node);
            while let Some(id) = current {
                path.push(ListenKey::Node(id));
                current = page.nodes[id.0].parent;
            }
        }
        path.push(ListenKey::Document);
        path.push(ListenKey::Window);
        let event = DomEvent { target: Some(node), key: None };
        self.dispatch(&path, EventKind::Click, &event)
    }

    pub fn press_key(&self, key: &str) -> EventFlow {
        let event = DomEvent { target: Some(BODY), key: Some(key.to_string()) };
        self.dispatch(&[ListenKey::Node(BODY), ListenKey::Document, ListenKey::Window], EventKind::KeyDown, &event)
    }

    /// Move the page and fire `scroll` on the window
    pub fn scroll_window(&self, y: f64) {
        self.page.borrow_mut().scroll_y = y;
        let event = DomEvent { target: None, key: None };
        self.dispatch(&[ListenKey::Window], EventKind::Scroll, &event);
    }

    /// Report `node` as intersecting to every observer watching it
    pub fn intersect(&self, node: NodeId) {
        let callbacks: Vec<(usize, Rc<RefCell<ObserverCallback<NodeId>>>)> = self
            .observers
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, o)| o.nodes.contains(&node))
            .map(|(i, o)| (i, o.callback.clone()))
            .collect();

        for (index, callback) in callbacks {
            let watch = (&mut *callback.borrow_mut())(&node);
            if watch == Watch::Stop {
                self.observers.borrow_mut()[index].nodes.retain(|n| *n != node);
            }
        }
    }

    /// Run the frames queued before this call; returns how many ran
    pub fn run_frame(&self) -> usize {
        let batch: Vec<FrameCallback> = self.frames.borrow_mut().drain(..).collect();
        let ran = batch.len();
        for frame in batch {
            frame();
        }
        ran
    }

    /// Keep running frames until none are queued, up to `limit` rounds
    pub fn run_frames(&self, limit: usize) -> usize {
        let mut rounds = 0;
        while rounds < limit && self.run_frame() > 0 {
            rounds += 1;
        }
        rounds
    }

    pub fn advance(&self, ms: u64) {
        let target = self.clock.borrow().now + ms;
        loop {
            let due = {
                let mut clock = self.clock.borrow_mut();
                let next = clock
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, (_, at, _))| *at <= target)
                    .min_by_key(|(_, (_, at, _))| *at)
                    .map(|(i, _)| i);
                match next {
                    Some(i) => {
                        let (_, at, callback) = clock.pending.remove(i);
                        clock.now = at;
                        Some(callback)
                    }
                    None => None,
                }
            };
            match due {
                Some(callback) => callback(),
                None => break,
            }
        }
        self.clock.borrow_mut().now = target;
    }

    fn dispatch(&self, path: &[ListenKey], kind: EventKind, event: &DomEvent<NodeId>) -> EventFlow {
        let handlers: Vec<Rc<RefCell<Handler<NodeId>>>> = {
            let listeners = self.listeners.borrow();
            path.iter()
                .flat_map(|key| {
                    listeners
                        .iter()
                        .filter(move |l| l.key == *key && l.kind == kind)
                        .map(|l| l.handler.clone())
                })
                .collect()
        };

        let mut flow = EventFlow::Proceed;
        for handler in handlers {
            if (&mut *handler.borrow_mut())(event) == EventFlow::PreventDefault {
                flow = EventFlow::PreventDefault;
            }
        }
        flow
    }

    fn attached(page: &Page, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == BODY {
                return true;
            }
            current = page.nodes[id.0].parent;
        }
        false
    }

    fn node_matches(page: &Page, node: NodeId, query: Query) -> bool {
        let n = &page.nodes[node.0];
        query.matches(&n.tag, |c| n.classes.iter().any(|k| k == c), |a| n.attrs.get(a).cloned())
    }

    fn descends_from(page: &Page, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = page.nodes[id.0].parent;
        }
        false
    }
}

impl Dom for FakeDom {
    type Node = NodeId;
    type Timer = FakeTimer;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let page = self.page.borrow();
        (0..page.nodes.len())
            .map(NodeId)
            .find(|n| Self::attached(&page, *n) && page.nodes[n.0].attrs.get("id").map(String::as_str) == Some(id))
    }

    fn query_all(&self, query: Query) -> Vec<NodeId> {
        self.query_all_within(&BODY, query)
    }

    fn query_all_within(&self, root: &NodeId, query: Query) -> Vec<NodeId> {
        let page = self.page.borrow();
        (0..page.nodes.len())
            .map(NodeId)
            .filter(|n| n != root && Self::attached(&page, *n) && Self::descends_from(&page, *n, *root))
            .filter(|n| Self::node_matches(&page, *n, query))
            .collect()
    }

    fn closest(&self, node: &NodeId, query: Query) -> Option<NodeId> {
        let page = self.page.borrow();
        let mut current = Some(*node);
        while let Some(id) = current {
            if Self::node_matches(&page, id, query) {
                return Some(id);
            }
            current = page.nodes[id.0].parent;
        }
        None
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        Self::descends_from(&self.page.borrow(), *node, *ancestor)
    }

    fn body(&self) -> Option<NodeId> {
        Some(BODY)
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.page.borrow().nodes[node.0].attrs.get(name).cloned()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.page.borrow_mut().nodes[node.0].attrs.insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&self, node: &NodeId, name: &str) {
        self.page.borrow_mut().nodes[node.0].attrs.remove(name);
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.page.borrow().nodes[node.0].classes.iter().any(|c| c == class)
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        if !self.has_class(node, class) {
            self.page.borrow_mut().nodes[node.0].classes.push(class.to_string());
        }
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        self.page.borrow_mut().nodes[node.0].classes.retain(|c| c != class);
    }

    fn text(&self, node: &NodeId) -> String {
        self.page.borrow().nodes[node.0].text.clone()
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        self.page.borrow_mut().nodes[node.0].text = text.to_string();
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        let mut page = self.page.borrow_mut();
        let style = &mut page.nodes[node.0].style;
        if value.is_empty() {
            style.remove(property);
        } else {
            style.insert(property.to_string(), value.to_string());
        }
    }

    fn create_element(&self, tag: &str) -> LandingResult<NodeId> {
        let mut page = self.page.borrow_mut();
        page.nodes.push(FakeNode { tag: tag.to_string(), ..Default::default() });
        Ok(NodeId(page.nodes.len() - 1))
    }

    fn append_to_body(&self, node: &NodeId) {
        self.page.borrow_mut().nodes[node.0].parent = Some(BODY);
    }

    fn remove(&self, node: &NodeId) {
        self.page.borrow_mut().nodes[node.0].parent = None;
    }

    fn scroll_y(&self) -> f64 {
        self.page.borrow().scroll_y
    }

    fn inner_width(&self) -> f64 {
        self.page.borrow().inner_width
    }

    fn offset_top(&self, node: &NodeId) -> f64 {
        self.page.borrow().nodes[node.0].offset_top
    }

    fn offset_height(&self, node: &NodeId) -> f64 {
        self.page.borrow().nodes[node.0].offset_height
    }

    fn in_viewport(&self, node: &NodeId) -> bool {
        self.page.borrow().nodes[node.0].in_viewport
    }

    fn smooth_scroll_to(&self, top: f64) {
        let mut page = self.page.borrow_mut();
        page.scroll_y = top;
        page.scrolls.push(top);
    }

    fn listen(&self, target: ListenTarget<'_, NodeId>, kind: EventKind, handler: Handler<NodeId>) {
        let key = match target {
            ListenTarget::Window => ListenKey::Window,
            ListenTarget::Document => ListenKey::Document,
            ListenTarget::Node(node) => ListenKey::Node(*node),
        };
        self.listeners.borrow_mut().push(Listener { key, kind, handler: Rc::new(RefCell::new(handler)) });
    }

    fn observe_intersection(
        &self,
        nodes: &[NodeId],
        threshold: Option<f64>,
        callback: ObserverCallback<NodeId>,
    ) -> LandingResult<()> {
        if !self.page.borrow().observers_supported {
            return Err(LandingError::Unsupported("IntersectionObserver"));
        }
        self.observers.borrow_mut().push(Observer {
            nodes: nodes.to_vec(),
            threshold,
            callback: Rc::new(RefCell::new(callback)),
        });
        Ok(())
    }

    fn request_frame(&self, callback: FrameCallback) {
        self.frames.borrow_mut().push_back(callback);
    }

    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) -> FakeTimer {
        let mut clock = self.clock.borrow_mut();
        let id = clock.next_id;
        clock.next_id += 1;
        let due = clock.now + u64::from(delay_ms);
        clock.pending.push((id, due, callback));
        FakeTimer { id, clock: Rc::downgrade(&self.clock) }
    }
}
