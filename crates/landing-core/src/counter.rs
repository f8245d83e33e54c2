//! Counter Animation
//!
//! Hero stats count up from zero the first time they scroll into view.
//! Each element is animated at most once; the animator owns that flag.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::CounterConfig;
use crate::dom::{attrs, Dom, Query, Watch};
use crate::error::{LandingError, LandingResult};

struct Counter<N> {
    node: N,
    target: i64,
    prefix: String,
    animated: Cell<bool>,
}

impl<N> Counter<N> {
    fn label(&self, value: i64) -> String {
        format!("{}{}", self.prefix, value)
    }
}

pub struct CounterAnimator<D: Dom> {
    dom: Rc<D>,
    counters: Vec<Rc<Counter<D::Node>>>,
    steps: f64,
}

impl<D: Dom> CounterAnimator<D> {
    /// Resets every `[data-count]` element to `prefix + "0"` and waits for it
    /// to become visible. Returns `None` when the page has no counters.
    pub fn attach(dom: &Rc<D>, config: &CounterConfig) -> Option<Rc<Self>> {
        let nodes = dom.query_all(Query::Attr(attrs::COUNT));
        if nodes.is_empty() {
            return None;
        }

        let mut counters = Vec::with_capacity(nodes.len());
        for node in nodes {
            let raw = dom.attribute(&node, attrs::COUNT).unwrap_or_default();
            let target = match parse_count(&raw) {
                Ok(target) => target,
                Err(err) => {
                    tracing::warn!("skipping counter: {}", err);
                    continue;
                }
            };
            let prefix = dom.attribute(&node, attrs::PREFIX).unwrap_or_default();
            let counter = Counter { node, target, prefix, animated: Cell::new(false) };
            dom.set_text(&counter.node, &counter.label(0));
            counters.push(Rc::new(counter));
        }

        let animator = Rc::new(Self { dom: dom.clone(), counters, steps: config.steps() });
        let watched: Vec<D::Node> = animator.counters.iter().map(|c| c.node.clone()).collect();

        let this = animator.clone();
        let observed = dom.observe_intersection(
            &watched,
            Some(config.visibility_threshold),
            Box::new(move |node: &D::Node| {
                this.start(node);
                Watch::Stop
            }),
        );
        if let Err(err) = observed {
            tracing::debug!("{}; animating counters immediately", err);
            for node in &watched {
                animator.start(node);
            }
        }

        tracing::debug!("counters attached: {}", animator.counters.len());
        Some(animator)
    }

    /// Begin animating `node` unless it already ran
    pub fn start(&self, node: &D::Node) {
        let Some(counter) = self.counters.iter().find(|c| &c.node == node) else { return };
        if counter.animated.replace(true) {
            return;
        }
        let increment = counter.target as f64 / self.steps;
        step(self.dom.clone(), counter.clone(), increment, 0.0);
    }

    pub fn is_animated(&self, node: &D::Node) -> bool {
        self.counters.iter().any(|c| &c.node == node && c.animated.get())
    }
}

/// Advance one frame and schedule the next until the target is reached
fn step<D: Dom>(dom: Rc<D>, counter: Rc<Counter<D::Node>>, increment: f64, current: f64) {
    let current = current + increment;
    if current < counter.target as f64 {
        dom.set_text(&counter.node, &counter.label(current.floor() as i64));
        let next = dom.clone();
        dom.request_frame(Box::new(move || step(next, counter, increment, current)));
    } else {
        dom.set_text(&counter.node, &counter.label(counter.target));
    }
}

/// Leading integer of `raw`, the way `parseInt` reads it ("150+" is 150)
pub fn parse_count(raw: &str) -> LandingResult<i64> {
    let trimmed = raw.trim_start();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    rest[..digits]
        .parse::<i64>()
        .map(|n| sign * n)
        .map_err(|_| LandingError::InvalidCount { value: raw.to_string() })
}
