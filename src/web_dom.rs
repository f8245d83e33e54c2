//! Browser DOM
//!
//! `Dom` over `web-sys`. Listener and observer closures are leaked with
//! `forget()`: they live as long as the page.

use gloo_timers::callback::Timeout;
use landing_core::dom::{
    Dom, DomEvent, EventFlow, EventKind, FrameCallback, Handler, ListenTarget, ObserverCallback, Query,
    TimerCallback, Watch,
};
use landing_core::{LandingError, LandingResult};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, EventTarget, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, ScrollToOptions, Window,
};

pub struct WebDom {
    window: Window,
    document: Document,
}

impl WebDom {
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn collect(list: Result<web_sys::NodeList, JsValue>) -> Vec<Element> {
        let Ok(list) = list else { return Vec::new() };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn viewport_size(&self) -> (f64, f64) {
        let root = self.document.document_element();
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .filter(|h| *h > 0.0)
            .or_else(|| root.as_ref().map(|r| f64::from(r.client_height())))
            .unwrap_or(0.0);
        let width = self
            .window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .filter(|w| *w > 0.0)
            .or_else(|| root.as_ref().map(|r| f64::from(r.client_width())))
            .unwrap_or(0.0);
        (width, height)
    }
}

fn describe(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

impl Dom for WebDom {
    type Node = Element;
    type Timer = Timeout;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_all(&self, query: Query) -> Vec<Element> {
        Self::collect(self.document.query_selector_all(&query.to_css()))
    }

    fn query_all_within(&self, root: &Element, query: Query) -> Vec<Element> {
        Self::collect(root.query_selector_all(&query.to_css()))
    }

    fn closest(&self, node: &Element, query: Query) -> Option<Element> {
        node.closest(&query.to_css()).ok().flatten()
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        let node: &web_sys::Node = node.as_ref();
        ancestor.contains(Some(node))
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        if let Err(err) = node.set_attribute(name, value) {
            tracing::warn!("set_attribute {}: {}", name, describe(err));
        }
    }

    fn remove_attribute(&self, node: &Element, name: &str) {
        let _ = node.remove_attribute(name);
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn remove_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().remove_1(class);
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        let Some(element) = node.dyn_ref::<HtmlElement>() else { return };
        let style = element.style();
        let result = if value.is_empty() {
            style.remove_property(property).map(|_| ())
        } else {
            style.set_property(property, value)
        };
        if let Err(err) = result {
            tracing::warn!("style {}: {}", property, describe(err));
        }
    }

    fn create_element(&self, tag: &str) -> LandingResult<Element> {
        self.document.create_element(tag).map_err(|e| LandingError::Host(describe(e)))
    }

    fn append_to_body(&self, node: &Element) {
        if let Some(body) = self.document.body() {
            let _ = body.append_child(node);
        }
    }

    fn remove(&self, node: &Element) {
        node.remove();
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn inner_width(&self) -> f64 {
        self.viewport_size().0
    }

    fn offset_top(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>().map_or(0.0, |e| f64::from(e.offset_top()))
    }

    fn offset_height(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>().map_or(0.0, |e| f64::from(e.offset_height()))
    }

    fn in_viewport(&self, node: &Element) -> bool {
        let rect = node.get_bounding_client_rect();
        let (width, height) = self.viewport_size();
        rect.top() >= 0.0 && rect.left() >= 0.0 && rect.bottom() <= height && rect.right() <= width
    }

    fn smooth_scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(web_sys::ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn listen(&self, target: ListenTarget<'_, Element>, kind: EventKind, mut handler: Handler<Element>) {
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
            let event = DomEvent {
                target: ev.target().and_then(|t| t.dyn_into::<Element>().ok()),
                key: ev.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key),
            };
            if handler(&event) == EventFlow::PreventDefault {
                ev.prevent_default();
            }
        });

        let target: &EventTarget = match target {
            ListenTarget::Window => self.window.as_ref(),
            ListenTarget::Document => self.document.as_ref(),
            ListenTarget::Node(node) => node.as_ref(),
        };
        if let Err(err) = target.add_event_listener_with_callback(kind.as_str(), callback.as_ref().unchecked_ref()) {
            tracing::warn!("listen {}: {}", kind.as_str(), describe(err));
        }
        callback.forget();
    }

    fn observe_intersection(
        &self,
        nodes: &[Element],
        threshold: Option<f64>,
        mut callback: ObserverCallback<Element>,
    ) -> LandingResult<()> {
        let supported = js_sys::Reflect::has(self.window.as_ref(), &JsValue::from_str("IntersectionObserver"))
            .unwrap_or(false);
        if !supported {
            return Err(LandingError::Unsupported("IntersectionObserver"));
        }

        let on_intersect = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else { continue };
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target = entry.target();
                    if callback(&target) == Watch::Stop {
                        observer.unobserve(&target);
                    }
                }
            },
        );

        let options = IntersectionObserverInit::new();
        if let Some(threshold) = threshold {
            options.set_threshold(&JsValue::from_f64(threshold));
        }
        let observer = IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &options)
            .map_err(|e| LandingError::Host(describe(e)))?;
        on_intersect.forget();

        for node in nodes {
            observer.observe(node);
        }
        Ok(())
    }

    fn request_frame(&self, callback: FrameCallback) {
        let frame = Closure::once_into_js(move || callback());
        if let Err(err) = self.window.request_animation_frame(frame.unchecked_ref()) {
            tracing::warn!("request_animation_frame: {}", describe(err));
        }
    }

    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) -> Timeout {
        Timeout::new(delay_ms, callback)
    }
}
