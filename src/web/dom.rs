//! Host traits over the live document.

use std::time::Duration;

use anyhow::{anyhow, Result};
use showroom_core::dom::{Dom, ScrollBehavior, Selector, Viewport};
use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue, UnwrapThrowExt};
use web_sys::{
    Document, Element, HtmlAnchorElement, HtmlElement, NodeList, ScrollIntoViewOptions,
    ScrollLogicalPosition, ScrollToOptions, Window,
};

/// The browser window and its document.
pub struct BrowserHost {
    window: Window,
    document: Document,
    root: Element,
}

impl BrowserHost {
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| anyhow!("no window"))?;
        let document = window.document().ok_or_else(|| anyhow!("window has no document"))?;
        let root = document
            .document_element()
            .ok_or_else(|| anyhow!("document has no root element"))?;
        Ok(Self {
            window,
            document,
            root,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

fn elements(list: Result<NodeList, JsValue>, selector: Selector) -> Vec<Element> {
    let list = match list {
        Ok(list) => list,
        Err(e) => {
            warn!(%selector, error = ?e, "selector query failed");
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn scroll_behavior(behavior: ScrollBehavior) -> web_sys::ScrollBehavior {
    match behavior {
        ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
    }
}

fn report(operation: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        warn!(operation, error = ?e, "dom operation failed");
    }
}

impl Dom for BrowserHost {
    type Node = Element;

    fn root(&self) -> Element {
        self.root.clone()
    }

    fn head(&self) -> Option<Element> {
        self.document.head().map(Element::from)
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn query_all(&self, selector: Selector) -> Vec<Element> {
        elements(self.document.query_selector_all(&selector.to_string()), selector)
    }

    fn query_within(&self, scope: &Element, selector: Selector) -> Vec<Element> {
        elements(scope.query_selector_all(&selector.to_string()), selector)
    }

    fn query_first(&self, selector: Selector) -> Option<Element> {
        self.document
            .query_selector(&selector.to_string())
            .ok()
            .flatten()
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn matches(&self, node: &Element, selector: Selector) -> bool {
        node.matches(&selector.to_string()).unwrap_or(false)
    }

    fn closest(&self, node: &Element, selector: Selector) -> Option<Element> {
        node.closest(&selector.to_string()).ok().flatten()
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        ancestor.contains(Some(node.as_ref()))
    }

    fn attr(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attr(&self, node: &Element, name: &str, value: &str) {
        report("set_attribute", node.set_attribute(name, value));
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        report("class_list.add", node.class_list().add_1(class));
    }

    fn remove_class(&self, node: &Element, class: &str) {
        report("class_list.remove", node.class_list().remove_1(class));
    }

    fn toggle_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().toggle(class).unwrap_or(false)
    }

    fn style(&self, node: &Element, property: &str) -> Option<String> {
        node.dyn_ref::<HtmlElement>()?
            .style()
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        let Some(element) = node.dyn_ref::<HtmlElement>() else {
            debug!(property, "inline style on a non-HTML element skipped");
            return;
        };
        let style = element.style();
        if value.is_empty() {
            report("style.remove_property", style.remove_property(property).map(drop));
        } else {
            report("style.set_property", style.set_property(property, value));
        }
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn create_element(&self, tag: &str) -> Element {
        // Only ever called with literal tag names
        self.document.create_element(tag).unwrap_throw()
    }

    fn append_child(&self, parent: &Element, child: &Element) {
        report("append_child", parent.append_child(child).map(drop));
    }

    fn remove(&self, node: &Element) {
        node.remove();
    }

    fn is_connected(&self, node: &Element) -> bool {
        node.is_connected()
    }

    fn resolved_href(&self, node: &Element) -> Option<String> {
        match node.dyn_ref::<HtmlAnchorElement>() {
            Some(anchor) => Some(anchor.href()),
            None => node.get_attribute("href"),
        }
    }

    fn scroll_into_view(&self, node: &Element, behavior: ScrollBehavior) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(scroll_behavior(behavior));
        options.set_block(ScrollLogicalPosition::Start);
        node.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

impl Viewport for BrowserHost {
    fn width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or_default()
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or_default()
    }

    fn scroll_to_top(&self, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(scroll_behavior(behavior));
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn navigate(&self, href: &str) {
        report("location.set_href", self.window.location().set_href(href));
    }

    fn now(&self) -> Duration {
        let millis = self
            .window
            .performance()
            .map(|performance| performance.now())
            .unwrap_or_default();
        Duration::from_secs_f64(millis.max(0.0) / 1000.0)
    }
}
