//! In-memory document.
//!
//! A small arena-backed element tree with just enough behavior to stand in for
//! the browser: classes, attributes, inline styles, text, a scrollable window,
//! a navigation log and a manually advanced clock.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::time::Duration;

use super::{Dom, Matchable, ScrollBehavior, Selector, Viewport};

/// Handle to an element in a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

const ROOT: NodeId = NodeId(0);
const HEAD: NodeId = NodeId(1);
const BODY: NodeId = NodeId(2);

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl NodeData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }
}

impl Matchable for NodeData {
    fn tag_name(&self) -> &str {
        &self.tag
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// A recorded scroll request. `target` is `None` for scroll-to-top.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollRequest {
    pub target: Option<NodeId>,
    pub behavior: ScrollBehavior,
}

#[derive(Debug)]
struct WindowState {
    width: f64,
    scroll_y: f64,
    now: Duration,
    scrolls: Vec<ScrollRequest>,
    navigations: Vec<String>,
}

/// In-memory [`Dom`] + [`Viewport`] implementation.
///
/// # Example
///
/// ```
/// use showroom_core::dom::{Dom, MemoryDocument};
///
/// let doc = MemoryDocument::new(1280.0);
/// let card = doc
///     .element("div")
///     .class("card")
///     .attr("data-category", "suv")
///     .append_to(doc.body_id());
/// assert!(doc.has_class(&card, "card"));
/// ```
#[derive(Debug)]
pub struct MemoryDocument {
    nodes: RefCell<Vec<NodeData>>,
    window: RefCell<WindowState>,
}

impl MemoryDocument {
    /// Create an empty `html > (head, body)` document with the given viewport
    /// width.
    pub fn new(width: f64) -> Self {
        let mut root = NodeData::new("html");
        root.children = vec![HEAD, BODY];
        let mut head = NodeData::new("head");
        head.parent = Some(ROOT);
        let mut body = NodeData::new("body");
        body.parent = Some(ROOT);

        Self {
            nodes: RefCell::new(vec![root, head, body]),
            window: RefCell::new(WindowState {
                width,
                scroll_y: 0.0,
                now: Duration::ZERO,
                scrolls: Vec::new(),
                navigations: Vec::new(),
            }),
        }
    }

    pub fn head_id(&self) -> NodeId {
        HEAD
    }

    pub fn body_id(&self) -> NodeId {
        BODY
    }

    /// Start building a detached element.
    pub fn element(&self, tag: &str) -> ElementBuilder<'_> {
        let node = self.create_element(tag);
        ElementBuilder { doc: self, node }
    }

    pub fn tag(&self, node: &NodeId) -> String {
        self.nodes.borrow()[node.0].tag.clone()
    }

    pub fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.nodes.borrow()[node.0].children.clone()
    }

    pub fn set_width(&self, width: f64) {
        self.window.borrow_mut().width = width;
    }

    pub fn set_scroll_y(&self, offset: f64) {
        self.window.borrow_mut().scroll_y = offset;
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        self.window.borrow_mut().now += by;
    }

    pub fn scroll_requests(&self) -> Vec<ScrollRequest> {
        self.window.borrow().scrolls.clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.window.borrow().navigations.clone()
    }

    fn collect(&self, from: NodeId, include_self: bool, selector: Selector, out: &mut Vec<NodeId>) {
        let nodes = self.nodes.borrow();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            let data = &nodes[id.0];
            if (include_self || id != from) && selector.matches(data) {
                out.push(id);
            }
            // Reverse so the leftmost child is visited first
            stack.extend(data.children.iter().rev().copied());
        }
    }
}

impl Dom for MemoryDocument {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        ROOT
    }

    fn head(&self) -> Option<NodeId> {
        Some(HEAD)
    }

    fn body(&self) -> Option<NodeId> {
        Some(BODY)
    }

    fn query_all(&self, selector: Selector) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect(ROOT, true, selector, &mut out);
        out
    }

    fn query_within(&self, scope: &NodeId, selector: Selector) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect(*scope, false, selector, &mut out);
        out
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let nodes = self.nodes.borrow();
        let mut stack = vec![ROOT];
        while let Some(node) = stack.pop() {
            let data = &nodes[node.0];
            if data.attribute("id") == Some(id) {
                return Some(node);
            }
            stack.extend(data.children.iter().rev().copied());
        }
        None
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes.borrow()[node.0].parent
    }

    fn matches(&self, node: &NodeId, selector: Selector) -> bool {
        selector.matches(&self.nodes.borrow()[node.0])
    }

    fn attr(&self, node: &NodeId, name: &str) -> Option<String> {
        let nodes = self.nodes.borrow();
        let data = &nodes[node.0];
        if name == "class" {
            return (!data.classes.is_empty()).then(|| data.classes.join(" "));
        }
        data.attrs.get(name).cloned()
    }

    fn set_attr(&self, node: &NodeId, name: &str, value: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let data = &mut nodes[node.0];
        if name == "class" {
            data.classes = value.split_whitespace().map(str::to_string).collect();
        } else {
            data.attrs.insert(name.to_string(), value.to_string());
        }
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.nodes.borrow()[node.0].has_class(class)
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let classes = &mut nodes[node.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        self.nodes.borrow_mut()[node.0].classes.retain(|c| c != class);
    }

    fn style(&self, node: &NodeId, property: &str) -> Option<String> {
        self.nodes.borrow()[node.0].style.get(property).cloned()
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let style = &mut nodes[node.0].style;
        if value.is_empty() {
            style.remove(property);
        } else {
            style.insert(property.to_string(), value.to_string());
        }
    }

    fn text(&self, node: &NodeId) -> String {
        let nodes = self.nodes.borrow();
        let mut out = String::new();
        let mut stack = vec![*node];
        while let Some(id) = stack.pop() {
            let data = &nodes[id.0];
            out.push_str(&data.text);
            stack.extend(data.children.iter().rev().copied());
        }
        out
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        self.nodes.borrow_mut()[node.0].text = text.to_string();
    }

    fn create_element(&self, tag: &str) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(NodeData::new(tag));
        NodeId(nodes.len() - 1)
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        self.remove(child);
        let mut nodes = self.nodes.borrow_mut();
        nodes[child.0].parent = Some(*parent);
        nodes[parent.0].children.push(*child);
    }

    fn remove(&self, node: &NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(parent) = nodes[node.0].parent.take() {
            nodes[parent.0].children.retain(|c| c != node);
        }
    }

    fn is_connected(&self, node: &NodeId) -> bool {
        let nodes = self.nodes.borrow();
        let mut current = Some(*node);
        while let Some(id) = current {
            if id == ROOT {
                return true;
            }
            current = nodes[id.0].parent;
        }
        false
    }

    fn scroll_into_view(&self, node: &NodeId, behavior: ScrollBehavior) {
        self.window.borrow_mut().scrolls.push(ScrollRequest {
            target: Some(*node),
            behavior,
        });
    }
}

impl Viewport for MemoryDocument {
    fn width(&self) -> f64 {
        self.window.borrow().width
    }

    fn scroll_y(&self) -> f64 {
        self.window.borrow().scroll_y
    }

    fn scroll_to_top(&self, behavior: ScrollBehavior) {
        let mut window = self.window.borrow_mut();
        window.scroll_y = 0.0;
        window.scrolls.push(ScrollRequest {
            target: None,
            behavior,
        });
    }

    fn navigate(&self, href: &str) {
        self.window.borrow_mut().navigations.push(href.to_string());
    }

    fn now(&self) -> Duration {
        self.window.borrow().now
    }
}

/// Fluent construction of test markup.
pub struct ElementBuilder<'a> {
    doc: &'a MemoryDocument,
    node: NodeId,
}

impl ElementBuilder<'_> {
    /// Add one or more whitespace-separated classes.
    pub fn class(self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            self.doc.add_class(&self.node, class);
        }
        self
    }

    pub fn attr(self, name: &str, value: &str) -> Self {
        self.doc.set_attr(&self.node, name, value);
        self
    }

    pub fn text(self, text: &str) -> Self {
        self.doc.set_text(&self.node, text);
        self
    }

    pub fn append_to(self, parent: NodeId) -> NodeId {
        self.doc.append_child(&parent, &self.node);
        self.node
    }

    /// Finish without attaching.
    pub fn detached(self) -> NodeId {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_document_order() {
        let doc = MemoryDocument::new(1024.0);
        let section = doc.element("section").append_to(doc.body_id());
        let first = doc.element("div").class("card").append_to(section);
        let nested = doc.element("div").class("card").append_to(first);
        let second = doc.element("div").class("card").append_to(doc.body_id());

        assert_eq!(
            doc.query_all(Selector::Class("card")),
            vec![first, nested, second]
        );
        assert_eq!(doc.query_within(&first, Selector::Class("card")), vec![nested]);
    }

    #[test]
    fn text_concatenates_subtree() {
        let doc = MemoryDocument::new(1024.0);
        let card = doc.element("div").append_to(doc.body_id());
        doc.element("h3").text("Roadster").append_to(card);
        doc.element("p").text(" two seats").append_to(card);

        assert_eq!(doc.text(&card), "Roadster two seats");
    }

    #[test]
    fn remove_detaches() {
        let doc = MemoryDocument::new(1024.0);
        let wrapper = doc.element("div").append_to(doc.body_id());
        let inner = doc.element("img").append_to(wrapper);
        assert!(doc.is_connected(&inner));

        doc.remove(&wrapper);
        assert!(!doc.is_connected(&inner));
        assert!(doc.children(&doc.body_id()).is_empty());

        // Second removal is harmless
        doc.remove(&wrapper);
    }

    #[test]
    fn closest_and_contains() {
        let doc = MemoryDocument::new(1024.0);
        let nav = doc.element("nav").append_to(doc.body_id());
        let link = doc.element("a").attr("href", "#top").append_to(nav);

        assert_eq!(doc.closest(&link, Selector::Tag("nav")), Some(nav));
        assert!(doc.contains(&nav, &link));
        assert!(doc.contains(&nav, &nav));
        assert!(!doc.contains(&link, &nav));
    }

    #[test]
    fn class_attribute_round_trips() {
        let doc = MemoryDocument::new(1024.0);
        let el = doc.element("div").class("a b").detached();
        assert_eq!(doc.attr(&el, "class").as_deref(), Some("a b"));

        doc.set_attr(&el, "class", "c");
        assert!(doc.has_class(&el, "c"));
        assert!(!doc.has_class(&el, "a"));
    }

    #[test]
    fn clock_and_scroll_log() {
        let doc = MemoryDocument::new(1024.0);
        doc.set_scroll_y(500.0);
        doc.advance(Duration::from_millis(40));
        doc.scroll_to_top(ScrollBehavior::Smooth);

        assert_eq!(doc.now(), Duration::from_millis(40));
        assert_eq!(doc.scroll_y(), 0.0);
        assert_eq!(
            doc.scroll_requests(),
            vec![ScrollRequest {
                target: None,
                behavior: ScrollBehavior::Smooth
            }]
        );
    }
}
