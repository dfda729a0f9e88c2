//! Host document capabilities.
//!
//! Every behavior in this crate reaches the page through these two traits.
//! The browser binding implements them over `web-sys`; [`MemoryDocument`]
//! implements them in memory for tests and headless use.
//!
//! All operations take `&self`: the browser DOM is interior-mutable, and the
//! in-memory document mirrors that.

mod memory;
mod selector;

use std::fmt;
use std::time::Duration;

pub use memory::{ElementBuilder, MemoryDocument, NodeId, ScrollRequest};
pub use selector::{Matchable, Selector};

/// How a scroll request should move the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

impl ScrollBehavior {
    pub fn from_smooth(smooth: bool) -> Self {
        if smooth {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Instant
        }
    }
}

/// Document tree access.
pub trait Dom {
    /// Handle to an element. Cheap to clone, compared by identity.
    type Node: Clone + PartialEq + fmt::Debug;

    /// The document element (`<html>`).
    fn root(&self) -> Self::Node;
    fn head(&self) -> Option<Self::Node>;
    fn body(&self) -> Option<Self::Node>;

    /// All matching elements in document order.
    fn query_all(&self, selector: Selector) -> Vec<Self::Node>;

    /// All matching descendants of `scope` in document order.
    fn query_within(&self, scope: &Self::Node, selector: Selector) -> Vec<Self::Node>;

    fn query_first(&self, selector: Selector) -> Option<Self::Node> {
        self.query_all(selector).into_iter().next()
    }

    fn query_first_within(&self, scope: &Self::Node, selector: Selector) -> Option<Self::Node> {
        self.query_within(scope, selector).into_iter().next()
    }

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn matches(&self, node: &Self::Node, selector: Selector) -> bool;

    /// Nearest inclusive ancestor matching `selector`.
    fn closest(&self, node: &Self::Node, selector: Selector) -> Option<Self::Node> {
        let mut current = Some(node.clone());
        while let Some(candidate) = current {
            if self.matches(&candidate, selector) {
                return Some(candidate);
            }
            current = self.parent(&candidate);
        }
        None
    }

    /// Inclusive containment, like `Node.contains`.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool {
        let mut current = Some(node.clone());
        while let Some(candidate) = current {
            if candidate == *ancestor {
                return true;
            }
            current = self.parent(&candidate);
        }
        false
    }

    fn attr(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attr(&self, node: &Self::Node, name: &str, value: &str);

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);

    /// Flip `class`, returning whether it is now present.
    fn toggle_class(&self, node: &Self::Node, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    /// Inline style property, `None` when unset.
    fn style(&self, node: &Self::Node, property: &str) -> Option<String>;
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);

    /// Concatenated text of the subtree (`textContent`).
    fn text(&self, node: &Self::Node) -> String;
    fn set_text(&self, node: &Self::Node, text: &str);

    fn create_element(&self, tag: &str) -> Self::Node;
    fn append_child(&self, parent: &Self::Node, child: &Self::Node);

    /// Detach `node` from the document. No-op when already detached.
    fn remove(&self, node: &Self::Node);
    fn is_connected(&self, node: &Self::Node) -> bool;

    /// Address a link points at, resolved against the document when the host
    /// can do so.
    fn resolved_href(&self, node: &Self::Node) -> Option<String> {
        self.attr(node, "href")
    }

    fn scroll_into_view(&self, node: &Self::Node, behavior: ScrollBehavior);
}

/// Window-level capabilities: geometry, scrolling, navigation and time.
pub trait Viewport {
    /// Layout viewport width in CSS pixels.
    fn width(&self) -> f64;

    /// Vertical scroll offset in CSS pixels.
    fn scroll_y(&self) -> f64;

    fn scroll_to_top(&self, behavior: ScrollBehavior);

    fn navigate(&self, href: &str);

    /// Monotonic time since page load.
    fn now(&self) -> Duration;
}

/// A complete page host.
pub trait Host: Dom + Viewport {}

impl<T: Dom + Viewport + ?Sized> Host for T {}
