//! Delegated click routing.
//!
//! The host installs a single document-level click listener and hands every
//! click target to the page. Routes registered here map selectors to actions;
//! resolution walks from the target to the root, so actions come out in the
//! same order bubbling listeners would fire.

use tracing::trace;

use crate::dom::{Dom, Selector};

/// What a click on a routed element means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ChangeTheme,
    ToggleMenu,
    NavLink,
    FilterButton,
    ScrollTop,
    AnchorLink,
    GalleryItem,
    ModalClose,
    ModalBackdrop,
    PageLink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub selector: Selector,
    pub action: Action,
    /// Only fire when the click target itself matches, not a descendant
    pub target_only: bool,
}

#[derive(Debug, Default)]
pub struct ClickRouter {
    routes: Vec<Route>,
}

impl ClickRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, selector: Selector, action: Action) {
        self.routes.push(Route {
            selector,
            action,
            target_only: false,
        });
    }

    /// Route that ignores clicks bubbling up from descendants.
    pub fn register_target_only(&mut self, selector: Selector, action: Action) {
        self.routes.push(Route {
            selector,
            action,
            target_only: true,
        });
    }

    pub fn handles(&self, action: Action) -> bool {
        self.routes.iter().any(|r| r.action == action)
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Every (action, matched element) pair for a click on `target`, in
    /// bubble order. Routes on the same element keep registration order.
    pub fn resolve<D: Dom>(&self, dom: &D, target: &D::Node) -> Vec<(Action, D::Node)> {
        let mut hits = Vec::new();
        let mut current = Some(target.clone());
        while let Some(node) = current {
            let is_target = node == *target;
            for route in &self.routes {
                if (is_target || !route.target_only) && dom.matches(&node, route.selector) {
                    hits.push((route.action, node.clone()));
                }
            }
            current = dom.parent(&node);
        }
        trace!(hits = hits.len(), "click resolved");
        hits
    }
}

/// What the host should do with the native click event afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClickOutcome {
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}
