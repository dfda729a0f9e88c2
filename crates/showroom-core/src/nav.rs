//! Collapsible mobile navigation.

use std::fmt;

use tracing::debug;

use crate::dom::Dom;
use crate::markup::{ACTIVE_CLASS, MENU_TOGGLE, NAV};

pub struct NavigationController<N> {
    toggle: N,
    nav: N,
}

impl<N: Clone + PartialEq + fmt::Debug> NavigationController<N> {
    /// Needs both the toggle and the `nav` container; `None` otherwise.
    pub fn install<D: Dom<Node = N>>(dom: &D) -> Option<Self> {
        let (Some(toggle), Some(nav)) = (dom.query_first(MENU_TOGGLE), dom.query_first(NAV)) else {
            debug!("menu toggle or nav missing, navigation disabled");
            return None;
        };
        Some(Self { toggle, nav })
    }

    pub fn toggle_control(&self) -> &N {
        &self.toggle
    }

    pub fn container(&self) -> &N {
        &self.nav
    }

    pub fn is_open<D: Dom<Node = N>>(&self, dom: &D) -> bool {
        dom.has_class(&self.nav, ACTIVE_CLASS)
    }

    /// Flip the menu. Returns whether it is now open.
    pub fn toggle<D: Dom<Node = N>>(&self, dom: &D) -> bool {
        dom.toggle_class(&self.nav, ACTIVE_CLASS)
    }

    pub fn close<D: Dom<Node = N>>(&self, dom: &D) {
        dom.remove_class(&self.nav, ACTIVE_CLASS);
    }

    /// Whether `node` sits inside the navigation container.
    pub fn contains<D: Dom<Node = N>>(&self, dom: &D, node: &N) -> bool {
        dom.contains(&self.nav, node)
    }

    /// Document-level click: close unless the click landed in the menu or on
    /// the toggle.
    pub fn on_document_click<D: Dom<Node = N>>(&self, dom: &D, target: &N) {
        if dom.contains(&self.nav, target) || dom.contains(&self.toggle, target) {
            return;
        }
        self.close(dom);
    }
}
