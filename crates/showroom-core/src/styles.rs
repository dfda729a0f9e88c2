//! Styles emitted by the page layer.
//!
//! Keyframes go into `head` once; everything else is inline on elements this
//! crate creates.

use tracing::debug;

use crate::dom::{Dom, Selector};

/// Marker attribute on the injected `<style>` element.
pub const KEYFRAMES_MARKER: &str = "data-showroom-keyframes";

pub const FADE_IN: &str = "showroom-fade-in";
pub const FADE_OUT: &str = "showroom-fade-out";
pub const ZOOM_IN: &str = "showroom-zoom-in";

pub const KEYFRAMES_CSS: &str = r#"
@keyframes showroom-fade-in {
    from { opacity: 0; }
    to { opacity: 1; }
}
@keyframes showroom-fade-out {
    from { opacity: 1; }
    to { opacity: 0; }
}
@keyframes showroom-zoom-in {
    from { opacity: 0; transform: scale(0.8); }
    to { opacity: 1; transform: scale(1); }
}
"#;

// === GALLERY MODAL ===
pub const MODAL_OVERLAY: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("inset", "0"),
    ("z-index", "10000"),
    ("display", "flex"),
    ("align-items", "center"),
    ("justify-content", "center"),
    ("background", "rgba(0, 0, 0, 0.9)"),
    ("backdrop-filter", "blur(10px)"),
    ("cursor", "pointer"),
    ("animation", "showroom-fade-in 0.3s ease"),
];

pub const MODAL_IMAGE: &[(&str, &str)] = &[
    ("max-width", "90%"),
    ("max-height", "90%"),
    ("object-fit", "contain"),
    ("border-radius", "8px"),
    ("cursor", "default"),
    ("animation", "showroom-zoom-in 0.3s ease"),
];

pub const MODAL_CLOSE: &[(&str, &str)] = &[
    ("position", "absolute"),
    ("top", "20px"),
    ("right", "30px"),
    ("font-size", "40px"),
    ("color", CLOSE_COLOR),
    ("cursor", "pointer"),
    ("transition", "color 0.3s ease, transform 0.3s ease"),
];

pub const MODAL_EXIT_ANIMATION: &str = "showroom-fade-out 0.3s ease forwards";

pub const CLOSE_COLOR: &str = "#f5f5f5";
pub const CLOSE_HOVER_COLOR: &str = "#d4af37";

// === PAGE TRANSITION ===
pub const TRANSITION_OVERLAY: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("inset", "0"),
    ("z-index", "10001"),
    ("background", "var(--bg-primary, #0a0a0a)"),
    ("pointer-events", "none"),
    ("animation", "showroom-fade-in 0.25s ease forwards"),
];

/// Apply a list of inline declarations.
pub fn apply<D: Dom>(dom: &D, node: &D::Node, declarations: &[(&str, &str)]) {
    for (property, value) in declarations {
        dom.set_style(node, property, value);
    }
}

/// Add the keyframes block to `head` unless a previous call already did.
///
/// Returns whether a block was inserted.
pub fn inject_keyframes<D: Dom>(dom: &D) -> bool {
    if dom.query_first(Selector::HasAttr(KEYFRAMES_MARKER)).is_some() {
        return false;
    }
    let Some(head) = dom.head() else {
        debug!("document has no head, keyframes not injected");
        return false;
    };

    let style = dom.create_element("style");
    dom.set_attr(&style, KEYFRAMES_MARKER, "");
    dom.set_text(&style, KEYFRAMES_CSS);
    dom.append_child(&head, &style);
    true
}
