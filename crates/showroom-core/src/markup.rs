//! Markup contract: the selectors, classes and attributes the page provides
//! and the ones this crate writes back.

use crate::dom::Selector;

// === THEME ===
pub const THEME_ATTR: &str = "data-theme";
pub const THEME_BUTTON: Selector =
    Selector::All(&[Selector::Class("theme-btn"), Selector::HasAttr(THEME_ATTR)]);

// === NAVIGATION ===
pub const MENU_TOGGLE: Selector = Selector::Class("menu-toggle");
pub const NAV: Selector = Selector::Tag("nav");
pub const LINK: Selector = Selector::Tag("a");

// === REVEAL ===
pub const CARD: Selector = Selector::Class("card");
pub const TIMELINE_ITEM: Selector = Selector::Class("timeline-item");
pub const GALLERY_ITEM: Selector = Selector::Class("gallery-item");
pub const IMAGE: Selector = Selector::Tag("img");
pub const LAZY_IMAGE: Selector =
    Selector::All(&[Selector::Tag("img"), Selector::HasAttr(DEFERRED_SRC_ATTR)]);
pub const DEFERRED_SRC_ATTR: &str = "data-src";

// === SEARCH / FILTER ===
pub const SEARCH_INPUT: Selector = Selector::Class("search-input");
pub const CATEGORY_ATTR: &str = "data-category";
pub const FILTERABLE: Selector = Selector::HasAttr(CATEGORY_ATTR);
pub const CARD_TITLE: Selector = Selector::Tag("h3");
pub const CARD_BODY: Selector = Selector::Tag("p");
pub const FILTER_ATTR: &str = "data-filter";
pub const FILTER_BUTTON: Selector =
    Selector::All(&[Selector::Class("filter-btn"), Selector::HasAttr(FILTER_ATTR)]);
pub const FILTER_GROUP: Selector = Selector::Class("filter-buttons");
pub const CARD_GRID: Selector = Selector::Class("card-grid");
pub const SECTION: Selector = Selector::Tag("section");

// === SCROLL ===
pub const SCROLL_TOP: Selector = Selector::Class("scroll-top");
pub const PARALLAX: Selector = Selector::Class("parallax");
pub const ANCHOR_LINK: Selector =
    Selector::All(&[Selector::Tag("a"), Selector::AttrPrefix("href", "#")]);

// === GALLERY MODAL ===
pub const MODAL_CLASS: &str = "gallery-modal";
pub const MODAL: Selector = Selector::Class(MODAL_CLASS);
pub const MODAL_IMAGE_CLASS: &str = "modal-image";
pub const MODAL_CLOSE_CLASS: &str = "modal-close";
pub const MODAL_CLOSE: Selector = Selector::Class(MODAL_CLOSE_CLASS);

// === PAGE TRANSITION ===
pub const PAGE_LINK: Selector =
    Selector::All(&[Selector::Tag("a"), Selector::AttrPrefix("href", "./")]);
pub const TRANSITION_CLASS: &str = "page-transition";

// === SETTINGS ===
/// Optional `<script type="application/json">` holding settings overrides
pub const SETTINGS_ID: &str = "showroom-settings";

// === SHARED STATE CLASSES ===
pub const ACTIVE_CLASS: &str = "active";
pub const VISIBLE_CLASS: &str = "visible";
pub const LOADED_CLASS: &str = "loaded";
