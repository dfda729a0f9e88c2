//! Edge case and boundary condition tests
//!
//! Pages with missing markup, unusable storage and odd attribute values must
//! still start and stay quiet.

use std::rc::Rc;
use std::time::Duration;

use showroom_core::dom::{Dom, MemoryDocument, Selector};
use showroom_core::markup::{ACTIVE_CLASS, FILTER_ATTR, MODAL, THEME_ATTR};
use showroom_core::search::is_shown;
use showroom_core::storage::THEME_KEY;
use showroom_core::{
    MemoryStore, ObserverKind, Page, PageSettings, PreferenceStore, ShowroomError, Theme,
};

// ============================================================================
// Missing Markup
// ============================================================================

#[test]
fn test_empty_document_starts() {
    let doc = MemoryDocument::new(1280.0);
    let mut page = Page::start(doc, MemoryStore::new(), PageSettings::default());

    assert!(page.nav().is_none());
    assert!(page.search().is_none());
    assert!(page.observer_targets(ObserverKind::Reveal).is_empty());
    assert!(page.observer_targets(ObserverKind::LazyImages).is_empty());

    let body = page.host().body_id();
    let outcome = page.click(&body);
    assert!(!outcome.default_prevented);
    assert!(!outcome.propagation_stopped);

    page.scroll();
    assert!(!page.wants_frame());
    assert_eq!(page.next_deadline(), None);
}

#[test]
fn test_toggle_without_nav_does_nothing() {
    let doc = MemoryDocument::new(400.0);
    let toggle = doc.element("button").class("menu-toggle").append_to(doc.body_id());
    let mut page = Page::start(doc, MemoryStore::new(), PageSettings::default());

    let outcome = page.click(&toggle);
    assert!(!outcome.propagation_stopped);
    assert!(!page.host().has_class(&toggle, ACTIVE_CLASS));
}

#[test]
fn test_input_outside_search_box_is_ignored() {
    let doc = MemoryDocument::new(1280.0);
    doc.element("input").class("search-input").append_to(doc.body_id());
    let other = doc.element("input").class("newsletter").append_to(doc.body_id());
    let mut page = Page::start(doc, MemoryStore::new(), PageSettings::default());

    page.input(&other, "hello");
    assert_eq!(page.next_deadline(), None);
    assert_eq!(page.search().unwrap().query(), "");
}

#[test]
fn test_parallax_without_layers_is_disabled() {
    let doc = MemoryDocument::new(1920.0);
    let mut page = Page::start(doc, MemoryStore::new(), PageSettings::default());

    page.scroll();
    assert_eq!(page.next_deadline(), None);
}

#[test]
fn test_gallery_item_without_image() {
    let doc = MemoryDocument::new(1280.0);
    let item = doc.element("div").class("gallery-item").append_to(doc.body_id());
    let mut page = Page::start(doc, MemoryStore::new(), PageSettings::default());

    page.click(&item);
    assert!(page.host().query_first(MODAL).is_none());
    assert!(page.modal().instances().is_empty());
}

#[test]
fn test_filter_category_substring() {
    // Category lists are matched as raw substrings
    let doc = MemoryDocument::new(1280.0);
    let button = doc
        .element("button")
        .class("filter-btn")
        .attr(FILTER_ATTR, "suv")
        .append_to(doc.body_id());
    let grid = doc.element("div").class("card-grid").append_to(doc.body_id());
    let compact = doc
        .element("div")
        .class("card")
        .attr("data-category", "compact-suvs")
        .append_to(grid);
    let mut page = Page::start(doc, MemoryStore::new(), PageSettings::default());

    page.click(&button);
    assert!(is_shown(page.host(), &compact));
}

// ============================================================================
// Anchors and Links
// ============================================================================

#[test]
fn test_bare_hash_link_keeps_default() {
    let doc = MemoryDocument::new(1280.0);
    let link = doc.element("a").attr("href", "#").append_to(doc.body_id());
    let mut page = Page::start(doc, MemoryStore::new(), PageSettings::default());

    assert!(!page.click(&link).default_prevented);
    assert!(page.host().scroll_requests().is_empty());
}

#[test]
fn test_dangling_anchor_still_prevents_default() {
    let doc = MemoryDocument::new(1280.0);
    let link = doc.element("a").attr("href", "#nowhere").append_to(doc.body_id());
    let mut page = Page::start(doc, MemoryStore::new(), PageSettings::default());

    assert!(page.click(&link).default_prevented);
    assert!(page.host().scroll_requests().is_empty());
}

#[test]
fn test_absolute_link_is_not_intercepted() {
    let doc = MemoryDocument::new(1280.0);
    let link = doc
        .element("a")
        .attr("href", "https://dealer.test/book")
        .append_to(doc.body_id());
    let mut page = Page::start(doc, MemoryStore::new(), PageSettings::default());

    assert!(!page.click(&link).default_prevented);
    page.host().advance(Duration::from_secs(1));
    page.run_due();
    assert!(page.host().navigations().is_empty());
}

// ============================================================================
// Storage
// ============================================================================

#[test]
fn test_unavailable_storage_falls_back() {
    let doc = MemoryDocument::new(1280.0);
    let button = doc
        .element("button")
        .class("theme-btn")
        .attr(THEME_ATTR, "light")
        .append_to(doc.body_id());
    let mut page = Page::start(doc, MemoryStore::unavailable(), PageSettings::default());

    assert_eq!(page.theme().current(), Theme::Dark);

    // Switching still works for the current page
    page.click(&button);
    let root = page.host().root();
    assert_eq!(page.host().attr(&root, THEME_ATTR).as_deref(), Some("light"));
    assert!(page.host().has_class(&button, ACTIVE_CLASS));
}

#[test]
fn test_garbage_persisted_theme_is_replaced() {
    let doc = MemoryDocument::new(1280.0);
    let store = Rc::new(MemoryStore::with(THEME_KEY, "Sport "));
    let page = Page::start(doc, store.clone(), PageSettings::default());

    assert_eq!(page.theme().current(), Theme::Dark);
    assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_malformed_settings_rejected() {
    let err = PageSettings::from_json("{\"search_debounce_ms\": \"soon\"}").unwrap_err();
    assert!(matches!(err, ShowroomError::Settings(_)));

    let err = PageSettings::from_json("{\"default_theme\": \"neon\"}").unwrap_err();
    assert!(matches!(err, ShowroomError::Settings(_)));
}

#[test]
fn test_empty_settings_object_uses_defaults() {
    let settings = PageSettings::from_json("{}").unwrap();
    assert_eq!(settings.search_debounce(), Duration::from_millis(300));
    assert_eq!(settings.modal_exit(), Duration::from_millis(300));
    assert_eq!(settings.transition_delay(), Duration::from_millis(250));
    assert_eq!(settings.default_theme, Theme::Dark);
}

// ============================================================================
// Timing
// ============================================================================

#[test]
fn test_close_after_removal_is_noop() {
    let doc = MemoryDocument::new(1280.0);
    let item = doc.element("div").class("gallery-item").append_to(doc.body_id());
    doc.element("img").attr("src", "/a.jpg").append_to(item);
    let mut page = Page::start(doc, MemoryStore::new(), PageSettings::default());

    page.click(&item);
    let overlay = page.host().query_first(MODAL).unwrap();
    page.click(&overlay);
    page.host().advance(Duration::from_millis(300));
    assert_eq!(page.run_due(), 1);

    // Stale click on the detached backdrop
    page.click(&overlay);
    assert_eq!(page.next_deadline(), None);
    assert!(page.host().query_all(Selector::Class("gallery-modal")).is_empty());
}
