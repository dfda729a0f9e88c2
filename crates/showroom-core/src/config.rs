//! Page settings and the load-time viewport snapshot.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::dom::Dom;
use crate::error::ShowroomResult;
use crate::markup::SETTINGS_ID;
use crate::theme::Theme;

/// Every tunable behavior constant.
///
/// Defaults reproduce the stock site. A page may override any subset through
/// a JSON block; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    /// Theme used when nothing valid is persisted
    pub default_theme: Theme,
    /// Quiet period before a search evaluation runs
    pub search_debounce_ms: u64,
    /// Minimum spacing of parallax recomputations
    pub parallax_throttle_ms: u64,
    /// Scroll offset past which the scroll-to-top button shows
    pub scroll_top_threshold: f64,
    /// Translation applied per scrolled pixel
    pub parallax_factor: f64,
    /// Widths above this enable parallax and smooth scrolling
    pub wide_breakpoint: f64,
    /// Gallery modal exit animation length
    pub modal_exit_ms: u64,
    /// Delay between showing the transition overlay and navigating
    pub transition_delay_ms: u64,
    /// Reveal delay step for cards, in seconds
    pub card_stagger_secs: f64,
    /// Reveal delay step for gallery items, in seconds
    pub gallery_stagger_secs: f64,
    /// Fraction of an element that must be visible to reveal it
    pub reveal_threshold: f64,
    /// Root margin of the reveal observer
    pub reveal_root_margin: String,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            default_theme: Theme::Dark,
            search_debounce_ms: 300,
            parallax_throttle_ms: 16,
            scroll_top_threshold: 300.0,
            parallax_factor: 0.5,
            wide_breakpoint: 768.0,
            modal_exit_ms: 300,
            transition_delay_ms: 250,
            card_stagger_secs: 0.1,
            gallery_stagger_secs: 0.15,
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".to_string(),
        }
    }
}

impl PageSettings {
    /// Parse a (possibly partial) JSON override.
    pub fn from_json(json: &str) -> ShowroomResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Settings from the page's override block, or defaults when the block is
    /// absent or malformed.
    pub fn from_document<D: Dom>(dom: &D) -> Self {
        let Some(block) = dom.element_by_id(SETTINGS_ID) else {
            debug!("no settings block, using defaults");
            return Self::default();
        };
        match Self::from_json(&dom.text(&block)) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "ignoring malformed settings block");
                Self::default()
            }
        }
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn parallax_throttle(&self) -> Duration {
        Duration::from_millis(self.parallax_throttle_ms)
    }

    pub fn modal_exit(&self) -> Duration {
        Duration::from_millis(self.modal_exit_ms)
    }

    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.transition_delay_ms)
    }
}

/// Feature flags derived once from the viewport width at load.
///
/// Not re-derived on resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportConfig {
    pub smooth_scroll: bool,
    pub parallax: bool,
}

impl ViewportConfig {
    pub fn from_width(width: f64, settings: &PageSettings) -> Self {
        let wide = width > settings.wide_breakpoint;
        Self {
            smooth_scroll: wide,
            parallax: wide,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_site() {
        let settings = PageSettings::default();
        assert_eq!(settings.search_debounce(), Duration::from_millis(300));
        assert_eq!(settings.parallax_throttle(), Duration::from_millis(16));
        assert_eq!(settings.modal_exit(), Duration::from_millis(300));
        assert_eq!(settings.transition_delay(), Duration::from_millis(250));
        assert_eq!(settings.default_theme, Theme::Dark);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let settings =
            PageSettings::from_json(r#"{ "search_debounce_ms": 150, "default_theme": "light" }"#)
                .unwrap();
        assert_eq!(settings.search_debounce_ms, 150);
        assert_eq!(settings.default_theme, Theme::Light);
        assert_eq!(settings.scroll_top_threshold, 300.0);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(PageSettings::from_json("{ nope").is_err());
        assert!(PageSettings::from_json(r#"{ "default_theme": "neon" }"#).is_err());
    }

    #[test]
    fn document_block_overrides() {
        use crate::dom::MemoryDocument;

        let doc = MemoryDocument::new(1280.0);
        assert_eq!(PageSettings::from_document(&doc), PageSettings::default());

        let block = doc
            .element("script")
            .attr("type", "application/json")
            .attr("id", SETTINGS_ID)
            .text(r#"{ "transition_delay_ms": 400 }"#)
            .append_to(doc.body_id());
        assert_eq!(PageSettings::from_document(&doc).transition_delay_ms, 400);

        doc.set_text(&block, "{ broken");
        assert_eq!(PageSettings::from_document(&doc), PageSettings::default());
    }

    #[test]
    fn breakpoint_is_exclusive() {
        let settings = PageSettings::default();
        let narrow = ViewportConfig::from_width(768.0, &settings);
        let wide = ViewportConfig::from_width(769.0, &settings);

        assert!(!narrow.parallax && !narrow.smooth_scroll);
        assert!(wide.parallax && wide.smooth_scroll);
    }
}
