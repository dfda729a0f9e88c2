//! Theme selection.
//!
//! The active theme lives on the root element as `data-theme`, is reflected by
//! the `active` class on the matching `.theme-btn`, and is persisted under the
//! `"theme"` preference key.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::dom::Dom;
use crate::error::{ShowroomError, ShowroomResult};
use crate::markup::{ACTIVE_CLASS, THEME_ATTR, THEME_BUTTON};
use crate::storage::{PreferenceStore, ThemePreference};

/// Root transition enabled once the visitor picks a theme.
const THEME_TRANSITION: &str = "background-color 0.3s ease";

/// Supported visual themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
    Sport,
    Luxury,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Dark, Theme::Light, Theme::Sport, Theme::Luxury];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::Sport => "sport",
            Theme::Luxury => "luxury",
        }
    }
}

impl FromStr for Theme {
    type Err = ShowroomError;

    fn from_str(s: &str) -> ShowroomResult<Self> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.as_str() == s)
            .ok_or_else(|| ShowroomError::UnknownTheme(s.to_string()))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owns the current theme and applies it to a document.
pub struct ThemeController<S> {
    current: Theme,
    fallback: Theme,
    preference: ThemePreference<S>,
}

impl<S: PreferenceStore> ThemeController<S> {
    pub fn new(store: S, fallback: Theme) -> Self {
        Self {
            current: fallback,
            fallback,
            preference: ThemePreference::new(store),
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn preference(&self) -> &ThemePreference<S> {
        &self.preference
    }

    /// Apply the persisted theme, or the fallback when nothing valid is
    /// stored or storage is unreadable.
    pub fn init<D: Dom>(&mut self, dom: &D) -> Theme {
        let theme = match self.preference.load() {
            Ok(Some(stored)) => stored.parse().unwrap_or_else(|e: ShowroomError| {
                debug!(error = %e, "ignoring persisted theme");
                self.fallback
            }),
            Ok(None) => self.fallback,
            Err(e) => {
                warn!(error = %e, "theme preference unreadable, using fallback");
                self.fallback
            }
        };

        self.current = theme;
        self.apply(dom);
        self.persist();
        info!(theme = %theme, "theme initialized");
        theme
    }

    /// Switch to the theme named `id`. Unknown ids are ignored.
    ///
    /// Returns whether the theme was applied.
    pub fn change<D: Dom>(&mut self, dom: &D, id: &str) -> bool {
        let theme = match id.parse::<Theme>() {
            Ok(theme) => theme,
            Err(e) => {
                debug!(error = %e, "theme change rejected");
                return false;
            }
        };

        self.current = theme;
        self.apply(dom);
        self.persist();
        dom.set_style(&dom.root(), "transition", THEME_TRANSITION);
        info!(theme = %theme, "theme changed");
        true
    }

    fn apply<D: Dom>(&self, dom: &D) {
        dom.set_attr(&dom.root(), THEME_ATTR, self.current.as_str());

        for button in dom.query_all(THEME_BUTTON) {
            if dom.attr(&button, THEME_ATTR).as_deref() == Some(self.current.as_str()) {
                dom.add_class(&button, ACTIVE_CLASS);
            } else {
                dom.remove_class(&button, ACTIVE_CLASS);
            }
        }
    }

    fn persist(&self) {
        if let Err(e) = self.preference.save(self.current.as_str()) {
            warn!(error = %e, theme = %self.current, "theme preference not saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDocument;
    use crate::storage::{MemoryStore, THEME_KEY};
    use std::rc::Rc;

    fn page_with_buttons() -> MemoryDocument {
        let doc = MemoryDocument::new(1280.0);
        let bar = doc.element("div").class("theme-switcher").append_to(doc.body_id());
        for theme in Theme::ALL {
            doc.element("button")
                .class("theme-btn")
                .attr(THEME_ATTR, theme.as_str())
                .append_to(bar);
        }
        doc
    }

    fn active_buttons(doc: &MemoryDocument) -> Vec<String> {
        doc.query_all(THEME_BUTTON)
            .into_iter()
            .filter(|b| doc.has_class(b, ACTIVE_CLASS))
            .filter_map(|b| doc.attr(&b, THEME_ATTR))
            .collect()
    }

    #[test]
    fn parse_known_and_unknown() {
        assert_eq!("sport".parse::<Theme>().unwrap(), Theme::Sport);
        assert!(matches!(
            "Sport".parse::<Theme>(),
            Err(ShowroomError::UnknownTheme(_))
        ));
    }

    #[test]
    fn init_defaults_to_dark() {
        let doc = page_with_buttons();
        let store = Rc::new(MemoryStore::new());
        let mut themes = ThemeController::new(store.clone(), Theme::Dark);

        assert_eq!(themes.init(&doc), Theme::Dark);
        assert_eq!(doc.attr(&doc.root(), THEME_ATTR).as_deref(), Some("dark"));
        assert_eq!(active_buttons(&doc), vec!["dark"]);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn init_ignores_garbage_in_storage() {
        let doc = page_with_buttons();
        let mut themes = ThemeController::new(MemoryStore::with(THEME_KEY, "neon"), Theme::Dark);

        assert_eq!(themes.init(&doc), Theme::Dark);
    }

    #[test]
    fn init_survives_unavailable_storage() {
        let doc = page_with_buttons();
        let mut themes = ThemeController::new(MemoryStore::unavailable(), Theme::Light);

        assert_eq!(themes.init(&doc), Theme::Light);
        assert_eq!(doc.attr(&doc.root(), THEME_ATTR).as_deref(), Some("light"));
    }

    #[test]
    fn change_applies_persists_and_transitions() {
        let doc = page_with_buttons();
        let store = Rc::new(MemoryStore::new());
        let mut themes = ThemeController::new(store.clone(), Theme::Dark);
        themes.init(&doc);

        assert!(themes.change(&doc, "luxury"));
        assert_eq!(themes.current(), Theme::Luxury);
        assert_eq!(active_buttons(&doc), vec!["luxury"]);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("luxury"));
        assert_eq!(
            doc.style(&doc.root(), "transition").as_deref(),
            Some(THEME_TRANSITION)
        );
    }

    #[test]
    fn change_rejects_unknown_silently() {
        let doc = page_with_buttons();
        let store = Rc::new(MemoryStore::with(THEME_KEY, "light"));
        let mut themes = ThemeController::new(store.clone(), Theme::Dark);
        themes.init(&doc);

        assert!(!themes.change(&doc, "midnight"));
        assert_eq!(themes.current(), Theme::Light);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
        assert_eq!(doc.style(&doc.root(), "transition"), None);
    }
}
