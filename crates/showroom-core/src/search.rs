//! Card search and category filters.
//!
//! Both decide visibility from scratch on every run. They do not compose: a
//! filter click after a search (or the reverse) overwrites the other's
//! decision for the cards it touches.

use std::time::Duration;

use tracing::debug;

use crate::config::PageSettings;
use crate::dom::Dom;
use crate::markup::{
    ACTIVE_CLASS, CARD_BODY, CARD_GRID, CARD_TITLE, CATEGORY_ATTR, FILTERABLE, FILTER_ATTR,
    FILTER_BUTTON, FILTER_GROUP, SECTION,
};
use crate::scheduler::{Scheduler, Slot, Task};

/// Filter value meaning "every category".
pub const FILTER_ALL: &str = "all";

/// The searchable content of a card.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Card {
    pub title: String,
    pub body: String,
    /// Raw category list, e.g. `"suv,sedan"`
    pub tags: String,
}

impl Card {
    pub fn read<D: Dom>(dom: &D, node: &D::Node) -> Self {
        let text_of = |selector| {
            dom.query_first_within(node, selector)
                .map(|el| dom.text(&el))
                .unwrap_or_default()
        };
        Self {
            title: text_of(CARD_TITLE),
            body: text_of(CARD_BODY),
            tags: dom.attr(node, CATEGORY_ATTR).unwrap_or_default(),
        }
    }

    /// Case-insensitive substring match against title or body. The empty
    /// query matches every card.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query) || self.body.to_lowercase().contains(&query)
    }

    pub fn matches_filter(&self, filter: &Filter) -> bool {
        match filter {
            Filter::All => true,
            Filter::Tag(tag) => self.tags.contains(tag.as_str()),
        }
    }
}

/// Active category filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    All,
    Tag(String),
}

impl Filter {
    pub fn parse(value: &str) -> Self {
        if value == FILTER_ALL {
            Filter::All
        } else {
            Filter::Tag(value.to_string())
        }
    }
}

/// Whether a card is currently displayed.
pub fn is_shown<D: Dom>(dom: &D, node: &D::Node) -> bool {
    dom.style(node, "display").as_deref() != Some("none")
}

fn set_shown<D: Dom>(dom: &D, node: &D::Node, shown: bool) {
    dom.set_style(node, "display", if shown { "block" } else { "none" });
}

/// Debounced free-text search over every filterable card.
#[derive(Debug)]
pub struct Search {
    query: String,
    debounce: Duration,
    evaluations: usize,
}

impl Search {
    pub fn new(settings: &PageSettings) -> Self {
        Self {
            query: String::new(),
            debounce: settings.search_debounce(),
            evaluations: 0,
        }
    }

    /// Record the latest input and push the evaluation back.
    pub fn on_input(&mut self, scheduler: &mut Scheduler, now: Duration, value: &str) {
        self.query = value.to_string();
        scheduler.replace(Slot::Search, now, self.debounce, Task::RunSearch);
    }

    /// Show matching cards and hide the rest. Returns how many are shown.
    pub fn evaluate<D: Dom>(&mut self, dom: &D) -> usize {
        self.evaluations += 1;
        let query = self.query.to_lowercase();

        let mut shown = 0;
        for node in dom.query_all(FILTERABLE) {
            let matched = Card::read(dom, &node).matches_query(&query);
            set_shown(dom, &node, matched);
            shown += usize::from(matched);
        }
        debug!(query = %query, shown, "search evaluated");
        shown
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Evaluations run so far.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }
}

/// Grid a filter button controls: the one in its own section, else the
/// first on the page.
pub fn resolve_grid<D: Dom>(dom: &D, button: &D::Node) -> Option<D::Node> {
    dom.closest(button, SECTION)
        .and_then(|section| dom.query_first_within(&section, CARD_GRID))
        .or_else(|| dom.query_first(CARD_GRID))
}

/// Apply the category of a clicked filter button. Returns how many cards are
/// shown, or `None` when no grid could be found.
pub fn apply_filter<D: Dom>(dom: &D, button: &D::Node) -> Option<usize> {
    let filter = Filter::parse(&dom.attr(button, FILTER_ATTR).unwrap_or_default());

    let siblings = match dom.closest(button, FILTER_GROUP) {
        Some(group) => dom.query_within(&group, FILTER_BUTTON),
        None => vec![button.clone()],
    };
    for other in &siblings {
        dom.remove_class(other, ACTIVE_CLASS);
    }
    dom.add_class(button, ACTIVE_CLASS);

    let Some(grid) = resolve_grid(dom, button) else {
        debug!(?filter, "filter button without a card grid");
        return None;
    };

    let mut shown = 0;
    for node in dom.query_within(&grid, FILTERABLE) {
        let matched = Card::read(dom, &node).matches_filter(&filter);
        set_shown(dom, &node, matched);
        shown += usize::from(matched);
    }
    debug!(?filter, shown, "filter applied");
    Some(shown)
}
