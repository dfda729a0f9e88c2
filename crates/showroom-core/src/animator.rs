//! Entrance animations on first viewport entry.

use std::fmt;

use tracing::debug;

use crate::config::PageSettings;
use crate::dom::Dom;
use crate::markup::{CARD, GALLERY_ITEM, TIMELINE_ITEM};
use crate::observe::{IntersectionEntry, ObserverOptions, OneShot, RevealState};

/// Card entrance variants, picked round-robin per intersection batch.
pub const CARD_ANIMATIONS: [&str; 4] = [
    "animate-fade-up",
    "animate-fade-left",
    "animate-fade-right",
    "animate-zoom-in",
];
pub const TIMELINE_LEFT: &str = "animate-slide-left";
pub const TIMELINE_RIGHT: &str = "animate-slide-right";
pub const GALLERY_ANIMATION: &str = "animate-fade-scale";

/// Element families with their own reveal rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealGroup {
    Card,
    TimelineItem,
    GalleryItem,
}

pub struct VisibilityAnimator<N> {
    elements: OneShot<N, RevealGroup>,
    options: ObserverOptions,
    card_stagger: f64,
    gallery_stagger: f64,
}

impl<N: Clone + PartialEq + fmt::Debug> VisibilityAnimator<N> {
    /// Register every card, timeline item and gallery item on the page.
    pub fn install<D: Dom<Node = N>>(dom: &D, settings: &PageSettings) -> Self {
        let mut elements = OneShot::new();
        for (selector, group) in [
            (CARD, RevealGroup::Card),
            (TIMELINE_ITEM, RevealGroup::TimelineItem),
            (GALLERY_ITEM, RevealGroup::GalleryItem),
        ] {
            for (index, node) in dom.query_all(selector).into_iter().enumerate() {
                elements.observe(node, group, index);
            }
        }
        debug!(count = elements.len(), "reveal animator installed");

        Self {
            elements,
            options: ObserverOptions {
                threshold: Some(settings.reveal_threshold),
                root_margin: Some(settings.reveal_root_margin.clone()),
            },
            card_stagger: settings.card_stagger_secs,
            gallery_stagger: settings.gallery_stagger_secs,
        }
    }

    pub fn options(&self) -> &ObserverOptions {
        &self.options
    }

    /// Elements the host should observe.
    pub fn targets(&self) -> Vec<N> {
        self.elements.pending()
    }

    pub fn state(&self, node: &N) -> Option<RevealState> {
        self.elements.state(node)
    }

    /// Handle one observer callback. Returns the elements to unobserve.
    pub fn on_intersect<D: Dom<Node = N>>(
        &mut self,
        dom: &D,
        entries: &[IntersectionEntry<N>],
    ) -> Vec<N> {
        let mut revealed = Vec::new();
        let mut card_batch_index = 0;

        for entry in entries.iter().filter(|e| e.is_intersecting) {
            let Some(tracked) = self.elements.reveal(&entry.target) else {
                continue;
            };
            let node = &tracked.node;

            match tracked.group {
                RevealGroup::Card => {
                    let delay = card_batch_index as f64 * self.card_stagger;
                    dom.set_style(node, "animation-delay", &seconds(delay));
                    dom.add_class(node, CARD_ANIMATIONS[card_batch_index % CARD_ANIMATIONS.len()]);
                    card_batch_index += 1;
                }
                RevealGroup::TimelineItem => {
                    let class = if tracked.index % 2 == 0 {
                        TIMELINE_LEFT
                    } else {
                        TIMELINE_RIGHT
                    };
                    dom.add_class(node, class);
                }
                RevealGroup::GalleryItem => {
                    let delay = tracked.index as f64 * self.gallery_stagger;
                    dom.set_style(node, "animation-delay", &seconds(delay));
                    dom.add_class(node, GALLERY_ANIMATION);
                }
            }
            revealed.push(tracked.node);
        }

        if !revealed.is_empty() {
            debug!(count = revealed.len(), "elements revealed");
        }
        revealed
    }
}

fn seconds(value: f64) -> String {
    format!("{:.2}s", value)
}
