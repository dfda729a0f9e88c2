//! Deferred image sources.

use std::fmt;

use tracing::debug;

use crate::dom::Dom;
use crate::markup::{DEFERRED_SRC_ATTR, LAZY_IMAGE, LOADED_CLASS};
use crate::observe::{IntersectionEntry, ObserverOptions, OneShot};

/// Swaps `data-src` into `src` the first time an image becomes visible.
pub struct LazyLoader<N> {
    images: OneShot<N, ()>,
}

impl<N: Clone + PartialEq + fmt::Debug> LazyLoader<N> {
    pub fn install<D: Dom<Node = N>>(dom: &D) -> Self {
        let mut images = OneShot::new();
        for (index, image) in dom.query_all(LAZY_IMAGE).into_iter().enumerate() {
            images.observe(image, (), index);
        }
        debug!(count = images.len(), "lazy loader installed");
        Self { images }
    }

    /// Host defaults for both threshold and margin.
    pub fn options(&self) -> ObserverOptions {
        ObserverOptions {
            threshold: None,
            root_margin: None,
        }
    }

    pub fn targets(&self) -> Vec<N> {
        self.images.pending()
    }

    /// Handle one observer callback. Returns the images to unobserve.
    pub fn on_intersect<D: Dom<Node = N>>(
        &mut self,
        dom: &D,
        entries: &[IntersectionEntry<N>],
    ) -> Vec<N> {
        let mut loaded = Vec::new();
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            let Some(tracked) = self.images.reveal(&entry.target) else {
                continue;
            };
            if let Some(src) = dom.attr(&tracked.node, DEFERRED_SRC_ATTR) {
                dom.set_attr(&tracked.node, "src", &src);
            }
            dom.add_class(&tracked.node, LOADED_CLASS);
            loaded.push(tracked.node);
        }
        loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDocument;

    #[test]
    fn swaps_source_once() {
        let doc = MemoryDocument::new(1280.0);
        let img = doc
            .element("img")
            .attr("src", "placeholder.svg")
            .attr(DEFERRED_SRC_ATTR, "/img/roadster.jpg")
            .append_to(doc.body_id());
        let eager = doc
            .element("img")
            .attr("src", "logo.svg")
            .append_to(doc.body_id());
        let mut loader = LazyLoader::install(&doc);

        assert_eq!(loader.targets(), vec![img]);

        let done = loader.on_intersect(&doc, &[IntersectionEntry::entering(img)]);
        assert_eq!(done, vec![img]);
        assert_eq!(doc.attr(&img, "src").as_deref(), Some("/img/roadster.jpg"));
        assert!(doc.has_class(&img, LOADED_CLASS));

        // Later source changes are left alone
        doc.set_attr(&img, "src", "other.jpg");
        assert!(loader
            .on_intersect(&doc, &[IntersectionEntry::entering(img)])
            .is_empty());
        assert_eq!(doc.attr(&img, "src").as_deref(), Some("other.jpg"));
        assert_eq!(doc.attr(&eager, "src").as_deref(), Some("logo.svg"));
    }

    #[test]
    fn leaving_entries_do_nothing() {
        let doc = MemoryDocument::new(1280.0);
        let img = doc
            .element("img")
            .attr(DEFERRED_SRC_ATTR, "/img/coupe.jpg")
            .append_to(doc.body_id());
        let mut loader = LazyLoader::install(&doc);

        assert!(loader
            .on_intersect(&doc, &[IntersectionEntry::leaving(img)])
            .is_empty());
        assert_eq!(doc.attr(&img, "src"), None);
    }
}
