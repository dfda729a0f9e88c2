//! Full-screen gallery image viewer.
//!
//! Each click on a gallery item builds a fresh overlay. Several may be open at
//! once; nothing enforces exclusivity.

use std::fmt;
use std::time::Duration;

use tracing::debug;

use crate::config::PageSettings;
use crate::dom::Dom;
use crate::markup::{IMAGE, MODAL_CLASS, MODAL_CLOSE_CLASS, MODAL_IMAGE_CLASS};
use crate::scheduler::{Scheduler, Task};
use crate::styles;

/// Identifier of one opened modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModalId(u64);

impl ModalId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    /// Being built and attached
    Opening,
    Open,
    /// Exit animation running; removal scheduled
    Closing,
}

#[derive(Debug, Clone)]
pub struct ModalInstance<N> {
    pub id: ModalId,
    pub overlay: N,
    pub image: N,
    pub close: N,
    pub state: ModalState,
}

pub struct GalleryModal<N> {
    instances: Vec<ModalInstance<N>>,
    next_id: u64,
    exit: Duration,
}

impl<N: Clone + PartialEq + fmt::Debug> GalleryModal<N> {
    pub fn new(settings: &PageSettings) -> Self {
        Self {
            instances: Vec::new(),
            next_id: 0,
            exit: settings.modal_exit(),
        }
    }

    /// Show the image inside `item`. Items without an image are ignored.
    pub fn open<D: Dom<Node = N>>(&mut self, dom: &D, item: &N) -> Option<ModalId> {
        let source = dom.query_first_within(item, IMAGE)?;
        let Some(body) = dom.body() else {
            debug!("document has no body, modal not opened");
            return None;
        };

        let id = ModalId(self.next_id);
        self.next_id += 1;

        let overlay = dom.create_element("div");
        dom.add_class(&overlay, MODAL_CLASS);
        styles::apply(dom, &overlay, styles::MODAL_OVERLAY);

        let image = dom.create_element("img");
        dom.add_class(&image, MODAL_IMAGE_CLASS);
        dom.set_attr(&image, "src", &dom.attr(&source, "src").unwrap_or_default());
        dom.set_attr(&image, "alt", &dom.attr(&source, "alt").unwrap_or_default());
        styles::apply(dom, &image, styles::MODAL_IMAGE);

        let close = dom.create_element("span");
        dom.add_class(&close, MODAL_CLOSE_CLASS);
        dom.set_text(&close, "\u{00d7}");
        styles::apply(dom, &close, styles::MODAL_CLOSE);

        let mut instance = ModalInstance {
            id,
            overlay,
            image,
            close,
            state: ModalState::Opening,
        };
        dom.append_child(&instance.overlay, &instance.image);
        dom.append_child(&instance.overlay, &instance.close);
        dom.append_child(&body, &instance.overlay);
        instance.state = ModalState::Open;

        if self.instances.iter().any(|m| m.state != ModalState::Closing) {
            debug!(modal = ?id, "opening a modal while another is open");
        }
        self.instances.push(instance);
        Some(id)
    }

    /// Modal whose close control is `node`.
    pub fn by_close_control(&self, node: &N) -> Option<ModalId> {
        self.instances.iter().find(|m| m.close == *node).map(|m| m.id)
    }

    /// Modal whose backdrop is exactly `node` (not its image).
    pub fn by_backdrop(&self, node: &N) -> Option<ModalId> {
        self.instances.iter().find(|m| m.overlay == *node).map(|m| m.id)
    }

    /// Start the exit animation and schedule removal.
    ///
    /// A modal already closing gets another removal scheduled; removal itself
    /// tolerates repeats.
    pub fn close<D: Dom<Node = N>>(
        &mut self,
        dom: &D,
        scheduler: &mut Scheduler,
        now: Duration,
        id: ModalId,
    ) -> bool {
        let Some(instance) = self.instances.iter_mut().find(|m| m.id == id) else {
            return false;
        };
        dom.set_style(&instance.overlay, "animation", styles::MODAL_EXIT_ANIMATION);
        instance.state = ModalState::Closing;
        scheduler.schedule_after(now, self.exit, Task::RemoveModal(id));
        true
    }

    /// Timer task: detach the overlay.
    pub fn remove<D: Dom<Node = N>>(&mut self, dom: &D, id: ModalId) {
        if let Some(pos) = self.instances.iter().position(|m| m.id == id) {
            let instance = self.instances.remove(pos);
            dom.remove(&instance.overlay);
            debug!(modal = ?id, "modal removed");
        }
    }

    /// Hover feedback on a close control.
    pub fn hover_close<D: Dom<Node = N>>(&self, dom: &D, node: &N, entering: bool) {
        if self.by_close_control(node).is_none() {
            return;
        }
        let (color, rotation) = if entering {
            (styles::CLOSE_HOVER_COLOR, "rotate(90deg)")
        } else {
            (styles::CLOSE_COLOR, "rotate(0deg)")
        };
        dom.set_style(node, "color", color);
        dom.set_style(node, "transform", rotation);
    }

    pub fn instances(&self) -> &[ModalInstance<N>] {
        &self.instances
    }

    pub fn state(&self, id: ModalId) -> Option<ModalState> {
        self.instances.iter().find(|m| m.id == id).map(|m| m.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryDocument, NodeId, Selector};
    use crate::markup::MODAL;

    fn gallery(doc: &MemoryDocument) -> NodeId {
        let item = doc.element("div").class("gallery-item").append_to(doc.body_id());
        doc.element("img")
            .attr("src", "/img/interior.jpg")
            .attr("alt", "Interior")
            .append_to(item);
        item
    }

    #[test]
    fn open_builds_overlay() {
        let doc = MemoryDocument::new(1280.0);
        let item = gallery(&doc);
        let mut modal = GalleryModal::new(&PageSettings::default());

        let id = modal.open(&doc, &item).unwrap();
        let overlay = doc.query_first(MODAL).unwrap();
        let image = doc.query_first(Selector::Class(MODAL_IMAGE_CLASS)).unwrap();

        assert_eq!(modal.state(id), Some(ModalState::Open));
        assert_eq!(doc.parent(&overlay), Some(doc.body_id()));
        assert_eq!(doc.attr(&image, "src").as_deref(), Some("/img/interior.jpg"));
        assert_eq!(doc.attr(&image, "alt").as_deref(), Some("Interior"));
        assert_eq!(doc.style(&overlay, "backdrop-filter").as_deref(), Some("blur(10px)"));
    }

    #[test]
    fn item_without_image_is_ignored() {
        let doc = MemoryDocument::new(1280.0);
        let item = doc.element("div").class("gallery-item").append_to(doc.body_id());
        let mut modal = GalleryModal::new(&PageSettings::default());

        assert!(modal.open(&doc, &item).is_none());
        assert!(doc.query_first(MODAL).is_none());
    }

    #[test]
    fn close_waits_for_exit_animation() {
        let doc = MemoryDocument::new(1280.0);
        let item = gallery(&doc);
        let mut modal = GalleryModal::new(&PageSettings::default());
        let mut sched = Scheduler::new();
        let id = modal.open(&doc, &item).unwrap();

        assert!(modal.close(&doc, &mut sched, Duration::ZERO, id));
        assert_eq!(modal.state(id), Some(ModalState::Closing));
        assert!(doc.query_first(MODAL).is_some());
        assert_eq!(sched.pop_due(Duration::from_millis(299)), None);

        let task = sched.pop_due(Duration::from_millis(300)).unwrap();
        assert_eq!(task, Task::RemoveModal(id));
        modal.remove(&doc, id);
        assert!(doc.query_first(MODAL).is_none());
        assert!(modal.instances().is_empty());
    }

    #[test]
    fn double_close_schedules_twice_and_removes_once() {
        let doc = MemoryDocument::new(1280.0);
        let item = gallery(&doc);
        let mut modal = GalleryModal::new(&PageSettings::default());
        let mut sched = Scheduler::new();
        let id = modal.open(&doc, &item).unwrap();

        modal.close(&doc, &mut sched, Duration::ZERO, id);
        modal.close(&doc, &mut sched, Duration::from_millis(100), id);
        assert_eq!(sched.len(), 2);

        while let Some(Task::RemoveModal(id)) = sched.pop_due(Duration::from_secs(1)) {
            modal.remove(&doc, id);
        }
        assert!(doc.query_first(MODAL).is_none());
    }

    #[test]
    fn hover_rotates_close_control() {
        let doc = MemoryDocument::new(1280.0);
        let item = gallery(&doc);
        let mut modal = GalleryModal::new(&PageSettings::default());
        let id = modal.open(&doc, &item).unwrap();
        let close = modal.instances()[0].close;

        modal.hover_close(&doc, &close, true);
        assert_eq!(doc.style(&close, "transform").as_deref(), Some("rotate(90deg)"));
        assert_eq!(doc.style(&close, "color").as_deref(), Some(styles::CLOSE_HOVER_COLOR));

        modal.hover_close(&doc, &close, false);
        assert_eq!(doc.style(&close, "transform").as_deref(), Some("rotate(0deg)"));
        assert_eq!(modal.by_close_control(&close), Some(id));
    }

    #[test]
    fn rapid_double_open_creates_two_overlays() {
        let doc = MemoryDocument::new(1280.0);
        let item = gallery(&doc);
        let mut modal = GalleryModal::new(&PageSettings::default());

        let first = modal.open(&doc, &item).unwrap();
        let second = modal.open(&doc, &item).unwrap();

        assert_ne!(first, second);
        assert_eq!(doc.query_all(MODAL).len(), 2);
    }
}
