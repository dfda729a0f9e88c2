//! Soft page transitions for same-directory links.

use std::time::Duration;

use tracing::debug;

use crate::config::PageSettings;
use crate::dom::Dom;
use crate::markup::TRANSITION_CLASS;
use crate::scheduler::{Scheduler, Task};
use crate::styles;

pub struct PageTransition {
    delay: Duration,
}

impl PageTransition {
    pub fn new(settings: &PageSettings) -> Self {
        Self {
            delay: settings.transition_delay(),
        }
    }

    /// Whether a `./` link opens in the current frame.
    pub fn applies<D: Dom>(dom: &D, link: &D::Node) -> bool {
        match dom.attr(link, "target").as_deref() {
            None | Some("") | Some("_self") => true,
            Some(_) => false,
        }
    }

    /// Cover the page and schedule navigation. Returns whether the click's
    /// default action should be prevented.
    pub fn begin<D: Dom>(
        &self,
        dom: &D,
        scheduler: &mut Scheduler,
        now: Duration,
        link: &D::Node,
    ) -> bool {
        if !Self::applies(dom, link) {
            return false;
        }
        let Some(href) = dom.resolved_href(link) else {
            return false;
        };

        if let Some(body) = dom.body() {
            let overlay = dom.create_element("div");
            dom.add_class(&overlay, TRANSITION_CLASS);
            styles::apply(dom, &overlay, styles::TRANSITION_OVERLAY);
            dom.append_child(&body, &overlay);
        }

        debug!(%href, "page transition started");
        scheduler.schedule_after(now, self.delay, Task::Navigate(href));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryDocument, Selector};

    #[test]
    fn same_frame_link_is_intercepted() {
        let doc = MemoryDocument::new(1280.0);
        let link = doc.element("a").attr("href", "./models.html").append_to(doc.body_id());
        let transition = PageTransition::new(&PageSettings::default());
        let mut sched = Scheduler::new();

        assert!(transition.begin(&doc, &mut sched, Duration::ZERO, &link));
        assert_eq!(doc.query_all(Selector::Class(TRANSITION_CLASS)).len(), 1);
        assert_eq!(sched.pop_due(Duration::from_millis(249)), None);
        assert_eq!(
            sched.pop_due(Duration::from_millis(250)),
            Some(Task::Navigate("./models.html".into()))
        );
    }

    #[test]
    fn new_tab_links_are_left_alone() {
        let doc = MemoryDocument::new(1280.0);
        let link = doc
            .element("a")
            .attr("href", "./brochure.pdf")
            .attr("target", "_blank")
            .append_to(doc.body_id());
        let self_link = doc
            .element("a")
            .attr("href", "./index.html")
            .attr("target", "_self")
            .detached();
        let transition = PageTransition::new(&PageSettings::default());
        let mut sched = Scheduler::new();

        assert!(!transition.begin(&doc, &mut sched, Duration::ZERO, &link));
        assert!(sched.is_empty());
        assert!(doc.query_first(Selector::Class(TRANSITION_CLASS)).is_none());
        assert!(PageTransition::applies(&doc, &self_link));
    }
}
