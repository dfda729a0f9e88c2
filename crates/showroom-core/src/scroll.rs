//! Scroll-to-top button, parallax and in-page anchors.

use std::fmt;
use std::time::Duration;

use tracing::debug;

use crate::config::{PageSettings, ViewportConfig};
use crate::dom::{Dom, ScrollBehavior};
use crate::markup::{PARALLAX, SCROLL_TOP, VISIBLE_CLASS};
use crate::scheduler::{Scheduler, Slot, Task};

pub struct ScrollUtilities<N> {
    button: Option<N>,
    /// A frame task is already queued for the button
    frame_pending: bool,
    threshold: f64,
    parallax_enabled: bool,
    parallax_factor: f64,
    parallax_throttle: Duration,
    smooth: bool,
}

impl<N: Clone + PartialEq + fmt::Debug> ScrollUtilities<N> {
    pub fn install<D: Dom<Node = N>>(
        dom: &D,
        settings: &PageSettings,
        viewport: ViewportConfig,
    ) -> Self {
        let button = dom.query_first(SCROLL_TOP);
        if button.is_none() {
            debug!("no scroll-to-top button, skipping");
        }
        let parallax_enabled = viewport.parallax && dom.query_first(PARALLAX).is_some();

        Self {
            button,
            frame_pending: false,
            threshold: settings.scroll_top_threshold,
            parallax_enabled,
            parallax_factor: settings.parallax_factor,
            parallax_throttle: settings.parallax_throttle(),
            smooth: viewport.smooth_scroll,
        }
    }

    pub fn button(&self) -> Option<&N> {
        self.button.as_ref()
    }

    pub fn parallax_enabled(&self) -> bool {
        self.parallax_enabled
    }

    /// Coalesce a scroll event into at most one frame task and one pending
    /// parallax task.
    pub fn on_scroll(&mut self, scheduler: &mut Scheduler, now: Duration) {
        if self.button.is_some() && !self.frame_pending {
            self.frame_pending = true;
            scheduler.request_frame(Task::RefreshScrollTop);
        }
        if self.parallax_enabled {
            scheduler.schedule_if_idle(Slot::Parallax, now, self.parallax_throttle, Task::ApplyParallax);
        }
    }

    /// Frame task: show the button past the threshold.
    pub fn refresh_button<D: Dom<Node = N>>(&mut self, dom: &D, scroll_y: f64) {
        self.frame_pending = false;
        let Some(button) = &self.button else {
            return;
        };
        if scroll_y > self.threshold {
            dom.add_class(button, VISIBLE_CLASS);
        } else {
            dom.remove_class(button, VISIBLE_CLASS);
        }
    }

    /// Timer task: shift parallax layers by a fraction of the offset.
    pub fn apply_parallax<D: Dom<Node = N>>(&self, dom: &D, scroll_y: f64) {
        if !self.parallax_enabled {
            return;
        }
        let transform = format!("translateY({}px)", scroll_y * self.parallax_factor);
        for node in dom.query_all(PARALLAX) {
            dom.set_style(&node, "transform", &transform);
        }
    }

    /// Follow an in-page `#fragment` link. Returns whether the default jump
    /// should be prevented; the bare `#` is left alone.
    pub fn follow_anchor<D: Dom<Node = N>>(&self, dom: &D, link: &N) -> bool {
        let href = dom.attr(link, "href").unwrap_or_default();
        let Some(fragment) = href.strip_prefix('#').filter(|f| !f.is_empty()) else {
            return false;
        };

        match dom.element_by_id(fragment) {
            Some(target) => dom.scroll_into_view(&target, ScrollBehavior::from_smooth(self.smooth)),
            None => debug!(fragment, "anchor target missing"),
        }
        true
    }
}
