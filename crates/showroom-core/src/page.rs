//! The page: every behavior wired onto one document.
//!
//! `Page::start` is the single startup hook. It applies the theme first, then
//! installs navigation, reveal animations, lazy images, search and filters,
//! scroll utilities, the gallery modal and page transitions. Afterwards the
//! host forwards events (`click`, `input`, `scroll`, `hover`, `intersect`)
//! and wakes the page for timers (`run_due`) and animation frames
//! (`animation_frame`).

use std::time::Duration;

use tracing::{debug, info};

use crate::animator::VisibilityAnimator;
use crate::config::{PageSettings, ViewportConfig};
use crate::dom::{Dom, Host, ScrollBehavior};
use crate::events::{Action, ClickOutcome, ClickRouter};
use crate::lazy::LazyLoader;
use crate::markup::{
    ANCHOR_LINK, FILTER_BUTTON, GALLERY_ITEM, LINK, MENU_TOGGLE, MODAL, MODAL_CLOSE, PAGE_LINK,
    SEARCH_INPUT, SCROLL_TOP, THEME_ATTR, THEME_BUTTON,
};
use crate::modal::GalleryModal;
use crate::nav::NavigationController;
use crate::observe::{IntersectionEntry, ObserverKind, ObserverOptions};
use crate::scheduler::{Scheduler, Task};
use crate::scroll::ScrollUtilities;
use crate::search::{self, Search};
use crate::storage::PreferenceStore;
use crate::styles;
use crate::theme::{Theme, ThemeController};
use crate::transition::PageTransition;

pub struct Page<H: Host, S> {
    host: H,
    settings: PageSettings,
    viewport: ViewportConfig,
    theme: ThemeController<S>,
    router: ClickRouter,
    scheduler: Scheduler,
    nav: Option<NavigationController<H::Node>>,
    animator: VisibilityAnimator<H::Node>,
    lazy: LazyLoader<H::Node>,
    search: Option<Search>,
    scroll: ScrollUtilities<H::Node>,
    modal: GalleryModal<H::Node>,
    transition: PageTransition,
}

impl<H: Host, S: PreferenceStore> Page<H, S> {
    /// Apply the theme and wire every behavior onto the current markup.
    pub fn start(host: H, store: S, settings: PageSettings) -> Self {
        let mut theme = ThemeController::new(store, settings.default_theme);
        theme.init(&host);

        let viewport = ViewportConfig::from_width(host.width(), &settings);
        debug!(?viewport, width = host.width(), "viewport snapshot");

        styles::inject_keyframes(&host);

        let nav = NavigationController::install(&host);
        let search = host.query_first(SEARCH_INPUT).map(|_| Search::new(&settings));
        if search.is_none() {
            debug!("no search input, search disabled");
        }

        let page = Self {
            router: Self::routes(&host, nav.is_some()),
            animator: VisibilityAnimator::install(&host, &settings),
            lazy: LazyLoader::install(&host),
            scroll: ScrollUtilities::install(&host, &settings, viewport),
            modal: GalleryModal::new(&settings),
            transition: PageTransition::new(&settings),
            scheduler: Scheduler::new(),
            nav,
            search,
            viewport,
            theme,
            settings,
            host,
        };
        info!(
            theme = %page.theme.current(),
            routes = page.router.routes().len(),
            parallax = page.scroll.parallax_enabled(),
            "page wired"
        );
        page
    }

    fn routes(host: &H, has_nav: bool) -> ClickRouter {
        let mut router = ClickRouter::new();
        router.register(THEME_BUTTON, Action::ChangeTheme);
        if has_nav {
            router.register(MENU_TOGGLE, Action::ToggleMenu);
            router.register(LINK, Action::NavLink);
        }
        if host.query_first(FILTER_BUTTON).is_some() {
            router.register(FILTER_BUTTON, Action::FilterButton);
        }
        if host.query_first(SCROLL_TOP).is_some() {
            router.register(SCROLL_TOP, Action::ScrollTop);
        }
        router.register(ANCHOR_LINK, Action::AnchorLink);
        if host.query_first(GALLERY_ITEM).is_some() {
            router.register(GALLERY_ITEM, Action::GalleryItem);
        }
        router.register(MODAL_CLOSE, Action::ModalClose);
        router.register_target_only(MODAL, Action::ModalBackdrop);
        router.register(PAGE_LINK, Action::PageLink);
        router
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Events
    // ═══════════════════════════════════════════════════════════════════════

    /// A click anywhere in the document.
    pub fn click(&mut self, target: &H::Node) -> ClickOutcome {
        let now = self.host.now();
        let mut outcome = ClickOutcome::default();

        for (action, node) in self.router.resolve(&self.host, target) {
            match action {
                Action::ChangeTheme => {
                    if let Some(id) = self.host.attr(&node, THEME_ATTR) {
                        self.theme.change(&self.host, &id);
                    }
                }
                Action::ToggleMenu => {
                    if let Some(nav) = &self.nav {
                        nav.toggle(&self.host);
                        outcome.propagation_stopped = true;
                    }
                }
                Action::NavLink => {
                    if let Some(nav) = self.nav.as_ref().filter(|n| n.contains(&self.host, &node)) {
                        nav.close(&self.host);
                    }
                }
                Action::FilterButton => {
                    search::apply_filter(&self.host, &node);
                }
                Action::ScrollTop => {
                    self.host.scroll_to_top(ScrollBehavior::Smooth);
                }
                Action::AnchorLink => {
                    outcome.default_prevented |= self.scroll.follow_anchor(&self.host, &node);
                }
                Action::GalleryItem => {
                    self.modal.open(&self.host, &node);
                }
                Action::ModalClose => {
                    if let Some(id) = self.modal.by_close_control(&node) {
                        self.modal.close(&self.host, &mut self.scheduler, now, id);
                    }
                }
                Action::ModalBackdrop => {
                    if let Some(id) = self.modal.by_backdrop(&node) {
                        self.modal.close(&self.host, &mut self.scheduler, now, id);
                    }
                }
                Action::PageLink => {
                    outcome.default_prevented |=
                        self.transition
                            .begin(&self.host, &mut self.scheduler, now, &node);
                }
            }
            if outcome.propagation_stopped {
                break;
            }
        }

        if !outcome.propagation_stopped {
            if let Some(nav) = &self.nav {
                nav.on_document_click(&self.host, target);
            }
        }
        outcome
    }

    /// Text typed into an input.
    pub fn input(&mut self, target: &H::Node, value: &str) {
        if !self.host.matches(target, SEARCH_INPUT) {
            return;
        }
        if let Some(search) = &mut self.search {
            search.on_input(&mut self.scheduler, self.host.now(), value);
        }
    }

    /// The window scrolled.
    pub fn scroll(&mut self) {
        self.scroll.on_scroll(&mut self.scheduler, self.host.now());
    }

    /// Pointer entered (`entering`) or left an element.
    pub fn hover(&mut self, target: &H::Node, entering: bool) {
        if self.host.matches(target, MODAL_CLOSE) {
            self.modal.hover_close(&self.host, target, entering);
        }
    }

    /// One intersection observer callback. Returns the elements the host must
    /// stop observing.
    pub fn intersect(
        &mut self,
        kind: ObserverKind,
        entries: &[IntersectionEntry<H::Node>],
    ) -> Vec<H::Node> {
        match kind {
            ObserverKind::Reveal => self.animator.on_intersect(&self.host, entries),
            ObserverKind::LazyImages => self.lazy.on_intersect(&self.host, entries),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Scheduling
    // ═══════════════════════════════════════════════════════════════════════

    /// Run every timer task due at the host's current time. Returns how many
    /// ran.
    pub fn run_due(&mut self) -> usize {
        let mut ran = 0;
        while let Some(task) = self.scheduler.pop_due(self.host.now()) {
            self.dispatch(task);
            ran += 1;
        }
        ran
    }

    /// Run the tasks queued for this animation frame.
    pub fn animation_frame(&mut self) {
        for task in self.scheduler.take_frame() {
            self.dispatch(task);
        }
    }

    pub fn next_deadline(&mut self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    pub fn wants_frame(&self) -> bool {
        self.scheduler.wants_frame()
    }

    fn dispatch(&mut self, task: Task) {
        match task {
            Task::RunSearch => {
                if let Some(search) = &mut self.search {
                    search.evaluate(&self.host);
                }
            }
            Task::RefreshScrollTop => {
                let offset = self.host.scroll_y();
                self.scroll.refresh_button(&self.host, offset);
            }
            Task::ApplyParallax => {
                self.scroll.apply_parallax(&self.host, self.host.scroll_y());
            }
            Task::RemoveModal(id) => self.modal.remove(&self.host, id),
            Task::Navigate(href) => {
                info!(%href, "navigating");
                self.host.navigate(&href);
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════════

    /// Elements a host observer of `kind` should watch.
    pub fn observer_targets(&self, kind: ObserverKind) -> Vec<H::Node> {
        match kind {
            ObserverKind::Reveal => self.animator.targets(),
            ObserverKind::LazyImages => self.lazy.targets(),
        }
    }

    pub fn observer_options(&self, kind: ObserverKind) -> ObserverOptions {
        match kind {
            ObserverKind::Reveal => self.animator.options().clone(),
            ObserverKind::LazyImages => self.lazy.options(),
        }
    }

    /// Re-run theme initialization from storage.
    pub fn init_theme(&mut self) -> Theme {
        self.theme.init(&self.host)
    }

    /// Programmatic theme switch; same rules as clicking a theme button.
    pub fn change_theme(&mut self, id: &str) -> bool {
        self.theme.change(&self.host, id)
    }

    pub fn theme(&self) -> &ThemeController<S> {
        &self.theme
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn settings(&self) -> &PageSettings {
        &self.settings
    }

    pub fn viewport(&self) -> ViewportConfig {
        self.viewport
    }

    pub fn nav(&self) -> Option<&NavigationController<H::Node>> {
        self.nav.as_ref()
    }

    pub fn search(&self) -> Option<&Search> {
        self.search.as_ref()
    }

    pub fn modal(&self) -> &GalleryModal<H::Node> {
        &self.modal
    }

    pub fn animator(&self) -> &VisibilityAnimator<H::Node> {
        &self.animator
    }
}
