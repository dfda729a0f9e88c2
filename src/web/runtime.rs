//! Event, observer and timer plumbing between the browser and a [`Page`].
//!
//! The page never touches the event loop. After every callback the runtime
//! asks it for the next timer deadline and whether it wants an animation
//! frame, and arms a single `gloo` timeout and frame request to match.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use gloo::events::{EventListener, EventListenerOptions};
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use js_sys::Array;
use showroom_core::dom::Viewport;
use showroom_core::{IntersectionEntry, ObserverKind, Page, PageSettings};
use tracing::{debug, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, HtmlInputElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use super::dom::BrowserHost;
use super::storage::LocalPreferenceStore;

type BrowserPage = Page<BrowserHost, LocalPreferenceStore>;
type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// One live intersection observer and the closure it calls.
struct Observer {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

pub struct Runtime {
    page: RefCell<BrowserPage>,
    listeners: RefCell<Vec<EventListener>>,
    observers: RefCell<Vec<Observer>>,
    /// Armed timeout and the deadline it fires at
    timer: RefCell<Option<(Duration, Timeout)>>,
    frame: RefCell<Option<AnimationFrame>>,
}

/// Build the page on the current document and start listening.
pub fn boot() -> Result<Rc<Runtime>> {
    let host = BrowserHost::new().context("binding to the document")?;
    let store = LocalPreferenceStore::open(host.window());
    let settings = PageSettings::from_document(&host);

    let runtime = Rc::new(Runtime {
        page: RefCell::new(Page::start(host, store, settings)),
        listeners: RefCell::new(Vec::new()),
        observers: RefCell::new(Vec::new()),
        timer: RefCell::new(None),
        frame: RefCell::new(None),
    });

    runtime.install_listeners()?;
    for kind in [ObserverKind::Reveal, ObserverKind::LazyImages] {
        runtime
            .install_observer(kind)
            .with_context(|| format!("creating the {:?} observer", kind))?;
    }
    info!("showroom runtime ready");
    Ok(runtime)
}

impl Runtime {
    /// Hand ownership to the JS side for the lifetime of the page.
    pub fn keep_alive(self: Rc<Self>) {
        std::mem::forget(self);
    }

    fn install_listeners(self: &Rc<Self>) -> Result<()> {
        let (window, document) = {
            let page = self.page.borrow();
            (page.host().window().clone(), page.host().document().clone())
        };
        let mut listeners = self.listeners.borrow_mut();

        let runtime = Rc::clone(self);
        listeners.push(EventListener::new_with_options(
            &document,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                let Some(target) = event_element(event) else {
                    return;
                };
                let outcome = runtime.page.borrow_mut().click(&target);
                if outcome.default_prevented {
                    event.prevent_default();
                }
                if outcome.propagation_stopped {
                    event.stop_propagation();
                }
                runtime.rearm();
            },
        ));

        let runtime = Rc::clone(self);
        listeners.push(EventListener::new(&document, "input", move |event: &Event| {
            let Some(input) = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            runtime.page.borrow_mut().input(&input, &input.value());
            runtime.rearm();
        }));

        for (name, entering) in [("mouseover", true), ("mouseout", false)] {
            let runtime = Rc::clone(self);
            listeners.push(EventListener::new(&document, name, move |event: &Event| {
                if let Some(target) = event_element(event) {
                    runtime.page.borrow_mut().hover(&target, entering);
                }
            }));
        }

        let runtime = Rc::clone(self);
        listeners.push(EventListener::new(&window, "scroll", move |_event: &Event| {
            runtime.page.borrow_mut().scroll();
            runtime.rearm();
        }));

        debug!(count = listeners.len(), "listeners installed");
        Ok(())
    }

    fn install_observer(self: &Rc<Self>, kind: ObserverKind) -> Result<()> {
        let (options, targets) = {
            let page = self.page.borrow();
            (page.observer_options(kind), page.observer_targets(kind))
        };
        if targets.is_empty() {
            debug!(?kind, "nothing to observe");
            return Ok(());
        }

        let runtime = Rc::downgrade(self);
        let callback: ObserverCallback =
            Closure::new(move |entries: Array, observer: IntersectionObserver| {
                let Some(runtime) = runtime.upgrade() else {
                    return;
                };
                let entries: Vec<_> = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| IntersectionEntry {
                        target: entry.target(),
                        is_intersecting: entry.is_intersecting(),
                    })
                    .collect();
                let done = runtime.page.borrow_mut().intersect(kind, &entries);
                for element in &done {
                    observer.unobserve(element);
                }
            });

        let init = IntersectionObserverInit::new();
        if let Some(threshold) = options.threshold {
            init.set_threshold(&JsValue::from_f64(threshold));
        }
        if let Some(margin) = &options.root_margin {
            init.set_root_margin(margin);
        }
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .map_err(|e| anyhow!("{:?}", e))?;
        for target in &targets {
            observer.observe(target);
        }
        debug!(?kind, count = targets.len(), "observer installed");

        self.observers.borrow_mut().push(Observer {
            observer,
            _callback: callback,
        });
        Ok(())
    }

    /// Match the armed timeout and frame request to what the page wants.
    fn rearm(self: &Rc<Self>) {
        let (deadline, wants_frame, now) = {
            let mut page = self.page.borrow_mut();
            (page.next_deadline(), page.wants_frame(), page.host().now())
        };

        let mut timer = self.timer.borrow_mut();
        match deadline {
            Some(due) if timer.as_ref().map(|(armed, _)| *armed) != Some(due) => {
                let wait = due.saturating_sub(now).as_millis();
                let runtime = Rc::clone(self);
                let timeout = Timeout::new(u32::try_from(wait).unwrap_or(u32::MAX), move || {
                    runtime.timer.borrow_mut().take();
                    runtime.page.borrow_mut().run_due();
                    runtime.rearm();
                });
                *timer = Some((due, timeout));
            }
            Some(_) => {}
            None => *timer = None,
        }
        drop(timer);

        if wants_frame && self.frame.borrow().is_none() {
            let runtime = Rc::clone(self);
            let handle = request_animation_frame(move |_| {
                runtime.frame.borrow_mut().take();
                runtime.page.borrow_mut().animation_frame();
                runtime.rearm();
            });
            *self.frame.borrow_mut() = Some(handle);
        }
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        for observer in self.observers.get_mut().drain(..) {
            observer.observer.disconnect();
        }
    }
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}
