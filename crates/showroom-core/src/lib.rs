//! Showroom Core Library
//!
//! Client-side behaviors for the Showroom static site, independent of any
//! particular browser binding.
//!
//! ## Overview
//!
//! The site's markup is rendered elsewhere. This crate wires behavior onto it:
//! theme switching, the mobile menu, card search and category filters,
//! entrance animations, lazy images, scroll helpers, a gallery modal and soft
//! page transitions.
//!
//! Everything reaches the page through the [`dom::Dom`] and [`dom::Viewport`]
//! traits, and all deferred work goes through [`scheduler::Scheduler`], so the
//! whole layer runs deterministically against [`dom::MemoryDocument`].
//!
//! ## Quick Start
//!
//! ```
//! use showroom_core::dom::{Dom, MemoryDocument};
//! use showroom_core::storage::{MemoryStore, THEME_KEY};
//! use showroom_core::{Page, PageSettings};
//!
//! let doc = MemoryDocument::new(1280.0);
//! let store = MemoryStore::with(THEME_KEY, "sport");
//!
//! let page = Page::start(doc, store, PageSettings::default());
//! let root = page.host().root();
//! assert_eq!(page.host().attr(&root, "data-theme").as_deref(), Some("sport"));
//! ```

pub mod animator;
pub mod config;
pub mod dom;
pub mod error;
pub mod events;
pub mod lazy;
pub mod logging;
pub mod markup;
pub mod modal;
pub mod nav;
pub mod observe;
pub mod page;
pub mod scheduler;
pub mod scroll;
pub mod search;
pub mod storage;
pub mod styles;
pub mod theme;
pub mod transition;

// Re-exports
pub use config::{PageSettings, ViewportConfig};
pub use error::{ShowroomError, ShowroomResult};
pub use events::ClickOutcome;
pub use observe::{IntersectionEntry, ObserverKind, ObserverOptions};
pub use page::Page;
pub use storage::{MemoryStore, PreferenceStore};
pub use theme::{Theme, ThemeController};
