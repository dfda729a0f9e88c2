//! Showroom browser entry point.
//!
//! Compiled to `wasm32`, this crate binds the behaviors in [`showroom_core`]
//! to the live document: `web-sys` implements the host traits, `gloo` carries
//! events, timers and animation frames, and `localStorage` keeps the theme.
//!
//! On other targets it only re-exports the core crate.
//!
//! ## Usage
//!
//! ```ignore
//! // index.html
//! <script type="module">
//!   import init from "./pkg/showroom.js";
//!   init();
//! </script>
//! ```

pub use showroom_core;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::start;
