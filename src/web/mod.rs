//! `web-sys` bindings.

mod dom;
mod logging;
mod runtime;
mod storage;

use wasm_bindgen::prelude::*;

use showroom_core::logging::LoggingBuilder;

use logging::BrowserConsole;

/// Module start hook: install logging, then wire the page.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    if let Err(e) = LoggingBuilder::new().init(BrowserConsole) {
        web_sys::console::warn_1(&format!("showroom: {}", e).into());
    }

    match runtime::boot() {
        Ok(runtime) => runtime.keep_alive(),
        Err(e) => tracing::error!(error = %format!("{:#}", e), "showroom failed to start"),
    }
}
