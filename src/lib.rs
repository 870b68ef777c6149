//! Neutralino RustExtension front-end
//! Built with Rust + WASM + Yew

mod bridge;
mod config;
mod error;
mod host;
mod message_log;
pub mod neutralino;
mod page;
mod poll;
mod request;
#[cfg(test)]
mod testing;
pub mod ui;

pub use bridge::Bridge;
pub use config::BridgeConfig;
pub use error::BridgeError;
pub use host::{EventHandler, Host, LocalTask, Scheduler};
pub use message_log::MessageLog;
pub use page::PageController;
pub use poll::{PollPhase, PollState};
pub use request::Request;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    // Narrowed to the configured level in start_app
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
}

// Start the Yew app; `config` may be undefined
#[wasm_bindgen]
pub fn start_app(config: JsValue) -> Result<(), JsValue> {
    let config = BridgeConfig::from_js(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    log::set_max_level(config.log_level().to_level_filter());

    yew::Renderer::<ui::app::App>::with_props(ui::app::AppProps { config }).render();
    Ok(())
}

#[wasm_bindgen]
pub fn bridge_version() -> String {
    bridge::Bridge::<neutralino::NeutralinoHost, neutralino::BrowserScheduler>::VERSION.to_string()
}
