//! Start-up options passed in from the page script

use crate::error::BridgeError;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

pub const DEFAULT_POLL_INTERVAL_MS: u32 = 500;
pub const DEFAULT_TITLE_PREFIX: &str = "Neutralino RustExtension";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct BridgeConfig {
    /// Trace every dispatch to the console
    pub debug: bool,
    pub poll_interval_ms: u32,
    pub title_prefix: String,
    /// Call `window.show()` after setting the title
    pub show_window: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        BridgeConfig {
            debug: false,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            title_prefix: DEFAULT_TITLE_PREFIX.to_string(),
            show_window: true,
        }
    }
}

impl BridgeConfig {
    pub fn validate(self) -> Result<Self, BridgeError> {
        if self.poll_interval_ms == 0 {
            return Err(BridgeError::Config(
                "pollIntervalMs must be positive".to_string(),
            ));
        }
        Ok(self)
    }

    /// Decode the object handed to `start_app`; `undefined` or `null` means defaults
    pub fn from_js(value: JsValue) -> Result<Self, BridgeError> {
        if value.is_undefined() || value.is_null() {
            return Ok(BridgeConfig::default());
        }
        let config: BridgeConfig = serde_wasm_bindgen::from_value(value)
            .map_err(|e| BridgeError::Config(e.to_string()))?;
        config.validate()
    }

    pub fn window_title(&self, app_version: Option<&str>) -> String {
        match app_version {
            Some(version) => format!("{} {}", self.title_prefix, version),
            None => self.title_prefix.clone(),
        }
    }

    pub fn log_level(&self) -> log::Level {
        if self.debug {
            log::Level::Debug
        } else {
            log::Level::Info
        }
    }
}
