//! Error type shared by the bridge, the host binding and config loading

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BridgeError {
    #[error("Host call {call} failed: {message}")]
    Host { call: &'static str, message: String },

    #[error("Failed to serialize payload: {0}")]
    Serialize(String),

    #[error("Timer error: {0}")]
    Scheduler(String),

    #[error("Invalid config: {0}")]
    Config(String),
}

impl BridgeError {
    pub fn host(call: &'static str, err: JsValue) -> BridgeError {
        BridgeError::Host {
            call,
            message: describe_js(&err),
        }
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::Serialize(err.to_string())
    }
}

/// Best-effort text for a rejected promise or thrown value
pub fn describe_js(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &"message".into())
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", value))
}
