//! Request payloads and the fixed names shared with the Rust extension

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Extension id the host routes our dispatches to
pub const EXTENSION_ID: &str = "extRust";

/// Event carrying a function call for the extension
pub const RUN_EVENT: &str = "runRust";

/// Event telling the extension to shut down
pub const CLOSE_EVENT: &str = "appClose";

// Functions the extension understands
pub const LONG_RUN: &str = "longRun";
pub const POLL: &str = "poll";
pub const PING: &str = "ping";

/// Host events the page subscribes to
pub mod events {
    pub const WINDOW_CLOSE: &str = "windowClose";
    pub const PING_RESULT: &str = "pingResult";
    pub const START_POLLING: &str = "startPolling";
    pub const STOP_POLLING: &str = "stopPolling";
}

/// A function call for the extension
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Request {
    pub function: String,
    pub parameter: Option<Value>,
}

impl Request {
    pub fn new(function: impl Into<String>, parameter: Option<Value>) -> Request {
        Request {
            function: function.into(),
            parameter,
        }
    }

    pub fn to_payload(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Payload sent with `appClose`
pub fn shutdown_payload() -> Value {
    Value::String(String::new())
}
