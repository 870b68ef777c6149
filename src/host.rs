//! Seams between the bridge and the desktop shell runtime

use crate::error::BridgeError;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

/// A future run on the page's single thread
pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// Receives the `detail` of a host event, when it carries text
pub type EventHandler = Box<dyn FnMut(Option<String>)>;

/// The shell runtime: lifecycle, window, event bus and extension dispatch.
///
/// Every call resolves once the host has accepted it, not once an extension
/// has acted on it.
#[allow(async_fn_in_trait)]
pub trait Host {
    fn init(&self) -> Result<(), BridgeError>;

    /// Publish `payload` as `event` to the extension `extension`
    async fn dispatch(&self, extension: &str, event: &str, payload: Value)
    -> Result<(), BridgeError>;

    async fn exit(&self) -> Result<(), BridgeError>;

    async fn set_title(&self, title: &str) -> Result<(), BridgeError>;

    async fn show_window(&self) -> Result<(), BridgeError>;

    /// Subscribe for the lifetime of the page
    async fn on_event(&self, event: &str, handler: EventHandler) -> Result<(), BridgeError>;
}

/// Timers and task spawning
pub trait Scheduler {
    type Interval;

    fn spawn(&self, task: LocalTask);

    fn set_interval(
        &self,
        period_ms: u32,
        tick: Box<dyn FnMut()>,
    ) -> Result<Self::Interval, BridgeError>;

    fn clear_interval(&self, interval: Self::Interval);
}
