//! Bindings to the Neutralino global API and the browser timers

use crate::error::{BridgeError, describe_js};
use crate::host::{EventHandler, Host, LocalTask, Scheduler};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = Neutralino, js_name = init)]
    fn neutralino_init() -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["Neutralino", "extensions"], js_name = dispatch)]
    async fn extensions_dispatch(extension_id: &str, event: &str, data: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["Neutralino", "app"], js_name = exit)]
    async fn app_exit() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["Neutralino", "window"], js_name = setTitle)]
    async fn window_set_title(title: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["Neutralino", "window"], js_name = show)]
    async fn window_show() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["Neutralino", "events"], js_name = on)]
    async fn events_on(event: &str, handler: &js_sys::Function) -> Result<JsValue, JsValue>;
}

/// App version the host injects as `NL_APPVERSION`
pub fn app_version() -> Option<String> {
    js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("NL_APPVERSION"))
        .ok()
        .and_then(|v| v.as_string())
}

fn to_js(value: &Value) -> Result<JsValue, BridgeError> {
    // Plain JS objects, not Maps, so the host can JSON.stringify them
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| BridgeError::Serialize(e.to_string()))
}

fn event_detail(event: &JsValue) -> Option<String> {
    let detail = match event.dyn_ref::<web_sys::CustomEvent>() {
        Some(custom) => custom.detail(),
        None => js_sys::Reflect::get(event, &"detail".into()).ok()?,
    };

    if detail.is_undefined() || detail.is_null() {
        return None;
    }
    detail
        .as_string()
        .or_else(|| js_sys::JSON::stringify(&detail).ok().map(String::from))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NeutralinoHost;

impl Host for NeutralinoHost {
    fn init(&self) -> Result<(), BridgeError> {
        neutralino_init().map_err(|e| BridgeError::host("init", e))
    }

    async fn dispatch(
        &self,
        extension: &str,
        event: &str,
        payload: Value,
    ) -> Result<(), BridgeError> {
        let data = to_js(&payload)?;
        extensions_dispatch(extension, event, data)
            .await
            .map(|_| ())
            .map_err(|e| BridgeError::host("extensions.dispatch", e))
    }

    async fn exit(&self) -> Result<(), BridgeError> {
        app_exit()
            .await
            .map(|_| ())
            .map_err(|e| BridgeError::host("app.exit", e))
    }

    async fn set_title(&self, title: &str) -> Result<(), BridgeError> {
        window_set_title(title)
            .await
            .map(|_| ())
            .map_err(|e| BridgeError::host("window.setTitle", e))
    }

    async fn show_window(&self) -> Result<(), BridgeError> {
        window_show()
            .await
            .map(|_| ())
            .map_err(|e| BridgeError::host("window.show", e))
    }

    async fn on_event(&self, event: &str, handler: EventHandler) -> Result<(), BridgeError> {
        let mut handler = handler;
        let callback = Closure::wrap(Box::new(move |e: JsValue| {
            handler(event_detail(&e));
        }) as Box<dyn FnMut(JsValue)>);

        events_on(event, callback.as_ref().unchecked_ref())
            .await
            .map_err(|e| BridgeError::host("events.on", e))?;

        // Subscriptions live as long as the page
        callback.forget();
        Ok(())
    }
}

pub struct BrowserInterval {
    id: i32,
    _tick: Closure<dyn FnMut()>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Interval = BrowserInterval;

    fn spawn(&self, task: LocalTask) {
        spawn_local(task);
    }

    fn set_interval(
        &self,
        period_ms: u32,
        tick: Box<dyn FnMut()>,
    ) -> Result<Self::Interval, BridgeError> {
        let window =
            web_sys::window().ok_or_else(|| BridgeError::Scheduler("no window".to_string()))?;
        let timeout = i32::try_from(period_ms)
            .map_err(|_| BridgeError::Scheduler(format!("interval too long: {}", period_ms)))?;

        let tick = Closure::wrap(tick);
        let id = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                timeout,
            )
            .map_err(|e| BridgeError::Scheduler(describe_js(&e)))?;

        Ok(BrowserInterval { id, _tick: tick })
    }

    fn clear_interval(&self, interval: Self::Interval) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(interval.id);
        }
        // Usually called from inside this very tick; free the closure afterwards
        spawn_local(async move {
            drop(interval);
        });
    }
}
