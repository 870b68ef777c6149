//! Page start-up and the handlers the page hands to the host

use crate::bridge::Bridge;
use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::host::{Host, Scheduler};
use crate::request::events;
use std::rc::Rc;

pub struct PageController<H: Host, S: Scheduler> {
    bridge: Rc<Bridge<H, S>>,
    app_version: Option<String>,
}

impl<H: Host + 'static, S: Scheduler + 'static> PageController<H, S> {
    pub fn new(host: H, scheduler: S, config: BridgeConfig, app_version: Option<String>) -> Self {
        PageController {
            bridge: Bridge::new(Rc::new(host), Rc::new(scheduler), config),
            app_version,
        }
    }

    pub fn bridge(&self) -> &Rc<Bridge<H, S>> {
        &self.bridge
    }

    pub fn window_title(&self) -> String {
        self.bridge
            .config()
            .window_title(self.app_version.as_deref())
    }

    /// Init the host, wire the host events and title the window.
    /// Every received `pingResult` text goes to `on_message`.
    pub async fn start(&self, on_message: impl FnMut(String) + 'static) -> Result<(), BridgeError> {
        let host = self.bridge.host();
        let mut on_message = on_message;

        host.init()?;

        let exit_host = Rc::clone(host);
        let scheduler = Rc::clone(self.bridge.scheduler());
        host.on_event(
            events::WINDOW_CLOSE,
            Box::new(move |_| {
                let host = Rc::clone(&exit_host);
                scheduler.spawn(Box::pin(async move {
                    if let Err(e) = host.exit().await {
                        log::error!("Exit failed: {}", e);
                    }
                }));
            }),
        )
        .await?;

        host.on_event(
            events::PING_RESULT,
            Box::new(move |detail| {
                let text = detail.unwrap_or_default();
                log::debug!("DBG RECEIVED: {}", text);
                on_message(text);
            }),
        )
        .await?;

        self.bridge.subscribe_polling().await?;

        host.set_title(&self.window_title()).await?;
        if self.bridge.config().show_window {
            host.show_window().await?;
        }

        log::info!("Page ready, bridge v{}", Bridge::<H, S>::VERSION);
        Ok(())
    }

    /// Click on the long-run control
    pub fn on_long_run_click(&self) -> bool {
        self.bridge.request_long_run()
    }

    pub fn on_ping_click(&self, text: &str) {
        self.bridge.ping(text);
    }

    /// Shut the extension down and quit
    pub async fn quit(&self) -> Result<(), BridgeError> {
        self.bridge.stop().await
    }
}
