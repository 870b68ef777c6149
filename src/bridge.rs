//! Bridge to the Rust extension
//!
//! Function calls go out as `runRust` events on the `extRust` channel. The
//! bridge also owns the poll cycle the extension switches on and off with
//! `startPolling` / `stopPolling`.

use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::host::{Host, Scheduler};
use crate::poll::{PollPhase, PollState, StartAction, Tick};
use crate::request::{
    CLOSE_EVENT, EXTENSION_ID, LONG_RUN, PING, POLL, RUN_EVENT, Request, events,
    shutdown_payload,
};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub struct Bridge<H: Host, S: Scheduler> {
    host: Rc<H>,
    scheduler: Rc<S>,
    config: BridgeConfig,
    poll: RefCell<PollState<S::Interval>>,
    // Handed to timer and event closures instead of a global instance
    this: Weak<Self>,
}

impl<H: Host + 'static, S: Scheduler + 'static> Bridge<H, S> {
    pub const VERSION: &'static str = "1.0.0";

    pub fn new(host: Rc<H>, scheduler: Rc<S>, config: BridgeConfig) -> Rc<Self> {
        Rc::new_cyclic(|this| Bridge {
            host,
            scheduler,
            config,
            poll: RefCell::new(PollState::new()),
            this: this.clone(),
        })
    }

    pub fn host(&self) -> &Rc<H> {
        &self.host
    }

    pub fn scheduler(&self) -> &Rc<S> {
        &self.scheduler
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn phase(&self) -> PollPhase {
        self.poll.borrow().phase()
    }

    pub fn is_stop_signalled(&self) -> bool {
        self.poll.borrow().is_stop_signalled()
    }

    /// Call an extension function. Resolves once the host accepted the event.
    pub async fn run(&self, function: &str, parameter: Option<Value>) -> Result<(), BridgeError> {
        let payload = Request::new(function, parameter).to_payload()?;

        if let Some(line) = self.dispatch_trace(RUN_EVENT, Some(&payload)) {
            log::info!("{}", line);
        }

        self.host.dispatch(EXTENSION_ID, RUN_EVENT, payload).await
    }

    /// Fire-and-forget `run`; failures are only logged
    pub fn run_detached(&self, function: &str, parameter: Option<Value>) {
        let Some(bridge) = self.this.upgrade() else {
            return;
        };
        let function = function.to_string();

        self.scheduler.spawn(Box::pin(async move {
            if let Err(e) = bridge.run(&function, parameter).await {
                log::error!("EXT_RUST: {} failed: {}", function, e);
            }
        }));
    }

    /// Ask the extension to quit, then quit the app.
    ///
    /// The `appClose` dispatch is awaited before `app.exit` so the extension
    /// sees it.
    pub async fn stop(&self) -> Result<(), BridgeError> {
        if let Some(line) = self.dispatch_trace(CLOSE_EVENT, None) {
            log::info!("{}", line);
        }

        self.host
            .dispatch(EXTENSION_ID, CLOSE_EVENT, shutdown_payload())
            .await?;
        self.host.exit().await
    }

    /// Send `text` to the extension's `ping`; the answer arrives as `pingResult`
    pub fn ping(&self, text: &str) {
        self.run_detached(PING, Some(Value::String(text.to_string())));
    }

    /// Start the long running task unless a poll cycle is believed active.
    /// Returns whether `longRun` was sent.
    pub fn request_long_run(&self) -> bool {
        let granted = self.poll.borrow_mut().try_begin_long_run();
        if granted {
            self.send_long_run();
        } else {
            log::debug!("Long running task already active, click ignored");
        }
        granted
    }

    fn send_long_run(&self) {
        let Some(bridge) = self.this.upgrade() else {
            return;
        };

        self.scheduler.spawn(Box::pin(async move {
            if let Err(e) = bridge.run(LONG_RUN, None).await {
                log::error!("EXT_RUST: {} failed: {}", LONG_RUN, e);
                bridge.poll.borrow_mut().abort_long_run();
            }
        }));
    }

    /// Console line traced before a dispatch, when debug is on
    fn dispatch_trace(&self, event: &str, payload: Option<&Value>) -> Option<String> {
        if !self.config.debug {
            return None;
        }
        Some(match payload {
            Some(payload) => format!("EXT_RUST: Calling {}.{} : {}", EXTENSION_ID, event, payload),
            None => format!("EXT_RUST: Calling {}.{}", EXTENSION_ID, event),
        })
    }

    pub fn on_start_polling(&self) -> Result<(), BridgeError> {
        let action = self.poll.borrow_mut().start();
        if action == StartAction::KeepTimer {
            log::debug!("Poll timer already armed");
            return Ok(());
        }

        let this = self.this.clone();
        let armed = self.scheduler.set_interval(
            self.config.poll_interval_ms,
            Box::new(move || {
                if let Some(bridge) = this.upgrade() {
                    bridge.on_tick();
                }
            }),
        );

        match armed {
            Ok(interval) => {
                self.poll.borrow_mut().set_timer(interval);
                log::debug!("Polling every {} ms", self.config.poll_interval_ms);
                Ok(())
            }
            Err(e) => {
                self.poll.borrow_mut().reset();
                Err(e)
            }
        }
    }

    /// Raise the stop flag; the timer goes away after one more poll
    pub fn on_stop_polling(&self) {
        self.poll.borrow_mut().stop();
    }

    fn on_tick(&self) {
        let tick = self.poll.borrow_mut().tick();
        match tick {
            Tick::Poll => self.run_detached(POLL, None),
            Tick::PollAndCancel(interval) => {
                self.run_detached(POLL, None);
                self.scheduler.clear_interval(interval);
                log::debug!("Poll timer cancelled");
            }
            Tick::Skip => {}
        }
    }

    /// Let the host's `startPolling` / `stopPolling` events drive the poll cycle
    pub async fn subscribe_polling(&self) -> Result<(), BridgeError> {
        let this = self.this.clone();
        self.host
            .on_event(
                events::START_POLLING,
                Box::new(move |_| {
                    if let Some(bridge) = this.upgrade() {
                        if let Err(e) = bridge.on_start_polling() {
                            log::error!("Could not start polling: {}", e);
                        }
                    }
                }),
            )
            .await?;

        let this = self.this.clone();
        self.host
            .on_event(
                events::STOP_POLLING,
                Box::new(move |_| {
                    if let Some(bridge) = this.upgrade() {
                        bridge.on_stop_polling();
                    }
                }),
            )
            .await
    }
}

impl<H: Host, S: Scheduler> Drop for Bridge<H, S> {
    fn drop(&mut self) {
        if let Some(interval) = self.poll.get_mut().reset() {
            self.scheduler.clear_interval(interval);
        }
    }
}
