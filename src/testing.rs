//! In-memory host and scheduler for native tests

use crate::error::BridgeError;
use crate::host::{EventHandler, Host, LocalTask, Scheduler};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Init,
    Dispatch {
        extension: String,
        event: String,
        payload: Value,
    },
    Exit,
    SetTitle(String),
    ShowWindow,
    Subscribe(String),
}

#[derive(Default)]
pub struct FakeHost {
    calls: RefCell<Vec<HostCall>>,
    handlers: RefCell<HashMap<String, EventHandler>>,
    pub fail_dispatch: Cell<bool>,
}

impl FakeHost {
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.borrow().clone()
    }

    /// Payloads dispatched as `event`, in order
    pub fn dispatched(&self, event: &str) -> Vec<Value> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                HostCall::Dispatch {
                    event: e, payload, ..
                } if e == event => Some(payload.clone()),
                _ => None,
            })
            .collect()
    }

    /// Function names of every `runRust` dispatch, in order
    pub fn functions(&self) -> Vec<String> {
        self.dispatched(crate::request::RUN_EVENT)
            .iter()
            .filter_map(|p| p["function"].as_str().map(str::to_string))
            .collect()
    }

    pub fn count(&self, function: &str) -> usize {
        self.functions().iter().filter(|f| *f == function).count()
    }

    pub fn is_subscribed(&self, event: &str) -> bool {
        self.handlers.borrow().contains_key(event)
    }

    /// Deliver a host event to its subscriber
    pub fn emit(&self, event: &str, detail: Option<&str>) {
        let handler = self.handlers.borrow_mut().remove(event);
        if let Some(mut handler) = handler {
            handler(detail.map(str::to_string));
            self.handlers
                .borrow_mut()
                .entry(event.to_string())
                .or_insert(handler);
        }
    }
}

impl Host for FakeHost {
    fn init(&self) -> Result<(), BridgeError> {
        self.calls.borrow_mut().push(HostCall::Init);
        Ok(())
    }

    async fn dispatch(
        &self,
        extension: &str,
        event: &str,
        payload: Value,
    ) -> Result<(), BridgeError> {
        if self.fail_dispatch.get() {
            return Err(BridgeError::Host {
                call: "extensions.dispatch",
                message: "NE_EX_EXTNOTC".to_string(),
            });
        }
        self.calls.borrow_mut().push(HostCall::Dispatch {
            extension: extension.to_string(),
            event: event.to_string(),
            payload,
        });
        Ok(())
    }

    async fn exit(&self) -> Result<(), BridgeError> {
        self.calls.borrow_mut().push(HostCall::Exit);
        Ok(())
    }

    async fn set_title(&self, title: &str) -> Result<(), BridgeError> {
        self.calls
            .borrow_mut()
            .push(HostCall::SetTitle(title.to_string()));
        Ok(())
    }

    async fn show_window(&self) -> Result<(), BridgeError> {
        self.calls.borrow_mut().push(HostCall::ShowWindow);
        Ok(())
    }

    async fn on_event(&self, event: &str, handler: EventHandler) -> Result<(), BridgeError> {
        self.calls
            .borrow_mut()
            .push(HostCall::Subscribe(event.to_string()));
        self.handlers
            .borrow_mut()
            .insert(event.to_string(), handler);
        Ok(())
    }
}

struct FakeInterval {
    id: u32,
    period_ms: u32,
    next_due: u64,
    tick: Option<Box<dyn FnMut()>>,
    cleared: bool,
}

/// Manual clock. Spawned tasks queue up and run when the clock advances or
/// on `run_pending`.
#[derive(Default)]
pub struct FakeScheduler {
    now: Cell<u64>,
    next_id: Cell<u32>,
    intervals: RefCell<Vec<FakeInterval>>,
    tasks: RefCell<Vec<LocalTask>>,
}

impl FakeScheduler {
    pub fn now(&self) -> u64 {
        self.now.get()
    }

    pub fn active_intervals(&self) -> usize {
        self.intervals.borrow().iter().filter(|i| !i.cleared).count()
    }

    pub fn run_pending(&self) {
        loop {
            let tasks: Vec<LocalTask> = self.tasks.borrow_mut().drain(..).collect();
            if tasks.is_empty() {
                break;
            }
            for task in tasks {
                futures::executor::block_on(task);
            }
        }
    }

    pub fn advance(&self, ms: u64) {
        let target = self.now.get() + ms;
        loop {
            let due = self
                .intervals
                .borrow()
                .iter()
                .filter(|i| !i.cleared && i.next_due <= target)
                .min_by_key(|i| i.next_due)
                .map(|i| i.id);
            let Some(id) = due else { break };

            let mut tick = {
                let mut intervals = self.intervals.borrow_mut();
                let Some(interval) = intervals.iter_mut().find(|i| i.id == id) else {
                    break;
                };
                self.now.set(interval.next_due);
                interval.next_due += u64::from(interval.period_ms);
                interval.tick.take()
            };

            if let Some(tick) = tick.as_mut() {
                tick();
            }

            if let Some(interval) = self.intervals.borrow_mut().iter_mut().find(|i| i.id == id) {
                if !interval.cleared {
                    interval.tick = tick;
                }
            }
            self.run_pending();
        }
        self.now.set(target);
        self.run_pending();
    }
}

impl Scheduler for FakeScheduler {
    type Interval = u32;

    fn spawn(&self, task: LocalTask) {
        self.tasks.borrow_mut().push(task);
    }

    fn set_interval(
        &self,
        period_ms: u32,
        tick: Box<dyn FnMut()>,
    ) -> Result<Self::Interval, BridgeError> {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.intervals.borrow_mut().push(FakeInterval {
            id,
            period_ms,
            next_due: self.now.get() + u64::from(period_ms),
            tick: Some(tick),
            cleared: false,
        });
        Ok(id)
    }

    fn clear_interval(&self, interval: Self::Interval) {
        if let Some(entry) = self
            .intervals
            .borrow_mut()
            .iter_mut()
            .find(|i| i.id == interval)
        {
            entry.cleared = true;
            entry.tick = None;
        }
    }
}
