//! Poll cycle state machine
//!
//! The extension announces `startPolling` when a long running task begins and
//! `stopPolling` when it is done. While polling, a fixed interval timer asks
//! the extension for progress. Cancellation is lazy: `stop` only raises the
//! stop flag, and the next tick sends one last poll before dropping the timer.

/// Where the poll cycle currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    /// Stop flag raised, nothing running
    Idle,
    /// `longRun` dispatched, waiting for `startPolling`
    LongRunRequested,
    /// Stop flag cleared, timer armed
    Polling,
    /// Stop flag raised, timer still armed until its next tick
    Draining,
}

/// What the caller must do after `start`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartAction {
    ArmTimer,
    KeepTimer,
}

/// What the caller must do when the timer fires
#[derive(Debug, PartialEq, Eq)]
pub enum Tick<T> {
    /// Send a poll, keep the timer
    Poll,
    /// Send a poll, then clear the returned timer
    PollAndCancel(T),
    /// Stale tick from an already released timer
    Skip,
}

/// Stop flag plus the handle of the single active timer
#[derive(Debug)]
pub struct PollState<T> {
    phase: PollPhase,
    timer: Option<T>,
}

impl<T> PollState<T> {
    pub fn new() -> Self {
        PollState {
            phase: PollPhase::Idle,
            timer: None,
        }
    }

    pub fn phase(&self) -> PollPhase {
        self.phase
    }

    /// The stop flag as the page sees it
    pub fn is_stop_signalled(&self) -> bool {
        matches!(self.phase, PollPhase::Idle | PollPhase::Draining)
    }

    pub fn has_timer(&self) -> bool {
        self.timer.is_some()
    }

    /// Clear the stop flag. A timer that is still armed is reused.
    pub fn start(&mut self) -> StartAction {
        self.phase = PollPhase::Polling;
        if self.timer.is_some() {
            StartAction::KeepTimer
        } else {
            StartAction::ArmTimer
        }
    }

    /// Store the timer armed after `StartAction::ArmTimer`
    pub fn set_timer(&mut self, timer: T) {
        self.timer = Some(timer);
    }

    /// Back to `Idle`, handing out the timer if one is armed
    pub fn reset(&mut self) -> Option<T> {
        self.phase = PollPhase::Idle;
        self.timer.take()
    }

    /// Raise the stop flag. The timer stays armed until the next tick.
    pub fn stop(&mut self) {
        self.phase = match self.phase {
            PollPhase::Polling => PollPhase::Draining,
            PollPhase::LongRunRequested => PollPhase::Idle,
            phase => phase,
        };
    }

    pub fn tick(&mut self) -> Tick<T> {
        if self.timer.is_none() {
            return Tick::Skip;
        }
        if self.phase == PollPhase::Polling {
            return Tick::Poll;
        }

        if self.phase == PollPhase::Draining {
            self.phase = PollPhase::Idle;
        }
        match self.timer.take() {
            Some(timer) => Tick::PollAndCancel(timer),
            None => Tick::Skip,
        }
    }

    /// Click guard for the long running task.
    ///
    /// Allowed only while the stop flag is raised. A granted request moves to
    /// `LongRunRequested`, so a second click before `startPolling` arrives is
    /// refused.
    pub fn try_begin_long_run(&mut self) -> bool {
        if !self.is_stop_signalled() {
            return false;
        }
        self.phase = PollPhase::LongRunRequested;
        true
    }

    /// The `longRun` request never reached the host; raise the stop flag again
    pub fn abort_long_run(&mut self) {
        if self.phase == PollPhase::LongRunRequested {
            self.phase = PollPhase::Idle;
        }
    }
}

impl<T> Default for PollState<T> {
    fn default() -> Self {
        Self::new()
    }
}
