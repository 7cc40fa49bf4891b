//! Solve timer.
//!
//! Time is always passed in; the timer never reads a clock.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

/// Timer lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum TimerState {
    /// Not yet started.
    Idle,
    /// Counting.
    Running,
    /// Frozen by a pause.
    Paused,
    /// Frozen for good after a correct solve.
    Stopped,
}

/// Illegal timer transition.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Cannot {} a timer that is {}", operation, state)]
pub struct TimingError {
    /// Requested operation.
    pub operation: &'static str,
    /// State the timer was in.
    pub state: TimerState,
}

impl std::error::Error for TimingError {}

/// Accumulated solve time plus the origin of the running span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timing {
    accumulated: Duration,
    origin: Option<DateTime<Utc>>,
    state: TimerState,
}

impl Timing {
    /// Creates an idle timer with nothing accumulated.
    pub fn new() -> Self {
        Self {
            accumulated: Duration::ZERO,
            origin: None,
            state: TimerState::Idle,
        }
    }

    /// A timer already running from `now`.
    pub fn started_at(now: DateTime<Utc>) -> Self {
        Self {
            accumulated: Duration::ZERO,
            origin: Some(now),
            state: TimerState::Running,
        }
    }

    /// Current state.
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Time banked by completed spans.
    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    /// Start of the running span, if running.
    pub fn origin(&self) -> Option<DateTime<Utc>> {
        self.origin
    }

    /// Starts or resumes the timer. Valid from `Idle` and `Paused`.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), TimingError> {
        match self.state {
            TimerState::Idle | TimerState::Paused => {
                self.origin = Some(now);
                self.state = TimerState::Running;
                debug!(accumulated_ms = self.accumulated.as_millis() as u64, "Timer running");
                Ok(())
            }
            state => Err(TimingError {
                operation: "start",
                state,
            }),
        }
    }

    /// Banks the running span and pauses. Valid only while `Running`.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn pause(&mut self, now: DateTime<Utc>) -> Result<(), TimingError> {
        self.bank("pause", now)?;
        self.state = TimerState::Paused;
        Ok(())
    }

    /// Banks the running span and stops for good. Valid only while `Running`.
    ///
    /// Returns the final duration.
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn stop(&mut self, now: DateTime<Utc>) -> Result<Duration, TimingError> {
        self.bank("stop", now)?;
        self.state = TimerState::Stopped;
        Ok(self.accumulated)
    }

    /// Accumulated time plus the current running span, for display.
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        self.accumulated + self.origin.map_or(Duration::ZERO, |origin| span(origin, now))
    }

    fn bank(&mut self, operation: &'static str, now: DateTime<Utc>) -> Result<(), TimingError> {
        match (self.state, self.origin) {
            (TimerState::Running, Some(origin)) => {
                self.accumulated += span(origin, now);
                self.origin = None;
                Ok(())
            }
            (state, _) => Err(TimingError { operation, state }),
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::new()
    }
}

/// Non-negative wall time between two instants. A clock that steps
/// backwards contributes nothing.
fn span(from: DateTime<Utc>, to: DateTime<Utc>) -> Duration {
    (to - from).to_std().unwrap_or(Duration::ZERO)
}
