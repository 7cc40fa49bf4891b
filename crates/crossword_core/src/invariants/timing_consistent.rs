//! Timer state agrees with its running origin.

use std::time::Duration;

use super::Invariant;
use crate::timing::TimerState;
use crate::typestate::Session;

/// Invariant: a running timer has an origin, any other state has none, and
/// an idle timer has banked nothing.
pub struct TimingConsistentInvariant;

impl Invariant<Session> for TimingConsistentInvariant {
    fn holds(session: &Session) -> bool {
        let timing = session.timing();
        match timing.state() {
            TimerState::Running => timing.origin().is_some(),
            TimerState::Idle => timing.origin().is_none() && timing.accumulated() == Duration::ZERO,
            TimerState::Paused | TimerState::Stopped => timing.origin().is_none(),
        }
    }

    fn description() -> &'static str {
        "Timer origin is set exactly while running"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::mini_session;
    use crate::timing::Timing;
    use chrono::{DateTime, Utc};

    #[test]
    fn test_idle_and_running_hold() {
        let mut session = mini_session();
        assert!(TimingConsistentInvariant::holds(&session));

        session.timing = Timing::started_at(DateTime::<Utc>::UNIX_EPOCH);
        assert!(TimingConsistentInvariant::holds(&session));
    }

    #[test]
    fn test_paused_holds() {
        let mut session = mini_session();
        session.timing = Timing::started_at(DateTime::<Utc>::UNIX_EPOCH);
        session
            .timing
            .pause(DateTime::<Utc>::UNIX_EPOCH)
            .expect("Pause");
        assert!(TimingConsistentInvariant::holds(&session));
    }
}
