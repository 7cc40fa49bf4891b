//! First-class invariants for crossword sessions.
//!
//! Invariants are logical properties that must hold after every applied
//! action. They are checked in debug builds and tested on their own.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
///
/// Implemented for tuples so sets compose as plain types.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod focus_resolvable;
pub mod guesses_aligned;
pub mod timing_consistent;

pub use focus_resolvable::FocusResolvableInvariant;
pub use guesses_aligned::GuessesAlignedInvariant;
pub use timing_consistent::TimingConsistentInvariant;

/// All session invariants as a composable set.
pub type CrosswordInvariants = (
    GuessesAlignedInvariant,
    FocusResolvableInvariant,
    TimingConsistentInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::mini_session;
    use crate::types::Letter;

    #[test]
    fn test_invariant_set_holds_for_fresh_session() {
        let session = mini_session();
        assert!(CrosswordInvariants::check_all(&session).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut session = mini_session();
        session.board.guesses_mut()[4] = Letter::new('x');
        session.focus = crate::Focus::new(4, crate::Direction::Across);

        let violations = CrosswordInvariants::check_all(&session).expect_err("Corrupted");
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_two_invariants_as_set() {
        type BoardOnly = (GuessesAlignedInvariant, FocusResolvableInvariant);
        assert!(BoardOnly::check_all(&mini_session()).is_ok());
    }
}
