//! Common traits defining the interfaces this crate consumes

use crate::common::types::State;

/// Decides whether a single state is valid (collision free, within limits
/// the caller cares about, ...). The engine treats it as a black box.
pub trait StateValidityChecker {
    /// Returns true if `state` is acceptable
    fn is_valid(&self, state: &State) -> bool;
}

impl<F> StateValidityChecker for F
where
    F: Fn(&State) -> bool,
{
    fn is_valid(&self, state: &State) -> bool {
        self(state)
    }
}

/// Checker that accepts every state
#[derive(Debug, Clone, Copy, Default)]
pub struct AllValid;

impl StateValidityChecker for AllValid {
    fn is_valid(&self, _state: &State) -> bool {
        true
    }
}
