//! Space information: a state space bound to a validity checker.
//!
//! This is the handle planners hold. Motion checking, resampling and
//! repair all go through it.

use crate::common::{State, StateValidityChecker};
use crate::kinematic::difference::DifferenceStep;
use crate::kinematic::state_space::StateSpace;

/// Which segment check `check_motion` uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionCheckMode {
    /// Breadth-first bisection; answers valid/invalid only
    Subdivision,
    /// Left-to-right scan; locates the first invalid state
    Incremental,
}

impl Default for MotionCheckMode {
    fn default() -> Self {
        MotionCheckMode::Subdivision
    }
}

pub struct SpaceInformation<V> {
    space: StateSpace,
    checker: V,
    motion_check_mode: MotionCheckMode,
}

impl<V: StateValidityChecker> SpaceInformation<V> {
    pub fn new(space: StateSpace, checker: V) -> Self {
        Self { space, checker, motion_check_mode: MotionCheckMode::default() }
    }

    pub fn with_motion_check_mode(mut self, mode: MotionCheckMode) -> Self {
        self.motion_check_mode = mode;
        self
    }

    pub fn motion_check_mode(&self) -> MotionCheckMode {
        self.motion_check_mode
    }

    pub fn space(&self) -> &StateSpace {
        &self.space
    }

    pub fn checker(&self) -> &V {
        &self.checker
    }

    pub fn dimension(&self) -> usize {
        self.space.dimension()
    }

    pub fn alloc_state(&self) -> State {
        self.space.alloc_state()
    }

    pub fn is_valid(&self, state: &State) -> bool {
        self.space.assert_dimension(state);
        self.checker.is_valid(state)
    }

    pub fn satisfies_bounds(&self, state: &State) -> bool {
        self.space.satisfies_bounds(state)
    }

    pub fn find_difference_step(&self, s1: &State, s2: &State, factor: f64) -> DifferenceStep {
        self.space.difference_step(s1, s2, factor)
    }

    pub fn distance(&self, s1: &State, s2: &State) -> f64 {
        self.space.distance(s1, s2)
    }
}
