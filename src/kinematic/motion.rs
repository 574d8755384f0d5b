//! Validity checking of motions between two states and of whole paths.
//!
//! Both segment checks assume the motion starts in a valid state; `s1` is
//! never tested. The end state `s2` is tested first since it is the most
//! likely to fail for motions produced by planners.

use std::collections::VecDeque;

use itertools::Itertools;
use log::debug;

use crate::common::{KinematicPath, State, StateValidityChecker};
use crate::kinematic::space_information::{MotionCheckMode, SpaceInformation};

/// Last valid point found by an incremental check
#[derive(Debug, Clone, PartialEq)]
pub struct LastValid {
    pub state: State,
    /// Fraction of the motion that is known to be valid, in `[0, 1)`
    pub time: f64,
}

/// Outcome of an incremental motion check
#[derive(Debug, Clone, PartialEq)]
pub enum MotionCheck {
    Valid,
    /// The motion is invalid. When an interior state failed, the last valid
    /// state before it is reported; a failing end state reports nothing.
    Invalid(Option<LastValid>),
}

impl MotionCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, MotionCheck::Valid)
    }

    pub fn last_valid(&self) -> Option<&LastValid> {
        match self {
            MotionCheck::Valid => None,
            MotionCheck::Invalid(last) => last.as_ref(),
        }
    }
}

impl<V: StateValidityChecker> SpaceInformation<V> {
    /// Check a motion with the configured default strategy
    pub fn check_motion(&self, s1: &State, s2: &State) -> bool {
        match self.motion_check_mode() {
            MotionCheckMode::Subdivision => self.check_motion_subdivision(s1, s2),
            MotionCheckMode::Incremental => self.check_motion_incremental(s1, s2).is_valid(),
        }
    }

    /// Check the motion by repeatedly testing the middle of the remaining
    /// index ranges, breadth first.
    ///
    /// Finds an invalid state if there is one at the checked resolution, but
    /// not necessarily the first one along the motion.
    pub fn check_motion_subdivision(&self, s1: &State, s2: &State) -> bool {
        if !self.is_valid(s2) {
            return false;
        }

        let ds = self.find_difference_step(s1, s2, 1.0);

        let mut pos: VecDeque<(usize, usize)> = VecDeque::new();
        if ds.nd >= 2 {
            pos.push_back((1, ds.nd - 1));
        }

        let mut test = self.alloc_state();
        while let Some((lo, hi)) = pos.pop_front() {
            let mid = (lo + hi) / 2;
            ds.write_state_at(s1, mid, &mut test);
            if !self.is_valid(&test) {
                return false;
            }

            if lo < mid {
                pos.push_back((lo, mid - 1));
            }
            if hi > mid {
                pos.push_back((mid + 1, hi));
            }
        }

        true
    }

    /// Check the motion state by state from `s1` towards `s2`
    pub fn check_motion_incremental(&self, s1: &State, s2: &State) -> MotionCheck {
        if !self.is_valid(s2) {
            return MotionCheck::Invalid(None);
        }

        let ds = self.find_difference_step(s1, s2, 1.0);

        let mut test = self.alloc_state();
        for j in 1..ds.nd {
            ds.write_state_at(s1, j, &mut test);
            if !self.is_valid(&test) {
                return MotionCheck::Invalid(Some(LastValid {
                    state: ds.state_at(s1, j - 1),
                    time: (j - 1) as f64 / ds.nd as f64,
                }));
            }
        }

        MotionCheck::Valid
    }

    /// A path is valid when its first state is valid and every motion
    /// between consecutive states passes the subdivision check.
    /// Empty paths are valid.
    pub fn check_path(&self, path: &KinematicPath) -> bool {
        let first = match path.first() {
            Some(first) => first,
            None => return true,
        };

        if !self.is_valid(first) {
            debug!("path starts in an invalid state {}", first);
            return false;
        }

        path.states
            .iter()
            .tuple_windows()
            .all(|(a, b)| self.check_motion_subdivision(a, b))
    }
}
