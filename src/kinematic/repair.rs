//! Repair of start and goal states that are out of bounds or invalid.
//!
//! The repair first clamps the state into the bounds of the space and, if
//! that is not enough, samples around the clamped state until a valid one
//! is found or the attempt budget runs out.

use log::{info, warn};

use crate::common::{State, StateValidityChecker};
use crate::kinematic::sampling::SamplingCore;
use crate::kinematic::space_information::SpaceInformation;

/// Goal representations a problem can carry
#[derive(Debug, Clone, PartialEq)]
pub enum Goal {
    /// A single fixed goal state
    State(State),
    /// Any state within `threshold` of `center`. Not repaired.
    Region { center: State, threshold: f64 },
}

/// Start states and goal of a planning problem
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProblemDefinition {
    pub start_states: Vec<State>,
    pub goal: Option<Goal>,
}

impl ProblemDefinition {
    pub fn new(start_states: Vec<State>, goal: Goal) -> Self {
        Self { start_states, goal: Some(goal) }
    }
}

/// What happened to one input state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixOutcome {
    AlreadyValid,
    Repaired,
    /// No valid state was found; the input was left unmodified
    Unfixable,
    /// The goal is absent or not a fixed state
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixReport {
    pub starts: Vec<FixOutcome>,
    pub goal: FixOutcome,
}

impl FixReport {
    /// True when no start state nor the goal was left unfixable
    pub fn all_valid(&self) -> bool {
        self.starts
            .iter()
            .chain(std::iter::once(&self.goal))
            .all(|o| *o != FixOutcome::Unfixable)
    }
}

pub struct StateRepairer<'a, V> {
    si: &'a SpaceInformation<V>,
    sampler: SamplingCore<'a>,
}

impl<'a, V: StateValidityChecker> StateRepairer<'a, V> {
    /// Create a repairer drawing from a sampler seeded with `seed`
    pub fn new(si: &'a SpaceInformation<V>, seed: u64) -> Self {
        Self { si, sampler: SamplingCore::new(si.space(), seed) }
    }

    pub fn from_sampler(si: &'a SpaceInformation<V>, sampler: SamplingCore<'a>) -> Self {
        Self { si, sampler }
    }

    /// Find a valid state near `near`.
    ///
    /// The clamped copy of `near` is returned directly when it is valid,
    /// without drawing any random sample. Otherwise every attempt samples
    /// independently around the clamped copy. An empty `rho` disables the
    /// random search: only the clamped copy is checked.
    pub fn search_valid_nearby(
        &mut self,
        near: &State,
        rho: &[f64],
        attempts: usize,
    ) -> Option<State> {
        let si = self.si;
        let space = si.space();
        assert!(
            rho.is_empty() || rho.len() == space.dimension(),
            "margin vector length must match the space dimension"
        );

        let mut center = near.clone();
        if !space.satisfies_bounds(&center) {
            space.enforce_bounds(&mut center);
        }

        if si.is_valid(&center) {
            return Some(center);
        }
        if rho.is_empty() {
            return None;
        }

        let mut candidate = space.alloc_state();
        for _ in 0..attempts {
            self.sampler.sample_near_margins(&mut candidate, &center, rho);
            if si.is_valid(&candidate) {
                return Some(candidate);
            }
        }

        None
    }

    /// Check every start state and a fixed goal state, repairing the ones
    /// that are out of bounds or invalid.
    ///
    /// States that cannot be repaired are left as they were and reported as
    /// [`FixOutcome::Unfixable`]; goals that are not a fixed state are
    /// skipped. Empty margin lists restrict the repair to clamping.
    pub fn fix_invalid_input_states(
        &mut self,
        problem: &mut ProblemDefinition,
        rho_start: &[f64],
        rho_goal: &[f64],
        attempts: usize,
    ) -> FixReport {
        let dim = self.si.dimension();
        assert!(
            rho_start.is_empty() || rho_start.len() == dim,
            "start margins must match the space dimension"
        );
        assert!(
            rho_goal.is_empty() || rho_goal.len() == dim,
            "goal margins must match the space dimension"
        );

        let mut starts = Vec::with_capacity(problem.start_states.len());
        for (i, st) in problem.start_states.iter_mut().enumerate() {
            let outcome = self.fix_state(st, rho_start, attempts, "initial");
            if outcome == FixOutcome::Unfixable {
                warn!("Unable to fix start state {}", i);
            }
            starts.push(outcome);
        }

        let goal = match problem.goal.as_mut() {
            Some(Goal::State(st)) => {
                let outcome = self.fix_state(st, rho_goal, attempts, "goal");
                if outcome == FixOutcome::Unfixable {
                    warn!("Unable to fix goal state");
                }
                outcome
            }
            Some(Goal::Region { .. }) | None => FixOutcome::Skipped,
        };

        FixReport { starts, goal }
    }

    fn fix_state(
        &mut self,
        st: &mut State,
        rho: &[f64],
        attempts: usize,
        label: &str,
    ) -> FixOutcome {
        if !self.si.satisfies_bounds(st) {
            info!("{} state is not within space bounds", label);
        } else if !self.si.is_valid(st) {
            info!("{} state is not valid", label);
        } else {
            return FixOutcome::AlreadyValid;
        }

        info!("Attempting to fix {} state {} within margins {:?}", label, st, rho);
        match self.search_valid_nearby(st, rho, attempts) {
            Some(fixed) => {
                st.copy_from(&fixed);
                FixOutcome::Repaired
            }
            None => FixOutcome::Unfixable,
        }
    }
}
