//! Path simplification by shortcutting.
//!
//! Connections are attempted between non-consecutive states of a valid
//! path. When the direct motion is valid, the states in between are
//! removed. Every motion introduced this way has passed the motion check,
//! so a valid path stays valid.

use std::collections::HashSet;

use itertools::Itertools;
use log::debug;
use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::{KinematicPath, StateValidityChecker};
use crate::kinematic::space_information::SpaceInformation;

/// Configuration for [`PathSimplifier::simplify_max`]
#[derive(Debug, Clone)]
pub struct SimplifierConfig {
    /// Shortcut attempts per pass; 0 means one per path state
    pub max_steps: usize,
    /// Consecutive failed attempts before a pass stops; 0 means one per path state
    pub max_empty_steps: usize,
    /// Largest index distance tried by `reduce_vertices`, as a fraction of the path length
    pub range_ratio: f64,
    /// Upper bound on shortcut/densify rounds
    pub max_rounds: usize,
    /// Resolution factor used when densifying between rounds
    pub interpolation_factor: f64,
    /// Minimum length decrease that counts as progress
    pub length_tolerance: f64,
}

impl Default for SimplifierConfig {
    fn default() -> Self {
        Self {
            max_steps: 0,
            max_empty_steps: 0,
            range_ratio: 0.2,
            max_rounds: 5,
            interpolation_factor: 1.0,
            length_tolerance: 1e-6,
        }
    }
}

pub struct PathSimplifier<'a, V> {
    si: &'a SpaceInformation<V>,
    rng: StdRng,
    config: SimplifierConfig,
}

impl<'a, V: StateValidityChecker> PathSimplifier<'a, V> {
    /// Create a simplifier with the default configuration
    pub fn new(si: &'a SpaceInformation<V>, seed: u64) -> Self {
        Self::with_config(si, seed, SimplifierConfig::default())
    }

    /// Create a simplifier with an explicit configuration
    pub fn with_config(
        si: &'a SpaceInformation<V>,
        seed: u64,
        config: SimplifierConfig,
    ) -> Self {
        Self { si, rng: StdRng::seed_from_u64(seed), config }
    }

    pub fn config(&self) -> &SimplifierConfig {
        &self.config
    }

    /// Try to shortcut between randomly chosen states that are at most
    /// `range_ratio * path.len()` indices apart. `range_ratio` is clamped to
    /// `[0, 1]`.
    ///
    /// Returns true if any state was removed.
    pub fn reduce_vertices(
        &mut self,
        path: &mut KinematicPath,
        max_steps: usize,
        max_empty_steps: usize,
        range_ratio: f64,
    ) -> bool {
        if path.len() < 3 {
            return false;
        }
        let max_steps = if max_steps == 0 { path.len() } else { max_steps };
        let max_empty_steps = if max_empty_steps == 0 { path.len() } else { max_empty_steps };
        let range_ratio = if range_ratio.is_nan() { 0.0 } else { range_ratio.clamp(0.0, 1.0) };

        let mut changed = false;
        let mut no_change = 0;
        let mut step = 0;
        while step < max_steps && no_change < max_empty_steps {
            step += 1;
            no_change += 1;

            let count = path.len();
            if count < 3 {
                break;
            }
            let max_n = count - 1;
            let range = 1 + (count as f64 * range_ratio).round() as usize;

            let p1 = self.rng.gen_range(0..=max_n);
            let p2 = self.rng.gen_range(p1.saturating_sub(range)..=(p1 + range).min(max_n));

            let (p1, p2) = if p1.max(p2) - p1.min(p2) < 2 {
                if p1 + 2 <= max_n {
                    (p1, p1 + 2)
                } else if p1 >= 2 {
                    (p1 - 2, p1)
                } else {
                    continue;
                }
            } else {
                (p1.min(p2), p1.max(p2))
            };

            if self.si.check_motion(&path.states[p1], &path.states[p2]) {
                path.states.drain(p1 + 1..p2);
                no_change = 0;
                changed = true;
            }
        }

        changed
    }

    /// Try to shortcut between the closest pair of non-consecutive states.
    ///
    /// Pairs whose direct motion is invalid are not tried again.
    /// Returns true if any state was removed.
    pub fn collapse_close_vertices(
        &mut self,
        path: &mut KinematicPath,
        max_steps: usize,
        max_empty_steps: usize,
    ) -> bool {
        if path.len() < 3 {
            return false;
        }
        let max_steps = if max_steps == 0 { path.len() } else { max_steps };
        let max_empty_steps = if max_empty_steps == 0 { path.len() } else { max_empty_steps };

        // ids stay attached to states while the path shrinks
        let n = path.len();
        let mut ids: Vec<usize> = (0..n).collect();
        let mut distances = vec![0.0; n * n];
        for (i, j) in (0..n).tuple_combinations() {
            let d = self.si.distance(&path.states[i], &path.states[j]);
            distances[i * n + j] = d;
        }
        let mut rejected: HashSet<(usize, usize)> = HashSet::new();

        let mut changed = false;
        let mut no_change = 0;
        let mut step = 0;
        while step < max_steps && no_change < max_empty_steps {
            step += 1;
            no_change += 1;

            let closest = (0..path.len())
                .tuple_combinations()
                .filter(|&(i, j)| j >= i + 2 && !rejected.contains(&(ids[i], ids[j])))
                .min_by_key(|&(i, j)| OrderedFloat(distances[ids[i] * n + ids[j]]));

            let (p1, p2) = match closest {
                Some(pair) => pair,
                None => break,
            };

            if self.si.check_motion(&path.states[p1], &path.states[p2]) {
                path.states.drain(p1 + 1..p2);
                ids.drain(p1 + 1..p2);
                no_change = 0;
                changed = true;
            } else {
                rejected.insert((ids[p1], ids[p2]));
            }
        }

        changed
    }

    /// Alternate shortcutting with densification until a round brings no
    /// improvement.
    ///
    /// The path is left in its shortcut (not densified) form. Returns true if
    /// the path changed.
    pub fn simplify_max(&mut self, path: &mut KinematicPath) -> bool {
        if path.len() < 3 {
            return false;
        }

        let si = self.si;
        let space = si.space();
        let cfg = self.config.clone();

        let mut best = path.clone();
        let mut best_length = best.length(space);
        let mut changed = false;

        for round in 0..cfg.max_rounds {
            self.reduce_vertices(path, cfg.max_steps, cfg.max_empty_steps, cfg.range_ratio);
            self.collapse_close_vertices(path, cfg.max_steps, cfg.max_empty_steps);

            let length = path.length(space);
            let shorter = length < best_length - cfg.length_tolerance;
            let fewer = length <= best_length + cfg.length_tolerance && path.len() < best.len();
            debug!(
                "simplification round {}: {} states, length {:.4} (best {:.4})",
                round,
                path.len(),
                length,
                best_length
            );

            if !shorter && !fewer {
                break;
            }

            best = path.clone();
            best_length = length;
            changed = true;

            si.interpolate_path(path, cfg.interpolation_factor);
        }

        *path = best;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{AllValid, State};
    use crate::kinematic::state_space::StateSpace;

    fn planar_space() -> StateSpace {
        StateSpace::builder()
            .linear(0.0, 10.0, 0.1)
            .linear(0.0, 10.0, 0.1)
            .build()
            .unwrap()
    }

    fn state(x: f64, y: f64) -> State {
        State::from_slice(&[x, y])
    }

    /// Wall at x in [4, 6] for y below 8
    fn wall(s: &State) -> bool {
        !(s[0] >= 4.0 && s[0] <= 6.0 && s[1] < 8.0)
    }

    fn detour_path() -> KinematicPath {
        let mut states = Vec::new();
        for i in 0..=9 {
            states.push(state(1.0, i as f64));
        }
        for i in 2..=9 {
            states.push(state(i as f64, 9.0));
        }
        for i in (0..=8).rev() {
            states.push(state(9.0, i as f64));
        }
        KinematicPath::from_states(states)
    }

    #[test]
    fn test_reduce_vertices_keeps_path_valid() {
        let si = SpaceInformation::new(planar_space(), wall);
        let mut path = detour_path();
        assert!(si.check_path(&path));
        let before = path.len();
        let start = path.first().cloned();
        let goal = path.last().cloned();

        let mut simplifier = PathSimplifier::new(&si, 3);
        let changed = simplifier.reduce_vertices(&mut path, 500, 100, 0.5);

        assert!(changed);
        assert!(path.len() < before);
        assert!(si.check_path(&path));
        assert_eq!(path.first().cloned(), start);
        assert_eq!(path.last().cloned(), goal);
    }

    #[test]
    fn test_collapse_close_vertices_keeps_path_valid() {
        let si = SpaceInformation::new(planar_space(), wall);
        let mut path = detour_path();
        let before = path.len();

        let mut simplifier = PathSimplifier::new(&si, 3);
        assert!(simplifier.collapse_close_vertices(&mut path, 0, 0));

        assert!(path.len() < before);
        assert!(si.check_path(&path));
        assert_eq!(path.first(), Some(&state(1.0, 0.0)));
        assert_eq!(path.last(), Some(&state(9.0, 0.0)));
    }

    #[test]
    fn test_straight_line_collapses_to_endpoints() {
        let si = SpaceInformation::new(planar_space(), AllValid);
        let mut path =
            KinematicPath::from_states((0..=10).map(|i| state(i as f64 * 0.5, 1.0)).collect());
        let mut simplifier = PathSimplifier::new(&si, 1);
        simplifier.collapse_close_vertices(&mut path, 100, 100);
        assert_eq!(path.states, vec![state(0.0, 1.0), state(5.0, 1.0)]);
    }

    #[test]
    fn test_oversized_range_ratio() {
        let si = SpaceInformation::new(planar_space(), AllValid);
        let mut path = KinematicPath::from_states((0..=6).map(|i| state(i as f64, 2.0)).collect());
        let mut simplifier = PathSimplifier::new(&si, 5);
        assert!(simplifier.reduce_vertices(&mut path, 50, 50, 1e300));
        assert!(path.len() < 7);
        assert_eq!(path.first(), Some(&state(0.0, 2.0)));
        assert_eq!(path.last(), Some(&state(6.0, 2.0)));
    }

    #[test]
    fn test_degenerate_paths_untouched() {
        let si = SpaceInformation::new(planar_space(), AllValid);
        let mut simplifier = PathSimplifier::new(&si, 1);

        let mut empty = KinematicPath::new();
        assert!(!simplifier.reduce_vertices(&mut empty, 0, 0, 0.2));
        assert!(!simplifier.collapse_close_vertices(&mut empty, 0, 0));
        assert!(!simplifier.simplify_max(&mut empty));

        let mut pair = KinematicPath::from_states(vec![state(0.0, 0.0), state(1.0, 1.0)]);
        assert!(!simplifier.simplify_max(&mut pair));
        assert_eq!(pair.len(), 2);
    }

    #[test]
    fn test_simplify_max_shortens() {
        let si = SpaceInformation::new(planar_space(), wall);
        let mut path = detour_path();
        let before = path.length(si.space());

        let mut simplifier = PathSimplifier::new(&si, 17);
        assert!(simplifier.simplify_max(&mut path));

        assert!(path.length(si.space()) < before);
        assert!(si.check_path(&path));
        assert_eq!(path.first(), Some(&state(1.0, 0.0)));
        assert_eq!(path.last(), Some(&state(9.0, 0.0)));
    }
}
