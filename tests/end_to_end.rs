//! End-to-end checks on a 2-D space over [0, 10] x [0, 10] with unit
//! resolution and an obstacle around (5, 5).

use kinematic_core::kinematic::{FixOutcome, Goal, ProblemDefinition};
use kinematic_core::{
    KinematicPath, PathSimplifier, SpaceInformation, State, StateRepairer, StateSpace,
};

fn square_space() -> StateSpace {
    StateSpace::builder()
        .linear(0.0, 10.0, 1.0)
        .linear(0.0, 10.0, 1.0)
        .build()
        .unwrap()
}

/// Rejects (5, 5) and everything closer to it than half the resolution.
/// Rejecting the single point would let (0, 0) -> (10, 10) pass: its 11
/// steps of 10/11 never land on (5, 5).
fn away_from_center(s: &State) -> bool {
    (s[0] - 5.0).abs().max((s[1] - 5.0).abs()) >= 0.5
}

fn only_center_rejected(s: &State) -> bool {
    !(s[0] == 5.0 && s[1] == 5.0)
}

fn state(x: f64, y: f64) -> State {
    State::from_slice(&[x, y])
}

#[test]
fn diagonal_through_obstacle_fails_both_checks() {
    let si = SpaceInformation::new(square_space(), away_from_center);
    assert!(!si.is_valid(&state(5.0, 5.0)));

    let start = state(0.0, 0.0);
    let end = state(10.0, 10.0);
    assert!(!si.check_motion_subdivision(&start, &end));
    assert!(!si.check_motion_incremental(&start, &end).is_valid());

    let short = state(4.0, 4.0);
    assert!(si.check_motion_subdivision(&start, &short));
    assert!(si.check_motion_incremental(&start, &short).is_valid());
}

#[test]
fn single_point_obstacle_is_stepped_over() {
    let si = SpaceInformation::new(square_space(), only_center_rejected);
    assert!(!si.is_valid(&state(5.0, 5.0)));
    assert!(si.check_motion_subdivision(&state(0.0, 0.0), &state(10.0, 10.0)));
    assert!(si.check_motion_incremental(&state(0.0, 0.0), &state(10.0, 10.0)).is_valid());
}

#[test]
fn reduce_vertices_shrinks_path_around_obstacle() {
    let si = SpaceInformation::new(square_space(), away_from_center);

    // along the bottom edge, then up the right edge
    let mut states: Vec<State> = (0..=10).map(|i| state(i as f64, 0.0)).collect();
    states.extend((1..=10).map(|i| state(10.0, i as f64)));
    let mut path = KinematicPath::from_states(states);
    assert!(si.check_path(&path));
    let before = path.len();

    let mut simplifier = PathSimplifier::new(&si, 2024);
    simplifier.reduce_vertices(&mut path, 300, 100, 0.5);

    assert!(path.len() < before);
    assert_eq!(path.first(), Some(&state(0.0, 0.0)));
    assert_eq!(path.last(), Some(&state(10.0, 10.0)));
    assert!(path
        .states
        .windows(2)
        .all(|w| si.check_motion_subdivision(&w[0], &w[1])));
}

#[test]
fn reduce_vertices_on_diagonal_never_adds_invalid_motion() {
    let si = SpaceInformation::new(square_space(), away_from_center);
    let original: Vec<State> = (0..=10).map(|i| state(i as f64, i as f64)).collect();
    let mut path = KinematicPath::from_states(original.clone());

    let mut simplifier = PathSimplifier::new(&si, 11);
    simplifier.reduce_vertices(&mut path, 300, 100, 0.5);

    assert!(path.len() < original.len());
    // every motion in the result either existed before or passed the check
    for w in path.states.windows(2) {
        let existed = original.windows(2).any(|o| o[0] == w[0] && o[1] == w[1]);
        assert!(existed || si.check_motion_subdivision(&w[0], &w[1]));
    }
}

#[test]
fn out_of_bounds_start_is_repaired_or_untouched() {
    let si = SpaceInformation::new(square_space(), away_from_center);
    let mut repairer = StateRepairer::new(&si, 5);

    let original = state(-3.0, 5.0);
    let mut problem =
        ProblemDefinition::new(vec![original.clone()], Goal::State(state(9.0, 9.0)));
    let report = repairer.fix_invalid_input_states(&mut problem, &[1.0, 1.0], &[1.0, 1.0], 50);

    let fixed = &problem.start_states[0];
    match report.starts[0] {
        FixOutcome::Repaired => {
            assert!(si.satisfies_bounds(fixed));
            assert!(si.is_valid(fixed));
        }
        FixOutcome::Unfixable => assert_eq!(fixed, &original),
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(report.goal, FixOutcome::AlreadyValid);
}

#[test]
fn out_of_bounds_start_behind_wall_stays_untouched() {
    let past_wall = |s: &State| s[0] > 3.0;
    let si = SpaceInformation::new(square_space(), past_wall);
    let mut repairer = StateRepairer::new(&si, 5);

    let original = state(-3.0, 5.0);
    let mut problem =
        ProblemDefinition::new(vec![original.clone()], Goal::State(state(9.0, 9.0)));
    let report = repairer.fix_invalid_input_states(&mut problem, &[0.5, 0.5], &[0.5, 0.5], 50);

    assert_eq!(report.starts, vec![FixOutcome::Unfixable]);
    assert_eq!(problem.start_states[0], original);
}

#[test]
fn interpolated_path_keeps_anchors() {
    let si = SpaceInformation::new(square_space(), away_from_center);
    let anchors = vec![state(0.0, 0.0), state(3.0, 0.0), state(3.0, 3.0)];
    let mut path = KinematicPath::from_states(anchors.clone());
    si.interpolate_path(&mut path, 1.0);

    assert_eq!(path.len(), 4 + 4 + 1);
    for anchor in &anchors {
        assert_eq!(path.states.iter().filter(|s| *s == anchor).count(), 1);
    }
    assert!(si.check_path(&path));
}
