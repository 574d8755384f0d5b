//! Differencing of two states and the discretization of the motion
//! between them.
//!
//! The number of steps `nd` for a motion is chosen so that no component
//! moves more than `factor * resolution` between two consecutive states:
//!
//! ```text
//! nd = max(1, max_i(1 + floor(|delta_i| / (factor * resolution_i))))
//! ```

use std::f64::consts::PI;

use nalgebra::DVector;

use crate::common::{ComponentKind, KinematicPath, State};
use crate::kinematic::state_space::StateSpace;

/// Normalize an angle into `(-pi, pi]`
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(2.0 * PI);
    if a > PI {
        a - 2.0 * PI
    } else {
        a
    }
}

/// Signed shortest rotation taking `from` to `to`
pub fn shortest_angular_distance(from: f64, to: f64) -> f64 {
    normalize_angle(to - from)
}

/// Per-dimension step and step count for the motion between two states
#[derive(Debug, Clone, PartialEq)]
pub struct DifferenceStep {
    pub step: DVector<f64>,
    /// Number of segments; always at least 1
    pub nd: usize,
}

impl DifferenceStep {
    /// State `k` steps away from `origin`
    pub fn state_at(&self, origin: &State, k: usize) -> State {
        State::new(&origin.values + &self.step * k as f64)
    }

    /// Same as `state_at` but writes into an existing state
    pub fn write_state_at(&self, origin: &State, k: usize, out: &mut State) {
        out.values.copy_from(&origin.values);
        out.values.axpy(k as f64, &self.step, 1.0);
    }
}

impl StateSpace {
    /// Per-component delta from `s1` to `s2`.
    ///
    /// Quaternion components are subtracted component-wise.
    pub fn difference(&self, s1: &State, s2: &State) -> DVector<f64> {
        self.assert_dimension(s1);
        self.assert_dimension(s2);
        DVector::from_iterator(
            self.dimension(),
            self.components().iter().enumerate().map(|(i, c)| match c.kind {
                ComponentKind::WrappingAngle => shortest_angular_distance(s1[i], s2[i]),
                ComponentKind::Linear | ComponentKind::Quaternion => s2[i] - s1[i],
            }),
        )
    }

    pub fn difference_step(&self, s1: &State, s2: &State, factor: f64) -> DifferenceStep {
        assert!(factor > 0.0, "difference step factor must be positive");
        let diff = self.difference(s1, s2);

        let mut nd = 1;
        for (c, d) in self.components().iter().zip(diff.iter()) {
            // only quaternion components may carry a non-positive resolution
            if c.resolution <= 0.0 {
                continue;
            }
            let divisions = 1 + (d.abs() / (factor * c.resolution)).floor() as usize;
            nd = nd.max(divisions);
        }

        DifferenceStep { step: diff / nd as f64, nd }
    }

    /// Euclidean distance, using the shortest rotation for wrapping angles
    pub fn distance(&self, s1: &State, s2: &State) -> f64 {
        self.difference(s1, s2).norm()
    }
}

impl KinematicPath {
    /// Sum of the distances between consecutive states
    pub fn length(&self, space: &StateSpace) -> f64 {
        self.states
            .windows(2)
            .map(|w| space.distance(&w[0], &w[1]))
            .sum()
    }
}
