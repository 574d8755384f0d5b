//! Common types used throughout kinematic_core

use std::fmt;
use std::ops::{Index, IndexMut};

use nalgebra::{DVector, Quaternion, UnitQuaternion, Vector4};

/// How a single dimension of the space is discretized, sampled and diffed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    /// Plain bounded real value
    Linear,
    /// Angle in radians that wraps around at +/- pi
    WrappingAngle,
    /// One of four consecutive components holding an orientation (x, y, z, w)
    Quaternion,
}

/// Per-dimension description of the space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateComponent {
    pub min_value: f64,
    pub max_value: f64,
    /// Maximum step size along this dimension between two checked states
    pub resolution: f64,
    pub kind: ComponentKind,
}

impl StateComponent {
    pub fn linear(min_value: f64, max_value: f64, resolution: f64) -> Self {
        Self { min_value, max_value, resolution, kind: ComponentKind::Linear }
    }

    pub fn wrapping_angle(resolution: f64) -> Self {
        Self {
            min_value: -std::f64::consts::PI,
            max_value: std::f64::consts::PI,
            resolution,
            kind: ComponentKind::WrappingAngle,
        }
    }

    /// One quaternion component. A block needs four of these in a row.
    pub fn quaternion(resolution: f64) -> Self {
        Self { min_value: -1.0, max_value: 1.0, resolution, kind: ComponentKind::Quaternion }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min_value && value <= self.max_value
    }

    pub fn clamp(&self, value: f64) -> f64 {
        if value > self.max_value {
            self.max_value
        } else if value < self.min_value {
            self.min_value
        } else {
            value
        }
    }
}

/// A configuration: one real value per dimension of the space
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub values: DVector<f64>,
}

impl State {
    pub fn new(values: DVector<f64>) -> Self {
        Self { values }
    }

    pub fn zeros(dimension: usize) -> Self {
        Self { values: DVector::zeros(dimension) }
    }

    pub fn from_slice(values: &[f64]) -> Self {
        Self { values: DVector::from_column_slice(values) }
    }

    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    pub fn as_slice(&self) -> &[f64] {
        self.values.as_slice()
    }

    /// Read the quaternion block starting at `start`.
    ///
    /// Values are returned as stored; states produced by interpolation are
    /// not guaranteed to hold a unit quaternion.
    pub fn quaternion(&self, start: usize) -> Quaternion<f64> {
        let coords: Vector4<f64> = self.values.fixed_rows::<4>(start).into_owned();
        Quaternion::from(coords)
    }

    pub fn set_quaternion(&mut self, start: usize, q: &UnitQuaternion<f64>) {
        self.values.fixed_rows_mut::<4>(start).copy_from(&q.coords);
    }

    pub fn copy_from(&mut self, other: &State) {
        assert_eq!(self.dimension(), other.dimension(), "state dimension mismatch");
        self.values.copy_from(&other.values);
    }
}

impl Index<usize> for State {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.values[i]
    }
}

impl IndexMut<usize> for State {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.values[i]
    }
}

impl From<Vec<f64>> for State {
    fn from(values: Vec<f64>) -> Self {
        Self { values: DVector::from_vec(values) }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "]")
    }
}

/// Path represented as an ordered sequence of owned states
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KinematicPath {
    pub states: Vec<State>,
}

impl KinematicPath {
    pub fn new() -> Self {
        Self { states: Vec::new() }
    }

    pub fn from_states(states: Vec<State>) -> Self {
        Self { states }
    }

    pub fn push(&mut self, state: State) {
        self.states.push(state);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn first(&self) -> Option<&State> {
        self.states.first()
    }

    pub fn last(&self) -> Option<&State> {
        self.states.last()
    }
}
