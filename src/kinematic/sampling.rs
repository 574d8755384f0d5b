//! Uniform state sampling over a state space, globally or around a
//! reference state.
//!
//! Quaternion blocks have no notion of "near": they are always redrawn
//! uniformly over all orientations.

use nalgebra::{Quaternion, UnitQuaternion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::common::State;
use crate::kinematic::state_space::{ComponentBlock, StateSpace};

pub struct SamplingCore<'a> {
    space: &'a StateSpace,
    rng: StdRng,
}

impl<'a> SamplingCore<'a> {
    /// Create a sampler over `space` with a reproducible seed
    pub fn new(space: &'a StateSpace, seed: u64) -> Self {
        Self::from_rng(space, StdRng::seed_from_u64(seed))
    }

    /// Create a sampler over `space` drawing from an existing generator
    pub fn from_rng(space: &'a StateSpace, rng: StdRng) -> Self {
        SamplingCore { space, rng }
    }

    pub fn from_entropy(space: &'a StateSpace) -> Self {
        Self::from_rng(space, StdRng::from_entropy())
    }

    pub fn space(&self) -> &'a StateSpace {
        self.space
    }

    /// Uniform real in `[lo, hi)`. A collapsed interval yields `lo`.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.rng.gen::<f64>()
    }

    /// Uniformly distributed unit quaternion.
    ///
    /// A 4-D standard normal sample is isotropic, so its direction is
    /// uniform on the unit 3-sphere.
    pub fn quaternion(&mut self) -> UnitQuaternion<f64> {
        loop {
            let q = Quaternion::new(
                self.rng.sample::<f64, _>(StandardNormal),
                self.rng.sample::<f64, _>(StandardNormal),
                self.rng.sample::<f64, _>(StandardNormal),
                self.rng.sample::<f64, _>(StandardNormal),
            );
            if let Some(unit) = UnitQuaternion::try_new(q, 1e-9) {
                return unit;
            }
        }
    }

    /// Draw a state uniformly within the bounds of the space
    pub fn sample(&mut self, state: &mut State) {
        let space = self.space;
        space.assert_dimension(state);
        for block in space.blocks() {
            match *block {
                ComponentBlock::Quaternion(start) => {
                    let q = self.quaternion();
                    state.set_quaternion(start, &q);
                }
                ComponentBlock::Scalar(i) => {
                    let c = space.component(i);
                    state[i] = self.uniform(c.min_value, c.max_value);
                }
            }
        }
    }

    /// Draw a state within `rho` of `near` in every scalar component
    pub fn sample_near(&mut self, state: &mut State, near: &State, rho: f64) {
        let space = self.space;
        space.assert_dimension(state);
        space.assert_dimension(near);
        for block in space.blocks() {
            match *block {
                ComponentBlock::Quaternion(start) => {
                    let q = self.quaternion();
                    state.set_quaternion(start, &q);
                }
                ComponentBlock::Scalar(i) => {
                    state[i] = self.sample_component_near(i, near[i], rho);
                }
            }
        }
    }

    /// Draw a state within `rho[i]` of `near` along every scalar component `i`.
    ///
    /// An empty `rho` draws nothing and copies `near` into `state`.
    pub fn sample_near_margins(&mut self, state: &mut State, near: &State, rho: &[f64]) {
        let space = self.space;
        assert!(
            rho.is_empty() || rho.len() == space.dimension(),
            "margin vector length must match the space dimension"
        );
        space.assert_dimension(state);
        space.assert_dimension(near);
        if rho.is_empty() {
            state.copy_from(near);
            return;
        }
        for block in space.blocks() {
            match *block {
                ComponentBlock::Quaternion(start) => {
                    let q = self.quaternion();
                    state.set_quaternion(start, &q);
                }
                ComponentBlock::Scalar(i) => {
                    state[i] = self.sample_component_near(i, near[i], rho[i]);
                }
            }
        }
    }

    fn sample_component_near(&mut self, i: usize, center: f64, rho: f64) -> f64 {
        let c = *self.space.component(i);
        self.uniform(c.min_value.max(center - rho), c.max_value.min(center + rho))
    }
}
