//! kinematic_core - motion validity checking and path refinement
//!
//! This crate provides the kinematic core used by sampling-based planners:
//! discretized motion checking, path interpolation, repair of invalid
//! input states, and path simplification by shortcutting.

// Core modules
pub mod common;

// Algorithm modules
pub mod kinematic;

// Re-export common types for convenience
pub use common::{ComponentKind, KinematicPath, State, StateComponent};
pub use common::{AllValid, StateValidityChecker};
pub use common::{KinematicsError, KinematicsResult};
pub use kinematic::{
    DifferenceStep, MotionCheck, MotionCheckMode, PathSimplifier, SamplingCore, SimplifierConfig,
    SpaceInformation, StateRepairer, StateSpace,
};
