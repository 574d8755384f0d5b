//! Common types, traits, and error definitions for kinematic_core
//!
//! This module provides the foundational building blocks used by
//! the kinematic engine.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;
