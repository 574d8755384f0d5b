//! Error types for kinematic_core

use std::fmt;

/// Main error type for building state spaces and states
#[derive(Debug, Clone, PartialEq)]
pub enum KinematicsError {
    /// Invalid parameter
    InvalidParameter(String),
    /// A component description violates its invariants
    InvalidComponent { index: usize, reason: String },
    /// A quaternion block does not span four consecutive components
    QuaternionBlock(usize),
    /// State or margin vector length does not match the space dimension
    DimensionMismatch { expected: usize, found: usize },
}

impl fmt::Display for KinematicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KinematicsError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            KinematicsError::InvalidComponent { index, reason } => {
                write!(f, "Invalid component {}: {}", index, reason)
            }
            KinematicsError::QuaternionBlock(index) => write!(
                f,
                "Quaternion block starting at component {} does not span 4 components",
                index
            ),
            KinematicsError::DimensionMismatch { expected, found } => write!(
                f,
                "Dimension mismatch: expected {}, found {}",
                expected, found
            ),
        }
    }
}

impl std::error::Error for KinematicsError {}

/// Result type alias for kinematic operations
pub type KinematicsResult<T> = Result<T, KinematicsError>;
