// Kinematic validity checking and path refinement

pub mod state_space;
pub mod difference;
pub mod space_information;
pub mod sampling;
pub mod motion;
pub mod resample;
pub mod repair;
pub mod simplifier;

pub use state_space::*;
pub use difference::*;
pub use space_information::*;
pub use sampling::*;
pub use motion::*;
pub use repair::*;
pub use simplifier::*;
