//! Shared types for the star-tracker simulator: object ids, state vectors,
//! time-query shapes and attitude math.

pub mod attitude;
pub mod types;

pub use attitude::{
    kinematic_derivative, quaternion_to_dcm, rotation_angle, translational_derivative,
};
pub use types::{
    DEFAULT_POINTING_STATE, DEFAULT_POSITION_STATE, ObjectId, PointingState, PositionState,
    Samples, Times, angular_rate_of, pointing_state, position_of, position_state, quaternion_of,
    velocity_of,
};
