//! Attitude math on scalar-last quaternions.
//!
//! Quaternions follow the attitude convention: `q = [e·sin(θ/2), cos(θ/2)]`
//! maps inertial vectors into the body frame through [`quaternion_to_dcm`].

use glam::{DMat3, DQuat, DVec3};

use crate::types::{PointingState, PositionState};

/// Direction cosine matrix of a unit quaternion `[x, y, z, w]`.
///
/// The quaternion must be unit-norm; other inputs give an unspecified matrix.
pub fn quaternion_to_dcm(q: DQuat) -> DMat3 {
    // glam builds the active rotation; the passive DCM is its transpose.
    DMat3::from_quat(q).transpose()
}

/// Rotation angle of a unit quaternion, in `[0, π]`.
pub fn rotation_angle(q: DQuat) -> f64 {
    let vector = DVec3::new(q.x, q.y, q.z).length();
    2.0 * vector.atan2(q.w.abs())
}

/// Torque-free rigid-body kinematics.
///
/// `dq/dt = ½·Ω(ω)·q` and `dω/dt = 0`.
pub fn kinematic_derivative(state: &PointingState) -> PointingState {
    let [q1, q2, q3, q4, w1, w2, w3] = *state;
    [
        0.5 * (w3 * q2 - w2 * q3 + w1 * q4),
        0.5 * (-w3 * q1 + w1 * q3 + w2 * q4),
        0.5 * (w2 * q1 - w1 * q2 + w3 * q4),
        0.5 * (-w1 * q1 - w2 * q2 - w3 * q3),
        0.0,
        0.0,
        0.0,
    ]
}

/// Constant-velocity translation: `dr/dt = v`, `dv/dt = 0`.
pub fn translational_derivative(state: &PositionState) -> PositionState {
    [state[3], state[4], state[5], 0.0, 0.0, 0.0]
}
