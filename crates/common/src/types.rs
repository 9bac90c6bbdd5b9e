use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an object in a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub Uuid);

impl ObjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

/// Rotational state: quaternion `[x, y, z, w]` (scalar last) followed by the
/// body angular rate `[wx, wy, wz]` in rad/s.
pub type PointingState = [f64; 7];

/// Translational state: position `[x, y, z]` followed by velocity `[vx, vy, vz]`.
pub type PositionState = [f64; 6];

/// Identity attitude, zero angular rate.
pub const DEFAULT_POINTING_STATE: PointingState = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0];

/// At the origin, at rest.
pub const DEFAULT_POSITION_STATE: PositionState = [0.0; 6];

/// Pack a quaternion and angular rate into a pointing state.
pub fn pointing_state(quaternion: DQuat, angular_rate: DVec3) -> PointingState {
    [
        quaternion.x,
        quaternion.y,
        quaternion.z,
        quaternion.w,
        angular_rate.x,
        angular_rate.y,
        angular_rate.z,
    ]
}

/// Pack a position and velocity into a position state.
pub fn position_state(position: DVec3, velocity: DVec3) -> PositionState {
    [
        position.x, position.y, position.z, velocity.x, velocity.y, velocity.z,
    ]
}

/// Quaternion part of a pointing state.
pub fn quaternion_of(state: &PointingState) -> DQuat {
    DQuat::from_xyzw(state[0], state[1], state[2], state[3])
}

/// Angular-rate part of a pointing state.
pub fn angular_rate_of(state: &PointingState) -> DVec3 {
    DVec3::new(state[4], state[5], state[6])
}

/// Position part of a position state.
pub fn position_of(state: &PositionState) -> DVec3 {
    DVec3::new(state[0], state[1], state[2])
}

/// Velocity part of a position state.
pub fn velocity_of(state: &PositionState) -> DVec3 {
    DVec3::new(state[3], state[4], state[5])
}

/// Times at which a query is evaluated.
///
/// A sequence need not be sorted or distinct; results keep its order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Times {
    Scalar(f64),
    Sequence(Vec<f64>),
}

impl Times {
    /// Number of times in the query.
    pub fn len(&self) -> usize {
        match self {
            Times::Scalar(_) => 1,
            Times::Sequence(times) => times.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evaluate `f` at every time, keeping the query's shape.
    /// Stops at the first error; no partial results are returned.
    pub fn try_map<T, E>(
        &self,
        mut f: impl FnMut(f64) -> Result<T, E>,
    ) -> Result<Samples<T>, E> {
        match self {
            Times::Scalar(t) => Ok(Samples::One(f(*t)?)),
            Times::Sequence(times) => times
                .iter()
                .map(|&t| f(t))
                .collect::<Result<Vec<_>, E>>()
                .map(Samples::Many),
        }
    }
}

impl From<f64> for Times {
    fn from(t: f64) -> Self {
        Times::Scalar(t)
    }
}

impl From<Vec<f64>> for Times {
    fn from(times: Vec<f64>) -> Self {
        Times::Sequence(times)
    }
}

impl From<&[f64]> for Times {
    fn from(times: &[f64]) -> Self {
        Times::Sequence(times.to_vec())
    }
}

impl<const K: usize> From<[f64; K]> for Times {
    fn from(times: [f64; K]) -> Self {
        Times::Sequence(times.to_vec())
    }
}

/// Query results shaped like the [`Times`] that produced them: a scalar time
/// yields a single unwrapped value, a sequence yields one value per time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Samples<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> Samples<T> {
    pub fn len(&self) -> usize {
        match self {
            Samples::One(_) => 1,
            Samples::Many(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The single result of a scalar query.
    pub fn one(self) -> Option<T> {
        match self {
            Samples::One(value) => Some(value),
            Samples::Many(_) => None,
        }
    }

    /// Flatten into a vector regardless of shape.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Samples::One(value) => vec![value],
            Samples::Many(values) => values,
        }
    }
}
