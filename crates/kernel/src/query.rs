use glam::{DMat3, DQuat};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use startrack_common::quaternion_to_dcm;

use crate::error::WorldObjectError;

/// Representation requested from a pointing query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointingMode {
    #[default]
    Quaternion,
    Dcm,
}

impl FromStr for PointingMode {
    type Err = WorldObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quaternion" => Ok(PointingMode::Quaternion),
            "dcm" => Ok(PointingMode::Dcm),
            _ => Err(WorldObjectError::NotSupported(format!(
                "pointing type '{s}', options: quaternion, dcm"
            ))),
        }
    }
}

/// Orientation at one query time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attitude {
    /// Scalar-last unit quaternion.
    Quaternion(DQuat),
    /// Direction cosine matrix mapping inertial vectors into the body frame.
    Dcm(DMat3),
}

impl Attitude {
    pub(crate) fn from_quaternion(q: DQuat, mode: PointingMode) -> Self {
        match mode {
            PointingMode::Quaternion => Attitude::Quaternion(q),
            PointingMode::Dcm => Attitude::Dcm(quaternion_to_dcm(q)),
        }
    }

    pub fn quaternion(&self) -> Option<DQuat> {
        match self {
            Attitude::Quaternion(q) => Some(*q),
            Attitude::Dcm(_) => None,
        }
    }

    pub fn dcm(&self) -> Option<DMat3> {
        match self {
            Attitude::Quaternion(_) => None,
            Attitude::Dcm(m) => Some(*m),
        }
    }
}
