//! World kernel: objects whose attitude and position are propagated through
//! bound dynamics and queried at arbitrary simulation times.
//!
//! # Invariants
//! - A failed configuration call leaves the object exactly as it was.
//! - Queries never change configuration; only an ODE evaluator's integration
//!   cursor moves as a side effect.
//! - Quaternion norm is kept by the dynamics, not enforced by the container.

mod dynamics;
mod error;
mod query;
pub mod scene;
pub mod world_object;

pub use dynamics::{Dynamics, DynamicsMode, Preset, StateFn};
pub use error::WorldObjectError;
pub use query::{Attitude, PointingMode};
pub use scene::{Scene, SceneEntry};
pub use world_object::WorldObject;

pub use startrack_common::{PointingState, PositionState, Samples, Times};
pub use startrack_integrate::{IntegratorSettings, Method};
