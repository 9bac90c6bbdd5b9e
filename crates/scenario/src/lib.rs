//! Scenario configuration: describes an observing camera and the objects it
//! looks at, and builds them into kernel world objects.
//!
//! ```text
//! integrator: { method: dopri5, atol: 1.0e-9, rtol: 1.0e-9 }
//! camera:
//!   pointing: { preset: kinematic, quaternion: [0, 0, 0, 1], angular_rate: [0, 0, 0.01] }
//! objects:
//!   - name: debris
//!     position: { preset: kinematic, position: [0, 0, 10], velocity: [0.01, 0, 0] }
//! ```

mod config;

pub use config::{
    IntegratorConfig, NamedObjectConfig, ObjectConfig, PointingConfig, PositionConfig, Scenario,
    ScenarioConfig, ScenarioError,
};
