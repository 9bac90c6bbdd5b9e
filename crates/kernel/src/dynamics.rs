//! Dynamics registry: user-supplied or preset dynamics and the evaluators
//! they are bound into.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use startrack_common::{
    PointingState, PositionState, kinematic_derivative, translational_derivative,
};
use startrack_integrate::{Derivative, IntegrateError, Integrator, IntegratorSettings};

use crate::error::WorldObjectError;

/// Closed-form state function `f(t) -> state`.
pub type StateFn<const N: usize> = Box<dyn Fn(f64) -> [f64; N] + Send>;

/// Dynamics handed to a world object.
pub enum Dynamics<const N: usize> {
    /// Time derivative `f(t, state) -> d(state)/dt`, integrated numerically.
    Ode(Derivative<N>),
    /// State evaluated directly at each requested time.
    Explicit(StateFn<N>),
}

impl<const N: usize> Dynamics<N> {
    pub fn ode(f: impl Fn(f64, &[f64; N]) -> [f64; N] + Send + 'static) -> Self {
        Dynamics::Ode(Box::new(f))
    }

    pub fn explicit(f: impl Fn(f64) -> [f64; N] + Send + 'static) -> Self {
        Dynamics::Explicit(Box::new(f))
    }

    pub fn mode(&self) -> DynamicsMode {
        match self {
            Dynamics::Ode(_) => DynamicsMode::Ode,
            Dynamics::Explicit(_) => DynamicsMode::Explicit,
        }
    }
}

impl<const N: usize> fmt::Debug for Dynamics<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dynamics::{:?}", self.mode())
    }
}

/// How a subsystem's state is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DynamicsMode {
    Ode,
    Explicit,
    /// Interpolation of sampled states. Recognized, never bindable yet.
    Sampled,
}

impl DynamicsMode {
    pub fn name(self) -> &'static str {
        match self {
            DynamicsMode::Ode => "ode",
            DynamicsMode::Explicit => "explicit",
            DynamicsMode::Sampled => "sampled",
        }
    }
}

impl fmt::Display for DynamicsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DynamicsMode {
    type Err = WorldObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ode" => Ok(DynamicsMode::Ode),
            "explicit" => Ok(DynamicsMode::Explicit),
            "sampled" => Ok(DynamicsMode::Sampled),
            _ => Err(WorldObjectError::InvalidArgument(format!(
                "invalid dynamics mode '{s}', options: ode, explicit, sampled"
            ))),
        }
    }
}

/// Built-in dynamics selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Torque-free rotation at constant rate, or constant-velocity translation.
    Kinematic,
}

impl Preset {
    pub const ALL: [Preset; 1] = [Preset::Kinematic];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Kinematic => "kinematic",
        }
    }

    pub fn pointing_dynamics(self) -> Dynamics<7> {
        match self {
            Preset::Kinematic => Dynamics::ode(|_t, state: &PointingState| {
                kinematic_derivative(state)
            }),
        }
    }

    pub fn position_dynamics(self) -> Dynamics<6> {
        match self {
            Preset::Kinematic => Dynamics::ode(|_t, state: &PositionState| {
                translational_derivative(state)
            }),
        }
    }
}

impl FromStr for Preset {
    type Err = WorldObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| {
                WorldObjectError::NotSupported(format!("preset '{s}', options: kinematic"))
            })
    }
}

/// A bound dynamics function, selected once at configuration time.
pub(crate) enum Evaluator<const N: usize> {
    Explicit(StateFn<N>),
    Integrated(Integrator<N>),
}

impl<const N: usize> Evaluator<N> {
    /// ODE dynamics are seeded with `initial` at time 0; explicit dynamics
    /// ignore it.
    pub fn bind(dynamics: Dynamics<N>, settings: IntegratorSettings, initial: [f64; N]) -> Self {
        match dynamics {
            Dynamics::Ode(derivative) => {
                Evaluator::Integrated(Integrator::new(derivative, settings, 0.0, initial))
            }
            Dynamics::Explicit(f) => Evaluator::Explicit(f),
        }
    }

    pub fn mode(&self) -> DynamicsMode {
        match self {
            Evaluator::Explicit(_) => DynamicsMode::Explicit,
            Evaluator::Integrated(_) => DynamicsMode::Ode,
        }
    }

    pub fn evaluate(&mut self, t: f64) -> Result<[f64; N], IntegrateError> {
        match self {
            Evaluator::Explicit(f) => Ok(f(t)),
            Evaluator::Integrated(integrator) => integrator.integrate_to(t),
        }
    }

    /// Rebuild an integrated evaluator with new settings, re-seeding it from
    /// its original initial condition at its seed time.
    pub fn set_settings(&mut self, settings: IntegratorSettings) {
        if let Evaluator::Integrated(integrator) = self {
            integrator.set_settings(settings);
        }
    }

    pub fn set_initial(&mut self, initial: [f64; N]) {
        if let Evaluator::Integrated(integrator) = self {
            integrator.set_initial(0.0, initial);
        }
    }
}

impl<const N: usize> fmt::Debug for Evaluator<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Evaluator::Explicit(_) => f.write_str("Explicit"),
            Evaluator::Integrated(integrator) => fmt::Debug::fmt(integrator, f),
        }
    }
}
