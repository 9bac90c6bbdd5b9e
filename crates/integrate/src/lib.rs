//! Integrator adapter: wraps an adaptive ODE solver, its configuration and an
//! integration cursor that advances lazily as states are requested.
//!
//! # Invariants
//! - Settings are validated before they are stored; an adapter never holds
//!   a non-positive tolerance.
//! - Queries may arrive in any order. A query behind the cursor re-seeds from
//!   the original initial condition instead of integrating in reverse.

mod integrator;
mod settings;
mod tableau;

pub use integrator::{Derivative, Integrator};
pub use settings::{IntegratorSettings, Method};

/// Errors from integrator configuration and propagation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntegrateError {
    #[error("unsupported integrator '{0}', options: vode, isoda, dopri5, dop853")]
    UnsupportedMethod(String),
    #[error("integrator tolerances must be > 0 and finite, got {name} = {value}")]
    InvalidTolerance { name: &'static str, value: f64 },
    #[error("cannot integrate to non-finite time {0}")]
    InvalidTime(f64),
    #[error("step size underflow at t = {t} (h = {h})")]
    StepSizeUnderflow { t: f64, h: f64 },
    #[error("step budget of {steps} exhausted at t = {t}")]
    TooManySteps { t: f64, steps: usize },
    #[error("state became non-finite at t = {0}")]
    NonFinite(f64),
}
