use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::IntegrateError;
use crate::tableau::{CASH_KARP, DORMAND_PRINCE, DORMAND_PRINCE_853, FEHLBERG, Tableau};

/// Solver method names accepted by the adapter.
///
/// Every method is an explicit adaptive Runge-Kutta scheme. `vode` and
/// `isoda` keep their names for existing configurations but run the
/// Cash-Karp and Fehlberg pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Cash-Karp 5(4).
    Vode,
    /// Runge-Kutta-Fehlberg 4(5).
    Isoda,
    /// Dormand-Prince 5(4).
    Dopri5,
    /// Dormand-Prince 8(5,3), eighth order with a blended error estimate.
    Dop853,
}

impl Method {
    pub const ALL: [Method; 4] = [Method::Vode, Method::Isoda, Method::Dopri5, Method::Dop853];

    pub fn name(self) -> &'static str {
        match self {
            Method::Vode => "vode",
            Method::Isoda => "isoda",
            Method::Dopri5 => "dopri5",
            Method::Dop853 => "dop853",
        }
    }

    /// Embedded pair used to advance the solution.
    pub(crate) fn tableau(self) -> &'static Tableau {
        match self {
            Method::Vode => &CASH_KARP,
            Method::Isoda => &FEHLBERG,
            Method::Dopri5 => &DORMAND_PRINCE,
            Method::Dop853 => &DORMAND_PRINCE_853,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = IntegrateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| IntegrateError::UnsupportedMethod(s.to_string()))
    }
}

/// Solver method plus absolute/relative error tolerances.
///
/// Construct through [`IntegratorSettings::new`] so tolerances are validated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntegratorSettings {
    method: Method,
    atol: f64,
    rtol: f64,
}

impl Default for IntegratorSettings {
    fn default() -> Self {
        Self {
            method: Method::Dopri5,
            atol: 1e-9,
            rtol: 1e-9,
        }
    }
}

impl IntegratorSettings {
    pub fn new(method: Method, atol: f64, rtol: f64) -> Result<Self, IntegrateError> {
        check_tolerance("atol", atol)?;
        check_tolerance("rtol", rtol)?;
        Ok(Self { method, atol, rtol })
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn atol(&self) -> f64 {
        self.atol
    }

    pub fn rtol(&self) -> f64 {
        self.rtol
    }
}

fn check_tolerance(name: &'static str, value: f64) -> Result<(), IntegrateError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(IntegrateError::InvalidTolerance { name, value })
    }
}
