use crate::IntegrateError;
use crate::settings::IntegratorSettings;
use crate::tableau::Step;

/// Time derivative `f(t, y) -> dy/dt` over an `N`-element state.
pub type Derivative<const N: usize> = Box<dyn Fn(f64, &[f64; N]) -> [f64; N] + Send>;

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 10.0;
const MAX_STEPS: usize = 100_000;

/// Last integrated point and the step size suggested for the next step.
#[derive(Debug, Clone, Copy)]
struct Cursor<const N: usize> {
    t: f64,
    y: [f64; N],
    h: Option<f64>,
}

/// Adaptive integrator seeded with an initial condition.
///
/// The cursor only moves away from the seed time. A query on the far side of
/// the seed, or between the seed and the cursor, re-seeds from the original
/// initial condition and integrates from there (backward for earlier times).
pub struct Integrator<const N: usize> {
    derivative: Derivative<N>,
    settings: IntegratorSettings,
    t0: f64,
    y0: [f64; N],
    cursor: Cursor<N>,
}

impl<const N: usize> std::fmt::Debug for Integrator<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Integrator")
            .field("settings", &self.settings)
            .field("t0", &self.t0)
            .field("y0", &self.y0)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

impl<const N: usize> Integrator<N> {
    pub fn new(
        derivative: Derivative<N>,
        settings: IntegratorSettings,
        t0: f64,
        y0: [f64; N],
    ) -> Self {
        Self {
            derivative,
            settings,
            t0,
            y0,
            cursor: Cursor { t: t0, y: y0, h: None },
        }
    }

    pub fn settings(&self) -> &IntegratorSettings {
        &self.settings
    }

    /// Seed time and state.
    pub fn initial(&self) -> (f64, [f64; N]) {
        (self.t0, self.y0)
    }

    /// Time and state of the last integrated point.
    pub fn cursor(&self) -> (f64, [f64; N]) {
        (self.cursor.t, self.cursor.y)
    }

    /// Swap solver settings. Integration progress is discarded and the
    /// cursor returns to the original initial condition.
    pub fn set_settings(&mut self, settings: IntegratorSettings) {
        self.settings = settings;
        self.reseed();
    }

    /// Replace the initial condition, keeping the derivative and settings.
    pub fn set_initial(&mut self, t0: f64, y0: [f64; N]) {
        self.t0 = t0;
        self.y0 = y0;
        self.reseed();
    }

    fn reseed(&mut self) {
        tracing::debug!(t0 = self.t0, method = %self.settings.method(), "integrator re-seeded");
        self.cursor = Cursor {
            t: self.t0,
            y: self.y0,
            h: None,
        };
    }

    /// Whether reaching `t` requires restarting from the seed.
    fn behind_cursor(&self, t: f64) -> bool {
        let ahead = t - self.t0;
        let done = self.cursor.t - self.t0;
        ahead * done < 0.0 || ahead.abs() < done.abs()
    }

    /// Advance to `t` and return the state there.
    pub fn integrate_to(&mut self, t: f64) -> Result<[f64; N], IntegrateError> {
        if !t.is_finite() {
            return Err(IntegrateError::InvalidTime(t));
        }
        if self.behind_cursor(t) {
            self.reseed();
        }
        if t == self.cursor.t {
            return Ok(self.cursor.y);
        }

        let tableau = self.settings.method().tableau();
        let atol = self.settings.atol();
        let rtol = self.settings.rtol();
        let f: &dyn Fn(f64, &[f64; N]) -> [f64; N] = &*self.derivative;

        let span = t - self.cursor.t;
        let direction = span.signum();
        let mut cur_t = self.cursor.t;
        let mut y = self.cursor.y;
        let mut h = match self.cursor.h {
            Some(h) if h.signum() == direction => h,
            _ => initial_step(f, cur_t, &y, span, atol, rtol),
        };

        let mut steps = 0;
        while cur_t != t {
            if steps == MAX_STEPS {
                self.cursor = Cursor { t: cur_t, y, h: Some(h) };
                return Err(IntegrateError::TooManySteps { t: cur_t, steps });
            }
            steps += 1;

            let remaining = t - cur_t;
            let last = h.abs() >= remaining.abs();
            let step = if last { remaining } else { h };
            if cur_t + step == cur_t {
                return Err(IntegrateError::StepSizeUnderflow { t: cur_t, h: step });
            }

            let trial = tableau.step(f, cur_t, &y, step);
            let err = error_norm(&y, &trial, atol, rtol);
            if !err.is_finite() || trial.y.iter().any(|v| !v.is_finite()) {
                return Err(IntegrateError::NonFinite(cur_t));
            }

            let factor = if err == 0.0 {
                MAX_FACTOR
            } else {
                (SAFETY * err.powf(-tableau.error_exponent)).clamp(MIN_FACTOR, MAX_FACTOR)
            };

            if err <= 1.0 {
                cur_t = if last { t } else { cur_t + step };
                y = trial.y;
                // A clamped final step says nothing about the next one.
                if !last {
                    h = step * factor;
                }
            } else {
                h = step * factor;
                if h.abs() <= f64::EPSILON * cur_t.abs().max(1.0) {
                    return Err(IntegrateError::StepSizeUnderflow { t: cur_t, h });
                }
            }
        }

        tracing::trace!(
            t,
            steps,
            tableau = tableau.name,
            "integrated to requested time"
        );
        self.cursor = Cursor { t, y, h: Some(h) };
        Ok(y)
    }
}

/// RMS norm of the local error scaled by the mixed tolerance. A coarse
/// estimate, when present, is blended in the way DOP853 does.
fn error_norm<const N: usize>(y: &[f64; N], trial: &Step<N>, atol: f64, rtol: f64) -> f64 {
    if N == 0 {
        return 0.0;
    }
    let scaled_sq = |v: &[f64; N]| -> f64 {
        (0..N)
            .map(|i| {
                let scale = atol + rtol * y[i].abs().max(trial.y[i].abs());
                (v[i] / scale).powi(2)
            })
            .sum()
    };
    let fine = scaled_sq(&trial.error);
    match &trial.coarse {
        None => (fine / N as f64).sqrt(),
        Some(coarse) => {
            let denominator = fine + 0.01 * scaled_sq(coarse);
            if denominator <= 0.0 {
                0.0
            } else {
                fine / (N as f64 * denominator).sqrt()
            }
        }
    }
}

/// Starting step guess from the scaled state and derivative magnitudes,
/// bounded by the span to cover.
fn initial_step<const N: usize>(
    f: &dyn Fn(f64, &[f64; N]) -> [f64; N],
    t: f64,
    y: &[f64; N],
    span: f64,
    atol: f64,
    rtol: f64,
) -> f64 {
    let dy = f(t, y);
    let scaled = |v: &[f64; N]| -> f64 {
        if N == 0 {
            return 0.0;
        }
        let sum: f64 = (0..N)
            .map(|i| (v[i] / (atol + rtol * y[i].abs())).powi(2))
            .sum();
        (sum / N as f64).sqrt()
    };
    let d0 = scaled(y);
    let d1 = scaled(&dy);
    let h = if d0 < 1e-5 || d1 < 1e-5 {
        1e-6
    } else {
        0.01 * d0 / d1
    };
    h.min(span.abs()) * span.signum()
}
