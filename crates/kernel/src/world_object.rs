//! A simulated body whose attitude and position are produced by bound
//! dynamics and queried at arbitrary times.

use glam::{DQuat, DVec3};

use startrack_common::{
    DEFAULT_POINTING_STATE, DEFAULT_POSITION_STATE, PointingState, PositionState, Samples, Times,
    angular_rate_of, pointing_state, position_of, position_state, quaternion_of,
    quaternion_to_dcm, velocity_of,
};
use startrack_integrate::{IntegratorSettings, Method};

use crate::dynamics::{Dynamics, DynamicsMode, Evaluator, Preset};
use crate::error::WorldObjectError;
use crate::query::{Attitude, PointingMode};

/// An object in the simulated world.
///
/// Constructed with pointing and position modeling disabled. Binding dynamics
/// through `set_*_fcn` or `set_*_preset` enables the matching queries.
/// Integrator settings are shared by the pointing and position subsystems.
#[derive(Debug)]
pub struct WorldObject {
    epoch: f64,
    pointing_state: PointingState,
    position_state: PositionState,
    pointing: Option<Evaluator<7>>,
    position: Option<Evaluator<6>>,
    integrator: IntegratorSettings,
}

impl Default for WorldObject {
    fn default() -> Self {
        Self {
            epoch: 0.0,
            pointing_state: DEFAULT_POINTING_STATE,
            position_state: DEFAULT_POSITION_STATE,
            pointing: None,
            position: None,
            integrator: IntegratorSettings::default(),
        }
    }
}

impl WorldObject {
    /// Create an object with no dynamics bound and default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reference time origin. Stored only; propagation always starts at 0.
    pub fn epoch(&self) -> f64 {
        self.epoch
    }

    /// Set the reference time origin.
    pub fn set_epoch(&mut self, epoch: f64) {
        self.epoch = epoch;
    }

    /// Whether pointing dynamics are bound.
    pub fn model_pointing(&self) -> bool {
        self.pointing.is_some()
    }

    /// Whether position dynamics are bound.
    pub fn model_position(&self) -> bool {
        self.position.is_some()
    }

    /// How pointing is produced, if modeled.
    pub fn pointing_mode(&self) -> Option<DynamicsMode> {
        self.pointing.as_ref().map(Evaluator::mode)
    }

    /// How position is produced, if modeled.
    pub fn position_mode(&self) -> Option<DynamicsMode> {
        self.position.as_ref().map(Evaluator::mode)
    }

    /// Solver method shared by both subsystems.
    pub fn integrator(&self) -> Method {
        self.integrator.method()
    }

    /// Absolute tolerance of the shared solver.
    pub fn integrator_atol(&self) -> f64 {
        self.integrator.atol()
    }

    /// Relative tolerance of the shared solver.
    pub fn integrator_rtol(&self) -> f64 {
        self.integrator.rtol()
    }

    /// Method and tolerances together.
    pub fn integrator_settings(&self) -> IntegratorSettings {
        self.integrator
    }

    /// Initial pointing state the ODE evaluator is seeded with.
    pub fn pointing_state(&self) -> PointingState {
        self.pointing_state
    }

    /// Initial position state the ODE evaluator is seeded with.
    pub fn position_state(&self) -> PositionState {
        self.position_state
    }

    /// Initial attitude quaternion.
    pub fn quaternion(&self) -> DQuat {
        quaternion_of(&self.pointing_state)
    }

    /// Initial body angular rate.
    pub fn angular_rate(&self) -> DVec3 {
        angular_rate_of(&self.pointing_state)
    }

    /// Initial position.
    pub fn position(&self) -> DVec3 {
        position_of(&self.position_state)
    }

    /// Initial velocity.
    pub fn velocity(&self) -> DVec3 {
        velocity_of(&self.position_state)
    }

    /// Bind pointing dynamics over `[quaternion, angular_rate]`.
    ///
    /// ODE dynamics are seeded at time 0 with `initial_state`, or with the
    /// stored pointing state when `None`. Explicit dynamics ignore it.
    pub fn set_pointing_fcn(
        &mut self,
        dynamics: Dynamics<7>,
        initial_state: Option<PointingState>,
    ) -> Result<(), WorldObjectError> {
        let initial = initial_state.unwrap_or(self.pointing_state);
        check_finite("initial pointing state", &initial)?;

        let mode = dynamics.mode();
        self.pointing = Some(Evaluator::bind(dynamics, self.integrator, initial));
        self.pointing_state = initial;
        tracing::debug!(%mode, ?initial, "pointing dynamics bound");
        Ok(())
    }

    /// Bind a built-in pointing model.
    pub fn set_pointing_preset(
        &mut self,
        preset: Preset,
        initial_state: Option<PointingState>,
    ) -> Result<(), WorldObjectError> {
        self.set_pointing_fcn(preset.pointing_dynamics(), initial_state)
    }

    /// Replace the initial pointing state. A bound ODE evaluator restarts
    /// from it at time 0.
    pub fn set_pointing(
        &mut self,
        quaternion: DQuat,
        angular_rate: DVec3,
    ) -> Result<(), WorldObjectError> {
        let state = pointing_state(quaternion, angular_rate);
        check_finite("pointing state", &state)?;
        self.pointing_state = state;
        if let Some(evaluator) = self.pointing.as_mut() {
            evaluator.set_initial(state);
        }
        Ok(())
    }

    /// Bind position dynamics over `[position, velocity]`.
    pub fn set_position_fcn(
        &mut self,
        dynamics: Dynamics<6>,
        initial_state: Option<PositionState>,
    ) -> Result<(), WorldObjectError> {
        let initial = initial_state.unwrap_or(self.position_state);
        check_finite("initial position state", &initial)?;

        let mode = dynamics.mode();
        self.position = Some(Evaluator::bind(dynamics, self.integrator, initial));
        self.position_state = initial;
        tracing::debug!(%mode, ?initial, "position dynamics bound");
        Ok(())
    }

    /// Bind a built-in position model.
    pub fn set_position_preset(
        &mut self,
        preset: Preset,
        initial_state: Option<PositionState>,
    ) -> Result<(), WorldObjectError> {
        self.set_position_fcn(preset.position_dynamics(), initial_state)
    }

    /// Replace the initial position state. A bound ODE evaluator restarts
    /// from it at time 0.
    pub fn set_position(
        &mut self,
        position: DVec3,
        velocity: DVec3,
    ) -> Result<(), WorldObjectError> {
        let state = position_state(position, velocity);
        check_finite("position state", &state)?;
        self.position_state = state;
        if let Some(evaluator) = self.position.as_mut() {
            evaluator.set_initial(state);
        }
        Ok(())
    }

    /// Change the solver shared by both subsystems.
    ///
    /// Bound ODE evaluators keep their derivative function and restart from
    /// their original initial condition at time 0; integration progress is
    /// discarded. Nothing changes if the tolerances are rejected.
    pub fn set_integrator(
        &mut self,
        method: Method,
        atol: f64,
        rtol: f64,
    ) -> Result<(), WorldObjectError> {
        let settings = IntegratorSettings::new(method, atol, rtol)?;
        self.integrator = settings;
        if let Some(evaluator) = self.pointing.as_mut() {
            evaluator.set_settings(settings);
        }
        if let Some(evaluator) = self.position.as_mut() {
            evaluator.set_settings(settings);
        }
        tracing::debug!(%method, atol, rtol, "integrator updated");
        Ok(())
    }

    /// Orientation at each requested time.
    ///
    /// A scalar time yields [`Samples::One`]; a sequence yields one attitude
    /// per time, in input order.
    pub fn get_pointing(
        &mut self,
        time: impl Into<Times>,
        mode: PointingMode,
    ) -> Result<Samples<Attitude>, WorldObjectError> {
        let times = time.into();
        let _span = tracing::debug_span!("get_pointing", n = times.len(), ?mode).entered();
        times.try_map(|t| {
            let state = self.pointing_at(t)?;
            Ok(Attitude::from_quaternion(quaternion_of(&state), mode))
        })
    }

    /// Position at each requested time.
    pub fn get_position(
        &mut self,
        time: impl Into<Times>,
    ) -> Result<Samples<DVec3>, WorldObjectError> {
        let times = time.into();
        let _span = tracing::debug_span!("get_position", n = times.len()).entered();
        times.try_map(|t| Ok(position_of(&self.position_at(t)?)))
    }

    /// Velocity at each requested time.
    pub fn get_velocity(
        &mut self,
        time: impl Into<Times>,
    ) -> Result<Samples<DVec3>, WorldObjectError> {
        let times = time.into();
        let _span = tracing::debug_span!("get_velocity", n = times.len()).entered();
        times.try_map(|t| Ok(velocity_of(&self.position_at(t)?)))
    }

    /// Full `[quaternion, angular_rate]` state at `t`.
    pub fn pointing_at(&mut self, t: f64) -> Result<PointingState, WorldObjectError> {
        let evaluator = self.pointing.as_mut().ok_or_else(|| {
            WorldObjectError::NotSupported("pointing dynamics are not modeled".into())
        })?;
        Ok(evaluator.evaluate(t)?)
    }

    /// Full `[position, velocity]` state at `t`.
    pub fn position_at(&mut self, t: f64) -> Result<PositionState, WorldObjectError> {
        let evaluator = self.position.as_mut().ok_or_else(|| {
            WorldObjectError::NotSupported("position dynamics are not modeled".into())
        })?;
        Ok(evaluator.evaluate(t)?)
    }

    /// This object's position relative to `observer`, in the observer's body
    /// frame at time `t`. An observer without position dynamics sits at the
    /// origin.
    pub fn relative_position(
        &mut self,
        observer: &mut WorldObject,
        t: f64,
    ) -> Result<DVec3, WorldObjectError> {
        let target = position_of(&self.position_at(t)?);
        let origin = if observer.model_position() {
            position_of(&observer.position_at(t)?)
        } else {
            DVec3::ZERO
        };
        let dcm = quaternion_to_dcm(quaternion_of(&observer.pointing_at(t)?));
        Ok(dcm * (target - origin))
    }
}

fn check_finite(what: &str, state: &[f64]) -> Result<(), WorldObjectError> {
    if state.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(WorldObjectError::InvalidArgument(format!(
            "{what} must be finite, got {state:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use startrack_common::rotation_angle;
    use startrack_integrate::IntegrateError;

    fn static_fcn() -> Dynamics<7> {
        Dynamics::ode(|_t, _state| [0.0; 7])
    }

    fn spinning(rate: DVec3) -> WorldObject {
        let mut obj = WorldObject::new();
        obj.set_pointing_preset(
            Preset::Kinematic,
            Some(pointing_state(DQuat::IDENTITY, rate)),
        )
        .unwrap();
        obj
    }

    #[test]
    fn starts_unmodeled_with_default_state() {
        let obj = WorldObject::new();
        assert!(!obj.model_pointing());
        assert!(!obj.model_position());
        assert_eq!(obj.pointing_mode(), None);
        assert_eq!(obj.position_mode(), None);
        assert_eq!(obj.quaternion(), DQuat::IDENTITY);
        assert_eq!(obj.angular_rate(), DVec3::ZERO);
        assert_eq!(obj.position(), DVec3::ZERO);
        assert_eq!(obj.velocity(), DVec3::ZERO);
        assert_eq!(obj.integrator(), Method::Dopri5);
        assert_eq!(obj.epoch(), 0.0);
    }

    #[test]
    fn unmodeled_queries_are_not_supported() {
        let mut obj = WorldObject::new();
        assert!(matches!(
            obj.get_pointing(1.0, PointingMode::Quaternion),
            Err(WorldObjectError::NotSupported(_))
        ));
        assert!(matches!(
            obj.get_position(1.0),
            Err(WorldObjectError::NotSupported(_))
        ));
    }

    #[test]
    fn ode_fcn_enables_pointing() {
        let mut obj = WorldObject::new();
        obj.set_pointing_fcn(static_fcn(), None).unwrap();
        assert!(obj.model_pointing());
        assert_eq!(obj.pointing_mode(), Some(DynamicsMode::Ode));
        assert_eq!(obj.pointing_at(1.0).unwrap(), obj.pointing_state());
    }

    #[test]
    fn zero_derivative_returns_initial_quaternion() {
        let mut obj = WorldObject::new();
        obj.set_pointing_fcn(static_fcn(), None).unwrap();
        let q = obj
            .get_pointing(1.0, PointingMode::Quaternion)
            .unwrap()
            .one()
            .and_then(|a| a.quaternion())
            .unwrap();
        assert_eq!(q, obj.quaternion());
    }

    #[test]
    fn explicit_fcn_is_evaluated_directly() {
        let mut obj = WorldObject::new();
        let state = obj.pointing_state();
        obj.set_pointing_fcn(Dynamics::explicit(move |_t| state), None)
            .unwrap();
        assert_eq!(obj.pointing_mode(), Some(DynamicsMode::Explicit));
        assert_eq!(obj.pointing_at(1.0).unwrap(), state);
    }

    #[test]
    fn kinematic_preset_with_default_state_is_stationary() {
        let mut obj = WorldObject::new();
        obj.set_pointing_preset(Preset::Kinematic, None).unwrap();
        assert_eq!(obj.pointing_at(1.0).unwrap(), DEFAULT_POINTING_STATE);
    }

    #[test]
    fn zero_rate_keeps_any_unit_quaternion() {
        let axes = [DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::new(-0.3, 0.2, 0.9)];
        for (i, axis) in axes.into_iter().enumerate() {
            let q = DQuat::from_axis_angle(axis.normalize(), 0.4 + i as f64);
            let mut obj = WorldObject::new();
            obj.set_pointing_preset(Preset::Kinematic, Some(pointing_state(q, DVec3::ZERO)))
                .unwrap();
            let out = obj
                .get_pointing(vec![0.0, 2.5, 100.0], PointingMode::Quaternion)
                .unwrap();
            for attitude in out.into_vec() {
                assert_eq!(attitude.quaternion(), Some(q));
            }
        }
    }

    #[test]
    fn rotation_angle_grows_linearly_with_rate() {
        let rate = DVec3::new(0.1, -0.2, 0.15);
        let mut obj = spinning(rate);
        let times = vec![0.5, 1.0, 3.0, 7.5, 10.0];
        let out = obj
            .get_pointing(times.clone(), PointingMode::Quaternion)
            .unwrap()
            .into_vec();
        for (t, attitude) in times.iter().zip(out) {
            let q = attitude.quaternion().unwrap();
            assert!((q.length() - 1.0).abs() < 1e-7, "norm drift at t = {t}");
            let expected = rate.length() * t;
            assert!(
                (rotation_angle(q) - expected).abs() < 1e-6,
                "t = {t}: angle {} vs {expected}",
                rotation_angle(q)
            );
        }
    }

    #[test]
    fn kinematic_rotation_follows_closed_form_about_z() {
        let mut obj = spinning(DVec3::new(0.0, 0.0, 0.5));
        let q = obj.get_pointing(2.0, PointingMode::Quaternion).unwrap();
        let q = q.one().and_then(|a| a.quaternion()).unwrap();
        let expected = DQuat::from_xyzw(0.0, 0.0, 0.5f64.sin(), 0.5f64.cos());
        assert!(q.abs_diff_eq(expected, 1e-8));
    }

    #[test]
    fn dcm_matches_converted_quaternion() {
        let mut obj = spinning(DVec3::new(0.3, 0.1, -0.2));
        for t in [0.0, 0.7, 4.0, 2.0] {
            let q = obj
                .get_pointing(t, PointingMode::Quaternion)
                .unwrap()
                .one()
                .and_then(|a| a.quaternion())
                .unwrap();
            let dcm = obj
                .get_pointing(t, PointingMode::Dcm)
                .unwrap()
                .one()
                .and_then(|a| a.dcm())
                .unwrap();
            assert!(dcm.abs_diff_eq(quaternion_to_dcm(q), 1e-12), "t = {t}");
        }
    }

    #[test]
    fn scalar_time_is_unwrapped_and_sequences_keep_order() {
        let mut obj = spinning(DVec3::new(0.0, 0.2, 0.0));
        let single = obj.get_pointing(1.0, PointingMode::Dcm).unwrap();
        assert!(matches!(single, Samples::One(Attitude::Dcm(_))));

        let times = vec![3.0, 1.0, 2.0, 1.0];
        let many = obj
            .get_pointing(times.clone(), PointingMode::Quaternion)
            .unwrap()
            .into_vec();
        assert_eq!(many.len(), times.len());
        for (t, attitude) in times.iter().zip(&many) {
            let mut fresh = spinning(DVec3::new(0.0, 0.2, 0.0));
            let expected = fresh
                .get_pointing(*t, PointingMode::Quaternion)
                .unwrap()
                .one()
                .and_then(|a| a.quaternion())
                .unwrap();
            assert!(attitude.quaternion().unwrap().abs_diff_eq(expected, 1e-8));
        }
    }

    #[test]
    fn set_integrator_reads_back_exactly() {
        let mut obj = WorldObject::new();
        obj.set_pointing_fcn(static_fcn(), None).unwrap();
        obj.set_integrator(Method::Vode, 1e-8, 1e-9).unwrap();
        assert_eq!(obj.integrator(), Method::Vode);
        assert_eq!(obj.integrator_atol(), 1e-8);
        assert_eq!(obj.integrator_rtol(), 1e-9);
        assert_eq!(obj.pointing_at(1.0).unwrap(), obj.pointing_state());
    }

    #[test]
    fn rejected_tolerance_leaves_settings_unchanged() {
        let mut obj = WorldObject::new();
        let before = obj.integrator_settings();
        for (atol, rtol) in [(0.0, 1e-9), (1e-9, -1e-3), (-1.0, -1.0)] {
            assert!(matches!(
                obj.set_integrator(Method::Dop853, atol, rtol),
                Err(WorldObjectError::InvalidArgument(_))
            ));
            assert_eq!(obj.integrator_settings(), before);
        }
    }

    #[test]
    fn dop853_tracks_closed_form_spin_better_than_dopri5() {
        let rate = DVec3::new(0.3, -0.2, 0.7);
        let t = 50.0;
        let angle = rate.length() * t;
        let axis = rate.normalize() * (angle / 2.0).sin();
        let expected = DQuat::from_xyzw(axis.x, axis.y, axis.z, (angle / 2.0).cos());

        let mut errors = Vec::new();
        for method in [Method::Dopri5, Method::Dop853] {
            let mut obj = spinning(rate);
            obj.set_integrator(method, 1e-6, 1e-6).unwrap();
            let q = quaternion_of(&obj.pointing_at(t).unwrap());
            errors.push((q - expected).length());
        }
        let (dopri5, dop853) = (errors[0], errors[1]);
        assert_ne!(dopri5, dop853);
        assert!(dop853 < dopri5, "dop853 {dop853:e} vs dopri5 {dopri5:e}");
    }

    #[test]
    fn epoch_is_stored_without_shifting_propagation() {
        let mut obj = spinning(DVec3::new(0.0, 0.0, 0.5));
        let before = obj.pointing_at(2.0).unwrap();
        obj.set_epoch(86_400.0);
        assert_eq!(obj.epoch(), 86_400.0);
        assert_eq!(obj.pointing_at(2.0).unwrap(), before);
    }

    #[test]
    fn unsupported_method_name_is_not_supported() {
        let err: WorldObjectError = "rk23".parse::<Method>().unwrap_err().into();
        assert!(matches!(err, WorldObjectError::NotSupported(_)));
    }

    #[test]
    fn set_integrator_restarts_from_original_initial_condition() {
        let mut obj = spinning(DVec3::new(0.0, 0.0, 1.0));
        let before = obj.pointing_at(5.0).unwrap();
        obj.set_integrator(Method::Vode, 1e-10, 1e-10).unwrap();
        // The restart integrates from t = 0 again, so t = 5 is reproduced
        // rather than advanced from the previous cursor.
        let after = obj.pointing_at(5.0).unwrap();
        for (a, b) in before.iter().zip(after) {
            assert!((a - b).abs() < 1e-7);
        }
        assert_eq!(obj.pointing_at(0.0).unwrap(), obj.pointing_state());
    }

    #[test]
    fn non_finite_initial_state_leaves_pointing_unchanged() {
        let mut obj = WorldObject::new();
        obj.set_pointing_fcn(Dynamics::explicit(|_t| DEFAULT_POINTING_STATE), None)
            .unwrap();
        let mut bad = DEFAULT_POINTING_STATE;
        bad[4] = f64::NAN;
        assert!(matches!(
            obj.set_pointing_preset(Preset::Kinematic, Some(bad)),
            Err(WorldObjectError::InvalidArgument(_))
        ));
        assert_eq!(obj.pointing_mode(), Some(DynamicsMode::Explicit));
        assert_eq!(obj.pointing_state(), DEFAULT_POINTING_STATE);
    }

    #[test]
    fn set_pointing_reseeds_ode_evaluator() {
        let mut obj = WorldObject::new();
        obj.set_pointing_preset(Preset::Kinematic, None).unwrap();
        obj.pointing_at(3.0).unwrap();
        let q = DQuat::from_axis_angle(DVec3::Z, 1.0);
        obj.set_pointing(q, DVec3::ZERO).unwrap();
        assert_eq!(obj.quaternion(), q);
        let out = obj.get_pointing(3.0, PointingMode::Quaternion).unwrap();
        assert_eq!(out.one().and_then(|a| a.quaternion()), Some(q));
    }

    #[test]
    fn position_preset_translates_at_constant_velocity() {
        let mut obj = WorldObject::new();
        let initial = position_state(DVec3::new(0.0, 0.0, 10.0), DVec3::new(0.01, -0.02, 0.0));
        obj.set_position_preset(Preset::Kinematic, Some(initial)).unwrap();
        assert!(obj.model_position());
        assert_eq!(obj.position_mode(), Some(DynamicsMode::Ode));

        let positions = obj.get_position(vec![100.0, 0.0, 50.0]).unwrap().into_vec();
        let expected = [
            DVec3::new(1.0, -2.0, 10.0),
            DVec3::new(0.0, 0.0, 10.0),
            DVec3::new(0.5, -1.0, 10.0),
        ];
        for (p, e) in positions.iter().zip(expected) {
            assert!(p.abs_diff_eq(e, 1e-9), "{p} vs {e}");
        }
        let v = obj.get_velocity(42.0).unwrap().one().unwrap();
        assert_eq!(v, DVec3::new(0.01, -0.02, 0.0));
    }

    #[test]
    fn explicit_position_fcn() {
        let mut obj = WorldObject::new();
        obj.set_position_fcn(
            Dynamics::explicit(|t| [t.cos(), t.sin(), 0.0, -t.sin(), t.cos(), 0.0]),
            None,
        )
        .unwrap();
        assert_eq!(obj.position_mode(), Some(DynamicsMode::Explicit));
        let p = obj.get_position(0.0).unwrap().one().unwrap();
        assert_eq!(p, DVec3::X);
    }

    #[test]
    fn set_position_reseeds_ode_evaluator() {
        let mut obj = WorldObject::new();
        obj.set_position_preset(Preset::Kinematic, None).unwrap();
        obj.set_position(DVec3::new(1.0, 2.0, 3.0), DVec3::X).unwrap();
        let p = obj.get_position(2.0).unwrap().one().unwrap();
        assert!(p.abs_diff_eq(DVec3::new(3.0, 2.0, 3.0), 1e-12));
    }

    #[test]
    fn solver_failure_propagates_from_query() {
        let mut obj = WorldObject::new();
        obj.set_position_fcn(
            Dynamics::ode(|_t, s: &PositionState| [s[0] * s[0], 0.0, 0.0, 0.0, 0.0, 0.0]),
            Some([1.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        )
        .unwrap();
        let err = obj.get_position(vec![0.5, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            WorldObjectError::Integration(
                IntegrateError::StepSizeUnderflow { .. }
                    | IntegrateError::TooManySteps { .. }
                    | IntegrateError::NonFinite(_)
            )
        ));
    }

    #[test]
    fn non_finite_query_time_is_invalid() {
        let mut obj = spinning(DVec3::X);
        assert!(matches!(
            obj.get_pointing(f64::INFINITY, PointingMode::Quaternion),
            Err(WorldObjectError::InvalidArgument(_))
        ));
    }

    #[test]
    fn boresight_target_sits_on_observer_z_axis() {
        let q = DQuat::from_axis_angle(DVec3::new(0.2, 0.9, -0.4).normalize(), 1.1);
        let mut camera = WorldObject::new();
        camera
            .set_pointing_preset(Preset::Kinematic, Some(pointing_state(q, DVec3::ZERO)))
            .unwrap();
        let boresight = quaternion_to_dcm(q).transpose() * DVec3::Z;

        let mut target = WorldObject::new();
        target
            .set_position_preset(
                Preset::Kinematic,
                Some(position_state(10.0 * boresight, DVec3::ZERO)),
            )
            .unwrap();
        let rel = target.relative_position(&mut camera, 1.0).unwrap();
        assert!(rel.abs_diff_eq(DVec3::new(0.0, 0.0, 10.0), 1e-9));
    }

    #[test]
    fn relative_position_subtracts_observer_position() {
        let mut camera = WorldObject::new();
        camera.set_pointing_preset(Preset::Kinematic, None).unwrap();
        camera
            .set_position_preset(
                Preset::Kinematic,
                Some(position_state(DVec3::new(1.0, 0.0, 0.0), DVec3::ZERO)),
            )
            .unwrap();
        let mut target = WorldObject::new();
        target
            .set_position_preset(
                Preset::Kinematic,
                Some(position_state(DVec3::new(1.0, 0.0, 5.0), DVec3::new(0.0, 0.1, 0.0))),
            )
            .unwrap();
        let rel = target.relative_position(&mut camera, 10.0).unwrap();
        assert!(rel.abs_diff_eq(DVec3::new(0.0, 1.0, 5.0), 1e-9));
    }
}
