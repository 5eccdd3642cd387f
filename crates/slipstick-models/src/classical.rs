//! Classical friction: Stribeck curve with hold/breakaway at rest.
//!
//! # Physics
//!
//! With `F_C = mu_c·f_n` and `F_S = mu_s·f_n`:
//!
//! ```text
//!     | [F_C + (F_S - F_C)·exp(-|v/v_s|^delta_v)]·sign(v) + mu_v·v   if moving
//! F = | f_ext                                                    if at rest, |f_ext| < F_S
//!     | F_S·sign(f_ext)                                          if at rest, otherwise
//! ```
//!
//! "At rest" means `v == 0` in [`RegimeMode::Exact`]. In
//! [`RegimeMode::Karnopp`] it means `|v| < DV`, and the rest branch becomes
//! the linear dead zone `clamp(slope·v, -F_S, F_S)`.

use crate::error::FrictionError;
use crate::model::{
    FrictionModel, finite_force, finite_input, require_stribeck_velocity, screen_parameters,
};
use crate::types::{InputData, Parameters, RegimeMode};

// ---------------------------------------------------------------------------
// ClassicalFriction
// ---------------------------------------------------------------------------

/// Stateless Stribeck friction model with optional Karnopp band.
#[derive(Clone, Debug)]
pub struct ClassicalFriction {
    params: Parameters,
}

impl ClassicalFriction {
    pub const NAME: &'static str = "classical";

    /// New classical model.
    ///
    /// Rejects a non-positive Stribeck velocity; other issues are logged.
    pub fn new(params: Parameters) -> Result<Self, FrictionError> {
        screen_parameters(Self::NAME, &params, true)?;
        Ok(Self { params })
    }

    /// Sliding branch: Stribeck curve plus viscous term.
    ///
    /// Tends to `F_S·sign(v)` as `v → 0`.
    pub fn sliding_force(velocity: f64, normal_force: f64, params: &Parameters, v_s: f64) -> f64 {
        let coulomb = params.coulomb_force(normal_force);
        let stiction = params.static_force(normal_force);
        let decay = (-(velocity / v_s).abs().powf(params.shape_exponent)).exp();
        (stiction - coulomb)
            .mul_add(decay, coulomb)
            .mul_add(velocity.signum(), params.mu_viscous * velocity)
    }

    /// Rest branch: hold the external force up to the static ceiling.
    pub fn holding_force(external_force: f64, static_force: f64) -> f64 {
        if external_force.abs() < static_force {
            external_force
        } else if external_force == 0.0 {
            0.0
        } else {
            static_force * external_force.signum()
        }
    }

    /// Full three-regime law for `sample` under `params`.
    pub fn force(sample: &InputData, params: &Parameters) -> Result<f64, FrictionError> {
        let v_s = require_stribeck_velocity(params)?;
        finite_input(Self::NAME, sample)?;
        let v = sample.velocity;
        let stiction = params.static_force(sample.normal_force);

        let force = match params.mode {
            RegimeMode::Exact if v == 0.0 => Self::holding_force(sample.external_force, stiction),
            RegimeMode::Karnopp if v.abs() < params.zero_velocity_band => {
                let ceiling = stiction.abs();
                (params.karnopp_slope * v).clamp(-ceiling, ceiling)
            }
            _ => Self::sliding_force(v, sample.normal_force, params, v_s),
        };

        finite_force(Self::NAME, force)
    }
}

impl FrictionModel for ClassicalFriction {
    fn compute_friction_force(
        &mut self,
        sample: &InputData,
        params: &Parameters,
    ) -> Result<f64, FrictionError> {
        Self::force(sample, params)
    }

    fn num_parameters(&self) -> usize {
        8
    }

    fn parameters(&self) -> Parameters {
        self.params
    }

    fn set_parameters(&mut self, params: Parameters) -> Result<(), FrictionError> {
        screen_parameters(Self::NAME, &params, true)?;
        self.params = params;
        Ok(())
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const F_N: f64 = 20.0;

    fn params() -> Parameters {
        Parameters::default()
            .with_friction(0.8, 0.5)
            .with_viscous(0.2)
            .with_stribeck(0.01, 1.0)
            .with_zero_velocity_band(0.001)
    }

    fn sample(velocity: f64, external_force: f64) -> InputData {
        InputData::at(0.0)
            .with_velocity(velocity)
            .with_normal_force(F_N)
            .with_external_force(external_force)
    }

    fn model(params: Parameters) -> ClassicalFriction {
        ClassicalFriction::new(params).unwrap()
    }

    #[test]
    fn rest_holds_external_force() {
        let mut m = model(params());
        let force = m.compute(&sample(0.0, 5.0)).unwrap();
        assert!((force - 5.0).abs() < 1e-12);
        let force = m.compute(&sample(0.0, -5.0)).unwrap();
        assert!((force + 5.0).abs() < 1e-12);
    }

    #[test]
    fn rest_breakaway_saturates_at_static_force() {
        let mut m = model(params());
        // F_S = 0.8 × 20 = 16
        assert!((m.compute(&sample(0.0, 30.0)).unwrap() - 16.0).abs() < 1e-12);
        assert!((m.compute(&sample(0.0, -30.0)).unwrap() + 16.0).abs() < 1e-12);
        // exactly at the ceiling counts as breakaway
        assert!((m.compute(&sample(0.0, 16.0)).unwrap() - 16.0).abs() < 1e-12);
    }

    #[test]
    fn high_speed_approaches_coulomb_plus_viscous() {
        let mut m = model(params());
        let v = 2.0;
        let force = m.compute(&sample(v, 0.0)).unwrap();
        // exp(-200) ≈ 0 → F_C + mu_v·v = 10 + 0.4
        assert!((force - 10.4).abs() < 1e-9);
    }

    #[test]
    fn stribeck_value_at_characteristic_velocity() {
        let mut m = model(params().with_viscous(0.0));
        let force = m.compute(&sample(0.01, 0.0)).unwrap();
        let expected = 6.0f64.mul_add((-1.0f64).exp(), 10.0);
        assert!((force - expected).abs() < 1e-12);
    }

    #[test]
    fn shape_exponent_changes_curve() {
        let mut gauss = model(params().with_viscous(0.0).with_stribeck(0.01, 2.0));
        let mut exp = model(params().with_viscous(0.0).with_stribeck(0.01, 1.0));
        // below v_s the squared exponent decays more slowly
        let v = 0.005;
        assert!(gauss.compute(&sample(v, 0.0)).unwrap() > exp.compute(&sample(v, 0.0)).unwrap());
    }

    #[test]
    fn sliding_branch_is_odd() {
        let mut m = model(params());
        for v in [1e-4, 0.001, 0.003, 0.01, 0.1, 3.0] {
            let fwd = m.compute(&sample(v, 7.0)).unwrap();
            let back = m.compute(&sample(-v, 7.0)).unwrap();
            assert!((fwd + back).abs() < 1e-12, "v={v}");
        }
    }

    #[test]
    fn seam_does_not_exceed_static_force() {
        let p = params();
        let mut m = model(p);
        let ceiling = p.static_force(F_N);
        for v in [p.zero_velocity_band, -p.zero_velocity_band, 1e-9, -1e-9] {
            let force = m.compute(&sample(v, 0.0)).unwrap();
            assert!(force.abs() <= ceiling + 1e-9, "v={v} force={force}");
        }
        // limit v → 0⁺ equals F_S
        let near = ClassicalFriction::sliding_force(1e-12, F_N, &p, p.stribeck_velocity);
        assert!((near - ceiling).abs() < 1e-6);
    }

    #[test]
    fn karnopp_band_uses_slope() {
        let mut m = model(params().with_karnopp(250.0));
        // 250 × 0.0005 = 0.125, far below F_S
        let force = m.compute(&sample(0.0005, 12.0)).unwrap();
        assert!((force - 0.125).abs() < 1e-12);
        let force = m.compute(&sample(-0.0005, 12.0)).unwrap();
        assert!((force + 0.125).abs() < 1e-12);
    }

    #[test]
    fn karnopp_band_clamps_at_static_force() {
        let mut m = model(params().with_karnopp(1.0e6));
        let force = m.compute(&sample(0.0009, 0.0)).unwrap();
        assert!((force - 16.0).abs() < 1e-12);
    }

    #[test]
    fn karnopp_boundary_is_sliding() {
        let p = params().with_karnopp(250.0);
        let mut m = model(p);
        let at_band = m.compute(&sample(0.001, 0.0)).unwrap();
        let expected = ClassicalFriction::sliding_force(0.001, F_N, &p, p.stribeck_velocity);
        assert!((at_band - expected).abs() < 1e-12);
    }

    #[test]
    fn exact_mode_treats_tiny_velocity_as_sliding() {
        let mut m = model(params());
        let force = m.compute(&sample(1e-9, -3.0)).unwrap();
        assert!(force > 15.0);
    }

    #[test]
    fn zero_stribeck_velocity_rejected_at_construction() {
        let p = params().with_stribeck(0.0, 1.0);
        assert!(matches!(
            ClassicalFriction::new(p),
            Err(FrictionError::Config(_))
        ));
    }

    #[test]
    fn zero_stribeck_velocity_rejected_by_set_parameters() {
        let mut m = model(params());
        assert!(m.set_parameters(params().with_stribeck(-1.0, 1.0)).is_err());
        // stored parameters unchanged
        assert!((m.parameters().stribeck_velocity - 0.01).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_stribeck_velocity_fails_fast_at_runtime() {
        let mut m = model(params());
        let bad = params().with_stribeck(0.0, 1.0);
        assert!(matches!(
            m.compute_friction_force(&sample(0.5, 0.0), &bad),
            Err(FrictionError::DegenerateStribeckVelocity(_))
        ));
    }

    #[test]
    fn non_finite_velocity_is_an_error() {
        let mut m = model(params());
        for v in [f64::NAN, f64::INFINITY] {
            assert!(matches!(
                m.compute(&sample(v, 0.0)),
                Err(FrictionError::NonFiniteInput {
                    model: "classical",
                    field: "velocity"
                })
            ));
        }
    }

    #[test]
    fn zero_static_force_holds_nothing() {
        let mut m = model(params().with_friction(0.0, 0.0));
        assert!((m.compute(&sample(0.0, 0.0)).unwrap()).abs() < f64::EPSILON);
        assert!((m.compute(&sample(0.0, 4.0)).unwrap()).abs() < f64::EPSILON);
    }

    #[test]
    fn parameter_round_trip() {
        let mut m = model(params());
        let inputs = [sample(0.0, 3.0), sample(0.02, 0.0), sample(-0.4, 1.0)];
        let before: Vec<f64> = inputs.iter().map(|s| m.compute(s).unwrap()).collect();
        m.set_parameters(m.parameters()).unwrap();
        let after: Vec<f64> = inputs.iter().map(|s| m.compute(s).unwrap()).collect();
        assert_eq!(before, after);
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn classical_is_send_sync() {
        assert_send_sync::<ClassicalFriction>();
    }
}
