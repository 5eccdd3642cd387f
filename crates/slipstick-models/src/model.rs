//! The friction model contract and its static-dispatch enum.
//!
//! [`FrictionModel`] is the trait every variant implements.
//! [`FrictionModelType`] wraps the three variants for hosts that pick one at
//! configuration time and want to avoid a trait object.

use crate::classical::ClassicalFriction;
use crate::coulomb::CoulombFriction;
use crate::diagnostics::trace_parameters;
use crate::dynamic::DynamicFriction;
use crate::error::FrictionError;
use crate::types::{InputData, Parameters};

// ---------------------------------------------------------------------------
// FrictionModel trait (dynamic dispatch)
// ---------------------------------------------------------------------------

/// Trait for friction models.
///
/// One call per control tick. Calls on one instance must be sequential; the
/// stateful variant advances its regime history on every call.
pub trait FrictionModel: Send + Sync {
    /// Friction force for `sample`, evaluated with `params` instead of the
    /// stored coefficients.
    ///
    /// `params` has not been through construction-time validation, so a
    /// degenerate Stribeck velocity is reported here.
    fn compute_friction_force(
        &mut self,
        sample: &InputData,
        params: &Parameters,
    ) -> Result<f64, FrictionError>;

    /// Friction force for `sample` with the stored coefficients.
    fn compute(&mut self, sample: &InputData) -> Result<f64, FrictionError> {
        let params = self.parameters();
        self.compute_friction_force(sample, &params)
    }

    /// Number of independent coefficients this model consumes.
    fn num_parameters(&self) -> usize;

    /// Current coefficient set.
    fn parameters(&self) -> Parameters;

    /// Replace the coefficient set. Already-computed history is kept.
    fn set_parameters(&mut self, params: Parameters) -> Result<(), FrictionError>;

    /// Drop any internal history. Stateless models do nothing.
    fn reset(&mut self) {}

    /// Human-readable model name.
    fn name(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// Shared checks
// ---------------------------------------------------------------------------

/// Report configuration issues for `model`.
///
/// Issues are logged and the configured values are kept, except a broken
/// Stribeck velocity when the model divides by it.
pub(crate) fn screen_parameters(
    model: &'static str,
    params: &Parameters,
    uses_stribeck_velocity: bool,
) -> Result<(), FrictionError> {
    for issue in params.issues() {
        if uses_stribeck_velocity && issue.is_fatal() {
            return Err(issue.into());
        }
        tracing::warn!(model, "{issue}");
    }
    trace_parameters(model, params);
    Ok(())
}

/// Fail fast on a Stribeck velocity the force laws cannot divide by.
pub(crate) fn require_stribeck_velocity(params: &Parameters) -> Result<f64, FrictionError> {
    let v_s = params.stribeck_velocity;
    if v_s > 0.0 && v_s.is_finite() {
        Ok(v_s)
    } else {
        Err(FrictionError::DegenerateStribeckVelocity(v_s))
    }
}

/// Reject a sample whose time or velocity is NaN or infinite.
///
/// Both feed band comparisons that silently fail on NaN.
pub(crate) fn finite_input(model: &'static str, sample: &InputData) -> Result<(), FrictionError> {
    let field = if !sample.velocity.is_finite() {
        "velocity"
    } else if !sample.time.is_finite() {
        "time"
    } else {
        return Ok(());
    };
    Err(FrictionError::NonFiniteInput { model, field })
}

/// Pass `value` through if finite.
pub(crate) fn finite_force(model: &'static str, value: f64) -> Result<f64, FrictionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FrictionError::NonFiniteForce { model, value })
    }
}

// ---------------------------------------------------------------------------
// FrictionModelType enum (static dispatch)
// ---------------------------------------------------------------------------

/// Dispatch enum over the friction model variants.
///
/// Prefer this over `dyn FrictionModel` when the variant is chosen once at
/// configuration time.
#[derive(Clone, Debug)]
pub enum FrictionModelType {
    /// Two-regime Coulomb law.
    Coulomb(CoulombFriction),
    /// Stribeck curve with hold/breakaway at rest.
    Classical(ClassicalFriction),
    /// Stiction/sliding state machine with rising static friction.
    Dynamic(DynamicFriction),
}

impl FrictionModelType {
    fn inner(&self) -> &dyn FrictionModel {
        match self {
            Self::Coulomb(m) => m,
            Self::Classical(m) => m,
            Self::Dynamic(m) => m,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn FrictionModel {
        match self {
            Self::Coulomb(m) => m,
            Self::Classical(m) => m,
            Self::Dynamic(m) => m,
        }
    }
}

impl FrictionModel for FrictionModelType {
    fn compute_friction_force(
        &mut self,
        sample: &InputData,
        params: &Parameters,
    ) -> Result<f64, FrictionError> {
        self.inner_mut().compute_friction_force(sample, params)
    }

    fn compute(&mut self, sample: &InputData) -> Result<f64, FrictionError> {
        self.inner_mut().compute(sample)
    }

    fn num_parameters(&self) -> usize {
        self.inner().num_parameters()
    }

    fn parameters(&self) -> Parameters {
        self.inner().parameters()
    }

    fn set_parameters(&mut self, params: Parameters) -> Result<(), FrictionError> {
        self.inner_mut().set_parameters(params)
    }

    fn reset(&mut self) {
        self.inner_mut().reset();
    }

    fn name(&self) -> &'static str {
        self.inner().name()
    }
}

impl From<CoulombFriction> for FrictionModelType {
    fn from(model: CoulombFriction) -> Self {
        Self::Coulomb(model)
    }
}

impl From<ClassicalFriction> for FrictionModelType {
    fn from(model: ClassicalFriction) -> Self {
        Self::Classical(model)
    }
}

impl From<DynamicFriction> for FrictionModelType {
    fn from(model: DynamicFriction) -> Self {
        Self::Dynamic(model)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(velocity: f64) -> InputData {
        InputData::at(0.0)
            .with_velocity(velocity)
            .with_normal_force(20.0)
    }

    #[test]
    fn dispatch_matches_direct_call() {
        let params = Parameters::default();
        let mut direct = ClassicalFriction::new(params).unwrap();
        let mut wrapped: FrictionModelType = ClassicalFriction::new(params).unwrap().into();

        for v in [-0.5, -0.01, 0.0, 0.002, 1.0] {
            let a = direct.compute(&sample(v)).unwrap();
            let b = wrapped.compute(&sample(v)).unwrap();
            assert!((a - b).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn num_parameters_per_variant() {
        let p = Parameters::default();
        let coulomb: FrictionModelType = CoulombFriction::new(p).unwrap().into();
        let classical: FrictionModelType = ClassicalFriction::new(p).unwrap().into();
        let dynamic: FrictionModelType = DynamicFriction::new(p).unwrap().into();
        assert_eq!(coulomb.num_parameters(), 3);
        assert_eq!(classical.num_parameters(), 8);
        assert_eq!(dynamic.num_parameters(), 9);
    }

    #[test]
    fn names_per_variant() {
        let p = Parameters::default();
        let models: Vec<FrictionModelType> = vec![
            CoulombFriction::new(p).unwrap().into(),
            ClassicalFriction::new(p).unwrap().into(),
            DynamicFriction::new(p).unwrap().into(),
        ];
        let names: Vec<_> = models.iter().map(FrictionModel::name).collect();
        assert_eq!(names, vec!["coulomb", "classical", "dynamic"]);
    }

    #[test]
    fn trait_objects_work() {
        let p = Parameters::default();
        let mut models: Vec<Box<dyn FrictionModel>> = vec![
            Box::new(CoulombFriction::new(p).unwrap()),
            Box::new(ClassicalFriction::new(p).unwrap()),
            Box::new(DynamicFriction::new(p).unwrap()),
        ];
        for m in &mut models {
            let force = m.compute(&sample(1.0)).unwrap();
            assert!(force.is_finite());
        }
    }

    #[test]
    fn require_stribeck_velocity_rejects_zero_and_nan() {
        let zero = Parameters::default().with_stribeck(0.0, 1.0);
        let nan = Parameters::default().with_stribeck(f64::NAN, 1.0);
        assert!(matches!(
            require_stribeck_velocity(&zero),
            Err(FrictionError::DegenerateStribeckVelocity(_))
        ));
        assert!(require_stribeck_velocity(&nan).is_err());
        assert!(require_stribeck_velocity(&Parameters::default()).is_ok());
    }

    #[test]
    fn finite_force_rejects_nan() {
        assert!(finite_force("test", 1.5).is_ok());
        assert!(matches!(
            finite_force("test", f64::NAN),
            Err(FrictionError::NonFiniteForce { model: "test", .. })
        ));
    }

    #[test]
    fn screen_parameters_keeps_soft_issues() {
        let p = Parameters::default().with_friction(-0.1, 0.5);
        assert!(screen_parameters("test", &p, true).is_ok());
    }

    #[test]
    fn screen_parameters_rejects_stribeck_only_when_used() {
        let p = Parameters::default().with_stribeck(0.0, 1.0);
        assert!(screen_parameters("test", &p, true).is_err());
        assert!(screen_parameters("test", &p, false).is_ok());
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn model_type_is_send_sync() {
        assert_send_sync::<FrictionModelType>();
    }
}
