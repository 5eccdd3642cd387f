//! Coulomb friction: a two-regime dead-zone law.
//!
//! ```text
//! F = f_n · mu_s   if |v| <  DV   (stuck)
//! F = f_n · mu_c   if |v| >= DV   (sliding)
//! ```
//!
//! This reduced form carries no sign term.

use crate::error::FrictionError;
use crate::model::{FrictionModel, finite_force, finite_input, screen_parameters};
use crate::types::{InputData, Parameters};

// ---------------------------------------------------------------------------
// CoulombFriction
// ---------------------------------------------------------------------------

/// Stateless Coulomb friction model.
#[derive(Clone, Debug)]
pub struct CoulombFriction {
    params: Parameters,
}

impl CoulombFriction {
    pub const NAME: &'static str = "coulomb";

    /// New Coulomb model.
    ///
    /// Out-of-range coefficients are logged and kept.
    pub fn new(params: Parameters) -> Result<Self, FrictionError> {
        screen_parameters(Self::NAME, &params, false)?;
        Ok(Self { params })
    }

    /// Coulomb force law for `sample` under `params`.
    ///
    /// The boundary `|v| == DV` is sliding.
    pub fn force(sample: &InputData, params: &Parameters) -> f64 {
        if sample.velocity.abs() < params.zero_velocity_band {
            sample.normal_force * params.mu_static
        } else {
            sample.normal_force * params.mu_coulomb
        }
    }
}

impl FrictionModel for CoulombFriction {
    fn compute_friction_force(
        &mut self,
        sample: &InputData,
        params: &Parameters,
    ) -> Result<f64, FrictionError> {
        finite_input(Self::NAME, sample)?;
        finite_force(Self::NAME, Self::force(sample, params))
    }

    fn num_parameters(&self) -> usize {
        3
    }

    fn parameters(&self) -> Parameters {
        self.params
    }

    fn set_parameters(&mut self, params: Parameters) -> Result<(), FrictionError> {
        screen_parameters(Self::NAME, &params, false)?;
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
