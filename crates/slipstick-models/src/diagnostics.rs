//! Human-readable dumps of coefficients, samples and regime state.
//!
//! Every report borrows its subject immutably.

use std::fmt;

use crate::dynamic::RegimeState;
use crate::types::{InputData, Parameters, RegimeMode};

/// Display adapter listing every coefficient, one per line.
#[derive(Debug, Clone, Copy)]
pub struct ParameterReport<'a>(pub &'a Parameters);

impl fmt::Display for ParameterReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.0;
        let mode = match p.mode {
            RegimeMode::Exact => "exact",
            RegimeMode::Karnopp => "karnopp",
        };
        writeln!(f, "model parameters")?;
        writeln!(f, "----------------")?;
        writeln!(f, "DV: {}", p.zero_velocity_band)?;
        writeln!(f, "slope: {}", p.karnopp_slope)?;
        writeln!(f, "mu_s: {}", p.mu_static)?;
        writeln!(f, "mu_c: {}", p.mu_coulomb)?;
        writeln!(f, "mu_v: {}", p.mu_viscous)?;
        writeln!(f, "delta_v: {}", p.shape_exponent)?;
        writeln!(f, "v_s: {}", p.stribeck_velocity)?;
        writeln!(f, "t_d: {}", p.dwell_time)?;
        writeln!(f, "gamma: {}", p.gamma)?;
        writeln!(f, "sigma_0: {}", p.stiffness)?;
        writeln!(f, "tau_k: {}", p.velocity_lag)?;
        write!(f, "mode: {mode}")
    }
}

/// Display adapter listing every field of a sample, one per line.
#[derive(Debug, Clone, Copy)]
pub struct SampleReport<'a>(pub &'a InputData);

impl fmt::Display for SampleReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        writeln!(f, "input data")?;
        writeln!(f, "----------")?;
        writeln!(f, "w: {}", s.fixed_position)?;
        writeln!(f, "x: {}", s.moving_position)?;
        writeln!(f, "z: {}", s.displacement)?;
        writeln!(f, "dx_dt: {}", s.velocity)?;
        writeln!(f, "dz_dt: {}", s.displacement_rate)?;
        writeln!(f, "dz_dx: {}", s.displacement_gradient)?;
        writeln!(f, "t: {}", s.time)?;
        writeln!(f, "f_n: {}", s.normal_force)?;
        write!(f, "f_ext: {}", s.external_force)
    }
}

/// One-line summary of a dynamic model's regime history.
#[derive(Debug, Clone, Copy)]
pub struct RegimeReport<'a>(pub &'a RegimeState);

impl fmt::Display for RegimeReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        write!(
            f,
            "regime={:?} breakaways={} anchor={} breakaway_dwell={}",
            s.regime, s.breakaways, s.anchor, s.breakaway_dwell
        )?;
        if let Some(since) = s.stuck_since {
            write!(f, " stuck_since={since}")?;
        }
        Ok(())
    }
}

/// Emit the parameter dump at `debug` level.
pub fn trace_parameters(model: &str, params: &Parameters) {
    tracing::debug!(model, "\n{}", ParameterReport(params));
}

/// Emit the sample dump at `debug` level.
pub fn trace_sample(sample: &InputData) {
    tracing::debug!("\n{}", SampleReport(sample));
}
