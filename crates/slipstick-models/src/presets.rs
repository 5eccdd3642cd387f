//! Parameter presets for common transmission contacts.
//!
//! Values are order-of-magnitude starting points for identification, not
//! measured data.

use crate::error::ConfigError;
use crate::types::{Parameters, RegimeMode};

/// Names accepted by [`by_name`].
pub const NAMES: &[&str] = &[
    "reference",
    "dry_steel",
    "lubricated_ballscrew",
    "harmonic_drive",
    "linear_guide",
];

/// Coefficients of the bench reference case (`mu_s = 0.8`, `mu_c = 0.5`,
/// `DV = 0.001`, slope 250).
pub fn reference() -> Parameters {
    Parameters::default()
}

/// Dry steel-on-steel sliding contact.
pub const fn dry_steel() -> Parameters {
    Parameters {
        zero_velocity_band: 1.0e-3,
        karnopp_slope: 500.0,
        mu_static: 0.74,
        mu_coulomb: 0.57,
        mu_viscous: 0.0,
        shape_exponent: 1.0,
        stribeck_velocity: 5.0e-3,
        dwell_time: 0.0,
        gamma: 0.2,
        mode: RegimeMode::Exact,
        stiffness: 2.0e5,
        velocity_lag: 0.0,
    }
}

/// Oil-lubricated ball screw: low Coulomb level, strong Stribeck dip and a
/// visible frictional memory.
pub const fn lubricated_ballscrew() -> Parameters {
    Parameters {
        zero_velocity_band: 5.0e-4,
        karnopp_slope: 200.0,
        mu_static: 0.15,
        mu_coulomb: 0.08,
        mu_viscous: 0.5,
        shape_exponent: 2.0,
        stribeck_velocity: 1.0e-2,
        dwell_time: 0.0,
        gamma: 1.0,
        mode: RegimeMode::Exact,
        stiffness: 5.0e4,
        velocity_lag: 5.0e-3,
    }
}

/// Strain-wave gear contact, run with the Karnopp band.
pub const fn harmonic_drive() -> Parameters {
    Parameters {
        zero_velocity_band: 2.0e-3,
        karnopp_slope: 1000.0,
        mu_static: 0.12,
        mu_coulomb: 0.09,
        mu_viscous: 0.05,
        shape_exponent: 1.5,
        stribeck_velocity: 2.0e-2,
        dwell_time: 0.0,
        gamma: 0.5,
        mode: RegimeMode::Karnopp,
        stiffness: 1.0e5,
        velocity_lag: 2.0e-3,
    }
}

/// Recirculating-ball linear guide.
pub const fn linear_guide() -> Parameters {
    Parameters {
        zero_velocity_band: 1.0e-4,
        karnopp_slope: 100.0,
        mu_static: 0.01,
        mu_coulomb: 0.005,
        mu_viscous: 0.02,
        shape_exponent: 1.0,
        stribeck_velocity: 1.0e-3,
        dwell_time: 0.0,
        gamma: 0.1,
        mode: RegimeMode::Exact,
        stiffness: 3.0e5,
        velocity_lag: 0.0,
    }
}

/// Look up a preset by name.
pub fn by_name(name: &str) -> Result<Parameters, ConfigError> {
    match name {
        "reference" => Ok(reference()),
        "dry_steel" => Ok(dry_steel()),
        "lubricated_ballscrew" => Ok(lubricated_ballscrew()),
        "harmonic_drive" => Ok(harmonic_drive()),
        "linear_guide" => Ok(linear_guide()),
        other => Err(ConfigError::UnknownPreset(other.to_string())),
    }
}
