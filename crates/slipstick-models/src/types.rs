//! Per-tick samples and model coefficients shared by every friction model.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_zero_velocity_band() -> f64 {
    0.001
}
const fn default_karnopp_slope() -> f64 {
    250.0
}
const fn default_mu_static() -> f64 {
    0.8
}
const fn default_mu_coulomb() -> f64 {
    0.5
}
const fn default_shape_exponent() -> f64 {
    1.0
}
const fn default_stribeck_velocity() -> f64 {
    0.01
}
const fn default_gamma() -> f64 {
    0.5
}
const fn default_stiffness() -> f64 {
    1.0e5
}

// ---------------------------------------------------------------------------
// InputData
// ---------------------------------------------------------------------------

/// Kinematic and force state of a transmission contact at one control tick.
///
/// Successive samples fed to the same model instance must have
/// non-decreasing `time`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputData {
    /// Fixed contact point position `w`.
    pub fixed_position: f64,
    /// Moving contact point position `x`.
    pub moving_position: f64,
    /// Displacement `z = x - w`.
    pub displacement: f64,
    /// Velocity of the moving contact point `dx/dt`.
    pub velocity: f64,
    /// Rate of change of the displacement `dz/dt`.
    pub displacement_rate: f64,
    /// Displacement with respect to the moving point `dz/dx`.
    pub displacement_gradient: f64,
    /// Sample time (s).
    pub time: f64,
    /// Normal contact force.
    pub normal_force: f64,
    /// Externally applied force.
    pub external_force: f64,
}

impl InputData {
    /// Zeroed sample taken at `time`.
    pub const fn at(time: f64) -> Self {
        Self {
            fixed_position: 0.0,
            moving_position: 0.0,
            displacement: 0.0,
            velocity: 0.0,
            displacement_rate: 0.0,
            displacement_gradient: 0.0,
            time,
            normal_force: 0.0,
            external_force: 0.0,
        }
    }

    /// Set the moving point velocity.
    pub const fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the normal contact force.
    pub const fn with_normal_force(mut self, normal_force: f64) -> Self {
        self.normal_force = normal_force;
        self
    }

    /// Set the externally applied force.
    pub const fn with_external_force(mut self, external_force: f64) -> Self {
        self.external_force = external_force;
        self
    }

    /// Set both contact positions; the displacement follows as `x - w`.
    pub fn with_positions(mut self, fixed: f64, moving: f64) -> Self {
        self.fixed_position = fixed;
        self.moving_position = moving;
        self.displacement = moving - fixed;
        self
    }

    /// Set the displacement directly, leaving the positions untouched.
    pub const fn with_displacement(mut self, displacement: f64) -> Self {
        self.displacement = displacement;
        self
    }
}

// ---------------------------------------------------------------------------
// RegimeMode
// ---------------------------------------------------------------------------

/// How the classical model detects the zero-velocity regime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegimeMode {
    /// Rest only at exactly `v == 0`.
    #[default]
    Exact,
    /// Karnopp reduction: rest inside `|v| < zero_velocity_band`, with a
    /// linear slope inside the band.
    Karnopp,
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Friction model coefficients.
///
/// Every model reads the subset it needs; see each model's
/// `num_parameters` for the count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Half-width of the zero-velocity band `DV` (> 0).
    #[serde(default = "default_zero_velocity_band")]
    pub zero_velocity_band: f64,
    /// Slope used inside the Karnopp band.
    #[serde(default = "default_karnopp_slope")]
    pub karnopp_slope: f64,
    /// Static friction coefficient `mu_s`.
    #[serde(default = "default_mu_static")]
    pub mu_static: f64,
    /// Coulomb (sliding) friction coefficient `mu_c`.
    #[serde(default = "default_mu_coulomb")]
    pub mu_coulomb: f64,
    /// Viscous friction coefficient `mu_v`.
    #[serde(default)]
    pub mu_viscous: f64,
    /// Stribeck curve shape exponent `delta_v`.
    #[serde(default = "default_shape_exponent")]
    pub shape_exponent: f64,
    /// Stribeck characteristic velocity `v_s` (> 0).
    #[serde(default = "default_stribeck_velocity")]
    pub stribeck_velocity: f64,
    /// Dwell time credited before the first observed sample (s).
    #[serde(default)]
    pub dwell_time: f64,
    /// Temporal constant of rising static friction (s).
    #[serde(default = "default_gamma")]
    pub gamma: f64,
    /// Zero-velocity regime detection for the classical model.
    #[serde(default)]
    pub mode: RegimeMode,
    /// Pre-sliding spring stiffness `sigma_0`.
    #[serde(default = "default_stiffness")]
    pub stiffness: f64,
    /// Lag applied to the velocity in the Stribeck term (s).
    #[serde(default)]
    pub velocity_lag: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            zero_velocity_band: default_zero_velocity_band(),
            karnopp_slope: default_karnopp_slope(),
            mu_static: default_mu_static(),
            mu_coulomb: default_mu_coulomb(),
            mu_viscous: 0.0,
            shape_exponent: default_shape_exponent(),
            stribeck_velocity: default_stribeck_velocity(),
            dwell_time: 0.0,
            gamma: default_gamma(),
            mode: RegimeMode::Exact,
            stiffness: default_stiffness(),
            velocity_lag: 0.0,
        }
    }
}

impl Parameters {
    /// Set static and Coulomb coefficients.
    pub const fn with_friction(mut self, mu_static: f64, mu_coulomb: f64) -> Self {
        self.mu_static = mu_static;
        self.mu_coulomb = mu_coulomb;
        self
    }

    /// Set the viscous coefficient.
    pub const fn with_viscous(mut self, mu_viscous: f64) -> Self {
        self.mu_viscous = mu_viscous;
        self
    }

    /// Set the zero-velocity half-width.
    pub const fn with_zero_velocity_band(mut self, band: f64) -> Self {
        self.zero_velocity_band = band;
        self
    }

    /// Set the Stribeck velocity and shape exponent.
    pub const fn with_stribeck(mut self, velocity: f64, shape_exponent: f64) -> Self {
        self.stribeck_velocity = velocity;
        self.shape_exponent = shape_exponent;
        self
    }

    /// Switch to the Karnopp band with the given slope.
    pub const fn with_karnopp(mut self, slope: f64) -> Self {
        self.mode = RegimeMode::Karnopp;
        self.karnopp_slope = slope;
        self
    }

    /// Set the rising static friction constants.
    pub const fn with_dwell(mut self, dwell_time: f64, gamma: f64) -> Self {
        self.dwell_time = dwell_time;
        self.gamma = gamma;
        self
    }

    /// Set the pre-sliding stiffness.
    pub const fn with_stiffness(mut self, stiffness: f64) -> Self {
        self.stiffness = stiffness;
        self
    }

    /// Set the Stribeck velocity lag.
    pub const fn with_velocity_lag(mut self, lag: f64) -> Self {
        self.velocity_lag = lag;
        self
    }

    /// Coulomb force `mu_c · f_n`.
    pub fn coulomb_force(&self, normal_force: f64) -> f64 {
        self.mu_coulomb * normal_force
    }

    /// Static (breakaway) force `mu_s · f_n`.
    pub fn static_force(&self, normal_force: f64) -> f64 {
        self.mu_static * normal_force
    }

    /// Stribeck magnitude reached after a long time at rest,
    /// `(mu_s - mu_c) · f_n`.
    pub fn stribeck_long_term(&self, normal_force: f64) -> f64 {
        (self.mu_static - self.mu_coulomb) * normal_force
    }

    /// Every configuration issue, in field order.
    pub fn issues(&self) -> Vec<ConfigError> {
        let mut issues = Vec::new();

        let finite = [
            ("zero_velocity_band", self.zero_velocity_band),
            ("karnopp_slope", self.karnopp_slope),
            ("mu_static", self.mu_static),
            ("mu_coulomb", self.mu_coulomb),
            ("mu_viscous", self.mu_viscous),
            ("shape_exponent", self.shape_exponent),
            ("stribeck_velocity", self.stribeck_velocity),
            ("dwell_time", self.dwell_time),
            ("gamma", self.gamma),
            ("stiffness", self.stiffness),
            ("velocity_lag", self.velocity_lag),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                issues.push(ConfigError::NonFinite { field });
            }
        }

        for (field, value) in [
            ("zero_velocity_band", self.zero_velocity_band),
            ("stribeck_velocity", self.stribeck_velocity),
        ] {
            if value <= 0.0 {
                issues.push(ConfigError::NonPositive { field, value });
            }
        }

        for (field, value) in [
            ("karnopp_slope", self.karnopp_slope),
            ("mu_static", self.mu_static),
            ("mu_coulomb", self.mu_coulomb),
            ("mu_viscous", self.mu_viscous),
            ("dwell_time", self.dwell_time),
            ("gamma", self.gamma),
            ("stiffness", self.stiffness),
            ("velocity_lag", self.velocity_lag),
        ] {
            if value < 0.0 {
                issues.push(ConfigError::Negative { field, value });
            }
        }

        if self.mu_static < self.mu_coulomb {
            issues.push(ConfigError::StaticBelowCoulomb {
                mu_static: self.mu_static,
                mu_coulomb: self.mu_coulomb,
            });
        }

        issues
    }

    /// Strict validation. Returns the first issue found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.issues().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
