//! Friction models for mechanical transmissions.
//!
//! Computes the friction force on a transmission's moving contact point from
//! one kinematic/force sample per control tick.
//!
//! # Models
//!
//! ```text
//! Coulomb    stateless   |v| < DV → f_n·mu_s, else f_n·mu_c
//! Classical  stateless   Stribeck curve, hold/breakaway at rest, Karnopp band
//! Dynamic    stateful    stiction spring ↔ sliding, rising static friction
//! ```
//!
//! # Quick Start
//!
//! ```
//! use slipstick_models::prelude::*;
//!
//! let params = Parameters::default()
//!     .with_friction(0.8, 0.5)
//!     .with_zero_velocity_band(0.001);
//! let mut model = DynamicFriction::new(params).unwrap();
//!
//! let dt = 0.001;
//! for i in 0..100 {
//!     let t = f64::from(i) * dt;
//!     let sample = InputData::at(t).with_velocity(0.05).with_normal_force(20.0);
//!     let force = model.compute(&sample).unwrap();
//!     assert!(force.is_finite());
//! }
//! assert_eq!(model.regime(), Regime::Sliding);
//! ```

pub mod classical;
pub mod config;
pub mod coulomb;
pub mod delay;
pub mod diagnostics;
pub mod dynamic;
pub mod error;
pub mod model;
pub mod presets;
pub mod types;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::classical::ClassicalFriction;
    pub use crate::config::{FrictionConfig, ModelKind};
    pub use crate::coulomb::CoulombFriction;
    pub use crate::delay::VelocityDelayLine;
    pub use crate::diagnostics::{ParameterReport, RegimeReport, SampleReport};
    pub use crate::dynamic::{DynamicFriction, Regime, RegimeState, stribeck_magnitude};
    pub use crate::error::{ConfigError, FrictionError};
    pub use crate::model::{FrictionModel, FrictionModelType};
    pub use crate::presets;
    pub use crate::types::{InputData, Parameters, RegimeMode};
}
