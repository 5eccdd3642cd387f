//! TOML configuration for selecting and building a friction model.
//!
//! ```toml
//! model = "dynamic"
//! strict = false
//! preset = "lubricated_ballscrew"   # used when [parameters] is absent
//!
//! [parameters]
//! mu_static = 0.8
//! mu_coulomb = 0.5
//! stribeck_velocity = 0.01
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classical::ClassicalFriction;
use crate::coulomb::CoulombFriction;
use crate::dynamic::DynamicFriction;
use crate::error::{ConfigError, FrictionError};
use crate::model::FrictionModelType;
use crate::presets;
use crate::types::Parameters;

// ---------------------------------------------------------------------------
// ModelKind
// ---------------------------------------------------------------------------

/// Which friction model variant to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Coulomb,
    #[default]
    Classical,
    Dynamic,
}

impl ModelKind {
    /// Whether the variant divides by the Stribeck velocity.
    pub const fn uses_stribeck_velocity(self) -> bool {
        !matches!(self, Self::Coulomb)
    }
}

// ---------------------------------------------------------------------------
// FrictionConfig
// ---------------------------------------------------------------------------

/// Friction model configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrictionConfig {
    /// Model variant.
    #[serde(default)]
    pub model: ModelKind,

    /// Treat every parameter issue as an error instead of a warning.
    #[serde(default)]
    pub strict: bool,

    /// Named preset, used when `parameters` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    /// Explicit coefficients. Missing fields take their defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Parameters>,
}

impl FrictionConfig {
    /// Configuration for `model` with explicit parameters.
    pub const fn new(model: ModelKind, parameters: Parameters) -> Self {
        Self {
            model,
            strict: false,
            preset: None,
            parameters: Some(parameters),
        }
    }

    /// Turn every parameter issue into an error.
    pub const fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Parse from a TOML string.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Coefficients after applying the preset fallback.
    pub fn resolved_parameters(&self) -> Result<Parameters, ConfigError> {
        match (&self.parameters, &self.preset) {
            (Some(params), preset) => {
                if let Some(name) = preset {
                    tracing::warn!(preset = %name, "explicit [parameters] override the preset");
                }
                Ok(*params)
            }
            (None, Some(name)) => presets::by_name(name),
            (None, None) => Ok(Parameters::default()),
        }
    }

    /// Validate configuration. Returns Err on values the model cannot run
    /// with, or on any issue in strict mode.
    pub fn validate(&self) -> Result<Parameters, ConfigError> {
        let params = self.resolved_parameters()?;
        for issue in params.issues() {
            if self.strict || (issue.is_fatal() && self.model.uses_stribeck_velocity()) {
                return Err(issue);
            }
        }
        Ok(params)
    }

    /// Build the configured model.
    pub fn build(&self) -> Result<FrictionModelType, FrictionError> {
        let params = self.validate()?;
        Ok(match self.model {
            ModelKind::Coulomb => CoulombFriction::new(params)?.into(),
            ModelKind::Classical => ClassicalFriction::new(params)?.into(),
            ModelKind::Dynamic => DynamicFriction::new(params)?.into(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FrictionModel;
    use crate::types::RegimeMode;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = FrictionConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, FrictionConfig::default());
        assert_eq!(cfg.model, ModelKind::Classical);
        assert_eq!(cfg.resolved_parameters().unwrap(), Parameters::default());
    }

    #[test]
    fn parses_full_document() {
        let cfg = FrictionConfig::from_toml_str(
            r#"
            model = "dynamic"
            strict = true

            [parameters]
            zero_velocity_band = 0.002
            mu_static = 0.9
            mu_coulomb = 0.4
            mu_viscous = 0.1
            stribeck_velocity = 0.02
            gamma = 0.3
            mode = "karnopp"
            stiffness = 5000.0
            velocity_lag = 0.01
            "#,
        )
        .unwrap();
        assert_eq!(cfg.model, ModelKind::Dynamic);
        assert!(cfg.strict);
        let p = cfg.resolved_parameters().unwrap();
        assert!((p.zero_velocity_band - 0.002).abs() < f64::EPSILON);
        assert!((p.mu_static - 0.9).abs() < f64::EPSILON);
        assert_eq!(p.mode, RegimeMode::Karnopp);
        assert!((p.velocity_lag - 0.01).abs() < f64::EPSILON);
        // unspecified fields fall back to defaults
        assert!((p.karnopp_slope - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn preset_is_used_without_parameters() {
        let cfg = FrictionConfig::from_toml_str(r#"preset = "dry_steel""#).unwrap();
        assert_eq!(cfg.resolved_parameters().unwrap(), presets::dry_steel());
    }

    #[test]
    fn explicit_parameters_win_over_preset() {
        let cfg = FrictionConfig::from_toml_str(
            r#"
            preset = "dry_steel"
            [parameters]
            mu_static = 0.3
            mu_coulomb = 0.2
            "#,
        )
        .unwrap();
        let p = cfg.resolved_parameters().unwrap();
        assert!((p.mu_static - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_preset_fails() {
        let cfg = FrictionConfig::from_toml_str(r#"preset = "ice""#).unwrap();
        assert!(matches!(cfg.validate(), Err(ConfigError::UnknownPreset(_))));
    }

    #[test]
    fn unknown_model_fails_to_parse() {
        let err = FrictionConfig::from_toml_str(r#"model = "lugre""#).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn lenient_keeps_soft_issues() {
        let params = Parameters::default().with_friction(0.2, 0.5);
        let cfg = FrictionConfig::new(ModelKind::Classical, params);
        assert!(cfg.validate().is_ok());
        assert!(cfg.build().is_ok());
    }

    #[test]
    fn strict_rejects_soft_issues() {
        let params = Parameters::default().with_friction(0.2, 0.5);
        let cfg = FrictionConfig::new(ModelKind::Classical, params).strict();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::StaticBelowCoulomb { .. })
        ));
        assert!(matches!(cfg.build(), Err(FrictionError::Config(_))));
    }

    #[test]
    fn zero_stribeck_velocity_only_fatal_for_models_using_it() {
        let params = Parameters::default().with_stribeck(0.0, 1.0);
        assert!(
            FrictionConfig::new(ModelKind::Coulomb, params)
                .build()
                .is_ok()
        );
        assert!(
            FrictionConfig::new(ModelKind::Classical, params)
                .build()
                .is_err()
        );
        assert!(
            FrictionConfig::new(ModelKind::Dynamic, params)
                .build()
                .is_err()
        );
    }

    #[test]
    fn build_selects_variant() {
        for (kind, name) in [
            (ModelKind::Coulomb, "coulomb"),
            (ModelKind::Classical, "classical"),
            (ModelKind::Dynamic, "dynamic"),
        ] {
            let model = FrictionConfig::new(kind, Parameters::default())
                .build()
                .unwrap();
            assert_eq!(model.name(), name);
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = FrictionConfig::from_file("/nonexistent/slipstick.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn serialize_round_trip() {
        let cfg = FrictionConfig::new(ModelKind::Dynamic, presets::harmonic_drive());
        let text = toml::to_string(&cfg).unwrap();
        let back = FrictionConfig::from_toml_str(&text).unwrap();
        assert_eq!(cfg, back);
    }
}
