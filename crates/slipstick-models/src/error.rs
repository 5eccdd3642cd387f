use thiserror::Error;

/// Top-level error type for friction model evaluation.
#[derive(Debug, Error)]
pub enum FrictionError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Degenerate Stribeck velocity: {0} (must be > 0)")]
    DegenerateStribeckVelocity(f64),

    #[error("{model} model produced a non-finite force: {value}")]
    NonFiniteForce { model: &'static str, value: f64 },

    #[error("{model} model received a non-finite {field}")]
    NonFiniteInput {
        model: &'static str,
        field: &'static str,
    },
}

/// Configuration and parameter validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid {field}: {value} (must be > 0)")]
    NonPositive { field: &'static str, value: f64 },

    #[error("Invalid {field}: {value} (must be >= 0)")]
    Negative { field: &'static str, value: f64 },

    #[error("Invalid {field}: value is not finite")]
    NonFinite { field: &'static str },

    #[error("Static friction ({mu_static}) is below Coulomb friction ({mu_coulomb})")]
    StaticBelowCoulomb { mu_static: f64, mu_coulomb: f64 },

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
}

impl ConfigError {
    /// Whether models refuse to run with this issue.
    ///
    /// Only a broken Stribeck velocity makes the force laws undefined; the
    /// remaining issues are reported and the configured value is kept.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::NonPositive {
                field: "stribeck_velocity",
                ..
            } | Self::NonFinite {
                field: "stribeck_velocity"
            }
        )
    }
}
