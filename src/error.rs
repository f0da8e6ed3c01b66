use thiserror::Error;

/// Rejected controller configuration.
///
/// Runtime anomalies (filtered, invalid or missing samples, missing
/// collaborators) never surface here; they degrade and are logged.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("`{field}` must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("environment variable `{var}` is not a number: {value:?}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("environment variable `{var}` has no effect when force mapping is disabled")]
    ForceDisabled { var: &'static str },
}
