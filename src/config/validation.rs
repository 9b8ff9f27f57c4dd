//! Configuration validation.

use super::types::EngineConfig;

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

/// Validate fail-fast, collapsing any findings into one error.
pub fn ensure_valid<T: Validatable>(value: &T) -> crate::error::Result<()> {
    let errors = value.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(crate::error::AssessError::validation(joined))
    }
}

impl Validatable for EngineConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.poll_interval_ms == 0 {
            errors.push(ConfigError {
                field: "poll_interval_ms".to_string(),
                message: "Polling interval must be at least 1ms".to_string(),
            });
        }

        if self.debounce_ms > self.poll_interval_ms {
            errors.push(ConfigError {
                field: "debounce_ms".to_string(),
                message: format!(
                    "Debounce ({}ms) must not exceed the polling interval ({}ms)",
                    self.debounce_ms, self.poll_interval_ms
                ),
            });
        }

        errors
    }
}
