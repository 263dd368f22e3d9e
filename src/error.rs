use thiserror::Error;

/// Failures of a single simulation run.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },

    #[error("non-finite position or velocity at step {step}")]
    NonFiniteResult { step: usize },

    #[error("trajectory stopped advancing at step {step} (time step too small for the altitude or velocity scale)")]
    Stalled { step: usize },

    #[error("projectile still airborne after {limit} steps")]
    StepBudgetExceeded { limit: usize },

    #[error("config file error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SimError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
