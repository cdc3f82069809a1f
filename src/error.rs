//! Error type shared by the model, loaders and runners

use thiserror::Error;

/// Errors raised while building or loading model inputs
///
/// The numerical core (hazards, cohort steps, guidance rules) never fails;
/// these variants cover input validation and file loading only.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Out-of-domain age or unrecognized enumeration value
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed numeric field in an assumption file
    #[error("parse error in {file}: {message}")]
    Parse { file: String, message: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;

impl ModelError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ModelError::InvalidInput(message.into())
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ModelError::InvalidInput(_))
    }
}
