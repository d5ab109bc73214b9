//! Error types shared by the calculators, the router and the report renderer

use thiserror::Error;

/// Errors surfaced by this crate.
///
/// Degenerate arithmetic (zero cost, zero development time, non-positive
/// benefit) is never an error: those cases resolve to documented sentinel
/// values inside the calculators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EconomicsError {
    /// A field was present but could not be coerced, or is outside its domain
    #[error("Invalid input for `{field}`: {message}")]
    InvalidInput { field: String, message: String },

    /// The PDF writer failed to assemble the document
    #[error("Report rendering failed: {0}")]
    Rendering(String),
}

impl EconomicsError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        EconomicsError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// HTTP status code for the API binding
    pub fn status_code(&self) -> u16 {
        match self {
            EconomicsError::InvalidInput { .. } => 400,
            EconomicsError::Rendering(_) => 500,
        }
    }
}

impl From<std::io::Error> for EconomicsError {
    fn from(err: std::io::Error) -> Self {
        EconomicsError::Rendering(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EconomicsError>;
