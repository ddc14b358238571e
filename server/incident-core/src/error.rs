//! Structured error types for the incident core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IncidentError {
  #[error("invalid cursor: {0}")]
  InvalidCursor(String),

  #[error("validation: {field}: {reason}")]
  Validation { field: String, reason: String },

  #[error("incident {0} not found")]
  NotFound(i64),

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl IncidentError {
  pub fn invalid_cursor(reason: impl Into<String>) -> Self {
    Self::InvalidCursor(reason.into())
  }

  pub fn validation(field: &str, reason: &str) -> Self {
    Self::Validation {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }
}
