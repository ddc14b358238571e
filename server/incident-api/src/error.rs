//! HTTP mapping for core and store errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use incident_core::{ErrorBody, IncidentError};

use crate::store::StoreError;

/// Anything a handler can fail with. Converts via `?` and maps onto the wire
/// contract in one place.
#[derive(Debug)]
pub enum ApiError {
  Core(IncidentError),
  Store(StoreError),
}

impl From<IncidentError> for ApiError {
  fn from(err: IncidentError) -> Self {
    Self::Core(err)
  }
}

impl From<StoreError> for ApiError {
  fn from(err: StoreError) -> Self {
    Self::Store(err)
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match self {
      Self::Core(IncidentError::InvalidCursor(reason)) => (
        StatusCode::BAD_REQUEST,
        ErrorBody::new(format!("invalid cursor: {}", reason)),
      ),
      Self::Core(IncidentError::Validation { field, reason }) => (
        StatusCode::UNPROCESSABLE_ENTITY,
        ErrorBody::new(reason).with_field(field),
      ),
      Self::Core(IncidentError::NotFound(id)) => (
        StatusCode::NOT_FOUND,
        ErrorBody::new(format!("incident {} not found", id)),
      ),
      Self::Core(IncidentError::Json(e)) => {
        tracing::error!("response encoding failed: {}", e);
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          ErrorBody::new("internal error"),
        )
      }
      Self::Store(e) => {
        tracing::error!("store error: {}", e);
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          ErrorBody::new("storage unavailable"),
        )
      }
    };
    (status, Json(body)).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn invalid_cursor_maps_to_400() {
    let response = ApiError::from(IncidentError::invalid_cursor("bad base64")).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
  }

  #[test]
  fn validation_maps_to_422() {
    let response = ApiError::from(IncidentError::validation("title", "must not be empty"))
      .into_response();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
  }

  #[test]
  fn not_found_maps_to_404() {
    let response = ApiError::from(IncidentError::NotFound(7)).into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
  }

  #[test]
  fn store_failures_map_to_500() {
    let response = ApiError::from(StoreError::Decode("unknown severity label: HUH".into()))
      .into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }
}
