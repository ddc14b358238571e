//! Router assembly and CORS.

use std::sync::Arc;

use axum::http::header::{InvalidHeaderValue, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the service router. The CORS origin must parse as a header value;
/// a bad origin is a startup error, not a runtime one.
pub fn router(state: Arc<AppState>, frontend_origin: &str) -> Result<Router, InvalidHeaderValue> {
  let origin = frontend_origin.parse::<HeaderValue>()?;
  let cors = CorsLayer::new()
    .allow_origin(origin)
    .allow_methods([Method::GET, Method::POST, Method::PATCH])
    .allow_headers([CONTENT_TYPE])
    .allow_credentials(true);

  Ok(
    Router::new()
      .route("/health", get(handlers::health))
      .route(
        "/incidents",
        get(handlers::list_incidents).post(handlers::create_incident),
      )
      .route(
        "/incidents/:id",
        get(handlers::get_incident).patch(handlers::update_incident),
      )
      .layer(cors)
      .with_state(state),
  )
}
