//! HTTP handlers: validate, call the store, shape the envelope.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use incident_core::{
  paginate, validate, CreateIncident, Incident, IncidentError, IncidentPage, ListQuery,
  UpdateIncident,
};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
  pub status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
  Json(HealthResponse { status: "ok" })
}

pub async fn create_incident(
  State(state): State<Arc<AppState>>,
  Json(raw): Json<CreateIncident>,
) -> Result<(StatusCode, Json<Incident>), ApiError> {
  let new = validate::new_incident(&raw)?;
  let incident = state.store.create(&new).await?;
  Ok((StatusCode::CREATED, Json(incident)))
}

pub async fn list_incidents(
  State(state): State<Arc<AppState>>,
  Query(query): Query<ListQuery>,
) -> Result<Json<IncidentPage>, ApiError> {
  let plan = paginate::plan(&query, &state.limits)?;
  let rows = state.store.list(&plan).await?;
  let page = paginate::assemble(rows, plan.limit)?;
  Ok(Json(page))
}

pub async fn get_incident(
  State(state): State<Arc<AppState>>,
  Path(id): Path<i64>,
) -> Result<Json<Incident>, ApiError> {
  let incident = state
    .store
    .get(id)
    .await?
    .ok_or(IncidentError::NotFound(id))?;
  Ok(Json(incident))
}

pub async fn update_incident(
  State(state): State<Arc<AppState>>,
  Path(id): Path<i64>,
  Json(raw): Json<UpdateIncident>,
) -> Result<Json<Incident>, ApiError> {
  let patch = validate::incident_patch(&raw)?;
  let incident = state
    .store
    .update(id, &patch)
    .await?
    .ok_or(IncidentError::NotFound(id))?;
  Ok(Json(incident))
}
