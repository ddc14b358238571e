//! Boundary validation: raw JSON payloads into typed values.
//!
//! Field constraints match the store schema (VARCHAR widths, closed enum
//! labels). Each failure names the offending field.

use crate::error::IncidentError;
use crate::types::{CreateIncident, IncidentPatch, NewIncident, Severity, Status, UpdateIncident};

const MAX_TITLE_LEN: usize = 255;
const MAX_SERVICE_LEN: usize = 100;
const MAX_OWNER_LEN: usize = 100;

/// Validate a create payload.
pub fn new_incident(raw: &CreateIncident) -> Result<NewIncident, IncidentError> {
  let title = required_text("title", &raw.title, MAX_TITLE_LEN)?;
  let service = required_text("service", &raw.service, MAX_SERVICE_LEN)?;
  let severity = severity_label(&raw.severity)?;
  let status = match raw.status.as_deref() {
    Some(label) => status_label(label)?,
    None => Status::Open,
  };
  let owner = match raw.owner.as_deref() {
    Some(owner) => Some(bounded_text("owner", owner, MAX_OWNER_LEN)?),
    None => None,
  };

  Ok(NewIncident {
    title,
    service,
    severity,
    status,
    owner,
    summary: raw.summary.clone(),
  })
}

/// Validate a merge-patch payload. Only supplied fields are checked; the
/// result writes exactly what the caller sent.
pub fn incident_patch(raw: &UpdateIncident) -> Result<IncidentPatch, IncidentError> {
  let mut patch = IncidentPatch::default();

  if let Some(title) = raw.title.as_deref() {
    patch.title = Some(required_text("title", title, MAX_TITLE_LEN)?);
  }
  if let Some(service) = raw.service.as_deref() {
    patch.service = Some(required_text("service", service, MAX_SERVICE_LEN)?);
  }
  if let Some(label) = raw.severity.as_deref() {
    patch.severity = Some(severity_label(label)?);
  }
  if let Some(label) = raw.status.as_deref() {
    patch.status = Some(status_label(label)?);
  }
  if let Some(owner) = &raw.owner {
    patch.owner = Some(match owner.as_deref() {
      Some(owner) => Some(bounded_text("owner", owner, MAX_OWNER_LEN)?),
      None => None,
    });
  }
  if let Some(summary) = &raw.summary {
    patch.summary = Some(summary.clone());
  }

  Ok(patch)
}

fn severity_label(label: &str) -> Result<Severity, IncidentError> {
  Severity::from_label(label)
    .ok_or_else(|| IncidentError::validation("severity", "unknown severity"))
}

fn status_label(label: &str) -> Result<Status, IncidentError> {
  Status::from_label(label).ok_or_else(|| IncidentError::validation("status", "unknown status"))
}

fn required_text(field: &str, value: &str, max_len: usize) -> Result<String, IncidentError> {
  if value.trim().is_empty() {
    return Err(IncidentError::validation(field, "must not be empty"));
  }
  bounded_text(field, value, max_len)
}

fn bounded_text(field: &str, value: &str, max_len: usize) -> Result<String, IncidentError> {
  if value.chars().count() > max_len {
    return Err(IncidentError::Validation {
      field: field.to_string(),
      reason: format!("must be at most {} characters", max_len),
    });
  }
  Ok(value.to_string())
}
