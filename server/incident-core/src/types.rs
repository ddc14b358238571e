//! Core types for the incident tracker (JSON contracts + internal models).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Severity / Status enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
  Sev1,
  Sev2,
  Sev3,
  Sev4,
}

impl Severity {
  /// Parse the canonical uppercase label. Unknown labels are rejected at the
  /// boundary, not coerced.
  pub fn from_label(s: &str) -> Option<Self> {
    match s {
      "SEV1" => Some(Self::Sev1),
      "SEV2" => Some(Self::Sev2),
      "SEV3" => Some(Self::Sev3),
      "SEV4" => Some(Self::Sev4),
      _ => None,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Sev1 => "SEV1",
      Self::Sev2 => "SEV2",
      Self::Sev3 => "SEV3",
      Self::Sev4 => "SEV4",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
  Open,
  Mitigated,
  Resolved,
}

impl Status {
  pub fn from_label(s: &str) -> Option<Self> {
    match s {
      "OPEN" => Some(Self::Open),
      "MITIGATED" => Some(Self::Mitigated),
      "RESOLVED" => Some(Self::Resolved),
      _ => None,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Open => "OPEN",
      Self::Mitigated => "MITIGATED",
      Self::Resolved => "RESOLVED",
    }
  }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// One incident row as stored and as serialized to API callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Incident {
  pub id: i64,
  pub title: String,
  pub service: String,
  pub severity: Severity,
  pub status: Status,
  pub owner: Option<String>,
  pub summary: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Inbound types (JSON contract — what the caller sends)
// ---------------------------------------------------------------------------

/// Raw create payload. Enum fields arrive as labels and are validated into
/// typed values by `validate::new_incident`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateIncident {
  pub title: String,
  pub service: String,
  pub severity: String,
  #[serde(default)]
  pub status: Option<String>,
  #[serde(default)]
  pub owner: Option<String>,
  #[serde(default)]
  pub summary: Option<String>,
}

/// Raw merge-patch payload. For the nullable columns (`owner`, `summary`) the
/// outer Option distinguishes "field absent" from "field present"; the inner
/// Option carries an explicit null that clears the column.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateIncident {
  #[serde(default)]
  pub title: Option<String>,
  #[serde(default)]
  pub service: Option<String>,
  #[serde(default)]
  pub severity: Option<String>,
  #[serde(default)]
  pub status: Option<String>,
  #[serde(default, deserialize_with = "double_option")]
  pub owner: Option<Option<String>>,
  #[serde(default, deserialize_with = "double_option")]
  pub summary: Option<Option<String>>,
}

/// Raw list query parameters, straight off the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
  #[serde(default)]
  pub limit: Option<i64>,
  #[serde(default)]
  pub cursor: Option<String>,
  #[serde(default)]
  pub search: Option<String>,
  #[serde(default)]
  pub severity: Option<String>,
  #[serde(default)]
  pub status: Option<String>,
  #[serde(default)]
  pub service: Option<String>,
}

fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
  T: Deserialize<'de>,
  D: Deserializer<'de>,
{
  Deserialize::deserialize(de).map(Some)
}

// ---------------------------------------------------------------------------
// Normalized types
// ---------------------------------------------------------------------------

/// Validated create payload, ready for the store.
#[derive(Debug, Clone)]
pub struct NewIncident {
  pub title: String,
  pub service: String,
  pub severity: Severity,
  pub status: Status,
  pub owner: Option<String>,
  pub summary: Option<String>,
}

/// Validated merge-patch. Only `Some` fields are written.
#[derive(Debug, Clone, Default)]
pub struct IncidentPatch {
  pub title: Option<String>,
  pub service: Option<String>,
  pub severity: Option<Severity>,
  pub status: Option<Status>,
  pub owner: Option<Option<String>>,
  pub summary: Option<Option<String>>,
}

impl IncidentPatch {
  pub fn is_empty(&self) -> bool {
    self.title.is_none()
      && self.service.is_none()
      && self.severity.is_none()
      && self.status.is_none()
      && self.owner.is_none()
      && self.summary.is_none()
  }
}

// ---------------------------------------------------------------------------
// Output types (JSON contract — what we emit)
// ---------------------------------------------------------------------------

/// One page of the listing. `nextCursor` is null on the final page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentPage {
  pub items: Vec<Incident>,
  #[serde(rename = "nextCursor")]
  pub next_cursor: Option<String>,
  #[serde(rename = "hasMore")]
  pub has_more: bool,
}

/// Structured error body for client-facing failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
  pub error: bool,
  pub message: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl ErrorBody {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
      field: None,
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }
}
