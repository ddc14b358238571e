//! Opaque keyset cursors.
//!
//! A cursor is the URL-safe base64 of `{"createdAt": "<RFC 3339>", "id": N}` —
//! the position of the last row a caller has seen under the
//! `(created_at DESC, id DESC)` order. Encoding emits no padding; decoding
//! accepts padded tokens from older encoders.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::IncidentError;

const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
  &alphabet::URL_SAFE,
  GeneralPurposeConfig::new()
    .with_encode_padding(false)
    .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Resume position in the ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
  pub created_at: DateTime<Utc>,
  pub id: i64,
}

#[derive(Serialize, Deserialize)]
struct CursorPayload {
  #[serde(rename = "createdAt")]
  created_at: String,
  id: i64,
}

impl Cursor {
  /// Keyset boundary predicate: does a row at `(created_at, id)` come strictly
  /// after this cursor under `(created_at DESC, id DESC)`? The SQL translation
  /// and the in-memory model must both agree with this definition.
  pub fn admits(&self, created_at: DateTime<Utc>, id: i64) -> bool {
    created_at < self.created_at || (created_at == self.created_at && id < self.id)
  }
}

/// Serialize a position into an opaque token. RFC 3339 keeps sub-second
/// precision, so rows sharing a display second are never falsely tied.
pub fn encode(cursor: &Cursor) -> Result<String, IncidentError> {
  let payload = CursorPayload {
    created_at: cursor.created_at.to_rfc3339(),
    id: cursor.id,
  };
  let raw = serde_json::to_vec(&payload)?;
  Ok(TOKEN_ENGINE.encode(raw))
}

/// Recover a position from a token. All-or-nothing: any undecodable stage
/// fails with `InvalidCursor` and nothing is recovered.
pub fn decode(token: &str) -> Result<Cursor, IncidentError> {
  let raw = TOKEN_ENGINE
    .decode(token)
    .map_err(|e| IncidentError::invalid_cursor(format!("bad base64: {}", e)))?;
  let payload: CursorPayload = serde_json::from_slice(&raw)
    .map_err(|e| IncidentError::invalid_cursor(format!("bad payload: {}", e)))?;
  let created_at = DateTime::parse_from_rfc3339(&payload.created_at)
    .map_err(|e| IncidentError::invalid_cursor(format!("bad createdAt: {}", e)))?
    .with_timezone(&Utc);
  Ok(Cursor {
    created_at,
    id: payload.id,
  })
}
