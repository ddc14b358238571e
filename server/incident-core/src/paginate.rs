//! Page planning and assembly for the listing engine.
//!
//! `plan` turns raw query parameters into a `ListPlan` the store executes;
//! `assemble` turns the fetched rows (limit + 1 lookahead) into one page with
//! continuation metadata. The engine is stateless: everything a follow-up
//! request needs travels in the cursor token.

use crate::config::PageLimits;
use crate::cursor::{self, Cursor};
use crate::error::IncidentError;
use crate::filter::Filter;
use crate::types::{Incident, IncidentPage, ListQuery, Severity, Status};

/// One planned read against the record store.
#[derive(Debug, Clone)]
pub struct ListPlan {
  pub filter: Filter,
  /// Keyset boundary: only rows strictly after this position are fetched.
  pub after: Option<Cursor>,
  /// Rows the caller will actually receive. Always >= 1.
  pub limit: usize,
}

impl ListPlan {
  /// Rows to request from the store: one extra as a lookahead sentinel so a
  /// further page can be detected without a count query.
  pub fn fetch_limit(&self) -> usize {
    self.limit + 1
  }
}

/// Validate query parameters and build the plan. A malformed cursor fails
/// fast with `InvalidCursor` — starting over from page one would silently
/// present first-page data as a continuation.
pub fn plan(query: &ListQuery, limits: &PageLimits) -> Result<ListPlan, IncidentError> {
  let severity = match nonempty(&query.severity) {
    Some(label) => Some(
      Severity::from_label(label)
        .ok_or_else(|| IncidentError::validation("severity", "unknown severity"))?,
    ),
    None => None,
  };
  let status = match nonempty(&query.status) {
    Some(label) => Some(
      Status::from_label(label)
        .ok_or_else(|| IncidentError::validation("status", "unknown status"))?,
    ),
    None => None,
  };

  let after = match nonempty(&query.cursor) {
    Some(token) => Some(cursor::decode(token)?),
    None => None,
  };

  let requested = query.limit.unwrap_or(0);
  let effective = if requested <= 0 {
    limits.default_limit
  } else {
    requested
  };
  let effective = effective.min(limits.max_limit);

  Ok(ListPlan {
    filter: Filter {
      severity,
      status,
      service: nonempty(&query.service).map(str::to_string),
      search: nonempty(&query.search).map(str::to_string),
    },
    after,
    limit: effective as usize,
  })
}

/// Shape fetched rows into a page. `limit` is the plan's limit (>= 1); `rows`
/// is what the store returned for `fetch_limit()`.
pub fn assemble(mut rows: Vec<Incident>, limit: usize) -> Result<IncidentPage, IncidentError> {
  let mut has_more = false;
  let mut next_cursor = None;

  if rows.len() > limit {
    has_more = true;
    let last = &rows[limit - 1];
    next_cursor = Some(cursor::encode(&Cursor {
      created_at: last.created_at,
      id: last.id,
    })?);
    rows.truncate(limit);
  }

  Ok(IncidentPage {
    items: rows,
    next_cursor,
    has_more,
  })
}

/// Blank query parameters (`?service=`) behave as absent.
fn nonempty(value: &Option<String>) -> Option<&str> {
  value.as_deref().filter(|s| !s.is_empty())
}
