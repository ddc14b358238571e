//! Listing filters.

use crate::types::{Incident, Severity, Status};

/// Optional predicates, AND-combined when present. `search` matches
/// case-insensitively as a substring of title, summary, or service.
#[derive(Debug, Clone, Default)]
pub struct Filter {
  pub severity: Option<Severity>,
  pub status: Option<Status>,
  pub service: Option<String>,
  pub search: Option<String>,
}

impl Filter {
  /// Reference predicate for the filter. The SQL translation in the API crate
  /// must agree with this, row for row.
  pub fn matches(&self, incident: &Incident) -> bool {
    if let Some(severity) = self.severity {
      if incident.severity != severity {
        return false;
      }
    }
    if let Some(status) = self.status {
      if incident.status != status {
        return false;
      }
    }
    if let Some(service) = &self.service {
      if incident.service != *service {
        return false;
      }
    }
    if let Some(term) = &self.search {
      let needle = term.to_lowercase();
      let in_title = incident.title.to_lowercase().contains(&needle);
      let in_summary = incident
        .summary
        .as_deref()
        .map(|s| s.to_lowercase().contains(&needle))
        .unwrap_or(false);
      let in_service = incident.service.to_lowercase().contains(&needle);
      if !(in_title || in_summary || in_service) {
        return false;
      }
    }
    true
  }
}
