//! Page-size limits with sane defaults.

use crate::error::IncidentError;

/// Listing page-size policy: requests without a usable limit get
/// `default_limit`; every request is clamped to `max_limit`.
#[derive(Debug, Clone, Copy)]
pub struct PageLimits {
  pub default_limit: i64,
  pub max_limit: i64,
}

impl Default for PageLimits {
  fn default() -> Self {
    Self {
      default_limit: 20,
      max_limit: 100,
    }
  }
}

impl PageLimits {
  /// Build validated limits. `1 <= default_limit <= max_limit` is enforced
  /// here so the listing code never has to arbitrate between the two.
  pub fn new(default_limit: i64, max_limit: i64) -> Result<Self, IncidentError> {
    if default_limit < 1 {
      return Err(IncidentError::validation(
        "default_limit",
        "must be at least 1",
      ));
    }
    if max_limit < default_limit {
      return Err(IncidentError::validation(
        "max_limit",
        "must be at least the default limit",
      ));
    }
    Ok(Self {
      default_limit,
      max_limit,
    })
  }
}
