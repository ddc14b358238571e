//! Shared application state.

use incident_core::PageLimits;

use crate::store::PgStore;

/// Handed to every handler behind an `Arc`. The store owns the pool; the
/// page limits are injected here rather than read from globals.
pub struct AppState {
  pub store: PgStore,
  pub limits: PageLimits,
}
