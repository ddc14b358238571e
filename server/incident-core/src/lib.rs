//! Incident Tracker listing core.
//!
//! Cursor pagination, filtering, and payload validation for the incident API.
//! Pure computation: no DB, no network. The API crate supplies rows from the
//! record store; this crate decides what to ask for and how to shape the page.

pub mod config;
pub mod cursor;
pub mod error;
pub mod filter;
pub mod paginate;
pub mod types;
pub mod validate;

pub use config::PageLimits;
pub use cursor::Cursor;
pub use error::IncidentError;
pub use filter::Filter;
pub use paginate::{assemble, plan, ListPlan};
pub use types::{
  CreateIncident, ErrorBody, Incident, IncidentPage, IncidentPatch, ListQuery, NewIncident,
  Severity, Status, UpdateIncident,
};
