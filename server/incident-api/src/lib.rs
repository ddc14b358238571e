//! Incident Tracker HTTP API.
//!
//! Axum service exposing incident CRUD plus cursor-paginated listing over
//! PostgreSQL. Binds to 127.0.0.1 by default (internal only — front with a
//! proxy for external exposure).

pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod state;
pub mod store;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use store::{ensure_schema, PgStore};
