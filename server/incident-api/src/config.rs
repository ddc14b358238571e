//! Service configuration from environment variables.

use incident_core::PageLimits;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("{0} must be set")]
  Missing(&'static str),

  #[error("{0}: {1}")]
  Invalid(&'static str, String),
}

#[derive(Debug, Clone)]
pub struct Config {
  pub database_url: String,
  pub port: u16,
  pub limits: PageLimits,
  pub frontend_origin: String,
}

impl Config {
  /// Read and validate the full configuration. Bad values fail startup with
  /// one readable error instead of surfacing mid-request.
  pub fn from_env() -> Result<Self, ConfigError> {
    let database_url =
      std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

    let port = env_or("PORT", "8000");
    let port: u16 = port
      .parse()
      .map_err(|_| ConfigError::Invalid("PORT", format!("not a valid port: {}", port)))?;

    let default_limit = parse_limit("DEFAULT_LIMIT", &env_or("DEFAULT_LIMIT", "20"))?;
    let max_limit = parse_limit("MAX_LIMIT", &env_or("MAX_LIMIT", "100"))?;
    let limits = PageLimits::new(default_limit, max_limit)
      .map_err(|e| ConfigError::Invalid("DEFAULT_LIMIT/MAX_LIMIT", e.to_string()))?;

    Ok(Self {
      database_url,
      port,
      limits,
      frontend_origin: env_or("FRONTEND_ORIGIN", "http://localhost:5173"),
    })
  }
}

fn env_or(key: &str, default: &str) -> String {
  std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_limit(key: &'static str, value: &str) -> Result<i64, ConfigError> {
  value
    .parse()
    .map_err(|_| ConfigError::Invalid(key, format!("not an integer: {}", value)))
}
