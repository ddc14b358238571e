//! Binary entrypoint for the incident API.

use std::net::SocketAddr;
use std::sync::Arc;

use incident_api::{ensure_schema, AppState, Config, PgStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "incident_api=info".into()),
    )
    .init();

  let config = Config::from_env()?;
  let pool = sqlx::PgPool::connect(&config.database_url).await?;
  ensure_schema(&pool).await?;

  let state = Arc::new(AppState {
    store: PgStore::new(pool),
    limits: config.limits,
  });
  let app = incident_api::router(state, &config.frontend_origin)?;

  let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
  tracing::info!("incident-api listening on http://{}", addr);

  let listener = tokio::net::TcpListener::bind(addr).await?;
  axum::serve(listener, app).await?;

  Ok(())
}
