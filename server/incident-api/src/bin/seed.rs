//! Seed the incidents table with deterministic demo data.
//!
//! Usage: DATABASE_URL=... cargo run --bin seed
//!
//! Deterministic on purpose (co-prime strides instead of an RNG) so repeated
//! runs against a fresh database produce identical data.

use chrono::{Duration, Utc};
use incident_api::{ensure_schema, Config};
use incident_core::{Severity, Status};

const SERVICES: [&str; 5] = [
  "auth",
  "billing",
  "data-pipeline",
  "api-gateway",
  "notifications",
];
const SEVERITIES: [Severity; 4] = [Severity::Sev1, Severity::Sev2, Severity::Sev3, Severity::Sev4];
const STATUSES: [Status; 3] = [Status::Open, Status::Mitigated, Status::Resolved];
const OWNERS: [Option<&str>; 6] = [
  Some("alice"),
  Some("bob"),
  Some("carol"),
  Some("dave"),
  Some("eve"),
  None,
];

const SEED_COUNT: i64 = 200;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  let config = Config::from_env()?;
  let pool = sqlx::PgPool::connect(&config.database_url).await?;
  ensure_schema(&pool).await?;

  let now = Utc::now();
  for i in 0..SEED_COUNT {
    let service = SERVICES[(i * 3 % SERVICES.len() as i64) as usize];
    let severity = SEVERITIES[(i % SEVERITIES.len() as i64) as usize];
    let status = STATUSES[(i * 2 % STATUSES.len() as i64) as usize];
    let owner = OWNERS[(i * 5 % OWNERS.len() as i64) as usize];

    // Spread creation over the trailing ~120 days, newest rows first.
    let created_at = now - Duration::hours(i * 14 + (i % 7) * 3);
    let updated_at = created_at + Duration::hours(i % 72);

    sqlx::query(
      r#"
      INSERT INTO incidents (title, service, severity, status, owner, summary, created_at, updated_at)
      VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
      "#,
    )
    .bind(format!("{} incident in {} #{}", severity.as_str(), service, i + 1))
    .bind(service)
    .bind(severity.as_str())
    .bind(status.as_str())
    .bind(owner)
    .bind(format!("Seeded incident {} for service {}.", i + 1, service))
    .bind(created_at)
    .bind(updated_at)
    .execute(&pool)
    .await?;
  }

  println!("seeded {} incidents", SEED_COUNT);
  Ok(())
}
