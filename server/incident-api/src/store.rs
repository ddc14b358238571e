//! PostgreSQL record store for incidents.
//!
//! Translates `ListPlan` into dynamic SQL and maps rows back into core types.
//! Every operation is a single statement, so create/update commit atomically
//! with their timestamp stamping.

use incident_core::{Incident, IncidentPatch, ListPlan, NewIncident, Severity, Status};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("database: {0}")]
  Db(#[from] sqlx::Error),

  #[error("decode: {0}")]
  Decode(String),
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS incidents (
  id BIGSERIAL PRIMARY KEY,
  title VARCHAR(255) NOT NULL,
  service VARCHAR(100) NOT NULL,
  severity TEXT NOT NULL,
  status TEXT NOT NULL DEFAULT 'OPEN',
  owner VARCHAR(100),
  summary TEXT,
  created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
  updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE INDEX IF NOT EXISTS ix_incidents_created_at_id_desc ON incidents (created_at DESC, id DESC);
CREATE INDEX IF NOT EXISTS ix_incidents_service ON incidents (service);
CREATE INDEX IF NOT EXISTS ix_incidents_severity ON incidents (severity);
CREATE INDEX IF NOT EXISTS ix_incidents_status ON incidents (status);
"#;

/// Idempotent table/index bootstrap. Not a migration system; just enough for
/// a fresh database and the seed binary.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), StoreError> {
  sqlx::raw_sql(SCHEMA_SQL).execute(pool).await?;
  Ok(())
}

#[derive(Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  /// Insert a validated incident. Id and both timestamps come from the store.
  pub async fn create(&self, new: &NewIncident) -> Result<Incident, StoreError> {
    let row = sqlx::query(
      r#"
      INSERT INTO incidents (title, service, severity, status, owner, summary)
      VALUES ($1, $2, $3, $4, $5, $6)
      RETURNING id, title, service, severity, status, owner, summary, created_at, updated_at
      "#,
    )
    .bind(&new.title)
    .bind(&new.service)
    .bind(new.severity.as_str())
    .bind(new.status.as_str())
    .bind(&new.owner)
    .bind(&new.summary)
    .fetch_one(&self.pool)
    .await?;
    decode_row(&row)
  }

  pub async fn get(&self, id: i64) -> Result<Option<Incident>, StoreError> {
    let row = sqlx::query(
      r#"
      SELECT id, title, service, severity, status, owner, summary, created_at, updated_at
      FROM incidents
      WHERE id = $1
      "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;
    row.as_ref().map(decode_row).transpose()
  }

  /// Merge-patch: writes only the supplied fields and refreshes `updated_at`.
  /// An empty patch performs no write. Returns `None` for an unknown id.
  pub async fn update(
    &self,
    id: i64,
    patch: &IncidentPatch,
  ) -> Result<Option<Incident>, StoreError> {
    if patch.is_empty() {
      return self.get(id).await;
    }

    let mut qb = update_query(id, patch);
    let row = qb.build().fetch_optional(&self.pool).await?;
    row.as_ref().map(decode_row).transpose()
  }

  /// One atomic read for a planned listing: filters, keyset boundary,
  /// `(created_at DESC, id DESC)` order, limit + 1 lookahead.
  pub async fn list(&self, plan: &ListPlan) -> Result<Vec<Incident>, StoreError> {
    let mut qb = list_query(plan);
    let rows = qb.build().fetch_all(&self.pool).await?;
    rows.iter().map(decode_row).collect()
  }
}

fn update_query(id: i64, patch: &IncidentPatch) -> QueryBuilder<'_, Postgres> {
  let mut qb: QueryBuilder<Postgres> =
    QueryBuilder::new("UPDATE incidents SET updated_at = now()");
  if let Some(title) = &patch.title {
    qb.push(", title = ").push_bind(title);
  }
  if let Some(service) = &patch.service {
    qb.push(", service = ").push_bind(service);
  }
  if let Some(severity) = patch.severity {
    qb.push(", severity = ").push_bind(severity.as_str());
  }
  if let Some(status) = patch.status {
    qb.push(", status = ").push_bind(status.as_str());
  }
  if let Some(owner) = &patch.owner {
    qb.push(", owner = ").push_bind(owner.clone());
  }
  if let Some(summary) = &patch.summary {
    qb.push(", summary = ").push_bind(summary.clone());
  }
  qb.push(" WHERE id = ").push_bind(id);
  qb.push(" RETURNING id, title, service, severity, status, owner, summary, created_at, updated_at");
  qb
}

fn list_query(plan: &ListPlan) -> QueryBuilder<'_, Postgres> {
  let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
    "SELECT id, title, service, severity, status, owner, summary, created_at, updated_at \
     FROM incidents WHERE true",
  );

  if let Some(severity) = plan.filter.severity {
    qb.push(" AND severity = ").push_bind(severity.as_str());
  }
  if let Some(status) = plan.filter.status {
    qb.push(" AND status = ").push_bind(status.as_str());
  }
  if let Some(service) = &plan.filter.service {
    qb.push(" AND service = ").push_bind(service.as_str());
  }
  if let Some(term) = &plan.filter.search {
    let pattern = like_pattern(term);
    qb.push(" AND (title ILIKE ")
      .push_bind(pattern.clone())
      .push(" OR summary ILIKE ")
      .push_bind(pattern.clone())
      .push(" OR service ILIKE ")
      .push_bind(pattern)
      .push(")");
  }
  if let Some(after) = plan.after {
    qb.push(" AND (created_at < ")
      .push_bind(after.created_at)
      .push(" OR (created_at = ")
      .push_bind(after.created_at)
      .push(" AND id < ")
      .push_bind(after.id)
      .push("))");
  }

  qb.push(" ORDER BY created_at DESC, id DESC LIMIT ")
    .push_bind(plan.fetch_limit() as i64);
  qb
}

/// Escape LIKE metacharacters so the search term matches as a literal
/// substring (Postgres treats backslash as the LIKE escape by default).
fn like_pattern(term: &str) -> String {
  let escaped = term
    .replace('\\', "\\\\")
    .replace('%', "\\%")
    .replace('_', "\\_");
  format!("%{}%", escaped)
}

fn decode_row(row: &PgRow) -> Result<Incident, StoreError> {
  let severity_label: String = row.try_get("severity")?;
  let status_label: String = row.try_get("status")?;
  let severity = Severity::from_label(&severity_label)
    .ok_or_else(|| StoreError::Decode(format!("unknown severity label: {}", severity_label)))?;
  let status = Status::from_label(&status_label)
    .ok_or_else(|| StoreError::Decode(format!("unknown status label: {}", status_label)))?;

  Ok(Incident {
    id: row.try_get("id")?,
    title: row.try_get("title")?,
    service: row.try_get("service")?,
    severity,
    status,
    owner: row.try_get("owner")?,
    summary: row.try_get("summary")?,
    created_at: row.try_get("created_at")?,
    updated_at: row.try_get("updated_at")?,
  })
}
