//! Pagination walks against an in-memory model of the record store.
//!
//! The model applies a `ListPlan` exactly the way the SQL layer does: filter,
//! keyset boundary, `(created_at DESC, id DESC)` order, limit + 1 lookahead.

use chrono::{DateTime, Duration, TimeZone, Utc};
use incident_core::{cursor, paginate, Incident, ListPlan, ListQuery, PageLimits, Severity, Status};

fn base_time() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2025, 5, 20, 8, 0, 0).unwrap()
}

fn incident(id: i64, created_at: DateTime<Utc>, service: &str, severity: Severity, title: &str, summary: Option<&str>) -> Incident {
  Incident {
    id,
    title: title.to_string(),
    service: service.to_string(),
    severity,
    status: Status::Open,
    owner: None,
    summary: summary.map(str::to_string),
    created_at,
    updated_at: created_at,
  }
}

/// Dataset with deliberate `created_at` ties: five rows per timestamp so the
/// id tiebreaker actually carries weight at page boundaries.
fn tied_dataset() -> Vec<Incident> {
  let mut rows = Vec::new();
  for group in 0..5 {
    let ts = base_time() - Duration::minutes(group);
    for slot in 0..5 {
      let id = group * 5 + slot + 1;
      rows.push(incident(id, ts, "auth", Severity::Sev3, &format!("incident {}", id), None));
    }
  }
  rows
}

fn fetch(data: &[Incident], plan: &ListPlan) -> Vec<Incident> {
  let mut rows: Vec<Incident> = data
    .iter()
    .filter(|i| plan.filter.matches(i))
    .filter(|i| {
      plan
        .after
        .map_or(true, |c| c.admits(i.created_at, i.id))
    })
    .cloned()
    .collect();
  rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
  rows.truncate(plan.fetch_limit());
  rows
}

/// Follow nextCursor until hasMore is false, returning every id seen in order.
fn walk(data: &[Incident], mut query: ListQuery, limits: &PageLimits) -> Vec<i64> {
  let mut seen = Vec::new();
  loop {
    let plan = paginate::plan(&query, limits).expect("plan");
    let rows = fetch(data, &plan);
    let page = paginate::assemble(rows, plan.limit).expect("assemble");
    seen.extend(page.items.iter().map(|i| i.id));
    if !page.has_more {
      assert!(page.next_cursor.is_none(), "final page must not carry a cursor");
      return seen;
    }
    query.cursor = page.next_cursor;
  }
}

fn expected_order(data: &[Incident]) -> Vec<i64> {
  let mut rows: Vec<&Incident> = data.iter().collect();
  rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
  rows.iter().map(|i| i.id).collect()
}

#[test]
fn walk_collects_every_row_exactly_once() {
  let data = tied_dataset();
  let limits = PageLimits::new(4, 100).unwrap();
  let query = ListQuery {
    limit: Some(4),
    ..ListQuery::default()
  };

  let seen = walk(&data, query, &limits);
  assert_eq!(seen, expected_order(&data), "no skips, no duplicates, strict order");
}

#[test]
fn page_boundary_inside_a_timestamp_tie_does_not_lose_rows() {
  let data = tied_dataset();
  let limits = PageLimits::new(20, 100).unwrap();
  // limit 3 against tie groups of 5 forces every boundary mid-tie.
  let query = ListQuery {
    limit: Some(3),
    ..ListQuery::default()
  };

  let seen = walk(&data, query, &limits);
  assert_eq!(seen.len(), data.len());
  assert_eq!(seen, expected_order(&data));
}

#[test]
fn three_row_walkthrough() {
  let t1 = base_time();
  let t2 = base_time() - Duration::hours(1);
  let t3 = base_time() - Duration::hours(2);
  let data = vec![
    incident(11, t1, "auth", Severity::Sev1, "latest", None),
    incident(12, t2, "auth", Severity::Sev2, "middle", None),
    incident(13, t3, "auth", Severity::Sev3, "oldest", None),
  ];
  let limits = PageLimits::default();

  let first_query = ListQuery {
    limit: Some(2),
    ..ListQuery::default()
  };
  let plan1 = paginate::plan(&first_query, &limits).unwrap();
  let page1 = paginate::assemble(fetch(&data, &plan1), plan1.limit).unwrap();

  assert_eq!(page1.items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![11, 12]);
  assert!(page1.has_more);
  let token = page1.next_cursor.clone().expect("continuation cursor");
  let position = cursor::decode(&token).unwrap();
  assert_eq!(position.id, 12);
  assert_eq!(position.created_at, t2);

  let second_query = ListQuery {
    limit: Some(2),
    cursor: Some(token),
    ..ListQuery::default()
  };
  let plan2 = paginate::plan(&second_query, &limits).unwrap();
  let page2 = paginate::assemble(fetch(&data, &plan2), plan2.limit).unwrap();

  assert_eq!(page2.items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![13]);
  assert!(!page2.has_more);
  assert!(page2.next_cursor.is_none());
}

#[test]
fn filters_restrict_the_walk_without_breaking_it() {
  let mut data = Vec::new();
  for i in 0..30 {
    let service = if i % 2 == 0 { "auth" } else { "billing" };
    let severity = if i % 3 == 0 { Severity::Sev1 } else { Severity::Sev3 };
    data.push(incident(
      i + 1,
      base_time() - Duration::minutes(i),
      service,
      severity,
      &format!("incident {}", i + 1),
      None,
    ));
  }
  let limits = PageLimits::default();
  let query = ListQuery {
    limit: Some(4),
    service: Some("auth".to_string()),
    severity: Some("SEV1".to_string()),
    ..ListQuery::default()
  };

  let seen = walk(&data, query, &limits);
  let expected: Vec<i64> = expected_order(&data)
    .into_iter()
    .filter(|id| {
      let row = data.iter().find(|i| i.id == *id).unwrap();
      row.service == "auth" && row.severity == Severity::Sev1
    })
    .collect();
  assert!(!expected.is_empty());
  assert_eq!(seen, expected);
}

#[test]
fn substring_search_finds_summary_text() {
  let data = vec![
    incident(1, base_time(), "storage", Severity::Sev2, "Disk pressure", Some("database outage")),
    incident(2, base_time() - Duration::minutes(1), "auth", Severity::Sev2, "Token churn", None),
  ];
  let limits = PageLimits::default();

  let hit = ListQuery {
    search: Some("data".to_string()),
    ..ListQuery::default()
  };
  assert_eq!(walk(&data, hit, &limits), vec![1]);

  let miss = ListQuery {
    search: Some("kafka".to_string()),
    ..ListQuery::default()
  };
  assert!(walk(&data, miss, &limits).is_empty());
}

#[test]
fn cursor_past_the_end_yields_an_empty_final_page() {
  let data = tied_dataset();
  let limits = PageLimits::default();

  let oldest = data
    .iter()
    .min_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)))
    .unwrap();
  let token = cursor::encode(&incident_core::Cursor {
    created_at: oldest.created_at,
    id: oldest.id,
  })
  .unwrap();

  let query = ListQuery {
    cursor: Some(token),
    ..ListQuery::default()
  };
  let plan = paginate::plan(&query, &limits).unwrap();
  let page = paginate::assemble(fetch(&data, &plan), plan.limit).unwrap();
  assert!(page.items.is_empty());
  assert!(!page.has_more);
  assert!(page.next_cursor.is_none());
}

#[test]
fn zero_matching_rows_is_an_empty_page_not_an_error() {
  let data = tied_dataset();
  let limits = PageLimits::default();
  let query = ListQuery {
    service: Some("no-such-service".to_string()),
    ..ListQuery::default()
  };

  let plan = paginate::plan(&query, &limits).unwrap();
  let page = paginate::assemble(fetch(&data, &plan), plan.limit).unwrap();
  assert!(page.items.is_empty());
  assert!(!page.has_more);
}
