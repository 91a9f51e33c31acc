//! Integration tests for `SqliteStore` against an in-memory database,
//! covering the seed loader, the query assembler, and dataset ingestion.

use chrono::NaiveDate;
use insight_core::{
  catalog::{Catalog, SeedChain},
  chain::NewLogicStep,
  indicator::NewIndicator,
  ingest::{Dataset, DatasetDataPoint, DatasetHistoryPoint, MOCK_SOURCE, import_dataset},
  period::Period,
  query::{self, QueryError},
  release::{ChangeDirection, ImpactLevel, NewDataPoint, NewUpcomingEvent},
  seed::seed,
  series::NewHistoryPoint,
  store::IndicatorStore,
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn seeded() -> SqliteStore {
  let s = store().await;
  let report = seed(&s, &Catalog::canonical()).await;
  assert!(report.is_clean(), "{report:?}");
  s
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn indicator_id(s: &SqliteStore, symbol: &str) -> i64 {
  s.get_indicator(symbol).await.unwrap().unwrap().id
}

fn data_point(indicator_id: i64, released: NaiveDate, actual: f64) -> NewDataPoint {
  NewDataPoint {
    indicator_id,
    release_date: released,
    actual_value: actual,
    expected_value: Some(actual - 0.1),
    previous_value: None,
    impact_level: ImpactLevel::High,
    change_direction: ChangeDirection::Up,
    change_amount: 0.1,
    source: None,
  }
}

fn event(indicator_id: i64, release_date: NaiveDate) -> NewUpcomingEvent {
  NewUpcomingEvent {
    indicator_id,
    release_date,
    expected_value: Some(2.5),
    importance: Some(ImpactLevel::Medium),
    description: Some(format!("release on {release_date}")),
    source: None,
  }
}

fn history(indicator_id: i64, d: NaiveDate, value: f64) -> NewHistoryPoint {
  NewHistoryPoint { indicator_id, date: d, value, source: None }
}

async fn chain_count(s: &SqliteStore, symbol: &str) -> usize {
  let id = indicator_id(s, symbol).await;
  let mut ids: Vec<i64> = s
    .chain_rows(id)
    .await
    .unwrap()
    .into_iter()
    .map(|r| r.chain_id)
    .collect();
  ids.dedup();
  ids.len()
}

// ─── Indicators ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_store_lists_no_indicators() {
  let s = store().await;
  assert!(query::indicator_list(&s).await.unwrap().is_empty());
}

#[tokio::test]
async fn indicator_list_orders_by_importance_then_symbol() {
  let s = seeded().await;

  let symbols: Vec<String> = query::indicator_list(&s)
    .await
    .unwrap()
    .into_iter()
    .map(|i| i.symbol)
    .collect();
  assert_eq!(symbols, ["CPI", "PCE", "NFP", "UNRATE", "GDP"]);
}

#[tokio::test]
async fn indicator_list_is_repeatable() {
  let s = seeded().await;
  let first = query::indicator_list(&s).await.unwrap();
  let second = query::indicator_list(&s).await.unwrap();
  assert_eq!(first, second);
}

#[tokio::test]
async fn insert_if_absent_keeps_existing_row() {
  let s = store().await;
  let original = NewIndicator {
    symbol:      "PCE".into(),
    name:        "original".into(),
    category:    "inflation".into(),
    importance:  5,
    description: None,
  };
  assert!(s.insert_indicator_if_absent(original).await.unwrap());

  let replacement = NewIndicator {
    symbol:      "PCE".into(),
    name:        "replacement".into(),
    category:    "other".into(),
    importance:  1,
    description: Some("should not land".into()),
  };
  assert!(!s.insert_indicator_if_absent(replacement).await.unwrap());

  let stored = s.get_indicator("PCE").await.unwrap().unwrap();
  assert_eq!(stored.name, "original");
  assert_eq!(stored.importance, 5);
  assert_eq!(s.list_indicators().await.unwrap().len(), 1);
}

// ─── Seeding ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn seed_populates_catalog() {
  let s = store().await;
  let report = seed(&s, &Catalog::canonical()).await;

  assert_eq!(report.indicators_inserted, 5);
  assert_eq!(report.chains_inserted, 5);
  assert!(report.is_clean());
  for symbol in ["PCE", "NFP", "CPI", "UNRATE", "GDP"] {
    assert_eq!(chain_count(&s, symbol).await, 1, "{symbol}");
  }
}

#[tokio::test]
async fn seed_twice_matches_seed_once() {
  let s = seeded().await;
  let before = s.list_indicators().await.unwrap();
  let pce_rows_before = s.chain_rows(indicator_id(&s, "PCE").await).await.unwrap();

  let report = seed(&s, &Catalog::canonical()).await;
  assert_eq!(report.indicators_inserted, 0);
  assert_eq!(report.indicators_present, 5);
  assert_eq!(report.chains_inserted, 0);
  assert_eq!(report.chains_present, 5);

  assert_eq!(s.list_indicators().await.unwrap(), before);
  let pce_rows_after = s.chain_rows(indicator_id(&s, "PCE").await).await.unwrap();
  assert_eq!(pce_rows_after, pce_rows_before);
  assert_eq!(chain_count(&s, "PCE").await, 1);
}

#[tokio::test]
async fn seed_skips_chain_without_indicator() {
  let s = store().await;
  let mut catalog = Catalog::canonical();
  catalog.chains.push(SeedChain {
    symbol: "ISM".into(),
    steps:  vec![NewLogicStep {
      step_order:      1,
      title:           "orphan".into(),
      description:     "no parent".into(),
      explanation:     None,
      analogy:         None,
      historical_case: None,
    }],
  });

  let report = seed(&s, &catalog).await;
  assert_eq!(report.skipped_chains, ["ISM"]);
  assert!(report.failures.is_empty());
  assert_eq!(report.chains_inserted, 5);
  assert!(s.get_indicator("ISM").await.unwrap().is_none());
}

#[tokio::test]
async fn seed_preserves_step_order_values() {
  let s = store().await;
  let catalog = Catalog {
    indicators: vec![NewIndicator {
      symbol:      "ISM".into(),
      name:        "ISM Manufacturing".into(),
      category:    "growth".into(),
      importance:  2,
      description: None,
    }],
    chains:     vec![SeedChain {
      symbol: "ISM".into(),
      steps:  [30, 10, 20]
        .into_iter()
        .map(|order| NewLogicStep {
          step_order:      order,
          title:           format!("step {order}"),
          description:     String::new(),
          explanation:     None,
          analogy:         None,
          historical_case: None,
        })
        .collect(),
    }],
  };
  seed(&s, &catalog).await;

  let view = query::logic_chain(&s, "ISM").await.unwrap();
  let orders: Vec<i32> = view
    .chain
    .unwrap()
    .steps
    .iter()
    .map(|st| st.step_order)
    .collect();
  assert_eq!(orders, [10, 20, 30]);
}

#[tokio::test]
async fn seed_records_failed_chain_writes_and_finishes() {
  let s = store().await;
  s.conn
    .call(|conn| {
      conn.execute_batch("DROP TABLE logic_steps;")?;
      Ok(())
    })
    .await
    .unwrap();

  let report = seed(&s, &Catalog::canonical()).await;
  assert_eq!(report.indicators_inserted, 5);
  assert_eq!(report.chains_inserted, 0);
  assert_eq!(report.failures.len(), 5);
  assert!(report.failures.iter().all(|f| f.starts_with("chain ")));
  assert!(report.skipped_chains.is_empty());
  assert!(!report.is_clean());

  // Each failed chain write rolls back its parent row.
  let chains: i64 = s
    .conn
    .call(|conn| {
      Ok(conn.query_row("SELECT COUNT(*) FROM logic_chains", [], |r| r.get(0))?)
    })
    .await
    .unwrap();
  assert_eq!(chains, 0);
  assert_eq!(query::indicator_list(&s).await.unwrap().len(), 5);
}

// ─── Logic chains ────────────────────────────────────────────────────────────

#[tokio::test]
async fn pce_chain_has_three_ordered_steps() {
  let s = seeded().await;
  let view = query::logic_chain(&s, "PCE").await.unwrap();
  assert_eq!(view.indicator.symbol, "PCE");

  let chain = view.chain.expect("PCE chain");
  let orders: Vec<i32> = chain.steps.iter().map(|st| st.step_order).collect();
  let titles: Vec<&str> = chain.steps.iter().map(|st| st.title.as_str()).collect();
  assert_eq!(orders, [1, 2, 3]);
  assert_eq!(titles, ["PCE超预期上涨", "通胀压力加大", "美联储政策转向"]);
}

#[tokio::test]
async fn indicator_without_chain_returns_none() {
  let s = store().await;
  s.insert_indicator_if_absent(NewIndicator {
    symbol:      "ISM".into(),
    name:        "ISM".into(),
    category:    "growth".into(),
    importance:  2,
    description: None,
  })
  .await
  .unwrap();

  let view = query::logic_chain(&s, "ISM").await.unwrap();
  assert!(view.chain.is_none());
}

#[tokio::test]
async fn duplicate_chain_resolves_to_lowest_id() {
  let s = seeded().await;
  let pce = indicator_id(&s, "PCE").await;
  let original = query::logic_chain(&s, "PCE").await.unwrap().chain.unwrap();

  // Force a second chain past the insert-if-absent guard.
  s.conn
    .call(move |conn| {
      conn.execute(
        "INSERT INTO logic_chains (indicator_id) VALUES (?1)",
        rusqlite::params![pce],
      )?;
      let chain_id = conn.last_insert_rowid();
      conn.execute(
        "INSERT INTO logic_steps (chain_id, step_order, title, description)
         VALUES (?1, 0, 'intruder', 'should not appear')",
        rusqlite::params![chain_id],
      )?;
      Ok(())
    })
    .await
    .unwrap();

  assert_eq!(chain_count(&s, "PCE").await, 2);
  let chain = query::logic_chain(&s, "PCE").await.unwrap().chain.unwrap();
  assert_eq!(chain, original);
  assert!(chain.steps.iter().all(|st| st.title != "intruder"));
}

#[tokio::test]
async fn chain_insert_for_missing_indicator_errors() {
  let s = store().await;
  let err = s.insert_chain_if_absent(42, vec![]).await.unwrap_err();
  assert!(matches!(err, Error::UnknownIndicator(42)));
}

// ─── Unknown symbols ─────────────────────────────────────────────────────────

#[tokio::test]
async fn unknown_symbol_is_not_found_everywhere() {
  let s = seeded().await;

  assert!(matches!(
    query::overview(&s, "NOPE", None).await,
    Err(QueryError::NotFound(sym)) if sym == "NOPE"
  ));
  assert!(matches!(
    query::logic_chain(&s, "NOPE").await,
    Err(QueryError::NotFound(_))
  ));
  assert!(matches!(
    query::historical_series(&s, "NOPE", Period::TwelveMonths, None).await,
    Err(QueryError::NotFound(_))
  ));
}

// ─── Overview ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn overview_without_rows_is_empty_not_error() {
  let s = seeded().await;
  let ov = query::overview(&s, "GDP", Some(date(2024, 1, 15))).await.unwrap();
  assert_eq!(ov.indicator.symbol, "GDP");
  assert!(ov.latest.is_none());
  assert!(ov.next_event.is_none());
}

#[tokio::test]
async fn overview_picks_latest_release_and_nearest_event() {
  let s = seeded().await;
  let cpi = indicator_id(&s, "CPI").await;

  s.record_data_point(data_point(cpi, date(2023, 11, 14), 3.1)).await.unwrap();
  s.record_data_point(data_point(cpi, date(2023, 12, 12), 3.4)).await.unwrap();
  s.record_data_point(data_point(cpi, date(2023, 10, 12), 3.7)).await.unwrap();

  s.record_upcoming_event(event(cpi, date(2024, 3, 12))).await.unwrap();
  s.record_upcoming_event(event(cpi, date(2024, 2, 13))).await.unwrap();
  s.record_upcoming_event(event(cpi, date(2023, 12, 12))).await.unwrap();

  let ov = query::overview(&s, "CPI", Some(date(2024, 1, 15))).await.unwrap();
  let latest = ov.latest.unwrap();
  assert_eq!(latest.release_date, date(2023, 12, 12));
  assert_eq!(latest.actual_value, 3.4);
  assert_eq!(latest.impact_level, ImpactLevel::High);

  let next = ov.next_event.unwrap();
  assert_eq!(next.release_date, date(2024, 2, 13));
  assert_eq!(next.importance, Some(ImpactLevel::Medium));
}

#[tokio::test]
async fn overview_lookups_are_independent() {
  let s = seeded().await;
  let nfp = indicator_id(&s, "NFP").await;
  let pce = indicator_id(&s, "PCE").await;

  s.record_data_point(data_point(nfp, date(2024, 1, 5), 216.0)).await.unwrap();
  s.record_upcoming_event(event(pce, date(2024, 1, 26))).await.unwrap();

  let as_of = Some(date(2024, 1, 15));
  let nfp_ov = query::overview(&s, "NFP", as_of).await.unwrap();
  assert!(nfp_ov.latest.is_some());
  assert!(nfp_ov.next_event.is_none());

  let pce_ov = query::overview(&s, "PCE", as_of).await.unwrap();
  assert!(pce_ov.latest.is_none());
  assert!(pce_ov.next_event.is_some());
}

// ─── Historical series ───────────────────────────────────────────────────────

async fn seeded_with_history() -> SqliteStore {
  let s = seeded().await;
  let pce = indicator_id(&s, "PCE").await;
  for (d, v) in [
    (date(2024, 1, 1), 2.6),
    (date(2022, 12, 1), 5.3),
    (date(2023, 6, 1), 3.2),
    (date(2023, 1, 15), 5.0),
    (date(2020, 6, 1), 0.9),
  ] {
    s.record_history_point(history(pce, d, v)).await.unwrap();
  }
  s
}

#[tokio::test]
async fn history_twelve_months_is_inclusive_and_ascending() {
  let s = seeded_with_history().await;
  let hs = query::historical_series(&s, "PCE", Period::TwelveMonths, Some(date(2024, 1, 15)))
    .await
    .unwrap();

  assert_eq!(hs.start, date(2023, 1, 15));
  assert_eq!(hs.period, Period::TwelveMonths);
  let series = hs.series.unwrap();
  assert_eq!(series.label, "个人消费支出价格指数");
  assert_eq!(
    series.points,
    [
      (date(2023, 1, 15), 5.0),
      (date(2023, 6, 1), 3.2),
      (date(2024, 1, 1), 2.6),
    ]
  );
}

#[tokio::test]
async fn history_three_years_widens_window() {
  let s = seeded_with_history().await;
  let hs = query::historical_series(&s, "PCE", Period::ThreeYears, Some(date(2024, 1, 15)))
    .await
    .unwrap();

  assert_eq!(hs.start, date(2021, 1, 15));
  let dates: Vec<NaiveDate> = hs.series.unwrap().labels().collect();
  assert_eq!(
    dates,
    [date(2022, 12, 1), date(2023, 1, 15), date(2023, 6, 1), date(2024, 1, 1)]
  );
}

#[tokio::test]
async fn history_without_points_in_window_is_none() {
  let s = seeded().await;
  let hs = query::historical_series(&s, "PCE", Period::TwelveMonths, Some(date(2024, 1, 15)))
    .await
    .unwrap();
  assert_eq!(hs.indicator.symbol, "PCE");
  assert!(hs.series.is_none());
}

// ─── Ingestion ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn write_with_unknown_indicator_fails_cleanly() {
  let s = seeded().await;
  let cpi = indicator_id(&s, "CPI").await;
  s.record_data_point(data_point(cpi, date(2023, 12, 12), 3.4)).await.unwrap();

  let err = s
    .record_data_point(data_point(9_999, date(2023, 12, 12), 1.0))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::UnknownIndicator(9_999)));

  let err = s
    .record_history_point(history(9_999, date(2023, 12, 1), 1.0))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::UnknownIndicator(9_999)));

  let err = s
    .record_upcoming_event(event(9_999, date(2024, 2, 13)))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::UnknownIndicator(9_999)));

  let ov = query::overview(&s, "CPI", Some(date(2024, 1, 1))).await.unwrap();
  assert_eq!(ov.latest.unwrap().actual_value, 3.4);
  assert!(ov.next_event.is_none());
}

fn mock_dataset() -> Dataset {
  Dataset {
    data_points:     vec![DatasetDataPoint {
      indicator_id:     "PCE".into(),
      release_date:     date(2023, 12, 22),
      actual_value:     2.6,
      expected_value:   Some(2.8),
      previous_value:   Some(2.9),
      impact_level:     ImpactLevel::High,
      change_direction: ChangeDirection::Down,
      change_amount:    -0.3,
    }],
    upcoming_events: vec![],
    historical_data: vec![
      DatasetHistoryPoint { indicator_id: "PCE".into(), date: date(2023, 11, 1), value: 2.9 },
      DatasetHistoryPoint { indicator_id: "PCE".into(), date: date(2023, 12, 1), value: 2.6 },
      DatasetHistoryPoint { indicator_id: "ISM".into(), date: date(2023, 12, 1), value: 47.4 },
    ],
  }
}

#[tokio::test]
async fn import_tags_rows_and_skips_unknown_symbols() {
  let s = seeded().await;
  let report = import_dataset(&s, &mock_dataset(), MOCK_SOURCE).await.unwrap();

  assert_eq!(report.imported.data_points, 1);
  assert_eq!(report.imported.history_points, 2);
  assert_eq!(report.skipped, ["history_point ISM"]);

  let counts = s.count_by_source(MOCK_SOURCE).await.unwrap();
  assert_eq!(counts, report.imported);

  let ov = query::overview(&s, "PCE", Some(date(2024, 1, 1))).await.unwrap();
  let latest = ov.latest.unwrap();
  assert_eq!(latest.source.as_deref(), Some(MOCK_SOURCE));
  assert_eq!(latest.change_direction, ChangeDirection::Down);
}

#[tokio::test]
async fn delete_by_source_leaves_other_rows() {
  let s = seeded().await;
  let pce = indicator_id(&s, "PCE").await;
  s.record_history_point(history(pce, date(2023, 10, 1), 3.4)).await.unwrap();
  import_dataset(&s, &mock_dataset(), MOCK_SOURCE).await.unwrap();

  let removed = s.delete_by_source(MOCK_SOURCE).await.unwrap();
  assert_eq!(removed.data_points, 1);
  assert_eq!(removed.history_points, 2);
  assert_eq!(s.count_by_source(MOCK_SOURCE).await.unwrap().total(), 0);

  let hs = query::historical_series(&s, "PCE", Period::TwelveMonths, Some(date(2024, 1, 1)))
    .await
    .unwrap();
  assert_eq!(hs.series.unwrap().points, [(date(2023, 10, 1), 3.4)]);

  // Reference data is untouched.
  assert_eq!(s.list_indicators().await.unwrap().len(), 5);
  assert_eq!(chain_count(&s, "PCE").await, 1);
}
