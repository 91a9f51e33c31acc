//! The SQLite implementation of [`IndicatorStore`].

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::OptionalExtension as _;

use insight_core::{
  chain::{ChainStepRow, LogicStep, NewLogicStep},
  indicator::{Indicator, NewIndicator},
  release::{DataPoint, NewDataPoint, NewUpcomingEvent, UpcomingEvent},
  series::{HistoryPoint, NewHistoryPoint},
  store::{IndicatorStore, SourceCounts},
};

use crate::{
  encode::{
    DATA_POINT_COLUMNS, RawDataPoint, RawHistoryPoint, RawUpcomingEvent,
    UPCOMING_EVENT_COLUMNS, encode_date,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Macro Insight store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `insert` only if indicator `indicator_id` exists; both happen inside
  /// one connection call, so no other write can interleave.
  async fn insert_for_indicator<F>(&self, indicator_id: i64, insert: F) -> Result<i64>
  where
    F: FnOnce(&rusqlite::Connection) -> rusqlite::Result<()> + Send + 'static,
  {
    let inserted: Option<i64> = self
      .conn
      .call(move |conn| {
        if !indicator_exists(conn, indicator_id)? {
          return Ok(None);
        }
        insert(conn)?;
        Ok(Some(conn.last_insert_rowid()))
      })
      .await?;

    inserted.ok_or(Error::UnknownIndicator(indicator_id))
  }
}

fn indicator_exists(conn: &rusqlite::Connection, id: i64) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(
        "SELECT 1 FROM indicators WHERE id = ?1",
        rusqlite::params![id],
        |_| Ok(true),
      )
      .optional()?
      .unwrap_or(false),
  )
}

fn indicator_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Indicator> {
  Ok(Indicator {
    id:          row.get(0)?,
    symbol:      row.get(1)?,
    name:        row.get(2)?,
    category:    row.get(3)?,
    importance:  row.get(4)?,
    description: row.get(5)?,
  })
}

fn count_where_source(
  conn: &rusqlite::Connection,
  table: &str,
  source: &str,
) -> rusqlite::Result<u64> {
  let n: i64 = conn.query_row(
    &format!("SELECT COUNT(*) FROM {table} WHERE source = ?1"),
    rusqlite::params![source],
    |r| r.get(0),
  )?;
  Ok(n as u64)
}

// ─── IndicatorStore impl ─────────────────────────────────────────────────────

impl IndicatorStore for SqliteStore {
  type Error = Error;

  // ── Indicators ────────────────────────────────────────────────────────────

  async fn list_indicators(&self) -> Result<Vec<Indicator>> {
    let indicators = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, symbol, name, category, importance, description
           FROM indicators
           ORDER BY id",
        )?;
        let rows = stmt
          .query_map([], indicator_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(indicators)
  }

  async fn get_indicator(&self, symbol: &str) -> Result<Option<Indicator>> {
    let symbol = symbol.to_owned();

    let indicator = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, symbol, name, category, importance, description
               FROM indicators WHERE symbol = ?1",
              rusqlite::params![symbol],
              indicator_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(indicator)
  }

  async fn insert_indicator_if_absent(&self, input: NewIndicator) -> Result<bool> {
    let changed = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "INSERT OR IGNORE INTO indicators (symbol, name, category, importance, description)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            input.symbol,
            input.name,
            input.category,
            input.importance,
            input.description,
          ],
        )?;
        Ok(n)
      })
      .await?;
    Ok(changed > 0)
  }

  // ── Logic chains ──────────────────────────────────────────────────────────

  async fn chain_rows(&self, indicator_id: i64) -> Result<Vec<ChainStepRow>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT
             lc.id,
             ls.id, ls.step_order, ls.title, ls.description,
             ls.explanation, ls.analogy, ls.historical_case
           FROM logic_chains lc
           LEFT JOIN logic_steps ls ON ls.chain_id = lc.id
           WHERE lc.indicator_id = ?1
           ORDER BY lc.id, ls.step_order, ls.id",
        )?;

        let rows = stmt
          .query_map(rusqlite::params![indicator_id], |row| {
            let step_id: Option<i64> = row.get(1)?;
            let step = match step_id {
              Some(id) => Some(LogicStep {
                id,
                step_order:      row.get(2)?,
                title:           row.get(3)?,
                description:     row.get(4)?,
                explanation:     row.get(5)?,
                analogy:         row.get(6)?,
                historical_case: row.get(7)?,
              }),
              None => None,
            };
            Ok(ChainStepRow { chain_id: row.get(0)?, step })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn insert_chain_if_absent(
    &self,
    indicator_id: i64,
    steps:        Vec<NewLogicStep>,
  ) -> Result<Option<i64>> {
    enum Outcome {
      MissingIndicator,
      Present,
      Inserted(i64),
    }

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        if !indicator_exists(&tx, indicator_id)? {
          return Ok(Outcome::MissingIndicator);
        }

        let existing: Option<i64> = tx
          .query_row(
            "SELECT id FROM logic_chains WHERE indicator_id = ?1 ORDER BY id LIMIT 1",
            rusqlite::params![indicator_id],
            |r| r.get(0),
          )
          .optional()?;
        if existing.is_some() {
          return Ok(Outcome::Present);
        }

        tx.execute(
          "INSERT INTO logic_chains (indicator_id) VALUES (?1)",
          rusqlite::params![indicator_id],
        )?;
        let chain_id = tx.last_insert_rowid();

        {
          let mut stmt = tx.prepare(
            "INSERT INTO logic_steps
               (chain_id, step_order, title, description, explanation, analogy, historical_case)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          )?;
          for step in &steps {
            stmt.execute(rusqlite::params![
              chain_id,
              step.step_order,
              step.title,
              step.description,
              step.explanation,
              step.analogy,
              step.historical_case,
            ])?;
          }
        }

        tx.commit()?;
        Ok(Outcome::Inserted(chain_id))
      })
      .await?;

    match outcome {
      Outcome::MissingIndicator => Err(Error::UnknownIndicator(indicator_id)),
      Outcome::Present => Ok(None),
      Outcome::Inserted(id) => Ok(Some(id)),
    }
  }

  // ── Releases ──────────────────────────────────────────────────────────────

  async fn latest_data_point(&self, indicator_id: i64) -> Result<Option<DataPoint>> {
    let raw: Option<RawDataPoint> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {DATA_POINT_COLUMNS} FROM data_points
                 WHERE indicator_id = ?1
                 ORDER BY release_date DESC, id DESC
                 LIMIT 1"
              ),
              rusqlite::params![indicator_id],
              RawDataPoint::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawDataPoint::into_data_point).transpose()
  }

  async fn next_upcoming_event(
    &self,
    indicator_id: i64,
    from:         NaiveDate,
  ) -> Result<Option<UpcomingEvent>> {
    let from_str = encode_date(from);

    let raw: Option<RawUpcomingEvent> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {UPCOMING_EVENT_COLUMNS} FROM upcoming_events
                 WHERE indicator_id = ?1 AND release_date >= ?2
                 ORDER BY release_date ASC, id ASC
                 LIMIT 1"
              ),
              rusqlite::params![indicator_id, from_str],
              RawUpcomingEvent::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUpcomingEvent::into_event).transpose()
  }

  async fn history_since(
    &self,
    indicator_id: i64,
    start:        NaiveDate,
  ) -> Result<Vec<HistoryPoint>> {
    let start_str = encode_date(start);

    let raws: Vec<RawHistoryPoint> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, indicator_id, date, value, source
           FROM historical_data
           WHERE indicator_id = ?1 AND date >= ?2
           ORDER BY date ASC, id ASC",
        )?;
        let rows = stmt
          .query_map(
            rusqlite::params![indicator_id, start_str],
            RawHistoryPoint::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawHistoryPoint::into_point).collect()
  }

  // ── Ingestion ─────────────────────────────────────────────────────────────

  async fn record_data_point(&self, input: NewDataPoint) -> Result<DataPoint> {
    let release_date_str = encode_date(input.release_date);
    let impact_str       = input.impact_level.as_ref().to_owned();
    let direction_str    = input.change_direction.as_ref().to_owned();
    let row              = input.clone();

    let id = self
      .insert_for_indicator(input.indicator_id, move |conn| {
        conn.execute(
          "INSERT INTO data_points (
             indicator_id, release_date, actual_value, expected_value,
             previous_value, impact_level, change_direction, change_amount, source
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            row.indicator_id,
            release_date_str,
            row.actual_value,
            row.expected_value,
            row.previous_value,
            impact_str,
            direction_str,
            row.change_amount,
            row.source,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(DataPoint {
      id,
      indicator_id:     input.indicator_id,
      release_date:     input.release_date,
      actual_value:     input.actual_value,
      expected_value:   input.expected_value,
      previous_value:   input.previous_value,
      impact_level:     input.impact_level,
      change_direction: input.change_direction,
      change_amount:    input.change_amount,
      source:           input.source,
    })
  }

  async fn record_upcoming_event(&self, input: NewUpcomingEvent) -> Result<UpcomingEvent> {
    let release_date_str = encode_date(input.release_date);
    let importance_str   = input.importance.map(|i| i.as_ref().to_owned());
    let row              = input.clone();

    let id = self
      .insert_for_indicator(input.indicator_id, move |conn| {
        conn.execute(
          "INSERT INTO upcoming_events (
             indicator_id, release_date, expected_value, importance, description, source
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            row.indicator_id,
            release_date_str,
            row.expected_value,
            importance_str,
            row.description,
            row.source,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(UpcomingEvent {
      id,
      indicator_id:   input.indicator_id,
      release_date:   input.release_date,
      expected_value: input.expected_value,
      importance:     input.importance,
      description:    input.description,
      source:         input.source,
    })
  }

  async fn record_history_point(&self, input: NewHistoryPoint) -> Result<HistoryPoint> {
    let date_str = encode_date(input.date);
    let row      = input.clone();

    let id = self
      .insert_for_indicator(input.indicator_id, move |conn| {
        conn.execute(
          "INSERT INTO historical_data (indicator_id, date, value, source)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![row.indicator_id, date_str, row.value, row.source],
        )?;
        Ok(())
      })
      .await?;

    Ok(HistoryPoint {
      id,
      indicator_id: input.indicator_id,
      date:         input.date,
      value:        input.value,
      source:       input.source,
    })
  }

  async fn delete_by_source(&self, source: &str) -> Result<SourceCounts> {
    let source = source.to_owned();

    let counts = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let data_points = tx.execute(
          "DELETE FROM data_points WHERE source = ?1",
          rusqlite::params![source],
        )?;
        let upcoming_events = tx.execute(
          "DELETE FROM upcoming_events WHERE source = ?1",
          rusqlite::params![source],
        )?;
        let history_points = tx.execute(
          "DELETE FROM historical_data WHERE source = ?1",
          rusqlite::params![source],
        )?;
        tx.commit()?;

        Ok(SourceCounts {
          data_points:     data_points as u64,
          upcoming_events: upcoming_events as u64,
          history_points:  history_points as u64,
        })
      })
      .await?;

    tracing::info!(total = counts.total(), "deleted rows by source");
    Ok(counts)
  }

  async fn count_by_source(&self, source: &str) -> Result<SourceCounts> {
    let source = source.to_owned();

    let counts = self
      .conn
      .call(move |conn| {
        Ok(SourceCounts {
          data_points:     count_where_source(conn, "data_points", &source)?,
          upcoming_events: count_where_source(conn, "upcoming_events", &source)?,
          history_points:  count_where_source(conn, "historical_data", &source)?,
        })
      })
      .await?;
    Ok(counts)
  }
}
