//! SQL schema for the Macro Insight SQLite store.
//!
//! Executed once at connection startup. Every statement is create-if-absent,
//! so re-running it against an existing file never touches stored rows.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS indicators (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    symbol      TEXT NOT NULL UNIQUE,
    name        TEXT NOT NULL,
    category    TEXT NOT NULL,
    importance  INTEGER NOT NULL,   -- higher is more important
    description TEXT
);

CREATE TABLE IF NOT EXISTS data_points (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    indicator_id     INTEGER NOT NULL REFERENCES indicators(id),
    release_date     TEXT NOT NULL,   -- YYYY-MM-DD
    actual_value     REAL NOT NULL,
    expected_value   REAL,
    previous_value   REAL,
    impact_level     TEXT NOT NULL CHECK (impact_level IN ('low', 'medium', 'high')),
    change_direction TEXT NOT NULL CHECK (change_direction IN ('up', 'down', 'stable')),
    change_amount    REAL NOT NULL,
    source           TEXT
);

-- At most one chain per indicator is intended; the seed loader checks this
-- inside a transaction and readers pick the lowest id if it is ever violated.
CREATE TABLE IF NOT EXISTS logic_chains (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    indicator_id INTEGER NOT NULL REFERENCES indicators(id)
);

CREATE TABLE IF NOT EXISTS logic_steps (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    chain_id        INTEGER NOT NULL REFERENCES logic_chains(id),
    step_order      INTEGER NOT NULL,
    title           TEXT NOT NULL,
    description     TEXT NOT NULL,
    explanation     TEXT,
    analogy         TEXT,
    historical_case TEXT
);

CREATE TABLE IF NOT EXISTS upcoming_events (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    indicator_id   INTEGER NOT NULL REFERENCES indicators(id),
    release_date   TEXT NOT NULL,
    expected_value REAL,
    importance     TEXT CHECK (importance IN ('low', 'medium', 'high')),
    description    TEXT,
    source         TEXT
);

CREATE TABLE IF NOT EXISTS historical_data (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    indicator_id INTEGER NOT NULL REFERENCES indicators(id),
    date         TEXT NOT NULL,
    value        REAL NOT NULL,
    source       TEXT
);

CREATE INDEX IF NOT EXISTS data_points_indicator_idx     ON data_points(indicator_id, release_date);
CREATE INDEX IF NOT EXISTS logic_chains_indicator_idx    ON logic_chains(indicator_id);
CREATE INDEX IF NOT EXISTS logic_steps_chain_idx         ON logic_steps(chain_id, step_order);
CREATE INDEX IF NOT EXISTS upcoming_events_indicator_idx ON upcoming_events(indicator_id, release_date);
CREATE INDEX IF NOT EXISTS historical_data_indicator_idx ON historical_data(indicator_id, date);

PRAGMA user_version = 1;
";
