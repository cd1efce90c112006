//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `trace.db` file in the configured output directory with
//! two tables: `behavior_snapshots` and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{BehaviorSnapshotRow, OutputResult, TickSummaryRow};

/// Writes a behavior trace to an SQLite database.  Absent ids are `NULL`.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `trace.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("trace.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS behavior_snapshots (
                 tick                          INTEGER NOT NULL,
                 character_id                  TEXT    NOT NULL,
                 x                             REAL    NOT NULL,
                 y                             REAL    NOT NULL,
                 direction                     TEXT    NOT NULL,
                 behavior_target_id            TEXT,
                 target_entity_id              TEXT,
                 queue_status                  TEXT    NOT NULL,
                 current_interaction_target_id TEXT,
                 path_len                      INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick                 INTEGER PRIMARY KEY,
                 elapsed_ms           INTEGER NOT NULL,
                 processed_characters INTEGER NOT NULL,
                 events               INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshots(&mut self, rows: &[BehaviorSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO behavior_snapshots \
                 (tick, character_id, x, y, direction, behavior_target_id, target_entity_id, \
                  queue_status, current_interaction_target_id, path_len) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick,
                    row.character_id,
                    row.x as f64,
                    row.y as f64,
                    row.direction,
                    row.behavior_target_id,
                    row.target_entity_id,
                    row.queue_status,
                    row.current_interaction_target_id,
                    row.path_len,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries (tick, elapsed_ms, processed_characters, events) \
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![row.tick, row.elapsed_ms, row.processed_characters, row.events],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
