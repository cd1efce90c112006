//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `behavior_snapshots.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{BehaviorSnapshotRow, OutputResult, TickSummaryRow};

pub const SNAPSHOT_HEADER: [&str; 10] = [
    "tick",
    "character_id",
    "x",
    "y",
    "direction",
    "behavior_target_id",
    "target_entity_id",
    "queue_status",
    "current_interaction_target_id",
    "path_len",
];

pub const SUMMARY_HEADER: [&str; 4] = ["tick", "elapsed_ms", "processed_characters", "events"];

/// Writes a behavior trace to two CSV files.  Absent ids are empty cells.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("behavior_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self { snapshots, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[BehaviorSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            let tick = row.tick.to_string();
            let x = row.x.to_string();
            let y = row.y.to_string();
            let path_len = row.path_len.to_string();
            self.snapshots.write_record([
                tick.as_str(),
                row.character_id.as_str(),
                x.as_str(),
                y.as_str(),
                row.direction,
                row.behavior_target_id.as_deref().unwrap_or(""),
                row.target_entity_id.as_deref().unwrap_or(""),
                row.queue_status,
                row.current_interaction_target_id.as_deref().unwrap_or(""),
                path_len.as_str(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.elapsed_ms.to_string(),
            row.processed_characters.to_string(),
            row.events.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
