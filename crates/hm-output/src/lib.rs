//! `hm-output` — behavior trace writers for the hamlet behavior engine.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Files created                                        |
//! |-----------|---------|------------------------------------------------------|
//! | *(none)*  | CSV     | `behavior_snapshots.csv`, `tick_summaries.csv`       |
//! | `sqlite`  | SQLite  | `trace.db`                                           |
//!
//! Both implement [`OutputWriter`] and are driven by [`SimOutputObserver`],
//! which implements `hm_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hm_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./trace"))?;
//! let mut obs = SimOutputObserver::new(writer, &config.sim);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{BehaviorSnapshotRow, TickSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
