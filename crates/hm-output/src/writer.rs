//! Backend seam for behavior traces.

use crate::{BehaviorSnapshotRow, OutputResult, TickSummaryRow};

/// A sink for behavior snapshots and per-tick summaries.
///
/// [`SimOutputObserver`][crate::SimOutputObserver] drives it from the sim's
/// observer hooks and keeps the first error for the caller.
pub trait OutputWriter {
    /// Append one snapshot batch (every character at one tick).
    fn write_snapshots(&mut self, rows: &[BehaviorSnapshotRow]) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush buffered rows.  Calling it again is a no-op.
    fn finish(&mut self) -> OutputResult<()>;
}
