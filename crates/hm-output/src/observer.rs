//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use std::collections::BTreeMap;

use hm_behavior::{BehaviorState, TickEvent};
use hm_core::{EntityId, SimConfig, Tick};
use hm_sim::SimObserver;
use hm_world::{WorldContext, WorldStore};

use crate::row::{BehaviorSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// Records a behavior trace through an [`OutputWriter`].
///
/// Observer hooks cannot fail, so the first write error is held until
/// [`take_error`][Self::take_error] is called after the run.  Later errors
/// are dropped.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:           W,
    tick_duration_ms: u32,
    events_this_tick: u64,
    last_error:       Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// `config.tick_duration_ms` converts ticks to elapsed milliseconds.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            tick_duration_ms: config.tick_duration_ms,
            events_this_tick: 0,
            last_error:       None,
        }
    }

    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn keep_first(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            self.last_error.get_or_insert(e);
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_start(&mut self, _tick: Tick) {
        self.events_this_tick = 0;
    }

    fn on_character_events(&mut self, _tick: Tick, _character: &EntityId, events: &[TickEvent]) {
        self.events_this_tick += events.len() as u64;
    }

    fn on_tick_end(&mut self, tick: Tick, processed: usize) {
        let row = TickSummaryRow {
            tick:                 tick.0,
            elapsed_ms:           tick.0 * self.tick_duration_ms as u64,
            processed_characters: processed as u64,
            events:               self.events_this_tick,
        };
        let written = self.writer.write_tick_summary(&row);
        self.keep_first(written);
    }

    fn on_snapshot(
        &mut self,
        tick:   Tick,
        states: &BTreeMap<EntityId, BehaviorState>,
        world:  &WorldStore,
    ) {
        // Characters that left the world have no position to record.
        let rows: Vec<BehaviorSnapshotRow> = states
            .iter()
            .filter_map(|(id, state)| {
                let position = world.position(id)?;
                Some(BehaviorSnapshotRow::capture(tick, id, position, state))
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.keep_first(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.keep_first(result);
    }
}
