//! Simulation observer trait for progress reporting and data collection.

use std::collections::BTreeMap;

use hm_behavior::{BehaviorState, TickEvent};
use hm_core::{EntityId, Tick};
use hm_world::WorldStore;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — event printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SimObserver for Printer {
///     fn on_character_events(&mut self, tick: Tick, character: &EntityId, events: &[TickEvent]) {
///         for e in events {
///             println!("{tick} {character}: {e:?}");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before decay.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per character whose pipeline ran, after its movement step.
    fn on_character_events(&mut self, _tick: Tick, _character: &EntityId, _events: &[TickEvent]) {}

    /// Called at the end of each tick.
    ///
    /// `processed` is the number of characters whose pipeline ran this tick.
    fn on_tick_end(&mut self, _tick: Tick, _processed: usize) {}

    /// Called at snapshot intervals (every `sim.output_interval_ticks` ticks).
    ///
    /// Read-only access to every behavior state and the world, so writers can
    /// record a trace without the sim knowing any output format.
    fn on_snapshot(
        &mut self,
        _tick:   Tick,
        _states: &BTreeMap<EntityId, BehaviorState>,
        _world:  &WorldStore,
    ) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
