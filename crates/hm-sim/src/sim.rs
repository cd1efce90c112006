//! The `Sim` struct and its tick loop.

use std::collections::BTreeMap;

use tracing::{debug, info, trace, warn};

use hm_behavior::{BehaviorEngine, BehaviorState};
use hm_content::ContentRepository;
use hm_core::{CharacterRng, DiceCheck, DiceOutcome, EntityId, Point, SimClock, Tick};
use hm_mobility::{MovementEngine, Pathfinder};
use hm_world::{WorldContext, WorldStore};

use crate::{FaultPolicy, RunConfig, SimObserver, SimResult};

/// The main simulation runner.
///
/// `Sim<C, P>` holds all simulation state and drives the fixed-timestep loop:
///
/// 1. **Decay**: every need and condition drops by its authored rate.
/// 2. **Pipeline**: for each character in ascending id order, run
///    [`BehaviorEngine::tick_character`].  Content faults follow
///    [`FaultPolicy`].
/// 3. **Movement**: step the character along the path its pipeline planned
///    and write the new position back to the world.
///
/// Characters are processed one after another, so a later character sees
/// every effect (reservations, pickups, removals) of an earlier one in the
/// same tick.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<C: ContentRepository, P: Pathfinder> {
    pub config: RunConfig,

    /// Current tick and its simulated-millisecond mapping.
    pub clock: SimClock,

    pub content: C,

    pub world: WorldStore,

    /// Per-character behavior state, iterated in ascending id order.
    pub states: BTreeMap<EntityId, BehaviorState>,

    pub engine: BehaviorEngine,

    pub movement: MovementEngine,

    pub pathfinder: P,

    /// Per-character RNGs for content-level dice checks.
    pub rngs: BTreeMap<EntityId, CharacterRng>,
}

impl<C: ContentRepository, P: Pathfinder> Sim<C, P> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `sim.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let end = self.config.sim.end_tick();
        info!(
            characters = self.states.len(),
            start      = %self.clock.current_tick,
            end        = %end,
            "simulation started"
        );
        while self.clock.current_tick < end {
            self.step(observer)?;
        }
        info!(final_tick = %self.clock.current_tick, "simulation finished");
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Add a character mid-run with a fresh idle state.
    pub fn add_character(
        &mut self,
        id:       EntityId,
        name:     impl Into<String>,
        position: Point,
    ) -> SimResult<()> {
        self.world.spawn_character(id.clone(), name, position, &self.content)?;
        let index = self.rngs.len() as u32;
        self.rngs.insert(id.clone(), CharacterRng::new(self.config.sim.seed, index));
        self.states.insert(id, BehaviorState::new());
        Ok(())
    }

    /// Resolve a dice check with `character`'s RNG.
    ///
    /// `None` if the character is unknown.
    pub fn dice_check(&mut self, character: &EntityId, check: DiceCheck) -> Option<DiceOutcome> {
        let rng = self.rngs.get_mut(character)?;
        Some(check.resolve(rng))
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let processed = self.process_tick(now, observer)?;
        observer.on_tick_end(now, processed);
        let interval = self.config.sim.output_interval_ticks;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(now, &self.states, &self.world);
        }
        self.clock.advance();
        Ok(())
    }

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<usize> {
        self.world.decay_levels(&self.content);

        let mut processed = 0;
        for (id, state) in self.states.iter_mut() {
            if !self.world.entity_exists(id) {
                trace!(character = %id, "not in the world; skipped");
                continue;
            }
            let report = match self.engine.tick_character(
                state,
                now,
                id,
                &self.content,
                &self.pathfinder,
                &mut self.world,
            ) {
                Ok(report) => report,
                Err(e) => match self.config.fault_policy {
                    FaultPolicy::Halt => return Err(e.into()),
                    FaultPolicy::SkipCharacter => {
                        warn!(character = %id, tick = %now, error = %e, "content fault; character reset");
                        if let Some(target) = state.clear() {
                            self.world.release(&target, id);
                        }
                        continue;
                    }
                },
            };
            processed += 1;

            if !state.path.is_empty() {
                if let Some(from) = self.world.position(id) {
                    let to = self.movement.advance(from, &mut state.path);
                    self.world.set_position(id, to)?;
                }
            }
            if !report.events.is_empty() {
                debug!(character = %id, tick = %now, events = report.events.len(), "tick events");
            }
            observer.on_character_events(now, id, &report.events);
        }
        Ok(processed)
    }
}
