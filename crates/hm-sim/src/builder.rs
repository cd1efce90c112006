//! Fluent builder for constructing a [`Sim`].

use std::collections::BTreeMap;

use hm_behavior::{BehaviorEngine, BehaviorState};
use hm_content::ContentRepository;
use hm_core::{CharacterRng, EntityId};
use hm_mobility::{MovementEngine, Pathfinder};
use hm_world::{WorldContext, WorldStore};

use crate::{RunConfig, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<C, P>`].
///
/// # Required inputs
///
/// - [`RunConfig`] — ticks, seed, engine distances, walking speed, fault policy
/// - `C: ContentRepository` — the authored content (must define behaviors)
/// - `P: Pathfinder` — e.g. [`hm_mobility::LPathfinder`]
///
/// # Optional inputs (have defaults)
///
/// | Method         | Default                                   |
/// |----------------|-------------------------------------------|
/// | `.world(w)`    | `WorldStore::new()` (empty)               |
/// | `.states(m)`   | A fresh idle state for every character    |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, content, LPathfinder)
///     .world(world)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<C: ContentRepository, P: Pathfinder> {
    config:     RunConfig,
    content:    C,
    pathfinder: P,
    world:      Option<WorldStore>,
    states:     Option<BTreeMap<EntityId, BehaviorState>>,
}

impl<C: ContentRepository, P: Pathfinder> SimBuilder<C, P> {
    /// Create a builder with all required inputs.
    pub fn new(config: RunConfig, content: C, pathfinder: P) -> Self {
        Self { config, content, pathfinder, world: None, states: None }
    }

    /// Supply the populated world.
    pub fn world(mut self, world: WorldStore) -> Self {
        self.world = Some(world);
        self
    }

    /// Supply existing behavior states, e.g. to resume a run.
    ///
    /// Must hold exactly one state per character in the world.
    pub fn states(mut self, states: BTreeMap<EntityId, BehaviorState>) -> Self {
        self.states = Some(states);
        self
    }

    /// Validate inputs and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<C, P>> {
        if self.content.behaviors().is_empty() {
            return Err(SimError::Config("content defines no behaviors".into()));
        }
        let movement = MovementEngine::new(self.config.movement)?;
        let world = self.world.unwrap_or_default();
        let characters = world.characters();

        // ── Resolve and check states ──────────────────────────────────────
        let states = match self.states {
            Some(states) => {
                if let Some(missing) = characters.iter().find(|c| !states.contains_key(*c)) {
                    return Err(SimError::MissingState(missing.clone()));
                }
                if let Some(orphan) = states.keys().find(|id| !characters.contains(*id)) {
                    return Err(SimError::OrphanState(orphan.clone()));
                }
                states
            }
            None => characters.iter().map(|c| (c.clone(), BehaviorState::new())).collect(),
        };

        // ── Per-character RNGs, indexed by id order ───────────────────────
        let seed = self.config.sim.seed;
        let rngs = characters
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), CharacterRng::new(seed, i as u32)))
            .collect();

        Ok(Sim {
            clock:      self.config.sim.make_clock(),
            engine:     BehaviorEngine::new(self.config.engine),
            config:     self.config,
            content:    self.content,
            world,
            states,
            movement,
            pathfinder: self.pathfinder,
            rngs,
        })
    }
}
