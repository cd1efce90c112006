//! The tick orchestrator.

use tracing::trace;

use hm_content::ContentRepository;
use hm_core::{EntityId, Tick};
use hm_mobility::Pathfinder;
use hm_world::WorldContext;

use crate::acquire::find_target_entity_and_go;
use crate::advance::next_or_clear;
use crate::event::TickEvent;
use crate::executors::{ExecutorTable, execute_interaction};
use crate::queue::{dequeue_interaction, enqueue_interaction_queue};
use crate::select::find_behavior_target;
use crate::{BehaviorState, EngineConfig, EngineResult, Flow, TickContext};

/// A pipeline stage.
pub type Stage = fn(&mut BehaviorState, &mut TickContext<'_>) -> EngineResult<Flow>;

/// The fixed stage order run for every character on every tick.
pub const PIPELINE: [(&str, Stage); 6] = [
    ("find-behavior-target", find_behavior_target),
    ("find-target-entity-and-go", find_target_entity_and_go),
    ("enqueue-interaction-queue", enqueue_interaction_queue),
    ("dequeue-interaction", dequeue_interaction),
    ("execute-interaction", execute_interaction),
    ("next-or-clear", next_or_clear),
];

/// Outcome of one character's tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    /// `Restart` if a stage cut the pipeline short.
    pub flow:   Flow,
    pub events: Vec<TickEvent>,
}

/// Engine configuration plus the executor table.
///
/// Stateless between calls: all per-character state lives in
/// [`BehaviorState`], all shared state in the world and content.
pub struct BehaviorEngine {
    pub config:    EngineConfig,
    pub executors: ExecutorTable,
}

impl Default for BehaviorEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl BehaviorEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config, executors: ExecutorTable::default() }
    }

    /// Run the pipeline once for `character`.
    ///
    /// Content-integrity faults abort the run and propagate; whatever the
    /// stages already applied to the world stays applied.
    pub fn tick_character(
        &self,
        state:      &mut BehaviorState,
        tick:       Tick,
        character:  &EntityId,
        content:    &dyn ContentRepository,
        pathfinder: &dyn Pathfinder,
        world:      &mut dyn WorldContext,
    ) -> EngineResult<TickReport> {
        let mut ctx = TickContext {
            tick,
            character,
            content,
            pathfinder,
            config: &self.config,
            executors: &self.executors,
            world,
            events: Vec::new(),
        };
        for (name, stage) in PIPELINE {
            if stage(state, &mut ctx)? == Flow::Restart {
                trace!(character = %character, tick = %tick, stage = name, "restart");
                return Ok(TickReport { flow: Flow::Restart, events: ctx.events });
            }
        }
        Ok(TickReport { flow: Flow::Continue, events: ctx.events })
    }
}
