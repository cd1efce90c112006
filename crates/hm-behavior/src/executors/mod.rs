//! Action executors, one per interaction kind.
//!
//! # Protocol
//!
//! Every executor follows the same two phases over the queue's current
//! action, driven by [`run_executor`]:
//!
//! 1. **`ActionReady`** — [`ActionExecutor::can_start`] decides whether the
//!    action starts now, waits for a later tick, or can never start.  On
//!    start the running tick is recorded and the status moves to
//!    `ActionRunning`.
//! 2. **`ActionRunning`** — on every tick with at least one elapsed tick the
//!    interaction's fulfillments are applied (clamped).  The action completes
//!    once `elapsed >= max(duration, 1)`, or earlier for `fulfill:*` kinds
//!    when every fulfilled value is full.  [`ActionExecutor::complete`] then
//!    applies the kind's side effects.
//!
//! A target that leaves the world during either phase clears the behavior.
//!
//! # Dispatch
//!
//! [`ExecutorTable`] maps each [`InteractionKind`] to its executor and runs
//! only the one matching the queue head.  Executors still refuse a
//! mismatched kind, so calling one directly is always safe.

mod building;
mod fulfill;
mod item;

use std::collections::BTreeMap;

use tracing::{debug, trace};

use hm_content::{FulfillmentTarget, Interaction, InteractionKind};
use hm_core::{EntityId, InteractionTargetId};

use crate::event::{ClearReason, TickEvent};
use crate::state::QueueStatus;
use crate::{BehaviorState, EngineError, EngineResult, Flow, TickContext};

pub use building::{BuildingConstruct, BuildingDemolish, BuildingUse};
pub use fulfill::{FulfillBuilding, FulfillCharacterHug};
pub use item::{ItemPick, ItemUse};

// ── ActionExecutor ────────────────────────────────────────────────────────────

/// Outcome of a start precondition check.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Start {
    /// Start running this tick.
    Now,
    /// Not yet; check again next tick.
    Wait,
    /// The target can never host this action; drop the behavior.
    Never,
}

/// Per-kind start check, per-tick effects and completion effects.
pub trait ActionExecutor {
    /// The interaction kind this executor handles.
    fn kind(&self) -> InteractionKind;

    /// Ready → running precondition.
    fn can_start(&self, ctx: &TickContext<'_>, target: &EntityId) -> Start;

    /// Characters whose needs this action's fulfillments raise.
    fn need_recipients(&self, ctx: &TickContext<'_>, _target: &EntityId) -> Vec<EntityId> {
        vec![ctx.character.clone()]
    }

    /// Side effects applied once, when the action completes.
    fn complete(&self, _ctx: &mut TickContext<'_>, _target: &EntityId) -> EngineResult<()> {
        Ok(())
    }
}

/// `true` if `target` is within the interaction radius of the character.
pub(crate) fn within_reach(ctx: &TickContext<'_>, target: &EntityId) -> bool {
    match (ctx.world.position(ctx.character), ctx.world.position(target)) {
        (Some(me), Some(it)) => me.distance(it) <= ctx.config.interaction_radius(),
        _ => false,
    }
}

// ── Protocol ──────────────────────────────────────────────────────────────────

/// Run `executor` against the queue head.
///
/// A strict no-op unless the head is an interaction of `executor.kind()` in
/// `ActionReady` or `ActionRunning`.
pub fn run_executor(
    executor: &dyn ActionExecutor,
    state:    &mut BehaviorState,
    ctx:      &mut TickContext<'_>,
) -> EngineResult<Flow> {
    let content = ctx.content;
    let queue = &state.interaction_queue;
    if !queue.status.is_executing() {
        return Ok(Flow::Continue);
    }
    let Some(current) = queue.current_interaction_target_id.clone() else {
        return Ok(Flow::Continue);
    };
    let interaction = content
        .interaction(&current.interaction)
        .ok_or_else(|| EngineError::MissingInteraction(current.interaction.clone()))?;
    if interaction.kind != executor.kind() {
        return Ok(Flow::Continue);
    }

    let target = match state.target_entity_id.clone() {
        Some(t) if ctx.world.is_available_to(&t, ctx.character) => t,
        _ => {
            ctx.abandon(state, ClearReason::TargetVanished);
            return Ok(Flow::Restart);
        }
    };
    let action = content
        .interaction_action(&current.action)
        .ok_or_else(|| EngineError::MissingInteractionAction(current.action.clone()))?;

    if state.interaction_queue.status == QueueStatus::ActionReady {
        match executor.can_start(ctx, &target) {
            Start::Now => {
                debug!(
                    character = %ctx.character,
                    tick      = %ctx.tick,
                    action    = %current,
                    "action started"
                );
                let queue = &mut state.interaction_queue;
                queue.current_interaction_target_running_at_tick = Some(ctx.tick);
                queue.status = QueueStatus::ActionRunning;
                ctx.emit(TickEvent::ActionStarted { action: current });
            }
            Start::Wait => {
                trace!(character = %ctx.character, action = %current, "waiting to start");
            }
            Start::Never => {
                ctx.abandon(state, ClearReason::TargetUnusable);
                return Ok(Flow::Restart);
            }
        }
        return Ok(Flow::Continue);
    }

    let elapsed = state.interaction_queue.elapsed(ctx.tick).unwrap_or(0);
    let mut all_full = false;
    if elapsed >= 1 {
        all_full = apply_fulfillments(executor, ctx, interaction, &target)?;
    }
    // A `fulfill:*` action has nothing left to do once every value it raises
    // is at its ceiling, so it ends there instead of idling out the duration.
    let early = interaction.kind.is_fulfill() && all_full;
    if elapsed >= action.normalized_duration() || early {
        executor.complete(ctx, &target)?;
        debug!(
            character = %ctx.character,
            tick      = %ctx.tick,
            action    = %current,
            elapsed,
            early,
            "action completed"
        );
        state.interaction_queue.status = QueueStatus::ActionCompleted;
        ctx.emit(TickEvent::ActionCompleted { action: current });
    }
    Ok(Flow::Continue)
}

/// Apply one tick of every fulfillment attached to `interaction`.
///
/// Returns `true` when at least one value was raised and every raised value
/// is now at its ceiling.
fn apply_fulfillments(
    executor:    &dyn ActionExecutor,
    ctx:         &mut TickContext<'_>,
    interaction: &Interaction,
    target:      &EntityId,
) -> EngineResult<bool> {
    let content = ctx.content;
    let fulfillments = content.fulfillments_for_interaction(&interaction.id);
    if fulfillments.is_empty() {
        return Ok(false);
    }
    let recipients = executor.need_recipients(ctx, target);
    let mut any = false;
    let mut all_full = true;

    for f in fulfillments {
        let key = f.key();
        match &f.target {
            FulfillmentTarget::Need(need) => {
                if content.need(need).is_none() {
                    return Err(EngineError::MissingNeed(need.clone()));
                }
                for who in &recipients {
                    if let Some(delta) = ctx.world.increase_need(who, need, f.increase_per_tick) {
                        any = true;
                        all_full &= ctx.world.need(who, need).is_some_and(|l| l.is_full());
                        ctx.emit(TickEvent::LevelIncreased {
                            entity:      who.clone(),
                            fulfillment: key.clone(),
                            delta,
                        });
                    }
                }
            }
            FulfillmentTarget::Condition(condition) => {
                if content.condition(condition).is_none() {
                    return Err(EngineError::MissingCondition(condition.clone()));
                }
                if let Some(delta) = ctx.world.increase_condition(target, condition, f.increase_per_tick) {
                    any = true;
                    all_full &= ctx.world.condition(target, condition).is_some_and(|l| l.is_full());
                    ctx.emit(TickEvent::LevelIncreased {
                        entity:      target.clone(),
                        fulfillment: key.clone(),
                        delta,
                    });
                }
            }
        }
    }
    Ok(any && all_full)
}

// ── ExecutorTable ─────────────────────────────────────────────────────────────

/// Executors keyed by interaction kind.
pub struct ExecutorTable {
    by_kind: BTreeMap<InteractionKind, Box<dyn ActionExecutor>>,
}

impl Default for ExecutorTable {
    /// One executor for each of the nine built-in kinds.
    fn default() -> Self {
        let mut table = Self::empty();
        table
            .register(Box::new(ItemUse))
            .register(Box::new(BuildingUse))
            .register(Box::new(BuildingConstruct))
            .register(Box::new(BuildingDemolish))
            .register(Box::new(ItemPick))
            .register(Box::new(FulfillBuilding::repair()))
            .register(Box::new(FulfillBuilding::clean()))
            .register(Box::new(FulfillBuilding::building_use()))
            .register(Box::new(FulfillCharacterHug));
        table
    }
}

impl ExecutorTable {
    pub fn empty() -> Self {
        Self { by_kind: BTreeMap::new() }
    }

    /// Install `executor` for its kind, replacing any previous one.
    pub fn register(&mut self, executor: Box<dyn ActionExecutor>) -> &mut Self {
        self.by_kind.insert(executor.kind(), executor);
        self
    }

    pub fn get(&self, kind: InteractionKind) -> Option<&dyn ActionExecutor> {
        self.by_kind.get(&kind).map(|e| e.as_ref())
    }

    pub fn len(&self) -> usize {
        self.by_kind.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_kind.is_empty()
    }

    /// Run the executor for the queue head's kind, if any.
    pub fn dispatch(&self, state: &mut BehaviorState, ctx: &mut TickContext<'_>) -> EngineResult<Flow> {
        let Some(current) = current_target(state) else {
            return Ok(Flow::Continue);
        };
        let content = ctx.content;
        let interaction = content
            .interaction(&current.interaction)
            .ok_or_else(|| EngineError::MissingInteraction(current.interaction.clone()))?;
        match self.get(interaction.kind) {
            Some(executor) => run_executor(executor, state, ctx),
            None => {
                trace!(kind = %interaction.kind, "no executor registered");
                Ok(Flow::Continue)
            }
        }
    }
}

fn current_target(state: &BehaviorState) -> Option<&InteractionTargetId> {
    let queue = &state.interaction_queue;
    if queue.status.is_executing() {
        queue.current_interaction_target_id.as_ref()
    } else {
        None
    }
}

/// Pipeline stage: run the executor matching the queue head.
pub fn execute_interaction(state: &mut BehaviorState, ctx: &mut TickContext<'_>) -> EngineResult<Flow> {
    let executors = ctx.executors;
    executors.dispatch(state, ctx)
}
