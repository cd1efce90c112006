//! Target acquisition and movement planning.

use tracing::{debug, trace};

use hm_content::{
    BehaviorActionKind, ContentRepository, FulfillmentTarget, Interaction, InteractionKind,
    InteractionSubject, TargetSelection,
};
use hm_core::{EntityId, InteractionId, InteractionTargetId};
use hm_world::WorldContext;

use crate::direction::update_direction;
use crate::event::{ClearReason, TickEvent};
use crate::state::QueueStatus;
use crate::{BehaviorState, EngineError, EngineResult, Flow, TickContext};

/// A resolved target: the entity and the interaction it will host.
struct Candidate<'c> {
    entity:      EntityId,
    interaction: &'c Interaction,
    distance:    f32,
}

/// Resolve the target entity for the active behavior action and plan the
/// walk toward it.
///
/// * Idle actions never move; the stage restarts until the idle duration
///   has elapsed, then lets the queue finish the episode.
/// * Explicit actions use the configured entity and interaction.
/// * Search actions take the nearest candidate (ties keep enumeration
///   order).  No candidate clears the behavior and restarts.
/// * A target that has left the world clears the behavior and restarts.  An
///   item in another character's inventory has left it.
///
/// Once a target is fixed the path is refreshed every tick and the facing
/// updated from it.
pub fn find_target_entity_and_go(
    state: &mut BehaviorState,
    ctx:   &mut TickContext<'_>,
) -> EngineResult<Flow> {
    let content = ctx.content;
    let Some(behavior_target) = state.behavior_target_id.clone() else {
        return Ok(Flow::Continue);
    };
    let action = content
        .behavior_action(&behavior_target.action)
        .ok_or_else(|| EngineError::MissingBehaviorAction(behavior_target.action.clone()))?;

    if let BehaviorActionKind::Idle { duration_ticks } = action.kind {
        state.path.clear();
        let start = state.behavior_target_start_tick.unwrap_or(ctx.tick);
        if ctx.tick.since(start) < duration_ticks {
            trace!(character = %ctx.character, "idling");
            return Ok(Flow::Restart);
        }
        return Ok(Flow::Continue);
    }

    // The work is done; a consumed or demolished target is expected here.
    if matches!(
        state.interaction_queue.status,
        QueueStatus::ActionCompleted | QueueStatus::Completed
    ) {
        state.path.clear();
        return Ok(Flow::Continue);
    }

    let target = match state.target_entity_id.clone() {
        Some(target) => {
            if !ctx.world.is_available_to(&target, ctx.character) {
                ctx.abandon(state, ClearReason::TargetVanished);
                return Ok(Flow::Restart);
            }
            target
        }
        None => {
            let resolved = match &action.selection {
                TargetSelection::Explicit { entity, interaction } => {
                    explicit(content, &*ctx.world, ctx.character, entity, interaction)?
                }
                TargetSelection::Search => search(ctx, &action.kind)?,
            };
            let Some((entity, core)) = resolved else {
                let reason = match action.selection {
                    TargetSelection::Explicit { .. } => ClearReason::TargetVanished,
                    TargetSelection::Search => ClearReason::NoCandidate,
                };
                ctx.abandon(state, reason);
                return Ok(Flow::Restart);
            };
            debug!(
                character   = %ctx.character,
                tick        = %ctx.tick,
                target      = %entity,
                interaction = %core,
                "target acquired"
            );
            ctx.world.reserve(&entity, ctx.character);
            state.target_entity_id = Some(entity.clone());
            state.interaction_queue.core_interaction_target_id = Some(core.clone());
            ctx.emit(TickEvent::TargetAcquired { entity: entity.clone(), interaction: core });
            entity
        }
    };

    plan_path(state, ctx, &target);
    Ok(Flow::Continue)
}

/// Refresh the path toward `target` and the facing derived from it.
fn plan_path(state: &mut BehaviorState, ctx: &TickContext<'_>, target: &EntityId) {
    let (Some(from), Some(to)) = (ctx.world.position(ctx.character), ctx.world.position(target))
    else {
        state.path.clear();
        return;
    };
    if ctx.world.holds(ctx.character, target) || from.distance(to) <= ctx.config.arrival_distance {
        state.path.clear();
        return;
    }
    state.path = ctx.pathfinder.path(from, to);
    state.direction = update_direction(
        state.direction,
        from,
        &state.path,
        ctx.config.direction_threshold,
    );
}

// ── Explicit ──────────────────────────────────────────────────────────────────

fn explicit(
    content:     &dyn ContentRepository,
    world:       &dyn WorldContext,
    character:   &EntityId,
    entity:      &EntityId,
    interaction: &InteractionId,
) -> EngineResult<Option<(EntityId, InteractionTargetId)>> {
    let interaction = content
        .interaction(interaction)
        .ok_or_else(|| EngineError::MissingInteraction(interaction.clone()))?;
    if !world.is_available_to(entity, character) {
        return Ok(None);
    }
    Ok(Some((entity.clone(), core_target(content, interaction)?)))
}

// ── Search ────────────────────────────────────────────────────────────────────

fn search(
    ctx:  &TickContext<'_>,
    kind: &BehaviorActionKind,
) -> EngineResult<Option<(EntityId, InteractionTargetId)>> {
    let content = ctx.content;
    let interactions: Vec<(&Interaction, Option<&FulfillmentTarget>)> = match kind {
        BehaviorActionKind::Fulfill { target } => {
            let mut found = Vec::new();
            for f in content.fulfillments_for_target(target) {
                let interaction = content
                    .interaction(&f.interaction_id)
                    .ok_or_else(|| EngineError::MissingInteraction(f.interaction_id.clone()))?;
                found.push((interaction, Some(target)));
            }
            found
        }
        BehaviorActionKind::Interact { interaction } => {
            let interaction = content
                .interaction(interaction)
                .ok_or_else(|| EngineError::MissingInteraction(interaction.clone()))?;
            vec![(interaction, None)]
        }
        BehaviorActionKind::Idle { .. } => Vec::new(),
    };

    let Some(origin) = ctx.world.position(ctx.character) else {
        return Ok(None);
    };
    let mut best: Option<Candidate<'_>> = None;
    for (interaction, target) in interactions {
        for entity in candidates(ctx, interaction, target) {
            let distance = if ctx.world.holds(ctx.character, &entity) {
                0.0
            } else {
                match ctx.world.position(&entity) {
                    Some(p) => origin.distance(p),
                    None => continue,
                }
            };
            if best.as_ref().is_none_or(|b| distance < b.distance) {
                best = Some(Candidate { entity, interaction, distance });
            }
        }
    }

    match best {
        Some(c) => Ok(Some((c.entity, core_target(content, c.interaction)?))),
        None => {
            trace!(character = %ctx.character, "no search candidate");
            Ok(None)
        }
    }
}

/// Entities that can host `interaction` for this character, in enumeration
/// order.
fn candidates(
    ctx:         &TickContext<'_>,
    interaction: &Interaction,
    target:      Option<&FulfillmentTarget>,
) -> Vec<EntityId> {
    let world = &*ctx.world;
    let me = ctx.character;
    match &interaction.subject {
        InteractionSubject::Item(template) => {
            let held = world
                .held_items(me)
                .iter()
                .filter(|i| world.item_template(i) == Some(template))
                .cloned();
            let placed = world
                .items_of_template(template)
                .into_iter()
                .filter(|i| world.reserved_by(i).is_none_or(|holder| holder == me));
            held.chain(placed).collect()
        }
        InteractionSubject::Building(template) => world
            .buildings_of_template(template)
            .into_iter()
            .filter(|b| building_usable(world, b, interaction.kind))
            .filter(|b| match target {
                Some(FulfillmentTarget::Condition(c)) => {
                    world.condition(b, c).is_some_and(|l| !l.is_full())
                }
                _ => true,
            })
            .collect(),
        InteractionSubject::Character => world
            .characters()
            .into_iter()
            .filter(|c| c != me)
            .collect(),
        InteractionSubject::System => Vec::new(),
    }
}

/// Construction requires an unbuilt site; every other building interaction
/// requires a finished building.
pub(crate) fn building_usable(world: &dyn WorldContext, building: &EntityId, kind: InteractionKind) -> bool {
    match world.is_constructed(building) {
        Some(constructed) => constructed != (kind == InteractionKind::OnceBuildingConstruct),
        None => false,
    }
}

fn core_target(
    content:     &dyn ContentRepository,
    interaction: &Interaction,
) -> EngineResult<InteractionTargetId> {
    let root = content
        .root_interaction_action(&interaction.id)
        .ok_or_else(|| EngineError::MissingRootInteractionAction(interaction.id.clone()))?;
    Ok(InteractionTargetId::new(interaction.source(), interaction.id.clone(), root.id.clone()))
}
