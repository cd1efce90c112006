//! Interaction queue stages: enqueue and dequeue.

use tracing::{debug, trace};

use hm_content::InteractionKind;
use hm_core::{InteractionSource, InteractionTargetId};

use crate::state::QueueStatus;
use crate::{BehaviorState, EngineError, EngineResult, Flow, TickContext};

/// Fill the queue once per behavior episode.
///
/// Without a target or core interaction the episode has nothing to execute
/// and the queue goes straight to `Completed`.  An `once:item_use` core on
/// an item the character does not hold yet gets a `system:item_pick` step in
/// front of it.  Never restarts.
pub fn enqueue_interaction_queue(
    state: &mut BehaviorState,
    ctx:   &mut TickContext<'_>,
) -> EngineResult<Flow> {
    let content = ctx.content;
    let queue = &mut state.interaction_queue;
    if queue.status != QueueStatus::Enqueuing {
        return Ok(Flow::Continue);
    }
    let (Some(target), Some(core)) = (&state.target_entity_id, &queue.core_interaction_target_id)
    else {
        queue.status = QueueStatus::Completed;
        return Ok(Flow::Continue);
    };

    let interaction = content
        .interaction(&core.interaction)
        .ok_or_else(|| EngineError::MissingInteraction(core.interaction.clone()))?;
    if interaction.kind == InteractionKind::OnceItemUse && !ctx.world.holds(ctx.character, target) {
        let pick = content
            .system_interaction(InteractionKind::SystemItemPick)
            .ok_or(EngineError::MissingSystemInteraction(InteractionKind::SystemItemPick))?;
        let root = content
            .root_interaction_action(&pick.id)
            .ok_or_else(|| EngineError::MissingRootInteractionAction(pick.id.clone()))?;
        queue.interaction_target_ids.push_back(InteractionTargetId::new(
            InteractionSource::System,
            pick.id.clone(),
            root.id.clone(),
        ));
    }
    queue.interaction_target_ids.push_back(core.clone());
    queue.status = QueueStatus::Ready;
    debug!(
        character = %ctx.character,
        queued    = queue.interaction_target_ids.len(),
        "interaction queue ready"
    );
    Ok(Flow::Continue)
}

/// Advance the queue head.
///
/// * `Ready` pops the next action into the current slot (`ActionReady`), or
///   finishes the queue when nothing is left.
/// * `ActionCompleted` first pushes the finished action's `next_action_id`
///   (if any) to the front, then pops the same way.
///
/// This is the only stage that changes `current_interaction_target_id`.
pub fn dequeue_interaction(
    state: &mut BehaviorState,
    ctx:   &mut TickContext<'_>,
) -> EngineResult<Flow> {
    let content = ctx.content;
    let queue = &mut state.interaction_queue;
    match queue.status {
        QueueStatus::Ready => {}
        QueueStatus::ActionCompleted => {
            if let Some(done) = queue.current_interaction_target_id.take() {
                let action = content
                    .interaction_action(&done.action)
                    .ok_or_else(|| EngineError::MissingInteractionAction(done.action.clone()))?;
                if let Some(next) = &action.next_action_id {
                    if content.interaction_action(next).is_none() {
                        return Err(EngineError::MissingInteractionAction(next.clone()));
                    }
                    queue.interaction_target_ids.push_front(InteractionTargetId::new(
                        done.source,
                        done.interaction,
                        next.clone(),
                    ));
                }
            }
            queue.current_interaction_target_running_at_tick = None;
        }
        _ => return Ok(Flow::Continue),
    }

    match queue.interaction_target_ids.pop_front() {
        Some(next) => {
            trace!(character = %ctx.character, action = %next, "dequeued");
            queue.current_interaction_target_id = Some(next);
            queue.current_interaction_target_running_at_tick = None;
            queue.status = QueueStatus::ActionReady;
        }
        None => {
            queue.current_interaction_target_id = None;
            queue.status = QueueStatus::Completed;
        }
    }
    Ok(Flow::Continue)
}
