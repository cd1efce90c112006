//! Terminal stage: move to the next behavior action or go idle.

use tracing::debug;

use hm_core::BehaviorTargetId;

use crate::event::{ClearReason, TickEvent};
use crate::state::QueueStatus;
use crate::{BehaviorState, EngineError, EngineResult, Flow, TickContext};

/// Once the queue is `Completed`, follow the behavior action's
/// `next_action_id` (a fresh episode of the same behavior) or clear the
/// state so the selector runs again next tick.
pub fn next_or_clear(state: &mut BehaviorState, ctx: &mut TickContext<'_>) -> EngineResult<Flow> {
    if state.interaction_queue.status != QueueStatus::Completed {
        return Ok(Flow::Continue);
    }
    let Some(current) = state.behavior_target_id.clone() else {
        ctx.abandon(state, ClearReason::Finished);
        return Ok(Flow::Continue);
    };
    let content = ctx.content;
    let action = content
        .behavior_action(&current.action)
        .ok_or_else(|| EngineError::MissingBehaviorAction(current.action.clone()))?;

    match &action.next_action_id {
        Some(next) => {
            if content.behavior_action(next).is_none() {
                return Err(EngineError::MissingBehaviorAction(next.clone()));
            }
            if let Some(target) = state.reset_episode() {
                ctx.world.release(&target, ctx.character);
            }
            let to = BehaviorTargetId::new(current.kind, current.behavior.clone(), next.clone());
            debug!(
                character = %ctx.character,
                tick      = %ctx.tick,
                from      = %current,
                to        = %to,
                "behavior advanced"
            );
            state.behavior_target_id = Some(to.clone());
            state.behavior_target_start_tick = Some(ctx.tick);
            ctx.emit(TickEvent::BehaviorAdvanced { from: current, to });
        }
        None => ctx.abandon(state, ClearReason::Finished),
    }
    Ok(Flow::Continue)
}
