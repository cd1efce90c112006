//! Behavior target selection.

use tracing::{debug, trace};

use hm_core::BehaviorTargetId;
use hm_world::CharacterProbe;

use crate::event::TickEvent;
use crate::{BehaviorState, EngineError, EngineResult, Flow, TickContext};

/// Pick the highest-priority eligible behavior when none is active.
///
/// The cached `behaviors` / `behavior_ids` lists are refreshed on every call,
/// even while a behavior is running, so observers always see current
/// eligibility.  An active behavior is never replaced here.
///
/// Returns [`Flow::Restart`] when no behavior is eligible.
pub fn find_behavior_target(
    state: &mut BehaviorState,
    ctx:   &mut TickContext<'_>,
) -> EngineResult<Flow> {
    let content = ctx.content;
    let eligible = {
        let probe = CharacterProbe::new(&*ctx.world, ctx.character);
        content.behaviors_for(ctx.character, &probe)
    };
    state.behavior_ids = eligible.iter().map(|b| b.id.clone()).collect();
    state.behaviors = eligible.iter().map(|&b| b.clone()).collect();

    if state.behavior_target_id.is_some() {
        return Ok(Flow::Continue);
    }

    let Some(first) = eligible.first() else {
        trace!(character = %ctx.character, "no eligible behavior");
        return Ok(Flow::Restart);
    };
    let root = content
        .root_action(&first.id)
        .ok_or_else(|| EngineError::UnresolvedRootAction { behavior: first.id.clone() })?;

    let target = BehaviorTargetId::new(first.kind(), first.id.clone(), root.id.clone());
    debug!(
        character = %ctx.character,
        tick      = %ctx.tick,
        behavior  = %target,
        "behavior selected"
    );
    state.behavior_target_id = Some(target.clone());
    state.behavior_target_start_tick = Some(ctx.tick);
    ctx.emit(TickEvent::BehaviorSelected { behavior: target });
    Ok(Flow::Continue)
}
