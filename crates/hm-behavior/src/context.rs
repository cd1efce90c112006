//! The per-tick context every stage receives.

use tracing::debug;

use hm_content::ContentRepository;
use hm_core::{EntityId, Tick};
use hm_mobility::Pathfinder;
use hm_world::WorldContext;

use crate::event::{ClearReason, TickEvent};
use crate::executors::ExecutorTable;
use crate::{BehaviorState, EngineConfig};

/// Control signal returned by every stage.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Fall through to the next stage.
    Continue,
    /// Stop processing this character; rerun the whole pipeline next tick.
    Restart,
}

/// Everything one character's pipeline run can see and touch.
///
/// Content, pathfinding and configuration are shared and read-only.  The
/// world is borrowed mutably for the outbound effects (item transfer, level
/// increases, removals).  Events accumulate in `events` and are handed back
/// in the [`TickReport`][crate::TickReport].
pub struct TickContext<'a> {
    pub tick:       Tick,
    pub character:  &'a EntityId,
    pub content:    &'a dyn ContentRepository,
    pub pathfinder: &'a dyn Pathfinder,
    pub config:     &'a EngineConfig,
    pub executors:  &'a ExecutorTable,
    pub world:      &'a mut dyn WorldContext,
    pub events:     Vec<TickEvent>,
}

impl TickContext<'_> {
    #[inline]
    pub fn emit(&mut self, event: TickEvent) {
        self.events.push(event);
    }

    /// Clear `state` to idle, release its reservation, and record why.
    pub fn abandon(&mut self, state: &mut BehaviorState, reason: ClearReason) {
        let behavior = state.behavior_target_id.clone();
        if let Some(target) = state.clear() {
            self.world.release(&target, self.character);
            if reason == ClearReason::TargetVanished {
                self.emit(TickEvent::TargetLost { entity: target });
            }
        }
        debug!(
            character = %self.character,
            tick      = %self.tick,
            reason    = reason.as_str(),
            "behavior cleared"
        );
        self.emit(TickEvent::BehaviorCleared { behavior, reason });
    }
}
