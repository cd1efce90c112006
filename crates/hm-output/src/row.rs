//! Plain data row types written by output backends.
//!
//! Ids are stored in their encoded composite form so a trace can be joined
//! back against content tables without the engine's types.

use hm_behavior::BehaviorState;
use hm_core::{EntityId, Point, Tick};

/// One character's behavior state at a given tick.
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorSnapshotRow {
    pub tick:                          u64,
    pub character_id:                  String,
    pub x:                             f32,
    pub y:                             f32,
    pub direction:                     &'static str,
    /// `None` while idle.
    pub behavior_target_id:            Option<String>,
    pub target_entity_id:              Option<String>,
    pub queue_status:                  &'static str,
    pub current_interaction_target_id: Option<String>,
    /// Waypoints left on the planned path.
    pub path_len:                      u32,
}

impl BehaviorSnapshotRow {
    pub fn capture(tick: Tick, character: &EntityId, position: Point, state: &BehaviorState) -> Self {
        let queue = &state.interaction_queue;
        Self {
            tick:                          tick.0,
            character_id:                  character.encode(),
            x:                             position.x,
            y:                             position.y,
            direction:                     state.direction.as_str(),
            behavior_target_id:            state.behavior_target_id.as_ref().map(|b| b.encode()),
            target_entity_id:              state.target_entity_id.as_ref().map(|e| e.encode()),
            queue_status:                  queue.status.as_str(),
            current_interaction_target_id: queue.current_interaction_target_id.as_ref().map(|i| i.encode()),
            path_len:                      state.path.len() as u32,
        }
    }
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:                 u64,
    pub elapsed_ms:           u64,
    /// Characters whose pipeline ran.
    pub processed_characters: u64,
    /// Tick events emitted across all characters.
    pub events:               u64,
}
