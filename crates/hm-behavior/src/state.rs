//! Per-character behavior state and its nested interaction queue.

use std::collections::VecDeque;
use std::fmt;

use hm_content::Behavior;
use hm_core::{BehaviorId, BehaviorTargetId, Direction, EntityId, InteractionTargetId, Point, Tick};

// ── QueueStatus ───────────────────────────────────────────────────────────────

/// Lifecycle of one interaction queue.
///
/// Declaration order is lifecycle order.  Within one action the status moves
/// `ActionReady → ActionRunning → ActionCompleted`; the dequeue stage then
/// either loads the next queued action (`ActionReady` again) or finishes the
/// queue (`Completed`).  Only [`InteractionQueue::clear`] returns to
/// `Enqueuing`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum QueueStatus {
    #[default]
    Enqueuing,
    Ready,
    ActionReady,
    ActionRunning,
    ActionCompleted,
    Completed,
}

impl QueueStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            QueueStatus::Enqueuing       => "enqueuing",
            QueueStatus::Ready           => "ready",
            QueueStatus::ActionReady     => "action-ready",
            QueueStatus::ActionRunning   => "action-running",
            QueueStatus::ActionCompleted => "action-completed",
            QueueStatus::Completed       => "completed",
        }
    }

    /// `true` while an action is loaded and not yet finished.
    #[inline]
    pub fn is_executing(self) -> bool {
        matches!(self, QueueStatus::ActionReady | QueueStatus::ActionRunning)
    }
}

impl fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── InteractionQueue ──────────────────────────────────────────────────────────

/// The interaction actions one behavior episode executes, in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionQueue {
    pub status: QueueStatus,

    /// Actions still waiting to run.  The head is popped by the dequeue stage.
    pub interaction_target_ids: VecDeque<InteractionTargetId>,

    /// The interaction chosen by target acquisition.
    pub core_interaction_target_id: Option<InteractionTargetId>,

    /// The action being executed now.
    pub current_interaction_target_id: Option<InteractionTargetId>,

    /// Tick at which the current action entered `ActionRunning`.
    pub current_interaction_target_running_at_tick: Option<Tick>,
}

impl InteractionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every queued and current action and return to `Enqueuing`.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Ticks since the current action started running.
    #[inline]
    pub fn elapsed(&self, now: Tick) -> Option<u64> {
        self.current_interaction_target_running_at_tick.map(|t| now.since(t))
    }
}

// ── BehaviorState ─────────────────────────────────────────────────────────────

/// Everything the tick pipeline knows about one character.
///
/// Created once per character and mutated only by that character's pipeline.
/// Renderers read `path` and `direction`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BehaviorState {
    /// Waypoints toward the current target.  Replaced wholesale on refresh.
    pub path: Vec<Point>,

    pub direction: Direction,

    /// The entity being approached or used.  Doubles as an advisory
    /// reservation.
    pub target_entity_id: Option<EntityId>,

    /// Active behavior + action.  `None` means idle, reselect next tick.
    pub behavior_target_id: Option<BehaviorTargetId>,

    /// Tick at which `behavior_target_id` was set.
    pub behavior_target_start_tick: Option<Tick>,

    pub interaction_queue: InteractionQueue,

    /// Eligible behaviors from the latest selector run, highest priority first.
    pub behaviors: Vec<Behavior>,

    /// Ids of `behaviors`, same order.
    pub behavior_ids: Vec<BehaviorId>,
}

impl BehaviorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when no behavior is active.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.behavior_target_id.is_none()
    }

    /// Reset to idle, forcing reselection next tick.
    ///
    /// Returns the previous target so the caller can release its reservation.
    /// `direction` and the cached behavior list are kept.
    pub fn clear(&mut self) -> Option<EntityId> {
        self.behavior_target_id = None;
        self.behavior_target_start_tick = None;
        self.reset_episode()
    }

    /// Drop the target, path and queue but keep the active behavior.
    pub(crate) fn reset_episode(&mut self) -> Option<EntityId> {
        self.path.clear();
        self.interaction_queue.clear();
        self.target_entity_id.take()
    }
}
