//! Tick results reported back to the driver and its observers.

use hm_core::{BehaviorTargetId, EntityId, FulfillmentTargetId, InteractionTargetId};

/// Why a behavior episode ended without a successor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClearReason {
    /// The last action of the behavior finished.
    Finished,
    /// Search found no usable candidate.
    NoCandidate,
    /// The target entity left the world.
    TargetVanished,
    /// The target can no longer host the interaction (e.g. already built).
    TargetUnusable,
}

impl ClearReason {
    pub fn as_str(self) -> &'static str {
        match self {
            ClearReason::Finished       => "finished",
            ClearReason::NoCandidate    => "no-candidate",
            ClearReason::TargetVanished => "target-vanished",
            ClearReason::TargetUnusable => "target-unusable",
        }
    }
}

/// One observable state change produced while ticking a character.
#[derive(Clone, Debug, PartialEq)]
pub enum TickEvent {
    BehaviorSelected { behavior: BehaviorTargetId },
    BehaviorAdvanced { from: BehaviorTargetId, to: BehaviorTargetId },
    BehaviorCleared { behavior: Option<BehaviorTargetId>, reason: ClearReason },
    TargetAcquired { entity: EntityId, interaction: InteractionTargetId },
    TargetLost { entity: EntityId },
    ActionStarted { action: InteractionTargetId },
    ActionCompleted { action: InteractionTargetId },
    ItemTransferred { item: EntityId, to: EntityId },
    EntityRemoved { entity: EntityId },
    LevelIncreased { entity: EntityId, fulfillment: FulfillmentTargetId, delta: f64 },
    BuildingConstructed { building: EntityId },
}
