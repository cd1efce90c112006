use hm_content::InteractionKind;
use hm_core::{BehaviorActionId, BehaviorId, ConditionId, InteractionActionId, InteractionId, NeedId};
use hm_world::WorldError;
use thiserror::Error;

/// Content-integrity faults and world failures.
///
/// Transient conditions (no candidates, precondition unmet, vanished target)
/// are never errors; stages report them as [`Flow::Restart`][crate::Flow].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("behavior {behavior} has no root action")]
    UnresolvedRootAction { behavior: BehaviorId },

    #[error("behavior action {0} not found")]
    MissingBehaviorAction(BehaviorActionId),

    #[error("interaction {0} not found")]
    MissingInteraction(InteractionId),

    #[error("no interaction registered for system kind {0}")]
    MissingSystemInteraction(InteractionKind),

    #[error("interaction action {0} not found")]
    MissingInteractionAction(InteractionActionId),

    #[error("interaction {0} has no root action")]
    MissingRootInteractionAction(InteractionId),

    #[error("need {0} not found")]
    MissingNeed(NeedId),

    #[error("condition {0} not found")]
    MissingCondition(ConditionId),

    #[error("world error: {0}")]
    World(#[from] WorldError),
}

pub type EngineResult<T> = Result<T, EngineError>;
