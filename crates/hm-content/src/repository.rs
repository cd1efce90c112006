//! The `ContentRepository` trait — read-only content queries the engine
//! depends on.

use hm_core::{
    BehaviorActionId, BehaviorId, ConditionId, EntityId, InteractionActionId, InteractionId,
    NeedId,
};

use crate::model::{
    Behavior, BehaviorAction, Condition, Fulfillment, FulfillmentTarget, Interaction,
    InteractionAction, InteractionKind, Need,
};

/// Current values the repository needs to decide behavior eligibility.
///
/// Implemented by the world collaborator for one character at a time.
pub trait LevelProbe {
    /// The character's current value for `need`, if tracked.
    fn need(&self, need: &NeedId) -> Option<f64>;

    /// The lowest current value of `condition` across all buildings that
    /// track it.
    fn lowest_condition(&self, condition: &ConditionId) -> Option<f64>;
}

/// Read-only queries over authored content.
///
/// The engine treats every `None` returned for an id it got *from content*
/// as a content-integrity fault.  Implementations must be deterministic:
/// list queries return rows in a stable order.
///
/// Only the lookups are required.  The filtered list queries have default
/// implementations built on [`fulfillments`][Self::fulfillments] and
/// [`interaction_actions`][Self::interaction_actions].
pub trait ContentRepository {
    /// All behaviors in authoring order.
    fn behaviors(&self) -> Vec<&Behavior>;

    fn behavior(&self, id: &BehaviorId) -> Option<&Behavior>;

    fn behavior_action(&self, id: &BehaviorActionId) -> Option<&BehaviorAction>;

    /// The root step of `behavior`.
    fn root_action(&self, behavior: &BehaviorId) -> Option<&BehaviorAction>;

    fn interaction(&self, id: &InteractionId) -> Option<&Interaction>;

    fn interactions(&self) -> Vec<&Interaction>;

    fn interaction_actions(&self) -> Vec<&InteractionAction>;

    fn interaction_action(&self, id: &InteractionActionId) -> Option<&InteractionAction>;

    fn fulfillments(&self) -> Vec<&Fulfillment>;

    fn need(&self, id: &NeedId) -> Option<&Need>;

    fn needs(&self) -> Vec<&Need>;

    fn condition(&self, id: &ConditionId) -> Option<&Condition>;

    fn conditions(&self) -> Vec<&Condition>;

    /// The interaction registered for an engine-provided kind such as
    /// `system:item_pick`.
    fn system_interaction(&self, kind: InteractionKind) -> Option<&Interaction>;

    // ── Provided queries ──────────────────────────────────────────────────

    /// Behaviors eligible for `character`, highest priority first.
    ///
    /// Ties keep authoring order (stable sort).
    fn behaviors_for(&self, character: &EntityId, probe: &dyn LevelProbe) -> Vec<&Behavior> {
        let mut eligible: Vec<&Behavior> = self
            .behaviors()
            .into_iter()
            .filter(|b| is_eligible(b, character, probe))
            .collect();
        eligible.sort_by(|a, b| b.priority.cmp(&a.priority));
        eligible
    }

    /// The root step of `interaction`.
    fn root_interaction_action(&self, interaction: &InteractionId) -> Option<&InteractionAction> {
        self.interaction_actions()
            .into_iter()
            .find(|a| a.root && &a.interaction_id == interaction)
    }

    fn fulfillments_for_interaction(&self, interaction: &InteractionId) -> Vec<&Fulfillment> {
        self.fulfillments()
            .into_iter()
            .filter(|f| &f.interaction_id == interaction)
            .collect()
    }

    fn fulfillments_for_target(&self, target: &FulfillmentTarget) -> Vec<&Fulfillment> {
        self.fulfillments()
            .into_iter()
            .filter(|f| &f.target == target)
            .collect()
    }

    fn interactions_of_kind(&self, kind: InteractionKind) -> Vec<&Interaction> {
        self.interactions()
            .into_iter()
            .filter(|i| i.kind == kind)
            .collect()
    }
}

/// Eligibility rule shared by every repository implementation.
pub fn is_eligible(behavior: &Behavior, character: &EntityId, probe: &dyn LevelProbe) -> bool {
    use crate::model::BehaviorTrigger;

    if behavior.character.as_ref().is_some_and(|c| c != character) {
        return false;
    }
    match &behavior.trigger {
        BehaviorTrigger::Always => true,
        BehaviorTrigger::NeedBelow { need, threshold } => {
            probe.need(need).is_some_and(|v| v < *threshold)
        }
        BehaviorTrigger::ConditionBelow { condition, threshold } => {
            probe.lowest_condition(condition).is_some_and(|v| v < *threshold)
        }
    }
}
