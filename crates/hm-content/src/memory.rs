//! `InMemoryContent` — the default [`ContentRepository`] implementation.

use std::collections::BTreeMap;

use hm_core::ids::is_delimiter_safe;
use hm_core::{
    BehaviorActionId, BehaviorId, ConditionId, InteractionActionId, InteractionId, NeedId,
};

use crate::model::{
    Behavior, BehaviorAction, BehaviorActionKind, Condition, Fulfillment, FulfillmentTarget,
    Interaction, InteractionAction, InteractionKind, InteractionSubject, Need, TargetSelection,
};
use crate::{ContentError, ContentRepository, ContentResult};

/// Id of the engine-provided `system:item_pick` interaction.
pub const ITEM_PICK_INTERACTION: &str = "item-pick";

/// Id of the root action of the built-in `system:item_pick` interaction.
pub const ITEM_PICK_ACTION: &str = "item-pick-root";

/// Content held in ordered maps.
///
/// Behaviors keep insertion order because it is the priority tie-break.
/// Every other table is keyed by id.
///
/// A fresh store already contains a built-in `system:item_pick` interaction
/// with a single one-tick root action.  Inserting another interaction of
/// that kind replaces the registration.
pub struct InMemoryContent {
    needs:               BTreeMap<NeedId, Need>,
    conditions:          BTreeMap<ConditionId, Condition>,
    behaviors:           Vec<Behavior>,
    behavior_actions:    BTreeMap<BehaviorActionId, BehaviorAction>,
    interactions:        BTreeMap<InteractionId, Interaction>,
    interaction_actions: BTreeMap<InteractionActionId, InteractionAction>,
    fulfillments:        Vec<Fulfillment>,
    system:              BTreeMap<InteractionKind, InteractionId>,
}

impl Default for InMemoryContent {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryContent {
    pub fn new() -> Self {
        let mut content = Self {
            needs:               BTreeMap::new(),
            conditions:          BTreeMap::new(),
            behaviors:           Vec::new(),
            behavior_actions:    BTreeMap::new(),
            interactions:        BTreeMap::new(),
            interaction_actions: BTreeMap::new(),
            fulfillments:        Vec::new(),
            system:              BTreeMap::new(),
        };
        content.insert_interaction(Interaction {
            id:      InteractionId::new(ITEM_PICK_INTERACTION),
            kind:    InteractionKind::SystemItemPick,
            subject: InteractionSubject::System,
        });
        content.insert_interaction_action(InteractionAction {
            id:             InteractionActionId::new(ITEM_PICK_ACTION),
            interaction_id: InteractionId::new(ITEM_PICK_INTERACTION),
            root:           true,
            duration_ticks: 1,
            next_action_id: None,
        });
        content
    }

    // ── Insertion ─────────────────────────────────────────────────────────

    pub fn insert_need(&mut self, need: Need) -> &mut Self {
        self.needs.insert(need.id.clone(), need);
        self
    }

    pub fn insert_condition(&mut self, condition: Condition) -> &mut Self {
        self.conditions.insert(condition.id.clone(), condition);
        self
    }

    /// Append a behavior.  Re-inserting an existing id replaces it in place.
    pub fn insert_behavior(&mut self, behavior: Behavior) -> &mut Self {
        match self.behaviors.iter_mut().find(|b| b.id == behavior.id) {
            Some(slot) => *slot = behavior,
            None => self.behaviors.push(behavior),
        }
        self
    }

    pub fn insert_behavior_action(&mut self, action: BehaviorAction) -> &mut Self {
        self.behavior_actions.insert(action.id.clone(), action);
        self
    }

    pub fn insert_interaction(&mut self, interaction: Interaction) -> &mut Self {
        if interaction.subject == InteractionSubject::System {
            self.system.insert(interaction.kind, interaction.id.clone());
        }
        self.interactions.insert(interaction.id.clone(), interaction);
        self
    }

    pub fn insert_interaction_action(&mut self, action: InteractionAction) -> &mut Self {
        self.interaction_actions.insert(action.id.clone(), action);
        self
    }

    pub fn insert_fulfillment(&mut self, fulfillment: Fulfillment) -> &mut Self {
        self.fulfillments.push(fulfillment);
        self
    }

    // ── Validation ────────────────────────────────────────────────────────

    /// Check every cross-table reference and that ids embedded in composite
    /// ids are free of the `_` delimiter.
    pub fn validate(&self) -> ContentResult<()> {
        for b in &self.behaviors {
            safe("behavior", b.id.as_str())?;
            if self.root_action(&b.id).is_none() {
                return dangling("root action of behavior", b.id.as_str());
            }
        }
        for a in self.behavior_actions.values() {
            safe("behavior action", a.id.as_str())?;
            if !self.behaviors.iter().any(|b| b.id == a.behavior_id) {
                return dangling("behavior", a.behavior_id.as_str());
            }
            if let Some(next) = &a.next_action_id {
                if !self.behavior_actions.contains_key(next) {
                    return dangling("behavior action", next.as_str());
                }
            }
            match &a.kind {
                BehaviorActionKind::Fulfill { target } => self.check_target(target)?,
                BehaviorActionKind::Interact { interaction } => {
                    if !self.interactions.contains_key(interaction) {
                        return dangling("interaction", interaction.as_str());
                    }
                }
                BehaviorActionKind::Idle { .. } => {}
            }
            if let TargetSelection::Explicit { interaction, .. } = &a.selection {
                if !self.interactions.contains_key(interaction) {
                    return dangling("interaction", interaction.as_str());
                }
            }
        }
        for i in self.interactions.values() {
            safe("interaction", i.id.as_str())?;
            if self.root_interaction_action(&i.id).is_none() {
                return dangling("root action of interaction", i.id.as_str());
            }
        }
        for a in self.interaction_actions.values() {
            safe("interaction action", a.id.as_str())?;
            if !self.interactions.contains_key(&a.interaction_id) {
                return dangling("interaction", a.interaction_id.as_str());
            }
            if let Some(next) = &a.next_action_id {
                if !self.interaction_actions.contains_key(next) {
                    return dangling("interaction action", next.as_str());
                }
            }
        }
        for f in &self.fulfillments {
            self.check_target(&f.target)?;
            if !self.interactions.contains_key(&f.interaction_id) {
                return dangling("interaction", f.interaction_id.as_str());
            }
        }
        Ok(())
    }

    fn check_target(&self, target: &FulfillmentTarget) -> ContentResult<()> {
        match target {
            FulfillmentTarget::Need(n) if !self.needs.contains_key(n) => dangling("need", n.as_str()),
            FulfillmentTarget::Condition(c) if !self.conditions.contains_key(c) => {
                dangling("condition", c.as_str())
            }
            _ => Ok(()),
        }
    }
}

fn safe(what: &'static str, id: &str) -> ContentResult<()> {
    if is_delimiter_safe(id) {
        Ok(())
    } else {
        Err(ContentError::UnsafeId { what, id: id.to_owned() })
    }
}

fn dangling(what: &'static str, id: &str) -> ContentResult<()> {
    Err(ContentError::DanglingReference { what, id: id.to_owned() })
}

impl ContentRepository for InMemoryContent {
    fn behaviors(&self) -> Vec<&Behavior> {
        self.behaviors.iter().collect()
    }

    fn behavior(&self, id: &BehaviorId) -> Option<&Behavior> {
        self.behaviors.iter().find(|b| &b.id == id)
    }

    fn behavior_action(&self, id: &BehaviorActionId) -> Option<&BehaviorAction> {
        self.behavior_actions.get(id)
    }

    fn root_action(&self, behavior: &BehaviorId) -> Option<&BehaviorAction> {
        self.behavior_actions
            .values()
            .find(|a| a.root && &a.behavior_id == behavior)
    }

    fn interaction(&self, id: &InteractionId) -> Option<&Interaction> {
        self.interactions.get(id)
    }

    fn interactions(&self) -> Vec<&Interaction> {
        self.interactions.values().collect()
    }

    fn interaction_actions(&self) -> Vec<&InteractionAction> {
        self.interaction_actions.values().collect()
    }

    fn interaction_action(&self, id: &InteractionActionId) -> Option<&InteractionAction> {
        self.interaction_actions.get(id)
    }

    fn fulfillments(&self) -> Vec<&Fulfillment> {
        self.fulfillments.iter().collect()
    }

    fn need(&self, id: &NeedId) -> Option<&Need> {
        self.needs.get(id)
    }

    fn needs(&self) -> Vec<&Need> {
        self.needs.values().collect()
    }

    fn condition(&self, id: &ConditionId) -> Option<&Condition> {
        self.conditions.get(id)
    }

    fn conditions(&self) -> Vec<&Condition> {
        self.conditions.values().collect()
    }

    fn system_interaction(&self, kind: InteractionKind) -> Option<&Interaction> {
        self.system.get(&kind).and_then(|id| self.interactions.get(id))
    }
}
