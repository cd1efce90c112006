//! Authored content types.
//!
//! These mirror the content tables one-to-one.  They are plain data: the
//! engine never mutates content, and nothing here knows about world state.

use std::fmt;
use std::str::FromStr;

use hm_core::{
    BehaviorActionId, BehaviorId, BehaviorKind, BuildingTemplateId, ConditionId, CoreError,
    EntityId, FulfillmentKind, FulfillmentTargetId, InteractionActionId, InteractionId,
    InteractionSource, ItemTemplateId, NeedId,
};

// ── Needs and conditions ──────────────────────────────────────────────────────

/// A character need such as hunger or rest.  Higher is better.
#[derive(Clone, Debug, PartialEq)]
pub struct Need {
    pub id:             NeedId,
    pub name:           String,
    pub max_value:      f64,
    pub initial_value:  f64,
    /// Amount the value drops every tick (0 = static).
    pub decay_per_tick: f64,
}

/// A building condition such as durability or cleanliness.
#[derive(Clone, Debug, PartialEq)]
pub struct Condition {
    pub id:             ConditionId,
    pub name:           String,
    pub max_value:      f64,
    pub initial_value:  f64,
    pub decay_per_tick: f64,
}

// ── Behaviors ─────────────────────────────────────────────────────────────────

/// When a behavior is eligible for selection.
#[derive(Clone, Debug, PartialEq)]
pub enum BehaviorTrigger {
    /// Always eligible.  Typically the low-priority idle fallback.
    Always,
    /// Eligible while the character's `need` is below `threshold`.
    NeedBelow { need: NeedId, threshold: f64 },
    /// Eligible while any building's `condition` is below `threshold`.
    ConditionBelow { condition: ConditionId, threshold: f64 },
}

/// An authored, priority-ranked goal.
#[derive(Clone, Debug, PartialEq)]
pub struct Behavior {
    pub id:        BehaviorId,
    pub name:      String,
    /// Higher runs first.
    pub priority:  i32,
    pub trigger:   BehaviorTrigger,
    /// Restrict the behavior to one character.  `None` = every character.
    pub character: Option<EntityId>,
}

impl Behavior {
    pub fn kind(&self) -> BehaviorKind {
        match self.trigger {
            BehaviorTrigger::Always               => BehaviorKind::Idle,
            BehaviorTrigger::NeedBelow { .. }      => BehaviorKind::Need,
            BehaviorTrigger::ConditionBelow { .. } => BehaviorKind::Condition,
        }
    }
}

/// What a need/condition fulfillment raises.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FulfillmentTarget {
    Need(NeedId),
    Condition(ConditionId),
}

impl FulfillmentTarget {
    pub fn kind(&self) -> FulfillmentKind {
        match self {
            FulfillmentTarget::Need(_)      => FulfillmentKind::Need,
            FulfillmentTarget::Condition(_) => FulfillmentKind::Condition,
        }
    }

    pub fn subject(&self) -> &str {
        match self {
            FulfillmentTarget::Need(n)      => n.as_str(),
            FulfillmentTarget::Condition(c) => c.as_str(),
        }
    }
}

/// What a behavior action does once it is the active step.
#[derive(Clone, Debug, PartialEq)]
pub enum BehaviorActionKind {
    /// Stand still for `duration_ticks`.
    Idle { duration_ticks: u64 },
    /// Find something that raises `target` and use it.
    Fulfill { target: FulfillmentTarget },
    /// Find an entity offering `interaction` and perform it.
    Interact { interaction: InteractionId },
}

/// How the target entity of a behavior action is chosen.
#[derive(Clone, Debug, PartialEq)]
pub enum TargetSelection {
    /// Nearest valid candidate from the interaction / fulfillment graph.
    Search,
    /// A fixed entity and interaction configured on the action.
    Explicit { entity: EntityId, interaction: InteractionId },
}

/// One step in a behavior's action graph.
#[derive(Clone, Debug, PartialEq)]
pub struct BehaviorAction {
    pub id:             BehaviorActionId,
    pub behavior_id:    BehaviorId,
    /// The entry step of the behavior.  Exactly one per behavior.
    pub root:           bool,
    pub kind:           BehaviorActionKind,
    pub selection:      TargetSelection,
    pub next_action_id: Option<BehaviorActionId>,
}

// ── Interactions ──────────────────────────────────────────────────────────────

/// Every interaction kind the engine knows how to execute.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InteractionKind {
    OnceItemUse,
    OnceBuildingUse,
    OnceBuildingConstruct,
    OnceBuildingDemolish,
    SystemItemPick,
    FulfillBuildingRepair,
    FulfillBuildingClean,
    FulfillBuildingUse,
    FulfillCharacterHug,
}

impl InteractionKind {
    /// Fixed executor order used by the tick pipeline.
    pub const ALL: [InteractionKind; 9] = [
        InteractionKind::OnceItemUse,
        InteractionKind::OnceBuildingUse,
        InteractionKind::OnceBuildingConstruct,
        InteractionKind::OnceBuildingDemolish,
        InteractionKind::SystemItemPick,
        InteractionKind::FulfillBuildingRepair,
        InteractionKind::FulfillBuildingClean,
        InteractionKind::FulfillBuildingUse,
        InteractionKind::FulfillCharacterHug,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InteractionKind::OnceItemUse           => "once:item_use",
            InteractionKind::OnceBuildingUse       => "once:building_use",
            InteractionKind::OnceBuildingConstruct => "once:building_construct",
            InteractionKind::OnceBuildingDemolish  => "once:building_demolish",
            InteractionKind::SystemItemPick        => "system:item_pick",
            InteractionKind::FulfillBuildingRepair => "fulfill:building_repair",
            InteractionKind::FulfillBuildingClean  => "fulfill:building_clean",
            InteractionKind::FulfillBuildingUse    => "fulfill:building_use",
            InteractionKind::FulfillCharacterHug   => "fulfill:character_hug",
        }
    }

    /// Which entity type offers this kind of interaction.
    pub fn source(self) -> InteractionSource {
        match self {
            InteractionKind::OnceItemUse => InteractionSource::Item,
            InteractionKind::OnceBuildingUse
            | InteractionKind::OnceBuildingConstruct
            | InteractionKind::OnceBuildingDemolish
            | InteractionKind::FulfillBuildingRepair
            | InteractionKind::FulfillBuildingClean
            | InteractionKind::FulfillBuildingUse => InteractionSource::Building,
            InteractionKind::FulfillCharacterHug => InteractionSource::Character,
            InteractionKind::SystemItemPick      => InteractionSource::System,
        }
    }

    /// `fulfill:*` kinds may finish early once every fulfilled value is full.
    pub fn is_fulfill(self) -> bool {
        matches!(
            self,
            InteractionKind::FulfillBuildingRepair
                | InteractionKind::FulfillBuildingClean
                | InteractionKind::FulfillBuildingUse
                | InteractionKind::FulfillCharacterHug
        )
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionKind {
    type Err = CoreError;

    fn from_str(code: &str) -> Result<Self, CoreError> {
        InteractionKind::ALL
            .into_iter()
            .find(|k| k.as_str() == code)
            .ok_or_else(|| CoreError::UnknownCode {
                what: "InteractionKind",
                code: code.to_owned(),
            })
    }
}

/// Which template offers an interaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InteractionSubject {
    Item(ItemTemplateId),
    Building(BuildingTemplateId),
    /// Any character.
    Character,
    /// Engine-provided, not offered by any entity.
    System,
}

/// An authored capability an entity offers.
#[derive(Clone, Debug, PartialEq)]
pub struct Interaction {
    pub id:      InteractionId,
    pub kind:    InteractionKind,
    pub subject: InteractionSubject,
}

impl Interaction {
    pub fn source(&self) -> InteractionSource {
        self.kind.source()
    }
}

/// One executable step of an interaction.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionAction {
    pub id:             InteractionActionId,
    pub interaction_id: InteractionId,
    pub root:           bool,
    /// Authored duration.  See [`normalized_duration`][Self::normalized_duration].
    pub duration_ticks: i64,
    pub next_action_id: Option<InteractionActionId>,
}

impl InteractionAction {
    /// Duration clamped to at least one tick, so a zero or negative authored
    /// value cannot stall the queue.
    #[inline]
    pub fn normalized_duration(&self) -> u64 {
        self.duration_ticks.max(1) as u64
    }
}

/// How fast an interaction raises a need or condition.
#[derive(Clone, Debug, PartialEq)]
pub struct Fulfillment {
    pub target:            FulfillmentTarget,
    pub interaction_id:    InteractionId,
    pub increase_per_tick: f64,
}

impl Fulfillment {
    /// The composite `{kind}_{subject}_{interaction}` key.
    pub fn key(&self) -> FulfillmentTargetId {
        FulfillmentTargetId::new(
            self.target.kind(),
            self.target.subject(),
            self.interaction_id.clone(),
        )
    }
}
