use hm_content::InteractionKind;
use hm_core::{EntityId, EntityKind};

use super::building::building_start;
use super::{ActionExecutor, Start, within_reach};
use crate::TickContext;

/// `fulfill:building_repair`, `fulfill:building_clean` and
/// `fulfill:building_use`.
///
/// The three differ only in which fulfillments content attaches to them:
/// repair and clean usually raise the building's conditions, use raises the
/// character's needs.  All run on a finished building within reach.
#[derive(Copy, Clone, Debug)]
pub struct FulfillBuilding {
    kind: InteractionKind,
}

impl FulfillBuilding {
    pub fn repair() -> Self {
        Self { kind: InteractionKind::FulfillBuildingRepair }
    }

    pub fn clean() -> Self {
        Self { kind: InteractionKind::FulfillBuildingClean }
    }

    pub fn building_use() -> Self {
        Self { kind: InteractionKind::FulfillBuildingUse }
    }
}

impl ActionExecutor for FulfillBuilding {
    fn kind(&self) -> InteractionKind {
        self.kind
    }

    fn can_start(&self, ctx: &TickContext<'_>, target: &EntityId) -> Start {
        building_start(ctx, target, self.kind)
    }
}

/// `fulfill:character_hug` — both characters gain the hug's needs.
#[derive(Copy, Clone, Debug, Default)]
pub struct FulfillCharacterHug;

impl ActionExecutor for FulfillCharacterHug {
    fn kind(&self) -> InteractionKind {
        InteractionKind::FulfillCharacterHug
    }

    fn can_start(&self, ctx: &TickContext<'_>, target: &EntityId) -> Start {
        if target.kind != EntityKind::Character || target == ctx.character {
            Start::Never
        } else if within_reach(ctx, target) {
            Start::Now
        } else {
            Start::Wait
        }
    }

    fn need_recipients(&self, ctx: &TickContext<'_>, target: &EntityId) -> Vec<EntityId> {
        vec![ctx.character.clone(), target.clone()]
    }
}
