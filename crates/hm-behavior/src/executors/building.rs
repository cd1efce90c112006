use tracing::debug;

use hm_content::InteractionKind;
use hm_core::EntityId;

use super::{ActionExecutor, Start, within_reach};
use crate::acquire::building_usable;
use crate::event::TickEvent;
use crate::{EngineResult, TickContext};

/// Shared start check for building interactions: the building must be in the
/// right construction state and within reach.
pub(super) fn building_start(ctx: &TickContext<'_>, target: &EntityId, kind: InteractionKind) -> Start {
    if !building_usable(&*ctx.world, target, kind) {
        Start::Never
    } else if within_reach(ctx, target) {
        Start::Now
    } else {
        Start::Wait
    }
}

/// `once:building_use` — use a finished building once.
#[derive(Copy, Clone, Debug, Default)]
pub struct BuildingUse;

impl ActionExecutor for BuildingUse {
    fn kind(&self) -> InteractionKind {
        InteractionKind::OnceBuildingUse
    }

    fn can_start(&self, ctx: &TickContext<'_>, target: &EntityId) -> Start {
        building_start(ctx, target, self.kind())
    }
}

/// `once:building_construct` — turn a site into a finished building.
#[derive(Copy, Clone, Debug, Default)]
pub struct BuildingConstruct;

impl ActionExecutor for BuildingConstruct {
    fn kind(&self) -> InteractionKind {
        InteractionKind::OnceBuildingConstruct
    }

    fn can_start(&self, ctx: &TickContext<'_>, target: &EntityId) -> Start {
        building_start(ctx, target, self.kind())
    }

    fn complete(&self, ctx: &mut TickContext<'_>, target: &EntityId) -> EngineResult<()> {
        ctx.world.set_constructed(target, true)?;
        debug!(character = %ctx.character, building = %target, "building constructed");
        ctx.emit(TickEvent::BuildingConstructed { building: target.clone() });
        Ok(())
    }
}

/// `once:building_demolish` — remove a finished building from the world.
#[derive(Copy, Clone, Debug, Default)]
pub struct BuildingDemolish;

impl ActionExecutor for BuildingDemolish {
    fn kind(&self) -> InteractionKind {
        InteractionKind::OnceBuildingDemolish
    }

    fn can_start(&self, ctx: &TickContext<'_>, target: &EntityId) -> Start {
        building_start(ctx, target, self.kind())
    }

    fn complete(&self, ctx: &mut TickContext<'_>, target: &EntityId) -> EngineResult<()> {
        if ctx.world.remove_entity(target) {
            debug!(character = %ctx.character, building = %target, "building demolished");
            ctx.emit(TickEvent::EntityRemoved { entity: target.clone() });
        }
        Ok(())
    }
}
