use tracing::debug;

use hm_content::InteractionKind;
use hm_core::EntityId;

use super::{ActionExecutor, Start, within_reach};
use crate::event::TickEvent;
use crate::{EngineResult, TickContext};

/// `system:item_pick` — walk up to an item and take it.
///
/// Starts once the item is within the interaction radius (or already held).
/// On completion the item changes owner and leaves the world map.
#[derive(Copy, Clone, Debug, Default)]
pub struct ItemPick;

impl ActionExecutor for ItemPick {
    fn kind(&self) -> InteractionKind {
        InteractionKind::SystemItemPick
    }

    fn can_start(&self, ctx: &TickContext<'_>, target: &EntityId) -> Start {
        if ctx.world.holds(ctx.character, target) || within_reach(ctx, target) {
            Start::Now
        } else {
            Start::Wait
        }
    }

    fn need_recipients(&self, _ctx: &TickContext<'_>, _target: &EntityId) -> Vec<EntityId> {
        Vec::new()
    }

    fn complete(&self, ctx: &mut TickContext<'_>, target: &EntityId) -> EngineResult<()> {
        if !ctx.world.holds(ctx.character, target) {
            ctx.world.transfer_item(target, ctx.character)?;
            debug!(character = %ctx.character, item = %target, "item picked up");
            ctx.emit(TickEvent::ItemTransferred { item: target.clone(), to: ctx.character.clone() });
        }
        if ctx.world.remove_entity(target) {
            ctx.emit(TickEvent::EntityRemoved { entity: target.clone() });
        }
        Ok(())
    }
}

/// `once:item_use` — consume a held item.
///
/// Waits until the item is in the character's inventory.  Completion removes
/// it from the inventory; a second completion finds nothing to remove.
#[derive(Copy, Clone, Debug, Default)]
pub struct ItemUse;

impl ActionExecutor for ItemUse {
    fn kind(&self) -> InteractionKind {
        InteractionKind::OnceItemUse
    }

    fn can_start(&self, ctx: &TickContext<'_>, target: &EntityId) -> Start {
        if ctx.world.holds(ctx.character, target) { Start::Now } else { Start::Wait }
    }

    fn complete(&self, ctx: &mut TickContext<'_>, target: &EntityId) -> EngineResult<()> {
        if ctx.world.remove_held_item(ctx.character, target) {
            debug!(character = %ctx.character, item = %target, "item used up");
            ctx.emit(TickEvent::EntityRemoved { entity: target.clone() });
        }
        Ok(())
    }
}
