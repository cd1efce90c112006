//! The `WorldContext` trait — everything the behavior engine reads from or
//! writes to the simulated world.

use hm_core::{BuildingTemplateId, ConditionId, EntityId, ItemTemplateId, Level, NeedId, Point};

use crate::WorldResult;

/// World state as seen by the tick pipeline.
///
/// Queries are infallible: an unknown id reads as "absent".  Enumeration
/// methods must return ids in a stable order because target search breaks
/// distance ties by enumeration order.
///
/// Reservations are advisory.  [`reserve`][Self::reserve] overwrites any
/// existing holder and nothing prevents two characters from acting on the
/// same entity; the engine only uses them to skip items another character is
/// already heading for.
pub trait WorldContext {
    // ── Queries ───────────────────────────────────────────────────────────

    /// World position of a placed entity.  Held items report their holder's
    /// position.
    fn position(&self, entity: &EntityId) -> Option<Point>;

    /// `true` while the entity has a record, whether placed or held.
    fn entity_exists(&self, entity: &EntityId) -> bool;

    /// `true` while the entity is on the world map.  Characters and
    /// buildings are on it while they exist; an item only until picked up.
    fn is_placed(&self, entity: &EntityId) -> bool;

    /// Items held by `character`.  Empty for unknown characters.
    fn held_items(&self, character: &EntityId) -> &[EntityId];

    fn item_template(&self, item: &EntityId) -> Option<&ItemTemplateId>;

    fn building_template(&self, building: &EntityId) -> Option<&BuildingTemplateId>;

    /// Construction state, `None` for unknown buildings.
    fn is_constructed(&self, building: &EntityId) -> Option<bool>;

    fn need(&self, character: &EntityId, need: &NeedId) -> Option<Level>;

    fn condition(&self, building: &EntityId, condition: &ConditionId) -> Option<Level>;

    /// Lowest value of `condition` across every building that tracks it.
    fn lowest_condition(&self, condition: &ConditionId) -> Option<f64>;

    /// Placed (not held) items of `template`.
    fn items_of_template(&self, template: &ItemTemplateId) -> Vec<EntityId>;

    fn buildings_of_template(&self, template: &BuildingTemplateId) -> Vec<EntityId>;

    fn characters(&self) -> Vec<EntityId>;

    /// The character currently holding a reservation on `entity`.
    fn reserved_by(&self, entity: &EntityId) -> Option<&EntityId>;

    // ── Mutations ─────────────────────────────────────────────────────────

    /// Reserve `entity` for `character`, replacing any previous holder.
    fn reserve(&mut self, entity: &EntityId, character: &EntityId);

    /// Drop the reservation on `entity` if `character` holds it.
    fn release(&mut self, entity: &EntityId, character: &EntityId);

    /// Give `item` to `character`: sets the owner and appends it to the
    /// character's held items.
    fn transfer_item(&mut self, item: &EntityId, character: &EntityId) -> WorldResult<()>;

    /// Take `entity` off the world map.  A held item keeps its record in its
    /// holder's inventory; anything else is dropped.  Returns `false` if the
    /// entity was not on the map.
    fn remove_entity(&mut self, entity: &EntityId) -> bool;

    /// Consume a held item.  Returns `false` (and changes nothing) if the
    /// character does not hold it.
    fn remove_held_item(&mut self, character: &EntityId, item: &EntityId) -> bool;

    /// Raise a need, clamped.  Returns the applied delta, `None` if untracked.
    fn increase_need(&mut self, character: &EntityId, need: &NeedId, amount: f64) -> Option<f64>;

    fn increase_condition(
        &mut self,
        building:  &EntityId,
        condition: &ConditionId,
        amount:    f64,
    ) -> Option<f64>;

    fn set_constructed(&mut self, building: &EntityId, constructed: bool) -> WorldResult<()>;

    // ── Provided ──────────────────────────────────────────────────────────

    #[inline]
    fn holds(&self, character: &EntityId, item: &EntityId) -> bool {
        self.held_items(character).contains(item)
    }

    /// `true` if `character` can still act on `entity`: it is on the map, or
    /// it is an item in `character`'s own inventory.  An item someone else
    /// picked up reads as gone.
    #[inline]
    fn is_available_to(&self, entity: &EntityId, character: &EntityId) -> bool {
        self.is_placed(entity) || self.holds(character, entity)
    }
}
