//! World entity records.

use hm_core::{BuildingTemplateId, ConditionLevels, EntityId, ItemTemplateId, NeedLevels, Point};

/// A simulated villager.
#[derive(Clone, Debug, PartialEq)]
pub struct Character {
    pub id:            EntityId,
    pub name:          String,
    pub position:      Point,
    /// Items in the character's inventory, in pickup order.
    pub held_item_ids: Vec<EntityId>,
    pub needs:         NeedLevels,
}

/// A placed or carried item.
///
/// An item picked up by a character leaves the world map (`placed = false`)
/// but keeps its record until it is consumed.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub id:       EntityId,
    pub template: ItemTemplateId,
    pub position: Point,
    pub owner:    Option<EntityId>,
    pub placed:   bool,
}

/// A building site or finished building.
#[derive(Clone, Debug, PartialEq)]
pub struct Building {
    pub id:          EntityId,
    pub template:    BuildingTemplateId,
    pub position:    Point,
    pub constructed: bool,
    pub conditions:  ConditionLevels,
}
