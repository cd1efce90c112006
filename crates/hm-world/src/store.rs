//! `WorldStore` — the default [`WorldContext`] implementation.

use std::collections::BTreeMap;

use tracing::trace;

use hm_content::ContentRepository;
use hm_core::{
    BuildingTemplateId, ConditionId, ConditionLevels, EntityId, EntityKind, ItemTemplateId, Level,
    NeedId, NeedLevels, Point,
};

use crate::{Building, Character, Item, WorldContext, WorldError, WorldResult};

/// All world entities, keyed by id in ordered maps so that every enumeration
/// is deterministic.
#[derive(Clone, Debug, Default)]
pub struct WorldStore {
    characters:   BTreeMap<EntityId, Character>,
    items:        BTreeMap<EntityId, Item>,
    buildings:    BTreeMap<EntityId, Building>,
    /// entity → reserving character
    reservations: BTreeMap<EntityId, EntityId>,
}

impl WorldStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Spawning ──────────────────────────────────────────────────────────

    /// Add a character tracking every authored need at its initial value.
    pub fn spawn_character(
        &mut self,
        id:       EntityId,
        name:     impl Into<String>,
        position: Point,
        content:  &dyn ContentRepository,
    ) -> WorldResult<&mut Character> {
        expect_kind(&id, EntityKind::Character)?;
        if self.characters.contains_key(&id) {
            return Err(WorldError::Duplicate(id));
        }
        let mut needs = NeedLevels::new();
        for need in content.needs() {
            needs.track(need.id.clone(), need.initial_value, need.max_value);
        }
        let character = Character {
            id: id.clone(),
            name: name.into(),
            position,
            held_item_ids: Vec::new(),
            needs,
        };
        Ok(self.characters.entry(id).or_insert(character))
    }

    pub fn place_item(
        &mut self,
        id:       EntityId,
        template: ItemTemplateId,
        position: Point,
    ) -> WorldResult<()> {
        expect_kind(&id, EntityKind::Item)?;
        if self.items.contains_key(&id) {
            return Err(WorldError::Duplicate(id));
        }
        self.items.insert(
            id.clone(),
            Item { id, template, position, owner: None, placed: true },
        );
        Ok(())
    }

    /// Add a building tracking every authored condition at its initial value.
    pub fn place_building(
        &mut self,
        id:          EntityId,
        template:    BuildingTemplateId,
        position:    Point,
        constructed: bool,
        content:     &dyn ContentRepository,
    ) -> WorldResult<()> {
        expect_kind(&id, EntityKind::Building)?;
        if self.buildings.contains_key(&id) {
            return Err(WorldError::Duplicate(id));
        }
        let mut conditions = ConditionLevels::new();
        for condition in content.conditions() {
            conditions.track(condition.id.clone(), condition.initial_value, condition.max_value);
        }
        self.buildings.insert(
            id.clone(),
            Building { id, template, position, constructed, conditions },
        );
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn character(&self, id: &EntityId) -> Option<&Character> {
        self.characters.get(id)
    }

    pub fn item(&self, id: &EntityId) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn building(&self, id: &EntityId) -> Option<&Building> {
        self.buildings.get(id)
    }

    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    /// Move a character.  Its held items travel with it implicitly.
    pub fn set_position(&mut self, character: &EntityId, position: Point) -> WorldResult<()> {
        let c = self
            .characters
            .get_mut(character)
            .ok_or_else(|| WorldError::UnknownEntity(character.clone()))?;
        c.position = position;
        Ok(())
    }

    pub fn reservations(&self) -> impl Iterator<Item = (&EntityId, &EntityId)> {
        self.reservations.iter()
    }

    // ── Decay ─────────────────────────────────────────────────────────────

    /// Lower every need and condition by its authored `decay_per_tick`.
    pub fn decay_levels(&mut self, content: &dyn ContentRepository) {
        for need in content.needs() {
            if need.decay_per_tick == 0.0 {
                continue;
            }
            for c in self.characters.values_mut() {
                c.needs.increase(&need.id, -need.decay_per_tick);
            }
        }
        for condition in content.conditions() {
            if condition.decay_per_tick == 0.0 {
                continue;
            }
            for b in self.buildings.values_mut().filter(|b| b.constructed) {
                b.conditions.increase(&condition.id, -condition.decay_per_tick);
            }
        }
    }
}

fn expect_kind(id: &EntityId, expected: EntityKind) -> WorldResult<()> {
    if id.kind == expected {
        Ok(())
    } else {
        Err(WorldError::WrongKind { id: id.clone(), expected })
    }
}

impl WorldContext for WorldStore {
    fn position(&self, entity: &EntityId) -> Option<Point> {
        match entity.kind {
            EntityKind::Character => self.characters.get(entity).map(|c| c.position),
            EntityKind::Building => self.buildings.get(entity).map(|b| b.position),
            EntityKind::Item => {
                let item = self.items.get(entity)?;
                match (&item.owner, item.placed) {
                    (Some(owner), false) => self.characters.get(owner).map(|c| c.position),
                    _ => Some(item.position),
                }
            }
        }
    }

    fn entity_exists(&self, entity: &EntityId) -> bool {
        match entity.kind {
            EntityKind::Character => self.characters.contains_key(entity),
            EntityKind::Item => self.items.contains_key(entity),
            EntityKind::Building => self.buildings.contains_key(entity),
        }
    }

    fn is_placed(&self, entity: &EntityId) -> bool {
        match entity.kind {
            EntityKind::Item => self.items.get(entity).is_some_and(|i| i.placed),
            _ => self.entity_exists(entity),
        }
    }

    fn held_items(&self, character: &EntityId) -> &[EntityId] {
        self.characters
            .get(character)
            .map(|c| c.held_item_ids.as_slice())
            .unwrap_or(&[])
    }

    fn item_template(&self, item: &EntityId) -> Option<&ItemTemplateId> {
        self.items.get(item).map(|i| &i.template)
    }

    fn building_template(&self, building: &EntityId) -> Option<&BuildingTemplateId> {
        self.buildings.get(building).map(|b| &b.template)
    }

    fn is_constructed(&self, building: &EntityId) -> Option<bool> {
        self.buildings.get(building).map(|b| b.constructed)
    }

    fn need(&self, character: &EntityId, need: &NeedId) -> Option<Level> {
        self.characters.get(character)?.needs.level(need)
    }

    fn condition(&self, building: &EntityId, condition: &ConditionId) -> Option<Level> {
        self.buildings.get(building)?.conditions.level(condition)
    }

    fn lowest_condition(&self, condition: &ConditionId) -> Option<f64> {
        self.buildings
            .values()
            .filter_map(|b| b.conditions.get(condition))
            .reduce(f64::min)
    }

    fn items_of_template(&self, template: &ItemTemplateId) -> Vec<EntityId> {
        self.items
            .values()
            .filter(|i| i.placed && &i.template == template)
            .map(|i| i.id.clone())
            .collect()
    }

    fn buildings_of_template(&self, template: &BuildingTemplateId) -> Vec<EntityId> {
        self.buildings
            .values()
            .filter(|b| &b.template == template)
            .map(|b| b.id.clone())
            .collect()
    }

    fn characters(&self) -> Vec<EntityId> {
        self.characters.keys().cloned().collect()
    }

    fn reserved_by(&self, entity: &EntityId) -> Option<&EntityId> {
        self.reservations.get(entity)
    }

    fn reserve(&mut self, entity: &EntityId, character: &EntityId) {
        if let Some(previous) = self.reservations.insert(entity.clone(), character.clone()) {
            if &previous != character {
                trace!(entity = %entity, from = %previous, to = %character, "reservation overwritten");
            }
        }
    }

    fn release(&mut self, entity: &EntityId, character: &EntityId) {
        if self.reservations.get(entity) == Some(character) {
            self.reservations.remove(entity);
        }
    }

    fn transfer_item(&mut self, item: &EntityId, character: &EntityId) -> WorldResult<()> {
        if !self.characters.contains_key(character) {
            return Err(WorldError::UnknownEntity(character.clone()));
        }
        let record = self
            .items
            .get_mut(item)
            .ok_or_else(|| WorldError::UnknownEntity(item.clone()))?;
        let previous = record.owner.replace(character.clone());
        if let Some(previous) = previous {
            if let Some(c) = self.characters.get_mut(&previous) {
                c.held_item_ids.retain(|h| h != item);
            }
        }
        if let Some(c) = self.characters.get_mut(character) {
            c.held_item_ids.push(item.clone());
        }
        Ok(())
    }

    fn remove_entity(&mut self, entity: &EntityId) -> bool {
        self.reservations.remove(entity);
        match entity.kind {
            EntityKind::Item => {
                let held = match self.items.get(entity) {
                    Some(item) => item.owner.is_some(),
                    None => return false,
                };
                if held {
                    self.items
                        .get_mut(entity)
                        .is_some_and(|item| std::mem::replace(&mut item.placed, false))
                } else {
                    self.items.remove(entity).is_some()
                }
            }
            EntityKind::Building => self.buildings.remove(entity).is_some(),
            EntityKind::Character => match self.characters.remove(entity) {
                Some(c) => {
                    for held in &c.held_item_ids {
                        self.items.remove(held);
                    }
                    self.reservations.retain(|_, holder| holder != entity);
                    true
                }
                None => false,
            },
        }
    }

    fn remove_held_item(&mut self, character: &EntityId, item: &EntityId) -> bool {
        let Some(c) = self.characters.get_mut(character) else {
            return false;
        };
        let before = c.held_item_ids.len();
        c.held_item_ids.retain(|h| h != item);
        if c.held_item_ids.len() == before {
            return false;
        }
        self.items.remove(item);
        self.reservations.remove(item);
        true
    }

    fn increase_need(&mut self, character: &EntityId, need: &NeedId, amount: f64) -> Option<f64> {
        self.characters.get_mut(character)?.needs.increase(need, amount)
    }

    fn increase_condition(
        &mut self,
        building:  &EntityId,
        condition: &ConditionId,
        amount:    f64,
    ) -> Option<f64> {
        self.buildings.get_mut(building)?.conditions.increase(condition, amount)
    }

    fn set_constructed(&mut self, building: &EntityId, constructed: bool) -> WorldResult<()> {
        let b = self
            .buildings
            .get_mut(building)
            .ok_or_else(|| WorldError::UnknownEntity(building.clone()))?;
        b.constructed = constructed;
        Ok(())
    }
}
