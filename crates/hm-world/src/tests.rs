//! Unit tests for hm-world.

use hm_content::{Condition, InMemoryContent, Need};
use hm_core::{BuildingTemplateId, ConditionId, EntityId, ItemTemplateId, NeedId, Point};

use crate::{WorldContext, WorldStore};

fn content() -> InMemoryContent {
    let mut c = InMemoryContent::new();
    c.insert_need(Need {
        id:             NeedId::new("hunger"),
        name:           "Hunger".into(),
        max_value:      100.0,
        initial_value:  40.0,
        decay_per_tick: 2.0,
    });
    c.insert_condition(Condition {
        id:             ConditionId::new("durability"),
        name:           "Durability".into(),
        max_value:      10.0,
        initial_value:  8.0,
        decay_per_tick: 1.0,
    });
    c
}

fn ann() -> EntityId {
    EntityId::character("ann")
}

fn bo() -> EntityId {
    EntityId::character("bo")
}

fn apple() -> EntityId {
    EntityId::item("apple-1")
}

fn world() -> WorldStore {
    let c = content();
    let mut w = WorldStore::new();
    w.spawn_character(ann(), "Ann", Point::new(0.0, 0.0), &c).unwrap();
    w.spawn_character(bo(), "Bo", Point::new(50.0, 0.0), &c).unwrap();
    w.place_item(apple(), ItemTemplateId::new("apple"), Point::new(5.0, 5.0)).unwrap();
    w.place_building(
        EntityId::building("well-1"),
        BuildingTemplateId::new("well"),
        Point::new(100.0, 0.0),
        true,
        &c,
    )
    .unwrap();
    w.place_building(
        EntityId::building("well-2"),
        BuildingTemplateId::new("well"),
        Point::new(200.0, 0.0),
        false,
        &c,
    )
    .unwrap();
    w
}

#[cfg(test)]
mod spawning {
    use super::*;
    use crate::WorldError;

    #[test]
    fn character_tracks_initial_needs() {
        let w = world();
        let level = w.need(&ann(), &NeedId::new("hunger")).unwrap();
        assert_eq!(level.value, 40.0);
        assert_eq!(level.max, 100.0);
    }

    #[test]
    fn duplicate_and_wrong_kind_rejected() {
        let mut w = world();
        assert_eq!(
            w.place_item(apple(), ItemTemplateId::new("apple"), Point::default()),
            Err(WorldError::Duplicate(apple()))
        );
        assert!(matches!(
            w.place_item(ann(), ItemTemplateId::new("apple"), Point::default()),
            Err(WorldError::WrongKind { .. })
        ));
    }

    #[test]
    fn enumeration_is_ordered() {
        let w = world();
        assert_eq!(w.characters(), vec![ann(), bo()]);
        assert_eq!(
            w.buildings_of_template(&BuildingTemplateId::new("well")),
            vec![EntityId::building("well-1"), EntityId::building("well-2")]
        );
    }
}

#[cfg(test)]
mod items {
    use super::*;

    #[test]
    fn pick_then_remove_keeps_record_in_inventory() {
        let mut w = world();
        w.transfer_item(&apple(), &ann()).unwrap();
        assert!(w.remove_entity(&apple()));
        assert!(w.entity_exists(&apple()));
        assert!(w.holds(&ann(), &apple()));
        assert!(w.items_of_template(&ItemTemplateId::new("apple")).is_empty());
        // Held items follow their holder.
        assert_eq!(w.position(&apple()), Some(Point::new(0.0, 0.0)));
        // Already off the map.
        assert!(!w.remove_entity(&apple()));
    }

    #[test]
    fn picked_item_is_only_available_to_its_holder() {
        let mut w = world();
        assert!(w.is_placed(&apple()));
        assert!(w.is_available_to(&apple(), &bo()));

        w.transfer_item(&apple(), &ann()).unwrap();
        w.remove_entity(&apple());
        assert!(!w.is_placed(&apple()));
        assert!(w.is_available_to(&apple(), &ann()));
        assert!(!w.is_available_to(&apple(), &bo()));
        // Characters stay on the map.
        assert!(w.is_placed(&bo()));
        assert!(w.is_available_to(&bo(), &ann()));
    }

    #[test]
    fn remove_held_item_is_idempotent() {
        let mut w = world();
        w.transfer_item(&apple(), &ann()).unwrap();
        w.remove_entity(&apple());
        assert!(w.remove_held_item(&ann(), &apple()));
        assert!(!w.remove_held_item(&ann(), &apple()));
        assert!(w.held_items(&ann()).is_empty());
        assert!(!w.entity_exists(&apple()));
    }

    #[test]
    fn transfer_between_characters() {
        let mut w = world();
        w.transfer_item(&apple(), &ann()).unwrap();
        w.transfer_item(&apple(), &bo()).unwrap();
        assert!(!w.holds(&ann(), &apple()));
        assert!(w.holds(&bo(), &apple()));
    }

    #[test]
    fn unowned_item_removal_drops_record() {
        let mut w = world();
        assert!(w.remove_entity(&apple()));
        assert!(!w.entity_exists(&apple()));
    }
}

#[cfg(test)]
mod reservations {
    use super::*;

    #[test]
    fn last_write_wins() {
        let mut w = world();
        w.reserve(&apple(), &ann());
        w.reserve(&apple(), &bo());
        assert_eq!(w.reserved_by(&apple()), Some(&bo()));
    }

    #[test]
    fn release_only_by_holder() {
        let mut w = world();
        w.reserve(&apple(), &ann());
        w.release(&apple(), &bo());
        assert_eq!(w.reserved_by(&apple()), Some(&ann()));
        w.release(&apple(), &ann());
        assert_eq!(w.reserved_by(&apple()), None);
    }
}

#[cfg(test)]
mod levels {
    use super::*;
    use crate::CharacterProbe;
    use hm_content::LevelProbe;

    #[test]
    fn increases_clamp() {
        let mut w = world();
        let hunger = NeedId::new("hunger");
        assert_eq!(w.increase_need(&ann(), &hunger, 500.0), Some(60.0));
        assert_eq!(w.need(&ann(), &hunger).unwrap().value, 100.0);
        assert_eq!(w.increase_need(&ann(), &NeedId::new("thirst"), 1.0), None);
    }

    #[test]
    fn decay_skips_unbuilt_buildings() {
        let c = content();
        let mut w = world();
        w.decay_levels(&c);
        let durability = ConditionId::new("durability");
        assert_eq!(w.condition(&EntityId::building("well-1"), &durability).unwrap().value, 7.0);
        assert_eq!(w.condition(&EntityId::building("well-2"), &durability).unwrap().value, 8.0);
        assert_eq!(w.need(&bo(), &NeedId::new("hunger")).unwrap().value, 38.0);
    }

    #[test]
    fn probe_reads_character_and_lowest_condition() {
        let c = content();
        let mut w = world();
        w.decay_levels(&c);
        let who = ann();
        let probe = CharacterProbe::new(&w, &who);
        assert_eq!(probe.need(&NeedId::new("hunger")), Some(38.0));
        assert_eq!(probe.lowest_condition(&ConditionId::new("durability")), Some(7.0));
    }
}
