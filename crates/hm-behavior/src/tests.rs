//! Unit and pipeline tests for hm-behavior.

use hm_content::{
    Behavior, BehaviorAction, BehaviorActionKind, BehaviorTrigger, Fulfillment, FulfillmentTarget,
    InMemoryContent, Interaction, InteractionAction, InteractionKind, InteractionSubject, Need,
    TargetSelection,
};
use hm_core::{
    BehaviorActionId, BehaviorId, BuildingTemplateId, Direction, EntityId, InteractionActionId,
    InteractionId, InteractionSource, InteractionTargetId, ItemTemplateId, NeedId, Point, Tick,
};
use hm_mobility::DirectPathfinder;
use hm_world::{WorldContext, WorldStore};

use crate::executors::{ActionExecutor, ItemUse, run_executor};
use crate::{
    BehaviorEngine, BehaviorState, ClearReason, EngineError, Flow, QueueStatus, TickContext,
    TickEvent, TickReport,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn ann() -> EntityId {
    EntityId::character("ann")
}

fn bo() -> EntityId {
    EntityId::character("bo")
}

fn hunger() -> NeedId {
    NeedId::new("hunger")
}

fn need(id: &str, initial: f64, max: f64) -> Need {
    Need {
        id:             NeedId::new(id),
        name:           id.to_owned(),
        max_value:      max,
        initial_value:  initial,
        decay_per_tick: 0.0,
    }
}

fn behavior(id: &str, priority: i32, trigger: BehaviorTrigger) -> Behavior {
    Behavior { id: BehaviorId::new(id), name: id.to_owned(), priority, trigger, character: None }
}

fn root_action(id: &str, behavior: &str, kind: BehaviorActionKind, selection: TargetSelection) -> BehaviorAction {
    BehaviorAction {
        id:             BehaviorActionId::new(id),
        behavior_id:    BehaviorId::new(behavior),
        root:           true,
        kind,
        selection,
        next_action_id: None,
    }
}

fn interaction(id: &str, kind: InteractionKind, subject: InteractionSubject) -> Interaction {
    Interaction { id: InteractionId::new(id), kind, subject }
}

fn interaction_action(id: &str, interaction: &str, duration_ticks: i64) -> InteractionAction {
    InteractionAction {
        id:             InteractionActionId::new(id),
        interaction_id: InteractionId::new(interaction),
        root:           true,
        duration_ticks,
        next_action_id: None,
    }
}

/// "eat" (hunger below 99) searches for anything that raises hunger; apples
/// do, at 5 per tick for `duration` ticks.  "wander" is the idle fallback.
fn eat_content(initial_hunger: f64, duration: i64) -> InMemoryContent {
    let mut c = InMemoryContent::new();
    c.insert_need(need("hunger", initial_hunger, 100.0));
    c.insert_behavior(behavior("wander", 0, BehaviorTrigger::Always));
    c.insert_behavior(behavior(
        "eat",
        10,
        BehaviorTrigger::NeedBelow { need: hunger(), threshold: 99.0 },
    ));
    c.insert_behavior_action(root_action(
        "wander-root",
        "wander",
        BehaviorActionKind::Idle { duration_ticks: 3 },
        TargetSelection::Search,
    ));
    c.insert_behavior_action(root_action(
        "eat-root",
        "eat",
        BehaviorActionKind::Fulfill { target: FulfillmentTarget::Need(hunger()) },
        TargetSelection::Search,
    ));
    c.insert_interaction(interaction(
        "eat-apple",
        InteractionKind::OnceItemUse,
        InteractionSubject::Item(ItemTemplateId::new("apple")),
    ));
    c.insert_interaction_action(interaction_action("eat-apple-bite", "eat-apple", duration));
    c.insert_fulfillment(Fulfillment {
        target:            FulfillmentTarget::Need(hunger()),
        interaction_id:    InteractionId::new("eat-apple"),
        increase_per_tick: 5.0,
    });
    c
}

fn apple_at(world: &mut WorldStore, id: &str, x: f32) -> EntityId {
    let apple = EntityId::item(id);
    world.place_item(apple.clone(), ItemTemplateId::new("apple"), Point::new(x, 0.0)).unwrap();
    apple
}

fn has_event(report: &TickReport, pred: impl Fn(&TickEvent) -> bool) -> bool {
    report.events.iter().any(pred)
}

fn cleared(report: &TickReport, reason: ClearReason) -> bool {
    has_event(report, |e| matches!(e, TickEvent::BehaviorCleared { reason: r, .. } if *r == reason))
}

/// Content, a world with Ann at the origin, and a default engine.
struct Fixture {
    content: InMemoryContent,
    world:   WorldStore,
    engine:  BehaviorEngine,
}

impl Fixture {
    fn new(content: InMemoryContent) -> Self {
        let mut world = WorldStore::new();
        world.spawn_character(ann(), "Ann", Point::new(0.0, 0.0), &content).unwrap();
        Self { content, world, engine: BehaviorEngine::default() }
    }

    fn tick(&mut self, state: &mut BehaviorState, tick: u64) -> TickReport {
        self.tick_as(&ann(), state, tick)
    }

    fn tick_as(&mut self, who: &EntityId, state: &mut BehaviorState, tick: u64) -> TickReport {
        self.engine
            .tick_character(state, Tick(tick), who, &self.content, &DirectPathfinder, &mut self.world)
            .unwrap()
    }

    /// Run `f` against a context for Ann and return its result plus the
    /// emitted events.
    fn with_ctx<R>(&mut self, tick: u64, f: impl FnOnce(&mut TickContext<'_>) -> R) -> (R, Vec<TickEvent>) {
        let me = ann();
        let mut ctx = TickContext {
            tick:       Tick(tick),
            character:  &me,
            content:    &self.content,
            pathfinder: &DirectPathfinder,
            config:     &self.engine.config,
            executors:  &self.engine.executors,
            world:      &mut self.world,
            events:     Vec::new(),
        };
        let out = f(&mut ctx);
        (out, ctx.events)
    }

    fn hunger(&self, who: &EntityId) -> f64 {
        self.world.need(who, &hunger()).unwrap().value
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod direction {
    use super::*;
    use crate::direction::reference_point;
    use crate::update_direction;

    const THRESHOLD: f32 = 5.0;

    #[test]
    fn vertical_first_uses_first_horizontal_point() {
        let path = [Point::new(0.0, 10.0), Point::new(20.0, 10.0), Point::new(-40.0, 10.0)];
        let origin = Point::new(0.0, 0.0);
        assert_eq!(reference_point(origin, &path), Some(Point::new(20.0, 10.0)));
        assert_eq!(update_direction(Direction::Left, origin, &path, THRESHOLD), Direction::Right);
    }

    #[test]
    fn offset_origin_starts_horizontal() {
        // The first segment runs from the origin to path[0], one pixel left.
        let path = [Point::new(0.0, 10.0), Point::new(20.0, 10.0)];
        let origin = Point::new(1.0, 0.0);
        assert_eq!(reference_point(origin, &path), Some(Point::new(0.0, 10.0)));
        assert_eq!(update_direction(Direction::Left, origin, &path, THRESHOLD), Direction::Left);
        assert_eq!(update_direction(Direction::Right, origin, &path, THRESHOLD), Direction::Right);
    }

    #[test]
    fn small_offset_keeps_facing() {
        let path = [Point::new(0.0, 10.0), Point::new(4.0, 10.0)];
        let origin = Point::new(0.0, 0.0);
        assert_eq!(update_direction(Direction::Left, origin, &path, THRESHOLD), Direction::Left);
        assert_eq!(update_direction(Direction::Right, origin, &path, THRESHOLD), Direction::Right);
    }

    #[test]
    fn reversal_uses_turning_point() {
        let path = [Point::new(30.0, 0.0), Point::new(-10.0, 0.0)];
        let origin = Point::new(0.0, 0.0);
        assert_eq!(reference_point(origin, &path), Some(Point::new(30.0, 0.0)));
        assert_eq!(update_direction(Direction::Left, origin, &path, THRESHOLD), Direction::Right);
    }

    #[test]
    fn monotone_path_uses_last_point() {
        let path = [Point::new(-3.0, 2.0), Point::new(-30.0, 8.0)];
        let origin = Point::new(0.0, 0.0);
        assert_eq!(reference_point(origin, &path), Some(Point::new(-30.0, 8.0)));
        assert_eq!(update_direction(Direction::Right, origin, &path, THRESHOLD), Direction::Left);
    }

    #[test]
    fn empty_path_keeps_facing() {
        let origin = Point::new(0.0, 0.0);
        assert_eq!(reference_point(origin, &[]), None);
        assert_eq!(update_direction(Direction::Left, origin, &[], THRESHOLD), Direction::Left);
    }
}

// ── Queue ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod queue {
    use super::*;
    use crate::InteractionQueue;
    use crate::queue::dequeue_interaction;

    fn bite(action: &str) -> InteractionTargetId {
        InteractionTargetId::new(
            InteractionSource::Item,
            InteractionId::new("eat-apple"),
            InteractionActionId::new(action),
        )
    }

    #[test]
    fn status_codes() {
        assert_eq!(QueueStatus::default(), QueueStatus::Enqueuing);
        assert_eq!(QueueStatus::ActionReady.to_string(), "action-ready");
        assert_eq!(QueueStatus::ActionCompleted.as_str(), "action-completed");
        assert!(QueueStatus::ActionRunning.is_executing());
        assert!(!QueueStatus::Completed.is_executing());
    }

    #[test]
    fn clear_returns_to_enqueuing() {
        let mut q = InteractionQueue::new();
        q.status = QueueStatus::ActionRunning;
        q.interaction_target_ids.push_back(bite("eat-apple-bite"));
        q.current_interaction_target_id = Some(bite("eat-apple-bite"));
        q.current_interaction_target_running_at_tick = Some(Tick(4));
        assert_eq!(q.elapsed(Tick(7)), Some(3));
        q.clear();
        assert_eq!(q, InteractionQueue::default());
    }

    #[test]
    fn state_clear_keeps_direction_and_returns_target() {
        let mut s = BehaviorState::new();
        s.direction = Direction::Left;
        s.target_entity_id = Some(EntityId::item("apple-1"));
        s.path = vec![Point::new(1.0, 1.0)];
        assert_eq!(s.clear(), Some(EntityId::item("apple-1")));
        assert!(s.is_idle());
        assert!(s.path.is_empty());
        assert_eq!(s.direction, Direction::Left);
    }

    #[test]
    fn completed_action_chains_to_its_next_action() {
        let mut content = eat_content(20.0, 1);
        let mut first = interaction_action("eat-apple-bite", "eat-apple", 1);
        first.next_action_id = Some(InteractionActionId::new("eat-apple-chew"));
        content.insert_interaction_action(first);
        let mut chew = interaction_action("eat-apple-chew", "eat-apple", 2);
        chew.root = false;
        content.insert_interaction_action(chew);
        let mut fx = Fixture::new(content);

        let mut state = BehaviorState::new();
        state.interaction_queue.status = QueueStatus::ActionCompleted;
        state.interaction_queue.current_interaction_target_id = Some(bite("eat-apple-bite"));
        state.interaction_queue.current_interaction_target_running_at_tick = Some(Tick(0));

        let (flow, _) = fx.with_ctx(2, |ctx| dequeue_interaction(&mut state, ctx).unwrap());
        assert_eq!(flow, Flow::Continue);
        let q = &state.interaction_queue;
        assert_eq!(q.status, QueueStatus::ActionReady);
        assert_eq!(q.current_interaction_target_id, Some(bite("eat-apple-chew")));
        assert_eq!(q.current_interaction_target_running_at_tick, None);

        // The chained action finishing empties the queue.
        state.interaction_queue.status = QueueStatus::ActionCompleted;
        fx.with_ctx(3, |ctx| dequeue_interaction(&mut state, ctx).unwrap());
        assert_eq!(state.interaction_queue.status, QueueStatus::Completed);
        assert_eq!(state.interaction_queue.current_interaction_target_id, None);
    }
}

// ── Selector ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod selector {
    use super::*;
    use crate::select::find_behavior_target;

    #[test]
    fn picks_highest_priority_and_caches_list() {
        let mut fx = Fixture::new(eat_content(20.0, 1));
        let mut state = BehaviorState::new();
        let (flow, events) = fx.with_ctx(3, |ctx| find_behavior_target(&mut state, ctx).unwrap());
        assert_eq!(flow, Flow::Continue);
        let target = state.behavior_target_id.clone().unwrap();
        assert_eq!(target.behavior, BehaviorId::new("eat"));
        assert_eq!(target.action, BehaviorActionId::new("eat-root"));
        assert_eq!(state.behavior_target_start_tick, Some(Tick(3)));
        assert_eq!(state.behavior_ids, vec![BehaviorId::new("eat"), BehaviorId::new("wander")]);
        assert_eq!(events, vec![TickEvent::BehaviorSelected { behavior: target }]);
    }

    #[test]
    fn active_target_is_never_replaced() {
        let mut fx = Fixture::new(eat_content(20.0, 1));
        let mut state = BehaviorState::new();
        fx.with_ctx(1, |ctx| find_behavior_target(&mut state, ctx).unwrap());
        let before = state.behavior_target_id.clone();

        let (flow, events) = fx.with_ctx(9, |ctx| find_behavior_target(&mut state, ctx).unwrap());
        assert_eq!(flow, Flow::Continue);
        assert!(events.is_empty());
        assert_eq!(state.behavior_target_id, before);
        assert_eq!(state.behavior_target_start_tick, Some(Tick(1)));
    }

    #[test]
    fn nothing_eligible_restarts_without_resolving_roots() {
        let mut content = InMemoryContent::new();
        content.insert_need(need("hunger", 80.0, 100.0));
        // No root action on purpose: it must never be looked up.
        content.insert_behavior(behavior(
            "eat",
            10,
            BehaviorTrigger::NeedBelow { need: hunger(), threshold: 50.0 },
        ));
        let mut fx = Fixture::new(content);
        let mut state = BehaviorState::new();
        let (flow, events) = fx.with_ctx(0, |ctx| find_behavior_target(&mut state, ctx).unwrap());
        assert_eq!(flow, Flow::Restart);
        assert!(events.is_empty());
        assert!(state.is_idle());
        assert!(state.behavior_ids.is_empty());
    }

    #[test]
    fn missing_root_is_a_content_fault() {
        let mut content = InMemoryContent::new();
        content.insert_behavior(behavior("loiter", 0, BehaviorTrigger::Always));
        let mut fx = Fixture::new(content);
        let mut state = BehaviorState::new();
        let (result, _) = fx.with_ctx(0, |ctx| find_behavior_target(&mut state, ctx));
        assert_eq!(
            result,
            Err(EngineError::UnresolvedRootAction { behavior: BehaviorId::new("loiter") })
        );
    }
}

// ── Acquisition ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod acquisition {
    use super::*;

    #[test]
    fn nearest_candidate_wins_and_is_reserved() {
        let mut fx = Fixture::new(eat_content(20.0, 1));
        apple_at(&mut fx.world, "apple-far", 80.0);
        let near = apple_at(&mut fx.world, "apple-near", -40.0);
        let mut state = BehaviorState::new();

        let report = fx.tick(&mut state, 0);
        assert_eq!(state.target_entity_id, Some(near.clone()));
        assert_eq!(fx.world.reserved_by(&near), Some(&ann()));
        assert_eq!(state.path, vec![Point::new(-40.0, 0.0)]);
        assert_eq!(state.direction, Direction::Left);
        assert!(has_event(&report, |e| matches!(e, TickEvent::TargetAcquired { entity, .. } if *entity == near)));
    }

    #[test]
    fn ties_keep_enumeration_order() {
        let mut fx = Fixture::new(eat_content(20.0, 1));
        let a = apple_at(&mut fx.world, "apple-a", 30.0);
        apple_at(&mut fx.world, "apple-b", -30.0);
        let mut state = BehaviorState::new();
        fx.tick(&mut state, 0);
        assert_eq!(state.target_entity_id, Some(a));
    }

    #[test]
    fn items_reserved_by_others_are_skipped() {
        let mut fx = Fixture::new(eat_content(20.0, 1));
        let a = apple_at(&mut fx.world, "apple-a", 30.0);
        let b = apple_at(&mut fx.world, "apple-b", 60.0);
        fx.world.reserve(&a, &bo());
        let mut state = BehaviorState::new();
        fx.tick(&mut state, 0);
        assert_eq!(state.target_entity_id, Some(b));
    }

    #[test]
    fn held_item_counts_as_distance_zero() {
        let mut fx = Fixture::new(eat_content(20.0, 1));
        apple_at(&mut fx.world, "apple-a", 12.0);
        let pocket = apple_at(&mut fx.world, "apple-pocket", 500.0);
        fx.world.transfer_item(&pocket, &ann()).unwrap();
        let mut state = BehaviorState::new();
        fx.tick(&mut state, 0);
        assert_eq!(state.target_entity_id, Some(pocket.clone()));
        assert!(state.path.is_empty());
        // Held already, so no pick step in front of the use.
        let current = state.interaction_queue.current_interaction_target_id.clone().unwrap();
        assert_eq!(current.interaction, InteractionId::new("eat-apple"));
    }

    #[test]
    fn no_candidate_clears_and_restarts() {
        let mut fx = Fixture::new(eat_content(20.0, 1));
        let mut state = BehaviorState::new();
        let report = fx.tick(&mut state, 0);
        assert_eq!(report.flow, Flow::Restart);
        assert!(state.is_idle());
        assert!(cleared(&report, ClearReason::NoCandidate));
    }

    #[test]
    fn vanished_target_clears_and_restarts() {
        let mut fx = Fixture::new(eat_content(20.0, 1));
        let apple = apple_at(&mut fx.world, "apple-1", 200.0);
        let mut state = BehaviorState::new();
        fx.tick(&mut state, 0);
        assert_eq!(state.target_entity_id, Some(apple.clone()));
        assert_eq!(state.interaction_queue.status, QueueStatus::ActionReady);

        fx.world.remove_entity(&apple);
        let report = fx.tick(&mut state, 1);
        assert_eq!(report.flow, Flow::Restart);
        assert!(state.is_idle());
        assert!(has_event(&report, |e| *e == TickEvent::TargetLost { entity: apple.clone() }));
        assert!(cleared(&report, ClearReason::TargetVanished));
    }

    #[test]
    fn item_in_another_inventory_is_gone() {
        let mut fx = Fixture::new(eat_content(20.0, 1));
        let apple = apple_at(&mut fx.world, "apple-1", 200.0);
        let mut state = BehaviorState::new();
        fx.tick(&mut state, 0);
        assert_eq!(state.target_entity_id, Some(apple.clone()));

        fx.world.spawn_character(bo(), "Bo", Point::new(200.0, 0.0), &fx.content).unwrap();
        fx.world.transfer_item(&apple, &bo()).unwrap();
        fx.world.remove_entity(&apple);
        let report = fx.tick(&mut state, 1);
        assert_eq!(report.flow, Flow::Restart);
        assert!(cleared(&report, ClearReason::TargetVanished));
        assert!(fx.world.holds(&bo(), &apple));
    }

    #[test]
    fn arrival_clears_path() {
        let mut fx = Fixture::new(eat_content(20.0, 1));
        let apple = apple_at(&mut fx.world, "apple-1", 100.0);
        let mut state = BehaviorState::new();
        fx.tick(&mut state, 0);
        assert_eq!(state.path, vec![Point::new(100.0, 0.0)]);

        fx.world.set_position(&ann(), Point::new(92.0, 0.0)).unwrap();
        fx.tick(&mut state, 1);
        assert!(state.path.is_empty());
        assert_eq!(state.target_entity_id, Some(apple));
    }
}

// ── Executors ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod executors {
    use super::*;

    fn build_content(house_constructed_target: bool) -> InMemoryContent {
        let mut c = InMemoryContent::new();
        let selection = if house_constructed_target {
            TargetSelection::Explicit {
                entity:      EntityId::building("house-1"),
                interaction: InteractionId::new("build-house"),
            }
        } else {
            TargetSelection::Search
        };
        c.insert_behavior(behavior("build", 5, BehaviorTrigger::Always));
        c.insert_behavior_action(root_action(
            "build-root",
            "build",
            BehaviorActionKind::Interact { interaction: InteractionId::new("build-house") },
            selection,
        ));
        c.insert_interaction(interaction(
            "build-house",
            InteractionKind::OnceBuildingConstruct,
            InteractionSubject::Building(BuildingTemplateId::new("house")),
        ));
        c.insert_interaction_action(interaction_action("build-house-work", "build-house", 2));
        c
    }

    fn place_house(fx: &mut Fixture, id: &str, x: f32, constructed: bool) -> EntityId {
        let house = EntityId::building(id);
        fx.world
            .place_building(house.clone(), BuildingTemplateId::new("house"), Point::new(x, 0.0), constructed, &fx.content)
            .unwrap();
        house
    }

    /// Tick from `from` until the queue reports `ActionCompleted`; return
    /// that tick.
    fn completion_tick(fx: &mut Fixture, state: &mut BehaviorState, from: u64, limit: u64) -> u64 {
        for t in from..limit {
            fx.tick(state, t);
            if state.interaction_queue.status == QueueStatus::ActionCompleted {
                return t;
            }
        }
        panic!("action did not complete within {limit} ticks");
    }

    #[test]
    fn zero_duration_runs_like_one() {
        let mut results = Vec::new();
        for duration in [0, 1] {
            let mut fx = Fixture::new(eat_content(20.0, duration));
            apple_at(&mut fx.world, "apple-1", 5.0);
            let mut state = BehaviorState::new();
            fx.tick(&mut state, 0); // pick starts
            fx.tick(&mut state, 1); // pick completes
            let done = completion_tick(&mut fx, &mut state, 2, 10);
            results.push((done, fx.hunger(&ann())));
        }
        assert_eq!(results[0], results[1]);
        assert_eq!(results[0], (3, 25.0));
    }

    #[test]
    fn increases_clamp_at_max() {
        let mut fx = Fixture::new(eat_content(92.0, 3));
        let apple = apple_at(&mut fx.world, "apple-1", 5.0);
        fx.world.transfer_item(&apple, &ann()).unwrap();
        let mut state = BehaviorState::new();

        fx.tick(&mut state, 0); // use starts
        fx.tick(&mut state, 1);
        assert_eq!(fx.hunger(&ann()), 97.0);
        let report = fx.tick(&mut state, 2);
        assert_eq!(fx.hunger(&ann()), 100.0);
        assert!(has_event(&report, |e| matches!(e, TickEvent::LevelIncreased { delta, .. } if *delta == 3.0)));
        // once:item_use never finishes early.
        assert_eq!(state.interaction_queue.status, QueueStatus::ActionRunning);
        fx.tick(&mut state, 3);
        assert_eq!(fx.hunger(&ann()), 100.0);
        assert_eq!(state.interaction_queue.status, QueueStatus::ActionCompleted);
    }

    #[test]
    fn item_use_completion_is_idempotent() {
        let mut fx = Fixture::new(eat_content(20.0, 1));
        let apple = apple_at(&mut fx.world, "apple-1", 5.0);
        fx.world.transfer_item(&apple, &ann()).unwrap();

        let (_, first) = fx.with_ctx(0, |ctx| ItemUse.complete(ctx, &apple).unwrap());
        assert_eq!(first, vec![TickEvent::EntityRemoved { entity: apple.clone() }]);
        let (_, second) = fx.with_ctx(1, |ctx| ItemUse.complete(ctx, &apple).unwrap());
        assert!(second.is_empty());
        assert!(!fx.world.holds(&ann(), &apple));
        assert!(!fx.world.entity_exists(&apple));
    }

    #[test]
    fn mismatched_kind_is_a_no_op() {
        let mut fx = Fixture::new(eat_content(20.0, 1));
        let apple = apple_at(&mut fx.world, "apple-1", 5.0);
        let mut state = BehaviorState::new();
        fx.tick(&mut state, 0);
        // The head is the synthetic pick step, now running.
        assert_eq!(state.interaction_queue.status, QueueStatus::ActionRunning);
        let before = state.clone();

        let (flow, events) = fx.with_ctx(5, |ctx| run_executor(&ItemUse, &mut state, ctx).unwrap());
        assert_eq!(flow, Flow::Continue);
        assert!(events.is_empty());
        assert_eq!(state, before);
        assert!(!fx.world.holds(&ann(), &apple));
    }

    #[test]
    fn pick_waits_until_within_reach() {
        let mut fx = Fixture::new(eat_content(20.0, 1));
        apple_at(&mut fx.world, "apple-1", 60.0);
        let mut state = BehaviorState::new();
        fx.tick(&mut state, 0);
        assert_eq!(state.interaction_queue.status, QueueStatus::ActionReady);

        fx.world.set_position(&ann(), Point::new(52.0, 0.0)).unwrap();
        let report = fx.tick(&mut state, 1);
        assert_eq!(state.interaction_queue.status, QueueStatus::ActionRunning);
        assert!(has_event(&report, |e| matches!(e, TickEvent::ActionStarted { .. })));
    }

    #[test]
    fn construct_finishes_site_then_finds_nothing() {
        let mut fx = Fixture::new(build_content(false));
        place_house(&mut fx, "house-0", 1.0, true);
        let site = place_house(&mut fx, "house-1", 3.0, false);
        let mut state = BehaviorState::new();

        fx.tick(&mut state, 0);
        assert_eq!(state.target_entity_id, Some(site.clone()));
        fx.tick(&mut state, 1);
        assert_eq!(fx.world.is_constructed(&site), Some(false));
        let report = fx.tick(&mut state, 2);
        assert_eq!(fx.world.is_constructed(&site), Some(true));
        assert!(has_event(&report, |e| *e == TickEvent::BuildingConstructed { building: site.clone() }));

        let report = fx.tick(&mut state, 3);
        assert!(cleared(&report, ClearReason::Finished));
        assert!(state.is_idle());

        let report = fx.tick(&mut state, 4);
        assert_eq!(report.flow, Flow::Restart);
        assert!(cleared(&report, ClearReason::NoCandidate));
    }

    #[test]
    fn constructing_a_finished_building_never_starts() {
        let mut fx = Fixture::new(build_content(true));
        place_house(&mut fx, "house-1", 3.0, true);
        let mut state = BehaviorState::new();
        let report = fx.tick(&mut state, 0);
        assert_eq!(report.flow, Flow::Restart);
        assert!(cleared(&report, ClearReason::TargetUnusable));
        assert!(state.is_idle());
        assert_eq!(fx.world.reserved_by(&EntityId::building("house-1")), None);
    }

    #[test]
    fn hug_raises_both_and_finishes_when_full() {
        let social = NeedId::new("social");
        let mut c = InMemoryContent::new();
        c.insert_need(need("social", 0.0, 10.0));
        c.insert_behavior(behavior("hug", 1, BehaviorTrigger::Always));
        c.insert_behavior_action(root_action(
            "hug-root",
            "hug",
            BehaviorActionKind::Fulfill { target: FulfillmentTarget::Need(social.clone()) },
            TargetSelection::Search,
        ));
        c.insert_interaction(interaction("hug", InteractionKind::FulfillCharacterHug, InteractionSubject::Character));
        c.insert_interaction_action(interaction_action("hug-hold", "hug", 10));
        c.insert_fulfillment(Fulfillment {
            target:            FulfillmentTarget::Need(social.clone()),
            interaction_id:    InteractionId::new("hug"),
            increase_per_tick: 4.0,
        });
        let mut fx = Fixture::new(c);
        fx.world.spawn_character(bo(), "Bo", Point::new(5.0, 0.0), &fx.content).unwrap();
        let mut state = BehaviorState::new();

        fx.tick(&mut state, 0);
        assert_eq!(state.target_entity_id, Some(bo()));
        fx.tick(&mut state, 1);
        fx.tick(&mut state, 2);
        assert_eq!(state.interaction_queue.status, QueueStatus::ActionRunning);
        fx.tick(&mut state, 3);
        assert_eq!(state.interaction_queue.status, QueueStatus::ActionCompleted);
        for who in [ann(), bo()] {
            assert_eq!(fx.world.need(&who, &social).unwrap().value, 10.0);
        }
    }
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod pipeline {
    use super::*;
    use hm_content::{ITEM_PICK_ACTION, ITEM_PICK_INTERACTION};

    fn pick_step() -> InteractionTargetId {
        InteractionTargetId::new(
            InteractionSource::System,
            InteractionId::new(ITEM_PICK_INTERACTION),
            InteractionActionId::new(ITEM_PICK_ACTION),
        )
    }

    fn use_step() -> InteractionTargetId {
        InteractionTargetId::new(
            InteractionSource::Item,
            InteractionId::new("eat-apple"),
            InteractionActionId::new("eat-apple-bite"),
        )
    }

    #[test]
    fn eat_apple_end_to_end() {
        let mut fx = Fixture::new(eat_content(20.0, 3));
        let apple = apple_at(&mut fx.world, "apple-1", 5.0);
        let spare = apple_at(&mut fx.world, "apple-2", 50.0);
        let mut state = BehaviorState::new();

        // T0: select, acquire, enqueue pick + use, start the pick.
        let report = fx.tick(&mut state, 0);
        assert_eq!(report.flow, Flow::Continue);
        assert_eq!(state.target_entity_id, Some(apple.clone()));
        let q = &state.interaction_queue;
        assert_eq!(q.current_interaction_target_id, Some(pick_step()));
        assert_eq!(q.interaction_target_ids.iter().cloned().collect::<Vec<_>>(), vec![use_step()]);
        assert_eq!(q.status, QueueStatus::ActionRunning);

        // T1: the pick completes; the apple is in hand and off the map.
        let report = fx.tick(&mut state, 1);
        assert!(has_event(&report, |e| *e == TickEvent::ItemTransferred { item: apple.clone(), to: ann() }));
        assert!(fx.world.holds(&ann(), &apple));
        assert_eq!(fx.world.items_of_template(&ItemTemplateId::new("apple")), vec![spare.clone()]);
        assert_eq!(fx.hunger(&ann()), 20.0);

        // T2: the use step is loaded and starts.
        fx.tick(&mut state, 2);
        assert_eq!(state.interaction_queue.current_interaction_target_id, Some(use_step()));
        assert_eq!(state.interaction_queue.status, QueueStatus::ActionRunning);

        // T3..T5: +5 per tick, completion on the third.
        fx.tick(&mut state, 3);
        fx.tick(&mut state, 4);
        assert_eq!(state.interaction_queue.status, QueueStatus::ActionRunning);
        fx.tick(&mut state, 5);
        assert_eq!(fx.hunger(&ann()), 35.0);
        assert_eq!(state.interaction_queue.status, QueueStatus::ActionCompleted);
        assert!(!fx.world.entity_exists(&apple));

        // T6: queue empties and the behavior clears.
        let report = fx.tick(&mut state, 6);
        assert!(cleared(&report, ClearReason::Finished));
        assert!(state.is_idle());

        // T7: still hungry, so the spare apple is next.
        fx.tick(&mut state, 7);
        assert_eq!(state.target_entity_id, Some(spare));
    }

    #[test]
    fn explicit_race_leaves_the_first_picker_holding() {
        let mut c = eat_content(20.0, 3);
        c.insert_behavior_action(root_action(
            "eat-root",
            "eat",
            BehaviorActionKind::Fulfill { target: FulfillmentTarget::Need(hunger()) },
            TargetSelection::Explicit {
                entity:      EntityId::item("apple-1"),
                interaction: InteractionId::new("eat-apple"),
            },
        ));
        let mut fx = Fixture::new(c);
        fx.world.spawn_character(bo(), "Bo", Point::new(0.0, 0.0), &fx.content).unwrap();
        let apple = apple_at(&mut fx.world, "apple-1", 5.0);
        let (mut ann_state, mut bo_state) = (BehaviorState::new(), BehaviorState::new());

        // T0: both reach for the same apple.
        fx.tick(&mut ann_state, 0);
        fx.tick_as(&bo(), &mut bo_state, 0);
        assert_eq!(ann_state.interaction_queue.current_interaction_target_id, Some(pick_step()));
        assert_eq!(bo_state.interaction_queue.current_interaction_target_id, Some(pick_step()));

        // T1: Ann's pick lands first; Bo finds the apple gone.
        fx.tick(&mut ann_state, 1);
        let report = fx.tick_as(&bo(), &mut bo_state, 1);
        assert!(fx.world.holds(&ann(), &apple));
        assert!(!fx.world.holds(&bo(), &apple));
        assert!(cleared(&report, ClearReason::TargetVanished));
        assert!(!has_event(&report, |e| matches!(e, TickEvent::ItemTransferred { .. })));
        assert!(bo_state.is_idle());

        // T2: Bo cannot re-target it; Ann starts eating.
        let report = fx.tick_as(&bo(), &mut bo_state, 2);
        fx.tick(&mut ann_state, 2);
        assert!(cleared(&report, ClearReason::TargetVanished));
        assert!(fx.world.holds(&ann(), &apple));
        assert_eq!(ann_state.interaction_queue.current_interaction_target_id, Some(use_step()));
        assert_eq!(ann_state.interaction_queue.status, QueueStatus::ActionRunning);
    }

    #[test]
    fn idle_behavior_chains_then_clears() {
        let mut c = InMemoryContent::new();
        c.insert_behavior(behavior("chores", 0, BehaviorTrigger::Always));
        let mut first = root_action(
            "chores-stand",
            "chores",
            BehaviorActionKind::Idle { duration_ticks: 2 },
            TargetSelection::Search,
        );
        first.next_action_id = Some(BehaviorActionId::new("chores-rest"));
        c.insert_behavior_action(first);
        let mut rest = root_action(
            "chores-rest",
            "chores",
            BehaviorActionKind::Idle { duration_ticks: 1 },
            TargetSelection::Search,
        );
        rest.root = false;
        c.insert_behavior_action(rest);
        let mut fx = Fixture::new(c);
        let mut state = BehaviorState::new();

        assert_eq!(fx.tick(&mut state, 0).flow, Flow::Restart);
        assert_eq!(fx.tick(&mut state, 1).flow, Flow::Restart);
        let report = fx.tick(&mut state, 2);
        assert_eq!(report.flow, Flow::Continue);
        assert!(has_event(&report, |e| matches!(e, TickEvent::BehaviorAdvanced { .. })));
        let current = state.behavior_target_id.clone().unwrap();
        assert_eq!(current.action, BehaviorActionId::new("chores-rest"));
        assert_eq!(state.behavior_target_start_tick, Some(Tick(2)));
        assert_eq!(state.interaction_queue.status, QueueStatus::Enqueuing);

        let report = fx.tick(&mut state, 3);
        assert!(cleared(&report, ClearReason::Finished));
        assert!(state.is_idle());
    }

    #[test]
    fn default_table_covers_every_kind() {
        let engine = BehaviorEngine::default();
        assert_eq!(engine.executors.len(), InteractionKind::ALL.len());
        for kind in InteractionKind::ALL {
            assert_eq!(engine.executors.get(kind).map(|e| e.kind()), Some(kind));
        }
    }
}
