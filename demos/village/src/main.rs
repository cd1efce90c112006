//! village — a small hamlet run.
//!
//! Four villagers share two houses, a handful of apples and each other's
//! company.  Hunger and loneliness decay every tick; houses get dirty.  The
//! behavior engine picks the most urgent need, walks each villager to the
//! nearest apple, dirty house or neighbour, and runs the interaction.
//!
//! ```text
//! cargo run -p village -- [run.toml] [output-dir]
//! RUST_LOG=hm_sim=debug cargo run -p village
//! ```

use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use hm_behavior::TickEvent;
use hm_content::{ContentTables, load_content};
use hm_core::{
    BuildingTemplateId, DiceCheck, DiceOutcome, EntityId, ItemTemplateId, Point, SimConfig, Tick,
};
use hm_mobility::LPathfinder;
use hm_output::{CsvWriter, OutputWriter, SimOutputObserver};
use hm_sim::{RunConfig, SimBuilder, SimObserver};
use hm_world::WorldStore;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:                  u64 = 42;
const TOTAL_TICKS:           u64 = 600;
const OUTPUT_INTERVAL_TICKS: u64 = 10;
const DEFAULT_OUTPUT_DIR:    &str = "output/village";

// ── Content tables ────────────────────────────────────────────────────────────

const NEEDS_CSV: &str = "\
id,name,max_value,initial_value,decay_per_tick
hunger,Hunger,100,45,0.25
social,Social,100,70,0.15
";

const CONDITIONS_CSV: &str = "\
id,name,max_value,initial_value,decay_per_tick
cleanliness,Cleanliness,100,60,0.1
";

// Ties on priority fall back to row order.
const BEHAVIORS_CSV: &str = "\
id,name,priority,trigger,subject_id,threshold,character_id
eat,Eat,30,need_below,hunger,40,
visit,Visit a neighbour,20,need_below,social,50,
tidy,Tidy up,10,condition_below,cleanliness,40,
loiter,Loiter,0,always,,,
";

const BEHAVIOR_ACTIONS_CSV: &str = "\
id,behavior_id,root,kind,duration_ticks,fulfill_kind,subject_id,interaction_id,selection,target_entity_id,next_action_id
find-food,eat,true,fulfill,,need,hunger,,search,,rest-after-meal
rest-after-meal,eat,false,idle,5,,,,search,,
find-company,visit,true,fulfill,,need,social,,search,,
find-mess,tidy,true,fulfill,,condition,cleanliness,,search,,
stand-around,loiter,true,idle,20,,,,search,,
";

const INTERACTIONS_CSV: &str = "\
id,kind,subject_type,subject_template
eat-apple,once:item_use,item,apple
hug,fulfill:character_hug,character,
sweep-house,fulfill:building_clean,building,house
";

const INTERACTION_ACTIONS_CSV: &str = "\
id,interaction_id,root,duration_ticks,next_action_id
eat-apple-bite,eat-apple,true,4,
hug-embrace,hug,true,6,
sweep-house-floor,sweep-house,true,10,
";

const FULFILLMENTS_CSV: &str = "\
kind,subject_id,interaction_id,increase_per_tick
need,hunger,eat-apple,8
need,social,hug,5
condition,cleanliness,sweep-house,6
";

// ── Observer wrapper to tally events ──────────────────────────────────────────

fn event_name(event: &TickEvent) -> &'static str {
    match event {
        TickEvent::BehaviorSelected { .. }    => "behavior selected",
        TickEvent::BehaviorAdvanced { .. }    => "behavior advanced",
        TickEvent::BehaviorCleared { .. }     => "behavior cleared",
        TickEvent::TargetAcquired { .. }      => "target acquired",
        TickEvent::TargetLost { .. }          => "target lost",
        TickEvent::ActionStarted { .. }       => "action started",
        TickEvent::ActionCompleted { .. }     => "action completed",
        TickEvent::ItemTransferred { .. }     => "item transferred",
        TickEvent::EntityRemoved { .. }       => "entity removed",
        TickEvent::LevelIncreased { .. }      => "level increased",
        TickEvent::BuildingConstructed { .. } => "building constructed",
    }
}

struct TallyObserver<W: OutputWriter> {
    inner:     SimOutputObserver<W>,
    tally:     BTreeMap<&'static str, usize>,
    snapshots: usize,
}

impl<W: OutputWriter> TallyObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, tally: BTreeMap::new(), snapshots: 0 }
    }
}

impl<W: OutputWriter> SimObserver for TallyObserver<W> {
    fn on_tick_start(&mut self, tick: Tick) {
        self.inner.on_tick_start(tick);
    }

    fn on_character_events(&mut self, tick: Tick, character: &EntityId, events: &[TickEvent]) {
        for event in events {
            *self.tally.entry(event_name(event)).or_default() += 1;
        }
        self.inner.on_character_events(tick, character, events);
    }

    fn on_tick_end(&mut self, tick: Tick, processed: usize) {
        self.inner.on_tick_end(tick, processed);
    }

    fn on_snapshot(
        &mut self,
        tick:   Tick,
        states: &BTreeMap<EntityId, hm_behavior::BehaviorState>,
        world:  &WorldStore,
    ) {
        self.snapshots += 1;
        self.inner.on_snapshot(tick, states, world);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn run_config(path: Option<&Path>) -> Result<RunConfig> {
    match path {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("loading run config {}", path.display())),
        None => Ok(RunConfig {
            sim: SimConfig {
                total_ticks:           TOTAL_TICKS,
                seed:                  SEED,
                tick_duration_ms:      100,
                output_interval_ticks: OUTPUT_INTERVAL_TICKS,
            },
            ..RunConfig::default()
        }),
    }
}

fn build_world(content: &hm_content::InMemoryContent) -> Result<WorldStore> {
    let mut world = WorldStore::new();

    for (name, x, y) in [("ann", 0.0, 0.0), ("bo", 120.0, 0.0), ("cy", 0.0, 90.0), ("di", 160.0, 140.0)] {
        world.spawn_character(EntityId::character(name), name, Point::new(x, y), content)?;
    }

    let house = BuildingTemplateId::new("house");
    world.place_building(EntityId::building("north-house"), house.clone(), Point::new(40.0, 20.0), true, content)?;
    world.place_building(EntityId::building("south-house"), house, Point::new(140.0, 160.0), true, content)?;

    let apple = ItemTemplateId::new("apple");
    for i in 0..8u8 {
        let pos = Point::new(60.0 + 15.0 * f32::from(i), 60.0 + 5.0 * f32::from(i % 3));
        world.place_item(EntityId::item(format!("apple-{i}")), apple.clone(), pos)?;
    }
    Ok(world)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let output_dir = args.next().map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR), PathBuf::from);

    // 1. Content.
    let content = load_content(ContentTables {
        needs:               Cursor::new(NEEDS_CSV.as_bytes()),
        conditions:          Cursor::new(CONDITIONS_CSV.as_bytes()),
        behaviors:           Cursor::new(BEHAVIORS_CSV.as_bytes()),
        behavior_actions:    Cursor::new(BEHAVIOR_ACTIONS_CSV.as_bytes()),
        interactions:        Cursor::new(INTERACTIONS_CSV.as_bytes()),
        interaction_actions: Cursor::new(INTERACTION_ACTIONS_CSV.as_bytes()),
        fulfillments:        Cursor::new(FULFILLMENTS_CSV.as_bytes()),
    })?;

    // 2. World and config.
    let world = build_world(&content)?;
    let config = run_config(config_path.as_deref())?;
    info!(
        ticks    = config.sim.total_ticks,
        seed     = config.sim.seed,
        interval = config.sim.output_interval_ticks,
        "run configured"
    );

    // 3. Sim.
    let mut sim = SimBuilder::new(config.clone(), content, LPathfinder)
        .world(world)
        .build()?;

    // 4. Output.
    std::fs::create_dir_all(&output_dir)?;
    let writer = CsvWriter::new(&output_dir)?;
    let mut obs = TallyObserver::new(SimOutputObserver::new(writer, &config.sim));

    // 5. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        warn!(error = %e, "trace output incomplete");
    }

    // 6. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  snapshots written : {}  ({})", obs.snapshots, output_dir.display());
    for (name, count) in &obs.tally {
        println!("  {name:<22}: {count}");
    }
    println!();

    println!("{:<10} {:>8} {:>8} {:>6}  {}", "Villager", "Hunger", "Social", "Held", "Behavior");
    println!("{}", "-".repeat(56));
    for (id, state) in &sim.states {
        let Some(character) = sim.world.character(id) else { continue };
        let level = |need: &str| {
            character
                .needs
                .iter()
                .find(|(k, _)| k.as_str() == need)
                .map_or(0.0, |(_, l)| l.value)
        };
        println!(
            "{:<10} {:>8.1} {:>8.1} {:>6}  {}",
            character.name,
            level("hunger"),
            level("social"),
            character.held_item_ids.len(),
            state.behavior_target_id.as_ref().map_or("-".to_owned(), |b| b.behavior.to_string()),
        );
    }
    for id in [EntityId::building("north-house"), EntityId::building("south-house")] {
        if let Some(house) = sim.world.building(&id) {
            for (condition, level) in house.conditions.iter() {
                println!("{:<10} {condition} {:.1}", id.uuid, level.value);
            }
        }
    }
    println!();

    // 7. A content-level dice check.
    let baker = EntityId::character("ann");
    match sim.dice_check(&baker, DiceCheck::d20(12)) {
        Some(DiceOutcome::Success) => println!("ann bakes a loaf of bread (d20 vs 12: success)"),
        Some(DiceOutcome::Failure) => println!("ann burns the bread (d20 vs 12: failure)"),
        None => warn!(character = %baker, "no such villager"),
    }

    Ok(())
}
