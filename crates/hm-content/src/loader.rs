//! CSV content loader.
//!
//! # Tables
//!
//! Content is authored as seven CSV tables, one row per record.  Empty
//! cells are read as "absent" for optional columns.
//!
//! ```csv
//! # needs.csv / conditions.csv
//! id,name,max_value,initial_value,decay_per_tick
//! hunger,Hunger,100,80,0.5
//!
//! # behaviors.csv   (trigger: always | need_below | condition_below)
//! id,name,priority,trigger,subject_id,threshold,character_id
//! eat,Eat,10,need_below,hunger,50,
//!
//! # behavior_actions.csv   (kind: idle | fulfill | interact,
//! #                         selection: search | explicit)
//! id,behavior_id,root,kind,duration_ticks,fulfill_kind,subject_id,interaction_id,selection,target_entity_id,next_action_id
//! find-food,eat,true,fulfill,,need,hunger,,search,,
//!
//! # interactions.csv   (subject_type: item | building | character | system)
//! id,kind,subject_type,subject_template
//! eat-apple,once:item_use,item,apple
//!
//! # interaction_actions.csv
//! id,interaction_id,root,duration_ticks,next_action_id
//! eat-apple-bite,eat-apple,true,3,
//!
//! # fulfillments.csv
//! kind,subject_id,interaction_id,increase_per_tick
//! need,hunger,eat-apple,5
//! ```
//!
//! After loading, [`InMemoryContent::validate`] checks every cross-table
//! reference.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use hm_core::{
    BehaviorActionId, BehaviorId, BuildingTemplateId, ConditionId, EntityId, FulfillmentKind,
    InteractionActionId, InteractionId, ItemTemplateId, NeedId,
};

use crate::model::{
    Behavior, BehaviorAction, BehaviorActionKind, BehaviorTrigger, Condition, Fulfillment,
    FulfillmentTarget, Interaction, InteractionAction, InteractionSubject, Need, TargetSelection,
};
use crate::{ContentError, ContentRepository, ContentResult, InMemoryContent};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct LevelRecord {
    id:             String,
    name:           String,
    max_value:      f64,
    initial_value:  f64,
    decay_per_tick: Option<f64>,
}

#[derive(Deserialize)]
struct BehaviorRecord {
    id:           String,
    name:         String,
    priority:     i32,
    trigger:      String,
    subject_id:   Option<String>,
    threshold:    Option<f64>,
    character_id: Option<String>,
}

#[derive(Deserialize)]
struct BehaviorActionRecord {
    id:               String,
    behavior_id:      String,
    root:             bool,
    kind:             String,
    duration_ticks:   Option<u64>,
    fulfill_kind:     Option<String>,
    subject_id:       Option<String>,
    interaction_id:   Option<String>,
    selection:        String,
    target_entity_id: Option<String>,
    next_action_id:   Option<String>,
}

#[derive(Deserialize)]
struct InteractionRecord {
    id:               String,
    kind:             String,
    subject_type:     String,
    subject_template: Option<String>,
}

#[derive(Deserialize)]
struct InteractionActionRecord {
    id:             String,
    interaction_id: String,
    root:           bool,
    duration_ticks: i64,
    next_action_id: Option<String>,
}

#[derive(Deserialize)]
struct FulfillmentRecord {
    kind:              String,
    subject_id:        String,
    interaction_id:    String,
    increase_per_tick: f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// One reader per content table.
pub struct ContentTables<R: Read> {
    pub needs:               R,
    pub conditions:          R,
    pub behaviors:           R,
    pub behavior_actions:    R,
    pub interactions:        R,
    pub interaction_actions: R,
    pub fulfillments:        R,
}

/// Load and validate content from the seven table readers.
pub fn load_content<R: Read>(tables: ContentTables<R>) -> ContentResult<InMemoryContent> {
    let mut content = InMemoryContent::new();

    for r in read_table::<LevelRecord, _>(tables.needs)? {
        content.insert_need(Need {
            id:             NeedId::new(r.id),
            name:           r.name,
            max_value:      r.max_value,
            initial_value:  r.initial_value,
            decay_per_tick: r.decay_per_tick.unwrap_or(0.0),
        });
    }
    for r in read_table::<LevelRecord, _>(tables.conditions)? {
        content.insert_condition(Condition {
            id:             ConditionId::new(r.id),
            name:           r.name,
            max_value:      r.max_value,
            initial_value:  r.initial_value,
            decay_per_tick: r.decay_per_tick.unwrap_or(0.0),
        });
    }
    for r in read_table::<BehaviorRecord, _>(tables.behaviors)? {
        content.insert_behavior(behavior_from(r)?);
    }
    for r in read_table::<BehaviorActionRecord, _>(tables.behavior_actions)? {
        content.insert_behavior_action(behavior_action_from(r)?);
    }
    for r in read_table::<InteractionRecord, _>(tables.interactions)? {
        content.insert_interaction(interaction_from(r)?);
    }
    for r in read_table::<InteractionActionRecord, _>(tables.interaction_actions)? {
        content.insert_interaction_action(InteractionAction {
            id:             InteractionActionId::new(r.id),
            interaction_id: InteractionId::new(r.interaction_id),
            root:           r.root,
            duration_ticks: r.duration_ticks,
            next_action_id: r.next_action_id.map(InteractionActionId::new),
        });
    }
    for r in read_table::<FulfillmentRecord, _>(tables.fulfillments)? {
        let kind: FulfillmentKind = r.kind.parse()?;
        let target = match kind {
            FulfillmentKind::Need      => FulfillmentTarget::Need(NeedId::new(r.subject_id)),
            FulfillmentKind::Condition => FulfillmentTarget::Condition(ConditionId::new(r.subject_id)),
        };
        content.insert_fulfillment(Fulfillment {
            target,
            interaction_id:    InteractionId::new(r.interaction_id),
            increase_per_tick: r.increase_per_tick,
        });
    }

    content.validate()?;
    debug!(
        behaviors    = content.behaviors().len(),
        interactions = content.interactions().len(),
        "content loaded"
    );
    Ok(content)
}

/// Load `<table>.csv` files from `dir`.
pub fn load_content_dir(dir: &Path) -> ContentResult<InMemoryContent> {
    let open = |name: &str| File::open(dir.join(format!("{name}.csv")));
    load_content(ContentTables {
        needs:               open("needs")?,
        conditions:          open("conditions")?,
        behaviors:           open("behaviors")?,
        behavior_actions:    open("behavior_actions")?,
        interactions:        open("interactions")?,
        interaction_actions: open("interaction_actions")?,
        fulfillments:        open("fulfillments")?,
    })
}

// ── Row conversion ────────────────────────────────────────────────────────────

fn read_table<T: DeserializeOwned, R: Read>(reader: R) -> ContentResult<Vec<T>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);
    let mut rows = Vec::new();
    for record in rdr.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

fn required(
    table:  &'static str,
    column: &str,
    value:  Option<String>,
) -> ContentResult<String> {
    value.ok_or_else(|| ContentError::Parse {
        table,
        reason: format!("missing required column {column:?}"),
    })
}

fn behavior_from(r: BehaviorRecord) -> ContentResult<Behavior> {
    const TABLE: &str = "behaviors";
    let trigger = match r.trigger.as_str() {
        "always" => BehaviorTrigger::Always,
        "need_below" => BehaviorTrigger::NeedBelow {
            need:      NeedId::new(required(TABLE, "subject_id", r.subject_id)?),
            threshold: r.threshold.unwrap_or(0.0),
        },
        "condition_below" => BehaviorTrigger::ConditionBelow {
            condition: ConditionId::new(required(TABLE, "subject_id", r.subject_id)?),
            threshold: r.threshold.unwrap_or(0.0),
        },
        other => {
            return Err(ContentError::Parse {
                table:  TABLE,
                reason: format!("unknown trigger {other:?}"),
            });
        }
    };
    Ok(Behavior {
        id:        BehaviorId::new(r.id),
        name:      r.name,
        priority:  r.priority,
        trigger,
        character: r.character_id.map(|c| EntityId::decode(&c)).transpose()?,
    })
}

fn behavior_action_from(r: BehaviorActionRecord) -> ContentResult<BehaviorAction> {
    const TABLE: &str = "behavior_actions";
    let kind = match r.kind.as_str() {
        "idle" => BehaviorActionKind::Idle { duration_ticks: r.duration_ticks.unwrap_or(0) },
        "fulfill" => {
            let kind: FulfillmentKind =
                required(TABLE, "fulfill_kind", r.fulfill_kind)?.parse()?;
            let subject = required(TABLE, "subject_id", r.subject_id)?;
            let target = match kind {
                FulfillmentKind::Need      => FulfillmentTarget::Need(NeedId::new(subject)),
                FulfillmentKind::Condition => FulfillmentTarget::Condition(ConditionId::new(subject)),
            };
            BehaviorActionKind::Fulfill { target }
        }
        "interact" => BehaviorActionKind::Interact {
            interaction: InteractionId::new(required(TABLE, "interaction_id", r.interaction_id.clone())?),
        },
        other => {
            return Err(ContentError::Parse {
                table:  TABLE,
                reason: format!("unknown behavior action kind {other:?}"),
            });
        }
    };
    let selection = match r.selection.as_str() {
        "search" => TargetSelection::Search,
        "explicit" => TargetSelection::Explicit {
            entity:      EntityId::decode(&required(TABLE, "target_entity_id", r.target_entity_id)?)?,
            interaction: InteractionId::new(required(TABLE, "interaction_id", r.interaction_id)?),
        },
        other => {
            return Err(ContentError::Parse {
                table:  TABLE,
                reason: format!("unknown selection {other:?}"),
            });
        }
    };
    Ok(BehaviorAction {
        id:             BehaviorActionId::new(r.id),
        behavior_id:    BehaviorId::new(r.behavior_id),
        root:           r.root,
        kind,
        selection,
        next_action_id: r.next_action_id.map(BehaviorActionId::new),
    })
}

fn interaction_from(r: InteractionRecord) -> ContentResult<Interaction> {
    const TABLE: &str = "interactions";
    let subject = match r.subject_type.as_str() {
        "item" => InteractionSubject::Item(ItemTemplateId::new(required(
            TABLE,
            "subject_template",
            r.subject_template,
        )?)),
        "building" => InteractionSubject::Building(BuildingTemplateId::new(required(
            TABLE,
            "subject_template",
            r.subject_template,
        )?)),
        "character" => InteractionSubject::Character,
        "system" => InteractionSubject::System,
        other => {
            return Err(ContentError::Parse {
                table:  TABLE,
                reason: format!("unknown subject type {other:?}"),
            });
        }
    };
    Ok(Interaction { id: InteractionId::new(r.id), kind: r.kind.parse()?, subject })
}
