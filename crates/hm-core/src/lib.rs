//! `hm-core` — foundational types for the `hamlet` behavior engine.
//!
//! This crate is a dependency of every other `hm-*` crate.  It intentionally
//! has no `hm-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                        |
//! |-----------------|-----------------------------------------------------------------|
//! | [`ids`]         | Plain content ids and the composite id codecs                   |
//! | [`geo`]         | `Point` (world pixels), `Direction`                             |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                                 |
//! | [`levels`]      | `Levels<K>` — clamped need / condition values                   |
//! | [`rng`]         | `CharacterRng`, `SimRng`, `DiceCheck`                           |
//! | [`error`]       | `CoreError`, `CoreResult`                                       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod levels;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{Direction, Point};
pub use ids::{
    BehaviorActionId, BehaviorId, BehaviorKind, BehaviorTargetId, BuildingTemplateId,
    ConditionId, EntityId, EntityKind, FulfillmentKind, FulfillmentTargetId, InteractionActionId,
    InteractionId, InteractionSource, InteractionTargetId, ItemTemplateId, NeedId,
};
pub use levels::{ConditionLevels, Level, Levels, NeedLevels};
pub use rng::{CharacterRng, DiceCheck, DiceOutcome, SimRng};
pub use time::{SimClock, SimConfig, Tick};
