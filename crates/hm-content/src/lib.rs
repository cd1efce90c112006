//! `hm-content` — authored content and the read-only repository the engine
//! queries.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                        |
//! |----------------|-----------------------------------------------------------------|
//! | [`model`]      | `Behavior`, `BehaviorAction`, `Interaction`, `InteractionAction`, `Need`, `Condition`, `Fulfillment` |
//! | [`repository`] | `ContentRepository` trait, `LevelProbe` eligibility seam        |
//! | [`memory`]     | `InMemoryContent` — ordered-map implementation                  |
//! | [`loader`]     | CSV table loading (`load_content`, `load_content_dir`)          |
//! | [`error`]      | `ContentError`, `ContentResult<T>`                              |
//!
//! Content is immutable once loaded.  Everything the engine finds missing
//! here (a root action, an interaction referenced by id) is an authoring
//! fault, surfaced by the engine as an error rather than skipped.

pub mod error;
pub mod loader;
pub mod memory;
pub mod model;
pub mod repository;


pub use error::{ContentError, ContentResult};
pub use loader::{ContentTables, load_content, load_content_dir};
pub use memory::{ITEM_PICK_ACTION, ITEM_PICK_INTERACTION, InMemoryContent};
pub use model::{
    Behavior, BehaviorAction, BehaviorActionKind, BehaviorTrigger, Condition, Fulfillment,
    FulfillmentTarget, Interaction, InteractionAction, InteractionKind, InteractionSubject, Need,
    TargetSelection,
};
pub use repository::{ContentRepository, LevelProbe, is_eligible};
