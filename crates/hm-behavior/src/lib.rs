//! `hm-behavior` — the per-character behavior state machine.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                       |
//! |-----------------|----------------------------------------------------------------|
//! | [`state`]       | `BehaviorState`, `InteractionQueue`, `QueueStatus`             |
//! | [`context`]     | `TickContext<'a>`, `Flow`                                      |
//! | [`select`]      | Stage 1: behavior target selection                             |
//! | [`acquire`]     | Stage 2: target acquisition, path refresh, facing              |
//! | [`queue`]       | Stages 3–4: enqueue and dequeue                                |
//! | [`executors`]   | Stage 5: `ActionExecutor` per interaction kind, `ExecutorTable` |
//! | [`advance`]     | Stage 6: next behavior action or clear                         |
//! | [`engine`]      | `BehaviorEngine::tick_character`, `TickReport`                 |
//! | [`direction`]   | `update_direction` — facing from path geometry                 |
//! | [`event`]       | `TickEvent`, `ClearReason`                                     |
//! | [`config`]      | `EngineConfig`                                                 |
//! | [`error`]       | `EngineError`, `EngineResult<T>`                               |
//!
//! # Tick pipeline
//!
//! Every tick, for every character, the stages run in a fixed order:
//!
//! ```text
//! find-behavior-target → find-target-entity-and-go → enqueue-interaction-queue
//!   → dequeue-interaction → execute-interaction → next-or-clear
//! ```
//!
//! Each stage returns [`Flow::Continue`] to fall through or
//! [`Flow::Restart`] to stop here and rerun the whole pipeline next tick.
//! Transient conditions (nothing eligible, no candidate, target gone) are
//! restarts.  Missing content is an [`EngineError`] and propagates to the
//! driver.

pub mod acquire;
pub mod advance;
pub mod config;
pub mod context;
pub mod direction;
pub mod engine;
pub mod error;
pub mod event;
pub mod executors;
pub mod queue;
pub mod select;
pub mod state;

#[cfg(test)]
mod tests;

pub use config::EngineConfig;
pub use context::{Flow, TickContext};
pub use direction::update_direction;
pub use engine::{BehaviorEngine, PIPELINE, Stage, TickReport};
pub use error::{EngineError, EngineResult};
pub use event::{ClearReason, TickEvent};
pub use executors::{ActionExecutor, ExecutorTable, Start};
pub use state::{BehaviorState, InteractionQueue, QueueStatus};
