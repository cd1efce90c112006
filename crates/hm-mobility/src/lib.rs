//! `hm-mobility` — paths and walking.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`pathfinder`] | `Pathfinder` trait, `DirectPathfinder`, `LPathfinder`        |
//! | [`engine`]     | `MovementEngine`, `MovementConfig`, `Step`                   |
//! | [`error`]      | `MobilityError`, `MobilityResult<T>`                         |
//!
//! # Movement model
//!
//! 1. The behavior engine asks a [`Pathfinder`] for waypoints toward the
//!    current target and stores them on the character's behavior state.
//! 2. After the character's pipeline runs, the driver calls
//!    [`MovementEngine::advance`], which walks at most
//!    `speed_px_per_tick` pixels along the path and drops reached
//!    waypoints.
//! 3. Arrival is not signalled here.  Executors check distance to their
//!    target each tick.

pub mod engine;
pub mod error;
pub mod pathfinder;


pub use engine::{MovementConfig, MovementEngine, Step};
pub use error::{MobilityError, MobilityResult};
pub use pathfinder::{DirectPathfinder, LPathfinder, Pathfinder};
