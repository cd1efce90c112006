//! `hm-world` — the world the behavior engine acts on.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`context`] | `WorldContext` trait — queries and outbound mutations           |
//! | [`store`]   | `WorldStore` — ordered-map implementation, spawning, decay      |
//! | [`entity`]  | `Character`, `Item`, `Building` records                         |
//! | [`probe`]   | `CharacterProbe` — `LevelProbe` adapter for behavior eligibility |
//! | [`error`]   | `WorldError`, `WorldResult<T>`                                  |
//!
//! Physics and collision stay outside: positions are whatever the driver
//! writes back after movement.

pub mod context;
pub mod entity;
pub mod error;
pub mod probe;
pub mod store;

#[cfg(test)]
mod tests;

pub use context::WorldContext;
pub use entity::{Building, Character, Item};
pub use error::{WorldError, WorldResult};
pub use probe::CharacterProbe;
pub use store::WorldStore;
