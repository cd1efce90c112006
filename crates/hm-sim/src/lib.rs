//! `hm-sim` — fixed-timestep driver for the hamlet behavior engine.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..sim.total_ticks:
//!   ① Decay     — needs and constructed buildings' conditions drop.
//!   ② Pipeline  — tick_character for every character, ascending id order.
//!                 Content faults: Halt → return Err; SkipCharacter → reset.
//!   ③ Movement  — step along the freshly planned path, write position back.
//!   ④ Observers — per-character events, tick end, periodic snapshot.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use hm_mobility::LPathfinder;
//! use hm_sim::{NoopObserver, RunConfig, SimBuilder};
//!
//! let config = RunConfig::load("village.toml")?;
//! let mut sim = SimBuilder::new(config, content, LPathfinder)
//!     .world(world)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use config::{FaultPolicy, RunConfig};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
