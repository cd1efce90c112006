//! TOML run configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use hm_behavior::EngineConfig;
use hm_core::SimConfig;
use hm_mobility::MovementConfig;

use crate::SimResult;

/// What the driver does when a character's pipeline hits a content fault.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FaultPolicy {
    /// Stop the run and return the error.
    #[default]
    Halt,
    /// Log, reset that character to idle, and keep going.
    SkipCharacter,
}

/// Everything a run needs besides content and the world.
///
/// ```toml
/// fault_policy = "skip-character"
///
/// [sim]
/// total_ticks = 600
/// seed        = 7
///
/// [engine]
/// arrival_distance = 12.0
///
/// [movement]
/// speed_px_per_tick = 3.0
/// ```
///
/// Every table and field is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub sim:          SimConfig,
    pub engine:       EngineConfig,
    pub movement:     MovementConfig,
    pub fault_policy: FaultPolicy,
}

impl RunConfig {
    pub fn from_toml_str(raw: &str) -> SimResult<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}
