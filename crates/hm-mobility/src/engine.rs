//! Per-tick movement along a waypoint path.

use hm_core::Point;

use crate::{MobilityError, MobilityResult};

/// Walking parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MovementConfig {
    /// Pixels a character covers per tick.  Default: 4.
    pub speed_px_per_tick: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self { speed_px_per_tick: 4.0 }
    }
}

/// Result of one movement step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Step {
    /// Position after the step.
    pub position: Point,
    /// Number of leading waypoints reached (to be dropped from the path).
    pub consumed: usize,
}

/// Moves characters along their paths at a fixed speed.
///
/// Leftover budget after reaching a waypoint carries over to the next one,
/// so a character never loses distance at corners.
#[derive(Clone, Debug)]
pub struct MovementEngine {
    config: MovementConfig,
}

impl MovementEngine {
    pub fn new(config: MovementConfig) -> MobilityResult<Self> {
        let speed = config.speed_px_per_tick;
        if !speed.is_finite() || speed <= 0.0 {
            return Err(MobilityError::InvalidSpeed(speed));
        }
        Ok(Self { config })
    }

    #[inline]
    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    /// Advance `position` along `path` by at most one tick of walking.
    pub fn step(&self, position: Point, path: &[Point]) -> Step {
        let mut budget = self.config.speed_px_per_tick;
        let mut position = position;
        let mut consumed = 0;
        for &waypoint in path {
            let d = position.distance(waypoint);
            if d > budget {
                position = position.step_toward(waypoint, budget);
                break;
            }
            budget -= d;
            position = waypoint;
            consumed += 1;
        }
        Step { position, consumed }
    }

    /// Step and drop reached waypoints from `path` in place.
    pub fn advance(&self, position: Point, path: &mut Vec<Point>) -> Point {
        let step = self.step(position, path);
        path.drain(..step.consumed);
        step.position
    }
}
