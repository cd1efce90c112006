//! Engine tuning.

/// Distances used by target acquisition and executor preconditions.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// A character within this many pixels of its target stops walking.
    pub arrival_distance: f32,

    /// Minimum horizontal offset, in pixels, before the facing flips.
    pub direction_threshold: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            arrival_distance:    10.0,
            direction_threshold: 5.0,
        }
    }
}

impl EngineConfig {
    /// Radius inside which an interaction may start.  Never below 10 px so a
    /// tight arrival distance cannot make targets unreachable.
    #[inline]
    pub fn interaction_radius(&self) -> f32 {
        self.arrival_distance.max(10.0)
    }
}
