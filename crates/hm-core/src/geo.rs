//! Planar world geometry.
//!
//! Positions are world pixels in screen orientation (x grows to the right,
//! y grows downward).  Physics and collision live outside the engine; this
//! module only offers the distance arithmetic the engine needs for target
//! search and arrival checks.

/// A position in world pixels.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance.  Cheaper than [`distance`][Self::distance]
    /// when only ordering matters.
    #[inline]
    pub fn distance_sq(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance in pixels.
    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        self.distance_sq(other).sqrt()
    }

    /// Move from `self` toward `target` by at most `max_step` pixels.
    pub fn step_toward(self, target: Point, max_step: f32) -> Point {
        let d = self.distance(target);
        if d <= max_step || d == 0.0 {
            return target;
        }
        let t = max_step / d;
        Point::new(self.x + (target.x - self.x) * t, self.y + (target.y - self.y) * t)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Horizontal facing of a character sprite.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left  => "left",
            Direction::Right => "right",
        }
    }
}
