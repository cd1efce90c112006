//! Pathfinding trait and the two built-in implementations.
//!
//! # Pluggability
//!
//! The behavior engine only consumes the waypoint list a [`Pathfinder`]
//! returns; it never inspects how the list was produced.  Applications with a
//! navigation mesh or tile grid implement the trait themselves.

use hm_core::Point;

// ── Pathfinder trait ──────────────────────────────────────────────────────────

/// Pluggable path computation.
pub trait Pathfinder {
    /// Waypoints leading from `from` to `to`, excluding `from` itself.
    ///
    /// The last waypoint is `to`.  An empty path means "already there".
    fn path(&self, from: Point, to: Point) -> Vec<Point>;
}

impl<P: Pathfinder + ?Sized> Pathfinder for &P {
    fn path(&self, from: Point, to: Point) -> Vec<Point> {
        (**self).path(from, to)
    }
}

// ── DirectPathfinder ──────────────────────────────────────────────────────────

/// Straight line: a single waypoint at the destination.
#[derive(Copy, Clone, Debug, Default)]
pub struct DirectPathfinder;

impl Pathfinder for DirectPathfinder {
    fn path(&self, from: Point, to: Point) -> Vec<Point> {
        if from == to { Vec::new() } else { vec![to] }
    }
}

// ── LPathfinder ───────────────────────────────────────────────────────────────

/// Axis-aligned L: a vertical leg to the destination row, then a horizontal
/// leg.  Approximates walking along village streets.
#[derive(Copy, Clone, Debug, Default)]
pub struct LPathfinder;

impl Pathfinder for LPathfinder {
    fn path(&self, from: Point, to: Point) -> Vec<Point> {
        let corner = Point::new(from.x, to.y);
        let mut path = Vec::with_capacity(2);
        if corner != from {
            path.push(corner);
        }
        if corner != to {
            path.push(to);
        }
        path
    }
}
