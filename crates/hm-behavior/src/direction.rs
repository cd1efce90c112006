//! Facing direction derived from path geometry.

use hm_core::{Direction, Point};

/// The path point whose X decides which way the character faces.
///
/// Walking the path from `current`:
///
/// * if the first moves are purely vertical, the first point reached by a
///   horizontal move;
/// * otherwise the point where the horizontal heading first reverses;
/// * otherwise the last point of the path.
///
/// Paths exclude the start point, so the walk's first segment is
/// `current → path[0]`.  Any horizontal offset on that segment, however
/// small, counts as a horizontal move; the threshold in
/// [`update_direction`] keeps such offsets from flipping the facing.
///
/// Returns `None` for an empty path.
pub fn reference_point(current: Point, path: &[Point]) -> Option<Point> {
    let last = *path.last()?;
    let mut prev = current;
    let mut heading: Option<f32> = None;
    let mut vertical_first = false;

    for &p in path {
        let dx = p.x - prev.x;
        if dx == 0.0 {
            if heading.is_none() && p.y != prev.y {
                vertical_first = true;
            }
        } else {
            let sign = dx.signum();
            match heading {
                None if vertical_first => return Some(p),
                None => heading = Some(sign),
                Some(h) if h != sign => return Some(prev),
                Some(_) => {}
            }
        }
        prev = p;
    }
    Some(last)
}

/// New facing for a character at `current` following `path`.
///
/// The facing only flips when the reference point is more than `threshold`
/// pixels away horizontally, which keeps near-vertical walks from
/// jittering.  An empty path keeps the current facing.
pub fn update_direction(
    direction: Direction,
    current:   Point,
    path:      &[Point],
    threshold: f32,
) -> Direction {
    let Some(reference) = reference_point(current, path) else {
        return direction;
    };
    let dx = reference.x - current.x;
    if dx.abs() <= threshold {
        direction
    } else if dx > 0.0 {
        Direction::Right
    } else {
        Direction::Left
    }
}
