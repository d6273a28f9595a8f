//! Allocation-free point math for the per-move path.

use touchview_protocol::Point;

#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

#[inline]
pub fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) * 0.5, (a.y + b.y) * 0.5)
}

/// `current / reference`, or 1 when the reference distance is degenerate
/// (both fingers landed on the same spot) or the result is not finite.
#[inline]
pub fn scale_ratio(reference: f64, current: f64) -> f64 {
    if reference.is_nan() || reference <= 0.0 {
        return 1.0;
    }
    let ratio = current / reference;
    if ratio.is_finite() { ratio } else { 1.0 }
}
