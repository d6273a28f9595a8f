//! Candidate transforms from gesture deltas. Results are unclamped.

use touchview_protocol::{Point, Transform};

use super::geometry::{distance, midpoint, scale_ratio};
use super::session::GestureSession;

/// Zoom by the change in finger spread and move with the midpoint, so the
/// content under the fingers stays anchored.
pub(crate) fn solve_pinch(session: &GestureSession, p0: Point, p1: Point) -> Transform {
    let base = session.base_transform();
    let ratio = scale_ratio(session.reference_distance(), distance(p0, p1));
    let shift = midpoint(p0, p1) - session.midpoint();
    Transform::new(base.scale * ratio, base.x + shift.x, base.y + shift.y)
}

/// Translate by the first finger's displacement; scale is unchanged.
pub(crate) fn solve_pan(session: &GestureSession, p: Point) -> Transform {
    let base = session.base_transform();
    base.with_translation(base.translation() + (p - session.anchor()))
}
