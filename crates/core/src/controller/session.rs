use touchview_protocol::{Point, Transform};

use super::geometry::{distance, midpoint};
use crate::config::ViewportConfig;

/// Frozen baseline of one continuous touch interaction.
///
/// Opened when fingers go down (or the finger count changes) and dropped
/// when the last finger lifts. Only the first two points are recorded;
/// extra fingers are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct GestureSession {
    touch_points: [Point; 2],
    point_count: usize,
    base_transform: Transform,
    reference_distance: f64,
    midpoint: Point,
}

impl GestureSession {
    /// Snapshot `touches` against the currently published transform.
    /// Returns `None` when there are no active touches.
    pub(crate) fn open(touches: &[Point], base_transform: Transform) -> Option<Self> {
        match *touches {
            [] => None,
            [p] => Some(Self {
                touch_points: [p, p],
                point_count: 1,
                base_transform,
                reference_distance: 0.0,
                midpoint: p,
            }),
            [p0, p1, ..] => Some(Self {
                touch_points: [p0, p1],
                point_count: 2,
                base_transform,
                reference_distance: distance(p0, p1),
                midpoint: midpoint(p0, p1),
            }),
        }
    }

    #[cfg(test)]
    pub(crate) fn touch_points(&self) -> &[Point] {
        &self.touch_points[..self.point_count]
    }

    /// First finger down; the pan anchor.
    pub(crate) fn anchor(&self) -> Point {
        self.touch_points[0]
    }

    pub(crate) fn base_transform(&self) -> Transform {
        self.base_transform
    }

    /// Distance between the first two points, or 0 for a one-finger session.
    pub(crate) fn reference_distance(&self) -> f64 {
        self.reference_distance
    }

    pub(crate) fn midpoint(&self) -> Point {
        self.midpoint
    }

    pub(crate) fn is_multi_touch(&self) -> bool {
        self.point_count >= 2
    }
}

/// What a move event means for the transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Pinch,
    Pan,
    /// No transform change; single-finger moves at rest belong to the page.
    Idle,
}

/// Decide how a move with `touch_count` active points should be handled.
pub(crate) fn classify(
    session: &GestureSession,
    touch_count: usize,
    published_scale: f64,
    config: &ViewportConfig,
) -> Gesture {
    if touch_count >= 2 && session.is_multi_touch() {
        Gesture::Pinch
    } else if touch_count == 1 && published_scale > config.initial_scale + config.pan_threshold {
        Gesture::Pan
    } else {
        Gesture::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_records_reference_metrics() {
        let s = GestureSession::open(
            &[Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
            Transform::identity(),
        )
        .unwrap();
        assert!(s.is_multi_touch());
        assert_eq!(s.reference_distance(), 100.0);
        assert_eq!(s.midpoint(), Point::new(50.0, 0.0));
    }

    #[test]
    fn open_ignores_extra_fingers() {
        let s = GestureSession::open(
            &[
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(500.0, 500.0),
            ],
            Transform::identity(),
        )
        .unwrap();
        assert_eq!(s.touch_points().len(), 2);
        assert_eq!(s.reference_distance(), 10.0);
    }

    #[test]
    fn single_point_session_has_zero_distance() {
        let s = GestureSession::open(&[Point::new(4.0, 5.0)], Transform::identity()).unwrap();
        assert!(!s.is_multi_touch());
        assert_eq!(s.reference_distance(), 0.0);
        assert_eq!(s.anchor(), Point::new(4.0, 5.0));
        assert_eq!(s.touch_points(), &[Point::new(4.0, 5.0)]);
    }

    #[test]
    fn no_touches_no_session() {
        assert!(GestureSession::open(&[], Transform::identity()).is_none());
    }

    #[test]
    fn classification_rules() {
        let config = ViewportConfig::default();
        let one = GestureSession::open(&[Point::ORIGIN], Transform::identity()).unwrap();
        let two = GestureSession::open(&[Point::ORIGIN, Point::new(1.0, 1.0)], Transform::identity())
            .unwrap();

        assert_eq!(classify(&two, 2, 0.6, &config), Gesture::Pinch);
        assert_eq!(classify(&two, 3, 0.6, &config), Gesture::Pinch);
        // A one-finger session never pinches, even if a second point shows up in a move.
        assert_eq!(classify(&one, 2, 0.6, &config), Gesture::Idle);

        assert_eq!(classify(&one, 1, 1.0, &config), Gesture::Pan);
        // Pan is gated until meaningfully beyond rest scale.
        assert_eq!(classify(&one, 1, 0.6, &config), Gesture::Idle);
        assert_eq!(classify(&one, 1, 0.65, &config), Gesture::Idle);
        assert_eq!(classify(&one, 0, 2.0, &config), Gesture::Idle);
    }
}
