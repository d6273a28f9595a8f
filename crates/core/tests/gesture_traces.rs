//! Integration test: replay recorded gesture traces through the controller
//! and check the published transforms.

use proptest::prelude::*;
use touchview_core::controller::is_legal;
use touchview_core::trace::{GestureTrace, replay, step};
use touchview_core::{Point, TouchEvent, TouchPhase, Transform, ViewportConfig};

const EPS: f64 = 1e-9;

fn assert_transform(actual: Transform, expected: Transform) {
    assert!(
        (actual.scale - expected.scale).abs() < EPS
            && (actual.x - expected.x).abs() < EPS
            && (actual.y - expected.y).abs() < EPS,
        "expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn pinch_then_pan_trace() {
    let trace = GestureTrace::from_json(include_bytes!("fixtures/pinch_then_pan.json"))
        .expect("failed to parse trace");
    let out = replay(&trace).expect("trace config should be valid");
    assert_eq!(out.len(), trace.events.len());

    assert_transform(out[0], Transform::at_scale(0.6));
    assert_transform(out[2], Transform::at_scale(1.2));
    assert_transform(out[3], Transform::at_scale(1.8));
    // Lifting fingers keeps the last pinch result.
    assert_transform(out[4], Transform::at_scale(1.8));
    assert_transform(out[5], Transform::at_scale(1.8));
    // Pan by (60, 40).
    assert_transform(out[7], Transform::new(1.8, 60.0, 40.0));
    // Pan of (900, 0) is clamped to 200 * 1.8.
    assert_transform(out[8], Transform::new(1.8, 360.0, 0.0));
    assert_transform(out[9], Transform::new(1.8, 360.0, 0.0));
}

#[test]
fn double_tap_trace() {
    let trace = GestureTrace::from_json(include_bytes!("fixtures/double_tap.json"))
        .expect("failed to parse trace");
    let out = replay(&trace).expect("trace config should be valid");

    let scales: Vec<f64> = out.iter().map(|t| t.scale).collect();
    assert_eq!(
        scales,
        vec![0.6, 0.6, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.6, 0.6]
    );
    assert!(out.iter().all(|t| t.x == 0.0 && t.y == 0.0));
}

#[test]
fn cancelled_pinch_trace() {
    let trace = GestureTrace::from_json(include_bytes!("fixtures/interrupted_pinch.json"))
        .expect("failed to parse trace");
    assert_eq!(trace.config_or_default().min_scale, 0.25);
    // Fields missing from the embedded config keep their defaults.
    assert_eq!(trace.config_or_default().pan_limit, 200.0);

    let out = replay(&trace).expect("trace config should be valid");
    let pinched = Transform::new(0.9, 25.0, 0.0);
    assert_transform(out[1], pinched);
    for t in &out[2..] {
        assert_transform(*t, pinched);
    }
}

/// One randomized input step: a phase selector, a time gap and positions for
/// up to three fingers.
type RawStep = (u8, u32, [(f64, f64); 3]);

fn raw_step() -> impl Strategy<Value = RawStep> {
    (
        0u8..10,
        0u32..200,
        prop::array::uniform3((-1000.0f64..3000.0, -1000.0f64..3000.0)),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_streams_never_publish_illegal_transforms(
        steps in prop::collection::vec(raw_step(), 1..400),
    ) {
        let config = ViewportConfig::default();
        let trace = GestureTrace {
            name: None,
            config: Some(config),
            events: Vec::new(),
        };
        let mut controller = trace.controller().expect("default config is valid");
        let mut time_ms = 0.0;
        let mut fingers: Vec<Point> = Vec::new();

        for (selector, gap, coords) in steps {
            time_ms += f64::from(gap);
            let phase = match selector {
                0..=1 => TouchPhase::Start,
                2..=7 => TouchPhase::Move,
                8 => TouchPhase::End,
                _ => TouchPhase::Cancel,
            };
            match phase {
                TouchPhase::Start if fingers.len() < 3 => {
                    let (x, y) = coords[fingers.len()];
                    fingers.push(Point::new(x, y));
                }
                TouchPhase::Move => {
                    for (f, &(x, y)) in fingers.iter_mut().zip(&coords) {
                        *f = Point::new(x, y);
                    }
                }
                TouchPhase::End => {
                    fingers.pop();
                }
                TouchPhase::Cancel => fingers.clear(),
                TouchPhase::Start => {}
            }

            let event = TouchEvent::new(time_ms, phase, fingers.clone());
            let t = step(&mut controller, &event);
            prop_assert!(is_legal(&t, &config), "illegal {:?} after {:?}", t, event);
        }
    }
}
