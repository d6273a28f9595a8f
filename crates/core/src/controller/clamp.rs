use touchview_protocol::Transform;

use crate::config::ViewportConfig;

/// Force `t` into the legal range for `config`.
///
/// Scale is clamped to `[min_scale, max_scale]`; translation on each axis to
/// `±pan_limit * scale`, using the clamped scale. Non-finite components
/// collapse to the nearest legal rest value (`min_scale`, `0`).
pub fn clamp(t: Transform, config: &ViewportConfig) -> Transform {
    let scale = if t.scale.is_nan() {
        config.min_scale
    } else {
        t.scale.clamp(config.min_scale, config.max_scale)
    };
    let bound = config.pan_limit * scale;
    Transform::new(scale, clamp_axis(t.x, bound), clamp_axis(t.y, bound))
}

#[inline]
fn clamp_axis(v: f64, bound: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(-bound, bound) }
}

/// Whether `t` satisfies the published-transform invariant.
pub fn is_legal(t: &Transform, config: &ViewportConfig) -> bool {
    let bound = config.pan_limit * t.scale;
    (config.min_scale..=config.max_scale).contains(&t.scale)
        && t.x.abs() <= bound
        && t.y.abs() <= bound
}
