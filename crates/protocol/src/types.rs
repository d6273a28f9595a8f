use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A position (or displacement) in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
}

/// The area a surface is painted into, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Uniform scale plus translation applied to the visual surface.
///
/// `x`/`y` live in the same coordinate space as the painted surface, so a
/// renderer applies the translation first and the scale second, matching
/// the CSS `translate(..) scale(..)` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub scale: f64,
    pub x: f64,
    pub y: f64,
}

impl Transform {
    pub const fn new(scale: f64, x: f64, y: f64) -> Self {
        Self { scale, x, y }
    }

    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// A transform at `scale` with no translation.
    pub const fn at_scale(scale: f64) -> Self {
        Self::new(scale, 0.0, 0.0)
    }

    #[inline]
    pub fn translation(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Same scale, translation replaced.
    #[inline]
    pub fn with_translation(self, t: Point) -> Self {
        Self::new(self.scale, t.x, t.y)
    }

    /// CSS `transform` property value.
    pub fn css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.x, self.y, self.scale
        )
    }

    /// Column-major 2D affine matrix `[a, b, c, d, e, f]`, as taken by
    /// `CanvasRenderingContext2D::setTransform` and CSS `matrix()`.
    pub fn to_affine(&self) -> [f64; 6] {
        [self.scale, 0.0, 0.0, self.scale, self.x, self.y]
    }

    /// Map a surface-space point into client space.
    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(p.x * self.scale + self.x, p.y * self.scale + self.y)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_string_orders_translate_before_scale() {
        let t = Transform::new(1.5, 10.0, -4.0);
        assert_eq!(t.css(), "translate(10px, -4px) scale(1.5)");
    }

    #[test]
    fn affine_matrix_matches_apply() {
        let t = Transform::new(2.0, 5.0, 7.0);
        let [a, b, c, d, e, f] = t.to_affine();
        let p = Point::new(3.0, 4.0);
        let mapped = Point::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f);
        assert_eq!(mapped, t.apply(p));
        assert_eq!(mapped, Point::new(11.0, 15.0));
    }

    #[test]
    fn point_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, 6.0);
        assert_eq!(b - a, Point::new(3.0, 4.0));
        assert_eq!(a + b, Point::new(5.0, 8.0));
    }
}
