//! Integer canvas coordinates.

use serde::{Deserialize, Serialize};

/// A point on the canvas in whole pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Shift this point in place, saturating at the `i32` range.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        *self = self.offset(dx, dy);
    }

    /// Return a copy shifted by the given delta, saturating at the `i32` range.
    pub fn offset(self, dx: i32, dy: i32) -> Point {
        Point::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Saturating component-wise difference `self - other`.
    pub fn delta_from(self, other: Point) -> (i32, i32) {
        (self.x.saturating_sub(other.x), self.y.saturating_sub(other.y))
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        dx.hypot(dy)
    }

    /// Integer midpoint, truncated toward zero.
    pub fn midpoint(a: Point, b: Point) -> Point {
        Point::new(mean(&[a.x, b.x]), mean(&[a.y, b.y]))
    }

    /// Component-wise minimum of two points (top-left of their box).
    pub fn min_corner(a: Point, b: Point) -> Point {
        Point::new(a.x.min(b.x), a.y.min(b.y))
    }

    /// Component-wise maximum of two points (bottom-right of their box).
    pub fn max_corner(a: Point, b: Point) -> Point {
        Point::new(a.x.max(b.x), a.y.max(b.y))
    }

    pub fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(f64::from(self.x), f64::from(self.y))
    }
}

impl From<Point> for kurbo::Point {
    fn from(point: Point) -> Self {
        point.to_kurbo()
    }
}

/// Integer mean of the values, truncated toward zero; never overflows.
pub(crate) fn mean(values: &[i32]) -> i32 {
    let sum: i64 = values.iter().map(|&v| i64::from(v)).sum();
    let count = i64::try_from(values.len()).unwrap_or(i64::MAX).max(1);
    clamp_i64(sum / count)
}

/// Absolute difference of two coordinates, capped at `i32::MAX`.
pub(crate) fn span(a: i32, b: i32) -> i32 {
    i32::try_from(a.abs_diff(b)).unwrap_or(i32::MAX)
}

fn clamp_i64(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

/// Strict open-interval test: `low < value < high` with the bounds in either order.
pub(crate) fn strictly_between(value: i32, bound1: i32, bound2: i32) -> bool {
    let (low, high) = if bound1 <= bound2 {
        (bound1, bound2)
    } else {
        (bound2, bound1)
    };
    low < value && value < high
}
