//! Circle shape.

use super::{
    ShapeId, ShapeKind, ShapeStyle, ShapeTrait, paint_body, paint_selection, rect_from, rect_path,
    strictly_inside,
};
use crate::geometry::Point;
use crate::painter::{DrawContext, Painter};
use kurbo::{Affine, Ellipse as KurboEllipse, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A circle drawn in the `2r` box at the top-left of its anchors.
/// Circles do not rotate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: ShapeId,
    pub a: Point,
    pub b: Point,
    pub radius: i32,
    #[serde(default)]
    pub selected: bool,
    pub style: ShapeStyle,
}

impl Circle {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            a: Point::ORIGIN,
            b: Point::ORIGIN,
            radius: 0,
            selected: false,
            style: ShapeStyle::default(),
        }
    }

    pub fn at(origin: Point, radius: i32) -> Self {
        let mut circle = Self::new();
        circle.a = origin;
        circle.b = origin;
        circle.set_radius(radius);
        circle
    }

    pub fn origin(&self) -> Point {
        Point::min_corner(self.a, self.b)
    }

    pub fn diameter(&self) -> i32 {
        self.radius.saturating_mul(2)
    }

    pub fn set_radius(&mut self, radius: i32) {
        self.radius = radius.max(0);
    }

    /// Grow by half the delta length, truncated; any negative component shrinks.
    pub fn resize(&mut self, dx: i32, dy: i32) {
        let mut delta = (f64::from(dx).hypot(f64::from(dy)) / 2.0) as i32;
        if dx < 0 || dy < 0 {
            delta = -delta;
        }
        self.set_radius(self.radius.saturating_add(delta));
    }

    /// Radius is half the anchor distance while drawing.
    pub(crate) fn stretch_to_anchors(&mut self) {
        self.set_radius((self.a.distance(self.b) / 2.0) as i32);
    }

    pub fn as_rect(&self) -> Rect {
        rect_from(self.origin(), self.diameter(), self.diameter())
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeTrait for Circle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
    }

    fn anchors(&self) -> (Point, Point) {
        (self.a, self.b)
    }

    fn set_anchor_a(&mut self, point: Point) {
        self.a = point;
    }

    fn set_anchor_b(&mut self, point: Point) {
        self.b = point;
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.a.translate(dx, dy);
        self.b.translate(dx, dy);
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn hit_test(&self, point: Point) -> bool {
        let origin = self.origin();
        let d = self.diameter();
        strictly_inside(point, origin, origin.offset(d, d))
    }

    fn draw(&self, painter: &mut dyn Painter, _ctx: &DrawContext) {
        let rect = self.as_rect();
        let path = KurboEllipse::from_rect(rect).to_path(0.1);
        paint_body(painter, &path, Affine::IDENTITY, &self.style);
        if self.selected {
            paint_selection(painter, &rect_path(rect), Affine::IDENTITY);
        }
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_resize() {
        let mut circle = Circle::at(Point::ORIGIN, 10);
        circle.resize(4, 4);
        assert_eq!(circle.radius, 12);
        circle.resize(-2, -2);
        assert_eq!(circle.radius, 11);
    }

    #[test]
    fn test_resize_floors_at_zero() {
        let mut circle = Circle::at(Point::ORIGIN, 3);
        circle.resize(-30, -40);
        assert_eq!(circle.radius, 0);
    }

    #[test]
    fn test_stretch_is_half_distance() {
        let mut circle = Circle::new();
        circle.b = Point::new(30, 40);
        circle.stretch_to_anchors();
        assert_eq!(circle.radius, 25);
    }

    #[test]
    fn test_hit_test_uses_diameter_box() {
        let circle = Circle::at(Point::new(0, 0), 5);
        assert!(circle.hit_test(Point::new(9, 9)));
        assert!(!circle.hit_test(Point::new(10, 5)));
        assert!(!circle.hit_test(Point::new(0, 5)));
    }
}
