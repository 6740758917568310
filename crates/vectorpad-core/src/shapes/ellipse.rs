//! Ellipse (oval) shape.

use super::{
    ShapeId, ShapeKind, ShapeStyle, ShapeTrait, paint_body, paint_selection, rect_from, rect_path,
    rotation_about, strictly_inside,
};
use crate::geometry::{Point, span};
use crate::painter::{DrawContext, Painter};
use kurbo::{BezPath, Ellipse as KurboEllipse, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned ellipse inscribed in a `width` × `height` box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ellipse {
    pub(crate) id: ShapeId,
    pub a: Point,
    pub b: Point,
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub rotation: i32,
    #[serde(default)]
    pub selected: bool,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Ellipse {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            a: Point::ORIGIN,
            b: Point::ORIGIN,
            width: 0,
            height: 0,
            rotation: 0,
            selected: false,
            style: ShapeStyle::default(),
        }
    }

    /// Create an ellipse whose box starts at `origin`.
    pub fn at(origin: Point, width: i32, height: i32) -> Self {
        let mut ellipse = Self::new();
        ellipse.a = origin;
        ellipse.b = origin;
        ellipse.set_extent(width, height);
        ellipse
    }

    pub fn origin(&self) -> Point {
        Point::min_corner(self.a, self.b)
    }

    pub fn set_extent(&mut self, width: i32, height: i32) {
        self.width = width.max(0);
        self.height = height.max(0);
    }

    pub fn resize(&mut self, dx: i32, dy: i32) {
        self.set_extent(self.width.saturating_add(dx), self.height.saturating_add(dy));
    }

    pub(crate) fn stretch_to_anchors(&mut self, constrain: bool) {
        let width = span(self.a.x, self.b.x);
        let height = span(self.a.y, self.b.y);
        if constrain {
            let size = width.min(height);
            self.set_extent(size, size);
        } else {
            self.set_extent(width, height);
        }
    }

    pub fn center(&self) -> Point {
        self.origin().offset(self.width / 2, self.height / 2)
    }

    pub fn as_rect(&self) -> Rect {
        rect_from(self.origin(), self.width, self.height)
    }

    pub fn to_path(&self) -> BezPath {
        KurboEllipse::from_rect(self.as_rect()).to_path(0.1)
    }
}

impl Default for Ellipse {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeTrait for Ellipse {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Oval
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
        strictly_inside(point, origin, origin.offset(self.width, self.height))
    }

    fn draw(&self, painter: &mut dyn Painter, _ctx: &DrawContext) {
        let transform = rotation_about(self.rotation, self.center());
        paint_body(painter, &self.to_path(), transform, &self.style);
        if self.selected {
            paint_selection(painter, &rect_path(self.as_rect()), transform);
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
    fn test_ellipse_resize() {
        let mut ellipse = Ellipse::at(Point::ORIGIN, 20, 10);
        ellipse.resize(5, 5);
        assert_eq!((ellipse.width, ellipse.height), (25, 15));
        ellipse.resize(-20, -10);
        assert_eq!((ellipse.width, ellipse.height), (5, 5));
        ellipse.resize(-6, 0);
        assert_eq!((ellipse.width, ellipse.height), (0, 5));
    }

    #[test]
    fn test_hit_test_uses_box() {
        let ellipse = Ellipse::at(Point::new(10, 10), 20, 10);
        assert!(ellipse.hit_test(Point::new(20, 15)));
        // Box corner, outside the curve but inside the box.
        assert!(ellipse.hit_test(Point::new(11, 11)));
        assert!(!ellipse.hit_test(Point::new(10, 15)));
        assert!(!ellipse.hit_test(Point::new(20, 20)));
    }

    #[test]
    fn test_constrained_stretch() {
        let mut ellipse = Ellipse::new();
        ellipse.a = Point::new(50, 50);
        ellipse.b = Point::new(10, 40);
        ellipse.stretch_to_anchors(true);
        assert_eq!((ellipse.width, ellipse.height), (10, 10));
        assert_eq!(ellipse.origin(), Point::new(10, 40));
    }

    #[test]
    fn test_kind_is_oval() {
        assert_eq!(Ellipse::new().kind(), ShapeKind::Oval);
    }
}
