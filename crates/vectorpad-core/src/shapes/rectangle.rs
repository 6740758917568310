//! Rectangle shape.

use super::{
    ShapeId, ShapeKind, ShapeStyle, ShapeTrait, paint_body, paint_selection, rect_from, rect_path,
    rotation_about, strictly_inside,
};
use crate::geometry::{Point, span};
use crate::painter::{DrawContext, Painter};
use kurbo::{BezPath, Rect, RoundedRect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A rectangle with optional rounded corners.
///
/// The box starts at the component-wise minimum of the anchors and spans
/// `width` × `height`, which are kept separately so they can be resized
/// independently of the anchors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    pub a: Point,
    pub b: Point,
    pub width: i32,
    pub height: i32,
    /// Corner arc diameter (0 = sharp corners).
    pub corner_arc: u32,
    /// Rotation in degrees about the box center.
    #[serde(default)]
    pub rotation: i32,
    #[serde(default)]
    pub selected: bool,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Rectangle {
    /// Corner arc diameter of a rounded rectangle.
    pub const ROUNDED_CORNER_ARC: u32 = 50;

    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            a: Point::ORIGIN,
            b: Point::ORIGIN,
            width: 0,
            height: 0,
            corner_arc: 0,
            rotation: 0,
            selected: false,
            style: ShapeStyle::default(),
        }
    }

    /// Create a rectangle with the fixed rounded corners.
    pub fn rounded() -> Self {
        Self {
            corner_arc: Self::ROUNDED_CORNER_ARC,
            ..Self::new()
        }
    }

    /// Create a rectangle at an origin with an explicit extent.
    pub fn at(origin: Point, width: i32, height: i32) -> Self {
        let mut rect = Self::new();
        rect.a = origin;
        rect.b = origin;
        rect.set_extent(width, height);
        rect
    }

    pub fn is_rounded(&self) -> bool {
        self.corner_arc > 0
    }

    /// Top-left corner of the box.
    pub fn origin(&self) -> Point {
        Point::min_corner(self.a, self.b)
    }

    /// Set both extents, clamped to zero.
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

    /// Get the rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        rect_from(self.origin(), self.width, self.height)
    }

    pub fn to_path(&self) -> BezPath {
        if self.is_rounded() {
            let radius = f64::from(self.corner_arc) / 2.0;
            RoundedRect::from_rect(self.as_rect(), radius).to_path(0.1)
        } else {
            rect_path(self.as_rect())
        }
    }
}

impl Default for Rectangle {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        if self.is_rounded() {
            ShapeKind::RoundedRectangle
        } else {
            ShapeKind::Rectangle
        }
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
    fn test_rectangle_resize() {
        let mut rect = Rectangle::at(Point::ORIGIN, 10, 20);
        rect.resize(5, 10);
        assert_eq!((rect.width, rect.height), (15, 30));
        rect.resize(-20, -40);
        assert_eq!((rect.width, rect.height), (0, 0));
    }

    #[test]
    fn test_resize_keeps_anchors() {
        let mut rect = Rectangle::at(Point::new(3, 4), 10, 10);
        rect.resize(7, 7);
        assert_eq!(rect.anchors(), (Point::new(3, 4), Point::new(3, 4)));
    }

    #[test]
    fn test_hit_test_is_strict() {
        let rect = Rectangle::at(Point::ORIGIN, 10, 10);
        assert!(rect.hit_test(Point::new(5, 5)));
        assert!(!rect.hit_test(Point::new(0, 5)));
        assert!(!rect.hit_test(Point::new(10, 5)));
        assert!(!rect.hit_test(Point::new(5, 10)));
        assert!(!rect.hit_test(Point::new(15, 5)));
    }

    #[test]
    fn test_origin_from_reversed_drag() {
        let mut rect = Rectangle::new();
        rect.a = Point::new(100, 100);
        rect.b = Point::new(50, 60);
        rect.stretch_to_anchors(false);
        assert_eq!(rect.origin(), Point::new(50, 60));
        assert_eq!((rect.width, rect.height), (50, 40));
    }

    #[test]
    fn test_constrained_stretch_is_square() {
        let mut rect = Rectangle::new();
        rect.b = Point::new(30, 12);
        rect.stretch_to_anchors(true);
        assert_eq!((rect.width, rect.height), (12, 12));
    }

    #[test]
    fn test_rounded_kind() {
        let rect = Rectangle::rounded();
        assert!(rect.is_rounded());
        assert_eq!(rect.kind(), ShapeKind::RoundedRectangle);
        assert_eq!(Rectangle::new().kind(), ShapeKind::Rectangle);
    }

    #[test]
    fn test_center() {
        let rect = Rectangle::at(Point::new(10, 20), 100, 50);
        assert_eq!(rect.center(), Point::new(60, 45));
    }

    #[test]
    fn test_bounds() {
        let rect = Rectangle::at(Point::new(10, 20), 100, 50);
        let bounds = rect.bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 110.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 70.0).abs() < f64::EPSILON);
    }
}
