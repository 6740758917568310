//! Triangle shape.

use super::{
    ShapeId, ShapeKind, ShapeStyle, ShapeTrait, paint_body, paint_selection, rect_path,
    rotation_about, strictly_inside,
};
use crate::geometry::{Point, mean};
use crate::painter::{DrawContext, Painter};
use kurbo::{BezPath, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A triangle with apex `a`, base corner `b` and a third vertex `c`.
///
/// While `derive_c` is set, `c` mirrors `b` across the vertical through `a`
/// (an isosceles triangle). Setting `c` explicitly pins it until the next
/// [`Triangle::recompute_c`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Triangle {
    pub(crate) id: ShapeId,
    pub a: Point,
    pub b: Point,
    c: Point,
    derive_c: bool,
    #[serde(default)]
    pub rotation: i32,
    #[serde(default)]
    pub selected: bool,
    pub style: ShapeStyle,
}

impl Triangle {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            a: Point::ORIGIN,
            b: Point::ORIGIN,
            c: Point::ORIGIN,
            derive_c: true,
            rotation: 0,
            selected: false,
            style: ShapeStyle::default(),
        }
    }

    /// Create a triangle from all three vertices.
    pub fn from_vertices(a: Point, b: Point, c: Point) -> Self {
        let mut triangle = Self::new();
        triangle.a = a;
        triangle.b = b;
        triangle.set_c(c);
        triangle
    }

    /// Mirror image of `b` across the vertical through `a`.
    fn mirrored_c(a: Point, b: Point) -> Point {
        Point::new(a.x.saturating_sub(b.x.saturating_sub(a.x)), b.y)
    }

    pub fn c(&self) -> Point {
        self.c
    }

    /// Pin the third vertex.
    pub fn set_c(&mut self, c: Point) {
        self.c = c;
        self.derive_c = false;
    }

    /// Let the third vertex follow the anchors again.
    pub fn recompute_c(&mut self) {
        self.derive_c = true;
        self.sync_c();
    }

    pub fn derives_c(&self) -> bool {
        self.derive_c
    }

    fn sync_c(&mut self) {
        if self.derive_c {
            self.c = Self::mirrored_c(self.a, self.b);
        }
    }

    /// Move `b` by the delta and re-mirror `c` from the new `b`.
    pub fn resize(&mut self, dx: i32, dy: i32) {
        self.b.translate(dx, dy);
        self.c = Self::mirrored_c(self.a, self.b);
    }

    /// Integer centroid of the three vertices.
    pub fn centroid(&self) -> Point {
        Point::new(
            mean(&[self.a.x, self.b.x, self.c.x]),
            mean(&[self.a.y, self.b.y, self.c.y]),
        )
    }

    /// Box spanned by `b`/`c` horizontally and `a`/`b` vertically.
    fn box_corners(&self) -> (Point, Point) {
        let min = Point::new(self.b.x.min(self.c.x), self.a.y.min(self.b.y));
        let max = Point::new(self.b.x.max(self.c.x), self.a.y.max(self.b.y));
        (min, max)
    }

    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.a.to_kurbo());
        path.line_to(self.b.to_kurbo());
        path.line_to(self.c.to_kurbo());
        path.close_path();
        path
    }
}

impl Default for Triangle {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeTrait for Triangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Triangle
    }

    fn anchors(&self) -> (Point, Point) {
        (self.a, self.b)
    }

    fn set_anchor_a(&mut self, point: Point) {
        self.a = point;
        self.sync_c();
    }

    fn set_anchor_b(&mut self, point: Point) {
        self.b = point;
        self.sync_c();
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.a.translate(dx, dy);
        self.b.translate(dx, dy);
        if self.derive_c {
            self.sync_c();
        } else {
            self.c.translate(dx, dy);
        }
    }

    fn bounds(&self) -> Rect {
        let (min, max) = self.box_corners();
        Rect::from_points(min.to_kurbo(), max.to_kurbo())
    }

    fn hit_test(&self, point: Point) -> bool {
        let (min, max) = self.box_corners();
        strictly_inside(point, min, max)
    }

    fn draw(&self, painter: &mut dyn Painter, _ctx: &DrawContext) {
        let transform = rotation_about(self.rotation, self.centroid());
        paint_body(painter, &self.to_path(), transform, &self.style);
        if self.selected {
            paint_selection(painter, &rect_path(self.bounds()), transform);
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

    fn drawn(a: Point, b: Point) -> Triangle {
        let mut triangle = Triangle::new();
        triangle.set_anchor_a(a);
        triangle.set_anchor_b(b);
        triangle
    }

    #[test]
    fn test_c_is_mirrored_while_drawing() {
        let triangle = drawn(Point::new(50, 10), Point::new(80, 60));
        assert_eq!(triangle.c(), Point::new(20, 60));
    }

    #[test]
    fn test_resize_moves_b_and_mirrors_c() {
        let mut triangle = drawn(Point::new(10, 10), Point::new(20, 20));
        triangle.resize(10, 10);
        assert_eq!(triangle.b, Point::new(30, 30));
        assert_eq!(triangle.c(), Point::new(-10, 30));
        assert_eq!(triangle.a, Point::new(10, 10));
    }

    #[test]
    fn test_explicit_c_is_kept_until_recompute() {
        let mut triangle =
            Triangle::from_vertices(Point::new(0, 0), Point::new(10, 10), Point::new(-3, 7));
        triangle.set_anchor_b(Point::new(12, 12));
        assert_eq!(triangle.c(), Point::new(-3, 7));
        triangle.translate(1, 1);
        assert_eq!(triangle.c(), Point::new(-2, 8));

        triangle.recompute_c();
        assert!(triangle.derives_c());
        assert_eq!(triangle.c(), Point::new(-11, 13));
    }

    #[test]
    fn test_hit_test_box() {
        let triangle = drawn(Point::new(50, 10), Point::new(80, 60));
        // x range 20..80 from b/c, y range 10..60 from a/b.
        assert!(triangle.hit_test(Point::new(30, 50)));
        assert!(!triangle.hit_test(Point::new(20, 50)));
        assert!(!triangle.hit_test(Point::new(50, 10)));
        assert!(!triangle.hit_test(Point::new(85, 30)));
    }

    #[test]
    fn test_centroid() {
        let triangle = drawn(Point::new(50, 10), Point::new(80, 60));
        assert_eq!(triangle.centroid(), Point::new(50, 43));
    }
}
