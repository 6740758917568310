//! Wireframe cube shape.

use super::{
    ShapeId, ShapeKind, ShapeStyle, ShapeTrait, paint_selection, rotation_about, strictly_inside,
};
use crate::geometry::Point;
use crate::painter::{DrawContext, Painter, solid_stroke};
use kurbo::{BezPath, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The eight corners of a cube drawn as two offset squares.
///
/// `a1..a4` is the front face clockwise from its top-left, `b1..b4` the
/// back face in the same order; `a1` and `b3` are opposite corners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CubeCorners {
    pub a1: Point,
    pub a2: Point,
    pub a3: Point,
    pub a4: Point,
    pub b1: Point,
    pub b2: Point,
    pub b3: Point,
    pub b4: Point,
}

impl CubeCorners {
    /// Front face from `a1`, back face from `b3`.
    fn span(a1: Point, b3: Point, edge: i32) -> Self {
        Self {
            a1,
            a2: a1.offset(edge, 0),
            a3: a1.offset(edge, edge),
            a4: a1.offset(0, edge),
            b1: b3.offset(-edge, -edge),
            b2: b3.offset(0, -edge),
            b3,
            b4: b3.offset(-edge, 0),
        }
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        for corner in self.all_mut() {
            corner.translate(dx, dy);
        }
    }

    fn all_mut(&mut self) -> [&mut Point; 8] {
        [
            &mut self.a1,
            &mut self.a2,
            &mut self.a3,
            &mut self.a4,
            &mut self.b1,
            &mut self.b2,
            &mut self.b3,
            &mut self.b4,
        ]
    }

    /// The twelve edges: both faces and the four connectors.
    pub fn edges(&self) -> [(Point, Point); 12] {
        [
            (self.a1, self.a2),
            (self.a2, self.a3),
            (self.a3, self.a4),
            (self.a4, self.a1),
            (self.a1, self.b1),
            (self.a2, self.b2),
            (self.a3, self.b3),
            (self.a4, self.b4),
            (self.b1, self.b2),
            (self.b2, self.b3),
            (self.b3, self.b4),
            (self.b4, self.b1),
        ]
    }
}

/// A cube whose edge is a third of the anchor distance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cube {
    pub(crate) id: ShapeId,
    pub a: Point,
    pub b: Point,
    pub edge: i32,
    corners: CubeCorners,
    /// Stored angle in degrees, applied about the center when drawing.
    #[serde(default)]
    pub rotation: i32,
    #[serde(default)]
    pub selected: bool,
    pub style: ShapeStyle,
}

impl Cube {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            a: Point::ORIGIN,
            b: Point::ORIGIN,
            edge: 0,
            corners: CubeCorners::default(),
            rotation: 0,
            selected: false,
            style: ShapeStyle::default(),
        }
    }

    pub fn corners(&self) -> &CubeCorners {
        &self.corners
    }

    /// Derive edge and corners from the anchors.
    fn fit_anchors(&mut self) {
        self.edge = (self.a.distance(self.b) / 3.0) as i32;
        self.corners = CubeCorners::span(
            Point::min_corner(self.a, self.b),
            Point::max_corner(self.a, self.b),
            self.edge,
        );
    }

    /// Grow the edge by the larger delta component; the front face stays
    /// put and the back face is placed one edge beyond it.
    pub fn resize(&mut self, dx: i32, dy: i32) {
        self.edge = self.edge.saturating_add(dx.max(dy)).max(0);
        let a1 = self.corners.a1;
        let diagonal = self.edge.saturating_mul(2);
        self.corners = CubeCorners::span(a1, a1.offset(diagonal, diagonal), self.edge);
    }

    pub fn center(&self) -> Point {
        Point::midpoint(self.corners.a1, self.corners.b3)
    }

    fn wireframe(corners: &CubeCorners) -> BezPath {
        let mut path = BezPath::new();
        for (from, to) in corners.edges() {
            path.move_to(from.to_kurbo());
            path.line_to(to.to_kurbo());
        }
        path
    }
}

impl Default for Cube {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeTrait for Cube {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Cube
    }

    fn anchors(&self) -> (Point, Point) {
        (self.a, self.b)
    }

    fn set_anchor_a(&mut self, point: Point) {
        self.a = point;
        self.fit_anchors();
    }

    fn set_anchor_b(&mut self, point: Point) {
        self.b = point;
        self.fit_anchors();
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.a.translate(dx, dy);
        self.b.translate(dx, dy);
        self.corners.translate(dx, dy);
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.corners.a1.to_kurbo(), self.corners.b3.to_kurbo())
    }

    fn hit_test(&self, point: Point) -> bool {
        strictly_inside(point, self.corners.a1, self.corners.b3)
    }

    fn draw(&self, painter: &mut dyn Painter, _ctx: &DrawContext) {
        let transform = rotation_about(self.rotation, self.center());
        let path = Self::wireframe(&self.corners);
        painter.stroke(
            &path,
            transform,
            &solid_stroke(f64::from(self.style.stroke_width)),
            self.style.stroke(),
        );
        if self.selected {
            paint_selection(painter, &path, transform);
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

    fn drawn(a: Point, b: Point) -> Cube {
        let mut cube = Cube::new();
        cube.set_anchor_a(a);
        cube.set_anchor_b(b);
        cube
    }

    #[test]
    fn test_edge_is_third_of_distance() {
        let cube = drawn(Point::new(0, 0), Point::new(60, 80));
        assert_eq!(cube.edge, 33);
        let corners = cube.corners();
        assert_eq!(corners.a1, Point::new(0, 0));
        assert_eq!(corners.a3, Point::new(33, 33));
        assert_eq!(corners.b3, Point::new(60, 80));
        assert_eq!(corners.b1, Point::new(27, 47));
    }

    #[test]
    fn test_resize_grows_from_front_face() {
        let mut cube = drawn(Point::new(10, 10), Point::new(40, 10));
        assert_eq!(cube.edge, 10);
        cube.resize(5, 2);
        assert_eq!(cube.edge, 15);
        let corners = cube.corners();
        assert_eq!(corners.a1, Point::new(10, 10));
        assert_eq!(corners.a2, Point::new(25, 10));
        assert_eq!(corners.b3, Point::new(40, 40));
        assert_eq!(corners.b1, Point::new(25, 25));
    }

    #[test]
    fn test_resize_floors_edge() {
        let mut cube = drawn(Point::new(0, 0), Point::new(30, 0));
        cube.resize(-50, -20);
        assert_eq!(cube.edge, 0);
        assert_eq!(cube.corners().b3, cube.corners().a1);
    }

    #[test]
    fn test_hit_test() {
        let cube = drawn(Point::new(0, 0), Point::new(30, 30));
        assert!(cube.hit_test(Point::new(15, 15)));
        assert!(!cube.hit_test(Point::new(0, 15)));
        assert!(!cube.hit_test(Point::new(30, 15)));
    }

    #[test]
    fn test_translate_keeps_resized_geometry() {
        let mut cube = drawn(Point::new(0, 0), Point::new(30, 0));
        cube.resize(10, 0);
        cube.translate(5, 5);
        assert_eq!(cube.edge, 20);
        assert_eq!(cube.corners().a1, Point::new(5, 5));
        assert_eq!(cube.corners().b3, Point::new(45, 45));
    }

    #[test]
    fn test_twelve_edges() {
        let cube = drawn(Point::new(0, 0), Point::new(30, 30));
        assert_eq!(cube.corners().edges().len(), 12);
    }
}
