//! Line shape.

use super::{ShapeId, ShapeKind, ShapeStyle, ShapeTrait, rotation_about};
use crate::geometry::{Point, strictly_between};
use crate::painter::{DrawContext, Painter, solid_stroke};
use kurbo::{BezPath, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A straight segment between its two anchors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: ShapeId,
    /// Start point.
    pub a: Point,
    /// End point.
    pub b: Point,
    /// Rotation in degrees about the midpoint.
    #[serde(default)]
    pub rotation: i32,
    #[serde(default)]
    pub selected: bool,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Line {
    pub fn new() -> Self {
        Self::between(Point::ORIGIN, Point::ORIGIN)
    }

    /// Create a line between two points.
    pub fn between(a: Point, b: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            a,
            b,
            rotation: 0,
            selected: false,
            style: ShapeStyle::default(),
        }
    }

    /// Get the midpoint of the line.
    pub fn midpoint(&self) -> Point {
        Point::midpoint(self.a, self.b)
    }

    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.a.to_kurbo());
        path.line_to(self.b.to_kurbo());
        path
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Line
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
        Rect::from_points(self.a.to_kurbo(), self.b.to_kurbo())
    }

    // Box test over the anchors, not distance to the segment.
    fn hit_test(&self, point: Point) -> bool {
        strictly_between(point.x, self.a.x, self.b.x)
            && strictly_between(point.y, self.a.y, self.b.y)
    }

    fn draw(&self, painter: &mut dyn Painter, _ctx: &DrawContext) {
        let transform = rotation_about(self.rotation, self.midpoint());
        painter.stroke(
            &self.to_path(),
            transform,
            &solid_stroke(f64::from(self.style.stroke_width)),
            self.style.stroke(),
        );
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
