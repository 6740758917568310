//! Square shape.

use super::{
    ShapeId, ShapeKind, ShapeStyle, ShapeTrait, paint_body, paint_selection, rect_from, rect_path,
    rotation_about, strictly_inside,
};
use crate::geometry::Point;
use crate::painter::{DrawContext, Painter};
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A square anchored at the top-left of its anchors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Square {
    pub(crate) id: ShapeId,
    pub a: Point,
    pub b: Point,
    pub side: i32,
    #[serde(default)]
    pub rotation: i32,
    #[serde(default)]
    pub selected: bool,
    pub style: ShapeStyle,
}

impl Square {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            a: Point::ORIGIN,
            b: Point::ORIGIN,
            side: 0,
            rotation: 0,
            selected: false,
            style: ShapeStyle::default(),
        }
    }

    pub fn at(origin: Point, side: i32) -> Self {
        let mut square = Self::new();
        square.a = origin;
        square.b = origin;
        square.set_side(side);
        square
    }

    pub fn origin(&self) -> Point {
        Point::min_corner(self.a, self.b)
    }

    pub fn set_side(&mut self, side: i32) {
        self.side = side.max(0);
    }

    /// Grow by the larger delta magnitude; any negative component shrinks.
    pub fn resize(&mut self, dx: i32, dy: i32) {
        let mut delta = dx.saturating_abs().max(dy.saturating_abs());
        if dx < 0 || dy < 0 {
            delta = -delta;
        }
        self.set_side(self.side.saturating_add(delta));
    }

    /// Side follows the anchor distance while drawing.
    pub(crate) fn stretch_to_anchors(&mut self) {
        self.set_side(self.a.distance(self.b) as i32);
    }

    pub fn center(&self) -> Point {
        self.origin().offset(self.side / 2, self.side / 2)
    }

    pub fn as_rect(&self) -> Rect {
        rect_from(self.origin(), self.side, self.side)
    }
}

impl Default for Square {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeTrait for Square {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Square
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
        strictly_inside(point, origin, origin.offset(self.side, self.side))
    }

    fn draw(&self, painter: &mut dyn Painter, _ctx: &DrawContext) {
        let transform = rotation_about(self.rotation, self.center());
        let path = rect_path(self.as_rect());
        paint_body(painter, &path, transform, &self.style);
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
