//! Freehand segments drawn by the curve and eraser tools.

use super::{ShapeId, ShapeKind, ShapeStyle, ShapeTrait};
use crate::geometry::Point;
use crate::painter::{DrawContext, Painter, solid_stroke};
use kurbo::{Affine, BezPath, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a freehand segment paints with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FreehandKind {
    /// Ink in the stroke color.
    Curve,
    /// Ink in the canvas background color.
    Eraser,
}

/// One short segment of a freehand stroke.
///
/// A stroke is a chain of these, each committed separately, so they are
/// never selectable or resizable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Freehand {
    pub(crate) id: ShapeId,
    pub kind: FreehandKind,
    pub a: Point,
    pub b: Point,
    #[serde(default)]
    pub selected: bool,
    pub style: ShapeStyle,
}

impl Freehand {
    pub fn new(kind: FreehandKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            a: Point::ORIGIN,
            b: Point::ORIGIN,
            selected: false,
            style: ShapeStyle::default(),
        }
    }

    pub fn curve() -> Self {
        Self::new(FreehandKind::Curve)
    }

    pub fn eraser() -> Self {
        Self::new(FreehandKind::Eraser)
    }

    pub fn is_eraser(&self) -> bool {
        self.kind == FreehandKind::Eraser
    }
}

impl ShapeTrait for Freehand {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        match self.kind {
            FreehandKind::Curve => ShapeKind::Curve,
            FreehandKind::Eraser => ShapeKind::Eraser,
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
        Rect::from_points(self.a.to_kurbo(), self.b.to_kurbo())
    }

    fn hit_test(&self, _point: Point) -> bool {
        false
    }

    fn draw(&self, painter: &mut dyn Painter, ctx: &DrawContext) {
        let color = match self.kind {
            FreehandKind::Curve => self.style.stroke(),
            FreehandKind::Eraser => ctx.background,
        };
        let mut path = BezPath::new();
        path.move_to(self.a.to_kurbo());
        path.line_to(self.b.to_kurbo());
        painter.stroke(
            &path,
            Affine::IDENTITY,
            &solid_stroke(f64::from(self.style.stroke_width)),
            color,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::painter::DisplayList;
    use crate::shapes::Rgba;
    use peniko::Color;

    #[test]
    fn test_never_hit() {
        let mut segment = Freehand::curve();
        segment.a = Point::new(-100, -100);
        segment.b = Point::new(100, 100);
        for p in [Point::ORIGIN, Point::new(50, 50), Point::new(-100, -100)] {
            assert!(!segment.hit_test(p));
        }
        assert!(!Freehand::eraser().hit_test(Point::ORIGIN));
    }

    #[test]
    fn test_eraser_paints_background() {
        let mut eraser = Freehand::eraser();
        eraser.b = Point::new(10, 0);
        let mut list = DisplayList::new();
        let background = Color::from_rgba8(12, 34, 56, 255);
        eraser.draw(&mut list, &DrawContext::new(background));
        assert_eq!(Rgba::from(list.ops()[0].color()), Rgba::opaque(12, 34, 56));
    }

    #[test]
    fn test_curve_paints_stroke_color() {
        let mut curve = Freehand::curve();
        curve.style.stroke_color = Rgba::opaque(255, 0, 0);
        let mut list = DisplayList::new();
        curve.draw(&mut list, &DrawContext::default());
        assert_eq!(Rgba::from(list.ops()[0].color()), Rgba::opaque(255, 0, 0));
    }

    #[test]
    fn test_kind() {
        assert_eq!(Freehand::curve().kind(), ShapeKind::Curve);
        assert_eq!(Freehand::eraser().kind(), ShapeKind::Eraser);
        assert!(Freehand::eraser().is_eraser());
    }
}
