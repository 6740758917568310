//! Shape definitions for the canvas.

mod circle;
mod cube;
mod ellipse;
mod freehand;
mod line;
mod rectangle;
mod square;
mod triangle;

pub use circle::Circle;
pub use cube::{Cube, CubeCorners};
pub use ellipse::Ellipse;
pub use freehand::{Freehand, FreehandKind};
pub use line::Line;
pub use rectangle::Rectangle;
pub use square::Square;
pub use triangle::Triangle;

use crate::geometry::Point;
use crate::painter::{DrawContext, Painter, selection_outline_color, selection_stroke, solid_stroke};
use kurbo::{Affine, BezPath, Rect, Shape as KurboShape};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::opaque(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::opaque(255, 255, 255)
    }

    /// Fully transparent white, the default fill of a new shape.
    pub const fn clear_white() -> Self {
        Self::new(255, 255, 255, 0)
    }

    /// Fully transparent black, used for wire shapes without a fill.
    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Style properties shared by every shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Outline color.
    pub stroke_color: Rgba,
    /// Interior color, painted only when `filled` is set.
    pub fill_color: Rgba,
    /// Outline width in pixels.
    pub stroke_width: u32,
    /// Whether the interior is painted.
    pub filled: bool,
}

impl ShapeStyle {
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    pub fn fill(&self) -> Option<Color> {
        self.filled.then(|| self.fill_color.into())
    }

    pub fn set_stroke(&mut self, color: Color) {
        self.stroke_color = color.into();
    }

    /// Set the fill color and turn filling on.
    pub fn set_fill(&mut self, color: Color) {
        self.fill_color = color.into();
        self.filled = true;
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: Rgba::black(),
            fill_color: Rgba::clear_white(),
            stroke_width: 1,
            filled: false,
        }
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Discriminant naming what a shape is, independent of its storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Line,
    Curve,
    Eraser,
    Rectangle,
    RoundedRectangle,
    Square,
    Oval,
    Circle,
    Triangle,
    Cube,
}

impl ShapeKind {
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Line => "Line",
            ShapeKind::Curve => "Curve",
            ShapeKind::Eraser => "Eraser",
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::RoundedRectangle => "Rounded Rectangle",
            ShapeKind::Square => "Square",
            ShapeKind::Oval => "Oval",
            ShapeKind::Circle => "Circle",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Cube => "Cube",
        }
    }
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    fn kind(&self) -> ShapeKind;

    /// The two defining anchors (corners or endpoints).
    fn anchors(&self) -> (Point, Point);

    fn set_anchor_a(&mut self, point: Point);

    fn set_anchor_b(&mut self, point: Point);

    /// Shift the whole shape by a delta.
    fn translate(&mut self, dx: i32, dy: i32);

    /// Unrotated bounding box.
    fn bounds(&self) -> Rect;

    /// Strict point-in-bounds test; boundary points never hit.
    fn hit_test(&self, point: Point) -> bool;

    /// Paint the shape, including its selection outline when selected.
    fn draw(&self, painter: &mut dyn Painter, ctx: &DrawContext);

    fn style(&self) -> &ShapeStyle;

    fn style_mut(&mut self) -> &mut ShapeStyle;

    fn is_selected(&self) -> bool;

    fn set_selected(&mut self, selected: bool);
}

/// Enum wrapper for all shape types.
///
/// `resize` and `rotate` form a total table over the variants: variants
/// without the capability answer `false` and stay untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Shape {
    Line(Line),
    Freehand(Freehand),
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Square(Square),
    Circle(Circle),
    Triangle(Triangle),
    Cube(Cube),
}

macro_rules! dispatch {
    ($self:expr, $s:ident => $body:expr) => {
        match $self {
            Shape::Line($s) => $body,
            Shape::Freehand($s) => $body,
            Shape::Rectangle($s) => $body,
            Shape::Ellipse($s) => $body,
            Shape::Square($s) => $body,
            Shape::Circle($s) => $body,
            Shape::Triangle($s) => $body,
            Shape::Cube($s) => $body,
        }
    };
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        dispatch!(self, s => s.id())
    }

    pub fn kind(&self) -> ShapeKind {
        dispatch!(self, s => s.kind())
    }

    pub fn anchors(&self) -> (Point, Point) {
        dispatch!(self, s => s.anchors())
    }

    pub fn set_anchor_a(&mut self, point: Point) {
        dispatch!(self, s => s.set_anchor_a(point))
    }

    pub fn set_anchor_b(&mut self, point: Point) {
        dispatch!(self, s => s.set_anchor_b(point))
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        dispatch!(self, s => s.translate(dx, dy))
    }

    pub fn bounds(&self) -> Rect {
        dispatch!(self, s => s.bounds())
    }

    pub fn hit_test(&self, point: Point) -> bool {
        dispatch!(self, s => s.hit_test(point))
    }

    pub fn draw(&self, painter: &mut dyn Painter, ctx: &DrawContext) {
        dispatch!(self, s => s.draw(painter, ctx))
    }

    pub fn style(&self) -> &ShapeStyle {
        dispatch!(self, s => s.style())
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        dispatch!(self, s => s.style_mut())
    }

    pub fn is_selected(&self) -> bool {
        dispatch!(self, s => s.is_selected())
    }

    pub fn set_selected(&mut self, selected: bool) {
        dispatch!(self, s => s.set_selected(selected))
    }

    /// Check if this shape can be resized.
    pub fn supports_resize(&self) -> bool {
        !matches!(self, Shape::Line(_) | Shape::Freehand(_))
    }

    /// Grow or shrink the variant-specific extents. Returns `false` (and
    /// changes nothing) for variants without resize support.
    pub fn resize(&mut self, dx: i32, dy: i32) -> bool {
        match self {
            Shape::Rectangle(s) => s.resize(dx, dy),
            Shape::Ellipse(s) => s.resize(dx, dy),
            Shape::Square(s) => s.resize(dx, dy),
            Shape::Circle(s) => s.resize(dx, dy),
            Shape::Triangle(s) => s.resize(dx, dy),
            Shape::Cube(s) => s.resize(dx, dy),
            Shape::Line(_) | Shape::Freehand(_) => return false,
        }
        true
    }

    /// Check if this shape supports rotation.
    pub fn supports_rotation(&self) -> bool {
        !matches!(self, Shape::Freehand(_) | Shape::Circle(_))
    }

    /// Get the rotation angle in degrees (0 for shapes that don't rotate).
    pub fn rotation(&self) -> i32 {
        match self {
            Shape::Line(s) => s.rotation,
            Shape::Rectangle(s) => s.rotation,
            Shape::Ellipse(s) => s.rotation,
            Shape::Square(s) => s.rotation,
            Shape::Triangle(s) => s.rotation,
            Shape::Cube(s) => s.rotation,
            Shape::Freehand(_) | Shape::Circle(_) => 0,
        }
    }

    /// Store an absolute rotation angle in degrees. Returns `false` for
    /// variants that cannot rotate.
    pub fn rotate(&mut self, angle: i32) -> bool {
        match self {
            Shape::Line(s) => s.rotation = angle,
            Shape::Rectangle(s) => s.rotation = angle,
            Shape::Ellipse(s) => s.rotation = angle,
            Shape::Square(s) => s.rotation = angle,
            Shape::Triangle(s) => s.rotation = angle,
            Shape::Cube(s) => s.rotation = angle,
            Shape::Freehand(_) | Shape::Circle(_) => return false,
        }
        true
    }

    /// Release geometry derived from the anchors so it follows the next
    /// move or resize. Only the triangle's third vertex is affected.
    pub fn begin_manipulation(&mut self) {
        if let Shape::Triangle(t) = self {
            t.recompute_c();
        }
    }

    /// Re-derive the rubber-band extents from the anchors while drawing.
    /// `constrain` squares off rectangles and ovals.
    pub fn stretch_to_anchors(&mut self, constrain: bool) {
        match self {
            Shape::Rectangle(s) => s.stretch_to_anchors(constrain && !s.is_rounded()),
            Shape::Ellipse(s) => s.stretch_to_anchors(constrain),
            Shape::Square(s) => s.stretch_to_anchors(),
            Shape::Circle(s) => s.stretch_to_anchors(),
            Shape::Line(_)
            | Shape::Freehand(_)
            | Shape::Triangle(_)
            | Shape::Cube(_) => {}
        }
    }

    /// Whether this shape is a freehand segment.
    pub fn is_freehand(&self) -> bool {
        matches!(self, Shape::Freehand(_))
    }

    pub fn as_triangle(&self) -> Option<&Triangle> {
        match self {
            Shape::Triangle(t) => Some(t),
            _ => None,
        }
    }

    /// Regenerate the shape's ID with a new unique identifier.
    pub fn regenerate_id(&mut self) {
        let new_id = Uuid::new_v4();
        dispatch!(self, s => s.id = new_id)
    }
}

/// Rotation by whole degrees about a pixel center.
pub(crate) fn rotation_about(degrees: i32, center: Point) -> Affine {
    if degrees == 0 {
        Affine::IDENTITY
    } else {
        Affine::rotate_about(f64::from(degrees).to_radians(), center.to_kurbo())
    }
}

/// Box spanned by an origin and an extent.
pub(crate) fn rect_from(origin: Point, width: i32, height: i32) -> Rect {
    Rect::new(
        f64::from(origin.x),
        f64::from(origin.y),
        f64::from(origin.x.saturating_add(width)),
        f64::from(origin.y.saturating_add(height)),
    )
}

/// Strict open-box test shared by the box-shaped variants.
pub(crate) fn strictly_inside(point: Point, min: Point, max: Point) -> bool {
    min.x < point.x && point.x < max.x && min.y < point.y && point.y < max.y
}

/// Fill (when enabled) then outline a closed path.
pub(crate) fn paint_body(
    painter: &mut dyn Painter,
    path: &BezPath,
    transform: Affine,
    style: &ShapeStyle,
) {
    if let Some(fill) = style.fill() {
        painter.fill(path, transform, fill);
    }
    painter.stroke(
        path,
        transform,
        &solid_stroke(f64::from(style.stroke_width)),
        style.stroke(),
    );
}

/// Dashed light-gray outline around a selected shape.
pub(crate) fn paint_selection(painter: &mut dyn Painter, outline: &BezPath, transform: Affine) {
    painter.stroke(outline, transform, &selection_stroke(), selection_outline_color());
}

pub(crate) fn rect_path(rect: Rect) -> BezPath {
    rect.to_path(0.1)
}
