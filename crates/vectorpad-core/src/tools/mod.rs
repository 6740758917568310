//! Tool system and the shape factory.

use crate::shapes::{
    Circle, Cube, Ellipse, Freehand, Line, Rectangle, Rgba, Shape, ShapeStyle, Square, Triangle,
};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    Select,
    Fill,
    Resize,
    Eraser,
    #[default]
    Curve,
    Line,
    Rectangle,
    RoundedRectangle,
    Square,
    Oval,
    Circle,
    Triangle,
    Cube,
}

impl ToolKind {
    pub const ALL: [ToolKind; 13] = [
        ToolKind::Select,
        ToolKind::Fill,
        ToolKind::Resize,
        ToolKind::Eraser,
        ToolKind::Curve,
        ToolKind::Line,
        ToolKind::Rectangle,
        ToolKind::RoundedRectangle,
        ToolKind::Square,
        ToolKind::Oval,
        ToolKind::Circle,
        ToolKind::Triangle,
        ToolKind::Cube,
    ];

    /// Curve and eraser commit one segment per drag tick.
    pub fn is_freehand(self) -> bool {
        matches!(self, ToolKind::Curve | ToolKind::Eraser)
    }

    /// Whether the tool produces shapes (everything except select, fill and resize).
    pub fn is_drawing(self) -> bool {
        !matches!(self, ToolKind::Select | ToolKind::Fill | ToolKind::Resize)
    }

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Select => "Select",
            ToolKind::Fill => "Fill",
            ToolKind::Resize => "Resize",
            ToolKind::Eraser => "Eraser",
            ToolKind::Curve => "Curve",
            ToolKind::Line => "Line",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::RoundedRectangle => "Rounded Rectangle",
            ToolKind::Square => "Square",
            ToolKind::Oval => "Oval",
            ToolKind::Circle => "Circle",
            ToolKind::Triangle => "Triangle",
            ToolKind::Cube => "Cube",
        }
    }
}

/// Style applied to shapes as the tools create them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSettings {
    pub stroke_color: Rgba,
    pub stroke_width: u32,
    /// Color the fill tool applies.
    pub fill_color: Rgba,
}

impl ToolSettings {
    pub const DEFAULT_STROKE_WIDTH: u32 = 3;
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            stroke_color: Rgba::black(),
            stroke_width: Self::DEFAULT_STROKE_WIDTH,
            fill_color: Rgba::white(),
        }
    }
}

/// Build a fresh shape for a drawing tool with the current stroke settings.
/// Returns `None` for tools that do not draw.
pub fn create_shape(tool: ToolKind, settings: &ToolSettings) -> Option<Shape> {
    let mut shape = match tool {
        ToolKind::Eraser => Shape::Freehand(Freehand::eraser()),
        ToolKind::Curve => Shape::Freehand(Freehand::curve()),
        ToolKind::Line => Shape::Line(Line::new()),
        ToolKind::Rectangle => Shape::Rectangle(Rectangle::new()),
        ToolKind::RoundedRectangle => Shape::Rectangle(Rectangle::rounded()),
        ToolKind::Square => Shape::Square(Square::new()),
        ToolKind::Oval => Shape::Ellipse(Ellipse::new()),
        ToolKind::Circle => Shape::Circle(Circle::new()),
        ToolKind::Triangle => Shape::Triangle(Triangle::new()),
        ToolKind::Cube => Shape::Cube(Cube::new()),
        ToolKind::Select | ToolKind::Fill | ToolKind::Resize => return None,
    };
    *shape.style_mut() = ShapeStyle {
        stroke_color: settings.stroke_color,
        stroke_width: settings.stroke_width,
        ..ShapeStyle::default()
    };
    Some(shape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeKind;

    #[test]
    fn test_default_tool_is_curve() {
        assert_eq!(ToolKind::default(), ToolKind::Curve);
    }

    #[test]
    fn test_non_drawing_tools_make_no_shape() {
        let settings = ToolSettings::default();
        for tool in [ToolKind::Select, ToolKind::Fill, ToolKind::Resize] {
            assert!(!tool.is_drawing());
            assert!(create_shape(tool, &settings).is_none());
        }
    }

    #[test]
    fn test_every_drawing_tool_makes_its_kind() {
        let settings = ToolSettings::default();
        let expected = [
            (ToolKind::Eraser, ShapeKind::Eraser),
            (ToolKind::Curve, ShapeKind::Curve),
            (ToolKind::Line, ShapeKind::Line),
            (ToolKind::Rectangle, ShapeKind::Rectangle),
            (ToolKind::RoundedRectangle, ShapeKind::RoundedRectangle),
            (ToolKind::Square, ShapeKind::Square),
            (ToolKind::Oval, ShapeKind::Oval),
            (ToolKind::Circle, ShapeKind::Circle),
            (ToolKind::Triangle, ShapeKind::Triangle),
            (ToolKind::Cube, ShapeKind::Cube),
        ];
        for (tool, kind) in expected {
            let shape = create_shape(tool, &settings).unwrap();
            assert_eq!(shape.kind(), kind);
        }
        assert_eq!(
            ToolKind::ALL.iter().filter(|t| t.is_drawing()).count(),
            expected.len()
        );
    }

    #[test]
    fn test_shapes_copy_stroke_settings() {
        let settings = ToolSettings {
            stroke_color: Rgba::opaque(255, 0, 0),
            stroke_width: 7,
            fill_color: Rgba::opaque(0, 255, 0),
        };
        let shape = create_shape(ToolKind::Square, &settings).unwrap();
        assert_eq!(shape.style().stroke_color, Rgba::opaque(255, 0, 0));
        assert_eq!(shape.style().stroke_width, 7);
        // The fill color is only applied by the fill tool.
        assert!(!shape.style().filled);
        assert_eq!(shape.style().fill_color, Rgba::clear_white());
    }

    #[test]
    fn test_freehand_tools() {
        assert!(ToolKind::Curve.is_freehand());
        assert!(ToolKind::Eraser.is_freehand());
        assert!(!ToolKind::Line.is_freehand());
    }
}
