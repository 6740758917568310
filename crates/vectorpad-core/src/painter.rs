//! Drawing surface abstraction used by shapes.
//!
//! Shapes describe themselves as filled and stroked kurbo paths; a [`Painter`]
//! turns those into pixels (or records them, see [`DisplayList`]).

use kurbo::{Affine, BezPath, Cap, Join, Stroke};
use peniko::Color;

/// Width of the dashed outline drawn around selected shapes.
pub const SELECTION_OUTLINE_WIDTH: f64 = 3.0;

/// Dash pattern of the selection outline.
pub const SELECTION_DASH: [f64; 2] = [10.0, 10.0];

/// Light gray used for the selection outline.
pub fn selection_outline_color() -> Color {
    Color::from_rgba8(192, 192, 192, 255)
}

/// Solid stroke with round caps and bevel joins.
pub fn solid_stroke(width: f64) -> Stroke {
    Stroke::new(width).with_caps(Cap::Round).with_join(Join::Bevel)
}

/// Dashed stroke used for selection outlines.
pub fn selection_stroke() -> Stroke {
    solid_stroke(SELECTION_OUTLINE_WIDTH).with_dashes(0.0, SELECTION_DASH)
}

/// A target that shapes can paint into.
pub trait Painter {
    /// Fill a closed path.
    fn fill(&mut self, path: &BezPath, transform: Affine, color: Color);

    /// Stroke a path.
    fn stroke(&mut self, path: &BezPath, transform: Affine, stroke: &Stroke, color: Color);
}

/// Per-frame information shapes may need while drawing.
#[derive(Debug, Clone, Copy)]
pub struct DrawContext {
    /// Canvas background; eraser strokes paint with it.
    pub background: Color,
}

impl DrawContext {
    pub fn new(background: Color) -> Self {
        Self { background }
    }
}

impl Default for DrawContext {
    fn default() -> Self {
        Self::new(Color::WHITE)
    }
}

/// A single recorded drawing command.
#[derive(Debug, Clone)]
pub enum PaintOp {
    Fill {
        path: BezPath,
        transform: Affine,
        color: Color,
    },
    Stroke {
        path: BezPath,
        transform: Affine,
        stroke: Stroke,
        color: Color,
    },
}

impl PaintOp {
    pub fn is_fill(&self) -> bool {
        matches!(self, PaintOp::Fill { .. })
    }

    pub fn color(&self) -> Color {
        match self {
            PaintOp::Fill { color, .. } | PaintOp::Stroke { color, .. } => *color,
        }
    }

    /// Whether this is a dashed stroke (selection outline).
    pub fn is_dashed(&self) -> bool {
        match self {
            PaintOp::Stroke { stroke, .. } => !stroke.dash_pattern.is_empty(),
            PaintOp::Fill { .. } => false,
        }
    }
}

/// Painter that records commands instead of rasterizing them.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    ops: Vec<PaintOp>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[PaintOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Replay every recorded command into another painter.
    pub fn replay(&self, painter: &mut dyn Painter) {
        for op in &self.ops {
            match op {
                PaintOp::Fill {
                    path,
                    transform,
                    color,
                } => painter.fill(path, *transform, *color),
                PaintOp::Stroke {
                    path,
                    transform,
                    stroke,
                    color,
                } => painter.stroke(path, *transform, stroke, *color),
            }
        }
    }
}

impl Painter for DisplayList {
    fn fill(&mut self, path: &BezPath, transform: Affine, color: Color) {
        self.ops.push(PaintOp::Fill {
            path: path.clone(),
            transform,
            color,
        });
    }

    fn stroke(&mut self, path: &BezPath, transform: Affine, stroke: &Stroke, color: Color) {
        self.ops.push(PaintOp::Stroke {
            path: path.clone(),
            transform,
            stroke: stroke.clone(),
            color,
        });
    }
}
