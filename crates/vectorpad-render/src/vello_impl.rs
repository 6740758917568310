//! Vello-based renderer implementation.

use crate::renderer::{RenderContext, RenderResult, Renderer};
use kurbo::{Affine, BezPath, Rect, Stroke};
use peniko::{Color, Fill};
use vectorpad_core::painter::Painter;
use vello::Scene;

/// Adapts a Vello scene to the core [`Painter`] trait.
///
/// `base` is applied on top of every shape transform (HiDPI scaling).
pub struct VelloPainter<'a> {
    scene: &'a mut Scene,
    base: Affine,
}

impl<'a> VelloPainter<'a> {
    pub fn new(scene: &'a mut Scene, base: Affine) -> Self {
        Self { scene, base }
    }
}

impl Painter for VelloPainter<'_> {
    fn fill(&mut self, path: &BezPath, transform: Affine, color: Color) {
        self.scene
            .fill(Fill::NonZero, self.base * transform, color, None, path);
    }

    fn stroke(&mut self, path: &BezPath, transform: Affine, stroke: &Stroke, color: Color) {
        self.scene
            .stroke(stroke, self.base * transform, color, None, path);
    }
}

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        self.scene.reset();
        ctx.validate()?;

        let transform = Affine::scale(ctx.scale_factor);
        let viewport = Rect::new(0.0, 0.0, ctx.viewport_size.width, ctx.viewport_size.height);
        self.scene.fill(
            Fill::NonZero,
            transform,
            ctx.background_color(),
            None,
            &viewport,
        );

        let mut painter = VelloPainter::new(&mut self.scene, transform);
        ctx.controller.render(&mut painter);
        log::trace!(
            "Built scene with {} shapes",
            ctx.controller.registry().len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;
    use vectorpad_core::canvas::CanvasController;
    use vectorpad_core::geometry::Point;
    use vectorpad_core::input::Modifiers;
    use vectorpad_core::tools::ToolKind;

    #[test]
    fn test_renderer_creation() {
        let renderer = VelloRenderer::new();
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_build_empty_scene_paints_background() {
        let mut renderer = VelloRenderer::new();
        let controller = CanvasController::new();
        let ctx = RenderContext::new(&controller, Size::new(800.0, 600.0));
        renderer.build_scene(&ctx).unwrap();
        assert!(!renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_build_scene_with_shapes() {
        let mut controller = CanvasController::new();
        controller.set_tool(ToolKind::Rectangle);
        controller.pointer_down(Point::new(100, 100), Modifiers::NONE);
        controller.pointer_up(Point::new(300, 250), Modifiers::NONE);

        let mut empty = VelloRenderer::new();
        empty
            .build_scene(&RenderContext::new(&CanvasController::new(), Size::new(800.0, 600.0)))
            .unwrap();

        let mut renderer = VelloRenderer::new();
        let ctx = RenderContext::new(&controller, Size::new(800.0, 600.0));
        renderer.build_scene(&ctx).unwrap();
        assert!(
            renderer.scene().encoding().path_tags.len() > empty.scene().encoding().path_tags.len()
        );
    }

    #[test]
    fn test_invalid_context_leaves_scene_empty() {
        let mut renderer = VelloRenderer::new();
        let controller = CanvasController::new();
        let ctx = RenderContext::new(&controller, Size::new(0.0, 0.0));
        assert!(renderer.build_scene(&ctx).is_err());
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_take_scene_resets() {
        let mut renderer = VelloRenderer::new();
        let controller = CanvasController::new();
        renderer
            .build_scene(&RenderContext::new(&controller, Size::new(10.0, 10.0)))
            .unwrap();
        let scene = renderer.take_scene();
        assert!(!scene.encoding().is_empty());
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_painter_writes_into_scene() {
        let mut scene = Scene::new();
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 10.0));
        {
            let mut painter = VelloPainter::new(&mut scene, Affine::IDENTITY);
            painter.stroke(&path, Affine::IDENTITY, &Stroke::new(2.0), Color::BLACK);
        }
        assert!(!scene.encoding().is_empty());
    }
}
