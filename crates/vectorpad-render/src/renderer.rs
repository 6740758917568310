//! Renderer trait abstraction.

use kurbo::Size;
use peniko::Color;
use thiserror::Error;
use vectorpad_core::canvas::CanvasController;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Invalid viewport {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },
    #[error("Invalid scale factor: {0}")]
    InvalidScale(f64),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub controller: &'a CanvasController,
    /// Viewport size in logical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Overrides the canvas background when set.
    pub background_override: Option<Color>,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(controller: &'a CanvasController, viewport_size: Size) -> Self {
        Self {
            controller,
            viewport_size,
            scale_factor: 1.0,
            background_override: None,
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_override = Some(color);
        self
    }

    /// Background for clearing: the override, else the canvas color.
    pub fn background_color(&self) -> Color {
        self.background_override
            .unwrap_or_else(|| self.controller.background_color().into())
    }

    pub fn validate(&self) -> RenderResult<()> {
        let Size { width, height } = self.viewport_size;
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(RendererError::InvalidViewport { width, height });
        }
        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            return Err(RendererError::InvalidScale(self.scale_factor));
        }
        Ok(())
    }
}

/// Trait for rendering backends.
pub trait Renderer: Send + Sync {
    /// Build the scene/command buffer for a frame.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color()
    }
}
