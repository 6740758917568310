//! VectorPad Core Library
//!
//! Platform-agnostic shape model, interaction controller and wire format
//! for the VectorPad editor.

pub mod canvas;
pub mod client;
pub mod config;
pub mod geometry;
pub mod input;
pub mod painter;
pub mod registry;
pub mod shapes;
pub mod tools;
pub mod wire;

pub use canvas::{CanvasController, GestureOutcome};
pub use client::{ClientError, ClientEvent, ClientResult, ConnectionState, DrawingClient};
pub use config::{ClientConfig, ConfigError, ConfigResult, EditorConfig};
pub use geometry::Point;
pub use input::{Modifiers, PointerEvent};
pub use painter::{DisplayList, DrawContext, PaintOp, Painter};
pub use registry::ShapeRegistry;
pub use shapes::{Rgba, Shape, ShapeId, ShapeKind, ShapeStyle, ShapeTrait};
pub use tools::{ToolKind, ToolSettings, create_shape};
pub use wire::{ExportOutcome, Request, ShapeRecord, ShapeType, WireError, WireResult};
