//! JSON wire format shared by the client and the drawing server.

pub mod color;
pub mod record;

pub use color::{nearest_color_name, parse_color};
pub use record::{
    ExportOutcome, Properties, Reply, Request, ShapeRecord, ShapeType, decode_records,
    export_shape, import_record, owned_records,
};

use crate::shapes::ShapeKind;
use thiserror::Error;

/// Errors that can occur while encoding or decoding wire data.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{shape_type} record is missing `{field}`")]
    MissingProperty {
        shape_type: ShapeType,
        field: &'static str,
    },
    #[error("expected a JSON array of drawings")]
    NotAnArray,
    #[error("No shape selected")]
    NothingSelected,
    #[error("Unsupported shape type")]
    Unsupported(ShapeKind),
    #[error("shape has not been uploaded")]
    NotUploaded,
}

/// Result type for wire operations.
pub type WireResult<T> = Result<T, WireError>;
