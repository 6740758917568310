//! Drawing records and request envelopes exchanged with the drawing server.

use super::color::{nearest_color_name, parse_color};
use super::{WireError, WireResult};
use crate::geometry::Point;
use crate::shapes::{Ellipse, Line, Rectangle, Rgba, Shape, ShapeKind, ShapeStyle, Triangle};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape kinds the wire format can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Rectangle,
    Ellipse,
    Triangle,
    Line,
}

impl ShapeType {
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeType::Rectangle => "rectangle",
            ShapeType::Ellipse => "ellipse",
            ShapeType::Triangle => "triangle",
            ShapeType::Line => "line",
        }
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific properties of a record.
///
/// Field order matches the order the properties are written in for every
/// record type; absent fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Properties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x2: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y2: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x3: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y3: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<u32>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// One drawing as stored on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeRecord {
    /// Server-assigned id; absent on records that were never uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub shape_type: ShapeType,
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub properties: Properties,
    /// Whether the requesting session created this drawing.
    #[serde(rename = "isOwner", default, skip_serializing_if = "is_false")]
    pub is_owner: bool,
}

impl ShapeRecord {
    pub fn new(shape_type: ShapeType, x: i32, y: i32, properties: Properties) -> Self {
        Self {
            id: None,
            shape_type,
            x,
            y,
            properties,
            is_owner: false,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    fn require<T>(&self, value: Option<T>, field: &'static str) -> WireResult<T> {
        value.ok_or(WireError::MissingProperty {
            shape_type: self.shape_type,
            field,
        })
    }
}

/// Request envelope, one JSON object per line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "camelCase")]
pub enum Request {
    Login { token: String },
    GetDrawings,
    AddDrawing(ShapeRecord),
    UpdateDrawing(ShapeRecord),
    DeleteDrawing { id: String },
}

impl Request {
    pub fn action(&self) -> &'static str {
        match self {
            Request::Login { .. } => "login",
            Request::GetDrawings => "getDrawings",
            Request::AddDrawing(_) => "addDrawing",
            Request::UpdateDrawing(_) => "updateDrawing",
            Request::DeleteDrawing { .. } => "deleteDrawing",
        }
    }

    pub fn to_line(&self) -> WireResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Status reply for every request other than `getDrawings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Reply {
    pub const OK: &'static str = "ok";
    pub const ERROR: &'static str = "error";

    pub fn ok() -> Self {
        Self {
            status: Self::OK.to_string(),
            id: None,
            message: None,
        }
    }

    pub fn created(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::ok()
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Self::ERROR.to_string(),
            id: None,
            message: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Self::OK
    }
}

/// Result of turning a shape into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Record(ShapeRecord),
    /// The shape has no wire representation.
    Unsupported(ShapeKind),
    NothingSelected,
}

impl ExportOutcome {
    /// User-facing message for the sentinel outcomes.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ExportOutcome::Record(_) => None,
            ExportOutcome::Unsupported(_) => Some("Unsupported shape type"),
            ExportOutcome::NothingSelected => Some("No shape selected"),
        }
    }

    pub fn into_record(self) -> Option<ShapeRecord> {
        match self {
            ExportOutcome::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn into_result(self) -> WireResult<ShapeRecord> {
        match self {
            ExportOutcome::Record(record) => Ok(record),
            ExportOutcome::Unsupported(kind) => Err(WireError::Unsupported(kind)),
            ExportOutcome::NothingSelected => Err(WireError::NothingSelected),
        }
    }
}

fn color_name(color: Rgba) -> Option<String> {
    Some(nearest_color_name(color).to_string())
}

fn box_properties(width: i32, height: i32, rotation: i32, style: &ShapeStyle) -> Properties {
    Properties {
        width: Some(width),
        height: Some(height),
        rotation: Some(rotation),
        border_color: color_name(style.stroke_color),
        border_width: Some(style.stroke_width),
        fill_color: color_name(style.fill_color),
        ..Properties::default()
    }
}

/// Encode a shape. Colors are snapped to the nearest palette name.
pub fn export_shape(shape: &Shape) -> ExportOutcome {
    let record = match shape {
        Shape::Rectangle(rect) if !rect.is_rounded() => {
            let origin = rect.origin();
            ShapeRecord::new(
                ShapeType::Rectangle,
                origin.x,
                origin.y,
                box_properties(rect.width, rect.height, rect.rotation, &rect.style),
            )
        }
        Shape::Ellipse(ellipse) => {
            let origin = ellipse.origin();
            ShapeRecord::new(
                ShapeType::Ellipse,
                origin.x,
                origin.y,
                box_properties(ellipse.width, ellipse.height, ellipse.rotation, &ellipse.style),
            )
        }
        Shape::Triangle(triangle) => {
            let c = triangle.c();
            let properties = Properties {
                x2: Some(triangle.b.x),
                y2: Some(triangle.b.y),
                x3: Some(c.x),
                y3: Some(c.y),
                rotation: Some(triangle.rotation),
                border_color: color_name(triangle.style.stroke_color),
                border_width: Some(triangle.style.stroke_width),
                fill_color: color_name(triangle.style.fill_color),
                ..Properties::default()
            };
            ShapeRecord::new(ShapeType::Triangle, triangle.a.x, triangle.a.y, properties)
        }
        Shape::Line(line) => {
            let properties = Properties {
                x2: Some(line.b.x),
                y2: Some(line.b.y),
                line_color: color_name(line.style.stroke_color),
                line_width: Some(line.style.stroke_width),
                ..Properties::default()
            };
            ShapeRecord::new(ShapeType::Line, line.a.x, line.a.y, properties)
        }
        other => return ExportOutcome::Unsupported(other.kind()),
    };
    ExportOutcome::Record(record)
}

/// Style of an imported box shape: the bordered form fills with its fill
/// color, the line-colored form fills with transparent black.
fn imported_box_style(record: &ShapeRecord) -> WireResult<(ShapeStyle, i32)> {
    let props = &record.properties;
    let mut style = ShapeStyle {
        filled: true,
        ..ShapeStyle::default()
    };
    if let Some(border) = &props.border_color {
        let fill = record.require(props.fill_color.as_deref(), "fillColor")?;
        style.stroke_color = parse_color(border);
        style.fill_color = parse_color(fill);
        if let Some(width) = props.border_width {
            style.stroke_width = width;
        }
        Ok((style, props.rotation.unwrap_or(0)))
    } else {
        let line = record.require(props.line_color.as_deref(), "borderColor")?;
        style.stroke_color = parse_color(line);
        style.fill_color = Rgba::transparent();
        Ok((style, 0))
    }
}

/// Decode a record into a shape.
pub fn import_record(record: &ShapeRecord) -> WireResult<Shape> {
    let props = &record.properties;
    let origin = Point::new(record.x, record.y);
    let shape = match record.shape_type {
        ShapeType::Rectangle => {
            let width = record.require(props.width, "width")?;
            let height = record.require(props.height, "height")?;
            let (style, rotation) = imported_box_style(record)?;
            let mut rect = Rectangle::at(origin, width, height);
            rect.style = style;
            rect.rotation = rotation;
            Shape::Rectangle(rect)
        }
        ShapeType::Ellipse => {
            let width = record.require(props.width, "width")?;
            let height = record.require(props.height, "height")?;
            let (style, rotation) = imported_box_style(record)?;
            let mut ellipse = Ellipse::at(origin, width, height);
            ellipse.style = style;
            ellipse.rotation = rotation;
            Shape::Ellipse(ellipse)
        }
        ShapeType::Triangle => {
            let b = Point::new(record.require(props.x2, "x2")?, record.require(props.y2, "y2")?);
            let c = Point::new(record.require(props.x3, "x3")?, record.require(props.y3, "y3")?);
            let border = record.require(props.border_color.as_deref(), "borderColor")?;
            let fill = record.require(props.fill_color.as_deref(), "fillColor")?;
            let mut triangle = Triangle::from_vertices(origin, b, c);
            triangle.style = ShapeStyle {
                stroke_color: parse_color(border),
                fill_color: parse_color(fill),
                stroke_width: props.border_width.unwrap_or(1),
                filled: true,
            };
            triangle.rotation = props.rotation.unwrap_or(0);
            Shape::Triangle(triangle)
        }
        ShapeType::Line => {
            let b = Point::new(record.require(props.x2, "x2")?, record.require(props.y2, "y2")?);
            let color = record.require(props.line_color.as_deref(), "lineColor")?;
            let mut line = Line::between(origin, b);
            line.style.stroke_color = parse_color(color);
            line.style.stroke_width = props.line_width.unwrap_or(1);
            Shape::Line(line)
        }
    };
    Ok(shape)
}

/// Parse a `getDrawings` response. Records that fail to parse are skipped.
pub fn decode_records(json: &str) -> WireResult<Vec<ShapeRecord>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let serde_json::Value::Array(items) = value else {
        return Err(WireError::NotAnArray);
    };
    let mut records = Vec::with_capacity(items.len());
    for item in items {
        match serde_json::from_value::<ShapeRecord>(item) {
            Ok(record) => records.push(record),
            Err(e) => log::warn!("Skipping malformed drawing record: {}", e),
        }
    }
    Ok(records)
}

/// Keep only the records created by this session.
pub fn owned_records(records: Vec<ShapeRecord>) -> Vec<ShapeRecord> {
    records.into_iter().filter(|r| r.is_owner).collect()
}
