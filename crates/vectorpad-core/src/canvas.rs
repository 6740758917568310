//! Canvas interaction controller.
//!
//! Turns pointer events into committed shapes. Each gesture goes
//! Idle → Anchoring (pointer down) → Adjusting (drag) → Committed (release),
//! except for the freehand tools, which commit one segment per drag tick.

use crate::config::EditorConfig;
use crate::geometry::Point;
use crate::input::{Modifiers, PointerEvent};
use crate::painter::{DrawContext, Painter};
use crate::registry::ShapeRegistry;
use crate::shapes::{Rgba, Shape, ShapeId};
use crate::tools::{ToolKind, ToolSettings, create_shape};
use crate::wire::{
    ExportOutcome, Request, ShapeRecord, WireError, WireResult, export_shape, import_record,
};
use std::collections::HashMap;

/// What a pointer event did to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Nothing changed.
    Idle,
    /// The in-progress shape was anchored or stretched.
    Adjusting,
    Committed(ShapeId),
    /// The registry was full and the shape was discarded.
    Dropped,
    Selected(ShapeId),
    Deselected(ShapeId),
    Moved(ShapeId),
    Resized(ShapeId),
    Filled(ShapeId),
    /// A fill was requested without a selection.
    NothingSelected,
}

/// Owns the committed shapes, the in-progress shape and all tool state.
#[derive(Debug, Clone)]
pub struct CanvasController {
    registry: ShapeRegistry,
    /// Shape being drawn by the current gesture.
    current: Option<Shape>,
    tool: ToolKind,
    settings: ToolSettings,
    background: Rgba,
    /// Registry index of the selected shape.
    selected: Option<usize>,
    /// Last pointer position seen by a move or resize drag.
    previous: Point,
    shift: bool,
    resizing: bool,
    /// Server ids of shapes that exist remotely.
    remote_ids: HashMap<ShapeId, String>,
    defaults: EditorConfig,
}

impl Default for CanvasController {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasController {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            registry: ShapeRegistry::with_capacity(config.capacity),
            current: None,
            tool: config.default_tool,
            settings: config.tool_settings(),
            background: config.background,
            selected: None,
            previous: Point::ORIGIN,
            shift: false,
            resizing: false,
            remote_ids: HashMap::new(),
            defaults: config,
        }
    }

    // --- Queries ---

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    /// The shape being drawn, if a gesture is in progress.
    pub fn current_shape(&self) -> Option<&Shape> {
        self.current.as_ref()
    }

    pub fn selected(&self) -> Option<&Shape> {
        self.registry.get(self.selected?)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_id(&self) -> Option<ShapeId> {
        self.selected().map(|s| s.id())
    }

    pub fn background_color(&self) -> Rgba {
        self.background
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn is_resizing(&self) -> bool {
        self.resizing
    }

    fn selected_mut(&mut self) -> Option<&mut Shape> {
        self.registry.get_mut(self.selected?)
    }

    // --- Pointer events ---

    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> GestureOutcome {
        match event {
            PointerEvent::Down {
                position,
                modifiers,
            } => self.pointer_down(position, modifiers),
            PointerEvent::Drag {
                position,
                modifiers,
            } => self.pointer_drag(position, modifiers),
            PointerEvent::Up {
                position,
                modifiers,
            } => self.pointer_up(position, modifiers),
        }
    }

    pub fn pointer_down(&mut self, point: Point, modifiers: Modifiers) -> GestureOutcome {
        self.shift = modifiers.shift;
        match self.tool {
            tool if tool.is_drawing() => {
                self.current = create_shape(tool, &self.settings);
                match self.current.as_mut() {
                    Some(shape) => {
                        shape.set_anchor_a(point);
                        shape.set_anchor_b(point);
                        shape.stretch_to_anchors(self.shift);
                        GestureOutcome::Adjusting
                    }
                    None => GestureOutcome::Idle,
                }
            }
            ToolKind::Resize => {
                let Some(index) = self.registry.hit_test(point) else {
                    return GestureOutcome::Idle;
                };
                self.resizing = true;
                self.previous = point;
                self.select_index(index)
                    .map_or(GestureOutcome::Idle, GestureOutcome::Selected)
            }
            ToolKind::Select => {
                self.previous = point;
                GestureOutcome::Idle
            }
            _ => GestureOutcome::Idle,
        }
    }

    pub fn pointer_drag(&mut self, point: Point, modifiers: Modifiers) -> GestureOutcome {
        self.shift = modifiers.shift;
        let (dx, dy) = point.delta_from(self.previous);

        if self.resizing {
            self.previous = point;
            let Some(shape) = self.selected_mut() else {
                return GestureOutcome::Idle;
            };
            shape.begin_manipulation();
            return if shape.resize(dx, dy) {
                GestureOutcome::Resized(shape.id())
            } else {
                GestureOutcome::Idle
            };
        }

        match self.tool {
            tool if tool.is_freehand() => self.extend_stroke(point),
            tool if tool.is_drawing() => {
                let shift = self.shift;
                match self.current.as_mut() {
                    Some(shape) => {
                        shape.set_anchor_b(point);
                        shape.stretch_to_anchors(shift);
                        GestureOutcome::Adjusting
                    }
                    None => GestureOutcome::Idle,
                }
            }
            ToolKind::Select => {
                self.previous = point;
                let Some(shape) = self.selected_mut() else {
                    return GestureOutcome::Idle;
                };
                shape.begin_manipulation();
                shape.translate(dx, dy);
                GestureOutcome::Moved(shape.id())
            }
            _ => GestureOutcome::Idle,
        }
    }

    pub fn pointer_up(&mut self, point: Point, modifiers: Modifiers) -> GestureOutcome {
        self.shift = modifiers.shift;
        match self.tool {
            tool if tool.is_drawing() => {
                let Some(mut shape) = self.current.take() else {
                    return GestureOutcome::Idle;
                };
                if tool.is_freehand() {
                    shape.set_anchor_a(point);
                }
                shape.set_anchor_b(point);
                shape.stretch_to_anchors(self.shift);
                self.commit(shape)
            }
            ToolKind::Select => self.toggle_selection(point),
            ToolKind::Fill => self.fill_selected(),
            ToolKind::Resize => {
                self.resizing = false;
                self.toggle_selection(point)
            }
            _ => GestureOutcome::Idle,
        }
    }

    /// Commit the current freehand segment ending at `point` and start the
    /// next one there, so consecutive segments share endpoints.
    fn extend_stroke(&mut self, point: Point) -> GestureOutcome {
        let Some(mut segment) = self.current.take() else {
            return GestureOutcome::Idle;
        };
        segment.set_anchor_b(point);
        let outcome = self.commit(segment);

        let mut next = create_shape(self.tool, &self.settings);
        if let Some(next) = next.as_mut() {
            next.set_anchor_a(point);
            next.set_anchor_b(point);
        }
        self.current = next;
        outcome
    }

    fn commit(&mut self, shape: Shape) -> GestureOutcome {
        let id = shape.id();
        if self.registry.push(shape) {
            GestureOutcome::Committed(id)
        } else {
            GestureOutcome::Dropped
        }
    }

    // --- Selection ---

    /// The first hit in insertion order wins. Hitting the selected shape
    /// deselects it; missing everything clears the selection.
    fn toggle_selection(&mut self, point: Point) -> GestureOutcome {
        match self.registry.hit_test(point) {
            Some(index) if self.selected == Some(index) => self
                .clear_selection()
                .map_or(GestureOutcome::Idle, GestureOutcome::Deselected),
            Some(index) => {
                self.previous = point;
                self.select_index(index)
                    .map_or(GestureOutcome::Idle, GestureOutcome::Selected)
            }
            None => self
                .clear_selection()
                .map_or(GestureOutcome::Idle, GestureOutcome::Deselected),
        }
    }

    fn select_index(&mut self, index: usize) -> Option<ShapeId> {
        self.clear_selection();
        let shape = self.registry.get_mut(index)?;
        shape.set_selected(true);
        self.selected = Some(index);
        Some(shape.id())
    }

    /// Deselect, returning the id of the shape that was selected.
    pub fn clear_selection(&mut self) -> Option<ShapeId> {
        let index = self.selected.take()?;
        let shape = self.registry.get_mut(index)?;
        shape.set_selected(false);
        Some(shape.id())
    }

    fn fill_selected(&mut self) -> GestureOutcome {
        let fill = self.settings.fill_color;
        match self.selected_mut() {
            Some(shape) => {
                let style = shape.style_mut();
                style.fill_color = fill;
                style.filled = true;
                GestureOutcome::Filled(shape.id())
            }
            None => GestureOutcome::NothingSelected,
        }
    }

    // --- Commands ---

    /// Drop the most recent shape. Any gesture in progress is abandoned.
    pub fn undo(&mut self) -> bool {
        let undone = self.registry.undo();
        self.current = None;
        self.resizing = false;
        if self.selected.is_some_and(|index| index >= self.registry.len()) {
            self.selected = None;
        }
        undone
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        log::debug!("Tool changed to {}", tool.name());
        self.tool = tool;
        self.current = None;
        self.resizing = false;
    }

    /// Set the stroke color for new shapes and recolor the selection.
    pub fn set_stroke_color(&mut self, color: Rgba) {
        self.settings.stroke_color = color;
        if let Some(shape) = self.selected_mut() {
            shape.style_mut().stroke_color = color;
        }
    }

    /// Set the stroke width for new shapes and the selection.
    pub fn set_stroke_width(&mut self, width: u32) {
        self.settings.stroke_width = width;
        if let Some(shape) = self.selected_mut() {
            shape.style_mut().stroke_width = width;
        }
    }

    /// Color applied by the fill tool.
    pub fn set_fill_color(&mut self, color: Rgba) {
        self.settings.fill_color = color;
    }

    pub fn set_background_color(&mut self, color: Rgba) {
        self.background = color;
    }

    /// Store an absolute rotation on the selection. Returns false when
    /// nothing is selected or the shape cannot rotate.
    pub fn rotate_selected(&mut self, angle: i32) -> bool {
        self.selected_mut().is_some_and(|shape| shape.rotate(angle))
    }

    /// Clear the canvas and restore the default tool and background.
    pub fn reset(&mut self) {
        self.registry.clear();
        self.remote_ids.clear();
        self.current = None;
        self.selected = None;
        self.resizing = false;
        self.tool = self.defaults.default_tool;
        self.background = self.defaults.background;
    }

    /// Paint committed shapes in insertion order, then the in-progress shape.
    pub fn render(&self, painter: &mut dyn Painter) {
        let ctx = DrawContext::new(self.background.into());
        for shape in self.registry.iter() {
            shape.draw(painter, &ctx);
        }
        if let Some(shape) = &self.current {
            shape.draw(painter, &ctx);
        }
    }

    // --- Remote drawings ---

    pub fn remote_id(&self, shape: ShapeId) -> Option<&str> {
        self.remote_ids.get(&shape).map(String::as_str)
    }

    /// Remember the server id of an uploaded shape.
    pub fn set_remote_id(&mut self, shape: ShapeId, remote: impl Into<String>) {
        self.remote_ids.insert(shape, remote.into());
    }

    /// Encode the selection, including its server id when it has one.
    pub fn selected_record(&self) -> ExportOutcome {
        let Some(shape) = self.selected() else {
            return ExportOutcome::NothingSelected;
        };
        match export_shape(shape) {
            ExportOutcome::Record(mut record) => {
                record.id = self.remote_ids.get(&shape.id()).cloned();
                ExportOutcome::Record(record)
            }
            other => other,
        }
    }

    pub fn add_request(&self) -> WireResult<Request> {
        let mut record = self.selected_record().into_result()?;
        record.id = None;
        Ok(Request::AddDrawing(record))
    }

    pub fn update_request(&self) -> WireResult<Request> {
        let record = self.selected_record().into_result()?;
        if record.id.is_none() {
            return Err(WireError::NotUploaded);
        }
        Ok(Request::UpdateDrawing(record))
    }

    pub fn delete_request(&self) -> WireResult<Request> {
        let shape = self.selected().ok_or(WireError::NothingSelected)?;
        let id = self
            .remote_ids
            .get(&shape.id())
            .cloned()
            .ok_or(WireError::NotUploaded)?;
        Ok(Request::DeleteDrawing { id })
    }

    /// Commit shapes decoded from server records. Invalid records are
    /// skipped; returns how many shapes were added.
    pub fn load_records(&mut self, records: &[ShapeRecord]) -> usize {
        let mut loaded = 0;
        for record in records {
            let shape = match import_record(record) {
                Ok(shape) => shape,
                Err(e) => {
                    log::warn!("Skipping drawing {:?}: {}", record.id, e);
                    continue;
                }
            };
            let id = shape.id();
            if !self.registry.push(shape) {
                break;
            }
            if let Some(remote) = &record.id {
                self.remote_ids.insert(id, remote.clone());
            }
            loaded += 1;
        }
        log::info!("Loaded {} of {} drawings", loaded, records.len());
        loaded
    }
}
