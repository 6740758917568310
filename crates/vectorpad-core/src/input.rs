//! Pointer input events fed to the canvas controller.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };
}

/// Pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, modifiers: Modifiers },
    /// Movement while the button is held.
    Drag { position: Point, modifiers: Modifiers },
    Up { position: Point, modifiers: Modifiers },
}

impl PointerEvent {
    pub fn down(x: i32, y: i32) -> Self {
        PointerEvent::Down {
            position: Point::new(x, y),
            modifiers: Modifiers::NONE,
        }
    }

    pub fn drag(x: i32, y: i32) -> Self {
        PointerEvent::Drag {
            position: Point::new(x, y),
            modifiers: Modifiers::NONE,
        }
    }

    pub fn up(x: i32, y: i32) -> Self {
        PointerEvent::Up {
            position: Point::new(x, y),
            modifiers: Modifiers::NONE,
        }
    }

    /// Same event with different modifiers.
    pub fn with_modifiers(self, modifiers: Modifiers) -> Self {
        match self {
            PointerEvent::Down { position, .. } => PointerEvent::Down { position, modifiers },
            PointerEvent::Drag { position, .. } => PointerEvent::Drag { position, modifiers },
            PointerEvent::Up { position, .. } => PointerEvent::Up { position, modifiers },
        }
    }

    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Drag { position, .. }
            | PointerEvent::Up { position, .. } => *position,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        match self {
            PointerEvent::Down { modifiers, .. }
            | PointerEvent::Drag { modifiers, .. }
            | PointerEvent::Up { modifiers, .. } => *modifiers,
        }
    }
}
