//! Ordered store of committed shapes.

use crate::geometry::Point;
use crate::shapes::{Shape, ShapeId};

/// Default maximum number of committed shapes.
pub const DEFAULT_CAPACITY: usize = 10_000;

/// Committed shapes in insertion order, which is also paint order.
///
/// Undo only moves the `active_len` boundary back; the undone shapes stay in
/// storage until the next commit overwrites the tail.
#[derive(Debug, Clone)]
pub struct ShapeRegistry {
    shapes: Vec<Shape>,
    active_len: usize,
    capacity: usize,
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            shapes: Vec::new(),
            active_len: 0,
            capacity,
        }
    }

    /// Commit a shape. Anything logically undone is discarded first.
    /// Returns false (dropping the shape) when the registry is full.
    pub fn push(&mut self, shape: Shape) -> bool {
        if self.active_len >= self.capacity {
            log::warn!(
                "Shape registry is full ({} shapes), dropping {:?}",
                self.capacity,
                shape.kind()
            );
            return false;
        }
        self.shapes.truncate(self.active_len);
        self.shapes.push(shape);
        self.active_len += 1;
        true
    }

    /// Logically remove the most recent shape.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        if self.active_len > 0 {
            self.active_len -= 1;
            true
        } else {
            false
        }
    }

    /// Number of active shapes (the undo cursor).
    pub fn len(&self) -> usize {
        self.active_len
    }

    pub fn is_empty(&self) -> bool {
        self.active_len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.active_len >= self.capacity
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
        self.active_len = 0;
    }

    /// Active shapes in paint order.
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes[..self.active_len].iter()
    }

    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.shapes[..self.active_len].get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Shape> {
        self.shapes[..self.active_len].get_mut(index)
    }

    pub fn position(&self, id: ShapeId) -> Option<usize> {
        self.iter().position(|s| s.id() == id)
    }

    /// Index of the first active shape hit by the point.
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        self.iter().position(|s| s.hit_test(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Freehand, Rectangle};

    fn rect(x: i32, y: i32, w: i32, h: i32) -> Shape {
        Shape::Rectangle(Rectangle::at(Point::new(x, y), w, h))
    }

    #[test]
    fn test_undo_moves_cursor() {
        let mut registry = ShapeRegistry::new();
        for i in 0..3 {
            registry.push(rect(i, i, 5, 5));
        }
        assert_eq!(registry.len(), 3);
        assert!(registry.undo());
        assert_eq!(registry.len(), 2);
        assert!(registry.undo());
        assert!(registry.undo());
        assert!(!registry.undo());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_push_after_undo_overwrites_tail() {
        let mut registry = ShapeRegistry::new();
        let first = rect(0, 0, 5, 5);
        let first_id = first.id();
        registry.push(first);
        registry.push(rect(1, 1, 5, 5));
        registry.undo();

        let replacement = rect(9, 9, 5, 5);
        let replacement_id = replacement.id();
        registry.push(replacement);

        let ids: Vec<_> = registry.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![first_id, replacement_id]);
    }

    #[test]
    fn test_capacity_drops_extra_shapes() {
        let mut registry = ShapeRegistry::with_capacity(2);
        assert!(registry.push(rect(0, 0, 1, 1)));
        assert!(registry.push(rect(0, 0, 1, 1)));
        assert!(registry.is_full());
        assert!(!registry.push(rect(0, 0, 1, 1)));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_hit_test_first_match_wins() {
        let mut registry = ShapeRegistry::new();
        registry.push(Shape::Freehand(Freehand::curve()));
        registry.push(rect(0, 0, 20, 20));
        registry.push(rect(5, 5, 20, 20));
        assert_eq!(registry.hit_test(Point::new(10, 10)), Some(1));
        assert_eq!(registry.hit_test(Point::new(22, 22)), Some(2));
        assert_eq!(registry.hit_test(Point::new(100, 100)), None);
    }

    #[test]
    fn test_undone_shapes_are_hidden() {
        let mut registry = ShapeRegistry::new();
        registry.push(rect(0, 0, 20, 20));
        registry.undo();
        assert!(registry.get(0).is_none());
        assert_eq!(registry.iter().count(), 0);
        assert_eq!(registry.hit_test(Point::new(10, 10)), None);
    }

    #[test]
    fn test_get_mut() {
        let mut registry = ShapeRegistry::new();
        registry.push(rect(0, 0, 20, 20));
        registry.get_mut(0).unwrap().set_selected(true);
        assert!(registry.get(0).unwrap().is_selected());
        let id = registry.get(0).unwrap().id();
        assert_eq!(registry.position(id), Some(0));
    }
}
