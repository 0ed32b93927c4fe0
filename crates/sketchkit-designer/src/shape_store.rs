//! Ordered storage for committed shapes.
//!
//! Insertion order is draw order: later shapes paint over earlier ones.

use crate::model::{DesignerShape, Shape};

#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    shapes: Vec<Shape>,
}

impl ShapeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a shape and returns its id.
    pub fn push(&mut self, shape: Shape) -> u64 {
        let id = shape.id();
        self.shapes.push(shape);
        id
    }

    pub fn get(&self, id: u64) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    pub fn remove(&mut self, id: u64) -> Option<Shape> {
        let index = self.shapes.iter().position(|s| s.id() == id)?;
        Some(self.shapes.remove(index))
    }

    /// Removes every shape for which `keep` returns false; returns how many
    /// were removed.
    pub fn retain(&mut self, keep: impl FnMut(&Shape) -> bool) -> usize {
        let before = self.shapes.len();
        self.shapes.retain(keep);
        before - self.shapes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Shape> {
        self.shapes.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DesignLine;
    use sketchkit_core::Point;

    fn line(x: f64) -> Shape {
        Shape::Line(DesignLine::new(Point::new(x, 0.0), Point::new(x + 10.0, 0.0)))
    }

    #[test]
    fn test_push_get_remove() {
        let mut store = ShapeStore::new();
        let a = store.push(line(0.0));
        let b = store.push(line(20.0));
        assert_eq!(store.len(), 2);
        assert!(store.get(a).is_some());

        let removed = store.remove(a).map(|s| s.id());
        assert_eq!(removed, Some(a));
        assert!(store.get(a).is_none());
        assert_eq!(store.iter().next().map(|s| s.id()), Some(b));
        assert!(store.remove(a).is_none());
    }

    #[test]
    fn test_retain_counts_removed() {
        let mut store = ShapeStore::new();
        let keep = store.push(line(0.0));
        store.push(line(20.0));
        store.push(line(40.0));
        assert_eq!(store.retain(|s| s.id() == keep), 2);
        assert_eq!(store.len(), 1);
    }
}
