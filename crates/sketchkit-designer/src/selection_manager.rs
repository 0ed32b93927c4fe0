use sketchkit_core::{BoundingBox, Point};
use sketchkit_settings::HitTolerances;
use tracing::debug;

use crate::model::DesignerShape;
use crate::shape_store::ShapeStore;

/// A rubber-band rectangle being dragged out in model space.
///
/// `anchor` is where the drag started and `corner` follows the pointer, so
/// the band can be dragged in any direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionArea {
    pub anchor: Point,
    pub corner: Point,
}

impl SelectionArea {
    /// The normalized box covered by the band.
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_corners(self.anchor, self.corner)
    }
}

/// Manages selection across the shapes of a store.
///
/// `SelectionManager` is responsible for:
/// - Routing a pointer press to every shape's hit test
/// - Tracking the rubber-band rectangle while it is dragged
/// - Body-selecting every shape the finished band fully encloses
/// - Clearing and deleting the current selection
///
/// # Selection Model
///
/// Selection lives on the shapes themselves. Several shapes can be selected
/// at once; each one is either selected as a whole or has one active handle.
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    area: Option<SelectionArea>,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no rubber band.
    ///
    /// # Examples
    ///
    /// ```
    /// use sketchkit_designer::selection_manager::SelectionManager;
    ///
    /// let manager = SelectionManager::new();
    /// assert!(manager.area().is_none());
    /// ```
    pub fn new() -> Self {
        Self { area: None }
    }

    /// Returns the rubber band being dragged, if any.
    pub fn area(&self) -> Option<&SelectionArea> {
        self.area.as_ref()
    }

    /// Hit-tests every shape at `cursor`.
    ///
    /// Each shape updates its own selection, so shapes that miss are
    /// deselected and every shape that hits is selected.
    ///
    /// # Arguments
    ///
    /// * `store` - The shapes to test
    /// * `cursor` - Press position in model space
    /// * `tolerances` - Hit tolerances in model units
    ///
    /// # Returns
    ///
    /// The number of shapes that were hit.
    pub fn hit_test_all(
        &mut self,
        store: &mut ShapeStore,
        cursor: Point,
        tolerances: &HitTolerances,
    ) -> usize {
        let mut hits = 0;
        for shape in store.iter_mut() {
            if shape.hit_test(cursor, tolerances) {
                hits += 1;
            }
        }
        debug!("Hit test at {} selected {} shape(s)", cursor, hits);
        hits
    }

    /// Starts a rubber band at `start`.
    pub fn begin_area(&mut self, start: Point) {
        self.area = Some(SelectionArea {
            anchor: start,
            corner: start,
        });
    }

    /// Moves the band's free corner by `delta`.
    pub fn extend_area(&mut self, delta: Point) {
        if let Some(area) = self.area.as_mut() {
            area.corner += delta;
        }
    }

    /// Finishes the rubber band.
    ///
    /// Every shape whose bounding box lies entirely inside the band becomes
    /// body-selected. A band without area selects nothing.
    ///
    /// # Arguments
    ///
    /// * `store` - The shapes to select from
    ///
    /// # Returns
    ///
    /// The number of shapes selected.
    pub fn finish_area(&mut self, store: &mut ShapeStore) -> usize {
        let Some(area) = self.area.take() else {
            return 0;
        };
        let bounds = area.bounds();
        if !bounds.has_area() {
            debug!("Rubber band without area ignored");
            return 0;
        }
        let mut selected = 0;
        for shape in store.iter_mut() {
            if bounds.contains_box(&shape.bounding_box()) {
                shape.select();
                selected += 1;
            }
        }
        debug!("Rubber band selected {} shape(s)", selected);
        selected
    }

    /// Drops the rubber band without selecting anything.
    pub fn cancel_area(&mut self) {
        self.area = None;
    }

    /// Clears the selection of every shape.
    ///
    /// # Arguments
    ///
    /// * `store` - The shape store containing shapes to deselect
    pub fn deselect_all(&mut self, store: &mut ShapeStore) {
        for shape in store.iter_mut() {
            shape.clear_selection();
        }
    }

    /// Returns true when at least one shape carries a selection.
    pub fn has_selection(&self, store: &ShapeStore) -> bool {
        store.iter().any(|s| s.is_selected())
    }

    /// Returns the ids of all selected shapes, in draw order.
    pub fn selected_ids(&self, store: &ShapeStore) -> Vec<u64> {
        store
            .iter()
            .filter(|s| s.is_selected())
            .map(|s| s.id())
            .collect()
    }

    /// Removes every selected shape from the store.
    ///
    /// # Returns
    ///
    /// The number of shapes removed.
    pub fn delete_selected(&mut self, store: &mut ShapeStore) -> usize {
        store.retain(|s| !s.is_selected())
    }
}
