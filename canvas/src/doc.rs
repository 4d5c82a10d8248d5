//! Canvas state reconstructor: the folded view of an event log.
//!
//! `CanvasDoc` holds what is on the canvas right now: live shapes keyed by id,
//! an explicit draw-order list (bottom to top), and the set of selected ids.
//! It changes only through [`CanvasDoc::apply`], so any two docs fed the same
//! events in the same order are equal.
//!
//! Ordering rules:
//!
//! - `AddShape` for a new id appends it to the top of the draw order.
//! - `AddShape` for an existing id overwrites the shape in place.
//! - `RemoveShapeWithId` drops the id from both the map and the order, so a
//!   later `AddShape` with the same id lands on top.
//!
//! Selection is tracked by id and does not check that the shape exists.
//! Callers that need shapes use [`CanvasDoc::selected_shapes`], which skips ids
//! that are not live.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::{BTreeSet, HashMap};

use crate::event::{AddShape, CanvasEvent};
use crate::geom::Point;
use crate::shape::{Shape, ShapeId};

/// Folded canvas state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasDoc {
    shapes: HashMap<ShapeId, Shape>,
    order: Vec<ShapeId>,
    selected: BTreeSet<ShapeId>,
}

impl CanvasDoc {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `events` into a fresh doc.
    pub fn from_events<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a CanvasEvent>,
    {
        let mut doc = Self::new();
        for event in events {
            doc.apply(event);
        }
        doc
    }

    /// Apply one event. Never fails: removing or unselecting an unknown id is
    /// a no-op.
    pub fn apply(&mut self, event: &CanvasEvent) {
        match event {
            CanvasEvent::AddShape(AddShape { id, data }) => {
                let shape = Shape::new(id.clone(), data.clone());
                if self.shapes.insert(id.clone(), shape).is_none() {
                    self.order.push(id.clone());
                }
            }
            CanvasEvent::RemoveShapeWithId { shape_id } => {
                if self.shapes.remove(shape_id).is_some() {
                    self.order.retain(|id| id != shape_id);
                }
            }
            CanvasEvent::SelectShape { shape_id, .. } => {
                self.selected.insert(shape_id.clone());
            }
            CanvasEvent::UnselectShape { shape_id, .. } => {
                self.selected.remove(shape_id);
            }
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Shape> {
        self.shapes.get(id)
    }

    /// Live shapes in draw order, bottom first.
    #[must_use]
    pub fn shapes(&self) -> Vec<&Shape> {
        self.order.iter().filter_map(|id| self.shapes.get(id)).collect()
    }

    /// Every live shape hit by `pt`, in draw order.
    #[must_use]
    pub fn shape_ids_at_point(&self, pt: Point) -> Vec<&str> {
        self.shapes()
            .into_iter()
            .filter(|shape| shape.contains(pt))
            .map(Shape::id)
            .collect()
    }

    /// The last-drawn shape under `pt`.
    #[must_use]
    pub fn topmost_shape_id_at(&self, pt: Point) -> Option<&str> {
        self.shape_ids_at_point(pt).pop()
    }

    /// Selected ids, including ids whose shape is gone.
    #[must_use]
    pub fn selected_ids(&self) -> Vec<&str> {
        self.selected.iter().map(String::as_str).collect()
    }

    /// Selected shapes that are still live, in draw order.
    #[must_use]
    pub fn selected_shapes(&self) -> Vec<&Shape> {
        self.shapes()
            .into_iter()
            .filter(|shape| self.selected.contains(shape.id()))
            .collect()
    }

    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Number of live shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
