//! Canvas events: the immutable change records every canvas is built from.
//!
//! On the wire an event is `{ "name": ..., "payload": ... }`. `AddShape`
//! carries a `shapeType` discriminator next to its `data`, so its serde impls
//! are written by hand: the kind picks which data shape to parse, and an
//! unknown kind or a malformed payload is rejected here rather than later
//! in the fold.

#[cfg(test)]
#[path = "event_test.rs"]
mod event_test;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::shape::{ClientId, DragData, ShapeData, ShapeId, ShapeKind, TriangleData};

/// One change record. Ordered, never edited, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "payload")]
pub enum CanvasEvent {
    AddShape(AddShape),
    #[serde(rename_all = "camelCase")]
    RemoveShapeWithId { shape_id: ShapeId },
    #[serde(rename_all = "camelCase")]
    SelectShape { shape_id: ShapeId, client_id: ClientId },
    #[serde(rename_all = "camelCase")]
    UnselectShape { shape_id: ShapeId, client_id: ClientId },
}

impl CanvasEvent {
    #[must_use]
    pub fn add_shape(id: impl Into<ShapeId>, data: ShapeData) -> Self {
        Self::AddShape(AddShape { id: id.into(), data })
    }

    #[must_use]
    pub fn remove_shape(shape_id: impl Into<ShapeId>) -> Self {
        Self::RemoveShapeWithId { shape_id: shape_id.into() }
    }

    #[must_use]
    pub fn select_shape(shape_id: impl Into<ShapeId>, client_id: impl Into<ClientId>) -> Self {
        Self::SelectShape { shape_id: shape_id.into(), client_id: client_id.into() }
    }

    #[must_use]
    pub fn unselect_shape(shape_id: impl Into<ShapeId>, client_id: impl Into<ClientId>) -> Self {
        Self::UnselectShape { shape_id: shape_id.into(), client_id: client_id.into() }
    }

    /// Wire discriminator, handy for log fields.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddShape(_) => "AddShape",
            Self::RemoveShapeWithId { .. } => "RemoveShapeWithId",
            Self::SelectShape { .. } => "SelectShape",
            Self::UnselectShape { .. } => "UnselectShape",
        }
    }

    /// The shape this event targets.
    #[must_use]
    pub fn shape_id(&self) -> &str {
        match self {
            Self::AddShape(add) => &add.id,
            Self::RemoveShapeWithId { shape_id }
            | Self::SelectShape { shape_id, .. }
            | Self::UnselectShape { shape_id, .. } => shape_id,
        }
    }
}

// =============================================================================
// ADD SHAPE
// =============================================================================

/// Payload of an `AddShape` event.
#[derive(Debug, Clone, PartialEq)]
pub struct AddShape {
    pub id: ShapeId,
    pub data: ShapeData,
}

impl AddShape {
    #[must_use]
    pub fn shape_type(&self) -> ShapeKind {
        self.data.kind()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddShapeRef<'a> {
    shape_type: ShapeKind,
    id: &'a str,
    data: DataRef<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum DataRef<'a> {
    Drag(&'a DragData),
    Triangle(&'a TriangleData),
}

impl Serialize for AddShape {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let data = match &self.data {
            ShapeData::Line(d) | ShapeData::Rectangle(d) | ShapeData::Circle(d) => DataRef::Drag(d),
            ShapeData::Triangle(t) => DataRef::Triangle(t),
        };
        AddShapeRef { shape_type: self.data.kind(), id: &self.id, data }.serialize(serializer)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAddShape {
    shape_type: ShapeKind,
    id: ShapeId,
    data: serde_json::Value,
}

impl<'de> Deserialize<'de> for AddShape {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawAddShape::deserialize(deserializer)?;
        let data = match raw.shape_type {
            ShapeKind::Line => ShapeData::Line(parse_data(raw.data)?),
            ShapeKind::Rectangle => ShapeData::Rectangle(parse_data(raw.data)?),
            ShapeKind::Circle => ShapeData::Circle(parse_data(raw.data)?),
            ShapeKind::Triangle => ShapeData::Triangle(parse_data(raw.data)?),
        };
        Ok(Self { id: raw.id, data })
    }
}

fn parse_data<T, E>(value: serde_json::Value) -> Result<T, E>
where
    T: de::DeserializeOwned,
    E: de::Error,
{
    serde_json::from_value(value).map_err(E::custom)
}
