//! Shape model: colors, per-kind drawing data, and the immutable `Shape` value.
//!
//! `ShapeData` is what travels inside an `AddShape` event: the points a tool
//! captured plus the two user-chosen colors. `Shape` is the folded, render- and
//! hit-test-ready form built from it. Neither is ever mutated in place; an edit
//! produces new data under the same id.

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use serde::{Deserialize, Serialize};

use crate::geom::Point;

/// Globally unique shape identifier, `"<clientId>-<counter>"`.
pub type ShapeId = String;

/// Server-assigned client identifier.
pub type ClientId = String;

/// Server-assigned canvas identifier.
pub type CanvasId = String;

// =============================================================================
// COLOR
// =============================================================================

/// Error returned when a color fails validation at the deserialization boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorError {
    #[error("alpha must be within 0..=1, got {0}")]
    AlphaOutOfRange(f64),
}

/// RGBA color. Channels are 0–255, alpha is 0–1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawColor")]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    alpha: f64,
}

#[derive(Deserialize)]
struct RawColor {
    r: u8,
    g: u8,
    b: u8,
    #[serde(default = "opaque")]
    alpha: f64,
}

fn opaque() -> f64 {
    1.0
}

impl TryFrom<RawColor> for Color {
    type Error = ColorError;

    fn try_from(raw: RawColor) -> Result<Self, Self::Error> {
        Color::new(raw.r, raw.g, raw.b, raw.alpha)
    }
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(255, 255, 255, 0.0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Build a color, rejecting alpha outside `0..=1` (NaN included).
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::AlphaOutOfRange`] for an invalid alpha.
    pub fn new(r: u8, g: u8, b: u8, alpha: f64) -> Result<Self, ColorError> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(ColorError::AlphaOutOfRange(alpha));
        }
        Ok(Self { r, g, b, alpha })
    }

    /// Fully opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    const fn rgba(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        Self { r, g, b, alpha }
    }

    #[must_use]
    pub fn r(&self) -> u8 {
        self.r
    }

    #[must_use]
    pub fn g(&self) -> u8 {
        self.g
    }

    #[must_use]
    pub fn b(&self) -> u8 {
        self.b
    }

    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// CSS `rgba(...)` string for canvas fill/stroke styles.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.alpha)
    }
}

fn default_fill() -> Color {
    Color::TRANSPARENT
}

fn default_outline() -> Color {
    Color::BLUE
}

// =============================================================================
// SHAPE DATA
// =============================================================================

/// Discriminator carried as `shapeType` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Line,
    Rectangle,
    Circle,
    Triangle,
}

impl ShapeKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Triangle => "triangle",
        }
    }
}

/// Two-point data captured by a drag gesture.
///
/// For circles `from` is the center and `to` lies on the circumference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragData {
    pub from: Point,
    pub to: Point,
    #[serde(default = "default_fill")]
    pub fill_color: Color,
    #[serde(default = "default_outline")]
    pub outline_color: Color,
}

impl DragData {
    /// Drag data with default colors.
    #[must_use]
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to, fill_color: default_fill(), outline_color: default_outline() }
    }
}

/// Three vertices placed by the triangle tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriangleData {
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
    #[serde(default = "default_fill")]
    pub fill_color: Color,
    #[serde(default = "default_outline")]
    pub outline_color: Color,
}

impl TriangleData {
    /// Triangle data with default colors.
    #[must_use]
    pub fn new(p1: Point, p2: Point, p3: Point) -> Self {
        Self { p1, p2, p3, fill_color: default_fill(), outline_color: default_outline() }
    }
}

/// Per-kind payload of an `AddShape` event.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeData {
    Line(DragData),
    Rectangle(DragData),
    Circle(DragData),
    Triangle(TriangleData),
}

impl ShapeData {
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Line(_) => ShapeKind::Line,
            Self::Rectangle(_) => ShapeKind::Rectangle,
            Self::Circle(_) => ShapeKind::Circle,
            Self::Triangle(_) => ShapeKind::Triangle,
        }
    }

    #[must_use]
    pub fn fill_color(&self) -> Color {
        match self {
            Self::Line(d) | Self::Rectangle(d) | Self::Circle(d) => d.fill_color,
            Self::Triangle(t) => t.fill_color,
        }
    }

    #[must_use]
    pub fn outline_color(&self) -> Color {
        match self {
            Self::Line(d) | Self::Rectangle(d) | Self::Circle(d) => d.outline_color,
            Self::Triangle(t) => t.outline_color,
        }
    }

    /// Same geometry, new fill color.
    #[must_use]
    pub fn with_fill_color(mut self, color: Color) -> Self {
        match &mut self {
            Self::Line(d) | Self::Rectangle(d) | Self::Circle(d) => d.fill_color = color,
            Self::Triangle(t) => t.fill_color = color,
        }
        self
    }

    /// Same geometry, new outline color.
    #[must_use]
    pub fn with_outline_color(mut self, color: Color) -> Self {
        match &mut self {
            Self::Line(d) | Self::Rectangle(d) | Self::Circle(d) => d.outline_color = color,
            Self::Triangle(t) => t.outline_color = color,
        }
        self
    }
}

// =============================================================================
// SHAPE
// =============================================================================

/// Resolved geometry used by hit-testing and rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Line { from: Point, to: Point },
    /// Raw drag corners; may be given in any of the four drag directions.
    Rectangle { from: Point, to: Point },
    Circle { center: Point, radius: f64 },
    Triangle { p1: Point, p2: Point, p3: Point },
}

impl Geometry {
    fn from_data(data: &ShapeData) -> Self {
        match data {
            ShapeData::Line(d) => Self::Line { from: d.from, to: d.to },
            ShapeData::Rectangle(d) => Self::Rectangle { from: d.from, to: d.to },
            ShapeData::Circle(d) => Self::Circle { center: d.from, radius: d.from.distance(d.to) },
            ShapeData::Triangle(t) => Self::Triangle { p1: t.p1, p2: t.p2, p3: t.p3 },
        }
    }
}

/// A shape on the canvas. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    id: ShapeId,
    data: ShapeData,
    geometry: Geometry,
    selection_color: Color,
}

impl Shape {
    /// Build a shape from event data.
    #[must_use]
    pub fn new(id: impl Into<ShapeId>, data: ShapeData) -> Self {
        let geometry = Geometry::from_data(&data);
        Self { id: id.into(), data, geometry, selection_color: Color::BLACK }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.data.kind()
    }

    /// The event data this shape was built from. Edits clone and modify this.
    #[must_use]
    pub fn data(&self) -> &ShapeData {
        &self.data
    }

    #[must_use]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    #[must_use]
    pub fn fill_color(&self) -> Color {
        self.data.fill_color()
    }

    #[must_use]
    pub fn outline_color(&self) -> Color {
        self.data.outline_color()
    }

    #[must_use]
    pub fn selection_color(&self) -> Color {
        self.selection_color
    }

    /// Whether `pt` falls inside this shape's selectable area.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        crate::hit::is_point_in_shape_area(self, pt)
    }
}
