//! Input model: tools, modifier keys, and the drawing gesture state machine.
//!
//! `InputController` turns pointer down/move/up into [`SyncAgent`] calls.
//! Drag tools (line, rectangle, circle) commit one shape on release. The
//! triangle tool takes a drag for its first edge and a click for the third
//! vertex. While a gesture is in progress [`InputController::preview`] yields
//! a provisional shape for drawing; it is never logged or sent.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::PREVIEW_SHAPE_ID;
use crate::geom::Point;
use crate::shape::{DragData, Shape, ShapeData, ShapeId, TriangleData};
use crate::sync::SyncAgent;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Click to select (default).
    #[default]
    Select,
    Line,
    Rectangle,
    Circle,
    Triangle,
}

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Keep the current selection when selecting.
    pub ctrl: bool,
    /// Cycle through overlapping shapes when selecting.
    pub alt: bool,
}

/// Gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    #[default]
    Idle,
    /// Pointer is down; dragging from `anchor`.
    Dragging { anchor: Point, current: Point },
    /// Triangle tool: first edge fixed, waiting for a click on the third vertex.
    PlacingThirdVertex { p1: Point, p2: Point, current: Point },
}

/// Tool selection plus gesture tracking for one agent.
#[derive(Debug, Clone, Default)]
pub struct InputController {
    tool: Tool,
    state: InputState,
}

impl InputController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.tool
    }

    #[must_use]
    pub fn state(&self) -> InputState {
        self.state
    }

    /// Switch tools, abandoning any gesture in progress.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
        self.cancel();
    }

    /// Abandon the gesture in progress (e.g. on Escape). Nothing is logged.
    pub fn cancel(&mut self) {
        self.state = InputState::Idle;
    }

    /// Returns the id of a shape created or selected by this press.
    pub fn on_pointer_down(&mut self, agent: &mut SyncAgent, pt: Point, modifiers: Modifiers) -> Option<ShapeId> {
        match (self.tool, self.state) {
            (Tool::Select, _) => agent.select_at(pt, modifiers),
            (Tool::Triangle, InputState::PlacingThirdVertex { p1, p2, .. }) => {
                self.state = InputState::Idle;
                Some(agent.add_shape(ShapeData::Triangle(TriangleData::new(p1, p2, pt))))
            }
            _ => {
                self.state = InputState::Dragging { anchor: pt, current: pt };
                None
            }
        }
    }

    pub fn on_pointer_move(&mut self, pt: Point) {
        match &mut self.state {
            InputState::Idle => {}
            InputState::Dragging { current, .. } | InputState::PlacingThirdVertex { current, .. } => {
                *current = pt;
            }
        }
    }

    /// Returns the id of a shape committed by this release.
    pub fn on_pointer_up(&mut self, agent: &mut SyncAgent, pt: Point) -> Option<ShapeId> {
        let InputState::Dragging { anchor, .. } = self.state else {
            return None;
        };
        if self.tool == Tool::Triangle {
            self.state = InputState::PlacingThirdVertex { p1: anchor, p2: pt, current: pt };
            return None;
        }
        self.state = InputState::Idle;
        let data = drag_data(self.tool, anchor, pt)?;
        Some(agent.add_shape(data))
    }

    /// Provisional shape for the gesture in progress.
    #[must_use]
    pub fn preview(&self) -> Option<Shape> {
        let data = match self.state {
            InputState::Idle => return None,
            InputState::Dragging { anchor, current } if self.tool == Tool::Triangle => {
                ShapeData::Line(DragData::new(anchor, current))
            }
            InputState::Dragging { anchor, current } => drag_data(self.tool, anchor, current)?,
            InputState::PlacingThirdVertex { p1, p2, current } => {
                ShapeData::Triangle(TriangleData::new(p1, p2, current))
            }
        };
        Some(Shape::new(PREVIEW_SHAPE_ID, data))
    }
}

fn drag_data(tool: Tool, from: Point, to: Point) -> Option<ShapeData> {
    let drag = DragData::new(from, to);
    match tool {
        Tool::Line => Some(ShapeData::Line(drag)),
        Tool::Rectangle => Some(ShapeData::Rectangle(drag)),
        Tool::Circle => Some(ShapeData::Circle(drag)),
        Tool::Select | Tool::Triangle => None,
    }
}
