use super::*;
use crate::shape::{Geometry, ShapeKind};

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn setup(tool: Tool) -> (InputController, SyncAgent) {
    let mut input = InputController::new();
    input.set_tool(tool);
    (input, SyncAgent::new("c1", "x"))
}

fn drag(input: &mut InputController, agent: &mut SyncAgent, from: Point, to: Point) -> Option<ShapeId> {
    assert_eq!(input.on_pointer_down(agent, from, Modifiers::default()), None);
    input.on_pointer_move(to);
    input.on_pointer_up(agent, to)
}

// =============================================================
// Tool defaults
// =============================================================

#[test]
fn default_tool_is_select() {
    let input = InputController::new();
    assert_eq!(input.tool(), Tool::Select);
    assert_eq!(input.state(), InputState::Idle);
    assert!(input.preview().is_none());
}

// =============================================================
// Drag tools
// =============================================================

#[test]
fn rectangle_drag_commits_on_release() {
    let (mut input, mut agent) = setup(Tool::Rectangle);
    let id = drag(&mut input, &mut agent, pt(10.0, 10.0), pt(0.0, 0.0)).unwrap();

    assert_eq!(id, "c1-0");
    let shape = agent.doc().get(&id).unwrap();
    assert_eq!(shape.kind(), ShapeKind::Rectangle);
    assert_eq!(*shape.geometry(), Geometry::Rectangle { from: pt(10.0, 10.0), to: pt(0.0, 0.0) });
    assert_eq!(input.state(), InputState::Idle);
    assert_eq!(agent.pending_outbound(), 1);
}

#[test]
fn line_and_circle_tools_create_their_kind() {
    for (tool, kind) in [(Tool::Line, ShapeKind::Line), (Tool::Circle, ShapeKind::Circle)] {
        let (mut input, mut agent) = setup(tool);
        let id = drag(&mut input, &mut agent, pt(0.0, 0.0), pt(3.0, 4.0)).unwrap();
        assert_eq!(agent.doc().get(&id).map(Shape::kind), Some(kind));
    }
}

#[test]
fn preview_follows_pointer_and_is_never_logged() {
    let (mut input, mut agent) = setup(Tool::Circle);
    input.on_pointer_down(&mut agent, pt(0.0, 0.0), Modifiers::default());
    input.on_pointer_move(pt(3.0, 4.0));

    let preview = input.preview().unwrap();
    assert_eq!(preview.id(), PREVIEW_SHAPE_ID);
    assert_eq!(*preview.geometry(), Geometry::Circle { center: pt(0.0, 0.0), radius: 5.0 });
    assert!(agent.log().is_empty());
    assert_eq!(agent.pending_outbound(), 0);
}

#[test]
fn pointer_up_without_down_does_nothing() {
    let (mut input, mut agent) = setup(Tool::Line);
    assert_eq!(input.on_pointer_up(&mut agent, pt(1.0, 1.0)), None);
    assert!(agent.log().is_empty());
}

#[test]
fn switching_tools_cancels_gesture() {
    let (mut input, mut agent) = setup(Tool::Rectangle);
    input.on_pointer_down(&mut agent, pt(0.0, 0.0), Modifiers::default());
    input.set_tool(Tool::Line);
    assert_eq!(input.state(), InputState::Idle);
    assert_eq!(input.on_pointer_up(&mut agent, pt(5.0, 5.0)), None);
    assert!(agent.log().is_empty());
}

#[test]
fn cancel_drops_pending_triangle() {
    let (mut input, mut agent) = setup(Tool::Triangle);
    drag(&mut input, &mut agent, pt(0.0, 0.0), pt(10.0, 0.0));
    assert!(matches!(input.state(), InputState::PlacingThirdVertex { .. }));

    input.cancel();
    assert_eq!(input.state(), InputState::Idle);
    assert!(input.preview().is_none());
    assert_eq!(input.tool(), Tool::Triangle);

    // The next press starts a fresh first edge instead of closing the old one.
    assert_eq!(input.on_pointer_down(&mut agent, pt(5.0, 8.0), Modifiers::default()), None);
    assert!(agent.log().is_empty());
}

// =============================================================
// Triangle
// =============================================================

#[test]
fn triangle_is_drag_then_click() {
    let (mut input, mut agent) = setup(Tool::Triangle);

    input.on_pointer_down(&mut agent, pt(0.0, 0.0), Modifiers::default());
    input.on_pointer_move(pt(10.0, 0.0));
    assert_eq!(input.preview().map(|s| s.kind()), Some(ShapeKind::Line));
    assert_eq!(input.on_pointer_up(&mut agent, pt(10.0, 0.0)), None);
    assert!(agent.log().is_empty());

    input.on_pointer_move(pt(5.0, 10.0));
    let preview = input.preview().unwrap();
    assert_eq!(
        *preview.geometry(),
        Geometry::Triangle { p1: pt(0.0, 0.0), p2: pt(10.0, 0.0), p3: pt(5.0, 10.0) }
    );

    let id = input.on_pointer_down(&mut agent, pt(5.0, 10.0), Modifiers::default()).unwrap();
    assert_eq!(input.state(), InputState::Idle);
    let shape = agent.doc().get(&id).unwrap();
    assert!(shape.contains(pt(5.0, 5.0)));
    assert_eq!(agent.log().len(), 1);
}

#[test]
fn triangle_release_after_click_does_not_commit_twice() {
    let (mut input, mut agent) = setup(Tool::Triangle);
    drag(&mut input, &mut agent, pt(0.0, 0.0), pt(10.0, 0.0));
    input.on_pointer_down(&mut agent, pt(5.0, 10.0), Modifiers::default());
    assert_eq!(input.on_pointer_up(&mut agent, pt(5.0, 10.0)), None);
    assert_eq!(agent.log().len(), 1);
}

// =============================================================
// Select tool
// =============================================================

#[test]
fn select_tool_selects_on_press() {
    let (mut input, mut agent) = setup(Tool::Rectangle);
    let id = drag(&mut input, &mut agent, pt(0.0, 0.0), pt(10.0, 10.0)).unwrap();

    input.set_tool(Tool::Select);
    let picked = input.on_pointer_down(&mut agent, pt(5.0, 5.0), Modifiers::default());
    assert_eq!(picked, Some(id.clone()));
    assert!(agent.doc().is_selected(&id));
    assert_eq!(input.on_pointer_up(&mut agent, pt(5.0, 5.0)), None);
}
