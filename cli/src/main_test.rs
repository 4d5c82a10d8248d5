use super::*;

#[test]
fn parse_point_accepts_spaces_and_decimals() {
    assert_eq!(parse_point("10,20").expect("point"), Point::new(10.0, 20.0));
    assert_eq!(parse_point(" -1.5 , 2 ").expect("point"), Point::new(-1.5, 2.0));
}

#[test]
fn parse_point_rejects_bad_input() {
    assert!(parse_point("10").is_err());
    assert!(parse_point("a,1").is_err());
    assert!(parse_point("1,2,3").is_err());
}

#[test]
fn parse_color_defaults_alpha() {
    assert_eq!(parse_color("255,0,0").expect("color"), Color::RED);
    let translucent = parse_color("0,0,255,0.5").expect("color");
    assert_eq!(translucent.b(), 255);
    assert!((translucent.alpha() - 0.5).abs() < f64::EPSILON);
}

#[test]
fn parse_color_rejects_out_of_range() {
    assert!(parse_color("256,0,0").is_err());
    assert!(parse_color("0,0,0,2").is_err());
    assert!(parse_color("0,0").is_err());
}

#[test]
fn ws_url_maps_scheme() {
    assert_eq!(ws_url("http://localhost:3000").expect("url"), "ws://localhost:3000/ws");
    assert_eq!(ws_url("https://example.com").expect("url"), "wss://example.com/ws");
    assert!(matches!(ws_url("ftp://x"), Err(CliError::InvalidBaseUrl(_))));
}

#[test]
fn shape_data_applies_colors() {
    let shape = ShapeArgs::Rectangle { from: Point::new(0.0, 0.0), to: Point::new(4.0, 4.0) };
    let data = shape_data(shape, Some(Color::YELLOW), None);
    assert!(matches!(data, ShapeData::Rectangle(_)));
    assert_eq!(data.fill_color(), Color::YELLOW);
    assert_eq!(data.outline_color(), DragData::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0)).outline_color);
}

#[test]
fn circle_args_keep_center_first() {
    let shape = ShapeArgs::Circle { center: Point::new(1.0, 1.0), edge: Point::new(4.0, 5.0) };
    let ShapeData::Circle(drag) = shape_data(shape, None, None) else {
        panic!("expected circle");
    };
    assert_eq!(drag.from, Point::new(1.0, 1.0));
    assert_eq!(drag.to, Point::new(4.0, 5.0));
}

#[test]
fn draw_command_parses() {
    let cli = Cli::try_parse_from([
        "sketchboard-cli",
        "draw",
        "--canvas-id",
        "abc",
        "--fill",
        "0,255,0",
        "triangle",
        "0,0",
        "10,0",
        "5,8",
    ])
    .expect("parse");
    let Command::Draw(args) = cli.command else {
        panic!("expected draw");
    };
    assert_eq!(args.canvas_id, "abc");
    assert_eq!(args.fill, Some(Color::GREEN));
    assert!(matches!(args.shape, ShapeArgs::Triangle { .. }));
}

#[test]
fn describe_event_names_shape() {
    let add = CanvasEvent::add_shape("c-0", ShapeData::Line(DragData::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0))));
    assert_eq!(describe_event("c", &add), "c AddShape line c-0");
    assert_eq!(describe_event("c", &CanvasEvent::remove_shape("c-0")), "c RemoveShapeWithId c-0");
}

#[test]
fn draw_sends_event_then_round_trip_without_registering() {
    let mut agent = SyncAgent::new("c", "canvas-x");
    agent.add_shape(shape_data(ShapeArgs::Line { from: Point::new(0.0, 0.0), to: Point::new(3.0, 4.0) }, None, None));

    let messages = draw_messages(&mut agent);
    assert_eq!(messages.len(), 2);
    assert!(matches!(
        &messages[0],
        ClientMessage::AddCanvasEvent { client_id, canvas_id, event } if client_id == "c" && canvas_id == "canvas-x" && event.shape_id() == "c-0"
    ));
    assert_eq!(messages[1], ClientMessage::GetCanvasIds);
    assert!(!messages.iter().any(|m| matches!(m, ClientMessage::RegisterForCanvas { .. })));
    assert_eq!(agent.pending_outbound(), 0);
}

#[test]
fn leave_unregisters_then_confirms() {
    let [unregister, confirm] = leave_messages("c", "canvas-x");
    assert_eq!(
        unregister,
        ClientMessage::UnregisterForCanvas { client_id: "c".into(), canvas_id: "canvas-x".into() }
    );
    assert_eq!(confirm, ClientMessage::GetCanvasIds);
}

#[test]
fn canvas_ids_body_decodes_success() {
    let value = canvas_ids_body(reqwest::StatusCode::OK, r#"{"canvasIds":["a"]}"#).expect("body");
    assert_eq!(value["canvasIds"][0], "a");
}

#[test]
fn canvas_ids_body_rejects_garbage_on_success() {
    let err = canvas_ids_body(reqwest::StatusCode::OK, "<html>").unwrap_err();
    assert!(matches!(err, CliError::InvalidJson(_)));
}

#[test]
fn canvas_ids_body_reports_failed_status() {
    let err = canvas_ids_body(reqwest::StatusCode::BAD_GATEWAY, "upstream down").unwrap_err();
    let CliError::Server { code, message } = err else {
        panic!("expected server error");
    };
    assert_eq!(code, "HTTP 502");
    assert_eq!(message, "upstream down");
}
