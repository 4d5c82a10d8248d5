use canvas::geom::Point;
use canvas::shape::{DragData, ShapeData};
use serde_json::json;

use super::*;

fn line_event() -> CanvasEvent {
    CanvasEvent::add_shape("c1-0", ShapeData::Line(DragData::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0))))
}

// =============================================================
// Client -> server
// =============================================================

#[test]
fn unit_messages_are_type_only() {
    let text = encode_message(&ClientMessage::CreateCanvas).expect("encode");
    assert_eq!(text, r#"{"type":"CreateCanvas"}"#);
    let decoded = decode_client_message(r#"{"type":"GetCanvasIds"}"#).expect("decode");
    assert_eq!(decoded, ClientMessage::GetCanvasIds);
}

#[test]
fn register_uses_camel_case_fields() {
    let msg = decode_client_message(r#"{"type":"RegisterForCanvas","clientId":"a","canvasId":"x"}"#)
        .expect("decode");
    assert_eq!(msg, ClientMessage::RegisterForCanvas { client_id: "a".into(), canvas_id: "x".into() });
    assert_eq!(msg.kind(), "RegisterForCanvas");
}

#[test]
fn add_canvas_event_carries_nested_event() {
    let msg = ClientMessage::AddCanvasEvent { client_id: "c1".into(), canvas_id: "x".into(), event: line_event() };
    let value: serde_json::Value = serde_json::from_str(&encode_message(&msg).expect("encode")).expect("json");
    assert_eq!(value["type"], "AddCanvasEvent");
    assert_eq!(value["clientId"], "c1");
    assert_eq!(value["canvasId"], "x");
    assert_eq!(value["event"]["name"], "AddShape");
    assert_eq!(value["event"]["payload"]["shapeType"], "line");

    let back = decode_client_message(&value.to_string()).expect("decode");
    assert_eq!(back, msg);
}

#[test]
fn outbound_event_converts_to_add_canvas_event() {
    let out = OutboundEvent { canvas_id: "x".into(), client_id: "c1".into(), event: line_event() };
    let msg = ClientMessage::from(out);
    assert_eq!(
        msg,
        ClientMessage::AddCanvasEvent { client_id: "c1".into(), canvas_id: "x".into(), event: line_event() }
    );
}

// =============================================================
// Malformed input
// =============================================================

#[test]
fn invalid_json_is_malformed() {
    let err = decode_client_message("{not json").expect_err("should fail");
    assert!(matches!(err, CodecError::Malformed(_)));
}

#[test]
fn unknown_type_is_malformed() {
    let err = decode_client_message(r#"{"type":"DeleteCanvas"}"#).expect_err("should fail");
    assert!(matches!(err, CodecError::Malformed(_)));
}

#[test]
fn missing_field_is_malformed() {
    let err = decode_client_message(r#"{"type":"RegisterForCanvas","clientId":"a"}"#).expect_err("should fail");
    assert!(matches!(err, CodecError::Malformed(_)));
}

#[test]
fn bad_event_payload_is_malformed() {
    let text = json!({
        "type": "AddCanvasEvent",
        "clientId": "a",
        "canvasId": "x",
        "event": {"name": "AddShape", "payload": {"shapeType": "blob", "id": "a-0", "data": {}}}
    })
    .to_string();
    assert!(decode_client_message(&text).is_err());
}

#[test]
fn server_messages_do_not_decode_as_client_messages() {
    assert!(decode_client_message(r#"{"type":"InitClient","id":"a"}"#).is_err());
}

// =============================================================
// Server -> client
// =============================================================

#[test]
fn server_message_layouts() {
    let cases = [
        (ServerMessage::InitClient { id: "a".into() }, json!({"type": "InitClient", "id": "a"})),
        (
            ServerMessage::CreateCanvasComplete { canvas_id: "x".into() },
            json!({"type": "CreateCanvasComplete", "canvasId": "x"}),
        ),
        (
            ServerMessage::CanvasIds { canvas_ids: vec!["x".into(), "y".into()] },
            json!({"type": "CanvasIds", "canvasIds": ["x", "y"]}),
        ),
        (
            ServerMessage::error("E_CANVAS_NOT_FOUND", "canvas not found: x"),
            json!({"type": "Error", "code": "E_CANVAS_NOT_FOUND", "message": "canvas not found: x"}),
        ),
    ];
    for (msg, expected) in cases {
        let text = encode_message(&msg).expect("encode");
        let value: serde_json::Value = serde_json::from_str(&text).expect("json");
        assert_eq!(value, expected);
        assert_eq!(decode_server_message(&text).expect("decode"), msg);
    }
}

#[test]
fn relay_decodes_on_client_side() {
    let text = json!({
        "type": "AddCanvasEvent",
        "canvasId": "x",
        "clientId": "c2",
        "event": {"name": "SelectShape", "payload": {"shapeId": "c1-0", "clientId": "c2"}}
    })
    .to_string();
    let msg = decode_server_message(&text).expect("decode");
    assert_eq!(
        msg,
        ServerMessage::AddCanvasEvent {
            canvas_id: "x".into(),
            client_id: "c2".into(),
            event: CanvasEvent::select_shape("c1-0", "c2"),
        }
    );
}
