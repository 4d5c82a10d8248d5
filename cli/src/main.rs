use std::time::Duration;

use canvas::event::CanvasEvent;
use canvas::geom::Point;
use canvas::shape::{Color, DragData, ShapeData, TriangleData};
use canvas::sync::SyncAgent;
use clap::{Args, Parser, Subcommand};
use frames::{ClientMessage, ServerMessage};
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

type WsStream = tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

const REPLY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("websocket failed: {0}")]
    Ws(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("websocket closed")]
    WsClosed,
    #[error("message decode failed: {0}")]
    Decode(#[from] frames::CodecError),
    #[error("timed out waiting for the server")]
    Timeout,
    #[error("server returned {code}: {message}")]
    Server { code: String, message: String },
    #[error("unexpected {0} message")]
    Unexpected(&'static str),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl From<tokio_tungstenite::tungstenite::Error> for CliError {
    fn from(error: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::Ws(Box::new(error))
    }
}

#[derive(Parser, Debug)]
#[command(name = "sketchboard-cli", about = "Sketchboard HTTP and websocket CLI")]
struct Cli {
    #[arg(long, env = "SKETCHBOARD_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the server is up.
    Ping,
    /// List canvas ids.
    Canvases,
    /// Create an empty canvas and print its id.
    Create,
    /// Add one shape to a canvas.
    Draw(DrawArgs),
    /// Print events other clients add to a canvas.
    Watch(WatchArgs),
}

#[derive(Args, Debug)]
struct DrawArgs {
    #[arg(long)]
    canvas_id: String,

    /// Fill color as `r,g,b` or `r,g,b,alpha`.
    #[arg(long, value_parser = parse_color)]
    fill: Option<Color>,

    /// Outline color as `r,g,b` or `r,g,b,alpha`.
    #[arg(long, value_parser = parse_color)]
    outline: Option<Color>,

    #[command(subcommand)]
    shape: ShapeArgs,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum ShapeArgs {
    Line {
        #[arg(value_parser = parse_point)]
        from: Point,
        #[arg(value_parser = parse_point)]
        to: Point,
    },
    Rectangle {
        #[arg(value_parser = parse_point)]
        from: Point,
        #[arg(value_parser = parse_point)]
        to: Point,
    },
    Circle {
        #[arg(value_parser = parse_point)]
        center: Point,
        /// Any point on the circumference.
        #[arg(value_parser = parse_point)]
        edge: Point,
    },
    Triangle {
        #[arg(value_parser = parse_point)]
        p1: Point,
        #[arg(value_parser = parse_point)]
        p2: Point,
        #[arg(value_parser = parse_point)]
        p3: Point,
    },
}

#[derive(Args, Debug)]
struct WatchArgs {
    #[arg(long)]
    canvas_id: String,

    #[arg(long, help = "Stop after this many events")]
    max_events: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let base_url = cli.base_url.trim_end_matches('/').to_owned();

    match cli.command {
        Command::Ping => run_ping(&base_url).await,
        Command::Canvases => run_canvases(&base_url).await,
        Command::Create => run_create(&base_url).await,
        Command::Draw(args) => run_draw(&base_url, args).await,
        Command::Watch(args) => run_watch(&base_url, args).await,
    }
}

// =============================================================================
// HTTP
// =============================================================================

async fn run_ping(base_url: &str) -> Result<(), CliError> {
    let response = reqwest::get(format!("{base_url}/healthz")).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Server {
            code: format!("HTTP {}", status.as_u16()),
            message: "health check failed".to_owned(),
        });
    }
    println!("ok");
    Ok(())
}

async fn run_canvases(base_url: &str) -> Result<(), CliError> {
    let response = reqwest::get(format!("{base_url}/api/canvasIds")).await?;
    let status = response.status();
    let body = response.text().await?;
    let value = canvas_ids_body(status, &body)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

/// A failed status carries the raw body as its message; a successful one
/// must decode.
fn canvas_ids_body(status: reqwest::StatusCode, body: &str) -> Result<Value, CliError> {
    if !status.is_success() {
        return Err(CliError::Server { code: format!("HTTP {}", status.as_u16()), message: body.to_owned() });
    }
    Ok(serde_json::from_str(body)?)
}

// =============================================================================
// WEBSOCKET COMMANDS
// =============================================================================

async fn run_create(base_url: &str) -> Result<(), CliError> {
    let (mut stream, _client_id) = connect(base_url).await?;
    send(&mut stream, &ClientMessage::CreateCanvas).await?;
    match recv_next(&mut stream, Some(REPLY_TIMEOUT)).await? {
        ServerMessage::CreateCanvasComplete { canvas_id } => {
            println!("{canvas_id}");
            stream.close(None).await?;
            Ok(())
        }
        other => Err(unexpected(other)),
    }
}

async fn run_draw(base_url: &str, args: DrawArgs) -> Result<(), CliError> {
    // Sending does not require membership, so draw never registers.
    let (mut stream, client_id) = connect(base_url).await?;

    let mut agent = SyncAgent::new(client_id, args.canvas_id.clone());
    let shape_id = agent.add_shape(shape_data(args.shape, args.fill, args.outline));
    for msg in draw_messages(&mut agent) {
        send(&mut stream, &msg).await?;
    }
    wait_for_canvas_ids(&mut stream).await?;
    stream.close(None).await?;

    println!("{shape_id}");
    Ok(())
}

async fn run_watch(base_url: &str, args: WatchArgs) -> Result<(), CliError> {
    let (mut stream, client_id) = connect(base_url).await?;
    let early = register(&mut stream, &client_id, &args.canvas_id).await?;
    eprintln!("watching canvas {} as {client_id}", args.canvas_id);

    let mut agent = SyncAgent::new(client_id, args.canvas_id.clone());
    let mut seen = 0_usize;
    let mut pending = early.into_iter();
    while args.max_events.is_none_or(|limit| seen < limit) {
        let message = match pending.next() {
            Some(message) => message,
            None => tokio::select! {
                message = recv_next(&mut stream, None) => message?,
                _ = tokio::signal::ctrl_c() => break,
            },
        };
        let ServerMessage::AddCanvasEvent { canvas_id, client_id: from, event } = message else {
            continue;
        };
        let line = describe_event(&from, &event);
        if agent.apply_remote(&canvas_id, event) {
            seen = seen.saturating_add(1);
            println!("{line} shapes={} selected={}", agent.doc().len(), agent.doc().selected_ids().len());
        }
    }

    for msg in leave_messages(agent.client_id(), agent.canvas_id()) {
        send(&mut stream, &msg).await?;
    }
    wait_for_canvas_ids(&mut stream).await?;
    stream.close(None).await?;
    Ok(())
}

// =============================================================================
// PROTOCOL HELPERS
// =============================================================================

async fn connect(base_url: &str) -> Result<(WsStream, String), CliError> {
    let (mut stream, _) = connect_async(ws_url(base_url)?).await?;
    match recv_next(&mut stream, Some(REPLY_TIMEOUT)).await? {
        ServerMessage::InitClient { id } => Ok((stream, id)),
        other => Err(unexpected(other)),
    }
}

/// Register for a canvas and confirm it with a round trip, since registration
/// has no reply of its own. Returns relays that arrived before confirmation.
async fn register(stream: &mut WsStream, client_id: &str, canvas_id: &str) -> Result<Vec<ServerMessage>, CliError> {
    let msg = ClientMessage::RegisterForCanvas { client_id: client_id.to_owned(), canvas_id: canvas_id.to_owned() };
    send(stream, &msg).await?;
    send(stream, &ClientMessage::GetCanvasIds).await?;
    wait_for_canvas_ids(stream).await
}

/// The agent's queued events, then a `GetCanvasIds` round trip. Relays are
/// never echoed, so its reply is what confirms the events were handled.
fn draw_messages(agent: &mut SyncAgent) -> Vec<ClientMessage> {
    let mut messages: Vec<ClientMessage> = agent.drain_outbox().into_iter().map(ClientMessage::from).collect();
    messages.push(ClientMessage::GetCanvasIds);
    messages
}

/// Unregister, confirmed the same way as [`register`].
fn leave_messages(client_id: &str, canvas_id: &str) -> [ClientMessage; 2] {
    [
        ClientMessage::UnregisterForCanvas { client_id: client_id.to_owned(), canvas_id: canvas_id.to_owned() },
        ClientMessage::GetCanvasIds,
    ]
}

async fn wait_for_canvas_ids(stream: &mut WsStream) -> Result<Vec<ServerMessage>, CliError> {
    let mut early = Vec::new();
    loop {
        match recv_next(stream, Some(REPLY_TIMEOUT)).await? {
            ServerMessage::CanvasIds { .. } => return Ok(early),
            relay @ ServerMessage::AddCanvasEvent { .. } => early.push(relay),
            other => return Err(unexpected(other)),
        }
    }
}

async fn send(stream: &mut WsStream, msg: &ClientMessage) -> Result<(), CliError> {
    let text = frames::encode_message(msg)?;
    stream.send(Message::Text(text.into())).await?;
    Ok(())
}

/// Next protocol message. Server `Error` replies become [`CliError::Server`].
async fn recv_next(stream: &mut WsStream, timeout: Option<Duration>) -> Result<ServerMessage, CliError> {
    let fut = async {
        loop {
            let Some(message) = stream.next().await else {
                return Err(CliError::WsClosed);
            };
            match message? {
                Message::Text(text) => {
                    return match frames::decode_server_message(text.as_str())? {
                        ServerMessage::Error { code, message } => Err(CliError::Server { code, message }),
                        msg => Ok(msg),
                    };
                }
                Message::Close(_) => return Err(CliError::WsClosed),
                _ => {}
            }
        }
    };

    match timeout {
        Some(limit) => tokio::time::timeout(limit, fut).await.map_err(|_| CliError::Timeout)?,
        None => fut.await,
    }
}

fn unexpected(msg: ServerMessage) -> CliError {
    CliError::Unexpected(match msg {
        ServerMessage::InitClient { .. } => "InitClient",
        ServerMessage::CreateCanvasComplete { .. } => "CreateCanvasComplete",
        ServerMessage::AddCanvasEvent { .. } => "AddCanvasEvent",
        ServerMessage::CanvasIds { .. } => "CanvasIds",
        ServerMessage::Error { .. } => "Error",
    })
}

fn ws_url(base_url: &str) -> Result<String, CliError> {
    if let Some(rest) = base_url.strip_prefix("http://") {
        return Ok(format!("ws://{rest}/ws"));
    }
    if let Some(rest) = base_url.strip_prefix("https://") {
        return Ok(format!("wss://{rest}/ws"));
    }

    Err(CliError::InvalidBaseUrl(base_url.to_owned()))
}

// =============================================================================
// ARGUMENTS
// =============================================================================

fn shape_data(shape: ShapeArgs, fill: Option<Color>, outline: Option<Color>) -> ShapeData {
    let data = match shape {
        ShapeArgs::Line { from, to } => ShapeData::Line(DragData::new(from, to)),
        ShapeArgs::Rectangle { from, to } => ShapeData::Rectangle(DragData::new(from, to)),
        ShapeArgs::Circle { center, edge } => ShapeData::Circle(DragData::new(center, edge)),
        ShapeArgs::Triangle { p1, p2, p3 } => ShapeData::Triangle(TriangleData::new(p1, p2, p3)),
    };
    let data = match fill {
        Some(color) => data.with_fill_color(color),
        None => data,
    };
    match outline {
        Some(color) => data.with_outline_color(color),
        None => data,
    }
}

fn describe_event(from: &str, event: &CanvasEvent) -> String {
    match event {
        CanvasEvent::AddShape(add) => format!("{from} {} {} {}", event.name(), add.shape_type().as_str(), add.id),
        _ => format!("{from} {} {}", event.name(), event.shape_id()),
    }
}

/// Parse `x,y`.
fn parse_point(raw: &str) -> Result<Point, String> {
    let (x, y) = raw.split_once(',').ok_or_else(|| format!("expected x,y, got {raw:?}"))?;
    let x = x.trim().parse::<f64>().map_err(|e| format!("bad x in {raw:?}: {e}"))?;
    let y = y.trim().parse::<f64>().map_err(|e| format!("bad y in {raw:?}: {e}"))?;
    Ok(Point::new(x, y))
}

/// Parse `r,g,b` or `r,g,b,alpha`.
fn parse_color(raw: &str) -> Result<Color, String> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    let (rgb, alpha) = match parts.as_slice() {
        [r, g, b] => ([*r, *g, *b], 1.0),
        [r, g, b, a] => ([*r, *g, *b], a.parse::<f64>().map_err(|e| format!("bad alpha in {raw:?}: {e}"))?),
        _ => return Err(format!("expected r,g,b[,alpha], got {raw:?}")),
    };
    let mut channels = [0_u8; 3];
    for (slot, part) in channels.iter_mut().zip(rgb) {
        *slot = part.parse::<u8>().map_err(|e| format!("bad channel {part:?}: {e}"))?;
    }
    Color::new(channels[0], channels[1], channels[2], alpha).map_err(|e| e.to_string())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
