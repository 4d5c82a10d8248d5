//! Structured error codes shared by every reply path.
//!
//! Each layer keeps its own `thiserror` enum. Implementing [`ErrorCode`] is
//! what lets the websocket handler turn any of them into an `Error` message
//! with a stable, grepable code.

use frames::{CodecError, ServerMessage};

/// Grepable error code and retryable flag for structured error replies.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

impl ErrorCode for CodecError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "E_MALFORMED_MESSAGE",
            Self::Encode(_) => "E_ENCODE",
        }
    }
}

/// Build the `Error` reply for `err`.
pub fn error_reply(err: &impl ErrorCode) -> ServerMessage {
    ServerMessage::error(err.error_code(), err.to_string())
}
