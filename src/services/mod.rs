//! Domain services used by websocket and HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own registry mutation and relay so route handlers can stay
//! focused on protocol translation.

pub mod canvas;
pub mod session;
