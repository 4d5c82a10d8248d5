//! Shared canvas model for the collaborative sketchboard.
//!
//! Every client keeps its own replica of a canvas as an append-only
//! [`event_log::EventLog`] and folds it into a [`doc::CanvasDoc`]. The server
//! stores the same log and only relays; it never folds. Because folding is
//! deterministic, replicas that saw the same events in the same order hold
//! the same shapes and selection.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`geom`] | `Point` and 2D vector helpers |
//! | [`shape`] | Colors, per-kind shape data, the immutable `Shape` |
//! | [`hit`] | Point-in-shape predicates |
//! | [`event`] | `CanvasEvent` and its wire encoding |
//! | [`event_log`] | Append-only event sequence |
//! | [`doc`] | Folded shapes, draw order, and selection |
//! | [`sync`] | Client-side sync agent (local and remote paths) |
//! | [`input`] | Tools, modifiers, and the drawing gesture machine |
//! | [`consts`] | Shared constants |

pub mod consts;
pub mod doc;
pub mod event;
pub mod event_log;
pub mod geom;
pub mod hit;
pub mod input;
pub mod shape;
pub mod sync;
