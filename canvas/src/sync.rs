//! Client-side sync agent: one client's view of one canvas.
//!
//! DESIGN
//! ======
//! The agent owns a local [`EventLog`] and the [`CanvasDoc`] folded from it.
//! There are two ways in, and they share nothing but that log:
//!
//! - **Local** ([`SyncAgent::apply_local`]): the user did something. Append,
//!   fold, flag a redraw, and queue the event for the server. The local view
//!   updates before the network has seen anything.
//! - **Remote** ([`SyncAgent::apply_remote`]): the server relayed another
//!   client's event. Append, fold, flag a redraw. Never queued, so nothing is
//!   sent twice.
//!
//! The server does not echo a client's own events back, so there is nothing
//! to reconcile. The transport drains [`SyncAgent::drain_outbox`] and feeds
//! relays into `apply_remote`; the agent itself does no I/O.
//!
//! Editing an existing shape is always a remove followed by an add under the
//! same id. That also moves the shape to the top of the draw order.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::doc::CanvasDoc;
use crate::event::CanvasEvent;
use crate::event_log::EventLog;
use crate::geom::Point;
use crate::input::Modifiers;
use crate::shape::{CanvasId, ClientId, Color, ShapeData, ShapeId};

/// A locally generated event waiting to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundEvent {
    pub canvas_id: CanvasId,
    pub client_id: ClientId,
    pub event: CanvasEvent,
}

/// Keeps one client's replica of a canvas in step with the server.
#[derive(Debug)]
pub struct SyncAgent {
    client_id: ClientId,
    canvas_id: CanvasId,
    log: EventLog,
    doc: CanvasDoc,
    next_shape_seq: u64,
    outbox: VecDeque<OutboundEvent>,
    render_needed: bool,
}

impl SyncAgent {
    #[must_use]
    pub fn new(client_id: impl Into<ClientId>, canvas_id: impl Into<CanvasId>) -> Self {
        Self {
            client_id: client_id.into(),
            canvas_id: canvas_id.into(),
            log: EventLog::new(),
            doc: CanvasDoc::new(),
            next_shape_seq: 0,
            outbox: VecDeque::new(),
            render_needed: false,
        }
    }

    // =========================================================================
    // EVENT PATHS
    // =========================================================================

    /// Apply an event produced by this client and queue it for the server.
    pub fn apply_local(&mut self, event: CanvasEvent) {
        debug!(name = event.name(), shape_id = event.shape_id(), "local event");
        self.append(event.clone());
        self.outbox.push_back(OutboundEvent {
            canvas_id: self.canvas_id.clone(),
            client_id: self.client_id.clone(),
            event,
        });
    }

    /// Apply an event relayed from another client. Returns `false` and leaves
    /// state untouched when the event belongs to a different canvas.
    pub fn apply_remote(&mut self, canvas_id: &str, event: CanvasEvent) -> bool {
        if canvas_id != self.canvas_id {
            warn!(
                expected = %self.canvas_id,
                got = %canvas_id,
                name = event.name(),
                "ignoring remote event for another canvas"
            );
            return false;
        }
        self.append(event);
        true
    }

    fn append(&mut self, event: CanvasEvent) {
        self.doc.apply(&event);
        self.log.append(event);
        self.render_needed = true;
    }

    // =========================================================================
    // LOCAL OPERATIONS
    // =========================================================================

    /// Add a new shape under a freshly allocated `"<clientId>-<n>"` id.
    pub fn add_shape(&mut self, data: ShapeData) -> ShapeId {
        let id = self.next_shape_id();
        self.apply_local(CanvasEvent::add_shape(id.clone(), data));
        id
    }

    fn next_shape_id(&mut self) -> ShapeId {
        let id = format!("{}-{}", self.client_id, self.next_shape_seq);
        self.next_shape_seq += 1;
        id
    }

    /// Selector-tool click at `pt`.
    ///
    /// Without Ctrl the current selection is cleared first. With Alt, shapes
    /// that are already selected are skipped, so repeated Alt-clicks walk
    /// down through a stack of overlapping shapes. The topmost remaining
    /// candidate is selected.
    pub fn select_at(&mut self, pt: Point, modifiers: Modifiers) -> Option<ShapeId> {
        let previously_selected = self.owned_selected_ids();
        let target = self
            .doc
            .shape_ids_at_point(pt)
            .into_iter()
            .filter(|id| !modifiers.alt || !self.doc.is_selected(id))
            .next_back()
            .map(str::to_owned);

        if !modifiers.ctrl {
            for id in previously_selected {
                self.apply_local(CanvasEvent::unselect_shape(id, self.client_id.clone()));
            }
        }

        let target = target?;
        self.apply_local(CanvasEvent::select_shape(target.clone(), self.client_id.clone()));
        Some(target)
    }

    /// Unselect every selected id.
    pub fn unselect_all(&mut self) {
        for id in self.owned_selected_ids() {
            self.apply_local(CanvasEvent::unselect_shape(id, self.client_id.clone()));
        }
    }

    /// Remove every selected live shape. Returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        let ids: Vec<ShapeId> = self.doc.selected_shapes().iter().map(|s| s.id().to_owned()).collect();
        for id in &ids {
            self.apply_local(CanvasEvent::remove_shape(id.clone()));
        }
        ids.len()
    }

    /// Recolor the fill of every selected live shape.
    pub fn set_fill_color_for_selected(&mut self, color: Color) -> usize {
        self.replace_selected(|data| data.with_fill_color(color))
    }

    /// Recolor the outline of every selected live shape.
    pub fn set_outline_color_for_selected(&mut self, color: Color) -> usize {
        self.replace_selected(|data| data.with_outline_color(color))
    }

    /// Lift every selected live shape to the top of the draw order, keeping
    /// their relative order.
    pub fn move_selected_to_foreground(&mut self) -> usize {
        self.replace_selected(|data| data)
    }

    /// Sink every selected live shape below the rest by lifting each
    /// unselected live shape to the top, bottom first. Returns how many
    /// shapes were lifted; with nothing selected no events are emitted.
    pub fn move_selected_to_background(&mut self) -> usize {
        if self.doc.selected_shapes().is_empty() {
            return 0;
        }
        let lifted: Vec<(ShapeId, ShapeData)> = self
            .doc
            .shapes()
            .into_iter()
            .filter(|s| !self.doc.is_selected(s.id()))
            .map(|s| (s.id().to_owned(), s.data().clone()))
            .collect();
        self.reissue(lifted)
    }

    fn replace_selected(&mut self, edit: impl Fn(ShapeData) -> ShapeData) -> usize {
        let edits: Vec<(ShapeId, ShapeData)> = self
            .doc
            .selected_shapes()
            .iter()
            .map(|s| (s.id().to_owned(), edit(s.data().clone())))
            .collect();
        self.reissue(edits)
    }

    /// Remove then re-add each shape, which also puts it on top.
    fn reissue(&mut self, shapes: Vec<(ShapeId, ShapeData)>) -> usize {
        let count = shapes.len();
        for (id, data) in shapes {
            self.apply_local(CanvasEvent::remove_shape(id.clone()));
            self.apply_local(CanvasEvent::add_shape(id, data));
        }
        count
    }

    fn owned_selected_ids(&self) -> Vec<ShapeId> {
        self.doc.selected_ids().into_iter().map(str::to_owned).collect()
    }

    // =========================================================================
    // TRANSPORT / RENDER HOOKS
    // =========================================================================

    /// Take every queued outbound event, oldest first.
    pub fn drain_outbox(&mut self) -> Vec<OutboundEvent> {
        self.outbox.drain(..).collect()
    }

    #[must_use]
    pub fn pending_outbound(&self) -> usize {
        self.outbox.len()
    }

    /// Return and clear the redraw flag.
    pub fn take_render_needed(&mut self) -> bool {
        std::mem::take(&mut self.render_needed)
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    #[must_use]
    pub fn canvas_id(&self) -> &str {
        &self.canvas_id
    }

    #[must_use]
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    #[must_use]
    pub fn doc(&self) -> &CanvasDoc {
        &self.doc
    }
}
