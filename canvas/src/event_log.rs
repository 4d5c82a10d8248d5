//! Append-only event log. Folding it from empty always reproduces the same
//! canvas.

#[cfg(test)]
#[path = "event_log_test.rs"]
mod event_log_test;

use serde::{Deserialize, Serialize};

use crate::doc::CanvasDoc;
use crate::event::CanvasEvent;

/// Ordered sequence of events for one canvas. There is no way to remove or
/// reorder entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<CanvasEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_events(events: Vec<CanvasEvent>) -> Self {
        Self { events }
    }

    pub fn append(&mut self, event: CanvasEvent) {
        self.events.push(event);
    }

    #[must_use]
    pub fn events(&self) -> &[CanvasEvent] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CanvasEvent> {
        self.events.iter()
    }

    /// Replay every event from an empty canvas.
    #[must_use]
    pub fn fold(&self) -> CanvasDoc {
        CanvasDoc::from_events(self.iter())
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a CanvasEvent;
    type IntoIter = std::slice::Iter<'a, CanvasEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
