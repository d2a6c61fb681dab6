//! Document change notifications.
//!
//! Edits publish events through a [`NotificationBus`] injected into the
//! [`Document`](crate::document::Document) rather than an ambient
//! global channel, so applications wire up their own dispatch and tests
//! substitute a [`RecordingBus`].

use parking_lot::Mutex;

use crate::scene::SceneHandle;

/// A change notification published after an edit is applied or undone.
#[derive(Debug, Clone)]
pub enum DocumentEvent {
    /// The selection was re-established. Published once per
    /// perform/reverse, before [`TreeStructureChanged`](Self::TreeStructureChanged).
    SelectionChanged,
    /// The tree's structure changed.
    TreeStructureChanged {
        /// The nodes touched by the edit, re-resolved after the fact.
        /// Nodes that no longer exist are filtered out.
        nodes: Vec<SceneHandle>,
    },
}

/// Publishes document change notifications. Fire-and-forget: no return
/// value, and publishing must not call back into the document.
pub trait NotificationBus: Send + Sync {
    /// Delivers one event to whoever is listening.
    fn publish(&self, event: DocumentEvent);
}

/// A bus that drops every event. The default for documents that have no
/// listeners wired up.
#[derive(Debug, Default)]
pub struct NullBus;

impl NotificationBus for NullBus {
    fn publish(&self, _event: DocumentEvent) {}
}

/// A bus that records every published event, in order.
///
/// The substitute used by this crate's own tests; public because
/// downstream test code needs the same stub.
#[derive(Debug, Default)]
pub struct RecordingBus {
    events: Mutex<Vec<DocumentEvent>>,
}

impl RecordingBus {
    /// Creates an empty recording bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all recorded events, draining the record.
    pub fn take(&self) -> Vec<DocumentEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Returns `true` if nothing has been published.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl NotificationBus for RecordingBus {
    fn publish(&self, event: DocumentEvent) {
        self.events.lock().push(event);
    }
}
