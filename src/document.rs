//! The document: one scene tree plus its editing state.

use std::fmt;
use std::sync::Arc;

use crate::event::{DocumentEvent, NotificationBus, NullBus};
use crate::scene::SceneTree;
use crate::selection::Selection;

/// An open document: the scene tree, the current selection, and the
/// notification bus edits publish through.
///
/// Everything an edit command needs is reachable from `&Document`, so
/// commands (and their fan-out workers) share one borrow. The bus is
/// injected at construction — see [`Document::with_bus`].
pub struct Document {
    tree: SceneTree,
    selection: Selection,
    bus: Arc<dyn NotificationBus>,
}

impl Document {
    /// Creates a document with no listeners ([`NullBus`]).
    pub fn new() -> Self {
        Self::with_bus(Arc::new(NullBus))
    }

    /// Creates a document publishing through the given bus.
    pub fn with_bus(bus: Arc<dyn NotificationBus>) -> Self {
        Self {
            tree: SceneTree::new(),
            selection: Selection::new(),
            bus,
        }
    }

    /// The scene tree.
    pub fn tree(&self) -> &SceneTree {
        &self.tree
    }

    /// The selection store.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Publishes an event on the document's bus.
    pub fn publish(&self, event: DocumentEvent) {
        self.bus.publish(event);
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("tree", &self.tree)
            .field("selection", &self.selection)
            .finish()
    }
}
