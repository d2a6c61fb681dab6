//! The document's selection store.
//!
//! Selection is transient UI state: it never participates in undo data,
//! but every edit must carry it across a subtree rebuild. [`Selection`]
//! uses interior mutability ([`Mutex`]) so that code holding only
//! `&self` — including an edit command mid-execution — can snapshot,
//! clear, and re-establish it.

use std::fmt;

use parking_lot::Mutex;

use crate::scene::{NodeId, SceneHandle};

/// Holds the set of currently selected live nodes.
pub struct Selection {
    inner: Mutex<Vec<SceneHandle>>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Vec::new()),
        }
    }

    /// Returns handles to the selected nodes, in selection order.
    pub fn selected(&self) -> Vec<SceneHandle> {
        self.inner.lock().clone()
    }

    /// Returns the ids of the selected nodes, in selection order.
    ///
    /// Edits track selection by id rather than by handle: restoration
    /// replaces subtrees wholesale, so a handle captured before an edit
    /// may point at a node that is no longer in the tree.
    pub fn selected_ids(&self) -> Vec<NodeId> {
        self.inner.lock().iter().map(SceneHandle::id).collect()
    }

    /// Deselects everything.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Adds nodes to the selection.
    pub fn select(&self, nodes: impl IntoIterator<Item = SceneHandle>) {
        self.inner.lock().extend(nodes);
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Number of selected nodes.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.inner.lock().len();
        f.debug_struct("Selection").field("selected", &len).finish()
    }
}
