//! One object's before/after capture.

use std::fmt;

use crate::document::Document;
use crate::scene::{NodeId, NodeSnapshot, SceneHandle};

use super::action::{EditCallback, EditResult};

/// How a reference moves its target forward.
enum EditKind {
    /// Restore the target from a captured "after" snapshot.
    Diff { after: NodeSnapshot },
    /// Run a mutation callback against the live target.
    Callback { run: EditCallback },
}

/// Captures one object's identity plus the state needed to move it
/// forward and backward in time.
///
/// A `before` snapshot is always captured. The forward direction is
/// either a second snapshot (diff mode) or a callback (callback mode);
/// the backward direction is always snapshot-based — there is no
/// guaranteed inverse of an arbitrary callback, so [`reverse`](Self::reverse)
/// never consults it.
///
/// Both snapshots are private deep copies, decoupled from any further
/// mutation of the originals at construction time.
pub struct SnapshotRef {
    id: NodeId,
    before: NodeSnapshot,
    kind: EditKind,
}

impl SnapshotRef {
    /// Captures a diff-mode reference from a matched before/after pair.
    ///
    /// Both handles must carry the same id: they are two states of the
    /// same object (the "after" is typically a detached, mutated copy).
    pub fn diff(before: &SceneHandle, after: &SceneHandle) -> Self {
        debug_assert_eq!(before.id(), after.id(), "diff across identities");
        Self {
            id: before.id(),
            before: before.read().duplicate(),
            kind: EditKind::Diff {
                after: after.read().duplicate(),
            },
        }
    }

    /// Captures a callback-mode reference: a `before` snapshot plus the
    /// forward mutation to run on the live object.
    pub fn with_callback(object: &SceneHandle, callback: EditCallback) -> Self {
        Self {
            id: object.id(),
            before: object.read().duplicate(),
            kind: EditKind::Callback { run: callback },
        }
    }

    /// The id of the object this reference targets.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Applies the forward effect to the live object.
    ///
    /// If the id no longer resolves the reference does nothing —
    /// absence is a valid outcome, not a failure. Only a callback can
    /// return an error.
    pub fn perform(&self, document: &Document) -> EditResult {
        let node = match document.tree().find(self.id) {
            Some(node) => node,
            None => return Ok(()),
        };
        match &self.kind {
            EditKind::Diff { after } => {
                node.write().restore_from(after);
                Ok(())
            }
            EditKind::Callback { run } => {
                let mut guard = node.write();
                run(document, &mut *guard)
            }
        }
    }

    /// Restores the live object to its `before` state.
    ///
    /// Always snapshot-based, regardless of mode. If the id no longer
    /// resolves the reference does nothing.
    pub fn reverse(&self, document: &Document) -> EditResult {
        if let Some(node) = document.tree().find(self.id) {
            node.write().restore_from(&self.before);
        }
        Ok(())
    }
}

impl fmt::Debug for SnapshotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.kind {
            EditKind::Diff { .. } => "diff",
            EditKind::Callback { .. } => "callback",
        };
        f.debug_struct("SnapshotRef")
            .field("id", &self.id)
            .field("mode", &mode)
            .finish()
    }
}
