//! Batched reversible edits over the scene tree.

use std::fmt;
use std::sync::Arc;

use crate::document::Document;
use crate::event::DocumentEvent;
use crate::scene::SceneHandle;

use super::action::{Action, EditCallback, EditResult};
use super::fanout;
use super::snapshot::SnapshotRef;

/// Which way a command is being run.
#[derive(Clone, Copy)]
enum Direction {
    Forward,
    Backward,
}

/// One undoable operation: a batch of [`SnapshotRef`]s captured at
/// recording time, applied or undone as a unit.
///
/// References within a command are assumed mutually independent — no
/// reference's target may be an ancestor or descendant of another's.
/// The batch is applied as a data-parallel fan-out, so violating that
/// assumption is a data race; the crate does not defend against it
/// (see [`fanout`]).
///
/// Perform and reverse share one choreography: snapshot the current
/// selection by id, clear it, fan out all references, re-select the
/// ids that still resolve, then publish
/// [`SelectionChanged`](DocumentEvent::SelectionChanged) followed by
/// [`TreeStructureChanged`](DocumentEvent::TreeStructureChanged).
/// Selection is carried by id because restoration deletes and recreates
/// children, invalidating any handle held across the operation.
pub struct EditCommand {
    refs: Vec<SnapshotRef>,
}

impl EditCommand {
    /// Records a diff-mode command from matched before/after states.
    ///
    /// One reference is captured per id that appears in *both*
    /// sequences; ids present in only one of them are silently
    /// excluded. Pure additions and removals are therefore not
    /// representable by this command type.
    pub fn diff(before: &[SceneHandle], after: &[SceneHandle]) -> Self {
        let mut refs = Vec::new();
        for b in before {
            if let Some(a) = after.iter().find(|a| a.id() == b.id()) {
                refs.push(SnapshotRef::diff(b, a));
            }
        }
        if refs.len() < before.len() {
            log::debug!(
                "edit command dropped {} unmatched object(s)",
                before.len() - refs.len()
            );
        }
        Self { refs }
    }

    /// Records a callback-mode command: the same callback value is
    /// applied to every object in the batch.
    pub fn with_callback(objects: &[SceneHandle], callback: EditCallback) -> Self {
        Self {
            refs: objects
                .iter()
                .map(|o| SnapshotRef::with_callback(o, Arc::clone(&callback)))
                .collect(),
        }
    }

    /// Number of references in the batch.
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    /// Returns `true` if the command references no objects.
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Applies the forward effect of every reference.
    pub fn perform(&self, document: &Document) -> EditResult {
        self.execute(document, Direction::Forward)
    }

    /// Restores every reference's target to its recorded before-state.
    pub fn reverse(&self, document: &Document) -> EditResult {
        self.execute(document, Direction::Backward)
    }

    /// Releases the retained references and their snapshots. A
    /// disposed command performs and reverses as an empty batch.
    pub fn dispose(&mut self) {
        self.refs.clear();
    }

    fn execute(&self, document: &Document, direction: Direction) -> EditResult {
        // Restoration deletes and recreates children, so any selected
        // handle may be invalidated mid-flight: track selection by id
        // and only re-establish it once the tree has settled.
        let selected = document.selection().selected_ids();
        document.selection().clear();

        fanout::for_each(&self.refs, |r| match direction {
            Direction::Forward => r.perform(document),
            Direction::Backward => r.reverse(document),
        })?;

        let survivors = selected.into_iter().filter_map(|id| document.tree().find(id));
        document.selection().select(survivors);
        document.publish(DocumentEvent::SelectionChanged);

        let touched: Vec<SceneHandle> = self
            .refs
            .iter()
            .filter_map(|r| document.tree().find(r.id()))
            .collect();
        document.publish(DocumentEvent::TreeStructureChanged { nodes: touched });
        Ok(())
    }
}

impl Action for EditCommand {
    fn perform(&self, document: &Document) -> EditResult {
        EditCommand::perform(self, document)
    }

    fn reverse(&self, document: &Document) -> EditResult {
        EditCommand::reverse(self, document)
    }

    fn dispose(&mut self) {
        EditCommand::dispose(self);
    }
}

impl fmt::Debug for EditCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditCommand")
            .field("refs", &self.refs)
            .finish()
    }
}
