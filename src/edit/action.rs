//! The reversible-edit contract and its error type.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::document::Document;
use crate::scene::SceneObject;

/// Error type for edit execution failures.
///
/// The taxonomy is deliberately small: the only thing that can fail
/// during perform/reverse is a user-supplied callback. A reference
/// whose target no longer resolves is a silent no-op, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// A mutation callback reported failure.
    #[error("edit callback failed: {0}")]
    Callback(String),
}

impl EditError {
    /// Convenience constructor for callback failures.
    pub fn callback(message: impl Into<String>) -> Self {
        Self::Callback(message.into())
    }
}

/// Result type for edit operations.
pub type EditResult<T = ()> = Result<T, EditError>;

/// A forward-only mutation applied to one live node.
///
/// Stored by value in a command and shared across the references of a
/// callback-mode batch, so it must be `Send + Sync` and re-invocable.
/// During a fan-out it runs while the target node is write-locked, with
/// other references' callbacks running concurrently; it must therefore
/// confine its effect to the node it receives. In particular it must
/// not resolve ids inside its own subtree through
/// [`SceneTree::find`](crate::scene::SceneTree::find) — the node is
/// locked, and a traversal reaching it would deadlock.
pub type EditCallback = Arc<dyn Fn(&Document, &mut SceneObject) -> EditResult + Send + Sync>;

/// A single undoable operation on a document (Command pattern).
///
/// This crate defines the contract of *one* command; stacking commands
/// into an undo/redo history is the caller's concern. Implementations
/// must guarantee that `reverse` restores every observable change made
/// by the matching `perform`.
///
/// Dyn-compatible so heterogeneous commands can live in one stack as
/// `Box<dyn Action>`.
pub trait Action: fmt::Debug + Send {
    /// Applies the forward effect.
    fn perform(&self, document: &Document) -> EditResult;

    /// Restores the state from before [`perform`](Self::perform).
    fn reverse(&self, document: &Document) -> EditResult;

    /// Releases retained state (snapshots). After `dispose`, the
    /// command must not be performed or reversed again.
    fn dispose(&mut self) {}
}
