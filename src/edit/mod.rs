//! Reversible edit commands over the scene tree.
//!
//! This module is the undo/redo core: it records an edit as a batch of
//! per-object snapshots and replays it in either direction while
//! carrying the selection across and notifying listeners.
//!
//! - [`Action`] — the one-command perform/reverse contract an external
//!   undo stack composes over
//! - [`SnapshotRef`] — one object's before/after (or before/callback)
//!   capture
//! - [`EditCommand`] — a batch of references forming one undoable
//!   operation
//! - [`EditError`] / [`EditResult`] — error handling for edits
//!
//! # Recording an edit
//!
//! Diff mode: duplicate the objects you are about to change, mutate the
//! copies, then record the matched pair:
//!
//! ```ignore
//! let command = EditCommand::diff(&originals, &edited_copies);
//! command.perform(&document)?;   // apply
//! command.reverse(&document)?;   // undo
//! ```
//!
//! Callback mode records a forward-only mutation; reversal always
//! restores the captured before-state, so the callback never needs an
//! inverse:
//!
//! ```ignore
//! let command = EditCommand::with_callback(&objects, Arc::new(|doc, obj| {
//!     obj.properties.insert("hidden".into(), "true".into());
//!     Ok(())
//! }));
//! ```
//!
//! # Parallel application
//!
//! A command applies its references as a data-parallel fan-out with a
//! join barrier. This is only sound because references in one command
//! are required to target disjoint subtrees — see [`EditCommand`] for
//! the exact contract.

mod action;
mod command;
mod fanout;
mod snapshot;

pub use action::{Action, EditCallback, EditError, EditResult};
pub use command::EditCommand;
pub use snapshot::SnapshotRef;
