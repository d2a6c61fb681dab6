//! Stable node identities.
//!
//! A [`NodeId`] identifies a node for the lifetime of its document,
//! independent of where the node sits in the tree. Snapshots record ids
//! and restoration preserves them, which is what lets selection and
//! later edits re-resolve objects after a subtree has been rebuilt.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Stable identifier for a scene node.
///
/// Unique within one document for the document's lifetime. Ids are
/// minted by the tree's [`IdAllocator`] and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Returns the raw numeric value of this id.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Mints unique [`NodeId`]s for one document.
///
/// Thread-safe: `next_id` only needs `&self`, so nodes can be spawned
/// from any context that can reach the tree.
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    /// Creates an allocator starting at id 1.
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Returns a fresh, never-before-issued id.
    pub fn next_id(&self) -> NodeId {
        // Relaxed is enough: only uniqueness matters, not ordering
        // relative to other memory operations.
        NodeId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
