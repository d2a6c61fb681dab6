//! Live scene nodes and their snapshots.
//!
//! A [`SceneObject`] is the mutable, in-tree state of one node. It is
//! always owned through a [`SceneHandle`] — an `Arc<RwLock<..>>` with
//! the node's id kept outside the lock — so that disjoint subtrees can
//! be locked and rewritten from different threads.
//!
//! A [`NodeSnapshot`] is a deep, value-semantic copy of a node and its
//! subtree. Snapshots are never aliased to live state: capturing one
//! decouples it from any further mutation of the original, and
//! restoring from one builds fresh live nodes. Node ids are recorded in
//! snapshots and preserved across restoration.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::id::NodeId;

/// Node transform decomposed into translation, rotation, and scale.
///
/// Plain arrays keep the crate free of a math dependency; convert at
/// the rendering boundary if needed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransform {
    /// Translation [x, y, z].
    pub translation: [f32; 3],
    /// Rotation quaternion [x, y, z, w].
    pub rotation: [f32; 4],
    /// Scale [x, y, z].
    pub scale: [f32; 3],
}

impl NodeTransform {
    /// Identity transform: no translation, identity rotation, unit scale.
    pub const IDENTITY: Self = Self {
        translation: [0.0, 0.0, 0.0],
        rotation: [0.0, 0.0, 0.0, 1.0],
        scale: [1.0, 1.0, 1.0],
    };
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// The live state of one scene node.
///
/// Mutated in place by edits; the id is fixed at creation and survives
/// every [`restore_from`](Self::restore_from). Children are handles so
/// each subtree remains independently lockable.
#[derive(Debug)]
pub struct SceneObject {
    id: NodeId,
    /// Display name.
    pub name: String,
    /// Local transform relative to the parent.
    pub transform: NodeTransform,
    /// Free-form key/value properties.
    pub properties: BTreeMap<String, String>,
    /// Child nodes forming the sub-tree.
    pub children: Vec<SceneHandle>,
}

impl SceneObject {
    pub(crate) fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            transform: NodeTransform::IDENTITY,
            properties: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Returns this node's stable id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Captures a deep snapshot of this node and its entire subtree.
    ///
    /// The snapshot is an independent copy: mutating the live node (or
    /// its descendants) afterwards does not affect it, and vice versa.
    pub fn duplicate(&self) -> NodeSnapshot {
        NodeSnapshot {
            id: self.id,
            name: self.name.clone(),
            transform: self.transform,
            properties: self.properties.clone(),
            children: self.children.iter().map(|c| c.read().duplicate()).collect(),
        }
    }

    /// Destructively restores this node from a snapshot.
    ///
    /// Overwrites the node's own fields and replaces the whole child
    /// set with fresh live nodes built from the snapshot's children —
    /// this is not a merge. Previously-held handles to replaced
    /// descendants keep the old, now-detached nodes alive but no
    /// longer resolve through the tree. The node's own id is unchanged.
    pub fn restore_from(&mut self, snapshot: &NodeSnapshot) {
        debug_assert_eq!(self.id, snapshot.id, "restore across identities");
        self.name = snapshot.name.clone();
        self.transform = snapshot.transform;
        self.properties = snapshot.properties.clone();
        self.children = snapshot.children.iter().map(NodeSnapshot::instantiate).collect();
    }
}

/// Shared handle to a live scene node.
///
/// Cloning is cheap (an `Arc` bump). The id lives outside the lock so
/// tree traversal can match ids without locking every child.
#[derive(Clone)]
pub struct SceneHandle {
    id: NodeId,
    node: Arc<RwLock<SceneObject>>,
}

impl SceneHandle {
    pub(crate) fn new(object: SceneObject) -> Self {
        Self {
            id: object.id,
            node: Arc::new(RwLock::new(object)),
        }
    }

    /// The node's stable id. Does not take the lock.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Locks the node for reading.
    pub fn read(&self) -> RwLockReadGuard<'_, SceneObject> {
        self.node.read()
    }

    /// Locks the node for writing.
    pub fn write(&self) -> RwLockWriteGuard<'_, SceneObject> {
        self.node.write()
    }
}

impl std::fmt::Debug for SceneHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Deliberately lock-free: a node may be write-locked while a
        // debug line about it is formatted on another thread.
        f.debug_struct("SceneHandle").field("id", &self.id).finish()
    }
}

/// Deep, value-semantic copy of a node and its subtree.
///
/// Produced by [`SceneObject::duplicate`] and consumed by
/// [`SceneObject::restore_from`]. Owns all of its data; never aliased
/// to any live node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSnapshot {
    id: NodeId,
    name: String,
    transform: NodeTransform,
    properties: BTreeMap<String, String>,
    children: Vec<NodeSnapshot>,
}

impl NodeSnapshot {
    /// The id of the node this snapshot was taken from.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Builds a fresh, detached live node (and subtree) from this
    /// snapshot, preserving the recorded ids.
    ///
    /// This is how an edit is recorded in diff mode: duplicate the
    /// object, instantiate the copy, mutate it, then hand the original
    /// and the copy to [`EditCommand::diff`](crate::edit::EditCommand::diff).
    /// The copy shares ids with the live node, so it must never be
    /// attached to the same tree.
    pub fn instantiate(&self) -> SceneHandle {
        SceneHandle::new(SceneObject {
            id: self.id,
            name: self.name.clone(),
            transform: self.transform,
            properties: self.properties.clone(),
            children: self.children.iter().map(NodeSnapshot::instantiate).collect(),
        })
    }
}
