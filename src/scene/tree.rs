//! The document's scene tree and id-based lookup.

use super::id::{IdAllocator, NodeId};
use super::node::{SceneHandle, SceneObject};

/// A tree of live scene nodes rooted at a single root node.
///
/// The tree owns the document's [`IdAllocator`], so every node spawned
/// through it gets a unique id. Lookup ([`find`](Self::find)) takes
/// `&self` and only ever holds one node lock at a time, which makes it
/// safe to call concurrently with edits to *other* subtrees — the
/// contract the edit fan-out relies on.
#[derive(Debug)]
pub struct SceneTree {
    root: SceneHandle,
    ids: IdAllocator,
}

impl SceneTree {
    /// Creates a tree containing only a root node.
    pub fn new() -> Self {
        let ids = IdAllocator::new();
        let root = SceneHandle::new(SceneObject::new(ids.next_id(), "root"));
        Self { root, ids }
    }

    /// The root node.
    pub fn root(&self) -> &SceneHandle {
        &self.root
    }

    /// Creates a detached node with a fresh id.
    ///
    /// The node is not part of the tree until [`attach`](Self::attach)ed
    /// (or pushed onto a live node's children by an edit callback).
    pub fn spawn(&self, name: impl Into<String>) -> SceneHandle {
        SceneHandle::new(SceneObject::new(self.ids.next_id(), name))
    }

    /// Attaches `node` as a child of `parent`.
    ///
    /// Returns `false` if `parent` does not resolve. The caller is
    /// responsible for not attaching a node below itself.
    pub fn attach(&self, parent: NodeId, node: SceneHandle) -> bool {
        match self.find(parent) {
            Some(p) => {
                p.write().children.push(node);
                true
            }
            None => false,
        }
    }

    /// Detaches the node with the given id from its parent and returns
    /// its handle. Returns `None` if the id does not resolve or names
    /// the root (the root cannot be detached).
    pub fn detach(&self, id: NodeId) -> Option<SceneHandle> {
        if id == self.root.id() {
            return None;
        }
        Self::detach_below(&self.root, id)
    }

    /// Resolves an id to its live node, or `None` if no such node is
    /// currently in the tree. Absence is a normal outcome, not an
    /// error: edits treat unresolvable ids as silent no-ops.
    pub fn find(&self, id: NodeId) -> Option<SceneHandle> {
        Self::find_below(&self.root, id)
    }

    fn find_below(node: &SceneHandle, id: NodeId) -> Option<SceneHandle> {
        if node.id() == id {
            return Some(node.clone());
        }
        // Clone the child handles so the parent's lock is released
        // before descending — a traversal never holds two locks.
        let children = node.read().children.clone();
        children.iter().find_map(|c| Self::find_below(c, id))
    }

    fn detach_below(node: &SceneHandle, id: NodeId) -> Option<SceneHandle> {
        let mut guard = node.write();
        if let Some(pos) = guard.children.iter().position(|c| c.id() == id) {
            return Some(guard.children.remove(pos));
        }
        let children = guard.children.clone();
        drop(guard);
        children.iter().find_map(|c| Self::detach_below(c, id))
    }
}

impl Default for SceneTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tree_has_resolvable_root() {
        let tree = SceneTree::new();
        let root_id = tree.root().id();
        let found = tree.find(root_id).expect("root must resolve");
        assert_eq!(found.id(), root_id);
    }

    #[test]
    fn spawned_node_is_detached_until_attached() {
        let tree = SceneTree::new();
        let node = tree.spawn("lamp");
        assert!(tree.find(node.id()).is_none());

        assert!(tree.attach(tree.root().id(), node.clone()));
        assert!(tree.find(node.id()).is_some());
    }

    #[test]
    fn attach_to_missing_parent_fails() {
        let tree = SceneTree::new();
        let orphan = tree.spawn("orphan");
        let node = tree.spawn("node");
        assert!(!tree.attach(orphan.id(), node));
    }

    #[test]
    fn find_resolves_deep_descendants() {
        let tree = SceneTree::new();
        let a = tree.spawn("a");
        let b = tree.spawn("b");
        let c = tree.spawn("c");
        let c_id = c.id();
        b.write().children.push(c);
        a.write().children.push(b);
        tree.attach(tree.root().id(), a);

        let found = tree.find(c_id).expect("deep child must resolve");
        assert_eq!(found.read().name, "c");
    }

    #[test]
    fn find_missing_id_returns_none() {
        let tree = SceneTree::new();
        let detached = tree.spawn("never-attached");
        assert!(tree.find(detached.id()).is_none());
    }

    #[test]
    fn detach_removes_subtree_from_lookup() {
        let tree = SceneTree::new();
        let group = tree.spawn("group");
        let leaf = tree.spawn("leaf");
        let group_id = group.id();
        let leaf_id = leaf.id();
        group.write().children.push(leaf);
        tree.attach(tree.root().id(), group);

        let removed = tree.detach(group_id).expect("group must detach");
        assert_eq!(removed.id(), group_id);
        assert!(tree.find(group_id).is_none());
        // Descendants of a detached subtree stop resolving too.
        assert!(tree.find(leaf_id).is_none());
    }

    #[test]
    fn detach_root_is_refused() {
        let tree = SceneTree::new();
        assert!(tree.detach(tree.root().id()).is_none());
    }

    #[test]
    fn ids_stay_unique_across_spawns() {
        let tree = SceneTree::new();
        let a = tree.spawn("a");
        let b = tree.spawn("b");
        assert_ne!(a.id(), b.id());
        assert_ne!(a.id(), tree.root().id());
    }
}
