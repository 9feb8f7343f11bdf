//! Node arena and circular-list primitives
//!
//! Heap nodes live in a `slotmap` arena owned by their heap; every
//! structural link (`left`, `right`, `parent`, `child`) is a generational
//! [`NodeKey`] into that arena rather than a pointer. Removing a node
//! vacates its slot, so a key held after removal fails `get` instead of
//! dangling.
//!
//! Siblings form circular doubly-linked rings: a node in isolation is its
//! own `left` and `right`. The ring operations here are all O(1); the one
//! traversal ([`NodeArena::ring`]) materializes membership up front so
//! callers can relink freely while walking the snapshot.

use slotmap::{new_key_type, SecondaryMap, SlotMap};
use std::ops::{Index, IndexMut};

new_key_type! {
    /// Generational key naming a node in a heap's arena.
    pub(crate) struct NodeKey;
}

/// A single tree vertex.
///
/// `left`/`right` always name ring neighbors (possibly the node itself);
/// `parent` and `child` are absent for roots and leaves respectively.
/// `degree` counts direct children. `marked` is set on a non-root that has
/// lost a child since it last became a child, and drives cascading cuts.
pub(crate) struct Node<T, P> {
    pub(crate) priority: P,
    pub(crate) item: T,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) child: Option<NodeKey>,
    pub(crate) left: NodeKey,
    pub(crate) right: NodeKey,
    pub(crate) degree: usize,
    pub(crate) marked: bool,
}

/// Per-heap node storage.
pub(crate) struct NodeArena<T, P> {
    nodes: SlotMap<NodeKey, Node<T, P>>,
}

impl<T, P> NodeArena<T, P> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Allocates a new unmarked, parentless, childless node forming a
    /// singleton ring.
    pub(crate) fn alloc(&mut self, priority: P, item: T) -> NodeKey {
        self.nodes.insert_with_key(|key| Node {
            priority,
            item,
            parent: None,
            child: None,
            left: key,
            right: key,
            degree: 0,
            marked: false,
        })
    }

    /// Frees a node's slot, returning its contents. The caller must have
    /// already unspliced it from its ring.
    pub(crate) fn remove(&mut self, key: NodeKey) -> Option<Node<T, P>> {
        self.nodes.remove(key)
    }

    pub(crate) fn get(&self, key: NodeKey) -> Option<&Node<T, P>> {
        self.nodes.get(key)
    }

    pub(crate) fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Inserts `node` into the ring immediately to the right of `at`.
    /// `node`'s previous links are overwritten, so it must not still be
    /// spliced into another ring.
    pub(crate) fn splice_after(&mut self, at: NodeKey, node: NodeKey) {
        let old_right = self.nodes[at].right;
        self.nodes[node].right = old_right;
        self.nodes[node].left = at;
        self.nodes[old_right].left = node;
        self.nodes[at].right = node;
    }

    /// Unsplices `node` from its ring by joining its neighbors. `node`'s
    /// own links are left stale; follow with [`make_singleton`] or drop
    /// the node.
    ///
    /// [`make_singleton`]: NodeArena::make_singleton
    pub(crate) fn unsplice(&mut self, node: NodeKey) {
        let (left, right) = {
            let n = &self.nodes[node];
            (n.left, n.right)
        };
        self.nodes[left].right = right;
        self.nodes[right].left = left;
    }

    /// Resets `node` to a singleton ring of itself.
    pub(crate) fn make_singleton(&mut self, node: NodeKey) {
        let n = &mut self.nodes[node];
        n.left = node;
        n.right = node;
    }

    /// Concatenates the ring containing `a` with the ring containing `b`
    /// in O(1), without visiting members. The rings must be disjoint.
    pub(crate) fn splice_rings(&mut self, a: NodeKey, b: NodeKey) {
        let a_last = self.nodes[a].left;
        let b_last = self.nodes[b].left;
        self.nodes[a_last].right = b;
        self.nodes[b].left = a_last;
        self.nodes[b_last].right = a;
        self.nodes[a].left = b_last;
    }

    /// Snapshots the ring containing `head`, starting at `head` and
    /// following `right` links. Captures membership before any mutation,
    /// so the caller may relink ring members while iterating the result.
    pub(crate) fn ring(&self, head: NodeKey) -> Vec<NodeKey> {
        let mut members = vec![head];
        let mut cur = self.nodes[head].right;
        while cur != head {
            members.push(cur);
            cur = self.nodes[cur].right;
        }
        members
    }

    /// Moves every node of `other` into this arena, rewriting all link
    /// keys. Returns the old-key -> new-key mapping so the caller can
    /// translate its own root/min references. O(len(other)); performs no
    /// comparisons and no structural changes beyond the rekeying.
    pub(crate) fn absorb(&mut self, other: NodeArena<T, P>) -> SecondaryMap<NodeKey, NodeKey> {
        let mut remap = SecondaryMap::with_capacity(other.nodes.len());
        let mut moved = Vec::with_capacity(other.nodes.len());
        for (old_key, node) in other.nodes {
            let new_key = self.nodes.insert(node);
            remap.insert(old_key, new_key);
            moved.push(new_key);
        }
        for &key in &moved {
            let node = &mut self.nodes[key];
            node.left = remap[node.left];
            node.right = remap[node.right];
            if let Some(parent) = node.parent {
                node.parent = Some(remap[parent]);
            }
            if let Some(child) = node.child {
                node.child = Some(remap[child]);
            }
        }
        remap
    }
}

impl<T, P> Index<NodeKey> for NodeArena<T, P> {
    type Output = Node<T, P>;

    fn index(&self, key: NodeKey) -> &Node<T, P> {
        &self.nodes[key]
    }
}

impl<T, P> IndexMut<NodeKey> for NodeArena<T, P> {
    fn index_mut(&mut self, key: NodeKey) -> &mut Node<T, P> {
        &mut self.nodes[key]
    }
}
