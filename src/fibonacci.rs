//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a forest of heap-ordered multi-way trees with:
//! - O(1) amortized insert, decrease_key, and merge
//! - O(log n) amortized extract-min
//!
//! Roots are linked in a circular doubly-linked list, as are the children
//! of every node. Extraction is lazy: the minimum's children are dumped
//! into the root list and a consolidation pass then merges roots of equal
//! degree until all root degrees are distinct, which is the structural
//! property behind the O(log n) bound. `decrease_key` pays for itself via
//! cascading cuts driven by per-node marks.

use crate::arena::{NodeArena, NodeKey};
use crate::error::HeapError;
use std::mem;

/// Handle to an element in a [`FibonacciHeap`], returned by
/// [`insert`](FibonacciHeap::insert).
///
/// Handles are generational: once the element is extracted the handle goes
/// stale, and `decrease_key` reports [`HeapError::InvalidHandle`] instead
/// of touching a recycled slot. A handle is only meaningful for the heap
/// that minted it; handles minted by a heap consumed in a
/// [`merge`](FibonacciHeap::merge) must be discarded.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeHandle(NodeKey);

/// Fibonacci Heap
///
/// A min-heap over `(priority, item)` pairs. All structural state (the
/// root list entry point, the minimum root, the node count, and the node
/// arena itself) belongs to the individual heap value; nothing is shared
/// between instances.
///
/// # Example
///
/// ```rust
/// use fibonacci_heap::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.insert(5, "item");
/// heap.decrease_key(handle, 1).unwrap();
/// assert_eq!(heap.find_min(), Some((&1, &"item")));
/// ```
pub struct FibonacciHeap<T, P: Ord> {
    nodes: NodeArena<T, P>,
    /// Entry point into the circular root list; None iff the heap is empty.
    root: Option<NodeKey>,
    /// The root holding the minimum priority; None iff the heap is empty.
    min: Option<NodeKey>,
    len: usize,
}

impl<T, P: Ord> Default for FibonacciHeap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: Ord> FibonacciHeap<T, P> {
    /// Creates a new empty heap.
    pub fn new() -> Self {
        Self {
            nodes: NodeArena::new(),
            root: None,
            min: None,
            len: 0,
        }
    }

    /// Returns the number of elements in the heap.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts an element, returning a handle usable with
    /// [`decrease_key`](FibonacciHeap::decrease_key).
    ///
    /// O(1): the new node is spliced into the root list as a singleton
    /// tree; no restructuring happens until a later extraction.
    pub fn insert(&mut self, priority: P, item: T) -> NodeHandle {
        let node = self.nodes.alloc(priority, item);
        self.add_to_root_list(node);
        match self.min {
            Some(min) if self.nodes[node].priority >= self.nodes[min].priority => {}
            _ => self.min = Some(node),
        }
        self.len += 1;
        NodeHandle(node)
    }

    /// Alias for [`insert`](FibonacciHeap::insert).
    pub fn push(&mut self, priority: P, item: T) -> NodeHandle {
        self.insert(priority, item)
    }

    /// Returns the minimum priority and its item without removing them.
    ///
    /// O(1). Returns `None` when the heap is empty.
    pub fn find_min(&self) -> Option<(&P, &T)> {
        let node = self.nodes.get(self.min?)?;
        Some((&node.priority, &node.item))
    }

    /// Alias for [`find_min`](FibonacciHeap::find_min).
    pub fn peek(&self) -> Option<(&P, &T)> {
        self.find_min()
    }

    /// Returns the priority and item behind a handle, or `None` if the
    /// handle is stale.
    pub fn get(&self, handle: NodeHandle) -> Option<(&P, &T)> {
        let node = self.nodes.get(handle.0)?;
        Some((&node.priority, &node.item))
    }

    /// Returns true if the handle still names a live element of this heap.
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.nodes.contains(handle.0)
    }

    /// Removes and returns the minimum element.
    ///
    /// Amortized O(log n). Returns `None` when the heap is empty. The
    /// minimum's children are spliced into the root list, the minimum is
    /// unspliced, and a consolidation pass restores degree-uniqueness
    /// among the roots.
    pub fn pop(&mut self) -> Option<(P, T)> {
        let z = self.min?;

        // Splice z's children into the root list. Membership is captured
        // before relinking, since splicing dismantles the child ring.
        if let Some(child) = self.nodes[z].child {
            for c in self.nodes.ring(child) {
                self.nodes.splice_after(z, c);
                self.nodes[c].parent = None;
                // Roots are never marked.
                self.nodes[c].marked = false;
            }
            self.nodes[z].child = None;
        }

        let right = self.nodes[z].right;
        self.remove_from_root_list(z);
        if right == z {
            // z was the sole member of the root list and had no children.
            self.min = None;
        } else {
            // Provisional minimum; consolidate() computes the real one.
            self.min = Some(right);
            self.consolidate();
        }

        // z came from self.min and nothing above frees it, so its slot is
        // still occupied.
        let node = self
            .nodes
            .remove(z)
            .expect("minimum node must be live in the arena");
        self.len -= 1;
        Some((node.priority, node.item))
    }

    /// Lowers the priority of the element behind `handle` to `new_priority`.
    ///
    /// Amortized O(1). If heap order against the parent is violated, the
    /// node is cut to the root list and a cascading cut walks up the tree.
    ///
    /// # Errors
    ///
    /// - [`HeapError::InvalidHandle`] if the handle is stale. The heap is
    ///   untouched.
    /// - [`HeapError::PriorityNotDecreased`] if `new_priority` is greater
    ///   than the current priority. The heap is untouched; an equal
    ///   priority is accepted.
    pub fn decrease_key(&mut self, handle: NodeHandle, new_priority: P) -> Result<(), HeapError> {
        let key = handle.0;
        let node = self.nodes.get(key).ok_or(HeapError::InvalidHandle)?;
        if new_priority > node.priority {
            return Err(HeapError::PriorityNotDecreased);
        }

        self.nodes[key].priority = new_priority;
        if let Some(parent) = self.nodes[key].parent {
            if self.nodes[key].priority < self.nodes[parent].priority {
                self.cut(key, parent);
                self.cascading_cut(parent);
            }
        }
        if let Some(min) = self.min {
            if self.nodes[key].priority < self.nodes[min].priority {
                self.min = Some(key);
            }
        }
        Ok(())
    }

    /// Merges another heap into this one, consuming it.
    ///
    /// The root lists are concatenated with a single circular splice (no
    /// per-node work, no comparisons beyond the two minima) and the
    /// counts are summed. Moving `other`'s nodes into this heap's arena
    /// costs O(len(other)) key rewrites; handles minted by `other` must
    /// not be used afterwards.
    pub fn merge(&mut self, other: Self) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            *self = other;
            return;
        }
        let (Some(my_root), Some(my_min), Some(other_root), Some(other_min)) =
            (self.root, self.min, other.root, other.min)
        else {
            return;
        };

        let other_len = other.len;
        let remap = self.nodes.absorb(other.nodes);
        let other_root = remap[other_root];
        let other_min = remap[other_min];

        self.nodes.splice_rings(my_root, other_root);
        if self.nodes[other_min].priority < self.nodes[my_min].priority {
            self.min = Some(other_min);
        }
        self.len += other_len;
    }

    /// Splices a singleton node into the root list.
    fn add_to_root_list(&mut self, node: NodeKey) {
        match self.root {
            Some(head) => self.nodes.splice_after(head, node),
            None => self.root = Some(node),
        }
    }

    /// Unsplices a node from the root list, repointing the entry point if
    /// the node was the entry point (or clearing it if the node was the
    /// sole member).
    fn remove_from_root_list(&mut self, node: NodeKey) {
        if self.nodes[node].right == node {
            self.root = None;
        } else if self.root == Some(node) {
            self.root = Some(self.nodes[node].right);
        }
        self.nodes.unsplice(node);
    }

    /// Splices a singleton node into `parent`'s child list.
    fn add_to_child_list(&mut self, parent: NodeKey, node: NodeKey) {
        match self.nodes[parent].child {
            Some(child) => self.nodes.splice_after(child, node),
            None => self.nodes[parent].child = Some(node),
        }
    }

    /// Unsplices `node` from `parent`'s child list, repointing the child
    /// reference if needed. Degree bookkeeping is the caller's job.
    fn remove_from_child_list(&mut self, parent: NodeKey, node: NodeKey) {
        let right = self.nodes[node].right;
        if right == node {
            self.nodes[parent].child = None;
        } else if self.nodes[parent].child == Some(node) {
            self.nodes[parent].child = Some(right);
        }
        self.nodes.unsplice(node);
    }

    /// Merges roots of equal degree until all root degrees are distinct,
    /// then recomputes the minimum. Invoked only from [`pop`](Self::pop).
    fn consolidate(&mut self) {
        let Some(head) = self.root else { return };
        // Indexed by degree. Sized by the node count, which comfortably
        // exceeds the log-bounded maximum degree.
        let mut degree_table: Vec<Option<NodeKey>> = vec![None; self.len + 1];

        // Snapshot the root list before any relinking changes membership.
        for root in self.nodes.ring(head) {
            let mut x = root;
            let mut d = self.nodes[x].degree;
            while let Some(mut y) = degree_table[d] {
                // Link the larger-priority root under the smaller.
                if self.nodes[x].priority > self.nodes[y].priority {
                    mem::swap(&mut x, &mut y);
                }
                self.heap_link(y, x);
                degree_table[d] = None;
                d += 1;
            }
            degree_table[d] = Some(x);
        }

        // The surviving roots are exactly the table entries; the smallest
        // of them is the new minimum.
        self.min = None;
        for root in degree_table.into_iter().flatten() {
            match self.min {
                Some(min) if self.nodes[root].priority >= self.nodes[min].priority => {}
                _ => self.min = Some(root),
            }
        }
    }

    /// Makes root `y` a child of root `x`. The caller guarantees
    /// `x.priority <= y.priority`.
    fn heap_link(&mut self, y: NodeKey, x: NodeKey) {
        self.remove_from_root_list(y);
        self.nodes.make_singleton(y);
        self.add_to_child_list(x, y);
        self.nodes[x].degree += 1;
        self.nodes[y].parent = Some(x);
        self.nodes[y].marked = false;
    }

    /// Detaches child `x` from parent `y` and promotes it to the root
    /// list, clearing its mark.
    fn cut(&mut self, x: NodeKey, y: NodeKey) {
        self.remove_from_child_list(y, x);
        self.nodes[y].degree -= 1;
        self.nodes.make_singleton(x);
        self.add_to_root_list(x);
        self.nodes[x].parent = None;
        self.nodes[x].marked = false;
    }

    /// Walks up from `y`, marking the first unmarked non-root and cutting
    /// every marked ancestor along the way. Iterative, so adversarially
    /// deep mark chains cannot overflow the call stack.
    fn cascading_cut(&mut self, y: NodeKey) {
        let mut y = y;
        while let Some(z) = self.nodes[y].parent {
            if !self.nodes[y].marked {
                self.nodes[y].marked = true;
                break;
            }
            self.cut(y, z);
            y = z;
        }
    }
}
