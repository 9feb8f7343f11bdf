//! Fibonacci heap priority queue
//!
//! A Fibonacci heap is a collection of heap-ordered multi-way trees whose
//! roots are linked in a circular doubly-linked list, giving:
//! - O(1) amortized `insert`, `decrease_key`, and `merge`
//! - O(log n) amortized extract-min (`pop`)
//!
//! These bounds are what make the structure useful inside graph algorithms
//! such as Dijkstra's shortest path and Prim's minimum spanning tree, where
//! `decrease_key` dominates.
//!
//! Nodes live in a per-heap arena indexed by generational keys rather than
//! raw pointers, so the cyclic parent/child/sibling graph involves no
//! `unsafe` and a stale [`NodeHandle`] is detected instead of dangling.
//!
//! # Example
//!
//! ```rust
//! use fibonacci_heap::FibonacciHeap;
//!
//! let mut heap = FibonacciHeap::new();
//! let handle = heap.insert(5, "item");
//! heap.insert(3, "other");
//! heap.decrease_key(handle, 1).unwrap();
//! assert_eq!(heap.find_min(), Some((&1, &"item")));
//! assert_eq!(heap.pop(), Some((1, "item")));
//! ```

mod arena;
mod error;
pub mod fibonacci;

pub use error::HeapError;
pub use fibonacci::{FibonacciHeap, NodeHandle};
