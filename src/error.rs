//! Error type for heap operations
//!
//! An empty heap is not an error: `find_min` and `pop` signal emptiness
//! with `None`, since an empty queue is a normal condition. Errors are
//! reserved for misuse of `decrease_key`.

use std::fmt;

/// Error returned by [`FibonacciHeap::decrease_key`](crate::FibonacciHeap::decrease_key).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The new priority is greater than the element's current priority.
    /// The heap is left untouched.
    PriorityNotDecreased,
    /// The handle does not name a live element of this heap (the element
    /// was already extracted, or the handle came from a consumed heap).
    InvalidHandle,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::PriorityNotDecreased => {
                write!(f, "new priority is greater than current priority")
            }
            HeapError::InvalidHandle => {
                write!(f, "handle does not refer to a live element of this heap")
            }
        }
    }
}

impl std::error::Error for HeapError {}
