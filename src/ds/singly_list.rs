//! Singly linked list backed by [`SlotArena`].
//!
//! Stores list nodes in a `SlotArena` and links them by `SlotId`, giving
//! stable handles and O(1) push/pop at the ends that matter for
//! insertion-order eviction.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬───────────────────────────────────┐
//!   │ SlotId │ Node { value, next }              │
//!   ├────────┼───────────────────────────────────┤
//!   │ id_1   │ { value: A, next: Some(id_2) }    │
//!   │ id_2   │ { value: B, next: Some(id_3) }    │
//!   │ id_3   │ { value: C, next: None }          │
//!   └────────┴───────────────────────────────────┘
//!
//!   head ─► [id_1] ─► [id_2] ─► [id_3] ◄── tail
//! ```
//!
//! ## Operations
//!
//! - `push_back(value)`: append at the tail (FIFO insertion)
//! - `push_front(value)`: prepend at the head (LIFO insertion)
//! - `pop_front()`: remove the head (eviction point for both)
//!
//! There is deliberately **no arbitrary removal**: popping only from the
//! head is what keeps the list a faithful record of insertion order.
//! Entries are located for in-place value updates via [`get_mut`] with the
//! `SlotId` the caller stored at insert time.
//!
//! `debug_validate_invariants()` is available in debug/test builds.
//!
//! [`get_mut`]: SinglyList::get_mut

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Node<T> {
    value: T,
    next: Option<SlotId>,
}

/// Singly linked list that stores nodes in a `SlotArena` and links them via
/// `SlotId`. The order structure behind the FIFO and LIFO engines.
#[derive(Debug)]
pub struct SinglyList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> SinglyList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    /// Returns the number of nodes in the list.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns the value at the head of the list.
    pub fn front(&self) -> Option<&T> {
        self.head
            .and_then(|id| self.arena.get(id).map(|node| &node.value))
    }

    /// Returns the value for a node id, if present.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    /// Returns a mutable reference to a node value, if present.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Appends a new node at the tail and returns its `SlotId`.
    pub fn push_back(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node { value, next: None });
        if let Some(tail) = self.tail {
            if let Some(node) = self.arena.get_mut(tail) {
                node.next = Some(id);
            }
        } else {
            self.head = Some(id);
        }
        self.tail = Some(id);
        id
    }

    /// Prepends a new node at the head and returns its `SlotId`.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            next: self.head,
        });
        if self.tail.is_none() {
            self.tail = Some(id);
        }
        self.head = Some(id);
        id
    }

    /// Removes and returns the head value.
    pub fn pop_front(&mut self) -> Option<T> {
        let id = self.head?;
        let node = self.arena.remove(id)?;
        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }
        Some(node.value)
    }

    /// Clears the list and frees all nodes.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            assert_eq!(self.len(), 0);
            return;
        }

        let mut count = 0usize;
        let mut current = self.head;
        let mut last = None;

        while let Some(id) = current {
            let node = self.arena.get(id).expect("node missing");
            last = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.len(), "cycle detected in list");
        }

        assert_eq!(count, self.len());
        assert_eq!(self.tail, last);
        assert_eq!(self.arena.len(), self.len());
    }
}

impl<T> Default for SinglyList<T> {
    fn default() -> Self {
        Self::new()
    }
}
