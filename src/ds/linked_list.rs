//! Doubly linked list backed by [`SlotArena`].
//!
//! Stores list nodes in a `SlotArena` and links them by `SlotId`, enabling
//! stable handles and O(1) unlink/relink without pointer chasing. This is
//! the recency structure behind the LRU engine: the front of the list is
//! the coldest entry (next eviction victim), the back is the hottest.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬─────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                  │
//!   ├────────┼─────────────────────────────────────────────┤
//!   │ id_1   │ { value: A, prev: None, next: Some(id_2) }  │
//!   │ id_2   │ { value: B, prev: Some(id_1), next: id_3 }  │
//!   │ id_3   │ { value: C, prev: Some(id_2), next: None }  │
//!   └────────┴─────────────────────────────────────────────┘
//!
//!   head ─► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail
//!          (coldest)                (hottest)
//! ```
//!
//! ## Operations
//!
//! - `push_back(value)`: insert at the tail — O(1)
//! - `pop_front()`: remove the head — O(1)
//! - `move_to_back(id)`: detach + attach at the tail — O(1)
//! - `remove(id)`: detach + free slot in arena — O(1)
//!
//! `debug_validate_invariants()` is available in debug/test builds.

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Doubly linked list that stores nodes in a `SlotArena` and links them via
/// `SlotId`.
#[derive(Debug)]
pub struct LinkedList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> LinkedList<T> {
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

    /// Returns the value at the front of the list.
    pub fn front(&self) -> Option<&T> {
        self.head
            .and_then(|id| self.arena.get(id).map(|node| &node.value))
    }

    /// Returns the SlotId at the front of the list.
    pub fn front_id(&self) -> Option<SlotId> {
        self.head
    }

    /// Returns the SlotId at the back of the list.
    pub fn back_id(&self) -> Option<SlotId> {
        self.tail
    }

    /// Returns the value for a node id, if present.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    /// Returns a mutable reference to a node value, if present.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Inserts a new node at the back and returns its `SlotId`.
    pub fn push_back(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: self.tail,
            next: None,
        });
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

    /// Removes and returns the front value.
    pub fn pop_front(&mut self) -> Option<T> {
        let id = self.head?;
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Removes the node `id` from the list and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Moves an existing node to the back; returns `false` if `id` is not
    /// present. Moving the current back node is a no-op.
    pub fn move_to_back(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if Some(id) == self.tail {
            return true;
        }
        self.detach(id);
        self.attach_back(id);
        true
    }

    /// Clears the list and frees all nodes.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };

        if let Some(prev_id) = prev {
            if let Some(prev_node) = self.arena.get_mut(prev_id) {
                prev_node.next = next;
            }
        } else {
            self.head = next;
        }

        if let Some(next_id) = next {
            if let Some(next_node) = self.arena.get_mut(next_id) {
                next_node.prev = prev;
            }
        } else {
            self.tail = prev;
        }

        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }

        Some(())
    }

    fn attach_back(&mut self, id: SlotId) -> Option<()> {
        let old_tail = self.tail;
        if let Some(node) = self.arena.get_mut(id) {
            node.next = None;
            node.prev = old_tail;
        } else {
            return None;
        }
        if let Some(old_tail) = old_tail {
            if let Some(tail_node) = self.arena.get_mut(old_tail) {
                tail_node.next = Some(id);
            }
        } else {
            self.head = Some(id);
        }
        self.tail = Some(id);
        Some(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            assert_eq!(self.len(), 0);
            return;
        }

        let mut seen = std::collections::HashSet::new();
        let mut count = 0usize;
        let mut current = self.head;
        let mut prev = None;

        while let Some(id) = current {
            assert!(seen.insert(id));
            let node = self.arena.get(id).expect("node missing");
            assert_eq!(node.prev, prev);
            if let Some(next_id) = node.next {
                let next_node = self.arena.get(next_id).expect("next node missing");
                assert_eq!(next_node.prev, Some(id));
            } else {
                assert_eq!(self.tail, Some(id));
            }

            prev = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.len(), "cycle detected in list");
        }

        assert_eq!(count, self.len());
        assert_eq!(self.arena.len(), self.len());
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_back_pop_front_is_queue_order() {
        let mut list = LinkedList::new();
        list.push_back("a");
        list.push_back("b");
        list.push_back("c");
        list.debug_validate_invariants();

        assert_eq!(list.pop_front(), Some("a"));
        assert_eq!(list.pop_front(), Some("b"));
        assert_eq!(list.pop_front(), Some("c"));
        assert_eq!(list.pop_front(), None);
        list.debug_validate_invariants();
    }

    #[test]
    fn move_to_back_reorders() {
        let mut list = LinkedList::new();
        let a = list.push_back("a");
        list.push_back("b");
        list.push_back("c");

        // Promote the front node; "b" becomes the new front.
        assert!(list.move_to_back(a));
        list.debug_validate_invariants();

        assert_eq!(list.pop_front(), Some("b"));
        assert_eq!(list.pop_front(), Some("c"));
        assert_eq!(list.pop_front(), Some("a"));
    }

    #[test]
    fn move_to_back_of_tail_is_noop() {
        let mut list = LinkedList::new();
        list.push_back(1);
        let b = list.push_back(2);

        assert!(list.move_to_back(b));
        list.debug_validate_invariants();
        assert_eq!(list.back_id(), Some(b));
        assert_eq!(list.pop_front(), Some(1));
    }

    #[test]
    fn move_to_back_missing_returns_false() {
        let mut list = LinkedList::new();
        let id = list.push_back(1);
        list.remove(id);

        assert!(!list.move_to_back(id));
    }

    #[test]
    fn remove_middle_relinks_neighbors() {
        let mut list = LinkedList::new();
        list.push_back("a");
        let b = list.push_back("b");
        list.push_back("c");

        assert_eq!(list.remove(b), Some("b"));
        list.debug_validate_invariants();

        assert_eq!(list.pop_front(), Some("a"));
        assert_eq!(list.pop_front(), Some("c"));
    }

    #[test]
    fn single_element_move_and_pop() {
        let mut list = LinkedList::new();
        let only = list.push_back("only");

        assert!(list.move_to_back(only));
        assert_eq!(list.front_id(), Some(only));
        assert_eq!(list.pop_front(), Some("only"));
        list.debug_validate_invariants();
    }

    #[test]
    fn get_mut_updates_value_without_reordering() {
        let mut list = LinkedList::new();
        let a = list.push_back(1);
        list.push_back(2);

        *list.get_mut(a).unwrap() = 10;
        assert_eq!(list.front(), Some(&10));
    }

    #[test]
    fn clear_empties_list() {
        let mut list = LinkedList::new();
        list.push_back(1);
        list.push_back(2);
        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.pop_front(), None);
        list.debug_validate_invariants();
    }
}
