//! Doubly-linked recency list over a [`NodeArena`].
//!
//! The list that every policy in this crate hangs its ordering on: front is
//! the most recently touched entry, back is the eviction candidate. Nodes
//! are owned by the arena and linked by `NodeId`, so the enclosing cache's
//! key index can hold handles without reference cycles or raw pointers.
//!
//! All mutating operations are O(1):
//! - `push_front(value)` — admit at the MRU position
//! - `move_to_front(id)` — renew on access
//! - `pop_back()` — evict the LRU entry
//! - `remove(id)` — arbitrary unlink
//!
//! `debug_validate_invariants()` is available in debug/test builds.

use crate::ds::node_arena::{NodeArena, NodeId};

#[derive(Debug)]
struct Link<T> {
    value: T,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

/// Ordered container of entries with O(1) move-to-front and evict-from-back.
#[derive(Debug)]
pub struct RecencyList<T> {
    arena: NodeArena<Link<T>>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
}

impl<T> RecencyList<T> {
    pub fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            head: None,
            tail: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: NodeArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id)
    }

    /// Returns the value at the back (least recently touched), if any.
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    /// Returns the handle of the back node, if any.
    pub fn back_id(&self) -> Option<NodeId> {
        self.tail
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.arena.get(id).map(|link| &link.value)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|link| &mut link.value)
    }

    /// Inserts a new node at the front and returns its handle.
    pub fn push_front(&mut self, value: T) -> NodeId {
        let id = self.arena.insert(Link {
            value,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(head) => {
                if let Some(link) = self.arena.get_mut(head) {
                    link.prev = Some(id);
                }
            },
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        id
    }

    /// Removes and returns the back value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.detach(id);
        self.arena.remove(id).map(|link| link.value)
    }

    /// Unlinks `id` and returns its value.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        self.detach(id)?;
        self.arena.remove(id).map(|link| link.value)
    }

    /// Moves an existing node to the front; returns `false` if `id` is not
    /// present.
    pub fn move_to_front(&mut self, id: NodeId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if Some(id) == self.head {
            return true;
        }
        self.detach(id);
        self.attach_front(id);
        true
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterates values from front (MRU) to back (LRU).
    pub fn iter(&self) -> RecencyIter<'_, T> {
        RecencyIter {
            list: self,
            current: self.head,
        }
    }

    fn detach(&mut self, id: NodeId) -> Option<()> {
        let (prev, next) = {
            let link = self.arena.get(id)?;
            (link.prev, link.next)
        };

        match prev {
            Some(prev_id) => {
                if let Some(link) = self.arena.get_mut(prev_id) {
                    link.next = next;
                }
            },
            None => self.head = next,
        }

        match next {
            Some(next_id) => {
                if let Some(link) = self.arena.get_mut(next_id) {
                    link.prev = prev;
                }
            },
            None => self.tail = prev,
        }

        if let Some(link) = self.arena.get_mut(id) {
            link.prev = None;
            link.next = None;
        }

        Some(())
    }

    fn attach_front(&mut self, id: NodeId) {
        let old_head = self.head;
        if let Some(link) = self.arena.get_mut(id) {
            link.prev = None;
            link.next = old_head;
        } else {
            return;
        }
        match old_head {
            Some(old_head) => {
                if let Some(link) = self.arena.get_mut(old_head) {
                    link.prev = Some(id);
                }
            },
            None => self.tail = Some(id),
        }
        self.head = Some(id);
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
            assert!(seen.insert(id), "cycle in recency list");
            let link = self.arena.get(id).expect("linked node missing");
            assert_eq!(link.prev, prev);
            if link.next.is_none() {
                assert_eq!(self.tail, Some(id));
            }
            prev = Some(id);
            current = link.next;
            count += 1;
            assert!(count <= self.len());
        }

        assert_eq!(count, self.len());
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct RecencyIter<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<NodeId>,
}

impl<'a, T> Iterator for RecencyIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let link = self.list.arena.get(id)?;
        self.current = link.next;
        Some(&link.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recency_list_front_back_order() {
        let mut list = RecencyList::new();
        let a = list.push_front("a");
        let b = list.push_front("b");
        let c = list.push_front("c");

        // Most recent first.
        let values: Vec<_> = list.iter().copied().collect();
        assert_eq!(values, vec!["c", "b", "a"]);
        assert_eq!(list.back(), Some(&"a"));
        assert_eq!(list.back_id(), Some(a));
        assert!(list.contains(b) && list.contains(c));
    }

    #[test]
    fn recency_list_move_to_front_renews() {
        let mut list = RecencyList::new();
        let a = list.push_front(1);
        let _b = list.push_front(2);
        let _c = list.push_front(3);

        assert!(list.move_to_front(a));
        let values: Vec<_> = list.iter().copied().collect();
        assert_eq!(values, vec![1, 3, 2]);
        assert_eq!(list.back(), Some(&2));
        list.debug_validate_invariants();
    }

    #[test]
    fn recency_list_pop_back_evicts_lru() {
        let mut list = RecencyList::new();
        list.push_front("old");
        list.push_front("new");

        assert_eq!(list.pop_back(), Some("old"));
        assert_eq!(list.pop_back(), Some("new"));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn recency_list_remove_middle_and_ends() {
        let mut list = RecencyList::new();
        let a = list.push_front("a");
        let b = list.push_front("b");
        let c = list.push_front("c");

        assert_eq!(list.remove(b), Some("b"));
        let values: Vec<_> = list.iter().copied().collect();
        assert_eq!(values, vec!["c", "a"]);

        assert_eq!(list.remove(c), Some("c"));
        assert_eq!(list.back(), Some(&"a"));
        assert_eq!(list.remove(a), Some("a"));
        assert!(list.is_empty());
        assert_eq!(list.back(), None);
        list.debug_validate_invariants();
    }

    #[test]
    fn recency_list_stale_handle_is_rejected() {
        let mut list = RecencyList::new();
        let a = list.push_front(1);
        list.remove(a);
        assert!(!list.move_to_front(a));
        assert_eq!(list.remove(a), None);
    }

    #[test]
    fn recency_list_get_mut_updates_in_place() {
        let mut list = RecencyList::new();
        let id = list.push_front(10);
        *list.get_mut(id).unwrap() = 20;
        assert_eq!(list.get(id), Some(&20));
    }
}
