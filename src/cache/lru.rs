//! LRU List Module
//!
//! Recency ordering for cache eviction, stored as a doubly linked list
//! inside a slot arena.
//!
//! ```text
//!   slots: Vec<Option<Node<T>>>       free: Vec<usize>
//!
//!   head ─► [2] ◄──► [0] ◄──► [3] ◄── tail
//!           MRU                LRU
//! ```
//!
//! Nodes are addressed by [`NodeId`], which stays valid until the node is
//! removed. Freed slots are reused by later inserts.

// == Node Id ==
/// Stable handle to a node in an [`LruList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

// == LRU List ==
/// Doubly linked recency list with O(1) move-to-front and tail removal.
///
/// - Front (head) = most recently used
/// - Back (tail) = least recently used
#[derive(Debug)]
pub struct LruList<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl<T> LruList<T> {
    // == Constructor ==
    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts `value` as the most recently used node.
    pub fn push_front(&mut self, value: T) -> NodeId {
        let node = Node {
            value,
            prev: None,
            next: None,
        };
        let id = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                NodeId(idx)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        };
        self.len += 1;
        self.attach_front(id);
        id
    }

    // == Move To Front ==
    /// Marks a node as most recently used.
    ///
    /// Returns false if `id` does not refer to a live node.
    pub fn move_to_front(&mut self, id: NodeId) -> bool {
        if self.head == Some(id) {
            return true;
        }
        if !self.detach(id) {
            return false;
        }
        self.attach_front(id);
        true
    }

    // == Remove ==
    /// Unlinks a node and returns its value, freeing the slot.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        if !self.detach(id) {
            return None;
        }
        let node = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(node.value)
    }

    // == Pop Back ==
    /// Removes and returns the least recently used value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    // == Accessors ==
    /// Returns the value stored at `id`, if live.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.node(id).map(|node| &node.value)
    }

    /// Returns a mutable reference to the value stored at `id`, if live.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.node_mut(id).map(|node| &mut node.value)
    }

    /// Returns the least recently used value without removing it.
    #[cfg(test)]
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    /// Returns the number of linked nodes.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.len
    }

    // == Iter ==
    /// Iterates from most to least recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    fn detach(&mut self, id: NodeId) -> bool {
        let (prev, next) = match self.node_mut(id) {
            Some(node) => (node.prev.take(), node.next.take()),
            None => return false,
        };

        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.node_mut(prev_id) {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_id) => {
                if let Some(next_node) = self.node_mut(next_id) {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        true
    }

    fn attach_front(&mut self, id: NodeId) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(id) {
            node.prev = None;
            node.next = old_head;
        }

        match old_head {
            Some(head_id) => {
                if let Some(head_node) = self.node_mut(head_id) {
                    head_node.prev = Some(id);
                }
            }
            None => self.tail = Some(id),
        }

        self.head = Some(id);
    }

    /// Walks the links in both directions and checks them against `len`.
    #[cfg(test)]
    pub(crate) fn debug_validate_invariants(&self) {
        let mut count = 0;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let node = self.node(id).expect("linked node must be live");
            assert_eq!(node.prev, prev, "broken prev link");
            prev = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.len, "cycle in list");
        }
        assert_eq!(self.tail, prev, "tail does not match last node");
        assert_eq!(count, self.len);
        assert_eq!(
            self.slots.iter().filter(|slot| slot.is_some()).count(),
            self.len
        );
    }
}

// == Iterator ==
/// Front-to-back iterator yielding each node's id and value.
pub struct Iter<'a, T> {
    list: &'a LruList<T>,
    current: Option<NodeId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (NodeId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.node(id)?;
        self.current = node.next;
        Some((id, &node.value))
    }
}
