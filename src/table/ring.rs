//! Recency Ring Module
//!
//! Arena-backed doubly-linked list that orders table entries by recency.

// == Slot Handle ==
/// Stable handle to a position in the ring.
///
/// A slot stays valid until its item is unlinked; afterwards the slot may be
/// reused by a later push.
pub type Slot = usize;

/// Null link marker.
const NIL: Slot = usize::MAX;

#[derive(Debug)]
struct Link<T> {
    item: Option<T>,
    prev: Slot,
    next: Slot,
}

// == Recency Ring ==
/// Doubly-linked recency order with O(1) push, unlink and move-to-front.
///
/// - Front = Most recently used
/// - Back = Least recently used
#[derive(Debug)]
pub struct RecencyRing<T> {
    /// Arena of links, addressed by slot
    links: Vec<Link<T>>,
    /// Most recently used slot
    head: Slot,
    /// Least recently used slot
    tail: Slot,
    /// Slots released by unlink, reused by push_front
    free: Vec<Slot>,
    /// Number of occupied slots
    len: usize,
}

impl<T> Default for RecencyRing<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecencyRing<T> {
    // == Constructor ==
    /// Creates a new empty ring.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty ring with room for `capacity` items before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            links: Vec::with_capacity(capacity),
            head: NIL,
            tail: NIL,
            free: Vec::new(),
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts an item at the most recently used position and returns its slot.
    pub fn push_front(&mut self, item: T) -> Slot {
        let link = Link {
            item: Some(item),
            prev: NIL,
            next: self.head,
        };

        let slot = match self.free.pop() {
            Some(slot) => {
                self.links[slot] = link;
                slot
            }
            None => {
                self.links.push(link);
                self.links.len() - 1
            }
        };

        if self.head != NIL {
            self.links[self.head].prev = slot;
        } else {
            self.tail = slot;
        }
        self.head = slot;
        self.len += 1;
        slot
    }

    // == Unlink ==
    /// Removes the item at `slot` from the ring and returns it.
    ///
    /// # Panics
    /// Panics if `slot` is not occupied.
    pub fn unlink(&mut self, slot: Slot) -> T {
        let item = match self.links.get_mut(slot).and_then(|link| link.item.take()) {
            Some(item) => item,
            None => panic!("recency ring: unlink of vacant slot {}", slot),
        };
        self.detach(slot);
        self.free.push(slot);
        self.len -= 1;
        item
    }

    // == Pop Front ==
    /// Removes and returns the most recently used item.
    pub fn pop_front(&mut self) -> Option<T> {
        match self.head {
            NIL => None,
            slot => Some(self.unlink(slot)),
        }
    }

    // == Move To Front ==
    /// Marks the item at `slot` as most recently used.
    ///
    /// # Panics
    /// Panics if `slot` is not occupied.
    pub fn move_to_front(&mut self, slot: Slot) {
        if self.get(slot).is_none() {
            panic!("recency ring: move of vacant slot {}", slot);
        }
        if self.head == slot {
            return;
        }
        self.detach(slot);

        let link = &mut self.links[slot];
        link.prev = NIL;
        link.next = self.head;

        if self.head != NIL {
            self.links[self.head].prev = slot;
        } else {
            self.tail = slot;
        }
        self.head = slot;
    }

    /// Splices `slot` out of the list. Callers check occupancy first.
    fn detach(&mut self, slot: Slot) {
        let (prev, next) = {
            let link = &self.links[slot];
            (link.prev, link.next)
        };

        if prev != NIL {
            self.links[prev].next = next;
        } else {
            self.head = next;
        }

        if next != NIL {
            self.links[next].prev = prev;
        } else {
            self.tail = prev;
        }

        let link = &mut self.links[slot];
        link.prev = NIL;
        link.next = NIL;
    }

    // == Accessors ==
    /// Returns true if `slot` holds the most recently used item.
    pub fn is_front(&self, slot: Slot) -> bool {
        self.head != NIL && self.head == slot
    }

    /// Slot of the most recently used item.
    pub fn front(&self) -> Option<Slot> {
        (self.head != NIL).then_some(self.head)
    }

    /// Slot of the least recently used item.
    pub fn back(&self) -> Option<Slot> {
        (self.tail != NIL).then_some(self.tail)
    }

    pub fn get(&self, slot: Slot) -> Option<&T> {
        self.links.get(slot).and_then(|link| link.item.as_ref())
    }

    pub fn get_mut(&mut self, slot: Slot) -> Option<&mut T> {
        self.links.get_mut(slot).and_then(|link| link.item.as_mut())
    }

    // == Length ==
    /// Returns the number of linked items.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Iteration ==
    /// Iterates `(slot, item)` pairs from most to least recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            ring: self,
            cursor: self.head,
            remaining: self.len,
        }
    }
}

// == Iterator ==
/// MRU to LRU traversal over a [`RecencyRing`].
pub struct Iter<'a, T> {
    ring: &'a RecencyRing<T>,
    cursor: Slot,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Slot, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == NIL {
            return None;
        }
        let ring = self.ring;
        let slot = self.cursor;
        let link = &ring.links[slot];
        self.cursor = link.next;
        self.remaining = self.remaining.saturating_sub(1);
        link.item.as_ref().map(|item| (slot, item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
