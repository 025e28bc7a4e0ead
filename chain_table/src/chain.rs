//! Singly linked chains used as the table's buckets.
//!
//! This is an implementation detail of [`ChainTable`][crate::ChainTable]: every list is owned by
//! exactly one bucket slot and nodes are never shared between lists.

/// A node holding one value and the link to its successor.
pub struct ChainNode<T> {
    value: T,
    next: Option<Box<ChainNode<T>>>,
}

/// A singly linked list of uniquely owned nodes.
///
/// There is no tail pointer and no length counter; appending scans to the tail and [`len`][Self::len]
/// walks the chain. Within a bucket the chains stay short enough that this does not matter, and it
/// keeps the nodes as small as possible.
pub struct ChainedList<T> {
    head: Option<Box<ChainNode<T>>>,
}

impl<T> Default for ChainedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ChainedList<T> {
    /// Returns an empty list.
    pub const fn new() -> Self {
        ChainedList { head: None }
    }

    /// Returns `true` if the list has no nodes.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the number of values in the list by walking the chain.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Appends `value` after the current last node, returning a mutable reference to the stored
    /// value.
    ///
    /// On an empty list this sets the head directly. Runs in O(len) due to the tail scan.
    pub fn push_back(&mut self, value: T) -> &mut T {
        let mut cur = &mut self.head;
        while cur.is_some() {
            cur = &mut cur.as_mut().unwrap().next;
        }
        &mut cur.insert(Box::new(ChainNode { value, next: None })).value
    }

    /// Returns a reference to the first value satisfying `pred`, scanning from the head.
    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<&T> {
        let mut cur = self.head.as_deref();
        while let Some(node) = cur {
            if pred(&node.value) {
                return Some(&node.value);
            }
            cur = node.next.as_deref();
        }
        None
    }

    /// Returns a mutable reference to the first value satisfying `pred`, scanning from the head.
    pub fn find_mut(&mut self, mut pred: impl FnMut(&T) -> bool) -> Option<&mut T> {
        let mut cur = self.head.as_deref_mut();
        while let Some(node) = cur {
            if pred(&node.value) {
                return Some(&mut node.value);
            }
            cur = node.next.as_deref_mut();
        }
        None
    }

    /// Detaches the first node whose value satisfies `pred` and returns its value.
    ///
    /// The predecessor is re-linked to the removed node's successor, or the head is moved if the
    /// match is the first node. Nodes past the first match are never examined.
    pub fn remove(&mut self, mut pred: impl FnMut(&T) -> bool) -> Option<T> {
        let mut cur = &mut self.head;
        while cur.is_some() {
            if pred(&cur.as_ref().unwrap().value) {
                let node = cur.take().unwrap();
                *cur = node.next;
                return Some(node.value);
            }
            cur = &mut cur.as_mut().unwrap().next;
        }
        None
    }

    /// Drops every node, leaving the list empty.
    pub fn clear(&mut self) {
        // Unlink iteratively; letting the `Box` chain drop recursively could overflow the stack
        // for a degenerate chain.
        let mut cur = self.head.take();
        while let Some(node) = cur {
            cur = node.next;
        }
    }

    /// Returns an iterator over the values, head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Returns an iterator over the values, head to tail, allowing mutation.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            next: self.head.as_deref_mut(),
        }
    }
}

impl<T> Drop for ChainedList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for ChainedList<T> {
    fn clone(&self) -> Self {
        let mut clone = ChainedList::new();
        let mut tail = &mut clone.head;
        for value in self.iter() {
            tail = &mut tail
                .insert(Box::new(ChainNode {
                    value: value.clone(),
                    next: None,
                }))
                .next;
        }
        clone
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ChainedList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// An iterator over the values of a [`ChainedList`].
pub struct Iter<'a, T> {
    next: Option<&'a ChainNode<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some(&node.value)
    }
}

impl<T> Default for Iter<'_, T> {
    fn default() -> Self {
        Iter { next: None }
    }
}

/// An iterator over the values of a [`ChainedList`], allowing mutation.
pub struct IterMut<'a, T> {
    next: Option<&'a mut ChainNode<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next.take()?;
        self.next = node.next.as_deref_mut();
        Some(&mut node.value)
    }
}

impl<T> Default for IterMut<'_, T> {
    fn default() -> Self {
        IterMut { next: None }
    }
}

/// An iterator moving values out of a [`ChainedList`].
pub struct IntoIter<T> {
    list: ChainedList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.head.take()?;
        self.list.head = node.next;
        Some(node.value)
    }
}

impl<T> IntoIterator for ChainedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a ChainedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut ChainedList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
