//! Chain: the per-bucket ordered sequence.
//!
//! A `Chain` is only a header (`head`, `tail`, `len`). Its nodes live in a
//! `SlotMap` arena shared by every bucket of one table, linked front to
//! back. Arena keys are generational, so a cursor that still names a
//! removed node resolves to nothing instead of to whatever reused the slot.

use slotmap::{DefaultKey, SlotMap};

pub(crate) type Arena<T> = SlotMap<DefaultKey, Node<T>>;

#[derive(Debug)]
pub(crate) struct Node<T> {
    item: T,
    next: Option<DefaultKey>,
}

#[derive(Debug, Default)]
pub(crate) struct Chain {
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
    len: usize,
}

impl Chain {
    pub(crate) const fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Append at the end of the chain.
    pub(crate) fn push_back<T>(&mut self, arena: &mut Arena<T>, item: T) -> DefaultKey {
        let k = arena.insert(Node { item, next: None });
        match self.tail {
            Some(t) => arena[t].next = Some(k),
            None => self.head = Some(k),
        }
        self.tail = Some(k);
        self.len += 1;
        k
    }

    /// Unlink and return the item at `index` (0 = head).
    pub(crate) fn remove_at<T>(&mut self, arena: &mut Arena<T>, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }
        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.head?;
        for _ in 0..index {
            prev = Some(cur);
            cur = arena[cur].next?;
        }
        let node = arena.remove(cur)?;
        match prev {
            Some(p) => arena[p].next = node.next,
            None => self.head = node.next,
        }
        if self.tail == Some(cur) {
            self.tail = prev;
        }
        self.len -= 1;
        Some(node.item)
    }

    pub(crate) fn pop_front<T>(&mut self, arena: &mut Arena<T>) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            self.remove_at(arena, 0)
        }
    }

    /// Position of the first item matching `pred`.
    pub(crate) fn position<T, F>(&self, arena: &Arena<T>, mut pred: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter(arena).position(|item| pred(item))
    }

    pub(crate) fn find_mut<'a, T, F>(&self, arena: &'a mut Arena<T>, mut pred: F) -> Option<&'a mut T>
    where
        F: FnMut(&T) -> bool,
    {
        let mut cur = self.head;
        while let Some(k) = cur {
            if pred(&arena[k].item) {
                return arena.get_mut(k).map(|n| &mut n.item);
            }
            cur = arena[k].next;
        }
        None
    }

    pub(crate) fn cursor(&self) -> ChainCursor {
        ChainCursor { next: self.head }
    }

    pub(crate) fn iter<'a, T>(&self, arena: &'a Arena<T>) -> ChainIter<'a, T> {
        ChainIter {
            arena,
            cursor: self.cursor(),
        }
    }
}

/// Detached forward cursor over one chain. Holds no borrow of the arena.
#[derive(Copy, Clone, Debug)]
pub(crate) struct ChainCursor {
    next: Option<DefaultKey>,
}

impl ChainCursor {
    /// Item the next `advance` would yield, without moving.
    #[inline]
    pub(crate) fn peek<'a, T>(&self, arena: &'a Arena<T>) -> Option<&'a T> {
        self.next.and_then(|k| arena.get(k)).map(|n| &n.item)
    }

    #[inline]
    pub(crate) fn advance<'a, T>(&mut self, arena: &'a Arena<T>) -> Option<&'a T> {
        let node = self.next.and_then(|k| arena.get(k));
        match node {
            Some(n) => {
                self.next = n.next;
                Some(&n.item)
            }
            None => {
                self.next = None;
                None
            }
        }
    }
}

pub(crate) struct ChainIter<'a, T> {
    arena: &'a Arena<T>,
    cursor: ChainCursor,
}

impl<'a, T> Iterator for ChainIter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.advance(self.arena)
    }
}
