//! Intrusive index-linked list mechanism.
//!
//! The prev/next cells live *inside* the arena records (a vertex carries its
//! vertex-list links, an edge carries one pair of links per adjacency list it
//! belongs to), so push-back and unlink are O(1) with no container
//! allocation. The list only links; the arena owns the records.
//!
//! One mechanism serves three lists: the graph's vertex list, a vertex's
//! outgoing-edge list, and a vertex's incoming-edge list. Each caller
//! supplies a [`LinkAdapter`] that resolves a record id to its link cell for
//! that particular list.
//!
//! Deleting or relinking while iterating is the canonical usage pattern:
//! capture the `next` id *before* unlinking the current record, then
//! continue from the captured id. Mutating records the iteration has not yet
//! reached is the caller's responsibility to avoid.

/// Prev/next cell embedded in a record, one per list the record belongs to.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Links<I> {
    pub prev: Option<I>,
    pub next: Option<I>,
}

impl<I> Default for Links<I> {
    fn default() -> Self {
        Self {
            prev: None,
            next: None,
        }
    }
}

/// Head/tail cell embedded in the list owner.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ListHead<I> {
    head: Option<I>,
    tail: Option<I>,
}

impl<I> Default for ListHead<I> {
    fn default() -> Self {
        Self {
            head: None,
            tail: None,
        }
    }
}

/// Resolves a record id to the link cell this list threads through.
///
/// Implementations panic if `id` does not resolve to a live record: every id
/// reachable from a `ListHead` is linked by construction, so a miss means
/// the adjacency invariant is already broken.
pub(crate) trait LinkAdapter {
    type Id: Copy + PartialEq;

    fn links(&self, id: Self::Id) -> Links<Self::Id>;
    fn links_mut(&mut self, id: Self::Id) -> &mut Links<Self::Id>;
}

impl<I: Copy + PartialEq> ListHead<I> {
    /// First record in the list, if any.
    pub fn first(&self) -> Option<I> {
        self.head
    }

    /// Last record in the list, if any.
    pub fn last(&self) -> Option<I> {
        self.tail
    }

    /// Returns `true` if the list has no records.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Appends `id` to the tail. O(1).
    pub fn push_back<A: LinkAdapter<Id = I>>(&mut self, adapter: &mut A, id: I) {
        let old_tail = self.tail;
        *adapter.links_mut(id) = Links {
            prev: old_tail,
            next: None,
        };
        if let Some(tail) = old_tail {
            adapter.links_mut(tail).next = Some(id);
        } else {
            self.head = Some(id);
        }
        self.tail = Some(id);
    }

    /// Removes `id` from wherever it sits in the list. O(1).
    pub fn unlink<A: LinkAdapter<Id = I>>(&mut self, adapter: &mut A, id: I) {
        let Links { prev, next } = adapter.links(id);
        match prev {
            Some(p) => adapter.links_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => adapter.links_mut(n).prev = prev,
            None => self.tail = prev,
        }
        *adapter.links_mut(id) = Links::default();
    }

    /// Drops the head/tail references without touching the records.
    ///
    /// Used by bulk teardown after the records themselves have been freed.
    pub fn detach(&mut self) {
        self.head = None;
        self.tail = None;
    }
}
