//! Generational slot arena backing vertex and edge storage.
//!
//! Records are stored in a `Vec` of slots; freed slots are threaded onto an
//! intrusive free list and reused on the next insertion. Every slot carries a
//! generation counter that is bumped when the slot is freed and again when it
//! is reused, so a handle taken before a free can never observe the record
//! that later moved into the same slot.
//!
//! Implementation details:
//! - handles are `u32` index + `u32` generation (8 bytes, `Copy`)
//! - the free list is threaded through the slots themselves (`u32::MAX`
//!   sentinel for "no free slot")
//! - stale handles are answered with `None`, never with a different record

use core::fmt;
use core::marker::PhantomData;

/// Sentinel meaning "no free slot" in the free-list chain.
const NONE: u32 = u32::MAX;

/// A handle into an [`Arena`]: slot index plus the generation the slot had
/// when the record was inserted.
pub trait ArenaId: Copy + Eq {
    /// Builds a handle from raw parts. Only the arena mints valid handles.
    fn from_parts(index: u32, generation: u32) -> Self;
    /// Slot index within the arena.
    fn index(self) -> u32;
    /// Generation the slot had at insertion time.
    fn generation(self) -> u32;
}

/// Defines a typed arena handle.
///
/// Vertex and edge handles must not be mixable, so each record kind gets its
/// own newtype rather than sharing a raw `(u32, u32)` pair.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name {
            index: u32,
            generation: u32,
        }

        impl $crate::arena::ArenaId for $name {
            #[inline]
            fn from_parts(index: u32, generation: u32) -> Self {
                Self { index, generation }
            }
            #[inline]
            fn index(self) -> u32 {
                self.index
            }
            #[inline]
            fn generation(self) -> u32 {
                self.generation
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, concat!(stringify!($name), "({}v{})"), self.index, self.generation)
            }
        }
    };
}

pub(crate) use define_id;

/// Payload of a slot: either a live record or a link in the free chain.
enum SlotState<T> {
    Occupied(T),
    Free { next_free: u32 },
}

struct Slot<T> {
    generation: u32,
    state: SlotState<T>,
}

/// A generational arena of records addressed by typed handles.
pub struct Arena<K, T> {
    slots: Vec<Slot<T>>,
    free_head: u32,
    len: usize,
    _marker: PhantomData<fn(K) -> K>,
}

impl<K: ArenaId, T> Arena<K, T> {
    /// Creates an empty arena.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: NONE,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Creates an arena sized for `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: NONE,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Returns the number of live records.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no records are live.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts a record, reusing a freed slot when one is available.
    pub fn insert(&mut self, value: T) -> K {
        self.len += 1;
        if self.free_head != NONE {
            let idx = self.free_head as usize;
            let slot = &mut self.slots[idx];
            let next_free = match slot.state {
                SlotState::Free { next_free } => next_free,
                SlotState::Occupied(_) => unreachable!("occupied slot on free list"),
            };
            self.free_head = next_free;
            slot.generation = slot.generation.wrapping_add(1);
            slot.state = SlotState::Occupied(value);
            K::from_parts(idx as u32, slot.generation)
        } else {
            let idx = self.slots.len();
            assert!(idx < NONE as usize, "arena slot index overflow");
            self.slots.push(Slot {
                generation: 0,
                state: SlotState::Occupied(value),
            });
            K::from_parts(idx as u32, 0)
        }
    }

    /// Removes the record behind `id`, returning it, or `None` if the handle
    /// is stale.
    pub fn remove(&mut self, id: K) -> Option<T> {
        let idx = id.index() as usize;
        let slot = self.slots.get_mut(idx)?;
        if slot.generation != id.generation() {
            return None;
        }
        if let SlotState::Free { .. } = slot.state {
            return None;
        }
        // Bump on free so every outstanding handle to this slot goes stale.
        slot.generation = slot.generation.wrapping_add(1);
        let state = core::mem::replace(
            &mut slot.state,
            SlotState::Free {
                next_free: self.free_head,
            },
        );
        self.free_head = idx as u32;
        self.len -= 1;
        match state {
            SlotState::Occupied(value) => Some(value),
            SlotState::Free { .. } => unreachable!(),
        }
    }

    /// Returns a reference to the record behind `id`, or `None` if stale.
    pub fn get(&self, id: K) -> Option<&T> {
        let slot = self.slots.get(id.index() as usize)?;
        match &slot.state {
            SlotState::Occupied(value) if slot.generation == id.generation() => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the record behind `id`, or `None` if
    /// stale.
    pub fn get_mut(&mut self, id: K) -> Option<&mut T> {
        let slot = self.slots.get_mut(id.index() as usize)?;
        match &mut slot.state {
            SlotState::Occupied(value) if slot.generation == id.generation() => Some(value),
            _ => None,
        }
    }

    /// Returns `true` if `id` refers to a live record.
    pub fn contains(&self, id: K) -> bool {
        self.get(id).is_some()
    }

    /// Frees every live record. Slot storage is retained and every
    /// outstanding handle goes stale, so handles taken before the clear can
    /// never alias records inserted after it.
    pub fn clear(&mut self) {
        for (i, slot) in self.slots.iter_mut().enumerate().rev() {
            if let SlotState::Occupied(_) = slot.state {
                slot.generation = slot.generation.wrapping_add(1);
                slot.state = SlotState::Free {
                    next_free: self.free_head,
                };
                self.free_head = i as u32;
            }
        }
        self.len = 0;
    }

    /// Iterates live records mutably in slot order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (K, &mut T)> + '_ {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| match &mut slot.state {
                SlotState::Occupied(value) => {
                    Some((K::from_parts(i as u32, slot.generation), value))
                }
                SlotState::Free { .. } => None,
            })
    }

    /// Iterates live records in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| match &slot.state {
            SlotState::Occupied(value) => {
                Some((K::from_parts(i as u32, slot.generation), value))
            }
            SlotState::Free { .. } => None,
        })
    }
}

impl<K: ArenaId, T> Default for Arena<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ArenaId, T: fmt::Debug> fmt::Debug for Arena<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("len", &self.len)
            .field("slots", &self.slots.len())
            .finish()
    }
}
