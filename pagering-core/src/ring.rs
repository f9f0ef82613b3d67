//! Circular page ring
//!
//! Pages live in a fixed arena of `N` slots. Occupied slots are linked into a
//! circular doubly-linked list through `prev`/`next` slot indices, vacant
//! slots form a singly-linked free list. Appending splices a page in just
//! before the head, so the newest page is always the tail:
//!
//! ```text
//!        ┌──────────────────────────────────────────┐
//!        ▼                                          │
//!      head ──next──▶ page ──next──▶ ... ──next──▶ tail
//!        │                                          ▲
//!        └──────────────────prev────────────────────┘
//! ```
//!
//! Navigation moves a separate `current` cursor and never changes the links.

use heapless::Vec;
use portable_atomic::{AtomicU16, Ordering};

use crate::config::RingConfig;
use crate::error::RingError;
use crate::page::{Page, PageHandle};

/// Default chunk size: one 7x11 character block
pub const CHUNK_SIZE: usize = 77;

/// Source of per-ring tags so handles from another ring are rejected
static NEXT_RING_TAG: AtomicU16 = AtomicU16::new(0);

/// Coarse ring state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RingState {
    /// No pages linked in
    Empty,
    /// Ring holds this many pages
    Populated(usize),
}

/// A linked page
struct Node<const C: usize> {
    chunk: Vec<u8, C>,
    page_number: u8,
    prev: u16,
    next: u16,
}

enum Entry<const C: usize> {
    Vacant { next_free: Option<u16> },
    Occupied(Node<C>),
}

struct Slot<const C: usize> {
    /// Bumped every time the slot is released
    generation: u16,
    entry: Entry<C>,
}

/// Fixed-capacity circular list of display pages
///
/// - `N`: maximum number of pages
/// - `C`: per-page buffer capacity in bytes; the ring's runtime chunk size
///   must be between 1 and `C`
///
/// All operations are bounded. Navigation and splicing are O(1); only
/// [`find`](Self::find) and [`iter`](Self::iter) walk the ring.
pub struct PageRing<const N: usize, const C: usize = CHUNK_SIZE> {
    slots: [Slot<C>; N],
    /// Head of the vacant slot list
    free: Option<u16>,
    head: Option<u16>,
    current: Option<u16>,
    len: usize,
    chunk_size: usize,
    tag: u16,
}

impl<const N: usize, const C: usize> PageRing<N, C> {
    const SLOTS_FIT: () = assert!(N <= u16::MAX as usize, "page ring capacity exceeds u16 slots");

    /// Create an empty ring holding chunks of exactly `chunk_size` bytes
    ///
    /// Fails with `InvalidChunkSize` for a zero chunk size and with
    /// `AllocationError` when `chunk_size` does not fit a slot buffer.
    pub fn new(chunk_size: usize) -> Result<Self, RingError> {
        #[allow(clippy::let_unit_value)]
        let () = Self::SLOTS_FIT;

        if chunk_size == 0 {
            return Err(RingError::InvalidChunkSize);
        }
        if chunk_size > C {
            return Err(RingError::AllocationError);
        }

        let slots = core::array::from_fn(|i| Slot {
            generation: 0,
            entry: Entry::Vacant {
                next_free: if i + 1 < N { Some((i + 1) as u16) } else { None },
            },
        });

        Ok(Self {
            slots,
            free: if N > 0 { Some(0) } else { None },
            head: None,
            current: None,
            len: 0,
            chunk_size,
            tag: NEXT_RING_TAG.fetch_add(1, Ordering::Relaxed),
        })
    }

    /// Create an empty ring sized from a display configuration
    pub fn from_config(config: &RingConfig) -> Result<Self, RingError> {
        Self::new(config.chunk_size as usize)
    }

    /// Append a page at the tail of the ring
    ///
    /// The page is spliced in immediately before the head. On an empty ring
    /// it becomes head and current selection, linked to itself.
    pub fn append(&mut self, chunk: &[u8], page_number: u8) -> Result<PageHandle, RingError> {
        if chunk.len() != self.chunk_size {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "rejected page {}: chunk is {} bytes, ring expects {}",
                page_number,
                chunk.len(),
                self.chunk_size
            );
            return Err(RingError::InvalidChunkSize);
        }

        let index = self.free.ok_or(RingError::AllocationError)?;

        let mut buffer = Vec::new();
        buffer
            .extend_from_slice(chunk)
            .map_err(|_| RingError::AllocationError)?;

        let (prev, next) = match self.head.zip(self.tail_index()) {
            Some((head, tail)) => (tail, head),
            None => (index, index),
        };

        let slot = &mut self.slots[index as usize];
        let Entry::Vacant { next_free } = slot.entry else {
            return Err(RingError::AllocationError);
        };
        slot.entry = Entry::Occupied(Node {
            chunk: buffer,
            page_number,
            prev,
            next,
        });
        self.free = next_free;

        if let Some(node) = self.node_mut(prev) {
            node.next = index;
        }
        if let Some(node) = self.node_mut(next) {
            node.prev = index;
        }

        if self.head.is_none() {
            self.head = Some(index);
            self.current = Some(index);
        }
        self.len += 1;

        #[cfg(feature = "defmt")]
        defmt::debug!("page {} appended to slot {} ({} pages)", page_number, index, self.len);

        Ok(self.handle_for(index))
    }

    /// Move the selection to the next page, wrapping from tail to head
    ///
    /// Returns `None` only when the ring is empty.
    pub fn advance(&mut self) -> Option<PageHandle> {
        let next = self.node(self.current?)?.next;
        self.current = Some(next);
        Some(self.handle_for(next))
    }

    /// Move the selection to the previous page, wrapping from head to tail
    pub fn retreat(&mut self) -> Option<PageHandle> {
        let prev = self.node(self.current?)?.prev;
        self.current = Some(prev);
        Some(self.handle_for(prev))
    }

    /// Currently selected page, `None` if the ring is empty
    pub fn current(&self) -> Option<PageHandle> {
        self.current.map(|index| self.handle_for(index))
    }

    /// View of the currently selected page
    pub fn current_page(&self) -> Option<Page<'_>> {
        self.view(self.current?)
    }

    /// Make `handle` the current selection
    pub fn select(&mut self, handle: PageHandle) -> Result<(), RingError> {
        let index = self.resolve(handle).ok_or(RingError::NotFound)?;
        self.current = Some(index);
        Ok(())
    }

    /// Unlink a page and release its chunk buffer
    ///
    /// If the page was selected, the selection moves to its successor. If it
    /// was the head, its successor becomes head. Removing the last page
    /// leaves the ring empty.
    pub fn remove(&mut self, handle: PageHandle) -> Result<(), RingError> {
        let index = self.resolve(handle).ok_or(RingError::NotFound)?;
        let (prev, next) = self
            .node(index)
            .map(|node| (node.prev, node.next))
            .ok_or(RingError::NotFound)?;

        if next == index {
            self.head = None;
            self.current = None;
        } else {
            if let Some(node) = self.node_mut(prev) {
                node.next = next;
            }
            if let Some(node) = self.node_mut(next) {
                node.prev = prev;
            }
            if self.head == Some(index) {
                self.head = Some(next);
            }
            if self.current == Some(index) {
                self.current = Some(next);
            }
        }

        self.release(index);
        self.len -= 1;

        #[cfg(feature = "defmt")]
        defmt::debug!("slot {} released ({} pages left)", index, self.len);

        Ok(())
    }

    /// Overwrite the chunk of an existing page
    pub fn fill(&mut self, handle: PageHandle, chunk: &[u8]) -> Result<(), RingError> {
        if chunk.len() != self.chunk_size {
            return Err(RingError::InvalidChunkSize);
        }
        let index = self.resolve(handle).ok_or(RingError::NotFound)?;
        let node = self.node_mut(index).ok_or(RingError::NotFound)?;
        node.chunk.clear();
        node.chunk
            .extend_from_slice(chunk)
            .map_err(|_| RingError::AllocationError)
    }

    /// Release every page, keeping the ring usable
    ///
    /// Handles issued before the call no longer resolve. Returns the number
    /// of pages released.
    pub fn clear(&mut self) -> usize {
        let mut released = 0;
        for index in 0..N {
            if matches!(self.slots[index].entry, Entry::Occupied(_)) {
                self.release(index as u16);
                released += 1;
            }
        }
        self.head = None;
        self.current = None;
        self.len = 0;
        released
    }

    /// Tear the ring down, releasing every page and the ring itself
    ///
    /// Returns the number of pages released.
    pub fn destroy(mut self) -> usize {
        let released = self.clear();
        #[cfg(feature = "defmt")]
        defmt::debug!("ring destroyed, {} pages released", released);
        released
    }

    /// Look up a page by handle
    pub fn page(&self, handle: PageHandle) -> Option<Page<'_>> {
        self.view(self.resolve(handle)?)
    }

    /// Check whether a handle refers to a live page of this ring
    pub fn contains(&self, handle: PageHandle) -> bool {
        self.resolve(handle).is_some()
    }

    /// Successor of a page, without moving the selection
    pub fn next(&self, handle: PageHandle) -> Option<PageHandle> {
        let next = self.node(self.resolve(handle)?)?.next;
        Some(self.handle_for(next))
    }

    /// Predecessor of a page, without moving the selection
    pub fn prev(&self, handle: PageHandle) -> Option<PageHandle> {
        let prev = self.node(self.resolve(handle)?)?.prev;
        Some(self.handle_for(prev))
    }

    /// First page of the ring
    pub fn head(&self) -> Option<PageHandle> {
        self.head.map(|index| self.handle_for(index))
    }

    /// Last page of the ring (the head's predecessor)
    pub fn tail(&self) -> Option<PageHandle> {
        self.tail_index().map(|index| self.handle_for(index))
    }

    /// First page, starting from the head, carrying `page_number`
    pub fn find(&self, page_number: u8) -> Option<PageHandle> {
        self.iter()
            .find(|page| page.page_number() == page_number)
            .map(|page| page.handle())
    }

    /// Iterate over pages in ring order, starting at the head
    pub fn iter(&self) -> Pages<'_, N, C> {
        Pages {
            ring: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Number of linked pages
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no pages are linked in
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when every slot holds a page
    pub fn is_full(&self) -> bool {
        self.free.is_none()
    }

    /// Maximum number of pages
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Configured chunk length in bytes
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Empty or populated
    pub fn state(&self) -> RingState {
        match self.len {
            0 => RingState::Empty,
            n => RingState::Populated(n),
        }
    }

    fn tail_index(&self) -> Option<u16> {
        Some(self.node(self.head?)?.prev)
    }

    fn node(&self, index: u16) -> Option<&Node<C>> {
        match &self.slots.get(index as usize)?.entry {
            Entry::Occupied(node) => Some(node),
            Entry::Vacant { .. } => None,
        }
    }

    fn node_mut(&mut self, index: u16) -> Option<&mut Node<C>> {
        match &mut self.slots.get_mut(index as usize)?.entry {
            Entry::Occupied(node) => Some(node),
            Entry::Vacant { .. } => None,
        }
    }

    fn view(&self, index: u16) -> Option<Page<'_>> {
        let node = self.node(index)?;
        Some(Page::new(self.handle_for(index), node.page_number, &node.chunk))
    }

    fn handle_for(&self, index: u16) -> PageHandle {
        PageHandle {
            ring: self.tag,
            slot: index,
            generation: self.slots[index as usize].generation,
        }
    }

    /// Map a handle to a live slot index of this ring
    fn resolve(&self, handle: PageHandle) -> Option<u16> {
        if handle.ring != self.tag {
            return None;
        }
        let slot = self.slots.get(handle.slot as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        matches!(slot.entry, Entry::Occupied(_)).then_some(handle.slot)
    }

    /// Drop the slot's page and push the slot onto the free list
    fn release(&mut self, index: u16) {
        let free = self.free;
        if let Some(slot) = self.slots.get_mut(index as usize) {
            slot.entry = Entry::Vacant { next_free: free };
            slot.generation = slot.generation.wrapping_add(1);
            self.free = Some(index);
        }
    }

    /// Verify link symmetry, closure and slot accounting
    #[cfg(test)]
    pub(crate) fn links_consistent(&self) -> bool {
        let occupied = self
            .slots
            .iter()
            .filter(|slot| matches!(slot.entry, Entry::Occupied(_)))
            .count();
        if occupied != self.len {
            return false;
        }

        let mut free = 0;
        let mut cursor = self.free;
        while let Some(index) = cursor {
            match self.slots[index as usize].entry {
                Entry::Vacant { next_free } => cursor = next_free,
                Entry::Occupied(_) => return false,
            }
            free += 1;
            if free > N {
                return false;
            }
        }
        if free + self.len != N {
            return false;
        }

        let Some(head) = self.head else {
            return self.len == 0 && self.current.is_none();
        };
        if self.current.and_then(|index| self.node(index)).is_none() {
            return false;
        }

        let mut cursor = head;
        for _ in 0..self.len {
            let Some(node) = self.node(cursor) else {
                return false;
            };
            let next_ok = self.node(node.next).map(|n| n.prev) == Some(cursor);
            let prev_ok = self.node(node.prev).map(|n| n.next) == Some(cursor);
            if !(next_ok && prev_ok) {
                return false;
            }
            cursor = node.next;
        }
        cursor == head
    }
}

/// Iterator over the pages of a ring, head first
pub struct Pages<'a, const N: usize, const C: usize> {
    ring: &'a PageRing<N, C>,
    cursor: Option<u16>,
    remaining: usize,
}

impl<'a, const N: usize, const C: usize> Iterator for Pages<'a, N, C> {
    type Item = Page<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.cursor?;
        let page = self.ring.view(index)?;
        self.cursor = self.ring.node(index).map(|node| node.next);
        self.remaining -= 1;
        Some(page)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<const N: usize, const C: usize> ExactSizeIterator for Pages<'_, N, C> {}

impl<'a, const N: usize, const C: usize> IntoIterator for &'a PageRing<N, C> {
    type Item = Page<'a>;
    type IntoIter = Pages<'a, N, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::vec::Vec as StdVec;

    type SmallRing = PageRing<8, 4>;

    fn ring_with(pages: u8) -> SmallRing {
        let mut ring = SmallRing::new(4).unwrap();
        for n in 0..pages {
            ring.append(&[n; 4], n).unwrap();
        }
        ring
    }

    fn number(ring: &SmallRing, handle: PageHandle) -> u8 {
        ring.page(handle).unwrap().page_number()
    }

    #[test]
    fn test_new_ring_is_empty() {
        let ring = SmallRing::new(4).unwrap();
        assert!(ring.is_empty());
        assert_eq!(ring.state(), RingState::Empty);
        assert_eq!(ring.current(), None);
        assert_eq!(ring.head(), None);
        assert_eq!(ring.tail(), None);
        assert_eq!(ring.capacity(), 8);
        assert_eq!(ring.chunk_size(), 4);
        assert!(ring.links_consistent());
    }

    #[test]
    fn test_new_rejects_bad_chunk_size() {
        assert_eq!(SmallRing::new(0).err(), Some(RingError::InvalidChunkSize));
        assert_eq!(SmallRing::new(5).err(), Some(RingError::AllocationError));
        assert!(PageRing::<2>::new(CHUNK_SIZE).is_ok());
    }

    #[test]
    fn test_from_config_uses_chunk_size() {
        let ring = PageRing::<4>::from_config(&RingConfig::default()).unwrap();
        assert_eq!(ring.chunk_size(), CHUNK_SIZE);
    }

    #[test]
    fn test_two_page_scenario() {
        let mut ring = SmallRing::new(4).unwrap();
        ring.append(&[1, 2, 3, 4], 0).unwrap();
        ring.append(&[5, 6, 7, 8], 1).unwrap();

        let current = ring.current().unwrap();
        assert_eq!(number(&ring, current), 0);
        assert_eq!(ring.page(current).unwrap().chunk(), &[1, 2, 3, 4]);

        let page = ring.advance().unwrap();
        assert_eq!(number(&ring, page), 1);
        assert_eq!(ring.page(page).unwrap().chunk(), &[5, 6, 7, 8]);

        // Wraparound
        let page = ring.advance().unwrap();
        assert_eq!(number(&ring, page), 0);

        let page = ring.retreat().unwrap();
        assert_eq!(number(&ring, page), 1);
    }

    #[test]
    fn test_append_on_empty_becomes_current() {
        let mut ring = SmallRing::new(4).unwrap();
        let handle = ring.append(&[9; 4], 42).unwrap();

        assert_eq!(ring.current(), Some(handle));
        assert_eq!(ring.head(), Some(handle));
        assert_eq!(ring.tail(), Some(handle));
        assert_eq!(ring.next(handle), Some(handle));
        assert_eq!(ring.prev(handle), Some(handle));
        assert_eq!(ring.state(), RingState::Populated(1));
    }

    #[test]
    fn test_append_links_new_tail() {
        let mut ring = ring_with(3);
        let old_tail = ring.tail().unwrap();
        let head = ring.head().unwrap();

        let new = ring.append(&[7; 4], 3).unwrap();

        assert_eq!(ring.next(old_tail), Some(new));
        assert_eq!(ring.prev(head), Some(new));
        assert_eq!(ring.next(new), Some(head));
        assert_eq!(ring.tail(), Some(new));
        assert_eq!(ring.head(), Some(head));
        assert!(ring.links_consistent());
    }

    #[test]
    fn test_append_does_not_move_selection() {
        let mut ring = ring_with(2);
        let selected = ring.advance().unwrap();
        ring.append(&[0; 4], 9).unwrap();
        assert_eq!(ring.current(), Some(selected));
    }

    #[test]
    fn test_single_page_navigation() {
        let mut ring = ring_with(1);
        let only = ring.current().unwrap();
        assert_eq!(ring.advance(), Some(only));
        assert_eq!(ring.retreat(), Some(only));
    }

    #[test]
    fn test_empty_navigation() {
        let mut ring = SmallRing::new(4).unwrap();
        assert_eq!(ring.advance(), None);
        assert_eq!(ring.retreat(), None);
        assert!(ring.current_page().is_none());
    }

    #[test]
    fn test_wrong_chunk_length_rejected() {
        let mut ring = ring_with(2);
        assert_eq!(ring.append(&[1, 2, 3], 5), Err(RingError::InvalidChunkSize));
        assert_eq!(ring.append(&[1, 2, 3, 4, 5], 5), Err(RingError::InvalidChunkSize));
        assert_eq!(ring.len(), 2);
        assert!(ring.links_consistent());
    }

    #[test]
    fn test_full_ring_rejects_append() {
        let mut ring = ring_with(8);
        assert!(ring.is_full());
        let tail = ring.tail();

        assert_eq!(ring.append(&[0; 4], 8), Err(RingError::AllocationError));
        assert_eq!(ring.len(), 8);
        assert_eq!(ring.tail(), tail);
        assert!(ring.links_consistent());
    }

    #[test]
    fn test_zero_capacity_ring() {
        let mut ring = PageRing::<0, 4>::new(4).unwrap();
        assert!(ring.is_full());
        assert_eq!(ring.append(&[0; 4], 0), Err(RingError::AllocationError));
    }

    #[test]
    fn test_remove_only_page() {
        let mut ring = ring_with(1);
        let only = ring.current().unwrap();

        ring.remove(only).unwrap();

        assert_eq!(ring.state(), RingState::Empty);
        assert_eq!(ring.current(), None);
        assert_eq!(ring.head(), None);
        assert!(ring.links_consistent());
    }

    #[test]
    fn test_remove_current_moves_to_next() {
        let mut ring = ring_with(3);
        let middle = ring.advance().unwrap();

        ring.remove(middle).unwrap();

        assert_eq!(number(&ring, ring.current().unwrap()), 2);
        assert_eq!(ring.len(), 2);
        assert!(ring.links_consistent());
    }

    #[test]
    fn test_remove_tail_while_current_wraps_to_head() {
        let mut ring = ring_with(3);
        let tail = ring.retreat().unwrap();

        ring.remove(tail).unwrap();

        assert_eq!(ring.current(), ring.head());
        assert_eq!(number(&ring, ring.tail().unwrap()), 1);
    }

    #[test]
    fn test_remove_head_promotes_next() {
        let mut ring = ring_with(3);
        let head = ring.head().unwrap();

        ring.remove(head).unwrap();

        let new_head = ring.head().unwrap();
        assert_eq!(number(&ring, new_head), 1);
        assert_eq!(ring.current(), Some(new_head));
        assert_eq!(number(&ring, ring.prev(new_head).unwrap()), 2);
        assert!(ring.links_consistent());
    }

    #[test]
    fn test_stale_handle_not_found() {
        let mut ring = ring_with(2);
        let head = ring.head().unwrap();
        ring.remove(head).unwrap();

        assert_eq!(ring.remove(head), Err(RingError::NotFound));
        assert!(ring.page(head).is_none());
        assert!(!ring.contains(head));

        // Reusing the slot must not revive the old handle
        let reused = ring.append(&[3; 4], 3).unwrap();
        assert_eq!(reused.slot(), head.slot());
        assert_ne!(reused, head);
        assert_eq!(ring.select(head), Err(RingError::NotFound));
    }

    #[test]
    fn test_foreign_handle_not_found() {
        let mut ring = ring_with(2);
        let other = ring_with(2);
        let foreign = other.head().unwrap();

        assert_eq!(ring.remove(foreign), Err(RingError::NotFound));
        assert_eq!(ring.len(), 2);
    }

    #[test]
    fn test_clear_invalidates_handles() {
        let mut ring = ring_with(5);
        let head = ring.head().unwrap();

        ring.clear();

        assert!(ring.is_empty());
        assert!(ring.page(head).is_none());
        assert!(ring.links_consistent());
        // Every slot is back on the free list
        for n in 0..8 {
            ring.append(&[n; 4], n).unwrap();
        }
        assert!(ring.is_full());
    }

    #[test]
    fn test_destroy_releases_every_page() {
        assert_eq!(ring_with(4).destroy(), 4);
        assert_eq!(ring_with(8).destroy(), 8);
        assert_eq!(SmallRing::new(4).unwrap().destroy(), 0);

        // Removed pages are released once, not again on teardown
        let mut ring = ring_with(5);
        ring.remove(ring.head().unwrap()).unwrap();
        ring.remove(ring.tail().unwrap()).unwrap();
        assert_eq!(ring.destroy(), 3);
    }

    #[test]
    fn test_fill_overwrites_chunk() {
        let mut ring = ring_with(2);
        let tail = ring.tail().unwrap();

        ring.fill(tail, &[0xAA; 4]).unwrap();
        assert_eq!(ring.page(tail).unwrap().chunk(), &[0xAA; 4]);

        assert_eq!(ring.fill(tail, &[0; 2]), Err(RingError::InvalidChunkSize));
        assert_eq!(ring.page(tail).unwrap().chunk(), &[0xAA; 4]);
    }

    #[test]
    fn test_select_and_find() {
        let mut ring = ring_with(4);
        let third = ring.find(2).unwrap();

        ring.select(third).unwrap();
        assert_eq!(ring.current_page().unwrap().page_number(), 2);
        assert_eq!(ring.find(99), None);
    }

    #[test]
    fn test_duplicate_page_numbers_allowed() {
        let mut ring = SmallRing::new(4).unwrap();
        let first = ring.append(&[1; 4], 7).unwrap();
        ring.append(&[2; 4], 7).unwrap();

        assert_eq!(ring.len(), 2);
        assert_eq!(ring.find(7), Some(first));
    }

    #[test]
    fn test_iter_in_ring_order() {
        let mut ring = ring_with(4);
        ring.remove(ring.find(1).unwrap()).unwrap();
        ring.append(&[9; 4], 9).unwrap();

        let numbers: StdVec<u8> = ring.iter().map(|page| page.page_number()).collect();
        assert_eq!(numbers, [0, 2, 3, 9]);
        assert_eq!(ring.iter().len(), 4);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Append(u8),
        Remove(usize),
        Advance,
        Retreat,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<u8>().prop_map(Op::Append),
            (0usize..8).prop_map(Op::Remove),
            Just(Op::Advance),
            Just(Op::Retreat),
        ]
    }

    proptest! {
        #[test]
        fn prop_full_traversal_is_closed(pages in 1u8..=8, start in 0usize..8) {
            let mut ring = ring_with(pages);
            for _ in 0..start {
                ring.advance();
            }
            let origin = ring.current();
            for _ in 0..pages {
                ring.advance();
            }
            prop_assert_eq!(ring.current(), origin);
            for _ in 0..pages {
                ring.retreat();
            }
            prop_assert_eq!(ring.current(), origin);
        }

        #[test]
        fn prop_advance_retreat_inverse(pages in 1u8..=8, start in 0usize..8) {
            let mut ring = ring_with(pages);
            for _ in 0..start {
                ring.advance();
            }
            let origin = ring.current();

            ring.advance();
            prop_assert_eq!(ring.retreat(), origin);
            ring.retreat();
            prop_assert_eq!(ring.advance(), origin);
        }

        #[test]
        fn prop_clear_releases_every_slot(pages in 0u8..=8) {
            let mut ring = ring_with(pages);
            ring.clear();
            prop_assert!(ring.links_consistent());
            for n in 0..8u8 {
                prop_assert!(ring.append(&[n; 4], n).is_ok());
            }
            prop_assert!(ring.is_full());
        }

        #[test]
        fn prop_destroy_releases_each_append_once(pages in 0u8..=8) {
            let mut ring = SmallRing::new(4).unwrap();
            for n in 0..pages {
                ring.append(&[n; 4], n).unwrap();
            }
            prop_assert_eq!(ring.destroy(), pages as usize);
        }

        #[test]
        fn prop_bad_length_leaves_ring_unchanged(pages in 0u8..=8, len in 0usize..8) {
            prop_assume!(len != 4);
            let mut ring = ring_with(pages);
            let chunk = [0u8; 8];
            prop_assert_eq!(ring.append(&chunk[..len], 0), Err(RingError::InvalidChunkSize));
            prop_assert_eq!(ring.len(), pages as usize);
        }

        #[test]
        fn prop_links_hold_after_any_sequence(ops in proptest::collection::vec(op(), 0..64)) {
            let mut ring = SmallRing::new(4).unwrap();
            for op in ops {
                let before = ring.len();
                match op {
                    Op::Append(n) => {
                        let result = ring.append(&[n; 4], n);
                        prop_assert_eq!(result.is_ok(), before < 8);
                        if result.is_ok() && before == 0 {
                            prop_assert_eq!(ring.current(), result.ok());
                        }
                    }
                    Op::Remove(nth) => {
                        let target = ring.iter().nth(nth).map(|page| page.handle());
                        match target {
                            Some(handle) => {
                                prop_assert!(ring.remove(handle).is_ok());
                                prop_assert_eq!(ring.len(), before - 1);
                            }
                            None => {
                                prop_assert!(nth >= before);
                            }
                        }
                    }
                    Op::Advance => {
                        ring.advance();
                        prop_assert_eq!(ring.len(), before);
                    }
                    Op::Retreat => {
                        ring.retreat();
                        prop_assert_eq!(ring.len(), before);
                    }
                }
                prop_assert!(ring.links_consistent());
            }
        }
    }
}
