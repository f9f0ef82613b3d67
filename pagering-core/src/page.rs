//! Page handles and read-only page views

/// Handle to a page stored in a [`PageRing`](crate::PageRing)
///
/// Handles are small `Copy` tokens. A handle stays valid until its page is
/// removed or the ring is cleared; after that every lookup with it fails
/// with `NotFound` (or returns `None`), even if the slot gets reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PageHandle {
    /// Tag of the ring that issued this handle
    pub(crate) ring: u16,
    /// Arena slot index
    pub(crate) slot: u16,
    /// Slot generation at the time the page was stored
    pub(crate) generation: u16,
}

impl PageHandle {
    /// Arena slot this page occupies
    pub fn slot(&self) -> usize {
        self.slot as usize
    }
}

/// Read-only view of one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a> {
    handle: PageHandle,
    page_number: u8,
    chunk: &'a [u8],
}

impl<'a> Page<'a> {
    pub(crate) fn new(handle: PageHandle, page_number: u8, chunk: &'a [u8]) -> Self {
        Self {
            handle,
            page_number,
            chunk,
        }
    }

    /// Handle of this page
    pub fn handle(&self) -> PageHandle {
        self.handle
    }

    /// Caller-assigned page number
    pub fn page_number(&self) -> u8 {
        self.page_number
    }

    /// Raw chunk bytes, exactly the ring's chunk size long
    pub fn chunk(&self) -> &'a [u8] {
        self.chunk
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Page<'_> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Page[#{} slot {} len {}]",
            self.page_number,
            self.handle.slot,
            self.chunk.len()
        );
    }
}
