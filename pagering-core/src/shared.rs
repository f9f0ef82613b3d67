//! Interrupt-safe page ring access
//!
//! A button or encoder ISR may step through pages while the main loop loads
//! new ones. Wrapping the ring in an embassy-sync blocking mutex turns every
//! access into a short critical section when used with
//! `CriticalSectionRawMutex`, so the `current` cursor is never observed half
//! updated.
//!
//! `append`, `remove` and `clear` copy or release chunk buffers and belong to
//! the main loop only. Navigation (`advance`, `retreat`, `current`,
//! `with_current`) is safe from interrupt context.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embassy_sync::blocking_mutex::Mutex;

use crate::error::RingError;
use crate::page::{Page, PageHandle};
use crate::ring::{PageRing, CHUNK_SIZE};

/// Page ring shared between interrupt handlers and the main loop
pub type IrqPageRing<const N: usize, const C: usize = CHUNK_SIZE> =
    SharedPageRing<CriticalSectionRawMutex, N, C>;

/// Page ring behind a blocking mutex
///
/// Closures passed to [`lock`](Self::lock) or
/// [`with_current`](Self::with_current) must not call back into the same
/// shared ring.
pub struct SharedPageRing<M: RawMutex, const N: usize, const C: usize = CHUNK_SIZE> {
    inner: Mutex<M, RefCell<PageRing<N, C>>>,
}

impl<M: RawMutex, const N: usize, const C: usize> SharedPageRing<M, N, C> {
    /// Wrap an existing ring
    pub const fn new(ring: PageRing<N, C>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(ring)),
        }
    }

    /// Select the next page (ISR safe)
    pub fn advance(&self) -> Option<PageHandle> {
        self.inner.lock(|ring| ring.borrow_mut().advance())
    }

    /// Select the previous page (ISR safe)
    pub fn retreat(&self) -> Option<PageHandle> {
        self.inner.lock(|ring| ring.borrow_mut().retreat())
    }

    /// Currently selected page (ISR safe)
    pub fn current(&self) -> Option<PageHandle> {
        self.inner.lock(|ring| ring.borrow().current())
    }

    /// Run `f` on the selected page while the lock is held
    pub fn with_current<R>(&self, f: impl FnOnce(Page<'_>) -> R) -> Option<R> {
        self.inner.lock(|ring| ring.borrow().current_page().map(f))
    }

    /// Append a page (main loop only)
    pub fn append(&self, chunk: &[u8], page_number: u8) -> Result<PageHandle, RingError> {
        self.inner
            .lock(|ring| ring.borrow_mut().append(chunk, page_number))
    }

    /// Remove a page (main loop only)
    pub fn remove(&self, handle: PageHandle) -> Result<(), RingError> {
        self.inner.lock(|ring| ring.borrow_mut().remove(handle))
    }

    /// Release every page (main loop only), returning how many were released
    pub fn clear(&self) -> usize {
        self.inner.lock(|ring| ring.borrow_mut().clear())
    }

    /// Number of linked pages
    pub fn len(&self) -> usize {
        self.inner.lock(|ring| ring.borrow().len())
    }

    /// True when no pages are linked in
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `f` with exclusive access to the ring
    pub fn lock<R>(&self, f: impl FnOnce(&mut PageRing<N, C>) -> R) -> R {
        self.inner.lock(|ring| f(&mut ring.borrow_mut()))
    }

    /// Unwrap the ring
    pub fn into_inner(self) -> PageRing<N, C> {
        self.inner.into_inner().into_inner()
    }
}
