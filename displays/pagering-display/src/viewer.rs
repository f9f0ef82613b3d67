//! Page viewer
//!
//! Couples a page ring with a display backend. Navigation events move the
//! ring selection and mark the viewer dirty; `render` pushes the selected
//! chunk to the backend only when something changed.

use core::fmt;

use pagering_core::{PageHandle, PageRing, RingError, CHUNK_SIZE};

use crate::backend::{DisplayBackend, DisplayError};
use crate::input::{InputSource, NavigationEvent};

/// Errors from the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ViewerError {
    /// Ring operation failed
    Ring(RingError),
    /// Backend failed to draw
    Display(DisplayError),
}

impl From<RingError> for ViewerError {
    fn from(e: RingError) -> Self {
        ViewerError::Ring(e)
    }
}

impl From<DisplayError> for ViewerError {
    fn from(e: DisplayError) -> Self {
        ViewerError::Display(e)
    }
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::Ring(e) => write!(f, "ring: {}", e),
            ViewerError::Display(e) => write!(f, "display: {}", e),
        }
    }
}

/// Shows the selected page of a ring on a display backend
pub struct PageViewer<B: DisplayBackend, const N: usize, const C: usize = CHUNK_SIZE> {
    ring: PageRing<N, C>,
    backend: B,
    /// Whether the display needs to be redrawn
    dirty: bool,
}

impl<B: DisplayBackend, const N: usize, const C: usize> PageViewer<B, N, C> {
    /// Create a viewer; the first `render` always draws
    pub fn new(ring: PageRing<N, C>, backend: B) -> Self {
        Self {
            ring,
            backend,
            dirty: true,
        }
    }

    /// Load a page at the end of the ring
    ///
    /// Marks the viewer dirty when the new page became the selection (the
    /// ring was empty).
    pub fn load(&mut self, chunk: &[u8], page_number: u8) -> Result<PageHandle, ViewerError> {
        let handle = self.ring.append(chunk, page_number)?;
        if self.ring.current() == Some(handle) {
            self.dirty = true;
        }
        Ok(handle)
    }

    /// Remove a page, redrawing if it was on screen
    pub fn unload(&mut self, handle: PageHandle) -> Result<(), ViewerError> {
        let was_current = self.ring.current() == Some(handle);
        self.ring.remove(handle)?;
        if was_current {
            self.dirty = true;
        }
        Ok(())
    }

    /// Apply one navigation event, returning the selected page
    pub fn handle(&mut self, event: NavigationEvent) -> Option<PageHandle> {
        let before = self.ring.current();
        let after = match event {
            NavigationEvent::Next => self.ring.advance(),
            NavigationEvent::Previous => self.ring.retreat(),
            NavigationEvent::First => match self.ring.head() {
                Some(head) => self.ring.select(head).ok().map(|()| head),
                None => None,
            },
            NavigationEvent::Refresh => {
                self.dirty = true;
                before
            }
        };

        if after != before {
            self.dirty = true;
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("{:?} -> {:?}", event, after);

        after
    }

    /// Drain pending input, then render
    ///
    /// Returns true if the display was redrawn.
    pub fn poll<I: InputSource>(&mut self, input: &mut I) -> Result<bool, ViewerError> {
        while let Some(event) = input.poll() {
            self.handle(event);
        }
        self.render()
    }

    /// Draw the selected page if anything changed since the last render
    ///
    /// An empty ring renders as a cleared screen. Returns true if the
    /// display was redrawn. On error the viewer stays dirty.
    pub fn render(&mut self) -> Result<bool, ViewerError> {
        if !self.dirty {
            return Ok(false);
        }
        if !self.backend.is_ready() {
            return Err(DisplayError::NotInitialized.into());
        }

        self.backend.clear()?;
        if let Some(page) = self.ring.current_page() {
            self.backend.draw_chunk(page.page_number(), page.chunk())?;
        }
        self.backend.flush()?;

        self.dirty = false;
        Ok(true)
    }

    /// Check if the display needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Force a redraw on the next render
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// The underlying ring
    pub fn ring(&self) -> &PageRing<N, C> {
        &self.ring
    }

    /// Mutable ring access; the viewer is marked dirty
    pub fn ring_mut(&mut self) -> &mut PageRing<N, C> {
        self.dirty = true;
        &mut self.ring
    }

    /// The display backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Split into ring and backend
    pub fn into_parts(self) -> (PageRing<N, C>, B) {
        (self.ring, self.backend)
    }
}
