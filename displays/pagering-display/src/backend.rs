//! Display backend trait
//!
//! Defines the interface the viewer uses to put a chunk on screen.

use core::fmt;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Display not initialized
    NotInitialized,
    /// Chunk does not fit the display's block buffer
    BufferOverflow,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::Communication => f.write_str("communication with display failed"),
            DisplayError::NotInitialized => f.write_str("display not initialized"),
            DisplayError::BufferOverflow => f.write_str("chunk does not fit display buffer"),
        }
    }
}

/// Display backend trait
///
/// Provides a hardware-agnostic sink for page chunks. Implementations decide
/// how the raw bytes map to pixels.
pub trait DisplayBackend {
    /// Clear the entire display
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw one page chunk
    ///
    /// - `page_number`: Caller-assigned number of the page being shown
    /// - `chunk`: Raw chunk bytes, exactly the ring's chunk size long
    fn draw_chunk(&mut self, page_number: u8, chunk: &[u8]) -> Result<(), DisplayError>;

    /// Flush buffered content to the display
    ///
    /// For displays with internal buffers, this sends the buffer to the hardware.
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Check if the display is ready
    fn is_ready(&self) -> bool;
}
