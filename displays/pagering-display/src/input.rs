//! Navigation input
//!
//! Encoder and button events reduced to what the page viewer understands.

/// Page navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavigationEvent {
    /// Show the next page (wraps to the first)
    Next,
    /// Show the previous page (wraps to the last)
    Previous,
    /// Jump back to the first page
    First,
    /// Redraw the current page
    Refresh,
}

// Wire format values sent by the encoder front panel
const EVENT_ENCODER_CW: u8 = 0x01;
const EVENT_ENCODER_CCW: u8 = 0x02;
const EVENT_ENCODER_CLICK: u8 = 0x10;
const EVENT_ENCODER_LONG_PRESS: u8 = 0x11;

impl NavigationEvent {
    /// Map an encoder wire byte to a navigation event
    ///
    /// Rotation steps pages, a click redraws and a long press returns to the
    /// first page. Other bytes (e.g. button release) are ignored.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            EVENT_ENCODER_CW => Some(NavigationEvent::Next),
            EVENT_ENCODER_CCW => Some(NavigationEvent::Previous),
            EVENT_ENCODER_CLICK => Some(NavigationEvent::Refresh),
            EVENT_ENCODER_LONG_PRESS => Some(NavigationEvent::First),
            _ => None,
        }
    }

    /// Returns true if this event moves the selection
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            NavigationEvent::Next | NavigationEvent::Previous | NavigationEvent::First
        )
    }
}

/// Source of navigation events (encoder, buttons, serial link)
pub trait InputSource {
    /// Take the next pending event, if any
    fn poll(&mut self) -> Option<NavigationEvent>;
}
