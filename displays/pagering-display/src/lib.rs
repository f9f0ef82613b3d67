//! Display boundary for the page ring
//!
//! This crate provides:
//! - `DisplayBackend` trait for whatever driver blits chunks (LCD, OLED, ...)
//! - `InputSource` trait and `NavigationEvent` enum for page stepping
//! - `PageViewer`, which owns a ring and a backend and redraws the selected
//!   page when navigation changes it
//!
//! # Architecture
//!
//! The viewer never interprets chunk bytes. Turning a chunk into pixels is
//! the backend's job; the viewer only decides *which* chunk is on screen.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod backend;
pub mod input;
pub mod viewer;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use input::{InputSource, NavigationEvent};
pub use viewer::{PageViewer, ViewerError};
