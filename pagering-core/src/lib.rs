//! Fixed-capacity page ring for small embedded displays
//!
//! This crate contains the data structure that orders display pages:
//!
//! - `PageRing`: circular doubly-linked list of fixed-size byte chunks,
//!   stored in a slot arena with O(1) append, remove and navigation
//! - `PageHandle` / `Page`: generation-checked handles and read-only views
//! - `SharedPageRing`: interrupt-safe wrapper for navigation from an ISR
//! - Ring configuration with a small TOML subset parser
//!
//! Nothing here allocates from a heap. Every chunk buffer lives inside the
//! ring's fixed arena.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod config;
pub mod error;
pub mod page;
pub mod ring;
pub mod shared;

pub use config::{parse_config, ConfigError, RingConfig};
pub use error::RingError;
pub use page::{Page, PageHandle};
pub use ring::{PageRing, Pages, RingState, CHUNK_SIZE};
pub use shared::{IrqPageRing, SharedPageRing};
