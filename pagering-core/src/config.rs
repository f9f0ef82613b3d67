//! Ring and display geometry configuration
//!
//! A chunk is one character block of the screen, one byte per pixel, so the
//! chunk size must equal `block_width * block_height`. Stored as postcard
//! binary data; a small TOML subset is accepted for hand-written configs:
//!
//! ```toml
//! [ring]
//! chunk_size = 77
//!
//! [display]
//! screen_width = 128
//! screen_height = 128
//! block_width = 7
//! block_height = 11
//! height_offset = 10
//! ```

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ring::CHUNK_SIZE;

/// Maximum serialized config size (postcard binary)
#[cfg(feature = "serde")]
pub const MAX_CONFIG_SIZE: usize = 16;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Chunk size is zero
    ZeroChunkSize,
    /// Block area does not match the chunk size
    BlockSizeMismatch,
    /// Block (plus vertical offset) does not fit on the screen
    BlockExceedsScreen,
    /// Unknown or malformed section header
    InvalidSection,
    /// Value is not an integer in range
    InvalidValue,
    /// Key not valid in its section
    UnknownKey,
    /// Binary encoding or decoding failed
    Serialization,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ConfigError::ZeroChunkSize => "chunk size must be non-zero",
            ConfigError::BlockSizeMismatch => "block area does not match chunk size",
            ConfigError::BlockExceedsScreen => "block does not fit on screen",
            ConfigError::InvalidSection => "invalid section header",
            ConfigError::InvalidValue => "invalid value",
            ConfigError::UnknownKey => "unknown key",
            ConfigError::Serialization => "config serialization failed",
        };
        f.write_str(msg)
    }
}

/// Page ring and screen geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RingConfig {
    /// Bytes per page chunk
    pub chunk_size: u16,
    /// Screen width in pixels
    pub screen_width: u16,
    /// Screen height in pixels
    pub screen_height: u16,
    /// Character block width in pixels
    pub block_width: u8,
    /// Character block height in pixels
    pub block_height: u8,
    /// Rows reserved at the top of the screen
    pub height_offset: u8,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_SIZE as u16,
            screen_width: 128,
            screen_height: 128,
            block_width: 7,
            block_height: 11,
            height_offset: 10,
        }
    }
}

impl RingConfig {
    /// Check geometry consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        let block_area = self.block_width as u16 * self.block_height as u16;
        if block_area != self.chunk_size {
            return Err(ConfigError::BlockSizeMismatch);
        }
        if self.block_width as u16 > self.screen_width
            || self.block_height as u16 + self.height_offset as u16 > self.screen_height
        {
            return Err(ConfigError::BlockExceedsScreen);
        }
        Ok(())
    }

    /// Blocks that fit on one screen row
    pub fn blocks_per_row(&self) -> u16 {
        match self.block_width {
            0 => 0,
            w => self.screen_width / w as u16,
        }
    }

    /// Block rows below the reserved offset
    pub fn block_rows(&self) -> u16 {
        match self.block_height {
            0 => 0,
            h => self.screen_height.saturating_sub(self.height_offset as u16) / h as u16,
        }
    }

    /// Blocks (chunks) visible on one screen
    ///
    /// Widened to `u32`: a 1x1 block on a large screen exceeds `u16`.
    pub fn blocks_per_screen(&self) -> u32 {
        self.blocks_per_row() as u32 * self.block_rows() as u32
    }

    /// Serialize into `buffer`, returning the used part
    #[cfg(feature = "serde")]
    pub fn to_bytes<'a>(&self, buffer: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buffer).map_err(|_| ConfigError::Serialization)
    }

    /// Deserialize and validate
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Serialization)?;
        config.validate()?;
        Ok(config)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Ring,
    Display,
}

/// Parse a TOML subset into a validated `RingConfig`
///
/// Supports `[ring]` and `[display]` sections, `key = integer` pairs and
/// `#` comments. Missing keys keep their defaults.
pub fn parse_config(input: &str) -> Result<RingConfig, ConfigError> {
    let mut config = RingConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        // Strip trailing comments
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = match line[1..line.len() - 1].trim() {
                "ring" => Section::Ring,
                "display" => Section::Display,
                _ => return Err(ConfigError::InvalidSection),
            };
            continue;
        }

        let (key, value) = line.split_once('=').ok_or(ConfigError::InvalidValue)?;
        let key = key.trim();
        let value = value.trim();

        match (section, key) {
            (Section::Ring, "chunk_size") => config.chunk_size = parse_int(value)?,
            (Section::Display, "screen_width") => config.screen_width = parse_int(value)?,
            (Section::Display, "screen_height") => config.screen_height = parse_int(value)?,
            (Section::Display, "block_width") => config.block_width = parse_int(value)?,
            (Section::Display, "block_height") => config.block_height = parse_int(value)?,
            (Section::Display, "height_offset") => config.height_offset = parse_int(value)?,
            _ => return Err(ConfigError::UnknownKey),
        }
    }

    config.validate()?;
    Ok(config)
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ConfigError> {
    // TOML allows underscores as digit separators
    let mut digits: heapless::String<8> = heapless::String::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits.push(c).map_err(|_| ConfigError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ConfigError::InvalidValue)
}
