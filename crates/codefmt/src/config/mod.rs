//! Formatting stream configuration.

use thiserror::Error;

/// Spaces emitted per nesting level.
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Output buffer capacity of a formatting stream.
///
/// Small on purpose: generated code is written in short fragments and a
/// small buffer keeps output close to the producer.
pub const DEFAULT_WRITE_CAPACITY: usize = 64;

/// Input buffer capacity of a formatting stream. The read side is inert.
pub const DEFAULT_READ_CAPACITY: usize = 8;

/// Configuration for a [`FormattingStream`](crate::FormattingStream).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FormatConfig {
    /// Spaces per nesting level. Must be positive.
    pub indent_width: usize,
    /// Output buffer capacity in bytes. Must be positive.
    pub write_capacity: usize,
    /// Input buffer capacity in bytes. Must be positive.
    pub read_capacity: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            write_capacity: DEFAULT_WRITE_CAPACITY,
            read_capacity: DEFAULT_READ_CAPACITY,
        }
    }
}

impl FormatConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }

    #[must_use]
    pub fn with_write_capacity(mut self, write_capacity: usize) -> Self {
        self.write_capacity = write_capacity;
        self
    }

    #[must_use]
    pub fn with_read_capacity(mut self, read_capacity: usize) -> Self {
        self.read_capacity = read_capacity;
        self
    }

    /// Check every field is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.indent_width == 0 {
            return Err(ConfigError::ZeroIndentWidth);
        }
        if self.write_capacity == 0 {
            return Err(ConfigError::ZeroWriteCapacity);
        }
        if self.read_capacity == 0 {
            return Err(ConfigError::ZeroReadCapacity);
        }
        Ok(())
    }
}

/// Invalid [`FormatConfig`] field.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("indent width must be at least 1")]
    ZeroIndentWidth,
    #[error("write buffer capacity must be at least 1 byte")]
    ZeroWriteCapacity,
    #[error("read buffer capacity must be at least 1 byte")]
    ZeroReadCapacity,
}

#[cfg(test)]
mod tests;
