//! In-band control codes and the marker helpers that produce them.
//!
//! Formatting instructions travel inside the character stream as reserved
//! ASCII control bytes. The scanner in [`IndentFilter`](crate::IndentFilter)
//! and the helpers below share this one table.
//!
//! | Code | Byte | Effect |
//! |---|---|---|
//! | [`ControlCode::EndOfLine`] | `0x0A` | Forwarded; the next line starts fresh |
//! | [`ControlCode::Indent`] | `0x0F` | Nesting depth + 1; not forwarded |
//! | [`ControlCode::Undent`] | `0x0E` | Nesting depth - 1 (floor 0); not forwarded |

use std::fmt::{self, Write as _};

/// A formatting signal embedded in the character stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ControlCode {
    /// Line terminator (`\n`).
    EndOfLine = 0x0A,
    /// Open one level of nesting.
    Indent = 0x0F,
    /// Close one level of nesting.
    Undent = 0x0E,
}

impl ControlCode {
    /// Every control code.
    pub const ALL: [ControlCode; 3] = [Self::EndOfLine, Self::Indent, Self::Undent];

    #[inline]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn as_char(self) -> char {
        self as u8 as char
    }

    /// Classify a byte from the stream.
    #[inline]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x0A => Some(Self::EndOfLine),
            0x0F => Some(Self::Indent),
            0x0E => Some(Self::Undent),
            _ => None,
        }
    }

    /// Whether this code only adjusts nesting and never reaches the sink.
    #[inline]
    pub const fn is_nesting(self) -> bool {
        matches!(self, Self::Indent | Self::Undent)
    }
}

impl fmt::Display for ControlCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.as_char())
    }
}

/// End the current line.
pub fn eol() -> ControlCode {
    ControlCode::EndOfLine
}

/// Open one nesting level.
pub fn indent() -> ControlCode {
    ControlCode::Indent
}

/// Close one nesting level.
pub fn undent() -> ControlCode {
    ControlCode::Undent
}

/// Open a block: `open`, one level deeper, new line.
///
/// ```
/// assert_eq!(codefmt::begin('{'), "{\x0f\n");
/// ```
pub fn begin(open: char) -> String {
    let mut code = String::with_capacity(3);
    code.push(open);
    code.push(ControlCode::Indent.as_char());
    code.push(ControlCode::EndOfLine.as_char());
    code
}

/// Close a block: one level out, new line, `close`, new line.
pub fn end(close: char) -> String {
    let mut code = soft_end(close);
    code.push(ControlCode::EndOfLine.as_char());
    code
}

/// Close a block without a trailing line break, so the closer can be
/// followed on the same line (`} else {`, `});`).
pub fn soft_end(close: char) -> String {
    let mut code = String::with_capacity(4);
    code.push(ControlCode::Undent.as_char());
    code.push(ControlCode::EndOfLine.as_char());
    code.push(close);
    code
}

#[cfg(test)]
mod tests;
