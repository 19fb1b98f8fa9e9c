//! Indentation filter.
//!
//! [`IndentFilter`] is a [`WriteFilter`] that turns a stream of content
//! interleaved with [`ControlCode`]s into plain, indented text:
//!
//! - `Indent` / `Undent` adjust the nesting depth and are swallowed.
//! - Whitespace at the start of a line is dropped (the end-of-line byte
//!   included, so blank lines collapse).
//! - Before the first other byte of a line, `depth * width` spaces are
//!   written.
//! - Everything else is forwarded unchanged.
//!
//! # Incremental operation
//!
//! The filter is called once per buffer flush and may see a line split
//! across any number of calls. All state needed to resume lives in the
//! filter. When the sink takes only part of a line's indentation, the rest
//! is remembered as owed and paid before the triggering byte is forwarded on
//! a later call. The triggering byte is reported as unconsumed until then,
//! so the buffer keeps it.

use codefmt_buffer::{Sink, SinkError, WriteFilter};

use crate::config::DEFAULT_INDENT_WIDTH;
use crate::control::ControlCode;

const EOL: u8 = ControlCode::EndOfLine.as_byte();

/// Spaces written per sink call when paying indentation.
const SPACES: [u8; 64] = [b' '; 64];

/// C-locale `isspace`: space, `\t`, `\n`, `\v`, `\f`, `\r`.
pub fn is_c_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Write filter that manages indentation from in-band control codes.
#[derive(Clone, Debug)]
pub struct IndentFilter {
    indent_level: usize,
    indent_width: usize,
    at_start_of_line: bool,
    /// Indentation still owed for the current line. `Some(0)` means the
    /// indentation is complete but the byte that triggered it has not been
    /// forwarded yet.
    owed: Option<usize>,
    is_whitespace: fn(u8) -> bool,
}

impl Default for IndentFilter {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT_WIDTH)
    }
}

impl IndentFilter {
    /// Create a filter at depth 0, at the start of a line.
    ///
    /// An `indent_width` of zero is raised to one.
    pub fn new(indent_width: usize) -> Self {
        Self {
            indent_level: 0,
            indent_width: indent_width.max(1),
            at_start_of_line: true,
            owed: None,
            is_whitespace: is_c_space,
        }
    }

    /// Replace the leading-whitespace classifier.
    #[must_use]
    pub fn with_whitespace(mut self, is_whitespace: fn(u8) -> bool) -> Self {
        self.is_whitespace = is_whitespace;
        self
    }

    /// Open one nesting level.
    pub fn indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Close one nesting level. Does nothing at depth 0.
    pub fn undent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    pub fn indent_width(&self) -> usize {
        self.indent_width
    }

    pub fn at_start_of_line(&self) -> bool {
        self.at_start_of_line
    }

    /// Spaces computed for the current line but not yet accepted by the sink.
    pub fn owed_spaces(&self) -> usize {
        self.owed.unwrap_or(0)
    }

    /// Write owed indentation. `Ok(false)` if the sink stopped accepting.
    fn pay_indentation(&mut self, sink: &mut dyn Sink) -> Result<bool, SinkError> {
        while let Some(owed) = self.owed.filter(|&n| n > 0) {
            let chunk = owed.min(SPACES.len());
            let accepted = sink.write(&SPACES[..chunk])?.min(chunk);
            if accepted == 0 {
                tracing::debug!(owed, "short indentation write");
                return Ok(false);
            }
            self.owed = Some(owed - accepted);
        }
        Ok(true)
    }
}

/// End of the content run starting at `start`: up to and including the next
/// end-of-line, stopping before any nesting code.
fn run_end(pending: &[u8], start: usize) -> usize {
    let mut end = start;
    while end < pending.len() {
        let byte = pending[end];
        if ControlCode::from_byte(byte).is_some_and(ControlCode::is_nesting) {
            break;
        }
        end += 1;
        if byte == EOL {
            break;
        }
    }
    end
}

/// Report progress made before a sink failure, or the failure itself when
/// nothing was consumed. The failure resurfaces on the next pass.
fn progress_or_error(consumed: usize, err: SinkError) -> Result<usize, SinkError> {
    if consumed == 0 {
        return Err(err);
    }
    tracing::debug!(consumed, error = %err, "sink failed mid-pass, keeping progress");
    Ok(consumed)
}

impl WriteFilter for IndentFilter {
    fn filter_write(&mut self, pending: &[u8], sink: &mut dyn Sink) -> Result<usize, SinkError> {
        let mut idx = 0;
        while idx < pending.len() {
            let byte = pending[idx];
            match ControlCode::from_byte(byte) {
                Some(ControlCode::Indent) => {
                    self.indent();
                    idx += 1;
                    continue;
                }
                Some(ControlCode::Undent) => {
                    self.undent();
                    idx += 1;
                    continue;
                }
                Some(ControlCode::EndOfLine) | None => {}
            }

            if self.at_start_of_line {
                if self.owed.is_none() {
                    if (self.is_whitespace)(byte) {
                        idx += 1;
                        continue;
                    }
                    self.owed = Some(self.indent_level * self.indent_width);
                }
                match self.pay_indentation(sink) {
                    Ok(true) => {}
                    Ok(false) => return Ok(idx),
                    Err(err) => return progress_or_error(idx, err),
                }
            }

            let end = run_end(pending, idx);
            match sink.write(&pending[idx..end]) {
                Ok(0) => {
                    tracing::debug!(consumed = idx, "sink stalled on content");
                    return Ok(idx);
                }
                Ok(accepted) => {
                    idx += accepted.min(end - idx);
                    self.owed = None;
                    self.at_start_of_line = pending[idx - 1] == EOL;
                }
                Err(err) => return progress_or_error(idx, err),
            }
        }
        Ok(pending.len())
    }
}
