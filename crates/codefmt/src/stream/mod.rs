//! Formatting stream facade.
//!
//! [`FormattingStream`] pairs one [`IndentFilter`] with its output buffer and
//! presents an append-only writing interface: literal text, control codes
//! and block helpers, chainable with `?`.
//!
//! ```
//! use codefmt::FormattingStream;
//!
//! let mut out = Vec::new();
//! let mut stream = FormattingStream::new(&mut out);
//! stream
//!     .text("fn main() ")?
//!     .begin_block('{')?
//!     .text("run();")?
//!     .end_block('}')?;
//! stream.finish()?;
//! assert_eq!(out, b"fn main() {\n    run();\n}\n");
//! # Ok::<(), codefmt::FormatError>(())
//! ```
//!
//! # Teardown
//!
//! Dropping the stream flushes best-effort; a failure at that point is
//! logged and the undelivered output is lost. Use
//! [`finish`](FormattingStream::finish) to observe it.

use std::io;

use codefmt_buffer::{FilterBuffer, FilterError, Sink};
use thiserror::Error;

use crate::config::{ConfigError, FormatConfig};
use crate::control::{self, ControlCode};
use crate::indent::IndentFilter;

/// Error from a formatting stream operation.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Output could not be delivered to the sink.
    #[error(transparent)]
    Filter(#[from] FilterError),
    /// The stream configuration is out of range.
    #[error("invalid format configuration: {0}")]
    Config(#[from] ConfigError),
}

impl From<FormatError> for io::Error {
    fn from(err: FormatError) -> Self {
        match err {
            FormatError::Filter(err) => err.into(),
            FormatError::Config(err) => io::Error::new(io::ErrorKind::InvalidInput, err),
        }
    }
}

/// Indenting text stream over a sink.
pub struct FormattingStream<S: Sink> {
    buffer: FilterBuffer<S, IndentFilter>,
}

impl<S: Sink> FormattingStream<S> {
    /// Create a stream with the default configuration.
    pub fn new(sink: S) -> Self {
        Self::from_valid_config(sink, FormatConfig::default())
    }

    /// Create a stream with `config`, rejecting out-of-range values.
    pub fn with_config(sink: S, config: FormatConfig) -> Result<Self, FormatError> {
        config.validate()?;
        Ok(Self::from_valid_config(sink, config))
    }

    fn from_valid_config(sink: S, config: FormatConfig) -> Self {
        tracing::trace!(?config, "creating formatting stream");
        let filter = IndentFilter::new(config.indent_width);
        Self {
            buffer: FilterBuffer::with_capacity(
                sink,
                filter,
                config.write_capacity,
                config.read_capacity,
            ),
        }
    }

    /// Write literal text. Embedded control characters take effect.
    pub fn text(&mut self, text: &str) -> Result<&mut Self, FormatError> {
        self.buffer.write_all(text.as_bytes())?;
        Ok(self)
    }

    /// Write a control code into the stream.
    pub fn control(&mut self, code: ControlCode) -> Result<&mut Self, FormatError> {
        self.buffer.write_all(&[code.as_byte()])?;
        Ok(self)
    }

    /// End the current line.
    pub fn eol(&mut self) -> Result<&mut Self, FormatError> {
        self.control(ControlCode::EndOfLine)
    }

    /// Open a nesting level at this point in the stream.
    pub fn indent_marker(&mut self) -> Result<&mut Self, FormatError> {
        self.control(ControlCode::Indent)
    }

    /// Close a nesting level at this point in the stream.
    pub fn undent_marker(&mut self) -> Result<&mut Self, FormatError> {
        self.control(ControlCode::Undent)
    }

    /// Write `open`, open a nesting level and end the line.
    pub fn begin_block(&mut self, open: char) -> Result<&mut Self, FormatError> {
        self.text(&control::begin(open))
    }

    /// Close a nesting level and write `close` on its own line.
    pub fn end_block(&mut self, close: char) -> Result<&mut Self, FormatError> {
        self.text(&control::end(close))
    }

    /// Like [`end_block`](Self::end_block) but leave the line open after
    /// `close`.
    pub fn soft_end_block(&mut self, close: char) -> Result<&mut Self, FormatError> {
        self.text(&control::soft_end(close))
    }

    /// Open a nesting level on the filter directly.
    ///
    /// Takes effect immediately, including for text that is still buffered
    /// and not yet filtered. Use [`indent_marker`](Self::indent_marker) to
    /// change depth at an exact point in the stream.
    pub fn indent(&mut self) -> &mut Self {
        self.buffer.filter_mut().indent();
        self
    }

    /// Close a nesting level on the filter directly. Does nothing at depth 0.
    ///
    /// Same timing caveat as [`indent`](Self::indent).
    pub fn undent(&mut self) -> &mut Self {
        self.buffer.filter_mut().undent();
        self
    }

    /// Current depth as seen by the filter.
    pub fn indent_level(&self) -> usize {
        self.buffer.filter().indent_level()
    }

    pub fn filter(&self) -> &IndentFilter {
        self.buffer.filter()
    }

    pub fn sink(&self) -> &S {
        self.buffer.sink()
    }

    /// Written bytes not yet filtered into the sink.
    pub fn pending(&self) -> &[u8] {
        self.buffer.pending()
    }

    /// Deliver everything written so far, including owed indentation.
    pub fn flush(&mut self) -> Result<(), FormatError> {
        self.buffer.drain()?;
        Ok(())
    }

    /// Deliver everything and close the stream, reporting any failure that
    /// dropping the stream would swallow.
    pub fn finish(mut self) -> Result<(), FormatError> {
        self.buffer.close()?;
        Ok(())
    }
}

impl<S: Sink> io::Write for FormattingStream<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.buffer.write(buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(self.buffer.drain()?)
    }
}
