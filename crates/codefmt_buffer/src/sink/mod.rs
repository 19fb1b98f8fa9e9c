//! Downstream sink capability.
//!
//! A [`Sink`] is the final destination of a filter chain: a console, a file,
//! a socket or an in-memory vector. Sinks follow partial-write semantics,
//! so a write may accept fewer bytes than it was offered. Accepting fewer
//! bytes is backpressure, not failure; only an `Err` is fatal.

use std::io;

use thiserror::Error;

/// Error raised by a sink that cannot accept any more output.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The sink refused the write outright.
    #[error("sink rejected write")]
    Rejected,
    /// The underlying I/O resource failed.
    #[error("sink I/O failure: {0}")]
    Io(#[from] io::Error),
}

impl From<SinkError> for io::Error {
    fn from(err: SinkError) -> Self {
        match err {
            SinkError::Io(err) => err,
            SinkError::Rejected => io::Error::other(SinkError::Rejected),
        }
    }
}

/// A byte destination with partial-write semantics.
///
/// `write` returns how many leading bytes of `chars` were accepted, anywhere
/// in `0..=chars.len()`. A return of `Ok(0)` means "not now": the caller keeps
/// the bytes and retries later.
pub trait Sink {
    /// Offer `chars` to the sink.
    fn write(&mut self, chars: &[u8]) -> Result<usize, SinkError>;

    /// Read up to `dest.len()` bytes from the sink.
    ///
    /// Write-only sinks report end of input.
    fn read(&mut self, _dest: &mut [u8]) -> Result<usize, SinkError> {
        Ok(0)
    }

    /// Push anything the sink itself buffers to its final destination.
    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    #[inline]
    fn write(&mut self, chars: &[u8]) -> Result<usize, SinkError> {
        (**self).write(chars)
    }

    #[inline]
    fn read(&mut self, dest: &mut [u8]) -> Result<usize, SinkError> {
        (**self).read(dest)
    }

    #[inline]
    fn flush(&mut self) -> Result<(), SinkError> {
        (**self).flush()
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    #[inline]
    fn write(&mut self, chars: &[u8]) -> Result<usize, SinkError> {
        (**self).write(chars)
    }

    #[inline]
    fn read(&mut self, dest: &mut [u8]) -> Result<usize, SinkError> {
        (**self).read(dest)
    }

    #[inline]
    fn flush(&mut self) -> Result<(), SinkError> {
        (**self).flush()
    }
}

/// In-memory sink. Always accepts everything.
impl Sink for Vec<u8> {
    fn write(&mut self, chars: &[u8]) -> Result<usize, SinkError> {
        self.extend_from_slice(chars);
        Ok(chars.len())
    }
}

/// Adapter exposing any [`io::Write`] as a [`Sink`].
///
/// `WouldBlock` becomes a zero-length acceptance so non-blocking writers
/// exercise the short-write path instead of failing. `Interrupted` is retried.
/// Every other error is fatal.
#[derive(Debug)]
pub struct IoSink<W> {
    inner: W,
}

impl<W: io::Write> IoSink<W> {
    /// Wrap a writer.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Borrow the wrapped writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Unwrap, returning the writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> Sink for IoSink<W> {
    fn write(&mut self, chars: &[u8]) -> Result<usize, SinkError> {
        loop {
            match self.inner.write(chars) {
                Ok(n) => return Ok(n),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) if err.kind() == io::ErrorKind::WouldBlock => return Ok(0),
                Err(err) => return Err(SinkError::Io(err)),
            }
        }
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.inner.flush().map_err(SinkError::Io)
    }
}
