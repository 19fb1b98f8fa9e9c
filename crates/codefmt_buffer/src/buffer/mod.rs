//! Residual-safe output buffer.
//!
//! [`FilterBuffer`] accumulates outgoing bytes in a fixed-capacity buffer and
//! pushes them through a [`WriteFilter`] into a [`Sink`] on flush. The sink
//! may accept only part of what it is offered; whatever the filter did not
//! consume stays in the buffer, moved to offset 0, and is offered again on the
//! next flush.
//!
//! # Layout
//!
//! ```text
//! output: [undelivered..., free...]
//!          ^               ^
//!          0               len (next append position)
//! ```
//!
//! After every flush the buffer holds either nothing or exactly the
//! undelivered suffix of what it held before. No byte is delivered twice and
//! no byte is dropped.
//!
//! # Teardown
//!
//! Dropping the buffer drains it best-effort. A failure at that point cannot
//! be reported and the undelivered bytes are lost (logged at `warn`). Call
//! [`FilterBuffer::close`] to observe the failure instead.

use std::io;

use thiserror::Error;

use crate::filter::WriteFilter;
use crate::sink::{Sink, SinkError};

/// Default output buffer capacity in bytes.
pub const DEFAULT_WRITE_CAPACITY: usize = 4096;

/// Default input buffer capacity in bytes.
pub const DEFAULT_READ_CAPACITY: usize = 4096;

/// Error from a buffer operation.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The sink failed; the buffer is unchanged.
    #[error(transparent)]
    Sink(#[from] SinkError),
    /// The sink accepted nothing while output was still pending.
    #[error("sink stalled with {pending} bytes undelivered")]
    Stalled { pending: usize },
}

impl From<FilterError> for io::Error {
    fn from(err: FilterError) -> Self {
        match err {
            FilterError::Sink(err) => err.into(),
            FilterError::Stalled { .. } => io::Error::new(io::ErrorKind::WriteZero, err),
        }
    }
}

/// Fixed-capacity output buffer in front of a sink, with a pluggable filter.
pub struct FilterBuffer<S: Sink, F: WriteFilter> {
    sink: S,
    filter: F,
    /// Pending output: `output[..len]` is not yet delivered.
    output: Box<[u8]>,
    len: usize,
    /// Pass-through input: `input[pos..end]` is unread.
    input: Box<[u8]>,
    pos: usize,
    end: usize,
    /// Set once `close` has run; suppresses the drain on drop.
    closed: bool,
}

impl<S: Sink, F: WriteFilter> FilterBuffer<S, F> {
    /// Create a buffer with the default capacities.
    pub fn new(sink: S, filter: F) -> Self {
        Self::with_capacity(sink, filter, DEFAULT_WRITE_CAPACITY, DEFAULT_READ_CAPACITY)
    }

    /// Create a buffer with explicit capacities.
    ///
    /// Capacities of zero are raised to one byte.
    pub fn with_capacity(sink: S, filter: F, write_capacity: usize, read_capacity: usize) -> Self {
        Self {
            sink,
            filter,
            output: vec![0u8; write_capacity.max(1)].into_boxed_slice(),
            len: 0,
            input: vec![0u8; read_capacity.max(1)].into_boxed_slice(),
            pos: 0,
            end: 0,
            closed: false,
        }
    }

    /// Append `chars`, flushing whenever the buffer fills up.
    ///
    /// Returns how many bytes were accepted. Fewer than `chars.len()` means a
    /// forced flush freed no room because the sink accepted nothing; `Ok(0)`
    /// for a non-empty `chars` is the "end of stream on write" condition.
    ///
    /// A sink failure is returned as an error only when no byte of `chars`
    /// was accepted yet. Otherwise the accepted count is returned and the
    /// failure resurfaces on the next call.
    pub fn write(&mut self, chars: &[u8]) -> Result<usize, FilterError> {
        let mut written = 0;
        while written < chars.len() {
            if self.len == self.output.len() {
                if let Err(err) = self.flush() {
                    if written == 0 {
                        return Err(err);
                    }
                    break;
                }
                if self.len == self.output.len() {
                    tracing::debug!(accepted = written, "output buffer full and sink stalled");
                    break;
                }
            }
            let take = (self.output.len() - self.len).min(chars.len() - written);
            self.output[self.len..self.len + take].copy_from_slice(&chars[written..written + take]);
            self.len += take;
            written += take;
        }
        Ok(written)
    }

    /// Append all of `chars`, failing if the sink stalls before it fits.
    pub fn write_all(&mut self, mut chars: &[u8]) -> Result<(), FilterError> {
        while !chars.is_empty() {
            match self.write(chars)? {
                0 => return Err(FilterError::Stalled { pending: self.len }),
                n => chars = &chars[n..],
            }
        }
        Ok(())
    }

    /// Run one filter pass over the pending output.
    ///
    /// Returns how many pending bytes the filter consumed. Unconsumed bytes
    /// are moved to the front of the buffer. On error the buffer is left
    /// untouched.
    ///
    /// The filter runs even when nothing is pending so it can finish work it
    /// deferred from an earlier short write. Flushing twice with no write in
    /// between is a no-op the second time.
    pub fn flush(&mut self) -> Result<usize, FilterError> {
        let pending = self.len;
        let consumed = match self.filter.filter_write(&self.output[..pending], &mut self.sink) {
            Ok(consumed) => consumed,
            Err(err) => {
                tracing::debug!(pending, error = %err, "filter pass failed");
                return Err(err.into());
            }
        };
        debug_assert!(consumed <= pending, "filter consumed more than was pending");
        let consumed = consumed.min(pending);

        if consumed == pending {
            self.len = 0;
        } else {
            self.output.copy_within(consumed..pending, 0);
            self.len = pending - consumed;
            tracing::debug!(pending, consumed, "short write, compacted remainder");
        }
        tracing::trace!(pending, consumed, "flushed output buffer");
        Ok(consumed)
    }

    /// Flush until nothing is pending, then flush the sink itself.
    ///
    /// Fails with [`FilterError::Stalled`] when a pass makes no progress.
    pub fn drain(&mut self) -> Result<(), FilterError> {
        loop {
            let consumed = self.flush()?;
            if self.len == 0 {
                break;
            }
            if consumed == 0 {
                return Err(FilterError::Stalled { pending: self.len });
            }
        }
        self.sink.flush()?;
        Ok(())
    }

    /// Drain and mark the buffer closed so dropping it does nothing further.
    ///
    /// The buffer is marked closed even when draining fails; the error is the
    /// caller's only notice that output was lost.
    pub fn close(&mut self) -> Result<(), FilterError> {
        let result = self.drain();
        self.closed = true;
        result
    }

    /// Read through the filter's read path into `dest`.
    ///
    /// Serves buffered input first and refills from the sink only when the
    /// input buffer is exhausted. `Ok(0)` means end of input.
    pub fn read(&mut self, dest: &mut [u8]) -> Result<usize, FilterError> {
        if dest.is_empty() {
            return Ok(0);
        }
        if self.pos == self.end {
            let produced = self.filter.filter_read(&mut self.input, &mut self.sink)?;
            self.pos = 0;
            self.end = produced.min(self.input.len());
            if self.end == 0 {
                return Ok(0);
            }
        }
        let n = (self.end - self.pos).min(dest.len());
        dest[..n].copy_from_slice(&self.input[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }

    /// Bytes written but not yet delivered.
    pub fn pending(&self) -> &[u8] {
        &self.output[..self.len]
    }

    /// Output buffer capacity.
    pub fn capacity(&self) -> usize {
        self.output.len()
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut F {
        &mut self.filter
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Whether [`close`](Self::close) has run.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<S: Sink, F: WriteFilter> Drop for FilterBuffer<S, F> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(err) = self.drain() {
            tracing::warn!(
                error = %err,
                pending = self.len,
                "dropping filter buffer with undelivered output"
            );
        }
    }
}

impl<S: Sink, F: WriteFilter> io::Write for FilterBuffer<S, F> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(FilterBuffer::write(self, buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(self.drain()?)
    }
}

impl<S: Sink, F: WriteFilter> io::Read for FilterBuffer<S, F> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(FilterBuffer::read(self, buf)?)
    }
}
