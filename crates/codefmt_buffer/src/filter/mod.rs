//! Write filter contract.
//!
//! A [`WriteFilter`] is the transform strategy plugged into a
//! [`FilterBuffer`](crate::FilterBuffer). The buffer owns the bytes and the
//! compaction bookkeeping; the filter decides what actually reaches the sink.

use crate::sink::{Sink, SinkError};

/// Transform applied to pending output on its way to the sink.
///
/// # Contract
///
/// `filter_write` receives the full pending buffer and returns how many of
/// its leading bytes were consumed, in `0..=pending.len()`. Consumed bytes are
/// dropped from the buffer; the rest are kept (compacted to the front) and
/// offered again on the next flush, so a filter must never report a byte as
/// consumed unless its effect has reached the sink or been folded into the
/// filter's own state.
///
/// Returning `Err` means nothing was consumed. A filter that hits a sink
/// failure after making progress should report the progress instead; the
/// failure resurfaces on the next call.
pub trait WriteFilter {
    /// Filter `pending` into `sink`, returning the consumed count.
    fn filter_write(&mut self, pending: &[u8], sink: &mut dyn Sink) -> Result<usize, SinkError>;

    /// Fill `dest` from the sink, returning how many bytes were produced.
    ///
    /// Input is never transformed by default.
    fn filter_read(&mut self, dest: &mut [u8], sink: &mut dyn Sink) -> Result<usize, SinkError> {
        sink.read(dest)
    }
}

/// Identity filter: hands the pending bytes to the sink in one write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassThrough;

impl WriteFilter for PassThrough {
    fn filter_write(&mut self, pending: &[u8], sink: &mut dyn Sink) -> Result<usize, SinkError> {
        if pending.is_empty() {
            return Ok(0);
        }
        sink.write(pending)
    }
}
