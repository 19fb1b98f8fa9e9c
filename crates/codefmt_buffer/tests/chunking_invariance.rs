//! Chunking invariance for the pass-through buffer.
//!
//! However writes are split and however stingy the sink is, the bytes that
//! reach the sink are exactly the bytes that were written, in order.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use codefmt_buffer::{FilterBuffer, PassThrough, Sink, SinkError};
use proptest::prelude::*;

/// Sink that cycles through per-call acceptance limits (zero included).
struct CyclingSink {
    limits: Vec<usize>,
    next: usize,
    data: Vec<u8>,
}

impl Sink for CyclingSink {
    fn write(&mut self, chars: &[u8]) -> Result<usize, SinkError> {
        let limit = self.limits[self.next % self.limits.len()];
        self.next += 1;
        let n = chars.len().min(limit);
        self.data.extend_from_slice(&chars[..n]);
        Ok(n)
    }
}

/// Write `chunks` one by one, retrying on stalls, then drain.
fn deliver(chunks: &[Vec<u8>], limits: Vec<usize>, capacity: usize) -> Vec<u8> {
    let sink = CyclingSink {
        limits,
        next: 0,
        data: Vec::new(),
    };
    let mut buf = FilterBuffer::with_capacity(sink, PassThrough, capacity, 8);
    for chunk in chunks {
        let mut rest = chunk.as_slice();
        while !rest.is_empty() {
            let n = buf.write(rest).unwrap();
            rest = &rest[n..];
        }
    }
    while !buf.pending().is_empty() {
        buf.flush().unwrap();
    }
    buf.close().unwrap();
    buf.sink().data.clone()
}

proptest! {
    #[test]
    fn delivered_bytes_equal_written_bytes(
        chunks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..40), 0..12),
        // At least one non-zero limit so the sink eventually makes progress.
        limits in prop::collection::vec(0usize..6, 0..6),
        capacity in 1usize..17,
    ) {
        let mut limits = limits;
        limits.push(1);
        let expected: Vec<u8> = chunks.concat();
        prop_assert_eq!(deliver(&chunks, limits, capacity), expected);
    }
}

#[test]
fn single_byte_sink_delivers_everything() {
    let chunks = vec![b"hello, ".to_vec(), b"world".to_vec()];
    assert_eq!(deliver(&chunks, vec![1], 4), b"hello, world");
}
