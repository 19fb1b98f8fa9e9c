//! Residual-safe filter buffer.
//!
//! Standalone buffering layer for filter chains. A producer writes bytes into
//! a [`FilterBuffer`]; on flush the buffer hands its pending bytes to a
//! [`WriteFilter`], which forwards (and possibly transforms) them into a
//! downstream [`Sink`].
//!
//! # Design
//!
//! The buffer and the transform are separate types composed by generics:
//!
//! - [`FilterBuffer`] owns the bytes, the compaction bookkeeping and the
//!   teardown flush.
//! - [`WriteFilter`] decides what reaches the sink and reports how much of the
//!   pending buffer it consumed.
//! - [`Sink`] is the destination, with partial-write semantics.
//!
//! Short writes are normal operation: unconsumed bytes stay buffered and are
//! retried on the next flush. Only a sink error is a failure.
//!
//! # Usage
//!
//! ```
//! use codefmt_buffer::{FilterBuffer, PassThrough};
//!
//! let mut out = Vec::new();
//! {
//!     let mut buf = FilterBuffer::new(&mut out, PassThrough);
//!     buf.write_all(b"hello").unwrap();
//!     buf.close().unwrap();
//! }
//! assert_eq!(out, b"hello");
//! ```

mod buffer;
mod filter;
mod sink;

pub use buffer::{FilterBuffer, FilterError, DEFAULT_READ_CAPACITY, DEFAULT_WRITE_CAPACITY};
pub use filter::{PassThrough, WriteFilter};
pub use sink::{IoSink, Sink, SinkError};
