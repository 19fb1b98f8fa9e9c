//! Indenting output stream for code generators.
//!
//! Generated code is written as a flat character stream with indentation
//! instructions embedded in it. The stream strips whatever leading whitespace
//! the producer wrote and emits indentation that matches the nesting depth.
//!
//! # Architecture
//!
//! ```text
//! caller ──▶ FormattingStream ──▶ FilterBuffer ──▶ IndentFilter ──▶ Sink
//!            (text, markers)      (buffering,      (depth, leading
//!                                  short writes)    whitespace)
//! ```
//!
//! # Modules
//!
//! - [`control`]: the in-band [`ControlCode`] protocol and marker helpers
//! - [`indent`]: the [`IndentFilter`] write filter
//! - [`config`]: [`FormatConfig`] and its validation
//! - [`stream`]: the [`FormattingStream`] facade
//!
//! # Example
//!
//! ```
//! use std::io::Write;
//!
//! let mut out = Vec::new();
//! {
//!     let mut stream = codefmt::FormattingStream::new(&mut out);
//!     write!(stream, "loop {}", codefmt::begin('{')).unwrap();
//!     write!(stream, "   tick();{}", codefmt::end('}')).unwrap();
//! }
//! assert_eq!(out, b"loop {\n    tick();\n}\n");
//! ```

use std::sync::Once;

pub mod config;
pub mod control;
pub mod indent;
pub mod stream;

pub use codefmt_buffer::{FilterBuffer, FilterError, IoSink, Sink, SinkError, WriteFilter};
pub use config::{ConfigError, FormatConfig, DEFAULT_INDENT_WIDTH};
pub use control::{begin, end, eol, indent, soft_end, undent, ControlCode};
pub use indent::{is_c_space, IndentFilter};
pub use stream::{FormatError, FormattingStream};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for the formatting stack.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=codefmt=debug` or `RUST_LOG=codefmt_buffer=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
