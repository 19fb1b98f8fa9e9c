//! Property-based tests for delivery under backpressure.
//!
//! These tests generate random documents mixing content, whitespace and
//! control codes, then verify that a formatting stream with a tiny buffer
//! over a stingy sink delivers exactly what a single unbuffered filter pass
//! produces: nothing dropped, nothing duplicated, indentation intact.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use codefmt::{
    ControlCode, FormatConfig, FormattingStream, IndentFilter, Sink, SinkError, WriteFilter,
};
use pretty_assertions::assert_eq;
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

/// Output of one unbuffered pass over the whole document.
fn reference(document: &[u8], width: usize) -> Vec<u8> {
    let mut filter = IndentFilter::new(width);
    let mut out = Vec::new();
    let consumed = filter.filter_write(document, &mut out).unwrap();
    assert_eq!(consumed, document.len());
    out
}

/// Output of a buffered stream over a cycling sink.
fn buffered(document: &[u8], width: usize, capacity: usize, limits: Vec<usize>) -> Vec<u8> {
    let sink = CyclingSink {
        limits,
        next: 0,
        data: Vec::new(),
    };
    let config = FormatConfig::new()
        .with_indent_width(width)
        .with_write_capacity(capacity);
    let mut stream = FormattingStream::with_config(sink, config).unwrap();

    let mut rest = document;
    while !rest.is_empty() {
        let n = std::io::Write::write(&mut stream, rest).unwrap();
        rest = &rest[n..];
    }
    while !stream.pending().is_empty() {
        // Stalls are retried; the cycle always reaches a non-zero limit.
        let _ = stream.flush();
    }
    stream.sink().data.clone()
}

fn token_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        3 => prop::string::string_regex("[a-z(){};]{1,6}")
            .expect("valid regex")
            .prop_map(String::into_bytes),
        2 => Just(b" ".to_vec()),
        1 => Just(b"\t".to_vec()),
        2 => Just(vec![ControlCode::EndOfLine.as_byte()]),
        1 => Just(vec![ControlCode::Indent.as_byte()]),
        1 => Just(vec![ControlCode::Undent.as_byte()]),
    ]
}

fn document_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(token_strategy(), 0..60).prop_map(|tokens| tokens.concat())
}

proptest! {
    #[test]
    fn buffered_output_matches_single_pass(
        document in document_strategy(),
        width in 1usize..6,
        capacity in 1usize..12,
        limits in prop::collection::vec(0usize..5, 0..5),
    ) {
        let mut limits = limits;
        limits.push(1);
        prop_assert_eq!(
            buffered(&document, width, capacity, limits),
            reference(&document, width)
        );
    }

    #[test]
    fn output_never_contains_nesting_codes(document in document_strategy()) {
        let out = reference(&document, 4);
        prop_assert!(!out.contains(&ControlCode::Indent.as_byte()));
        prop_assert!(!out.contains(&ControlCode::Undent.as_byte()));
    }

    #[test]
    fn lines_never_start_with_literal_whitespace_beyond_indentation(
        document in document_strategy(),
    ) {
        let out = reference(&document, 1);
        for line in out.split(|&b| b == b'\n') {
            let leading = line.iter().take_while(|&&b| b == b' ').count();
            // Whatever follows the indentation is content, never a tab.
            prop_assert!(!matches!(line.get(leading), Some(b'\t')));
        }
    }
}

#[test]
fn alternating_stall_sink() {
    let document = format!(
        "impl S {}fn f() {}body();{}{}",
        codefmt::begin('{'),
        codefmt::begin('{'),
        codefmt::end('}'),
        codefmt::end('}')
    );
    let out = buffered(document.as_bytes(), 4, 5, vec![0, 2, 0, 1]);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "impl S {\n    fn f() {\n        body();\n    }\n}\n"
    );
}
