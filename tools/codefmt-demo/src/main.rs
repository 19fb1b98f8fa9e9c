//! codefmt demo
//!
//! Writes a two-level nested block twice through one indenting stream bound
//! to standard output.

use std::io;

use codefmt::{FormatConfig, FormatError, FormattingStream, IoSink, Sink};

/// Number of times the sample is written.
const REPEAT: usize = 2;

fn main() {
    codefmt::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match parse_args(&args) {
        Ok(Some(config)) => config,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(message) => {
            eprintln!("error: {message}");
            print_usage();
            std::process::exit(1);
        }
    };

    let sink = IoSink::new(io::stdout().lock());
    if let Err(err) = run(sink, config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Parse command-line options. `Ok(None)` means help was requested.
fn parse_args(args: &[String]) -> Result<Option<FormatConfig>, String> {
    let mut config = FormatConfig::default();
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        let width = if let Some(value) = arg.strip_prefix("--indent-width=") {
            value
        } else if arg == "--indent-width" {
            i += 1;
            match args.get(i) {
                Some(value) => value.as_str(),
                None => return Err("--indent-width requires a value".to_string()),
            }
        } else if arg == "-h" || arg == "--help" {
            return Ok(None);
        } else {
            return Err(format!("unknown option '{arg}'"));
        };
        config.indent_width = width
            .parse()
            .map_err(|_| format!("invalid indent width '{width}'"))?;
        i += 1;
    }
    config.validate().map_err(|err| err.to_string())?;
    Ok(Some(config))
}

fn print_usage() {
    eprintln!("Usage: codefmt-demo [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --indent-width=<n>  Spaces per nesting level (default 4)");
    eprintln!("  -h, --help          Show this message");
}

fn run<S: Sink>(sink: S, config: FormatConfig) -> Result<(), FormatError> {
    let mut stream = FormattingStream::with_config(sink, config)?;
    for round in 0..REPEAT {
        tracing::debug!(round, "writing sample");
        write_sample(&mut stream)?;
    }
    stream.finish()
}

fn write_sample<S: Sink>(stream: &mut FormattingStream<S>) -> Result<(), FormatError> {
    stream
        .text("namespace test ")?
        .begin_block('{')?
        .text("int func() ")?
        .begin_block('{')?
        .text("return 5;")?
        .end_block('}')?
        .end_block('}')?;
    Ok(())
}
