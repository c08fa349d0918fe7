//! # wachat CLI
//!
//! Command-line interface for the wachat library.

use std::process;

use clap::Parser as ClapParser;

use wachat::WachatError;
use wachat::cli::Args;
use wachat::format::write_records;
use wachat::parser::{ChatParser, stderr_diagnostics};

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            process::exit(1);
        }
    }
}

fn run() -> Result<(), WachatError> {
    let args = <Args as ClapParser>::parse();

    let mut parser = ChatParser::with_config(args.parser_config());
    if !args.quiet {
        parser = parser.with_diagnostic_callback(stderr_diagnostics());
    }

    let format = args.output_format();
    let output_config = args.output_config();

    let rows = parse_and_write(&parser, &args, format, &output_config)?;

    println!("Wrote {} rows to {}", rows, args.output);
    Ok(())
}

/// Streams records from the input file straight into the output writer.
#[cfg(feature = "streaming")]
fn parse_and_write(
    parser: &ChatParser,
    args: &Args,
    format: wachat::format::OutputFormat,
    config: &wachat::core::OutputConfig,
) -> Result<usize, WachatError> {
    let records = parser.stream(std::path::Path::new(&args.input))?;
    write_records(records, &args.output, format, config)
}

/// Loads the input file and writes its records lazily.
#[cfg(not(feature = "streaming"))]
fn parse_and_write(
    parser: &ChatParser,
    args: &Args,
    format: wachat::format::OutputFormat,
    config: &wachat::core::OutputConfig,
) -> Result<usize, WachatError> {
    let content = std::fs::read_to_string(&args.input)?;
    write_records(parser.records(&content), &args.output, format, config)
}
