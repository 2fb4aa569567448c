//! Decode one binary record with a schema file and print it.
//!
//! Usage:
//!   decode_record --schema FILE [--json | --pretty] [--hex] [--permissive] [-v...] [INPUT]
//!
//! INPUT defaults to stdin. With `--hex` the input is hex text (whitespace ignored)
//! instead of raw bytes.

use anyhow::{bail, Context, Result};
use clap::Parser;
use fieldspec::dump::{hex_string, record_to_dump};
use fieldspec::{parse, DecodeError, Decoder, Record, Schema};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "decode_record", version, about = "Decode a binary record using a field schema")]
struct Args {
    /// Schema file
    #[arg(short, long)]
    schema: PathBuf,

    /// Input file (stdin when omitted)
    input: Option<PathBuf>,

    /// Input is hex text rather than raw bytes
    #[arg(long)]
    hex: bool,

    /// Print compact JSON
    #[arg(long, conflicts_with = "pretty")]
    json: bool,

    /// Print indented JSON
    #[arg(long)]
    pretty: bool,

    /// Skip schema validation (duplicate names, forward length references)
    #[arg(long)]
    permissive: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(io::stderr)
        .init();

    let src = std::fs::read_to_string(&args.schema)
        .with_context(|| format!("Failed to read schema: {}", args.schema.display()))?;
    let schema = load_schema(&src, args.permissive)
        .with_context(|| format!("Invalid schema: {}", args.schema.display()))?;
    tracing::info!(fields = schema.len(), "loaded schema");

    let raw = read_input(args.input.as_ref())?;
    let data = if args.hex { parse_hex(&String::from_utf8_lossy(&raw))? } else { raw };

    let decoder = Decoder::new(schema);
    let record = match decoder.decode(&data) {
        Ok(r) => r,
        Err(e) => {
            if let DecodeError::UnterminatedString { ref partial, .. } = e {
                eprintln!("partial: {}", hex_string(partial));
            }
            return Err(e).context("Decode failed");
        }
    };
    if record.consumed() < data.len() {
        tracing::warn!(
            consumed = record.consumed(),
            total = data.len(),
            "input has trailing bytes after the record"
        );
    }

    let format = if args.pretty {
        OutputFormat::Pretty
    } else if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Dump
    };
    println!("{}", render(&record, format)?);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Dump,
    Json,
    Pretty,
}

fn render(record: &Record, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Dump => record_to_dump(record),
        OutputFormat::Json => serde_json::to_string(record)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(record)?,
    })
}

/// Parse schema text; validated unless `permissive`.
fn load_schema(src: &str, permissive: bool) -> Result<Schema> {
    let fields = parse(src)?;
    if permissive {
        Ok(Schema::new(fields))
    } else {
        Ok(Schema::resolve(fields)?)
    }
}

fn read_input(path: Option<&PathBuf>) -> Result<Vec<u8>> {
    match path {
        Some(p) => std::fs::read(p).with_context(|| format!("Failed to read input: {}", p.display())),
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf).context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// Hex text to bytes; whitespace and an optional `0x` prefix are ignored.
fn parse_hex(s: &str) -> Result<Vec<u8>> {
    let s = s.trim();
    let s = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    let hex: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if hex.len() % 2 != 0 {
        bail!("Hex input must have even length");
    }
    let mut bytes = Vec::with_capacity(hex.len() / 2);
    for chunk in hex.as_bytes().chunks(2) {
        let s = std::str::from_utf8(chunk).context("Invalid hex")?;
        let b = u8::from_str_radix(s, 16).with_context(|| format!("Invalid hex byte: {}", s))?;
        bytes.push(b);
    }
    Ok(bytes)
}
