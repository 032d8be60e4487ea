//! kiln-extract: flatten a JSON:API document back into plain records
//!
//! Usage:
//!   # Read a document from a file, print the record graph
//!   kiln-extract response.json
//!
//!   # Read from stdin, camel-case the keys
//!   curl -s https://api.example.com/users | kiln-extract --case camel
//!
//!   # One record per line for downstream line-oriented tools
//!   kiln-extract response.json --ndjson

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use kiln::{DeserializeConfig, Deserializer, Document, KeyCase};
use serde_json::Value;
use std::io::Read;

#[derive(Parser, Debug)]
#[command(name = "kiln-extract")]
#[command(about = "Flatten a JSON:API document into plain records", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Casing applied to extracted keys
    #[arg(long, value_enum, default_value = "dash")]
    case: CaseMode,

    /// Record key receiving the resource id
    #[arg(long, default_value = "id")]
    id_key: String,

    /// Inject the resource type into each record
    #[arg(long)]
    type_as_attribute: bool,

    /// Pretty-print the output
    #[arg(long, short = 'p')]
    pretty: bool,

    /// Write one record per line (array documents only)
    #[arg(long)]
    ndjson: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CaseMode {
    Dash,
    Snake,
    Camel,
    Pascal,
}

impl From<CaseMode> for KeyCase {
    fn from(mode: CaseMode) -> Self {
        match mode {
            CaseMode::Dash => KeyCase::Dash,
            CaseMode::Snake => KeyCase::Underscore,
            CaseMode::Camel => KeyCase::Camel,
            CaseMode::Pascal => KeyCase::Pascal,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let input = match &args.input {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };

    let document: Document =
        serde_json::from_str(&input).context("Input is not a JSON:API document")?;

    let mut config = DeserializeConfig::new()
        .with_key_case(args.case.into())
        .with_id_key(&args.id_key);
    if args.type_as_attribute {
        config = config.with_type_as_attribute();
    }

    let records = Deserializer::new(config).deserialize(&document)?;

    if args.ndjson {
        match records {
            Value::Array(items) => {
                for item in items {
                    println!("{}", serde_json::to_string(&item)?);
                }
            }
            single => println!("{}", serde_json::to_string(&single)?),
        }
    } else if args.pretty {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        println!("{}", serde_json::to_string(&records)?);
    }

    Ok(())
}
