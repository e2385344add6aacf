//! lexid CLI - generate, inspect, validate and convert ULIDs

use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use lexid_core::{GeneratorConfig, Ulid, UlidGenerator};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "lexid", version, about = "Generate and inspect ULIDs")]
struct Cli {
    /// Debug logging (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate new identifiers
    New {
        /// How many to generate
        #[arg(long, short = 'n', default_value_t = 1)]
        count: usize,
        /// Timestamp in Unix milliseconds instead of the current time
        #[arg(long)]
        at_ms: Option<u64>,
        /// Fixed seed for reproducible output
        #[arg(long, env = "LEXID_SEED")]
        seed: Option<u64>,
        /// Output representation
        #[arg(long, value_enum, default_value_t = Repr::Ulid)]
        format: Repr,
    },
    /// Show the fields of identifiers
    Inspect {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Check that inputs are canonical-length ULID strings
    Validate {
        #[arg(required = true)]
        inputs: Vec<String>,
    },
    /// Convert between representations
    Convert {
        value: String,
        #[arg(long, value_enum, default_value_t = Repr::Ulid)]
        from: Repr,
        #[arg(long, value_enum, default_value_t = Repr::Uuid)]
        to: Repr,
    },
}

/// Supported representations of the 128-bit value
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Repr {
    /// 26-character Crockford Base32
    Ulid,
    /// Hyphenated UUID, same byte order as the ULID
    Uuid,
    /// 32 hex digits of the mixed-endian GUID byte layout
    GuidBytes,
    /// 32 hex digits of the 16 bytes
    Hex,
    /// Standard Base64 of the 16 bytes
    Base64,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn from_hex(text: &str) -> anyhow::Result<[u8; 16]> {
    let text = text.trim();
    if text.len() != 32 || !text.is_ascii() {
        bail!("expected 32 hex digits, got {:?}", text);
    }
    let mut out = [0u8; 16];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = u8::from_str_radix(&text[2 * i..2 * i + 2], 16)
            .with_context(|| format!("invalid hex at offset {}", 2 * i))?;
    }
    Ok(out)
}

fn read(value: &str, repr: Repr) -> anyhow::Result<Ulid> {
    let id = match repr {
        Repr::Ulid => Ulid::parse(value.trim())?,
        Repr::Uuid => Ulid::from(Uuid::parse_str(value.trim())?),
        Repr::GuidBytes => Ulid::from_guid_bytes(from_hex(value)?),
        Repr::Hex => Ulid::from_bytes(from_hex(value)?),
        Repr::Base64 => Ulid::from_base64(value.trim())?,
    };
    Ok(id)
}

fn render(id: &Ulid, repr: Repr) -> String {
    match repr {
        Repr::Ulid => id.to_string(),
        Repr::Uuid => id.to_uuid().to_string(),
        Repr::GuidBytes => to_hex(&id.to_guid_bytes()),
        Repr::Hex => to_hex(id.as_bytes()),
        Repr::Base64 => id.to_base64(),
    }
}

fn generate(
    count: usize,
    at_ms: Option<u64>,
    seed: Option<u64>,
    format: Repr,
) -> anyhow::Result<Vec<String>> {
    let config = GeneratorConfig { seed };
    let mut generator = UlidGenerator::from_config(config)?;

    let lines = (0..count)
        .map(|_| {
            let id = match at_ms {
                Some(ms) => generator.generate_at_ms(ms),
                None => generator.generate(),
            };
            render(&id, format)
        })
        .collect();
    Ok(lines)
}

fn inspect(text: &str) -> anyhow::Result<String> {
    let id = Ulid::parse(text.trim()).with_context(|| format!("cannot parse {:?}", text))?;
    let time = humantime::format_rfc3339_millis(id.datetime());
    Ok(format!(
        "ulid:       {}\n\
         timestamp:  {} ({})\n\
         randomness: {}\n\
         bytes:      {}\n\
         uuid:       {}\n\
         base64:     {}",
        id,
        id.timestamp_ms(),
        time,
        to_hex(&id.randomness()),
        to_hex(id.as_bytes()),
        id.to_uuid(),
        id.to_base64(),
    ))
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::New {
            count,
            at_ms,
            seed,
            format,
        } => {
            for line in generate(count, at_ms, seed, format)? {
                println!("{line}");
            }
        }
        Commands::Inspect { ids } => {
            let reports = ids.iter().map(|id| inspect(id)).collect::<anyhow::Result<Vec<_>>>()?;
            println!("{}", reports.join("\n\n"));
        }
        Commands::Validate { inputs } => {
            let mut failed = 0usize;
            for input in &inputs {
                match Ulid::parse(input) {
                    Ok(_) => println!("ok       {input}"),
                    Err(e) => {
                        failed += 1;
                        println!("invalid  {input}: {e}");
                    }
                }
            }
            tracing::debug!(checked = inputs.len(), failed, "validation finished");
            if failed > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Convert { value, from, to } => {
            let id = read(&value, from)?;
            println!("{}", render(&id, to));
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}
