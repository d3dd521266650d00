//! Payload Guard CLI - offline shape validation and payload filtering

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use guard_core::{apply_shape, FieldSpec};

#[derive(Parser)]
#[command(name = "pguard")]
#[command(about = "Payload Guard - shape-driven JSON payload sanitization")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Filter a JSON payload through a shape descriptor
    Filter {
        /// Shape descriptor file (JSON)
        #[arg(short, long)]
        shape: PathBuf,
        /// Payload file (JSON)
        #[arg(short, long)]
        input: PathBuf,
        /// Pretty-print the filtered payload
        #[arg(long)]
        pretty: bool,
    },
    /// Validate a shape descriptor file
    Check {
        /// Shape descriptor file (JSON)
        #[arg(short, long)]
        shape: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt::init();

    match cli.command {
        Some(Commands::Filter {
            shape,
            input,
            pretty,
        }) => {
            let spec = load_spec(&shape)?;
            let raw = load_json(&input)?;
            let filtered = apply_shape(&spec, &raw);
            let rendered = if pretty {
                serde_json::to_string_pretty(&filtered)?
            } else {
                serde_json::to_string(&filtered)?
            };
            println!("{rendered}");
        }
        Some(Commands::Check { shape }) => {
            load_spec(&shape)?;
            println!("shape OK: {}", shape.display());
        }
        None => {
            println!("pguard v0.1.0 - Use --help for commands");
        }
    }

    Ok(())
}

fn load_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn load_spec(path: &Path) -> anyhow::Result<FieldSpec> {
    let value = load_json(path)?;
    FieldSpec::from_json(&value).with_context(|| format!("building shape from {}", path.display()))
}
