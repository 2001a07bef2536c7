//! multiconf command line
//!
//! Reads one config file and prints values from it.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use multiconf::{ConfigFormat, ConfigParser, parse_duration};
use std::path::PathBuf;
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Look up values in basic, JSON and TOML config files
#[derive(Parser, Debug)]
#[command(name = "multiconf")]
#[command(version, about, long_about = None)]
struct Args {
    /// Config file to read
    file: PathBuf,

    /// Config format (json, basic, toml); guessed from the file extension if omitted
    #[arg(short, long, env = "MULTICONF_FORMAT")]
    format: Option<ConfigFormat>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "MULTICONF_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Log output format
    #[arg(long, env = "MULTICONF_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the value stored under a key
    Get {
        key: String,

        /// Type to read the value as
        #[arg(long = "as", value_enum, default_value_t = ValueKind::String)]
        kind: ValueKind,

        /// Printed instead when the key is missing or has the wrong type
        #[arg(long)]
        default: Option<String>,
    },

    /// List the loaded keys
    Keys,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ValueKind {
    Int,
    String,
    Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

impl Args {
    fn resolved_format(&self) -> ConfigFormat {
        self.format
            .or_else(|| ConfigFormat::from_path(&self.file))
            .unwrap_or(ConfigFormat::Basic)
    }
}

/// Render one value as text, applying the fallback when one is given
fn render(
    parser: &dyn ConfigParser,
    key: &str,
    kind: ValueKind,
    default: Option<&str>,
) -> anyhow::Result<String> {
    let rendered = match (kind, default) {
        (ValueKind::Int, None) => parser.int(key)?.to_string(),
        (ValueKind::Int, Some(def)) => {
            let def: i64 = def
                .parse()
                .with_context(|| format!("default '{def}' is not an integer"))?;
            parser.int_default(key, def).to_string()
        }
        (ValueKind::String, None) => parser.string(key)?,
        (ValueKind::String, Some(def)) => parser.string_default(key, def),
        (ValueKind::Duration, None) => format!("{:?}", parser.duration(key)?),
        (ValueKind::Duration, Some(def)) => {
            let def = parse_duration(def)
                .with_context(|| format!("default '{def}' is not a duration"))?;
            format!("{:?}", parser.duration_default(key, def))
        }
    };

    Ok(rendered)
}

fn run(args: &Args) -> anyhow::Result<()> {
    let format = args.resolved_format();
    debug!(file = %args.file.display(), format = %format, "Reading config");

    let mut parser = format.parser();
    parser.set_file(&args.file)?;
    parser.load_config()?;

    match &args.command {
        Command::Get { key, kind, default } => {
            println!("{}", render(parser.as_ref(), key, *kind, default.as_deref())?);
        }
        Command::Keys => {
            for key in parser.keys() {
                println!("{key}");
            }
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    match args.log_format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init(),
    }

    run(&args).inspect_err(|e| error!(error = %e, "Config lookup failed"))
}
