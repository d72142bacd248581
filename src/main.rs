use std::path::PathBuf;

use clap::Parser;
use clap_derive::{Parser, Subcommand};
use time::format_description::well_known::Rfc3339;
use time::UtcOffset;
use tracing_subscriber::fmt::time::OffsetTime;

mod command;
mod event;
mod ingest;
mod pack;

#[derive(Debug, Parser)]
#[command(version, about = "Inspect and extract Minecraft custom paintings resource packs")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Ingest a resource pack zip and emit its contents as JSON events
    Inspect {
        /// Path to the resource pack zip
        input: PathBuf,

        /// Print a human readable summary instead of JSON events
        #[arg(short, long)]
        summary: bool,
    },
    /// Unpack a resource pack zip into a directory
    Extract {
        /// Path to the resource pack zip
        input: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "./out")]
        output: PathBuf,
    },
}

fn main() {
    init_tracing();

    let args = Args::parse();
    let res = match &args.command {
        Command::Inspect { input, summary } => command::inspect::inspect(input, *summary),
        Command::Extract { input, output } => command::extract::extract(input, output),
    };

    if let Err(err) = res {
        eprintln!("Failed: {:#}", err);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let timer = OffsetTime::local_rfc_3339()
        .unwrap_or_else(|_| OffsetTime::new(UtcOffset::UTC, Rfc3339));

    // Diagnostics go to stderr; stdout is reserved for command output.
    tracing_subscriber::fmt()
        .with_timer(timer)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
