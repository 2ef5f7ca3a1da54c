mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "thermolog")]
#[command(about = "Thermolog - Multi-sensor temperature stream logger", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log entries from a device byte stream into a CSV file
    Log {
        /// Device node, FIFO, or file to read frames from
        #[arg(short, long)]
        device: String,

        /// CSV file to append entries to
        #[arg(short, long)]
        output: String,

        /// Availability poll interval in milliseconds
        #[arg(long, default_value = "100")]
        poll_ms: u64,

        /// Resynchronization settle delay in milliseconds
        #[arg(long, default_value = "50")]
        settle_ms: u64,
    },

    /// Replay a captured byte stream and report decoded entries
    Scan {
        /// Capture file to replay
        #[arg(short, long)]
        input: String,

        /// Output JSON file for decoded entries
        #[arg(short, long)]
        output: Option<String>,

        /// Show statistics only
        #[arg(long)]
        stats_only: bool,
    },

    /// Generate a synthetic capture for testing
    Simulate {
        /// Output capture file
        #[arg(short, long)]
        output: String,

        /// Number of full sensor cycles to generate
        #[arg(short, long, default_value = "10")]
        entries: usize,

        /// Junk bytes prepended to exercise resynchronization
        #[arg(long, default_value = "0")]
        junk_prefix: usize,

        /// Corrupt the sign byte of every Nth frame (0 = never)
        #[arg(long, default_value = "0")]
        corrupt_every: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Log {
            device,
            output,
            poll_ms,
            settle_ms,
        } => commands::log::execute(&device, &output, poll_ms, settle_ms),

        Commands::Scan {
            input,
            output,
            stats_only,
        } => commands::scan::execute(&input, output.as_deref(), stats_only),

        Commands::Simulate {
            output,
            entries,
            junk_prefix,
            corrupt_every,
        } => commands::simulate::execute(&output, entries, junk_prefix, corrupt_every),
    }
}
