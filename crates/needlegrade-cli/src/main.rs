//! needlegrade CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "needlegrade",
    version,
    about = "Grading and positional-error analysis for ordered needle recall tests"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a batch of records and write a report
    Run {
        /// Path to a JSONL record file ({"standard": ..., "response": ...} per line)
        #[arg(long)]
        records: PathBuf,

        /// Grading config TOML path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured slot count of the test
        #[arg(long)]
        sequence_length: Option<u32>,

        /// Override the configured max concurrent records
        #[arg(long)]
        parallelism: Option<usize>,

        /// Output directory
        #[arg(long, default_value = "./needlegrade-results")]
        output: PathBuf,
    },

    /// Grade and classify a single record pair, with a key-level diff
    Inspect {
        /// Reference answer set: inline JSON object or a file path
        #[arg(long)]
        standard: String,

        /// Response answer set: inline JSON object or a file path
        #[arg(long)]
        response: String,

        /// Grading config TOML path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Render the frequency tables of a saved report
    Show {
        /// Report JSON path
        #[arg(long)]
        report: PathBuf,

        /// Restrict output: correct, misorder, missing, hallucination, all
        #[arg(long, default_value = "all")]
        kind: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("needlegrade=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            records,
            config,
            sequence_length,
            parallelism,
            output,
        } => commands::run::execute(records, config, sequence_length, parallelism, output).await,
        Commands::Inspect {
            standard,
            response,
            config,
        } => commands::inspect::execute(standard, response, config),
        Commands::Show { report, kind } => commands::show::execute(report, kind),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
