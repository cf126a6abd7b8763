//! unitgrade CLI: grade unit-conversion worksheets from the command line.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "unitgrade", version, about = "Unit-conversion worksheet grader")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade student responses against a worksheet
    Grade {
        /// Worksheet grid: rows of input, from unit, to unit
        #[arg(long)]
        worksheet: PathBuf,

        /// Responses grid: rows of student name followed by answers
        #[arg(long)]
        responses: PathBuf,

        /// Where to write the results grid
        #[arg(long)]
        output: PathBuf,

        /// Output format: csv, json, markdown, xlsx (default: from the output extension)
        #[arg(long)]
        format: Option<String>,

        /// Submissions graded concurrently
        #[arg(long)]
        parallelism: Option<usize>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show a worksheet with its answer key
    Key {
        /// Worksheet grid
        #[arg(long)]
        worksheet: PathBuf,

        /// Also write the key grid to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Convert a single value
    Convert {
        /// Value to convert
        #[arg(allow_negative_numbers = true)]
        value: f64,

        /// Source unit, e.g. "fahrenheit" or "cubic feet"
        from: String,

        /// Target unit
        to: String,
    },

    /// List supported unit families
    Units,

    /// Create starter config and sample grids
    Init,
}

#[tokio::main]
async fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("unitgrade=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Grade {
            worksheet,
            responses,
            output,
            format,
            parallelism,
            config,
        } => {
            commands::grade::execute(worksheet, responses, output, format, parallelism, config)
                .await
        }
        Commands::Key { worksheet, output } => commands::key::execute(worksheet, output),
        Commands::Convert { value, from, to } => commands::convert::execute(value, from, to),
        Commands::Units => commands::units::execute(),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
