//! exograde CLI: validate exercise content and score submissions.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "exograde", version, about = "Exercise content validation and scoring")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate exercise content files
    Validate {
        /// Path to an exercise JSON file or a directory of them
        #[arg(long)]
        exercise: PathBuf,
    },

    /// Score one submission against an exercise
    Score {
        /// Exercise JSON file
        #[arg(long)]
        exercise: PathBuf,

        /// Submission JSON file (object of field name to value)
        #[arg(long)]
        submission: PathBuf,

        /// Config file path (defaults to ./exograde.toml if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Also write the result as JSON to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Recover legend zones from an editing-form submission
    Zones {
        /// Submission JSON file captured from the legend editor
        #[arg(long)]
        submission: PathBuf,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create starter config and example exercise
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("exograde=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { exercise } => commands::validate::execute(exercise),
        Commands::Score {
            exercise,
            submission,
            config,
            format,
            output,
        } => commands::score::execute(exercise, submission, config, format, output),
        Commands::Zones { submission, format } => commands::zones::execute(submission, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
