//! quizbank CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizbank", version, about = "Traffic-regulation quiz trainer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the question bank and report per-category counts
    Validate {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Build the question bank and write it as JSON
    Build {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output file
        #[arg(long, default_value = "bank.json")]
        output: PathBuf,

        /// Seed for distractor sampling
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Take a quiz in the terminal
    Play {
        /// Category to play (quiz1, quiz2, signals, definitions)
        #[arg(long, default_value = "quiz1")]
        category: String,

        /// Number of questions (ignored for quiz1)
        #[arg(long)]
        count: Option<usize>,

        /// Seed for shuffling
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and sample assets
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizbank=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { config } => commands::validate::execute(config).await,
        Commands::Build {
            config,
            output,
            seed,
        } => commands::build::execute(config, output, seed).await,
        Commands::Play {
            category,
            count,
            seed,
            config,
        } => commands::play::execute(category, count, seed, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
