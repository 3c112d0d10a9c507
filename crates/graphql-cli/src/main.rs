mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "graphql-nav")]
#[command(about = "Jump to GraphQL fragment and operation definitions", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to GraphQL config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Project name (for multi-project configs)
    #[arg(short, long)]
    project: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the definition under a cursor position
    Definition {
        /// GraphQL document containing the reference
        file: PathBuf,

        #[command(flatten)]
        cursor: Cursor,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Show a preview of the declaration under a cursor position
    Preview {
        /// GraphQL document containing the reference
        file: PathBuf,

        #[command(flatten)]
        cursor: Cursor,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// List the fragments known to the project
    Fragments {
        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
}

/// Cursor position, 1-based as editors display it
#[derive(Debug, Clone, Copy, clap::Args)]
struct Cursor {
    /// Line number (1-based)
    #[arg(short, long)]
    line: usize,

    /// Column number (1-based)
    #[arg(long, default_value_t = 1)]
    column: usize,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON output for tooling
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries command output, logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Definition {
            file,
            cursor,
            format,
        } => {
            commands::definition::run(cli.config, cli.project, file, cursor, format).await?;
        }
        Commands::Preview {
            file,
            cursor,
            format,
        } => {
            commands::preview::run(cli.config, cli.project, file, cursor, format).await?;
        }
        Commands::Fragments { format } => {
            commands::fragments::run(cli.config, cli.project, format)?;
        }
    }

    Ok(())
}
