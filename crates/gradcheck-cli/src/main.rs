//! gradcheck CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gradcheck", version, about = "Graduation requirement checker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a transcript against a requirement catalog
    Check {
        /// Path to the catalog TOML file
        #[arg(long)]
        catalog: PathBuf,

        /// Path to the transcript TOML file
        #[arg(long)]
        transcript: PathBuf,

        /// Output directory for report files
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: json, markdown, html, all
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Validate a catalog TOML file
    Validate {
        /// Path to the catalog TOML file
        #[arg(long)]
        catalog: PathBuf,
    },

    /// Compare two saved progress reports
    Compare {
        /// Earlier report JSON
        #[arg(long)]
        earlier: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create a starter catalog and transcript
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gradcheck=info".parse().expect("valid directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            catalog,
            transcript,
            output,
            format,
        } => commands::check::execute(catalog, transcript, output, format),
        Commands::Validate { catalog } => commands::validate::execute(catalog),
        Commands::Compare {
            earlier,
            current,
            format,
        } => commands::compare::execute(earlier, current, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
