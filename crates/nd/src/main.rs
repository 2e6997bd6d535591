//! noundry CLI - server-rendered component declarations.
//!
//! Provides commands for:
//! - `render`: Render a markup file to HTML
//! - `components`: List the registered component tags

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ComponentsArgs, RenderArgs};
use output::Output;

/// noundry - Server-rendered UI components.
#[derive(Parser)]
#[command(name = "nd", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render component markup to HTML.
    Render(RenderArgs),
    /// List registered component tags.
    Components(ComponentsArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Render(args) if args.verbose);

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Components(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// Log filter: `--verbose` enables INFO level, otherwise use `RUST_LOG`
/// (ERROR when unset).
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    }
}
