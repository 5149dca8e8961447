//! sitenav CLI - site navigation configuration tool.
//!
//! Provides commands for:
//! - `check`: Validate the site configuration and its links
//! - `export`: Write the configuration object for the site generator
//! - `sidebar`: Show the sidebar a page gets
//! - `show`: Summarize the configuration

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ExportArgs, ShowArgs, SidebarArgs};
use output::Output;

/// sitenav - site navigation configuration tool.
#[derive(Parser)]
#[command(name = "sitenav", version, about)]
struct Cli {
    /// Enable verbose output (INFO-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the site configuration and check its links.
    Check(CheckArgs),
    /// Export the configuration for the site generator.
    Export(ExportArgs),
    /// Show the sidebar for a page path.
    Sidebar(SidebarArgs),
    /// Summarize the site configuration.
    Show(ShowArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Export(args) => args.execute(),
        Commands::Sidebar(args) => args.execute(),
        Commands::Show(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
