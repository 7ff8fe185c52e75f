#![deny(missing_docs)]

//! # Disposegen CLI
//!
//! Command line host for the dispose pattern generator.
//!
//! Supported Commands:
//! - `generate`: Manifests -> analysis pass -> `*.Dispose.g.cs` files.
//! - `inspect`: Prints the resolved work items of a manifest as JSON.
//!
//! Set `RUST_LOG` (e.g. `RUST_LOG=disposegen_core=debug`) to trace resolver decisions.

use clap::{Parser, Subcommand};
use std::sync::Once;

use crate::error::CliResult;

mod error;
mod generate;
mod inspect;
mod manifests;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Dispose pattern generator")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate dispose implementations from type manifests.
    Generate(generate::GenerateArgs),
    /// Print the work items a manifest resolves to.
    Inspect(inspect::InspectArgs),
}

static TRACING_INIT: Once = Once::new();

/// Installs the stderr subscriber. Only active when `RUST_LOG` is set.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

fn main() -> CliResult<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Generate(args) => generate::execute(args)?,
        Commands::Inspect(args) => inspect::execute(args)?,
    }

    Ok(())
}
