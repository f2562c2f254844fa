//! fwdcurve CLI - Forward curves from futures settlement prices.
//!
//! # Usage
//!
//! ```bash
//! # List curves built from a directory of settlement files
//! fwdcurve curves data/settlements
//!
//! # Samples and fitted grid of one curve
//! fwdcurve show data/settlements --date 2025-01-01 --product CL --interpolation cubic
//!
//! # Price a contract on one curve
//! fwdcurve price data/settlements --date 2025-01-01 --product CL --maturity 2025-05-15
//!
//! # Daily returns of a contract
//! fwdcurve returns data/settlements --product CL --maturity 2025-04-01 --format csv
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = Context::new(&cli)?;

    match cli.command {
        Commands::Curves(args) => commands::curves::execute(args, &ctx)?,
        Commands::Show(args) => commands::show::execute(args, &ctx)?,
        Commands::Price(args) => commands::price::execute(args, &ctx)?,
        Commands::Returns(args) => commands::returns::execute(args, &ctx)?,
    }

    Ok(())
}

/// Logs go to stderr so table, JSON and CSV output stay clean. `RUST_LOG`
/// takes precedence over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
