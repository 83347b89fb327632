use clap::Parser;
use gurrency::config::{DEFAULT_BASE, DEFAULT_ENV_FILE, DEFAULT_REFERENCE};
use gurrency::core::log::init_logging;
use std::process::ExitCode;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Base currency the rates are expressed against
    #[arg(short, long, default_value = DEFAULT_BASE)]
    base: String,

    /// Comma-separated reference currency codes
    #[arg(short, long, default_value = DEFAULT_REFERENCE)]
    reference: String,

    /// Environment file holding FIXER_KEY and FIXER_URL
    #[arg(short, long, default_value = DEFAULT_ENV_FILE)]
    env_file: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    ExitCode::from(gurrency::run_cli(&cli.env_file, &cli.base, &cli.reference).await)
}
