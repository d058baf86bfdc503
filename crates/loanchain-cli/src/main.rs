//! LoanChain CLI - Extract deal terms from syndicated-loan agreements.

use clap::Parser;
use loanchain_cli::commands;
use loanchain_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        if e.is_failure() {
            eprintln!("Error: {}", e);
        }
        std::process::exit(e.exit_code());
    }
}

/// Log to stderr so stdout carries only command output
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> loanchain_cli::Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::path()?,
    };
    let mut config = Config::load_from(&config_path)?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Extract(args) => commands::execute_extract(args, &config, &formatter).await?,
        Command::Vault(args) => commands::execute_vault(args, &config, &formatter).await?,
        Command::Config(args) => {
            commands::execute_config(args, &mut config, &config_path, &formatter).await?
        }
    }

    Ok(())
}
