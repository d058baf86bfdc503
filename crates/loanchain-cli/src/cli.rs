//! CLI command definitions and argument parsing.

use crate::config::{ModeSetting, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// LoanChain CLI - Extract deal terms from syndicated-loan agreements.
#[derive(Debug, Parser)]
#[command(name = "loanchain")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (identifiers only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract deal terms from a PDF
    Extract(ExtractArgs),

    /// Browse saved deals
    Vault(VaultArgs),

    /// Show or change configuration
    Config(ConfigArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// PDF file to extract
    pub file: PathBuf,

    /// Extraction mode (defaults to the configured mode)
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// API key for remote extraction
    #[arg(short = 'k', long, env = "LOANCHAIN_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Save the extracted deal to the vault
    #[arg(short, long)]
    pub save: bool,
}

/// Arguments for vault browsing.
#[derive(Debug, Parser)]
pub struct VaultArgs {
    #[command(subcommand)]
    pub action: VaultAction,
}

/// Vault actions.
#[derive(Debug, Subcommand)]
pub enum VaultAction {
    /// List saved deals, newest first
    List,

    /// Show one saved deal
    Show {
        /// Position in `vault list` (1 = newest)
        index: usize,
    },
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the configuration (API key masked)
    Show,

    /// Set the default extraction mode
    SetMode {
        /// New default mode
        #[arg(value_enum)]
        mode: ModeArg,
    },

    /// Store the API key for remote extraction
    SetKey {
        /// API key
        key: String,
    },
}

/// Extraction mode argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    /// Pattern rules on this machine
    Local,
    /// Remote model
    Remote,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => OutputFormat::Table,
            CliFormat::Json => OutputFormat::Json,
            CliFormat::Quiet => OutputFormat::Quiet,
        }
    }
}

impl From<ModeArg> for ModeSetting {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Local => ModeSetting::Local,
            ModeArg::Remote => ModeSetting::Remote,
        }
    }
}
