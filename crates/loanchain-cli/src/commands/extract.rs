//! Extract command implementation.

use crate::cli::{ExtractArgs, ModeArg};
use crate::config::{Config, ModeSetting};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use loanchain_domain::traits::DealVault;
use loanchain_domain::{Deal, DealRecord, ExtractionResult};
use loanchain_extractor::{assemble_deal, ExtractionMode, ExtractionRouter, UploadSession};
use loanchain_llm::GroqProvider;
use loanchain_vault::DirectoryVault;
use tracing::info;

/// Execute the extract command.
pub async fn execute_extract(
    args: ExtractArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    if !args.file.is_file() {
        return Err(CliError::InvalidInput(format!(
            "{} is not a file",
            args.file.display()
        )));
    }

    let mode = resolve_mode(args.mode, args.api_key, config)?;
    let provider = GroqProvider::new(config.remote.clone())?;
    let router = ExtractionRouter::new(provider, config.extractor.clone())?;

    let mut session = UploadSession::new();
    let ticket = session.begin();

    // Dropping the extraction future abandons any in-flight request
    let result = tokio::select! {
        result = router.extract_document(&args.file, &mode) => result?,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("{}", formatter.warning("Extraction cancelled; nothing was saved"));
            return Err(CliError::Cancelled);
        }
    };

    let deal = match accept(result) {
        Ok(deal) => deal,
        Err(e) => {
            if matches!(e, CliError::Rejected(_)) {
                eprintln!("{}", formatter.warning(&e.to_string()));
            }
            return Err(e);
        }
    };
    session.apply(ticket, deal);
    let deal = session.take().ok_or(CliError::Cancelled)?;

    println!("{}", formatter.format_deal(&deal)?);

    if args.save {
        let vault = DirectoryVault::new(config.vault_dir()?);
        let key = vault.save(&DealRecord::new(deal))?;
        info!("Saved deal to {}", vault.dir().display());
        if formatter.format() != crate::config::OutputFormat::Quiet {
            eprintln!("{}", formatter.success(&format!("Saved as {}", key)));
        }
    }

    Ok(())
}

/// Assemble the deal, turning a remote rejection into [`CliError::Rejected`]
pub fn accept(result: ExtractionResult) -> Result<Deal> {
    Ok(assemble_deal(result)?)
}

/// Pick the extraction mode from flags and configuration
///
/// A `--mode` flag wins over the configured mode. Remote mode needs a key
/// from `--api-key`, `LOANCHAIN_API_KEY`, or the configuration file, in that
/// order.
pub fn resolve_mode(
    requested: Option<ModeArg>,
    api_key: Option<String>,
    config: &Config,
) -> Result<ExtractionMode> {
    let setting = requested.map(ModeSetting::from).unwrap_or(config.mode);

    match setting {
        ModeSetting::Local => Ok(ExtractionMode::Local),
        ModeSetting::Remote => {
            let key = api_key
                .or_else(|| config.api_key.clone())
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| {
                    CliError::Config(
                        "Remote mode needs an API key: pass --api-key, set LOANCHAIN_API_KEY, \
                         or run 'loanchain config set-key'"
                            .to_string(),
                    )
                })?;
            Ok(ExtractionMode::remote(key))
        }
    }
}
