//! Vault command implementation.

use crate::cli::{VaultAction, VaultArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use loanchain_domain::traits::DealVault;
use loanchain_domain::DealRecord;
use loanchain_vault::DirectoryVault;

/// Execute the vault command.
pub async fn execute_vault(args: VaultArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let vault = DirectoryVault::new(config.vault_dir()?);
    println!("{}", render_vault(args.action, &vault, formatter)?);
    Ok(())
}

/// Render a vault action to a string.
pub fn render_vault<V>(action: VaultAction, vault: &V, formatter: &Formatter) -> Result<String>
where
    V: DealVault,
    CliError: From<V::Error>,
{
    let records = newest_first(vault.load_all()?);

    match action {
        VaultAction::List => formatter.format_records(&records),
        VaultAction::Show { index } => {
            let record = select(&records, index)?;
            formatter.format_deal(&record.deal)
        }
    }
}

/// Sort records by save time, newest first.
pub fn newest_first(mut records: Vec<DealRecord>) -> Vec<DealRecord> {
    records.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
    records
}

/// Pick a record by its 1-based position in the list.
fn select(records: &[DealRecord], index: usize) -> Result<&DealRecord> {
    if records.is_empty() {
        return Err(CliError::InvalidInput("The vault is empty".to_string()));
    }
    index
        .checked_sub(1)
        .and_then(|i| records.get(i))
        .ok_or_else(|| {
            CliError::InvalidInput(format!(
                "No saved deal #{} (choose 1 to {})",
                index,
                records.len()
            ))
        })
}
