//! Seed-account configuration.
//!
//! The kiosk optionally loads an accounts TOML file at startup to populate
//! the in-memory table. Nothing is ever written back.

use serde::Deserialize;

use conch_types::error::{ConchError, Result};

/// One seeded account entry.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountEntry {
    /// Login name (validated on registration).
    pub login: String,
    /// PIN code.
    pub pin: u32,
    /// Request quota; 0 (the default) means unlimited.
    #[serde(default)]
    pub request_limit: u32,
}

/// Parse an accounts TOML string into a list of entries.
pub fn parse_accounts(toml_str: &str) -> Result<Vec<AccountEntry>> {
    #[derive(Deserialize)]
    struct AccountsFile {
        #[serde(default)]
        account: Vec<AccountEntry>,
    }

    let file: AccountsFile = toml::from_str(toml_str)
        .map_err(|e| ConchError::Config(format!("accounts.toml: {e}")))?;
    Ok(file.account)
}
