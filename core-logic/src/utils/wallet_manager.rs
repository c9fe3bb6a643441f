use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::info;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// One wallet as stored in wallets.json: a public address plus the private
/// key used only for signing node-action messages.
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct WalletRecord {
    #[serde(default)]
    pub address: String,
    #[serde(rename = "privateKey", default)]
    pub private_key: String,
}

impl fmt::Debug for WalletRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletRecord")
            .field("address", &self.address)
            .field("private_key", &"***REDACTED***")
            .finish()
    }
}

pub struct WalletManager;

impl WalletManager {
    /// Loads the wallet list once at startup. A missing file yields an empty
    /// list; the scheduler decides whether that is a configuration error.
    pub fn load_wallets(path: &str) -> Result<Vec<WalletRecord>> {
        let path_ref = Path::new(path);
        if !path_ref.exists() {
            info!("No wallets found in {}", path);
            return Ok(Vec::new());
        }

        let content =
            fs::read_to_string(path_ref).with_context(|| format!("Failed to read {}", path))?;
        let wallets: Vec<WalletRecord> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse wallet list in {}", path))?;

        info!("Loaded {} wallets from {}", wallets.len(), path);
        Ok(wallets)
    }

    /// Appends a freshly registered wallet to the store, creating the file on
    /// first use. The file always stays a well-formed JSON array.
    pub fn append_wallet(path: &str, record: WalletRecord) -> Result<()> {
        let mut wallets = Self::load_wallets(path)?;
        wallets.push(record);

        let content =
            serde_json::to_string_pretty(&wallets).context("Failed to serialize wallet list")?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path))?;

        info!("Data saved to {}", path);
        Ok(())
    }
}
