//! Wallet persistence.
//!
//! The store is a JSON array of hex private-key strings, one per wallet, in
//! generation order. Order is load-bearing: a reload must reproduce the same
//! wallet set in the same sequence.

use std::path::Path;

use thiserror::Error;

use crate::chain::account::Wallet;
use crate::chain::types::ChainError;

/// Errors raised while reading or writing the wallet file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("wallet file is not a JSON array of strings: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("wallet file entry {index} is not a usable key: {source}")]
    BadKey { index: usize, source: ChainError },

    #[error("wallet file contains no keys")]
    Empty,
}

/// Persist `wallets` as an ordered list of private keys.
pub fn save_wallets(path: &Path, wallets: &[Wallet]) -> Result<(), StoreError> {
    let keys: Vec<String> = wallets.iter().map(Wallet::private_key_hex).collect();
    let json = serde_json::to_string_pretty(&keys)?;
    std::fs::write(path, json)?;
    tracing::info!(count = wallets.len(), path = %path.display(), "wallets saved");
    Ok(())
}

/// Load wallets from `path` in stored order, failing loudly on a bad file.
pub fn load_wallets(path: &Path) -> Result<Vec<Wallet>, StoreError> {
    let content = std::fs::read_to_string(path)?;
    let keys: Vec<String> = serde_json::from_str(&content)?;
    if keys.is_empty() {
        return Err(StoreError::Empty);
    }

    let wallets = keys
        .iter()
        .enumerate()
        .map(|(index, key)| {
            Wallet::from_private_key_hex(key).map_err(|source| StoreError::BadKey { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(count = wallets.len(), path = %path.display(), "wallets loaded");
    Ok(wallets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("minter-store-{}-{}.json", std::process::id(), name))
    }

    #[test]
    fn test_round_trip_preserves_count_order_and_keys() {
        let path = temp_path("roundtrip");
        let wallets: Vec<Wallet> = (0..4).map(|_| Wallet::generate()).collect();

        save_wallets(&path, &wallets).unwrap();
        let loaded = load_wallets(&path).unwrap();

        assert_eq!(loaded.len(), wallets.len());
        for (original, restored) in wallets.iter().zip(&loaded) {
            assert_eq!(original.address(), restored.address());
            assert_eq!(original.private_key_hex(), restored.private_key_hex());
        }

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_errors() {
        let result = load_wallets(Path::new("no-such-wallet-file.json"));
        assert!(matches!(result, Err(StoreError::Io(_))));
    }

    #[test]
    fn test_malformed_file_errors() {
        let path = temp_path("malformed");
        std::fs::write(&path, r#"{"not": "an array"}"#).unwrap();
        assert!(matches!(load_wallets(&path), Err(StoreError::Malformed(_))));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_bad_key_entry_reports_index() {
        let path = temp_path("badkey");
        let good = Wallet::generate().private_key_hex();
        std::fs::write(&path, format!(r#"["{}", "0xdead"]"#, good)).unwrap();

        match load_wallets(&path) {
            Err(StoreError::BadKey { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected BadKey, got {:?}", other.map(|w| w.len())),
        }

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_empty_file_is_rejected() {
        let path = temp_path("empty");
        std::fs::write(&path, "[]").unwrap();
        assert!(matches!(load_wallets(&path), Err(StoreError::Empty)));
        std::fs::remove_file(&path).unwrap();
    }
}
