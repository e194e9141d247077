//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the config file,
//! and every field has a default so a missing `minter.toml` still runs.

use serde::{Deserialize, Serialize};

use crate::chain::types::OCTAS_PER_APT;
use crate::resilience::retry::RetryPolicy;

/// Root configuration for the batch minter.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MinterConfig {
    /// Fullnode endpoint settings.
    pub node: NodeConfig,

    /// Wallet pool settings (count, persistence, mode).
    pub wallets: WalletConfig,

    /// Funding amount per wallet.
    pub funding: FundingConfig,

    /// Retry policy applied to every remote call.
    pub retries: RetryPolicy,

    /// Per-transaction gas and expiry options.
    pub transaction: TransactionOptions,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Fullnode endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Base URL of the Aptos fullnode REST API.
    pub url: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            url: "https://fullnode.testnet.aptoslabs.com".to_string(),
        }
    }
}

/// Wallet pool configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Number of wallets to generate when not reusing an existing set.
    pub count: usize,

    /// Load wallets from `file` instead of generating fresh ones.
    pub use_existing: bool,

    /// Path of the persisted private-key list.
    pub file: String,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            count: 5,
            use_existing: false,
            file: "private.json".to_string(),
        }
    }
}

/// Funding configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FundingConfig {
    /// APT transferred to each wallet from the main account.
    pub amount_apt: f64,
}

impl FundingConfig {
    /// Funding amount in octas, the smallest on-chain unit.
    pub fn amount_octas(&self) -> u64 {
        (self.amount_apt * OCTAS_PER_APT as f64).round() as u64
    }
}

impl Default for FundingConfig {
    fn default() -> Self {
        Self { amount_apt: 0.15 }
    }
}

/// Gas and expiry options applied to every submitted transaction.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct TransactionOptions {
    /// Maximum gas units a transaction may burn.
    pub max_gas_amount: u64,

    /// Gas unit price in octas.
    pub gas_unit_price: u64,

    /// Seconds from submission until the transaction expires.
    pub expiration_secs: u64,

    /// Deadline for a single wait-for-finality poll loop, in seconds.
    pub wait_timeout_secs: u64,

    /// Interval between finality polls, in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for TransactionOptions {
    fn default() -> Self {
        Self {
            max_gas_amount: 5_000,
            gas_unit_price: 100,
            expiration_secs: 600,
            wait_timeout_secs: 30,
            poll_interval_ms: 1_000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
