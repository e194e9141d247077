//! Aptos Testnet Batch Minter
//!
//! Generates or loads a pool of wallets, registers and funds each one from a
//! main account, and mints a placeholder NFT collection plus token per
//! wallet, with bounded retries around every on-chain call.
//!
//! # Architecture Overview
//!
//! ```text
//!  minter.toml ──▶ config ──▶ BatchRunner (pipeline/runner)
//!                                 │  per wallet, in order:
//!                                 │  register → fund → collection → token
//!                                 ▼
//!                         MintPipeline (pipeline/mint)
//!                                 │  each remote call wrapped in
//!                                 │  resilience::retry (bounded budget)
//!                                 ▼
//!                         Ledger trait (chain/client)
//!                           ├─ NodeClient: fullnode REST, sign & submit,
//!                           │              poll to finality
//!                           └─ test mocks
//!
//!  wallet keys ◀──▶ store (ordered JSON list, round-trip safe)
//! ```

pub mod chain;
pub mod config;
pub mod pipeline;
pub mod resilience;
pub mod store;

use thiserror::Error;

pub use chain::{Ledger, NodeClient, Wallet};
pub use config::MinterConfig;
pub use pipeline::BatchRunner;
pub use resilience::RetryPolicy;

/// Top-level error for a batch run.
#[derive(Debug, Error)]
pub enum MinterError {
    #[error(transparent)]
    Chain(#[from] chain::ChainError),

    #[error(transparent)]
    Store(#[from] store::StoreError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}
