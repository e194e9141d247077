//! Chain-specific types and error definitions.

use thiserror::Error;

// Re-export TransactionOptions from config module to avoid duplication
pub use crate::config::schema::TransactionOptions;

/// Smallest on-chain unit per APT.
pub const OCTAS_PER_APT: u64 = 100_000_000;

/// Hash of a submitted transaction, as returned by the node (`0x…`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TxHash(pub String);

impl std::fmt::Display for TxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TxHash {
    fn from(hash: String) -> Self {
        Self(hash)
    }
}

/// On-chain state of an account, as far as the minter needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountState {
    /// Next sequence number the account may sign with.
    pub sequence_number: u64,
}

/// Errors that can occur during chain operations.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Transport-level failure talking to the fullnode.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// The node answered with a non-success status.
    #[error("node returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Transaction was not finalized within the wait deadline.
    #[error("transaction {0} not finalized after {1} seconds")]
    FinalityTimeout(TxHash, u64),

    /// Transaction was committed but its execution failed.
    #[error("transaction {hash} failed on-chain: {vm_status}")]
    ExecutionFailed { hash: TxHash, vm_status: String },

    /// Invalid private key format or signing failure.
    #[error("wallet error: {0}")]
    Wallet(String),

    /// The sender account does not exist on chain yet.
    #[error("account {0} not found on chain")]
    AccountNotFound(String),
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;
