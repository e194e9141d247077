//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (wallet count, retry budget, gas settings)
//! - Check the node URL actually parses
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: MinterConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::MinterConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("node.url '{0}' is not a valid URL")]
    InvalidNodeUrl(String),

    #[error("wallets.count must be at least 1")]
    ZeroWalletCount,

    #[error("wallets.file must not be empty")]
    EmptyWalletFile,

    #[error("funding.amount_apt must be positive")]
    NonPositiveFundingAmount,

    #[error("retries.max_attempts must be at least 1")]
    ZeroRetryBudget,

    #[error("transaction.{0} must be positive")]
    ZeroTransactionOption(&'static str),
}

/// Validate a parsed configuration, collecting every violation.
pub fn validate_config(config: &MinterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if Url::parse(&config.node.url).is_err() {
        errors.push(ValidationError::InvalidNodeUrl(config.node.url.clone()));
    }

    if config.wallets.count == 0 {
        errors.push(ValidationError::ZeroWalletCount);
    }

    if config.wallets.file.is_empty() {
        errors.push(ValidationError::EmptyWalletFile);
    }

    if config.funding.amount_apt <= 0.0 {
        errors.push(ValidationError::NonPositiveFundingAmount);
    }

    if config.retries.max_attempts == 0 {
        errors.push(ValidationError::ZeroRetryBudget);
    }

    if config.transaction.max_gas_amount == 0 {
        errors.push(ValidationError::ZeroTransactionOption("max_gas_amount"));
    }
    if config.transaction.wait_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTransactionOption("wait_timeout_secs"));
    }
    if config.transaction.poll_interval_ms == 0 {
        errors.push(ValidationError::ZeroTransactionOption("poll_interval_ms"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
