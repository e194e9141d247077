//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! minter.toml
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → MinterConfig (validated, immutable)
//!
//! The main account's private key never lives in the file; it is read from
//! the environment by `chain::account::Wallet::from_env`.
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; one batch run, one config
//! - All fields have defaults to allow a zero-config first run
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_or_default, ConfigError};
pub use schema::MinterConfig;
pub use schema::TransactionOptions;
