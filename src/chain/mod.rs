//! Chain access subsystem.
//!
//! # Data Flow
//! ```text
//! pipeline step
//!     → payload.rs (build entry_function_payload JSON)
//!     → client.rs  (sequence number lookup, encode_submission, sign, submit)
//!     → client.rs  (poll by_hash until finality)
//! ```
//!
//! The pipeline only depends on the [`client::Ledger`] trait; the REST
//! implementation and the test mocks are interchangeable behind it.

pub mod account;
pub mod client;
pub mod payload;
pub mod types;

pub use account::{AccountAddress, Wallet};
pub use client::{Ledger, NodeClient};
pub use types::{ChainError, ChainResult, TxHash};
