//! Batch pipeline subsystem.
//!
//! # Data Flow
//! ```text
//! runner.rs (generate|load wallets → register → persist)
//!     → mint.rs fund     (balance check → transfer → wait)
//!     → mint.rs mint     (create collection → wait → create token → wait)
//! ```
//!
//! # Design Decisions
//! - Wallets are processed strictly in order, to completion, one at a time
//! - Retry granularity is the single remote call; a failed step aborts the
//!   whole run
//! - Mutating steps check state first (registered? funded?) so a retried or
//!   restarted run does not duplicate on-chain effects

pub mod mint;
pub mod runner;

pub use mint::MintPipeline;
pub use runner::BatchRunner;
