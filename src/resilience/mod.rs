//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Remote call:
//!     → retry.rs (execute, re-invoke on failure up to the budget)
//!     → backoff.rs (jittered delay between attempts)
//! ```
//!
//! # Design Decisions
//! - The retry policy is an explicit value object, configured once and passed
//!   to every call site
//! - Budget exhaustion returns the final error unchanged; callers decide what
//!   is fatal
//! - Jittered backoff spreads out resubmissions against a shared fullnode

pub mod backoff;
pub mod retry;

pub use retry::{retry, RetryPolicy};
