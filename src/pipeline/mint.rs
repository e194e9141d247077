//! Per-wallet pipeline steps: fund, create collection, mint token.
//!
//! Step ordering is fixed and each step waits for finality before the next
//! one submits. Retries happen per remote call, never per step sequence.

use rand::Rng;

use crate::chain::account::{AccountAddress, Wallet};
use crate::chain::client::Ledger;
use crate::chain::payload;
use crate::chain::types::ChainResult;
use crate::resilience::{retry, RetryPolicy};

/// Inclusive range the random collection/token identifier is drawn from.
pub const COLLECTION_ID_MIN: u32 = 11_111;
pub const COLLECTION_ID_MAX: u32 = 99_999;

/// Fixed descriptive fields of the placeholder collection and token.
pub const COLLECTION_DESCRIPTION: &str = "Martian Testnet NFT";
pub const COLLECTION_URI: &str = "https://aptos.dev";
pub const TOKEN_DESCRIPTION: &str = "OG Martian";
pub const TOKEN_URI: &str =
    "https://gateway.pinata.cloud/ipfs/QmXiSJPXJ8mf9LHijv6xFH1AtGef4h8v5VPEKZgjR4nzvM";

/// One token minted per wallet.
pub const TOKEN_SUPPLY: u64 = 1;

/// Maximum supply marker used by the testnet scripts (2^53 - 1).
pub const ASSET_MAXIMUM: u64 = 9_007_199_254_740_991;

/// Draw the random numeric identifier tagged onto a wallet's collection.
pub fn draw_collection_id() -> u32 {
    rand::thread_rng().gen_range(COLLECTION_ID_MIN..=COLLECTION_ID_MAX)
}

pub fn collection_name(id: u32) -> String {
    format!("Martian Testnet{}", id)
}

pub fn token_name(id: u32) -> String {
    format!("Martian NFT #{}", id)
}

/// Runs the fixed step sequence for a single wallet against a ledger.
pub struct MintPipeline<'a, L: Ledger> {
    ledger: &'a L,
    policy: RetryPolicy,
}

impl<'a, L: Ledger> MintPipeline<'a, L> {
    pub fn new(ledger: &'a L, policy: RetryPolicy) -> Self {
        Self { ledger, policy }
    }

    /// Transfer `amount_octas` from `funder` to `target` and wait for
    /// finality.
    ///
    /// The balance is checked first so a re-run (or a retry after a false
    /// timeout) never double-transfers into an already funded wallet.
    pub async fn fund(
        &self,
        funder: &Wallet,
        target: AccountAddress,
        amount_octas: u64,
    ) -> ChainResult<()> {
        let balance = retry(self.policy, "query_balance", || self.ledger.balance(target)).await?;
        if balance >= amount_octas {
            tracing::info!(
                address = %target,
                balance,
                "wallet already funded, skipping transfer"
            );
            return Ok(());
        }

        let hash = retry(self.policy, "transfer", || {
            self.ledger
                .submit(funder, payload::transfer(target, amount_octas))
        })
        .await?;
        retry(self.policy, "wait_transfer", || {
            self.ledger.wait_for_transaction(&hash)
        })
        .await?;

        tracing::info!(address = %target, amount_octas, "funds transferred");
        Ok(())
    }

    /// Create the wallet's collection and mint one token into it.
    pub async fn mint(&self, wallet: &Wallet) -> ChainResult<()> {
        let id = draw_collection_id();
        let collection = collection_name(id);

        let hash = retry(self.policy, "create_collection", || {
            self.ledger.submit(
                wallet,
                payload::create_collection(
                    &collection,
                    COLLECTION_DESCRIPTION,
                    COLLECTION_URI,
                    ASSET_MAXIMUM,
                ),
            )
        })
        .await?;
        retry(self.policy, "wait_create_collection", || {
            self.ledger.wait_for_transaction(&hash)
        })
        .await?;
        tracing::info!(address = %wallet.address(), collection_id = id, "collection created");

        let token = token_name(id);
        let hash = retry(self.policy, "create_token", || {
            self.ledger.submit(
                wallet,
                payload::create_token(
                    &collection,
                    &token,
                    TOKEN_DESCRIPTION,
                    TOKEN_SUPPLY,
                    ASSET_MAXIMUM,
                    TOKEN_URI,
                    wallet.address(),
                ),
            )
        })
        .await?;
        retry(self.policy, "wait_create_token", || {
            self.ledger.wait_for_transaction(&hash)
        })
        .await?;
        tracing::info!(address = %wallet.address(), token_id = id, "token minted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_id_stays_in_range() {
        for _ in 0..1_000 {
            let id = draw_collection_id();
            assert!((COLLECTION_ID_MIN..=COLLECTION_ID_MAX).contains(&id));
        }
    }

    #[test]
    fn test_names_share_the_identifier() {
        assert_eq!(collection_name(12345), "Martian Testnet12345");
        assert_eq!(token_name(12345), "Martian NFT #12345");
    }
}
