//! Batch orchestration across the wallet pool.
//!
//! The runner obtains the wallet set (generate-and-persist or load), funds
//! every wallet from the main account, then runs the mint pipeline wallet by
//! wallet. Everything is sequential: one in-flight transaction at a time, so
//! the main account's sequence numbers never race.

use std::path::Path;

use crate::chain::account::Wallet;
use crate::chain::client::Ledger;
use crate::chain::payload;
use crate::chain::types::ChainResult;
use crate::config::MinterConfig;
use crate::pipeline::mint::MintPipeline;
use crate::resilience::retry;
use crate::store;
use crate::MinterError;

/// Drives the full batch run.
pub struct BatchRunner<L: Ledger> {
    ledger: L,
    config: MinterConfig,
    main_wallet: Wallet,
}

impl<L: Ledger> BatchRunner<L> {
    pub fn new(ledger: L, config: MinterConfig, main_wallet: Wallet) -> Self {
        Self {
            ledger,
            config,
            main_wallet,
        }
    }

    /// Run the whole batch. A wallet whose retry budget exhausts aborts the
    /// remaining wallets; there is no per-wallet isolation.
    pub async fn run(&self) -> Result<(), MinterError> {
        let mode = if self.config.wallets.use_existing {
            "load"
        } else {
            "generate"
        };
        tracing::info!(
            mode,
            count = self.config.wallets.count,
            main_account = %self.main_wallet.address(),
            "starting batch run"
        );

        let wallets = if self.config.wallets.use_existing {
            store::load_wallets(Path::new(&self.config.wallets.file))?
        } else {
            self.generate_wallets().await?
        };

        self.fund_all(&wallets).await?;
        self.mint_all(&wallets).await?;

        tracing::info!(wallets = wallets.len(), "batch run complete");
        Ok(())
    }

    /// Generate fresh wallets, register each on chain, persist the keys in
    /// generation order.
    async fn generate_wallets(&self) -> Result<Vec<Wallet>, MinterError> {
        let wallets: Vec<Wallet> = (0..self.config.wallets.count)
            .map(|_| Wallet::generate())
            .collect();

        for wallet in &wallets {
            self.register(wallet).await?;
            tracing::info!(address = %wallet.address(), "wallet registered");
        }

        store::save_wallets(Path::new(&self.config.wallets.file), &wallets)?;
        Ok(wallets)
    }

    /// Register one wallet via the main account, skipping wallets that
    /// already exist on chain.
    async fn register(&self, wallet: &Wallet) -> ChainResult<()> {
        let policy = self.config.retries;

        let existing = retry(policy, "account_state", || {
            self.ledger.account_state(wallet.address())
        })
        .await?;
        if existing.is_some() {
            tracing::debug!(address = %wallet.address(), "account already on chain");
            return Ok(());
        }

        let hash = retry(policy, "create_account", || {
            self.ledger
                .submit(&self.main_wallet, payload::create_account(wallet.address()))
        })
        .await?;
        retry(policy, "wait_create_account", || {
            self.ledger.wait_for_transaction(&hash)
        })
        .await?;
        Ok(())
    }

    /// Fund every wallet sequentially before any minting starts.
    async fn fund_all(&self, wallets: &[Wallet]) -> ChainResult<()> {
        let pipeline = MintPipeline::new(&self.ledger, self.config.retries);
        let amount = self.config.funding.amount_octas();

        for wallet in wallets {
            pipeline
                .fund(&self.main_wallet, wallet.address(), amount)
                .await?;
        }
        Ok(())
    }

    /// Run the collection + token steps for every wallet, one at a time.
    async fn mint_all(&self, wallets: &[Wallet]) -> ChainResult<()> {
        let pipeline = MintPipeline::new(&self.ledger, self.config.retries);

        for wallet in wallets {
            pipeline.mint(wallet).await?;
        }
        Ok(())
    }
}
