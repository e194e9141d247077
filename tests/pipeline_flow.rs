//! Pipeline and batch-runner tests against a recording mock ledger.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use testnet_minter::chain::payload::EntryPayload;
use testnet_minter::chain::types::AccountState;
use testnet_minter::chain::{AccountAddress, ChainError, ChainResult, Ledger, TxHash, Wallet};
use testnet_minter::config::MinterConfig;
use testnet_minter::pipeline::{BatchRunner, MintPipeline};
use testnet_minter::resilience::RetryPolicy;
use testnet_minter::store;

const TRANSFER: &str = "0x1::aptos_account::transfer";
const CREATE_ACCOUNT: &str = "0x1::aptos_account::create_account";
const CREATE_COLLECTION: &str = "0x3::token::create_collection_script";
const CREATE_TOKEN: &str = "0x3::token::create_token_script";

/// One observed ledger interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Op {
    Submit { sender: String, function: String },
    Wait { hash: String },
}

/// In-memory ledger that records every interaction.
#[derive(Clone)]
struct MockLedger {
    ops: Arc<Mutex<Vec<Op>>>,
    registered: Arc<Mutex<HashSet<String>>>,
    balances: Arc<Mutex<HashMap<String, u64>>>,
    /// Remaining create_token submissions that succeed; `None` = unlimited.
    token_budget: Arc<Mutex<Option<u32>>>,
    /// Report every account as already existing on chain.
    all_accounts_exist: bool,
    next_hash: Arc<AtomicU32>,
}

impl MockLedger {
    fn new() -> Self {
        Self {
            ops: Arc::new(Mutex::new(Vec::new())),
            registered: Arc::new(Mutex::new(HashSet::new())),
            balances: Arc::new(Mutex::new(HashMap::new())),
            token_budget: Arc::new(Mutex::new(None)),
            all_accounts_exist: false,
            next_hash: Arc::new(AtomicU32::new(0)),
        }
    }

    fn with_token_budget(self, budget: u32) -> Self {
        *self.token_budget.lock().unwrap() = Some(budget);
        self
    }

    fn with_all_accounts_existing(mut self) -> Self {
        self.all_accounts_exist = true;
        self
    }

    fn set_balance(&self, address: AccountAddress, octas: u64) {
        self.balances
            .lock()
            .unwrap()
            .insert(address.to_hex(), octas);
    }

    fn ops(&self) -> Vec<Op> {
        self.ops.lock().unwrap().clone()
    }

    fn submits_of(&self, function: &str) -> usize {
        self.ops()
            .iter()
            .filter(|op| matches!(op, Op::Submit { function: f, .. } if f == function))
            .count()
    }
}

#[async_trait::async_trait]
impl Ledger for MockLedger {
    async fn account_state(&self, address: AccountAddress) -> ChainResult<Option<AccountState>> {
        if self.all_accounts_exist
            || self.registered.lock().unwrap().contains(&address.to_hex())
        {
            Ok(Some(AccountState { sequence_number: 0 }))
        } else {
            Ok(None)
        }
    }

    async fn balance(&self, address: AccountAddress) -> ChainResult<u64> {
        Ok(*self
            .balances
            .lock()
            .unwrap()
            .get(&address.to_hex())
            .unwrap_or(&0))
    }

    async fn submit(&self, sender: &Wallet, payload: EntryPayload) -> ChainResult<TxHash> {
        self.ops.lock().unwrap().push(Op::Submit {
            sender: sender.address().to_hex(),
            function: payload.function.clone(),
        });

        if payload.function == CREATE_TOKEN {
            let mut budget = self.token_budget.lock().unwrap();
            if let Some(remaining) = budget.as_mut() {
                if *remaining == 0 {
                    return Err(ChainError::Rpc("injected token failure".to_string()));
                }
                *remaining -= 1;
            }
        }

        if payload.function == CREATE_ACCOUNT {
            if let Some(target) = payload.arguments[0].as_str() {
                self.registered.lock().unwrap().insert(target.to_string());
            }
        }

        let n = self.next_hash.fetch_add(1, Ordering::SeqCst);
        Ok(TxHash::from(format!("0x{:04x}", n)))
    }

    async fn wait_for_transaction(&self, hash: &TxHash) -> ChainResult<()> {
        self.ops.lock().unwrap().push(Op::Wait {
            hash: hash.to_string(),
        });
        Ok(())
    }
}

fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        base_delay_ms: 1,
        max_delay_ms: 5,
    }
}

fn test_config(wallet_file: &PathBuf, count: usize) -> MinterConfig {
    let mut config = MinterConfig::default();
    config.wallets.count = count;
    config.wallets.file = wallet_file.display().to_string();
    config.retries = fast_policy();
    config
}

fn temp_wallet_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("minter-test-{}-{}.json", std::process::id(), name))
}

#[tokio::test]
async fn test_pipeline_step_ordering() {
    let ledger = MockLedger::new();
    let pipeline = MintPipeline::new(&ledger, fast_policy());
    let funder = Wallet::generate();
    let wallet = Wallet::generate();

    pipeline
        .fund(&funder, wallet.address(), 15_000_000)
        .await
        .unwrap();
    pipeline.mint(&wallet).await.unwrap();

    let ops = ledger.ops();
    assert_eq!(ops.len(), 6);

    // fund → wait → collection → wait → token → wait, never interleaved
    let functions: Vec<&str> = ops
        .iter()
        .filter_map(|op| match op {
            Op::Submit { function, .. } => Some(function.as_str()),
            Op::Wait { .. } => None,
        })
        .collect();
    assert_eq!(functions, vec![TRANSFER, CREATE_COLLECTION, CREATE_TOKEN]);

    // every submit is finalized before the next one goes out
    for pair in ops.chunks(2) {
        assert!(matches!(pair[0], Op::Submit { .. }));
        assert!(matches!(pair[1], Op::Wait { .. }));
    }

    // collection and token are signed by the wallet itself, funding by the funder
    match &ops[0] {
        Op::Submit { sender, .. } => assert_eq!(sender, &funder.address().to_hex()),
        other => panic!("expected submit, got {:?}", other),
    }
    match &ops[2] {
        Op::Submit { sender, .. } => assert_eq!(sender, &wallet.address().to_hex()),
        other => panic!("expected submit, got {:?}", other),
    }
}

#[tokio::test]
async fn test_funding_skips_already_funded_wallet() {
    let ledger = MockLedger::new();
    let pipeline = MintPipeline::new(&ledger, fast_policy());
    let funder = Wallet::generate();
    let wallet = Wallet::generate();

    ledger.set_balance(wallet.address(), 20_000_000);

    pipeline
        .fund(&funder, wallet.address(), 15_000_000)
        .await
        .unwrap();

    // balance covered the target, so nothing was submitted
    assert!(ledger.ops().is_empty());
}

#[tokio::test]
async fn test_generate_mode_batch_aborts_on_exhausted_mint() {
    let wallet_file = temp_wallet_file("abort");
    // wallet #1's token mints, every later create_token submission fails
    let ledger = MockLedger::new().with_token_budget(1);
    let config = test_config(&wallet_file, 3);

    let runner = BatchRunner::new(ledger.clone(), config, Wallet::generate());
    let result = runner.run().await;
    assert!(result.is_err(), "exhausted mint budget must abort the run");

    // all three wallets were registered and persisted before minting began
    assert_eq!(ledger.submits_of(CREATE_ACCOUNT), 3);
    assert_eq!(store::load_wallets(&wallet_file).unwrap().len(), 3);

    // all three were funded first
    assert_eq!(ledger.submits_of(TRANSFER), 3);

    // wallet #3's pipeline never started after wallet #2 exhausted its budget
    assert_eq!(ledger.submits_of(CREATE_COLLECTION), 2);
    // one successful token submit plus three failed attempts for wallet #2
    assert_eq!(ledger.submits_of(CREATE_TOKEN), 4);

    std::fs::remove_file(&wallet_file).unwrap();
}

#[tokio::test]
async fn test_generate_mode_skips_registration_for_existing_accounts() {
    let wallet_file = temp_wallet_file("existing");
    let ledger = MockLedger::new().with_all_accounts_existing();
    let config = test_config(&wallet_file, 2);

    let runner = BatchRunner::new(ledger.clone(), config, Wallet::generate());
    runner.run().await.unwrap();

    assert_eq!(ledger.submits_of(CREATE_ACCOUNT), 0);
    assert_eq!(ledger.submits_of(TRANSFER), 2);
    assert_eq!(ledger.submits_of(CREATE_COLLECTION), 2);
    assert_eq!(ledger.submits_of(CREATE_TOKEN), 2);

    std::fs::remove_file(&wallet_file).unwrap();
}

#[tokio::test]
async fn test_load_mode_reuses_persisted_wallets() {
    let wallet_file = temp_wallet_file("load");
    let saved: Vec<Wallet> = (0..2).map(|_| Wallet::generate()).collect();
    store::save_wallets(&wallet_file, &saved).unwrap();

    let ledger = MockLedger::new();
    let mut config = test_config(&wallet_file, 2);
    config.wallets.use_existing = true;

    let runner = BatchRunner::new(ledger.clone(), config, Wallet::generate());
    runner.run().await.unwrap();

    // load mode never registers accounts
    assert_eq!(ledger.submits_of(CREATE_ACCOUNT), 0);
    assert_eq!(ledger.submits_of(TRANSFER), 2);
    assert_eq!(ledger.submits_of(CREATE_TOKEN), 2);

    // the funded wallets are exactly the persisted ones, in order
    let funded: Vec<String> = ledger
        .ops()
        .iter()
        .filter_map(|op| match op {
            Op::Submit { function, sender } if function == CREATE_COLLECTION => {
                Some(sender.clone())
            }
            _ => None,
        })
        .collect();
    let expected: Vec<String> = saved.iter().map(|w| w.address().to_hex()).collect();
    assert_eq!(funded, expected);

    std::fs::remove_file(&wallet_file).unwrap();
}
