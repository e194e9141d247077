//! Fullnode REST client with timeout and error handling.
//!
//! # Responsibilities
//! - Query account state and APT balances
//! - Sign and submit entry-function transactions
//!   (encode_submission → ed25519 sign → submit)
//! - Poll a submitted transaction until finality
//!
//! Supports pluggable ledgers via the [`Ledger`] trait; [`NodeClient`] is the
//! real REST implementation, tests provide a recording mock.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::time::{sleep, timeout};
use url::Url;

use crate::chain::account::{AccountAddress, Wallet};
use crate::chain::payload::EntryPayload;
use crate::chain::types::{AccountState, ChainError, ChainResult, TransactionOptions, TxHash};
use crate::config::MinterConfig;

/// CoinStore resource path for APT, angle brackets percent-encoded for URLs.
const APT_COIN_STORE: &str = "0x1::coin::CoinStore%3C0x1::aptos_coin::AptosCoin%3E";

/// The three capabilities the pipeline needs from a ledger.
#[async_trait::async_trait]
pub trait Ledger: Send + Sync {
    /// Current on-chain state of an account, `None` when it does not exist.
    async fn account_state(&self, address: AccountAddress) -> ChainResult<Option<AccountState>>;

    /// APT balance in octas; zero when the account holds no coin store.
    async fn balance(&self, address: AccountAddress) -> ChainResult<u64>;

    /// Sign `payload` with `sender` and submit it, returning the pending hash.
    async fn submit(&self, sender: &Wallet, payload: EntryPayload) -> ChainResult<TxHash>;

    /// Block until `hash` reaches finality; error on execution failure or
    /// deadline.
    async fn wait_for_transaction(&self, hash: &TxHash) -> ChainResult<()>;
}

/// Unsigned transaction body sent to `encode_submission`.
#[derive(Debug, Serialize)]
struct SubmissionRequest<'a> {
    sender: String,
    sequence_number: String,
    max_gas_amount: String,
    gas_unit_price: String,
    expiration_timestamp_secs: String,
    payload: &'a EntryPayload,
}

/// Signature envelope attached on final submission.
#[derive(Debug, Serialize)]
struct Ed25519Signature {
    #[serde(rename = "type")]
    kind: &'static str,
    public_key: String,
    signature: String,
}

#[derive(Debug, Serialize)]
struct SignedSubmissionRequest<'a> {
    #[serde(flatten)]
    transaction: SubmissionRequest<'a>,
    signature: Ed25519Signature,
}

#[derive(Debug, Deserialize)]
struct AccountData {
    sequence_number: String,
}

#[derive(Debug, Deserialize)]
struct CoinStoreData {
    data: CoinData,
}

#[derive(Debug, Deserialize)]
struct CoinData {
    coin: CoinValue,
}

#[derive(Debug, Deserialize)]
struct CoinValue {
    value: String,
}

#[derive(Debug, Deserialize)]
struct PendingTransaction {
    hash: String,
}

/// REST client against an Aptos fullnode.
#[derive(Debug, Clone)]
pub struct NodeClient {
    http: reqwest::Client,
    base: String,
    options: TransactionOptions,
}

impl NodeClient {
    /// Create a client from the loaded configuration.
    pub fn new(config: &MinterConfig) -> ChainResult<Self> {
        let url: Url = config
            .node
            .url
            .parse()
            .map_err(|e| ChainError::Rpc(format!("invalid node URL '{}': {}", config.node.url, e)))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.transaction.wait_timeout_secs))
            .build()
            .map_err(|e| ChainError::Rpc(format!("failed to build HTTP client: {}", e)))?;

        tracing::info!(node_url = %url, "node client initialized");

        Ok(Self {
            http,
            base: config.node.url.trim_end_matches('/').to_string(),
            options: config.transaction,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/v1/{}", self.base, path)
    }

    /// GET a JSON document; `Ok(None)` on 404, `Err` on anything else non-2xx.
    async fn get_json(&self, path: &str) -> ChainResult<Option<Value>> {
        let response = self
            .http
            .get(self.endpoint(path))
            .send()
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::check_status(response).await?;
        let value = response
            .json()
            .await
            .map_err(|e| ChainError::Rpc(format!("malformed node response: {}", e)))?;
        Ok(Some(value))
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> ChainResult<Value> {
        let response = self
            .http
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))?;

        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| ChainError::Rpc(format!("malformed node response: {}", e)))
    }

    async fn check_status(response: reqwest::Response) -> ChainResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Err(ChainError::Api {
            status: status.as_u16(),
            message,
        })
    }

    fn expiration_timestamp(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        now + self.options.expiration_secs
    }
}

#[async_trait::async_trait]
impl Ledger for NodeClient {
    async fn account_state(&self, address: AccountAddress) -> ChainResult<Option<AccountState>> {
        let value = match self.get_json(&format!("accounts/{}", address.to_hex())).await? {
            Some(value) => value,
            None => return Ok(None),
        };
        let account: AccountData = serde_json::from_value(value)
            .map_err(|e| ChainError::Rpc(format!("malformed account data: {}", e)))?;
        let sequence_number = account
            .sequence_number
            .parse()
            .map_err(|e| ChainError::Rpc(format!("bad sequence number: {}", e)))?;
        Ok(Some(AccountState { sequence_number }))
    }

    async fn balance(&self, address: AccountAddress) -> ChainResult<u64> {
        let path = format!("accounts/{}/resource/{}", address.to_hex(), APT_COIN_STORE);
        let value = match self.get_json(&path).await? {
            Some(value) => value,
            // No coin store registered yet means a zero balance
            None => return Ok(0),
        };
        let store: CoinStoreData = serde_json::from_value(value)
            .map_err(|e| ChainError::Rpc(format!("malformed coin store: {}", e)))?;
        store
            .data
            .coin
            .value
            .parse()
            .map_err(|e| ChainError::Rpc(format!("bad coin value: {}", e)))
    }

    async fn submit(&self, sender: &Wallet, payload: EntryPayload) -> ChainResult<TxHash> {
        let state = self
            .account_state(sender.address())
            .await?
            .ok_or_else(|| ChainError::AccountNotFound(sender.address().to_hex()))?;

        let transaction = SubmissionRequest {
            sender: sender.address().to_hex(),
            sequence_number: state.sequence_number.to_string(),
            max_gas_amount: self.options.max_gas_amount.to_string(),
            gas_unit_price: self.options.gas_unit_price.to_string(),
            expiration_timestamp_secs: self.expiration_timestamp().to_string(),
            payload: &payload,
        };

        // The node BCS-encodes the signing message for us; we only sign it.
        let encoded = self
            .post_json("transactions/encode_submission", &transaction)
            .await?;
        let signing_message: String = serde_json::from_value(encoded)
            .map_err(|e| ChainError::Rpc(format!("malformed signing message: {}", e)))?;
        let message_bytes = hex::decode(signing_message.trim_start_matches("0x"))
            .map_err(|e| ChainError::Rpc(format!("bad signing message hex: {}", e)))?;

        let signed = SignedSubmissionRequest {
            signature: Ed25519Signature {
                kind: "ed25519_signature",
                public_key: sender.public_key_hex(),
                signature: sender.sign_hex(&message_bytes),
            },
            transaction,
        };

        let accepted = self.post_json("transactions", &signed).await?;
        let pending: PendingTransaction = serde_json::from_value(accepted)
            .map_err(|e| ChainError::Rpc(format!("malformed submit response: {}", e)))?;

        tracing::debug!(
            sender = %sender.address(),
            function = %payload.function,
            hash = %pending.hash,
            "transaction submitted"
        );
        Ok(TxHash::from(pending.hash))
    }

    async fn wait_for_transaction(&self, hash: &TxHash) -> ChainResult<()> {
        let deadline = Duration::from_secs(self.options.wait_timeout_secs);
        let poll_interval = Duration::from_millis(self.options.poll_interval_ms);

        let result = timeout(deadline, async {
            loop {
                let value = match self
                    .get_json(&format!("transactions/by_hash/{}", hash))
                    .await?
                {
                    Some(value) => value,
                    None => {
                        // Not in mempool yet
                        sleep(poll_interval).await;
                        continue;
                    }
                };

                if value.get("type").and_then(Value::as_str) == Some("pending_transaction") {
                    tracing::debug!(hash = %hash, "transaction pending");
                    sleep(poll_interval).await;
                    continue;
                }

                return match value.get("success").and_then(Value::as_bool) {
                    Some(true) => Ok(()),
                    _ => {
                        let vm_status = value
                            .get("vm_status")
                            .and_then(Value::as_str)
                            .unwrap_or("unknown")
                            .to_string();
                        Err(ChainError::ExecutionFailed {
                            hash: hash.clone(),
                            vm_status,
                        })
                    }
                };
            }
        })
        .await;

        match result {
            Ok(outcome) => outcome,
            Err(_) => Err(ChainError::FinalityTimeout(
                hash.clone(),
                self.options.wait_timeout_secs,
            )),
        }
    }
}
