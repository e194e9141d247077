//! Entry-function payload builders.
//!
//! Payloads are the JSON `entry_function_payload` bodies the fullnode REST API
//! accepts. Integer arguments travel as strings, addresses as full-length hex.

use serde::Serialize;
use serde_json::{json, Value};

use crate::chain::account::AccountAddress;

/// A JSON entry-function payload, ready for submission.
#[derive(Debug, Clone, Serialize)]
pub struct EntryPayload {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<Value>,
}

impl EntryPayload {
    fn new(function: &str, type_arguments: Vec<String>, arguments: Vec<Value>) -> Self {
        Self {
            kind: "entry_function_payload",
            function: function.to_string(),
            type_arguments,
            arguments,
        }
    }
}

/// Register a fresh account on chain, paid for by the sender.
pub fn create_account(target: AccountAddress) -> EntryPayload {
    EntryPayload::new(
        "0x1::aptos_account::create_account",
        vec![],
        vec![json!(target.to_hex())],
    )
}

/// Transfer `amount_octas` of APT to `target`.
pub fn transfer(target: AccountAddress, amount_octas: u64) -> EntryPayload {
    EntryPayload::new(
        "0x1::aptos_account::transfer",
        vec![],
        vec![json!(target.to_hex()), json!(amount_octas.to_string())],
    )
}

/// Create a token collection under the sender's account.
pub fn create_collection(name: &str, description: &str, uri: &str, maximum: u64) -> EntryPayload {
    EntryPayload::new(
        "0x3::token::create_collection_script",
        vec![],
        vec![
            json!(name),
            json!(description),
            json!(uri),
            json!(maximum.to_string()),
            // mutate settings: description, uri, maximum
            json!([false, false, false]),
        ],
    )
}

/// Mint a token into an existing collection owned by the sender.
#[allow(clippy::too_many_arguments)]
pub fn create_token(
    collection: &str,
    name: &str,
    description: &str,
    balance: u64,
    maximum: u64,
    uri: &str,
    royalty_payee: AccountAddress,
) -> EntryPayload {
    EntryPayload::new(
        "0x3::token::create_token_script",
        vec![],
        vec![
            json!(collection),
            json!(name),
            json!(description),
            json!(balance.to_string()),
            json!(maximum.to_string()),
            json!(uri),
            json!(royalty_payee.to_hex()),
            // royalty denominator / numerator: no royalty
            json!("0"),
            json!("0"),
            // mutate settings: maximum, uri, royalty, description, properties
            json!([false, false, false, false, false]),
            // property keys, values, types: none
            Value::Array(vec![]),
            Value::Array(vec![]),
            Value::Array(vec![]),
        ],
    )
}
