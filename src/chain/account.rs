//! Wallet management and transaction signing.
//!
//! # Security
//! - The main account's private key is loaded ONLY from an environment variable
//! - Keys are never logged; log lines carry addresses only
//! - Address derivation follows the Aptos single-key scheme:
//!   sha3-256(public_key || 0x00)

use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use tiny_keccak::{Hasher, Sha3};

use crate::chain::types::{ChainError, ChainResult};

/// Environment variable name for the main account's private key.
pub const MAIN_KEY_ENV_VAR: &str = "MINTER_MAIN_PRIVATE_KEY";

/// Scheme byte appended to the public key for single-key ed25519 accounts.
const ED25519_SCHEME: u8 = 0x00;

/// A 32-byte account address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountAddress([u8; 32]);

impl AccountAddress {
    /// Derive the address for an ed25519 public key.
    pub fn from_public_key(public_key: &VerifyingKey) -> Self {
        let mut sha3 = Sha3::v256();
        sha3.update(public_key.as_bytes());
        sha3.update(&[ED25519_SCHEME]);
        let mut out = [0u8; 32];
        sha3.finalize(&mut out);
        Self(out)
    }

    /// Full-length hex representation with `0x` prefix, as the node API expects.
    pub fn to_hex(self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Wallet holding an ed25519 signing key and its derived address.
pub struct Wallet {
    signing_key: SigningKey,
    address: AccountAddress,
}

impl Wallet {
    /// Generate a wallet with a fresh random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        let address = AccountAddress::from_public_key(&signing_key.verifying_key());
        Self {
            signing_key,
            address,
        }
    }

    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - 32-byte key as hex (with or without 0x prefix)
    pub fn from_private_key_hex(private_key_hex: &str) -> ChainResult<Self> {
        let key_hex = private_key_hex
            .strip_prefix("0x")
            .unwrap_or(private_key_hex);

        let key_bytes = hex::decode(key_hex)
            .map_err(|e| ChainError::Wallet(format!("invalid private key hex: {}", e)))?;
        let key_bytes: [u8; 32] = key_bytes.try_into().map_err(|b: Vec<u8>| {
            ChainError::Wallet(format!("private key must be 32 bytes, got {}", b.len()))
        })?;

        let signing_key = SigningKey::from_bytes(&key_bytes);
        let address = AccountAddress::from_public_key(&signing_key.verifying_key());
        Ok(Self {
            signing_key,
            address,
        })
    }

    /// Load the main account's wallet from the environment.
    ///
    /// Reads `MINTER_MAIN_PRIVATE_KEY` from the environment.
    pub fn from_env() -> ChainResult<Self> {
        let private_key = std::env::var(MAIN_KEY_ENV_VAR).map_err(|_| {
            ChainError::Wallet(format!("environment variable {} not set", MAIN_KEY_ENV_VAR))
        })?;

        Self::from_private_key_hex(&private_key)
    }

    /// Get the wallet's address.
    pub fn address(&self) -> AccountAddress {
        self.address
    }

    /// Hex-encoded public key with `0x` prefix.
    pub fn public_key_hex(&self) -> String {
        format!(
            "0x{}",
            hex::encode(self.signing_key.verifying_key().as_bytes())
        )
    }

    /// Hex-encoded private key with `0x` prefix, for persistence only.
    pub fn private_key_hex(&self) -> String {
        format!("0x{}", hex::encode(self.signing_key.to_bytes()))
    }

    /// Sign raw message bytes, returning the signature hex-encoded.
    pub fn sign_hex(&self, message: &[u8]) -> String {
        let signature = self.signing_key.sign(message);
        format!("0x{}", hex::encode(signature.to_bytes()))
    }
}

impl Clone for Wallet {
    fn clone(&self) -> Self {
        Self {
            signing_key: self.signing_key.clone(),
            address: self.address,
        }
    }
}

impl std::fmt::Debug for Wallet {
    // Keys stay out of debug output
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_PRIVATE_KEY: &str =
        "0x0102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f20";

    #[test]
    fn test_address_shape() {
        let wallet = Wallet::generate();
        let hex = wallet.address().to_hex();
        assert!(hex.starts_with("0x"));
        assert_eq!(hex.len(), 66);
    }

    #[test]
    fn test_private_key_round_trip() {
        let wallet = Wallet::generate();
        let restored = Wallet::from_private_key_hex(&wallet.private_key_hex()).unwrap();
        assert_eq!(wallet.address(), restored.address());
        assert_eq!(wallet.public_key_hex(), restored.public_key_hex());
    }

    #[test]
    fn test_prefix_is_optional() {
        let with_prefix = Wallet::from_private_key_hex(TEST_PRIVATE_KEY).unwrap();
        let without_prefix =
            Wallet::from_private_key_hex(TEST_PRIVATE_KEY.strip_prefix("0x").unwrap()).unwrap();
        assert_eq!(with_prefix.address(), without_prefix.address());
    }

    #[test]
    fn test_address_derivation_is_deterministic() {
        let a = Wallet::from_private_key_hex(TEST_PRIVATE_KEY).unwrap();
        let b = Wallet::from_private_key_hex(TEST_PRIVATE_KEY).unwrap();
        assert_eq!(a.address(), b.address());
    }

    #[test]
    fn test_distinct_wallets_distinct_addresses() {
        let a = Wallet::generate();
        let b = Wallet::generate();
        assert_ne!(a.address(), b.address());
    }

    #[test]
    fn test_invalid_private_key() {
        let result = Wallet::from_private_key_hex("not-hex");
        assert!(result.is_err());

        let result = Wallet::from_private_key_hex("0xabcd");
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("must be 32 bytes"));
    }

    #[test]
    fn test_sign_hex_shape() {
        let wallet = Wallet::from_private_key_hex(TEST_PRIVATE_KEY).unwrap();
        let signature = wallet.sign_hex(b"message");
        // 64-byte ed25519 signature, hex-encoded with prefix
        assert_eq!(signature.len(), 2 + 128);
    }

    #[test]
    fn test_debug_hides_key_material() {
        let wallet = Wallet::from_private_key_hex(TEST_PRIVATE_KEY).unwrap();
        let debug = format!("{:?}", wallet);
        assert!(!debug.contains(&TEST_PRIVATE_KEY[2..]));
    }
}
