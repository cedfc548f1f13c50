pub mod chain;
pub mod constants;
pub mod error;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

pub use chain::Chain;
pub use error::{LedgerError, Result};

/// Bytes fed to SHA-256 for a block's content hash.
///
/// Layout: `len(transaction) as u64 LE`, transaction bytes, `nonce as i64 LE`,
/// `len(previous_hash) as u64 LE`, previous hash bytes. The length prefixes
/// keep the encoding unambiguous, so `("ab", 1, "c")` and `("a", 1, "bc")`
/// never share a preimage.
pub fn preimage_bytes(transaction: &str, nonce: i64, previous_hash: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(8 + transaction.len() + 8 + 8 + previous_hash.len());
    bytes.extend_from_slice(&(transaction.len() as u64).to_le_bytes());
    bytes.extend_from_slice(transaction.as_bytes());
    bytes.extend_from_slice(&nonce.to_le_bytes());
    bytes.extend_from_slice(&(previous_hash.len() as u64).to_le_bytes());
    bytes.extend_from_slice(previous_hash.as_bytes());
    bytes
}

/// Content hash of a block: lowercase hex SHA-256 over [`preimage_bytes`].
pub fn hash_block(transaction: &str, nonce: i64, previous_hash: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(preimage_bytes(transaction, nonce, previous_hash));
    hex::encode(hasher.finalize())
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub transaction: String,
    pub nonce: i64,
    pub previous_hash: String,
    pub current_hash: String,
}

impl Block {
    pub fn new(transaction: impl Into<String>, nonce: i64, previous_hash: impl Into<String>) -> Self {
        let transaction = transaction.into();
        let previous_hash = previous_hash.into();
        let current_hash = hash_block(&transaction, nonce, &previous_hash);
        Self {
            transaction,
            nonce,
            previous_hash,
            current_hash,
        }
    }

    /// The logical predecessor of the first real block. Every field is empty,
    /// including `current_hash`, which is what the first block links to.
    pub const fn genesis() -> Self {
        Self {
            transaction: String::new(),
            nonce: 0,
            previous_hash: String::new(),
            current_hash: String::new(),
        }
    }

    pub fn compute_hash(&self) -> String {
        hash_block(&self.transaction, self.nonce, &self.previous_hash)
    }

    /// True when the stored `current_hash` matches the block's own fields.
    pub fn is_consistent(&self) -> bool {
        self.current_hash == self.compute_hash()
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Transaction: {}", self.transaction)?;
        writeln!(f, "Nonce: {}", self.nonce)?;
        writeln!(f, "Previous Hash: {}", self.previous_hash)?;
        writeln!(f, "Current Hash: {}", self.current_hash)
    }
}
