use crate::{Block, LedgerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// Returned by [`Chain::latest`] on an empty chain. Its empty `current_hash`
/// becomes the `previous_hash` of the first appended block.
pub static GENESIS: Block = Block::genesis();

/// Append-only, in-memory sequence of hash-linked blocks.
///
/// Only one writer is expected; every mutating call takes `&mut self`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    blocks: Vec<Block>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Link a new block to the current tip and push it.
    pub fn append(&mut self, transaction: impl Into<String>, nonce: i64) -> &Block {
        let previous_hash = self.latest().current_hash.clone();
        let block = Block::new(transaction, nonce, previous_hash);
        debug!(
            index = self.blocks.len(),
            nonce,
            hash = %block.current_hash,
            "appended block"
        );
        self.blocks.push(block);
        &self.blocks[self.blocks.len() - 1]
    }

    /// Last block, or [`GENESIS`] when nothing has been appended yet.
    pub fn latest(&self) -> &Block {
        self.blocks.last().unwrap_or(&GENESIS)
    }

    /// Rewrite a block's transaction and recompute its own hash.
    ///
    /// Out-of-range indices are ignored. Use [`Chain::try_mutate`] to get an
    /// error instead.
    pub fn mutate(&mut self, index: usize, new_transaction: impl Into<String>) {
        if let Err(err) = self.try_mutate(index, new_transaction) {
            warn!(%err, "ignoring mutate");
        }
    }

    /// Strict form of [`Chain::mutate`].
    pub fn try_mutate(&mut self, index: usize, new_transaction: impl Into<String>) -> Result<()> {
        let len = self.blocks.len();
        let block = self
            .blocks
            .get_mut(index)
            .ok_or(LedgerError::IndexOutOfRange { index, len })?;
        block.transaction = new_transaction.into();
        block.current_hash = block.compute_hash();
        debug!(index, hash = %block.current_hash, "mutated block");
        Ok(())
    }

    /// True when every block's `previous_hash` matches its predecessor's
    /// `current_hash`. Chains of 0 or 1 blocks are trivially valid.
    ///
    /// Each block's own hash is not rechecked, so tampering with the last
    /// block goes unnoticed.
    pub fn verify(&self) -> bool {
        self.first_broken_link().is_none()
    }

    /// Index of the first block that does not link to its predecessor.
    pub fn first_broken_link(&self) -> Option<usize> {
        let broken = self
            .blocks
            .windows(2)
            .position(|pair| pair[1].previous_hash != pair[0].current_hash)
            .map(|i| i + 1);
        if let Some(index) = broken {
            info!(index, "chain link broken");
        }
        broken
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, block) in self.blocks.iter().enumerate() {
            writeln!(f, "Block {i}:")?;
            writeln!(f, "{block}")?;
        }
        Ok(())
    }
}
