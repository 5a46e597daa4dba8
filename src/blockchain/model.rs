use log::{debug, info};

use super::{BLOCK_REWARD, Block};
use crate::error::TxError;
use crate::transaction::Transaction;

/// In-memory ledger: the block chain plus the pending transaction pool.
///
/// Both live in one value on purpose: `mine_next` must consume the pool and
/// extend the chain atomically, so callers guard the whole `Ledger` with a
/// single lock rather than synchronizing two collections separately.
#[derive(Debug)]
pub struct Ledger {
    pub chain: Vec<Block>,
    pub pending: Vec<Transaction>,
    difficulty: u32,
}

impl Ledger {
    /// Initialize with a genesis block and an empty pool.
    pub fn new(difficulty: u32) -> Self {
        Self {
            chain: vec![Block::genesis(difficulty)],
            pending: Vec::new(),
            difficulty,
        }
    }

    /// The chain tip.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("ledger always holds at least the genesis block")
    }

    /// Admit a transaction into the pending pool, in arrival order.
    ///
    /// Only structural checks run here; signature verification is the
    /// caller's responsibility before submission (the core holds no key
    /// registry to verify against).
    pub fn submit_transaction(&mut self, tx: Transaction) -> Result<(), TxError> {
        if tx.sender.is_empty() {
            return Err(TxError::EmptySender);
        }
        if tx.recipient.is_empty() {
            return Err(TxError::EmptyRecipient);
        }
        if tx.amount == 0 {
            return Err(TxError::ZeroAmount);
        }
        debug!(
            "pool: admitted tx {} ({} -> {}, amount {})",
            tx.hash_hex(),
            tx.sender,
            tx.recipient,
            tx.amount
        );
        self.pending.push(tx);
        Ok(())
    }

    /// Mine the next block: the reward transaction crediting `miner_address`
    /// first, then the pending pool in arrival order. On return the block is
    /// appended and the pool is empty.
    pub fn mine_next(&mut self, miner_address: &str) -> &Block {
        let mut txs = Vec::with_capacity(1 + self.pending.len());
        txs.push(Transaction::reward(miner_address, BLOCK_REWARD));
        txs.append(&mut self.pending);

        let block = Block::mine(self.last_block(), txs, self.difficulty);
        info!(
            "sealed block #{} (hash={}, nonce={}, txs={})",
            block.index,
            block.hash,
            block.nonce,
            block.transactions.len()
        );
        self.chain.push(block);
        self.last_block()
    }

    /// Index of the first block that breaks chain integrity, if any.
    ///
    /// Integrity means hash linkage and proof-of-work only; transaction
    /// signatures are deliberately not re-verified here.
    pub fn first_invalid_index(&self) -> Option<usize> {
        // Genesis is not mined, so only its content hash is checked.
        let genesis = &self.chain[0];
        if genesis.index != 0 || genesis.prev_hash != "0" || genesis.hash != genesis.compute_hash()
        {
            return Some(0);
        }
        for i in 1..self.chain.len() {
            let current = &self.chain[i];
            if current.prev_hash != self.chain[i - 1].hash || !current.is_valid() {
                return Some(i);
            }
        }
        None
    }

    /// Validate the entire chain: linkage, hashes and PoW.
    pub fn is_valid(&self) -> bool {
        self.first_invalid_index().is_none()
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Changing difficulty affects future blocks only.
    pub fn set_difficulty(&mut self, difficulty: u32) {
        self.difficulty = difficulty;
    }
}
