use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::blockchain::{Block, DEFAULT_DIFFICULTY, Ledger};
use crate::transaction::Transaction;

/// Shared application state. One mutex guards the whole ledger so the chain
/// and the pending pool always change together.
pub struct AppState {
    pub ledger: Mutex<Ledger>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            ledger: Mutex::new(Ledger::new(DEFAULT_DIFFICULTY)),
        }
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub length: usize,
    pub difficulty: u32,
    pub chain: &'a [Block],
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
    pub first_invalid_index: Option<usize>,
}

#[derive(Deserialize)]
pub struct MineRequest {
    pub miner_address: String,
}

#[derive(Serialize)]
pub struct MineResponse<'a> {
    pub message: &'static str,
    pub block: &'a Block,
}

#[derive(Serialize)]
pub struct DifficultyResponse {
    pub difficulty: u32,
}

#[derive(Deserialize)]
pub struct SetDifficultyRequest {
    pub difficulty: u32,
}

/* ---------- TX API Models ---------- */

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: &'static str,
    pub hash: String,
}

#[derive(Serialize)]
pub struct PoolResponse<'a> {
    pub size: usize,
    pub transactions: &'a [Transaction],
}

/* ---------- Wallet API Models ---------- */

#[derive(Serialize)]
pub struct NewWalletResponse {
    pub address: String,
    pub pubkey: String,
}
