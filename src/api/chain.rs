use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};

use super::models::{
    AppState, ChainResponse, DifficultyResponse, MineRequest, MineResponse, SetDifficultyRequest,
    ValidateResponse,
};
use crate::blockchain::DIFF_MAX;

/// Get the full chain.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    let resp = ChainResponse {
        length: ledger.len(),
        difficulty: ledger.difficulty(),
        chain: &ledger.chain,
    };
    HttpResponse::Ok().json(resp)
}

/// Validate the whole chain: linkage, hashes and PoW.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    let first_invalid_index = ledger.first_invalid_index();
    if let Some(i) = first_invalid_index {
        warn!("chain validation failed at index {i}");
    }
    HttpResponse::Ok().json(ValidateResponse {
        valid: first_invalid_index.is_none(),
        length: ledger.len(),
        first_invalid_index,
    })
}

/// Mine the next block from the pending pool, crediting `miner_address`
/// with the block reward. Holds the ledger lock for the whole search.
#[post("/mine/")]
pub async fn mine_block(state: web::Data<AppState>, req: web::Json<MineRequest>) -> impl Responder {
    let miner_address = req.miner_address.trim().to_string();
    if miner_address.is_empty() {
        return HttpResponse::BadRequest().body("miner_address required");
    }

    let mut ledger = state.ledger.lock().expect("mutex poisoned");
    let block = ledger.mine_next(&miner_address);
    info!("mined block #{} for {}", block.index, miner_address);
    HttpResponse::Ok().json(MineResponse {
        message: "new block mined",
        block,
    })
}

/// Get current PoW difficulty.
#[get("/difficulty/")]
pub async fn get_difficulty(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(DifficultyResponse {
        difficulty: ledger.difficulty(),
    })
}

/// Update PoW difficulty (affects future blocks only).
#[post("/difficulty/")]
pub async fn set_difficulty(
    state: web::Data<AppState>,
    body: web::Json<SetDifficultyRequest>,
) -> impl Responder {
    if body.difficulty > DIFF_MAX {
        return HttpResponse::BadRequest().body("difficulty too high for dev mode (max 6)");
    }
    let mut ledger = state.ledger.lock().expect("mutex poisoned");
    ledger.set_difficulty(body.difficulty);
    HttpResponse::Ok().json(DifficultyResponse {
        difficulty: ledger.difficulty(),
    })
}
