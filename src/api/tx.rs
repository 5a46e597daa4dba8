use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use log::{debug, info, warn};

use super::models::{AppState, NewTxResponse, PoolResponse};
use crate::transaction::Transaction;
use crate::wallet::public_key_from_bytes;

/// Clients that want signature enforcement send the signer's raw public key
/// (hex `x || y`) in this header alongside the signed transaction.
const PUBKEY_HEADER: &str = "X-Pubkey";

/// Submit a new transaction into the pending pool.
///
/// If the transaction carries a signature (and is not a reward), the
/// `X-Pubkey` header is required and verification must pass before the
/// transaction is admitted. Unsigned submissions skip verification; the
/// core has no key registry of its own.
#[post("/tx/")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<Transaction>,
) -> impl Responder {
    let tx = body.into_inner();
    debug!(
        "POST /tx/ - received {} -> {} (amount {}, signed: {})",
        tx.sender,
        tx.recipient,
        tx.amount,
        !tx.signature.is_empty()
    );

    if !tx.is_reward() && !tx.signature.is_empty() {
        let Some(pub_hex) = req
            .headers()
            .get(PUBKEY_HEADER)
            .and_then(|v| v.to_str().ok())
        else {
            return HttpResponse::BadRequest().body("missing X-Pubkey header (hex)");
        };
        let pub_bytes = match hex::decode(pub_hex) {
            Ok(b) => b,
            Err(_) => return HttpResponse::BadRequest().body("invalid pubkey hex"),
        };
        let public_key = match public_key_from_bytes(&pub_bytes) {
            Ok(pk) => pk,
            Err(e) => {
                warn!("POST /tx/ - rejected: {e}");
                return HttpResponse::BadRequest().body(e.to_string());
            }
        };
        match tx.verify(&public_key) {
            Ok(true) => {}
            Ok(false) => {
                warn!("POST /tx/ - rejected: signature verify failed");
                return HttpResponse::BadRequest().body("signature verify failed");
            }
            Err(e) => {
                warn!("POST /tx/ - rejected: {e}");
                return HttpResponse::BadRequest().body(e.to_string());
            }
        }
    }

    let hash = tx.hash_hex();
    {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        if let Err(e) = ledger.submit_transaction(tx) {
            warn!("POST /tx/ - rejected: {e}");
            return HttpResponse::BadRequest().body(e.to_string());
        }
    }

    info!("POST /tx/ - {hash} admitted to pool");
    HttpResponse::Ok().json(NewTxResponse {
        message: "tx added to pool",
        hash,
    })
}

/// List the pending pool.
#[get("/pool/")]
pub async fn get_pool(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(PoolResponse {
        size: ledger.pending.len(),
        transactions: &ledger.pending,
    })
}
