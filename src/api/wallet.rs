use actix_web::{HttpResponse, Responder, post};
use log::info;

use super::models::NewWalletResponse;
use crate::wallet::Wallet;

/// Create a fresh wallet. Only the address and the raw public key (hex
/// `x || y`) are returned; the private key stays on the server side of the
/// call and is dropped with the response.
#[post("/wallet/new/")]
pub async fn create_wallet() -> impl Responder {
    match Wallet::generate() {
        Ok(wallet) => {
            let resp = NewWalletResponse {
                address: wallet.address(),
                pubkey: hex::encode(wallet.public_key_bytes()),
            };
            info!("generated wallet {}", resp.address);
            HttpResponse::Ok().json(resp)
        }
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}
