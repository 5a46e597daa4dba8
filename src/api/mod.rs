mod chain;
mod health;
pub mod models;
mod tx;
mod wallet;

use actix_web::web::{self, ServiceConfig};

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(health::health_check).service(
        web::scope("/api/v1")
            .service(chain::get_chain)
            .service(chain::validate_chain)
            .service(chain::mine_block)
            .service(chain::get_difficulty)
            .service(chain::set_difficulty)
            .service(tx::post_transaction)
            .service(tx::get_pool)
            .service(wallet::create_wallet),
    );
}
