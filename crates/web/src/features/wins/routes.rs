use axum::{Router, routing::post};
use storage::Store;

use super::handlers::record_win;

pub fn routes() -> Router<Store> {
    Router::new().route("/wins", post(record_win))
}
