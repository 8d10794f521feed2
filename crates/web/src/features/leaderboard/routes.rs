use axum::{Router, routing::get};
use storage::Store;

use super::handlers::get_leaderboard;

pub fn routes() -> Router<Store> {
    Router::new().route("/leaderboard", get(get_leaderboard))
}
