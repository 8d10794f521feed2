use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{
    Store,
    dto::leaderboard::{ErrorResponse, LeaderboardEntry},
};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/leaderboard",
    responses(
        (status = 200, description = "All players sorted by wins, highest first", body = Vec<LeaderboardEntry>),
        (status = 500, description = "A stored counter is not a number", body = ErrorResponse),
        (status = 503, description = "Counter store unavailable", body = ErrorResponse)
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard(State(store): State<Store>) -> Result<Response, WebError> {
    let entries = services::get_leaderboard(store.counters()).await?;

    Ok(Json(entries).into_response())
}
