use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use storage::{
    Store,
    dto::leaderboard::{ErrorResponse, RecordWinRequest, RecordWinResponse},
    models::Username,
};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/wins",
    request_body = RecordWinRequest,
    responses(
        (status = 200, description = "Win recorded", body = RecordWinResponse),
        (status = 400, description = "Username missing or empty", body = ErrorResponse),
        (status = 503, description = "Counter store unavailable", body = ErrorResponse)
    ),
    tag = "wins"
)]
pub async fn record_win(
    State(store): State<Store>,
    payload: Result<Json<RecordWinRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    // An unreadable body carries no username, which is reported as such.
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::debug!("Unreadable win payload: {}", rejection.body_text());
            RecordWinRequest::default()
        }
    };

    let username = Username::from_optional(req.username)?;

    let wins = services::record_win(store.counters(), &username).await?;
    tracing::info!(wins, "Win recorded for: {}", username);

    Ok(Json(RecordWinResponse::for_username(username.as_str())).into_response())
}
