use utoipa::OpenApi;

use crate::features;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::wins::handlers::record_win,
        features::leaderboard::handlers::get_leaderboard,
    ),
    components(
        schemas(
            storage::dto::leaderboard::LeaderboardEntry,
            storage::dto::leaderboard::RecordWinRequest,
            storage::dto::leaderboard::RecordWinResponse,
            storage::dto::leaderboard::ErrorResponse,
        )
    ),
    tags(
        (name = "wins", description = "Recording player wins"),
        (name = "leaderboard", description = "Public leaderboard"),
    )
)]
pub struct ApiDoc;
