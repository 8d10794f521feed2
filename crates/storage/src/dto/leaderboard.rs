use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of the leaderboard as exposed to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardEntry {
    pub username: String,
    pub wins: u64,
}

/// Request payload for recording a win
///
/// `username` stays optional here so that a missing field reaches
/// [`Username::from_optional`](crate::models::Username::from_optional) instead
/// of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RecordWinRequest {
    #[serde(default)]
    pub username: Option<String>,
}

/// Confirmation returned once a win has been stored
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecordWinResponse {
    pub message: String,
}

impl RecordWinResponse {
    pub fn for_username(username: &str) -> Self {
        Self {
            message: format!("Win recorded for {}", username),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
