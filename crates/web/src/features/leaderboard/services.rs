use storage::{
    CounterStore, dto::leaderboard::LeaderboardEntry, error::Result,
    repository::leaderboard::LeaderboardRepository,
};

/// Get every player ordered by wins, highest first
pub async fn get_leaderboard(store: &dyn CounterStore) -> Result<Vec<LeaderboardEntry>> {
    let repo = LeaderboardRepository::new(store);
    repo.get_leaderboard().await
}
