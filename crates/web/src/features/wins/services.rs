use storage::{
    CounterStore, error::Result, models::Username,
    repository::leaderboard::LeaderboardRepository,
};

/// Record a single win, returning the player's new total
pub async fn record_win(store: &dyn CounterStore, username: &Username) -> Result<i64> {
    let repo = LeaderboardRepository::new(store);
    repo.record_win(username).await
}
