use crate::LEADERBOARD_KEY;
use crate::dto::leaderboard::LeaderboardEntry;
use crate::error::{Result, StorageError};
use crate::models::Username;
use crate::store::CounterStore;

pub struct LeaderboardRepository<'a> {
    store: &'a dyn CounterStore,
}

impl<'a> LeaderboardRepository<'a> {
    pub fn new(store: &'a dyn CounterStore) -> Self {
        Self { store }
    }

    /// Adds one win to `username`, returning the updated count.
    pub async fn record_win(&self, username: &Username) -> Result<i64> {
        self.store
            .increment_field(LEADERBOARD_KEY, username.as_str(), 1)
            .await
    }

    /// Reads every counter and orders the result by wins, highest first.
    pub async fn get_leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        let Some(fields) = self.store.read_all(LEADERBOARD_KEY).await? else {
            return Ok(Vec::new());
        };

        let mut entries = fields
            .into_iter()
            .map(|(username, wins)| parse_entry(username, wins))
            .collect::<Result<Vec<_>>>()?;

        // Stable: ties keep the store's enumeration order.
        entries.sort_by(|a, b| b.wins.cmp(&a.wins));

        Ok(entries)
    }
}

fn parse_entry(username: String, value: String) -> Result<LeaderboardEntry> {
    match value.parse::<u64>() {
        Ok(wins) => Ok(LeaderboardEntry { username, wins }),
        Err(_) => Err(StorageError::InvalidCount { username, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::MemoryStore;

    fn name(s: &str) -> Username {
        Username::new(s).unwrap()
    }

    #[tokio::test]
    async fn test_first_win_initializes_to_one() {
        let store = MemoryStore::new();
        let repo = LeaderboardRepository::new(&store);

        assert_eq!(repo.record_win(&name("Alice")).await.unwrap(), 1);

        let board = repo.get_leaderboard().await.unwrap();
        assert_eq!(
            board,
            vec![LeaderboardEntry {
                username: "Alice".to_string(),
                wins: 1
            }]
        );
    }

    #[tokio::test]
    async fn test_empty_store_gives_empty_leaderboard() {
        let store = MemoryStore::new();
        let repo = LeaderboardRepository::new(&store);

        assert!(repo.get_leaderboard().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sorted_by_wins_descending() {
        let store = MemoryStore::new();
        store.set_field(LEADERBOARD_KEY, "Dana", "1").await;
        store.set_field(LEADERBOARD_KEY, "Shachar", "3").await;
        store.set_field(LEADERBOARD_KEY, "Noa", "12").await;
        store.set_field(LEADERBOARD_KEY, "Omer", "2").await;

        let repo = LeaderboardRepository::new(&store);
        let board = repo.get_leaderboard().await.unwrap();

        let names: Vec<_> = board.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, vec!["Noa", "Shachar", "Omer", "Dana"]);
        assert!(board.windows(2).all(|pair| pair[0].wins >= pair[1].wins));
    }

    #[tokio::test]
    async fn test_ties_keep_store_order() {
        let store = MemoryStore::new();
        store.set_field(LEADERBOARD_KEY, "Zed", "4").await;
        store.set_field(LEADERBOARD_KEY, "Amy", "4").await;
        store.set_field(LEADERBOARD_KEY, "Bob", "9").await;

        let repo = LeaderboardRepository::new(&store);
        let names: Vec<_> = repo
            .get_leaderboard()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.username)
            .collect();

        assert_eq!(names, vec!["Bob", "Zed", "Amy"]);
    }

    #[tokio::test]
    async fn test_unparseable_count_fails_whole_read() {
        let store = MemoryStore::new();
        store.set_field(LEADERBOARD_KEY, "Dana", "3").await;
        store.set_field(LEADERBOARD_KEY, "Mallory", "many").await;

        let repo = LeaderboardRepository::new(&store);
        let err = repo.get_leaderboard().await.unwrap_err();

        match err {
            StorageError::InvalidCount { username, value } => {
                assert_eq!(username, "Mallory");
                assert_eq!(value, "many");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_negative_count_is_rejected() {
        let store = MemoryStore::new();
        store.set_field(LEADERBOARD_KEY, "Dana", "-1").await;

        let repo = LeaderboardRepository::new(&store);
        assert!(matches!(
            repo.get_leaderboard().await,
            Err(StorageError::InvalidCount { .. })
        ));
    }

    #[tokio::test]
    async fn test_concurrent_wins_are_not_lost() {
        let store = Arc::new(MemoryStore::new());
        store.set_field(LEADERBOARD_KEY, "Alice", "5").await;

        let tasks: Vec<_> = (0..64)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    LeaderboardRepository::new(&*store)
                        .record_win(&name("Alice"))
                        .await
                })
            })
            .collect();

        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let board = LeaderboardRepository::new(&*store)
            .get_leaderboard()
            .await
            .unwrap();
        assert_eq!(board[0].wins, 69);
    }
}
