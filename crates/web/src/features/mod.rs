pub mod leaderboard;
pub mod wins;
