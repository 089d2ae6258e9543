//! Tournament business logic: the round engine (standings, redistribution) and the
//! lifecycle around it (setup, score entry, round close, leaderboard).

mod leaderboard;
mod redistribution;
mod round;
mod scoring;
mod setup;
mod standings;

pub use leaderboard::{overall_standings, OverallStanding, RoundEntry};
pub use redistribution::{bottom_two, redistribute, top_two};
pub use round::{can_close_round, close_round, court_results};
pub use scoring::{court_view, record_score, validate_score, CourtView};
pub use setup::{random_assignment, snake_assignment, start_tournament, start_tournament_with_rng};
pub use standings::calculate_standings;
