//! Ladder tournament web app: library with models and business logic.
//!
//! The round engine is [`calculate_standings`] (one court's matches to standings) and
//! [`redistribute`] (all courts' standings to next round's courts). Both are pure.

pub mod logic;
pub mod models;

pub use logic::{
    bottom_two, calculate_standings, can_close_round, close_round, court_results, court_view,
    overall_standings, random_assignment, record_score, redistribute, snake_assignment,
    start_tournament, start_tournament_with_rng, top_two, validate_score, CourtView,
    OverallStanding, RoundEntry,
};
pub use models::{
    Court, CourtAssignment, CourtResult, EngineError, MatchResult, Player, PlayerId,
    PlayerStanding, Round, SeedingPolicy, Tournament, TournamentError, TournamentId,
    TournamentState, MATCHES_PER_COURT, MAX_ROUNDS, PLAYERS_PER_COURT,
};
