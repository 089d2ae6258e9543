//! Data structures for the ladder tournament: players, matches, courts, tournament state.

mod court;
mod game;
mod player;
mod tournament;

pub use court::{
    Court, CourtAssignment, CourtResult, EngineError, PlayerStanding, Round, PLAYERS_PER_COURT,
};
pub use game::{round_robin_matches, MatchResult, MATCHES_PER_COURT};
pub use player::{Player, PlayerId};
pub use tournament::{
    SeedingPolicy, Tournament, TournamentError, TournamentId, TournamentState, MAX_ROUNDS,
};
