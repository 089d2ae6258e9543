//! Court-level values: standings, results and assignments exchanged with the round engine,
//! plus the court rotation a tournament keeps per round.

use crate::models::game::{round_robin_matches, MatchResult, MATCHES_PER_COURT};
use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Players on every court.
pub const PLAYERS_PER_COURT: usize = 4;

/// Precondition violations detected by the standings calculator or the redistribution engine.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EngineError {
    /// A court must hold exactly 4 distinct players.
    WrongPlayerCount { expected: usize, actual: usize },
    /// The same player appears twice in the input.
    DuplicatePlayer(PlayerId),
    /// A match references a player that is not on the court.
    UnknownPlayer(PlayerId),
    /// Number of court results does not match the configured court count.
    WrongCourtCount { expected: usize, actual: usize },
    /// Court numbers must be 1..=court_count without gaps.
    BadCourtNumbering,
    /// A court result without exactly 4 standings.
    WrongStandingsCount { court_number: u32, actual: usize },
    /// The requested transition is not defined for this many courts.
    UnsupportedCourtCount(usize),
    /// A court round must hold exactly 3 matches.
    WrongMatchCount { court_number: u32, actual: usize },
    /// Round numbers start at 1.
    InvalidRound(u32),
    /// Preseed tournaments define no tiers past this round.
    NoFurtherTiers { round_number: u32 },
    /// The computed assignment lost or duplicated a player.
    NotAPartition,
    /// A player's point total does not fit in a `u32`.
    ScoreOverflow(PlayerId),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::WrongPlayerCount { expected, actual } => {
                write!(f, "Expected {} players on a court, got {}", expected, actual)
            }
            EngineError::DuplicatePlayer(id) => write!(f, "Player {} appears more than once", id),
            EngineError::UnknownPlayer(id) => write!(f, "Player {} is not on this court", id),
            EngineError::WrongCourtCount { expected, actual } => {
                write!(f, "Expected {} court results, got {}", expected, actual)
            }
            EngineError::BadCourtNumbering => write!(f, "Court numbers must be contiguous from 1"),
            EngineError::WrongStandingsCount { court_number, actual } => write!(
                f,
                "Court {} has {} standings, expected {}",
                court_number, actual, PLAYERS_PER_COURT
            ),
            EngineError::UnsupportedCourtCount(n) => {
                write!(f, "Redistribution is not defined for {} courts", n)
            }
            EngineError::WrongMatchCount { court_number, actual } => write!(
                f,
                "Court {} has {} matches, expected {}",
                court_number, actual, MATCHES_PER_COURT
            ),
            EngineError::InvalidRound(n) => write!(f, "Invalid round number {}", n),
            EngineError::NoFurtherTiers { round_number } => {
                write!(f, "No preseed tier is defined after round {}", round_number)
            }
            EngineError::NotAPartition => write!(f, "Redistribution did not partition the players"),
            EngineError::ScoreOverflow(id) => write!(f, "Point total for player {} is too large", id),
        }
    }
}

impl std::error::Error for EngineError {}

/// One player's result on one court for one round. Derived, never stored by the engine.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerStanding {
    pub player_id: PlayerId,
    pub points: u32,
    /// Points-for minus points-against.
    pub diff: i64,
    /// 1..=4, court-local.
    pub rank: u32,
}

/// A finished court: its number and standings sorted by rank ascending.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CourtResult {
    pub court_number: u32,
    pub standings: Vec<PlayerStanding>,
}

/// Output of redistribution: who plays on which court next round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CourtAssignment {
    pub court_number: u32,
    pub player_ids: Vec<PlayerId>,
}

/// A court as played in one round: the 4 players in slot order, their matches, and the
/// access token used for score entry.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Court {
    pub court_number: u32,
    /// Slot order 1..4; drives the round-robin schedule.
    pub player_ids: [PlayerId; 4],
    pub matches: Vec<MatchResult>,
    pub token: String,
    /// Cleared once the round is closed.
    pub active: bool,
}

impl Court {
    /// New active court with the round-robin matches for `player_ids` and a fresh access token.
    pub fn new(court_number: u32, player_ids: [PlayerId; 4]) -> Self {
        Self {
            court_number,
            player_ids,
            matches: round_robin_matches(player_ids),
            token: Uuid::new_v4().simple().to_string(),
            active: true,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.matches.iter().all(MatchResult::is_complete)
    }
}

/// All courts of one round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub number: u32,
    pub courts: Vec<Court>,
}
