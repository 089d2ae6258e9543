//! Tournament, TournamentState and SeedingPolicy.

use crate::models::court::{Court, EngineError, Round, PLAYERS_PER_COURT};
use crate::models::player::{Player, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Upper bound on rounds a tournament can be created with.
pub const MAX_ROUNDS: u32 = 10;

/// Largest supported field (8 courts).
const MAX_PLAYERS: usize = 32;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Tournament is not in a state that allows this action.
    InvalidState,
    /// Tournament or player name is empty.
    EmptyName,
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName,
    /// The field is already full.
    TooManyPlayers { max: usize },
    /// Player not found.
    PlayerNotFound(PlayerId),
    /// Starting needs exactly 16 or 32 players.
    WrongPlayerCount { players: usize },
    /// Round count outside what the tournament format supports.
    InvalidRoundCount { max: u32 },
    /// Score pair rejected at entry.
    InvalidScore(&'static str),
    /// No court matches the access token.
    CourtNotFound,
    /// The court's round has been closed.
    CourtNotActive,
    /// No match with this number on the court.
    MatchNotFound(u8),
    /// Not all matches of the current round have scores.
    IncompleteRound,
    /// Player import could not be parsed.
    InvalidCsv(String),
    /// The round engine rejected its input.
    Engine(EngineError),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::EmptyName => write!(f, "Name is required"),
            TournamentError::DuplicatePlayerName => write!(f, "A player with this name already exists"),
            TournamentError::TooManyPlayers { max } => write!(f, "At most {} players can be added", max),
            TournamentError::PlayerNotFound(_) => write!(f, "Player not found"),
            TournamentError::WrongPlayerCount { players } => {
                write!(f, "Need exactly 16 or 32 players. Currently have {}.", players)
            }
            TournamentError::InvalidRoundCount { max } => {
                write!(f, "Number of rounds must be 1-{}", max)
            }
            TournamentError::InvalidScore(reason) => write!(f, "{}", reason),
            TournamentError::CourtNotFound => write!(f, "Court not found"),
            TournamentError::CourtNotActive => write!(f, "Court is not active"),
            TournamentError::MatchNotFound(n) => write!(f, "Match {} not found on this court", n),
            TournamentError::IncompleteRound => write!(f, "Not all matches have a score"),
            TournamentError::InvalidCsv(e) => write!(f, "Could not read player list: {}", e),
            TournamentError::Engine(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for TournamentError {}

impl From<EngineError> for TournamentError {
    fn from(e: EngineError) -> Self {
        TournamentError::Engine(e)
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// How players are spread over courts between rounds.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedingPolicy {
    /// Random first round, then ladder promotion/relegation.
    #[default]
    Random,
    /// Snake first round by seed points, then position split and tier consolidation.
    Preseed,
}

impl SeedingPolicy {
    /// Most rounds this policy can run with `court_count` courts.
    pub fn max_rounds(self, court_count: usize) -> u32 {
        match self {
            SeedingPolicy::Random => MAX_ROUNDS,
            SeedingPolicy::Preseed if court_count == 8 => 4,
            SeedingPolicy::Preseed => 3,
        }
    }
}

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Adding players; not started.
    #[default]
    Setup,
    /// Rounds in progress.
    Active,
    /// Last round closed.
    Completed,
}

/// Full tournament state: configuration, players and every round played so far.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub seeding: SeedingPolicy,
    pub num_rounds: u32,
    /// 0 until started, then 1-based.
    pub current_round: u32,
    pub state: TournamentState,
    pub players: Vec<Player>,
    /// Rounds in order; the last one is the current round.
    pub rounds: Vec<Round>,
    next_player_id: PlayerId,
}

impl Tournament {
    /// Create a new tournament in Setup state with no players.
    pub fn new(
        name: impl Into<String>,
        num_rounds: u32,
        seeding: SeedingPolicy,
    ) -> Result<Self, TournamentError> {
        let name: String = name.into();
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        if !(1..=MAX_ROUNDS).contains(&num_rounds) {
            return Err(TournamentError::InvalidRoundCount { max: MAX_ROUNDS });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            created_at: Utc::now(),
            seeding,
            num_rounds,
            current_round: 0,
            state: TournamentState::Setup,
            players: Vec::new(),
            rounds: Vec::new(),
            next_player_id: 1,
        })
    }

    /// Courts per round once started (players / 4).
    pub fn court_count(&self) -> usize {
        self.players.len() / PLAYERS_PER_COURT
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Name for display; falls back to "Unknown".
    pub fn player_name(&self, id: PlayerId) -> &str {
        self.player(id).map(|p| p.name.as_str()).unwrap_or("Unknown")
    }

    /// The round currently being played (or the final round once completed).
    pub fn current_courts(&self) -> &[Court] {
        self.rounds.last().map(|r| r.courts.as_slice()).unwrap_or(&[])
    }

    /// Find a court of any round by its access token.
    pub fn court_by_token(&self, token: &str) -> Option<(u32, &Court)> {
        self.rounds.iter().find_map(|r| {
            r.courts
                .iter()
                .find(|c| c.token == token)
                .map(|c| (r.number, c))
        })
    }

    pub fn court_by_token_mut(&mut self, token: &str) -> Option<&mut Court> {
        self.rounds
            .iter_mut()
            .flat_map(|r| r.courts.iter_mut())
            .find(|c| c.token == token)
    }

    /// Add a player (Setup only). Names must be unique (case-insensitive). Returns the new id.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        seed_points: u32,
    ) -> Result<PlayerId, TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        if self.players.len() >= MAX_PLAYERS {
            return Err(TournamentError::TooManyPlayers { max: MAX_PLAYERS });
        }
        let is_duplicate = self
            .players
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name_trimmed));
        if is_duplicate {
            return Err(TournamentError::DuplicatePlayerName);
        }
        let id = self.next_player_id;
        self.next_player_id += 1;
        self.players.push(Player::new(id, name_trimmed, seed_points));
        Ok(id)
    }

    /// Add players from CSV text, one `name[,seed_points]` record per line (no header).
    /// Either every record is added or none is.
    pub fn import_players_csv(&mut self, text: &str) -> Result<Vec<PlayerId>, TournamentError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let mut staged = self.clone();
        let mut added = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| TournamentError::InvalidCsv(e.to_string()))?;
            let name = record.get(0).unwrap_or_default();
            if name.is_empty() && record.len() <= 1 {
                continue;
            }
            let seed_points = match record.get(1).filter(|s| !s.is_empty()) {
                Some(raw) => raw.parse::<u32>().map_err(|_| {
                    TournamentError::InvalidCsv(format!("invalid seed points '{}' for {}", raw, name))
                })?,
                None => 0,
            };
            added.push(staged.add_player(name, seed_points)?);
        }
        *self = staged;
        Ok(added)
    }

    /// Remove a player by id (only valid in Setup).
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        self.players.remove(idx);
        Ok(())
    }
}
