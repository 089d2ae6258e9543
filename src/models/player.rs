//! Player data structure.

use serde::{Deserialize, Serialize};

/// Unique identifier for a player within a tournament (assigned sequentially from 1).
pub type PlayerId = u32;

/// A registered player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Pre-entered strength used for the snake distribution of preseed tournaments.
    pub seed_points: u32,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, seed_points: u32) -> Self {
        Self {
            id,
            name: name.into(),
            seed_points,
        }
    }
}
