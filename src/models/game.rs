//! A single doubles match on a court, plus the fixed round-robin schedule.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Matches played per court per round.
pub const MATCHES_PER_COURT: usize = 3;

/// One round-robin game between two fixed teams of 2.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// 1..=3 within the court.
    pub match_number: u8,
    pub team_a: [PlayerId; 2],
    pub team_b: [PlayerId; 2],
    /// None until entered.
    pub team_a_score: Option<u32>,
    pub team_b_score: Option<u32>,
}

impl MatchResult {
    pub fn new(match_number: u8, team_a: [PlayerId; 2], team_b: [PlayerId; 2]) -> Self {
        Self {
            match_number,
            team_a,
            team_b,
            team_a_score: None,
            team_b_score: None,
        }
    }

    /// Builder used mostly by tests and imports.
    pub fn with_scores(mut self, team_a_score: u32, team_b_score: u32) -> Self {
        self.team_a_score = Some(team_a_score);
        self.team_b_score = Some(team_b_score);
        self
    }

    /// Both scores present.
    pub fn is_complete(&self) -> bool {
        self.scores().is_some()
    }

    pub fn scores(&self) -> Option<(u32, u32)> {
        Some((self.team_a_score?, self.team_b_score?))
    }

    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.team_a.iter().chain(self.team_b.iter()).copied()
    }
}

/// The fixed schedule over court slots 1..4: {1,2 v 3,4}, {1,3 v 2,4}, {1,4 v 2,3}.
pub fn round_robin_matches(slots: [PlayerId; 4]) -> Vec<MatchResult> {
    let [p1, p2, p3, p4] = slots;
    vec![
        MatchResult::new(1, [p1, p2], [p3, p4]),
        MatchResult::new(2, [p1, p3], [p2, p4]),
        MatchResult::new(3, [p1, p4], [p2, p3]),
    ]
}
