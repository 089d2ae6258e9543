//! Tournament-wide standings built from every fully scored court.

use crate::logic::standings::calculate_standings;
use crate::models::{EngineError, PlayerId, Tournament, TournamentError, MATCHES_PER_COURT};
use serde::Serialize;
use std::collections::HashMap;

/// One round of a player's history.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RoundEntry {
    pub round: u32,
    pub court: u32,
    pub rank_on_court: u32,
    pub points: u32,
    pub diff: i64,
}

/// A player's place in the tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct OverallStanding {
    pub player_id: PlayerId,
    pub player_name: String,
    pub total_points: u32,
    pub total_diff: i64,
    pub rounds_played: u32,
    pub matches_played: u32,
    pub round_history: Vec<RoundEntry>,
    pub current_round_points: u32,
    pub current_round_diff: i64,
    pub overall_rank: u32,
}

/// Rank everyone who has finished at least one court.
///
/// The court a player last finished on decides their band (court 1 holds places 1-4,
/// court 2 places 5-8, ...). Within a band players are ordered by current-round points,
/// then diff, then id. Courts with open matches are ignored.
pub fn overall_standings(tournament: &Tournament) -> Result<Vec<OverallStanding>, TournamentError> {
    let mut by_player: HashMap<PlayerId, OverallStanding> = HashMap::new();

    for round in &tournament.rounds {
        for court in round.courts.iter().filter(|c| c.is_complete()) {
            for s in calculate_standings(&court.matches, &court.player_ids)? {
                let entry = by_player.entry(s.player_id).or_insert_with(|| OverallStanding {
                    player_id: s.player_id,
                    player_name: tournament.player_name(s.player_id).to_string(),
                    total_points: 0,
                    total_diff: 0,
                    rounds_played: 0,
                    matches_played: 0,
                    round_history: Vec::new(),
                    current_round_points: 0,
                    current_round_diff: 0,
                    overall_rank: 0,
                });
                entry.total_points = entry
                    .total_points
                    .checked_add(s.points)
                    .ok_or(EngineError::ScoreOverflow(s.player_id))?;
                entry.total_diff += s.diff;
                entry.rounds_played += 1;
                entry.matches_played += MATCHES_PER_COURT as u32;
                entry.round_history.push(RoundEntry {
                    round: round.number,
                    court: court.court_number,
                    rank_on_court: s.rank,
                    points: s.points,
                    diff: s.diff,
                });
                if round.number == tournament.current_round {
                    entry.current_round_points = s.points;
                    entry.current_round_diff = s.diff;
                }
            }
        }
    }

    let mut standings: Vec<OverallStanding> = by_player.into_values().collect();
    standings.sort_by(|a, b| {
        let a_court = a.round_history.last().map(|r| r.court);
        let b_court = b.round_history.last().map(|r| r.court);
        a_court
            .cmp(&b_court)
            .then(b.current_round_points.cmp(&a.current_round_points))
            .then(b.current_round_diff.cmp(&a.current_round_diff))
            .then(a.player_id.cmp(&b.player_id))
    });
    for (i, s) in standings.iter_mut().enumerate() {
        s.overall_rank = i as u32 + 1;
    }
    Ok(standings)
}
