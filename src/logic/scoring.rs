//! Score entry through a court's access token, and the court view shown to players.

use crate::logic::standings::calculate_standings;
use crate::models::{
    MatchResult, Player, PlayerStanding, Tournament, TournamentError, TournamentState,
};
use serde::Serialize;

/// Highest score a team can enter.
const MAX_SCORE: u32 = 50;
/// Points needed to win a game.
const WINNING_SCORE: u32 = 21;

/// Check a score pair before it is stored.
///
/// Scores are 0..=50, never tied, the winner reaches 21 with a margin of at least 2, and a
/// game that went past 21 must end exactly 2 apart.
pub fn validate_score(team_a_score: u32, team_b_score: u32) -> Result<(), TournamentError> {
    if team_a_score > MAX_SCORE || team_b_score > MAX_SCORE {
        return Err(TournamentError::InvalidScore("Scores must be between 0 and 50"));
    }
    if team_a_score == team_b_score {
        return Err(TournamentError::InvalidScore("Scores cannot be tied"));
    }
    let max = team_a_score.max(team_b_score);
    let min = team_a_score.min(team_b_score);
    if max < WINNING_SCORE {
        return Err(TournamentError::InvalidScore("Winner must have at least 21 points"));
    }
    if max - min < 2 {
        return Err(TournamentError::InvalidScore("Winner must win by at least 2 points"));
    }
    if max > WINNING_SCORE && max - min != 2 {
        return Err(TournamentError::InvalidScore(
            "Points difference can only be 2 with >21 points played",
        ));
    }
    Ok(())
}

/// Store a validated score for match `match_number` on the court behind `token`.
/// Overwrites an earlier entry while the court is still active.
pub fn record_score(
    tournament: &mut Tournament,
    token: &str,
    match_number: u8,
    team_a_score: u32,
    team_b_score: u32,
) -> Result<(), TournamentError> {
    validate_score(team_a_score, team_b_score)?;
    if tournament.state != TournamentState::Active {
        return Err(TournamentError::CourtNotActive);
    }
    let court = tournament
        .court_by_token_mut(token)
        .ok_or(TournamentError::CourtNotFound)?;
    if !court.active {
        return Err(TournamentError::CourtNotActive);
    }
    let m = court
        .matches
        .iter_mut()
        .find(|m| m.match_number == match_number)
        .ok_or(TournamentError::MatchNotFound(match_number))?;
    m.team_a_score = Some(team_a_score);
    m.team_b_score = Some(team_b_score);
    Ok(())
}

/// What a court's players see: their matches and live standings.
#[derive(Clone, Debug, Serialize)]
pub struct CourtView {
    pub tournament_name: String,
    pub round_number: u32,
    pub court_number: u32,
    /// Slot order.
    pub players: Vec<Player>,
    pub matches: Vec<MatchResult>,
    /// Partial while matches are still open.
    pub standings: Vec<PlayerStanding>,
    pub is_active: bool,
}

pub fn court_view(tournament: &Tournament, token: &str) -> Result<CourtView, TournamentError> {
    let (round_number, court) = tournament
        .court_by_token(token)
        .ok_or(TournamentError::CourtNotFound)?;
    let players = court
        .player_ids
        .iter()
        .map(|&id| {
            tournament
                .player(id)
                .cloned()
                .ok_or(TournamentError::PlayerNotFound(id))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CourtView {
        tournament_name: tournament.name.clone(),
        round_number,
        court_number: court.court_number,
        players,
        matches: court.matches.clone(),
        standings: calculate_standings(&court.matches, &court.player_ids)?,
        is_active: court.active && tournament.state == TournamentState::Active,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(a: u32, b: u32) -> Option<&'static str> {
        match validate_score(a, b) {
            Ok(()) => None,
            Err(TournamentError::InvalidScore(r)) => Some(r),
            Err(e) => panic!("unexpected error {e}"),
        }
    }

    #[test]
    fn accepts_regular_and_extended_games() {
        assert_eq!(reason(21, 0), None);
        assert_eq!(reason(19, 21), None);
        assert_eq!(reason(24, 22), None);
    }

    #[test]
    fn rejects_invalid_pairs() {
        assert_eq!(reason(51, 49), Some("Scores must be between 0 and 50"));
        assert_eq!(reason(21, 21), Some("Scores cannot be tied"));
        assert_eq!(reason(20, 15), Some("Winner must have at least 21 points"));
        assert_eq!(reason(21, 20), Some("Winner must win by at least 2 points"));
        assert_eq!(
            reason(25, 20),
            Some("Points difference can only be 2 with >21 points played")
        );
    }
}
