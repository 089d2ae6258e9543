//! Court standings: score one court's round-robin matches into per-player results.

use crate::models::{EngineError, MatchResult, PlayerId, PlayerStanding, PLAYERS_PER_COURT};
use std::cmp::Ordering;

/// Running totals for one player while scoring a court.
struct Tally {
    player_id: PlayerId,
    points_for: u32,
    points_against: u32,
}

/// Ranking order: points desc, then diff desc, then player id asc.
pub(crate) fn standing_order(a: &PlayerStanding, b: &PlayerStanding) -> Ordering {
    b.points
        .cmp(&a.points)
        .then(b.diff.cmp(&a.diff))
        .then(a.player_id.cmp(&b.player_id))
}

/// Compute the 4 standings of a court from its matches.
///
/// Every point a team scores is credited to both teammates as points-for and to both
/// opponents as points-against. Matches without both scores are skipped, so a partially
/// played round still yields standings.
///
/// Fails if `player_ids` is not 4 distinct ids, a match names a player outside them, or a
/// player's points-for or points-against total overflows `u32`.
pub fn calculate_standings(
    matches: &[MatchResult],
    player_ids: &[PlayerId],
) -> Result<Vec<PlayerStanding>, EngineError> {
    if player_ids.len() != PLAYERS_PER_COURT {
        return Err(EngineError::WrongPlayerCount {
            expected: PLAYERS_PER_COURT,
            actual: player_ids.len(),
        });
    }

    let mut tallies: Vec<Tally> = Vec::with_capacity(PLAYERS_PER_COURT);
    for &id in player_ids {
        if tallies.iter().any(|t| t.player_id == id) {
            return Err(EngineError::DuplicatePlayer(id));
        }
        tallies.push(Tally {
            player_id: id,
            points_for: 0,
            points_against: 0,
        });
    }

    for m in matches {
        let mut seen: Vec<PlayerId> = Vec::with_capacity(4);
        for id in m.players() {
            if !player_ids.contains(&id) {
                return Err(EngineError::UnknownPlayer(id));
            }
            if seen.contains(&id) {
                return Err(EngineError::DuplicatePlayer(id));
            }
            seen.push(id);
        }

        let Some((a, b)) = m.scores() else {
            continue;
        };
        for t in tallies.iter_mut() {
            let (scored, conceded) = if m.team_a.contains(&t.player_id) {
                (a, b)
            } else if m.team_b.contains(&t.player_id) {
                (b, a)
            } else {
                continue;
            };
            let overflow = EngineError::ScoreOverflow(t.player_id);
            t.points_for = t.points_for.checked_add(scored).ok_or(overflow.clone())?;
            t.points_against = t.points_against.checked_add(conceded).ok_or(overflow)?;
        }
    }

    let mut standings: Vec<PlayerStanding> = tallies
        .into_iter()
        .map(|t| PlayerStanding {
            player_id: t.player_id,
            points: t.points_for,
            diff: i64::from(t.points_for) - i64::from(t.points_against),
            rank: 0,
        })
        .collect();
    standings.sort_by(standing_order);
    for (i, s) in standings.iter_mut().enumerate() {
        s.rank = i as u32 + 1;
    }
    Ok(standings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standing(player_id: PlayerId, points: u32, diff: i64) -> PlayerStanding {
        PlayerStanding {
            player_id,
            points,
            diff,
            rank: 0,
        }
    }

    #[test]
    fn order_prefers_points_then_diff_then_lower_id() {
        assert_eq!(
            standing_order(&standing(1, 60, 0), &standing(2, 61, -10)),
            Ordering::Greater
        );
        assert_eq!(
            standing_order(&standing(1, 60, 4), &standing(2, 60, 2)),
            Ordering::Less
        );
        assert_eq!(
            standing_order(&standing(7, 60, 2), &standing(3, 60, 2)),
            Ordering::Greater
        );
    }
}
