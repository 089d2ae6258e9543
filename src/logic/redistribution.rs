//! Redistribution: turn a finished round's court results into next round's courts.
//!
//! Two policies:
//! - Random (ladder): round 1 groups players by finishing rank across courts, later rounds
//!   move the top two of each court up and the bottom two down.
//! - Preseed: round 1 groups by finishing position, rounds 2 and 3 consolidate tiers over
//!   fixed adjacent court pairs.
//!
//! Inputs are never reordered in place; courts are sorted through a local vector of
//! references. Every result is checked to be a partition of the input players.

use crate::logic::standings::standing_order;
use crate::models::{
    CourtAssignment, CourtResult, EngineError, PlayerId, PlayerStanding, SeedingPolicy,
    PLAYERS_PER_COURT,
};

/// Compute next round's court assignments.
///
/// `round_number` is the round that just finished (1-based). `court_results` must hold one
/// result per court, numbered 1..=`court_count`, each with 4 standings sorted by rank.
pub fn redistribute(
    court_results: &[CourtResult],
    round_number: u32,
    court_count: usize,
    seeding: SeedingPolicy,
) -> Result<Vec<CourtAssignment>, EngineError> {
    if round_number == 0 {
        return Err(EngineError::InvalidRound(round_number));
    }
    let courts = sorted_courts(court_results, court_count)?;
    log::debug!(
        "redistributing {} courts after round {} ({:?})",
        court_count,
        round_number,
        seeding
    );

    let assignments = match seeding {
        SeedingPolicy::Random => redistribute_ladder(&courts, round_number == 1)?,
        SeedingPolicy::Preseed => redistribute_preseed(&courts, round_number)?,
    };
    ensure_partition(&courts, &assignments)?;
    Ok(assignments)
}

/// Player ids ranked 1 and 2 on a court.
pub fn top_two(court: &CourtResult) -> Vec<PlayerId> {
    court.standings.iter().take(2).map(|s| s.player_id).collect()
}

/// Player ids ranked 3 and 4 on a court.
pub fn bottom_two(court: &CourtResult) -> Vec<PlayerId> {
    court
        .standings
        .iter()
        .skip(2)
        .take(2)
        .map(|s| s.player_id)
        .collect()
}

/// Validate shape and return the courts ordered by court number.
fn sorted_courts(
    court_results: &[CourtResult],
    court_count: usize,
) -> Result<Vec<&CourtResult>, EngineError> {
    if court_count < 2 {
        return Err(EngineError::UnsupportedCourtCount(court_count));
    }
    if court_results.len() != court_count {
        return Err(EngineError::WrongCourtCount {
            expected: court_count,
            actual: court_results.len(),
        });
    }

    let mut courts: Vec<&CourtResult> = court_results.iter().collect();
    courts.sort_by_key(|c| c.court_number);

    let mut seen: Vec<PlayerId> = Vec::with_capacity(court_count * PLAYERS_PER_COURT);
    for (i, court) in courts.iter().enumerate() {
        if court.court_number as usize != i + 1 {
            return Err(EngineError::BadCourtNumbering);
        }
        if court.standings.len() != PLAYERS_PER_COURT {
            return Err(EngineError::WrongStandingsCount {
                court_number: court.court_number,
                actual: court.standings.len(),
            });
        }
        for s in &court.standings {
            if seen.contains(&s.player_id) {
                return Err(EngineError::DuplicatePlayer(s.player_id));
            }
            seen.push(s.player_id);
        }
    }
    Ok(courts)
}

fn assignment(index: usize, player_ids: Vec<PlayerId>) -> CourtAssignment {
    CourtAssignment {
        court_number: index as u32 + 1,
        player_ids,
    }
}

fn pair(a: Vec<PlayerId>, b: Vec<PlayerId>) -> Vec<PlayerId> {
    a.into_iter().chain(b).collect()
}

/// Standings grouped by finishing position: group `r` holds every court's rank-`r+1` player,
/// in court order.
fn group_by_position<'a>(courts: &[&'a CourtResult]) -> Vec<Vec<&'a PlayerStanding>> {
    let mut groups: Vec<Vec<&PlayerStanding>> = vec![Vec::new(); PLAYERS_PER_COURT];
    for &court in courts {
        for (pos, standing) in court.standings.iter().enumerate() {
            groups[pos].push(standing);
        }
    }
    groups
}

fn ids(standings: &[&PlayerStanding]) -> Vec<PlayerId> {
    standings.iter().map(|s| s.player_id).collect()
}

fn redistribute_ladder(
    courts: &[&CourtResult],
    is_first_round: bool,
) -> Result<Vec<CourtAssignment>, EngineError> {
    if is_first_round {
        return ladder_first_round(courts);
    }
    if courts.len() == 4 {
        // Fixed 16-player pattern; not an instance of the generic interior rule.
        return Ok(vec![
            assignment(0, pair(top_two(courts[0]), top_two(courts[1]))),
            assignment(1, pair(bottom_two(courts[0]), top_two(courts[2]))),
            assignment(2, pair(bottom_two(courts[1]), top_two(courts[3]))),
            assignment(3, pair(bottom_two(courts[2]), bottom_two(courts[3]))),
        ]);
    }

    let last = courts.len() - 1;
    Ok((0..courts.len())
        .map(|i| {
            let player_ids = if i == 0 {
                pair(top_two(courts[0]), top_two(courts[1]))
            } else if i == last {
                pair(bottom_two(courts[i - 1]), bottom_two(courts[i]))
            } else {
                pair(bottom_two(courts[i - 1]), top_two(courts[i + 1]))
            };
            assignment(i, player_ids)
        })
        .collect())
}

/// Vertical grouping: rank-r finishers play together. With 8 courts each rank group is
/// ordered by points/diff and split into a stronger and a weaker court.
fn ladder_first_round(courts: &[&CourtResult]) -> Result<Vec<CourtAssignment>, EngineError> {
    let groups = group_by_position(courts);
    match courts.len() {
        4 => Ok(groups
            .iter()
            .enumerate()
            .map(|(r, group)| assignment(r, ids(group)))
            .collect()),
        8 => {
            let mut out = Vec::with_capacity(8);
            for (r, mut group) in groups.into_iter().enumerate() {
                group.sort_by(|a, b| standing_order(a, b));
                let (upper, lower) = group.split_at(PLAYERS_PER_COURT);
                out.push(assignment(2 * r, ids(upper)));
                out.push(assignment(2 * r + 1, ids(lower)));
            }
            Ok(out)
        }
        n => Err(EngineError::UnsupportedCourtCount(n)),
    }
}

fn redistribute_preseed(
    courts: &[&CourtResult],
    round_number: u32,
) -> Result<Vec<CourtAssignment>, EngineError> {
    let n = courts.len();
    if n != 4 && n != 8 {
        return Err(EngineError::UnsupportedCourtCount(n));
    }
    match round_number {
        1 => Ok(preseed_first_round(courts)),
        2 => Ok(consolidate_tiers(courts)),
        3 if n == 8 => Ok(consolidate_tiers(courts)),
        _ => Err(EngineError::NoFurtherTiers { round_number }),
    }
}

/// Position grouping; with 8 courts each position group is split by court order
/// (courts 1-4 then courts 5-8), not re-sorted.
fn preseed_first_round(courts: &[&CourtResult]) -> Vec<CourtAssignment> {
    let groups = group_by_position(courts);
    if courts.len() == 4 {
        return groups
            .iter()
            .enumerate()
            .map(|(r, group)| assignment(r, ids(group)))
            .collect();
    }
    groups
        .iter()
        .flat_map(|group| group.chunks(PLAYERS_PER_COURT).map(ids))
        .enumerate()
        .map(|(i, player_ids)| assignment(i, player_ids))
        .collect()
}

/// Adjacent pairs (1&2, 3&4, ...) become a top-two court and a bottom-two court.
fn consolidate_tiers(courts: &[&CourtResult]) -> Vec<CourtAssignment> {
    courts
        .chunks(2)
        .flat_map(|p| {
            [
                pair(top_two(p[0]), top_two(p[1])),
                pair(bottom_two(p[0]), bottom_two(p[1])),
            ]
        })
        .enumerate()
        .map(|(i, player_ids)| assignment(i, player_ids))
        .collect()
}

fn ensure_partition(
    courts: &[&CourtResult],
    assignments: &[CourtAssignment],
) -> Result<(), EngineError> {
    if assignments.len() != courts.len()
        || assignments
            .iter()
            .any(|a| a.player_ids.len() != PLAYERS_PER_COURT)
    {
        return Err(EngineError::NotAPartition);
    }
    let mut before: Vec<PlayerId> = courts
        .iter()
        .flat_map(|c| c.standings.iter().map(|s| s.player_id))
        .collect();
    let mut after: Vec<PlayerId> = assignments
        .iter()
        .flat_map(|a| a.player_ids.iter().copied())
        .collect();
    before.sort_unstable();
    after.sort_unstable();
    if before != after {
        return Err(EngineError::NotAPartition);
    }
    Ok(())
}
