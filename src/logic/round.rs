//! Round close: score every court, redistribute, seat the next round.

use crate::logic::redistribution::redistribute;
use crate::logic::standings::calculate_standings;
use crate::models::{
    Court, CourtAssignment, CourtResult, EngineError, PlayerId, Round, Tournament,
    TournamentError, TournamentState, MATCHES_PER_COURT, PLAYERS_PER_COURT,
};

/// True when every match on every court of the current round has a score.
pub fn can_close_round(tournament: &Tournament) -> bool {
    let courts = tournament.current_courts();
    tournament.state == TournamentState::Active
        && !courts.is_empty()
        && courts.iter().all(Court::is_complete)
}

/// Standings of each court, in court order.
pub fn court_results(courts: &[Court]) -> Result<Vec<CourtResult>, EngineError> {
    courts
        .iter()
        .map(|court| -> Result<CourtResult, EngineError> {
            if court.matches.len() != MATCHES_PER_COURT {
                return Err(EngineError::WrongMatchCount {
                    court_number: court.court_number,
                    actual: court.matches.len(),
                });
            }
            Ok(CourtResult {
                court_number: court.court_number,
                standings: calculate_standings(&court.matches, &court.player_ids)?,
            })
        })
        .collect()
}

/// Seat a round from assignments: matches and a fresh access token per court.
pub(crate) fn build_round(
    number: u32,
    assignments: &[CourtAssignment],
) -> Result<Round, TournamentError> {
    let courts = assignments
        .iter()
        .map(|a| -> Result<Court, TournamentError> {
            let slots = <[PlayerId; 4]>::try_from(a.player_ids.as_slice()).map_err(|_| {
                EngineError::WrongPlayerCount {
                    expected: PLAYERS_PER_COURT,
                    actual: a.player_ids.len(),
                }
            })?;
            Ok(Court::new(a.court_number, slots))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Round { number, courts })
}

/// Close the current round.
///
/// All matches must be scored. On the last round the tournament completes; otherwise the
/// next round is seated from the redistribution of this round's standings. The old courts'
/// tokens stop accepting scores either way. Nothing is changed if any step fails.
pub fn close_round(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::Active {
        return Err(TournamentError::InvalidState);
    }
    if !can_close_round(tournament) {
        return Err(TournamentError::IncompleteRound);
    }

    let round_number = tournament.current_round;
    let results = court_results(tournament.current_courts())?;

    let next = if round_number >= tournament.num_rounds {
        None
    } else {
        let assignments = redistribute(
            &results,
            round_number,
            tournament.court_count(),
            tournament.seeding,
        )?;
        Some(build_round(round_number + 1, &assignments)?)
    };

    if let Some(current) = tournament.rounds.last_mut() {
        for court in &mut current.courts {
            court.active = false;
        }
    }

    match next {
        Some(round) => {
            tournament.rounds.push(round);
            tournament.current_round += 1;
            log::info!(
                "Tournament {}: closed round {}, seated round {}",
                tournament.id,
                round_number,
                tournament.current_round
            );
        }
        None => {
            tournament.state = TournamentState::Completed;
            log::info!(
                "Tournament {}: closed final round {}",
                tournament.id,
                round_number
            );
        }
    }
    Ok(())
}
