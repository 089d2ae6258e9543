//! Setup phase: start the tournament by seating round 1.

use crate::logic::round::build_round;
use crate::models::{
    CourtAssignment, Player, PlayerId, SeedingPolicy, Tournament, TournamentError,
    TournamentState, PLAYERS_PER_COURT,
};
use rand::seq::SliceRandom;
use rand::Rng;

/// Start the tournament: require 16 or 32 players, seat round 1 and set state to Active.
pub fn start_tournament(tournament: &mut Tournament) -> Result<(), TournamentError> {
    start_tournament_with_rng(tournament, &mut rand::thread_rng())
}

/// Same as [`start_tournament`] with a caller-supplied rng for the random first round.
pub fn start_tournament_with_rng<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::Setup {
        return Err(TournamentError::InvalidState);
    }
    let players = tournament.players.len();
    if players != 16 && players != 32 {
        return Err(TournamentError::WrongPlayerCount { players });
    }
    let court_count = tournament.court_count();
    let max = tournament.seeding.max_rounds(court_count);
    if tournament.num_rounds > max {
        return Err(TournamentError::InvalidRoundCount { max });
    }

    let assignments = match tournament.seeding {
        SeedingPolicy::Random => random_assignment(&tournament.players, rng),
        SeedingPolicy::Preseed => snake_assignment(&tournament.players, court_count),
    };
    tournament.rounds = vec![build_round(1, &assignments)?];
    tournament.current_round = 1;
    tournament.state = TournamentState::Active;
    log::info!(
        "Started tournament {} with {} players on {} courts ({:?})",
        tournament.id,
        players,
        court_count,
        tournament.seeding
    );
    Ok(())
}

/// Uniform shuffle into groups of 4.
pub fn random_assignment<R: Rng + ?Sized>(players: &[Player], rng: &mut R) -> Vec<CourtAssignment> {
    let mut ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
    ids.shuffle(rng);
    ids.chunks_exact(PLAYERS_PER_COURT)
        .enumerate()
        .map(|(i, chunk)| CourtAssignment {
            court_number: i as u32 + 1,
            player_ids: chunk.to_vec(),
        })
        .collect()
}

/// Snake distribution by seed points (desc, ties by id asc): left to right on even passes,
/// right to left on odd passes.
pub fn snake_assignment(players: &[Player], court_count: usize) -> Vec<CourtAssignment> {
    let mut seeded: Vec<&Player> = players.iter().collect();
    seeded.sort_by(|a, b| b.seed_points.cmp(&a.seed_points).then(a.id.cmp(&b.id)));

    let mut courts: Vec<Vec<PlayerId>> = vec![Vec::with_capacity(PLAYERS_PER_COURT); court_count];
    for (k, p) in seeded.iter().enumerate() {
        let pos = k % court_count;
        let court = if (k / court_count) % 2 == 0 {
            pos
        } else {
            court_count - 1 - pos
        };
        courts[court].push(p.id);
    }
    courts
        .into_iter()
        .enumerate()
        .map(|(i, player_ids)| CourtAssignment {
            court_number: i as u32 + 1,
            player_ids,
        })
        .collect()
}
