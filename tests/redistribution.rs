//! Integration tests for redistribution: ladder and preseed transitions, partition and
//! fail-fast behavior.

use ladder_tournament_web::{
    redistribute, CourtAssignment, CourtResult, EngineError, PlayerId, PlayerStanding,
    SeedingPolicy,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// A court whose standings follow `ids` order, with the given points.
fn court(court_number: u32, ids: [PlayerId; 4], points: [u32; 4]) -> CourtResult {
    CourtResult {
        court_number,
        standings: ids
            .iter()
            .zip(points)
            .enumerate()
            .map(|(i, (&player_id, points))| PlayerStanding {
                player_id,
                points,
                diff: 0,
                rank: i as u32 + 1,
            })
            .collect(),
    }
}

/// `n` courts of consecutive ids: court 1 = [1,2,3,4], court 2 = [5,6,7,8], ...
fn consecutive_courts(n: u32) -> Vec<CourtResult> {
    (0..n)
        .map(|i| court(i + 1, [4 * i + 1, 4 * i + 2, 4 * i + 3, 4 * i + 4], [0; 4]))
        .collect()
}

fn player_ids(assignments: &[CourtAssignment]) -> Vec<Vec<PlayerId>> {
    assignments.iter().map(|a| a.player_ids.clone()).collect()
}

#[test]
fn ladder_first_round_groups_by_rank_for_16_players() {
    let courts = vec![
        court(1, [1, 2, 3, 4], [68, 60, 52, 40]),
        court(2, [5, 6, 7, 8], [65, 58, 50, 42]),
        court(3, [9, 10, 11, 12], [70, 55, 48, 38]),
        court(4, [13, 14, 15, 16], [62, 56, 45, 35]),
    ];
    let result = redistribute(&courts, 1, 4, SeedingPolicy::Random).unwrap();

    let numbers: Vec<u32> = result.iter().map(|a| a.court_number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);
    assert_eq!(
        player_ids(&result),
        vec![
            vec![1, 5, 9, 13],
            vec![2, 6, 10, 14],
            vec![3, 7, 11, 15],
            vec![4, 8, 12, 16],
        ]
    );
}

#[test]
fn ladder_moves_two_up_two_down_for_16_players() {
    let result = redistribute(&consecutive_courts(4), 2, 4, SeedingPolicy::Random).unwrap();
    assert_eq!(
        player_ids(&result),
        vec![
            vec![1, 2, 5, 6],
            vec![3, 4, 9, 10],
            vec![7, 8, 13, 14],
            vec![11, 12, 15, 16],
        ]
    );
}

#[test]
fn ladder_first_round_splits_rank_groups_by_points_for_32_players() {
    let courts: Vec<CourtResult> = (0..8)
        .map(|i| {
            court(
                i + 1,
                [4 * i + 1, 4 * i + 2, 4 * i + 3, 4 * i + 4],
                [100 - i * 4, 80 - i * 2, 60 - i, 40],
            )
        })
        .collect();
    let result = redistribute(&courts, 1, 8, SeedingPolicy::Random).unwrap();

    assert_eq!(result.len(), 8);
    assert_eq!(result[0].player_ids, vec![1, 5, 9, 13]);
    assert_eq!(result[1].player_ids, vec![17, 21, 25, 29]);
    // Rank 4 finishers are level on points and diff: ids decide.
    assert_eq!(result[6].player_ids, vec![4, 8, 12, 16]);
    assert_eq!(result[7].player_ids, vec![20, 24, 28, 32]);
}

#[test]
fn ladder_first_round_for_32_players_ranks_by_points_not_court_order() {
    let courts: Vec<CourtResult> = (0..8)
        .map(|i| {
            court(
                i + 1,
                [4 * i + 1, 4 * i + 2, 4 * i + 3, 4 * i + 4],
                [60 + i, 50, 40, 30],
            )
        })
        .collect();
    let result = redistribute(&courts, 1, 8, SeedingPolicy::Random).unwrap();
    assert_eq!(result[0].player_ids, vec![29, 25, 21, 17]);
    assert_eq!(result[1].player_ids, vec![13, 9, 5, 1]);
}

#[test]
fn ladder_first_round_for_32_players_uses_diff_before_id() {
    let mut courts = consecutive_courts(8);
    for (i, c) in courts.iter_mut().enumerate() {
        c.standings[0].points = 63;
        c.standings[0].diff = i64::try_from(i).unwrap();
    }
    let result = redistribute(&courts, 1, 8, SeedingPolicy::Random).unwrap();
    assert_eq!(result[0].player_ids, vec![29, 25, 21, 17]);
}

#[test]
fn ladder_general_rule_for_8_courts() {
    let result = redistribute(&consecutive_courts(8), 3, 8, SeedingPolicy::Random).unwrap();
    assert_eq!(
        player_ids(&result),
        vec![
            vec![1, 2, 5, 6],
            vec![3, 4, 9, 10],
            vec![7, 8, 13, 14],
            vec![11, 12, 17, 18],
            vec![15, 16, 21, 22],
            vec![19, 20, 25, 26],
            vec![23, 24, 29, 30],
            vec![27, 28, 31, 32],
        ]
    );
}

#[test]
fn preseed_first_round_matches_ladder_for_16_players() {
    let courts = consecutive_courts(4);
    let preseed = redistribute(&courts, 1, 4, SeedingPolicy::Preseed).unwrap();
    let ladder = redistribute(&courts, 1, 4, SeedingPolicy::Random).unwrap();
    assert_eq!(preseed, ladder);
    assert_eq!(preseed[0].player_ids, vec![1, 5, 9, 13]);
}

#[test]
fn preseed_consolidates_tiers_for_16_players() {
    let result = redistribute(&consecutive_courts(4), 2, 4, SeedingPolicy::Preseed).unwrap();
    assert_eq!(
        player_ids(&result),
        vec![
            vec![1, 2, 5, 6],
            vec![3, 4, 7, 8],
            vec![9, 10, 13, 14],
            vec![11, 12, 15, 16],
        ]
    );
}

#[test]
fn preseed_first_round_splits_by_court_order_for_32_players() {
    // Points would reorder the groups if they were sorted; preseed ignores them.
    let courts: Vec<CourtResult> = (0..8)
        .map(|i| {
            court(
                i + 1,
                [4 * i + 1, 4 * i + 2, 4 * i + 3, 4 * i + 4],
                [60 + i, 50 + i, 40 + i, 30 + i],
            )
        })
        .collect();
    let result = redistribute(&courts, 1, 8, SeedingPolicy::Preseed).unwrap();
    assert_eq!(
        player_ids(&result),
        vec![
            vec![1, 5, 9, 13],
            vec![17, 21, 25, 29],
            vec![2, 6, 10, 14],
            vec![18, 22, 26, 30],
            vec![3, 7, 11, 15],
            vec![19, 23, 27, 31],
            vec![4, 8, 12, 16],
            vec![20, 24, 28, 32],
        ]
    );
}

#[test]
fn preseed_consolidates_tiers_twice_for_32_players() {
    let courts = consecutive_courts(8);
    for round in [2, 3] {
        let result = redistribute(&courts, round, 8, SeedingPolicy::Preseed).unwrap();
        assert_eq!(result.len(), 8);
        assert_eq!(result[0].player_ids, vec![1, 2, 5, 6]);
        assert_eq!(result[1].player_ids, vec![3, 4, 7, 8]);
        assert_eq!(result[6].player_ids, vec![25, 26, 29, 30]);
        assert_eq!(result[7].player_ids, vec![27, 28, 31, 32]);
    }
}

#[test]
fn preseed_has_no_tiers_past_its_last_round() {
    assert_eq!(
        redistribute(&consecutive_courts(4), 3, 4, SeedingPolicy::Preseed).unwrap_err(),
        EngineError::NoFurtherTiers { round_number: 3 }
    );
    assert_eq!(
        redistribute(&consecutive_courts(8), 4, 8, SeedingPolicy::Preseed).unwrap_err(),
        EngineError::NoFurtherTiers { round_number: 4 }
    );
}

#[test]
fn court_input_order_does_not_matter() {
    let courts = consecutive_courts(4);
    let mut reversed = courts.clone();
    reversed.reverse();
    let snapshot = reversed.clone();

    let expected = redistribute(&courts, 2, 4, SeedingPolicy::Random).unwrap();
    let actual = redistribute(&reversed, 2, 4, SeedingPolicy::Random).unwrap();
    assert_eq!(expected, actual);
    assert_eq!(reversed, snapshot);
}

#[test]
fn court_with_wrong_standings_count_fails_fast() {
    let mut courts = consecutive_courts(4);
    courts[2].standings.pop();
    assert_eq!(
        redistribute(&courts, 2, 4, SeedingPolicy::Random).unwrap_err(),
        EngineError::WrongStandingsCount {
            court_number: 3,
            actual: 3
        }
    );

    let mut courts = consecutive_courts(4);
    courts[0].standings.push(PlayerStanding {
        player_id: 99,
        points: 0,
        diff: 0,
        rank: 5,
    });
    assert!(matches!(
        redistribute(&courts, 1, 4, SeedingPolicy::Preseed),
        Err(EngineError::WrongStandingsCount { court_number: 1, actual: 5 })
    ));
}

#[test]
fn malformed_court_sets_are_rejected() {
    assert_eq!(
        redistribute(&consecutive_courts(3), 2, 4, SeedingPolicy::Random).unwrap_err(),
        EngineError::WrongCourtCount {
            expected: 4,
            actual: 3
        }
    );

    let mut gap = consecutive_courts(4);
    gap[3].court_number = 5;
    assert_eq!(
        redistribute(&gap, 2, 4, SeedingPolicy::Random).unwrap_err(),
        EngineError::BadCourtNumbering
    );

    let mut twice = consecutive_courts(4);
    twice[1].standings[0].player_id = 1;
    assert_eq!(
        redistribute(&twice, 2, 4, SeedingPolicy::Random).unwrap_err(),
        EngineError::DuplicatePlayer(1)
    );

    assert_eq!(
        redistribute(&consecutive_courts(6), 1, 6, SeedingPolicy::Random).unwrap_err(),
        EngineError::UnsupportedCourtCount(6)
    );
    assert_eq!(
        redistribute(&consecutive_courts(4), 0, 4, SeedingPolicy::Random).unwrap_err(),
        EngineError::InvalidRound(0)
    );
}

/// Random standings over shuffled ids for every defined transition.
#[test]
fn every_transition_partitions_the_players() {
    let mut rng = StdRng::seed_from_u64(7);
    let cases: Vec<(SeedingPolicy, usize, Vec<u32>)> = vec![
        (SeedingPolicy::Random, 4, (1..=6).collect()),
        (SeedingPolicy::Random, 8, (1..=6).collect()),
        (SeedingPolicy::Preseed, 4, vec![1, 2]),
        (SeedingPolicy::Preseed, 8, vec![1, 2, 3]),
    ];

    for (seeding, court_count, rounds) in cases {
        for round in rounds {
            for _ in 0..20 {
                let mut ids: Vec<PlayerId> = (100..100 + 4 * court_count as u32).collect();
                ids.shuffle(&mut rng);
                let courts: Vec<CourtResult> = ids
                    .chunks(4)
                    .enumerate()
                    .map(|(i, chunk)| {
                        let points = [0; 4].map(|_| rng.gen_range(40..80));
                        let mut c = court(i as u32 + 1, [chunk[0], chunk[1], chunk[2], chunk[3]], points);
                        for s in &mut c.standings {
                            s.diff = rng.gen_range(-10..10);
                        }
                        c
                    })
                    .collect();

                let first = redistribute(&courts, round, court_count, seeding).unwrap();
                let again = redistribute(&courts, round, court_count, seeding).unwrap();
                assert_eq!(first, again);

                assert_eq!(first.len(), court_count);
                let mut out: Vec<PlayerId> = first.iter().flat_map(|a| a.player_ids.clone()).collect();
                assert!(first.iter().all(|a| a.player_ids.len() == 4));
                out.sort_unstable();
                ids.sort_unstable();
                assert_eq!(out, ids, "{:?} round {} on {} courts", seeding, round, court_count);
            }
        }
    }
}
