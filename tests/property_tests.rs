//! Property-based tests for placement, growth and generation.

use proptest::prelude::*;

use connect_plus::board::Board;
use connect_plus::core::{Dimensions, GameConfig, GameRng, Square, TileId, DEFAULT_BENCHMARKS};
use connect_plus::distributor::{TileValueDistributor, ValueHistogram};
use connect_plus::session::{GameSession, SessionEvent, SessionPhase};

const SIDE: i32 = 7;

/// Strategy: tiles as (value, col, row) on a 7x7 board, duplicates allowed.
fn tiles_strategy() -> impl Strategy<Value = Vec<(u32, i32, i32)>> {
    prop::collection::vec((1..=9u32, 0..SIDE, 0..SIDE), 0..30)
}

/// Build a board, skipping tiles whose square is already taken.
fn build_board(tiles: &[(u32, i32, i32)]) -> Board {
    let mut board = Board::new(Dimensions::new(SIDE, SIDE), DEFAULT_BENCHMARKS.to_vec());
    for (i, &(value, col, row)) in tiles.iter().enumerate() {
        let square = Square::new(col, row);
        if board.tile_at(square).is_none() {
            board.add_tile(TileId::new(i as u32), value, square);
        }
    }
    board
}

/// Neighbour sum computed the slow way.
fn brute_sum(board: &Board, square: Square) -> u32 {
    let mut sum = 0;
    for dc in -1..=1 {
        for dr in -1..=1 {
            if (dc, dr) != (0, 0) {
                sum += board
                    .tile_at(Square::new(square.col + dc, square.row + dr))
                    .map_or(0, |t| t.value);
            }
        }
    }
    sum
}

proptest! {
    // 1. can_place is exactly "free and neighbours sum to the value"
    #[test]
    fn placement_rule_matches_definition(tiles in tiles_strategy(), value in 1..=20u32) {
        let board = build_board(&tiles);
        for square in Dimensions::new(SIDE, SIDE).squares() {
            let expected = board.tile_at(square).is_none() && brute_sum(&board, square) == value;
            prop_assert_eq!(board.can_place(value, square), expected, "at {}", square);
        }
    }

    // 2. possible_squares lists every legal square once, row-major
    #[test]
    fn possible_squares_complete_and_ordered(tiles in tiles_strategy(), value in 1..=20u32) {
        let board = build_board(&tiles);
        let squares = board.possible_squares(value);

        let expected: Vec<Square> = Dimensions::new(SIDE, SIDE)
            .squares()
            .filter(|&s| board.can_place(value, s))
            .collect();
        prop_assert_eq!(&squares, &expected);
        prop_assert!(squares.windows(2).all(|w| (w[0].row, w[0].col) < (w[1].row, w[1].col)));
        prop_assert_eq!(board.has_possible_square(value), !squares.is_empty());
    }

    // 3. squares off the board are never placeable
    #[test]
    fn off_board_never_placeable(tiles in tiles_strategy(), value in 1..=20u32, col in -3..SIDE + 3, row in -3..SIDE + 3) {
        let board = build_board(&tiles);
        if !board.dimensions().contains(Square::new(col, row)) {
            prop_assert!(!board.can_place(value, Square::new(col, row)));
        }
    }

    // 4. growth shifts tiles without changing any neighbour sum
    #[test]
    fn upsize_preserves_sums(tiles in tiles_strategy()) {
        let before = build_board(&tiles);
        let mut after = before.clone();
        after.check_upsize(0, 20);

        prop_assert_eq!(after.dimensions(), Dimensions::new(SIDE + 2, SIDE + 2));
        prop_assert_eq!(after.score(), before.score());
        for square in Dimensions::new(SIDE, SIDE).squares() {
            prop_assert_eq!(after.adjacent_sum(square.offset(1, 1)), before.adjacent_sum(square));
        }
    }

    // 5. each benchmark fires exactly once however the score climbs
    #[test]
    fn benchmarks_fire_once(steps in prop::collection::vec(1..=150u32, 1..30)) {
        let mut board = Board::new(Dimensions::new(5, 5), DEFAULT_BENCHMARKS.to_vec());
        let mut score = 0;
        let mut fired = Vec::new();
        for step in steps {
            fired.extend(board.check_upsize(score, score + step));
            score += step;
        }

        let expected: Vec<u32> = DEFAULT_BENCHMARKS.iter().copied().filter(|&b| b <= score).collect();
        prop_assert_eq!(&fired, &expected);
        prop_assert_eq!(board.benchmarks_crossed(), expected.as_slice());
        let side = 5 + 2 * expected.len() as i32;
        prop_assert_eq!(board.dimensions(), Dimensions::new(side, side));
    }

    // 6. repeated or overlapping score ranges never refire a benchmark
    #[test]
    fn overlapping_ranges_fire_once(ranges in prop::collection::vec((0..1500u32, 0..1500u32), 1..20)) {
        let mut board = Board::new(Dimensions::new(5, 5), DEFAULT_BENCHMARKS.to_vec());
        let mut fired = Vec::new();
        for (a, b) in ranges {
            fired.extend(board.check_upsize(a.min(b), a.max(b)));
        }

        let mut unique = fired.clone();
        unique.sort_unstable();
        unique.dedup();
        prop_assert_eq!(unique.len(), fired.len(), "refired in {:?}", fired);
        let side = 5 + 2 * fired.len() as i32;
        prop_assert_eq!(board.dimensions(), Dimensions::new(side, side));
    }

    // 7. generated values stay within 1..=max
    #[test]
    fn sample_in_range(values in prop::collection::vec(1..=12u32, 0..40), max in 1..=12u32, seed in any::<u64>()) {
        let distributor = TileValueDistributor::new(8.0);
        let histogram = ValueHistogram::from_values(values);
        let mut rng = GameRng::new(seed);
        for _ in 0..20 {
            let v = distributor.sample(&histogram, max, &mut rng);
            prop_assert!((1..=max).contains(&v), "drew {} with max {}", v, max);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    // 8. over a whole game the score only rises, by each placed value
    #[test]
    fn score_rises_by_placed_value(seed in any::<u64>()) {
        let mut session = GameSession::new(GameConfig::default().with_seed(seed)).unwrap();
        let mut policy = GameRng::new(seed).for_context("policy");
        let mut score = session.score();

        for _ in 0..5_000 {
            if session.is_game_over() {
                break;
            }
            let input = if session.phase() == SessionPhase::Playing {
                policy.choose(&session.possible_squares()).copied()
            } else {
                None
            };
            session.step(input);

            for event in session.drain_events() {
                if let SessionEvent::TilePlaced { value, square, score: after, .. } = event {
                    prop_assert_eq!(after, score + value);
                    prop_assert_eq!(session.board().tile_at(square).map(|t| t.value), Some(value));
                    score = after;
                }
            }
            prop_assert_eq!(session.score(), score);
        }
    }
}
