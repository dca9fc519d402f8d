use connect_plus::board::Board;
use connect_plus::core::{GameConfig, GameRng, Square};
use connect_plus::distributor::TileValueDistributor;
use connect_plus::queue::Queue;
use connect_plus::session::{GameSession, SessionPhase};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

/// Boards from a few random games, sampled at several stages.
fn corpus() -> Vec<(Board, Queue)> {
    let mut boards = Vec::new();
    for seed in 0..8 {
        let mut session = GameSession::new(GameConfig::default().with_seed(seed)).unwrap();
        let mut policy = GameRng::new(seed).for_context("policy");
        let mut placements = 0;
        while !session.is_game_over() {
            let input: Option<Square> = if session.phase() == SessionPhase::Playing {
                placements += 1;
                if placements % 5 == 0 {
                    boards.push((session.board().clone(), session.queue().clone()));
                }
                policy.choose(&session.possible_squares()).copied()
            } else {
                None
            };
            session.step(input);
        }
        boards.push((session.board().clone(), session.queue().clone()));
    }
    boards
}

fn bench_rules(c: &mut Criterion) {
    let boards = corpus();
    c.bench_function("rules/possible_squares", |b| {
        b.iter(|| {
            let mut acc = 0usize;
            for (board, _) in &boards {
                for value in 1..=6 {
                    acc += board.possible_squares(black_box(value)).len();
                }
            }
            black_box(acc)
        })
    });
    c.bench_function("rules/adjacent_sum", |b| {
        b.iter(|| {
            let mut acc = 0u32;
            for (board, _) in &boards {
                for square in board.dimensions().squares() {
                    acc = acc.wrapping_add(board.adjacent_sum(square));
                }
            }
            black_box(acc)
        })
    });
}

fn bench_distributor(c: &mut Criterion) {
    let boards = corpus();
    let distributor = TileValueDistributor::new(8.0);
    c.bench_function("distributor/next_value", |b| {
        let mut rng = GameRng::new(42);
        b.iter(|| {
            let mut acc = 0u32;
            for (board, queue) in &boards {
                acc ^= distributor.next_value(board, queue, &mut rng);
            }
            black_box(acc)
        })
    });
}

fn bench_game(c: &mut Criterion) {
    c.bench_function("session/full_game", |b| {
        b.iter(|| black_box(connect_plus::autoplay::play_game(&GameConfig::default(), 7, 100_000)))
    });
}

criterion_group!(benches, bench_rules, bench_distributor, bench_game);
criterion_main!(benches);
