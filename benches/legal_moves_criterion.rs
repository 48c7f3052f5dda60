use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use plum_rules::move_generation::legal_move_table::{compute_legal_move_table, legal_move_count};
use plum_rules::utils::self_play::{play_random_game, SelfPlayConfig};
use plum_rules::{BoardState, ChessResult, Color, PieceKind};

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    build: fn() -> ChessResult<BoardState>,
    expected_white_moves: usize,
}

fn opening() -> ChessResult<BoardState> {
    Ok(BoardState::standard())
}

fn castle_ready() -> ChessResult<BoardState> {
    let mut board = BoardState::new_empty();
    board.add_piece(Color::White, PieceKind::King, "King1", 0, 3)?;
    board.add_piece(Color::White, PieceKind::Rook, "Rook1", 0, 0)?;
    board.add_piece(Color::White, PieceKind::Rook, "Rook2", 0, 7)?;
    board.add_piece(Color::Black, PieceKind::King, "King1", 7, 3)?;
    Ok(board)
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "opening",
        build: opening,
        expected_white_moves: 20,
    },
    BenchCase {
        name: "castle_ready",
        build: castle_ready,
        expected_white_moves: 26,
    },
];

fn standard_suite() -> bool {
    matches!(
        std::env::var("PLUM_RULES_BENCH_SUITE"),
        Ok(value) if value.eq_ignore_ascii_case("standard")
    )
}

fn bench_legal_move_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("legal_move_table");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));
    group.sample_size(20);

    for case in CASES {
        let board = (case.build)().expect("benchmark position should build");

        // Correctness guard before benchmarking.
        let table = compute_legal_move_table(&board, Color::White).expect("table should build");
        assert_eq!(
            legal_move_count(&table),
            case.expected_white_moves,
            "move count mismatch for {}",
            case.name
        );

        group.throughput(Throughput::Elements(case.expected_white_moves as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(case.name),
            &case.expected_white_moves,
            |b, expected| {
                b.iter(|| {
                    let table = compute_legal_move_table(black_box(&board), Color::White)
                        .expect("table benchmark run should succeed");
                    assert_eq!(legal_move_count(&table), *expected);
                    black_box(table)
                });
            },
        );
    }

    group.finish();
}

fn bench_self_play(c: &mut Criterion) {
    let plies = if standard_suite() { 200 } else { 40 };
    let config = SelfPlayConfig {
        max_plies: plies,
        seed: 1234,
    };
    let warmup = play_random_game(&config).expect("self-play should run");
    assert!(warmup.plies <= plies);

    let mut group = c.benchmark_group("self_play");
    group.sample_size(10);
    group.bench_function(format!("seed_1234_max_{plies}"), |b| {
        b.iter(|| {
            let report = play_random_game(black_box(&config)).expect("self-play should run");
            assert_eq!(report.plies, warmup.plies);
            black_box(report.plies)
        });
    });
    group.finish();
}

criterion_group!(legal_move_benches, bench_legal_move_tables, bench_self_play);
criterion_main!(legal_move_benches);
