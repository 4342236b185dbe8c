//! Benchmarks for move generation and search.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chess_core::board::{evaluate, generate_legal_moves, Board};
use chess_core::game::Game;
use chess_core::piece::Color;

fn perft(board: &Board, side: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = generate_legal_moves(board, side);
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    let mut scratch = board.clone();
    for mv in moves.iter() {
        let undo = scratch.make_move(*mv);
        nodes += perft(&scratch, side.opposite(), depth - 1);
        scratch.take_back(*mv, undo);
    }
    nodes
}

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");

    let startpos = Board::starting_position();
    for depth in 1..=4 {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| perft(black_box(&startpos), Color::White, depth))
        });
    }

    let kiwipete =
        Board::try_from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap();
    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("kiwipete", depth), &depth, |b, &depth| {
            b.iter(|| perft(black_box(&kiwipete), Color::White, depth))
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    let startpos = Board::starting_position();
    group.bench_function("startpos", |b| {
        b.iter(|| black_box(generate_legal_moves(&startpos, Color::White)))
    });

    let middlegame =
        Board::try_from_fen("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4")
            .unwrap();
    group.bench_function("middlegame", |b| {
        b.iter(|| black_box(generate_legal_moves(&middlegame, Color::White)))
    });

    let kiwipete =
        Board::try_from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap();
    group.bench_function("kiwipete", |b| {
        b.iter(|| black_box(generate_legal_moves(&kiwipete, Color::White)))
    });

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    for depth in [2, 3, 4] {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| {
                let game = Game::new();
                let _ = depth;
                game.find_best_move(1, Duration::from_secs(30))
            })
        });
    }

    let tactical_fen = "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4";
    group.bench_function("tactical", |b| {
        b.iter(|| {
            let board = Board::try_from_fen(tactical_fen).unwrap();
            let game = Game::from_board(board);
            game.find_best_move(1, Duration::from_secs(30))
        })
    });

    group.finish();
}

fn bench_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval");

    let positions = [
        ("startpos", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
        (
            "middlegame",
            "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
        ),
        ("endgame", "8/5k2/8/8/8/8/5K2/4R3 w - - 0 1"),
    ];

    for (name, fen) in positions {
        let board = Board::try_from_fen(fen).unwrap();
        group.bench_with_input(BenchmarkId::new("position", name), &board, |b, board| {
            b.iter(|| black_box(evaluate(board, Color::White, false, false, 0)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_perft, bench_movegen, bench_search, bench_eval);
criterion_main!(benches);
