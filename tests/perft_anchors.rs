//! Perft (move path enumeration) anchors: node counts at fixed depths
//! from known positions, the standard way to validate a move
//! generator's correctness end to end.

use chess_core::board::{generate_legal_moves, Board};
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
    for &mv in moves.iter() {
        let undo = scratch.make_move(mv);
        nodes += perft(&scratch, side.opposite(), depth - 1);
        scratch.take_back(mv, undo);
    }
    nodes
}

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[test]
fn perft_depth_1_from_start() {
    let board = Board::try_from_fen(START_FEN).unwrap();
    assert_eq!(perft(&board, Color::White, 1), 20);
}

#[test]
fn perft_depth_2_from_start() {
    let board = Board::try_from_fen(START_FEN).unwrap();
    assert_eq!(perft(&board, Color::White, 2), 400);
}

#[test]
fn perft_depth_3_from_start() {
    let board = Board::try_from_fen(START_FEN).unwrap();
    assert_eq!(perft(&board, Color::White, 3), 8_902);
}

#[test]
fn perft_depth_4_from_start() {
    let board = Board::try_from_fen(START_FEN).unwrap();
    assert_eq!(perft(&board, Color::White, 4), 197_281);
}

#[test]
#[ignore = "depth 5 from start takes several seconds under a mailbox generator"]
fn perft_depth_5_from_start() {
    let board = Board::try_from_fen(START_FEN).unwrap();
    assert_eq!(perft(&board, Color::White, 5), 4_865_609);
}

#[test]
fn perft_kiwipete_depth_1() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let board = Board::try_from_fen(fen).unwrap();
    assert_eq!(perft(&board, Color::White, 1), 48);
}

#[test]
fn perft_kiwipete_depth_2() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let board = Board::try_from_fen(fen).unwrap();
    assert_eq!(perft(&board, Color::White, 2), 2_039);
}

#[test]
fn perft_en_passant_position() {
    let fen = "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3";
    let board = Board::try_from_fen(fen).unwrap();
    // e5 has exactly one en-passant capture available among its moves.
    let moves = generate_legal_moves(&board, Color::White);
    let ep_moves = moves.iter().filter(|m| m.is_en_passant()).count();
    assert_eq!(ep_moves, 1);
}
