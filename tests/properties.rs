//! Property-based tests over randomized move sequences.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use chess_core::board::{generate_legal_moves, Board};
use chess_core::piece::Color;

fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=25usize
}

proptest! {
    /// make_move followed by take_back restores the board exactly,
    /// including its incremental Code.
    #[test]
    fn make_then_take_back_restores_state(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::starting_position();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut side = Color::White;
        let mut undo_stack = Vec::new();

        for _ in 0..num_moves {
            let moves = generate_legal_moves(&board, side);
            if moves.is_empty() {
                break;
            }
            let idx = rng.gen_range(0..moves.len());
            let mv = moves.get(idx).unwrap();
            let undo = board.make_move(mv);
            undo_stack.push((mv, undo));
            side = side.opposite();
        }

        while let Some((mv, undo)) = undo_stack.pop() {
            board.take_back(mv, undo);
            side = side.opposite();
        }

        prop_assert_eq!(board.hash(), Board::starting_position().hash());
        prop_assert_eq!(board.current_turn(), Color::White);
        prop_assert_eq!(board.half_move_clock(), 0);
    }

    /// The incrementally maintained Code never drifts from a full
    /// recomputation, no matter what sequence of moves produced it.
    #[test]
    fn code_matches_recomputation_after_random_moves(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::starting_position();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut side = Color::White;

        for _ in 0..num_moves {
            let moves = generate_legal_moves(&board, side);
            if moves.is_empty() {
                break;
            }
            let idx = rng.gen_range(0..moves.len());
            let mv = moves.get(idx).unwrap();
            board.make_move(mv);
            side = side.opposite();

            prop_assert_eq!(board.code().hash(), board.recompute_code().hash());
        }
    }

    /// Every legal move, once made, leaves the mover's own king safe.
    #[test]
    fn legal_moves_never_leave_own_king_in_check(seed in seed_strategy(), num_moves in 0..15usize) {
        let mut board = Board::starting_position();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut side = Color::White;

        for _ in 0..num_moves {
            let moves = generate_legal_moves(&board, side);
            if moves.is_empty() {
                break;
            }

            let mut scratch = board.clone();
            for mv in moves.iter() {
                let undo = scratch.make_move(*mv);
                prop_assert!(!chess_core::board::is_king_threatened(&scratch, side));
                scratch.take_back(*mv, undo);
            }

            let idx = rng.gen_range(0..moves.len());
            let mv = moves.get(idx).unwrap();
            board.make_move(mv);
            side = side.opposite();
        }
    }

    /// Legal moves are a subset of pseudo-legal (potential) moves.
    #[test]
    fn legal_moves_are_a_subset_of_potential_moves(seed in seed_strategy(), num_moves in 0..15usize) {
        let mut board = Board::starting_position();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut side = Color::White;

        for _ in 0..num_moves {
            let legal = generate_legal_moves(&board, side);
            let potential = chess_core::board::generate_all_potential_moves(&board, side);
            for mv in legal.iter() {
                prop_assert!(potential.contains(*mv));
            }
            if legal.is_empty() {
                break;
            }
            let idx = rng.gen_range(0..legal.len());
            let mv = legal.get(idx).unwrap();
            board.make_move(mv);
            side = side.opposite();
        }
    }
}
