//! Move history, repetition tracking, and the fifty/seventy-five-move
//! progress counters.

use crate::board::Board;
use crate::config;
use crate::moves::Move;

/// Whether a side has agreed to take a draw it is entitled to claim.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DrawDisposition {
    Reached,
    Accepted,
    Declined,
}

#[derive(Clone, Debug, Default)]
pub struct History {
    moves: Vec<Move>,
    codes: Vec<u64>,
    boards: Vec<Board>,
    tentative_depth: u32,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        History::default()
    }

    /// Seeds the history with the position a game starts from, so a
    /// later return to that exact position counts as a repetition of
    /// it rather than a first occurrence.
    #[must_use]
    pub fn starting_from(board: &Board) -> Self {
        let mut history = History::new();
        history.codes.push(board.hash());
        history.boards.push(board.clone());
        history
    }

    pub fn record_move(&mut self, mv: Move, resulting_board: &Board) {
        debug_assert_eq!(
            self.tentative_depth, 0,
            "committed history must not be recorded inside a tentative search"
        );
        self.moves.push(mv);
        self.codes.push(resulting_board.hash());
        self.boards.push(resulting_board.clone());
    }

    pub fn push_tentative(&mut self, resulting_board: &Board) {
        self.tentative_depth += 1;
        self.codes.push(resulting_board.hash());
        self.boards.push(resulting_board.clone());
    }

    pub fn pop_tentative(&mut self) {
        debug_assert!(self.tentative_depth > 0);
        self.tentative_depth -= 1;
        self.codes.pop();
        self.boards.pop();
    }

    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    #[must_use]
    pub fn is_probably_nth_repetition(&self, code: u64, n: u32) -> bool {
        self.codes.iter().filter(|&&c| c == code).count() as u32 >= n
    }

    /// Like [`is_probably_nth_repetition`](Self::is_probably_nth_repetition),
    /// but additionally compares full board state among same-hash
    /// entries, so a 48-bit Code collision can't be mistaken for a
    /// repeated position.
    #[must_use]
    pub fn is_certainly_nth_repetition(&self, board: &Board, n: u32) -> bool {
        let code = board.hash();
        self.codes
            .iter()
            .zip(self.boards.iter())
            .filter(|(&c, stored)| c == code && *stored == board)
            .count() as u32
            >= n
    }

    #[must_use]
    pub fn threefold_repetition_status(&self, board: &Board) -> Option<DrawDisposition> {
        if self.is_certainly_nth_repetition(board, config::FIVEFOLD_REPETITION_COUNT) {
            Some(DrawDisposition::Accepted)
        } else if self.is_certainly_nth_repetition(board, config::THREEFOLD_REPETITION_COUNT) {
            Some(DrawDisposition::Reached)
        } else {
            None
        }
    }

    #[must_use]
    pub fn has_been_n_half_moves_without_progress(board: &Board, n: i32) -> bool {
        board.half_move_clock() >= n
    }

    #[must_use]
    pub fn fifty_move_status(board: &Board) -> Option<DrawDisposition> {
        if History::has_been_n_half_moves_without_progress(
            board,
            config::SEVENTY_FIVE_MOVE_HALFMOVE_THRESHOLD,
        ) {
            Some(DrawDisposition::Accepted)
        } else if History::has_been_n_half_moves_without_progress(
            board,
            config::FIFTY_MOVE_HALFMOVE_THRESHOLD,
        ) {
            Some(DrawDisposition::Reached)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coord;

    #[test]
    fn fresh_history_has_no_repetition() {
        let history = History::new();
        assert!(!history.is_probably_nth_repetition(42, 3));
    }

    #[test]
    fn counts_repeated_codes() {
        let mut history = History::new();
        let board = Board::starting_position();
        let mv = Move::normal(
            Coord::try_from_algebraic("g1").unwrap(),
            Coord::try_from_algebraic("f3").unwrap(),
        );
        history.record_move(mv, &board);
        history.record_move(mv, &board);
        history.record_move(mv, &board);
        let code = board.hash();
        assert!(history.is_probably_nth_repetition(code, 3));
        assert!(!history.is_probably_nth_repetition(code, 4));
    }

    #[test]
    fn starting_from_seeds_the_initial_position() {
        let board = Board::starting_position();
        let history = History::starting_from(&board);
        assert!(history.is_certainly_nth_repetition(&board, 1));
        assert!(!history.is_certainly_nth_repetition(&board, 2));
    }

    #[test]
    fn certainly_nth_repetition_requires_matching_board_not_just_hash() {
        let board = Board::starting_position();
        let mut history = History::starting_from(&board);
        history.record_move(
            Move::normal(
                Coord::try_from_algebraic("g1").unwrap(),
                Coord::try_from_algebraic("f3").unwrap(),
            ),
            &board,
        );
        assert!(history.is_certainly_nth_repetition(&board, 2));
    }

    #[test]
    fn tentative_push_pop_does_not_touch_moves() {
        let mut history = History::new();
        let board = Board::starting_position();
        history.push_tentative(&board);
        history.push_tentative(&board);
        assert!(history.moves().is_empty());
        history.pop_tentative();
        history.pop_tentative();
    }
}
