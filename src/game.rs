//! Game orchestration: owns a [`Board`] and [`History`], exposes move
//! play, status, and the search entry points.

use std::time::Duration;

use crate::board::{generate_legal_moves, is_king_threatened, Board};
use crate::config;
use crate::history::{DrawDisposition, History};
use crate::moves::Move;
use crate::piece::Color;
use crate::search::smp::search_multi_threaded;
use crate::search::SearchResult;

#[cfg(feature = "logging")]
use log::info;

/// The game's current phase, as seen from outside.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameStatus {
    Playing,
    Checkmate,
    Stalemate,
    ThreefoldRepetitionReached,
    ThreefoldRepetitionAccepted,
    FivefoldRepetitionDraw,
    FiftyMovesWithoutProgressReached,
    FiftyMovesWithoutProgressAccepted,
    SeventyFiveMovesWithoutProgressDraw,
    InsufficientMaterialDraw,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DrawKind {
    ThreefoldRepetition,
    FiftyMovesWithoutProgress,
}

pub struct Game {
    board: Board,
    history: History,
    draw_accepted: [Option<DrawKind>; 2],
}

impl Game {
    #[must_use]
    pub fn new() -> Self {
        Game::from_board(Board::starting_position())
    }

    #[must_use]
    pub fn from_board(board: Board) -> Self {
        let history = History::starting_from(&board);
        Game {
            board,
            history,
            draw_accepted: [None, None],
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn current_turn(&self) -> Color {
        self.board.current_turn()
    }

    /// Plays `mv`, which must be legal for the side to move, recording
    /// it in the history.
    pub fn play_move(&mut self, mv: Move) {
        let undo = self.board.make_move(mv);
        let _ = undo;
        self.history.record_move(mv, &self.board);
        #[cfg(feature = "logging")]
        {
            let status = self.status();
            if status != GameStatus::Playing {
                info!("game entered status {status:?}");
            }
        }
    }

    #[must_use]
    pub fn legal_moves(&self) -> crate::moves::MoveList {
        generate_legal_moves(&self.board, self.current_turn())
    }

    /// Accepts or declines an offered draw for `color`. Only takes
    /// effect once both sides have accepted the same kind.
    pub fn respond_to_draw_offer(&mut self, color: Color, kind: DrawKind, accept: bool) {
        self.draw_accepted[color.index()] = if accept { Some(kind) } else { None };
    }

    fn both_accepted(&self, kind: DrawKind) -> bool {
        self.draw_accepted[0] == Some(kind) && self.draw_accepted[1] == Some(kind)
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        let side = self.current_turn();
        if self.board.has_insufficient_material() {
            return GameStatus::InsufficientMaterialDraw;
        }

        if generate_legal_moves(&self.board, side).is_empty() {
            return if is_king_threatened(&self.board, side) {
                GameStatus::Checkmate
            } else {
                GameStatus::Stalemate
            };
        }

        match self.history.threefold_repetition_status(&self.board) {
            Some(DrawDisposition::Accepted) => return GameStatus::FivefoldRepetitionDraw,
            Some(DrawDisposition::Reached) => {
                if self.both_accepted(DrawKind::ThreefoldRepetition) {
                    return GameStatus::ThreefoldRepetitionAccepted;
                }
                return GameStatus::ThreefoldRepetitionReached;
            }
            Some(DrawDisposition::Declined) | None => {}
        }

        match History::fifty_move_status(&self.board) {
            Some(DrawDisposition::Accepted) => return GameStatus::SeventyFiveMovesWithoutProgressDraw,
            Some(DrawDisposition::Reached) => {
                if self.both_accepted(DrawKind::FiftyMovesWithoutProgress) {
                    return GameStatus::FiftyMovesWithoutProgressAccepted;
                }
                return GameStatus::FiftyMovesWithoutProgressReached;
            }
            Some(DrawDisposition::Declined) | None => {}
        }

        GameStatus::Playing
    }

    /// Asks the search for the best move for the side to move, using
    /// `num_threads` workers and `time_budget` as the move clock.
    #[must_use]
    pub fn find_best_move(&self, num_threads: usize, time_budget: Duration) -> SearchResult {
        search_multi_threaded(
            &self.board,
            self.current_turn(),
            num_threads,
            config::DEFAULT_SEARCH_DEPTH,
            time_budget,
        )
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coord;

    #[test]
    fn fresh_game_is_playing() {
        assert_eq!(Game::new().status(), GameStatus::Playing);
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let mut game = Game::new();
        let moves = [
            ("f2", "f3"),
            ("e7", "e5"),
            ("g2", "g4"),
            ("d8", "h4"),
        ];
        for (from, to) in moves {
            let from = Coord::try_from_algebraic(from).unwrap();
            let to = Coord::try_from_algebraic(to).unwrap();
            let legal = game.legal_moves();
            let mv = legal
                .iter()
                .find(|m| m.from() == from && m.to() == to)
                .copied()
                .unwrap_or_else(|| Move::normal(from, to));
            game.play_move(mv);
        }
        assert_eq!(game.status(), GameStatus::Checkmate);
        assert_eq!(game.current_turn(), Color::White);
    }

    #[test]
    fn only_kings_is_insufficient_material() {
        let fen = "4k3/8/8/8/8/8/8/4K3 w - - 0 1";
        let board = Board::try_from_fen(fen).unwrap();
        let game = Game::from_board(board);
        assert_eq!(game.status(), GameStatus::InsufficientMaterialDraw);
    }
}
