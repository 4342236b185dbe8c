//! `make_move`/`take_back`: the only way a [`Board`] is mutated.
//!
//! `make_move` incrementally updates material, position, castling
//! rights, en-passant target, and the Code together, and captures
//! everything needed to invert those updates exactly in the returned
//! [`UndoState`].

use crate::code::{CastleSide, Code};
use crate::config;
use crate::coord::Coord;
use crate::error::MoveConsistencyError;
use crate::piece::{Color, ColoredPiece, Piece};

use super::eval::piece_square_value;
use super::{Board, CastlingEligibility, EnPassantTarget};
use crate::moves::{Move, MoveCategory};

/// Everything `take_back` needs to invert a `make_move` call exactly.
#[derive(Clone, Copy, Debug)]
pub struct UndoState {
    captured_piece: ColoredPiece,
    captured_square: Coord,
    previous_en_passant_target: Option<EnPassantTarget>,
    previous_castling: [CastlingEligibility; 2],
    previous_code: Code,
    previous_half_move_clock: i32,
    previous_full_move_number: i32,
}

fn material_delta(piece: ColoredPiece) -> i32 {
    if piece.is_none() {
        0
    } else {
        config::material_weight(piece.piece())
    }
}

fn position_delta(piece: ColoredPiece, coord: Coord) -> i32 {
    if piece.is_none() {
        0
    } else {
        piece_square_value(piece.piece(), piece.color().unwrap(), coord)
    }
}

impl Board {
    fn place(&mut self, coord: Coord, piece: ColoredPiece) {
        let previous = self.piece_at(coord);
        debug_assert!(previous.is_none());
        self.set_square(coord, piece);
        if !piece.is_none() {
            let color = piece.color().unwrap();
            self.material[color.index()] += material_delta(piece);
            self.position[color.index()] += position_delta(piece, coord);
            self.code.toggle_piece(color, piece, coord);
            if matches!(piece.piece(), Piece::King) {
                self.set_king_position(color, coord);
            }
        }
    }

    fn remove(&mut self, coord: Coord) -> ColoredPiece {
        let piece = self.piece_at(coord);
        if piece.is_none() {
            return piece;
        }
        let color = piece.color().unwrap();
        self.material[color.index()] -= material_delta(piece);
        self.position[color.index()] -= position_delta(piece, coord);
        self.code.toggle_piece(color, piece, coord);
        self.set_square(coord, ColoredPiece::NONE);
        piece
    }

    fn set_castling(&mut self, color: Color, new: CastlingEligibility) {
        let current = self.castling_eligibility(color);
        if current.kingside_ineligible != new.kingside_ineligible {
            self.code.toggle_castling(color, CastleSide::Kingside);
        }
        if current.queenside_ineligible != new.queenside_ineligible {
            self.code.toggle_castling(color, CastleSide::Queenside);
        }
        *self.castling_eligibility_mut(color) = new;
    }

    fn set_en_passant(&mut self, target: Option<EnPassantTarget>) {
        if let Some(old) = self.en_passant_target {
            self.code.clear_en_passant_file(old.coord.col());
        }
        if let Some(new) = target {
            self.code.set_en_passant_file(new.coord.col());
        }
        self.en_passant_target = target;
    }

    fn castling_rook_squares(color: Color, kingside: bool) -> (Coord, Coord) {
        let back_row = if color.is_white() {
            config::WHITE_BACK_ROW
        } else {
            config::BLACK_BACK_ROW
        };
        if kingside {
            (
                Coord::new_unchecked(back_row, config::KING_ROOK_COLUMN),
                Coord::new_unchecked(back_row, config::KINGSIDE_CASTLED_ROOK_COLUMN),
            )
        } else {
            (
                Coord::new_unchecked(back_row, config::QUEEN_ROOK_COLUMN),
                Coord::new_unchecked(back_row, config::QUEENSIDE_CASTLED_ROOK_COLUMN),
            )
        }
    }

    fn update_castling_rights_after_move(&mut self, mover: ColoredPiece, from: Coord, captured_at: Coord, captured: ColoredPiece) {
        if let Some(color) = mover.color() {
            if matches!(mover.piece(), Piece::King) {
                self.set_castling(color, CastlingEligibility::none_eligible());
            } else if matches!(mover.piece(), Piece::Rook) {
                let back_row = if color.is_white() {
                    config::WHITE_BACK_ROW
                } else {
                    config::BLACK_BACK_ROW
                };
                if from.row() == back_row {
                    let mut elig = self.castling_eligibility(color);
                    if from.col() == config::KING_ROOK_COLUMN {
                        elig.kingside_ineligible = true;
                    } else if from.col() == config::QUEEN_ROOK_COLUMN {
                        elig.queenside_ineligible = true;
                    }
                    self.set_castling(color, elig);
                }
            }
        }
        if !captured.is_none() && matches!(captured.piece(), Piece::Rook) {
            let color = captured.color().unwrap();
            let back_row = if color.is_white() {
                config::WHITE_BACK_ROW
            } else {
                config::BLACK_BACK_ROW
            };
            if captured_at.row() == back_row {
                let mut elig = self.castling_eligibility(color);
                if captured_at.col() == config::KING_ROOK_COLUMN {
                    elig.kingside_ineligible = true;
                } else if captured_at.col() == config::QUEEN_ROOK_COLUMN {
                    elig.queenside_ineligible = true;
                }
                self.set_castling(color, elig);
            }
        }
    }

    /// Applies `mv`, which must be a legal move for the current side
    /// to move, and returns the state needed to undo it.
    pub fn make_move(&mut self, mv: Move) -> UndoState {
        let mover_color = self.current_turn();
        let mover = self.remove(mv.from());

        if mover.is_none() {
            panic!(
                "{}",
                MoveConsistencyError {
                    description: "make_move called with no piece on the source square".into(),
                    from: mv.from(),
                    to: mv.to(),
                }
            );
        }

        let previous_en_passant_target = self.en_passant_target;
        let previous_castling = self.castling;
        let previous_code = self.code;
        let previous_half_move_clock = self.half_move_clock;
        let previous_full_move_number = self.full_move_number;

        let is_pawn_move = matches!(mover.piece(), Piece::Pawn);
        let mut captured = ColoredPiece::NONE;
        let mut captured_square = mv.to();

        match mv.category() {
            MoveCategory::EnPassant => {
                let capture_row = mv.from().row();
                captured_square = Coord::new_unchecked(capture_row, mv.to().col());
                captured = self.remove(captured_square);
            }
            MoveCategory::NormalCapturing => {
                captured = self.remove(mv.to());
            }
            MoveCategory::Castling => {}
            MoveCategory::Default => {
                captured = self.remove(mv.to());
            }
        }

        let placed = if mv.is_promoting() {
            mv.promoted_piece()
        } else {
            mover
        };
        self.place(mv.to(), placed);

        if matches!(mv.category(), MoveCategory::Castling) {
            let kingside = mv.to().col() == config::KINGSIDE_CASTLED_KING_COLUMN;
            let (rook_from, rook_to) = Board::castling_rook_squares(mover_color, kingside);
            let rook = self.remove(rook_from);
            self.place(rook_to, rook);
        }

        self.update_castling_rights_after_move(mover, mv.from(), captured_square, captured);

        let is_double_push = is_pawn_move && (mv.to().row() - mv.from().row()).abs() == 2;
        if is_double_push {
            let skipped_row = if mover_color.is_white() {
                config::WHITE_EN_PASSANT_ROW
            } else {
                config::BLACK_EN_PASSANT_ROW
            };
            self.set_en_passant(Some(EnPassantTarget {
                coord: Coord::new_unchecked(skipped_row, mv.from().col()),
                vulnerable_color: mover_color.opposite(),
            }));
        } else {
            self.set_en_passant(None);
        }

        if is_pawn_move || !captured.is_none() {
            self.half_move_clock = 0;
        } else {
            self.half_move_clock += 1;
        }

        if matches!(mover_color, Color::Black) {
            self.full_move_number += 1;
        }

        self.current_turn = mover_color.opposite();
        self.code.toggle_side_to_move();

        UndoState {
            captured_piece: captured,
            captured_square,
            previous_en_passant_target,
            previous_castling,
            previous_code,
            previous_half_move_clock,
            previous_full_move_number,
        }
    }

    /// Reverses a previous `make_move(mv)` call exactly.
    pub fn take_back(&mut self, mv: Move, undo: UndoState) {
        let mover_color = self.current_turn().opposite();
        self.current_turn = mover_color;

        let placed = self.remove(mv.to());
        let original = if mv.is_promoting() {
            ColoredPiece::new(Piece::Pawn, mover_color)
        } else {
            placed
        };

        if matches!(mv.category(), MoveCategory::Castling) {
            let kingside = mv.to().col() == config::KINGSIDE_CASTLED_KING_COLUMN;
            let (rook_from, rook_to) = Board::castling_rook_squares(mover_color, kingside);
            let rook = self.remove(rook_to);
            self.place(rook_from, rook);
        }

        self.place(mv.from(), original);

        if !undo.captured_piece.is_none() {
            self.place(undo.captured_square, undo.captured_piece);
        }

        self.castling = undo.previous_castling;
        self.en_passant_target = undo.previous_en_passant_target;
        self.code = undo.previous_code;
        self.half_move_clock = undo.previous_half_move_clock;
        self.full_move_number = undo.previous_full_move_number;
    }

    /// A null move: flips the side to move without moving a piece, used
    /// by search extensions that probe "what if I passed".
    pub fn make_null_move(&mut self) -> (Option<EnPassantTarget>, Code) {
        let previous_en_passant = self.en_passant_target;
        let previous_code = self.code;
        self.set_en_passant(None);
        self.current_turn = self.current_turn.opposite();
        self.code.toggle_side_to_move();
        (previous_en_passant, previous_code)
    }

    pub fn unmake_null_move(&mut self, saved: (Option<EnPassantTarget>, Code)) {
        self.current_turn = self.current_turn.opposite();
        self.en_passant_target = saved.0;
        self.code = saved.1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Move;

    #[test]
    fn make_then_take_back_restores_starting_position() {
        let mut board = Board::starting_position();
        let before = board.clone();
        let e2 = Coord::try_from_algebraic("e2").unwrap();
        let e4 = Coord::try_from_algebraic("e4").unwrap();
        let undo = board.make_move(Move::normal(e2, e4));
        assert_ne!(board.code().hash(), before.code().hash());
        board.take_back(Move::normal(e2, e4), undo);
        assert_eq!(board.code().hash(), before.code().hash());
        assert_eq!(board.current_turn(), before.current_turn());
        assert_eq!(board.material(Color::White), before.material(Color::White));
        assert_eq!(board.half_move_clock(), before.half_move_clock());
    }

    #[test]
    fn recomputed_code_matches_incremental_code_after_moves() {
        let mut board = Board::starting_position();
        let e2 = Coord::try_from_algebraic("e2").unwrap();
        let e4 = Coord::try_from_algebraic("e4").unwrap();
        board.make_move(Move::normal(e2, e4));
        assert_eq!(board.code().hash(), board.recompute_code().hash());
    }

    #[test]
    fn capture_updates_material() {
        let mut board = Board::starting_position();
        let e2 = Coord::try_from_algebraic("e2").unwrap();
        let e4 = Coord::try_from_algebraic("e4").unwrap();
        let d7 = Coord::try_from_algebraic("d7").unwrap();
        let d5 = Coord::try_from_algebraic("d5").unwrap();
        board.make_move(Move::normal(e2, e4));
        board.make_move(Move::normal(d7, d5));
        let black_material_before = board.material(Color::Black);
        board.make_move(Move::capturing(e4, d5));
        assert!(board.material(Color::Black) < black_material_before);
    }
}
