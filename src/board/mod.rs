//! Board representation: piece placement, castling/en-passant
//! metadata, and the incremental material/position scores, mutated
//! only through [`make_unmake::make_move`]/[`make_unmake::take_back`].

mod builder;
mod eval;
mod fen;
mod make_unmake;
mod movegen;
mod notation;
mod threats;

pub use builder::BoardBuilder;
pub use eval::evaluate;
pub use make_unmake::UndoState;
pub use movegen::{generate_all_potential_moves, generate_legal_moves};
pub use notation::parse_move;
pub use threats::is_king_threatened;

use std::fmt;

use crate::code::Code;
use crate::coord::Coord;
use crate::piece::{Color, ColoredPiece};

/// Per-color castling eligibility. Both flags clear means both sides
/// are still possible; either set means that side is gone for good.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct CastlingEligibility {
    pub kingside_ineligible: bool,
    pub queenside_ineligible: bool,
}

impl CastlingEligibility {
    #[must_use]
    pub const fn all_eligible() -> Self {
        CastlingEligibility {
            kingside_ineligible: false,
            queenside_ineligible: false,
        }
    }

    #[must_use]
    pub const fn none_eligible() -> Self {
        CastlingEligibility {
            kingside_ineligible: true,
            queenside_ineligible: true,
        }
    }
}

/// The square a pawn skipped on its last two-square advance, and which
/// color may capture it en passant.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EnPassantTarget {
    pub coord: Coord,
    pub vulnerable_color: Color,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Board {
    squares: [ColoredPiece; 64],
    king_position: [Coord; 2],
    castling: [CastlingEligibility; 2],
    material: [i32; 2],
    position: [i32; 2],
    en_passant_target: Option<EnPassantTarget>,
    half_move_clock: i32,
    full_move_number: i32,
    current_turn: Color,
    code: Code,
}

impl Board {
    #[must_use]
    pub fn starting_position() -> Self {
        BoardBuilder::starting_position().build()
    }

    #[must_use]
    pub fn piece_at(&self, coord: Coord) -> ColoredPiece {
        self.squares[coord.index() as usize]
    }

    fn set_square(&mut self, coord: Coord, piece: ColoredPiece) {
        self.squares[coord.index() as usize] = piece;
    }

    #[must_use]
    pub const fn current_turn(&self) -> Color {
        self.current_turn
    }

    #[must_use]
    pub fn king_position(&self, color: Color) -> Coord {
        self.king_position[color.index()]
    }

    fn set_king_position(&mut self, color: Color, coord: Coord) {
        self.king_position[color.index()] = coord;
    }

    #[must_use]
    pub fn castling_eligibility(&self, color: Color) -> CastlingEligibility {
        self.castling[color.index()]
    }

    fn castling_eligibility_mut(&mut self, color: Color) -> &mut CastlingEligibility {
        &mut self.castling[color.index()]
    }

    #[must_use]
    pub fn material(&self, color: Color) -> i32 {
        self.material[color.index()]
    }

    #[must_use]
    pub fn position_score(&self, color: Color) -> i32 {
        self.position[color.index()]
    }

    #[must_use]
    pub fn en_passant_target(&self) -> Option<EnPassantTarget> {
        self.en_passant_target
    }

    #[must_use]
    pub const fn half_move_clock(&self) -> i32 {
        self.half_move_clock
    }

    #[must_use]
    pub const fn full_move_number(&self) -> i32 {
        self.full_move_number
    }

    #[must_use]
    pub const fn code(&self) -> Code {
        self.code
    }

    #[must_use]
    pub fn hash(&self) -> u64 {
        self.code.hash()
    }

    /// Rebuild the Code from scratch, matching invariant I4. Used by
    /// the builder and by tests that check incremental updates never
    /// drift from a full recomputation.
    #[must_use]
    pub fn recompute_code(&self) -> Code {
        let mut code = Code::zero();
        for coord in Coord::all() {
            let piece = self.piece_at(coord);
            if !piece.is_none() {
                code.toggle_piece(piece.color().unwrap(), piece, coord);
            }
        }
        if self.current_turn == Color::Black {
            code.toggle_side_to_move();
        }
        for &color in &[Color::White, Color::Black] {
            let elig = self.castling_eligibility(color);
            if elig.kingside_ineligible {
                code.toggle_castling(color, crate::code::CastleSide::Kingside);
            }
            if elig.queenside_ineligible {
                code.toggle_castling(color, crate::code::CastleSide::Queenside);
            }
        }
        if let Some(ep) = self.en_passant_target {
            code.set_en_passant_file(ep.coord.col());
        }
        code
    }

    /// True when neither side retains enough material to deliver
    /// checkmate (K vs K, K+N vs K, K+B vs K, or same-colored bishops
    /// only on both sides).
    #[must_use]
    pub fn has_insufficient_material(&self) -> bool {
        let mut minor_count = [0u32; 2];
        let mut bishop_square_colors: Vec<bool> = Vec::new();
        for coord in Coord::all() {
            let piece = self.piece_at(coord);
            if piece.is_none() {
                continue;
            }
            match piece.piece() {
                crate::piece::Piece::King => {}
                crate::piece::Piece::Knight | crate::piece::Piece::Bishop => {
                    minor_count[piece.color().unwrap().index()] += 1;
                    if matches!(piece.piece(), crate::piece::Piece::Bishop) {
                        bishop_square_colors.push((coord.row() + coord.col()) % 2 == 0);
                    }
                }
                _ => return false,
            }
        }
        let total_minors = minor_count[0] + minor_count[1];
        if total_minors == 0 {
            return true;
        }
        if total_minors == 1 {
            return true;
        }
        if total_minors == bishop_square_colors.len() as u32 {
            let first = bishop_square_colors[0];
            if bishop_square_colors.iter().all(|&c| c == first) {
                return true;
            }
        }
        false
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            for col in 0..8 {
                let coord = Coord::new_unchecked(row, col);
                let piece = self.piece_at(coord);
                let ch = if piece.is_none() {
                    '.'
                } else {
                    piece.piece().to_fen_char(piece.color().unwrap())
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
