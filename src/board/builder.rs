//! Fluent builder for constructing a `Board` piece by piece, without
//! needing a FEN string.

use crate::code::Code;
use crate::coord::Coord;
use crate::error::BoardBuilderError;
use crate::piece::{Color, ColoredPiece, Piece};

use super::{Board, CastlingEligibility, EnPassantTarget};

#[derive(Clone, Debug)]
pub struct BoardBuilder {
    squares: [ColoredPiece; 64],
    castling: [CastlingEligibility; 2],
    en_passant_target: Option<EnPassantTarget>,
    side_to_move: Color,
    half_move_clock: i32,
    full_move_number: i32,
}

impl BoardBuilder {
    #[must_use]
    pub fn new() -> Self {
        BoardBuilder {
            squares: [ColoredPiece::NONE; 64],
            castling: [CastlingEligibility::none_eligible(); 2],
            en_passant_target: None,
            side_to_move: Color::White,
            half_move_clock: 0,
            full_move_number: 1,
        }
    }

    #[must_use]
    pub fn starting_position() -> Self {
        let mut builder = BoardBuilder::new();
        builder.castling = [CastlingEligibility::all_eligible(); 2];

        const BACK_RANK: [Piece; 8] = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (col, &piece) in BACK_RANK.iter().enumerate() {
            builder = builder
                .piece(Coord::new_unchecked(0, col as i32), Color::Black, piece)
                .piece(Coord::new_unchecked(1, col as i32), Color::Black, Piece::Pawn)
                .piece(Coord::new_unchecked(6, col as i32), Color::White, Piece::Pawn)
                .piece(Coord::new_unchecked(7, col as i32), Color::White, piece);
        }
        builder
    }

    #[must_use]
    pub fn piece(mut self, coord: Coord, color: Color, piece: Piece) -> Self {
        self.squares[coord.index() as usize] = ColoredPiece::new(piece, color);
        self
    }

    /// Places a piece given a raw row/column pair, for callers that
    /// haven't already validated the square into a [`Coord`] (e.g. a
    /// row/column pair read directly off an external format). Fails
    /// if either is outside `0..8`.
    pub fn try_piece_at(
        self,
        row: i32,
        col: i32,
        color: Color,
        piece: Piece,
    ) -> Result<Self, BoardBuilderError> {
        if !(0..8).contains(&row) {
            return Err(BoardBuilderError::RowOutOfRange { row });
        }
        if !(0..8).contains(&col) {
            return Err(BoardBuilderError::ColumnOutOfRange { col });
        }
        Ok(self.piece(Coord::new_unchecked(row, col), color, piece))
    }

    #[must_use]
    pub fn clear(mut self, coord: Coord) -> Self {
        self.squares[coord.index() as usize] = ColoredPiece::NONE;
        self
    }

    #[must_use]
    pub fn side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    #[must_use]
    pub fn castling(mut self, color: Color, eligibility: CastlingEligibility) -> Self {
        self.castling[color.index()] = eligibility;
        self
    }

    #[must_use]
    pub fn en_passant(mut self, target: EnPassantTarget) -> Self {
        self.en_passant_target = Some(target);
        self
    }

    #[must_use]
    pub fn clear_en_passant(mut self) -> Self {
        self.en_passant_target = None;
        self
    }

    #[must_use]
    pub fn half_move_clock(mut self, clock: i32) -> Self {
        self.half_move_clock = clock;
        self
    }

    #[must_use]
    pub fn full_move_number(mut self, number: i32) -> Self {
        self.full_move_number = number;
        self
    }

    /// Builds the board, panicking if it is structurally invalid.
    /// Prefer [`BoardBuilder::try_build`] when the position comes from
    /// untrusted input.
    #[must_use]
    pub fn build(self) -> Board {
        self.try_build().expect("invalid board configuration")
    }

    pub fn try_build(self) -> Result<Board, BoardBuilderError> {
        let mut king_position = [None, None];
        for coord in Coord::all() {
            let piece = self.squares[coord.index() as usize];
            if piece.is_none() {
                continue;
            }
            if matches!(piece.piece(), Piece::King) {
                let color = piece.color().unwrap();
                if king_position[color.index()].is_some() {
                    return Err(BoardBuilderError::DuplicateKing {
                        color_is_white: color.is_white(),
                    });
                }
                king_position[color.index()] = Some(coord);
            }
        }
        let white_king = king_position[Color::White.index()].ok_or(BoardBuilderError::MissingKing {
            color_is_white: true,
        })?;
        let black_king = king_position[Color::Black.index()].ok_or(BoardBuilderError::MissingKing {
            color_is_white: false,
        })?;

        let mut material = [0i32; 2];
        let mut position = [0i32; 2];
        for coord in Coord::all() {
            let piece = self.squares[coord.index() as usize];
            if piece.is_none() {
                continue;
            }
            let color = piece.color().unwrap();
            material[color.index()] += crate::config::material_weight(piece.piece());
            position[color.index()] += super::eval::piece_square_value(piece.piece(), color, coord);
        }

        let mut board = Board {
            squares: self.squares,
            king_position: [white_king, black_king],
            castling: self.castling,
            material,
            position,
            en_passant_target: self.en_passant_target,
            half_move_clock: self.half_move_clock,
            full_move_number: self.full_move_number,
            current_turn: self.side_to_move,
            code: Code::zero(),
        };
        board.code = board.recompute_code();
        Ok(board)
    }
}

impl Default for BoardBuilder {
    fn default() -> Self {
        BoardBuilder::new()
    }
}
