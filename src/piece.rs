//! Piece identities and the packed `ColoredPiece` byte.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::PieceError;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_white(self) -> bool {
        matches!(self, Color::White)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Piece {
    None,
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Piece {
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Piece::None => 0,
            Piece::Pawn => 1,
            Piece::Knight => 2,
            Piece::Bishop => 3,
            Piece::Rook => 4,
            Piece::Queen => 5,
            Piece::King => 6,
        }
    }

    #[must_use]
    pub const fn from_fen_char(ch: char) -> Option<(Piece, Color)> {
        let piece = match ch.to_ascii_lowercase() {
            'p' => Piece::Pawn,
            'n' => Piece::Knight,
            'b' => Piece::Bishop,
            'r' => Piece::Rook,
            'q' => Piece::Queen,
            'k' => Piece::King,
            _ => return None,
        };
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some((piece, color))
    }

    #[must_use]
    pub const fn to_fen_char(self, color: Color) -> char {
        let lower = match self {
            Piece::None => ' ',
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        };
        if color.is_white() {
            lower.to_ascii_uppercase()
        } else {
            lower
        }
    }
}

/// Promotion-eligible pieces, preference order used by the move
/// generator when it enumerates under-promotions.
pub const PROMOTION_PIECES: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

/// A piece and its color packed into one byte: bit 3 is the color bit
/// (1 = Black), bits 0-2 are the piece index. The empty square is the
/// unique value `ColoredPiece::NONE`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColoredPiece(u8);

impl ColoredPiece {
    pub const NONE: ColoredPiece = ColoredPiece(0);

    #[inline]
    #[must_use]
    pub const fn new(piece: Piece, color: Color) -> Self {
        if matches!(piece, Piece::None) {
            return ColoredPiece::NONE;
        }
        let color_bit = if color.is_white() { 0 } else { 0b1000 };
        ColoredPiece(piece.index() as u8 | color_bit)
    }

    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn piece(self) -> Piece {
        match self.0 & 0b0111 {
            0 => Piece::None,
            1 => Piece::Pawn,
            2 => Piece::Knight,
            3 => Piece::Bishop,
            4 => Piece::Rook,
            5 => Piece::Queen,
            6 => Piece::King,
            _ => Piece::None,
        }
    }

    #[must_use]
    pub const fn color(self) -> Option<Color> {
        if self.is_none() {
            None
        } else if self.0 & 0b1000 == 0 {
            Some(Color::White)
        } else {
            Some(Color::Black)
        }
    }

    #[must_use]
    pub const fn is_color(self, color: Color) -> bool {
        !self.is_none() && (self.0 & 0b1000 == 0) == color.is_white()
    }

    #[must_use]
    pub fn try_from_byte(byte: u8) -> Result<ColoredPiece, PieceError> {
        let piece_bits = byte & 0b0111;
        if piece_bits > 6 {
            return Err(PieceError { byte });
        }
        Ok(ColoredPiece(byte & 0b1111))
    }

    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self.0
    }
}

impl fmt::Debug for ColoredPiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.color() {
            Some(color) => write!(f, "{}", self.piece().to_fen_char(color)),
            None => write!(f, "."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_empty() {
        assert!(ColoredPiece::NONE.is_none());
        assert_eq!(ColoredPiece::NONE.color(), None);
    }

    #[test]
    fn round_trips_piece_and_color() {
        let wp = ColoredPiece::new(Piece::Pawn, Color::White);
        assert_eq!(wp.piece(), Piece::Pawn);
        assert_eq!(wp.color(), Some(Color::White));

        let bq = ColoredPiece::new(Piece::Queen, Color::Black);
        assert_eq!(bq.piece(), Piece::Queen);
        assert_eq!(bq.color(), Some(Color::Black));
    }

    #[test]
    fn fen_char_round_trip() {
        for ch in ['p', 'n', 'b', 'r', 'q', 'k', 'P', 'N', 'B', 'R', 'Q', 'K'] {
            let (piece, color) = Piece::from_fen_char(ch).unwrap();
            assert_eq!(piece.to_fen_char(color), ch);
        }
    }
}
