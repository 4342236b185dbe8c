//! Move-text grammar: algebraic coordinate pairs with optional
//! capture marker, en-passant tag, and promotion suffix, plus castling
//! notation.

use crate::config;
use crate::coord::Coord;
use crate::error::ParseMoveError;
use crate::piece::{Color, Piece};
use crate::moves::Move;

use super::{generate_legal_moves, Board};

fn promotion_piece(ch: char) -> Result<Piece, ParseMoveError> {
    match ch.to_ascii_uppercase() {
        'Q' => Ok(Piece::Queen),
        'R' => Ok(Piece::Rook),
        'B' => Ok(Piece::Bishop),
        'N' => Ok(Piece::Knight),
        _ => Err(ParseMoveError::UnknownPromotion { ch }),
    }
}

/// Parses move text per the external grammar and resolves it against
/// `board`'s legal moves for `side`. `side` is required for castling
/// notation, which names no squares.
pub fn parse_move(board: &Board, side: Color, text: &str) -> Result<Move, ParseMoveError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseMoveError::Empty);
    }

    let upper = trimmed.to_ascii_uppercase();
    if upper == "O-O" || upper == "O-O-O" {
        let back_row = if side.is_white() {
            config::WHITE_BACK_ROW
        } else {
            config::BLACK_BACK_ROW
        };
        let from = Coord::new_unchecked(back_row, config::KING_COLUMN);
        let to_col = if upper == "O-O" {
            config::KINGSIDE_CASTLED_KING_COLUMN
        } else {
            config::QUEENSIDE_CASTLED_KING_COLUMN
        };
        let to = Coord::new_unchecked(back_row, to_col);
        return resolve_against_legal_moves(board, side, from, to, None, trimmed);
    }

    let without_spaces: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
    let is_ep = without_spaces.to_ascii_lowercase().ends_with("ep");
    let mut core = if is_ep {
        without_spaces[..without_spaces.len() - 2].to_string()
    } else {
        without_spaces.clone()
    };

    let mut promotion = None;
    if core.ends_with(')') {
        let open = core
            .find('(')
            .ok_or_else(|| ParseMoveError::MalformedCastle { text: trimmed.to_string() })?;
        let inner = &core[open + 1..core.len() - 1];
        let ch = inner
            .chars()
            .next()
            .ok_or(ParseMoveError::UnknownPromotion { ch: ' ' })?;
        promotion = Some(promotion_piece(ch)?);
        core.truncate(open);
    }

    let core = core.replace('x', "");
    if core.len() != 4 {
        return Err(ParseMoveError::BadSquare {
            source: crate::error::CoordParseError::WrongLength { text: core },
        });
    }
    let from = Coord::try_from_algebraic(&core[0..2])
        .map_err(|source| ParseMoveError::BadSquare { source })?;
    let to = Coord::try_from_algebraic(&core[2..4])
        .map_err(|source| ParseMoveError::BadSquare { source })?;

    resolve_against_legal_moves(board, side, from, to, promotion, trimmed)
}

fn resolve_against_legal_moves(
    board: &Board,
    side: Color,
    from: Coord,
    to: Coord,
    promotion: Option<Piece>,
    original_text: &str,
) -> Result<Move, ParseMoveError> {
    let legal = generate_legal_moves(board, side);
    legal
        .iter()
        .find(|mv| {
            mv.from() == from
                && mv.to() == to
                && match promotion {
                    Some(p) => mv.promoted_piece().piece() == p,
                    None => true,
                }
        })
        .copied()
        .ok_or_else(|| ParseMoveError::NoSuchLegalMove {
            text: original_text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_pawn_push() {
        let board = Board::starting_position();
        let mv = parse_move(&board, Color::White, "e2 e4").unwrap();
        assert_eq!(mv.from(), Coord::try_from_algebraic("e2").unwrap());
        assert_eq!(mv.to(), Coord::try_from_algebraic("e4").unwrap());
    }

    #[test]
    fn parses_capture_with_x() {
        let board = super::super::BoardBuilder::new()
            .piece(Coord::try_from_algebraic("a1").unwrap(), Color::White, Piece::King)
            .piece(Coord::try_from_algebraic("h8").unwrap(), Color::Black, Piece::King)
            .piece(Coord::try_from_algebraic("d4").unwrap(), Color::White, Piece::Rook)
            .piece(Coord::try_from_algebraic("d7").unwrap(), Color::Black, Piece::Pawn)
            .build();
        let mv = parse_move(&board, Color::White, "d4xd7").unwrap();
        assert!(mv.is_capturing());
    }

    #[test]
    fn parses_kingside_castle() {
        let fen = "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQK2R w KQkq - 4 4";
        let board = Board::try_from_fen(fen).unwrap();
        let mv = parse_move(&board, Color::White, "O-O").unwrap();
        assert!(mv.is_castling());
    }

    #[test]
    fn rejects_illegal_move_text() {
        let board = Board::starting_position();
        assert!(parse_move(&board, Color::White, "e2 e5").is_err());
    }
}
