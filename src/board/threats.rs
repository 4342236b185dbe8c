//! King-safety checks. Scans outward from a square along the lines a
//! rook/bishop/queen could attack from, plus the fixed knight, pawn,
//! and king offsets, stopping each ray at the first occupied square.

use crate::coord::Coord;
use crate::piece::{Color, Piece};

use super::Board;

const ROOK_DIRECTIONS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// True iff any piece belonging to the opponent of `color` attacks
/// `square` on `board`.
#[must_use]
pub fn is_square_attacked(board: &Board, square: Coord, by_color: Color) -> bool {
    for &(dr, dc) in ROOK_DIRECTIONS.iter() {
        if ray_hits(board, square, dr, dc, by_color, &[Piece::Rook, Piece::Queen]) {
            return true;
        }
    }
    for &(dr, dc) in BISHOP_DIRECTIONS.iter() {
        if ray_hits(board, square, dr, dc, by_color, &[Piece::Bishop, Piece::Queen]) {
            return true;
        }
    }
    for &(dr, dc) in KNIGHT_OFFSETS.iter() {
        if let Some(target) = square.offset(dr, dc) {
            let piece = board.piece_at(target);
            if piece.is_color(by_color) && matches!(piece.piece(), Piece::Knight) {
                return true;
            }
        }
    }
    for dr in -1..=1 {
        for dc in -1..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            if let Some(target) = square.offset(dr, dc) {
                let piece = board.piece_at(target);
                if piece.is_color(by_color) && matches!(piece.piece(), Piece::King) {
                    return true;
                }
            }
        }
    }
    // Pawns attack the squares one row in their own pawn direction,
    // diagonally -- so to find a pawn attacking `square`, look one row
    // in the *opposite* of the attacker's own push direction.
    let pawn_row = square.row() - Coord::pawn_direction(by_color.is_white());
    for dc in [-1, 1] {
        if let Some(target) = Coord::try_new(pawn_row, square.col() + dc) {
            let piece = board.piece_at(target);
            if piece.is_color(by_color) && matches!(piece.piece(), Piece::Pawn) {
                return true;
            }
        }
    }
    false
}

fn ray_hits(
    board: &Board,
    from: Coord,
    dr: i32,
    dc: i32,
    by_color: Color,
    attackers: &[Piece],
) -> bool {
    let mut current = from;
    loop {
        let Some(next) = current.offset(dr, dc) else {
            return false;
        };
        current = next;
        let piece = board.piece_at(current);
        if piece.is_none() {
            continue;
        }
        return piece.is_color(by_color) && attackers.contains(&piece.piece());
    }
}

/// True iff `color`'s king is presently in check.
#[must_use]
pub fn is_king_threatened(board: &Board, color: Color) -> bool {
    is_square_attacked(board, board.king_position(color), color.opposite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardBuilder;

    #[test]
    fn starting_position_has_no_checks() {
        let board = Board::starting_position();
        assert!(!is_king_threatened(&board, Color::White));
        assert!(!is_king_threatened(&board, Color::Black));
    }

    #[test]
    fn rook_on_open_file_checks_king() {
        let board = BoardBuilder::new()
            .piece(Coord::try_from_algebraic("e1").unwrap(), Color::White, Piece::King)
            .piece(Coord::try_from_algebraic("e8").unwrap(), Color::Black, Piece::King)
            .piece(Coord::try_from_algebraic("e5").unwrap(), Color::Black, Piece::Rook)
            .build();
        assert!(is_king_threatened(&board, Color::White));
    }

    #[test]
    fn blocked_ray_does_not_check() {
        let board = BoardBuilder::new()
            .piece(Coord::try_from_algebraic("e1").unwrap(), Color::White, Piece::King)
            .piece(Coord::try_from_algebraic("e8").unwrap(), Color::Black, Piece::King)
            .piece(Coord::try_from_algebraic("e5").unwrap(), Color::Black, Piece::Rook)
            .piece(Coord::try_from_algebraic("e3").unwrap(), Color::White, Piece::Pawn)
            .build();
        assert!(!is_king_threatened(&board, Color::White));
    }

    #[test]
    fn pawn_attacks_diagonally_only() {
        let board = BoardBuilder::new()
            .piece(Coord::try_from_algebraic("e1").unwrap(), Color::White, Piece::King)
            .piece(Coord::try_from_algebraic("e8").unwrap(), Color::Black, Piece::King)
            .piece(Coord::try_from_algebraic("d2").unwrap(), Color::Black, Piece::Pawn)
            .build();
        assert!(is_king_threatened(&board, Color::White));
    }
}
