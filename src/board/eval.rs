//! Static position evaluation: material, piece-square position, and
//! castling bonuses/penalties, plus the checkmate-distance score used
//! at terminal nodes. Deliberately a flat single-term eval driven
//! entirely by the weight table in [`crate::config`].

use crate::config;
use crate::coord::Coord;
use crate::piece::{Color, Piece};

use super::Board;

/// Piece-square value for `piece` of `color` standing on `coord`.
/// Black reads the mirrored row of White's table so that both sides
/// are encouraged toward the same structural ideas (central pawns,
/// castled king, etc).
#[must_use]
pub fn piece_square_value(piece: Piece, color: Color, coord: Coord) -> i32 {
    let table: &[i32; 64] = match piece {
        Piece::Pawn => &config::PAWN_TABLE,
        Piece::Knight => &config::KNIGHT_TABLE,
        Piece::Bishop => &config::BISHOP_TABLE,
        Piece::Rook => &config::ROOK_TABLE,
        Piece::Queen => &config::QUEEN_TABLE,
        Piece::King => &config::KING_TABLE,
        Piece::None => return 0,
    };
    let index = if color.is_white() {
        coord.index() as usize
    } else {
        let mirrored_row = 7 - coord.row();
        Coord::new_unchecked(mirrored_row, coord.col()).index() as usize
    };
    table[index]
}

fn castled_bonus_or_penalty(board: &Board, color: Color) -> i32 {
    let elig = board.castling_eligibility(color);
    let back_row = if color.is_white() {
        config::WHITE_BACK_ROW
    } else {
        config::BLACK_BACK_ROW
    };
    let king = board.king_position(color);
    let kingside_castled = king.row() == back_row
        && king.col() == config::KINGSIDE_CASTLED_KING_COLUMN
        && elig.kingside_ineligible
        && elig.queenside_ineligible;
    let queenside_castled = king.row() == back_row
        && king.col() == config::QUEENSIDE_CASTLED_KING_COLUMN
        && elig.kingside_ineligible
        && elig.queenside_ineligible;
    if kingside_castled || queenside_castled {
        return config::CASTLE_TAKEN_BONUS;
    }
    let mut penalty = 0;
    if elig.kingside_ineligible {
        penalty -= config::CASTLE_POSSIBLE_BUT_NOT_TAKEN_PENALTY;
    }
    if elig.queenside_ineligible {
        penalty -= config::CASTLE_POSSIBLE_BUT_NOT_TAKEN_PENALTY;
    }
    penalty
}

/// Static evaluation from `side`'s point of view: positive favors
/// `side`. `checkmated` and `opponent_checkmated` short-circuit to the
/// checkmate-distance score; `moves_away` is the ply distance from the
/// search root used to prefer the quickest mate.
#[must_use]
pub fn evaluate(
    board: &Board,
    side: Color,
    checkmated: bool,
    opponent_checkmated: bool,
    moves_away: i32,
) -> i32 {
    if checkmated {
        return -config::checkmate_score(moves_away);
    }
    if opponent_checkmated {
        return config::checkmate_score(moves_away);
    }

    let opponent = side.opposite();
    let material = (board.material(side) - board.material(opponent)) * config::MATERIAL_SCORE_SCALE;
    let position =
        (board.position_score(side) - board.position_score(opponent)) * config::POSITION_SCORE_SCALE;
    let castling =
        castled_bonus_or_penalty(board, side) - castled_bonus_or_penalty(board, opponent);

    material + position + castling
}
