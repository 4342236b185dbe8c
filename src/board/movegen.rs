//! Pseudo-legal move generation, legality filtering, and the move
//! ordering used to feed the search good moves first.

use crate::coord::Coord;
use crate::piece::{Color, ColoredPiece, Piece, PROMOTION_PIECES};
use crate::moves::{Move, MoveList};

use super::threats::is_king_threatened;
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

fn push_slider(board: &Board, from: Coord, directions: &[(i32, i32)], color: Color, moves: &mut MoveList) {
    for &(dr, dc) in directions {
        let mut current = from;
        loop {
            let Some(next) = current.offset(dr, dc) else {
                break;
            };
            current = next;
            let occupant = board.piece_at(current);
            if occupant.is_none() {
                moves.push(Move::normal(from, current));
            } else {
                if !occupant.is_color(color) {
                    moves.push(Move::capturing(from, current));
                }
                break;
            }
        }
    }
}

fn push_pawn_moves(board: &Board, from: Coord, color: Color, moves: &mut MoveList) {
    let dir = Coord::pawn_direction(color.is_white());
    let start_row = if color.is_white() { 6 } else { 1 };
    let last_row = if color.is_white() { 0 } else { 7 };

    if let Some(one) = from.offset(dir, 0) {
        if board.piece_at(one).is_none() {
            if one.row() == last_row {
                for &piece in &PROMOTION_PIECES {
                    moves.push(Move::promoting(from, one, piece, color));
                }
            } else {
                moves.push(Move::normal(from, one));
            }
            if from.row() == start_row {
                if let Some(two) = one.offset(dir, 0) {
                    if board.piece_at(two).is_none() {
                        moves.push(Move::normal(from, two));
                    }
                }
            }
        }
    }

    for dc in [-1, 1] {
        let Some(target) = from.offset(dir, dc) else {
            continue;
        };
        let occupant = board.piece_at(target);
        if !occupant.is_none() && !occupant.is_color(color) {
            if target.row() == last_row {
                for &piece in &PROMOTION_PIECES {
                    moves.push(Move::promoting_capture(from, target, piece, color));
                }
            } else {
                moves.push(Move::capturing(from, target));
            }
        } else if occupant.is_none() {
            if let Some(ep) = board.en_passant_target() {
                if ep.coord == target && ep.vulnerable_color == color {
                    moves.push(Move::en_passant(from, target));
                }
            }
        }
    }
}

fn push_knight_moves(board: &Board, from: Coord, color: Color, moves: &mut MoveList) {
    for &(dr, dc) in &KNIGHT_OFFSETS {
        if let Some(target) = from.offset(dr, dc) {
            let occupant = board.piece_at(target);
            if occupant.is_none() {
                moves.push(Move::normal(from, target));
            } else if !occupant.is_color(color) {
                moves.push(Move::capturing(from, target));
            }
        }
    }
}

fn push_king_moves(board: &Board, from: Coord, color: Color, moves: &mut MoveList) {
    for dr in -1..=1 {
        for dc in -1..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            if let Some(target) = from.offset(dr, dc) {
                let occupant = board.piece_at(target);
                if occupant.is_none() {
                    moves.push(Move::normal(from, target));
                } else if !occupant.is_color(color) {
                    moves.push(Move::capturing(from, target));
                }
            }
        }
    }
    push_castling_moves(board, from, color, moves);
}

/// Pushes castling moves that satisfy the static preconditions (rights
/// still held, squares between king and rook empty). Whether the king
/// would pass through or land on an attacked square is a legality
/// question, not a pseudo-legal one, and is checked by
/// [`generate_legal_moves`] instead.
fn push_castling_moves(board: &Board, from: Coord, color: Color, moves: &mut MoveList) {
    let elig = board.castling_eligibility(color);
    let back_row = if color.is_white() {
        crate::config::WHITE_BACK_ROW
    } else {
        crate::config::BLACK_BACK_ROW
    };
    if from.row() != back_row || from.col() != crate::config::KING_COLUMN {
        return;
    }

    if !elig.kingside_ineligible {
        let f = Coord::new_unchecked(back_row, 5);
        let g = Coord::new_unchecked(back_row, 6);
        if board.piece_at(f).is_none() && board.piece_at(g).is_none() {
            moves.push(Move::castling(from, g));
        }
    }
    if !elig.queenside_ineligible {
        let d = Coord::new_unchecked(back_row, 3);
        let c = Coord::new_unchecked(back_row, 2);
        let b = Coord::new_unchecked(back_row, 1);
        if board.piece_at(d).is_none() && board.piece_at(c).is_none() && board.piece_at(b).is_none() {
            moves.push(Move::castling(from, c));
        }
    }
}

/// The square a castling king passes through on its way to `mv.to()`,
/// e.g. f1 for white kingside. The landing square itself is checked by
/// the normal post-move `is_king_threatened` test in
/// [`generate_legal_moves`], so only the transit square needs calling
/// out here.
fn castling_transit_square(mv: Move) -> Coord {
    let row = mv.from().row();
    let transit_col = (mv.from().col() + mv.to().col()) / 2;
    Coord::new_unchecked(row, transit_col)
}

/// All pseudo-legal moves for `color`: moves that respect piece
/// movement rules but may leave that color's own king in check.
#[must_use]
pub fn generate_all_potential_moves(board: &Board, color: Color) -> MoveList {
    let mut moves = MoveList::new();
    for from in Coord::all() {
        let occupant = board.piece_at(from);
        if !occupant.is_color(color) {
            continue;
        }
        match occupant.piece() {
            Piece::Pawn => push_pawn_moves(board, from, color, &mut moves),
            Piece::Knight => push_knight_moves(board, from, color, &mut moves),
            Piece::Bishop => push_slider(board, from, &BISHOP_DIRECTIONS, color, &mut moves),
            Piece::Rook => push_slider(board, from, &ROOK_DIRECTIONS, color, &mut moves),
            Piece::Queen => {
                push_slider(board, from, &ROOK_DIRECTIONS, color, &mut moves);
                push_slider(board, from, &BISHOP_DIRECTIONS, color, &mut moves);
            }
            Piece::King => push_king_moves(board, from, color, &mut moves),
            Piece::None => {}
        }
    }
    moves
}

fn victim_piece(board: &Board, mv: Move) -> ColoredPiece {
    if mv.is_en_passant() {
        ColoredPiece::new(Piece::Pawn, board.current_turn().opposite())
    } else {
        board.piece_at(mv.to())
    }
}

/// Orders moves so that captures precede quiet moves, captures are
/// sorted by descending (victim weight - attacker weight), and
/// promotions among quiet moves are sorted by promoted-piece weight
/// descending. Ties break on (from, to) index for determinism.
pub fn order_moves(board: &Board, moves: &mut MoveList) {
    let scored: Vec<(i32, Move)> = moves
        .iter()
        .map(|&mv| (move_order_score(board, mv), mv))
        .collect();
    let mut scored = scored;
    scored.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then_with(|| a.1.from().index().cmp(&b.1.from().index()))
            .then_with(|| a.1.to().index().cmp(&b.1.to().index()))
    });
    for (slot, (_, mv)) in moves.as_mut_slice().iter_mut().zip(scored) {
        *slot = mv;
    }
}

fn move_order_score(board: &Board, mv: Move) -> i32 {
    const CAPTURE_BASE: i32 = 1_000_000;
    const PROMOTION_BASE: i32 = 500_000;
    if mv.is_capturing() {
        let attacker = board.piece_at(mv.from());
        let victim = victim_piece(board, mv);
        CAPTURE_BASE + crate::config::material_weight(victim.piece())
            - crate::config::material_weight(attacker.piece())
    } else if mv.is_promoting() {
        PROMOTION_BASE + crate::config::material_weight(mv.promoted_piece().piece())
    } else {
        0
    }
}

/// Pseudo-legal moves filtered to those that do not leave `color`'s
/// king in check, ordered by [`order_moves`].
#[must_use]
pub fn generate_legal_moves(board: &Board, color: Color) -> MoveList {
    let potential = generate_all_potential_moves(board, color);
    let mut legal = MoveList::new();
    let mut scratch = board.clone();
    for &mv in potential.iter() {
        if mv.is_castling() {
            let opponent = color.opposite();
            if is_king_threatened(board, color)
                || super::threats::is_square_attacked(board, castling_transit_square(mv), opponent)
            {
                continue;
            }
        }
        let undo = scratch.make_move(mv);
        if !is_king_threatened(&scratch, color) {
            legal.push(mv);
        }
        scratch.take_back(mv, undo);
    }
    order_moves(board, &mut legal);
    legal
}
