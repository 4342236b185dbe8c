//! Tunable constants used across the core: board geometry, evaluation
//! weights, piece-square tables, and draw/search thresholds. A plain
//! constants module, not a runtime configuration reader.

use crate::piece::Piece;

// Board geometry (external interface constants).
pub const NUM_ROWS: i32 = 8;
pub const NUM_COLUMNS: i32 = 8;
pub const NUM_SQUARES: usize = 64;
pub const NUM_PLAYERS: usize = 2;
pub const FIRST_ROW: i32 = 0;
pub const FIRST_COLUMN: i32 = 0;
pub const LAST_ROW: i32 = 7;
pub const LAST_COLUMN: i32 = 7;

pub const KING_COLUMN: i32 = 4;
pub const KING_ROOK_COLUMN: i32 = 7;
pub const QUEEN_ROOK_COLUMN: i32 = 0;
pub const KINGSIDE_CASTLED_KING_COLUMN: i32 = 6;
pub const KINGSIDE_CASTLED_ROOK_COLUMN: i32 = 5;
pub const QUEENSIDE_CASTLED_KING_COLUMN: i32 = 2;
pub const QUEENSIDE_CASTLED_ROOK_COLUMN: i32 = 3;

/// Row index (our row-0-is-rank-8 convention) the white king's rank sits on.
pub const WHITE_BACK_ROW: i32 = 7;
pub const BLACK_BACK_ROW: i32 = 0;

/// Row of the square a pawn skips over on its double push, i.e. the
/// square a capturing en-passant move lands on.
pub const WHITE_EN_PASSANT_ROW: i32 = 5;
pub const BLACK_EN_PASSANT_ROW: i32 = 2;

/// Material weights in centipawns, indexed by [`Piece::index`].
pub const MATERIAL_WEIGHTS: [i32; 7] = [
    0,    // None
    100,  // Pawn
    305,  // Knight
    320,  // Bishop
    500,  // Rook
    1000, // Queen
    1500, // King
];

#[must_use]
pub const fn material_weight(piece: Piece) -> i32 {
    MATERIAL_WEIGHTS[piece.index()]
}

pub const MATERIAL_SCORE_SCALE: i32 = 1;
pub const POSITION_SCORE_SCALE: i32 = 1;

pub const CASTLE_POSSIBLE_BUT_NOT_TAKEN_PENALTY: i32 = 40;
pub const CASTLE_TAKEN_BONUS: i32 = 70;

pub const MAX_NON_CHECKMATE_SCORE: i32 = 1_000_000;

#[must_use]
pub fn checkmate_score(moves_away: i32) -> i32 {
    MAX_NON_CHECKMATE_SCORE + MAX_NON_CHECKMATE_SCORE / (1 + moves_away.max(0))
}

pub const FIFTY_MOVE_HALFMOVE_THRESHOLD: i32 = 100;
pub const SEVENTY_FIVE_MOVE_HALFMOVE_THRESHOLD: i32 = 150;
pub const THREEFOLD_REPETITION_COUNT: u32 = 3;
pub const FIVEFOLD_REPETITION_COUNT: u32 = 5;

/// Transposition table capacity, in entries.
pub const MAX_TRANSPOSITIONS: usize = 100_000;

pub const DEFAULT_SEARCH_DEPTH: u32 = 6;
pub const DEFAULT_TIME_BUDGET_MS: u64 = 5_000;

/// Piece-square tables, one row per piece (indexed by [`Piece::index`]),
/// laid out rank-8-down-to-rank-1 to match [`crate::coord::Coord`]'s row
/// order, from White's perspective. Black's score for a square is read
/// from the mirrored square (see [`crate::board::eval::piece_square_value`]).
pub const PAWN_TABLE: [i32; 64] = [
    0, 0, 0, 0, 0, 0, 0, 0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
    5, 5, 10, 25, 25, 10, 5, 5,
    0, 0, 0, 20, 20, 0, 0, 0,
    5, -5, -10, 0, 0, -10, -5, 5,
    5, 10, 10, -20, -20, 10, 10, 5,
    0, 0, 0, 0, 0, 0, 0, 0,
];

pub const KNIGHT_TABLE: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20, 0, 0, 0, 0, -20, -40,
    -30, 0, 10, 15, 15, 10, 0, -30,
    -30, 5, 15, 20, 20, 15, 5, -30,
    -30, 0, 15, 20, 20, 15, 0, -30,
    -30, 5, 10, 15, 15, 10, 5, -30,
    -40, -20, 0, 5, 5, 0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

pub const BISHOP_TABLE: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10, 0, 0, 0, 0, 0, 0, -10,
    -10, 0, 5, 10, 10, 5, 0, -10,
    -10, 5, 5, 10, 10, 5, 5, -10,
    -10, 0, 10, 10, 10, 10, 0, -10,
    -10, 10, 10, 10, 10, 10, 10, -10,
    -10, 5, 0, 0, 0, 0, 5, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

pub const ROOK_TABLE: [i32; 64] = [
    0, 0, 0, 0, 0, 0, 0, 0,
    5, 10, 10, 10, 10, 10, 10, 5,
    -5, 0, 0, 0, 0, 0, 0, -5,
    -5, 0, 0, 0, 0, 0, 0, -5,
    -5, 0, 0, 0, 0, 0, 0, -5,
    -5, 0, 0, 0, 0, 0, 0, -5,
    -5, 0, 0, 0, 0, 0, 0, -5,
    0, 0, 0, 5, 5, 0, 0, 0,
];

pub const QUEEN_TABLE: [i32; 64] = [
    -20, -10, -10, -5, -5, -10, -10, -20,
    -10, 0, 0, 0, 0, 0, 0, -10,
    -10, 0, 5, 5, 5, 5, 0, -10,
    -5, 0, 5, 5, 5, 5, 0, -5,
    0, 0, 5, 5, 5, 5, 0, -5,
    -10, 5, 5, 5, 5, 5, 0, -10,
    -10, 0, 5, 0, 0, 0, 0, -10,
    -20, -10, -10, -5, -5, -10, -10, -20,
];

pub const KING_TABLE: [i32; 64] = [
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -10, -20, -20, -20, -20, -20, -20, -10,
    20, 20, 0, 0, 0, 0, 20, 20,
    20, 30, 10, 0, 0, 10, 30, 20,
];
