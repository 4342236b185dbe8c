//! Board Code: a 64-bit incremental fingerprint of a position.
//!
//! The low bits carry metadata (side to move, en-passant file and
//! color, castling eligibility); the high 48 bits are a Zobrist-style
//! hash built from a table of random numbers generated once, at
//! process start, by `StdRng::seed_from_u64` seeded with a fixed
//! constant so that hashes are stable and reproducible across runs.

use std::sync::LazyLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::coord::Coord;
use crate::piece::{Color, ColoredPiece, Piece};

/// Fixed seed for the Zobrist key table: a literal constant rather
/// than a time-based seed, so that Board Codes are reproducible
/// across runs and across machines.
const ZOBRIST_SEED: u64 = 1_234_567_890;

struct ZobristKeys {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [[u64; 2]; 2],
    en_passant_file: [u64; 8],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        let mut piece_square = [[[0u64; 64]; 6]; 2];
        for color in &mut piece_square {
            for piece in color.iter_mut() {
                for square in piece.iter_mut() {
                    *square = rng.gen::<u64>() & 0x0000_ffff_ffff_ffff;
                }
            }
        }
        let side_to_move = rng.gen::<u64>() & 0x0000_ffff_ffff_ffff;
        let mut castling = [[0u64; 2]; 2];
        for color in &mut castling {
            for side in color.iter_mut() {
                *side = rng.gen::<u64>() & 0x0000_ffff_ffff_ffff;
            }
        }
        let mut en_passant_file = [0u64; 8];
        for key in &mut en_passant_file {
            *key = rng.gen::<u64>() & 0x0000_ffff_ffff_ffff;
        }
        ZobristKeys {
            piece_square,
            side_to_move,
            castling,
            en_passant_file,
        }
    }
}

static KEYS: LazyLock<ZobristKeys> = LazyLock::new(ZobristKeys::new);

fn piece_key(color: Color, piece: Piece, square: Coord) -> u64 {
    debug_assert!(!matches!(piece, Piece::None));
    KEYS.piece_square[color.index()][piece.index() - 1][square.index() as usize]
}

/// Castling side used to index the castling key table: 0 = kingside,
/// 1 = queenside.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    fn index(self) -> usize {
        match self {
            CastleSide::Kingside => 0,
            CastleSide::Queenside => 1,
        }
    }
}

/// The incremental position fingerprint. Low 16 bits hold metadata;
/// the high 48 bits are the Zobrist hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Code(u64);

const HASH_MASK: u64 = 0xffff_ffff_ffff_0000;

impl Code {
    #[must_use]
    pub const fn zero() -> Self {
        Code(0)
    }

    /// The 48-bit Zobrist hash, used as the transposition table key.
    #[must_use]
    pub const fn hash(self) -> u64 {
        (self.0 & HASH_MASK) >> 16
    }

    pub fn toggle_piece(&mut self, color: Color, piece: ColoredPiece, square: Coord) {
        let p = piece.piece();
        if matches!(p, Piece::None) {
            return;
        }
        self.0 ^= piece_key(color, p, square) << 16;
    }

    pub fn toggle_side_to_move(&mut self) {
        self.0 ^= KEYS.side_to_move << 16;
    }

    pub fn toggle_castling(&mut self, color: Color, side: CastleSide) {
        self.0 ^= KEYS.castling[color.index()][side.index()] << 16;
    }

    pub fn set_en_passant_file(&mut self, file: i32) {
        self.0 &= !0xf000;
        self.0 |= ((file as u64) & 0xf) << 12;
        self.0 ^= KEYS.en_passant_file[file as usize] << 16;
    }

    pub fn clear_en_passant_file(&mut self, file: i32) {
        self.0 ^= KEYS.en_passant_file[file as usize] << 16;
        self.0 &= !0xf000;
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl Default for Code {
    fn default() -> Self {
        Code::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_its_own_inverse() {
        let mut code = Code::zero();
        let e4 = Coord::try_from_algebraic("e4").unwrap();
        let wp = ColoredPiece::new(Piece::Pawn, Color::White);
        code.toggle_piece(Color::White, wp, e4);
        let after_first = code;
        code.toggle_piece(Color::White, wp, e4);
        assert_eq!(code, Code::zero());
        assert_ne!(after_first, Code::zero());
    }

    #[test]
    fn side_to_move_toggle_is_involution() {
        let mut code = Code::zero();
        code.toggle_side_to_move();
        let mid = code;
        code.toggle_side_to_move();
        assert_eq!(code, Code::zero());
        assert_ne!(mid.hash(), Code::zero().hash());
    }

    #[test]
    fn keys_are_deterministic_across_instances() {
        let mut a = Code::zero();
        let mut b = Code::zero();
        let e4 = Coord::try_from_algebraic("e4").unwrap();
        let wn = ColoredPiece::new(Piece::Knight, Color::White);
        a.toggle_piece(Color::White, wn, e4);
        b.toggle_piece(Color::White, wn, e4);
        assert_eq!(a, b);
    }
}
