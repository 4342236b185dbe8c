//! FEN ingest and emission.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::coord::Coord;
use crate::error::FenParserError;
use crate::piece::{Color, Piece};

use super::{Board, BoardBuilder, CastlingEligibility, EnPassantTarget};

impl Board {
    pub fn try_from_fen(fen: &str) -> Result<Board, FenParserError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(FenParserError::TooFewFields { found: fields.len() });
        }

        let mut builder = BoardBuilder::new();
        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenParserError::WrongRankCount { found: ranks.len() });
        }
        for (rank_idx, rank_text) in ranks.iter().enumerate() {
            let mut col = 0i32;
            for ch in rank_text.chars() {
                if let Some(digit) = ch.to_digit(10) {
                    col += digit as i32;
                    if col > 8 {
                        return Err(FenParserError::RankTooLong { rank: rank_idx });
                    }
                } else {
                    let (piece, color) = Piece::from_fen_char(ch)
                        .ok_or(FenParserError::UnknownPieceChar { ch })?;
                    if col >= 8 {
                        return Err(FenParserError::RankTooLong { rank: rank_idx });
                    }
                    let coord = Coord::new_unchecked(rank_idx as i32, col);
                    builder = builder.piece(coord, color, piece);
                    col += 1;
                }
            }
            if col != 8 {
                return Err(FenParserError::RankTooShort { rank: rank_idx });
            }
        }

        builder = match fields[1] {
            "w" => builder.side_to_move(Color::White),
            "b" => builder.side_to_move(Color::Black),
            other => {
                return Err(FenParserError::BadSideToMove {
                    found: other.to_string(),
                })
            }
        };

        let mut white_elig = CastlingEligibility::none_eligible();
        let mut black_elig = CastlingEligibility::none_eligible();
        if fields[2] != "-" {
            for ch in fields[2].chars() {
                match ch {
                    'K' => white_elig.kingside_ineligible = false,
                    'Q' => white_elig.queenside_ineligible = false,
                    'k' => black_elig.kingside_ineligible = false,
                    'q' => black_elig.queenside_ineligible = false,
                    _ => return Err(FenParserError::BadCastling { ch }),
                }
            }
        }
        builder = builder.castling(Color::White, white_elig);
        builder = builder.castling(Color::Black, black_elig);

        if fields[3] != "-" {
            let coord = Coord::try_from_algebraic(fields[3])
                .map_err(|source| FenParserError::BadEnPassant { source })?;
            let vulnerable_color = if coord.row() == 2 {
                Color::Black
            } else {
                Color::White
            };
            builder = builder.en_passant(EnPassantTarget {
                coord,
                vulnerable_color,
            });
        }

        if let Some(halfmove) = fields.get(4) {
            let clock: i32 = halfmove
                .parse()
                .map_err(|_| FenParserError::BadHalfmoveClock {
                    found: (*halfmove).to_string(),
                })?;
            builder = builder.half_move_clock(clock);
        }
        if let Some(fullmove) = fields.get(5) {
            let number: i32 = fullmove
                .parse()
                .map_err(|_| FenParserError::BadFullmoveNumber {
                    found: (*fullmove).to_string(),
                })?;
            builder = builder.full_move_number(number);
        }

        builder
            .try_build()
            .map_err(|_| FenParserError::BadPiecePlacement {
                rank_text: fields[0].to_string(),
            })
    }

    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();
        for row in 0..8 {
            let mut empty_run = 0;
            for col in 0..8 {
                let coord = Coord::new_unchecked(row, col);
                let piece = self.piece_at(coord);
                if piece.is_none() {
                    empty_run += 1;
                } else {
                    if empty_run > 0 {
                        write!(fen, "{empty_run}").unwrap();
                        empty_run = 0;
                    }
                    fen.push(piece.piece().to_fen_char(piece.color().unwrap()));
                }
            }
            if empty_run > 0 {
                write!(fen, "{empty_run}").unwrap();
            }
            if row != 7 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(if self.current_turn().is_white() { 'w' } else { 'b' });

        fen.push(' ');
        let white = self.castling_eligibility(Color::White);
        let black = self.castling_eligibility(Color::Black);
        let mut any = false;
        if !white.kingside_ineligible {
            fen.push('K');
            any = true;
        }
        if !white.queenside_ineligible {
            fen.push('Q');
            any = true;
        }
        if !black.kingside_ineligible {
            fen.push('k');
            any = true;
        }
        if !black.queenside_ineligible {
            fen.push('q');
            any = true;
        }
        if !any {
            fen.push('-');
        }

        fen.push(' ');
        match self.en_passant_target() {
            Some(ep) => fen.push_str(&ep.coord.to_algebraic()),
            None => fen.push('-'),
        }

        write!(fen, " {} {}", self.half_move_clock(), self.full_move_number()).unwrap();
        fen
    }
}

impl FromStr for Board {
    type Err = FenParserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}
