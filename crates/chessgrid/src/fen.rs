//! FEN piece-placement encoding and the square label vocabulary.
//!
//! Labels name what sits on a square and double as dataset directory
//! names. The placement codec only handles the first FEN field; side to
//! move, castling and the counters cannot be recovered from a still frame
//! and are filled with defaults.

use chessgrid_board::{BOARD_CELLS, BOARD_SQUARES};
use serde::{Deserialize, Serialize};

/// Contents of one board square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Empty,
    WhiteKing,
    WhiteQueen,
    WhiteRook,
    WhiteBishop,
    WhiteKnight,
    WhitePawn,
    BlackKing,
    BlackQueen,
    BlackRook,
    BlackBishop,
    BlackKnight,
    BlackPawn,
}

impl Label {
    pub const ALL: [Label; 13] = [
        Label::Empty,
        Label::WhiteKing,
        Label::WhiteQueen,
        Label::WhiteRook,
        Label::WhiteBishop,
        Label::WhiteKnight,
        Label::WhitePawn,
        Label::BlackKing,
        Label::BlackQueen,
        Label::BlackRook,
        Label::BlackBishop,
        Label::BlackKnight,
        Label::BlackPawn,
    ];

    /// Directory name used by the dataset layout.
    pub fn dir_name(self) -> &'static str {
        match self {
            Label::Empty => "empty",
            Label::WhiteKing => "white_king",
            Label::WhiteQueen => "white_queen",
            Label::WhiteRook => "white_rook",
            Label::WhiteBishop => "white_bishop",
            Label::WhiteKnight => "white_knight",
            Label::WhitePawn => "white_pawn",
            Label::BlackKing => "black_king",
            Label::BlackQueen => "black_queen",
            Label::BlackRook => "black_rook",
            Label::BlackBishop => "black_bishop",
            Label::BlackKnight => "black_knight",
            Label::BlackPawn => "black_pawn",
        }
    }

    /// FEN piece letter; `None` for an empty square.
    pub fn fen_char(self) -> Option<char> {
        match self {
            Label::Empty => None,
            Label::WhiteKing => Some('K'),
            Label::WhiteQueen => Some('Q'),
            Label::WhiteRook => Some('R'),
            Label::WhiteBishop => Some('B'),
            Label::WhiteKnight => Some('N'),
            Label::WhitePawn => Some('P'),
            Label::BlackKing => Some('k'),
            Label::BlackQueen => Some('q'),
            Label::BlackRook => Some('r'),
            Label::BlackBishop => Some('b'),
            Label::BlackKnight => Some('n'),
            Label::BlackPawn => Some('p'),
        }
    }

    pub fn from_fen_char(c: char) -> Option<Label> {
        match c {
            'K' => Some(Label::WhiteKing),
            'Q' => Some(Label::WhiteQueen),
            'R' => Some(Label::WhiteRook),
            'B' => Some(Label::WhiteBishop),
            'N' => Some(Label::WhiteKnight),
            'P' => Some(Label::WhitePawn),
            'k' => Some(Label::BlackKing),
            'q' => Some(Label::BlackQueen),
            'r' => Some(Label::BlackRook),
            'b' => Some(Label::BlackBishop),
            'n' => Some(Label::BlackKnight),
            'p' => Some(Label::BlackPawn),
            _ => None,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN placement must have 8 ranks, got {0}")]
    RankCount(usize),
    #[error("unknown FEN piece character {0:?}")]
    BadPiece(char),
    #[error("FEN placement decodes to {0} squares, expected 64")]
    SquareCount(usize),
}

/// Decode a FEN placement field into 64 labels, row-major from rank 8
/// (matching the top row of an oriented top-down view).
pub fn parse_fen_placement(placement: &str) -> Result<Vec<Label>, FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != BOARD_CELLS {
        return Err(FenError::RankCount(ranks.len()));
    }

    let mut labels = Vec::with_capacity(BOARD_SQUARES);
    for rank in ranks {
        for ch in rank.chars() {
            if let Some(run) = ch.to_digit(10) {
                for _ in 0..run {
                    labels.push(Label::Empty);
                }
            } else {
                labels.push(Label::from_fen_char(ch).ok_or(FenError::BadPiece(ch))?);
            }
        }
    }
    if labels.len() != BOARD_SQUARES {
        return Err(FenError::SquareCount(labels.len()));
    }
    Ok(labels)
}

/// Encode 64 row-major labels (rank 8 first) as a FEN placement field,
/// compressing empty runs.
pub fn grid_to_fen_placement(labels: &[Label]) -> Result<String, FenError> {
    if labels.len() != BOARD_SQUARES {
        return Err(FenError::SquareCount(labels.len()));
    }

    let mut ranks = Vec::with_capacity(BOARD_CELLS);
    for r in 0..BOARD_CELLS {
        let mut rank = String::new();
        let mut empty_run = 0u32;
        for c in 0..BOARD_CELLS {
            match labels[r * BOARD_CELLS + c].fen_char() {
                None => empty_run += 1,
                Some(piece) => {
                    if empty_run > 0 {
                        rank.push_str(&empty_run.to_string());
                        empty_run = 0;
                    }
                    rank.push(piece);
                }
            }
        }
        if empty_run > 0 {
            rank.push_str(&empty_run.to_string());
        }
        ranks.push(rank);
    }
    Ok(ranks.join("/"))
}

/// Assemble a full FEN record around a placement field, defaulting the
/// fields a photograph cannot provide.
pub fn full_fen_from_placement(placement: &str) -> String {
    format!("{placement} w - - 0 1")
}
