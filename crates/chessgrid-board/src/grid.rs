//! Grid decomposition: slicing a square top-down view into 64 cell crops.

use chessgrid_core::{crop, Raster};
use serde::{Deserialize, Serialize};

/// Cells per board side.
pub const BOARD_CELLS: usize = 8;

/// Cells on the whole board.
pub const BOARD_SQUARES: usize = BOARD_CELLS * BOARD_CELLS;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("grid decomposition requires a square image, got {width}x{height}")]
    NonSquareInput { width: usize, height: usize },
    #[error("pad {pad} leaves no pixels in a {cell} px cell")]
    PadTooLarge { pad: usize, cell: usize },
}

/// Decomposition parameters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GridParams {
    /// Pixels shaved off each crop edge, trimming cell borders bled by the
    /// warp.
    pub pad: usize,
}

impl Default for GridParams {
    fn default() -> Self {
        Self { pad: 2 }
    }
}

/// The 64 cell crops of a top-down board, row-major from the top-left of
/// the rectified view: index `r * 8 + c`, index 56 is "a1" on a correctly
/// oriented board.
#[derive(Clone, Debug)]
pub struct SquareGrid<R> {
    squares: Vec<R>,
}

impl<R> SquareGrid<R> {
    pub fn squares(&self) -> &[R] {
        &self.squares
    }

    pub fn into_squares(self) -> Vec<R> {
        self.squares
    }

    /// Crop at grid row `r` (0 = top) and column `c` (0 = left).
    pub fn at(&self, r: usize, c: usize) -> &R {
        &self.squares[r * BOARD_CELLS + c]
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.squares.iter()
    }
}

/// Algebraic name of the cell at grid row `r` (0 = top) and column `c`:
/// files a..h left to right, ranks 8..1 top to bottom, so (7, 0) is "a1".
pub fn square_name(r: usize, c: usize) -> String {
    debug_assert!(r < BOARD_CELLS && c < BOARD_CELLS);
    let file = (b'a' + c as u8) as char;
    let rank = (b'0' + (BOARD_CELLS - r) as u8) as char;
    format!("{file}{rank}")
}

/// Algebraic name for a row-major grid index in `0..64`.
pub fn square_name_at(index: usize) -> String {
    square_name(index / BOARD_CELLS, index % BOARD_CELLS)
}

/// Slice a square top-down view into its 64 cell crops.
///
/// `cell = side / 8` (integer division; remainder pixels at the right and
/// bottom edges are not covered). Crop (r, c) spans
/// `[r*cell + pad, (r+1)*cell - pad)` rows and the analogous columns, both
/// ends clamped into the image.
pub fn split_squares<R: Raster>(topdown: &R, params: &GridParams) -> Result<SquareGrid<R>, GridError> {
    let w = topdown.width();
    let h = topdown.height();
    if w != h {
        return Err(GridError::NonSquareInput {
            width: w,
            height: h,
        });
    }

    let n = w;
    let cell = n / BOARD_CELLS;
    if cell == 0 || 2 * params.pad >= cell {
        return Err(GridError::PadTooLarge {
            pad: params.pad,
            cell,
        });
    }

    let pad = params.pad;
    let mut squares = Vec::with_capacity(BOARD_SQUARES);
    for r in 0..BOARD_CELLS {
        for c in 0..BOARD_CELLS {
            let x0 = c * cell + pad;
            let y0 = r * cell + pad;
            let x1 = ((c + 1) * cell - pad).min(n);
            let y1 = ((r + 1) * cell - pad).min(n);
            squares.push(crop(topdown, x0, y0, x1, y1));
        }
    }

    Ok(SquareGrid { squares })
}
