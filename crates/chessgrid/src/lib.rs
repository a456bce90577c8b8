//! Extract labeled 8x8 square crops from chessboard photographs.
//!
//! The geometric pipeline lives in [`chessgrid_board`] (corner
//! canonicalization, perspective rectification, grid decomposition,
//! orientation correction); this crate adds everything a caller needs
//! around it: decoding and encoding images, corner-file I/O, the FEN
//! label vocabulary, and the offline dataset builder behind the
//! `chessgrid` binary.
//!
//! ## Quickstart
//!
//! ```no_run
//! use chessgrid::{adapter, corners_io, ExtractParams};
//! use chessgrid_board::extract_squares;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = adapter::load_rgb("board.jpg")?;
//! let corners = corners_io::load_corners("board.json")?;
//! let out = extract_squares(&img, corners.points(), &ExtractParams::default())?;
//! assert_eq!(out.grid.squares().len(), 64);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod corners_io;
pub mod dataset;
pub mod fen;

pub use adapter::ImageIoError;
pub use chessgrid_board::{
    extract_squares, extract_squares_with, maybe_flip_180, split_squares, square_name,
    square_name_at, warp_board, BoardError, BoardExtraction, CornerCountError, CornerSet,
    ExtractParams, GridError, GridParams, OrientationProbe, RectifyError, ReferenceCellDarkness,
    SquareGrid, TrustInput, WarpParams, BOARD_CELLS, BOARD_SQUARES,
};
pub use chessgrid_core::{flip_180, mean_intensity, GrayImage, Homography, Raster, RgbImage};
pub use corners_io::CornersIoError;
pub use dataset::{BatchSummary, DatasetError, DatasetParams};
pub use fen::{
    full_fen_from_placement, grid_to_fen_placement, parse_fen_placement, FenError, Label,
};
