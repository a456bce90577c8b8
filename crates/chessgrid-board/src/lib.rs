//! Chessboard rectification and grid decomposition built on
//! `chessgrid-core`.
//!
//! Given a photograph and four user-supplied corner points, this crate
//! produces the 64 per-square crops of the board:
//!
//! 1. canonicalize the corners to `[TL, TR, BR, BL]` ([`CornerSet`]),
//! 2. warp the enclosed quadrilateral to a square top-down view
//!    ([`warp_board`]),
//! 3. correct a possible 180 degree orientation ambiguity using the
//!    "a1 is dark" heuristic ([`maybe_flip_180`]),
//! 4. slice the view into a row-major 8x8 grid of crops
//!    ([`split_squares`]).
//!
//! [`extract_squares`] chains all four. Every step is a pure function over
//! its inputs; batches of images can be processed independently.

mod corners;
mod grid;
mod orientation;
mod pipeline;
mod rectify;

pub use corners::{order_corners, CornerCountError, CornerSet};
pub use grid::{
    split_squares, square_name, square_name_at, GridError, GridParams, SquareGrid, BOARD_CELLS,
    BOARD_SQUARES,
};
pub use orientation::{
    correct_orientation, maybe_flip_180, OrientationProbe, ReferenceCellDarkness, TrustInput,
};
pub use pipeline::{extract_squares, extract_squares_with, BoardError, BoardExtraction, ExtractParams};
pub use rectify::{warp_board, warp_board_canonical, RectifiedBoard, RectifyError, WarpParams};
