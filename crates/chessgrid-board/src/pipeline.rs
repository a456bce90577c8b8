//! One-call pipeline: corners -> top-down view -> orientation -> 64 crops.

use crate::grid::{split_squares, GridError, GridParams, SquareGrid};
use crate::orientation::{correct_orientation, OrientationProbe, ReferenceCellDarkness};
use crate::rectify::{warp_board, RectifyError, WarpParams};
use chessgrid_core::{Homography, Raster};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Any failure along the extraction pipeline.
#[derive(thiserror::Error, Debug)]
pub enum BoardError {
    #[error(transparent)]
    Rectify(#[from] RectifyError),
    #[error(transparent)]
    Grid(#[from] GridError),
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct ExtractParams {
    #[serde(default)]
    pub warp: WarpParams,
    #[serde(default)]
    pub grid: GridParams,
    /// Rotate the top-down view 180 degrees regardless of what the
    /// orientation probe says.
    #[serde(default)]
    pub force_flip: bool,
}

/// Result of a full extraction: the 64 crops plus the forward homography
/// (source image -> top-down square), kept for diagnostics.
#[derive(Clone, Debug)]
pub struct BoardExtraction<R> {
    pub grid: SquareGrid<R>,
    pub h_board_from_img: Homography,
}

/// Run the full pipeline with the default "a1 is dark" orientation probe.
pub fn extract_squares<R: Raster>(
    src: &R,
    corners: &[Point2<f32>],
    params: &ExtractParams,
) -> Result<BoardExtraction<R>, BoardError> {
    extract_squares_with(src, corners, params, &ReferenceCellDarkness)
}

/// Run the full pipeline with a caller-supplied orientation probe.
pub fn extract_squares_with<R: Raster>(
    src: &R,
    corners: &[Point2<f32>],
    params: &ExtractParams,
    probe: &impl OrientationProbe<R>,
) -> Result<BoardExtraction<R>, BoardError> {
    let rectified = warp_board(src, corners, &params.warp)?;
    let oriented = correct_orientation(rectified.topdown, probe, params.force_flip);
    let grid = split_squares(&oriented, &params.grid)?;
    Ok(BoardExtraction {
        grid,
        h_board_from_img: rectified.h_board_from_img,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::BOARD_SQUARES;
    use chessgrid_core::GrayImage;

    #[test]
    fn full_pipeline_produces_64_crops() {
        let side = 160;
        let mut data = vec![0u8; side * side];
        // dark lower-left half so the probe keeps orientation stable
        for y in 0..side {
            for x in 0..side {
                data[y * side + x] = if y > side - 1 - x { 20 } else { 200 };
            }
        }
        let img = GrayImage::from_parts(side, side, data);
        let corners = [
            Point2::new(0.0, 0.0),
            Point2::new(159.0, 0.0),
            Point2::new(159.0, 159.0),
            Point2::new(0.0, 159.0),
        ];

        let params = ExtractParams {
            warp: WarpParams { out_size: 160 },
            grid: GridParams { pad: 2 },
            force_flip: false,
        };
        let out = extract_squares(&img, &corners, &params).expect("extracts");
        assert_eq!(out.grid.squares().len(), BOARD_SQUARES);
    }

    #[test]
    fn grid_errors_pass_through() {
        let img = GrayImage::from_parts(24, 24, vec![0u8; 24 * 24]);
        let corners = [
            Point2::new(0.0, 0.0),
            Point2::new(23.0, 0.0),
            Point2::new(23.0, 23.0),
            Point2::new(0.0, 23.0),
        ];
        let params = ExtractParams {
            warp: WarpParams { out_size: 24 },
            grid: GridParams { pad: 5 }, // cell = 3, pad eats everything
            force_flip: false,
        };
        assert!(matches!(
            extract_squares(&img, &corners, &params),
            Err(BoardError::Grid(GridError::PadTooLarge { .. }))
        ));
    }
}
