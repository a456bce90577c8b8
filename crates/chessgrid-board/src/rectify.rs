//! Perspective rectification: four corner points to a top-down board view.

use crate::corners::{CornerCountError, CornerSet};
use chessgrid_core::{homography_from_4pt, warp_perspective, Homography, Raster};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum RectifyError {
    #[error(transparent)]
    CornerCount(#[from] CornerCountError),
    #[error("output size must be positive")]
    ZeroOutputSize,
    #[error("degenerate corner geometry: {0}")]
    Degenerate(&'static str),
}

/// Rectification parameters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct WarpParams {
    /// Side of the square top-down output, in pixels.
    pub out_size: usize,
}

impl Default for WarpParams {
    fn default() -> Self {
        Self { out_size: 800 }
    }
}

/// A top-down board view together with the forward homography that maps
/// source-image pixels onto the output square.
#[derive(Clone, Debug)]
pub struct RectifiedBoard<R> {
    pub topdown: R,
    pub h_board_from_img: Homography,
}

// Shoelace area of the canonical quadrilateral.
fn quad_area(pts: &[Point2<f32>; 4]) -> f32 {
    let mut twice = 0.0f32;
    for i in 0..4 {
        let a = pts[i];
        let b = pts[(i + 1) % 4];
        twice += a.x * b.y - b.x * a.y;
    }
    twice.abs() * 0.5
}

fn check_non_degenerate(corners: &CornerSet) -> Result<(), RectifyError> {
    let pts = corners.points();

    for i in 0..4 {
        for j in i + 1..4 {
            if (pts[i] - pts[j]).norm_squared() < 1e-6 {
                return Err(RectifyError::Degenerate("repeated corner"));
            }
        }
    }

    let min_x = pts.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
    let max_x = pts.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
    let min_y = pts.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
    let max_y = pts.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
    let bbox_area = (max_x - min_x) * (max_y - min_y);

    if bbox_area <= 0.0 || quad_area(pts) < 1e-3 * bbox_area {
        return Err(RectifyError::Degenerate("collinear corners"));
    }
    Ok(())
}

/// Warp the board enclosed by `corners` (any order) into a square top-down
/// view of side `params.out_size`.
///
/// The corners are canonicalized first, then mapped onto the destination
/// square `[(0,0), (S-1,0), (S-1,S-1), (0,S-1)]` with an exact 4-point
/// homography; the source is resampled through its inverse.
pub fn warp_board<R: Raster>(
    src: &R,
    corners: &[Point2<f32>],
    params: &WarpParams,
) -> Result<RectifiedBoard<R>, RectifyError> {
    let corners = CornerSet::from_unordered(corners)?;
    warp_board_canonical(src, &corners, params)
}

/// Same as [`warp_board`] for corners that are already canonical.
pub fn warp_board_canonical<R: Raster>(
    src: &R,
    corners: &CornerSet,
    params: &WarpParams,
) -> Result<RectifiedBoard<R>, RectifyError> {
    if params.out_size == 0 {
        return Err(RectifyError::ZeroOutputSize);
    }
    check_non_degenerate(corners)?;

    let s = (params.out_size - 1) as f32;
    let dst = [
        Point2::new(0.0, 0.0),
        Point2::new(s, 0.0),
        Point2::new(s, s),
        Point2::new(0.0, s),
    ];

    let h_board_from_img = homography_from_4pt(corners.points(), &dst)
        .ok_or(RectifyError::Degenerate("homography solve failed"))?;
    let h_img_from_board = h_board_from_img
        .inverse()
        .ok_or(RectifyError::Degenerate("homography not invertible"))?;

    log::debug!("warping board to {0}x{0} top-down view", params.out_size);
    let topdown = warp_perspective(src, h_img_from_board, params.out_size, params.out_size);

    Ok(RectifiedBoard {
        topdown,
        h_board_from_img,
    })
}
