//! Raster and homography primitives for chessboard photo rectification.
//!
//! This crate is intentionally small and purely geometric. It knows nothing
//! about chess: it provides byte rasters, bilinear sampling, an exact
//! 4-point homography solve and a perspective warp. Board semantics live in
//! `chessgrid-board`.

mod homography;
mod image;
mod logger;

pub use homography::{homography_from_4pt, warp_perspective, Homography};
pub use image::{
    crop, flip_180, mean_intensity, sample_bilinear, sample_bilinear_u8, GrayImage, Raster,
    RgbImage,
};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
