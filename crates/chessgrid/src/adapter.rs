//! Bridging between the `image` crate at the I/O boundary and the plain
//! rasters the pipeline computes on.

use chessgrid_core::{GrayImage, Raster, RgbImage};
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum ImageIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error("raster of {len} bytes does not match {width}x{height} dimensions")]
    BadDimensions {
        width: usize,
        height: usize,
        len: usize,
    },
}

/// Decode an image file into an interleaved RGB raster.
pub fn load_rgb(path: impl AsRef<Path>) -> Result<RgbImage, ImageIoError> {
    let decoded = image::ImageReader::open(path)?.decode()?.to_rgb8();
    Ok(from_image_rgb(&decoded))
}

/// Decode an image file into a luma raster.
pub fn load_gray(path: impl AsRef<Path>) -> Result<GrayImage, ImageIoError> {
    let decoded = image::ImageReader::open(path)?.decode()?.to_luma8();
    Ok(GrayImage::from_parts(
        decoded.width() as usize,
        decoded.height() as usize,
        decoded.into_raw(),
    ))
}

pub fn from_image_rgb(img: &image::RgbImage) -> RgbImage {
    RgbImage::from_parts(
        img.width() as usize,
        img.height() as usize,
        img.as_raw().clone(),
    )
}

pub fn to_image_rgb(img: &RgbImage) -> Result<image::RgbImage, ImageIoError> {
    image::RgbImage::from_raw(img.width as u32, img.height as u32, img.data.clone()).ok_or(
        ImageIoError::BadDimensions {
            width: img.width,
            height: img.height,
            len: img.data.len(),
        },
    )
}

pub fn to_image_gray(img: &GrayImage) -> Result<image::GrayImage, ImageIoError> {
    image::GrayImage::from_raw(img.width as u32, img.height as u32, img.data.clone()).ok_or(
        ImageIoError::BadDimensions {
            width: img.width,
            height: img.height,
            len: img.data.len(),
        },
    )
}

/// Encode an RGB raster to a file; the format follows the extension.
pub fn save_rgb(path: impl AsRef<Path>, img: &RgbImage) -> Result<(), ImageIoError> {
    to_image_rgb(img)?.save(path)?;
    Ok(())
}

/// Resize an RGB raster to `size x size` (Catmull-Rom filter) and encode it.
pub fn save_rgb_resized(
    path: impl AsRef<Path>,
    img: &RgbImage,
    size: u32,
) -> Result<(), ImageIoError> {
    let buf = to_image_rgb(img)?;
    let resized = image::imageops::resize(&buf, size, size, image::imageops::FilterType::CatmullRom);
    resized.save(path)?;
    Ok(())
}
