//! Plain row-major byte rasters shared by every pipeline stage.
//!
//! Both single-channel and interleaved RGB buffers implement [`Raster`], so
//! warping, cropping and flipping are written once and monomorphised per
//! pixel format.

/// A dense, row-major, 8-bit raster with a compile-time channel count.
pub trait Raster: Sized {
    /// Interleaved channels per pixel.
    const CHANNELS: usize;

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Backing bytes, `len == width * height * CHANNELS`.
    fn data(&self) -> &[u8];

    /// Build a raster from raw parts. `data.len()` must equal
    /// `width * height * CHANNELS`.
    fn from_parts(width: usize, height: usize, data: Vec<u8>) -> Self;
}

/// Single-channel luma raster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

/// Interleaved RGB raster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl Raster for GrayImage {
    const CHANNELS: usize = 1;

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn data(&self) -> &[u8] {
        &self.data
    }

    fn from_parts(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }
}

impl Raster for RgbImage {
    const CHANNELS: usize = 3;

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn data(&self) -> &[u8] {
        &self.data
    }

    fn from_parts(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height * 3);
        Self {
            width,
            height,
            data,
        }
    }
}

#[inline]
fn fetch<R: Raster>(src: &R, x: i32, y: i32, ch: usize) -> u8 {
    if x < 0 || y < 0 || x >= src.width() as i32 || y >= src.height() as i32 {
        return 0;
    }
    src.data()[(y as usize * src.width() + x as usize) * R::CHANNELS + ch]
}

/// Bilinear sample of one channel at a fractional position. Out-of-bounds
/// taps read as 0.
#[inline]
pub fn sample_bilinear<R: Raster>(src: &R, x: f32, y: f32, ch: usize) -> f32 {
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = fetch(src, x0, y0, ch) as f32;
    let p10 = fetch(src, x0 + 1, y0, ch) as f32;
    let p01 = fetch(src, x0, y0 + 1, ch) as f32;
    let p11 = fetch(src, x0 + 1, y0 + 1, ch) as f32;

    let a = p00 + fx * (p10 - p00);
    let b = p01 + fx * (p11 - p01);
    a + fy * (b - a)
}

#[inline]
pub fn sample_bilinear_u8<R: Raster>(src: &R, x: f32, y: f32, ch: usize) -> u8 {
    sample_bilinear(src, x, y, ch).clamp(0.0, 255.0) as u8
}

/// Copy the axis-aligned region `[x0, x1) x [y0, y1)` into a new raster.
/// Bounds are clamped into the source; an inverted range yields an empty
/// raster.
pub fn crop<R: Raster>(src: &R, x0: usize, y0: usize, x1: usize, y1: usize) -> R {
    let x0 = x0.min(src.width());
    let y0 = y0.min(src.height());
    let x1 = x1.min(src.width());
    let y1 = y1.min(src.height());

    let w = x1.saturating_sub(x0);
    let h = y1.saturating_sub(y0);
    let c = R::CHANNELS;

    let mut out = Vec::with_capacity(w * h * c);
    for y in y0..y0 + h {
        let row = (y * src.width() + x0) * c;
        out.extend_from_slice(&src.data()[row..row + w * c]);
    }
    R::from_parts(w, h, out)
}

/// Rotate by 180 degrees: reverse both axes, keeping the channel order
/// within each pixel.
pub fn flip_180<R: Raster>(src: &R) -> R {
    let w = src.width();
    let h = src.height();
    let c = R::CHANNELS;
    let data = src.data();

    let mut out = vec![0u8; data.len()];
    for y in 0..h {
        for x in 0..w {
            let s = (y * w + x) * c;
            let d = ((h - 1 - y) * w + (w - 1 - x)) * c;
            out[d..d + c].copy_from_slice(&data[s..s + c]);
        }
    }
    R::from_parts(w, h, out)
}

/// Mean over all bytes of the raster (all channels pooled). Empty rasters
/// report 0.
pub fn mean_intensity<R: Raster>(src: &R) -> f64 {
    let data = src.data();
    if data.is_empty() {
        return 0.0;
    }
    let sum: u64 = data.iter().map(|&v| v as u64).sum();
    sum as f64 / data.len() as f64
}
