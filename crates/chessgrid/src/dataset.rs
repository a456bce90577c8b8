//! Offline dataset construction: one annotated photograph in, 64 labeled
//! square images out.
//!
//! Layout under the output root: `<label>/<image-stem>_<index:02>.png`,
//! where `index` is the row-major grid index after orientation
//! correction, so index 56 is "a1" and matches the FEN-derived label.

use crate::adapter::{load_rgb, save_rgb_resized, ImageIoError};
use crate::corners_io::{load_corners, CornersIoError};
use crate::fen::{parse_fen_placement, FenError, Label};
use chessgrid_board::{extract_squares, BoardError, ExtractParams};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    #[error(transparent)]
    Image(#[from] ImageIoError),
    #[error(transparent)]
    Corners(#[from] CornersIoError),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Fen(#[from] FenError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("image path {0:?} has no usable file stem")]
    BadImagePath(PathBuf),
}

#[derive(Clone, Copy, Debug)]
pub struct DatasetParams {
    pub extract: ExtractParams,
    /// Side of the resized square images written to disk.
    pub img_size: u32,
}

impl Default for DatasetParams {
    fn default() -> Self {
        Self {
            extract: ExtractParams::default(),
            img_size: 96,
        }
    }
}

/// Outcome of a folder run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped: usize,
}

/// Process one (image, corner file, FEN placement) record: rectify,
/// orientation-correct, split, and write each crop resized to
/// `params.img_size` under its label directory. Returns the number of
/// crops written.
pub fn process_one(
    image_path: &Path,
    corners_path: &Path,
    placement: &str,
    out_root: &Path,
    params: &DatasetParams,
) -> Result<usize, DatasetError> {
    let stem = image_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| DatasetError::BadImagePath(image_path.to_path_buf()))?
        .to_owned();

    let img = load_rgb(image_path)?;
    let corners = load_corners(corners_path)?;
    let labels = parse_fen_placement(placement.trim())?;

    let extraction = extract_squares(&img, corners.points(), &params.extract)?;

    for lab in Label::ALL {
        fs::create_dir_all(out_root.join(lab.dir_name()))?;
    }

    let mut written = 0;
    for (i, (square, lab)) in extraction.grid.iter().zip(&labels).enumerate() {
        let out_path = out_root
            .join(lab.dir_name())
            .join(format!("{stem}_{i:02}.png"));
        save_rgb_resized(&out_path, square, params.img_size)?;
        written += 1;
    }

    log::info!("{stem}: wrote {written} squares");
    Ok(written)
}

/// Parse a `name,FEN` lines file. Malformed lines are logged and skipped.
pub fn read_fen_list(path: &Path) -> Result<BTreeMap<String, String>, DatasetError> {
    let raw = fs::read_to_string(path)?;
    let mut map = BTreeMap::new();
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.split_once(',') {
            Some((name, fen)) => {
                map.insert(name.trim().to_owned(), fen.trim().to_owned());
            }
            None => log::warn!("skipping malformed FEN line: {line}"),
        }
    }
    Ok(map)
}

const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

/// Process every image in `folder` that has a matching corner file in
/// `corners_dir` and an entry in the `name,FEN` file. A failing record is
/// logged and skipped; the batch keeps going.
pub fn build_from_folder(
    folder: &Path,
    corners_dir: &Path,
    fen_file: &Path,
    out_root: &Path,
    params: &DatasetParams,
) -> Result<BatchSummary, DatasetError> {
    let fen_map = read_fen_list(fen_file)?;

    let mut entries: Vec<PathBuf> = fs::read_dir(folder)?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect();
    entries.sort();

    let mut summary = BatchSummary::default();
    for image_path in entries {
        let name = match image_path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n.to_owned(),
            None => {
                summary.skipped += 1;
                continue;
            }
        };

        let Some(placement) = fen_map.get(&name) else {
            log::warn!("no FEN found for {name}, skipping");
            summary.skipped += 1;
            continue;
        };

        let stem = match image_path.file_stem().and_then(|s| s.to_str()) {
            Some(s) => s.to_owned(),
            None => {
                summary.skipped += 1;
                continue;
            }
        };
        let corners_path = corners_dir.join(format!("{stem}.json"));
        if !corners_path.exists() {
            log::warn!("missing corners for {name}, skipping");
            summary.skipped += 1;
            continue;
        }

        match process_one(&image_path, &corners_path, placement, out_root, params) {
            Ok(_) => summary.processed += 1,
            Err(err) => {
                // one bad record must not kill the batch
                log::warn!("failed to process {name}: {err}");
                summary.skipped += 1;
            }
        }
    }

    log::info!(
        "dataset build complete: {} processed, {} skipped",
        summary.processed,
        summary.skipped
    );
    Ok(summary)
}
