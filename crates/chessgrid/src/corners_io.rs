//! Corner-file I/O.
//!
//! A corner file is a JSON list of four `[x, y]` pairs. Annotation writes
//! it in canonical `[TL, TR, BR, BL]` order; loading tolerates any order
//! and re-canonicalizes.

use chessgrid_board::CornerSet;
use std::fs;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum CornersIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Load a corner file from disk.
pub fn load_corners(path: impl AsRef<Path>) -> Result<CornerSet, CornersIoError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Write a corner set to disk as pretty JSON, in canonical order.
pub fn save_corners(path: impl AsRef<Path>, corners: &CornerSet) -> Result<(), CornersIoError> {
    let json = serde_json::to_string_pretty(corners)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    #[test]
    fn round_trips_through_a_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("board.json");

        let scrambled = [
            Point2::new(400.0, 100.0),
            Point2::new(100.0, 400.0),
            Point2::new(100.0, 100.0),
            Point2::new(400.0, 400.0),
        ];
        let corners = CornerSet::from_unordered(&scrambled).expect("4 corners");
        save_corners(&path, &corners).expect("saves");

        let loaded = load_corners(&path).expect("loads");
        assert_eq!(loaded, corners);
        assert_eq!(loaded.top_left(), Point2::new(100.0, 100.0));
    }

    #[test]
    fn wrong_count_fails_to_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.json");
        fs::write(&path, "[[0,0],[1,0],[1,1]]").expect("writes");
        assert!(matches!(
            load_corners(&path),
            Err(CornersIoError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            load_corners("/nonexistent/board.json"),
            Err(CornersIoError::Io(_))
        ));
    }
}
