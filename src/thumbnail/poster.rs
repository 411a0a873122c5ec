// SPDX-License-Identifier: MPL-2.0
//! Poster image loading.

use crate::error::{Error, Result};
use iced::widget::image;
use image_rs::GenericImageView;
use std::fs;
use std::path::{Path, PathBuf};

/// A decoded poster ready for display.
#[derive(Debug, Clone)]
pub struct PosterImage {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

/// Reads and decodes a poster file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Poster`]
/// if its bytes are not a supported image.
pub fn load_poster<P: AsRef<Path>>(path: P) -> Result<PosterImage> {
    let bytes = fs::read(path.as_ref())?;
    let img = image_rs::load_from_memory(&bytes)?;

    let (width, height) = img.dimensions();
    let pixels = img.to_rgba8().into_vec();

    Ok(PosterImage {
        handle: image::Handle::from_rgba(width, height, pixels),
        width,
        height,
    })
}

/// [`load_poster`] on the blocking thread pool.
pub async fn fetch_poster(path: PathBuf) -> Result<PosterImage> {
    tokio::task::spawn_blocking(move || load_poster(path))
        .await
        .map_err(|e| Error::Poster(format!("Poster task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{Rgb, RgbImage};
    use tempfile::tempdir;

    #[test]
    fn load_jpeg_poster_returns_dimensions() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("3.jpg");
        RgbImage::from_pixel(8, 4, Rgb([10, 20, 30]))
            .save(&path)
            .expect("failed to write jpeg");

        let poster = load_poster(&path).expect("jpeg should load");
        assert_eq!((poster.width, poster.height), (8, 4));
    }

    #[test]
    fn missing_poster_is_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        match load_poster(temp_dir.path().join("missing.jpg")) {
            Err(Error::Io(_)) => {}
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn garbage_bytes_are_poster_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("broken.jpg");
        fs::write(&path, b"not a jpeg").expect("failed to write file");

        match load_poster(&path) {
            Err(Error::Poster(message)) => assert!(!message.is_empty()),
            other => panic!("expected Poster error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_runs_off_thread() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("1.png");
        RgbImage::from_pixel(2, 2, Rgb([0, 0, 0]))
            .save(&path)
            .expect("failed to write png");

        let poster = fetch_poster(path).await.expect("png should load");
        assert_eq!(poster.width, 2);
    }
}
