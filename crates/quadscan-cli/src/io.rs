// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image file I/O — decoding inputs to 8-bit RGB and writing PNG outputs.

use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};
use quadscan_core::error::{QuadscanError, Result};
use tracing::{debug, info, instrument};

/// Decode the image at `path` and convert it to 8-bit RGB.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|err| {
        QuadscanError::ImageError(format!("failed to open {}: {}", path.display(), err))
    })?;
    info!(width = img.width(), height = img.height(), "Image loaded");
    Ok(img.to_rgb8())
}

/// Encode `image` as PNG at `path`, creating parent directories as needed.
#[instrument(skip(image), fields(path = %path.display()))]
pub fn save_png(image: &RgbImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|err| {
            QuadscanError::ImageError(format!(
                "failed to save image to {}: {}",
                path.display(),
                err
            ))
        })?;
    debug!(width = image.width(), height = image.height(), "PNG written");
    Ok(())
}

/// `<out_dir>/<stem>_outline.png` and `<out_dir>/<stem>_warped.png` for `input`.
pub fn output_paths(input: &Path, out_dir: &Path) -> (PathBuf, PathBuf) {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".into());
    (
        out_dir.join(format!("{stem}_outline.png")),
        out_dir.join(format!("{stem}_warped.png")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn output_names_follow_input_stem() {
        let (outline, warped) = output_paths(Path::new("/photos/receipt.jpeg"), Path::new("out"));
        assert_eq!(outline, PathBuf::from("out/receipt_outline.png"));
        assert_eq!(warped, PathBuf::from("out/receipt_warped.png"));
    }

    #[test]
    fn png_survives_save_and_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("tile.png");
        let img = RgbImage::from_fn(7, 5, |x, y| Rgb([x as u8 * 30, y as u8 * 40, 200]));

        save_png(&img, &path).expect("save");
        assert_eq!(load_rgb(&path).expect("load"), img);
    }

    #[test]
    fn missing_file_is_image_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_rgb(&dir.path().join("absent.png")).unwrap_err();
        assert!(matches!(err, QuadscanError::ImageError(_)));
    }

    #[test]
    fn undecodable_file_is_image_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.png");
        std::fs::write(&path, b"definitely not a png").expect("write");
        assert!(matches!(load_rgb(&path), Err(QuadscanError::ImageError(_))));
    }
}
