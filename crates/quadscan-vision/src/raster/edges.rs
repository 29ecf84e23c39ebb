// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Edge detection — grayscale conversion, optional blur, Canny.

use image::imageops::grayscale;
use image::{GrayImage, RgbImage};
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use quadscan_core::DetectorConfig;
use tracing::{debug, instrument};

/// Convert a colour image to a binary edge map of the same dimensions.
///
/// Edge pixels are 255, everything else 0. Uses the configured Canny
/// hysteresis thresholds; a Gaussian pre-blur is applied only when
/// `blur_sigma` is set.
#[instrument(skip_all, fields(width = image.width(), height = image.height()))]
pub fn detect_edges(image: &RgbImage, config: &DetectorConfig) -> GrayImage {
    let gray = grayscale(image);

    let gray = match config.blur_sigma {
        Some(sigma) => {
            debug!(sigma, "Applying Gaussian pre-blur");
            gaussian_blur_f32(&gray, sigma)
        }
        None => gray,
    };

    let edges = canny(&gray, config.canny_low, config.canny_high);
    debug!(
        low = config.canny_low,
        high = config.canny_high,
        edge_pixels = edges.pixels().filter(|p| p.0[0] > 0).count(),
        "Canny edge detection complete"
    );
    edges
}
