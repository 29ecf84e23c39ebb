// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rectangle detector — edge map, contour ranking, quadrilateral selection,
// outline annotation, and perspective rectification in one call.

use image::{DynamicImage, Rgb, RgbImage};
use quadscan_core::error::{QuadscanError, Result};
use quadscan_core::{DetectorConfig, OrderedQuadrilateral, Quadrilateral};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::raster::annotate::draw_outline;
use crate::raster::edges::detect_edges;
use crate::scan::contours::{extract_contours, rank_contours};
use crate::scan::order::order_points;
use crate::scan::select::select_quadrilateral;
use crate::scan::warp::warp_quadrilateral;

/// Locates the dominant quadrilateral in a colour image and rectifies it.
///
/// The detector holds only its configuration; every call allocates its own
/// intermediate buffers, so one detector can serve many threads.
///
/// ## Pipeline
///
/// 1. Grayscale + Canny edge map
/// 2. Border following over the edge map (full hierarchy)
/// 3. Rank borders by enclosed area, keep the `max_candidates` largest
/// 4. Approximate each in turn; accept the first convex four-vertex polygon
/// 5. Stroke its outline onto a copy of the input
/// 6. Order its corners and warp the enclosed region to an upright rectangle
#[derive(Debug, Clone, Default)]
pub struct RectangleDetector {
    config: DetectorConfig,
}

/// A quadrilateral that was found, with both rendered outputs.
#[derive(Debug, Clone)]
pub struct RectifiedQuad {
    /// Vertices as produced by polygon approximation.
    pub quadrilateral: Quadrilateral,
    /// The same vertices bound to corner roles.
    pub ordered: OrderedQuadrilateral,
    /// Position of the accepted contour in the area ranking.
    pub rank: usize,
    /// Copy of the input with the outline drawn on it.
    pub annotated: RgbImage,
    /// Bird's-eye view of the enclosed region.
    pub warped: RgbImage,
}

/// Outcome of a detection run.
#[derive(Debug, Clone)]
pub enum Detection {
    Found(Box<RectifiedQuad>),
    NotFound,
}

/// Serializable summary of a [`Detection`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionReport {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corners: Option<OrderedQuadrilateral>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warped_size: Option<(u32, u32)>,
}

impl Detection {
    pub fn is_found(&self) -> bool {
        matches!(self, Detection::Found(_))
    }

    /// Collapse into the `(annotated, warped)` pair, substituting copies of
    /// `original` for both when nothing was found.
    pub fn into_images(self, original: &RgbImage) -> (RgbImage, RgbImage) {
        match self {
            Detection::Found(found) => {
                let RectifiedQuad {
                    annotated, warped, ..
                } = *found;
                (annotated, warped)
            }
            Detection::NotFound => (original.clone(), original.clone()),
        }
    }

    pub fn report(&self) -> DetectionReport {
        match self {
            Detection::Found(found) => DetectionReport {
                found: true,
                rank: Some(found.rank),
                corners: Some(found.ordered),
                warped_size: Some(found.warped.dimensions()),
            },
            Detection::NotFound => DetectionReport {
                found: false,
                rank: None,
                corners: None,
                warped_size: None,
            },
        }
    }
}

impl RectangleDetector {
    // -- Construction ---------------------------------------------------------

    /// Create a detector after validating `config`.
    pub fn new(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    // -- Detection ------------------------------------------------------------

    /// Run the full pipeline on `image`.
    ///
    /// Returns `Detection::NotFound` when none of the ranked contours
    /// approximates to a convex quadrilateral. Fails with `InvalidInput` for a
    /// zero-sized image and with `DegenerateQuadrilateral` if the selected
    /// corners cannot be rectified.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn detect(&self, image: &RgbImage) -> Result<Detection> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(QuadscanError::InvalidInput { width, height });
        }
        info!("Starting rectangle detection");

        // Step 1: Edge map.
        let edges = detect_edges(image, &self.config);

        // Step 2+3: Borders ranked by area.
        let contours = extract_contours(&edges);
        let traced = contours.len();
        let ranked = rank_contours(contours, self.config.max_candidates);
        debug!(traced, candidates = ranked.len(), "Contours ranked");

        // Step 4: Greedy selection.
        let Some(selection) = select_quadrilateral(&ranked, self.config.approx_epsilon_ratio)
        else {
            warn!(
                candidates = ranked.len(),
                "No convex quadrilateral among the largest contours"
            );
            return Ok(Detection::NotFound);
        };
        let quadrilateral = selection.quadrilateral;

        // Step 5: Outline on a copy.
        let annotated = draw_outline(
            image,
            quadrilateral.points(),
            Rgb(self.config.outline_color),
            self.config.outline_thickness,
        );

        // Step 6: Rectify.
        let ordered = order_points(quadrilateral.0);
        let warped = warp_quadrilateral(image, &ordered, Rgb(self.config.background))?;

        info!(
            rank = selection.rank,
            top_left = %ordered.top_left,
            bottom_right = %ordered.bottom_right,
            out_w = warped.width(),
            out_h = warped.height(),
            "Quadrilateral detected and rectified"
        );

        Ok(Detection::Found(Box::new(RectifiedQuad {
            quadrilateral,
            ordered,
            rank: selection.rank,
            annotated,
            warped,
        })))
    }

    /// Like [`detect`](Self::detect), but a missing quadrilateral is an error.
    pub fn detect_strict(&self, image: &RgbImage) -> Result<Box<RectifiedQuad>> {
        match self.detect(image)? {
            Detection::Found(found) => Ok(found),
            Detection::NotFound => Err(QuadscanError::NoQuadrilateralFound {
                candidates: self.config.max_candidates,
            }),
        }
    }

    /// Convert any decoded image to 8-bit RGB and detect.
    pub fn detect_dynamic(&self, image: &DynamicImage) -> Result<Detection> {
        self.detect(&image.to_rgb8())
    }
}

/// Detect with the default configuration and return `(annotated, warped)`.
///
/// When nothing is found both outputs are unmodified copies of `image`.
pub fn detect_rectangle(image: &RgbImage) -> Result<(RgbImage, RgbImage)> {
    let detection = RectangleDetector::default().detect(image)?;
    Ok(detection.into_images(image))
}
