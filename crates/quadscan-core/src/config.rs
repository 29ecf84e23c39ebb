// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Detector configuration.

use serde::{Deserialize, Serialize};

use crate::error::{QuadscanError, Result};

/// Widest outline stroke, in pixels, accepted by [`DetectorConfig::validate`].
pub const MAX_OUTLINE_THICKNESS: u32 = 64;

/// Tunable parameters of the rectangle detector.
///
/// The defaults reproduce the classic document-scanner recipe: Canny 50/100,
/// the five largest contours, a DP tolerance of 2% of the perimeter, and a
/// 3px green outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Canny low (hysteresis) threshold on an 8-bit gradient scale.
    pub canny_low: f32,
    /// Canny high threshold on an 8-bit gradient scale.
    pub canny_high: f32,
    /// Optional Gaussian blur applied before edge detection.
    pub blur_sigma: Option<f32>,
    /// Number of largest-area contours considered for selection.
    pub max_candidates: usize,
    /// Polygon approximation tolerance as a fraction of the contour perimeter.
    pub approx_epsilon_ratio: f64,
    /// RGB colour of the outline drawn on the annotated output.
    pub outline_color: [u8; 3],
    /// Stroke width of the outline, in pixels.
    pub outline_thickness: u32,
    /// RGB value for warped pixels that fall outside the source image.
    pub background: [u8; 3],
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            canny_low: 50.0,
            canny_high: 100.0,
            blur_sigma: None,
            max_candidates: 5,
            approx_epsilon_ratio: 0.02,
            outline_color: [0, 255, 0],
            outline_thickness: 3,
            background: [0, 0, 0],
        }
    }
}

impl DetectorConfig {
    /// Check every field against its valid domain.
    pub fn validate(&self) -> Result<()> {
        if !self.canny_low.is_finite() || !self.canny_high.is_finite() || self.canny_low < 0.0 {
            return Err(QuadscanError::InvalidConfig(format!(
                "canny thresholds must be finite and non-negative (low={}, high={})",
                self.canny_low, self.canny_high
            )));
        }
        if self.canny_low > self.canny_high {
            return Err(QuadscanError::InvalidConfig(format!(
                "canny_low ({}) exceeds canny_high ({})",
                self.canny_low, self.canny_high
            )));
        }
        if let Some(sigma) = self.blur_sigma.filter(|s| !(s.is_finite() && *s > 0.0)) {
            return Err(QuadscanError::InvalidConfig(format!(
                "blur_sigma must be positive, got {sigma}"
            )));
        }
        if self.max_candidates == 0 {
            return Err(QuadscanError::InvalidConfig(
                "max_candidates must be at least 1".into(),
            ));
        }
        if !(self.approx_epsilon_ratio > 0.0 && self.approx_epsilon_ratio < 0.5) {
            return Err(QuadscanError::InvalidConfig(format!(
                "approx_epsilon_ratio must lie in (0, 0.5), got {}",
                self.approx_epsilon_ratio
            )));
        }
        if !(1..=MAX_OUTLINE_THICKNESS).contains(&self.outline_thickness) {
            return Err(QuadscanError::InvalidConfig(format!(
                "outline_thickness must lie in 1..={MAX_OUTLINE_THICKNESS}, got {}",
                self.outline_thickness
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration. Missing fields take their
    /// default values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }
}
