// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// quadscan-vision — Quadrilateral detection and perspective rectification.
//
// Provides raster operations (Canny edge maps, outline drawing), planar geometry
// (polygon approximation, convexity), four-point perspective warps, and the scanning
// pipeline that finds the dominant quadrilateral in a photo and warps it to a
// bird's-eye view.

pub mod geometry;
pub mod raster;
pub mod scan;

// Re-export the primary entry points so callers can use `quadscan_vision::detect_rectangle` etc.
pub use scan::detector::{Detection, DetectionReport, RectangleDetector, RectifiedQuad, detect_rectangle};
pub use scan::order::order_points;
pub use scan::warp::four_point_transform;
