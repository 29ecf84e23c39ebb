// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanning pipeline — contour extraction, quadrilateral selection, corner
// ordering, perspective rectification, and the detector that chains them.

pub mod contours;
pub mod detector;
pub mod order;
pub mod select;
pub mod warp;

pub use contours::{BorderKind, Contour, extract_contours, rank_contours};
pub use detector::{Detection, DetectionReport, RectangleDetector, RectifiedQuad, detect_rectangle};
pub use order::order_points;
pub use select::{Selection, select_quadrilateral};
pub use warp::{DEFAULT_BACKGROUND, four_point_transform, target_size, warp_quadrilateral};
