// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Quadrilateral selection — greedy scan over ranked contours for the first
// convex four-vertex approximation.

use imageproc::geometry::arc_length;
use quadscan_core::{Point2D, Quadrilateral};
use tracing::{debug, trace};

use crate::geometry::polygon::{approximate_polygon, is_convex};
use crate::scan::contours::Contour;

/// The accepted candidate and where it sat in the ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub quadrilateral: Quadrilateral,
    /// Zero-based position of the accepted contour in the ranked input.
    pub rank: usize,
}

/// Scan `ranked` in order and return the first contour whose polygon
/// approximation (tolerance `epsilon_ratio` x perimeter) has exactly four
/// vertices and is convex.
///
/// Selection stops at the first match: a better-shaped quadrilateral later in
/// the ranking never displaces an earlier, larger one.
pub fn select_quadrilateral(ranked: &[Contour], epsilon_ratio: f64) -> Option<Selection> {
    for (rank, contour) in ranked.iter().enumerate() {
        let perimeter = arc_length(&contour.points, true);
        let curve: Vec<Point2D> = contour
            .points
            .iter()
            .map(|p| Point2D::new(p.x as f32, p.y as f32))
            .collect();
        let approx = approximate_polygon(&curve, epsilon_ratio * perimeter, true);
        trace!(
            rank,
            area = contour.area,
            perimeter,
            vertices = approx.len(),
            "Candidate approximated"
        );

        if let Some(quad) = as_convex_quad(&approx) {
            debug!(rank, area = contour.area, "Convex quadrilateral accepted");
            return Some(Selection {
                quadrilateral: quad,
                rank,
            });
        }
    }
    None
}

fn as_convex_quad(approx: &[Point2D]) -> Option<Quadrilateral> {
    let vertices: [Point2D; 4] = approx.try_into().ok()?;
    is_convex(&vertices).then_some(Quadrilateral(vertices))
}
