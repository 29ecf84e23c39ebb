// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner ordering — binds four unordered points to top-left, top-right,
// bottom-right, and bottom-left roles.

use quadscan_core::{OrderedQuadrilateral, Point2D};

/// Assign corner roles from coordinate sums and differences.
///
/// - top-left: smallest `x + y`
/// - bottom-right: largest `x + y`
/// - top-right: smallest `y - x`
/// - bottom-left: largest `y - x`
///
/// Ties go to the point that comes first in `points`. There is no further
/// geometric check: duplicate, collinear, or crossed inputs still receive an
/// assignment, possibly with one point filling several roles.
pub fn order_points(points: [Point2D; 4]) -> OrderedQuadrilateral {
    let sum = |p: &Point2D| f64::from(p.x) + f64::from(p.y);
    let diff = |p: &Point2D| f64::from(p.y) - f64::from(p.x);

    OrderedQuadrilateral {
        top_left: points[first_extreme(&points, sum, Extreme::Min)],
        top_right: points[first_extreme(&points, diff, Extreme::Min)],
        bottom_right: points[first_extreme(&points, sum, Extreme::Max)],
        bottom_left: points[first_extreme(&points, diff, Extreme::Max)],
    }
}

#[derive(Clone, Copy)]
enum Extreme {
    Min,
    Max,
}

/// Index of the first point attaining the extreme value of `key`.
fn first_extreme(points: &[Point2D; 4], key: impl Fn(&Point2D) -> f64, extreme: Extreme) -> usize {
    let mut best = 0;
    let mut best_value = key(&points[0]);
    for (i, p) in points.iter().enumerate().skip(1) {
        let value = key(p);
        let better = match extreme {
            Extreme::Min => value < best_value,
            Extreme::Max => value > best_value,
        };
        if better {
            best = i;
            best_value = value;
        }
    }
    best
}
