// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Polygon simplification and shape tests — closed Douglas–Peucker
// approximation and strict convexity. Perimeter and area come from
// `imageproc::geometry`.

use std::f64::consts::PI;

use quadscan_core::Point2D;

/// Approximate a curve by a polygon whose vertices are a subset of the input,
/// such that no input point lies farther than `epsilon` from the result.
///
/// Open curves always keep their two endpoints. Closed curves are split at
/// two mutually distant anchor vertices, each half is simplified on its own,
/// and vertices that end up within `epsilon` of the line through their
/// neighbours are pruned, so the result does not depend on where the trace
/// started. A non-positive `epsilon` keeps every vertex that is not exactly
/// on a line through its neighbours.
pub fn approximate_polygon(points: &[Point2D], epsilon: f64, closed: bool) -> Vec<Point2D> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    if !closed {
        return douglas_peucker(points, epsilon);
    }

    let n = points.len();
    let (a, b) = ring_anchors(points);
    if a == b {
        return vec![points[a]];
    }

    let walk = |from: usize, to: usize| -> Vec<Point2D> {
        let steps = (to + n - from) % n;
        (0..=steps).map(|k| points[(from + k) % n]).collect()
    };

    let mut ring = douglas_peucker(&walk(a, b), epsilon);
    ring.pop();
    let mut back = douglas_peucker(&walk(b, a), epsilon);
    back.pop();
    ring.extend(back);

    prune_flat_vertices(ring, epsilon)
}

/// Whether the closed polygon is strictly convex.
///
/// Every turn between consecutive edges must have the same non-zero sign and
/// the edges must wind around exactly once, so collinear triples, repeated
/// vertices, and self-intersecting rings are all rejected.
pub fn is_convex(points: &[Point2D]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }

    let mut orientation = 0.0f64;
    let mut turning = 0.0f64;
    for i in 0..n {
        let p0 = points[i];
        let p1 = points[(i + 1) % n];
        let p2 = points[(i + 2) % n];
        let (ax, ay) = (f64::from(p1.x - p0.x), f64::from(p1.y - p0.y));
        let (bx, by) = (f64::from(p2.x - p1.x), f64::from(p2.y - p1.y));

        let cross = ax * by - ay * bx;
        if cross == 0.0 {
            return false;
        }
        if orientation == 0.0 {
            orientation = cross.signum();
        } else if cross.signum() != orientation {
            return false;
        }
        turning += cross.atan2(ax * bx + ay * by);
    }

    (turning.abs() - 2.0 * PI).abs() < PI
}

// -- Douglas–Peucker ----------------------------------------------------------

/// Iterative Douglas–Peucker on an open polyline. Endpoints are always kept.
fn douglas_peucker(points: &[Point2D], epsilon: f64) -> Vec<Point2D> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;

    let mut stack = vec![(0usize, last)];
    while let Some((start, end)) = stack.pop() {
        if end - start <= 1 {
            continue;
        }

        let mut max_dist = 0.0f64;
        let mut max_index = start;
        for i in (start + 1)..end {
            let dist = line_distance(&points[i], &points[start], &points[end]);
            if dist > max_dist {
                max_dist = dist;
                max_index = i;
            }
        }

        if max_dist > epsilon {
            keep[max_index] = true;
            stack.push((start, max_index));
            stack.push((max_index, end));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

/// Pick two anchor vertices of a ring: the vertex farthest from the first
/// point, then the vertex farthest from that one. Returned as
/// `(second_anchor, first_anchor)` so the walk starts at the later pick.
fn ring_anchors(points: &[Point2D]) -> (usize, usize) {
    let farthest_from = |origin: usize| -> usize {
        let mut best = origin;
        let mut best_dist = 0.0f64;
        for (i, p) in points.iter().enumerate() {
            let d = p.distance(&points[origin]);
            if d > best_dist {
                best_dist = d;
                best = i;
            }
        }
        best
    };

    let b = farthest_from(0);
    let a = farthest_from(b);
    (a, b)
}

/// Remove ring vertices lying within `epsilon` of the line through their
/// neighbours until none remain (a triangle is never reduced further).
fn prune_flat_vertices(mut ring: Vec<Point2D>, epsilon: f64) -> Vec<Point2D> {
    let mut i = 0;
    let mut since_removal = 0;
    while ring.len() > 3 && since_removal < ring.len() {
        let n = ring.len();
        let prev = ring[(i + n - 1) % n];
        let next = ring[(i + 1) % n];
        if line_distance(&ring[i], &prev, &next) <= epsilon {
            ring.remove(i);
            since_removal = 0;
            if i >= ring.len() {
                i = 0;
            }
        } else {
            since_removal += 1;
            i = (i + 1) % n;
        }
    }
    ring
}

/// Perpendicular distance from `p` to the infinite line through `a` and `b`,
/// or the plain distance to `a` when the two coincide.
fn line_distance(p: &Point2D, a: &Point2D, b: &Point2D) -> f64 {
    let (ax, ay) = (f64::from(a.x), f64::from(a.y));
    let (dx, dy) = (f64::from(b.x) - ax, f64::from(b.y) - ay);
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        return p.distance(a);
    }
    ((f64::from(p.x) - ax) * dy - (f64::from(p.y) - ay) * dx).abs() / len
}
