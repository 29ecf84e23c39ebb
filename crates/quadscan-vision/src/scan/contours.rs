// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contour extraction — border following over a binary edge map, chain
// compression, and area ranking.

use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use imageproc::geometry::contour_area;
use imageproc::point::Point;
use tracing::{debug, instrument};

/// Whether a traced border surrounds foreground or a hole inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderKind {
    Outer,
    Hole,
}

impl From<BorderType> for BorderKind {
    fn from(border: BorderType) -> Self {
        match border {
            BorderType::Outer => BorderKind::Outer,
            BorderType::Hole => BorderKind::Hole,
        }
    }
}

/// A closed boundary traced in the edge map.
///
/// `points` holds only the pixel positions where the boundary changes
/// direction; straight horizontal, vertical, and diagonal runs are reduced to
/// their endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub points: Vec<Point<i32>>,
    pub border: BorderKind,
    /// Index of the enclosing contour in the extraction order, if any.
    pub parent: Option<usize>,
    /// Enclosed (shoelace) area in square pixels.
    pub area: f64,
}

impl Contour {
    pub fn new(points: Vec<Point<i32>>, border: BorderKind, parent: Option<usize>) -> Self {
        let area = contour_area(&points);
        Self {
            points,
            border,
            parent,
            area,
        }
    }
}

/// Trace every border in `edges` (non-zero pixels are foreground).
///
/// All borders are returned, outer and hole alike, with their parent links
/// preserved, in the order the border follower discovers them.
#[instrument(skip_all, fields(width = edges.width(), height = edges.height()))]
pub fn extract_contours(edges: &GrayImage) -> Vec<Contour> {
    let traced = find_contours::<i32>(edges);
    let contours: Vec<Contour> = traced
        .into_iter()
        .map(|c| Contour::new(compress_chain(&c.points), c.border_type.into(), c.parent))
        .collect();
    debug!(contours = contours.len(), "Borders traced");
    contours
}

/// Keep the `limit` largest contours by area, largest first.
///
/// The sort is stable, so equal areas keep their extraction order.
pub fn rank_contours(mut contours: Vec<Contour>, limit: usize) -> Vec<Contour> {
    contours.sort_by(|a, b| b.area.total_cmp(&a.area));
    contours.truncate(limit);
    contours
}

/// Drop every chain point that continues in the same direction as the step
/// that reached it. The chain is treated as closed.
fn compress_chain(chain: &[Point<i32>]) -> Vec<Point<i32>> {
    let n = chain.len();
    if n <= 2 {
        return chain.to_vec();
    }

    let step = |from: Point<i32>, to: Point<i32>| (to.x - from.x, to.y - from.y);
    let kept: Vec<Point<i32>> = (0..n)
        .filter(|&i| {
            let prev = chain[(i + n - 1) % n];
            let next = chain[(i + 1) % n];
            step(prev, chain[i]) != step(chain[i], next)
        })
        .map(|i| chain[i])
        .collect();

    if kept.is_empty() {
        chain[..1].to_vec()
    } else {
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn outlined_rect(img: &mut GrayImage, x0: u32, y0: u32, x1: u32, y1: u32) {
        for x in x0..=x1 {
            img.put_pixel(x, y0, Luma([255]));
            img.put_pixel(x, y1, Luma([255]));
        }
        for y in y0..=y1 {
            img.put_pixel(x0, y, Luma([255]));
            img.put_pixel(x1, y, Luma([255]));
        }
    }

    fn contour_with_area(side: i32) -> Contour {
        Contour::new(
            vec![
                Point::new(0, 0),
                Point::new(side, 0),
                Point::new(side, side),
                Point::new(0, side),
            ],
            BorderKind::Outer,
            None,
        )
    }

    #[test]
    fn empty_map_has_no_contours() {
        assert!(extract_contours(&GrayImage::new(32, 32)).is_empty());
    }

    #[test]
    fn outlined_rectangle_yields_outer_and_hole() {
        let mut img = GrayImage::new(60, 50);
        outlined_rect(&mut img, 10, 10, 40, 30);
        let contours = extract_contours(&img);

        let outer = contours
            .iter()
            .find(|c| c.border == BorderKind::Outer)
            .expect("outer border");
        let hole = contours
            .iter()
            .find(|c| c.border == BorderKind::Hole)
            .expect("hole border");

        assert_eq!(outer.points.len(), 4, "compressed to corners: {:?}", outer.points);
        assert!((outer.area - 600.0).abs() < 1e-9);
        assert!(hole.area < outer.area);
        assert!(hole.parent.is_some());
    }

    #[test]
    fn compression_keeps_direction_changes_only() {
        let chain: Vec<Point<i32>> = [(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (1, 1)]
            .iter()
            .map(|&(x, y)| Point::new(x, y))
            .collect();
        let compressed = compress_chain(&chain);
        assert_eq!(
            compressed,
            vec![Point::new(0, 0), Point::new(2, 0), Point::new(2, 2)]
        );
    }

    #[test]
    fn ranking_is_descending_and_capped() {
        let contours: Vec<Contour> = [3, 9, 1, 7, 5, 8, 2]
            .iter()
            .map(|&s| contour_with_area(s))
            .collect();
        let ranked = rank_contours(contours, 5);
        let areas: Vec<f64> = ranked.iter().map(|c| c.area).collect();
        assert_eq!(areas, vec![81.0, 64.0, 49.0, 25.0, 9.0]);
    }

    #[test]
    fn ranking_ties_keep_extraction_order() {
        let mut first = contour_with_area(4);
        first.parent = Some(100);
        let mut second = contour_with_area(4);
        second.parent = Some(200);
        let ranked = rank_contours(vec![contour_with_area(1), first, second], 2);
        assert_eq!(ranked[0].parent, Some(100));
        assert_eq!(ranked[1].parent, Some(200));
    }
}
