// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Perspective rectification — output sizing, four-point projective transform,
// and bilinear resampling into a bird's-eye view.

use image::{Rgb, RgbImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use quadscan_core::error::{QuadscanError, Result};
use quadscan_core::{OrderedQuadrilateral, Point2D};
use tracing::{debug, info, instrument};

use crate::scan::order::order_points;

/// Value given to output pixels whose preimage falls outside the source.
pub const DEFAULT_BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);

/// Output canvas size for a rectified quadrilateral.
///
/// Width is the longer of the top and bottom edges, height the longer of the
/// left and right edges, each truncated to whole pixels. Fails with
/// `DegenerateQuadrilateral` when either comes out below one pixel.
pub fn target_size(quad: &OrderedQuadrilateral) -> Result<(u32, u32)> {
    let width_bottom = quad.bottom_right.distance(&quad.bottom_left);
    let width_top = quad.top_right.distance(&quad.top_left);
    let height_right = quad.top_right.distance(&quad.bottom_right);
    let height_left = quad.top_left.distance(&quad.bottom_left);

    let width = width_bottom.max(width_top).floor();
    let height = height_right.max(height_left).floor();

    let limit = f64::from(u32::MAX);
    if !(width >= 1.0 && height >= 1.0) || width > limit || height > limit {
        return Err(QuadscanError::DegenerateQuadrilateral(format!(
            "rectified size would be {width}x{height}"
        )));
    }
    Ok((width as u32, height as u32))
}

/// Warp the region bounded by `quad` in `image` to an upright rectangle of
/// [`target_size`].
///
/// Each output pixel is inverse-mapped through the projective transform and
/// sampled bilinearly; pixels whose preimage is outside the source are set to
/// `background`. A one-pixel-wide or one-pixel-tall target is rejected, since
/// its destination corners coincide.
#[instrument(skip(image), fields(src_w = image.width(), src_h = image.height()))]
pub fn warp_quadrilateral(
    image: &RgbImage,
    quad: &OrderedQuadrilateral,
    background: Rgb<u8>,
) -> Result<RgbImage> {
    let (src_w, src_h) = image.dimensions();
    if src_w == 0 || src_h == 0 {
        return Err(QuadscanError::InvalidInput {
            width: src_w,
            height: src_h,
        });
    }

    let (out_w, out_h) = target_size(quad)?;
    let src = quad.corners();
    if has_collinear_triple(&src) {
        return Err(QuadscanError::DegenerateQuadrilateral(format!(
            "three of the corners {} {} {} {} are collinear",
            src[0], src[1], src[2], src[3]
        )));
    }

    if out_w < 2 || out_h < 2 {
        return Err(QuadscanError::DegenerateQuadrilateral(format!(
            "a {out_w}x{out_h} target collapses the destination corners"
        )));
    }

    let (max_x, max_y) = ((out_w - 1) as f32, (out_h - 1) as f32);
    let dst = [(0.0, 0.0), (max_x, 0.0), (max_x, max_y), (0.0, max_y)];

    let projection = Projection::from_control_points(src.map(<(f32, f32)>::from), dst)
        .ok_or_else(|| {
            QuadscanError::DegenerateQuadrilateral(format!(
                "no projective transform maps the corners onto a {out_w}x{out_h} rectangle"
            ))
        })?;
    debug!(out_w, out_h, "Projective transform computed");

    let mut output = RgbImage::from_pixel(out_w, out_h, background);
    warp_into(image, &projection, Interpolation::Bilinear, background, &mut output);

    info!(out_w, out_h, "Perspective correction applied");
    Ok(output)
}

/// Order `points` into corner roles, then rectify with a black background.
pub fn four_point_transform(image: &RgbImage, points: &[Point2D; 4]) -> Result<RgbImage> {
    let ordered = order_points(*points);
    warp_quadrilateral(image, &ordered, DEFAULT_BACKGROUND)
}

fn has_collinear_triple(corners: &[Point2D; 4]) -> bool {
    const TRIPLES: [[usize; 3]; 4] = [[0, 1, 2], [1, 2, 3], [2, 3, 0], [3, 0, 1]];
    TRIPLES.iter().any(|&[i, j, k]| {
        let (a, b, c) = (corners[i], corners[j], corners[k]);
        let twice_area = (f64::from(b.x) - f64::from(a.x)) * (f64::from(c.y) - f64::from(a.y))
            - (f64::from(b.y) - f64::from(a.y)) * (f64::from(c.x) - f64::from(a.x));
        twice_area.abs() < 1e-6
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Point2D {
        Point2D::new(x, y)
    }

    /// Red follows x, green follows y.
    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 90]))
    }

    #[test]
    fn size_follows_longest_edges() {
        let quad = order_points([p(10.0, 10.0), p(110.0, 20.0), p(105.0, 80.0), p(5.0, 70.0)]);
        assert_eq!(target_size(&quad).expect("valid"), (100, 60));

        let img = gradient(200, 150);
        let warped = four_point_transform(&img, &quad.corners()).expect("warp");
        assert_eq!(warped.dimensions(), (100, 60));
    }

    #[test]
    fn size_truncates_toward_zero() {
        let quad = OrderedQuadrilateral {
            top_left: p(0.0, 0.0),
            top_right: p(10.9, 0.0),
            bottom_right: p(10.9, 5.9),
            bottom_left: p(0.0, 5.9),
        };
        assert_eq!(target_size(&quad).expect("valid"), (10, 5));
    }

    #[test]
    fn axis_aligned_warp_matches_crop() {
        let img = gradient(200, 150);
        let corners = [p(140.0, 30.0), p(40.0, 100.0), p(40.0, 30.0), p(140.0, 100.0)];
        let warped = four_point_transform(&img, &corners).expect("warp");
        assert_eq!(warped.dimensions(), (100, 70));

        for v in 0..69 {
            for u in 0..99 {
                let got = warped.get_pixel(u, v);
                let want = img.get_pixel(40 + u, 30 + v);
                for c in 0..3 {
                    let diff = (i32::from(got.0[c]) - i32::from(want.0[c])).abs();
                    assert!(diff <= 2, "pixel ({u},{v}) channel {c}: {got:?} vs {want:?}");
                }
            }
        }
    }

    #[test]
    fn outside_pixels_use_background() {
        let img = RgbImage::from_pixel(50, 50, Rgb([255, 255, 255]));
        let quad = order_points([p(-20.0, -20.0), p(30.0, -20.0), p(30.0, 30.0), p(-20.0, 30.0)]);
        let magenta = Rgb([255, 0, 255]);
        let warped = warp_quadrilateral(&img, &quad, magenta).expect("warp");

        assert_eq!(warped.dimensions(), (50, 50));
        assert_eq!(*warped.get_pixel(0, 0), magenta);
        assert!(warped.get_pixel(40, 40).0.iter().all(|&c| c >= 253));
    }

    #[test]
    fn duplicate_points_are_degenerate() {
        let img = gradient(20, 20);
        let err = four_point_transform(&img, &[p(5.0, 5.0); 4]).unwrap_err();
        assert!(matches!(err, QuadscanError::DegenerateQuadrilateral(_)));
    }

    #[test]
    fn flat_line_is_degenerate() {
        let img = gradient(40, 40);
        let line = [p(0.0, 0.0), p(10.0, 0.0), p(20.0, 0.0), p(30.0, 0.0)];
        let err = four_point_transform(&img, &line).unwrap_err();
        assert!(matches!(err, QuadscanError::DegenerateQuadrilateral(_)));
    }

    #[test]
    fn diagonal_collinear_points_are_degenerate() {
        // Non-zero computed size, but every corner sits on one line.
        let img = gradient(40, 40);
        let corners = [p(0.0, 0.0), p(10.0, 10.0), p(20.0, 20.0), p(5.0, 5.0)];
        assert_eq!(target_size(&order_points(corners)).expect("sized"), (28, 28));
        let err = four_point_transform(&img, &corners).unwrap_err();
        assert!(matches!(err, QuadscanError::DegenerateQuadrilateral(_)));
    }

    #[test]
    fn exact_diamond_is_degenerate() {
        // Sum and difference extremes tie, so one vertex fills two roles.
        let img = gradient(60, 60);
        let diamond = [p(30.0, 10.0), p(50.0, 30.0), p(30.0, 50.0), p(10.0, 30.0)];
        let ordered = order_points(diamond);
        assert_eq!(ordered.top_left, ordered.top_right);

        let err = four_point_transform(&img, &diamond).unwrap_err();
        assert!(matches!(err, QuadscanError::DegenerateQuadrilateral(_)));
    }

    #[test]
    fn single_pixel_width_is_degenerate() {
        let img = gradient(80, 80);
        let sliver = [p(10.0, 10.0), p(11.5, 10.0), p(11.5, 60.0), p(10.0, 60.0)];
        assert_eq!(target_size(&order_points(sliver)).expect("sized"), (1, 50));

        let err = four_point_transform(&img, &sliver).unwrap_err();
        assert!(matches!(err, QuadscanError::DegenerateQuadrilateral(_)));

        let flat = [p(10.0, 10.0), p(60.0, 10.0), p(60.0, 11.2), p(10.0, 11.2)];
        assert!(matches!(
            four_point_transform(&img, &flat),
            Err(QuadscanError::DegenerateQuadrilateral(_))
        ));
    }

    #[test]
    fn empty_source_is_invalid_input() {
        let img = RgbImage::new(0, 10);
        let corners = [p(0.0, 0.0), p(5.0, 0.0), p(5.0, 5.0), p(0.0, 5.0)];
        assert!(matches!(
            four_point_transform(&img, &corners),
            Err(QuadscanError::InvalidInput { width: 0, height: 10 })
        ));
    }
}
