// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Outline annotation — draws a detected polygon onto a copy of the source.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use quadscan_core::Point2D;
use quadscan_core::config::MAX_OUTLINE_THICKNESS;

/// Return a copy of `image` with the closed polygon `points` stroked in
/// `color`. The stroke is `thickness` pixels wide, centred on each edge;
/// `thickness` is clamped to `1..=MAX_OUTLINE_THICKNESS`.
///
/// The input image is never modified.
pub fn draw_outline(
    image: &RgbImage,
    points: &[Point2D],
    color: Rgb<u8>,
    thickness: u32,
) -> RgbImage {
    let mut canvas = image.clone();
    draw_outline_mut(&mut canvas, points, color, thickness);
    canvas
}

/// In-place variant of [`draw_outline`].
pub fn draw_outline_mut(canvas: &mut RgbImage, points: &[Point2D], color: Rgb<u8>, thickness: u32) {
    if points.is_empty() {
        return;
    }

    // Offsets span [-(t-1)/2, t/2] so odd widths are symmetric about the edge.
    let thickness = thickness.clamp(1, MAX_OUTLINE_THICKNESS) as i32;
    let lo = -((thickness - 1) / 2);
    let hi = lo + thickness - 1;

    for (i, start) in points.iter().enumerate() {
        let end = points[(i + 1) % points.len()];
        for oy in lo..=hi {
            for ox in lo..=hi {
                let (ox, oy) = (ox as f32, oy as f32);
                draw_line_segment_mut(
                    canvas,
                    (start.x + ox, start.y + oy),
                    (end.x + ox, end.y + oy),
                    color,
                );
            }
        }
    }
}
