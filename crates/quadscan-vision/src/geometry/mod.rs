// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Geometry primitives — closed-ring simplification and convexity.

pub mod polygon;

pub use polygon::{approximate_polygon, is_convex};
