// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster module — edge maps and outline drawing.

pub mod annotate;
pub mod edges;

pub use annotate::draw_outline;
pub use edges::detect_edges;
