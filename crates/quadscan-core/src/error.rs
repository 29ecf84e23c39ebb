// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Quadscan.

use thiserror::Error;

/// Top-level error type for all Quadscan operations.
#[derive(Debug, Error)]
pub enum QuadscanError {
    // -- Input errors --
    #[error("invalid input image: {width}x{height} has no pixels")]
    InvalidInput { width: u32, height: u32 },

    #[error("invalid detector configuration: {0}")]
    InvalidConfig(String),

    // -- Geometry errors --
    #[error("degenerate quadrilateral: {0}")]
    DegenerateQuadrilateral(String),

    #[error("no convex quadrilateral among the {candidates} largest contours")]
    NoQuadrilateralFound { candidates: usize },

    // -- Codec / persistence (CLI boundary) --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, QuadscanError>;
