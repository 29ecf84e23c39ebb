// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// One detection run: load, detect, write the outline and warped images.

use std::path::{Path, PathBuf};

use quadscan_core::DetectorConfig;
use quadscan_core::error::Result;
use quadscan_vision::{Detection, DetectionReport, RectangleDetector};
use tracing::{info, warn};

use crate::io::{load_rgb, output_paths, save_png};

/// Everything a run needs, already resolved from the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    /// Defaults to the input's directory.
    pub out_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub strict: bool,
}

/// What a run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub report: DetectionReport,
    pub outline_path: PathBuf,
    pub warped_path: PathBuf,
}

pub fn run(options: &RunOptions) -> Result<RunSummary> {
    let config = match &options.config {
        Some(path) => DetectorConfig::from_json_file(path)?,
        None => DetectorConfig::default(),
    };
    let detector = RectangleDetector::new(config)?;

    let image = load_rgb(&options.input)?;
    let detection = if options.strict {
        Detection::Found(detector.detect_strict(&image)?)
    } else {
        detector.detect(&image)?
    };

    let report = detection.report();
    if !report.found {
        warn!("No quadrilateral found; writing the input unchanged");
    }

    let out_dir = options
        .out_dir
        .clone()
        .unwrap_or_else(|| input_dir(&options.input));
    let (outline_path, warped_path) = output_paths(&options.input, &out_dir);

    let (annotated, warped) = detection.into_images(&image);
    save_png(&annotated, &outline_path)?;
    save_png(&warped, &warped_path)?;
    info!(
        outline = %outline_path.display(),
        warped = %warped_path.display(),
        "Outputs written"
    );

    Ok(RunSummary {
        report,
        outline_path,
        warped_path,
    })
}

fn input_dir(input: &Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
