// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for command-line users.
//
// Every technical error is mapped to plain English with a clear suggestion.

use crate::error::QuadscanError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The user can fix it (different photo, different settings, missing file).
    ActionRequired,
    /// Retrying with the same input will fail again.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary.
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    pub severity: Severity,
}

/// Convert a `QuadscanError` into a `HumanError`.
pub fn humanize_error(err: &QuadscanError) -> HumanError {
    match err {
        QuadscanError::InvalidInput { width, height } => HumanError {
            message: "The picture is empty.".into(),
            suggestion: format!(
                "The decoded image is {width}x{height} pixels. Check that the file is a complete photo."
            ),
            severity: Severity::ActionRequired,
        },

        QuadscanError::InvalidConfig(detail) => HumanError {
            message: "The detector settings are not valid.".into(),
            suggestion: format!("Fix the configuration file and try again. ({detail})"),
            severity: Severity::ActionRequired,
        },

        QuadscanError::DegenerateQuadrilateral(detail) => HumanError {
            message: "The corners do not describe a usable shape.".into(),
            suggestion: format!(
                "The four corners are collapsed or lie on one line. Pick four distinct corners. ({detail})"
            ),
            severity: Severity::Permanent,
        },

        QuadscanError::NoQuadrilateralFound { .. } => HumanError {
            message: "No document or screen outline was found.".into(),
            suggestion: "Photograph the object against a contrasting background with all four corners visible.".into(),
            severity: Severity::ActionRequired,
        },

        QuadscanError::ImageError(detail) => HumanError {
            message: "The picture could not be read or written.".into(),
            suggestion: format!("Use a PNG or JPEG file. ({detail})"),
            severity: Severity::Permanent,
        },

        QuadscanError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => HumanError {
                message: "The file was not found.".into(),
                suggestion: "Check the path and try again.".into(),
                severity: Severity::ActionRequired,
            },
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "Permission denied.".into(),
                suggestion: "Choose a folder you are allowed to write to.".into(),
                severity: Severity::ActionRequired,
            },
            _ => HumanError {
                message: "A file operation failed.".into(),
                suggestion: format!("{io_err}"),
                severity: Severity::Permanent,
            },
        },

        QuadscanError::Serialization(detail) => HumanError {
            message: "The configuration file is not valid JSON.".into(),
            suggestion: format!("{detail}"),
            severity: Severity::ActionRequired,
        },
    }
}
