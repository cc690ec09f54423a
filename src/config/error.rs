// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

use crate::{schedule::ScheduleError, target::TargetParseError};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file {file} doesn't have a recognised file extension; valid extensions are: {valid}")]
    UnknownFileType { file: PathBuf, valid: String },

    #[error("Couldn't read configuration file {file}: {err}")]
    IO { file: PathBuf, err: std::io::Error },

    #[error("Couldn't decode {kind} configuration from {file}:\n{err}")]
    Parse {
        file: PathBuf,
        kind: &'static str,
        err: String,
    },

    #[error("Scan type {scantype}: '{axis}' is not a valid scan axis")]
    InvalidAxis { scantype: String, axis: String },

    #[error("Scan type {scantype}: '{value}' is not a start point; use one of TL, TR, BL, BR")]
    InvalidStartPoint { scantype: String, value: String },

    #[error("Scan type {scantype}: {field} must be positive, but got {value}")]
    NonPositive {
        scantype: String,
        field: &'static str,
        value: f64,
    },

    #[error("Scan type {scantype}: give exactly one of scans_per_beam (at least 1) and spacing")]
    Sampling { scantype: String },

    #[error("Scan type {scantype}: offset_interleave must be at least 1")]
    ZeroOffsetInterleave { scantype: String },

    #[error("Scan type {scantype}: invalid sequence element '{element}'")]
    SequenceElement { scantype: String, element: String },

    #[error("Scan type {scantype}: the sequence is empty")]
    EmptySequence { scantype: String },

    #[error("Unsupported output format '{0}'; only 'fits' is supported")]
    OutputFormat(String),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Targets(#[from] TargetParseError),
}
