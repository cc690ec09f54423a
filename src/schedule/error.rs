// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

use crate::{
    coord::{CoordinateError, Frame},
    procedure::ProcedureError,
    receiver::ReceiverError,
    scanmode::ScanError,
    target::TargetParseError,
};

/// General schedule misconfiguration. Every other core error kind converts
/// into this one.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("A subscan cannot be both a Tsys and a calibration subscan")]
    TsysAndCal,

    #[error("Target offset frame {offset} does not match the scan frame {scan}")]
    OffsetFrameMismatch { offset: Frame, scan: Frame },

    #[error("Cannot scan a target given in {target} coordinates in the {scan} frame")]
    IncompatibleFrames { target: Frame, scan: Frame },

    #[error("Unknown scan type '{0}'")]
    UnknownScanType(String),

    #[error("Unknown backend '{0}'")]
    UnknownBackend(String),

    #[error("Target {target} asks for Tsys measurements but backend {backend} cannot perform them")]
    TsysNotSupported { target: String, backend: String },

    #[error("Invalid bandwidth {bandwidth} MHz for backend {backend}; valid values are {valid:?}")]
    InvalidBandwidth {
        backend: String,
        bandwidth: f64,
        valid: &'static [f64],
    },

    #[error(transparent)]
    Coordinate(#[from] CoordinateError),

    #[error(transparent)]
    Receiver(#[from] ReceiverError),

    #[error(transparent)]
    Procedure(#[from] ProcedureError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Target(#[from] TargetParseError),
}

#[derive(Error, Debug)]
pub enum ScheduleWriteError {
    #[error("Output file {0} already exists; use --force to overwrite it")]
    FileExists(PathBuf),

    #[error("Couldn't create the output directory {dir}: {err}")]
    CreateDir { dir: PathBuf, err: std::io::Error },

    #[error("Couldn't write {file}: {err}")]
    Write { file: PathBuf, err: std::io::Error },
}
