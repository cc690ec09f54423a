// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all basie-related errors. This should be the *only* error
//! enum that is publicly visible from the command line.

use thiserror::Error;

use crate::{
    config::ConfigError,
    schedule::{ScheduleError, ScheduleWriteError},
    target::TargetParseError,
};

const URL: &str = "http://www.ira.inaf.it/~bartolini/schedulecreator/";

/// The *only* publicly visible error from the basie binary. Each error
/// message should point the user at the documentation, unless it's
/// "generic".
#[derive(Error, Debug)]
pub enum BasieError {
    /// An error in the schedule configuration file.
    #[error("{0}\n\nCompare your configuration with the one written by 'basie templates'. See for more info: {URL}")]
    Config(String),

    /// An error in the target file.
    #[error("{0}\n\nEach target line reads: LABEL SCANTYPE BACKEND FRAME LON LAT [key=value ...]. See for more info: {URL}")]
    Targets(String),

    /// The configuration was read, but the schedule it describes can't be
    /// observed.
    #[error("{0}\n\nSee for more info: {URL}")]
    Schedule(String),

    /// An error writing schedule files.
    #[error("{0}\n\nSee for more info: {URL}")]
    Write(String),

    /// A generic error that can't be clarified further with documentation,
    /// e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<ConfigError> for BasieError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Schedule(e) => Self::from(e),
            ConfigError::Targets(e) => Self::from(e),
            ConfigError::IO { .. } => Self::Generic(e.to_string()),
            ConfigError::UnknownFileType { .. }
            | ConfigError::Parse { .. }
            | ConfigError::InvalidAxis { .. }
            | ConfigError::InvalidStartPoint { .. }
            | ConfigError::NonPositive { .. }
            | ConfigError::Sampling { .. }
            | ConfigError::ZeroOffsetInterleave { .. }
            | ConfigError::SequenceElement { .. }
            | ConfigError::EmptySequence { .. }
            | ConfigError::OutputFormat(_) => Self::Config(e.to_string()),
        }
    }
}

impl From<ScheduleError> for BasieError {
    fn from(e: ScheduleError) -> Self {
        match e {
            ScheduleError::Target(e) => Self::from(e),
            ScheduleError::Receiver(_)
            | ScheduleError::UnknownScanType(_)
            | ScheduleError::UnknownBackend(_)
            | ScheduleError::InvalidBandwidth { .. } => Self::Config(e.to_string()),
            _ => Self::Schedule(e.to_string()),
        }
    }
}

impl From<TargetParseError> for BasieError {
    fn from(e: TargetParseError) -> Self {
        match e {
            TargetParseError::IO { .. } => Self::Generic(e.to_string()),
            _ => Self::Targets(e.to_string()),
        }
    }
}

impl From<ScheduleWriteError> for BasieError {
    fn from(e: ScheduleWriteError) -> Self {
        match e {
            ScheduleWriteError::FileExists(_) => Self::Write(e.to_string()),
            ScheduleWriteError::CreateDir { .. } | ScheduleWriteError::Write { .. } => {
                Self::Generic(e.to_string())
            }
        }
    }
}

impl From<std::io::Error> for BasieError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
