// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::angle::AngleFormatError;

#[derive(Error, Debug)]
pub enum TargetParseError {
    #[error("Invalid target line: '{0}'")]
    InvalidLine(String),

    #[error("Invalid value '{value}' for option '{option}': {reason}")]
    InvalidOption {
        option: String,
        value: String,
        reason: String,
    },

    #[error("Target {label}: {reason}")]
    Inconsistent { label: String, reason: String },

    #[error(transparent)]
    Angle(#[from] AngleFormatError),

    #[error("Couldn't read target file {file}: {err}")]
    IO { file: String, err: std::io::Error },
}
