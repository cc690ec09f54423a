// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AngleFormatError {
    #[error("Could not parse '{0}' as an angle; expected e.g. '10.5d', '-10:30:00' or '01:00:00h'")]
    Unrecognised(String),

    #[error("Minutes must be in [0, 60), but got {0}")]
    MinutesOutOfRange(u32),

    #[error("Seconds must be in [0, 60), but got {0}")]
    SecondsOutOfRange(f64),

    #[error("Hours must be in [0, 24), but got {0}")]
    HoursOutOfRange(u32),
}
