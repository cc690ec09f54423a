// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use super::Frame;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinateError {
    #[error("Cannot convert coordinates from {from} to {to}; only EQ <-> GAL conversions are possible")]
    IllegalTransform { from: Frame, to: Frame },

    #[error("Cannot compare coordinates of different frames: {0} & {1}")]
    FrameMismatch(Frame, Frame),

    #[error("'{axis}' is not an axis of the {frame} frame")]
    UnknownAxis { axis: String, frame: Frame },
}
