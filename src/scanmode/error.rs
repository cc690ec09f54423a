// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::{angle::Angle, coord::Frame};

/// Scan geometries that cannot be realised.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScanError {
    #[error("Map spacing must be a positive angle, but got {0}")]
    NonPositiveSpacing(Angle),

    #[error("A spacing of {spacing} does not fit any sample within the feed interleave of {interleave}")]
    ZeroScansPerInterleave { spacing: Angle, interleave: Angle },

    #[error("Nodding needs a multi-feed receiver, but {0} has a single feed")]
    NoddingSingleFeed(String),

    #[error("Cannot perform nodding on target {label}: it carries offsets in the {frame} frame")]
    NoddingOffset { label: String, frame: Frame },
}
