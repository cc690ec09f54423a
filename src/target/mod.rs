// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Observed targets and the target list parser.

mod error;
mod parser;
mod velocity;

pub use error::TargetParseError;
pub use parser::{parse_target_file, parse_target_line, parse_targets, TargetLine};
pub use velocity::{Velocity, VelocityDefinition, VelocityReference};

use std::fmt::Display;

use log::warn;

use crate::{
    angle::AngleFormat,
    coord::{Coord, Frame},
};

/// A source to observe, together with the offset from it at which the
/// antenna should point and any per-target overrides of the schedule
/// defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub label: String,
    pub coord: Coord,

    /// Added to `coord` by the antenna control system. Its frame is
    /// [`Frame::Null`] until a scan decides it.
    pub offset: Coord,

    pub velocity: Velocity,
    pub repetitions: Option<usize>,

    /// Negative: never measure Tsys. Zero: only at the beginning of the scan.
    /// Positive N: every N subscans.
    pub tsys: Option<i64>,
}

impl Target {
    pub fn new(label: &str, coord: Coord) -> Target {
        Target {
            label: label.to_string(),
            coord,
            offset: Coord::null(),
            velocity: Velocity::default(),
            repetitions: None,
            tsys: None,
        }
    }

    pub fn with_offset(self, offset: Coord) -> Target {
        Target { offset, ..self }
    }

    /// A copy whose offset has `extra` added.
    pub fn shifted(&self, extra: &Coord) -> Result<Target, crate::coord::CoordinateError> {
        Ok(Target {
            offset: self.offset.try_add(extra)?,
            ..self.clone()
        })
    }

    /// Check that the coordinates are in range for the frame.
    pub fn check_consistency(&self) -> Result<(), TargetParseError> {
        let err = |reason: &str| TargetParseError::Inconsistent {
            label: self.label.clone(),
            reason: reason.to_string(),
        };
        let (lon, lat) = (self.coord.lon.deg(), self.coord.lat.deg());

        if self.coord.frame == Frame::Hor && self.coord.lon.format() == AngleFormat::SexagesimalHours
        {
            return Err(err("horizontal frame does not accept longitude hours"));
        }
        if !(0.0..=360.0).contains(&lon) {
            return Err(err("longitude must be 0 <= lon <= 360"));
        }
        match self.coord.frame {
            Frame::Eq | Frame::Gal => {
                if !(-90.0..=90.0).contains(&lat) {
                    return Err(err("latitude must be -90 <= lat <= 90"));
                }
            }
            _ => {
                if !(0.0..=90.0).contains(&lat) {
                    return Err(err("latitude must be 0 <= lat <= 90"));
                }
            }
        }
        if self.coord.frame == Frame::Eq
            && self.coord.lon.format() == AngleFormat::SexagesimalDegrees
        {
            warn!(
                "Target {} specifies EQ frame but RA is not in hours",
                self.label
            );
        }
        Ok(())
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "target {} lon: {} lat: {}",
            self.label, self.coord.lon, self.coord.lat
        )
    }
}
