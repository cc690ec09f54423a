// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Coordinate frames and the axis vocabulary shared by scan modes.

use serde::Deserialize;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use super::CoordinateError;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(try_from = "String")]
pub enum Frame {
    /// Equatorial (J2000).
    #[strum(serialize = "EQ")]
    Eq,

    /// Galactic.
    #[strum(serialize = "GAL")]
    Gal,

    /// Horizontal (azimuth/elevation).
    #[strum(serialize = "HOR")]
    Hor,

    /// Used where no frame has been decided yet.
    #[strum(serialize = "NULL")]
    Null,
}

impl Frame {
    pub fn lon_name(self) -> &'static str {
        match self {
            Frame::Eq => "RA",
            Frame::Gal => "LON",
            Frame::Hor => "AZ",
            Frame::Null => "NULL",
        }
    }

    pub fn lat_name(self) -> &'static str {
        match self {
            Frame::Eq => "DEC",
            Frame::Gal => "LAT",
            Frame::Hor => "EL",
            Frame::Null => "NULL",
        }
    }

    /// The label used for offsets expressed in this frame.
    pub fn offset_name(self) -> &'static str {
        match self {
            Frame::Eq => "-EQOFFS",
            Frame::Gal => "-GALOFFS",
            Frame::Hor => "-HOROFFS",
            Frame::Null => "-NULLOFFS",
        }
    }

    /// Does increasing the coordinate along `axis` move the other way on the
    /// sky compared with the horizontal frame? This is the case for right
    /// ascension and galactic longitude.
    pub fn axis_is_mirrored(self, axis: ScanAxis) -> bool {
        matches!(
            (self, axis),
            (Frame::Eq, ScanAxis::Lon) | (Frame::Gal, ScanAxis::Lon)
        )
    }
}

impl TryFrom<String> for Frame {
    type Error = strum::ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// One of the two coordinate axes of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ScanAxis {
    #[strum(serialize = "LON")]
    Lon,

    #[strum(serialize = "LAT")]
    Lat,
}

impl ScanAxis {
    /// The perpendicular axis.
    pub fn other(self) -> ScanAxis {
        match self {
            ScanAxis::Lon => ScanAxis::Lat,
            ScanAxis::Lat => ScanAxis::Lon,
        }
    }

    /// Interpret an axis name. Generic names (LON, LAT) are always accepted,
    /// frame-specific names (RA, DEC, AZ, EL) are resolved against `frame`.
    pub fn from_name(name: &str, frame: Frame) -> Result<ScanAxis, CoordinateError> {
        let upper = name.trim().to_uppercase();
        match upper.as_str() {
            "LON" => Ok(ScanAxis::Lon),
            "LAT" => Ok(ScanAxis::Lat),
            n if n == frame.lon_name() => Ok(ScanAxis::Lon),
            n if n == frame.lat_name() => Ok(ScanAxis::Lat),
            _ => Err(CoordinateError::UnknownAxis {
                axis: name.to_string(),
                frame,
            }),
        }
    }
}

/// The sense in which an OTF subscan sweeps its axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Direction {
    #[strum(serialize = "INC")]
    Inc,

    #[strum(serialize = "DEC")]
    Dec,
}

impl Direction {
    pub fn reversed(self) -> Direction {
        match self {
            Direction::Inc => Direction::Dec,
            Direction::Dec => Direction::Inc,
        }
    }
}
