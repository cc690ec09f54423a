// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Angles that remember how they should be written out.
//!
//! Internally every [`Angle`] is a number of degrees. The [`AngleFormat`] only
//! affects how the angle is displayed; arithmetic keeps the format of the left
//! operand and comparisons ignore the format entirely.

mod error;
#[cfg(test)]
mod tests;

pub use error::AngleFormatError;

use std::{
    cmp::Ordering,
    fmt::Display,
    ops::{Add, Div, Mul, Neg, Sub},
    str::FromStr,
};

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use crate::constants::ANGLE_DECIMALS;

lazy_static! {
    static ref DECIMAL_RE: Regex = Regex::new(r"(?i)^([+-]?\d+(?:\.\d+)?)d$").unwrap();
    static ref DMS_RE: Regex =
        Regex::new(r"^([+-]?)(\d{1,3}):(\d{2}):(\d{2}(?:\.\d+)?)$").unwrap();
    static ref HMS_RE: Regex =
        Regex::new(r"(?i)^([+-]?)([0-2]?\d):(\d{2}):(\d{2}(?:\.\d+)?)h$").unwrap();
}

/// How an [`Angle`] is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleFormat {
    /// e.g. `12.5000d`
    Decimal,

    /// e.g. `-12:30:00.0000`
    SexagesimalDegrees,

    /// e.g. `00:50:00.0000h`
    SexagesimalHours,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(try_from = "String")]
pub struct Angle {
    deg: f64,
    format: AngleFormat,
}

impl Angle {
    pub fn new(deg: f64, format: AngleFormat) -> Angle {
        Angle { deg, format }
    }

    /// A decimal-degrees angle.
    pub fn from_degrees(deg: f64) -> Angle {
        Angle::new(deg, AngleFormat::Decimal)
    }

    pub fn zero() -> Angle {
        Angle::from_degrees(0.0)
    }

    /// Build an angle from sexagesimal degrees. The sign applies to the whole
    /// angle, so -00:00:03 is representable.
    pub fn from_dms(
        negative: bool,
        degrees: u32,
        minutes: u32,
        seconds: f64,
    ) -> Result<Angle, AngleFormatError> {
        check_minutes_seconds(minutes, seconds)?;
        let abs = f64::from(degrees) + f64::from(minutes) / 60.0 + seconds / 3600.0;
        Ok(Angle::new(
            if negative { -abs } else { abs },
            AngleFormat::SexagesimalDegrees,
        ))
    }

    /// Build an angle from sexagesimal hours.
    pub fn from_hms(
        negative: bool,
        hours: u32,
        minutes: u32,
        seconds: f64,
    ) -> Result<Angle, AngleFormatError> {
        if hours >= 24 {
            return Err(AngleFormatError::HoursOutOfRange(hours));
        }
        check_minutes_seconds(minutes, seconds)?;
        let abs =
            (f64::from(hours) + f64::from(minutes) / 60.0 + seconds / 3600.0) * 15.0;
        Ok(Angle::new(
            if negative { -abs } else { abs },
            AngleFormat::SexagesimalHours,
        ))
    }

    pub fn deg(&self) -> f64 {
        self.deg
    }

    pub fn rad(&self) -> f64 {
        self.deg.to_radians()
    }

    pub fn format(&self) -> AngleFormat {
        self.format
    }

    /// The same value, displayed differently.
    pub fn with_format(self, format: AngleFormat) -> Angle {
        Angle { format, ..self }
    }

    pub fn is_zero(&self) -> bool {
        self.deg == 0.0
    }

    pub fn abs(self) -> Angle {
        Angle {
            deg: self.deg.abs(),
            ..self
        }
    }

    /// Parse an angle string. The decimal form (`10.5d`) is tried first, then
    /// sexagesimal degrees (`-10:30:00`) and finally sexagesimal hours
    /// (`01:00:00h`).
    pub fn parse(s: &str) -> Result<Angle, AngleFormatError> {
        let s = s.trim();
        if let Some(caps) = DECIMAL_RE.captures(s) {
            let deg: f64 = caps[1]
                .parse()
                .map_err(|_| AngleFormatError::Unrecognised(s.to_string()))?;
            return Ok(Angle::from_degrees(deg));
        }

        if let Some(caps) = DMS_RE.captures(s) {
            let (d, m, sec) = sexagesimal_fields(s, &caps[2], &caps[3], &caps[4])?;
            return Angle::from_dms(&caps[1] == "-", d, m, sec);
        }

        if let Some(caps) = HMS_RE.captures(s) {
            let (h, m, sec) = sexagesimal_fields(s, &caps[2], &caps[3], &caps[4])?;
            return Angle::from_hms(&caps[1] == "-", h, m, sec);
        }

        Err(AngleFormatError::Unrecognised(s.to_string()))
    }
}

fn check_minutes_seconds(minutes: u32, seconds: f64) -> Result<(), AngleFormatError> {
    if minutes >= 60 {
        return Err(AngleFormatError::MinutesOutOfRange(minutes));
    }
    if !(0.0..60.0).contains(&seconds) {
        return Err(AngleFormatError::SecondsOutOfRange(seconds));
    }
    Ok(())
}

fn sexagesimal_fields(
    input: &str,
    first: &str,
    minutes: &str,
    seconds: &str,
) -> Result<(u32, u32, f64), AngleFormatError> {
    let err = || AngleFormatError::Unrecognised(input.to_string());
    Ok((
        first.parse().map_err(|_| err())?,
        minutes.parse().map_err(|_| err())?,
        seconds.parse().map_err(|_| err())?,
    ))
}

/// Split a non-negative value into (whole, minutes, seconds), rounding the
/// seconds to [`ANGLE_DECIMALS`] places before carrying.
fn split_sexagesimal(value: f64) -> (u64, u64, f64) {
    let scale = 10_u64.pow(ANGLE_DECIMALS as u32);
    let units = (value * 3600.0 * scale as f64).round() as u64;
    let whole = units / (3600 * scale);
    let rem = units % (3600 * scale);
    let minutes = rem / (60 * scale);
    let seconds = (rem % (60 * scale)) as f64 / scale as f64;
    (whole, minutes, seconds)
}

impl Display for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prec = ANGLE_DECIMALS;
        let width = prec + 3;
        match self.format {
            AngleFormat::Decimal => write!(f, "{:.prec$}d", self.deg),
            AngleFormat::SexagesimalDegrees | AngleFormat::SexagesimalHours => {
                let (value, suffix) = match self.format {
                    AngleFormat::SexagesimalHours => (self.deg / 15.0, "h"),
                    _ => (self.deg, ""),
                };
                let (whole, minutes, seconds) = split_sexagesimal(value.abs());
                let sign = if value < 0.0 && (whole, minutes, seconds) != (0, 0, 0.0) {
                    "-"
                } else {
                    ""
                };
                write!(
                    f,
                    "{sign}{whole:02}:{minutes:02}:{seconds:0width$.prec$}{suffix}"
                )
            }
        }
    }
}

impl FromStr for Angle {
    type Err = AngleFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Angle::parse(s)
    }
}

impl TryFrom<String> for Angle {
    type Error = AngleFormatError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Angle::parse(&s)
    }
}

impl PartialEq for Angle {
    fn eq(&self, other: &Self) -> bool {
        self.deg == other.deg
    }
}

impl PartialOrd for Angle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.deg.partial_cmp(&other.deg)
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle::new(self.deg + rhs.deg, self.format)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle::new(self.deg - rhs.deg, self.format)
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle::new(-self.deg, self.format)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;

    fn mul(self, rhs: f64) -> Angle {
        Angle::new(self.deg * rhs, self.format)
    }
}

impl Div<f64> for Angle {
    type Output = Angle;

    fn div(self, rhs: f64) -> Angle {
        Angle::new(self.deg / rhs, self.format)
    }
}

/// Round up to the nearest odd integer, e.g. 4.2 -> 5, 3.2 -> 5, -4.2 -> -3.
pub fn ceil_to_odd(x: f64) -> i64 {
    let c = x.ceil() as i64;
    if c % 2 == 0 {
        c + 1
    } else {
        c
    }
}

/// Round up to the nearest multiple of one half.
pub fn ceil_to_half(x: f64) -> f64 {
    (x * 2.0).ceil() / 2.0
}
