// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Coordinates tied to a frame.
//!
//! [`Coord`] is a small `Copy` value; every operation returns a new value
//! instead of mutating in place. A coordinate whose components are both zero
//! is "null" and acts as the identity for addition regardless of its frame.

mod error;
mod frame;

pub use error::CoordinateError;
pub use frame::{Direction, Frame, ScanAxis};

use std::{cmp::Ordering, fmt::Display};

use log::trace;

use crate::{
    angle::Angle,
    constants::{DEFAULT_EPOCH, EQ_TO_GAL},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Epoch {
    #[default]
    J2000,
}

impl Display for Epoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Epoch::J2000 => write!(f, "{DEFAULT_EPOCH}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    pub frame: Frame,
    pub lon: Angle,
    pub lat: Angle,
    pub epoch: Epoch,
}

impl Coord {
    pub fn new(frame: Frame, lon: Angle, lat: Angle) -> Coord {
        Coord {
            frame,
            lon,
            lat,
            epoch: Epoch::default(),
        }
    }

    /// Convenience constructor from decimal degrees.
    pub fn from_degrees(frame: Frame, lon: f64, lat: f64) -> Coord {
        Coord::new(frame, Angle::from_degrees(lon), Angle::from_degrees(lat))
    }

    /// The zero coordinate in the null frame.
    pub fn null() -> Coord {
        Coord::new(Frame::Null, Angle::zero(), Angle::zero())
    }

    pub fn is_null(&self) -> bool {
        self.lon.is_zero() && self.lat.is_zero()
    }

    /// The same coordinate with a different frame label; no conversion is
    /// performed.
    pub fn with_frame(self, frame: Frame) -> Coord {
        Coord { frame, ..self }
    }

    pub fn with_lon(self, lon: Angle) -> Coord {
        Coord { lon, ..self }
    }

    pub fn with_lat(self, lat: Angle) -> Coord {
        Coord { lat, ..self }
    }

    /// Both components negated.
    pub fn negated(self) -> Coord {
        Coord {
            lon: -self.lon,
            lat: -self.lat,
            ..self
        }
    }

    /// Bring `other` into a frame compatible with `self` for component-wise
    /// arithmetic. Returns the destination frame and the converted `other`.
    fn align(&self, other: &Coord) -> Result<(Frame, Coord), CoordinateError> {
        if self.frame == Frame::Null {
            Ok((other.frame, *other))
        } else if other.frame == Frame::Null {
            Ok((self.frame, *other))
        } else {
            Ok((self.frame, other.transform(self.frame)?))
        }
    }

    /// Component-wise addition. A null operand is returned unchanged as the
    /// other operand. A right operand in a different (non-null) frame is
    /// converted into `self`'s frame first.
    pub fn try_add(&self, other: &Coord) -> Result<Coord, CoordinateError> {
        if self.is_null() {
            return Ok(*other);
        }
        if other.is_null() {
            return Ok(*self);
        }
        let (frame, other) = self.align(other)?;
        Ok(Coord {
            frame,
            lon: self.lon + other.lon,
            lat: self.lat + other.lat,
            epoch: self.epoch,
        })
    }

    /// Component-wise subtraction, with the same frame rules as
    /// [`Coord::try_add`].
    pub fn try_sub(&self, other: &Coord) -> Result<Coord, CoordinateError> {
        if other.is_null() {
            return Ok(*self);
        }
        if self.is_null() {
            return Ok(other.negated());
        }
        let (frame, other) = self.align(other)?;
        Ok(Coord {
            frame,
            lon: self.lon - other.lon,
            lat: self.lat - other.lat,
            epoch: self.epoch,
        })
    }

    /// Lexicographic comparison on (lon, lat). Null-frame coordinates compare
    /// against any frame; otherwise the frames must match.
    pub fn try_cmp(&self, other: &Coord) -> Result<Ordering, CoordinateError> {
        if self.frame != other.frame && self.frame != Frame::Null && other.frame != Frame::Null {
            return Err(CoordinateError::FrameMismatch(self.frame, other.frame));
        }
        let ordering = self
            .lon
            .partial_cmp(&other.lon)
            .unwrap_or(Ordering::Equal)
            .then(self.lat.partial_cmp(&other.lat).unwrap_or(Ordering::Equal));
        Ok(ordering)
    }

    /// Convert into `dest`. Converting into the current frame is a no-op;
    /// only equatorial <-> galactic conversions are otherwise possible, as
    /// horizontal coordinates need a time and location.
    pub fn transform(&self, dest: Frame) -> Result<Coord, CoordinateError> {
        if dest == self.frame {
            return Ok(*self);
        }
        trace!("transform coordinates from {} to {}", self.frame, dest);
        let (lon, lat) = match (self.frame, dest) {
            (Frame::Eq, Frame::Gal) => rotate(&EQ_TO_GAL, false, self.lon.rad(), self.lat.rad()),
            (Frame::Gal, Frame::Eq) => rotate(&EQ_TO_GAL, true, self.lon.rad(), self.lat.rad()),
            (from, to) => return Err(CoordinateError::IllegalTransform { from, to }),
        };
        Ok(Coord {
            frame: dest,
            lon: Angle::from_degrees(lon.to_degrees().rem_euclid(360.0)),
            lat: Angle::from_degrees(lat.to_degrees()),
            epoch: self.epoch,
        })
    }
}

/// Rotate spherical coordinates (radians) by `m`, or by its transpose.
fn rotate(m: &[[f64; 3]; 3], transpose: bool, lon: f64, lat: f64) -> (f64, f64) {
    let v = [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()];
    let mut r = [0.0; 3];
    for (i, r) in r.iter_mut().enumerate() {
        *r = (0..3)
            .map(|j| {
                let mij = if transpose { m[j][i] } else { m[i][j] };
                mij * v[j]
            })
            .sum();
    }
    (r[1].atan2(r[0]), r[2].clamp(-1.0, 1.0).asin())
}

impl Default for Coord {
    fn default() -> Self {
        Coord::null()
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} lon: {} lat: {}", self.frame, self.lon, self.lat)
    }
}
