// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Functions building subscans, most of them in (science, Tsys) couples.
//!
//! Where a couple is built, the Tsys subscan takes its ID first, so that the
//! IDs seen in a schedule (where a Tsys subscan always precedes its science
//! subscan) increase monotonically.

use log::{debug, warn};

use super::{IdCounter, Subscan, SubscanKind};
use crate::{
    angle::Angle,
    constants::TSYS_SIGMA,
    coord::{Coord, Direction, Frame, ScanAxis},
    schedule::ScheduleError,
    target::Target,
};

/// Geometry of a single centred OTF sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OtfLeg {
    /// \[seconds\]
    pub duration: f64,

    /// Length of the sweep.
    pub length: Angle,

    /// Offset of the sweep along the constant axis.
    pub offset: Angle,
    pub const_axis: ScanAxis,
    pub direction: Direction,
    pub scan_frame: Frame,
}

/// A sidereal subscan pointing at the target plus `offset`.
pub fn get_sidereal(
    ids: &mut IdCounter,
    target: &Target,
    offset: &Coord,
    duration: f64,
    is_cal: bool,
) -> Result<Subscan, ScheduleError> {
    Subscan::new(
        ids,
        target.shifted(offset)?,
        duration,
        false,
        is_cal,
        SubscanKind::Sidereal,
    )
}

/// A zero-length sidereal subscan labelled "Tsys", followed by the TSYS
/// procedure.
pub fn get_tsys(
    ids: &mut IdCounter,
    target: &Target,
    offset: &Coord,
) -> Result<Subscan, ScheduleError> {
    let mut tsys_target = target.shifted(offset)?;
    tsys_target.label = "Tsys".to_string();
    Subscan::new(ids, tsys_target, 0.0, true, false, SubscanKind::Sidereal)
}

/// An OTF subscan with description CEN: the sweep is centred on the target,
/// shifted by `leg.offset` along the constant axis.
///
/// The target's offset frame must be the scan frame; a null offset frame is
/// taken to be the scan frame. The target's own frame must also be the scan
/// frame, except for an equatorial target scanned in the horizontal frame.
pub fn get_cen_otf(
    ids: &mut IdCounter,
    target: &Target,
    leg: &OtfLeg,
) -> Result<Subscan, ScheduleError> {
    let mut offset = target.offset;
    if offset.frame == Frame::Null {
        offset.frame = leg.scan_frame;
    }
    if offset.frame != leg.scan_frame {
        return Err(ScheduleError::OffsetFrameMismatch {
            offset: offset.frame,
            scan: leg.scan_frame,
        });
    }
    if target.coord.frame != leg.scan_frame {
        warn!(
            "Target {}: scan frame {} and coordinate frame {} are different",
            target.label, leg.scan_frame, target.coord.frame
        );
        if !(target.coord.frame == Frame::Eq && leg.scan_frame == Frame::Hor) {
            return Err(ScheduleError::IncompatibleFrames {
                target: target.coord.frame,
                scan: leg.scan_frame,
            });
        }
    }

    let (offset, lon2, lat2) = match leg.const_axis {
        ScanAxis::Lon => (
            offset.with_lon(offset.lon + leg.offset),
            Angle::zero(),
            leg.length,
        ),
        ScanAxis::Lat => (
            offset.with_lat(offset.lat + leg.offset),
            leg.length,
            Angle::zero(),
        ),
    };
    debug!("CEN OTF offset: {offset}");

    Subscan::new(
        ids,
        Target {
            offset,
            ..target.clone()
        },
        leg.duration,
        false,
        false,
        SubscanKind::Otf {
            lon2,
            lat2,
            descr: "CEN".to_string(),
            scan_frame: leg.scan_frame,
            geom: leg.const_axis,
            direction: leg.direction,
        },
    )
}

/// A CEN OTF subscan and its Tsys subscan. The Tsys is measured
/// `length / 2 + beamsize * TSYS_SIGMA` beyond the start of the sweep.
pub fn get_cen_otf_tsys(
    ids: &mut IdCounter,
    target: &Target,
    leg: &OtfLeg,
    beamsize: Angle,
) -> Result<(Subscan, Subscan), ScheduleError> {
    let far = leg.length.deg() / 2.0 + beamsize.deg() * TSYS_SIGMA;
    let swept = Angle::from_degrees(match leg.direction {
        Direction::Inc => -far,
        Direction::Dec => far,
    });
    let tsys_offset = match leg.const_axis {
        ScanAxis::Lat => Coord::new(leg.scan_frame, swept, leg.offset),
        ScanAxis::Lon => Coord::new(leg.scan_frame, leg.offset, swept),
    };

    let st = get_tsys(ids, target, &tsys_offset)?;
    let ss = get_cen_otf(ids, target, leg)?;
    Ok((ss, st))
}

/// A sidereal subscan at `offset` and a Tsys subscan just outside the
/// rectangle spanned by `extremes`.
pub fn get_sid_tsys(
    ids: &mut IdCounter,
    target: &Target,
    offset: &Coord,
    extremes: &[(f64, f64)],
    duration: f64,
    beamsize: Angle,
) -> Result<(Subscan, Subscan), ScheduleError> {
    let tsys_offset = extruded(offset, extremes, beamsize);
    let st = get_tsys(ids, target, &tsys_offset)?;
    let ss = get_sidereal(ids, target, offset, duration, false)?;
    Ok((ss, st))
}

/// Like [`get_sid_tsys`], but the sidereal subscan is also taken outside the
/// rectangle, at the same position as the Tsys.
pub fn get_off_tsys(
    ids: &mut IdCounter,
    target: &Target,
    offset: &Coord,
    extremes: &[(f64, f64)],
    duration: f64,
    beamsize: Angle,
) -> Result<(Subscan, Subscan), ScheduleError> {
    let off = extruded(offset, extremes, beamsize);
    let st = get_tsys(ids, target, &off)?;
    let ss = get_sidereal(ids, target, &off, duration, false)?;
    Ok((ss, st))
}

/// A skydip subscan referring to the subscan `target_subscan`, and a Tsys
/// subscan at the skydip position.
pub fn get_skydip_tsys(
    ids: &mut IdCounter,
    target_subscan: usize,
    target: &Target,
    duration: f64,
    (start, stop): (Angle, Angle),
    offset: &Coord,
) -> Result<(Subscan, Subscan), ScheduleError> {
    let st = get_tsys(ids, target, offset)?;
    let ss = Subscan::new(
        ids,
        target.shifted(offset)?,
        duration,
        false,
        false,
        SubscanKind::Skydip {
            target_subscan,
            start,
            stop,
        },
    )?;
    Ok((ss, st))
}

fn extruded(offset: &Coord, extremes: &[(f64, f64)], beamsize: Angle) -> Coord {
    let (x, y) = extrude_from_rectangle(
        offset.lon.deg(),
        offset.lat.deg(),
        extremes,
        beamsize.deg() * TSYS_SIGMA,
    );
    Coord::from_degrees(offset.frame, x, y)
}

/// Move the point (`x`, `y`) `delta` beyond the nearest side of the rectangle
/// whose corners are `extremes`. The point only moves along the axis of the
/// nearest side. A point lying on a side is pushed outwards: left or down
/// when no corner lies further left (down), right or up otherwise.
pub fn extrude_from_rectangle(x: f64, y: f64, extremes: &[(f64, f64)], delta: f64) -> (f64, f64) {
    let nearest = |values: &mut dyn Iterator<Item = f64>, v: f64| {
        values.min_by(|a, b| (a - v).abs().total_cmp(&(b - v).abs()))
    };
    let (Some(edge_x), Some(edge_y)) = (
        nearest(&mut extremes.iter().map(|e| e.0), x),
        nearest(&mut extremes.iter().map(|e| e.1), y),
    ) else {
        return (x, y);
    };

    let push = |edge: f64, v: f64, smaller_exists: bool| {
        if edge < v {
            edge - delta
        } else if edge > v {
            edge + delta
        } else if smaller_exists {
            edge + delta
        } else {
            edge - delta
        }
    };

    if (edge_x - x).abs() <= (edge_y - y).abs() {
        let smaller = extremes.iter().any(|e| e.0 < edge_x);
        (push(edge_x, x, smaller), y)
    } else {
        let smaller = extremes.iter().any(|e| e.1 < edge_y);
        (x, push(edge_y, y, smaller))
    }
}
