// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! OTF and raster maps, and the sampling ladder they share.

use std::num::NonZeroUsize;

use itertools::Itertools;
use log::{debug, info, trace, warn};
use strum_macros::{Display, EnumString};

use super::{ScanError, SubscanPair};
use crate::{
    angle::{ceil_to_odd, Angle},
    coord::{Coord, Direction, Frame, ScanAxis},
    receiver::Receiver,
    schedule::ScheduleError,
    subscan::{get_cen_otf_tsys, get_off_tsys, get_sid_tsys, IdCounter, OtfLeg},
    target::Target,
};

/// The map corner where observation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum StartPoint {
    TL,
    TR,
    BL,
    BR,
}

impl StartPoint {
    fn is_top(self) -> bool {
        matches!(self, StartPoint::TL | StartPoint::TR)
    }

    fn is_left(self) -> bool {
        matches!(self, StartPoint::TL | StartPoint::BL)
    }
}

/// How densely a map is sampled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapSampling {
    /// A fraction of the beamsize.
    ScansPerBeam(NonZeroUsize),

    /// An explicit distance between samples.
    Spacing(Angle),
}

/// Whether the map sweeps or points; this changes the block stride used
/// with derotated multi-feed receivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapStyle {
    Otf,
    Raster,
}

/// The parameters common to both kinds of map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapGeometry {
    pub frame: Frame,
    pub start_point: StartPoint,

    /// The axis swept by OTF subscans, or walked first by raster maps.
    pub scan_axis: ScanAxis,
    pub length_x: Angle,
    pub length_y: Angle,
    pub sampling: MapSampling,
}

/// The result of [`compute_spacing`].
#[derive(Debug, Clone, PartialEq)]
pub struct MapSpacing {
    /// The beamsize used to place Tsys subscans. With the derotator
    /// optimisation this is the footprint of the whole feed array.
    pub beamsize: Angle,
    pub spacing: Angle,

    /// Ascending sample offsets along each axis.
    pub offsets_x: Vec<Angle>,
    pub offsets_y: Vec<Angle>,

    /// Samples fitting between two adjacent feeds; only set with the
    /// derotator optimisation.
    pub scans_per_interleave: Option<usize>,
}

impl MapSpacing {
    pub fn dimension_x(&self) -> usize {
        self.offsets_x.len()
    }

    pub fn dimension_y(&self) -> usize {
        self.offsets_y.len()
    }
}

/// Work out the sampling of a map for a receiver observing at `frequency`.
///
/// Single-feed receivers (and multi-feed ones without a derotator) sample
/// each axis with an odd number of points, centred on zero, spanning at
/// least the map length.
///
/// With a derotated multi-feed receiver, the spacing is adjusted so that a
/// whole number of samples fits in the feed interleave. Samples come in
/// blocks of that many; blocks are separated by the feed footprint plus one
/// interleave for OTF maps, and by the footprint alone for raster maps. The
/// blocks are centred on zero and, widened by the footprint, cover the map.
pub fn compute_spacing(
    map: &MapGeometry,
    style: MapStyle,
    receiver: &Receiver,
    frequency: f64,
) -> Result<MapSpacing, ScanError> {
    let beamsize = receiver.get_beamsize(frequency);
    let requested = match map.sampling {
        MapSampling::ScansPerBeam(n) => beamsize / n.get() as f64,
        MapSampling::Spacing(s) => s,
    };
    if !(requested.deg() > 0.0 && requested.deg().is_finite()) {
        return Err(ScanError::NonPositiveSpacing(requested));
    }

    if !(receiver.is_multifeed() && receiver.has_derotator) {
        let spacing = Angle::from_degrees(requested.deg());
        let offsets_x = uniform_ladder(map.length_x, spacing);
        let offsets_y = uniform_ladder(map.length_y, spacing);
        debug!(
            "map dim_x {} dim_y {} spacing {spacing}",
            offsets_x.len(),
            offsets_y.len()
        );
        return Ok(MapSpacing {
            beamsize,
            spacing,
            offsets_x,
            offsets_y,
            scans_per_interleave: None,
        });
    }

    info!("applying multifeed derotator optimization for map generation");
    let interleave = receiver.interleave.deg();
    let ratio = interleave / requested.deg();
    let scans_per_interleave = ratio.round() as usize;
    if scans_per_interleave == 0 {
        return Err(ScanError::ZeroScansPerInterleave {
            spacing: requested,
            interleave: receiver.interleave,
        });
    }
    if (ratio - scans_per_interleave as f64).abs() > 1e-9 {
        warn!(
            "{ratio:.3} samples per feed interleave rounded to {scans_per_interleave}; map spacing is now {:.6} deg",
            interleave / scans_per_interleave as f64
        );
    }
    let spacing = interleave / scans_per_interleave as f64;
    let footprint = 2.0 * receiver.feed_extent.deg();
    let stride = match style {
        MapStyle::Otf => footprint + interleave + spacing,
        MapStyle::Raster => footprint,
    };
    let ladder = |length: Angle| {
        block_ladder(
            length.deg(),
            spacing,
            scans_per_interleave,
            footprint,
            stride,
        )
    };
    let offsets_x = ladder(map.length_x);
    let offsets_y = ladder(map.length_y);
    debug!(
        "derotated map dim_x {} dim_y {} spacing {spacing} stride {stride}",
        offsets_x.len(),
        offsets_y.len()
    );

    Ok(MapSpacing {
        beamsize: Angle::from_degrees(footprint),
        spacing: Angle::from_degrees(spacing),
        offsets_x,
        offsets_y,
        scans_per_interleave: Some(scans_per_interleave),
    })
}

fn uniform_ladder(length: Angle, spacing: Angle) -> Vec<Angle> {
    let step = spacing.deg();
    let mut dimension = ceil_to_odd(length.deg() / step);
    if ((dimension - 1) as f64) * step < length.deg() {
        dimension += 2;
    }
    let half = dimension / 2;
    (-half..=half)
        .map(|i| Angle::from_degrees(i as f64 * step))
        .collect()
}

fn block_ladder(
    length: f64,
    spacing: f64,
    per_block: usize,
    footprint: f64,
    stride: f64,
) -> Vec<Angle> {
    let block_width = (per_block - 1) as f64 * spacing;
    let uncovered = length - footprint - block_width;
    let nblocks = if uncovered > 0.0 {
        (uncovered / stride).ceil() as usize + 1
    } else {
        1
    };
    let start = -((nblocks - 1) as f64 * stride + block_width) / 2.0;
    (0..nblocks)
        .flat_map(|b| {
            (0..per_block)
                .map(move |i| Angle::from_degrees(start + b as f64 * stride + i as f64 * spacing))
        })
        .collect()
}

/// The x offsets in observing order, ascending meaning left to right on
/// the sky.
fn ordered_x(map: &MapGeometry, offsets: &[Angle]) -> Vec<Angle> {
    let mirrored = map.frame.axis_is_mirrored(ScanAxis::Lon);
    let ascending = map.start_point.is_left() != mirrored;
    if ascending {
        offsets.to_vec()
    } else {
        offsets.iter().rev().copied().collect()
    }
}

fn ordered_y(map: &MapGeometry, offsets: &[Angle]) -> Vec<Angle> {
    if map.start_point.is_top() {
        offsets.iter().rev().copied().collect()
    } else {
        offsets.to_vec()
    }
}

/// A map made of OTF sweeps along the scan axis, one per sample of the other
/// axis, in zig-zag order.
#[derive(Debug, Clone, PartialEq)]
pub struct OtfMapScan {
    pub map: MapGeometry,

    /// \[deg/min\]
    pub speed: f64,
}

impl OtfMapScan {
    /// Duration of sweeps along x \[seconds\].
    pub fn duration_x(&self) -> f64 {
        self.map.length_x.deg() / self.speed * 60.0
    }

    /// Duration of sweeps along y \[seconds\].
    pub fn duration_y(&self) -> f64 {
        self.map.length_y.deg() / self.speed * 60.0
    }

    pub(super) fn unit_subscans(
        &self,
        receiver: &Receiver,
        frequency: f64,
    ) -> Result<usize, ScanError> {
        let spacing = compute_spacing(&self.map, MapStyle::Otf, receiver, frequency)?;
        Ok(match self.map.scan_axis {
            ScanAxis::Lon => spacing.dimension_y(),
            ScanAxis::Lat => spacing.dimension_x(),
        })
    }

    pub(super) fn do_scan(
        &self,
        ids: &mut IdCounter,
        target: &Target,
        receiver: &Receiver,
        frequency: f64,
    ) -> Result<Vec<SubscanPair>, ScheduleError> {
        let map = &self.map;
        let spacing = compute_spacing(map, MapStyle::Otf, receiver, frequency)?;
        let mirrored = map.frame.axis_is_mirrored(ScanAxis::Lon);

        let (offsets, first, const_axis, length, duration) = match map.scan_axis {
            ScanAxis::Lon => {
                // Sweeping to the right increases a non-mirrored longitude.
                let first = if map.start_point.is_left() != mirrored {
                    Direction::Inc
                } else {
                    Direction::Dec
                };
                (
                    ordered_y(map, &spacing.offsets_y),
                    first,
                    ScanAxis::Lat,
                    map.length_x,
                    self.duration_x(),
                )
            }
            ScanAxis::Lat => {
                let first = if map.start_point.is_top() {
                    Direction::Dec
                } else {
                    Direction::Inc
                };
                (
                    ordered_x(map, &spacing.offsets_x),
                    first,
                    ScanAxis::Lon,
                    map.length_y,
                    self.duration_y(),
                )
            }
        };

        let directions = [first, first.reversed()];
        offsets
            .into_iter()
            .zip(directions.iter().cycle())
            .map(|(offset, &direction)| {
                trace!("OTF offset {offset} direction {direction}");
                let leg = OtfLeg {
                    duration,
                    length,
                    offset,
                    const_axis,
                    direction,
                    scan_frame: map.frame,
                };
                get_cen_otf_tsys(ids, target, &leg, spacing.beamsize)
            })
            .collect()
    }
}

/// Walk `inner` for every element of `outer`, reversing the walk on every
/// other element. Yields (outer, inner) couples.
fn zigzag<'a>(
    outer: &'a [Angle],
    inner: &'a [Angle],
) -> impl Iterator<Item = (Angle, Angle)> + 'a {
    outer.iter().enumerate().flat_map(move |(i, &o)| {
        let walk: Vec<Angle> = if i % 2 == 0 {
            inner.to_vec()
        } else {
            inner.iter().rev().copied().collect()
        };
        walk.into_iter().map(move |p| (o, p))
    })
}

/// A map made of pointed samples on a grid, visited in zig-zag order along
/// the scan axis.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterMapScan {
    pub map: MapGeometry,

    /// Time spent on each sample \[seconds\].
    pub duration: f64,

    /// When set, an extra off-source sample is taken before every n-th
    /// sample, starting with the first.
    pub offset_interleave: Option<NonZeroUsize>,
}

impl RasterMapScan {
    /// Grid points in observing order, and the four corners of the grid.
    pub fn sample_points(&self, spacing: &MapSpacing) -> (Vec<(Angle, Angle)>, Vec<(f64, f64)>) {
        let map = &self.map;
        let xs = ordered_x(map, &spacing.offsets_x);
        let ys = ordered_y(map, &spacing.offsets_y);

        let points = match map.scan_axis {
            ScanAxis::Lon => zigzag(&ys, &xs).map(|(y, x)| (x, y)).collect(),
            ScanAxis::Lat => zigzag(&xs, &ys).collect(),
        };

        let extremes = match (xs.first(), xs.last(), ys.first(), ys.last()) {
            (Some(x0), Some(x1), Some(y0), Some(y1)) => [x0.deg(), x1.deg()]
                .into_iter()
                .cartesian_product([y0.deg(), y1.deg()])
                .collect(),
            _ => vec![],
        };
        (points, extremes)
    }

    pub(super) fn unit_subscans(
        &self,
        receiver: &Receiver,
        frequency: f64,
    ) -> Result<usize, ScanError> {
        let spacing = compute_spacing(&self.map, MapStyle::Raster, receiver, frequency)?;
        let samples = spacing.dimension_x() * spacing.dimension_y();
        let offs = self
            .offset_interleave
            .map_or(0, |n| (samples + n.get() - 1) / n.get());
        Ok(samples + offs)
    }

    pub(super) fn do_scan(
        &self,
        ids: &mut IdCounter,
        target: &Target,
        receiver: &Receiver,
        frequency: f64,
    ) -> Result<Vec<SubscanPair>, ScheduleError> {
        let spacing = compute_spacing(&self.map, MapStyle::Raster, receiver, frequency)?;
        let (points, extremes) = self.sample_points(&spacing);

        let mut subscans = Vec::with_capacity(points.len());
        for (i, (x, y)) in points.into_iter().enumerate() {
            trace!("raster offset {x} {y}");
            let offset = Coord::new(self.map.frame, x, y);
            if let Some(n) = self.offset_interleave {
                if i % n.get() == 0 {
                    subscans.push(get_off_tsys(
                        ids,
                        target,
                        &offset,
                        &extremes,
                        self.duration,
                        spacing.beamsize,
                    )?);
                }
            }
            subscans.push(get_sid_tsys(
                ids,
                target,
                &offset,
                &extremes,
                self.duration,
                spacing.beamsize,
            )?);
        }
        Ok(subscans)
    }
}
