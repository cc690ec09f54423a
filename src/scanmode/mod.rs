// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Scan modes: the geometries that turn a target into subscans.
//!
//! Each variant knows how to compute the ordered (science, Tsys) subscan
//! couples of a single un-repeated pass over a target. Repetitions and Tsys
//! interleaving are applied later by [`crate::scan::Scan`].

mod cross;
mod error;
mod maps;
mod nodding;
mod onoff;
mod skydip;

pub use cross::{CrossScan, PointScan};
pub use error::ScanError;
pub use maps::{
    compute_spacing, MapGeometry, MapSampling, MapSpacing, MapStyle, OtfMapScan, RasterMapScan,
    StartPoint,
};
pub use nodding::{NoddingFeed, NoddingScan};
pub use onoff::{OnOffPosition, OnOffScan};
pub use skydip::SkydipScan;

use log::info;

use crate::{
    coord::Frame,
    receiver::Receiver,
    schedule::ScheduleError,
    subscan::{IdCounter, Subscan},
    target::Target,
};

/// A science subscan and the Tsys subscan measured for it.
pub type SubscanPair = (Subscan, Subscan);

/// One element of an on-off or nodding sequence, e.g. "3on" or "b_cal".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceElement<P> {
    pub repetitions: usize,
    pub position: P,
    pub is_cal: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScanModeKind {
    Cross(CrossScan),
    Point(PointScan),
    OtfMap(OtfMapScan),
    RasterMap(RasterMapScan),
    OnOff(OnOffScan),
    Nodding(NoddingScan),
    Skydip(SkydipScan),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanMode {
    pub id: usize,
    pub kind: ScanModeKind,
}

impl ScanMode {
    pub fn new(ids: &mut IdCounter, kind: ScanModeKind) -> ScanMode {
        ScanMode {
            id: ids.next_id(),
            kind,
        }
    }

    pub fn typename(&self) -> &'static str {
        match self.kind {
            ScanModeKind::Cross(_) => "CROSS",
            ScanModeKind::Point(_) => "POINT",
            ScanModeKind::OtfMap(_) => "OTF MAP",
            ScanModeKind::RasterMap(_) => "RASTER MAP",
            ScanModeKind::OnOff(_) => "ON OFF",
            ScanModeKind::Nodding(_) => "NODDING",
            ScanModeKind::Skydip(_) => "SKYDIP",
        }
    }

    /// The frame in which the offsets of this scan mode are expressed.
    /// [`Frame::Null`] for modes that adopt the target's frame.
    pub fn frame(&self) -> Frame {
        match &self.kind {
            ScanModeKind::Cross(c) => c.frame,
            ScanModeKind::Point(p) => p.frame,
            ScanModeKind::OtfMap(m) => m.map.frame,
            ScanModeKind::RasterMap(m) => m.map.frame,
            ScanModeKind::OnOff(_) | ScanModeKind::Nodding(_) | ScanModeKind::Skydip(_) => {
                Frame::Null
            }
        }
    }

    /// The number of subscan couples produced by one pass of
    /// [`ScanMode::do_scan`]. Maps need the receiver and frequencies to know
    /// their dimensions.
    pub fn unit_subscans(
        &self,
        receiver: &Receiver,
        frequencies: &[f64],
    ) -> Result<usize, ScheduleError> {
        let n = match &self.kind {
            ScanModeKind::Cross(_) => 4,
            ScanModeKind::Point(_) => 2,
            ScanModeKind::OtfMap(m) => m.unit_subscans(receiver, max_frequency(frequencies))?,
            ScanModeKind::RasterMap(m) => {
                m.unit_subscans(receiver, max_frequency(frequencies))?
            }
            ScanModeKind::OnOff(o) => o.sequence.iter().map(|el| el.repetitions).sum(),
            ScanModeKind::Nodding(n) => n.sequence.iter().map(|el| el.repetitions).sum(),
            ScanModeKind::Skydip(_) => 2,
        };
        Ok(n)
    }

    /// Compute the subscan couples of one pass over `target`. Only the
    /// largest of `frequencies` matters, as it gives the smallest beam.
    pub fn do_scan(
        &self,
        ids: &mut IdCounter,
        target: &Target,
        receiver: &Receiver,
        frequencies: &[f64],
    ) -> Result<Vec<SubscanPair>, ScheduleError> {
        info!(
            "scheduling {} (mode {}) on target {}",
            self.typename(),
            self.id,
            target.label
        );
        let frequency = max_frequency(frequencies);
        match &self.kind {
            ScanModeKind::Cross(c) => c.do_scan(ids, target, receiver, frequency),
            ScanModeKind::Point(p) => p.do_scan(ids, target, receiver, frequency),
            ScanModeKind::OtfMap(m) => m.do_scan(ids, target, receiver, frequency),
            ScanModeKind::RasterMap(m) => m.do_scan(ids, target, receiver, frequency),
            ScanModeKind::OnOff(o) => o.do_scan(ids, target),
            ScanModeKind::Nodding(n) => n.do_scan(ids, target, receiver),
            ScanModeKind::Skydip(s) => s.do_scan(ids, target),
        }
    }
}

/// The largest frequency, or 0 (meaning "the receiver's lowest") when there
/// are none.
pub(crate) fn max_frequency(frequencies: &[f64]) -> f64 {
    frequencies.iter().copied().fold(0.0, f64::max)
}
