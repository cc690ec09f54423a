// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::SubscanPair;
use crate::{
    angle::Angle,
    coord::{Direction, Frame, ScanAxis},
    receiver::Receiver,
    schedule::ScheduleError,
    subscan::{get_cen_otf_tsys, IdCounter, OtfLeg},
    target::Target,
};

const CROSS_LEGS: [(ScanAxis, Direction); 4] = [
    (ScanAxis::Lon, Direction::Inc),
    (ScanAxis::Lon, Direction::Dec),
    (ScanAxis::Lat, Direction::Inc),
    (ScanAxis::Lat, Direction::Dec),
];

const POINT_LEGS: [(ScanAxis, Direction); 2] = [
    (ScanAxis::Lon, Direction::Inc),
    (ScanAxis::Lat, Direction::Inc),
];

/// Four OTF sweeps across the target, two along each axis in opposite
/// directions.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossScan {
    pub frame: Frame,
    pub length: Angle,

    /// \[deg/min\]
    pub speed: f64,
}

/// Like a [`CrossScan`], but a single increasing sweep along each axis.
#[derive(Debug, Clone, PartialEq)]
pub struct PointScan {
    pub frame: Frame,
    pub length: Angle,

    /// \[deg/min\]
    pub speed: f64,
}

impl CrossScan {
    /// Duration of every sweep \[seconds\].
    pub fn duration(&self) -> f64 {
        self.length.deg() / self.speed * 60.0
    }

    pub(super) fn do_scan(
        &self,
        ids: &mut IdCounter,
        target: &Target,
        receiver: &Receiver,
        frequency: f64,
    ) -> Result<Vec<SubscanPair>, ScheduleError> {
        sweep_legs(
            ids,
            target,
            receiver.get_beamsize(frequency),
            &CROSS_LEGS,
            (self.frame, self.length, self.duration()),
        )
    }
}

impl PointScan {
    /// Duration of every sweep \[seconds\].
    pub fn duration(&self) -> f64 {
        self.length.deg() / self.speed * 60.0
    }

    pub(super) fn do_scan(
        &self,
        ids: &mut IdCounter,
        target: &Target,
        receiver: &Receiver,
        frequency: f64,
    ) -> Result<Vec<SubscanPair>, ScheduleError> {
        sweep_legs(
            ids,
            target,
            receiver.get_beamsize(frequency),
            &POINT_LEGS,
            (self.frame, self.length, self.duration()),
        )
    }
}

fn sweep_legs(
    ids: &mut IdCounter,
    target: &Target,
    beamsize: Angle,
    legs: &[(ScanAxis, Direction)],
    (scan_frame, length, duration): (Frame, Angle, f64),
) -> Result<Vec<SubscanPair>, ScheduleError> {
    legs.iter()
        .map(|&(const_axis, direction)| {
            let leg = OtfLeg {
                duration,
                length,
                offset: Angle::zero(),
                const_axis,
                direction,
                scan_frame,
            };
            get_cen_otf_tsys(ids, target, &leg, beamsize)
        })
        .collect()
}
