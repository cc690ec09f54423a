// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::SubscanPair;
use crate::{
    angle::Angle,
    coord::{Coord, Frame},
    schedule::ScheduleError,
    subscan::{get_sidereal, get_skydip_tsys, get_tsys, IdCounter},
    target::Target,
};

/// An elevation sweep near the target, after pointing at it.
#[derive(Debug, Clone, PartialEq)]
pub struct SkydipScan {
    /// Starting elevation.
    pub start: Angle,

    /// Final elevation.
    pub stop: Angle,

    /// \[seconds\]
    pub duration: f64,

    /// Where the skydip is performed, relative to the target.
    pub offset: Coord,
}

impl SkydipScan {
    pub fn new(start: Angle, stop: Angle, duration: f64) -> SkydipScan {
        SkydipScan {
            start,
            stop,
            duration,
            offset: Coord::from_degrees(Frame::Hor, 1.0, 0.0),
        }
    }

    pub(super) fn do_scan(
        &self,
        ids: &mut IdCounter,
        target: &Target,
    ) -> Result<Vec<SubscanPair>, ScheduleError> {
        let here = Coord::new(target.coord.frame, Angle::zero(), Angle::zero());
        let st = get_tsys(ids, target, &here)?;
        let ss = get_sidereal(ids, target, &here, 0.0, false)?;
        let pointing_id = ss.id;
        let skydip = get_skydip_tsys(
            ids,
            pointing_id,
            target,
            self.duration,
            (self.start, self.stop),
            &self.offset,
        )?;
        Ok(vec![(ss, st), skydip])
    }
}
