// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use log::debug;

use super::{SequenceElement, SubscanPair};
use crate::{
    angle::Angle,
    coord::{Coord, Frame},
    schedule::ScheduleError,
    subscan::{get_sidereal, get_tsys, IdCounter},
    target::Target,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnOffPosition {
    On,
    Off,
}

/// Sidereal observations alternating between the target and a reference
/// position. Tsys is always measured at the reference position.
#[derive(Debug, Clone, PartialEq)]
pub struct OnOffScan {
    /// \[seconds\]
    pub duration: f64,
    pub offset_lon: Angle,
    pub offset_lat: Angle,

    /// [`Frame::Null`] means the frame of the target.
    pub offset_frame: Frame,
    pub sequence: Vec<SequenceElement<OnOffPosition>>,
}

impl OnOffScan {
    pub(super) fn do_scan(
        &self,
        ids: &mut IdCounter,
        target: &Target,
    ) -> Result<Vec<SubscanPair>, ScheduleError> {
        let frame = match self.offset_frame {
            Frame::Null => target.coord.frame,
            f => f,
        };
        let on = Coord::new(frame, Angle::zero(), Angle::zero());
        let off = Coord::new(frame, self.offset_lon, self.offset_lat);
        debug!("ON-OFF reference position {off}");

        let mut subscans = vec![];
        for element in &self.sequence {
            let position = match element.position {
                OnOffPosition::On => &on,
                OnOffPosition::Off => &off,
            };
            let st = get_tsys(ids, target, &off)?;
            let ss = get_sidereal(ids, target, position, self.duration, element.is_cal)?;
            subscans.extend(std::iter::repeat((ss, st)).take(element.repetitions));
        }
        Ok(subscans)
    }
}
