// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use log::debug;

use super::{ScanError, SequenceElement, SubscanPair};
use crate::{
    coord::{Coord, Frame},
    receiver::{FeedPair, Receiver},
    schedule::ScheduleError,
    subscan::{get_sidereal, get_tsys, IdCounter},
    target::Target,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoddingFeed {
    A,
    B,
}

/// Sidereal observations putting the target alternately on two feeds of a
/// multi-feed receiver.
#[derive(Debug, Clone, PartialEq)]
pub struct NoddingScan {
    pub feed_a: usize,
    pub feed_b: usize,

    /// \[seconds\]
    pub duration: f64,
    pub sequence: Vec<SequenceElement<NoddingFeed>>,
}

impl NoddingScan {
    /// The antenna offset putting the target on `feed`: minus the feed's
    /// offset from the central feed. With a valid-pair table the feed
    /// offset is the derotated one.
    fn pointing_offset(&self, receiver: &Receiver, feed: usize) -> Result<Coord, ScheduleError> {
        let feed_offset = if receiver.valid_pairs().is_some() {
            receiver.get_feed_offset(feed, self.pair(), Frame::Hor)?
        } else {
            receiver.nominal_feed_offset(feed)?
        };
        Ok(feed_offset.negated())
    }

    pub fn pair(&self) -> FeedPair {
        FeedPair::new(self.feed_a, self.feed_b)
    }

    pub(super) fn do_scan(
        &self,
        ids: &mut IdCounter,
        target: &Target,
        receiver: &Receiver,
    ) -> Result<Vec<SubscanPair>, ScheduleError> {
        if !receiver.is_multifeed() {
            return Err(ScanError::NoddingSingleFeed(receiver.name.clone()).into());
        }
        if !target.offset.is_null() && target.offset.frame != Frame::Hor {
            return Err(ScanError::NoddingOffset {
                label: target.label.clone(),
                frame: target.offset.frame,
            }
            .into());
        }

        let offset_a = self.pointing_offset(receiver, self.feed_a)?;
        let offset_b = self.pointing_offset(receiver, self.feed_b)?;
        debug!("nodding offsets: a {offset_a} b {offset_b}");

        let mut subscans: Vec<SubscanPair> = vec![];
        for element in &self.sequence {
            let offset = match element.position {
                NoddingFeed::A => &offset_a,
                NoddingFeed::B => &offset_b,
            };
            for _ in 0..element.repetitions {
                let st = get_tsys(ids, target, offset)?;
                let ss = get_sidereal(ids, target, offset, self.duration, element.is_cal)?;
                subscans.push((ss, st));
            }
        }

        if receiver.valid_pairs().is_some() {
            let derotator = receiver.derotator_procedure(self.pair())?;
            if let Some((ss, st)) = subscans.first_mut() {
                // Whichever of the two is observed first fixes the derotator.
                st.add_pre_procedure(&derotator);
                ss.add_pre_procedure(&derotator);
            }
        }
        Ok(subscans)
    }
}
