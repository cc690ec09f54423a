// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Receiver descriptors: feed geometry and beamsize.

mod catalog;
mod error;
#[cfg(test)]
mod tests;
mod valid_pairs;

pub use catalog::{get_radiotelescope, Radiotelescope, RADIOTELESCOPES};
pub use error::ReceiverError;
pub use valid_pairs::{FeedPair, ValidPairs};

use itertools::Itertools;
use log::{debug, warn};

use crate::{
    angle::Angle,
    coord::{Coord, Frame},
    procedure::Procedure,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Receiver {
    pub name: String,

    /// Minimum usable sky frequency \[MHz\].
    pub fmin: f64,

    /// Maximum usable sky frequency \[MHz\].
    pub fmax: f64,

    pub nfeed: usize,

    /// Polarisations per feed.
    pub npols: usize,

    pub has_derotator: bool,

    /// Distance between the central feed and the outermost feeds when the
    /// derotator holds the array in place.
    pub feed_extent: Angle,

    /// Spacing between adjacent feed tracks when the derotator holds the
    /// array in place.
    pub interleave: Angle,

    /// (frequency \[MHz\], beamsize \[degrees\]) sorted by frequency.
    beamsize_table: Vec<(f64, f64)>,

    /// Offset of each feed relative to feed 0. Always at least `nfeed` long.
    feed_offsets: Vec<Coord>,

    valid_pairs: Option<ValidPairs>,
}

impl Receiver {
    pub fn new(
        name: &str,
        fmin: f64,
        fmax: f64,
        beamsize_table: &[(f64, f64)],
        nfeed: usize,
        npols: usize,
    ) -> Receiver {
        let mut beamsize_table = beamsize_table.to_vec();
        beamsize_table.sort_by(|a, b| a.0.total_cmp(&b.0));
        Receiver {
            name: name.to_string(),
            fmin,
            fmax,
            nfeed,
            npols,
            has_derotator: false,
            feed_extent: Angle::zero(),
            interleave: Angle::zero(),
            beamsize_table,
            feed_offsets: vec![Coord::from_degrees(Frame::Hor, 0.0, 0.0); nfeed.max(1)],
            valid_pairs: None,
        }
    }

    /// Mark the receiver as derotator-capable with the given feed geometry.
    pub fn with_derotator(mut self, feed_extent: Angle, interleave: Angle) -> Receiver {
        self.has_derotator = true;
        self.feed_extent = feed_extent;
        self.interleave = interleave;
        self
    }

    /// Replace the nominal feed offsets. Missing entries are padded with zero
    /// offsets.
    pub fn with_feed_offsets(mut self, offsets: Vec<Coord>) -> Receiver {
        self.feed_offsets = offsets;
        if self.feed_offsets.len() < self.nfeed {
            debug!("adding default offset (0.0, 0.0) to receiver {}", self.name);
            self.feed_offsets
                .resize(self.nfeed, Coord::from_degrees(Frame::Hor, 0.0, 0.0));
        }
        self
    }

    /// The number of IFs out of this receiver.
    pub fn nifs(&self) -> usize {
        self.nfeed * self.npols
    }

    pub fn is_multifeed(&self) -> bool {
        self.nfeed > 1
    }

    pub fn set_feed_offsets(
        &mut self,
        feed: usize,
        (lon, lat): (Angle, Angle),
        frame: Frame,
    ) -> Result<(), ReceiverError> {
        if feed >= self.nfeed {
            return Err(ReceiverError::NoSuchFeed {
                receiver: self.name.clone(),
                feed,
            });
        }
        self.feed_offsets[feed] = Coord::new(frame, lon, lat);
        Ok(())
    }

    pub fn feed_offsets(&self) -> &[Coord] {
        &self.feed_offsets
    }

    /// The nominal (not derotated) offset of `feed`.
    pub fn nominal_feed_offset(&self, feed: usize) -> Result<Coord, ReceiverError> {
        self.feed_offsets
            .get(feed)
            .filter(|_| feed < self.nfeed)
            .copied()
            .ok_or_else(|| ReceiverError::NoSuchFeed {
                receiver: self.name.clone(),
                feed,
            })
    }

    pub fn set_valid_pairs(&mut self, table: ValidPairs) -> Result<(), ReceiverError> {
        if self.nfeed < 2 {
            return Err(ReceiverError::SingleFeed(self.name.clone()));
        }
        self.valid_pairs = Some(table);
        Ok(())
    }

    pub fn valid_pairs(&self) -> Option<&ValidPairs> {
        self.valid_pairs.as_ref()
    }

    /// Is `pair` valid at any derotator angle? Always false without a table.
    pub fn is_valid_pair(&self, pair: FeedPair) -> bool {
        self.valid_pairs
            .as_ref()
            .map_or(false, |vp| vp.contains(pair))
    }

    /// Find the derotator angle at which `pair` is valid.
    pub fn derotator_angle(&self, pair: FeedPair) -> Result<Angle, ReceiverError> {
        if self.nfeed < 2 {
            return Err(ReceiverError::SingleFeed(self.name.clone()));
        }
        let table = self
            .valid_pairs
            .as_ref()
            .ok_or_else(|| ReceiverError::NoValidPairs(self.name.clone()))?;
        table
            .angle_of(pair)
            .ok_or(ReceiverError::InvalidPair(pair))
    }

    /// The on-sky offset of `feed` when the derotator holds the array at the
    /// angle where `pair` is valid: the nominal offset rotated by minus that
    /// angle.
    pub fn get_feed_offset(
        &self,
        feed: usize,
        pair: FeedPair,
        frame: Frame,
    ) -> Result<Coord, ReceiverError> {
        if self.nfeed < 2 {
            return Err(ReceiverError::SingleFeed(self.name.clone()));
        }
        if self.valid_pairs.is_none() {
            return Err(ReceiverError::NoValidPairs(self.name.clone()));
        }
        if !pair.contains(feed) {
            return Err(ReceiverError::FeedNotInPair { feed, pair });
        }
        let angle = self.derotator_angle(pair)?;
        debug!("Derotator angle for pair {pair}: {angle}");

        let nominal = self.nominal_feed_offset(feed)?;
        let (sin, cos) = (-angle.rad()).sin_cos();
        let (lon, lat) = (nominal.lon.deg(), nominal.lat.deg());
        Ok(Coord::from_degrees(
            frame,
            lon * cos - lat * sin,
            lon * sin + lat * cos,
        ))
    }

    /// A procedure that fixes the derotator at the angle where `pair` is
    /// valid.
    pub fn derotator_procedure(&self, pair: FeedPair) -> Result<Procedure, ReceiverError> {
        let angle = self.derotator_angle(pair)?.deg();
        let text = if angle.fract() == 0.0 {
            format!("{angle:.1}")
        } else {
            angle.to_string()
        };
        Ok(Procedure::new(
            &format!("DEROTATORFIXED_{}", text.replace(['.', '-'], "")),
            0,
            &format!("\tderotatorSetConfiguration=FIXED\n\tderotatorSetPosition={text}d\n"),
            true,
        ))
    }

    /// Linearly interpolated beamsize at `freq` \[MHz\]; values outside the
    /// table are clamped to its ends. A non-positive frequency means "use
    /// `fmin`".
    pub fn get_beamsize(&self, freq: f64) -> Angle {
        let freq = if freq > 0.0 {
            if !(self.fmin..=self.fmax).contains(&freq) {
                warn!(
                    "RECEIVER {} beamsize at frequency {freq} MHz out of range [{}, {}]",
                    self.name, self.fmin, self.fmax
                );
            }
            freq
        } else {
            warn!(
                "RECEIVER {} using default beamsize at min frequency",
                self.name
            );
            self.fmin
        };
        Angle::from_degrees(interpolate(&self.beamsize_table, freq))
    }

    /// Beamsize at `fmin`.
    pub fn default_beamsize(&self) -> Angle {
        Angle::from_degrees(interpolate(&self.beamsize_table, self.fmin))
    }
}

fn interpolate(table: &[(f64, f64)], x: f64) -> f64 {
    let (first, last) = match (table.first(), table.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return 0.0,
    };
    if x <= first.0 {
        return first.1;
    }
    if x >= last.0 {
        return last.1;
    }
    table
        .iter()
        .tuple_windows()
        .find(|(_, hi)| x <= hi.0)
        .map(|((x0, y0), (x1, y1))| y0 + (y1 - y0) * (x - x0) / (x1 - x0))
        .unwrap_or(last.1)
}
