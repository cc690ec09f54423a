// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Feed pairs that line up on the sky at a given derotator angle.

use std::fmt::Display;

use crate::{angle::Angle, constants::DEROTATOR_ANGLE_TOLERANCE};

/// An unordered pair of feed indices. The smaller index is always stored
/// first, so `(1, 5)` and `(5, 1)` are the same pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeedPair {
    low: usize,
    high: usize,
}

impl FeedPair {
    pub fn new(a: usize, b: usize) -> FeedPair {
        FeedPair {
            low: a.min(b),
            high: a.max(b),
        }
    }

    pub fn contains(&self, feed: usize) -> bool {
        self.low == feed || self.high == feed
    }

    pub fn feeds(&self) -> (usize, usize) {
        (self.low, self.high)
    }
}

impl From<(usize, usize)> for FeedPair {
    fn from((a, b): (usize, usize)) -> Self {
        FeedPair::new(a, b)
    }
}

impl Display for FeedPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.low, self.high)
    }
}

/// Derotator angle buckets, each holding the feed pairs that are valid for
/// nodding at that angle. Angles are matched with a small tolerance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidPairs {
    buckets: Vec<(Angle, Vec<FeedPair>)>,
}

impl ValidPairs {
    pub fn new() -> ValidPairs {
        ValidPairs::default()
    }

    /// Add pairs to the bucket for `angle`, creating it if needed.
    pub fn insert<P, I>(&mut self, angle: Angle, pairs: I)
    where
        P: Into<FeedPair>,
        I: IntoIterator<Item = P>,
    {
        let pairs = pairs.into_iter().map(Into::into);
        match self
            .buckets
            .iter_mut()
            .find(|(a, _)| same_angle(*a, angle))
        {
            Some((_, bucket)) => {
                for pair in pairs {
                    if !bucket.contains(&pair) {
                        bucket.push(pair);
                    }
                }
            }
            None => self.buckets.push((angle, pairs.collect())),
        }
    }

    /// Builder-style [`ValidPairs::insert`].
    pub fn with<P, I>(mut self, angle_deg: f64, pairs: I) -> ValidPairs
    where
        P: Into<FeedPair>,
        I: IntoIterator<Item = P>,
    {
        self.insert(Angle::from_degrees(angle_deg), pairs);
        self
    }

    /// The pairs valid at `angle`, if there is a bucket for it.
    pub fn bucket(&self, angle: Angle) -> Option<&[FeedPair]> {
        self.buckets
            .iter()
            .find(|(a, _)| same_angle(*a, angle))
            .map(|(_, b)| b.as_slice())
    }

    /// The derotator angle at which `pair` is valid. If the pair appears in
    /// more than one bucket, the last one wins.
    pub fn angle_of(&self, pair: FeedPair) -> Option<Angle> {
        self.buckets
            .iter()
            .rev()
            .find(|(_, b)| b.contains(&pair))
            .map(|(a, _)| *a)
    }

    pub fn contains(&self, pair: FeedPair) -> bool {
        self.angle_of(pair).is_some()
    }

    pub fn is_valid_at(&self, pair: FeedPair, angle: Angle) -> bool {
        self.bucket(angle).map_or(false, |b| b.contains(&pair))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Angle, &[FeedPair])> {
        self.buckets.iter().map(|(a, b)| (*a, b.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

fn same_angle(a: Angle, b: Angle) -> bool {
    (a.deg() - b.deg()).abs() < DEROTATOR_ANGLE_TOLERANCE
}
