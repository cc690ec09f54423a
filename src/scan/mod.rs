// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A target observed with one scan mode, and the subscan sequence that
//! results from repeating it and interleaving Tsys measurements.

use std::num::NonZeroUsize;

use log::{debug, trace};

use crate::{
    backend::Backend,
    coord::Frame,
    receiver::Receiver,
    scanmode::ScanMode,
    schedule::ScheduleError,
    subscan::{IdCounter, Subscan},
    target::Target,
};

/// When Tsys subscans are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsysPolicy {
    Never,

    /// Only before the first subscan of the scan.
    Once,

    /// Before the first subscan and then before every n-th one.
    Every(NonZeroUsize),
}

impl From<i64> for TsysPolicy {
    /// Negative: never. Zero: once. Positive n: every n subscans.
    fn from(tsys: i64) -> TsysPolicy {
        match usize::try_from(tsys).ok() {
            None => TsysPolicy::Never,
            Some(n) => NonZeroUsize::new(n).map_or(TsysPolicy::Once, TsysPolicy::Every),
        }
    }
}

impl TsysPolicy {
    /// Is Tsys measured before the subscan numbered `n` (counting from 0
    /// across repetitions)?
    pub fn measures_before(self, n: usize) -> bool {
        match self {
            TsysPolicy::Never => false,
            TsysPolicy::Once => n == 0,
            TsysPolicy::Every(period) => n % period.get() == 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scan {
    /// The target, with its offset frame resolved.
    pub target: Target,
    pub scanmode: ScanMode,
    pub receiver: Receiver,
    pub backend: Backend,
    pub frequencies: Vec<f64>,
    pub repetitions: usize,
    pub tsys: TsysPolicy,
}

impl Scan {
    /// A null target offset frame becomes the scan mode frame, or the
    /// target's own frame when the scan mode has none.
    pub fn new(
        mut target: Target,
        scanmode: ScanMode,
        receiver: Receiver,
        frequencies: Vec<f64>,
        backend: Backend,
        repetitions: usize,
        tsys: TsysPolicy,
    ) -> Scan {
        if target.offset.frame == Frame::Null {
            target.offset.frame = match scanmode.frame() {
                Frame::Null => target.coord.frame,
                f => f,
            };
            trace!(
                "target {} offset frame set to {}",
                target.label,
                target.offset.frame
            );
        }
        Scan {
            target,
            scanmode,
            receiver,
            backend,
            frequencies,
            repetitions,
            tsys,
        }
    }

    /// The full subscan sequence of this scan. Every call computes new
    /// subscans with new IDs from `ids`; repetitions within one call share
    /// the same subscans.
    pub fn subscans(&self, ids: &mut IdCounter) -> Result<Vec<Subscan>, ScheduleError> {
        let base =
            self.scanmode
                .do_scan(ids, &self.target, &self.receiver, &self.frequencies)?;
        let unit = base.len();
        let mut subscans = Vec::with_capacity(2 * unit * self.repetitions);
        for rep in 0..self.repetitions {
            for (sn, (ss, st)) in base.iter().enumerate() {
                let n = rep * unit + sn;
                if self.tsys.measures_before(n) {
                    subscans.push(st.clone());
                }
                subscans.push(ss.clone());
            }
        }
        debug!(
            "scan of {} ({}): {} subscans",
            self.target.label,
            self.scanmode.typename(),
            subscans.len()
        );
        Ok(subscans)
    }
}
