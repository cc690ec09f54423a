// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Subscans: the atomic antenna instructions of a schedule.
//!
//! Subscans are produced by the factory functions in this module, usually in
//! couples made of a science subscan and the Tsys subscan associated with
//! it. Every subscan owns its own [`Target`] snapshot, so later changes to
//! the input target never leak into subscans that have already been built.

mod factory;
#[cfg(test)]
mod tests;

pub use factory::*;

use std::fmt::Display;

use crate::{
    angle::Angle,
    coord::{Direction, Frame, ScanAxis},
    procedure::{self, Procedure},
    schedule::ScheduleError,
    target::Target,
};

/// Hands out sequential IDs. Subscan IDs start from 1 and scan mode IDs
/// from 0; each schedule run owns its own counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdCounter {
    next: usize,
}

impl IdCounter {
    pub fn starting_at(first: usize) -> IdCounter {
        IdCounter { next: first }
    }

    /// The counter used for subscans.
    pub fn for_subscans() -> IdCounter {
        IdCounter::starting_at(1)
    }

    /// The counter used for scan modes.
    pub fn for_scanmodes() -> IdCounter {
        IdCounter::starting_at(0)
    }

    pub fn next_id(&mut self) -> usize {
        let id = self.next;
        self.next += 1;
        id
    }

    /// The ID that the next call to [`IdCounter::next_id`] will return.
    pub fn peek(&self) -> usize {
        self.next
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubscanKind {
    /// Fixed pointing.
    Sidereal,

    /// A sweep along one axis, centred on the target.
    Otf {
        lon2: Angle,
        lat2: Angle,
        descr: String,
        scan_frame: Frame,

        /// The axis held constant during the sweep.
        geom: ScanAxis,
        direction: Direction,
    },

    /// An elevation sweep from `start` to `stop`, performed near the
    /// position of an earlier subscan.
    Skydip {
        target_subscan: usize,
        start: Angle,
        stop: Angle,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Subscan {
    pub id: usize,
    pub target: Target,

    /// \[seconds\]
    pub duration: f64,
    pub is_tsys: bool,
    pub is_cal: bool,
    pub pre_procedure: Procedure,
    pub post_procedure: Procedure,
    pub kind: SubscanKind,

    /// Position inside its scan, assigned when the schedule is written.
    pub seq_id: Option<usize>,
}

impl Subscan {
    /// Build a subscan with the default procedures for its flags: CALON and
    /// CALOFF for calibration subscans, TSYS after Tsys subscans and nothing
    /// otherwise.
    pub fn new(
        ids: &mut IdCounter,
        target: Target,
        duration: f64,
        is_tsys: bool,
        is_cal: bool,
        kind: SubscanKind,
    ) -> Result<Subscan, ScheduleError> {
        if is_tsys && is_cal {
            return Err(ScheduleError::TsysAndCal);
        }
        let (pre_procedure, post_procedure) = if is_cal {
            (procedure::CALON.clone(), procedure::CALOFF.clone())
        } else if is_tsys {
            (procedure::NULL.clone(), procedure::TSYS.clone())
        } else {
            (procedure::NULL.clone(), procedure::NULL.clone())
        };
        Ok(Subscan {
            id: ids.next_id(),
            target,
            duration,
            is_tsys,
            is_cal,
            pre_procedure,
            post_procedure,
            kind,
            seq_id: None,
        })
    }

    /// Append `proc` to the pre-procedure. A null pre-procedure is simply
    /// replaced.
    pub fn add_pre_procedure(&mut self, proc: &Procedure) {
        self.pre_procedure = &self.pre_procedure + proc;
    }

    pub fn add_post_procedure(&mut self, proc: &Procedure) {
        self.post_procedure = &self.post_procedure + proc;
    }

    pub fn typename(&self) -> &'static str {
        match self.kind {
            SubscanKind::Sidereal => "SIDEREAL",
            SubscanKind::Otf { .. } => "OTF",
            SubscanKind::Skydip { .. } => "SKYDIP",
        }
    }
}

/// The subscan line as written to the scan list file.
impl Display for Subscan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let t = &self.target;
        let offset_frame = t.offset.frame.offset_name();
        match &self.kind {
            SubscanKind::Sidereal => {
                write!(
                    f,
                    "{}\tSIDEREAL\t{}\t{}\t{}\t{}\t",
                    self.id, t.label, t.coord.frame, t.coord.lon, t.coord.lat
                )?;
                if t.coord.frame == Frame::Eq {
                    write!(f, "{}\t", t.coord.epoch)?;
                }
                write!(
                    f,
                    "{offset_frame}\t{}\t{}\t{}",
                    t.offset.lon, t.offset.lat, t.velocity
                )
            }
            SubscanKind::Otf {
                lon2,
                lat2,
                descr,
                scan_frame,
                geom,
                direction,
            } => write!(
                f,
                "{}\tOTF\t{}\t{}\t{}\t{lon2}\t{lat2}\t{}\t{scan_frame}\t{geom}\t{descr}\t{direction}\t{:.6}\t{offset_frame}\t{}\t{}\t{}",
                self.id,
                t.label,
                t.coord.lon,
                t.coord.lat,
                t.coord.frame,
                self.duration,
                t.offset.lon,
                t.offset.lat,
                t.velocity
            ),
            SubscanKind::Skydip {
                target_subscan,
                start,
                stop,
            } => write!(
                f,
                "{}\tSKYDIP\t{target_subscan}\t{start}\t{stop}\t{:.6}\t{offset_frame}\t{}\t{}",
                self.id, self.duration, t.offset.lon, t.offset.lat
            ),
        }
    }
}
