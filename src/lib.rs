// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Observation schedule generator for single-dish radiotelescopes.

A schedule is built from a configuration (receiver, scan types, backends) and
a list of targets. Every target is observed with the scan modes of its scan
type, which turn it into subscans: pointing offsets, durations, Tsys
measurements and the procedures run around them. The result is written as the
four files (.scd, .lis, .cfg, .bck) read by the antenna control software.
 */

pub mod angle;
pub mod backend;
mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod procedure;
pub mod receiver;
pub mod scan;
pub mod scanmode;
pub mod schedule;
pub mod subscan;
pub mod target;

// Re-exports.
pub use angle::{Angle, AngleFormat};
pub use cli::{Basie, BasieError};
pub use config::ScheduleConfig;
pub use coord::{Coord, Frame};
pub use schedule::{RenderedSchedule, Schedule};
pub use target::Target;
