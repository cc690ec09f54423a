// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Known radiotelescopes and their receivers.

use lazy_static::lazy_static;

use super::{Receiver, ReceiverError, ValidPairs};
use crate::{
    angle::Angle,
    coord::{Coord, Frame},
};

lazy_static! {
    pub static ref RADIOTELESCOPES: Vec<Radiotelescope> = vec![medicina(), srt(), noto()];
}

#[derive(Debug, Clone)]
pub struct Radiotelescope {
    pub name: &'static str,
    pub long_name: &'static str,

    /// Root sum square of the maximum acceleration of both axes \[deg/s^2\].
    pub max_acc: f64,

    /// Used to overestimate the maximum acceleration.
    pub acc_scale_factor: f64,

    pub receivers: Vec<Receiver>,
}

impl Radiotelescope {
    /// Case-insensitive receiver lookup.
    pub fn receiver(&self, name: &str) -> Result<&Receiver, ReceiverError> {
        self.receivers
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| ReceiverError::UnknownReceiver {
                telescope: self.name.to_string(),
                receiver: name.to_string(),
            })
    }
}

/// Case-insensitive radiotelescope lookup.
pub fn get_radiotelescope(name: &str) -> Result<&'static Radiotelescope, ReceiverError> {
    RADIOTELESCOPES
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| ReceiverError::UnknownRadiotelescope(name.to_string()))
}

fn medicina() -> Radiotelescope {
    Radiotelescope {
        name: "MED",
        long_name: "Medicina VLBI telescope",
        max_acc: (0.4_f64.powi(2) + 0.5_f64.powi(2)).sqrt(),
        acc_scale_factor: 15.0,
        receivers: vec![
            Receiver::new("C", 4700.0, 5500.0, &[(5000.0, 2.0)], 1, 2),
            Receiver::new("CL", 4700.0, 5850.0, &[(5200.0, 1.8)], 1, 2),
            Receiver::new("X", 8180.0, 8980.0, &[(8500.0, 0.8)], 1, 2),
            Receiver::new("K", 18000.0, 26000.0, &[(23000.0, 0.2)], 2, 2),
        ],
    }
}

fn noto() -> Radiotelescope {
    Radiotelescope {
        name: "NOTO",
        long_name: "Noto radiotelescope",
        max_acc: (0.4_f64.powi(2) + 0.5_f64.powi(2)).sqrt(),
        acc_scale_factor: 10.0,
        receivers: vec![],
    }
}

fn srt() -> Radiotelescope {
    const K_BEAMSIZES: [(f64, f64); 3] = [(18000.0, 0.016), (22000.0, 0.014), (26000.0, 0.012)];

    Radiotelescope {
        name: "SRT",
        long_name: "Sardinia radiotelescope",
        max_acc: (0.4_f64.powi(2) + 0.25_f64.powi(2)).sqrt(),
        acc_scale_factor: 15.0,
        receivers: vec![
            Receiver::new(
                "P",
                305.0,
                410.0,
                &[(300.0, 1.070), (350.0, 0.937), (410.0, 0.818)],
                1,
                2,
            ),
            Receiver::new(
                "L",
                1300.0,
                1800.0,
                &[(1300.0, 0.252), (1550.0, 0.210), (1800.0, 0.187)],
                1,
                2,
            ),
            Receiver::new(
                "C",
                5700.0,
                7700.0,
                &[(5700.0, 0.053), (6700.0, 0.047), (7700.0, 0.043)],
                1,
                2,
            ),
            Receiver::new("K", 18000.0, 26500.0, &K_BEAMSIZES, 1, 2),
            srt_k_multifeed(&K_BEAMSIZES),
        ],
    }
}

/// The seven-feed K-band receiver: a central feed surrounded by a hexagon.
fn srt_k_multifeed(beamsizes: &[(f64, f64)]) -> Receiver {
    let feed_extent = Angle::from_degrees(0.037545204);
    let offsets = std::iter::once(Coord::from_degrees(Frame::Hor, 0.0, 0.0))
        .chain((1..7).map(|k| {
            let (sin, cos) = (60.0 * k as f64).to_radians().sin_cos();
            Coord::from_degrees(Frame::Hor, feed_extent.deg() * cos, feed_extent.deg() * sin)
        }))
        .collect();
    let mut receiver = Receiver::new("KM", 18000.0, 26500.0, beamsizes, 7, 2)
        .with_derotator(feed_extent, feed_extent / 3.0)
        .with_feed_offsets(offsets);

    // A seven-feed receiver always accepts a pairs table.
    let _ = receiver.set_valid_pairs(hexagon_valid_pairs());
    receiver
}

/// Feed pairs aligned along the scan direction for each derotator position
/// of a hexagonal seven-feed array.
pub(crate) fn hexagon_valid_pairs() -> ValidPairs {
    ValidPairs::new()
        .with(0.0, [(0, 3), (0, 6), (3, 6), (1, 2), (4, 5)])
        .with(30.0, [(1, 3), (4, 6)])
        .with(60.0, [(0, 1), (0, 4), (1, 4), (2, 3), (5, 6)])
        .with(90.0, [(1, 5), (2, 4)])
        .with(120.0, [(0, 2), (0, 5), (2, 5), (3, 4), (1, 6)])
        .with(150.0, [(2, 6), (3, 5)])
}

