// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Source radial velocities.

use std::fmt::Display;

use strum_macros::{Display, EnumIter, EnumString};

/// Reference frame of a radial velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum VelocityReference {
    /// Barycentric.
    #[default]
    #[strum(serialize = "BARI")]
    Bari,

    /// Kinematic local standard of rest.
    #[strum(serialize = "LSRK")]
    Lsrk,

    /// Dynamical local standard of rest.
    #[strum(serialize = "LSRD")]
    Lsrd,

    /// Galactocentric.
    #[strum(serialize = "GALCEN")]
    Galcen,

    /// Topocentric.
    #[strum(serialize = "TOPCEN")]
    Topcen,
}

/// Doppler convention of a radial velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum VelocityDefinition {
    /// Optical.
    #[default]
    #[strum(serialize = "OP")]
    Optical,

    /// Radio.
    #[strum(serialize = "RD")]
    Radio,

    /// Redshift.
    #[strum(serialize = "Z")]
    Redshift,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    /// \[km/s\]
    pub value: f64,
    pub reference: VelocityReference,
    pub definition: VelocityDefinition,
}

impl Velocity {
    pub fn new(value: f64, definition: VelocityDefinition, reference: VelocityReference) -> Self {
        Velocity {
            value,
            reference,
            definition,
        }
    }
}

impl Display for Velocity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "-VRAD {:.6} {} {}",
            self.value, self.reference, self.definition
        )
    }
}
