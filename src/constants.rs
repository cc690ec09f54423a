// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All angles are handled in degrees unless the name says otherwise.
 */

/// The number of decimal places used when angles are written out.
pub const ANGLE_DECIMALS: usize = 4;

/// Tsys subscans are placed this many beamsizes away from the edge of the
/// observed region.
pub const TSYS_SIGMA: f64 = 5.0;

/// Tolerance used when comparing derotator angles \[degrees\].
pub const DEROTATOR_ANGLE_TOLERANCE: f64 = 1e-6;

/// Prefix of every procedure name written to the procedure file.
pub const PROC_PREFIX: &str = "PROCEDURE_";

/// The only coordinate epoch understood by the antenna control system.
pub const DEFAULT_EPOCH: &str = "j2000";

/// The antenna control system release that the output files target.
pub const NURAGHE_VERSION: &str = "nuraghe-0.6";

/// The ESCS release that the output files target.
pub const ESCS_VERSION: &str = "escs-0.6";

/// Rotation matrix taking J2000 equatorial unit vectors to galactic unit
/// vectors (Hipparcos definition of the galactic frame).
pub const EQ_TO_GAL: [[f64; 3]; 3] = [
    [-0.0548755604162154, -0.8734370902348850, -0.4838350155487132],
    [0.4941094278755837, -0.4448296299600112, 0.7469822444972189],
    [-0.8676661490190047, -0.1980763734312015, 0.4559837761750669],
];
