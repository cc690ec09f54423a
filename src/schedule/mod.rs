// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A whole observing schedule: the defaults, the known scan types and
//! backends, and the scans built from the target list.

mod error;
#[cfg(test)]
mod tests;
mod write;

pub use error::{ScheduleError, ScheduleWriteError};
pub use write::RenderedSchedule;

use indexmap::IndexMap;
use log::{debug, info, warn};

use crate::{
    backend::Backend,
    receiver::{get_radiotelescope, Radiotelescope, Receiver},
    scan::{Scan, TsysPolicy},
    scanmode::{ScanMode, ScanModeKind},
    subscan::{IdCounter, Subscan},
    target::Target,
};

#[derive(Debug, Clone)]
pub struct Schedule {
    pub project_id: String,
    pub observer: String,

    /// Also the stem of every output file name.
    pub label: String,

    /// Default repetitions of every scan.
    pub repetitions: usize,

    /// Default Tsys period; see [`TsysPolicy`].
    pub tsys: i64,
    pub radiotelescope: &'static Radiotelescope,
    pub receiver: Receiver,

    /// \[MHz\]
    pub frequencies: Vec<f64>,

    /// Scan types by name. A name can stand for more than one scan mode,
    /// in which case every target using it gets one scan per mode.
    pub scantypes: IndexMap<String, Vec<ScanMode>>,
    pub backends: IndexMap<String, Backend>,
    pub scans: Vec<Scan>,

    scanmode_ids: IdCounter,
    subscan_ids: IdCounter,
}

impl Schedule {
    pub fn new(
        project_id: &str,
        observer: &str,
        label: &str,
        radiotelescope: &str,
        receiver: &str,
        frequencies: Vec<f64>,
    ) -> Result<Schedule, ScheduleError> {
        let radiotelescope = get_radiotelescope(radiotelescope)?;
        let receiver = radiotelescope.receiver(receiver)?.clone();
        info!(
            "Scheduling {} radiotelescope using receiver {}",
            radiotelescope.name, receiver.name
        );
        Ok(Schedule {
            project_id: project_id.to_string(),
            observer: observer.to_string(),
            label: label.to_string(),
            repetitions: 1,
            tsys: 1,
            radiotelescope,
            receiver,
            frequencies,
            scantypes: IndexMap::new(),
            backends: IndexMap::new(),
            scans: vec![],
            scanmode_ids: IdCounter::for_scanmodes(),
            subscan_ids: IdCounter::for_subscans(),
        })
    }

    pub fn with_defaults(mut self, repetitions: usize, tsys: i64) -> Schedule {
        self.repetitions = repetitions;
        self.tsys = tsys;
        self
    }

    /// Register a scan type made of one or more scan modes, giving each of
    /// them a new scan mode ID.
    pub fn add_scantype(&mut self, name: &str, kinds: Vec<ScanModeKind>) {
        let modes: Vec<ScanMode> = kinds
            .into_iter()
            .map(|kind| ScanMode::new(&mut self.scanmode_ids, kind))
            .collect();
        debug!("scan type {name}: {} scan mode(s)", modes.len());
        self.scantypes.insert(name.to_string(), modes);
    }

    /// Register a backend. Total power sections are configured from the
    /// receiver.
    pub fn add_backend(&mut self, name: &str, mut backend: Backend) {
        backend.set_sections(self.receiver.nifs());
        self.backends.insert(name.to_string(), backend);
    }

    /// Add the scans observing `target` with the scan type and backend of
    /// the given names. Per-target repetitions and Tsys override the
    /// schedule defaults.
    ///
    /// Tsys is disabled for backends that cannot measure it, unless the
    /// target explicitly asks for periodic measurements, which is an error.
    pub fn add_scan(
        &mut self,
        target: Target,
        scantype: &str,
        backend: &str,
    ) -> Result<(), ScheduleError> {
        let modes = self
            .scantypes
            .get(scantype)
            .ok_or_else(|| ScheduleError::UnknownScanType(scantype.to_string()))?;
        let backend = self
            .backends
            .get(backend)
            .ok_or_else(|| ScheduleError::UnknownBackend(backend.to_string()))?;

        let repetitions = target.repetitions.unwrap_or(self.repetitions);
        let mut tsys = target.tsys.unwrap_or(self.tsys);
        if tsys >= 0 && !backend.can_tsys() {
            if target.tsys.map_or(false, |t| t > 0) {
                return Err(ScheduleError::TsysNotSupported {
                    target: target.label,
                    backend: backend.name.clone(),
                });
            }
            warn!(
                "Backend {} cannot measure Tsys; no Tsys for target {}",
                backend.name, target.label
            );
            tsys = -1;
        }

        for mode in modes {
            self.scans.push(Scan::new(
                target.clone(),
                mode.clone(),
                self.receiver.clone(),
                self.frequencies.clone(),
                backend.clone(),
                repetitions,
                TsysPolicy::from(tsys),
            ));
        }
        Ok(())
    }

    /// Compute the subscans of every scan, in scan order. Each call uses new
    /// subscan IDs.
    pub fn subscans(&mut self) -> Result<Vec<Vec<Subscan>>, ScheduleError> {
        let ids = &mut self.subscan_ids;
        self.scans.iter().map(|scan| scan.subscans(ids)).collect()
    }
}
