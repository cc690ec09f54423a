// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Rendering a schedule into the files read by the antenna control system.

use std::{
    collections::BTreeMap,
    fmt::Write as _,
    path::{Path, PathBuf},
};

use indexmap::IndexSet;
use log::{debug, info};

use super::{Schedule, ScheduleError, ScheduleWriteError};
use crate::{
    backend::Backend,
    constants::{ESCS_VERSION, NURAGHE_VERSION},
    procedure::{self, Procedure},
    subscan::Subscan,
};

const DATA_WRITER: &str = "MANAGEMENT/FitsZilla";

/// The contents of the four schedule files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSchedule {
    /// File name stem.
    pub label: String,

    /// The schedule proper: scans and their subscan sequences.
    pub scd: String,

    /// Subscan definitions.
    pub lis: String,

    /// Procedure definitions.
    pub cfg: String,

    /// Backend definitions.
    pub bck: String,

    /// Total number of subscans in the schedule, repetitions included.
    pub num_subscans: usize,
}

impl Schedule {
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{extension}", self.label)
    }

    /// Compute the subscans of every scan and render the schedule files.
    pub fn render(&mut self) -> Result<RenderedSchedule, ScheduleError> {
        let mut all_subscans = self.subscans()?;

        let mut scd = String::new();
        let mut lis = String::new();
        // String formatting into a String cannot fail.
        let _ = writeln!(
            scd,
            "# Generated with basie version {}",
            env!("CARGO_PKG_VERSION")
        );
        let _ = writeln!(scd, "# compatible nuraghe version: {NURAGHE_VERSION}");
        let _ = writeln!(scd, "# compatible escs version: {ESCS_VERSION}");
        let _ = write!(
            scd,
            "PROJECT:\t\t{}\nOBSERVER:\t\t{}\nSCANLIST:\t\t{}\nPROCEDURELIST:\t\t{}\nBACKENDLIST:\t\t{}\nMODE:\t\t\tSEQ\nSCANTAG:\t\t1\nINITPROC:\t\t{}\n",
            self.project_id,
            self.observer,
            self.file_name("lis"),
            self.file_name("cfg"),
            self.file_name("bck"),
            procedure::INIT.invocation()?,
        );

        let mut used_procedures: IndexSet<Procedure> = IndexSet::new();
        used_procedures.insert(procedure::INIT.clone());
        let mut used_backends: IndexSet<&Backend> = IndexSet::new();
        let mut num_subscans = 0;

        for (scan_number, (scan, subscans)) in
            (1..).zip(self.scans.iter().zip(all_subscans.iter_mut()))
        {
            info!(
                "writing scan {scan_number}: {} on {}",
                scan.scanmode.typename(),
                scan.target.label
            );
            let label = &scan.target.label;
            let _ = write!(scd, "\nSC:\t{scan_number}\t{label}\t");
            let _ = writeln!(
                scd,
                "{}:{DATA_WRITER}\tscanlayout_{scan_number}_{label}",
                scan.backend.name
            );
            used_backends.insert(&scan.backend);

            let mut distinct: BTreeMap<usize, &Subscan> = BTreeMap::new();
            for (seq, subscan) in (1..).zip(subscans.iter_mut()) {
                subscan.seq_id = Some(seq);
                let _ = writeln!(
                    scd,
                    "{scan_number}_{seq}\t{:.6}\t{}\t{}\t{}",
                    subscan.duration,
                    subscan.id,
                    subscan.pre_procedure.invocation()?,
                    subscan.post_procedure.invocation()?,
                );
                used_procedures.insert(subscan.pre_procedure.clone());
                used_procedures.insert(subscan.post_procedure.clone());
            }
            for subscan in subscans.iter() {
                distinct.entry(subscan.id).or_insert(subscan);
            }
            num_subscans += subscans.len();

            let _ = writeln!(lis, "#{label}");
            for subscan in distinct.values() {
                let _ = writeln!(lis, "{subscan}");
            }
        }

        let cfg: String = used_procedures.iter().map(|p| p.to_string()).collect();
        let bck: String = used_backends.iter().map(|b| b.to_string()).collect();
        debug!(
            "{} procedures and {} backends used",
            used_procedures.len(),
            used_backends.len()
        );

        Ok(RenderedSchedule {
            label: self.label.clone(),
            scd,
            lis,
            cfg,
            bck,
            num_subscans,
        })
    }
}

impl RenderedSchedule {
    fn files(&self) -> [(&str, &str); 4] {
        [
            ("scd", self.scd.as_str()),
            ("lis", self.lis.as_str()),
            ("cfg", self.cfg.as_str()),
            ("bck", self.bck.as_str()),
        ]
    }

    /// Write the schedule files into `dir`, creating it if needed. Unless
    /// `force` is set, nothing is written if any of the files already
    /// exists.
    pub fn write<P: AsRef<Path>>(
        &self,
        dir: P,
        force: bool,
    ) -> Result<Vec<PathBuf>, ScheduleWriteError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            std::fs::create_dir_all(dir).map_err(|err| ScheduleWriteError::CreateDir {
                dir: dir.to_path_buf(),
                err,
            })?;
            debug!("created output directory {}", dir.display());
        }

        let paths: Vec<PathBuf> = self
            .files()
            .iter()
            .map(|(ext, _)| dir.join(format!("{}.{ext}", self.label)))
            .collect();
        if !force {
            if let Some(existing) = paths.iter().find(|p| p.exists()) {
                return Err(ScheduleWriteError::FileExists(existing.clone()));
            }
        }

        for (path, (_, contents)) in paths.iter().zip(self.files()) {
            std::fs::write(path, contents).map_err(|err| ScheduleWriteError::Write {
                file: path.clone(),
                err,
            })?;
            info!("wrote {}", path.display());
        }
        Ok(paths)
    }
}
