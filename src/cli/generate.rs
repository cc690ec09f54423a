// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Generate schedule files from a configuration and a target file.

use std::{borrow::Cow, path::PathBuf};

use clap::Parser;
use itertools::Itertools;
use log::{debug, info};

use super::{
    common::{display_warnings, output_dir, parent_dir, InfoPrinter, Warn},
    BasieError,
};
use crate::{config::ScheduleConfig, scan::TsysPolicy, schedule::Schedule};

/// Generate the schedule files (.scd, .lis, .cfg, .bck) described by a
/// configuration file.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// The schedule configuration file (toml or json). The target file it
    /// names is looked up next to it.
    #[clap(short, long, parse(from_os_str), default_value = "configuration.toml")]
    config: PathBuf,

    /// Overwrite existing schedule files.
    #[clap(short, long)]
    force: bool,

    /// The directory to write schedule files into. It is created if it
    /// doesn't exist. Default: the current directory.
    #[clap(name = "DIRECTORY", parse(from_os_str))]
    directory: Option<PathBuf>,
}

impl GenerateArgs {
    pub fn run(self, dry_run: bool) -> Result<(), BasieError> {
        let GenerateArgs {
            config,
            force,
            directory,
        } = self;
        let dst = output_dir(directory);
        debug!("Output directory: {}", dst.display());

        info!("Generating schedule from {}", config.display());
        let conf = ScheduleConfig::from_file(&config)?;
        let mut schedule = conf.build(&parent_dir(&config))?;
        if schedule.scans.is_empty() {
            format!(
                "No scans were read from {}; the schedule will be empty",
                conf.targets_path(&parent_dir(&config)).display()
            )
            .warn();
        }
        summarise(&schedule);
        display_warnings();

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let rendered = schedule.render()?;
        info!(
            "Schedule {} has {} scan(s) and {} subscan(s)",
            rendered.label,
            schedule.scans.len(),
            rendered.num_subscans
        );
        rendered.write(&dst, force)?;
        Ok(())
    }
}

fn summarise(schedule: &Schedule) {
    let mut printer = InfoPrinter::new(format!("Schedule {}", schedule.label).into());
    printer.push_block(vec![
        format!("Project: {}", schedule.project_id).into(),
        format!("Observer: {}", schedule.observer).into(),
    ]);
    printer.push_block(vec![
        format!(
            "Radiotelescope: {} ({})",
            schedule.radiotelescope.name, schedule.radiotelescope.long_name
        )
        .into(),
        format!("Receiver: {}", schedule.receiver.name).into(),
        format!(
            "Rest frequencies: {} MHz",
            schedule.frequencies.iter().join(", ")
        )
        .into(),
    ]);

    printer.push_line(
        format!(
            "Default repetitions: {}, Tsys: {:?}",
            schedule.repetitions,
            TsysPolicy::from(schedule.tsys)
        )
        .into(),
    );

    let scantypes: Vec<Cow<'static, str>> = schedule
        .scantypes
        .iter()
        .map(|(name, modes)| {
            format!(
                "{name}: {}",
                modes.iter().map(|m| m.typename()).join(" + ")
            )
            .into()
        })
        .collect();
    if !scantypes.is_empty() {
        printer.push_block(scantypes);
    }

    let mut scans: Vec<Cow<'static, str>> =
        vec![format!("{} scan(s)", schedule.scans.len()).into()];
    for scan in &schedule.scans {
        scans.push(
            format!(
                "{} {} with {}, {} repetition(s)",
                scan.target.label,
                scan.scanmode.typename(),
                scan.backend.name,
                scan.repetitions
            )
            .into(),
        );
    }
    printer.push_block(scans);
    printer.display();
}
