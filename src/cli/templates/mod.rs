// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Annotated configuration and target files to start a schedule from.

use std::path::PathBuf;

use clap::Parser;
use log::info;

use super::{
    common::{display_warnings, output_dir, Warn},
    BasieError,
};

pub(crate) const TEMPLATES: [(&str, &str); 2] = [
    ("configuration.toml", include_str!("configuration.toml")),
    ("targets.txt", include_str!("targets.txt")),
];

/// Write a configuration and a target file to edit into a new schedule.
#[derive(Parser, Debug)]
pub struct TemplatesArgs {
    /// Overwrite existing files.
    #[clap(short, long)]
    force: bool,

    /// The directory to write the templates into. It is created if it
    /// doesn't exist. Default: the current directory.
    #[clap(name = "DIRECTORY", parse(from_os_str))]
    directory: Option<PathBuf>,
}

impl TemplatesArgs {
    pub fn run(self, dry_run: bool) -> Result<(), BasieError> {
        let dst = output_dir(self.directory);
        if dry_run {
            info!("Would write templates into {}", dst.display());
            return Ok(());
        }

        if !dst.is_dir() {
            info!("Creating directory {}", dst.display());
            std::fs::create_dir_all(&dst)?;
        }
        for (name, contents) in TEMPLATES {
            let file = dst.join(name);
            if file.exists() {
                if !self.force {
                    format!("{} exists; not overwritten", file.display()).warn();
                    continue;
                }
                format!("Overwriting {}", file.display()).warn();
            }
            std::fs::write(&file, contents)?;
            info!("Wrote {}", file.display());
        }
        display_warnings();
        Ok(())
    }
}
