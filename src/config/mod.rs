// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Schedule configuration files.
//!
//! A configuration is a toml (or json) document naming the project, the
//! receiver and the scan types and backends that target lines refer to. See
//! the `configuration.toml` template written by `basie templates` for an
//! annotated example.

mod error;

pub use error::ConfigError;

use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
    str::FromStr,
};

use indexmap::IndexMap;
use itertools::Itertools;
use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::Regex;
use serde::Deserialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use vec1::Vec1;

use crate::{
    angle::Angle,
    backend::Backend,
    coord::{Coord, Frame, ScanAxis},
    scanmode::{
        CrossScan, MapGeometry, MapSampling, NoddingFeed, NoddingScan, OnOffPosition, OnOffScan,
        OtfMapScan, PointScan, RasterMapScan, ScanModeKind, SequenceElement, SkydipScan,
        StartPoint,
    },
    schedule::Schedule,
    target::parse_target_file,
};

lazy_static! {
    pub static ref CONFIG_FILE_TYPES_COMMA_SEPARATED: String = ConfigFileType::iter().join(", ");

    static ref NODDING_ELEMENT_RE: Regex = Regex::new(r"^(\d*)(a|b)(_cal)?$").unwrap();

    static ref ONOFF_ELEMENT_RE: Regex = Regex::new(r"^(\d*)(on|off)(_cal)?$").unwrap();
}

#[derive(Debug, Display, EnumIter, EnumString)]
pub enum ConfigFileType {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

fn default_one() -> usize {
    1
}

fn default_tsys() -> i64 {
    1
}

fn default_output_format() -> String {
    "fits".to_string()
}

fn default_targets_file() -> PathBuf {
    PathBuf::from("targets.txt")
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleConfig {
    pub project_id: String,
    pub observer: String,
    pub schedule_label: String,
    pub radiotelescope: String,
    pub receiver: String,

    /// \[MHz\]
    pub rest_frequency: Vec1<f64>,

    #[serde(default = "default_one")]
    pub repetitions: usize,

    /// Negative: never measure Tsys. Zero: once per scan. Otherwise every
    /// `tsys` subscans.
    #[serde(default = "default_tsys")]
    pub tsys: i64,

    #[serde(default = "default_one")]
    pub schedule_runs: usize,

    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Relative paths are relative to the configuration file.
    #[serde(default = "default_targets_file")]
    pub targets_file: PathBuf,

    #[serde(default)]
    pub scantypes: IndexMap<String, ScanTypeConfig>,

    #[serde(default)]
    pub backends: IndexMap<String, BackendConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
pub enum ScanTypeConfig {
    Cross {
        frame: Frame,
        length: Angle,

        /// \[deg/min\]
        speed: f64,
    },

    Point {
        frame: Frame,
        length: Angle,
        speed: f64,
    },

    OtfMap {
        frame: Frame,

        /// An axis name of `frame`, a generic one (LON, LAT) or BOTH.
        scan_axis: String,
        start_point: String,
        length_x: Angle,
        length_y: Angle,
        speed: f64,
        scans_per_beam: Option<usize>,
        spacing: Option<Angle>,
    },

    RasterMap {
        frame: Frame,
        scan_axis: String,
        start_point: String,
        length_x: Angle,
        length_y: Angle,

        /// \[seconds\] per sampled point
        duration: f64,
        scans_per_beam: Option<usize>,
        spacing: Option<Angle>,
        offset_interleave: Option<usize>,
    },

    OnOff {
        duration: f64,
        offset_frame: Option<Frame>,
        offset_lon: Angle,
        offset_lat: Angle,
        sequence: String,
    },

    Nodding {
        feed_a: usize,
        feed_b: usize,
        duration: f64,
        sequence: String,
    },

    Skydip {
        start: Angle,
        stop: Angle,
        duration: f64,

        /// Horizontal offsets of the reference subscan.
        offset_lon: Option<Angle>,
        offset_lat: Option<Angle>,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
pub enum BackendConfig {
    TotalPower {
        /// \[milliseconds\]
        integration: f64,
        sampling_interval: f64,

        /// \[MHz\]
        bandwidth: f64,
        feeds: Option<String>,
    },

    XArcos {
        configuration: String,
        feeds: Option<String>,
    },

    Sardara,
}

impl ScheduleConfig {
    /// Read a configuration file. The format is chosen by the file
    /// extension.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<ScheduleConfig, ConfigError> {
        let file = file.as_ref();
        debug!("Attempting to parse configuration file {}", file.display());

        let file_type = file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ConfigFileType::from_str(&e).ok())
            .ok_or_else(|| ConfigError::UnknownFileType {
                file: file.to_path_buf(),
                valid: CONFIG_FILE_TYPES_COMMA_SEPARATED.clone(),
            })?;
        let contents = std::fs::read_to_string(file).map_err(|err| ConfigError::IO {
            file: file.to_path_buf(),
            err,
        })?;

        match file_type {
            ConfigFileType::Toml => {
                debug!("Parsing toml file...");
                toml::from_str(&contents).map_err(|err| ConfigError::Parse {
                    file: file.to_path_buf(),
                    kind: "toml",
                    err: err.to_string(),
                })
            }
            ConfigFileType::Json => {
                debug!("Parsing json file...");
                serde_json::from_str(&contents).map_err(|err| ConfigError::Parse {
                    file: file.to_path_buf(),
                    kind: "json",
                    err: err.to_string(),
                })
            }
        }
    }

    /// Where the target file lives, given the directory holding the
    /// configuration file.
    pub fn targets_path(&self, config_dir: &Path) -> PathBuf {
        if self.targets_file.is_absolute() {
            self.targets_file.clone()
        } else {
            config_dir.join(&self.targets_file)
        }
    }

    /// Build the schedule: receiver, scan types and backends from this
    /// configuration, scans from the target file.
    pub fn build(&self, config_dir: &Path) -> Result<Schedule, ConfigError> {
        if !self.output_format.eq_ignore_ascii_case("fits") {
            return Err(ConfigError::OutputFormat(self.output_format.clone()));
        }
        if self.schedule_runs != 1 {
            warn!(
                "schedule_runs = {} is ignored; schedules are written for a single run",
                self.schedule_runs
            );
        }

        let mut schedule = Schedule::new(
            &self.project_id,
            &self.observer,
            &self.schedule_label,
            &self.radiotelescope,
            &self.receiver,
            self.rest_frequency.to_vec(),
        )?
        .with_defaults(self.repetitions, self.tsys);

        for (name, scantype) in &self.scantypes {
            schedule.add_scantype(name, scantype.to_kinds(name)?);
        }
        for (name, backend) in &self.backends {
            schedule.add_backend(name, backend.to_backend(name)?);
        }

        let targets_path = self.targets_path(config_dir);
        info!("Reading targets from {}", targets_path.display());
        let lines = parse_target_file(&targets_path, true)?;
        for line in lines {
            debug!("{}", line.line);
            schedule.add_scan(line.target, &line.scantype, &line.backend)?;
        }
        Ok(schedule)
    }
}

fn positive(scantype: &str, field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive {
            scantype: scantype.to_string(),
            field,
            value,
        })
    }
}

/// The scan axes named by `axis`; "BOTH" is the longitude then the latitude
/// axis.
fn scan_axes(scantype: &str, axis: &str, frame: Frame) -> Result<Vec<ScanAxis>, ConfigError> {
    if axis.trim().eq_ignore_ascii_case("BOTH") {
        return Ok(vec![ScanAxis::Lon, ScanAxis::Lat]);
    }
    let axis = ScanAxis::from_name(axis, frame).map_err(|_| ConfigError::InvalidAxis {
        scantype: scantype.to_string(),
        axis: axis.to_string(),
    })?;
    Ok(vec![axis])
}

fn start_point(scantype: &str, value: &str) -> Result<StartPoint, ConfigError> {
    StartPoint::from_str(value.trim()).map_err(|_| ConfigError::InvalidStartPoint {
        scantype: scantype.to_string(),
        value: value.to_string(),
    })
}

fn sampling(
    scantype: &str,
    scans_per_beam: Option<usize>,
    spacing: Option<Angle>,
) -> Result<MapSampling, ConfigError> {
    match (scans_per_beam.and_then(NonZeroUsize::new), spacing) {
        (Some(spb), None) => Ok(MapSampling::ScansPerBeam(spb)),
        (None, Some(spacing)) if scans_per_beam.is_none() => Ok(MapSampling::Spacing(spacing)),
        _ => Err(ConfigError::Sampling {
            scantype: scantype.to_string(),
        }),
    }
}

/// Split a sequence such as "[2a, b_cal, 3b]" into its lowercase elements.
fn sequence_elements(sequence: &str) -> Vec<String> {
    sequence
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.to_lowercase())
        .collect()
}

fn parse_sequence<P>(
    scantype: &str,
    sequence: &str,
    re: &Regex,
    position: impl Fn(&str) -> P,
) -> Result<Vec<SequenceElement<P>>, ConfigError> {
    let elements = sequence_elements(sequence);
    if elements.is_empty() {
        return Err(ConfigError::EmptySequence {
            scantype: scantype.to_string(),
        });
    }

    elements
        .iter()
        .map(|element| {
            let bad_element = || ConfigError::SequenceElement {
                scantype: scantype.to_string(),
                element: element.clone(),
            };
            let caps = re.captures(element).ok_or_else(bad_element)?;
            let repetitions = match &caps[1] {
                "" => 1,
                n => n.parse().map_err(|_| bad_element())?,
            };
            if repetitions == 0 {
                return Err(bad_element());
            }
            Ok(SequenceElement {
                repetitions,
                position: position(&caps[2]),
                is_cal: caps.get(3).is_some(),
            })
        })
        .collect()
}

/// Parse a nodding sequence, e.g. "[2a, b_cal, 3b]".
pub fn parse_nodding_sequence(
    scantype: &str,
    sequence: &str,
) -> Result<Vec<SequenceElement<NoddingFeed>>, ConfigError> {
    parse_sequence(scantype, sequence, &NODDING_ELEMENT_RE, |feed| {
        if feed == "a" {
            NoddingFeed::A
        } else {
            NoddingFeed::B
        }
    })
}

/// Parse an on-off sequence, e.g. "[on, 2off_cal]".
pub fn parse_onoff_sequence(
    scantype: &str,
    sequence: &str,
) -> Result<Vec<SequenceElement<OnOffPosition>>, ConfigError> {
    parse_sequence(scantype, sequence, &ONOFF_ELEMENT_RE, |position| {
        if position == "on" {
            OnOffPosition::On
        } else {
            OnOffPosition::Off
        }
    })
}

impl ScanTypeConfig {
    /// The scan modes of this scan type. Only maps with scan axis "BOTH"
    /// produce more than one.
    pub fn to_kinds(&self, name: &str) -> Result<Vec<ScanModeKind>, ConfigError> {
        let kinds = match self {
            ScanTypeConfig::Cross {
                frame,
                length,
                speed,
            } => vec![ScanModeKind::Cross(CrossScan {
                frame: *frame,
                length: *length,
                speed: positive(name, "speed", *speed)?,
            })],

            ScanTypeConfig::Point {
                frame,
                length,
                speed,
            } => vec![ScanModeKind::Point(PointScan {
                frame: *frame,
                length: *length,
                speed: positive(name, "speed", *speed)?,
            })],

            ScanTypeConfig::OtfMap {
                frame,
                scan_axis,
                start_point: start,
                length_x,
                length_y,
                speed,
                scans_per_beam,
                spacing,
            } => {
                let speed = positive(name, "speed", *speed)?;
                let start_point = start_point(name, start)?;
                let sampling = sampling(name, *scans_per_beam, *spacing)?;
                scan_axes(name, scan_axis, *frame)?
                    .into_iter()
                    .map(|scan_axis| {
                        ScanModeKind::OtfMap(OtfMapScan {
                            map: MapGeometry {
                                frame: *frame,
                                start_point,
                                scan_axis,
                                length_x: *length_x,
                                length_y: *length_y,
                                sampling,
                            },
                            speed,
                        })
                    })
                    .collect()
            }

            ScanTypeConfig::RasterMap {
                frame,
                scan_axis,
                start_point: start,
                length_x,
                length_y,
                duration,
                scans_per_beam,
                spacing,
                offset_interleave,
            } => {
                let duration = positive(name, "duration", *duration)?;
                let start_point = start_point(name, start)?;
                let sampling = sampling(name, *scans_per_beam, *spacing)?;
                let offset_interleave = match offset_interleave {
                    None => None,
                    Some(n) => Some(NonZeroUsize::new(*n).ok_or_else(|| {
                        ConfigError::ZeroOffsetInterleave {
                            scantype: name.to_string(),
                        }
                    })?),
                };
                scan_axes(name, scan_axis, *frame)?
                    .into_iter()
                    .map(|scan_axis| {
                        ScanModeKind::RasterMap(RasterMapScan {
                            map: MapGeometry {
                                frame: *frame,
                                start_point,
                                scan_axis,
                                length_x: *length_x,
                                length_y: *length_y,
                                sampling,
                            },
                            duration,
                            offset_interleave,
                        })
                    })
                    .collect()
            }

            ScanTypeConfig::OnOff {
                duration,
                offset_frame,
                offset_lon,
                offset_lat,
                sequence,
            } => vec![ScanModeKind::OnOff(OnOffScan {
                duration: positive(name, "duration", *duration)?,
                offset_lon: *offset_lon,
                offset_lat: *offset_lat,
                offset_frame: offset_frame.unwrap_or(Frame::Null),
                sequence: parse_onoff_sequence(name, sequence)?,
            })],

            ScanTypeConfig::Nodding {
                feed_a,
                feed_b,
                duration,
                sequence,
            } => vec![ScanModeKind::Nodding(NoddingScan {
                feed_a: *feed_a,
                feed_b: *feed_b,
                duration: positive(name, "duration", *duration)?,
                sequence: parse_nodding_sequence(name, sequence)?,
            })],

            ScanTypeConfig::Skydip {
                start,
                stop,
                duration,
                offset_lon,
                offset_lat,
            } => {
                let mut skydip =
                    SkydipScan::new(*start, *stop, positive(name, "duration", *duration)?);
                if offset_lon.is_some() || offset_lat.is_some() {
                    skydip.offset = Coord::new(
                        Frame::Hor,
                        offset_lon.unwrap_or_else(Angle::zero),
                        offset_lat.unwrap_or_else(Angle::zero),
                    );
                }
                vec![ScanModeKind::Skydip(skydip)]
            }
        };
        Ok(kinds)
    }
}

impl BackendConfig {
    pub fn to_backend(&self, name: &str) -> Result<Backend, ConfigError> {
        let backend = match self {
            BackendConfig::TotalPower {
                integration,
                sampling_interval,
                bandwidth,
                feeds,
            } => Backend::total_power(
                name,
                *integration,
                *sampling_interval,
                *bandwidth,
                feeds.clone(),
            )?,
            BackendConfig::XArcos {
                configuration,
                feeds,
            } => Backend::xarcos(name, configuration, feeds.clone()),
            BackendConfig::Sardara => Backend::sardara(name),
        };
        Ok(backend)
    }
}
