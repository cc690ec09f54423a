// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parse target list files.
//!
//! Each non-empty, non-comment line looks like
//!
//! `<label> <scantype> <backend> <eq|hor|gal> <lon> <lat> [key=value ...]`

use std::path::Path;

use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::Regex;

use super::*;
use crate::angle::Angle;

lazy_static! {
    static ref TARGET_RE: Regex = Regex::new(
        r"(?i)^(?P<label>\S+)\s+(?P<scantype>\S+)\s+(?P<backend>\S+)\s+(?P<frame>eq|hor|gal)\s+(?P<lon>\S+)\s+(?P<lat>\S+)\s*(?P<options>.*)$"
    )
    .unwrap();
    static ref OPTION_RE: Regex = Regex::new(r"(?P<key>[^\s=]+)\s*=\s*(?P<val>\S+)").unwrap();
}

/// A parsed target line.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetLine {
    pub target: Target,
    pub scantype: String,
    pub backend: String,

    /// The line as read from the file.
    pub line: String,
}

fn invalid_option(option: &str, value: &str, reason: impl ToString) -> TargetParseError {
    TargetParseError::InvalidOption {
        option: option.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Offsets on target lines must be decimal degrees.
fn parse_decimal_angle(option: &str, value: &str) -> Result<Angle, TargetParseError> {
    let angle = Angle::parse(value)?;
    if angle.format() != crate::angle::AngleFormat::Decimal {
        return Err(invalid_option(option, value, "expected decimal degrees, e.g. 0.5d"));
    }
    Ok(angle)
}

/// Parse a single target line.
pub fn parse_target_line(line: &str) -> Result<TargetLine, TargetParseError> {
    let line = line.trim();
    let caps = TARGET_RE
        .captures(line)
        .ok_or_else(|| TargetParseError::InvalidLine(line.to_string()))?;
    debug!("parsing target line: {line}");

    let frame: Frame = caps["frame"]
        .parse()
        .map_err(|_| TargetParseError::InvalidLine(line.to_string()))?;
    let coord = Coord::new(frame, Angle::parse(&caps["lon"])?, Angle::parse(&caps["lat"])?);
    let mut target = Target::new(&caps["label"], coord);

    let mut offset_frame = Frame::Null;
    let mut offset_lon = Angle::zero();
    let mut offset_lat = Angle::zero();
    let mut svel = None;
    let mut vdef = None;
    let mut vref = None;
    for opt in OPTION_RE.captures_iter(&caps["options"]) {
        let (key, val) = (&opt["key"], &opt["val"]);
        match key.to_lowercase().as_str() {
            "offset_lon" => offset_lon = parse_decimal_angle(key, val)?,
            "offset_lat" => offset_lat = parse_decimal_angle(key, val)?,
            "offset_frame" => {
                offset_frame = val.parse().map_err(|e| invalid_option(key, val, e))?
            }
            "tsys" => target.tsys = Some(val.parse().map_err(|e| invalid_option(key, val, e))?),
            "repetitions" => {
                target.repetitions = Some(val.parse().map_err(|e| invalid_option(key, val, e))?)
            }
            "svel" => svel = Some(val.parse::<f64>().map_err(|e| invalid_option(key, val, e))?),
            "vdef" => {
                vdef = Some(
                    val.parse::<VelocityDefinition>()
                        .map_err(|e| invalid_option(key, val, e))?,
                )
            }
            "vref" => {
                vref = Some(
                    val.parse::<VelocityReference>()
                        .map_err(|e| invalid_option(key, val, e))?,
                )
            }
            _ => warn!("Ignoring unknown option '{key}' for target {}", target.label),
        }
    }
    target.offset = Coord::new(offset_frame, offset_lon, offset_lat);
    if let (Some(value), Some(definition), Some(reference)) = (svel, vdef, vref) {
        target.velocity = Velocity::new(value, definition, reference);
    }

    Ok(TargetLine {
        target,
        scantype: caps["scantype"].to_string(),
        backend: caps["backend"].to_string(),
        line: line.to_string(),
    })
}

/// Parse the contents of a target file. Blank lines and lines starting with
/// '#' are ignored, lines that don't look like targets are skipped with a
/// warning. When `check_values` is set, every target must also pass
/// [`Target::check_consistency`].
pub fn parse_targets(contents: &str, check_values: bool) -> Result<Vec<TargetLine>, TargetParseError> {
    let mut targets = vec![];
    for line in contents
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
    {
        match parse_target_line(line) {
            Ok(t) => {
                if check_values {
                    t.target.check_consistency()?;
                }
                targets.push(t);
            }
            Err(TargetParseError::InvalidLine(l)) => warn!("invalid target line: {l}"),
            Err(e) => return Err(e),
        }
    }
    info!("Parsed {} targets", targets.len());
    Ok(targets)
}

/// Read and parse a target file.
pub fn parse_target_file<P: AsRef<Path>>(
    file: P,
    check_values: bool,
) -> Result<Vec<TargetLine>, TargetParseError> {
    let file = file.as_ref();
    let contents = std::fs::read_to_string(file).map_err(|err| TargetParseError::IO {
        file: file.display().to_string(),
        err,
    })?;
    parse_targets(&contents, check_values)
}
