// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Data acquisition backends, as written to the backend file.

#[cfg(test)]
mod tests;

use std::{
    fmt::Display,
    hash::{Hash, Hasher},
};

use log::debug;

use crate::schedule::ScheduleError;

/// Bandwidths \[MHz\] of the total power filters.
pub const TOTALPOWER_FILTERS: &[f64] = &[300.0, 730.0, 1250.0, 2000.0];

#[derive(Debug, Clone)]
pub struct TotalPower {
    /// \[milliseconds\]
    pub integration: f64,

    /// \[seconds\]
    pub sampling_interval: f64,

    /// \[MHz\]
    pub bandwidth: f64,

    /// Enabled feeds, passed verbatim to the backend.
    pub feeds: Option<String>,

    /// (section, bandwidth) couples, one per receiver IF.
    sections: Vec<(usize, f64)>,
}

impl TotalPower {
    pub fn sections(&self) -> &[(usize, f64)] {
        &self.sections
    }
}

#[derive(Debug, Clone)]
pub enum BackendKind {
    TotalPower(TotalPower),

    /// The XArcos spectrometer. A configuration of "SKIP" leaves the
    /// backend untouched.
    XArcos {
        configuration: String,
        feeds: Option<String>,
    },

    /// The Sardara (ROACH) backend, configured elsewhere.
    Sardara,
}

/// A named backend. Equality and hashing consider every parameter, so
/// backends with the same definition collapse into one backend file entry.
#[derive(Debug, Clone)]
pub struct Backend {
    pub name: String,
    pub kind: BackendKind,
}

impl Backend {
    pub fn total_power(
        name: &str,
        integration: f64,
        sampling_interval: f64,
        bandwidth: f64,
        feeds: Option<String>,
    ) -> Result<Backend, ScheduleError> {
        if !TOTALPOWER_FILTERS.contains(&bandwidth) {
            return Err(ScheduleError::InvalidBandwidth {
                backend: name.to_string(),
                bandwidth,
                valid: TOTALPOWER_FILTERS,
            });
        }
        Ok(Backend {
            name: name.to_string(),
            kind: BackendKind::TotalPower(TotalPower {
                integration,
                sampling_interval,
                bandwidth,
                feeds,
                sections: vec![],
            }),
        })
    }

    pub fn xarcos(name: &str, configuration: &str, feeds: Option<String>) -> Backend {
        Backend {
            name: name.to_string(),
            kind: BackendKind::XArcos {
                configuration: configuration.to_string(),
                feeds,
            },
        }
    }

    pub fn sardara(name: &str) -> Backend {
        Backend {
            name: name.to_string(),
            kind: BackendKind::Sardara,
        }
    }

    /// The type name understood by the antenna control system.
    pub fn typename(&self) -> &'static str {
        match self.kind {
            BackendKind::TotalPower(_) => "TotalPower",
            BackendKind::XArcos { .. } => "XBackends",
            BackendKind::Sardara => "Sardara",
        }
    }

    /// Can this backend take part in Tsys measurements?
    pub fn can_tsys(&self) -> bool {
        !matches!(self.kind, BackendKind::XArcos { .. })
    }

    /// Configure one total power section per receiver IF. Other backends
    /// are left alone.
    pub fn set_sections(&mut self, nifs: usize) {
        if let BackendKind::TotalPower(tp) = &mut self.kind {
            tp.sections = (0..nifs).map(|i| (i, tp.bandwidth)).collect();
            debug!(
                "backend {}: {nifs} sections at {} MHz",
                self.name, tp.bandwidth
            );
        }
    }

    fn instructions(&self) -> String {
        match &self.kind {
            BackendKind::TotalPower(tp) => {
                let rate = 1.0 / (tp.sampling_interval * 1000.0);
                let mut s: String = tp
                    .sections
                    .iter()
                    .map(|(i, bw)| format!("\tsetSection={i},*,{bw:.6},*,*,{rate:.6},*\n"))
                    .collect();
                s.push_str(&format!("\tintegration={}\n", tp.integration.trunc() as i64));
                if let Some(feeds) = &tp.feeds {
                    s.push_str(&format!("\tenable={feeds}\n"));
                }
                s.push('\n');
                s
            }
            BackendKind::XArcos {
                configuration,
                feeds,
            } => {
                if configuration.eq_ignore_ascii_case("SKIP") {
                    return String::new();
                }
                let mut s = format!("\tinitialize={configuration}\n");
                if let Some(feeds) = feeds {
                    s.push_str(&format!("\tenable={feeds}\n"));
                }
                s
            }
            BackendKind::Sardara => String::new(),
        }
    }

    /// Every parameter, with floats compared bitwise.
    fn key(&self) -> (&str, &'static str, Vec<u64>, Option<&str>, Option<&str>) {
        match &self.kind {
            BackendKind::TotalPower(tp) => {
                let mut numbers = vec![
                    tp.integration.to_bits(),
                    tp.sampling_interval.to_bits(),
                    tp.bandwidth.to_bits(),
                ];
                for (i, bw) in &tp.sections {
                    numbers.push(*i as u64);
                    numbers.push(bw.to_bits());
                }
                (
                    &self.name,
                    self.typename(),
                    numbers,
                    None,
                    tp.feeds.as_deref(),
                )
            }
            BackendKind::XArcos {
                configuration,
                feeds,
            } => (
                &self.name,
                self.typename(),
                vec![],
                Some(configuration.as_str()),
                feeds.as_deref(),
            ),
            BackendKind::Sardara => (&self.name, self.typename(), vec![], None, None),
        }
    }
}

impl PartialEq for Backend {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Backend {}

impl Hash for Backend {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// The definition as written into the backend file.
impl Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:BACKENDS/{}{{\n{}}}\n",
            self.name,
            self.typename(),
            self.instructions()
        )
    }
}
