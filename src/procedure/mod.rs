// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Procedures: named, parameterised command templates.
//!
//! A procedure is *defined* once in the procedure file (see the [`Display`]
//! impl) and *invoked* from the schedule by name (see
//! [`Procedure::invocation`]). Placeholders in the body are written `$1`,
//! `$2`, ... Procedures can be joined with `+`; the null procedure is the
//! identity of that operation.

mod error;

pub use error::ProcedureError;

use std::{
    fmt::Display,
    hash::{Hash, Hasher},
    ops::Add,
};

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::constants::PROC_PREFIX;

/// Time to wait before issuing a Tsys measurement \[seconds\].
const TSYS_WAIT_TIME: f64 = 2.0;

lazy_static! {
    static ref PLACEHOLDER_RE: Regex = Regex::new(r"\$(\d+)").unwrap();

    pub static ref FTRACK: Procedure = Procedure::new("FTRACK", 1, "\tftrack=$1\n", true);
    pub static ref RSTFREQ: Procedure =
        Procedure::new("restFrequency", 1, "\trestFrequency=$1\n", true);
    pub static ref DEROTATOR: Procedure =
        Procedure::new("DEROTATOR", 1, "\tderotatorSetConfiguration=$1\n", true);
    pub static ref DEROTATORFIXED: Procedure =
        Procedure::new("DEROTATORFIXED", 0, "\tderotatorSetConfiguration=FIXED\n", true);
    pub static ref DEROTATORBSC: Procedure =
        Procedure::new("DEROTATORBSC", 0, "\tderotatorSetConfiguration=BSC\n", true);
    pub static ref WAIT: Procedure = Procedure::new("WAIT", 1, "\twait=$1\n", true);
    pub static ref TSYS: Procedure = Procedure::new(
        "TSYS",
        0,
        &format!("\twait={TSYS_WAIT_TIME:.6}\n\ttsys\n\twait=1\n"),
        false
    );
    pub static ref INIT: Procedure = Procedure::new("INIT", 0, "\tnop\n", false);
    pub static ref CALON: Procedure = Procedure::new("CALON", 0, "\tcalon\n", false);
    pub static ref CALOFF: Procedure = Procedure::new("CALOFF", 0, "\tcaloff\n", false);
    pub static ref NULL: Procedure = Procedure::new("NULL", 0, "", false);
}

/// Equality and hashing only consider the name, the parameter count and the
/// body, so that procedures can be deduplicated when the procedure file is
/// written.
#[derive(Debug, Clone)]
pub struct Procedure {
    name: String,
    nparams: usize,
    body: String,
    specializable: bool,
    bound: Option<Vec<String>>,
}

impl Procedure {
    /// The name is upper-cased.
    pub fn new(name: &str, nparams: usize, body: &str, specializable: bool) -> Procedure {
        Procedure {
            name: name.to_uppercase(),
            nparams,
            body: body.to_string(),
            specializable,
            bound: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nparams(&self) -> usize {
        self.nparams
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn is_specializable(&self) -> bool {
        self.specializable
    }

    pub fn is_null(&self) -> bool {
        self.nparams == 0 && self.body.is_empty()
    }

    /// Bind concrete arguments. The result can no longer be specialised, and
    /// [`Procedure::invocation`] will use the bound values.
    pub fn specialize<T: ToString>(&self, args: &[T]) -> Result<Procedure, ProcedureError> {
        if !self.specializable {
            return Err(ProcedureError::NotSpecializable(self.name.clone()));
        }
        if args.len() != self.nparams {
            return Err(ProcedureError::Arity {
                name: self.name.clone(),
                expected: self.nparams,
                got: args.len(),
            });
        }
        Ok(Procedure {
            specializable: false,
            bound: Some(args.iter().map(|a| a.to_string()).collect()),
            ..self.clone()
        })
    }

    /// The text that calls this procedure from the schedule, e.g.
    /// `PROCEDURE_WAIT=2.5`. Any arguments previously bound with
    /// [`Procedure::specialize`] come first.
    pub fn execute<T: ToString>(&self, args: &[T]) -> Result<String, ProcedureError> {
        let mut all: Vec<String> = self.bound.clone().unwrap_or_default();
        all.extend(args.iter().map(|a| a.to_string()));
        if all.len() != self.nparams {
            return Err(ProcedureError::Arity {
                name: self.name.clone(),
                expected: self.nparams,
                got: all.len(),
            });
        }

        let mut s = format!("{PROC_PREFIX}{}", self.name);
        if self.nparams > 0 {
            s.push('=');
            s.push_str(&all.join(","));
        }
        Ok(s)
    }

    /// [`Procedure::execute`] without any extra arguments.
    pub fn invocation(&self) -> Result<String, ProcedureError> {
        self.execute::<String>(&[])
    }
}

/// Shift every `$n` placeholder in `body` by `inc`.
fn shift_placeholders(body: &str, inc: usize) -> String {
    PLACEHOLDER_RE
        .replace_all(body, |caps: &Captures| {
            // The regex only matches digits; a parse failure means an absurdly
            // large index, which is left untouched.
            match caps[1].parse::<usize>() {
                Ok(n) => format!("${}", n + inc),
                Err(_) => caps[0].to_string(),
            }
        })
        .into_owned()
}

impl Add for Procedure {
    type Output = Procedure;

    fn add(self, rhs: Procedure) -> Procedure {
        if rhs.is_null() {
            return self;
        }
        if self.is_null() {
            return rhs;
        }

        let body = if self.nparams > 0 && rhs.nparams > 0 {
            format!("{}{}", self.body, shift_placeholders(&rhs.body, self.nparams))
        } else {
            format!("{}{}", self.body, rhs.body)
        };
        let bound = match (self.bound, rhs.bound) {
            (None, None) => None,
            (l, r) => Some(
                l.unwrap_or_default()
                    .into_iter()
                    .chain(r.unwrap_or_default())
                    .collect(),
            ),
        };
        Procedure {
            name: format!("{}_{}", self.name, rhs.name),
            nparams: self.nparams + rhs.nparams,
            body,
            specializable: self.specializable || rhs.specializable,
            bound,
        }
    }
}

impl Add for &Procedure {
    type Output = Procedure;

    fn add(self, rhs: &Procedure) -> Procedure {
        self.clone() + rhs.clone()
    }
}

impl PartialEq for Procedure {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.nparams == other.nparams && self.body == other.body
    }
}

impl Eq for Procedure {}

impl Hash for Procedure {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.nparams.hash(state);
        self.body.hash(state);
    }
}

impl Default for Procedure {
    fn default() -> Self {
        NULL.clone()
    }
}

/// The definition as written into the procedure file.
impl Display for Procedure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{PROC_PREFIX}{}", self.name)?;
        if self.nparams > 0 {
            write!(f, "({})", self.nparams)?;
        }
        write!(f, "{{\n{}}}\n", self.body)
    }
}
