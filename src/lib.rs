//! Monitoring plugins for FreeSWITCH-style telephony switches
//!
//! The goal is to provide the checks that a switch operator actually runs
//! from a monitoring supervisor (nagios, sensu, icinga and friends),
//! strongly typed and fast to execute, speaking the standard plugin
//! protocol: one status line on stdout, machine-readable perfdata after a
//! pipe, and an exit code the supervisor understands.
//!
//! The library holds the pieces every check needs -- the [`Status`] exit
//! contract, [`thresholds`] range parsing and [`perfdata`] rendering --
//! and each check is its own binary under `src/bin`.
//!
//! See the [scripts](scripts/index.html) docs for the checks themselves.

use std::fmt;
use std::process;
use std::str::FromStr;

pub mod perfdata;
pub mod scripts;
pub mod thresholds;

/// The four states a monitoring check can finish in
///
/// The variants are ordered by severity so that `std::cmp::max` merges two
/// verdicts into the one worth reporting.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Status {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Status {
    /// Terminate the process with the exit code supervisors expect
    pub fn exit(self) -> ! {
        use crate::Status::*;
        match self {
            Ok => process::exit(0),
            Warning => process::exit(1),
            Critical => process::exit(2),
            Unknown => process::exit(3),
        }
    }

    /// The strings accepted by `FromStr`, for clap `possible_values`
    pub fn str_values() -> [&'static str; 4] {
        ["ok", "warning", "critical", "unknown"]
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use crate::Status::*;
        match *self {
            Ok => write!(f, "OK"),
            Warning => write!(f, "WARNING"),
            Critical => write!(f, "CRITICAL"),
            Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Error for strings that don't name a `Status`
#[derive(Debug, PartialEq)]
pub struct ParseStatusError {
    given: String,
}

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "unexpected status {:?}, expected one of ok/warning/critical/unknown",
            self.given
        )
    }
}

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Status, ParseStatusError> {
        match s {
            "ok" => Ok(Status::Ok),
            "warn" | "warning" => Ok(Status::Warning),
            "critical" => Ok(Status::Critical),
            "unknown" => Ok(Status::Unknown),
            _ => Err(ParseStatusError { given: s.into() }),
        }
    }
}
