//! Warning/critical threshold ranges
//!
//! A range is written `[@]start:end` and marks the values a check is
//! allowed to take. A value outside the range raises the alert; a leading
//! `@` flips that, alerting on values *inside* the range. Either bound may
//! be left out: a missing start means negative infinity, a missing end
//! positive infinity, and a bare `N` is shorthand for `:N`. Both bounds
//! are inclusive.
//!
//! ```rust
//! use freeswitch_plugins::thresholds::ThresholdRange;
//!
//! let range: ThresholdRange = "10:20".parse().unwrap();
//! assert!(!range.alerts(10.0));
//! assert!(range.alerts(21.0));
//! ```

use std::fmt;
use std::str::FromStr;

use crate::Status;

/// One parsed `[@]start:end` range
///
/// Keeps the text it was parsed from so perfdata can carry the operator's
/// spelling through unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdRange {
    start: f64,
    end: f64,
    inside: bool,
    source: String,
}

impl ThresholdRange {
    /// Whether `value` breaches this range
    pub fn alerts(&self, value: f64) -> bool {
        if self.inside {
            value >= self.start && value <= self.end
        } else {
            value < self.start || value > self.end
        }
    }
}

impl fmt::Display for ThresholdRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// Error describing why a range string didn't parse
#[derive(Debug, PartialEq)]
pub struct ParseRangeError {
    given: String,
    reason: String,
}

impl fmt::Display for ParseRangeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid range {:?}: {}", self.given, self.reason)
    }
}

fn parse_bound(text: &str, missing: f64, err: impl Fn(&str) -> ParseRangeError) -> Result<f64, ParseRangeError> {
    match text {
        "" => Ok(missing),
        // `~` is the classic spelling for an unbounded start
        "~" => Ok(std::f64::NEG_INFINITY),
        _ => text.parse().map_err(|_| err(text)),
    }
}

impl FromStr for ThresholdRange {
    type Err = ParseRangeError;

    fn from_str(s: &str) -> Result<ThresholdRange, ParseRangeError> {
        let err = |reason: String| ParseRangeError {
            given: s.into(),
            reason,
        };
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(err("empty range".into()));
        }
        let (inside, rest) = if let Some(stripped) = trimmed.strip_prefix('@') {
            (true, stripped)
        } else {
            (false, trimmed)
        };
        if rest.is_empty() {
            return Err(err("empty range".into()));
        }
        let (start_text, end_text) = match rest.find(':') {
            Some(at) => (&rest[..at], &rest[at + 1..]),
            // bare value is an upper bound
            None => ("", rest),
        };
        let start = parse_bound(start_text, std::f64::NEG_INFINITY, |t| {
            err(format!("start bound {:?} is not a number", t))
        })?;
        let end = parse_bound(end_text, std::f64::INFINITY, |t| {
            err(format!("end bound {:?} is not a number", t))
        })?;
        if start > end {
            return Err(err(format!("start {} is greater than end {}", start, end)));
        }
        Ok(ThresholdRange {
            start,
            end,
            inside,
            source: trimmed.into(),
        })
    }
}

/// Classify `value` against optional warning and critical ranges
///
/// Critical wins when both ranges are breached.
pub fn classify(
    value: f64,
    warning: Option<&ThresholdRange>,
    critical: Option<&ThresholdRange>,
) -> Status {
    if critical.map_or(false, |r| r.alerts(value)) {
        Status::Critical
    } else if warning.map_or(false, |r| r.alerts(value)) {
        Status::Warning
    } else {
        Status::Ok
    }
}
