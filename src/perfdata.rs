//! Performance-data rendering
//!
//! Supervisors split a plugin's output line on `|`: the left side is for
//! humans, the right side is `label=value[;warn[;crit]]` tokens for
//! trending. Labels must not contain spaces, so `Metric` swaps them for
//! underscores on construction.

use std::fmt;

use itertools::Itertools;

use crate::thresholds::ThresholdRange;

/// One `label=value` perfdata token
#[derive(Clone, Debug, PartialEq)]
pub struct Metric {
    label: String,
    value: i64,
    warning: Option<ThresholdRange>,
    critical: Option<ThresholdRange>,
}

impl Metric {
    pub fn new(label: &str, value: i64) -> Metric {
        Metric {
            label: label.replace(' ', "_"),
            value,
            warning: None,
            critical: None,
        }
    }

    /// Annotate the token with the ranges the check was run with
    pub fn with_thresholds(
        mut self,
        warning: Option<ThresholdRange>,
        critical: Option<ThresholdRange>,
    ) -> Metric {
        self.warning = warning;
        self.critical = critical;
        self
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}={}", self.label, self.value)?;
        match (&self.warning, &self.critical) {
            (None, None) => Ok(()),
            (Some(warn), None) => write!(f, ";{}", warn),
            // the warn slot stays, empty, so crit lands in the right field
            (None, Some(crit)) => write!(f, ";;{}", crit),
            (Some(warn), Some(crit)) => write!(f, ";{};{}", warn, crit),
        }
    }
}

/// Collapse every run of whitespace down to a single space
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().join(" ")
}

/// The full line a plugin prints before exiting
pub fn check_output(rawdata: &str, metrics: &[Metric]) -> String {
    format!(
        "Result of check is: {} | {}",
        collapse_whitespace(rawdata),
        metrics.iter().join(" ")
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn labels_lose_their_spaces() {
        let m = Metric::new("# of current calls", 3);
        assert_eq!(m.to_string(), "#_of_current_calls=3");
    }

    #[test]
    fn thresholds_fill_their_slots() {
        let warn: ThresholdRange = "10:20".parse().unwrap();
        let crit: ThresholdRange = "5:30".parse().unwrap();
        let m = Metric::new("calls", 3);
        assert_eq!(
            m.clone()
                .with_thresholds(Some(warn.clone()), Some(crit.clone()))
                .to_string(),
            "calls=3;10:20;5:30"
        );
        assert_eq!(
            m.clone().with_thresholds(Some(warn), None).to_string(),
            "calls=3;10:20"
        );
        assert_eq!(
            m.clone().with_thresholds(None, Some(crit)).to_string(),
            "calls=3;;5:30"
        );
        assert_eq!(m.to_string(), "calls=3");
    }

    #[test]
    fn whitespace_collapses() {
        assert_eq!(
            collapse_whitespace("  sip:x@y    REGED\t(UP) "),
            "sip:x@y REGED (UP)"
        );
    }

    #[test]
    fn output_line_is_one_line() {
        let metrics = vec![
            Metric::new("sofia/status/internal/url", 1),
            Metric::new("# of current calls", 2),
        ];
        assert_eq!(
            check_output("sip:mod_sofia@10.0.0.1:5060", &metrics),
            "Result of check is: sip:mod_sofia@10.0.0.1:5060 | \
             sofia/status/internal/url=1 #_of_current_calls=2"
        );
    }
}
