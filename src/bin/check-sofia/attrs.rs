//! The attribute dispatch table
//!
//! A check request names a target kind and an attribute; each (kind, attr)
//! pair maps to one extraction below. Profile and gateway attributes are
//! separate enums so an attribute that only makes sense for one kind can't
//! be asked of the other.

use std::fmt;
use std::str::FromStr;

use crate::sofia::{GatewayDetail, ProfileDetail, ProfileSummary, SofiaError};

pub(crate) const PROFILE_ATTRS: &[&str] = &[
    "url",
    "tls-url",
    "registrations",
    "failed-calls-in",
    "failed-calls-out",
    "calls",
];

pub(crate) const GATEWAY_ATTRS: &[&str] = &["to", "failed-calls-in", "failed-calls-out"];

/// Perfdata label for the current-call count that rides along with the
/// url/tls-url presence checks
pub(crate) const CALLS_LABEL: &str = "# of current calls";

/// What one attribute extraction produced
#[derive(Debug, PartialEq)]
pub(crate) struct Extraction {
    pub value: i64,
    pub rawdata: String,
    /// Current-call count, for attributes that report it as a second metric
    pub calls: Option<i64>,
}

/// An attribute string that isn't in the allowed set for its target kind
#[derive(Debug, PartialEq)]
pub(crate) struct UnknownAttribute {
    pub given: String,
    pub kind: &'static str,
    pub allowed: &'static [&'static str],
}

impl fmt::Display for UnknownAttribute {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:?} is not a {} attribute, allowed attributes are: {}",
            self.given,
            self.kind,
            self.allowed.join(", ")
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum ProfileAttr {
    Url,
    TlsUrl,
    Registrations,
    FailedCallsIn,
    FailedCallsOut,
    Calls,
}

impl FromStr for ProfileAttr {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<ProfileAttr, UnknownAttribute> {
        use self::ProfileAttr::*;
        match s {
            "url" => Ok(Url),
            "tls-url" => Ok(TlsUrl),
            "registrations" => Ok(Registrations),
            "failed-calls-in" => Ok(FailedCallsIn),
            "failed-calls-out" => Ok(FailedCallsOut),
            "calls" => Ok(Calls),
            _ => Err(UnknownAttribute {
                given: s.into(),
                kind: "profile",
                allowed: PROFILE_ATTRS,
            }),
        }
    }
}

impl fmt::Display for ProfileAttr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::ProfileAttr::*;
        let name = match *self {
            Url => "url",
            TlsUrl => "tls-url",
            Registrations => "registrations",
            FailedCallsIn => "failed-calls-in",
            FailedCallsOut => "failed-calls-out",
            Calls => "calls",
        };
        write!(f, "{}", name)
    }
}

impl ProfileAttr {
    pub fn extract(
        self,
        summary: &ProfileSummary,
        detail: &ProfileDetail,
    ) -> Result<Extraction, SofiaError> {
        use self::ProfileAttr::*;
        Ok(match self {
            Url => presence(&detail.url, summary.calls),
            TlsUrl => presence(&detail.tls_url, summary.calls),
            Registrations => {
                let n = numeric(&detail.registrations, "registrations")?;
                Extraction {
                    value: n,
                    rawdata: format!("{} registrations", n),
                    calls: None,
                }
            }
            FailedCallsIn => counter(&detail.failed_calls_in, "failed-calls-in")?,
            FailedCallsOut => counter(&detail.failed_calls_out, "failed-calls-out")?,
            // the global enumeration already carries the live count; the
            // scoped document's counters are not consulted
            Calls => Extraction {
                value: summary.calls as i64,
                rawdata: format!("{} current calls", summary.calls),
                calls: None,
            },
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum GatewayAttr {
    To,
    FailedCallsIn,
    FailedCallsOut,
}

impl FromStr for GatewayAttr {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<GatewayAttr, UnknownAttribute> {
        use self::GatewayAttr::*;
        match s {
            "to" => Ok(To),
            "failed-calls-in" => Ok(FailedCallsIn),
            "failed-calls-out" => Ok(FailedCallsOut),
            _ => Err(UnknownAttribute {
                given: s.into(),
                kind: "gateway",
                allowed: GATEWAY_ATTRS,
            }),
        }
    }
}

impl fmt::Display for GatewayAttr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::GatewayAttr::*;
        let name = match *self {
            To => "to",
            FailedCallsIn => "failed-calls-in",
            FailedCallsOut => "failed-calls-out",
        };
        write!(f, "{}", name)
    }
}

impl GatewayAttr {
    pub fn extract(self, detail: &GatewayDetail) -> Result<Extraction, SofiaError> {
        use self::GatewayAttr::*;
        Ok(match self {
            To => {
                let up = detail.state == "REGED" && detail.status == "UP";
                Extraction {
                    value: up as i64,
                    rawdata: format!("{} {} ({})", detail.to, detail.state, detail.status),
                    calls: None,
                }
            }
            FailedCallsIn => counter(&detail.failed_calls_in, "failed-calls-in")?,
            FailedCallsOut => counter(&detail.failed_calls_out, "failed-calls-out")?,
        })
    }
}

/// 1 if the field has text, 0 if it's empty or the switch left it out
fn presence(url: &str, calls: u64) -> Extraction {
    Extraction {
        value: if url.is_empty() { 0 } else { 1 },
        rawdata: url.to_owned(),
        calls: Some(calls as i64),
    }
}

/// A failure counter, reported as a running total
fn counter(field: &str, name: &str) -> Result<Extraction, SofiaError> {
    let n = numeric(field, name)?;
    Ok(Extraction {
        value: n,
        rawdata: format!("{} total", n),
        calls: None,
    })
}

/// Absent fields count as zero; anything else must be a number
fn numeric(field: &str, name: &str) -> Result<i64, SofiaError> {
    if field.is_empty() {
        return Ok(0);
    }
    field.parse().map_err(|_| {
        SofiaError::Parse(format!("the {} field is not numeric: {:?}", name, field))
    })
}
