//! CLI definition and validation
//!
//! Raw flags come in through structopt; `Args::into_request` turns them
//! into a `CheckRequest` or rejects them before anything touches the
//! switch. Rejections carry the exit status they should terminate with:
//! a bad attribute is a CRITICAL (it names a thing the switch will never
//! have), everything else wrong on the command line is an UNKNOWN.

use std::fmt;

use structopt::StructOpt;

use freeswitch_plugins::thresholds::ThresholdRange;
use freeswitch_plugins::Status;

use crate::attrs::{GatewayAttr, ProfileAttr, UnknownAttribute};

/// Check one attribute of a Sofia-SIP profile or gateway.
///
/// Asks the local switch for its sofia status, picks out the requested
/// attribute and compares it against the warning/critical ranges.
#[derive(Debug, StructOpt)]
#[structopt(
    name = "check-sofia (part of freeswitch-plugins)",
    setting = structopt::clap::AppSettings::ColoredHelp,
    after_help = "Examples:

    Alert if the internal profile has lost its SIP url:

        check-sofia --profile=internal --critical=1:

    Alert if a carrier gateway is not registered and up:

        check-sofia --gateway=carrier-a --critical=1:

    Warn on more than 20 failed outbound calls:

        check-sofia --profile=external --attribute=failed-calls-out --warning=:20

Attributes:

    profile: url, tls-url, registrations, failed-calls-in,
             failed-calls-out, calls
    gateway: to, failed-calls-in, failed-calls-out

    On a gateway the default attribute \"url\" is read as \"to\"."
)]
pub(crate) struct Args {
    #[structopt(long = "profile", value_name = "name", help = "SIP profile to check")]
    pub profile: Option<String>,
    #[structopt(
        long = "gateway",
        value_name = "name",
        help = "Gateway to check instead of a profile; wins if both are given"
    )]
    pub gateway: Option<String>,
    #[structopt(
        long = "attribute",
        value_name = "name",
        default_value = "url",
        help = "Attribute to check, see Attributes below"
    )]
    pub attribute: String,
    #[structopt(
        short = "w",
        long = "warning",
        value_name = "range",
        help = "Warning range, [@]start:end"
    )]
    pub warning: Option<String>,
    #[structopt(
        short = "c",
        long = "critical",
        value_name = "range",
        help = "Critical range, [@]start:end"
    )]
    pub critical: Option<String>,
    #[structopt(
        short = "f",
        long = "perfdatatitle",
        value_name = "title",
        help = "Label for the primary perfdata metric"
    )]
    pub perfdatatitle: Option<String>,
    #[structopt(long = "usage", help = "Print a brief usage synopsis and exit")]
    pub usage: bool,
}

/// What the check will actually do, post-validation
#[derive(Debug, PartialEq)]
pub(crate) enum CheckTarget {
    Profile { name: String, attr: ProfileAttr },
    Gateway { name: String, attr: GatewayAttr },
}

#[derive(Debug, PartialEq)]
pub(crate) struct CheckRequest {
    pub target: CheckTarget,
    pub warning: Option<ThresholdRange>,
    pub critical: Option<ThresholdRange>,
    pub perfdata_title: Option<String>,
}

impl CheckRequest {
    /// The label the primary metric is reported under
    pub fn perfdata_label(&self) -> String {
        if let Some(ref title) = self.perfdata_title {
            return title.clone();
        }
        match self.target {
            CheckTarget::Profile { ref name, attr } => format!("sofia/status/{}/{}", name, attr),
            CheckTarget::Gateway { ref name, attr } => format!("sofia/status/{}/{}", name, attr),
        }
    }
}

/// A command line the check refuses to run with
#[derive(Debug, PartialEq)]
pub(crate) enum ArgsError {
    Config(String),
    Attribute(UnknownAttribute),
}

impl ArgsError {
    pub fn status(&self) -> Status {
        match self {
            ArgsError::Config(_) => Status::Unknown,
            ArgsError::Attribute(_) => Status::Critical,
        }
    }
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArgsError::Config(msg) => write!(f, "{}", msg),
            ArgsError::Attribute(err) => write!(f, "{}", err),
        }
    }
}

fn parse_range(which: &str, spec: Option<&str>) -> Result<Option<ThresholdRange>, ArgsError> {
    match spec {
        None => Ok(None),
        Some(text) => text
            .parse()
            .map(Some)
            .map_err(|e| ArgsError::Config(format!("bad --{} value: {}", which, e))),
    }
}

impl Args {
    pub fn into_request(self) -> Result<CheckRequest, ArgsError> {
        let warning = parse_range("warning", self.warning.as_deref())?;
        let critical = parse_range("critical", self.critical.as_deref())?;
        // gateway wins over profile, matching the switch CLI's own habits
        let target = if let Some(name) = self.gateway {
            let attr_name = if self.attribute == "url" {
                "to"
            } else {
                self.attribute.as_str()
            };
            let attr = attr_name.parse().map_err(ArgsError::Attribute)?;
            CheckTarget::Gateway { name, attr }
        } else if let Some(name) = self.profile {
            let attr = self.attribute.parse().map_err(ArgsError::Attribute)?;
            CheckTarget::Profile { name, attr }
        } else {
            return Err(ArgsError::Config(
                "one of --profile or --gateway is required".into(),
            ));
        };
        Ok(CheckRequest {
            target,
            warning,
            critical,
            perfdata_title: self.perfdatatitle,
        })
    }
}
