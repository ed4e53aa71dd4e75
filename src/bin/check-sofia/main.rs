//! Check one attribute of a Sofia-SIP profile or gateway
//!
//! The check is a straight line: enumerate what the switch knows about,
//! make sure the requested target is in that list, fetch the target's own
//! status document, pull out one attribute, hold it against the ranges and
//! say so. One line out, one exit code, no second attempts.

mod args;
mod attrs;
mod sofia;

use itertools::Itertools;
use structopt::StructOpt;

use freeswitch_plugins::perfdata::{check_output, Metric};
use freeswitch_plugins::thresholds;
use freeswitch_plugins::Status;

use crate::args::{Args, CheckTarget};
use crate::attrs::CALLS_LABEL;
use crate::sofia::{SofiaClient, SofiaError};

static USAGE: &str = "Usage: check-sofia [--profile=<name> | --gateway=<name>] \
                      [--attribute=<name>] [-w <range>] [-c <range>] [-f <title>]";

fn bail(e: SofiaError) -> ! {
    println!("{}: {}", Status::Unknown, e);
    Status::Unknown.exit();
}

fn not_found_message(kind: &str, name: &str, known: &[&str]) -> String {
    format!(
        "{}: {} {:?} not found, available {}s: {}",
        Status::Critical,
        kind,
        name,
        kind,
        known.iter().join(", ")
    )
}

#[cfg_attr(test, allow(dead_code))]
fn main() {
    let args = Args::from_args();
    if args.usage {
        println!("{}", USAGE);
        Status::Unknown.exit();
    }
    let request = args.into_request().unwrap_or_else(|err| {
        println!("{}: {}", err.status(), err);
        err.status().exit();
    });

    let client = SofiaClient::new();
    let switch = client.switch_status().unwrap_or_else(|e| bail(e));

    let extraction = match request.target {
        CheckTarget::Profile { ref name, attr } => {
            let summary = switch.profile(name).unwrap_or_else(|| {
                let known: Vec<_> = switch.profiles.iter().map(|p| p.name.as_str()).collect();
                println!("{}", not_found_message("profile", name, &known));
                Status::Critical.exit();
            });
            let detail = client.profile_detail(name).unwrap_or_else(|e| bail(e));
            attr.extract(summary, &detail).unwrap_or_else(|e| bail(e))
        }
        CheckTarget::Gateway { ref name, attr } => {
            if switch.gateway(name).is_none() {
                let known: Vec<_> = switch.gateways.iter().map(|g| g.name.as_str()).collect();
                println!("{}", not_found_message("gateway", name, &known));
                Status::Critical.exit();
            }
            let detail = client.gateway_detail(name).unwrap_or_else(|e| bail(e));
            attr.extract(&detail).unwrap_or_else(|e| bail(e))
        }
    };

    let verdict = thresholds::classify(
        extraction.value as f64,
        request.warning.as_ref(),
        request.critical.as_ref(),
    );
    let mut metrics = vec![Metric::new(&request.perfdata_label(), extraction.value)
        .with_thresholds(request.warning.clone(), request.critical.clone())];
    if let Some(calls) = extraction.calls {
        metrics.push(Metric::new(CALLS_LABEL, calls));
    }
    println!("{}", check_output(&extraction.rawdata, &metrics));
    verdict.exit();
}
