//! Documentation for the various scripts contained herein
//!
//! - [check-sofia](#check-sofia)
//!
//! # check-sofia
//!
//! Requires access to the switch's `fs_cli` admin binary.
//!
//! ```plain
//! $ check-sofia --help
//! check-sofia (part of freeswitch-plugins) 0.1.0
//! Check one attribute of a Sofia-SIP profile or gateway.
//!
//! Asks the local switch for its sofia status, picks out the requested
//! attribute and compares it against the warning/critical ranges.
//!
//! USAGE:
//!     check-sofia [FLAGS] [OPTIONS]
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!         --usage      Print a brief usage synopsis and exit
//!     -V, --version    Prints version information
//!
//! OPTIONS:
//!         --attribute <name>         Attribute to check, see Attributes below [default: url]
//!     -c, --critical <range>         Critical range, [@]start:end
//!         --gateway <name>           Gateway to check instead of a profile; wins if both are given
//!     -f, --perfdatatitle <title>    Label for the primary perfdata metric
//!         --profile <name>           SIP profile to check
//!     -w, --warning <range>          Warning range, [@]start:end
//!
//! Examples:
//!
//!     Alert if the internal profile has lost its SIP url:
//!
//!         check-sofia --profile=internal --critical=1:
//!
//!     Alert if a carrier gateway is not registered and up:
//!
//!         check-sofia --gateway=carrier-a --critical=1:
//!
//!     Warn on more than 20 failed outbound calls:
//!
//!         check-sofia --profile=external --attribute=failed-calls-out --warning=:20
//!
//! Attributes:
//!
//!     profile: url, tls-url, registrations, failed-calls-in,
//!              failed-calls-out, calls
//!     gateway: to, failed-calls-in, failed-calls-out
//!
//!     On a gateway the default attribute "url" is read as "to".
//! ```
//!
//! Output follows the standard plugin convention, one line with perfdata
//! after a pipe:
//!
//! ```plain
//! $ check-sofia --profile=internal --attribute=registrations -w :100 -c :200
//! Result of check is: 12 registrations | sofia/status/internal/registrations=12;:100;:200
//! ```
