//! Talk to the switch's admin CLI
//!
//! Everything the check knows about the switch comes from two `fs_cli`
//! invocations: `sofia xmlstatus` to enumerate profiles and gateways, then
//! a profile- or gateway-scoped `sofia xmlstatus ...` for the one target
//! under test. The XML is treated as loosely as the switch emits it:
//! a missing field reads as the empty string, only a malformed document or
//! an unexpected root is an error.

use std::fmt;
use std::process::Command;

use regex::Regex;
use roxmltree::{Document, Node};

/// Where the switch installs its admin CLI
const FS_CLI: &str = "/usr/bin/fs_cli";

#[derive(Debug, PartialEq)]
pub(crate) enum SofiaError {
    /// fs_cli could not be run, or exited non-zero
    Execution(String),
    /// fs_cli ran but did not hand back the document we asked for
    Parse(String),
}

impl fmt::Display for SofiaError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SofiaError::Execution(msg) => write!(f, "error querying the switch: {}", msg),
            SofiaError::Parse(msg) => write!(f, "error reading switch status: {}", msg),
        }
    }
}

/// One row of the whole-switch profile table
#[derive(Debug, PartialEq)]
pub(crate) struct ProfileSummary {
    pub name: String,
    pub state: String,
    /// Parsed out of the parenthesized count in `state`, e.g. `RUNNING (3)`
    pub calls: u64,
}

/// One row of the whole-switch gateway table
#[derive(Debug, PartialEq)]
pub(crate) struct GatewaySummary {
    pub name: String,
}

/// Everything the whole-switch query enumerates
#[derive(Debug, PartialEq)]
pub(crate) struct SwitchStatus {
    pub profiles: Vec<ProfileSummary>,
    pub gateways: Vec<GatewaySummary>,
}

impl SwitchStatus {
    /// First profile with this name, in document order
    pub fn profile(&self, name: &str) -> Option<&ProfileSummary> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// First gateway with this name, in document order
    pub fn gateway(&self, name: &str) -> Option<&GatewaySummary> {
        self.gateways.iter().find(|g| g.name == name)
    }
}

/// Fields of the profile-scoped document the check can select
///
/// Absent fields are empty strings, matching the switch's habit of leaving
/// elements out rather than emitting empty ones.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct ProfileDetail {
    pub url: String,
    pub tls_url: String,
    pub registrations: String,
    pub failed_calls_in: String,
    pub failed_calls_out: String,
}

/// Fields of the gateway-scoped document the check can select
#[derive(Debug, Default, PartialEq)]
pub(crate) struct GatewayDetail {
    pub to: String,
    pub state: String,
    pub status: String,
    pub failed_calls_in: String,
    pub failed_calls_out: String,
}

/// Runs `fs_cli -x` queries against the local switch
pub(crate) struct SofiaClient {
    fs_cli: String,
}

impl SofiaClient {
    pub fn new() -> SofiaClient {
        SofiaClient {
            fs_cli: FS_CLI.to_owned(),
        }
    }

    fn query(&self, command: &str) -> Result<String, SofiaError> {
        let output = Command::new(&self.fs_cli)
            .arg("-x")
            .arg(command)
            .output()
            .map_err(|e| {
                SofiaError::Execution(format!("could not run {} -x {:?}: {}", self.fs_cli, command, e))
            })?;
        if !output.status.success() {
            return Err(SofiaError::Execution(format!(
                "{} -x {:?} exited with {}: {}",
                self.fs_cli,
                command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    pub fn switch_status(&self) -> Result<SwitchStatus, SofiaError> {
        parse_switch_status(&self.query("sofia xmlstatus")?)
    }

    pub fn profile_detail(&self, name: &str) -> Result<ProfileDetail, SofiaError> {
        parse_profile_detail(&self.query(&format!("sofia xmlstatus profile {}", name))?)
    }

    pub fn gateway_detail(&self, name: &str) -> Result<GatewayDetail, SofiaError> {
        parse_gateway_detail(&self.query(&format!("sofia xmlstatus gateway {}", name))?)
    }
}

fn parse_doc(xml: &str) -> Result<Document, SofiaError> {
    Document::parse(xml)
        .map_err(|e| SofiaError::Parse(format!("switch returned malformed XML: {}", e)))
}

fn expect_root<'a, 'd>(
    doc: &'a Document<'d>,
    tag: &str,
) -> Result<Node<'a, 'd>, SofiaError> {
    let root = doc.root_element();
    if root.tag_name().name() != tag {
        return Err(SofiaError::Parse(format!(
            "expected a <{}> document, got <{}>",
            tag,
            root.tag_name().name()
        )));
    }
    Ok(root)
}

/// Text of the first `tag` child of `node`, or `""`
fn child_text(node: Node, tag: &str) -> String {
    node.children()
        .find(|n| n.has_tag_name(tag))
        .and_then(|n| n.text())
        .unwrap_or("")
        .trim()
        .to_owned()
}

/// Text of the first `tag` element anywhere under the root, or `""`
fn field_text(doc: &Document, tag: &str) -> String {
    doc.descendants()
        .find(|n| n.has_tag_name(tag))
        .and_then(|n| n.text())
        .unwrap_or("")
        .trim()
        .to_owned()
}

pub(crate) fn parse_switch_status(xml: &str) -> Result<SwitchStatus, SofiaError> {
    let doc = parse_doc(xml)?;
    let root = expect_root(&doc, "profiles")?;
    // static pattern, cannot fail
    let embedded_count = Regex::new(r"\((\d+)\)").unwrap();
    let mut profiles = Vec::new();
    let mut gateways = Vec::new();
    for entry in root.children().filter(Node::is_element) {
        match entry.tag_name().name() {
            "profile" => {
                let state = child_text(entry, "state");
                let calls = embedded_count
                    .captures(&state)
                    .and_then(|c| c[1].parse().ok())
                    .unwrap_or(0);
                profiles.push(ProfileSummary {
                    name: child_text(entry, "name"),
                    state,
                    calls,
                });
            }
            "gateway" => gateways.push(GatewaySummary {
                name: child_text(entry, "name"),
            }),
            // aliases and anything the switch grows later
            _ => {}
        }
    }
    Ok(SwitchStatus { profiles, gateways })
}

pub(crate) fn parse_profile_detail(xml: &str) -> Result<ProfileDetail, SofiaError> {
    let doc = parse_doc(xml)?;
    expect_root(&doc, "profile")?;
    Ok(ProfileDetail {
        url: field_text(&doc, "url"),
        tls_url: field_text(&doc, "tls-url"),
        registrations: field_text(&doc, "registrations"),
        failed_calls_in: field_text(&doc, "failed-calls-in"),
        failed_calls_out: field_text(&doc, "failed-calls-out"),
    })
}

pub(crate) fn parse_gateway_detail(xml: &str) -> Result<GatewayDetail, SofiaError> {
    let doc = parse_doc(xml)?;
    expect_root(&doc, "gateway")?;
    Ok(GatewayDetail {
        to: field_text(&doc, "to"),
        state: field_text(&doc, "state"),
        status: field_text(&doc, "status"),
        failed_calls_in: field_text(&doc, "failed-calls-in"),
        failed_calls_out: field_text(&doc, "failed-calls-out"),
    })
}

#[cfg(test)]
mod test {
    use super::*;

    fn switch_xml() -> &'static str {
        r#"
        <profiles>
          <profile>
            <name>internal</name>
            <type>profile</type>
            <data>sip:mod_sofia@10.0.0.1:5060</data>
            <state>RUNNING (3)</state>
          </profile>
          <gateway>
            <name>carrier-a</name>
            <type>gateway</type>
            <data>sip:gw@carrier-a.example.com</data>
            <state>REGED</state>
          </gateway>
          <alias>
            <name>default</name>
            <type>alias</type>
            <data>internal</data>
            <state>ALIASED</state>
          </alias>
          <profile>
            <name>external</name>
            <type>profile</type>
            <data>sip:mod_sofia@192.0.2.1:5080</data>
            <state>RUNNING(0)</state>
          </profile>
        </profiles>
        "#
    }

    #[test]
    fn switch_status_enumerates_in_document_order() {
        let status = parse_switch_status(switch_xml()).unwrap();
        let names: Vec<_> = status.profiles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["internal", "external"]);
        assert_eq!(status.gateways, vec![GatewaySummary { name: "carrier-a".into() }]);
    }

    #[test]
    fn call_count_comes_out_of_the_state_text() {
        let status = parse_switch_status(switch_xml()).unwrap();
        assert_eq!(status.profiles[0].calls, 3);
        assert_eq!(status.profiles[0].state, "RUNNING (3)");
        assert_eq!(status.profiles[1].calls, 0);
    }

    #[test]
    fn stateless_profile_counts_zero_calls() {
        let status = parse_switch_status(
            "<profiles><profile><name>quiet</name><state>DOWN</state></profile></profiles>",
        )
        .unwrap();
        assert_eq!(status.profiles[0].calls, 0);
    }

    #[test]
    fn duplicate_names_resolve_to_the_first() {
        let status = parse_switch_status(
            r#"<profiles>
                 <profile><name>twin</name><state>RUNNING (1)</state></profile>
                 <profile><name>twin</name><state>RUNNING (2)</state></profile>
               </profiles>"#,
        )
        .unwrap();
        assert_eq!(status.profiles.len(), 2);
        assert_eq!(status.profile("twin").unwrap().calls, 1);
    }

    #[test]
    fn lookup_misses_return_none() {
        let status = parse_switch_status(switch_xml()).unwrap();
        assert!(status.profile("missing").is_none());
        assert!(status.gateway("internal").is_none());
    }

    #[test]
    fn malformed_xml_is_a_parse_error() {
        match parse_switch_status("sofia is not loaded") {
            Err(SofiaError::Parse(_)) => {}
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn wrong_root_is_a_parse_error() {
        match parse_switch_status("<result>ok</result>") {
            Err(SofiaError::Parse(msg)) => assert!(msg.contains("<profiles>"), "{}", msg),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    fn profile_xml() -> &'static str {
        r#"
        <profile>
          <profile-info>
            <name>internal</name>
            <url>sip:mod_sofia@10.0.0.1:5060</url>
            <tls-url>sip:mod_sofia@10.0.0.1:5061</tls-url>
            <calls-in>2</calls-in>
            <failed-calls-in>7</failed-calls-in>
            <calls-out>1</calls-out>
            <failed-calls-out>4</failed-calls-out>
            <registrations>12</registrations>
          </profile-info>
          <registrations></registrations>
        </profile>
        "#
    }

    #[test]
    fn profile_fields_read_in_document_order() {
        let detail = parse_profile_detail(profile_xml()).unwrap();
        assert_eq!(detail.url, "sip:mod_sofia@10.0.0.1:5060");
        assert_eq!(detail.tls_url, "sip:mod_sofia@10.0.0.1:5061");
        // the count in <profile-info> wins over the trailing container
        assert_eq!(detail.registrations, "12");
        assert_eq!(detail.failed_calls_in, "7");
        assert_eq!(detail.failed_calls_out, "4");
    }

    #[test]
    fn absent_profile_fields_read_as_empty() {
        let detail =
            parse_profile_detail("<profile><profile-info><name>bare</name></profile-info></profile>")
                .unwrap();
        assert_eq!(detail, ProfileDetail::default());
    }

    #[test]
    fn gateway_fields_parse() {
        let detail = parse_gateway_detail(
            r#"
            <gateway>
              <name>carrier-a</name>
              <to>sip:gw@carrier-a.example.com</to>
              <state>REGED</state>
              <status>UP</status>
              <failed-calls-in>0</failed-calls-in>
              <failed-calls-out>2</failed-calls-out>
            </gateway>
            "#,
        )
        .unwrap();
        assert_eq!(detail.to, "sip:gw@carrier-a.example.com");
        assert_eq!(detail.state, "REGED");
        assert_eq!(detail.status, "UP");
        assert_eq!(detail.failed_calls_out, "2");
    }

    #[test]
    fn gateway_root_is_required() {
        match parse_gateway_detail("<profile></profile>") {
            Err(SofiaError::Parse(_)) => {}
            other => panic!("expected a parse error, got {:?}", other),
        }
    }
}
