//! Concurrent network-diagnostics engine.
//!
//! Given a target domain, runs a fixed battery of independent probes, each
//! wrapping one external diagnostic utility, in parallel. Every probe
//! produces exactly one typed outcome; a single collector drains all
//! outcomes before the merged report is returned, so partial failure never
//! aborts a run. The probe battery is a declarative table: adding or
//! removing a probe is a data change.

pub mod parsers;

use std::env;
use std::path::Path;
use std::time::Instant;

use tokio::process::Command;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::error::{ParseError, ProbeError, StderrExcerpt};
use crate::models::network::{
    AddressLookup, ConnectionTable, DiagnosticReport, DnsLookup, HttpProbe, InterfaceThroughput,
    PingStats, ProbeFailure, RouteTrace,
};
use self::parsers::Capture;

/// External utilities that must be present before a run may start
pub const REQUIRED_TOOLS: [&str; 7] = [
    "iftop",
    "dig",
    "nslookup",
    "traceroute",
    "curl",
    "ping",
    "netstat",
];

// TODO: make the sampled interface configurable instead of assuming eth0
const THROUGHPUT_INTERFACE: &str = "eth0";

/// Parsed payload of one successful probe
#[derive(Debug)]
pub enum ProbeData {
    Dns(DnsLookup),
    Address(AddressLookup),
    Route(RouteTrace),
    Http(HttpProbe),
    Ping(PingStats),
    Connections(ConnectionTable),
    Throughput(InterfaceThroughput),
}

/// The result of one probe; each table row yields exactly one per run
#[derive(Debug)]
pub struct ProbeOutcome {
    pub probe: &'static str,
    pub result: Result<ProbeData, ProbeError>,
}

/// One row of the probe table
pub struct ProbeSpec {
    /// Name reported in the error list
    pub name: &'static str,
    /// Binary resolved during the availability check
    pub tool: &'static str,
    /// Program and fixed argument vector for a target domain
    argv: fn(&str) -> (&'static str, Vec<String>),
    /// Parser applied to the captured output
    parse: fn(&Capture) -> Result<ProbeData, ParseError>,
}

/// The probe battery. The throughput probe's privilege requirement and
/// fixed sampling window live entirely in its argv entry.
pub static PROBES: [ProbeSpec; 7] = [
    ProbeSpec {
        name: "dig",
        tool: "dig",
        argv: dig_argv,
        parse: parse_dig,
    },
    ProbeSpec {
        name: "nslookup",
        tool: "nslookup",
        argv: nslookup_argv,
        parse: parse_nslookup,
    },
    ProbeSpec {
        name: "traceroute",
        tool: "traceroute",
        argv: traceroute_argv,
        parse: parse_traceroute,
    },
    ProbeSpec {
        name: "curl",
        tool: "curl",
        argv: curl_argv,
        parse: parse_curl,
    },
    ProbeSpec {
        name: "ping",
        tool: "ping",
        argv: ping_argv,
        parse: parse_ping,
    },
    ProbeSpec {
        name: "netstat",
        tool: "netstat",
        argv: netstat_argv,
        parse: parse_netstat,
    },
    ProbeSpec {
        name: "iftop",
        tool: "iftop",
        argv: iftop_argv,
        parse: parse_iftop,
    },
];

fn dig_argv(target: &str) -> (&'static str, Vec<String>) {
    ("dig", strings(&["+noall", "+answer", target]))
}

fn nslookup_argv(target: &str) -> (&'static str, Vec<String>) {
    ("nslookup", strings(&[target]))
}

fn traceroute_argv(target: &str) -> (&'static str, Vec<String>) {
    ("traceroute", strings(&["-m", "5", target]))
}

fn curl_argv(target: &str) -> (&'static str, Vec<String>) {
    (
        "curl",
        strings(&[
            "-s",
            "-o",
            "/dev/null",
            "-w",
            "%{http_code} %{time_total} %{content_type}",
            target,
        ]),
    )
}

fn ping_argv(target: &str) -> (&'static str, Vec<String>) {
    ("ping", strings(&["-c", "4", target]))
}

fn netstat_argv(_target: &str) -> (&'static str, Vec<String>) {
    ("netstat", strings(&["-tunapl"]))
}

fn iftop_argv(_target: &str) -> (&'static str, Vec<String>) {
    (
        "sudo",
        strings(&["iftop", "-t", "-s", "5", "-i", THROUGHPUT_INTERFACE]),
    )
}

fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

fn parse_dig(capture: &Capture) -> Result<ProbeData, ParseError> {
    parsers::parse_dns_records(&capture.stdout).map(ProbeData::Dns)
}

fn parse_nslookup(capture: &Capture) -> Result<ProbeData, ParseError> {
    parsers::parse_address(&capture.stdout).map(ProbeData::Address)
}

fn parse_traceroute(capture: &Capture) -> Result<ProbeData, ParseError> {
    parsers::parse_route_trace(&capture.stdout).map(ProbeData::Route)
}

fn parse_curl(capture: &Capture) -> Result<ProbeData, ParseError> {
    parsers::parse_http_probe(&capture.stdout, capture.elapsed).map(ProbeData::Http)
}

fn parse_ping(capture: &Capture) -> Result<ProbeData, ParseError> {
    parsers::parse_ping_stats(&capture.stdout).map(ProbeData::Ping)
}

fn parse_netstat(capture: &Capture) -> Result<ProbeData, ParseError> {
    parsers::parse_connection_table(&capture.stdout).map(ProbeData::Connections)
}

fn parse_iftop(capture: &Capture) -> Result<ProbeData, ParseError> {
    parsers::parse_interface_throughput(&capture.stdout).map(ProbeData::Throughput)
}

/// Return the subset of [`REQUIRED_TOOLS`] not resolvable on `PATH`, in
/// check order. The run must not proceed unless this is empty.
pub fn missing_tools() -> Vec<&'static str> {
    REQUIRED_TOOLS
        .iter()
        .copied()
        .filter(|tool| !tool_on_path(tool))
        .collect()
}

fn tool_on_path(name: &str) -> bool {
    let Some(path) = env::var_os("PATH") else {
        return false;
    };
    env::split_paths(&path).any(|dir| is_executable(&dir.join(name)))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Run the full diagnostic battery against `target`.
///
/// All probes launch concurrently and the call returns only once every
/// probe has reported. A non-empty error list is the normal partial-success
/// case: the report is still usable, with failed probes' fields left at
/// their zero-values. Dropping the returned future kills any in-flight
/// probe processes.
pub async fn run(target: &str) -> (DiagnosticReport, Vec<ProbeFailure>) {
    let mut probes = JoinSet::new();
    for spec in &PROBES {
        let target = target.to_string();
        probes.spawn(async move { run_probe(spec, &target).await });
    }
    collect_outcomes(probes).await
}

/// Execute one probe: spawn the process, capture stdout, parse.
async fn run_probe(spec: &ProbeSpec, target: &str) -> ProbeOutcome {
    ProbeOutcome {
        probe: spec.name,
        result: execute(spec, target).await,
    }
}

async fn execute(spec: &ProbeSpec, target: &str) -> Result<ProbeData, ProbeError> {
    let (program, args) = (spec.argv)(target);
    debug!(probe = spec.name, program, ?args, "running probe");

    let started = Instant::now();
    let output = Command::new(program)
        .args(&args)
        .stdin(std::process::Stdio::null())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|source| ProbeError::Launch {
            tool: spec.name,
            source,
        })?;
    let elapsed = started.elapsed();

    if !output.status.success() {
        return Err(ProbeError::NonZeroExit {
            tool: spec.name,
            status: output.status,
            stderr: StderrExcerpt::from_bytes(&output.stderr),
        });
    }

    let capture = Capture {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        elapsed,
    };
    Ok((spec.parse)(&capture)?)
}

/// Drain exactly one outcome per launched probe, in completion order, and
/// fold them into the report. Returning is the barrier: every probe has
/// reported. Dropping the set mid-drain aborts the remaining probe tasks.
async fn collect_outcomes(
    mut probes: JoinSet<ProbeOutcome>,
) -> (DiagnosticReport, Vec<ProbeFailure>) {
    let mut report = DiagnosticReport::default();
    let mut failures = Vec::new();
    while let Some(joined) = probes.join_next().await {
        let outcome = match joined {
            Ok(outcome) => outcome,
            Err(join_error) => {
                // A probe task itself dying is not a probe result; there
                // is nothing to merge for it.
                warn!(%join_error, "probe task failed");
                continue;
            }
        };
        match outcome.result {
            Ok(data) => absorb(&mut report, data),
            Err(error) => {
                warn!(probe = outcome.probe, %error, "probe failed");
                failures.push(ProbeFailure {
                    probe: outcome.probe,
                    error,
                });
            }
        }
    }
    (report, failures)
}

fn absorb(report: &mut DiagnosticReport, data: ProbeData) {
    match data {
        ProbeData::Dns(value) => report.dns_lookup = value,
        ProbeData::Address(value) => report.address_lookup = value,
        ProbeData::Route(value) => report.route_trace = value,
        ProbeData::Http(value) => report.http_probe = value,
        ProbeData::Ping(value) => report.ping = value,
        ProbeData::Connections(value) => report.connections = value,
        ProbeData::Throughput(value) => report.throughput = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::time::Duration;

    #[test]
    fn probe_table_matches_required_tools() {
        assert_eq!(PROBES.len(), REQUIRED_TOOLS.len());
        let names: HashSet<&str> = PROBES.iter().map(|spec| spec.name).collect();
        assert_eq!(names.len(), PROBES.len(), "probe names must be unique");
        for spec in &PROBES {
            assert!(REQUIRED_TOOLS.contains(&spec.tool));
        }
    }

    #[test]
    fn probe_argvs_substitute_only_the_target() {
        let (program, args) = dig_argv("example.com");
        assert_eq!(program, "dig");
        assert_eq!(args, vec!["+noall", "+answer", "example.com"]);

        // Target-independent probes ignore the domain entirely
        let (_, netstat_a) = netstat_argv("example.com");
        let (_, netstat_b) = netstat_argv("other.org");
        assert_eq!(netstat_a, netstat_b);

        let (program, args) = iftop_argv("example.com");
        assert_eq!(program, "sudo");
        assert_eq!(args, vec!["iftop", "-t", "-s", "5", "-i", "eth0"]);
    }

    #[cfg(unix)]
    #[test]
    fn path_lookup_finds_real_binaries_only() {
        assert!(tool_on_path("sh"));
        assert!(!tool_on_path("netkit-no-such-tool-a9f3"));
    }

    fn bogus_argv(_target: &str) -> (&'static str, Vec<String>) {
        ("netkit-no-such-tool-a9f3", Vec::new())
    }

    fn false_argv(_target: &str) -> (&'static str, Vec<String>) {
        ("false", Vec::new())
    }

    fn echo_record_argv(_target: &str) -> (&'static str, Vec<String>) {
        (
            "echo",
            vec!["example.com. 300 IN A 93.184.216.34".to_string()],
        )
    }

    #[tokio::test]
    async fn run_probe_reports_launch_failure() {
        static BOGUS: ProbeSpec = ProbeSpec {
            name: "bogus",
            tool: "bogus",
            argv: bogus_argv,
            parse: parse_dig,
        };
        let outcome = run_probe(&BOGUS, "example.com").await;
        assert!(matches!(outcome.result, Err(ProbeError::Launch { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn run_probe_reports_non_zero_exit() {
        static FAILING: ProbeSpec = ProbeSpec {
            name: "failing",
            tool: "failing",
            argv: false_argv,
            parse: parse_dig,
        };
        let outcome = run_probe(&FAILING, "example.com").await;
        match outcome.result {
            Err(ProbeError::NonZeroExit { tool, .. }) => assert_eq!(tool, "failing"),
            other => panic!("expected non-zero exit, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn run_probe_parses_captured_stdout() {
        static ECHOING: ProbeSpec = ProbeSpec {
            name: "echoing",
            tool: "echoing",
            argv: echo_record_argv,
            parse: parse_dig,
        };
        let outcome = run_probe(&ECHOING, "example.com").await;
        match outcome.result {
            Ok(ProbeData::Dns(lookup)) => {
                assert_eq!(lookup.records.len(), 1);
                assert_eq!(lookup.records[0].address, "93.184.216.34");
            }
            other => panic!("expected dns data, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn collector_releases_only_after_slowest_probe() {
        let mut probes = JoinSet::new();
        for (i, spec) in PROBES.iter().enumerate() {
            probes.spawn(async move {
                tokio::time::sleep(Duration::from_millis(100 * (i as u64 + 1))).await;
                ProbeOutcome {
                    probe: spec.name,
                    result: Ok(ProbeData::Ping(PingStats::default())),
                }
            });
        }

        // Slowest probe reports at 700 ms; the aggregate must still be
        // unavailable at 650 ms.
        let collect = collect_outcomes(probes);
        tokio::pin!(collect);
        assert!(
            tokio::time::timeout(Duration::from_millis(650), &mut collect)
                .await
                .is_err()
        );
        let (_report, failures) = collect.await;
        assert!(failures.is_empty());
    }

    #[tokio::test]
    async fn failed_probes_leave_their_fields_at_zero_values() {
        let outcomes = vec![
            ProbeOutcome {
                probe: "dig",
                result: Ok(ProbeData::Dns(
                    parsers::parse_dns_records("example.com. 300 IN A 93.184.216.34").unwrap(),
                )),
            },
            ProbeOutcome {
                probe: "nslookup",
                result: Err(ParseError::MissingAddress.into()),
            },
            ProbeOutcome {
                probe: "traceroute",
                result: Err(ParseError::MissingAddress.into()),
            },
            ProbeOutcome {
                probe: "curl",
                result: Ok(ProbeData::Http(HttpProbe {
                    status: "HTTP 200".into(),
                    response_time: "12 ms".into(),
                    content_type: "text/html".into(),
                })),
            },
        ];
        let mut probes = JoinSet::new();
        for outcome in outcomes {
            probes.spawn(async move { outcome });
        }

        let (report, failures) = collect_outcomes(probes).await;

        // Completion order is nondeterministic in real runs, so failures
        // are only ever compared as a set of probe names.
        let failed: HashSet<&str> = failures.iter().map(|f| f.probe).collect();
        assert_eq!(failed, HashSet::from(["nslookup", "traceroute"]));

        assert_eq!(report.dns_lookup.records.len(), 1);
        assert_eq!(report.http_probe.status, "HTTP 200");
        // Failed probes left zero-values behind
        assert!(report.address_lookup.address.is_empty());
        assert!(report.route_trace.hops.is_empty());
        // Probes that never reported this run stay at zero-values too
        assert_eq!(report.ping, PingStats::default());
    }
}
