//! Parsers for external diagnostic tool output.
//!
//! Each parser is a pure function over the captured text of one tool run,
//! so acceptance boundaries can be pinned with literal fixtures without
//! spawning any processes. The policies are deliberately positional:
//! these tools print stable column layouts, not machine-readable formats.

use std::time::Duration;

use crate::error::ParseError;
use crate::models::network::{
    AddressLookup, Connection, ConnectionTable, DnsLookup, DnsRecord, HttpProbe,
    InterfaceThroughput, PingStats, RouteHop, RouteTrace, ThroughputConnection,
};

/// Captured output of one finished probe process
#[derive(Debug, Clone)]
pub struct Capture {
    pub stdout: String,
    /// Wall-clock time around the whole process invocation
    pub elapsed: Duration,
}

/// Parse `dig +noall +answer` output: one record per line.
///
/// Lines with fewer than 5 whitespace-separated fields are skipped; the
/// record type and address sit in fields 4 and 5. No matching lines is a
/// valid empty result, not an error.
pub fn parse_dns_records(raw: &str) -> Result<DnsLookup, ParseError> {
    let mut records = Vec::new();
    for line in raw.trim().lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 5 {
            continue;
        }
        records.push(DnsRecord {
            record_type: fields[3].to_string(),
            address: fields[4].to_string(),
        });
    }
    Ok(DnsLookup { records })
}

/// Parse `nslookup` output for the resolved address.
///
/// The resolver's own address line is formatted `Address: ip#port` and is
/// skipped by the `#` check. Unlike the record lookup, finding no address
/// is a failure.
pub fn parse_address(raw: &str) -> Result<AddressLookup, ParseError> {
    for line in raw.lines() {
        if line.contains("Address:") && !line.contains('#') {
            if let Some((_, rest)) = line.split_once(':') {
                let address = rest.trim();
                if !address.is_empty() {
                    return Ok(AddressLookup {
                        address: address.to_string(),
                    });
                }
            }
        }
    }
    Err(ParseError::MissingAddress)
}

/// Parse `traceroute` output into hops.
///
/// The first line is the tool's header. Lines with fewer than 3 fields or
/// a non-numeric first field are skipped, so hop numbering may have gaps.
/// The second-to-last field is taken as the response time; the tool's
/// millisecond unit is assumed, not verified.
pub fn parse_route_trace(raw: &str) -> Result<RouteTrace, ParseError> {
    let mut hops = Vec::new();
    for line in raw.lines().skip(1) {
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            continue;
        }
        let Ok(hop_number) = fields[0].parse::<u32>() else {
            continue;
        };
        hops.push(RouteHop {
            hop_number,
            address: fields[1].to_string(),
            response_time: format!("{} ms", fields[fields.len() - 2]),
        });
    }
    Ok(RouteTrace { hops })
}

/// Parse the three-token write-out of the HTTP probe.
///
/// The tool is invoked with a format string producing
/// `<status> <time_total> <content_type>`; the response time reported here
/// is measured around the whole process call instead of trusting the
/// tool's own `time_total`.
pub fn parse_http_probe(raw: &str, elapsed: Duration) -> Result<HttpProbe, ParseError> {
    let fields: Vec<&str> = raw.split_whitespace().collect();
    if fields.len() < 3 {
        return Err(ParseError::HttpShape(raw.to_string()));
    }
    Ok(HttpProbe {
        status: format!("HTTP {}", fields[0]),
        response_time: format!("{} ms", elapsed.as_millis()),
        content_type: fields[2].to_string(),
    })
}

/// Parse `ping` summary output.
///
/// The transmit line (`N packets transmitted, N received, P% packet loss`)
/// and the rtt line (`rtt min/avg/max/mdev = a/b/c/d ms`) are scanned
/// independently; a missing line leaves its fields at zero rather than
/// failing the probe.
pub fn parse_ping_stats(raw: &str) -> Result<PingStats, ParseError> {
    let mut sent = 0u32;
    let mut received = 0u32;
    let mut loss_percent = 0.0f64;
    let mut avg_latency_ms = 0u64;

    for line in raw.lines() {
        if line.contains("packets transmitted") {
            let parts: Vec<&str> = line.split(',').collect();
            if parts.len() >= 3 {
                sent = leading_integer(parts[0]).unwrap_or(0);
                received = leading_integer(parts[1]).unwrap_or(0);
                loss_percent = leading_percentage(parts[2]).unwrap_or(0.0);
            }
        }
        if line.contains("rtt min/avg/max/mdev") {
            let parts: Vec<&str> = line.split('=').collect();
            if parts.len() == 2 {
                let stats: Vec<&str> = parts[1].trim().split('/').collect();
                if stats.len() >= 2 {
                    if let Ok(avg) = stats[1].parse::<f64>() {
                        // Truncation, not rounding
                        avg_latency_ms = avg as u64;
                    }
                }
            }
        }
    }

    Ok(PingStats {
        sent,
        received,
        lost: sent.saturating_sub(received),
        loss_percent,
        avg_latency_ms,
    })
}

/// Parse `netstat -tunapl` output, keeping transport-protocol rows only.
pub fn parse_connection_table(raw: &str) -> Result<ConnectionTable, ParseError> {
    let mut connections = Vec::new();
    for line in raw.lines() {
        if !(line.starts_with("tcp") || line.starts_with("udp")) {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 6 {
            continue;
        }
        connections.push(Connection {
            protocol: fields[0].to_string(),
            local_address: fields[3].to_string(),
            remote_address: fields[4].to_string(),
            status: fields[5].to_string(),
        });
    }
    Ok(ConnectionTable { connections })
}

/// Parse `iftop -t` text output.
///
/// Connection rows carry a `=>` or `<=` direction marker; totals come from
/// the `Total send rate` / `Total receive rate` lines. The connection list
/// keeps the first three rows in the order the tool printed them, whatever
/// their rates.
pub fn parse_interface_throughput(raw: &str) -> Result<InterfaceThroughput, ParseError> {
    let mut sending = String::new();
    let mut receiving = String::new();
    let mut top_connections = Vec::new();

    for line in raw.lines() {
        if line.contains("=>") || line.contains("<=") {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() >= 6 {
                top_connections.push(ThroughputConnection {
                    source: fields[0].to_string(),
                    destination: fields[2].to_string(),
                    sent_rate: fields[4].to_string(),
                    received_rate: fields[5].to_string(),
                });
            }
        }
        if line.contains("Total send rate") {
            if let Some(rate) = rate_after_colon(line) {
                sending = rate;
            }
        }
        if line.contains("Total receive rate") {
            if let Some(rate) = rate_after_colon(line) {
                receiving = rate;
            }
        }
    }

    top_connections.truncate(3);

    Ok(InterfaceThroughput {
        sending_rate: format!("{} KB/s", sending),
        receiving_rate: format!("{} KB/s", receiving),
        top_connections,
    })
}

/// First whitespace-separated token of `s`, parsed as an integer
fn leading_integer(s: &str) -> Option<u32> {
    s.split_whitespace().next()?.parse().ok()
}

/// First whitespace-separated token of `s`, with a trailing `%` stripped,
/// parsed as a float
fn leading_percentage(s: &str) -> Option<f64> {
    s.split_whitespace()
        .next()?
        .trim_end_matches('%')
        .parse()
        .ok()
}

/// Value of a `label: rate KB/s` line, with the unit suffix trimmed.
/// Lines that do not split into exactly two colon-separated parts are
/// ignored.
fn rate_after_colon(line: &str) -> Option<String> {
    let parts: Vec<&str> = line.split(':').collect();
    if parts.len() != 2 {
        return None;
    }
    Some(parts[1].strip_suffix(" KB/s").unwrap_or(parts[1]).trim().to_string())
}
