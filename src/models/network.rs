//! Typed results produced by the diagnostic probes.
//!
//! Every type here is a plain value record built once per diagnostic run.
//! `DiagnosticReport::default()` is the all-zero-values report: a failed
//! probe leaves its field at the default instead of an invalid partial
//! state.

use serde::{Deserialize, Serialize};

use crate::error::ProbeError;

/// One DNS record from the record lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub record_type: String,
    pub address: String,
}

/// Records returned by the DNS record probe; empty is a valid result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsLookup {
    pub records: Vec<DnsRecord>,
}

/// Resolved address from the name-resolution probe.
///
/// Unlike [`DnsLookup`], an empty address is a parse failure, never a valid
/// empty result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressLookup {
    pub address: String,
}

/// A single hop of the route trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteHop {
    /// 1-based hop number as printed by the tool; gaps appear where
    /// unparseable lines were skipped
    pub hop_number: u32,
    pub address: String,
    /// Response time with its unit suffix, e.g. `"2.1 ms"`
    pub response_time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTrace {
    pub hops: Vec<RouteHop>,
}

/// Result of the HTTP reachability probe
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpProbe {
    /// Status label formatted as `"HTTP <code>"`
    pub status: String,
    /// Wall-clock time around the whole probe process, `"<n> ms"`
    pub response_time: String,
    pub content_type: String,
}

/// Packet statistics from the latency/loss probe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PingStats {
    pub sent: u32,
    pub received: u32,
    pub lost: u32,
    pub loss_percent: f64,
    pub avg_latency_ms: u64,
}

/// One row of the local connection table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub protocol: String,
    pub local_address: String,
    pub remote_address: String,
    pub status: String,
}

/// Transport-protocol rows of the local connection table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionTable {
    pub connections: Vec<Connection>,
}

/// One connection row reported by the throughput sampler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThroughputConnection {
    pub source: String,
    pub destination: String,
    pub sent_rate: String,
    pub received_rate: String,
}

/// Interface throughput sample
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceThroughput {
    pub sending_rate: String,
    pub receiving_rate: String,
    /// At most three rows, in first-seen order
    pub top_connections: Vec<ThroughputConnection>,
}

/// The merged structured report of one diagnostic run.
///
/// Always has all seven fields populated: either the parsed value or that
/// type's zero-value when the probe failed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub dns_lookup: DnsLookup,
    pub address_lookup: AddressLookup,
    pub route_trace: RouteTrace,
    pub http_probe: HttpProbe,
    pub ping: PingStats,
    pub connections: ConnectionTable,
    pub throughput: InterfaceThroughput,
}

/// A per-probe failure collected during a run
#[derive(Debug)]
pub struct ProbeFailure {
    pub probe: &'static str,
    pub error: ProbeError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_report_is_all_zero_values() {
        let report = DiagnosticReport::default();
        assert!(report.dns_lookup.records.is_empty());
        assert!(report.address_lookup.address.is_empty());
        assert!(report.route_trace.hops.is_empty());
        assert!(report.http_probe.status.is_empty());
        assert_eq!(report.ping.sent, 0);
        assert_eq!(report.ping.loss_percent, 0.0);
        assert!(report.connections.connections.is_empty());
        assert!(report.throughput.top_connections.is_empty());
    }
}
