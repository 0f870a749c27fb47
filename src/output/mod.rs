//! Terminal rendering for resources and diagnostic reports

use colored::*;

use crate::models::network::{DiagnosticReport, ProbeFailure};
use crate::models::resource::Resource;

/// Print the resource listing as an aligned table
pub fn print_resource_table(resources: &[Resource]) {
    let header = format!(
        "{:<5} {:<20} {:<30} {:<20} {:<20}",
        "ID", "Name", "DNS", "CreatedAt", "UpdatedAt"
    );
    println!("{}", header.bold().white().on_purple());

    for resource in resources {
        println!(
            "{:<5} {:<20} {:<30} {:<20} {:<20}",
            resource.id,
            resource.name,
            resource.dns,
            Resource::format_timestamp(&resource.created_at),
            Resource::format_timestamp(&resource.updated_at),
        );
    }
}

/// Print the details of a single resource
pub fn print_resource_details(resource: &Resource) {
    println!("Resource Details:");
    println!("ID: {}", resource.id);
    println!("Name: {}", resource.name);
    println!("DNS: {}", resource.dns);
}

pub fn print_created(resource: &Resource) {
    print_banner("Resource Created", resource, Color::Yellow);
}

pub fn print_updated(resource: &Resource) {
    print_banner("Resource Updated", resource, Color::Yellow);
}

pub fn print_deleted(resource: &Resource) {
    print_banner("Resource Deleted", resource, Color::Red);
}

fn print_banner(title: &str, resource: &Resource, color: Color) {
    let text = format!(
        "{}:\nID: {}\nName: {}\nDNS: {}",
        title, resource.id, resource.name, resource.dns
    );
    println!("{}", text.color(color).bold());
}

/// Print the missing-tools notice shown instead of running diagnostics
pub fn print_missing_tools(missing: &[&str]) {
    println!(
        "{}  The following tools are missing: {}",
        "⚠️".yellow(),
        missing.join(", ")
    );
    println!("Please install them to use the debug command.");
    println!("Installation example on Ubuntu/Debian:");
    println!("  sudo apt install {}", missing.join(" "));
}

/// Print the full diagnostic report, section by section, with a fallback
/// line wherever a probe produced no data.
pub fn print_report(report: &DiagnosticReport, domain: &str) {
    print_dns_section(report, domain);
    print_address_section(report, domain);
    print_route_section(report);
    print_http_section(report);
    print_ping_section(report);
    print_connections_section(report);
    print_throughput_section(report);
}

fn section(title: &str) {
    println!("{}", title.purple().bold());
}

fn print_dns_section(report: &DiagnosticReport, domain: &str) {
    section("✨ DNS Verification (dig):");
    if report.dns_lookup.records.is_empty() {
        println!("- No DNS records found.");
    } else {
        println!("- The domain {} has the following DNS records:", domain);
        for record in &report.dns_lookup.records {
            println!(
                "  - Type: {}, IP: {}",
                record.record_type, record.address
            );
        }
    }
    println!();
}

fn print_address_section(report: &DiagnosticReport, domain: &str) {
    section("🔍 Address Lookup (nslookup):");
    if report.address_lookup.address.is_empty() {
        println!("- No IP address found.");
    } else {
        println!(
            "- The IP address of {} is {}",
            domain, report.address_lookup.address
        );
    }
    println!();
}

fn print_route_section(report: &DiagnosticReport) {
    section("🚀 Data Route (traceroute):");
    match report.route_trace.hops.last() {
        Some(last_hop) => {
            println!(
                "- Data traveled through {} points before reaching {}:",
                report.route_trace.hops.len(),
                last_hop.address
            );
            for hop in &report.route_trace.hops {
                println!(
                    "  {}. {}: Response in {}",
                    hop.hop_number, hop.address, hop.response_time
                );
            }
        }
        None => println!("- No traceroute data available."),
    }
    println!();
}

fn print_http_section(report: &DiagnosticReport) {
    section("📡 Site Verification (curl):");
    if report.http_probe.status.is_empty() {
        println!("- No HTTP request data available.");
    } else {
        println!(
            "- Site Status: Working correctly ({})",
            report.http_probe.status
        );
        println!("- Response Time: {}", report.http_probe.response_time);
        println!("- Content Type: {}", report.http_probe.content_type);
    }
    println!();
}

fn print_ping_section(report: &DiagnosticReport) {
    section("📈 Connection Test (ping):");
    if report.ping.sent == 0 {
        println!("- No ping data available.");
    } else {
        println!("- Packets Sent: {}", report.ping.sent);
        println!("- Packets Received: {}", report.ping.received);
        println!("- Packet Loss: {:.0}%", report.ping.loss_percent);
        println!("- Average Response Time: {} ms", report.ping.avg_latency_ms);
    }
    println!();
}

fn print_connections_section(report: &DiagnosticReport) {
    section("🖥️ Active Connections (netstat):");
    if report.connections.connections.is_empty() {
        println!("- No active connections found.");
    } else {
        println!("- Active Connections:");
        for conn in &report.connections.connections {
            println!(
                "  - {} {} → {} ({})",
                conn.protocol, conn.local_address, conn.remote_address, conn.status
            );
        }
    }
    println!();
}

fn print_throughput_section(report: &DiagnosticReport) {
    section("📊 Current Network Usage (iftop - Interface: eth0):");
    let throughput = &report.throughput;
    if throughput.sending_rate.is_empty() && throughput.receiving_rate.is_empty() {
        println!("- No network usage data available.");
    } else {
        println!("- Current Traffic:");
        println!("  - Sending: {}", throughput.sending_rate);
        println!("  - Receiving: {}", throughput.receiving_rate);
        println!("- Top 3 Most Active Connections:");
        for (i, conn) in throughput.top_connections.iter().enumerate() {
            println!(
                "  {}. {} ↔ {}: Sending {} | Receiving {}",
                i + 1,
                conn.source,
                conn.destination,
                conn.sent_rate,
                conn.received_rate
            );
        }
    }
}

/// Print the itemized per-probe failure list of a partially failed run
pub fn print_failures(failures: &[ProbeFailure]) {
    println!();
    println!("{}", "⚠️  Some tools encountered errors:".red().bold());
    for failure in failures {
        println!("- {} error: {}", failure.probe, failure.error);
    }
}

/// Print the success banner of a fully clean run
pub fn print_all_clear() {
    println!();
    println!(
        "{}",
        "🔧 Network diagnostics executed successfully!".green().bold()
    );
}
