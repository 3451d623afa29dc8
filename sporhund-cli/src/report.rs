//! Report artifacts: CSV tables and the HTML summary.
//!
//! Rendering consumes the core's result structures; the core itself never
//! writes a file. Byte totals are scaled here per the display contract the
//! analysis crate publishes.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use tracing::info;

use sporhund_analysis::units::{GBPS_DIVISOR, GBPS_THRESHOLD_BYTES, MBPS_DIVISOR};
use sporhund_config::SporhundConfig;
use sporhund_core::resolve::{resolve_or_unknown, AddressResolver};
use sporhund_core::SystemResolver;
use sporhund_engine::AnalysisReport;

use crate::commands::AnalyzeArgs;

/// Scale a byte total for display.
pub fn scaled_bandwidth(total_bytes: u64) -> (f64, &'static str) {
    if total_bytes < GBPS_THRESHOLD_BYTES {
        (total_bytes as f64 / MBPS_DIVISOR as f64, "Mbps")
    } else {
        (total_bytes as f64 / GBPS_DIVISOR as f64, "Gbps")
    }
}

/// Write the configured artifact set for one analysis run.
pub fn write_reports(
    args: &AnalyzeArgs,
    config: &SporhundConfig,
    analysis: &AnalysisReport,
) -> anyhow::Result<()> {
    let output_dir = &config.report.output_dir;

    if config.report.wants_csv() {
        let path = artifact_path(output_dir, &args.protocols_csv);
        write_csv(&path, &analysis.summary.protocols)?;
        info!("Protocol distribution saved to: {}", path.display());

        let path = artifact_path(output_dir, &args.pairs_csv);
        write_csv(&path, &analysis.summary.ip_pairs)?;
        info!("IP address communications saved to: {}", path.display());

        let path = artifact_path(output_dir, &args.shares_csv);
        write_csv(&path, &analysis.summary.protocol_shares)?;
        info!("Protocol share per IP pair saved to: {}", path.display());
    }

    let html_path = match &args.html {
        Some(path) => Some(artifact_path(output_dir, path)),
        None if config.report.wants_html() => Some(output_dir.join("summary.html")),
        None => None,
    };

    if let Some(path) = html_path {
        let resolver: Option<&dyn AddressResolver> = if args.resolve || config.resolver.enabled {
            Some(&SystemResolver)
        } else {
            None
        };
        let html = render_html(analysis, resolver);
        fs::write(&path, html)
            .with_context(|| format!("failed to write HTML summary {}", path.display()))?;
        info!("HTML summary saved to: {}", path.display());
    }

    Ok(())
}

fn artifact_path(output_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        output_dir.join(path)
    }
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Render the HTML summary fragment.
///
/// With a resolver, the pair tables carry hostname columns; a failed lookup
/// renders the `Unknown` sentinel for that row only.
pub fn render_html(analysis: &AnalysisReport, resolver: Option<&dyn AddressResolver>) -> String {
    let mut html = String::new();

    let (bandwidth, unit) = scaled_bandwidth(analysis.summary.total_bandwidth);
    html.push_str(&format!(
        "<p>Total bandwidth used: {bandwidth:.2} {unit}</p>\n"
    ));
    html.push_str(&format!(
        "<p>Generated: {}</p>\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));

    html.push_str("<h3>Protocol Distribution:</h3>\n");
    push_table(
        &mut html,
        &["Protocol", "Count", "Percentage"],
        analysis.summary.protocols.iter().map(|stat| {
            vec![
                stat.protocol.to_string(),
                stat.count.to_string(),
                format!("{:.2}", stat.percentage),
            ]
        }),
    );

    html.push_str("<h3>Top IP Address Communications:</h3>\n");
    match resolver {
        Some(resolver) => push_table(
            &mut html,
            &[
                "Source IP",
                "Source Host",
                "Destination IP",
                "Destination Host",
                "Count",
                "Percentage",
            ],
            analysis.summary.ip_pairs.iter().map(|stat| {
                vec![
                    stat.source.to_string(),
                    resolve_or_unknown(resolver, stat.source),
                    stat.dest.to_string(),
                    resolve_or_unknown(resolver, stat.dest),
                    stat.count.to_string(),
                    format!("{:.2}", stat.percentage),
                ]
            }),
        ),
        None => push_table(
            &mut html,
            &["Source IP", "Destination IP", "Count", "Percentage"],
            analysis.summary.ip_pairs.iter().map(|stat| {
                vec![
                    stat.source.to_string(),
                    stat.dest.to_string(),
                    stat.count.to_string(),
                    format!("{:.2}", stat.percentage),
                ]
            }),
        ),
    }

    html.push_str("<h3>Share of each protocol between IPs:</h3>\n");
    push_table(
        &mut html,
        &["Source IP", "Destination IP", "Protocol", "Count", "Percentage"],
        analysis.summary.protocol_shares.iter().map(|share| {
            vec![
                share.source.to_string(),
                share.dest.to_string(),
                share.protocol.to_string(),
                share.count.to_string(),
                format!("{:.2}", share.percentage),
            ]
        }),
    );

    if !analysis.port_scans.is_empty() {
        html.push_str("<h3>Potential Port Scanners:</h3>\n");
        push_table(
            &mut html,
            &["Source IP", "Distinct Ports"],
            analysis.port_scans.iter().map(|finding| {
                vec![
                    finding.source.to_string(),
                    finding.distinct_ports.to_string(),
                ]
            }),
        );
    }

    html
}

fn push_table<I>(html: &mut String, headers: &[&str], rows: I)
where
    I: Iterator<Item = Vec<String>>,
{
    html.push_str("<table>\n<tr>");
    for header in headers {
        html.push_str(&format!("<th>{header}</th>"));
    }
    html.push_str("</tr>\n");

    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{cell}</td>"));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n");
}
