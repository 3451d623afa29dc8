use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::{debug, info, warn};

use sporhund_config::SporhundConfig;
use sporhund_engine::AnalysisRuntime;
use sporhund_telemetry::{EventLogger, MetricsRecorder, TracingDiagnostics};

use crate::report;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a capture: statistics, report artifacts, port-scan findings
    Analyze(AnalyzeArgs),
    /// Port-scan detection only
    Detect(DetectArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Capture file to analyze
    pub pcap: PathBuf,

    /// Output file for the protocol distribution table
    #[arg(long, default_value = "protocol_distribution.csv")]
    pub protocols_csv: PathBuf,

    /// Output file for the IP-pair communication table
    #[arg(long, default_value = "ip_communication.csv")]
    pub pairs_csv: PathBuf,

    /// Output file for the per-pair protocol share table
    #[arg(long, default_value = "protocol_share.csv")]
    pub shares_csv: PathBuf,

    /// Render an HTML summary to this file
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// Distinct-port threshold for the scan heuristic
    #[arg(short, long)]
    pub threshold: Option<String>,

    /// Annotate the HTML pair tables with reverse-resolved hostnames
    #[arg(long, default_value_t = false)]
    pub resolve: bool,

    /// Explicit configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct DetectArgs {
    /// Capture file to analyze
    pub pcap: PathBuf,

    /// Distinct-port threshold for the scan heuristic
    #[arg(short, long)]
    pub threshold: Option<String>,

    /// Explicit configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

pub fn run_analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    EventLogger::init(&config.telemetry.log_level);

    let threshold = resolve_threshold(
        args.threshold.as_deref(),
        config.detection.port_scan_threshold,
    );

    let metrics = MetricsRecorder::new();
    let runtime = AnalysisRuntime::new(
        config.clone(),
        metrics.clone(),
        Arc::new(TracingDiagnostics),
    );
    let analysis = runtime.run(&args.pcap, threshold)?;

    let (bandwidth, unit) = report::scaled_bandwidth(analysis.summary.total_bandwidth);
    info!("Total bandwidth used: {bandwidth:.2} {unit}");

    report::write_reports(&args, &config, &analysis)?;

    for finding in &analysis.port_scans {
        info!(
            "Flagged {}: {} distinct destination ports",
            finding.source, finding.distinct_ports
        );
    }

    let exposition = metrics.gather_metrics()?;
    debug!("{exposition}");
    Ok(())
}

pub fn run_detect(args: DetectArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    EventLogger::init(&config.telemetry.log_level);

    let threshold = resolve_threshold(
        args.threshold.as_deref(),
        config.detection.port_scan_threshold,
    );

    let runtime = AnalysisRuntime::new(
        config,
        MetricsRecorder::new(),
        Arc::new(TracingDiagnostics),
    );
    let findings = runtime.detect(&args.pcap, threshold)?;

    if findings.is_empty() {
        info!("No port scanning detected");
    }
    for finding in &findings {
        info!(
            "Flagged {}: {} distinct destination ports",
            finding.source, finding.distinct_ports
        );
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SporhundConfig> {
    let config = match path {
        Some(path) => SporhundConfig::load_from_path(path)?,
        None => SporhundConfig::load()?,
    };
    Ok(config)
}

/// The detector always receives an integer: malformed input at this boundary
/// degrades to the configured default with a warning instead of reaching it.
fn resolve_threshold(raw: Option<&str>, default: i64) -> i64 {
    match raw {
        None => default,
        Some(text) => text.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid port scan threshold {text:?}, using default {default}");
            default
        }),
    }
}
