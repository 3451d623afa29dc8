//! Analysis runtime - coordinates ingestion, aggregation and detection.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument, trace};

use sporhund_analysis::{summarize, TrafficSummary};
use sporhund_capture::{decode_frame, record_from_frame, FrameSource};
use sporhund_config::SporhundConfig;
use sporhund_core::{Diagnostics, PacketRecord};
use sporhund_detection::{detect_port_scans, PortScanFinding};
use sporhund_telemetry::MetricsRecorder;

use crate::error::AnalysisError;

/// Complete result of one analysis run.
///
/// Derived snapshots only: computed once, never mutated, alive for the run
/// that produced them.
#[derive(Clone, Debug)]
pub struct AnalysisReport {
    /// Records with an IP layer that entered the analysis passes.
    pub records_total: usize,

    /// Frames dropped for lacking an IP layer.
    pub frames_skipped: usize,

    pub summary: TrafficSummary,
    pub port_scans: BTreeSet<PortScanFinding>,
}

/// Coordinates one batch transformation: capture file in, report out.
pub struct AnalysisRuntime {
    config: Arc<SporhundConfig>,
    metrics: MetricsRecorder,
    diagnostics: Arc<dyn Diagnostics>,
}

impl AnalysisRuntime {
    pub fn new(
        config: SporhundConfig,
        metrics: MetricsRecorder,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        debug!("Detection config: {:?}", config.detection);
        Self {
            config: Arc::new(config),
            metrics,
            diagnostics,
        }
    }

    /// Run the full pipeline against one capture file.
    ///
    /// The capture is loaded fully before any analysis begins. A run either
    /// completes with a full report or fails at ingestion; there is no
    /// partial output.
    #[instrument(skip(self), fields(capture = %capture_path.display()))]
    pub fn run(
        &self,
        capture_path: &Path,
        threshold: i64,
    ) -> Result<AnalysisReport, AnalysisError> {
        info!("Loading capture");
        let (records, frames_skipped) = self.load_records(capture_path)?;
        info!(
            records = records.len(),
            skipped = frames_skipped,
            "Capture ingested"
        );

        let started = Instant::now();
        // Aggregation and detection are independent, order-insensitive
        // consumers of the same immutable record set.
        let (summary, port_scans) = rayon::join(
            || summarize(&records),
            || detect_port_scans(&records, threshold),
        );
        self.metrics
            .analysis_duration
            .observe(started.elapsed().as_secs_f64());

        let port_scans = self.apply_whitelist(port_scans);
        self.report_findings(&port_scans);

        Ok(AnalysisReport {
            records_total: records.len(),
            frames_skipped,
            summary,
            port_scans,
        })
    }

    /// Run only the detection pass against one capture file.
    #[instrument(skip(self), fields(capture = %capture_path.display()))]
    pub fn detect(
        &self,
        capture_path: &Path,
        threshold: i64,
    ) -> Result<BTreeSet<PortScanFinding>, AnalysisError> {
        let (records, _) = self.load_records(capture_path)?;
        let findings = self.apply_whitelist(detect_port_scans(&records, threshold));
        self.report_findings(&findings);
        Ok(findings)
    }

    fn load_records(&self, path: &Path) -> Result<(Vec<PacketRecord>, usize), AnalysisError> {
        let mut source = FrameSource::open(path)?;
        let mut records = Vec::new();
        let mut skipped = 0usize;

        while let Some(frame) = source.next_frame()? {
            self.metrics.inc_frames();
            let decoded = decode_frame(&frame.data, frame.wire_length);
            match record_from_frame(decoded) {
                Some(record) => {
                    trace!(size = record.size_bytes, "Frame ingested");
                    self.metrics.inc_records();
                    records.push(record);
                }
                None => {
                    skipped += 1;
                    self.metrics.inc_frames_skipped();
                }
            }
        }

        Ok((records, skipped))
    }

    /// Drop findings from whitelisted source networks. The detector contract
    /// is untouched; suppression happens strictly after it.
    fn apply_whitelist(&self, findings: BTreeSet<PortScanFinding>) -> BTreeSet<PortScanFinding> {
        let whitelist = &self.config.detection.whitelist;
        if whitelist.is_empty() {
            return findings;
        }

        findings
            .into_iter()
            .filter(|finding| {
                let suppressed = whitelist.iter().any(|net| net.contains(finding.source));
                if suppressed {
                    self.diagnostics.info(&format!(
                        "Suppressing whitelisted source {}",
                        finding.source
                    ));
                }
                !suppressed
            })
            .collect()
    }

    fn report_findings(&self, findings: &BTreeSet<PortScanFinding>) {
        if findings.is_empty() {
            return;
        }

        let sources: Vec<String> = findings.iter().map(|f| f.source.to_string()).collect();
        self.diagnostics.warn(&format!(
            "Potential port scanning detected from IP addresses: {}",
            sources.join(", ")
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sporhund_core::NullDiagnostics;
    use std::sync::Mutex;

    struct CapturingDiagnostics {
        warnings: Mutex<Vec<String>>,
        infos: Mutex<Vec<String>>,
    }

    impl CapturingDiagnostics {
        fn new() -> Self {
            Self {
                warnings: Mutex::new(Vec::new()),
                infos: Mutex::new(Vec::new()),
            }
        }
    }

    impl Diagnostics for CapturingDiagnostics {
        fn info(&self, message: &str) {
            self.infos.lock().unwrap().push(message.to_string());
        }
        fn warn(&self, message: &str) {
            self.warnings.lock().unwrap().push(message.to_string());
        }
        fn error(&self, _message: &str) {}
    }

    fn runtime_with(
        config: SporhundConfig,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> AnalysisRuntime {
        AnalysisRuntime::new(config, MetricsRecorder::new(), diagnostics)
    }

    fn finding(source: &str, distinct_ports: usize) -> PortScanFinding {
        PortScanFinding {
            source: source.parse().unwrap(),
            distinct_ports,
        }
    }

    /// Minimal little-endian pcap writer: global header plus one record per
    /// frame. `wire_length` may exceed the captured bytes, as with a real
    /// snap length.
    fn write_pcap(path: &Path, frames: &[(Vec<u8>, u32)]) {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0xa1b2_c3d4u32.to_le_bytes());
        bytes.extend_from_slice(&2u16.to_le_bytes());
        bytes.extend_from_slice(&4u16.to_le_bytes());
        bytes.extend_from_slice(&0i32.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&65_535u32.to_le_bytes());
        bytes.extend_from_slice(&1u32.to_le_bytes());

        for (seconds, (data, wire_length)) in frames.iter().enumerate() {
            bytes.extend_from_slice(&(seconds as u32).to_le_bytes());
            bytes.extend_from_slice(&0u32.to_le_bytes());
            bytes.extend_from_slice(&(data.len() as u32).to_le_bytes());
            bytes.extend_from_slice(&wire_length.to_le_bytes());
            bytes.extend_from_slice(data);
        }

        std::fs::write(path, bytes).unwrap();
    }

    fn tcp_frame(source: [u8; 4], dest: [u8; 4], dest_port: u16) -> Vec<u8> {
        let builder = etherparse::PacketBuilder::ethernet2([1, 2, 3, 4, 5, 6], [7, 8, 9, 10, 11, 12])
            .ipv4(source, dest, 64)
            .tcp(49152, dest_port, 0, 64_000);
        let mut frame = Vec::with_capacity(builder.size(0));
        builder.write(&mut frame, &[]).unwrap();
        frame
    }

    fn udp_frame(source: [u8; 4], dest: [u8; 4]) -> Vec<u8> {
        let builder = etherparse::PacketBuilder::ethernet2([1, 2, 3, 4, 5, 6], [7, 8, 9, 10, 11, 12])
            .ipv4(source, dest, 64)
            .udp(5353, 53);
        let mut frame = Vec::with_capacity(builder.size(0));
        builder.write(&mut frame, &[]).unwrap();
        frame
    }

    fn arp_frame() -> Vec<u8> {
        let mut frame = vec![0u8; 14];
        frame[12] = 0x08;
        frame[13] = 0x06;
        frame.extend_from_slice(&[0u8; 28]);
        frame
    }

    #[test]
    fn missing_capture_is_fatal() {
        let runtime = runtime_with(SporhundConfig::default(), Arc::new(NullDiagnostics));
        let result = runtime.run(Path::new("no/such/trace.pcap"), 100);
        assert!(matches!(result, Err(AnalysisError::Capture(_))));
    }

    #[test]
    fn end_to_end_over_a_small_trace() {
        let a = [10, 0, 0, 1];
        let b = [10, 0, 0, 2];
        let c = [10, 0, 0, 3];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.pcap");
        write_pcap(
            &path,
            &[
                (tcp_frame(a, b, 80), 100),
                (tcp_frame(a, b, 443), 200),
                (udp_frame(a, c), 50),
                (arp_frame(), 42),
            ],
        );

        let runtime = runtime_with(SporhundConfig::default(), Arc::new(NullDiagnostics));
        let report = runtime.run(&path, 100).unwrap();

        assert_eq!(report.records_total, 3);
        assert_eq!(report.frames_skipped, 1);
        assert_eq!(report.summary.total_bandwidth, 350);
        assert!(report.port_scans.is_empty());

        let protocols = &report.summary.protocols;
        assert_eq!(protocols.len(), 2);
        assert_eq!(protocols[0].count, 2);
        assert!((protocols[0].percentage - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(protocols[1].count, 1);

        let pairs = &report.summary.ip_pairs;
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].count, 2);
        assert_eq!(pairs[0].dest, "10.0.0.2".parse::<std::net::IpAddr>().unwrap());

        // Single-protocol pairs own their whole group.
        for share in &report.summary.protocol_shares {
            assert!((share.percentage - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn detect_flags_a_scanning_source() {
        let scanner = [192, 168, 0, 5];
        let target = [10, 0, 0, 1];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.pcap");
        let frames: Vec<(Vec<u8>, u32)> = (1..=120u16)
            .map(|port| (tcp_frame(scanner, target, port), 60))
            .collect();
        write_pcap(&path, &frames);

        let diagnostics = Arc::new(CapturingDiagnostics::new());
        let runtime = runtime_with(SporhundConfig::default(), diagnostics.clone());

        let findings = runtime.detect(&path, 100).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings.iter().next().unwrap().distinct_ports, 120);

        let warnings = diagnostics.warnings.lock().unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("192.168.0.5"));
    }

    #[test]
    fn whitelist_suppresses_findings() {
        let mut config = SporhundConfig::default();
        config
            .detection
            .whitelist
            .push("192.168.0.0/16".parse().unwrap());

        let diagnostics = Arc::new(CapturingDiagnostics::new());
        let runtime = runtime_with(config, diagnostics.clone());

        let findings: BTreeSet<_> =
            [finding("192.168.0.5", 120), finding("10.0.0.7", 150)].into();
        let kept = runtime.apply_whitelist(findings);

        assert_eq!(kept.len(), 1);
        assert_eq!(
            kept.iter().next().unwrap().source,
            "10.0.0.7".parse::<std::net::IpAddr>().unwrap()
        );
        assert_eq!(diagnostics.infos.lock().unwrap().len(), 1);
    }

    #[test]
    fn findings_are_reported_through_the_sink() {
        let diagnostics = Arc::new(CapturingDiagnostics::new());
        let runtime = runtime_with(SporhundConfig::default(), diagnostics.clone());

        runtime.report_findings(&[finding("10.0.0.7", 150)].into());

        let warnings = diagnostics.warnings.lock().unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("10.0.0.7"));
    }

    #[test]
    fn no_findings_means_no_warning() {
        let diagnostics = Arc::new(CapturingDiagnostics::new());
        let runtime = runtime_with(SporhundConfig::default(), diagnostics.clone());

        runtime.report_findings(&BTreeSet::new());
        assert!(diagnostics.warnings.lock().unwrap().is_empty());
    }
}
