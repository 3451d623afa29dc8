//! Prometheus metrics for the analysis pipeline.

use prometheus::{Counter, Histogram, HistogramOpts, Registry};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: Registry,
    pub frames_total: Counter,
    pub frames_skipped: Counter,
    pub records_total: Counter,
    pub analysis_duration: Histogram,
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder {
    pub fn new() -> Self {
        let registry = Registry::new();
        let frames_total =
            Counter::new("sporhund_frames_total", "Total frames read from the capture").unwrap();
        let frames_skipped = Counter::new(
            "sporhund_frames_skipped_total",
            "Frames dropped for lacking an IP layer",
        )
        .unwrap();
        let records_total = Counter::new(
            "sporhund_records_total",
            "Normalized records entering the analysis passes",
        )
        .unwrap();

        let analysis_duration = Histogram::with_opts(
            HistogramOpts::new(
                "sporhund_analysis_duration_seconds",
                "Aggregation and detection wall time",
            )
            .buckets(vec![0.01, 0.1, 1.0, 10.0]),
        )
        .unwrap();

        registry.register(Box::new(frames_total.clone())).unwrap();
        registry.register(Box::new(frames_skipped.clone())).unwrap();
        registry.register(Box::new(records_total.clone())).unwrap();
        registry
            .register(Box::new(analysis_duration.clone()))
            .unwrap();

        Self {
            registry,
            frames_total,
            frames_skipped,
            records_total,
            analysis_duration,
        }
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap())
    }

    pub fn inc_frames(&self) {
        self.frames_total.inc();
    }

    pub fn inc_frames_skipped(&self) {
        self.frames_skipped.inc();
    }

    pub fn inc_records(&self) {
        self.records_total.inc();
    }
}
