//! # Sporhund Detection
//!
//! The port-scan heuristic over the normalized record set.

pub mod port_scan;

pub use port_scan::{detect_port_scans, PortScanFinding, DEFAULT_PORT_SCAN_THRESHOLD};
