//! # Sporhund Analysis
//!
//! The aggregation pass: total bandwidth and the three distribution tables,
//! all pure functions over the immutable record set. Rendering is someone
//! else's job; the display-unit contract the renderer must honor lives in
//! [`units`].

pub mod aggregate;
pub mod stats;
pub mod units;

pub use aggregate::{
    ip_pair_distribution, protocol_distribution, protocol_share_per_pair, summarize,
    total_bandwidth,
};
pub use stats::{IpPairStat, ProtocolShare, ProtocolStat, TrafficSummary};
