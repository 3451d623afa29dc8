//! Aggregate statistic tables.
//!
//! All of these are derived snapshots computed once per analysis pass;
//! none are mutated after construction. Serde names match the report
//! column headers.

use std::net::IpAddr;

use serde::Serialize;
use sporhund_core::Protocol;

/// Share of one protocol in the whole record set.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProtocolStat {
    #[serde(rename = "Protocol")]
    pub protocol: Protocol,

    #[serde(rename = "Count")]
    pub count: u64,

    /// Relative to the total record count, in percent.
    #[serde(rename = "Percentage")]
    pub percentage: f64,
}

/// Communication volume between one (source, dest) address pair.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IpPairStat {
    #[serde(rename = "Source IP")]
    pub source: IpAddr,

    #[serde(rename = "Destination IP")]
    pub dest: IpAddr,

    #[serde(rename = "Count")]
    pub count: u64,

    /// Relative to the total number of pair observations, in percent.
    #[serde(rename = "Percentage")]
    pub percentage: f64,
}

/// Share of one protocol within one (source, dest) pair's traffic.
///
/// Percentages are computed within the pair's group: over all protocols of
/// a fixed pair they sum to 100 (floating rounding aside).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProtocolShare {
    #[serde(rename = "Source IP")]
    pub source: IpAddr,

    #[serde(rename = "Destination IP")]
    pub dest: IpAddr,

    #[serde(rename = "Protocol")]
    pub protocol: Protocol,

    #[serde(rename = "Count")]
    pub count: u64,

    #[serde(rename = "Percentage")]
    pub percentage: f64,
}

/// Everything the aggregation pass produces for one run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrafficSummary {
    /// Exact byte total; unit scaling is display policy.
    pub total_bandwidth: u64,
    pub protocols: Vec<ProtocolStat>,
    pub ip_pairs: Vec<IpPairStat>,
    pub protocol_shares: Vec<ProtocolShare>,
}
