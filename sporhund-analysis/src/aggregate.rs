//! The aggregation pass.
//!
//! Every function here is a pure single pass over the immutable record set;
//! an empty input degrades to empty tables and zero bandwidth, never an
//! error. Orderings are fully deterministic so that two runs over the same
//! capture produce byte-identical reports.

use std::collections::BTreeMap;
use std::net::IpAddr;

use sporhund_core::{PacketRecord, Protocol};

use crate::stats::{IpPairStat, ProtocolShare, ProtocolStat, TrafficSummary};

/// Exact integer sum of all record sizes. No unit scaling happens here.
pub fn total_bandwidth(records: &[PacketRecord]) -> u64 {
    records.iter().map(|r| r.size_bytes).sum()
}

/// Record counts per protocol, as share of the total record count.
///
/// Sorted by count descending, ties by protocol code ascending.
pub fn protocol_distribution(records: &[PacketRecord]) -> Vec<ProtocolStat> {
    if records.is_empty() {
        return Vec::new();
    }

    let mut counts: BTreeMap<u8, u64> = BTreeMap::new();
    for record in records {
        *counts.entry(record.protocol).or_default() += 1;
    }

    let total = records.len() as f64;
    let mut stats: Vec<ProtocolStat> = counts
        .into_iter()
        .map(|(code, count)| ProtocolStat {
            protocol: Protocol::from_code(code),
            count,
            percentage: count as f64 / total * 100.0,
        })
        .collect();

    stats.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then(a.protocol.code().cmp(&b.protocol.code()))
    });
    stats
}

/// Communication counts per (source, dest) pair, as share of all pair
/// observations.
///
/// Sorted by count descending, ties by source then dest ascending.
pub fn ip_pair_distribution(records: &[PacketRecord]) -> Vec<IpPairStat> {
    if records.is_empty() {
        return Vec::new();
    }

    let mut counts: BTreeMap<(IpAddr, IpAddr), u64> = BTreeMap::new();
    for record in records {
        *counts.entry((record.source, record.dest)).or_default() += 1;
    }

    let total: u64 = counts.values().sum();
    let mut stats: Vec<IpPairStat> = counts
        .into_iter()
        .map(|((source, dest), count)| IpPairStat {
            source,
            dest,
            count,
            percentage: count as f64 / total as f64 * 100.0,
        })
        .collect();

    stats.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then(a.source.cmp(&b.source))
            .then(a.dest.cmp(&b.dest))
    });
    stats
}

/// Protocol counts per (source, dest) pair, as share of that pair's total.
///
/// Percentages are computed within each pair's group, so the shares of one
/// pair sum to 100. Sorted by (source, dest, protocol code) ascending.
pub fn protocol_share_per_pair(records: &[PacketRecord]) -> Vec<ProtocolShare> {
    let mut counts: BTreeMap<(IpAddr, IpAddr, u8), u64> = BTreeMap::new();
    let mut pair_totals: BTreeMap<(IpAddr, IpAddr), u64> = BTreeMap::new();
    for record in records {
        let pair = (record.source, record.dest);
        *counts
            .entry((record.source, record.dest, record.protocol))
            .or_default() += 1;
        *pair_totals.entry(pair).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|((source, dest, code), count)| {
            let group_total = pair_totals[&(source, dest)];
            ProtocolShare {
                source,
                dest,
                protocol: Protocol::from_code(code),
                count,
                percentage: count as f64 / group_total as f64 * 100.0,
            }
        })
        .collect()
}

/// All four aggregates over the same record set.
pub fn summarize(records: &[PacketRecord]) -> TrafficSummary {
    TrafficSummary {
        total_bandwidth: total_bandwidth(records),
        protocols: protocol_distribution(records),
        ip_pairs: ip_pair_distribution(records),
        protocol_shares: protocol_share_per_pair(records),
    }
}
