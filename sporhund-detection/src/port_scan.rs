//! Port-scan heuristic.
//!
//! Single pass, stateless: group the record set by source address, count
//! distinct destination ports, compare against the threshold. The
//! destination address is deliberately not part of the grouping key, so a
//! sweep of many ports on one host and a probe of few ports across many
//! hosts are indistinguishable here. Callers relying on this heuristic
//! should know both shapes can under- or over-trigger depending on traffic.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::net::IpAddr;

use sporhund_core::PacketRecord;

/// Default flagging threshold, in distinct destination ports.
pub const DEFAULT_PORT_SCAN_THRESHOLD: i64 = 100;

/// One flagged source.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PortScanFinding {
    pub source: IpAddr,

    /// Distinct destination ports observed from this source, across all
    /// destinations.
    pub distinct_ports: usize,
}

/// Flag sources touching at least `threshold` distinct destination ports.
///
/// Records without a destination port never contribute. A threshold of zero
/// or below flags every source with at least one port-bearing record; that
/// is the documented contract for such inputs, not an error. The result is
/// a set: order-insensitive, deterministic iteration.
pub fn detect_port_scans(records: &[PacketRecord], threshold: i64) -> BTreeSet<PortScanFinding> {
    let mut ports_per_source: BTreeMap<IpAddr, HashSet<u16>> = BTreeMap::new();
    for record in records {
        if let Some(port) = record.dest_port {
            ports_per_source
                .entry(record.source)
                .or_default()
                .insert(port);
        }
    }

    ports_per_source
        .into_iter()
        .filter(|(_, ports)| threshold <= 0 || ports.len() as i64 >= threshold)
        .map(|(source, ports)| PortScanFinding {
            source,
            distinct_ports: ports.len(),
        })
        .collect()
}
