//! Normalized packet records and protocol naming.

use std::fmt;
use std::net::IpAddr;

use serde::{Serialize, Serializer};

/// One normalized observation derived from a single captured frame.
///
/// Records are immutable snapshots: built once during ingestion, then only
/// read by the aggregation and detection passes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PacketRecord {
    /// Source address from the IP header.
    pub source: IpAddr,

    /// Destination address from the IP header.
    pub dest: IpAddr,

    /// IP protocol number (v4 protocol field, v6 next header).
    pub protocol: u8,

    /// Original wire length of the frame in bytes.
    pub size_bytes: u64,

    /// Destination port, present only for port-bearing transports (TCP).
    /// `None` means "not applicable", never a stand-in for port 0.
    pub dest_port: Option<u16>,
}

/// Closed protocol name lookup.
///
/// Only the codes the reports name get a symbolic entry; everything else
/// renders through the `Unknown(code)` fallback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Protocol {
    Icmp,
    Tcp,
    Udp,
    Other(u8),
}

impl Protocol {
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Protocol::Icmp,
            6 => Protocol::Tcp,
            17 => Protocol::Udp,
            other => Protocol::Other(other),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Protocol::Icmp => 1,
            Protocol::Tcp => 6,
            Protocol::Udp => 17,
            Protocol::Other(code) => *code,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Icmp => write!(f, "ICMP"),
            Protocol::Tcp => write!(f, "TCP"),
            Protocol::Udp => write!(f, "UDP"),
            Protocol::Other(code) => write!(f, "Unknown({code})"),
        }
    }
}

impl Serialize for Protocol {
    /// Report tables carry the display name, not the numeric code.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
