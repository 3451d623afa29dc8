//! Conversion of dissected frames into the normalized record set.

use sporhund_core::PacketRecord;

use crate::decode::DecodedFrame;

/// Build a record from one dissected frame.
///
/// A frame without an IP layer yields `None`: it is skipped, not an error.
pub fn record_from_frame(frame: DecodedFrame) -> Option<PacketRecord> {
    let ip = frame.ip?;
    Some(PacketRecord {
        source: ip.source,
        dest: ip.dest,
        protocol: ip.protocol,
        size_bytes: frame.size_bytes,
        dest_port: ip.dest_port,
    })
}

/// Convert a sequence of dissected frames, dropping those without an IP
/// layer.
pub fn extract_records<I>(frames: I) -> Vec<PacketRecord>
where
    I: IntoIterator<Item = DecodedFrame>,
{
    frames.into_iter().filter_map(record_from_frame).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::IpFields;
    use std::net::IpAddr;

    fn ip_frame(source: &str, size_bytes: u64) -> DecodedFrame {
        DecodedFrame {
            ip: Some(IpFields {
                source: source.parse().unwrap(),
                dest: "10.0.0.9".parse().unwrap(),
                protocol: 6,
                dest_port: Some(80),
            }),
            size_bytes,
        }
    }

    #[test]
    fn frames_without_ip_layer_are_dropped() {
        let frames = vec![
            ip_frame("10.0.0.1", 100),
            DecodedFrame { ip: None, size_bytes: 60 },
            ip_frame("10.0.0.2", 200),
        ];

        let records = extract_records(frames);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].source, "10.0.0.1".parse::<IpAddr>().unwrap());
        assert_eq!(records[1].size_bytes, 200);
    }

    #[test]
    fn empty_input_yields_empty_records() {
        assert!(extract_records(Vec::new()).is_empty());
    }
}
