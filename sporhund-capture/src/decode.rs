//! Frame dissection down to the IP and TCP layers.
//!
//! Anything deeper than IP/TCP headers is out of scope: the dissector pulls
//! addresses, the protocol number, and the TCP destination port, nothing
//! else.

use std::net::IpAddr;

use etherparse::{NetSlice, SlicedPacket, TransportSlice};

/// IP-layer fields of one dissected frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IpFields {
    pub source: IpAddr,
    pub dest: IpAddr,
    pub protocol: u8,
    pub dest_port: Option<u16>,
}

/// One dissected frame. `ip` is `None` for frames without an IP layer
/// (ARP, link-local noise, or anything the dissector rejects).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedFrame {
    pub ip: Option<IpFields>,
    pub size_bytes: u64,
}

/// Dissect one frame starting at the Ethernet layer.
pub fn decode_frame(data: &[u8], wire_length: u32) -> DecodedFrame {
    let size_bytes = u64::from(wire_length);

    let sliced = match SlicedPacket::from_ethernet(data) {
        Ok(sliced) => sliced,
        Err(_) => return DecodedFrame { ip: None, size_bytes },
    };

    let (source, dest, protocol) = match &sliced.net {
        Some(NetSlice::Ipv4(ipv4)) => {
            let header = ipv4.header();
            (
                IpAddr::V4(header.source_addr()),
                IpAddr::V4(header.destination_addr()),
                header.protocol().0,
            )
        }
        Some(NetSlice::Ipv6(ipv6)) => {
            let header = ipv6.header();
            (
                IpAddr::V6(header.source_addr()),
                IpAddr::V6(header.destination_addr()),
                header.next_header().0,
            )
        }
        _ => return DecodedFrame { ip: None, size_bytes },
    };

    // Destination ports feed the scan heuristic only for TCP. UDP and the
    // rest are recorded portless.
    let dest_port = match &sliced.transport {
        Some(TransportSlice::Tcp(tcp)) => Some(tcp.destination_port()),
        _ => None,
    };

    DecodedFrame {
        ip: Some(IpFields {
            source,
            dest,
            protocol,
            dest_port,
        }),
        size_bytes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use etherparse::PacketBuilder;

    fn tcp_frame(dest_port: u16) -> Vec<u8> {
        let builder = PacketBuilder::ethernet2([1, 2, 3, 4, 5, 6], [7, 8, 9, 10, 11, 12])
            .ipv4([192, 168, 1, 1], [192, 168, 1, 2], 64)
            .tcp(49152, dest_port, 0, 64_000);
        let mut frame = Vec::with_capacity(builder.size(0));
        builder.write(&mut frame, &[]).unwrap();
        frame
    }

    #[test]
    fn tcp_frame_carries_dest_port() {
        let frame = tcp_frame(443);
        let decoded = decode_frame(&frame, frame.len() as u32);
        let ip = decoded.ip.expect("IP layer expected");
        assert_eq!(ip.source, "192.168.1.1".parse::<IpAddr>().unwrap());
        assert_eq!(ip.dest, "192.168.1.2".parse::<IpAddr>().unwrap());
        assert_eq!(ip.protocol, 6);
        assert_eq!(ip.dest_port, Some(443));
    }

    #[test]
    fn udp_frame_is_portless() {
        let builder = PacketBuilder::ethernet2([1, 2, 3, 4, 5, 6], [7, 8, 9, 10, 11, 12])
            .ipv4([10, 0, 0, 1], [10, 0, 0, 2], 64)
            .udp(5353, 53);
        let mut frame = Vec::with_capacity(builder.size(4));
        builder.write(&mut frame, &[0xde, 0xad, 0xbe, 0xef]).unwrap();

        let decoded = decode_frame(&frame, frame.len() as u32);
        let ip = decoded.ip.expect("IP layer expected");
        assert_eq!(ip.protocol, 17);
        assert_eq!(ip.dest_port, None);
    }

    #[test]
    fn ipv6_counts_as_ip_layer() {
        let builder = PacketBuilder::ethernet2([1, 2, 3, 4, 5, 6], [7, 8, 9, 10, 11, 12])
            .ipv6([1; 16], [2; 16], 64)
            .tcp(49152, 22, 0, 64_000);
        let mut frame = Vec::with_capacity(builder.size(0));
        builder.write(&mut frame, &[]).unwrap();

        let decoded = decode_frame(&frame, frame.len() as u32);
        let ip = decoded.ip.expect("IP layer expected");
        assert_eq!(ip.protocol, 6);
        assert_eq!(ip.dest_port, Some(22));
        assert!(ip.source.is_ipv6());
    }

    #[test]
    fn arp_frame_has_no_ip_layer() {
        // Ethernet header with the ARP ethertype, then an arbitrary payload.
        let mut frame = vec![0u8; 14];
        frame[12] = 0x08;
        frame[13] = 0x06;
        frame.extend_from_slice(&[0u8; 28]);

        let decoded = decode_frame(&frame, frame.len() as u32);
        assert!(decoded.ip.is_none());
        assert_eq!(decoded.size_bytes, frame.len() as u64);
    }

    #[test]
    fn wire_length_wins_over_captured_length() {
        let frame = tcp_frame(80);
        let decoded = decode_frame(&frame, 9000);
        assert_eq!(decoded.size_bytes, 9000);
    }
}
