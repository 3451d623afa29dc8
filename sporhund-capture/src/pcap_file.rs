//! Offline pcap reading.

use std::path::Path;

use bytes::Bytes;
use pcap::{Capture, Offline};

use crate::error::CaptureError;

/// A raw frame pulled from the capture file.
#[derive(Clone, Debug)]
pub struct RawFrame {
    /// Captured bytes, starting at the link layer.
    pub data: Bytes,

    /// Original length on the wire, which may exceed the captured length
    /// when the capture was taken with a snap length.
    pub wire_length: u32,
}

/// Sequential reader over the frames of one capture file.
pub struct FrameSource {
    capture: Capture<Offline>,
}

impl FrameSource {
    /// Open a capture file. A missing or undecodable file is fatal.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CaptureError> {
        let path = path.as_ref();
        let capture = Capture::from_file(path).map_err(|source| CaptureError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { capture })
    }

    /// Pull the next frame, or `None` at end of capture.
    ///
    /// A mid-file read failure is fatal; there is no per-frame recovery.
    pub fn next_frame(&mut self) -> Result<Option<RawFrame>, CaptureError> {
        match self.capture.next_packet() {
            Ok(packet) => Ok(Some(RawFrame {
                data: Bytes::copy_from_slice(packet.data),
                wire_length: packet.header.len,
            })),
            Err(pcap::Error::NoMorePackets) => Ok(None),
            Err(e) => Err(CaptureError::Read(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_fatal() {
        let result = FrameSource::open("does/not/exist.pcap");
        assert!(matches!(result, Err(CaptureError::Open { .. })));
    }
}
