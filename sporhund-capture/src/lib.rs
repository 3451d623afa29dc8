//! sporhund-capture
//!
//! Offline capture reading and frame dissection for Sporhund.
//! The capture file is the only input of a run: opening or reading it is
//! all-or-nothing, while individual frames without an IP layer are simply
//! skipped during ingestion.

pub mod decode;
pub mod error;
pub mod ingest;
pub mod pcap_file;

pub use decode::{decode_frame, DecodedFrame, IpFields};
pub use error::CaptureError;
pub use ingest::{extract_records, record_from_frame};
pub use pcap_file::{FrameSource, RawFrame};
