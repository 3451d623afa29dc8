//! Bandwidth display contract.
//!
//! Unit conversion is display policy owned by the report formatter; the
//! boundary and the divisors it must honor are fixed here.

/// Divisor for rendering byte totals as Mbps.
pub const MBPS_DIVISOR: u64 = 1_000_000;

/// Divisor for rendering byte totals as Gbps.
pub const GBPS_DIVISOR: u64 = 1_000_000_000;

/// Totals below this many bytes render as Mbps, at or above as Gbps.
pub const GBPS_THRESHOLD_BYTES: u64 = 1_000_000_000;
