//! Best-effort reverse address resolution.
//!
//! Resolution is never required for correctness of the statistics: a failed
//! lookup yields the [`UNKNOWN_HOST`] sentinel for that one row and nothing
//! else. Failures are not retried and not cached.

use std::net::IpAddr;

/// Sentinel substituted wherever a lookup fails.
pub const UNKNOWN_HOST: &str = "Unknown";

pub trait AddressResolver {
    /// Resolve an address to a hostname. `None` means the lookup failed at
    /// this call site; callers substitute [`UNKNOWN_HOST`] and move on.
    fn resolve(&self, addr: IpAddr) -> Option<String>;
}

/// Reverse DNS through the system resolver.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemResolver;

impl AddressResolver for SystemResolver {
    fn resolve(&self, addr: IpAddr) -> Option<String> {
        dns_lookup::lookup_addr(&addr).ok()
    }
}

/// Resolve with the sentinel fallback applied.
pub fn resolve_or_unknown(resolver: &dyn AddressResolver, addr: IpAddr) -> String {
    resolver
        .resolve(addr)
        .unwrap_or_else(|| UNKNOWN_HOST.to_string())
}
