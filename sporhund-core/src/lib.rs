//! # Sporhund Core
//!
//! Record model and the shared seams of the analyzer: the normalized packet
//! record every pass consumes, the closed protocol name lookup, the injected
//! diagnostics sink, and best-effort address resolution.

pub mod diagnostics;
pub mod records;
pub mod resolve;

pub use diagnostics::{Diagnostics, NullDiagnostics};
pub use records::{PacketRecord, Protocol};
pub use resolve::{AddressResolver, SystemResolver};
