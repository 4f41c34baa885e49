//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (host, path, query)
//!     → rewrite.rs (middleware, runs before route matching)
//!     → host.rs (classify host, decide rewrite)
//!     → Return: rewritten URI or untouched request
//!
//! Rule Compilation (at startup):
//!     HostsConfig
//!     → Lowercase labels, normalize preview route
//!     → Freeze as immutable HostRouter
//! ```
//!
//! # Design Decisions
//! - Rules compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always yields same decision

pub mod host;
pub mod rewrite;

pub use host::{HostKind, HostRouter, RouteDecision};
pub use rewrite::rewrite_host_middleware;
