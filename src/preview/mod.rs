//! Preview resolution.
//!
//! # Data Flow
//! ```text
//! GET /{slug} on the preview host (rewritten to /p/{slug})
//!     → resolver.rs (slug → store → normalize → validate → dispatch)
//!     → RenderedPage, or
//!     → error.rs (PreviewError, logged, collapsed to the shared 404)
//! ```
//!
//! # Design Decisions
//! - No failure here is fatal to the process
//! - The response never reveals which stage failed

pub mod error;
pub mod resolver;

pub use error::{not_found_policy, PreviewError};
pub use resolver::PreviewResolver;
