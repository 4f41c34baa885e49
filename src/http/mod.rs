//! HTTP surface.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum app, outer layers, host rewrite before routing)
//!     → request.rs (request id)
//!     → pages.rs (agency home, preview index, preview page, health)
//!       admin (listing, catalogue)
//!     → response.rs (shared not-found page)
//! ```

pub mod pages;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, PreviewServer};
