//! Preview host: serves tenant landing-page previews on a dedicated
//! subdomain, rendered on demand from stored configuration.

pub mod admin;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod preview;
pub mod routing;
pub mod site;
pub mod store;
pub mod templates;

pub use config::schema::ServiceConfig;
pub use http::PreviewServer;
pub use lifecycle::Shutdown;
pub use preview::{PreviewError, PreviewResolver};
pub use store::{MemoryStore, PreviewStore};
pub use templates::TemplateRegistry;
