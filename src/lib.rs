//! Bark Client Library
//!
//! Sends push notifications through a Bark gateway using either the
//! path-encoded GET form or the JSON POST form, and classifies every outcome
//! into a typed [`BarkError`].

pub mod clients;
pub mod config;
pub mod endpoint;
pub mod errors;
pub mod request;
pub mod response;
pub mod transport;

// Re-export commonly used types for convenience
pub use clients::{BarkClient, BlockingBarkClient, ClientConfig};
pub use config::{Config, ConfigManager};
pub use errors::{BarkError, BarkResult};
pub use request::{Level, NotificationRequest};
pub use response::GatewayResponse;
pub use transport::{Transport, TransportStrategy};
