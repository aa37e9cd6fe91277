//! Notification clients for the Bark gateway
//!
//! ## Architecture
//!
//! - **BarkClient**: async client; validates, shapes, dispatches once, classifies
//! - **BlockingBarkClient**: sync wrapper owning a current-thread runtime
//! - **ClientConfig**: key, server URL and per-attempt timeout
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bark_client::clients::{BarkClient, ClientConfig};
//! use bark_client::request::{Level, NotificationRequest};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), bark_client::errors::BarkError> {
//! let client = BarkClient::new(ClientConfig::new("YOUR_BARK_KEY"))?;
//!
//! let request = NotificationRequest::builder("Disk usage above 90%")
//!     .title("prod-db-1")
//!     .level(Level::TimeSensitive)
//!     .build();
//!
//! client.send(&request).await?;
//! client.send_post(&request).await?;
//! # Ok(())
//! # }
//! ```

pub mod bark;

pub use bark::{
    BarkClient, BlockingBarkClient, ClientConfig, DEFAULT_SERVER_URL, DEFAULT_TIMEOUT,
    DEFAULT_USER_AGENT,
};
