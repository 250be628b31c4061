// sitepulse-api: Async client for the network controller's local Integration API.

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use error::{Error, ErrorKind};
pub use transport::Transport;
