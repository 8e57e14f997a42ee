//! HTTP client layer: `WalletHttp`, batch framing and response classification.

pub mod batch;
pub mod client;

pub use batch::{BatchItemResult, BatchRequest};
pub use client::WalletHttp;
