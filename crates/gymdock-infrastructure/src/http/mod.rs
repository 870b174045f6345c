pub mod client;

pub use client::{HttpBackend, HttpStatusError, RetryConfig};
