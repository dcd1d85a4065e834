//! Outbound HTTP plumbing shared by all webhook-style channels.

pub mod client;

pub use client::build_http_client;
