//! Upstream executor client for cmd-relay
//!
//! One outbound POST per command to the third-party execution API, with
//! bearer-token auth and a fixed timeout. Failures are classified and
//! surfaced to the caller; nothing is retried.

mod client;
mod error;

pub use client::UpstreamClient;
pub use error::UpstreamError;
