//! Business logic layer for cmd-relay
//!
//! Bridges the async HTTP surface and the synchronous storage, and owns the
//! validate-execute-record flow against the upstream executor.

mod blocking;
mod error;
mod history_service;
mod relay_service;

pub use error::ServiceError;
pub use history_service::HistoryService;
pub use relay_service::{Execution, RelayService};
