//! Core types for cmd-relay
//!
//! This crate contains domain types shared across all other crates.

mod command;
mod constants;
mod env_config;
mod session;

pub use command::*;
pub use constants::*;
pub use env_config::*;
pub use session::*;
