//! Core domain + application logic for the join-gated lookup bot.
//!
//! This crate is framework-agnostic. Telegram lives behind ports (traits)
//! implemented in the adapter crate.

pub mod config;
pub mod dispatch;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod gate;
pub mod logging;
pub mod messaging;
pub mod platform;
pub mod replies;
pub mod workflow;

#[cfg(test)]
pub(crate) mod testing;

pub use errors::{Error, Result};
