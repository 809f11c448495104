//! Read-only queries the bot makes against the messaging platform.

pub mod port;
pub mod types;
