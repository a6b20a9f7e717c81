//! Bungo Protocol - Shared wire types
//!
//! This crate defines the types exchanged between the Bungo relay's layers:
//! - Chat messages as forwarded to the upstream chat-completion API
//! - The inbound ask request and its optional request context

mod messages;
mod request;

pub use messages::*;
pub use request::*;
