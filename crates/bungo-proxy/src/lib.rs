//! Bungo Proxy - chat-completion relay.
//!
//! Accepts a conversation on `POST /ask`, appends role guidance and the
//! caller's system information to the first message, and forwards it to the
//! OpenAI chat-completions API. Upstream failures are translated into fixed
//! status codes with a `{"detail": ...}` body.

pub mod config;
pub mod fault;
pub mod server;
pub mod telemetry;

pub use config::ProxyConfig;
pub use fault::{translate, UpstreamFailure};
pub use server::{configure, cors, serve, serve_with_client, AppState, ProxyError};
pub use telemetry::{init_subscriber, TelemetryConfig};
