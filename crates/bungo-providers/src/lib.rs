//! Bungo Providers - Upstream chat-completion client
//!
//! This crate wraps the single upstream chat-completion endpoint the relay
//! forwards to. Every failure comes back as a classified [`ProviderError`],
//! one variant per kind of upstream fault, so callers can map errors with a
//! plain `match`.

mod completion;
mod config;
mod error;
mod error_classify;
mod openai;
mod traits;

pub use completion::ChatCompletion;
pub use config::{ProviderConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
pub use error::{ApiErrorDetail, ProviderError};
pub use error_classify::{classify_error, parse_error_body, ErrorBodyInfo};
pub use openai::OpenAIClient;
pub use secrecy::SecretString;
pub use traits::{ChatCompletionClient, ProviderResult};
