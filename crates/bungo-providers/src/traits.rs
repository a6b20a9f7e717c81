//! Chat-completion client trait

use async_trait::async_trait;
use bungo_protocol::Message;

use crate::{ChatCompletion, ProviderError};

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Something that can complete a chat conversation.
#[async_trait]
pub trait ChatCompletionClient: Send + Sync {
    /// Send the conversation and return the upstream response body as-is.
    async fn create_chat_completion(&self, messages: &[Message]) -> ProviderResult<ChatCompletion>;

    /// Get the model identifier
    fn model(&self) -> &str;

    /// Get the provider name
    fn provider(&self) -> &str;
}
