//! OpenAI client implementation

use async_trait::async_trait;
use bungo_protocol::Message;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Serialize;
use std::time::Duration;

use crate::error::error_chain;
use crate::{
    classify_error, ChatCompletion, ChatCompletionClient, ProviderConfig, ProviderError,
    ProviderResult,
};

const PROVIDER_NAME: &str = "openai";

/// OpenAI chat-completions client
#[derive(Debug, Clone)]
pub struct OpenAIClient {
    client: Client,
    config: ProviderConfig,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

impl OpenAIClient {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let api_key = config
            .api_key
            .as_ref()
            .ok_or_else(|| ProviderError::Configuration("API key required for OpenAI".into()))?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
            .map_err(|_| ProviderError::Configuration("Invalid API key format".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()
            .map_err(|e| ProviderError::Configuration(error_chain(&e)))?;

        Ok(Self { client, config })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.config.base_url())
    }
}

#[async_trait]
impl ChatCompletionClient for OpenAIClient {
    async fn create_chat_completion(
        &self,
        messages: &[Message],
    ) -> ProviderResult<ChatCompletion> {
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages,
        };
        let url = self.endpoint();

        tracing::debug!(
            url = %url,
            model = %self.config.model,
            messages = messages.len(),
            "sending chat completion request"
        );

        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), body = %body, "upstream returned an error");
            return Err(classify_error(status.as_u16(), &body));
        }

        let body = response.text().await?;
        let completion = ChatCompletion::from_body(body)?;

        tracing::debug!(status = status.as_u16(), "chat completion succeeded");
        Ok(completion)
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn provider(&self) -> &str {
        PROVIDER_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_api_key() {
        let err = OpenAIClient::new(ProviderConfig::default()).unwrap_err();
        assert!(matches!(err, ProviderError::Configuration(_)));
    }

    #[test]
    fn test_rejects_key_with_newline() {
        let err = OpenAIClient::new(ProviderConfig::new("sk-bad\nkey")).unwrap_err();
        assert!(matches!(err, ProviderError::Configuration(_)));
    }

    #[test]
    fn test_endpoint_uses_base_url() {
        let client = OpenAIClient::new(ProviderConfig::new("sk-test")).unwrap();
        assert_eq!(client.endpoint(), "https://api.openai.com/v1/chat/completions");

        let client =
            OpenAIClient::new(ProviderConfig::new("sk-test").with_base_url("http://127.0.0.1:1/"))
                .unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:1/v1/chat/completions");
    }

    #[test]
    fn test_request_serialization() {
        let messages = vec![Message::system("S"), Message::user("Hello")];
        let request = ChatCompletionRequest {
            model: "gpt-4-turbo-preview",
            messages: &messages,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "model": "gpt-4-turbo-preview",
                "messages": [
                    {"role": "system", "content": "S"},
                    {"role": "user", "content": "Hello"}
                ]
            })
        );
    }
}
