//! OpenAI 호환 chat completions 백엔드 어댑터.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

use crate::application::config::Config;
use crate::application::ports::CompletionBackend;
use crate::domain::patch::{PatchConversation, ProviderResponse, TokenUsage};
use crate::infrastructure::config::resolve_provider_api_key;
use crate::infrastructure::secret::SecretString;

use super::api_runner::{build_api_client, endpoint_url, send_json};

pub struct OpenAiBackend {
    client: Client,
    endpoint: String,
    model: String,
    credential: SecretString,
}

impl OpenAiBackend {
    pub fn new(
        api_base: &str,
        model: impl Into<String>,
        credential: SecretString,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        Ok(Self {
            client: build_api_client(timeout)?,
            endpoint: endpoint_url(api_base, "chat/completions")?,
            model: model.into(),
            credential,
        })
    }

    /// 설정에서 모델/엔드포인트/인증 키를 읽어 백엔드를 만든다.
    /// 비활성화되어 있거나 인증 키가 없으면 오류.
    pub fn from_config(config: &Config, model_override: Option<&str>) -> Result<Self> {
        let provider = config.openai();
        if !provider.is_enabled() {
            bail!("openai provider is disabled. Set providers.openai.enabled to true");
        }

        let resolution = resolve_provider_api_key(&provider);
        let credential = resolution.credential.with_context(|| {
            format!(
                "missing API key for openai ({}). Configure providers.openai.api_key or providers.openai.api_key_env",
                resolution.source.as_deref().unwrap_or("not configured")
            )
        })?;

        let model = model_override
            .map(str::to_string)
            .unwrap_or_else(|| provider.model());
        Self::new(
            &provider.api_base(),
            model,
            credential,
            provider.timeout_ms.map(Duration::from_millis),
        )
    }

    fn payload(&self, conversation: &PatchConversation) -> Value {
        let messages: Vec<Value> = conversation
            .messages
            .iter()
            .map(|m| json!({ "role": m.role.as_str(), "content": m.content }))
            .collect();
        json!({
            "model": self.model,
            "messages": messages,
            "temperature": conversation.temperature,
        })
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    fn id(&self) -> &'static str {
        "openai"
    }

    fn name(&self) -> &'static str {
        "OpenAI"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, conversation: &PatchConversation) -> Result<ProviderResponse> {
        debug!(endpoint = %self.endpoint, model = %self.model, "calling chat completions");
        let request = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.credential.expose())
            .json(&self.payload(conversation));

        let response = send_json(self.name(), "request chat completion", request).await?;
        parse_completion(&response)
    }
}

/// `choices[0].message.content`와 사용량을 꺼낸다.
fn parse_completion(response: &Value) -> Result<ProviderResponse> {
    let content = response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .context("OpenAI: response has no choices[0].message.content")?;

    Ok(ProviderResponse {
        content: content.to_string(),
        usage: TokenUsage {
            prompt_tokens: response
                .pointer("/usage/prompt_tokens")
                .and_then(Value::as_u64),
            completion_tokens: response
                .pointer("/usage/completion_tokens")
                .and_then(Value::as_u64),
            total_tokens: response
                .pointer("/usage/total_tokens")
                .and_then(Value::as_u64),
        },
    })
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;

    use super::*;
    use crate::domain::patch::PromptText;

    fn backend(base: &str) -> OpenAiBackend {
        OpenAiBackend::new(base, "gpt-4", SecretString::from("sk-test".to_string()), None).unwrap()
    }

    fn conversation() -> PatchConversation {
        PatchConversation::new("system text", &PromptText::new("user text".to_string()))
    }

    #[tokio::test]
    async fn sends_two_messages_at_zero_temperature() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::Json(json!({
                "model": "gpt-4",
                "messages": [
                    { "role": "system", "content": "system text" },
                    { "role": "user", "content": "user text" }
                ],
                "temperature": 0.0
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "choices": [{ "message": { "role": "assistant", "content": "```diff\n+x\n```" } }],
                    "usage": { "prompt_tokens": 12, "completion_tokens": 5, "total_tokens": 17 }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let response = backend(&server.url()).complete(&conversation()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.content, "```diff\n+x\n```");
        assert_eq!(response.usage.total_tokens, Some(17));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let err = backend(&server.url())
            .complete(&conversation())
            .await
            .unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("500"));
        assert!(msg.contains("upstream exploded"));
    }

    #[test]
    fn missing_content_is_an_error() {
        let err = parse_completion(&json!({ "choices": [] })).unwrap_err();
        assert!(format!("{err}").contains("choices[0].message.content"));

        let err = parse_completion(&json!({ "choices": [{ "message": { "content": null } }] }))
            .unwrap_err();
        assert!(format!("{err}").contains("choices[0].message.content"));
    }

    #[test]
    fn usage_is_optional() {
        let response =
            parse_completion(&json!({ "choices": [{ "message": { "content": "ok" } }] })).unwrap();
        assert_eq!(response.content, "ok");
        assert!(response.usage.is_empty());
    }

    #[test]
    fn from_config_requires_credential() {
        let config: Config = serde_json::from_str(
            r#"{ "providers": { "openai": { "api_key_env": "PATCHPILOT_TEST_UNSET_KEY_9F2C" } } }"#,
        )
        .unwrap();
        let err = OpenAiBackend::from_config(&config, None).err().unwrap();
        assert!(format!("{err}").contains("missing API key"));
    }

    #[test]
    fn from_config_applies_model_override() {
        let config: Config = serde_json::from_str(
            r#"{ "providers": { "openai": { "api_key": "sk-inline", "model": "gpt-4" } } }"#,
        )
        .unwrap();
        let backend = OpenAiBackend::from_config(&config, Some("gpt-4o")).unwrap();
        assert_eq!(backend.model(), "gpt-4o");
        assert_eq!(backend.endpoint, "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn disabled_provider_is_rejected() {
        let config: Config = serde_json::from_str(
            r#"{ "providers": { "openai": { "enabled": false, "api_key": "sk-inline" } } }"#,
        )
        .unwrap();
        assert!(OpenAiBackend::from_config(&config, None).is_err());
    }
}
