//! HTTP gateway for OpenRouter chat completions

use super::types::{ChatMessage, ChatRequest, ChatResponse};
use crate::config::FileProviderConfig;
use async_trait::async_trait;
use pm_assist_application::{GatewayError, LlmGateway};
use pm_assist_domain::Model;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Sent as `X-Title` so requests are attributed on the OpenRouter dashboard
const APP_TITLE: &str = "pm-assist";

/// [`LlmGateway`] backed by an OpenAI-compatible `/chat/completions` API
///
/// One prompt is one user message. No retries: a failed call is reported
/// to the caller as-is.
pub struct OpenRouterGateway {
    api_key: Option<String>,
    api_key_env: String,
    base_url: String,
    http: Client,
}

impl OpenRouterGateway {
    /// Build the gateway from `[provider]` settings.
    ///
    /// A missing key is not an error here; it surfaces on the first
    /// [`invoke`](LlmGateway::invoke), before any request is sent.
    pub fn from_config(config: &FileProviderConfig) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::Other(e.to_string()))?;

        Ok(Self {
            api_key: config.resolve_api_key(),
            api_key_env: config.api_key_env.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_request<'a>(model: &'a Model, prompt: &'a str, temperature: f32) -> ChatRequest<'a> {
        ChatRequest {
            model: model.as_str(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
        }
    }

    fn parse_response(response: ChatResponse) -> Result<String, GatewayError> {
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| GatewayError::InvalidResponse("response has no message content".into()))
    }
}

fn map_transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::ConnectionError(e.to_string())
    }
}

#[async_trait]
impl LlmGateway for OpenRouterGateway {
    async fn invoke(
        &self,
        model: &Model,
        prompt: &str,
        temperature: f32,
    ) -> Result<String, GatewayError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| GatewayError::MissingCredential(format!("set {}", self.api_key_env)))?;

        debug!(%model, temperature, prompt_len = prompt.len(), "invoke: sending request");
        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(api_key)
            .header("X-Title", APP_TITLE)
            .json(&Self::build_request(model, prompt, temperature))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "invoke: API error");
            return Err(GatewayError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        Self::parse_response(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: Option<&str>) -> FileProviderConfig {
        FileProviderConfig {
            api_key: api_key.map(str::to_string),
            api_key_env: "PM_ASSIST_TEST_UNSET_KEY".to_string(),
            base_url: "https://openrouter.example/api/v1/".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let gateway = OpenRouterGateway::from_config(&config(Some("sk-test"))).unwrap();
        assert_eq!(
            gateway.endpoint(),
            "https://openrouter.example/api/v1/chat/completions"
        );
        assert!(gateway.has_credential());
    }

    #[test]
    fn test_request_body_shape() {
        let model = Model::Llama33_70bInstruct;
        let body =
            serde_json::to_value(OpenRouterGateway::build_request(&model, "Hello", 0.5)).unwrap();
        assert_eq!(body["model"], "meta-llama/llama-3.3-70b-instruct");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Hello");
        assert_eq!(body["temperature"], 0.5);
    }

    #[test]
    fn test_parse_first_choice() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"id": "gen-1", "choices": [{"index": 0, "message": {"role": "assistant", "content": "Hi"}}]}"#,
        )
        .unwrap();
        assert_eq!(OpenRouterGateway::parse_response(response).unwrap(), "Hi");
    }

    #[test]
    fn test_parse_without_choices() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            OpenRouterGateway::parse_response(response),
            Err(GatewayError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_request() {
        let gateway = OpenRouterGateway::from_config(&config(None)).unwrap();
        assert!(!gateway.has_credential());
        let err = gateway
            .invoke(&Model::DeepSeekChat, "prompt", 0.1)
            .await
            .unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("PM_ASSIST_TEST_UNSET_KEY"));
    }
}
