//! GeminiModel -- concrete [`ChatModel`] for Google Gemini.
//!
//! The API key is held as a [`SecretString`] and only exposed when building
//! the `x-goog-api-key` header.

use std::pin::Pin;
use std::time::Duration;

use futures_util::Stream;
use secrecy::SecretString;
use tracing::{Instrument, info_span};

use edgo_core::llm::provider::ChatModel;
use edgo_core::session::StreamInSpan;
use edgo_observe::genai_attrs::{OP_CHAT, OP_GENERATE, PROVIDER_GEMINI, span_name};
use edgo_types::llm::{ChatRequest, LlmError};

use super::streaming::{create_gemini_stream, send_checked};
use super::types::{GenerateContentRequest, GenerateContentResponse};

pub struct GeminiModel {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
}

impl GeminiModel {
    pub fn new(api_key: Option<SecretString>, base_url: &str) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `{base}/models/{model}:{method}`.
    pub fn url(&self, model: &str, method: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("{}/models/{model}:{method}", self.base_url)
    }

    fn api_key(&self) -> Result<&SecretString, LlmError> {
        self.api_key.as_ref().ok_or_else(|| LlmError::Provider {
            message: "no API key found; set GEMINI_API_KEY or API_KEY".to_string(),
        })
    }
}

impl ChatModel for GeminiModel {
    fn name(&self) -> &str {
        PROVIDER_GEMINI
    }

    fn check_ready(&self) -> Result<(), LlmError> {
        self.api_key().map(|_| ())
    }

    async fn generate(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let generation = &request.generation;
        let span = info_span!(
            "gen_ai.generate",
            otel.name = %span_name(OP_GENERATE, &generation.model),
            gen_ai.operation.name = OP_GENERATE,
            gen_ai.provider.name = PROVIDER_GEMINI,
            gen_ai.request.model = %generation.model,
            gen_ai.request.temperature = generation.temperature,
            gen_ai.request.max_tokens = generation.max_output_tokens,
            gen_ai.request.stream = false,
        );

        async {
            let api_key = self.api_key()?;
            let url = self.url(&generation.model, "generateContent");
            let body = GenerateContentRequest::from(request);

            let response = send_checked(&self.client, &url, &body, api_key).await?;
            let response: GenerateContentResponse = response.json().await.map_err(|e| {
                LlmError::Deserialization(format!("failed to parse response: {e}"))
            })?;

            if let Some(reason) = response.block_reason() {
                return Err(LlmError::Blocked(reason.to_string()));
            }
            tracing::debug!(
                finish_reason = ?response.finish_reason(),
                output_tokens = ?response.usage_metadata.map(|u| u.candidates_token_count),
                "generation complete"
            );
            Ok::<_, LlmError>(response.text())
        }
        .instrument(span)
        .await
    }

    fn stream(
        &self,
        request: ChatRequest,
    ) -> Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send + 'static>> {
        let generation = &request.generation;
        let span = info_span!(
            "gen_ai.stream",
            otel.name = %span_name(OP_CHAT, &generation.model),
            gen_ai.operation.name = OP_CHAT,
            gen_ai.provider.name = PROVIDER_GEMINI,
            gen_ai.request.model = %generation.model,
            gen_ai.request.temperature = generation.temperature,
            gen_ai.request.max_tokens = generation.max_output_tokens,
            gen_ai.request.stream = true,
        );

        let api_key = match self.api_key() {
            Ok(key) => key,
            Err(e) => return Box::pin(futures_util::stream::once(async move { Err(e) })),
        };
        let url = format!(
            "{}?alt=sse",
            self.url(&generation.model, "streamGenerateContent")
        );
        let body = GenerateContentRequest::from(&request);
        let stream = create_gemini_stream(&self.client, &url, body, api_key);

        Box::pin(StreamInSpan::new(stream, span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgo_types::llm::{GenerationConfig, Turn};
    use futures_util::StreamExt;

    const BASE: &str = "https://generativelanguage.googleapis.com/v1beta/";

    #[test]
    fn test_url_building() {
        let model = GeminiModel::new(None, BASE).unwrap();
        assert_eq!(
            model.url("gemini-2.5-flash", "generateContent"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(
            model.url("models/gemini-2.5-pro", "streamGenerateContent"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-pro:streamGenerateContent"
        );
    }

    #[test]
    fn test_not_ready_without_key() {
        let model = GeminiModel::new(None, BASE).unwrap();
        assert!(model.check_ready().is_err());

        let model = GeminiModel::new(Some(SecretString::from("k".to_string())), BASE).unwrap();
        assert!(model.check_ready().is_ok());
        assert_eq!(ChatModel::name(&model), "gemini");
    }

    #[tokio::test]
    async fn test_stream_without_key_yields_error() {
        let model = GeminiModel::new(None, BASE).unwrap();
        let request = ChatRequest {
            system_instruction: "sys".to_string(),
            contents: vec![Turn::user("hi")],
            generation: GenerationConfig::default(),
        };
        let items: Vec<_> = model.stream(request).collect().await;
        assert_eq!(items.len(), 1);
        assert!(items[0].is_err());
    }
}
