//! SSE stream creation and chunk parsing for `streamGenerateContent`.
//!
//! With `alt=sse` every event is a `data:` line holding one complete
//! `GenerateContentResponse` JSON object. Each one carries the next piece
//! of text in `candidates[0].content.parts`; the last also carries
//! `finishReason` and `usageMetadata`. Errors can arrive as a non-2xx
//! status before the stream starts or as an `error` object inside an event.

use std::pin::Pin;

use eventsource_stream::Eventsource;
use futures_util::{Stream, StreamExt};
use secrecy::{ExposeSecret, SecretString};

use edgo_types::llm::LlmError;

use super::types::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

/// Text and metadata carried by one stream event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedChunk {
    /// May be empty (e.g. the final event carrying only `finishReason`).
    pub text: String,
    pub finish_reason: Option<String>,
    pub output_tokens: Option<u32>,
}

/// Parse one SSE `data:` payload.
pub fn parse_chunk(data: &str) -> Result<ParsedChunk, LlmError> {
    let response: GenerateContentResponse = serde_json::from_str(data)
        .map_err(|e| LlmError::Deserialization(format!("gemini stream chunk: {e}")))?;

    if let Some(error) = response.error {
        return Err(LlmError::Provider {
            message: format!(
                "Gemini error {}: {}",
                error.code.map(|c| c.to_string()).unwrap_or_default(),
                error.message
            ),
        });
    }
    if let Some(reason) = response.block_reason() {
        return Err(LlmError::Blocked(reason.to_string()));
    }

    Ok(ParsedChunk {
        text: response.text(),
        finish_reason: response.finish_reason().map(str::to_string),
        output_tokens: response.usage_metadata.map(|u| u.candidates_token_count),
    })
}

/// Map a non-2xx status and body to an [`LlmError`].
pub fn status_error(status: reqwest::StatusCode, body: &str) -> LlmError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string());

    match status.as_u16() {
        400 => LlmError::InvalidRequest(message),
        401 | 403 => LlmError::AuthenticationFailed,
        429 => LlmError::RateLimited,
        _ => LlmError::Provider {
            message: format!("HTTP {status}: {message}"),
        },
    }
}

/// Send `request` and fail with a mapped error on non-2xx status.
pub async fn send_checked(
    client: &reqwest::Client,
    url: &str,
    body: &GenerateContentRequest,
    api_key: &SecretString,
) -> Result<reqwest::Response, LlmError> {
    let response = client
        .post(url)
        .header("x-goog-api-key", api_key.expose_secret())
        .json(body)
        .send()
        .await
        .map_err(|e| LlmError::Provider {
            message: format!("HTTP request failed: {e}"),
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = %status, "Gemini API error response");
        return Err(status_error(status, &body));
    }
    Ok(response)
}

/// Open a streaming connection and yield the text of each event.
pub fn create_gemini_stream(
    client: &reqwest::Client,
    url: &str,
    body: GenerateContentRequest,
    api_key: &SecretString,
) -> Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send + 'static>> {
    let client = client.clone();
    let url = url.to_string();
    let api_key = api_key.clone();

    Box::pin(async_stream::try_stream! {
        let response = send_checked(&client, &url, &body, &api_key).await?;
        let mut events = response.bytes_stream().eventsource();

        while let Some(event) = events.next().await {
            let event = event.map_err(|e| LlmError::Stream(format!("SSE read: {e}")))?;
            if event.data.trim().is_empty() {
                continue;
            }

            let chunk = parse_chunk(&event.data)?;
            if let Some(reason) = &chunk.finish_reason {
                tracing::debug!(
                    finish_reason = %reason,
                    output_tokens = ?chunk.output_tokens,
                    "stream finished"
                );
            }
            yield chunk.text;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_chunk() {
        let data = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hel"}]}}]}"#;
        let chunk = parse_chunk(data).unwrap();
        assert_eq!(chunk.text, "Hel");
        assert!(chunk.finish_reason.is_none());
    }

    #[test]
    fn test_parse_final_chunk() {
        let data = r#"{
            "candidates":[{"content":{"role":"model","parts":[{"text":""}]},"finishReason":"STOP"}],
            "usageMetadata":{"promptTokenCount":900,"candidatesTokenCount":42}
        }"#;
        let chunk = parse_chunk(data).unwrap();
        assert_eq!(chunk.text, "");
        assert_eq!(chunk.finish_reason.as_deref(), Some("STOP"));
        assert_eq!(chunk.output_tokens, Some(42));
    }

    #[test]
    fn test_parse_error_event() {
        let data = r#"{"error":{"code":503,"message":"overloaded","status":"UNAVAILABLE"}}"#;
        let err = parse_chunk(data).unwrap_err();
        assert!(err.to_string().contains("overloaded"));
    }

    #[test]
    fn test_parse_blocked_prompt() {
        let err = parse_chunk(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap_err();
        assert!(matches!(err, LlmError::Blocked(reason) if reason == "SAFETY"));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            parse_chunk("not json"),
            Err(LlmError::Deserialization(_))
        ));
    }

    #[test]
    fn test_status_error_mapping() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        assert!(matches!(
            status_error(reqwest::StatusCode::BAD_REQUEST, body),
            LlmError::InvalidRequest(m) if m == "API key not valid"
        ));
        assert!(matches!(
            status_error(reqwest::StatusCode::FORBIDDEN, ""),
            LlmError::AuthenticationFailed
        ));
        assert!(matches!(
            status_error(reqwest::StatusCode::TOO_MANY_REQUESTS, ""),
            LlmError::RateLimited
        ));
        let err = status_error(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert!(err.to_string().contains("boom"));
    }
}
