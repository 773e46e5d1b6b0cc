//! ChatModel trait definition.
//!
//! The port every remote model backend implements. Uses RPITIT for
//! `generate` and `Pin<Box<dyn Stream>>` for `stream` so that
//! `BoxChatModel` can erase the concrete type.

use std::pin::Pin;

use futures_util::Stream;

use edgo_types::llm::{ChatRequest, LlmError};

/// A stateless remote model that can answer a fully assembled request.
///
/// Implementations live in edgo-infra (e.g. `GeminiModel`). Session state
/// (instruction, history) is owned by the caller and sent with every
/// request.
pub trait ChatModel: Send + Sync {
    /// Provider name used in logs (e.g. "gemini").
    fn name(&self) -> &str;

    /// Verify the model can be called at all (credentials present, client
    /// built). Runs once per session creation, before any request.
    fn check_ready(&self) -> Result<(), LlmError> {
        Ok(())
    }

    /// Send a request and wait for the whole reply text.
    fn generate(
        &self,
        request: &ChatRequest,
    ) -> impl std::future::Future<Output = Result<String, LlmError>> + Send;

    /// Send a request and receive raw text chunks in arrival order.
    ///
    /// Chunks may be empty; the session layer filters them.
    fn stream(
        &self,
        request: ChatRequest,
    ) -> Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send + 'static>>;
}
