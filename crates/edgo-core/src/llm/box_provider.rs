//! BoxChatModel -- object-safe dynamic dispatch wrapper for ChatModel.
//!
//! 1. `ChatModelDyn` is the object-safe twin with boxed futures
//! 2. Blanket-impl `ChatModelDyn` for all `T: ChatModel`
//! 3. `BoxChatModel` wraps `Box<dyn ChatModelDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use futures_util::Stream;

use edgo_types::llm::{ChatRequest, LlmError};

use super::provider::ChatModel;

/// Object-safe version of [`ChatModel`] with boxed futures.
pub trait ChatModelDyn: Send + Sync {
    fn name(&self) -> &str;

    fn check_ready(&self) -> Result<(), LlmError>;

    fn generate_boxed<'a>(
        &'a self,
        request: &'a ChatRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, LlmError>> + Send + 'a>>;

    fn stream_boxed(
        &self,
        request: ChatRequest,
    ) -> Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send + 'static>>;
}

impl<T: ChatModel> ChatModelDyn for T {
    fn name(&self) -> &str {
        ChatModel::name(self)
    }

    fn check_ready(&self) -> Result<(), LlmError> {
        ChatModel::check_ready(self)
    }

    fn generate_boxed<'a>(
        &'a self,
        request: &'a ChatRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, LlmError>> + Send + 'a>> {
        Box::pin(self.generate(request))
    }

    fn stream_boxed(
        &self,
        request: ChatRequest,
    ) -> Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send + 'static>> {
        self.stream(request)
    }
}

/// Type-erased chat model, so the session adapter does not need to be
/// generic over the backend.
pub struct BoxChatModel {
    inner: Box<dyn ChatModelDyn + Send + Sync>,
}

impl BoxChatModel {
    pub fn new<T: ChatModel + 'static>(model: T) -> Self {
        Self {
            inner: Box::new(model),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn check_ready(&self) -> Result<(), LlmError> {
        self.inner.check_ready()
    }

    pub async fn generate(&self, request: &ChatRequest) -> Result<String, LlmError> {
        self.inner.generate_boxed(request).await
    }

    pub fn stream(
        &self,
        request: ChatRequest,
    ) -> Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send + 'static>> {
        self.inner.stream_boxed(request)
    }
}

impl std::fmt::Debug for BoxChatModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxChatModel")
            .field("name", &self.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgo_types::llm::{GenerationConfig, Turn};
    use futures_util::StreamExt;

    struct Echo;

    impl ChatModel for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        async fn generate(&self, request: &ChatRequest) -> Result<String, LlmError> {
            Ok(request
                .contents
                .last()
                .map(|t| t.text.clone())
                .unwrap_or_default())
        }

        fn stream(
            &self,
            request: ChatRequest,
        ) -> Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send + 'static>> {
            let text = request.contents.last().map(|t| t.text.clone()).unwrap_or_default();
            Box::pin(futures_util::stream::iter(vec![Ok(text)]))
        }
    }

    fn request(text: &str) -> ChatRequest {
        ChatRequest {
            system_instruction: String::new(),
            contents: vec![Turn::user(text)],
            generation: GenerationConfig::default(),
        }
    }

    #[tokio::test]
    async fn test_box_delegates() {
        let model = BoxChatModel::new(Echo);
        assert_eq!(model.name(), "echo");
        assert!(model.check_ready().is_ok());
        assert_eq!(model.generate(&request("ping")).await.unwrap(), "ping");

        let chunks: Vec<_> = model.stream(request("pong")).collect().await;
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].as_ref().unwrap(), "pong");
    }
}
