//! Scripted in-memory `ChatModel` for unit tests.

use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use futures_util::Stream;
use tokio::sync::Notify;

use edgo_types::llm::{ChatRequest, LlmError};

use super::provider::ChatModel;

/// One scripted event in a reply.
#[derive(Clone)]
pub enum Step {
    Text(&'static str),
    Fail,
    /// Block until the `Notify` fires.
    Wait(Arc<Notify>),
    /// Never produce anything again.
    Stall,
}

/// Replays scripted replies in order, one script per request.
#[derive(Clone, Default)]
pub struct ScriptedModel {
    unavailable: bool,
    replies: Arc<Mutex<VecDeque<Vec<Step>>>>,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A model whose readiness check always fails.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn reply(self, steps: Vec<Step>) -> Self {
        self.replies.lock().unwrap().push_back(steps);
        self
    }

    pub fn text(self, text: &'static str) -> Self {
        self.reply(vec![Step::Text(text)])
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next_script(&self, request: ChatRequest) -> Vec<Step> {
        self.requests.lock().unwrap().push(request);
        self.replies.lock().unwrap().pop_front().unwrap_or_default()
    }
}

impl ChatModel for ScriptedModel {
    fn name(&self) -> &str {
        "scripted"
    }

    fn check_ready(&self) -> Result<(), LlmError> {
        if self.unavailable {
            Err(LlmError::AuthenticationFailed)
        } else {
            Ok(())
        }
    }

    async fn generate(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let mut text = String::new();
        for step in self.next_script(request.clone()) {
            match step {
                Step::Text(t) => text.push_str(t),
                Step::Fail => return Err(LlmError::Provider { message: "scripted failure".into() }),
                Step::Wait(gate) => gate.notified().await,
                Step::Stall => std::future::pending::<()>().await,
            }
        }
        Ok(text)
    }

    fn stream(
        &self,
        request: ChatRequest,
    ) -> Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send + 'static>> {
        let steps = self.next_script(request);
        Box::pin(async_stream::stream! {
            for step in steps {
                match step {
                    Step::Text(t) => yield Ok(t.to_string()),
                    Step::Fail => yield Err(LlmError::Stream("scripted failure".into())),
                    Step::Wait(gate) => gate.notified().await,
                    Step::Stall => std::future::pending::<()>().await,
                }
            }
        })
    }
}
