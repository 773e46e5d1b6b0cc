//! Session adapter over a [`ChatModel`].
//!
//! A session binds a system instruction and a replayable history to the
//! model. The adapter owns at most one live session; creating a new one
//! discards the old. Remote errors never escape: single-shot requests fall
//! back to fixed strings and streams end with a `TerminalError` item.

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures_util::{Stream, StreamExt};
use pin_project_lite::pin_project;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use edgo_types::llm::{
    ChatRequest, CONNECTION_ERROR_FALLBACK, EMPTY_RESPONSE_FALLBACK, GenerationConfig, LlmError,
    STREAM_ERROR_FALLBACK, SessionError, StreamItem, Turn,
};

use crate::llm::box_provider::BoxChatModel;

/// Reply stream borrowed from the adapter for the duration of one exchange.
pub type ReplyStream<'a> = Pin<Box<dyn Stream<Item = StreamItem> + Send + 'a>>;

/// A live session: instruction plus the turns exchanged so far.
#[derive(Debug, Clone)]
pub struct ChatSession {
    pub id: Uuid,
    pub system_instruction: String,
    pub history: Vec<Turn>,
}

#[derive(Debug)]
enum SessionState {
    Uninitialized,
    Active(ChatSession),
    Ended,
}

/// Owns the model handle and the current session.
#[derive(Debug)]
pub struct SessionAdapter {
    model: BoxChatModel,
    generation: GenerationConfig,
    idle_timeout: Option<Duration>,
    state: SessionState,
}

impl SessionAdapter {
    pub fn new(model: BoxChatModel, generation: GenerationConfig) -> Self {
        Self {
            model,
            generation,
            idle_timeout: None,
            state: SessionState::Uninitialized,
        }
    }

    /// End a reply stream when no chunk arrives within `timeout`.
    pub fn with_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.idle_timeout = timeout;
        self
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active(_))
    }

    /// The live session, if any.
    pub fn session(&self) -> Option<&ChatSession> {
        match &self.state {
            SessionState::Active(session) => Some(session),
            _ => None,
        }
    }

    /// Open a fresh session, replacing any existing one.
    ///
    /// Fails with [`SessionError::Initialization`] when the model is not
    /// usable; the previous session is kept in that case.
    pub fn create_session(
        &mut self,
        system_instruction: impl Into<String>,
        history: Vec<Turn>,
    ) -> Result<Uuid, SessionError> {
        self.model
            .check_ready()
            .map_err(SessionError::Initialization)?;

        if let SessionState::Active(old) = &self.state {
            debug!(session_id = %old.id, "discarding previous session");
        }

        let session = ChatSession {
            id: Uuid::now_v7(),
            system_instruction: system_instruction.into(),
            history,
        };
        let id = session.id;
        info!(
            session_id = %id,
            provider = self.model.name(),
            history_len = session.history.len(),
            "session created"
        );
        self.state = SessionState::Active(session);
        Ok(id)
    }

    /// Recreate the session with the same instruction and a truncated
    /// history. Used when the transcript is rewound for an edit.
    pub fn rewind(&mut self, history: Vec<Turn>) -> Result<Uuid, SessionError> {
        let instruction = self
            .session()
            .map(|s| s.system_instruction.clone())
            .ok_or(SessionError::Uninitialized)?;
        self.create_session(instruction, history)
    }

    /// Drop the live session. Further requests fail with `Uninitialized`.
    pub fn end(&mut self) {
        if let SessionState::Active(session) = &self.state {
            debug!(session_id = %session.id, "session ended");
            self.state = SessionState::Ended;
        }
    }

    /// Send `prompt` and wait for the whole reply.
    ///
    /// Remote failures and empty replies map to fallback strings; only a
    /// missing session is an error.
    pub async fn request_once(&mut self, prompt: &str) -> Result<String, SessionError> {
        let SessionState::Active(session) = &mut self.state else {
            return Err(SessionError::Uninitialized);
        };
        let request = build_request(session, &self.generation, prompt);

        match self.model.generate(&request).await {
            Ok(text) if text.is_empty() => {
                warn!(session_id = %session.id, "model returned an empty reply");
                Ok(EMPTY_RESPONSE_FALLBACK.to_string())
            }
            Ok(text) => {
                session.history.push(Turn::user(prompt));
                session.history.push(Turn::model(text.clone()));
                Ok(text)
            }
            Err(e) => {
                warn!(session_id = %session.id, error = %e, "single-shot request failed");
                Ok(CONNECTION_ERROR_FALLBACK.to_string())
            }
        }
    }

    /// Send `prompt` and stream the reply.
    ///
    /// Yields non-empty `Fragment`s in arrival order. Any remote error (or
    /// an idle timeout) ends the stream with one `TerminalError`. The
    /// exchange is appended to the history only when the stream completes
    /// cleanly.
    pub fn request_stream(&mut self, prompt: &str) -> Result<ReplyStream<'_>, SessionError> {
        let Self {
            model,
            generation,
            idle_timeout,
            state,
        } = self;
        let SessionState::Active(session) = state else {
            return Err(SessionError::Uninitialized);
        };

        let request = build_request(session, generation, prompt);
        let span = info_span!(
            "session.stream",
            session_id = %session.id,
            history_len = session.history.len(),
        );
        let upstream = StreamInSpan::new(model.stream(request), span);
        let prompt = prompt.to_string();
        let idle = *idle_timeout;

        Ok(Box::pin(async_stream::stream! {
            let mut upstream = upstream;
            let mut reply = String::new();
            let mut failed = false;

            loop {
                let next = match idle {
                    Some(limit) => match tokio::time::timeout(limit, upstream.next()).await {
                        Ok(item) => item,
                        Err(_) => Some(Err(LlmError::IdleTimeout(limit.as_secs()))),
                    },
                    None => upstream.next().await,
                };

                match next {
                    Some(Ok(text)) if text.is_empty() => continue,
                    Some(Ok(text)) => {
                        reply.push_str(&text);
                        yield StreamItem::Fragment(text);
                    }
                    Some(Err(e)) => {
                        warn!(session_id = %session.id, error = %e, "reply stream failed");
                        failed = true;
                        yield StreamItem::TerminalError(STREAM_ERROR_FALLBACK.to_string());
                        break;
                    }
                    None => break,
                }
            }

            if !failed && !reply.is_empty() {
                session.history.push(Turn::user(prompt));
                session.history.push(Turn::model(reply));
            }
        }))
    }
}

fn build_request(session: &ChatSession, generation: &GenerationConfig, prompt: &str) -> ChatRequest {
    let mut contents = session.history.clone();
    contents.push(Turn::user(prompt));
    ChatRequest {
        system_instruction: session.system_instruction.clone(),
        contents,
        generation: generation.clone(),
    }
}

pin_project! {
    /// Keeps a tracing span entered while the inner stream is polled, so
    /// provider logs nest under the session.
    pub struct StreamInSpan<S> {
        #[pin]
        inner: S,
        span: tracing::Span,
    }
}

impl<S> StreamInSpan<S> {
    pub fn new(inner: S, span: tracing::Span) -> Self {
        Self { inner, span }
    }
}

impl<S: Stream> Stream for StreamInSpan<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        let _enter = this.span.enter();
        this.inner.poll_next(cx)
    }
}
