//! The counselor controller.
//!
//! Ties a [`ConversationStore`] to a [`SessionAdapter`]. Every operation
//! takes `&self`, so the presentation layer can hold one controller and
//! call into it from several tasks. Transcript state lives in a `watch`
//! channel: mutations are short closures run through `send_modify` and are
//! never held across an await, and renderers subscribe for change
//! notifications. The session sits behind an async mutex that is held for
//! the duration of one exchange. Each exchange remembers the store epoch
//! it began under; once a reset bumps the epoch its completion no longer
//! touches the transcript.

use tokio::sync::{Mutex, watch};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use edgo_types::chat::{ConversationState, EducationStage};
use edgo_types::llm::STREAM_START_FALLBACK;

use super::store::{ConversationStore, PendingReply};
use super::stream::{ReplyEnd, consume_reply};
use crate::prompt::{PromptAssembler, greeting_prompt};
use crate::session::SessionAdapter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    /// A session already started, the stage was `Unselected`, or the
    /// conversation was reset before the greeting arrived.
    Ignored,
    Greeted { message_id: Uuid },
    /// The session could not be created; nothing was appended.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeOutcome {
    /// Rejected by a guard (blank text, loading, bad edit target).
    Ignored,
    Replied { message_id: Uuid, end: ReplyEnd },
    /// No session to stream from; the placeholder holds the start fallback.
    Unavailable { message_id: Uuid },
}

pub struct Counselor {
    store: watch::Sender<ConversationStore>,
    session: Mutex<SessionAdapter>,
    prompts: PromptAssembler,
}

impl Counselor {
    pub fn new(session: SessionAdapter, prompts: PromptAssembler) -> Self {
        Self {
            store: watch::Sender::new(ConversationStore::new()),
            session: Mutex::new(session),
            prompts,
        }
    }

    /// Receive a notification after every transcript change.
    pub fn subscribe(&self) -> watch::Receiver<ConversationStore> {
        self.store.subscribe()
    }

    pub fn snapshot(&self) -> ConversationState {
        self.store.borrow().state().clone()
    }

    pub fn prompts(&self) -> &PromptAssembler {
        &self.prompts
    }

    /// Start counseling for `stage`: open a session and fetch the greeting.
    pub async fn select_stage(&self, stage: EducationStage) -> StageOutcome {
        let mut epoch = None;
        self.store.send_if_modified(|s| {
            let accepted = s.begin_stage(stage);
            if accepted {
                epoch = Some(s.epoch());
            }
            accepted
        });
        let Some(epoch) = epoch else {
            return StageOutcome::Ignored;
        };
        info!(%stage, "stage selected");

        let mut session = self.session.lock().await;
        if !self.store.borrow().is_current(epoch) {
            debug!(%stage, "conversation reset before the session opened");
            return StageOutcome::Ignored;
        }
        if let Err(e) = session.create_session(self.prompts.system_instruction(stage), Vec::new()) {
            error!(error = %e, %stage, "failed to start counseling session");
            self.store.send_if_modified(|s| s.finish_exchange(epoch));
            return StageOutcome::Failed;
        }

        match session.request_once(&greeting_prompt(stage)).await {
            Ok(text) => {
                let mut message_id = None;
                self.store.send_if_modified(|s| {
                    if s.is_current(epoch) {
                        message_id = Some(s.complete_greeting(text));
                    }
                    message_id.is_some()
                });
                match message_id {
                    Some(message_id) => StageOutcome::Greeted { message_id },
                    None => {
                        debug!(%stage, "greeting arrived after reset; discarded");
                        StageOutcome::Ignored
                    }
                }
            }
            Err(e) => {
                error!(error = %e, %stage, "greeting request failed");
                self.store.send_if_modified(|s| s.finish_exchange(epoch));
                StageOutcome::Failed
            }
        }
    }

    /// Send a new user message and stream the reply into a placeholder.
    pub async fn send_user_message(&self, text: &str) -> ExchangeOutcome {
        let mut pending = None;
        self.store.send_if_modified(|s| {
            pending = s.begin_user_turn(text);
            pending.is_some()
        });
        let Some(pending) = pending else {
            return ExchangeOutcome::Ignored;
        };

        let mut session = self.session.lock().await;
        self.stream_reply(&mut session, pending).await
    }

    /// Rewrite an earlier user message, drop everything after it, rebuild
    /// the session from the remaining transcript, and stream a new reply.
    pub async fn edit_message(&self, id: Uuid, new_text: &str) -> ExchangeOutcome {
        let mut replay = None;
        self.store.send_if_modified(|s| {
            replay = s.begin_edit(id, new_text);
            replay.is_some()
        });
        let Some(replay) = replay else {
            return ExchangeOutcome::Ignored;
        };

        let mut session = self.session.lock().await;
        if let Err(e) = session.rewind(replay.history) {
            error!(error = %e, message_id = %id, "failed to rebuild session for edit");
            self.fail_reply(&replay.reply);
            return ExchangeOutcome::Unavailable {
                message_id: replay.reply.reply_id,
            };
        }
        self.stream_reply(&mut session, replay.reply).await
    }

    /// Return to the stage picker. `confirm` is consulted only when the
    /// transcript is non-empty. Returns whether the reset happened.
    pub fn reset(&self, confirm: impl FnOnce() -> bool) -> bool {
        let done = self.store.send_if_modified(|s| s.reset(confirm));
        if done {
            match self.session.try_lock() {
                Ok(mut session) => session.end(),
                Err(_) => warn!("session busy during reset; it will be replaced on next stage"),
            }
            info!("conversation reset");
        }
        done
    }

    async fn stream_reply(
        &self,
        session: &mut SessionAdapter,
        pending: PendingReply,
    ) -> ExchangeOutcome {
        let message_id = pending.reply_id;
        let stream = match session.request_stream(&pending.prompt) {
            Ok(stream) => stream,
            Err(e) => {
                error!(error = %e, %message_id, "could not start reply stream");
                self.fail_reply(&pending);
                return ExchangeOutcome::Unavailable { message_id };
            }
        };

        let end = consume_reply(stream, |text| {
            self.store
                .send_if_modified(|s| s.apply_reply_text(message_id, text));
        })
        .await;
        let current = self
            .store
            .send_if_modified(|s| s.finish_exchange(pending.epoch));
        info!(%message_id, ?end, current, "reply finished");

        ExchangeOutcome::Replied { message_id, end }
    }

    fn fail_reply(&self, pending: &PendingReply) {
        self.store.send_if_modified(|s| {
            let written = s.apply_reply_text(pending.reply_id, STREAM_START_FALLBACK);
            s.finish_exchange(pending.epoch) || written
        });
    }
}
