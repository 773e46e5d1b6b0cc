//! Synchronous conversation transitions.
//!
//! `ConversationStore` never awaits. Each method is one atomic mutation of
//! `ConversationState`, and the guards that make an operation a no-op live
//! here so the async controller only has to sequence them.

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use edgo_types::chat::{ConversationState, EducationStage, Message, Role};
use edgo_types::llm::Turn;

/// A reply that has been reserved in the transcript and must now be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    /// Text to send to the model.
    pub prompt: String,
    /// Id of the empty MODEL placeholder that will receive the reply.
    pub reply_id: Uuid,
    /// Reset count when the reply was reserved.
    pub epoch: u64,
}

/// An accepted edit: the session must be rebuilt from `history` before
/// `reply` is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditReplay {
    pub history: Vec<Turn>,
    pub reply: PendingReply,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationStore {
    state: ConversationState,
    /// Bumped by every reset. Work begun under an older epoch no longer
    /// owns the transcript.
    epoch: u64,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether work begun under `epoch` may still touch the transcript.
    pub fn is_current(&self, epoch: u64) -> bool {
        self.epoch == epoch
    }

    pub fn position(&self, id: Uuid) -> Option<usize> {
        self.state.messages.iter().position(|m| m.id == id)
    }

    /// Enter the session for `stage`. Returns `false` when a session has
    /// already started or no real stage was given.
    pub fn begin_stage(&mut self, stage: EducationStage) -> bool {
        if self.state.has_started || stage == EducationStage::Unselected {
            return false;
        }
        self.state.stage = stage;
        self.state.has_started = true;
        self.state.is_loading = true;
        true
    }

    /// Append the opening MODEL message and stop loading.
    pub fn complete_greeting(&mut self, text: impl Into<String>) -> Uuid {
        let message = Message::new(Role::Model, text);
        let id = message.id;
        self.state.messages.push(message);
        self.state.is_loading = false;
        id
    }

    /// Append a USER message and an empty MODEL placeholder.
    ///
    /// Rejected (returns `None`) before a stage is selected, while
    /// loading, or for blank text.
    pub fn begin_user_turn(&mut self, text: &str) -> Option<PendingReply> {
        let text = text.trim();
        if text.is_empty() || self.state.is_loading || !self.state.has_started {
            return None;
        }

        let placeholder = Message::placeholder();
        let reply_id = placeholder.id;
        self.state.messages.push(Message::new(Role::User, text));
        self.state.messages.push(placeholder);
        self.state.is_loading = true;

        Some(PendingReply {
            prompt: text.to_string(),
            reply_id,
            epoch: self.epoch,
        })
    }

    /// Rewrite USER message `id`, drop everything after it, and reserve a
    /// new placeholder.
    ///
    /// Rejected while loading, for unknown ids, for MODEL messages, and for
    /// blank text. Non-blank text is kept exactly as given.
    pub fn begin_edit(&mut self, id: Uuid, new_text: &str) -> Option<EditReplay> {
        if self.state.is_loading || new_text.trim().is_empty() {
            return None;
        }
        let index = self.position(id)?;
        if self.state.messages[index].role != Role::User {
            return None;
        }

        let history = self.state.messages[..index]
            .iter()
            .filter(|m| !m.text.is_empty())
            .map(|m| Turn {
                role: m.role,
                text: m.text.clone(),
            })
            .collect();

        let dropped = self.state.messages.len() - index - 1;
        self.state.messages.truncate(index + 1);
        let target = &mut self.state.messages[index];
        target.text = new_text.to_string();
        target.timestamp = Utc::now();

        let placeholder = Message::placeholder();
        let reply_id = placeholder.id;
        self.state.messages.push(placeholder);
        self.state.is_loading = true;
        debug!(message_id = %id, index, dropped, "transcript rewound for edit");

        Some(EditReplay {
            history,
            reply: PendingReply {
                prompt: new_text.to_string(),
                reply_id,
                epoch: self.epoch,
            },
        })
    }

    /// Replace the text of message `id`. Returns `false` if it is gone.
    pub fn apply_reply_text(&mut self, id: Uuid, text: &str) -> bool {
        match self.state.messages.iter_mut().find(|m| m.id == id) {
            Some(message) => {
                message.text.clear();
                message.text.push_str(text);
                true
            }
            None => false,
        }
    }

    /// Clear the loading flag. Returns whether it was set.
    pub fn finish_loading(&mut self) -> bool {
        std::mem::replace(&mut self.state.is_loading, false)
    }

    /// Clear the loading flag for work begun under `epoch`. A no-op once a
    /// reset has happened since, so a stale exchange cannot unblock the
    /// next one.
    pub fn finish_exchange(&mut self, epoch: u64) -> bool {
        self.is_current(epoch) && self.finish_loading()
    }

    /// Return to the stage picker.
    ///
    /// With messages present, `confirm` is asked first and a refusal leaves
    /// everything untouched. Without messages only the stage flags reset.
    pub fn reset(&mut self, confirm: impl FnOnce() -> bool) -> bool {
        if !self.state.messages.is_empty() {
            if !confirm() {
                return false;
            }
            self.state = ConversationState::default();
        } else {
            self.state.has_started = false;
            self.state.stage = EducationStage::Unselected;
            self.state.is_loading = false;
        }
        self.epoch += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> ConversationStore {
        let mut store = ConversationStore::new();
        assert!(store.begin_stage(EducationStage::Class12));
        store.complete_greeting("Namaste! What is your name?");
        store
    }

    fn answer(store: &mut ConversationStore, pending: &PendingReply, text: &str) {
        store.apply_reply_text(pending.reply_id, text);
        store.finish_loading();
    }

    #[test]
    fn test_begin_stage_only_once() {
        let mut store = ConversationStore::new();
        assert!(!store.begin_stage(EducationStage::Unselected));
        assert!(store.begin_stage(EducationStage::Class10));
        assert!(store.state().has_started);
        assert!(store.state().is_loading);
        assert!(!store.begin_stage(EducationStage::Class12));
        assert_eq!(store.state().stage, EducationStage::Class10);
    }

    #[test]
    fn test_greeting_appends_one_model_message() {
        let store = started();
        assert_eq!(store.state().messages.len(), 1);
        assert_eq!(store.state().messages[0].role, Role::Model);
        assert!(!store.state().is_loading);
    }

    #[test]
    fn test_user_turn_grows_by_two() {
        let mut store = started();
        let pending = store.begin_user_turn("  Asha  ").unwrap();
        let messages = &store.state().messages;
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].text, "Asha");
        assert_eq!(messages[2].id, pending.reply_id);
        assert!(messages[2].text.is_empty());
        assert_eq!(pending.prompt, "Asha");
        assert!(store.state().is_loading);
    }

    #[test]
    fn test_user_turn_rejected_when_blank_or_loading() {
        let mut store = started();
        assert!(store.begin_user_turn("   ").is_none());
        assert_eq!(store.state().messages.len(), 1);

        store.begin_user_turn("first").unwrap();
        assert!(store.begin_user_turn("second").is_none());
        assert_eq!(store.state().messages.len(), 3);
    }

    #[test]
    fn test_apply_reply_text_replaces_by_id() {
        let mut store = started();
        let pending = store.begin_user_turn("hi").unwrap();
        assert!(store.apply_reply_text(pending.reply_id, "Hel"));
        assert!(store.apply_reply_text(pending.reply_id, "Hello"));
        assert_eq!(store.state().messages[2].text, "Hello");
        assert!(!store.apply_reply_text(Uuid::now_v7(), "x"));
    }

    #[test]
    fn test_edit_truncates_to_k_plus_two() {
        let mut store = started();
        let first = store.begin_user_turn("Asha").unwrap();
        answer(&mut store, &first, "Nice to meet you, Asha.");
        let second = store.begin_user_turn("I like maths").unwrap();
        answer(&mut store, &second, "Great!");
        assert_eq!(store.state().messages.len(), 5);

        let target = store.state().messages[1].id;
        let old_reply = store.state().messages[2].id;
        let replay = store.begin_edit(target, "Ravi").unwrap();

        let messages = &store.state().messages;
        assert_eq!(messages.len(), 1 + 2);
        assert_eq!(messages[1].id, target);
        assert_eq!(messages[1].text, "Ravi");
        assert_eq!(messages[2].id, replay.reply.reply_id);
        assert!(store.position(old_reply).is_none());
        assert_eq!(replay.history, vec![Turn::model("Namaste! What is your name?")]);
        assert_eq!(replay.reply.prompt, "Ravi");
        assert!(store.state().is_loading);
    }

    #[test]
    fn test_edit_guards() {
        let mut store = started();
        let greeting = store.state().messages[0].id;
        let pending = store.begin_user_turn("Asha").unwrap();
        let user = store.state().messages[1].id;

        // loading
        assert!(store.begin_edit(user, "Ravi").is_none());
        answer(&mut store, &pending, "Hi Asha");

        assert!(store.begin_edit(Uuid::now_v7(), "Ravi").is_none());
        assert!(store.begin_edit(greeting, "Ravi").is_none());
        assert!(store.begin_edit(user, "  ").is_none());
        assert_eq!(store.state().messages.len(), 3);
        assert_eq!(store.state().messages[1].text, "Asha");
    }

    #[test]
    fn test_user_turn_rejected_before_stage() {
        let mut store = ConversationStore::new();
        assert!(store.begin_user_turn("hello").is_none());
        assert!(store.state().messages.is_empty());

        let mut store = started();
        assert!(store.reset(|| true));
        assert!(store.begin_user_turn("hello").is_none());
        assert!(store.state().messages.is_empty());
    }

    #[test]
    fn test_edit_keeps_text_as_typed() {
        let mut store = started();
        let pending = store.begin_user_turn("Asha").unwrap();
        answer(&mut store, &pending, "Hi Asha");

        let target = store.state().messages[1].id;
        let replay = store.begin_edit(target, "  Ravi\n").unwrap();
        assert_eq!(store.state().messages[1].text, "  Ravi\n");
        assert_eq!(replay.reply.prompt, "  Ravi\n");
    }

    #[test]
    fn test_stale_exchange_cannot_clear_loading() {
        let mut store = started();
        let stale = store.begin_user_turn("Asha").unwrap();
        assert!(store.reset(|| true));
        assert!(!store.is_current(stale.epoch));

        assert!(store.begin_stage(EducationStage::Undergrad));
        assert!(!store.apply_reply_text(stale.reply_id, "Hello"));
        assert!(!store.finish_exchange(stale.epoch));
        assert!(store.state().is_loading);

        assert!(store.finish_exchange(store.epoch()));
        assert!(!store.state().is_loading);
    }

    #[test]
    fn test_reset_requires_confirmation_with_messages() {
        let mut store = started();
        assert!(!store.reset(|| false));
        assert_eq!(store.state().messages.len(), 1);

        assert!(store.reset(|| true));
        assert_eq!(store.state(), &ConversationState::default());
    }

    #[test]
    fn test_reset_without_messages_skips_confirmation() {
        let mut store = ConversationStore::new();
        store.begin_stage(EducationStage::Undergrad);
        store.finish_loading();
        assert!(store.reset(|| panic!("confirmation not expected")));
        assert!(!store.state().has_started);
        assert_eq!(store.state().stage, EducationStage::Unselected);
    }
}
