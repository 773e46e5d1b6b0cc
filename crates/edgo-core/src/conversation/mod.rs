//! Conversation lifecycle: the in-memory transcript and the controller that
//! drives it against a session adapter.
//!
//! - `store`: synchronous state transitions over `ConversationState`
//! - `stream`: folds a reply stream into replace-by-id text updates
//! - `counselor`: async operations tying the store to a `SessionAdapter`

pub mod counselor;
pub mod store;
pub mod stream;
