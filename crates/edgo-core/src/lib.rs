//! Business logic and port definitions for EDGO.
//!
//! This crate defines the `ChatModel` port that the infrastructure layer
//! implements, plus everything that runs above it: prompt assembly, the
//! session adapter, and the conversation store and controller. It depends
//! only on `edgo-types` -- never on `edgo-infra` or any HTTP crate.

pub mod career;
pub mod conversation;
pub mod llm;
pub mod prompt;
pub mod session;
