//! Shared domain types for EDGO.
//!
//! This crate contains the core domain types used across the workspace:
//! conversation messages and state, LLM session shapes, the career knowledge
//! table, and configuration.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod career;
pub mod chat;
pub mod config;
pub mod llm;
