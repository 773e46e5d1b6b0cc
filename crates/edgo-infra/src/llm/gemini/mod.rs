//! Google Gemini provider.
//!
//! [`GeminiModel`] implements
//! [`ChatModel`](edgo_core::llm::provider::ChatModel) against the
//! Generative Language REST API: `models/{model}:generateContent` for
//! single-shot requests and `:streamGenerateContent?alt=sse` for streams.

pub mod client;
pub mod streaming;
pub mod types;

pub use client::GeminiModel;
