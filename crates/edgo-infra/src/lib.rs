//! Infrastructure adapters for EDGO.
//!
//! - `llm::gemini`: the Google Gemini `ChatModel` over reqwest + SSE
//! - `config`: `config.toml` and persona file loading
//! - `filesystem`: data directory resolution
//! - `secret`: API key lookup from the environment

pub mod config;
pub mod filesystem;
pub mod llm;
pub mod secret;
