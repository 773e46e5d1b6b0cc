//! Model provider abstractions for EDGO.
//!
//! - `ChatModel`: RPITIT trait for concrete provider implementations
//! - `BoxChatModel`: Object-safe wrapper for dynamic dispatch

pub mod box_provider;
pub mod provider;

#[cfg(test)]
pub(crate) mod testing;
