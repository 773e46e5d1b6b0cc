//! Interactive terminal chat with EDGO.
//!
//! Stage picker, greeting, async input loop with live reply preview,
//! markdown rendering, and slash commands for history, edit-and-replay, and
//! returning home. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
