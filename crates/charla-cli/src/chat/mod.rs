//! Interactive chat: input loop, streaming render, slash commands.

pub mod banner;
pub mod commands;
pub mod consent;
pub mod input;
pub mod loop_runner;
pub mod renderer;
pub mod surface;
