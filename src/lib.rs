//! Typing-game matching engines.
//!
//! The romanization table and phrase romanizer live in [`akikan_core`], the
//! stateful engines in [`akikan_session`]. This crate wires them together
//! behind [`Engine`].

mod engine;
mod trace_init;

pub use akikan_core;
pub use akikan_session;

pub use engine::{Engine, EngineError};
pub use trace_init::init_tracing;
