//! Diagnostics behind the `typetool` binary.

pub mod commands;
