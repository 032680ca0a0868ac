//! Embeddable interactive command interpreter.
//!
//! The engine is a registry-based dispatch system. Commands implement the
//! [`Command`] trait and are registered by name. The [`Shell`] reads lines,
//! tokenizes them, resolves the first token in its registry, and dispatches
//! `execute()` with the full token sequence and the host's context value.

mod builtins;
mod interpreter;
mod lexer;

/// Register the standard sample commands (help, echo, version).
pub use builtins::register_builtins;
/// The standard sample commands, also usable individually.
pub use builtins::{EchoCmd, HelpCmd, VersionCmd};
/// A single executable command trait.
pub use interpreter::Command;
/// Output produced by a command.
pub use interpreter::CommandOutput;
/// Registry of available commands, keyed by unique name.
pub use interpreter::CommandRegistry;
/// Borrowed registry view and host context passed to every command.
pub use interpreter::Environment;
/// Outcome of processing one input line.
pub use interpreter::LineOutcome;
/// The interpreter engine: prompt, exit keyword, registry, context, run-loop.
pub use interpreter::Shell;
/// Split a raw input line into whitespace-delimited tokens.
pub use lexer::tokenize;
