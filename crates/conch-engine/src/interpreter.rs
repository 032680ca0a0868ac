//! Command trait, registry, and the shell run-loop.
//!
//! The shell owns a registry of named commands and an opaque host context.
//! Each input line is tokenized, the first token resolved against the
//! registry, and the matched command invoked with the full token sequence.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use conch_types::error::{ConchError, Result};

use crate::lexer;

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Plain text, printed by the run-loop followed by a newline.
    Text(String),
    /// Command produced no visible output.
    None,
}

/// Borrowed view handed to every command invocation.
///
/// Grants read access to the live registry (so help-style commands can
/// enumerate it) and mutable access to the host context. Commands must not
/// retain either borrow beyond the call.
pub struct Environment<'a, C> {
    /// The registry that dispatched this invocation.
    pub registry: &'a CommandRegistry<C>,
    /// The host's context value, borrowed for the duration of the call.
    pub context: &'a mut C,
}

/// A single executable command.
///
/// The name is the command's identity: non-empty, compared byte-for-byte,
/// case-sensitive. `C` is the host context type shared with every
/// invocation.
pub trait Command<C> {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// One-line description for `help`. Empty means no description.
    fn description(&self) -> &str {
        ""
    }

    /// Execute the command.
    ///
    /// `argv` is the full token sequence for the line, including `argv[0]`
    /// (the command name itself). The slice is only valid for the duration
    /// of the call.
    fn execute(&self, argv: &[&str], env: &mut Environment<'_, C>) -> Result<CommandOutput>;
}

/// Registry of available commands, keyed by unique name.
///
/// Registration is atomic add-or-reject: a duplicate name is refused
/// without mutating the registry. Lookup is exact-name only.
pub struct CommandRegistry<C> {
    commands: HashMap<String, Box<dyn Command<C>>>,
}

impl<C> CommandRegistry<C> {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Register a command, taking ownership of it.
    ///
    /// Fails with a duplicate-command error if a command with the same name
    /// is already present, and with a malformed-command error if the name
    /// is empty. The registry is unchanged on failure.
    pub fn register(&mut self, cmd: Box<dyn Command<C>>) -> Result<()> {
        let name = cmd.name();
        if name.is_empty() {
            return Err(ConchError::MalformedCommand(
                "command name must not be empty".to_string(),
            ));
        }
        if self.commands.contains_key(name) {
            return Err(ConchError::DuplicateCommand(name.to_string()));
        }
        log::debug!("registered command {name:?}");
        self.commands.insert(name.to_string(), cmd);
        Ok(())
    }

    /// Look up a command by exact name.
    pub fn get(&self, name: &str) -> Option<&dyn Command<C>> {
        self.commands.get(name).map(Box::as_ref)
    }

    /// All currently registered commands, sorted by name.
    ///
    /// Reflects the live state of the registry at call time.
    pub fn commands(&self) -> Vec<&dyn Command<C>> {
        let mut cmds: Vec<&dyn Command<C>> = self.commands.values().map(Box::as_ref).collect();
        cmds.sort_by(|a, b| a.name().cmp(b.name()));
        cmds
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry holds no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Release every owned command. Idempotent: calling this more than once
    /// (or not at all; `Drop` releases whatever remains) is fine.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl<C> Default for CommandRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> std::fmt::Debug for CommandRegistry<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Outcome of processing one input line.
#[derive(Debug)]
pub enum LineOutcome {
    /// Keep reading lines; carries the output the line produced.
    Continue(CommandOutput),
    /// The exit keyword was entered; the session is over.
    Exit,
}

/// The interpreter engine.
///
/// Owns one registry, a prompt string, an exit keyword, and the host's
/// opaque context value. The engine never inspects the context; it hands it
/// to commands by mutable borrow and gives it back via
/// [`Shell::into_context`].
#[derive(Debug)]
pub struct Shell<C> {
    prompt: String,
    exit_keyword: String,
    registry: CommandRegistry<C>,
    context: C,
}

impl<C> Shell<C> {
    /// Create a shell with an empty registry.
    ///
    /// Fails with a missing-value error if the prompt or the exit keyword
    /// is empty.
    pub fn new(prompt: &str, exit_keyword: &str, context: C) -> Result<Self> {
        if prompt.is_empty() {
            return Err(ConchError::MissingValue("prompt".to_string()));
        }
        if exit_keyword.is_empty() {
            return Err(ConchError::MissingValue("exit keyword".to_string()));
        }
        Ok(Self {
            prompt: prompt.to_string(),
            exit_keyword: exit_keyword.to_string(),
            registry: CommandRegistry::new(),
            context,
        })
    }

    /// Register a command, surfacing the registry's outcome unchanged.
    pub fn register_command(&mut self, cmd: Box<dyn Command<C>>) -> Result<()> {
        self.registry.register(cmd)
    }

    /// The shell's registry.
    pub fn registry(&self) -> &CommandRegistry<C> {
        &self.registry
    }

    /// Mutable access to the shell's registry, for bulk registration.
    pub fn registry_mut(&mut self) -> &mut CommandRegistry<C> {
        &mut self.registry
    }

    /// The prompt string displayed before each line read.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The keyword that terminates the session.
    pub fn exit_keyword(&self) -> &str {
        &self.exit_keyword
    }

    /// The host context, as stored.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Mutable access to the host context.
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Tear the shell down, releasing the registry and every command it
    /// owns, and give the context back to the host.
    pub fn into_context(self) -> C {
        self.context
    }

    /// Process a single input line.
    ///
    /// An empty or all-whitespace line is a no-op. If the first token
    /// equals the exit keyword the result is [`LineOutcome::Exit`] and no
    /// lookup happens, even if a command is registered under that name.
    /// Otherwise the first token is resolved in the registry and the
    /// command invoked with the full token sequence. A failing command (or
    /// an unresolved name) is an error to report, never the end of the
    /// session.
    pub fn process_line(&mut self, line: &str) -> Result<LineOutcome> {
        let tokens = lexer::tokenize(line);
        if tokens.is_empty() {
            return Ok(LineOutcome::Continue(CommandOutput::None));
        }
        if tokens[0] == self.exit_keyword {
            log::debug!("exit keyword entered");
            return Ok(LineOutcome::Exit);
        }

        let argv: Vec<&str> = tokens.iter().map(String::as_str).collect();
        let registry = &self.registry;
        match registry.get(argv[0]) {
            Some(cmd) => {
                log::debug!("dispatching {:?} ({} tokens)", argv[0], argv.len());
                let mut env = Environment {
                    registry,
                    context: &mut self.context,
                };
                let output = cmd.execute(&argv, &mut env)?;
                Ok(LineOutcome::Continue(output))
            },
            None => Err(ConchError::CommandNotFound(argv[0].to_string())),
        }
    }

    /// Run the blocking read-dispatch-report loop over stdin/stdout.
    ///
    /// Terminates cleanly on end of input or the exit keyword; a read error
    /// terminates the loop with an I/O error.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut input = stdin.lock();
        let mut output = stdout.lock();
        self.run_with(&mut input, &mut output)
    }

    /// Run the loop over an arbitrary reader/writer pair.
    ///
    /// Each iteration writes the prompt, flushes it so it is visible before
    /// blocking, reads one line, strips exactly one trailing line
    /// terminator, skips empty lines without output, and otherwise
    /// processes the line, printing its output or a one-line error report.
    pub fn run_with<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> Result<()> {
        let mut line = String::new();
        loop {
            write!(output, "{}", self.prompt)?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                // Clean end of input.
                log::debug!("input stream ended");
                return Ok(());
            }
            if line.ends_with('\n') {
                line.pop();
                if line.ends_with('\r') {
                    line.pop();
                }
            }
            if line.is_empty() {
                continue;
            }

            match self.process_line(&line) {
                Ok(LineOutcome::Exit) => return Ok(()),
                Ok(LineOutcome::Continue(CommandOutput::Text(text))) => {
                    writeln!(output, "{text}")?;
                },
                Ok(LineOutcome::Continue(CommandOutput::None)) => {},
                Err(e) => {
                    writeln!(output, "error: {e}")?;
                },
            }
        }
    }
}
